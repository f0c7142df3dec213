// src/file.rs

use std::{
    collections::HashMap,
    fs::{self, File},
    io::BufWriter,
    path::{Path, PathBuf},
};

use crate::config::options::ExportOptions;
use crate::csv::write_dataset;
use crate::data::{DataSet, NamedTable};
use crate::error::{FeedError, Result};

/// Write a single export file based on ExportOptions (path, headers policy, delimiter).
/// Returns the final path written to.
pub fn write_export_single(export: &ExportOptions, ds: &DataSet) -> Result<PathBuf> {
    let path = export.out_path();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }

    write_file(&path, ds, export)?;
    logd!("Wrote {} rows to {}", ds.len(), path.display());
    Ok(path)
}

/// Write one file per table into the directory implied by `export.out_path()`:
/// `<prefix>_<table>.<ext>`.
pub fn write_export_per_table(
    export: &ExportOptions,
    prefix: &str,
    tables: &[NamedTable],
) -> Result<Vec<PathBuf>> {
    let outdir = export.out_path();
    ensure_directory(&outdir)?;

    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut written = Vec::with_capacity(tables.len());
    let ext = export.format.ext();

    for t in tables {
        let stem = sanitize_stem(&format!("{}_{}", prefix, t.kind.as_str()));
        let path = resolve_table_filename(&outdir, &stem, &mut seen, ext);
        write_file(&path, &t.data, export)?;
        written.push(path);
    }

    logd!("Wrote {} tables to {}", written.len(), outdir.display());
    Ok(written)
}

fn write_file(path: &Path, ds: &DataSet, export: &ExportOptions) -> Result<()> {
    let file = File::create(path)?; // truncate/overwrite
    write_dataset(BufWriter::new(file), ds, export.include_headers, export.delimiter())
}

pub fn ensure_directory(dir: &Path) -> Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(FeedError::Io(std::io::Error::new(
            std::io::ErrorKind::AlreadyExists,
            format!("Path exists but is not a directory: {}", dir.display()),
        )));
    }
    if !dir.exists() {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

/// Keep file stems portable: path separators and reserved characters become '_'.
pub fn sanitize_stem(stem: &str) -> String {
    let cleaned: String = stem
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    if cleaned.is_empty() { s!("table") } else { cleaned }
}

/// Duplicate handling **only within this run**
pub fn resolve_table_filename(
    dir: &Path,
    stem: &str,                        // already sanitized, no extension
    seen_names: &mut HashMap<String, usize>,
    ext: &str,                         // "csv" | "tsv"
) -> PathBuf {
    let count = seen_names.entry(stem.to_string()).or_insert(0);

    // First occurrence: "<stem>.ext"
    // Subsequent:       "<stem> (N).ext" with N starting at 2
    let filename = if *count == 0 {
        format!("{stem}.{ext}")
    } else {
        format!("{stem} ({}).{ext}", *count + 1)
    };

    *count += 1;
    dir.join(filename)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_stems_get_numbered() {
        let mut seen = HashMap::new();
        let dir = Path::new("out");
        assert_eq!(resolve_table_filename(dir, "g_hits", &mut seen, "csv"), dir.join("g_hits.csv"));
        assert_eq!(resolve_table_filename(dir, "g_hits", &mut seen, "csv"), dir.join("g_hits (2).csv"));
        assert_eq!(resolve_table_filename(dir, "g_hits", &mut seen, "csv"), dir.join("g_hits (3).csv"));
    }

    #[test]
    fn stems_are_sanitized() {
        assert_eq!(sanitize_stem("2019/02:0001"), "2019_02_0001");
        assert_eq!(sanitize_stem("  "), "table");
    }
}
