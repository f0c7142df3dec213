// src/config/options.rs
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::consts::*;

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct AppOptions {
    pub fetch: FetchOptions,
    pub export: ExportOptions,
}

/// Which derived table of a game to emit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TableKind {
    Events,
    Shots,
    ShotChart,
    Penalties,
    Turnovers,
    Hits,
    Faceoffs,
    Boxscore,
}

impl TableKind {
    pub const ALL: [TableKind; 8] = [
        TableKind::Events,
        TableKind::Shots,
        TableKind::ShotChart,
        TableKind::Penalties,
        TableKind::Turnovers,
        TableKind::Hits,
        TableKind::Faceoffs,
        TableKind::Boxscore,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TableKind::Events => "events",
            TableKind::Shots => "shots",
            TableKind::ShotChart => "shot_chart",
            TableKind::Penalties => "penalties",
            TableKind::Turnovers => "turnovers",
            TableKind::Hits => "hits",
            TableKind::Faceoffs => "faceoffs",
            TableKind::Boxscore => "boxscore",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        let lc = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL.into_iter().find(|k| k.as_str() == lc)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchOptions {
    pub base_url: String,
    pub timeout: Duration,
    pub workers: usize,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            base_url: s!(BASE_URL),
            timeout: Duration::from_secs(HTTP_TIMEOUT_SECS),
            workers: WORKERS,
        }
    }
}

impl FetchOptions {
    /// Defaults, overridden by `NHL_SCRAPE_BASE_URL` / `NHL_SCRAPE_WORKERS` when set.
    pub fn from_env() -> Self {
        let mut opts = Self::default();
        if let Ok(url) = std::env::var(ENV_BASE_URL) {
            let url = url.trim().trim_end_matches('/');
            if !url.is_empty() {
                opts.base_url = s!(url);
            }
        }
        if let Some(n) = std::env::var(ENV_WORKERS).ok().and_then(|v| v.trim().parse::<usize>().ok()) {
            opts.workers = n.max(1);
        }
        opts
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportType {
    SingleFile,
    PerTable,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Tsv,
}

impl ExportFormat {
    pub fn ext(&self) -> &'static str {
        match self { ExportFormat::Csv => "csv", ExportFormat::Tsv => "tsv" }
    }
    pub fn delim(&self) -> u8 {
        match self { ExportFormat::Csv => b',', ExportFormat::Tsv => b'\t' }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportOptions {
    pub format: ExportFormat,
    pub export_type: ExportType,
    out_path: OutputPath,
    pub include_headers: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: ExportFormat::Csv,
            export_type: ExportType::SingleFile,
            out_path: OutputPath::default(),
            include_headers: true,
        }
    }
}

impl ExportOptions {
    pub fn default_dir_for(subdir: &str) -> PathBuf {
        PathBuf::from(DEFAULT_OUT_DIR).join(subdir)
    }

    pub fn set_default_dir(&mut self, subdir: &str) {
        self.out_path.dir = Self::default_dir_for(subdir);
    }

    pub fn set_file_stem(&mut self, stem: &str) {
        self.out_path.file_stem = OsString::from(stem);
    }

    /// SingleFile: `<dir>/<stem>.<ext>` (a user extension is kept). PerTable: the directory.
    pub fn out_path(&self) -> PathBuf {
        let mut path = self.out_path.dir.clone();

        match self.export_type {
            ExportType::SingleFile => {
                let stem = self.out_path.file_stem.to_string_lossy();
                let ext = self
                    .out_path
                    .user_ext
                    .as_deref()
                    .unwrap_or_else(|| self.format.ext());
                path.push(join!(stem.as_ref(), ".", ext));
            }
            ExportType::PerTable => { /* directory only */ }
        }
        path
    }

    /// Split user text into dir + stem (+ explicit extension if one was typed).
    pub fn set_path(&mut self, text: &str) {
        let s = text.trim();

        match self.export_type {
            ExportType::SingleFile => {
                let p = Path::new(s);
                if let Some(parent) = p.parent() {
                    self.out_path.dir = parent.to_path_buf();
                }
                if let Some(stem) = p.file_stem() {
                    self.out_path.file_stem = stem.to_os_string();
                }
                self.out_path.user_ext = p
                    .extension()
                    .map(|e| e.to_string_lossy().into_owned());
            }
            ExportType::PerTable => {
                self.out_path.dir = PathBuf::from(s);
            }
        }
    }

    pub fn delimiter(&self) -> u8 {
        self.format.delim()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct OutputPath {
    dir: PathBuf,
    file_stem: OsString, // without extension
    user_ext: Option<String>,
}

impl Default for OutputPath {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_OUT_DIR).join(DEFAULT_GAMES_SUBDIR),
            file_stem: OsString::from(DEFAULT_FILE),
            user_ext: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_path_follows_format() {
        let mut opts = ExportOptions::default();
        assert!(opts.out_path().to_string_lossy().ends_with("all.csv"));
        opts.format = ExportFormat::Tsv;
        assert!(opts.out_path().to_string_lossy().ends_with("all.tsv"));
    }

    #[test]
    fn user_extension_survives_format_change() {
        let mut opts = ExportOptions::default();
        opts.set_path("out/custom/hello.txt");
        opts.format = ExportFormat::Tsv;
        assert_eq!(opts.out_path(), PathBuf::from("out/custom/hello.txt"));
    }

    #[test]
    fn per_table_path_is_a_directory() {
        let mut opts = ExportOptions::default();
        opts.export_type = ExportType::PerTable;
        opts.set_path("out/game_1");
        assert_eq!(opts.out_path(), PathBuf::from("out/game_1"));
    }

    #[test]
    fn table_kind_parses_loosely() {
        assert_eq!(TableKind::parse("Shot-Chart"), Some(TableKind::ShotChart));
        assert_eq!(TableKind::parse(" hits "), Some(TableKind::Hits));
        assert_eq!(TableKind::parse("injuries"), None);
    }
}
