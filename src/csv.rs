// src/csv.rs
use std::io::Write;

use ::csv::{QuoteStyle, ReaderBuilder, WriterBuilder};

use crate::data::DataSet;
use crate::error::Result;

/* ---------------- Writing ---------------- */

/// Write a single CSV/TSV row to any writer.
pub fn write_row<W: Write>(w: W, row: &[String], delim: u8) -> Result<()> {
    let mut out = writer(w, delim);
    out.write_record(row)?;
    out.flush()?;
    Ok(())
}

fn writer<W: Write>(w: W, delim: u8) -> ::csv::Writer<W> {
    WriterBuilder::new()
        .delimiter(delim)
        .quote_style(QuoteStyle::Necessary)
        .flexible(true)
        .from_writer(w)
}

/// Write a whole table; the header line is emitted only when asked for and present.
pub fn write_dataset<W: Write>(w: W, ds: &DataSet, include_headers: bool, delim: u8) -> Result<()> {
    let mut out = writer(w, delim);
    if include_headers {
        if let Some(h) = &ds.headers {
            out.write_record(h)?;
        }
    }
    for r in &ds.rows {
        out.write_record(r)?;
    }
    out.flush()?;
    Ok(())
}

/// Create a full export string (stdout / file contents).
pub fn to_export_string(ds: &DataSet, include_headers: bool, delim: u8) -> Result<String> {
    let mut buf: Vec<u8> = Vec::new();
    write_dataset(&mut buf, ds, include_headers, delim)?;

    Ok(match String::from_utf8(buf) {
        Ok(s) => s,
        Err(e) => String::from_utf8_lossy(&e.into_bytes()).into_owned(),
    })
}

/* ---------------- Parsing ---------------- */

/// Read back an exported table. With `has_headers` the first line becomes `headers`.
pub fn parse_dataset(text: &str, delim: u8, has_headers: bool) -> Result<DataSet> {
    let mut rdr = ReaderBuilder::new()
        .delimiter(delim)
        .has_headers(has_headers)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = if has_headers {
        Some(rdr.headers()?.iter().map(String::from).collect())
    } else {
        None
    };
    let mut rows = Vec::new();
    for rec in rdr.records() {
        rows.push(rec?.iter().map(String::from).collect());
    }
    Ok(DataSet { headers, rows })
}
