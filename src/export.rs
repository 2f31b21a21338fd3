// src/export.rs
// Serializes a table for the outside world: delimited text (CSV/TSV, quotes +
// CRLF tolerant on the reading side elsewhere) or a JSON array of records.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::config::options::{ExportFormat, ExportOptions};
use crate::error::ExportError;
use crate::table::ReviewTable;

fn needs_quotes(field: &str, sep: char) -> bool {
    field.contains(sep) || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// Write a single CSV/TSV row to any writer.
pub fn write_row<W: Write>(mut w: W, row: &[String], sep: char) -> io::Result<()> {
    let mut first = true;
    for cell in row {
        if !first { write!(w, "{}", sep)?; } else { first = false; }
        if needs_quotes(cell, sep) {
            let escaped = cell.replace('"', "\"\"");
            write!(w, "\"{}\"", escaped)?;
        } else {
            write!(w, "{}", cell)?;
        }
    }
    writeln!(w)
}

/// Full delimited export string with the canonical header row on request.
pub fn to_delimited(table: &ReviewTable, include_headers: bool, sep: char) -> String {
    let mut buf: Vec<u8> = Vec::new();

    if include_headers {
        let _ = write_row(&mut buf, &ReviewTable::headers(), sep);
    }
    for row in table.rows() {
        let _ = write_row(&mut buf, &row, sep);
    }

    match String::from_utf8(buf) {
        Ok(s) => s,
        Err(e) => String::from_utf8_lossy(&e.into_bytes()).into_owned(),
    }
}

/// JSON array of canonical records.
pub fn to_json(table: &ReviewTable) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(table.records())?)
}

/// Render the table in the requested format.
pub fn render(table: &ReviewTable, opts: &ExportOptions) -> Result<String, ExportError> {
    match opts.format.delim() {
        Some(sep) => Ok(to_delimited(table, opts.include_headers, sep)),
        None => to_json(table),
    }
}

/// Write the export file and return the path written to.
pub fn write_export(table: &ReviewTable, opts: &ExportOptions) -> Result<PathBuf, ExportError> {
    let path = opts.out_path();
    ensure_parent(&path)?;
    fs::write(&path, render(table, opts)?)?;
    Ok(path)
}

fn ensure_parent(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quoting_only_when_needed() {
        let mut buf = Vec::new();
        let row = vec![s!("plain"), s!("with,comma"), s!("with \"quote\""), s!("line\nbreak")];
        write_row(&mut buf, &row, ',').unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text, "plain,\"with,comma\",\"with \"\"quote\"\"\",\"line\nbreak\"\n");
    }

    #[test]
    fn tsv_quotes_on_tabs_not_commas() {
        let mut buf = Vec::new();
        let row = vec![s!("a,b"), s!("c\td")];
        write_row(&mut buf, &row, '\t').unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "a,b\t\"c\td\"\n");
    }

    #[test]
    fn empty_table_with_headers_is_just_the_header_row(){
        let table = ReviewTable::default();
        let text = to_delimited(&table, true, ',');
        assert_eq!(text.lines().count(), 1);
        assert!(text.starts_with("review_id,author_name,body,rating,"));
    }

    #[test]
    fn json_export_of_empty_table_is_an_empty_array() {
        let table = ReviewTable::default();
        assert_eq!(to_json(&table).unwrap(), "[]");
    }
}
