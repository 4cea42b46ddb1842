//! CSV rendering and output file naming.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use chrono::{DateTime, TimeZone};

use crate::types::VariantRow;

/// Default output file prefix.
pub const DEFAULT_OUTPUT_PREFIX: &str = "products";

/// Errors from writing the catalog CSV.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Writes rows as CSV with a header line, even when `rows` is empty.
pub fn write_csv<W: Write>(rows: &[VariantRow], writer: W) -> Result<(), ExportError> {
    let mut out = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    out.write_record(VariantRow::COLUMNS)?;
    for row in rows {
        out.serialize(row)?;
    }
    out.flush()?;
    Ok(())
}

/// Creates (or truncates) `path` and writes the rows into it.
pub fn write_csv_file(path: &Path, rows: &[VariantRow]) -> Result<(), ExportError> {
    let file = File::create(path)?;
    write_csv(rows, io::BufWriter::new(file))?;
    tracing::debug!(path = %path.display(), rows = rows.len(), "catalog CSV written");
    Ok(())
}

/// Timestamped file name: `{prefix}_YYYYmmdd_HHMMSS.csv`.
pub fn output_file_name<Tz>(prefix: &str, at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    format!("{prefix}_{}.csv", at.format("%Y%m%d_%H%M%S"))
}

/// Renders rows as an aligned plain-text table for terminal preview.
pub fn render_table(rows: &[VariantRow]) -> String {
    let mut widths = VariantRow::COLUMNS.map(|c| c.chars().count());
    for row in rows {
        for (w, value) in widths.iter_mut().zip(row.values()) {
            *w = (*w).max(value.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, VariantRow::COLUMNS, &widths);
    let rule = widths.map(|w| "-".repeat(w));
    push_line(&mut out, rule.each_ref().map(String::as_str), &widths);
    for row in rows {
        push_line(&mut out, row.values(), &widths);
    }
    out
}

fn push_line(out: &mut String, cells: [&str; 7], widths: &[usize; 7]) {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, &w)| format!("{cell:<w$}"))
        .collect::<Vec<_>>()
        .join("  ");
    out.push_str(line.trim_end());
    out.push('\n');
}
