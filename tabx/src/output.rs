//! The output surface: the merged record list as delimited text and as a
//! short stdout preview.

use std::io::Write;

use csv::Writer;
use serde_json::Value;

use extract::records::Record;

/// Field added to every record identifying the originating file.
pub const SOURCE_FILE_FIELD: &str = "source_file";

/// Render a JSON scalar for a table cell.
fn render_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn header(columns: &[String]) -> Vec<&str> {
    let mut header: Vec<&str> = columns.iter().map(String::as_str).collect();
    header.push(SOURCE_FILE_FIELD);
    header
}

fn row(record: &Record, header: &[&str]) -> Vec<String> {
    header
        .iter()
        .map(|field| record.get(*field).map(render_value).unwrap_or_default())
        .collect()
}

/// Write the merged record list as CSV: one column per requested field, plus
/// the source-file tag.
///
/// # Errors
///
/// `csv::Error` if writing fails.
pub fn write_csv<W: Write>(
    writer: W,
    columns: &[String],
    records: &[Record],
) -> Result<(), csv::Error> {
    let mut wtr = Writer::from_writer(writer);
    let header = header(columns);

    wtr.write_record(&header)?;
    for record in records {
        wtr.write_record(row(record, &header))?;
    }

    wtr.flush()?;
    Ok(())
}

/// Print the first `limit` records as a tab-separated preview.
///
/// # Errors
///
/// `std::io::Error` if writing to `out` fails.
pub fn print_preview<W: Write>(
    out: &mut W,
    columns: &[String],
    records: &[Record],
    limit: usize,
) -> std::io::Result<()> {
    let header = header(columns);

    writeln!(out, "{}", header.join("\t"))?;
    for record in records.iter().take(limit) {
        writeln!(out, "{}", row(record, &header).join("\t"))?;
    }
    if records.len() > limit {
        writeln!(out, "... and {} more", records.len() - limit)?;
    }

    Ok(())
}
