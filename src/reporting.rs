// Reporting and output for redirhound
// Flagged-URL append file plus per-run CSV/Markdown/JSON summaries

use crate::models::ScanRecord;
use chrono::Local;
use std::fs::{File, OpenOptions};
use std::io::Write;

/// Append one flagged URL to the output file, creating it on first use.
pub fn append_flagged(url: &str, path: &str) -> Result<(), std::io::Error> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{}", url)?;
    Ok(())
}

/// Escape CSV field to prevent formula injection attacks
/// Cells starting with =, +, -, @, or tab are prefixed with single quote
fn escape_csv_field(field: &str) -> String {
    if field.is_empty() {
        return String::new();
    }

    let first_char = field.chars().next().unwrap();
    let needs_escaping = matches!(first_char, '=' | '+' | '-' | '@' | '\t');

    // Also escape if field contains comma or quotes
    if needs_escaping || field.contains(',') || field.contains('"') {
        if needs_escaping {
            // Prefix with single quote to prevent formula injection
            format!("\"'{}\"", field.replace('"', "\"\""))
        } else {
            // Standard CSV escaping
            format!("\"{}\"", field.replace('"', "\"\""))
        }
    } else {
        field.to_string()
    }
}

pub fn export_csv(records: &[ScanRecord]) -> Result<String, std::io::Error> {
    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    let filename = format!("redirhound_report_{}.csv", timestamp);
    let mut file = File::create(&filename)?;

    writeln!(file, "URL,Outcome,Marker")?;
    for record in records {
        writeln!(
            file,
            "{},{},{}",
            escape_csv_field(&record.url),
            escape_csv_field(&record.outcome.to_string()),
            escape_csv_field(record.marker_word.as_deref().unwrap_or(""))
        )?;
    }

    Ok(filename)
}

pub fn export_markdown(records: &[ScanRecord]) -> Result<String, std::io::Error> {
    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    let filename = format!("redirhound_report_{}.md", timestamp);
    let mut file = File::create(&filename)?;

    writeln!(file, "# redirhound Report\n")?;
    for record in records {
        match &record.marker_word {
            Some(marker) => writeln!(
                file,
                "- **{}** {}: marker `{}`",
                record.outcome, record.url, marker
            )?,
            None => writeln!(file, "- **{}** {}", record.outcome, record.url)?,
        }
    }

    Ok(filename)
}

pub fn export_json(records: &[ScanRecord]) -> Result<String, std::io::Error> {
    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    let filename = format!("redirhound_report_{}.json", timestamp);
    let body = serde_json::to_string_pretty(records)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
    std::fs::write(&filename, body)?;
    Ok(filename)
}
