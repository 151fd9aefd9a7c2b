use std::borrow::Cow;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use time::format_description::well_known::Rfc3339;
use time::{Date, OffsetDateTime};
use tracing::info;

use crate::translations::Summary;

use super::{ReportError, ensure_parent_dir, source_display, translation_display};

pub const CSV_HEADER: [&str; 7] = [
    "Source File",
    "Translation File",
    "Translation Exists",
    "Source Commit Date",
    "Translation Commit Date",
    "Status",
    "Is Outdated",
];

/// `translations-<lang>-<YYYYMMDD>.csv`
pub fn default_csv_file_name(language: &str, date: Date) -> String {
    format!(
        "translations-{language}-{:04}{:02}{:02}.csv",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}

/// Write one row per document, in summary order.
pub fn write_csv<W: Write>(summary: &Summary, mut writer: W) -> io::Result<()> {
    write_record(&mut writer, CSV_HEADER.iter().map(|field| Cow::Borrowed(*field)))?;
    for document in summary.documents() {
        let row = [
            source_display(document),
            translation_display(document),
            bool_field(document.translation_exists).to_string(),
            rfc3339(document.source_changed_at),
            rfc3339(document.translation_changed_at),
            document.status().label().to_string(),
            bool_field(document.is_outdated()).to_string(),
        ];
        write_record(&mut writer, row.into_iter().map(Cow::Owned))?;
    }
    writer.flush()
}

pub fn export_csv(summary: &Summary, path: &Path) -> Result<(), ReportError> {
    ensure_parent_dir(path)?;
    let write_error = |source| ReportError::Write {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(write_error)?;
    write_csv(summary, BufWriter::new(file)).map_err(write_error)?;
    info!(path = %path.display(), rows = summary.documents().len(), "Wrote CSV report");
    Ok(())
}

fn write_record<'a, W: Write>(
    writer: &mut W,
    fields: impl Iterator<Item = Cow<'a, str>>,
) -> io::Result<()> {
    let line = fields
        .map(|field| escape_field(&field).into_owned())
        .collect::<Vec<_>>()
        .join(",");
    writeln!(writer, "{line}")
}

fn escape_field(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

fn bool_field(value: bool) -> &'static str {
    if value { "True" } else { "False" }
}

fn rfc3339(value: Option<OffsetDateTime>) -> String {
    value
        .and_then(|value| value.format(&Rfc3339).ok())
        .unwrap_or_default()
}
