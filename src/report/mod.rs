//! Console tables and file exports for a finished [`Summary`](crate::translations::Summary).

mod csv;
mod errors;
mod json;
mod table;

use std::fs;
use std::path::{Path, PathBuf};

use crate::translations::Document;

pub use csv::{CSV_HEADER, default_csv_file_name, export_csv, write_csv};
pub use errors::ReportError;
pub use json::{export_json, to_json};
pub use table::{format_day, missing_table, outdated_table, render_console, summary_table};

/// Source path as shown in reports: `<source language>/<relative path>`.
fn source_display(document: &Document) -> String {
    slash_join(&document.source_language, &document.relative_path)
}

/// Translation path as shown in reports: `<target language>/<relative path>`.
fn translation_display(document: &Document) -> String {
    slash_join(&document.target_language, &document.relative_path)
}

fn slash_join(language: &str, relative: &Path) -> String {
    let mut out = String::from(language);
    for component in relative.components() {
        out.push('/');
        out.push_str(&component.as_os_str().to_string_lossy());
    }
    out
}

fn ensure_parent_dir(path: &Path) -> Result<(), ReportError> {
    let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) else {
        return Ok(());
    };
    fs::create_dir_all(parent).map_err(|source| ReportError::CreateDir {
        path: PathBuf::from(parent),
        source,
    })
}
