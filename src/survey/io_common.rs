use std::fs;
use std::path::Path;

use log::debug;
use snafu::ResultExt;

use crate::survey::{io_csv::read_csv_rows, io_excel::read_excel_rows, *};

pub fn simplify_file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or(path)
        .to_string()
}

/// Reads all the rows of a tabular file: Excel workbooks (.xlsx) through their
/// first worksheet, everything else as CSV.
pub fn read_table(path: &str) -> SurveyResult<Vec<Vec<String>>> {
    let is_excel = Path::new(path)
        .extension()
        .and_then(|s| s.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("xlsx"))
        .unwrap_or(false);
    if is_excel {
        read_excel_rows(path)
    } else {
        read_csv_rows(path)
    }
}

/// The files of the response directory, in the order of their names.
/// Sub-directories are ignored.
pub fn list_response_files(dir: &str) -> SurveyResult<Vec<String>> {
    let mut files: Vec<String> = Vec::new();
    for entry_r in fs::read_dir(dir).context(ListingDirectorySnafu { path: dir })? {
        let entry = entry_r.context(ListingDirectorySnafu { path: dir })?;
        let file_type = entry
            .file_type()
            .context(ListingDirectorySnafu { path: dir })?;
        if file_type.is_dir() {
            debug!("list_response_files: skipping directory {:?}", entry.path());
            continue;
        }
        files.push(entry.path().display().to_string());
    }
    files.sort_by_key(|p| simplify_file_name(p));
    debug!("list_response_files: {:?}", files);
    Ok(files)
}
