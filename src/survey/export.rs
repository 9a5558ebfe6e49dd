use std::fs;
use std::path::Path;

use log::info;
use snafu::ResultExt;

use crate::survey::{io_csv::write_csv_rows, *};

/// Writes `<out_dir>/<id>.json`, replacing any previous snapshot, and returns
/// the written text.
pub fn export_survey_json(survey: &Survey, out_dir: &str) -> SurveyResult<String> {
    let path = Path::new(out_dir)
        .join(format!("{}.json", survey.id()))
        .display()
        .to_string();
    let js = serde_json::to_string_pretty(survey).context(SerializingJsonSnafu {})?;
    fs::write(&path, &js).context(WritingFileSnafu { path: path.as_str() })?;
    info!("Wrote survey snapshot {:?}", path);
    Ok(js)
}

/// Writes the results table to `<out_dir>/<id>_results.csv`.
pub fn export_results_csv(survey: &Survey, out_dir: &str) -> SurveyResult<()> {
    let path = Path::new(out_dir)
        .join(format!("{}_results.csv", survey.id()))
        .display()
        .to_string();
    let table = results_table(survey);
    write_csv_rows(&path, &table)?;
    info!("Wrote results table {:?} ({} rows)", path, table.len() - 1);
    Ok(())
}
