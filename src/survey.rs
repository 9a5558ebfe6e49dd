use log::{debug, info, warn};

use snafu::{prelude::*, Snafu};
use survey_merge::*;

use std::fs;

use serde_json::Value as JSValue;
use text_diff::print_diff;

mod export;
mod io_common;
mod io_csv;
mod io_excel;

use crate::survey::export::{export_results_csv, export_survey_json};
use crate::survey::io_common::{list_response_files, read_table, simplify_file_name};

#[derive(Debug, Snafu)]
pub enum SurveyError {
    #[snafu(display("Error opening CSV file {path}"))]
    CsvOpen { source: csv::Error, path: String },
    #[snafu(display("Error parsing line {lineno} of {path}"))]
    CsvLineParse {
        source: csv::Error,
        path: String,
        lineno: usize,
    },
    #[snafu(display("Error opening Excel file {path}"))]
    OpeningExcel {
        source: calamine::XlsxError,
        path: String,
    },
    #[snafu(display("Excel file {path} has no worksheet"))]
    EmptyExcel { path: String },
    #[snafu(display("Cell of unexpected type in {path} at line {lineno}: {content}"))]
    ExcelWrongCellType {
        path: String,
        lineno: usize,
        content: String,
    },
    #[snafu(display("Invalid schema file {path}"))]
    InvalidSchema {
        source: survey_merge::SurveyErrors,
        path: String,
    },
    #[snafu(display("Cannot list the response directory {path}"))]
    ListingDirectory {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error writing file {path}"))]
    WritingFile {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error writing CSV file {path}"))]
    WritingCsv { source: csv::Error, path: String },
    #[snafu(display("Error serializing the survey"))]
    SerializingJson { source: serde_json::Error },
    #[snafu(display("Error opening JSON file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing JSON file {path}"))]
    ParsingJson {
        source: serde_json::Error,
        path: String,
    },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type SurveyResult<T> = Result<T, SurveyError>;

/// Reads the schema, merges every response file of the directory and writes
/// the JSON snapshot and the results table.
///
/// The schema, the directory listing and the outputs must all succeed.
/// Response files that cannot be read are skipped.
pub fn run_survey(
    questions_path: &str,
    responses_dir: &str,
    survey_id: &str,
    out_dir: &str,
    reference_path: Option<&str>,
) -> SurveyResult<()> {
    info!("Reading schema file {:?}", questions_path);
    let schema_rows = read_table(questions_path)?;
    let questions = load_questions(&schema_rows).context(InvalidSchemaSnafu {
        path: questions_path,
    })?;
    let survey = Survey::new(survey_id, questions);

    let files = list_response_files(responses_dir)?;
    if files.is_empty() {
        warn!("No response file found in {:?}", responses_dir);
    }
    info!("Merging {} response files", files.len());

    let survey = files
        .iter()
        .try_fold(survey, |survey, path| merge_file(survey, path, out_dir))?;

    let survey = label_answers(survey);
    let snapshot = export_survey_json(&survey, out_dir)?;
    export_results_csv(&survey, out_dir)?;
    info!(
        "Survey {:?}: {} questions, {} participants",
        survey.id(),
        survey.questions().len(),
        survey.participants().len()
    );

    if let Some(reference) = reference_path {
        check_reference(&snapshot, reference)?;
    }
    Ok(())
}

/// One step of the fold over the response files. The snapshot on disk is
/// refreshed after each merged file.
fn merge_file(survey: Survey, path: &str, out_dir: &str) -> SurveyResult<Survey> {
    let rows = match read_table(path) {
        Ok(rows) => rows,
        Err(e) => {
            warn!("Skipping response file {:?}: {}", path, e);
            return Ok(survey);
        }
    };
    debug!("merge_file: {:?}: {} rows", path, rows.len());
    let (survey, stats) = merge_responses(survey, &rows);
    info!(
        "{}: merged {} rows ({} skipped), {} new questions, {} new participants",
        simplify_file_name(path),
        stats.rows_merged,
        stats.rows_skipped,
        stats.new_questions,
        stats.new_participants
    );
    export_survey_json(&survey, out_dir)?;
    Ok(survey)
}

fn read_reference(path: &str) -> SurveyResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu { path })
}

fn check_reference(snapshot: &str, reference_path: &str) -> SurveyResult<()> {
    let reference = read_reference(reference_path)?;
    info!("Checking the survey against the reference {:?}", reference_path);
    let computed: JSValue = serde_json::from_str(snapshot).context(SerializingJsonSnafu {})?;
    let pretty_reference =
        serde_json::to_string_pretty(&reference).context(SerializingJsonSnafu {})?;
    let pretty_computed =
        serde_json::to_string_pretty(&computed).context(SerializingJsonSnafu {})?;
    if pretty_reference != pretty_computed {
        warn!("Found differences with the reference survey");
        print_diff(pretty_reference.as_str(), pretty_computed.as_str(), "\n");
        whatever!("Difference detected between the merged survey and the reference survey")
    }
    Ok(())
}
