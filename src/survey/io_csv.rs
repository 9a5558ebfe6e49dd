// Primitives for reading and writing CSV files.

use log::debug;
use snafu::ResultExt;

use crate::survey::*;

/// Reads every record of the file, the first one included.
///
/// Records may have different lengths: checking the shape of the rows is left
/// to the merge.
pub fn read_csv_rows(path: &str) -> SurveyResult<Vec<Vec<String>>> {
    let rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .context(CsvOpenSnafu { path })?;

    let mut res: Vec<Vec<String>> = Vec::new();
    for (idx, line_r) in rdr.into_records().enumerate() {
        let lineno = idx + 1;
        let line = line_r.context(CsvLineParseSnafu { path, lineno })?;
        debug!("read_csv_rows: {:?} {:?}", lineno, line);
        res.push(line.iter().map(|s| s.to_string()).collect());
    }
    Ok(res)
}

pub fn write_csv_rows(path: &str, rows: &[Vec<String>]) -> SurveyResult<()> {
    let mut wtr = csv::Writer::from_path(path).context(WritingCsvSnafu { path })?;
    for row in rows {
        wtr.write_record(row).context(WritingCsvSnafu { path })?;
    }
    wtr.flush().context(WritingFileSnafu { path })?;
    Ok(())
}
