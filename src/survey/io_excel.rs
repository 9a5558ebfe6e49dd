use calamine::{open_workbook, DataType, Range, Reader, Xlsx};
use log::debug;
use snafu::{OptionExt, ResultExt};

use crate::survey::*;

/// Reads the first worksheet of an Excel workbook, as exported by
/// Google Forms or Microsoft Forms.
pub fn read_excel_rows(path: &str) -> SurveyResult<Vec<Vec<String>>> {
    let mut workbook: Xlsx<_> = open_workbook(path).context(OpeningExcelSnafu { path })?;
    let wrange = workbook
        .worksheet_range_at(0)
        .context(EmptyExcelSnafu { path })?
        .context(OpeningExcelSnafu { path })?;
    range_rows(&wrange, path)
}

fn range_rows(wrange: &Range<DataType>, path: &str) -> SurveyResult<Vec<Vec<String>>> {
    let mut res: Vec<Vec<String>> = Vec::new();
    for (idx, row) in wrange.rows().enumerate() {
        let lineno = idx + 1;
        debug!("read_excel_rows: {:?} {:?}", lineno, row);
        let mut cells: Vec<String> = Vec::with_capacity(row.len());
        for cell in row {
            cells.push(read_cell(cell, path, lineno)?);
        }
        res.push(cells);
    }
    Ok(res)
}

fn read_cell(cell: &DataType, path: &str, lineno: usize) -> SurveyResult<String> {
    match cell {
        DataType::String(s) => Ok(s.clone()),
        DataType::Empty => Ok("".to_string()),
        DataType::Int(i) => Ok(i.to_string()),
        DataType::Float(f) => Ok(f.to_string()),
        DataType::Bool(b) => Ok(b.to_string()),
        // Form exports store the submission time as a date cell.
        DataType::DateTime(f) => Ok(cell
            .as_datetime()
            .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| f.to_string())),
        _ => Err(SurveyError::ExcelWrongCellType {
            path: path.to_string(),
            lineno,
            content: format!("{:?}", cell),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells_as_text() {
        assert_eq!(read_cell(&DataType::Float(3.0), "f.xlsx", 1).unwrap(), "3");
        assert_eq!(read_cell(&DataType::Float(2.5), "f.xlsx", 1).unwrap(), "2.5");
        assert_eq!(read_cell(&DataType::Int(7), "f.xlsx", 1).unwrap(), "7");
        assert_eq!(read_cell(&DataType::Empty, "f.xlsx", 1).unwrap(), "");
        assert_eq!(
            read_cell(&DataType::String("Yes".to_string()), "f.xlsx", 1).unwrap(),
            "Yes"
        );
        assert_eq!(
            read_cell(&DataType::DateTime(44837.5), "f.xlsx", 2).unwrap(),
            "2022-10-03 12:00:00"
        );
        assert!(matches!(
            read_cell(
                &DataType::Error(calamine::CellErrorType::Div0),
                "f.xlsx",
                4
            ),
            Err(SurveyError::ExcelWrongCellType { lineno: 4, .. })
        ));
    }

    #[test]
    fn date_timestamps_are_merged() {
        let mut wrange: Range<DataType> = Range::new((0, 0), (1, 4));
        for (col, header) in ["Timestamp", "Role", "Team", "Name", "Q1"].iter().enumerate() {
            wrange.set_value((0, col as u32), DataType::String(header.to_string()));
        }
        wrange.set_value((1, 0), DataType::DateTime(44837.5));
        wrange.set_value((1, 1), DataType::String("Developer".to_string()));
        wrange.set_value((1, 2), DataType::String("Core".to_string()));
        wrange.set_value((1, 3), DataType::String("Anna Petrova".to_string()));
        wrange.set_value((1, 4), DataType::Float(3.0));

        let rows = range_rows(&wrange, "responses.xlsx").unwrap();
        let (survey, stats) = merge_responses(Survey::new("Results", Vec::new()), &rows);
        assert_eq!(stats.rows_merged, 1);
        assert_eq!(survey.participants(), &["Anna Petrova (Developer)".to_string()]);
        let q1 = survey.question("Q1").unwrap();
        assert_eq!(q1.answers[0].timestamp, "2022-10-03 12:00:00");
        assert_eq!(q1.answers[0].answer, "3");
    }

    #[test]
    fn not_a_workbook() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("responses.xlsx");
        std::fs::write(&path, "a,b\n1,2\n").unwrap();
        let res = read_excel_rows(&path.display().to_string());
        assert!(matches!(res, Err(SurveyError::OpeningExcel { .. })));
    }
}
