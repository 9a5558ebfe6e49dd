/*!

This is the long-form manual for `survey_merge` and `survmerge`.

## Input formats

### Schema file

The schema describes the multiple-choice questions. The first row holds the
descriptions of the questions, starting from the second column (the first
column is free for labels). The next five rows hold, in this order, the texts
of the options `O` (other / baseline), `A`, `B`, `C` and `D`, aligned with the
questions.

```text
         ,How often do you deploy?,Do you use code review?
O        ,I do not know           ,Not applicable
A        ,Every day               ,Yes
B        ,Every week              ,No
C        ,Every month             ,Sometimes
D        ,Never                   ,Only for large changes
```

The schema may be a CSV file or an Excel file (`.xlsx`, first worksheet).

### Response files

Every file of the input directory is a response export, for instance the
spreadsheet produced by Google Forms. The first row holds the headers: the
timestamp, the role, the team and the full name of the participant, then one
column per question. The columns of the questions do not need to follow the
order of the schema, and questions that are not in the schema are kept as
free-text questions.

Files are processed in the order of their names. Rows that do not have as many
columns as the header row are skipped with a warning. Files that cannot be
read are skipped with a warning.

## Outputs

`<survey id>.json` holds all the questions with all the raw answers. It is
rewritten after each response file, so an interrupted run still leaves the
last complete state on disk.

`<survey id>_results.csv` holds one row per question and one column per
participant. A cell holds the label of the option matching the answer
(`O`, `A`, `B`, `C`, `D`), the raw answer when it matches no option, or `N/A`
when the participant did not answer.

## Library usage

```
use survey_merge::*;

fn to_rows(data: &[&[&str]]) -> Vec<Vec<String>> {
    data.iter()
        .map(|r| r.iter().map(|s| s.to_string()).collect())
        .collect()
}

let schema = to_rows(&[
    &["", "Q1"],
    &["O", "Z"],
    &["A", "X"],
    &["B", "Y"],
    &["C", "W"],
    &["D", "V"],
]);
let responses = to_rows(&[
    &["Timestamp", "Role", "Team", "Name", "Q1"],
    &["t1", "R1", "T1", "Alice", "X"],
]);

let survey = Survey::new("Results", load_questions(&schema)?);
let (survey, _stats) = merge_responses(survey, &responses);
let survey = label_answers(survey);

let table = results_table(&survey);
assert_eq!(table[0], vec!["".to_string(), "Alice (R1)".to_string()]);
assert_eq!(table[1], vec!["Q1".to_string(), "A".to_string()]);
# Ok::<(), SurveyErrors>(())
```

*/
