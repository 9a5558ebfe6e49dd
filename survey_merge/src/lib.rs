mod model;
pub mod manual;

use log::{debug, info, warn};

pub use crate::model::*;

/// Builds the questions of the survey from the rows of the schema file.
///
/// The first row holds the descriptions (the first column is a label and is
/// ignored), the next five rows hold the texts of the options O, A, B, C and D,
/// aligned with the descriptions.
pub fn load_questions(rows: &[Vec<String>]) -> Result<Vec<Question>, SurveyErrors> {
    if rows.len() < SCHEMA_ROWS {
        return Err(SurveyErrors::MissingOptionRows { found: rows.len() });
    }
    let header = &rows[0];
    for (row_idx, row) in rows.iter().enumerate().take(SCHEMA_ROWS).skip(1) {
        if row.len() < header.len() {
            return Err(SurveyErrors::ShortOptionRow {
                row: row_idx,
                expected: header.len(),
                found: row.len(),
            });
        }
    }

    let mut questions: Vec<Question> = Vec::new();
    for (col, description) in header.iter().enumerate().skip(1) {
        let variants = Variant {
            o: rows[1][col].clone(),
            a: rows[2][col].clone(),
            b: rows[3][col].clone(),
            c: rows[4][col].clone(),
            d: rows[5][col].clone(),
        };
        debug!("load_questions: {}: {:?} {:?}", col, description, variants);
        if variants.is_empty() {
            warn!(
                "load_questions: question {:?} has no options, its answers stay unlabeled",
                description
            );
        }
        questions.push(Question::new(col, description, variants));
    }
    info!("Loaded {} questions from the schema", questions.len());
    Ok(questions)
}

/// Folds the rows of one response file into the survey.
///
/// The first row holds the headers: timestamp, role, team, full name, then one
/// column per question. Headers that are not yet known become new questions.
/// Answers are attached to questions by description, so files may order their
/// columns differently.
///
/// Rows that do not have as many columns as the header row are skipped.
pub fn merge_responses(mut survey: Survey, rows: &[Vec<String>]) -> (Survey, MergeStats) {
    let mut stats = MergeStats::default();
    let header = match rows.first() {
        Some(h) => h,
        None => {
            warn!("merge_responses: no header row, nothing to merge");
            return (survey, stats);
        }
    };

    // Position in the survey of the question of each column.
    let mut columns: Vec<usize> = Vec::with_capacity(header.len());
    for (idx, description) in header.iter().enumerate() {
        let pos = match survey.question_position(description) {
            Some(pos) => pos,
            None => {
                debug!("merge_responses: new question {}: {:?}", idx, description);
                survey.register_question(Question::new(idx, description, Variant::default()));
                stats.new_questions += 1;
                survey.questions.len() - 1
            }
        };
        columns.push(pos);
    }

    for (lineno, row) in rows.iter().enumerate().skip(1) {
        if row.len() != header.len() || row.len() < RESPONSE_META_COLUMNS {
            warn!(
                "merge_responses: line {}: expected {} columns, found {}, skipping row",
                lineno + 1,
                header.len(),
                row.len()
            );
            stats.rows_skipped += 1;
            continue;
        }
        let timestamp = &row[0];
        let role = &row[1];
        let team = &row[2];
        let full_name = &row[3];
        if survey.register_participant(participant_display(full_name, role)) {
            stats.new_participants += 1;
        }
        for (col, text) in row.iter().enumerate() {
            survey.questions[columns[col]].answers.push(Answer {
                role: role.clone(),
                team: team.clone(),
                full_name: full_name.clone(),
                timestamp: timestamp.clone(),
                answer: text.clone(),
                answer_label: None,
            });
        }
        stats.rows_merged += 1;
    }
    debug!("merge_responses: {:?}", stats);
    (survey, stats)
}

/// Sets the label of each unlabeled answer whose text is exactly one of the
/// options of the question. Options are tried in the order O, A, B, C, D.
pub fn label_question(question: &mut Question) {
    let variants = &question.variants;
    for answer in question.answers.iter_mut() {
        if answer.answer_label.is_none() {
            answer.answer_label = variants.label_for(&answer.answer);
        }
    }
}

pub fn label_answers(mut survey: Survey) -> Survey {
    for question in survey.questions.iter_mut() {
        label_question(question);
    }
    let labeled: usize = survey
        .questions
        .iter()
        .map(|q| q.answers.iter().filter(|a| a.answer_label.is_some()).count())
        .sum();
    info!("Labeled {} answers", labeled);
    survey
}

pub fn is_metadata_question(description: &str) -> bool {
    METADATA_QUESTIONS.contains(&description)
}

/// Builds the results table: one column per participant, one row per
/// question (metadata questions excluded).
///
/// Each cell holds the label of the participant's answer, or its raw text if
/// it has no label, or `N/A` if the participant did not answer.
pub fn results_table(survey: &Survey) -> Vec<Vec<String>> {
    let mut table: Vec<Vec<String>> = Vec::new();
    let mut header: Vec<String> = vec!["".to_string()];
    header.extend(survey.participants.iter().cloned());
    table.push(header);

    for question in survey.questions.iter() {
        if is_metadata_question(&question.description) {
            continue;
        }
        let mut line: Vec<String> = vec![question.description.clone()];
        for participant in survey.participants.iter() {
            let cell = question
                .answer_by_name(participant_full_name(participant))
                .map(|a| a.display_value())
                .unwrap_or(NOT_ANSWERED);
            line.push(cell.to_string());
        }
        table.push(line);
    }
    table
}
