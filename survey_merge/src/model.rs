// ********* Input data structures ***********

use log::warn;
use serde::{Serialize, Serializer};
use std::collections::HashMap;
use std::error::Error;
use std::fmt::Display;

/// The canonical tag of a multiple-choice option.
///
/// `O` is the "other" (baseline) option of a question, `A` to `D` are the
/// four regular choices.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Serialize)]
pub enum AnswerLabel {
    O,
    A,
    B,
    C,
    D,
}

impl AnswerLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnswerLabel::O => "O",
            AnswerLabel::A => "A",
            AnswerLabel::B => "B",
            AnswerLabel::C => "C",
            AnswerLabel::D => "D",
        }
    }
}

impl Display for AnswerLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The option texts of a question, as found in the schema file.
///
/// Questions that were only discovered in the response files carry an empty
/// variant. An empty option text is treated as "no option" and never matches
/// an answer.
#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize)]
pub struct Variant {
    #[serde(rename = "A")]
    pub a: String,
    #[serde(rename = "B")]
    pub b: String,
    #[serde(rename = "C")]
    pub c: String,
    #[serde(rename = "D")]
    pub d: String,
    #[serde(rename = "O")]
    pub o: String,
}

impl Variant {
    /// The options in the order in which answers are checked against them.
    pub fn options(&self) -> [(AnswerLabel, &str); 5] {
        [
            (AnswerLabel::O, self.o.as_str()),
            (AnswerLabel::A, self.a.as_str()),
            (AnswerLabel::B, self.b.as_str()),
            (AnswerLabel::C, self.c.as_str()),
            (AnswerLabel::D, self.d.as_str()),
        ]
    }

    /// The first option whose text is exactly the given answer.
    pub fn label_for(&self, text: &str) -> Option<AnswerLabel> {
        self.options()
            .iter()
            .find(|(_, option)| !option.is_empty() && *option == text)
            .map(|(label, _)| *label)
    }

    pub fn is_empty(&self) -> bool {
        self.options().iter().all(|(_, option)| option.is_empty())
    }
}

/// The response of one participant to one question.
#[derive(Eq, PartialEq, Debug, Clone, Serialize)]
pub struct Answer {
    pub role: String,
    pub team: String,
    #[serde(rename = "fio")]
    pub full_name: String,
    #[serde(rename = "timest")]
    pub timestamp: String,
    pub answer: String,
    #[serde(rename = "answerLabel", serialize_with = "label_or_empty")]
    pub answer_label: Option<AnswerLabel>,
}

impl Answer {
    /// The value shown in the results table: the label if the answer
    /// matched one of the options, the raw text otherwise.
    pub fn display_value(&self) -> &str {
        match &self.answer_label {
            Some(label) => label.as_str(),
            None => self.answer.as_str(),
        }
    }
}

fn label_or_empty<S: Serializer>(label: &Option<AnswerLabel>, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(label.map(|l| l.as_str()).unwrap_or(""))
}

/// A survey item. Its identity is the description text; the index is only
/// the column position in the file that introduced it.
#[derive(Eq, PartialEq, Debug, Clone, Serialize)]
pub struct Question {
    pub index: usize,
    pub description: String,
    pub variants: Variant,
    pub answers: Vec<Answer>,
}

impl Question {
    pub fn new(index: usize, description: &str, variants: Variant) -> Question {
        Question {
            index,
            description: description.to_string(),
            variants,
            answers: Vec::new(),
        }
    }

    /// The first answer given by a participant with this full name.
    pub fn answer_by_name(&self, full_name: &str) -> Option<&Answer> {
        self.answers.iter().find(|a| a.full_name == full_name)
    }
}

// ******** Output data structures *********

/// The merged record of all the response files of one run.
///
/// Questions are unique by description and participants are unique by their
/// display string `"<full name> (<role>)"`. Both keep the order in which they
/// were first seen.
#[derive(Eq, PartialEq, Debug, Clone, Serialize)]
pub struct Survey {
    pub(crate) id: String,
    pub(crate) questions: Vec<Question>,
    pub(crate) participants: Vec<String>,
    #[serde(skip)]
    question_positions: HashMap<String, usize>,
    #[serde(skip)]
    participant_positions: HashMap<String, usize>,
}

impl Survey {
    /// Creates a survey seeded with the questions of the schema.
    ///
    /// A description repeated in the schema is only kept once (first occurrence).
    pub fn new(id: &str, questions: Vec<Question>) -> Survey {
        let mut survey = Survey {
            id: id.to_string(),
            questions: Vec::new(),
            participants: Vec::new(),
            question_positions: HashMap::new(),
            participant_positions: HashMap::new(),
        };
        for q in questions {
            let description = q.description.clone();
            if !survey.register_question(q) {
                warn!(
                    "Survey::new: question {:?} appears more than once in the schema, keeping the first one",
                    description
                );
            }
        }
        survey
    }

    pub fn id(&self) -> &str {
        self.id.as_str()
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn participants(&self) -> &[String] {
        &self.participants
    }

    pub fn question(&self, description: &str) -> Option<&Question> {
        self.question_position(description)
            .map(|pos| &self.questions[pos])
    }

    pub(crate) fn question_position(&self, description: &str) -> Option<usize> {
        self.question_positions.get(description).cloned()
    }

    /// Appends the question unless one with the same description exists.
    /// Returns true if the question was added.
    pub(crate) fn register_question(&mut self, question: Question) -> bool {
        if self.question_positions.contains_key(&question.description) {
            return false;
        }
        self.question_positions
            .insert(question.description.clone(), self.questions.len());
        self.questions.push(question);
        true
    }

    /// Appends the participant unless already present.
    /// Returns true if the participant was added.
    pub(crate) fn register_participant(&mut self, participant: String) -> bool {
        if self.participant_positions.contains_key(&participant) {
            return false;
        }
        self.participant_positions
            .insert(participant.clone(), self.participants.len());
        self.participants.push(participant);
        true
    }
}

/// The display string identifying a participant.
pub fn participant_display(full_name: &str, role: &str) -> String {
    format!("{} ({})", full_name, role)
}

/// Recovers the full name from a participant display string.
pub fn participant_full_name(participant: &str) -> &str {
    participant.split(" (").next().unwrap_or(participant)
}

/// What a merge step did to the survey.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Default)]
pub struct MergeStats {
    pub rows_merged: usize,
    pub rows_skipped: usize,
    pub new_questions: usize,
    pub new_participants: usize,
}

// ********* Errors **********

/// Errors raised when the schema rows cannot be turned into questions.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum SurveyErrors {
    /// The schema needs a header row and five option rows.
    MissingOptionRows { found: usize },
    /// An option row does not cover all the questions of the header row.
    ShortOptionRow {
        row: usize,
        expected: usize,
        found: usize,
    },
}

impl Error for SurveyErrors {}

impl Display for SurveyErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SurveyErrors::MissingOptionRows { found } => write!(
                f,
                "schema needs {} rows (questions and O/A/B/C/D options), found {}",
                SCHEMA_ROWS, found
            ),
            SurveyErrors::ShortOptionRow {
                row,
                expected,
                found,
            } => write!(
                f,
                "schema row {} has {} columns, expected at least {}",
                row, found, expected
            ),
        }
    }
}

// ********* Constants **********

/// Header row and the five option rows (O, A, B, C, D).
pub const SCHEMA_ROWS: usize = 6;

/// Timestamp, role, team and full name lead every response row.
pub const RESPONSE_META_COLUMNS: usize = 4;

/// Cell of the results table for a participant without an answer.
pub const NOT_ANSWERED: &str = "N/A";

/// Headers of the response columns that describe the participant rather than
/// a question. They never show up in the results table.
pub const METADATA_QUESTIONS: [&str; 5] = [
    "Timestamp",
    "Отметка времени",
    "Название команды",
    "Ваша роль:",
    "Ваше имя и фамилия",
];
