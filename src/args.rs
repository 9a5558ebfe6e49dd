use clap::Parser;

/// Merges the response files of a survey and normalizes the answers to the options of the questions.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (directory) The directory containing the response files. Every file in this directory
    /// is read as a response export (CSV, or Excel if the name ends with .xlsx).
    #[clap(short, long, value_parser, default_value = "csv", alias = "csvPath")]
    pub csv_path: String,

    /// (file path) The file with the questions and the texts of their options O, A, B, C and D.
    /// For more information about the file format, read the manual of the survey_merge crate.
    #[clap(
        short,
        long,
        value_parser,
        default_value = "questions/questions_answers.csv",
        alias = "qPath"
    )]
    pub questions: String,

    /// The identifier of the survey. It is used as the name of the output files
    /// (<id>.json and <id>_results.csv).
    #[clap(short, long, value_parser, default_value = "Результаты", alias = "surveyID")]
    pub survey_id: String,

    /// (directory) Where the output files are written.
    #[clap(short, long, value_parser, default_value = ".")]
    pub out: String,

    /// (file path) A reference file containing the expected JSON snapshot. If provided,
    /// the merged survey is checked against it.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
