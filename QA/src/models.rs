use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// Extracted text keyed by 1-based page number, in PDF page order.
pub type PageText = BTreeMap<u32, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuestionType {
    MultipleChoice,
    OpenEnded,
    TrueFalse,
}

impl QuestionType {
    pub const ALL: [QuestionType; 3] = [
        QuestionType::MultipleChoice,
        QuestionType::OpenEnded,
        QuestionType::TrueFalse,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::MultipleChoice => "Multiple Choice",
            QuestionType::OpenEnded => "Open Ended",
            QuestionType::TrueFalse => "True/False",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DifficultyLevel {
    Basic,
    Intermediate,
    Advanced,
}

impl DifficultyLevel {
    pub const ALL: [DifficultyLevel; 3] = [
        DifficultyLevel::Basic,
        DifficultyLevel::Intermediate,
        DifficultyLevel::Advanced,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DifficultyLevel::Basic => "Basic",
            DifficultyLevel::Intermediate => "Intermediate",
            DifficultyLevel::Advanced => "Advanced",
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for DifficultyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Serialized by display name so JSON output reads the same as the text blocks.
impl Serialize for QuestionType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl Serialize for DifficultyLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A generated question with its answer and provenance.
///
/// Built once by one of the transforms and never mutated afterwards;
/// fields are exposed through accessors only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QAPair {
    question: String,
    answer: String,
    source: String,
    difficulty: DifficultyLevel,
    #[serde(rename = "type")]
    question_type: QuestionType,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    options: Vec<String>,
}

impl QAPair {
    pub fn new(
        question: impl Into<String>,
        answer: impl Into<String>,
        source: impl Into<String>,
        difficulty: DifficultyLevel,
        question_type: QuestionType,
    ) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
            source: source.into(),
            difficulty,
            question_type,
            options: Vec::new(),
        }
    }

    /// Attaches the displayed option list of a multiple-choice record.
    pub fn with_options(mut self, options: Vec<String>) -> Self {
        self.options = options;
        self
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn difficulty(&self) -> DifficultyLevel {
        self.difficulty
    }

    pub fn question_type(&self) -> QuestionType {
        self.question_type
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }
}

impl fmt::Display for QAPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Q: {}", self.question)?;
        writeln!(f, "A: {}", self.answer)?;
        writeln!(f, "Source: {}", self.source)?;
        writeln!(f, "Difficulty: {}", self.difficulty)?;
        write!(f, "Type: {}", self.question_type)
    }
}

pub fn page_label(page_num: u32) -> String {
    format!("Page {}", page_num)
}
