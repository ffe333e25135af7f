pub mod models;
pub mod config;
pub mod pdf_extractor;
pub mod analyzer;
pub mod lexicon;
pub mod transforms;
pub mod question_generator;

pub use models::*;
pub use config::GeneratorConfig;
pub use pdf_extractor::PdfExtractor;
pub use analyzer::{Analysis, Entity, EntityLabel, LexiconAnalyzer, PosTag, TextAnalyzer, Token};
pub use lexicon::Lexicon;
pub use question_generator::QuestionGenerator;
