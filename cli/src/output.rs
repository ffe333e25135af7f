use anyhow::{Context, Result};
use qa_generator::QAPair;

pub const SEPARATOR_WIDTH: usize = 50;

/// Each record as its 5-line block, a blank line, then a dashed separator.
pub fn render_text(qa_pairs: &[QAPair]) -> String {
    let separator = "-".repeat(SEPARATOR_WIDTH);
    let mut out = String::new();

    for qa_pair in qa_pairs {
        out.push_str(&format!("{}\n\n{}\n", qa_pair, separator));
    }
    out
}

pub fn render_json(qa_pairs: &[QAPair]) -> Result<String> {
    serde_json::to_string_pretty(qa_pairs).context("failed to serialize questions")
}
