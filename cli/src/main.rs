mod output;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use qa_generator::{GeneratorConfig, LexiconAnalyzer, PdfExtractor, QuestionGenerator};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;

const USAGE: &str = "Usage: pdf-qa <pdf_path> [questions_per_page]";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "pdf-qa")]
#[command(version)]
#[command(about = "Generate quiz questions from the text of a PDF", long_about = None)]
struct Cli {
    /// PDF to read
    #[arg(value_name = "PDF_PATH")]
    pdf_path: Option<PathBuf>,

    /// Question attempts per page [default: 3]
    #[arg(value_name = "QUESTIONS_PER_PAGE")]
    questions_per_page: Option<usize>,

    /// Seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Part-of-speech overrides, one `word<TAB>TAG` per line
    #[arg(long, value_name = "FILE")]
    lexicon: Option<PathBuf>,
}

impl Cli {
    /// Command-line values win over `QA_*` environment settings.
    fn merge_into(&self, mut config: GeneratorConfig) -> GeneratorConfig {
        if let Some(count) = self.questions_per_page {
            config.questions_per_page = count;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(path) = &self.lexicon {
            config.lexicon_path = Some(path.clone());
        }
        config
    }
}

fn main() -> Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let cli = Cli::parse();
    let Some(pdf_path) = cli.pdf_path.clone() else {
        println!("{}", USAGE);
        return Ok(());
    };

    let config = cli.merge_into(GeneratorConfig::from_env()?);
    log::debug!("Running with {:?}", config);

    let analyzer = match &config.lexicon_path {
        Some(path) => LexiconAnalyzer::from_lexicon_file(path)?,
        None => LexiconAnalyzer::new(),
    };
    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let text_by_page = PdfExtractor::new().extract(&pdf_path);
    if text_by_page.is_empty() {
        println!("No text could be extracted from the PDF.");
        return Ok(());
    }

    let mut generator = QuestionGenerator::new(analyzer, rng);
    let qa_pairs = generator.generate_questions(&text_by_page, config.questions_per_page);

    match cli.format {
        OutputFormat::Text => print!("{}", output::render_text(&qa_pairs)),
        OutputFormat::Json => println!("{}", output::render_json(&qa_pairs)?),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positional_arguments() {
        let cli = Cli::try_parse_from(["pdf-qa", "notes.pdf", "5"]).unwrap();
        assert_eq!(cli.pdf_path, Some(PathBuf::from("notes.pdf")));
        assert_eq!(cli.questions_per_page, Some(5));
        assert_eq!(cli.format, OutputFormat::Text);
    }

    #[test]
    fn path_is_optional() {
        let cli = Cli::try_parse_from(["pdf-qa"]).unwrap();
        assert!(cli.pdf_path.is_none());
    }

    #[test]
    fn rejects_non_integer_count() {
        assert!(Cli::try_parse_from(["pdf-qa", "notes.pdf", "three"]).is_err());
    }

    #[test]
    fn command_line_overrides_environment() {
        let args = ["pdf-qa", "notes.pdf", "7", "--seed", "11", "--format", "json"];
        let cli = Cli::try_parse_from(args).unwrap();
        let env_config = GeneratorConfig {
            questions_per_page: 2,
            seed: Some(1),
            lexicon_path: Some(PathBuf::from("env.tsv")),
        };

        let config = cli.merge_into(env_config);
        assert_eq!(config.questions_per_page, 7);
        assert_eq!(config.seed, Some(11));
        assert_eq!(config.lexicon_path, Some(PathBuf::from("env.tsv")));
        assert_eq!(cli.format, OutputFormat::Json);
    }

    #[test]
    fn environment_fills_unset_flags() {
        let cli = Cli::try_parse_from(["pdf-qa", "notes.pdf"]).unwrap();
        let config = cli.merge_into(GeneratorConfig::default());
        assert_eq!(config.questions_per_page, 3);
        assert_eq!(config.seed, None);
    }
}
