use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

pub const DEFAULT_QUESTIONS_PER_PAGE: usize = 3;

pub const QUESTIONS_PER_PAGE_VAR: &str = "QA_QUESTIONS_PER_PAGE";
pub const SEED_VAR: &str = "QA_SEED";
pub const LEXICON_VAR: &str = "QA_LEXICON";

#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    pub questions_per_page: usize,
    pub seed: Option<u64>,
    pub lexicon_path: Option<PathBuf>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            questions_per_page: DEFAULT_QUESTIONS_PER_PAGE,
            seed: None,
            lexicon_path: None,
        }
    }
}

impl GeneratorConfig {
    /// Reads `QA_QUESTIONS_PER_PAGE`, `QA_SEED` and `QA_LEXICON`; unset
    /// variables keep their defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(count) = parse_var(&lookup, QUESTIONS_PER_PAGE_VAR)? {
            config.questions_per_page = count;
        }
        config.seed = parse_var(&lookup, SEED_VAR)?;
        config.lexicon_path = lookup(LEXICON_VAR)
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);

        Ok(config)
    }
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => {
            let value = raw
                .trim()
                .parse::<T>()
                .with_context(|| format!("{} must be a non-negative integer, got {:?}", key, raw))?;
            Ok(Some(value))
        }
        _ => Ok(None),
    }
}
