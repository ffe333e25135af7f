use crate::lexicon::{self, Lexicon};
use anyhow::Result;
use regex::Regex;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::OnceLock;
use unicode_segmentation::UnicodeSegmentation;

/// Universal part-of-speech tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PosTag {
    Noun,
    Propn,
    Verb,
    Aux,
    Adj,
    Adv,
    Num,
    Det,
    Pron,
    Adp,
    Cconj,
    Sconj,
    Part,
    Punct,
    Other,
}

impl PosTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            PosTag::Noun => "NOUN",
            PosTag::Propn => "PROPN",
            PosTag::Verb => "VERB",
            PosTag::Aux => "AUX",
            PosTag::Adj => "ADJ",
            PosTag::Adv => "ADV",
            PosTag::Num => "NUM",
            PosTag::Det => "DET",
            PosTag::Pron => "PRON",
            PosTag::Adp => "ADP",
            PosTag::Cconj => "CCONJ",
            PosTag::Sconj => "SCONJ",
            PosTag::Part => "PART",
            PosTag::Punct => "PUNCT",
            PosTag::Other => "X",
        }
    }

    pub fn is_open_class(&self) -> bool {
        matches!(
            self,
            PosTag::Noun | PosTag::Propn | PosTag::Verb | PosTag::Adj | PosTag::Adv
        )
    }
}

impl fmt::Display for PosTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PosTag {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let tag = match s.to_ascii_uppercase().as_str() {
            "NOUN" => PosTag::Noun,
            "PROPN" => PosTag::Propn,
            "VERB" => PosTag::Verb,
            "AUX" => PosTag::Aux,
            "ADJ" => PosTag::Adj,
            "ADV" => PosTag::Adv,
            "NUM" => PosTag::Num,
            "DET" => PosTag::Det,
            "PRON" => PosTag::Pron,
            "ADP" => PosTag::Adp,
            "CCONJ" | "CONJ" => PosTag::Cconj,
            "SCONJ" => PosTag::Sconj,
            "PART" => PosTag::Part,
            "PUNCT" => PosTag::Punct,
            "X" | "OTHER" => PosTag::Other,
            _ => anyhow::bail!("unknown part-of-speech tag `{}`", s),
        };
        Ok(tag)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub text: String,
    pub pos: PosTag,
    /// Byte offset of the token in the analyzed sentence.
    pub offset: usize,
}

impl Token {
    pub fn new(text: impl Into<String>, pos: PosTag, offset: usize) -> Self {
        Self {
            text: text.into(),
            pos,
            offset,
        }
    }

    fn end(&self) -> usize {
        self.offset + self.text.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityLabel {
    Named,
    Date,
    Cardinal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub text: String,
    pub label: EntityLabel,
}

/// Tokens and entity spans of one sentence, both in sentence order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Analysis {
    pub tokens: Vec<Token>,
    pub entities: Vec<Entity>,
}

impl Analysis {
    pub fn first_with_tag(&self, tags: &[PosTag]) -> Option<&Token> {
        self.tokens.iter().find(|token| tags.contains(&token.pos))
    }

    pub fn first_noun(&self) -> Option<&str> {
        self.first_with_tag(&[PosTag::Noun]).map(|t| t.text.as_str())
    }

    pub fn first_entity(&self) -> Option<&Entity> {
        self.entities.first()
    }

    pub fn nouns(&self) -> impl Iterator<Item = &str> {
        self.tokens
            .iter()
            .filter(|t| t.pos == PosTag::Noun)
            .map(|t| t.text.as_str())
    }
}

/// Sentence segmentation plus token / entity annotation.
///
/// The generator only talks to this trait, so any linguistic pipeline can be
/// plugged in as long as it is constructed up front and handed over.
pub trait TextAnalyzer {
    /// Trimmed, non-empty sentences of `text`.
    fn sentences(&self, text: &str) -> Vec<String>;

    fn analyze(&self, sentence: &str) -> Analysis;
}

fn whitespace_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("whitespace pattern compiles"))
}

/// Rule-based analyzer over a [`Lexicon`].
#[derive(Debug, Clone, Default)]
pub struct LexiconAnalyzer {
    lexicon: Lexicon,
}

impl LexiconAnalyzer {
    pub fn new() -> Self {
        Self::with_lexicon(Lexicon::builtin())
    }

    pub fn with_lexicon(lexicon: Lexicon) -> Self {
        Self { lexicon }
    }

    pub fn from_lexicon_file(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::with_lexicon(Lexicon::load(path)?))
    }

    fn tokenize<'a>(&self, sentence: &'a str) -> Vec<(usize, &'a str)> {
        sentence
            .split_word_bound_indices()
            .filter(|(_, word)| !word.trim().is_empty())
            .collect()
    }

    fn tag(&self, words: &[(usize, &str)]) -> Vec<Token> {
        // Index of the first word-like token; leading quotes and brackets don't count.
        let first_word = words.iter().position(|(_, w)| is_wordlike(w));
        let mut guessed = vec![false; words.len()];

        let mut tokens: Vec<Token> = words
            .iter()
            .enumerate()
            .map(|(i, (offset, word))| {
                let next = words.get(i + 1).map(|(_, w)| *w);
                let (pos, was_guess) = self.tag_word(word, Some(i) == first_word, next);
                guessed[i] = was_guess;
                Token::new(*word, pos, *offset)
            })
            .collect();

        for i in 0..tokens.len() {
            if guessed[i] {
                let adjusted = contextual_tag(&tokens, i);
                tokens[i].pos = adjusted;
            }
        }

        tokens
    }

    /// Tag from the word alone plus its immediate right neighbour. The flag
    /// marks open-class guesses that context rules may still revise.
    fn tag_word(&self, word: &str, sentence_initial: bool, next: Option<&str>) -> (PosTag, bool) {
        if !is_wordlike(word) {
            return (PosTag::Punct, false);
        }
        if lexicon::is_numeral(word) {
            return (PosTag::Num, false);
        }
        if is_capitalized(word) && lexicon::is_month(word) && word != "May" {
            return (PosTag::Propn, false);
        }

        let listed = self.lexicon.lookup(word);
        let proper = is_acronym(word)
            || (is_capitalized(word) && !sentence_initial)
            || (is_capitalized(word) && sentence_initial && next.is_some_and(is_capitalized));

        if proper && listed.map_or(true, |tag| tag.is_open_class()) {
            return (PosTag::Propn, false);
        }
        if let Some(tag) = listed {
            return (tag, false);
        }

        match lexicon::suffix_tag(word) {
            Some(tag) => (tag, true),
            None => (PosTag::Noun, true),
        }
    }

    fn entities(&self, sentence: &str, tokens: &[Token]) -> Vec<Entity> {
        let mut entities = Vec::new();
        let mut i = 0;

        while i < tokens.len() {
            if !is_entity_part(&tokens[i]) {
                i += 1;
                continue;
            }

            let start = i;
            while i + 1 < tokens.len() && is_entity_part(&tokens[i + 1]) {
                i += 1;
            }
            let span = &tokens[start..=i];

            let label = if span.iter().any(|t| lexicon::is_month(&t.text)) {
                EntityLabel::Date
            } else if span.iter().all(|t| t.pos == PosTag::Num) {
                EntityLabel::Cardinal
            } else {
                EntityLabel::Named
            };

            entities.push(Entity {
                text: sentence[span[0].offset..span[span.len() - 1].end()].to_string(),
                label,
            });
            i += 1;
        }

        entities
    }
}

fn ends_with_abbreviation(segment: &str) -> bool {
    let Some(body) = segment.strip_suffix('.') else {
        return false;
    };
    body.rsplit(' ')
        .next()
        .map(|word| word.trim_start_matches(|c: char| !c.is_alphanumeric()))
        .is_some_and(lexicon::is_abbreviation)
}

impl TextAnalyzer for LexiconAnalyzer {
    fn sentences(&self, text: &str) -> Vec<String> {
        // PDF text breaks lines mid-sentence.
        let normalized = whitespace_re().replace_all(text, " ");

        let mut sentences = Vec::new();
        let mut pending = String::new();
        for piece in normalized.unicode_sentences().map(str::trim).filter(|s| !s.is_empty()) {
            if !pending.is_empty() {
                pending.push(' ');
            }
            pending.push_str(piece);
            // "Dr." and friends end a segment without ending the sentence.
            if !ends_with_abbreviation(&pending) {
                sentences.push(std::mem::take(&mut pending));
            }
        }
        if !pending.is_empty() {
            sentences.push(pending);
        }
        sentences
    }

    fn analyze(&self, sentence: &str) -> Analysis {
        let words = self.tokenize(sentence);
        let tokens = self.tag(&words);
        let entities = self.entities(sentence, &tokens);

        Analysis { tokens, entities }
    }
}

fn contextual_tag(tokens: &[Token], i: usize) -> PosTag {
    let token = &tokens[i];
    let prev = i.checked_sub(1).map(|p| &tokens[p]);
    let next = tokens.get(i + 1);
    let lower = token.text.to_lowercase();

    match token.pos {
        PosTag::Noun => {
            let after_subject = prev.is_some_and(|p| lexicon::is_subject_pronoun(&p.text));
            let after_modal = prev.is_some_and(|p| lexicon::is_modal(&p.text));
            let infinitive = prev.is_some_and(|p| p.text.eq_ignore_ascii_case("to"))
                && next.is_some_and(|n| matches!(n.pos, PosTag::Det | PosTag::Pron | PosTag::Adp));
            // "The cat eats the fish": bare -s word between a noun and its object.
            let third_person = lower.ends_with('s')
                && !lower.ends_with("ss")
                && prev.is_some_and(|p| matches!(p.pos, PosTag::Noun | PosTag::Propn))
                && next.is_some_and(|n| matches!(n.pos, PosTag::Det | PosTag::Adp | PosTag::Num));

            if after_subject || after_modal || infinitive || third_person {
                PosTag::Verb
            } else {
                PosTag::Noun
            }
        }
        PosTag::Verb => match prev.map(|p| p.pos) {
            Some(PosTag::Det) | Some(PosTag::Adj) if lower.ends_with("ing") => PosTag::Noun,
            Some(PosTag::Det) if lower.ends_with("ed") => PosTag::Adj,
            _ => PosTag::Verb,
        },
        other => other,
    }
}

fn is_entity_part(token: &Token) -> bool {
    matches!(token.pos, PosTag::Propn | PosTag::Num)
}

fn is_wordlike(word: &str) -> bool {
    word.chars().any(char::is_alphanumeric)
}

fn is_capitalized(word: &str) -> bool {
    word.chars().next().is_some_and(char::is_uppercase)
}

fn is_acronym(word: &str) -> bool {
    word.chars().filter(|c| c.is_alphabetic()).count() >= 2
        && word.chars().all(|c| !c.is_alphabetic() || c.is_uppercase())
}
