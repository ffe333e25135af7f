use crate::analyzer::PosTag;
use anyhow::{Context, Result};
use regex::Regex;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

const DETERMINERS: &[&str] = &[
    "the", "a", "an", "this", "that", "these", "those", "each", "every", "some", "any", "no",
    "all", "both", "either", "neither", "another", "such", "my", "your", "his", "her", "its",
    "our", "their", "whose",
];

const PRONOUNS: &[&str] = &[
    "i", "you", "he", "she", "it", "we", "they", "me", "him", "us", "them", "who", "whom",
    "which", "what", "myself", "yourself", "himself", "herself", "itself", "ourselves",
    "themselves", "something", "anything", "everything", "nothing", "someone", "anyone",
    "everyone", "nobody", "mine", "yours", "hers", "ours", "theirs",
];

const SUBJECT_PRONOUNS: &[&str] = &["i", "you", "he", "she", "it", "we", "they"];

const ADPOSITIONS: &[&str] = &[
    "of", "in", "on", "at", "by", "for", "with", "about", "against", "between", "into",
    "through", "during", "before", "after", "above", "below", "to", "from", "up", "down",
    "over", "under", "across", "along", "among", "around", "behind", "beneath", "beside",
    "beyond", "near", "off", "onto", "upon", "within", "without", "toward", "towards", "via",
    "per", "since", "until", "than", "like", "as", "despite", "except", "inside", "outside",
];

const COORDINATORS: &[&str] = &["and", "or", "but", "nor", "yet", "so"];

const SUBORDINATORS: &[&str] = &[
    "because", "although", "though", "while", "whereas", "if", "unless", "whether", "when",
    "where", "once", "whenever", "wherever",
];

const AUXILIARIES: &[&str] = &[
    "is", "are", "was", "were", "be", "been", "being", "am", "has", "have", "had", "do",
    "does", "did", "will", "would", "shall", "should", "can", "could", "may", "might", "must",
    "'s", "'re", "'ve", "'ll", "'d", "'m",
];

const MODALS: &[&str] = &[
    "will", "would", "shall", "should", "can", "could", "may", "might", "must",
];

const PARTICLES: &[&str] = &["not", "n't"];

const ADVERBS: &[&str] = &[
    "very", "also", "often", "never", "always", "here", "there", "now", "then", "just", "too",
    "quite", "rather", "only", "even", "still", "already", "soon", "again", "however", "thus",
    "therefore", "almost", "perhaps", "maybe", "sometimes", "usually", "ever", "instead",
    "together", "away", "back", "later", "yesterday", "today", "tomorrow", "why", "how",
];

const ADJECTIVES: &[&str] = &[
    "good", "new", "last", "long", "great", "little", "own", "other", "old", "right", "big",
    "high", "different", "small", "large", "next", "early", "young", "important", "few",
    "public", "bad", "same", "able", "best", "better", "sure", "free", "true", "false",
    "whole", "real", "full", "hot", "cold", "warm", "red", "blue", "green", "black", "white",
    "dark", "strong", "main", "major", "minor", "clear", "simple", "common", "low", "short",
    "easy", "hard", "late", "general", "specific", "human", "local", "likely", "possible",
    "social", "national", "fast", "slow", "happy", "sad", "rich", "poor", "safe", "deep",
    "wide", "empty", "open", "ready", "key", "many", "much", "several", "various", "certain",
];

const NUMBER_WORDS: &[&str] = &[
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
    "eleven", "twelve", "thirteen", "fourteen", "fifteen", "sixteen", "seventeen", "eighteen",
    "nineteen", "twenty", "thirty", "forty", "fifty", "sixty", "seventy", "eighty", "ninety",
    "hundred", "thousand", "million", "billion", "trillion", "dozen",
];

// Base forms plus irregular past tenses and participles. Regular inflections
// are recovered by `Lexicon::lookup`.
const VERBS: &[&str] = &[
    "sit", "sat", "run", "ran", "go", "goes", "went", "gone", "come", "came", "see", "saw",
    "seen", "make", "made", "take", "took", "taken", "give", "gave", "given", "find", "found",
    "say", "said", "tell", "told", "become", "became", "begin", "began", "begun", "bring",
    "brought", "build", "built", "buy", "bought", "catch", "caught", "choose", "chose",
    "chosen", "draw", "drew", "drawn", "drive", "drove", "driven", "eat", "ate", "eaten",
    "fall", "fell", "fallen", "feel", "felt", "fight", "fought", "fly", "flew", "flown",
    "forget", "forgot", "get", "got", "gotten", "grow", "grew", "grown", "hold", "held",
    "hide", "hid", "keep", "kept", "know", "knew", "known", "lead", "led", "leave", "left",
    "lose", "lost", "mean", "meant", "meet", "met", "pay", "paid", "ride", "rode", "rise",
    "rose", "risen", "sing", "sang", "sung", "send", "sent", "shake", "shook", "shoot",
    "shot", "show", "shown", "sleep", "slept", "speak", "spoke", "spoken", "spend", "spent",
    "stand", "stood", "steal", "stole", "strike", "struck", "swim", "swam", "teach",
    "taught", "think", "thought", "throw", "threw", "thrown", "understand", "understood",
    "wake", "woke", "win", "won", "write", "wrote", "written", "use", "provide", "include",
    "help", "allow", "create", "require", "increase", "reduce", "contain", "describe",
    "explain", "produce", "consider", "remain", "appear", "develop", "support", "follow",
    "move", "live", "believe", "happen", "learn", "change", "stay", "reach", "kill", "raise",
    "pass", "sell", "decide", "return", "offer", "play", "work", "call", "try", "ask",
    "need", "seem", "turn", "start", "want", "look", "let", "put", "set", "cut", "hit",
    "read", "hear", "heard", "lie", "lay", "laid", "determine", "measure", "occur", "form",
    "cause", "affect", "protect", "discover", "invent", "publish", "enter", "add", "apply",
    "carry", "study", "connect", "depend", "exist", "die", "born", "contribute",
];

const MONTHS: &[&str] = &[
    "january", "february", "march", "april", "may", "june", "july", "august", "september",
    "october", "november", "december",
];

/// Short forms written with a trailing period that rarely end a sentence.
const ABBREVIATIONS: &[&str] = &[
    "dr", "mr", "mrs", "ms", "prof", "st", "mt", "jr", "sr", "gen", "col", "capt", "lt", "sgt",
    "rev", "fig", "vs", "approx", "e.g", "i.e",
];

const ADJECTIVE_SUFFIXES: &[&str] = &[
    "ous", "ful", "ive", "able", "ible", "less", "ical", "ional", "ular",
];

fn numeral_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\d+([.,:/]\d+)*(st|nd|rd|th|s)?$").expect("numeral pattern compiles")
    })
}

/// Word → part-of-speech table backing [`crate::analyzer::LexiconAnalyzer`].
#[derive(Debug, Clone)]
pub struct Lexicon {
    entries: HashMap<String, PosTag>,
}

impl Lexicon {
    pub fn builtin() -> Self {
        let mut entries = HashMap::new();
        let groups: [(&[&str], PosTag); 11] = [
            (VERBS, PosTag::Verb),
            (ADJECTIVES, PosTag::Adj),
            (ADVERBS, PosTag::Adv),
            (NUMBER_WORDS, PosTag::Num),
            (ADPOSITIONS, PosTag::Adp),
            (COORDINATORS, PosTag::Cconj),
            (SUBORDINATORS, PosTag::Sconj),
            (PARTICLES, PosTag::Part),
            (PRONOUNS, PosTag::Pron),
            (DETERMINERS, PosTag::Det),
            (AUXILIARIES, PosTag::Aux),
        ];
        // Later groups win, so closed classes override ambiguous open-class entries.
        for (words, tag) in groups {
            for word in words {
                entries.insert(word.to_string(), tag);
            }
        }
        Self { entries }
    }

    /// Built-in table plus the overrides in `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read lexicon {}", path.display()))?;

        let mut lexicon = Self::builtin();
        let added = lexicon
            .merge_overrides(&contents)
            .with_context(|| format!("invalid lexicon {}", path.display()))?;
        log::info!("Loaded {} lexicon overrides from {}", added, path.display());
        Ok(lexicon)
    }

    /// Parses `word<TAB>TAG` lines; blank lines and `#` comments are skipped.
    pub fn merge_overrides(&mut self, contents: &str) -> Result<usize> {
        let mut added = 0;
        for (idx, line) in contents.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let fields: Vec<&str> = line.split_whitespace().collect();
            let [word, tag] = fields.as_slice() else {
                anyhow::bail!("line {}: expected `word<TAB>TAG`, got {:?}", idx + 1, line);
            };
            let tag: PosTag = tag
                .parse()
                .with_context(|| format!("line {}", idx + 1))?;

            self.entries.insert(word.to_lowercase(), tag);
            added += 1;
        }
        Ok(added)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Exact entry for `word`, falling back to regular verb inflections
    /// (`-s`, `-es`, `-d`, `-ed`) of a listed base form.
    pub fn lookup(&self, word: &str) -> Option<PosTag> {
        let lower = word.to_lowercase();
        if let Some(tag) = self.entries.get(&lower) {
            return Some(*tag);
        }

        ["es", "s", "ed", "d"]
            .iter()
            .filter_map(|suffix| lower.strip_suffix(suffix))
            .filter(|stem| stem.len() > 1)
            .find(|stem| self.entries.get(*stem) == Some(&PosTag::Verb))
            .map(|_| PosTag::Verb)
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::builtin()
    }
}

pub fn is_numeral(word: &str) -> bool {
    numeral_re().is_match(word)
}

pub fn is_month(word: &str) -> bool {
    MONTHS.contains(&word.to_lowercase().as_str())
}

/// `word` is given without its trailing period.
pub fn is_abbreviation(word: &str) -> bool {
    ABBREVIATIONS.contains(&word.to_lowercase().as_str())
}

pub fn is_subject_pronoun(word: &str) -> bool {
    SUBJECT_PRONOUNS.contains(&word.to_lowercase().as_str())
}

pub fn is_modal(word: &str) -> bool {
    MODALS.contains(&word.to_lowercase().as_str())
}

/// Tag guessed from word shape alone, for words missing from the lexicon.
pub fn suffix_tag(word: &str) -> Option<PosTag> {
    let lower = word.to_lowercase();
    // At least three letters must precede the suffix: "thing", "table" stay unknown.
    let has = |suffix: &str| lower.len() > suffix.len() + 2 && lower.ends_with(suffix);

    if has("ly") {
        Some(PosTag::Adv)
    } else if has("ing") || has("ed") {
        Some(PosTag::Verb)
    } else if ADJECTIVE_SUFFIXES.iter().any(|suffix| has(suffix)) {
        Some(PosTag::Adj)
    } else {
        None
    }
}
