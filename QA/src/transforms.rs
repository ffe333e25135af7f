use crate::analyzer::{Analysis, PosTag, TextAnalyzer};
use crate::models::{page_label, DifficultyLevel, QAPair, QuestionType};
use rand::seq::SliceRandom;
use rand::Rng;

pub const BLANK: &str = "___";
pub const QUESTION_WORDS: [&str; 4] = ["What", "How", "Why", "Explain"];
const MAX_DISTRACTOR_ATTEMPTS: usize = 3;

/// Tags whose first occurrence gets negated in a false statement.
const NEGATABLE: [PosTag; 3] = [PosTag::Verb, PosTag::Adj, PosTag::Num];

/// Sentence with its first verb, adjective or number prefixed by "not".
///
/// `None` when the sentence has no such token.
pub fn negate(sentence: &str, analysis: &Analysis) -> Option<String> {
    let token = analysis.first_with_tag(&NEGATABLE)?;
    Some(sentence.replacen(&token.text, &format!("not {}", token.text), 1))
}

pub fn true_false<A, R>(
    sentence: &str,
    page_num: u32,
    difficulty: DifficultyLevel,
    analyzer: &A,
    rng: &mut R,
) -> Option<QAPair>
where
    A: TextAnalyzer + ?Sized,
    R: Rng + ?Sized,
{
    let (statement, answer) = if rng.gen_bool(0.5) {
        (sentence.to_string(), "True")
    } else {
        // Unnegatable sentences are still labeled False; see DESIGN.md.
        let modified = negate(sentence, &analyzer.analyze(sentence)).unwrap_or_else(|| {
            log::debug!("No negation target in {:?}; keeping sentence as-is", sentence);
            sentence.to_string()
        });
        (modified, "False")
    };

    Some(QAPair::new(
        format!("True or False: {}", statement),
        answer,
        page_label(page_num),
        difficulty,
        QuestionType::TrueFalse,
    ))
}

pub fn multiple_choice<A, R>(
    sentence: &str,
    sentences: &[String],
    page_num: u32,
    difficulty: DifficultyLevel,
    analyzer: &A,
    rng: &mut R,
) -> Option<QAPair>
where
    A: TextAnalyzer + ?Sized,
    R: Rng + ?Sized,
{
    let analysis = analyzer.analyze(sentence);
    let target = match analysis.first_entity() {
        Some(entity) => entity.text.clone(),
        None => analysis.first_noun()?.to_string(),
    };

    let blanked = sentence.replacen(&target, BLANK, 1);

    let mut options = vec![target.clone()];
    let other_sentences: Vec<&String> = sentences.iter().filter(|s| *s != sentence).collect();
    for _ in 0..MAX_DISTRACTOR_ATTEMPTS {
        let Some(other) = other_sentences.choose(rng) else {
            break;
        };
        let other_analysis = analyzer.analyze(other);
        let noun = other_analysis
            .nouns()
            .find(|n| !options.iter().any(|o| o == n))
            .map(str::to_string);
        if let Some(noun) = noun {
            options.push(noun);
        }
    }

    options.shuffle(rng);

    let question = format!(
        "Which of the following correctly fills in the blank? {}\nOptions: {}",
        blanked,
        options.join(", ")
    );

    Some(
        QAPair::new(
            question,
            format!("The correct answer is: {}", target),
            page_label(page_num),
            difficulty,
            QuestionType::MultipleChoice,
        )
        .with_options(options),
    )
}

pub fn open_ended<R>(
    sentence: &str,
    page_num: u32,
    difficulty: DifficultyLevel,
    rng: &mut R,
) -> Option<QAPair>
where
    R: Rng + ?Sized,
{
    let word = QUESTION_WORDS.choose(rng)?;

    Some(QAPair::new(
        format!("{} {}?", word, sentence.to_lowercase()),
        format!("Based on the text: {}", sentence),
        page_label(page_num),
        difficulty,
        QuestionType::OpenEnded,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::LexiconAnalyzer;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn page_sentences() -> Vec<String> {
        [
            "The cat sat on the mat.",
            "The dog chased a ball.",
            "A bird built a nest.",
            "The farmer grew wheat.",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect()
    }

    #[test]
    fn negates_first_verb() {
        let analyzer = LexiconAnalyzer::new();
        let sentence = "The cat sat on the mat.";

        let negated = negate(sentence, &analyzer.analyze(sentence)).unwrap();
        assert_eq!(negated, "The cat not sat on the mat.");
    }

    #[test]
    fn negation_replaces_first_textual_occurrence_only() {
        let analyzer = LexiconAnalyzer::new();
        let sentence = "The old man has an old boat.";

        let negated = negate(sentence, &analyzer.analyze(sentence)).unwrap();
        assert_eq!(negated, "The not old man has an old boat.");
    }

    #[test]
    fn nothing_to_negate() {
        let analyzer = LexiconAnalyzer::new();
        let sentence = "The cat on the mat.";
        assert_eq!(negate(sentence, &analyzer.analyze(sentence)), None);
    }

    #[test]
    fn true_false_answers_match_statement() {
        let analyzer = LexiconAnalyzer::new();
        let sentence = "The cat sat on the mat.";
        let mut seen = (false, false);

        for seed in 0..64 {
            let mut rng = StdRng::seed_from_u64(seed);
            let pair =
                true_false(sentence, 1, DifficultyLevel::Basic, &analyzer, &mut rng).unwrap();

            assert_eq!(pair.question_type(), QuestionType::TrueFalse);
            assert_eq!(pair.source(), "Page 1");
            match pair.answer() {
                "True" => {
                    assert_eq!(pair.question(), "True or False: The cat sat on the mat.");
                    seen.0 = true;
                }
                "False" => {
                    assert!(pair.question().contains("not sat"));
                    seen.1 = true;
                }
                other => panic!("unexpected answer {other:?}"),
            }
        }

        assert_eq!(seen, (true, true));
    }

    #[test]
    fn unnegatable_sentence_is_still_labeled_false() {
        let analyzer = LexiconAnalyzer::new();
        let sentence = "The cat on the mat.";

        for seed in 0..32 {
            let mut rng = StdRng::seed_from_u64(seed);
            let pair =
                true_false(sentence, 3, DifficultyLevel::Basic, &analyzer, &mut rng).unwrap();
            assert_eq!(pair.question(), "True or False: The cat on the mat.");
        }
    }

    #[test]
    fn multiple_choice_blanks_target_and_lists_options() {
        let analyzer = LexiconAnalyzer::new();
        let sentences = page_sentences();
        let mut rng = StdRng::seed_from_u64(7);

        let pair = multiple_choice(
            &sentences[0],
            &sentences,
            2,
            DifficultyLevel::Advanced,
            &analyzer,
            &mut rng,
        )
        .unwrap();

        let expected_prefix = concat!(
            "Which of the following correctly fills in the blank? ",
            "The ___ sat on the mat.\nOptions: ",
        );
        assert!(pair.question().starts_with(expected_prefix));
        assert_eq!(pair.answer(), "The correct answer is: cat");
        assert!(pair.options().contains(&"cat".to_string()));
        assert!(pair.options().len() >= 2 && pair.options().len() <= 4);

        let listed = pair.question().split("\nOptions: ").nth(1).unwrap();
        assert_eq!(listed, pair.options().join(", "));
    }

    #[test]
    fn multiple_choice_options_are_unique() {
        let analyzer = LexiconAnalyzer::new();
        let sentences: Vec<String> = ["The cat sat.", "The cat ran.", "The cat slept."]
            .iter()
            .map(|s| s.to_string())
            .collect();

        for seed in 0..16 {
            let mut rng = StdRng::seed_from_u64(seed);
            let pair = multiple_choice(
                &sentences[0],
                &sentences,
                1,
                DifficultyLevel::Basic,
                &analyzer,
                &mut rng,
            )
            .unwrap();
            // Every other sentence only offers "cat", which is already the answer.
            assert_eq!(pair.options(), ["cat".to_string()]);
        }
    }

    #[test]
    fn multiple_choice_prefers_entities() {
        let analyzer = LexiconAnalyzer::new();
        let sentences = vec!["Marie Curie discovered radium in a lab.".to_string()];
        let mut rng = StdRng::seed_from_u64(1);

        let pair = multiple_choice(
            &sentences[0],
            &sentences,
            1,
            DifficultyLevel::Basic,
            &analyzer,
            &mut rng,
        )
        .unwrap();

        assert_eq!(pair.answer(), "The correct answer is: Marie Curie");
        assert!(pair.question().contains("___ discovered radium"));
        assert_eq!(pair.options(), ["Marie Curie".to_string()]);
    }

    #[test]
    fn multiple_choice_without_target_is_dropped() {
        let analyzer = LexiconAnalyzer::new();
        let sentences = vec!["It is.".to_string(), "The cat sat.".to_string()];
        let mut rng = StdRng::seed_from_u64(1);

        let pair = multiple_choice(
            &sentences[0],
            &sentences,
            1,
            DifficultyLevel::Basic,
            &analyzer,
            &mut rng,
        );
        assert!(pair.is_none());
    }

    #[test]
    fn open_ended_restates_sentence() {
        let sentence = "Photosynthesis Converts Light.";

        for seed in 0..16 {
            let mut rng = StdRng::seed_from_u64(seed);
            let pair = open_ended(sentence, 4, DifficultyLevel::Intermediate, &mut rng).unwrap();

            assert_eq!(pair.answer(), format!("Based on the text: {}", sentence));
            let (word, rest) = pair.question().split_once(' ').unwrap();
            assert!(QUESTION_WORDS.contains(&word));
            assert_eq!(rest, "photosynthesis converts light.?");
            assert_eq!(pair.question_type(), QuestionType::OpenEnded);
        }
    }
}
