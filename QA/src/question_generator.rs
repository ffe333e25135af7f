use crate::analyzer::TextAnalyzer;
use crate::models::*;
use crate::transforms;
use rand::seq::SliceRandom;
use rand::Rng;

/// Samples per-page quiz questions from extracted PDF text.
pub struct QuestionGenerator<A, R> {
    analyzer: A,
    rng: R,
}

impl<A, R> QuestionGenerator<A, R>
where
    A: TextAnalyzer,
    R: Rng,
{
    pub fn new(analyzer: A, rng: R) -> Self {
        Self { analyzer, rng }
    }

    pub fn analyzer(&self) -> &A {
        &self.analyzer
    }

    /// Up to `questions_per_page` records per page, in page order.
    ///
    /// Each attempt draws a question type and a difficulty independently and
    /// uniformly. Attempts on pages without sentences, and attempts whose
    /// transform finds nothing to ask about, are dropped without retry.
    pub fn generate_questions(
        &mut self,
        text_by_page: &PageText,
        questions_per_page: usize,
    ) -> Vec<QAPair> {
        let mut qa_pairs = Vec::new();

        for (&page_num, text) in text_by_page {
            let sentences = self.analyzer.sentences(text);

            for _ in 0..questions_per_page {
                let q_type = QuestionType::ALL[self.rng.gen_range(0..QuestionType::ALL.len())];
                let difficulty =
                    DifficultyLevel::ALL[self.rng.gen_range(0..DifficultyLevel::ALL.len())];

                let Some(sentence) = sentences.choose(&mut self.rng) else {
                    log::debug!("Page {} has no sentences; skipping attempt", page_num);
                    continue;
                };

                match self.generate_one(q_type, sentence, &sentences, page_num, difficulty) {
                    Some(qa_pair) => qa_pairs.push(qa_pair),
                    None => log::debug!("No {} question possible for {:?}", q_type, sentence),
                }
            }
        }

        log::info!(
            "Generated {} questions from {} pages",
            qa_pairs.len(),
            text_by_page.len()
        );
        qa_pairs
    }

    fn generate_one(
        &mut self,
        q_type: QuestionType,
        sentence: &str,
        sentences: &[String],
        page_num: u32,
        difficulty: DifficultyLevel,
    ) -> Option<QAPair> {
        match q_type {
            QuestionType::TrueFalse => transforms::true_false(
                sentence,
                page_num,
                difficulty,
                &self.analyzer,
                &mut self.rng,
            ),
            QuestionType::MultipleChoice => transforms::multiple_choice(
                sentence,
                sentences,
                page_num,
                difficulty,
                &self.analyzer,
                &mut self.rng,
            ),
            QuestionType::OpenEnded => {
                transforms::open_ended(sentence, page_num, difficulty, &mut self.rng)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::LexiconAnalyzer;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn pages() -> PageText {
        let mut pages = PageText::new();
        pages.insert(
            1,
            "The cat sat on the mat. The dog chased a ball.\nA bird built a nest.".to_string(),
        );
        pages.insert(2, String::new());
        pages.insert(
            3,
            "Marie Curie discovered radium in 1898. The farmer grew wheat.".to_string(),
        );
        pages
    }

    fn generator(seed: u64) -> QuestionGenerator<LexiconAnalyzer, StdRng> {
        QuestionGenerator::new(LexiconAnalyzer::new(), StdRng::seed_from_u64(seed))
    }

    #[test]
    fn same_seed_same_questions() {
        let first = generator(42).generate_questions(&pages(), 5);
        let second = generator(42).generate_questions(&pages(), 5);
        assert_eq!(first, second);
    }

    #[test]
    fn never_exceeds_pages_times_count() {
        for seed in 0..20 {
            let pairs = generator(seed).generate_questions(&pages(), 4);
            assert!(pairs.len() <= pages().len() * 4);
        }
    }

    #[test]
    fn empty_page_contributes_nothing() {
        for seed in 0..20 {
            let pairs = generator(seed).generate_questions(&pages(), 3);
            assert!(pairs.iter().all(|p| p.source() != "Page 2"));
        }
    }

    #[test]
    fn zero_questions_per_page() {
        assert!(generator(1).generate_questions(&pages(), 0).is_empty());
    }

    #[test]
    fn records_follow_numeric_page_order() {
        // Twelve pages: "Page 10" sorts before "Page 2" as text.
        let pages: PageText = (1..=12)
            .map(|n| (n, "The cat sat on the mat. The dog chased a ball.".to_string()))
            .collect();

        for seed in 0..5 {
            let pairs = generator(seed).generate_questions(&pages, 2);
            let page_nums: Vec<u32> = pairs
                .iter()
                .map(|p| p.source().strip_prefix("Page ").unwrap().parse().unwrap())
                .collect();

            assert!(page_nums.windows(2).all(|w| w[0] <= w[1]), "{page_nums:?}");
            assert!(page_nums.iter().any(|&n| n >= 10));
        }
    }
}
