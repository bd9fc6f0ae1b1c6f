pub mod families;
pub mod sampling;
pub mod session;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::catalog::{Animal, Catalog};
pub use families::QuestionFamily;

/// Questions per session when the catalog supports that many families.
pub const SESSION_LENGTH: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Question {
    pub family: QuestionFamily,
    pub text: String,
    pub answers: Vec<Answer>,
    pub correct_id: String,
    pub explanation: String,
}

impl Question {
    pub fn new(
        family: QuestionFamily,
        text: String,
        answers: Vec<Answer>,
        explanation: String,
    ) -> Self {
        let correct_id = answers
            .iter()
            .find(|a| a.is_correct)
            .map(|a| a.animal_id.clone())
            .unwrap_or_default();
        Self {
            family,
            text,
            answers,
            correct_id,
            explanation,
        }
    }

    /// Answers are matched by animal id, never by display text.
    pub fn is_correct(&self, choice_id: &str) -> bool {
        choice_id == self.correct_id
    }

    pub fn offers(&self, choice_id: &str) -> bool {
        self.answers.iter().any(|a| a.animal_id == choice_id)
    }

    pub fn correct_position(&self) -> Option<usize> {
        self.answers.iter().position(|a| a.is_correct)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Answer {
    pub animal_id: String,
    pub text: String,
    pub is_correct: bool,
}

impl Answer {
    pub fn new(animal: &Animal, is_correct: bool) -> Self {
        Self {
            animal_id: animal.id.clone(),
            text: animal.display_name().to_string(),
            is_correct,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Rating {
    Perfect,
    Great,
    Good,
    TryAgain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct QuizResult {
    pub score: usize,
    pub total: usize,
}

impl QuizResult {
    /// Rounded percentage, 0 for an empty session.
    pub fn percent(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        ((self.score as f64 / self.total as f64) * 100.0).round() as u32
    }

    pub fn rating(&self) -> Rating {
        match self.percent() {
            100 => Rating::Perfect,
            p if p >= 70 => Rating::Great,
            p if p >= 40 => Rating::Good,
            _ => Rating::TryAgain,
        }
    }
}

/// Builds one question per eligible family, then shuffles and truncates the
/// set so sessions differ in both content and order.
pub fn generate_questions<R: Rng + ?Sized>(
    catalog: &Catalog,
    rng: &mut R,
    length: usize,
) -> Vec<Question> {
    let mut questions: Vec<Question> = QuestionFamily::ALL
        .iter()
        .filter_map(|family| family.generate(catalog, rng))
        .collect();
    log::debug!(
        "{} of {} question families eligible",
        questions.len(),
        QuestionFamily::ALL.len()
    );

    questions.shuffle(rng);
    questions.truncate(length);
    questions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn full_catalog_fills_a_session() {
        let catalog = fixtures::zoo();
        let mut rng = StdRng::seed_from_u64(7);
        let questions = generate_questions(&catalog, &mut rng, SESSION_LENGTH);
        assert_eq!(questions.len(), 10);

        let mut families: Vec<QuestionFamily> = questions.iter().map(|q| q.family).collect();
        families.sort();
        families.dedup();
        assert_eq!(families.len(), 10);
    }

    #[test]
    fn sessions_are_truncated_to_length() {
        let catalog = fixtures::zoo();
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(generate_questions(&catalog, &mut rng, 4).len(), 4);
    }

    #[test]
    fn every_question_has_four_distinct_options_and_one_answer() {
        let catalog = fixtures::zoo();
        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..50 {
            for q in generate_questions(&catalog, &mut rng, SESSION_LENGTH) {
                assert_eq!(q.answers.len(), 4, "{:?}", q.family);
                assert_eq!(q.answers.iter().filter(|a| a.is_correct).count(), 1);
                let mut ids: Vec<&str> = q.answers.iter().map(|a| a.animal_id.as_str()).collect();
                ids.sort();
                ids.dedup();
                assert_eq!(ids.len(), 4);
                assert!(q.offers(&q.correct_id));
                assert!(catalog.animal(&q.correct_id).is_some());
                assert!(!q.explanation.is_empty());
            }
        }
    }

    #[test]
    fn same_seed_same_session() {
        let catalog = fixtures::zoo();
        let a = generate_questions(&catalog, &mut StdRng::seed_from_u64(3), SESSION_LENGTH);
        let b = generate_questions(&catalog, &mut StdRng::seed_from_u64(3), SESSION_LENGTH);
        assert_eq!(a, b);
    }

    #[test]
    fn empty_catalog_yields_no_questions() {
        let catalog = Catalog::default();
        let mut rng = StdRng::seed_from_u64(1);
        assert!(generate_questions(&catalog, &mut rng, SESSION_LENGTH).is_empty());
    }

    #[test]
    fn correct_answer_position_is_uniform() {
        let catalog = fixtures::zoo();
        let mut rng = StdRng::seed_from_u64(2024);
        let mut slots = [0usize; 4];
        for _ in 0..1000 {
            for q in generate_questions(&catalog, &mut rng, SESSION_LENGTH) {
                slots[q.correct_position().unwrap()] += 1;
            }
        }

        let total: usize = slots.iter().sum();
        let expected = total as f64 / 4.0;
        let chi_square: f64 = slots
            .iter()
            .map(|&observed| {
                let diff = observed as f64 - expected;
                diff * diff / expected
            })
            .sum();
        // 3 degrees of freedom, p = 0.001
        assert!(chi_square < 16.27, "slots {:?}, chi^2 {}", slots, chi_square);
    }

    #[test]
    fn ratings_follow_percentage_bands() {
        let result = |score, total| QuizResult { score, total };
        assert_eq!(result(10, 10).rating(), Rating::Perfect);
        assert_eq!(result(7, 10).rating(), Rating::Great);
        assert_eq!(result(4, 10).rating(), Rating::Good);
        assert_eq!(result(3, 10).rating(), Rating::TryAgain);
        assert_eq!(result(0, 0).percent(), 0);
        assert_eq!(result(2, 3).percent(), 67);
    }
}
