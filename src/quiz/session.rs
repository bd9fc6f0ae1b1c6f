use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::catalog::Catalog;
use crate::quiz::{generate_questions, Question, QuizResult, SESSION_LENGTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Phase {
    Idle,
    Active,
    Finished,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum QuizState {
    #[default]
    Idle,
    Active {
        questions: Vec<Question>,
        current: usize,
        score: usize,
        answered: bool,
    },
    Finished {
        questions: Vec<Question>,
        score: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizEvent {
    Start(Vec<Question>),
    Answer(String),
    Advance,
    Restart,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum AnswerOutcome {
    Correct,
    Incorrect { correct_id: String },
    /// Already answered, not an offered option, or no question in play.
    Rejected,
}

impl QuizState {
    /// Pure transition. Events that make no sense in the current state leave
    /// it unchanged.
    pub fn apply(self, event: QuizEvent) -> (QuizState, Option<AnswerOutcome>) {
        match (self, event) {
            (_, QuizEvent::Start(questions)) => {
                if questions.is_empty() {
                    (QuizState::Finished { questions, score: 0 }, None)
                } else {
                    (
                        QuizState::Active {
                            questions,
                            current: 0,
                            score: 0,
                            answered: false,
                        },
                        None,
                    )
                }
            }
            (_, QuizEvent::Restart) => (QuizState::Idle, None),
            (
                QuizState::Active {
                    questions,
                    current,
                    score,
                    answered: false,
                },
                QuizEvent::Answer(choice),
            ) if questions.get(current).is_some_and(|q| q.offers(&choice)) => {
                let (score, outcome) = match questions.get(current) {
                    Some(q) if q.is_correct(&choice) => (score + 1, AnswerOutcome::Correct),
                    Some(q) => {
                        let correct_id = q.correct_id.clone();
                        (score, AnswerOutcome::Incorrect { correct_id })
                    }
                    None => (score, AnswerOutcome::Rejected),
                };
                (
                    QuizState::Active {
                        questions,
                        current,
                        score,
                        answered: true,
                    },
                    Some(outcome),
                )
            }
            (state, QuizEvent::Answer(_)) => (state, Some(AnswerOutcome::Rejected)),
            (
                QuizState::Active {
                    questions,
                    current,
                    score,
                    answered: true,
                },
                QuizEvent::Advance,
            ) => {
                if current + 1 >= questions.len() {
                    (QuizState::Finished { questions, score }, None)
                } else {
                    (
                        QuizState::Active {
                            questions,
                            current: current + 1,
                            score,
                            answered: false,
                        },
                        None,
                    )
                }
            }
            (state, QuizEvent::Advance) => (state, None),
        }
    }

    pub fn phase(&self) -> Phase {
        match self {
            QuizState::Idle => Phase::Idle,
            QuizState::Active { .. } => Phase::Active,
            QuizState::Finished { .. } => Phase::Finished,
        }
    }
}

/// One play-through: question set, position and score. Nothing outlives the
/// session.
pub struct QuizSession<R = StdRng> {
    state: QuizState,
    rng: R,
    length: usize,
}

impl QuizSession<StdRng> {
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> QuizSession<R> {
    pub fn new(rng: R) -> Self {
        Self {
            state: QuizState::Idle,
            rng,
            length: SESSION_LENGTH,
        }
    }

    pub fn with_length(mut self, length: usize) -> Self {
        self.length = length;
        self
    }

    fn dispatch(&mut self, event: QuizEvent) -> Option<AnswerOutcome> {
        let (state, outcome) = std::mem::take(&mut self.state).apply(event);
        self.state = state;
        outcome
    }

    /// Builds a fresh question set from the catalog, discarding any session
    /// in progress.
    pub fn start(&mut self, catalog: &Catalog) {
        let questions = generate_questions(catalog, &mut self.rng, self.length);
        debug!("Quiz started with {} questions", questions.len());
        self.dispatch(QuizEvent::Start(questions));
    }

    pub fn answer(&mut self, choice_id: &str) -> AnswerOutcome {
        self.dispatch(QuizEvent::Answer(choice_id.to_string()))
            .unwrap_or(AnswerOutcome::Rejected)
    }

    pub fn advance(&mut self) {
        self.dispatch(QuizEvent::Advance);
        if self.phase() == Phase::Finished {
            debug!("Quiz finished: {}/{}", self.score(), self.total());
        }
    }

    pub fn restart(&mut self) {
        self.dispatch(QuizEvent::Restart);
    }

    pub fn state(&self) -> &QuizState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    pub fn current_question(&self) -> Option<&Question> {
        match &self.state {
            QuizState::Active {
                questions, current, ..
            } => questions.get(*current),
            _ => None,
        }
    }

    /// Zero-based index of the current question.
    pub fn position(&self) -> usize {
        match &self.state {
            QuizState::Active { current, .. } => *current,
            QuizState::Finished { questions, .. } => questions.len(),
            QuizState::Idle => 0,
        }
    }

    pub fn total(&self) -> usize {
        match &self.state {
            QuizState::Active { questions, .. } | QuizState::Finished { questions, .. } => {
                questions.len()
            }
            QuizState::Idle => 0,
        }
    }

    pub fn score(&self) -> usize {
        match &self.state {
            QuizState::Active { score, .. } | QuizState::Finished { score, .. } => *score,
            QuizState::Idle => 0,
        }
    }

    pub fn is_answered(&self) -> bool {
        matches!(self.state, QuizState::Active { answered: true, .. })
    }

    /// Final score, once the session has finished.
    pub fn result(&self) -> Option<QuizResult> {
        match &self.state {
            QuizState::Finished { questions, score } => Some(QuizResult {
                score: *score,
                total: questions.len(),
            }),
            _ => None,
        }
    }
}
