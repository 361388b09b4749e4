//! Multiple-choice quizzes over the words a user has already been given.

use cubby::KeyValueStore;
use language_utils::Language;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

use crate::history::{self, WordRecord};
use crate::{Wordbook, WordlyError};

/// Below this many words in a language there is no quiz.
pub const MIN_HISTORY_FOR_QUIZ: usize = 4;
pub const MAX_QUIZ_QUESTIONS: usize = 5;
pub const DISTRACTORS_PER_QUESTION: usize = 3;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[cfg_attr(target_arch = "wasm32", derive(tsify::Tsify))]
#[cfg_attr(target_arch = "wasm32", tsify(into_wasm_abi, from_wasm_abi))]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    /// The word being asked about.
    pub question: String,
    pub correct_answer: String,
    pub options: Vec<String>,
}

/// Asks for the definition of up to [`MAX_QUIZ_QUESTIONS`] of the language's words. Each
/// question's wrong options are definitions of other words from the same shuffled history.
///
/// Empty when the history holds fewer than [`MIN_HISTORY_FOR_QUIZ`] words for the language.
/// Two words can share a definition; options are not deduplicated.
pub fn generate_quiz<R: Rng + ?Sized>(
    history: &[WordRecord],
    language: Language,
    rng: &mut R,
) -> Vec<QuizQuestion> {
    let mut pool: Vec<&WordRecord> = history
        .iter()
        .filter(|record| record.language() == language)
        .collect();

    if pool.len() < MIN_HISTORY_FOR_QUIZ {
        return Vec::new();
    }

    pool.shuffle(rng);

    pool.iter()
        .take(MAX_QUIZ_QUESTIONS)
        .map(|word| {
            let distractors = pool
                .iter()
                .filter(|other| other.id != word.id)
                .take(DISTRACTORS_PER_QUESTION)
                .map(|other| other.entry.definition.clone());

            let mut options: Vec<String> = std::iter::once(word.entry.definition.clone())
                .chain(distractors)
                .collect();
            options.shuffle(rng);

            QuizQuestion {
                question: word.entry.word.clone(),
                correct_answer: word.entry.definition.clone(),
                options,
            }
        })
        .collect()
}

/// Progress through one quiz: pick an answer, check it, move on.
#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
#[derive(Clone, Debug)]
pub struct QuizSession {
    questions: Vec<QuizQuestion>,
    current: usize,
    selected: Option<String>,
    checked: bool,
    score: usize,
    completed: bool,
}

impl QuizSession {
    /// `None` for an empty quiz.
    pub fn new(questions: Vec<QuizQuestion>) -> Option<Self> {
        if questions.is_empty() {
            return None;
        }
        Some(Self {
            questions,
            current: 0,
            selected: None,
            checked: false,
            score: 0,
            completed: false,
        })
    }

    pub fn questions(&self) -> &[QuizQuestion] {
        &self.questions
    }
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
impl QuizSession {
    pub fn current_question(&self) -> QuizQuestion {
        self.questions[self.current].clone()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn selected_answer(&self) -> Option<String> {
        self.selected.clone()
    }

    pub fn is_checked(&self) -> bool {
        self.checked
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Ignored once the current answer has been checked. Returns whether it was taken.
    pub fn select_answer(&mut self, answer: &str) -> bool {
        if self.checked || self.completed {
            return false;
        }
        self.selected = Some(answer.to_string());
        true
    }

    /// `Some(correct)` the first time an answer is checked, `None` with nothing selected or
    /// when already checked.
    pub fn check_answer(&mut self) -> Option<bool> {
        if self.checked || self.completed {
            return None;
        }
        let selected = self.selected.as_deref()?;
        let correct = selected == self.questions[self.current].correct_answer;
        if correct {
            self.score += 1;
        }
        self.checked = true;
        Some(correct)
    }

    /// Moves to the next question, or completes the quiz after the last one.
    pub fn next_question(&mut self) {
        if self.completed {
            return;
        }
        if self.current + 1 < self.questions.len() {
            self.current += 1;
            self.selected = None;
            self.checked = false;
        } else {
            self.completed = true;
        }
    }

    pub fn restart(&mut self) {
        self.current = 0;
        self.selected = None;
        self.checked = false;
        self.score = 0;
        self.completed = false;
    }
}

impl<S: KeyValueStore, R: Rng> Wordbook<S, R> {
    pub fn generate_quiz(&mut self, language: Language) -> Vec<QuizQuestion> {
        generate_quiz(&history::all(&self.store), language, &mut self.rng)
    }

    pub fn start_quiz(&mut self, language: Language) -> Result<QuizSession, WordlyError> {
        let questions = self.generate_quiz(language);
        QuizSession::new(questions).ok_or_else(|| {
            let found = history::all(&self.store)
                .iter()
                .filter(|record| record.language() == language)
                .count();
            log::info!("Not enough {language} words for a quiz ({found})");
            WordlyError::QuizUnavailable {
                language,
                needed: MIN_HISTORY_FOR_QUIZ,
                found,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;
    use crate::history::tests::record;

    fn history_of(language: Language, count: usize) -> Vec<WordRecord> {
        (1..=count)
            .map(|i| {
                record(
                    &format!("{}-{i}", language.tag()),
                    language,
                    &format!("word{i}"),
                    &format!("2024-03-{i:02}"),
                )
            })
            .collect()
    }

    #[test]
    fn test_three_records_is_not_enough() {
        let history = history_of(Language::French, 3);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert!(generate_quiz(&history, Language::French, &mut rng).is_empty());
    }

    #[test]
    fn test_five_records_give_five_questions_of_four_options() {
        let history = history_of(Language::German, 5);
        for seed in 0..20 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let quiz = generate_quiz(&history, Language::German, &mut rng);
            assert_eq!(quiz.len(), 5);

            let asked: BTreeSet<&str> = quiz.iter().map(|q| q.question.as_str()).collect();
            assert_eq!(asked.len(), 5, "each word is asked once");

            for question in &quiz {
                assert_eq!(question.options.len(), 4);
                assert!(question.options.contains(&question.correct_answer));
                assert_eq!(question.correct_answer, format!("definition of {}", question.question));
                let distinct: BTreeSet<&String> = question.options.iter().collect();
                assert_eq!(distinct.len(), 4);
            }
        }
    }

    #[test]
    fn test_four_records() {
        let history = history_of(Language::Italian, 4);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let quiz = generate_quiz(&history, Language::Italian, &mut rng);
        assert_eq!(quiz.len(), 4);
        assert!(quiz.iter().all(|q| q.options.len() == 4));
    }

    #[test]
    fn test_large_history_caps_questions_and_options() {
        let history = history_of(Language::English, 12);
        for seed in 0..10 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let quiz = generate_quiz(&history, Language::English, &mut rng);
            assert_eq!(quiz.len(), MAX_QUIZ_QUESTIONS);
            for question in &quiz {
                assert_eq!(question.options.len(), DISTRACTORS_PER_QUESTION + 1);
                assert!(question.options.contains(&question.correct_answer));
            }
        }
    }

    #[test]
    fn test_other_languages_are_ignored() {
        let mut history = history_of(Language::Japanese, 3);
        history.extend(history_of(Language::Portuguese, 6));
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        assert!(generate_quiz(&history, Language::Japanese, &mut rng).is_empty());

        let quiz = generate_quiz(&history, Language::Portuguese, &mut rng);
        assert_eq!(quiz.len(), 5);
        let portuguese: BTreeSet<String> = history_of(Language::Portuguese, 6)
            .into_iter()
            .map(|r| r.entry.definition)
            .collect();
        assert!(
            quiz.iter()
                .flat_map(|q| q.options.iter())
                .all(|option| portuguese.contains(option))
        );
    }

    #[test]
    fn test_shared_definitions_are_kept() {
        let mut history = history_of(Language::French, 4);
        for record in &mut history {
            record.entry.definition = "the same".to_string();
        }
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let quiz = generate_quiz(&history, Language::French, &mut rng);
        assert!(quiz.iter().all(|q| q.options == vec!["the same"; 4]));
    }

    #[test]
    fn test_same_seed_same_quiz() {
        let history = history_of(Language::German, 7);
        let a = generate_quiz(&history, Language::German, &mut ChaCha8Rng::seed_from_u64(99));
        let b = generate_quiz(&history, Language::German, &mut ChaCha8Rng::seed_from_u64(99));
        assert_eq!(a, b);
    }

    fn two_question_session() -> QuizSession {
        QuizSession::new(vec![
            QuizQuestion {
                question: "Hygge".to_string(),
                correct_answer: "coziness".to_string(),
                options: vec!["coziness".to_string(), "rain".to_string()],
            },
            QuizQuestion {
                question: "Fika".to_string(),
                correct_answer: "coffee break".to_string(),
                options: vec!["snow".to_string(), "coffee break".to_string()],
            },
        ])
        .unwrap()
    }

    #[test]
    fn test_empty_quiz_has_no_session() {
        assert!(QuizSession::new(Vec::new()).is_none());
    }

    #[test]
    fn test_session_scores_and_completes() {
        let mut session = two_question_session();
        assert_eq!(session.check_answer(), None, "nothing selected yet");

        assert!(session.select_answer("rain"));
        assert!(session.select_answer("coziness"));
        assert_eq!(session.check_answer(), Some(true));
        assert!(!session.select_answer("rain"), "locked after checking");
        assert_eq!(session.check_answer(), None, "only counted once");
        assert_eq!(session.score(), 1);

        session.next_question();
        assert_eq!(session.current_index(), 1);
        assert_eq!(session.current_question().question, "Fika");
        assert_eq!(session.selected_answer(), None);
        assert!(!session.is_checked());

        session.select_answer("snow");
        assert_eq!(session.check_answer(), Some(false));
        session.next_question();
        assert!(session.is_completed());
        assert_eq!(session.score(), 1);
        assert_eq!(session.total(), 2);
        assert!(!session.select_answer("coffee break"));
    }

    #[test]
    fn test_restart() {
        let mut session = two_question_session();
        session.select_answer("coziness");
        session.check_answer();
        session.next_question();
        session.next_question();
        assert!(session.is_completed());

        session.restart();
        assert!(!session.is_completed());
        assert_eq!(session.score(), 0);
        assert_eq!(session.current_index(), 0);
        assert_eq!(session.questions().len(), 2);
    }
}
