//! The question bank: a read-only, ordered sequence of questions shared by
//! every quiz. Quizzes reference it by index only; it is never mutated at
//! runtime and is injected into [`crate::state::AppState`] at construction.

use crate::types::Question;
use rand::seq::SliceRandom;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

pub type QuestionBank = Arc<Vec<Question>>;

/// Smallest number of questions a quiz draws from the bank.
pub const MIN_QUIZ_QUESTIONS: usize = 10;

const DEFAULT_QUESTION_TIMER_SECONDS: u32 = 30;

/// Built-in general-knowledge questions used when no bank file is configured.
const BUILTIN: &[(&str, &[&str], &str)] = &[
    ("What is 2 + 2?", &["3", "4", "5", "6"], "4"),
    (
        "What is the capital of France?",
        &["London", "Berlin", "Paris", "Madrid"],
        "Paris",
    ),
    (
        "Which planet is known as the Red Planet?",
        &["Venus", "Mars", "Jupiter", "Saturn"],
        "Mars",
    ),
    (
        "What is the largest ocean on Earth?",
        &[
            "Atlantic Ocean",
            "Indian Ocean",
            "Arctic Ocean",
            "Pacific Ocean",
        ],
        "Pacific Ocean",
    ),
    (
        "Who wrote 'Romeo and Juliet'?",
        &[
            "Charles Dickens",
            "William Shakespeare",
            "Jane Austen",
            "Mark Twain",
        ],
        "William Shakespeare",
    ),
    (
        "What is the chemical symbol for gold?",
        &["Go", "Gd", "Au", "Ag"],
        "Au",
    ),
    (
        "Which continent is the largest by land area?",
        &["Africa", "Asia", "North America", "Europe"],
        "Asia",
    ),
    (
        "What is the speed of light in vacuum (approximately)?",
        &["300,000 km/s", "150,000 km/s", "450,000 km/s", "600,000 km/s"],
        "300,000 km/s",
    ),
    (
        "Which programming language is known as the 'language of the web'?",
        &["Python", "Java", "JavaScript", "C++"],
        "JavaScript",
    ),
    (
        "What is the smallest prime number?",
        &["0", "1", "2", "3"],
        "2",
    ),
    (
        "Which gas makes up most of Earth's atmosphere?",
        &["Oxygen", "Carbon Dioxide", "Nitrogen", "Argon"],
        "Nitrogen",
    ),
    (
        "What is the capital of Japan?",
        &["Seoul", "Beijing", "Tokyo", "Bangkok"],
        "Tokyo",
    ),
    (
        "Which year did World War II end?",
        &["1943", "1944", "1945", "1946"],
        "1945",
    ),
    ("What is the square root of 64?", &["6", "7", "8", "9"], "8"),
    (
        "Which element has the atomic number 1?",
        &["Helium", "Hydrogen", "Lithium", "Carbon"],
        "Hydrogen",
    ),
];

#[derive(Debug, Error)]
pub enum BankError {
    #[error("failed to read question bank: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse question bank: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("question bank is empty")]
    Empty,

    #[error("question {index}: correct answer is not one of the options")]
    BadCorrectAnswer { index: usize },
}

/// The default question bank.
pub fn builtin_questions() -> Vec<Question> {
    BUILTIN
        .iter()
        .map(|(question, options, correct)| Question {
            question: (*question).to_string(),
            options: options.iter().map(|o| (*o).to_string()).collect(),
            correct_answer: (*correct).to_string(),
            timer_seconds: DEFAULT_QUESTION_TIMER_SECONDS,
        })
        .collect()
}

/// Load a question bank from a JSON file (an array of questions).
pub fn load_questions(path: &Path) -> Result<Vec<Question>, BankError> {
    let raw = std::fs::read_to_string(path)?;
    let questions: Vec<Question> = serde_json::from_str(&raw)?;

    if questions.is_empty() {
        return Err(BankError::Empty);
    }
    for (index, q) in questions.iter().enumerate() {
        if !q.options.contains(&q.correct_answer) {
            return Err(BankError::BadCorrectAnswer { index });
        }
    }

    Ok(questions)
}

/// Pick the question sequence for a new quiz: every bank index, shuffled once
/// the bank holds more than `min_questions` entries, in natural order
/// otherwise.
pub fn select_question_indices(bank: &[Question], min_questions: usize) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..bank.len()).collect();
    if bank.len() <= min_questions {
        return indices;
    }
    indices.shuffle(&mut rand::rng());
    indices
}
