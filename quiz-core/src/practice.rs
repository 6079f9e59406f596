//! Practice runs over the questions of one expectation.

use crate::curriculum::{get_expectation, ExpectationEntry};
use crate::progress::ProgressTracker;
use crate::questions::{questions_for_expectation, Question};
use crate::store::{KeyValueStore, StoreError};
use std::fmt;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum PracticeError {
    #[error("expectation not found: {0}")]
    NotFound(String),

    #[error("no practice questions for {0}")]
    NoQuestions(String),

    #[error("this question was already checked")]
    AlreadyChecked,

    #[error("check the current question first")]
    NotChecked,

    #[error("the practice run is finished")]
    Finished,

    #[error("failed to save practice progress: {0}")]
    Store(#[from] StoreError),
}

/// Feedback for one checked answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub correct: bool,
    pub correct_answer: String,
    pub explanation: String,
    pub hint: Option<String>,
}

/// Closing message for a finished run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Perfect,
    Good,
    KeepTrying,
}

impl Verdict {
    /// Every answer correct is `Perfect`; at least half is `Good`.
    pub fn from_score(correct: usize, total: usize) -> Self {
        if correct == total {
            Verdict::Perfect
        } else if correct * 2 >= total {
            Verdict::Good
        } else {
            Verdict::KeepTrying
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Verdict::Perfect => "Perfect score!",
            Verdict::Good => "Good work! Keep practicing.",
            Verdict::KeepTrying => "Keep trying! Practice makes perfect.",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

pub struct PracticeSession {
    entry: ExpectationEntry<'static>,
    questions: Vec<&'static Question>,
    current: usize,
    results: Vec<bool>,
    checked: bool,
    finished: bool,
}

impl PracticeSession {
    pub fn start(code: &str) -> Result<Self, PracticeError> {
        let entry = get_expectation(code).ok_or_else(|| PracticeError::NotFound(code.to_string()))?;
        let questions = questions_for_expectation(code);
        if questions.is_empty() {
            return Err(PracticeError::NoQuestions(code.to_string()));
        }
        debug!(code, questions = questions.len(), "practice started");
        Ok(Self {
            entry,
            questions,
            current: 0,
            results: Vec::new(),
            checked: false,
            finished: false,
        })
    }

    pub fn entry(&self) -> ExpectationEntry<'static> {
        self.entry
    }

    pub fn code(&self) -> &'static str {
        let expectation = self.entry.expectation;
        &expectation.code
    }

    pub fn questions(&self) -> &[&'static Question] {
        &self.questions
    }

    /// The question being practiced, or `None` once finished.
    pub fn question(&self) -> Option<&'static Question> {
        if self.finished {
            None
        } else {
            self.questions.get(self.current).copied()
        }
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn is_checked(&self) -> bool {
        self.checked
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Check an answer to the current question and record it.
    ///
    /// The result is kept in the run even if recording fails.
    pub fn check<S: KeyValueStore>(
        &mut self,
        tracker: &mut ProgressTracker<S>,
        answer: &str,
    ) -> Result<Feedback, PracticeError> {
        let question = self.question().ok_or(PracticeError::Finished)?;
        if self.checked {
            return Err(PracticeError::AlreadyChecked);
        }

        let correct = question.is_correct(answer);
        self.checked = true;
        self.results.push(correct);
        tracker.record_answer(self.code(), correct)?;

        Ok(Feedback {
            correct,
            correct_answer: question.correct_answer.clone(),
            explanation: question.explanation.clone(),
            hint: question.hint.clone(),
        })
    }

    /// Move to the next question. Returns `None` when the run is finished.
    pub fn next_question(&mut self) -> Result<Option<&'static Question>, PracticeError> {
        if self.finished {
            return Err(PracticeError::Finished);
        }
        if !self.checked {
            return Err(PracticeError::NotChecked);
        }
        self.checked = false;
        if self.current + 1 >= self.questions.len() {
            self.finished = true;
            debug!(code = self.code(), correct = self.correct_count(), "practice finished");
        } else {
            self.current += 1;
        }
        Ok(self.question())
    }

    /// Start over from the first question with no results.
    pub fn restart(&mut self) {
        self.current = 0;
        self.results.clear();
        self.checked = false;
        self.finished = false;
    }

    /// Correctness of each checked question, in order.
    pub fn results(&self) -> &[bool] {
        &self.results
    }

    pub fn correct_count(&self) -> usize {
        self.results.iter().filter(|&&r| r).count()
    }

    pub fn verdict(&self) -> Verdict {
        Verdict::from_score(self.correct_count(), self.results.len())
    }
}
