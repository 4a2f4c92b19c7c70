use rand::{rngs::StdRng, Rng};
use tracing::info;

use crate::{
    answer::AnswerInput,
    error::QuestionError,
    grader::{self, Grade},
    question::{Question, QuestionEngine},
    selection::CategorySelection,
    stats::{SessionReport, SessionStats},
};

/// Outcome of handing one answer to the session
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Graded { question: Question, grade: Grade },
    Skipped { question: Question },
    /// Input was not an answer; the same question is still pending
    Rejected,
    Finished,
}

/// One practice run: fixed selection, fresh stats, one pending question at a time
#[derive(Debug)]
pub struct Session<R: Rng = StdRng> {
    selection: CategorySelection,
    engine: QuestionEngine<R>,
    stats: SessionStats,
    question_limit: Option<usize>,
    asked: usize,
    current: Option<Question>,
    finished: bool,
}

impl<R: Rng> Session<R> {
    pub fn new(
        selection: CategorySelection,
        engine: QuestionEngine<R>,
        question_limit: Option<usize>,
    ) -> Self {
        Self {
            selection,
            engine,
            stats: SessionStats::new(),
            question_limit,
            asked: 0,
            current: None,
            finished: false,
        }
    }

    /// Pose the first question
    pub fn start(&mut self) -> Result<&Question, QuestionError> {
        info!(
            selection = %self.selection,
            mode = %self.engine.mode(),
            limit = ?self.question_limit,
            "session started"
        );
        self.advance()?;
        let limit = self.question_limit.unwrap_or_default();
        self.current.as_ref().ok_or(QuestionError::LimitReached(limit))
    }

    pub fn current(&self) -> Option<&Question> {
        self.current.as_ref()
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    pub fn asked(&self) -> usize {
        self.asked
    }

    pub fn question_limit(&self) -> Option<usize> {
        self.question_limit
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn report(&self) -> SessionReport {
        self.stats.summarize()
    }

    pub fn finish(&mut self) {
        if !self.finished {
            self.finished = true;
            self.current = None;
            info!(asked = self.asked, report = %self.report(), "session finished");
        }
    }

    pub fn submit(&mut self, input: AnswerInput) -> Result<Step, QuestionError> {
        if self.finished {
            return Ok(Step::Finished);
        }
        let Some(question) = self.current.take() else {
            return Ok(Step::Finished);
        };

        let step = match input {
            AnswerInput::Value(submitted) => {
                let grade = grader::grade(&question, submitted);
                self.stats.record(question.category, grade.is_correct);
                Step::Graded { question, grade }
            }
            AnswerInput::Skip => Step::Skipped { question },
            AnswerInput::Invalid => {
                self.current = Some(question);
                return Ok(Step::Rejected);
            }
            AnswerInput::Quit => {
                self.finish();
                return Ok(Step::Finished);
            }
        };

        self.advance()?;
        Ok(step)
    }

    fn advance(&mut self) -> Result<(), QuestionError> {
        if self.question_limit.is_some_and(|limit| self.asked >= limit) {
            self.finish();
            return Ok(());
        }
        match self.engine.generate(&self.selection) {
            Ok(question) => {
                self.asked += 1;
                self.current = Some(question);
                Ok(())
            }
            Err(e) => {
                self.finish();
                Err(e)
            }
        }
    }
}
