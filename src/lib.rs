// Library surface for headless/integration tests and reuse.
// Keep this lean to avoid coupling to bin-only types in main.rs.
pub mod answer;
pub mod catalog;
pub mod config;
pub mod error;
pub mod grader;
pub mod logging;
pub mod question;
pub mod runtime;
pub mod selection;
pub mod session;
pub mod stats;
pub mod value_generator;

pub use answer::AnswerInput;
pub use catalog::{Category, ConversionDefinition};
pub use error::{QuestionError, SelectionError};
pub use grader::{grade, Feedback, Grade};
pub use question::{Question, QuestionEngine};
pub use selection::CategorySelection;
pub use session::{Session, Step};
pub use stats::{SessionReport, SessionStats};
pub use value_generator::DifficultyMode;
