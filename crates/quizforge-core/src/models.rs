pub mod evaluation;
pub mod question;
pub mod thread;

pub use evaluation::{clamp_score, Evaluation};
pub use question::{
    GenerationParams, PageRange, Question, QuestionOption, QuestionType, MAX_QUESTIONS,
};
pub use thread::{Message, NewMessage, NewThread, Thread};
