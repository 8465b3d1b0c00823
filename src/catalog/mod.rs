//! Static reference data: questionnaire sections and the fund catalog.

pub mod funds;
pub mod questions;

pub use funds::{Fund, FundKind, Performance, Recommendation, FUND_CATALOG};
pub use questions::{
    ChoiceOption, Question, QuestionKind, Section, SectionId, TOTAL_QUESTIONS,
};
