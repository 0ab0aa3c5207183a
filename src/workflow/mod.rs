pub mod dashboard;
pub mod exam_builder;

pub use dashboard::{shortcuts_for, Dashboard, Shortcut};
pub use exam_builder::ExamBuilder;
