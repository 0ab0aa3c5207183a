pub mod toml_loader;

pub use toml_loader::{load_exam_plan, load_question_draft};
