pub mod audit;
pub mod discipline;
pub mod draft;
pub mod exam;
pub mod filter;
pub mod loaders;
pub mod question;
pub mod user;

pub use audit::{AuditAction, AuditEntry};
pub use discipline::{Discipline, ProfessorDiscipline};
pub use draft::{NewQuestion, QuestionDraft};
pub use exam::{ExamMetadata, ExamPlan};
pub use filter::{Facet, FilterState};
pub use loaders::{load_exam_plan, load_question_draft};
pub use question::{AnswerOption, Difficulty, Question, QuestionId, QuestionStats, QuestionType};
pub use user::{Role, SessionUser, User, UserRef, UserRegistration};
