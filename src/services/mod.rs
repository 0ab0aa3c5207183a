pub mod bank_fetcher;
pub mod composer;
pub mod filter_engine;
pub mod renderer;
pub mod route_guard;
pub mod selection;
pub mod session_store;
pub mod validation;

pub use bank_fetcher::{BankFetcher, BankSnapshot, FetchFailure, Resource};
pub use composer::{compose, Block, ExamDocument, QuestionBody};
pub use filter_engine::{filter_questions, FacetOptions};
pub use renderer::{DocumentRenderer, RenderedExam, TypstRenderer};
pub use route_guard::{RouteDecision, RouteGuard};
pub use selection::SelectionSet;
pub use session_store::SessionStore;
