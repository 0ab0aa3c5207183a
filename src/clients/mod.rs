pub mod bank_api;
pub mod quiz_client;

pub use bank_api::BankApi;
pub use quiz_client::{QuizClient, StatsScope};
