//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责命令分派和资源管理，是整个系统的"指挥中心"。
//!
//! ## 层次关系
//!
//! ```text
//! orchestrator::App (处理一条命令)
//!     ↓
//! workflow (ExamBuilder / Dashboard)
//!     ↓
//! services (能力层：筛选 / 选题 / 排版 / 渲染 / 校验)
//!     ↓
//! clients (QuizClient，REST API)
//! ```
//!
//! ## 设计原则
//!
//! 1. **资源隔离**：只有编排层持有 QuizClient 和 SessionStore
//! 2. **向下依赖**：编排层 → workflow → services → clients
//! 3. **无业务逻辑**：只做调度和输出，不做具体业务判断

pub mod app;

pub use app::App;
