//! # EasyQuiz Builder
//!
//! EasyQuiz 题库的命令行客户端：登录、管理学科和题目、筛选题库并组卷输出 PDF
//!
//! ## 架构设计
//!
//! 本系统采用分层架构：
//!
//! ### ① 接入层（Clients）
//! - `clients/` - 与后端 REST API 通信
//! - `QuizClient` - 唯一的 HTTP 客户端
//! - `BankApi` - 组卷页面依赖的数据接口
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"
//! - `filter_engine` - 题库筛选
//! - `selection` / `composer` - 选题与试卷排版描述
//! - `renderer` - Typst 渲染
//! - `route_guard` / `session_store` - 登录会话
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一个页面"的完整流程
//! - `ExamBuilder` - 加载 → 筛选 → 选题 → 生成
//! - `Dashboard` - 统计与快捷入口
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/app` - 命令分派、路由守卫
//!
//! ## 模块结构

pub mod cli;
pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{ExamMetadata, FilterState, Question, QuestionId};
pub use orchestrator::App;
pub use services::{DocumentRenderer, ExamDocument, SelectionSet};
pub use workflow::ExamBuilder;
