//! 命令行参数定义

use crate::models::{Difficulty, Facet, FilterState, QuestionType, Role};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "easyquiz", version, about = "EasyQuiz question bank and exam builder")]
pub struct Cli {
    /// 配置文件路径
    #[arg(short, long, env = "EASYQUIZ_CONFIG", default_value = "easyquiz.toml")]
    pub config: PathBuf,

    /// 显示详细日志
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sign in and remember the session
    Login {
        email: String,
        #[arg(long, env = "EASYQUIZ_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the current session
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Statistics and shortcuts for the current role
    Dashboard,
    /// List the question bank with optional filters
    Browse(FilterArgs),
    #[command(subcommand)]
    Question(QuestionCommand),
    #[command(subcommand)]
    Discipline(DisciplineCommand),
    /// Build an exam from a plan file
    Generate {
        #[arg(long)]
        plan: PathBuf,
        /// Print the document description instead of rendering it
        #[arg(long)]
        dry_run: bool,
    },
    #[command(subcommand)]
    User(UserCommand),
    #[command(subcommand)]
    Profile(ProfileCommand),
    /// Show the user administration audit log
    Logs,
}

#[derive(Args, Debug, Default)]
pub struct FilterArgs {
    /// Free-text search over statement, discipline and author
    #[arg(short, long, default_value = "")]
    pub search: String,
    #[arg(long)]
    pub creator: Option<String>,
    #[arg(long = "type", value_parser = parse_kind)]
    pub kind: Option<QuestionType>,
    #[arg(long, value_parser = parse_difficulty)]
    pub difficulty: Option<Difficulty>,
    #[arg(long)]
    pub discipline: Option<String>,
}

impl From<FilterArgs> for FilterState {
    fn from(args: FilterArgs) -> Self {
        FilterState {
            search: args.search,
            creator: Facet::from(args.creator),
            kind: Facet::from(args.kind),
            difficulty: Facet::from(args.difficulty),
            discipline: Facet::from(args.discipline),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum QuestionCommand {
    /// Show one question with its options
    Show { id: String },
    /// Create a question from a TOML draft
    New { draft: PathBuf },
    /// Delete a question
    Delete { id: String },
}

#[derive(Subcommand, Debug)]
pub enum DisciplineCommand {
    /// List the disciplines available to the current user
    List,
    Add { name: String },
    Rename { id: i64, name: String },
    Delete { id: i64 },
}

#[derive(Args, Debug)]
pub struct UserForm {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub email: String,
    #[arg(long, value_parser = parse_role, default_value = "PROFESSOR")]
    pub role: Role,
    /// Discipline ids taught by a professor
    #[arg(long = "discipline", value_delimiter = ',')]
    pub disciplines: Vec<i64>,
}

#[derive(Subcommand, Debug)]
pub enum UserCommand {
    List,
    Add(UserForm),
    Update {
        id: i64,
        #[command(flatten)]
        form: UserForm,
    },
    Delete { id: i64 },
}

#[derive(Subcommand, Debug)]
pub enum ProfileCommand {
    /// Change your own name and email
    Update {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
    },
    /// Change your password
    Password {
        #[arg(long, env = "EASYQUIZ_CURRENT_PASSWORD", hide_env_values = true)]
        current: String,
        #[arg(long, env = "EASYQUIZ_NEW_PASSWORD", hide_env_values = true)]
        new: String,
    },
}

impl Command {
    /// 命令对应的页面路径，用于路由守卫；None 表示无需登录
    pub fn route(&self) -> Option<String> {
        let route = match self {
            Command::Login { .. } | Command::Logout => return None,
            Command::Whoami | Command::Dashboard => "/dashboard".to_string(),
            Command::Browse(_) => "/dashboard/questions".to_string(),
            Command::Question(QuestionCommand::New { .. }) => "/dashboard/questions/new".to_string(),
            Command::Question(_) => "/dashboard/questions".to_string(),
            Command::Discipline(DisciplineCommand::List) => "/dashboard/my-disciplines".to_string(),
            Command::Discipline(_) => "/dashboard/disciplinas".to_string(),
            Command::Generate { .. } => "/dashboard/generator".to_string(),
            Command::User(UserCommand::Add(_)) => "/dashboard/users/new".to_string(),
            Command::User(UserCommand::Update { id, .. }) => format!("/dashboard/users/edit/{}", id),
            Command::User(_) => "/dashboard/users".to_string(),
            Command::Profile(_) => "/dashboard/profile".to_string(),
            Command::Logs => "/dashboard/logs".to_string(),
        };
        Some(route)
    }
}

fn parse_kind(value: &str) -> Result<QuestionType, String> {
    value.parse().map_err(|e: crate::error::AppError| e.to_string())
}

fn parse_difficulty(value: &str) -> Result<Difficulty, String> {
    value.parse().map_err(|e: crate::error::AppError| e.to_string())
}

fn parse_role(value: &str) -> Result<Role, String> {
    match value.trim().to_uppercase().as_str() {
        "ADMIN" => Ok(Role::Admin),
        "PROFESSOR" => Ok(Role::Professor),
        other => Err(format!("unknown role: {}", other)),
    }
}
