//! 命令调度 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责把命令行命令分派到对应流程。
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：创建 API 客户端和会话存储
//! 2. **路由守卫**：每个命令声明对应页面，未登录或权限不足直接拒绝
//! 3. **命令分派**：调用 workflow / services 完成具体工作并输出结果
//!
//! ## 设计特点
//!
//! - **顶层编排**：不处理校验和排版细节
//! - **资源所有者**：唯一持有 QuizClient 和 SessionStore 的模块

use crate::cli::{Command, DisciplineCommand, ProfileCommand, QuestionCommand, UserCommand, UserForm};
use crate::clients::{BankApi, QuizClient};
use crate::config::Config;
use crate::error::AppResult;
use crate::models::{
    load_exam_plan, load_question_draft, FilterState, QuestionId, SessionUser, UserRegistration,
};
use crate::services::composer::option_marker;
use crate::services::renderer::{file_stem, TypstRenderer};
use crate::services::{validation, RouteGuard, SessionStore};
use crate::utils::logging::{self, print_browse_summary, print_question_table, truncate_text};
use crate::workflow::{Dashboard, ExamBuilder};
use chrono::Local;
use std::path::Path;
use tracing::{info, warn};

/// 应用主结构
pub struct App {
    config: Config,
    client: QuizClient,
    sessions: SessionStore,
}

impl App {
    /// 初始化应用
    pub fn initialize(config: Config) -> AppResult<Self> {
        logging::log_startup(&config);

        let client = QuizClient::new(&config)?;
        let sessions = SessionStore::new(&config.session_file);

        Ok(Self {
            config,
            client,
            sessions,
        })
    }

    /// 执行一条命令
    pub async fn run(&self, command: Command) -> AppResult<()> {
        match &command {
            Command::Login { email, password } => return self.login(email, password).await,
            Command::Logout => {
                self.sessions.clear().await?;
                println!("✓ Signed out");
                return Ok(());
            }
            _ => {}
        }

        let session = self.sessions.load().await?;
        let route = command.route().unwrap_or_else(|| "/dashboard".to_string());
        let user = RouteGuard::authorize(&route, session.as_ref())?;

        match command {
            Command::Whoami => {
                println!("{} <{}> [{}] id={}", user.name, user.email, user.role, user.id);
                Ok(())
            }
            Command::Dashboard => self.dashboard(user).await,
            Command::Browse(args) => self.browse(user, FilterState::from(args)).await,
            Command::Question(cmd) => self.question(user, cmd).await,
            Command::Discipline(cmd) => self.discipline(user, cmd).await,
            Command::Generate { plan, dry_run } => self.generate(user, &plan, dry_run).await,
            Command::User(cmd) => self.user(user, cmd).await,
            Command::Profile(cmd) => self.profile(user, cmd).await,
            Command::Logs => self.logs().await,
            Command::Login { .. } | Command::Logout => Ok(()),
        }
    }

    // ========== 认证 ==========

    async fn login(&self, email: &str, password: &str) -> AppResult<()> {
        let user = self.client.login(email.trim(), password).await?;
        self.sessions.save(&user).await?;

        info!("✓ 登录成功: {} ({})", user.name, user.role);
        println!("✓ Signed in as {} ({})", user.name, user.role);
        Ok(())
    }

    // ========== 仪表盘 ==========

    async fn dashboard(&self, user: &SessionUser) -> AppResult<()> {
        let dashboard = Dashboard::load(&self.client, user).await?;

        println!("Dashboard - {}", dashboard.heading);
        println!("  Total questions:  {}", dashboard.stats.total);
        println!("  Multiple choice:  {}", dashboard.stats.multiple_choice);
        println!("  True/False:       {}", dashboard.stats.true_false);
        println!("  Essay:            {}", dashboard.stats.essay);
        println!();
        for shortcut in &dashboard.shortcuts {
            println!("  {:<16} easyquiz {}", shortcut.title, shortcut.command);
        }
        Ok(())
    }

    // ========== 题库 ==========

    async fn browse(&self, user: &SessionUser, filter: FilterState) -> AppResult<()> {
        let mut builder = ExamBuilder::new(&self.client, TypstRenderer::new(&self.config), user.clone());
        for failure in builder.mount().await {
            warn!("⚠️ 无法加载 {}: {}", failure.resource, failure.message);
        }
        builder.set_filter(filter);

        let options = builder.facet_options();
        println!("Authors:     {}", options.authors.join(", "));
        println!("Disciplines: {}", options.disciplines.join(", "));
        println!();

        let visible = builder.visible();
        print_question_table(visible.iter().copied());
        print_browse_summary(visible.len(), builder.bank().len());
        Ok(())
    }

    async fn question(&self, user: &SessionUser, cmd: QuestionCommand) -> AppResult<()> {
        match cmd {
            QuestionCommand::Show { id } => {
                let question = self.client.get_question(&QuestionId::new(id)).await?;

                println!("#{} [{} | {} | {}]", question.id, question.kind, question.difficulty, question.subject);
                println!("Author: {}", question.author);
                println!();
                println!("{}", question.statement);
                for (i, option) in question.options.iter().enumerate() {
                    let mark = if option.correct { " ✓" } else { "" };
                    println!("  {}) {}{}", option_marker(i), option.text, mark);
                }
                Ok(())
            }
            QuestionCommand::New { draft } => {
                let draft = load_question_draft(&draft).await?;
                let payload = draft.validate(user.id)?;
                self.client.create_question(&payload).await?;

                info!("✓ 题目已创建: {}", truncate_text(&payload.statement, 40));
                println!("✓ Question created");
                Ok(())
            }
            QuestionCommand::Delete { id } => {
                let id = QuestionId::new(id);
                self.client.delete_question(&id).await?;
                println!("✓ Question {} deleted", id);
                Ok(())
            }
        }
    }

    // ========== 学科 ==========

    async fn discipline(&self, user: &SessionUser, cmd: DisciplineCommand) -> AppResult<()> {
        match cmd {
            DisciplineCommand::List => {
                let disciplines = if user.role.is_admin() {
                    self.client.list_disciplines().await?
                } else {
                    self.client.list_professor_disciplines(user.id).await?
                };
                for d in &disciplines {
                    println!("{:>4}  {}", d.id, d.name);
                }
                Ok(())
            }
            DisciplineCommand::Add { name } => {
                let existing = self.client.list_disciplines().await?;
                let name = validation::new_discipline_name(&name, &existing)?;
                let created = self.client.create_discipline(&name).await?;
                println!("✓ Discipline {} created (id={})", created.name, created.id);
                Ok(())
            }
            DisciplineCommand::Rename { id, name } => {
                let name = validation::discipline_name(&name)?;
                let updated = self.client.rename_discipline(id, &name).await?;
                println!("✓ Discipline {} renamed to {}", updated.id, updated.name);
                Ok(())
            }
            DisciplineCommand::Delete { id } => {
                self.client.delete_discipline(id).await?;
                println!("✓ Discipline {} deleted", id);
                Ok(())
            }
        }
    }

    // ========== 组卷 ==========

    async fn generate(&self, user: &SessionUser, plan_path: &Path, dry_run: bool) -> AppResult<()> {
        let plan = load_exam_plan(plan_path).await?;

        let mut builder = ExamBuilder::new(&self.client, TypstRenderer::new(&self.config), user.clone());
        for failure in builder.mount().await {
            warn!("⚠️ 无法加载 {}: {}", failure.resource, failure.message);
        }

        let missing = builder.apply_plan(plan);
        if !missing.is_empty() {
            warn!("⚠️ {} 道题目不在题库中，已忽略", missing.len());
        }

        if dry_run {
            let doc = builder.compose()?;
            println!("{}", serde_json::to_string_pretty(&doc)?);
            return Ok(());
        }

        let stem = file_stem(&builder.metadata().title, Local::now())?;
        let rendered = builder.generate(&stem).await?;
        println!("✓ Exam written to {}", rendered.pdf_path.display());
        Ok(())
    }

    // ========== 用户管理 ==========

    async fn user(&self, admin: &SessionUser, cmd: UserCommand) -> AppResult<()> {
        match cmd {
            UserCommand::List => {
                let users = self.client.list_users().await?;
                for u in &users {
                    println!("{:>4}  {:<24} {:<32} {}", u.id, truncate_text(&u.name, 22), u.email, u.role);
                }
                Ok(())
            }
            UserCommand::Add(form) => {
                let registration = validation::registration(registration_from(form))?;
                let created = self.client.register_user(admin.id, &registration).await?;
                println!("✓ User {} created (id={})", created.name, created.id);
                Ok(())
            }
            UserCommand::Update { id, form } => {
                let registration = validation::registration(registration_from(form))?;
                let updated = self.client.admin_update_user(id, admin.id, &registration).await?;
                println!("✓ User {} updated", updated.id);
                Ok(())
            }
            UserCommand::Delete { id } => {
                validation::deletion_target(id, admin)?;
                self.client.delete_user(id, admin.id).await?;
                println!("✓ User {} deleted", id);
                Ok(())
            }
        }
    }

    async fn profile(&self, user: &SessionUser, cmd: ProfileCommand) -> AppResult<()> {
        match cmd {
            ProfileCommand::Update { name, email } => {
                let (name, email) = validation::profile(&name, &email)?;
                let updated = self.client.update_profile(user.id, &name, &email).await?;
                self.sessions.save(&updated).await?;
                println!("✓ Profile updated");
                Ok(())
            }
            ProfileCommand::Password { current, new } => {
                validation::password_change(&current, &new)?;
                self.client.change_password(user.id, &current, &new).await?;
                println!("✓ Password changed");
                Ok(())
            }
        }
    }

    async fn logs(&self) -> AppResult<()> {
        let entries = self.client.list_audit_log().await?;

        println!(
            "{:>4}  {:<20} {:<18} {:<24} {:<30} {}",
            "ID", "Admin", "Action", "User", "Email", "When"
        );
        for entry in &entries {
            println!(
                "{:>4}  {:<20} {:<18} {:<24} {:<30} {}",
                entry.id,
                truncate_text(&entry.admin_display(), 18),
                entry.action.label(),
                truncate_text(&entry.target_display(), 22),
                entry.target_email(),
                entry.when_display()
            );
        }
        Ok(())
    }
}

fn registration_from(form: UserForm) -> UserRegistration {
    UserRegistration {
        name: form.name,
        email: form.email,
        role: form.role,
        discipline_ids: form.disciplines,
    }
}
