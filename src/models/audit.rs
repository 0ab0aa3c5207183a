use super::user::UserRef;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 审计动作
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AuditAction {
    Created,
    Updated,
    Deleted,
    Unknown(String),
}

impl AuditAction {
    /// 显示标签
    pub fn label(&self) -> &'static str {
        match self {
            AuditAction::Created => "User registration",
            AuditAction::Updated => "User update",
            AuditAction::Deleted => "User removal",
            AuditAction::Unknown(_) => "Unknown action",
        }
    }
}

impl From<String> for AuditAction {
    fn from(value: String) -> Self {
        match value.as_str() {
            "CADASTRO" => AuditAction::Created,
            "ALTERACAO" => AuditAction::Updated,
            "EXCLUSAO" => AuditAction::Deleted,
            _ => AuditAction::Unknown(value),
        }
    }
}

impl From<AuditAction> for String {
    fn from(action: AuditAction) -> Self {
        match action {
            AuditAction::Created => "CADASTRO".to_string(),
            AuditAction::Updated => "ALTERACAO".to_string(),
            AuditAction::Deleted => "EXCLUSAO".to_string(),
            AuditAction::Unknown(raw) => raw,
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 审计日志条目（后端 LogCadastro）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub id: i64,
    #[serde(default)]
    pub admin: Option<UserRef>,
    #[serde(rename = "professor", default)]
    pub target: Option<UserRef>,
    #[serde(rename = "nomeUsuario", default)]
    pub target_name: Option<String>,
    #[serde(rename = "dataHora", default)]
    pub occurred_at: Option<NaiveDateTime>,
    #[serde(rename = "acao")]
    pub action: AuditAction,
}

impl AuditEntry {
    /// 管理员显示名称
    pub fn admin_display(&self) -> String {
        match &self.admin {
            Some(admin) => admin
                .name
                .clone()
                .unwrap_or_else(|| format!("#{}", admin.id)),
            None => "-".to_string(),
        }
    }

    /// 目标用户显示名称（优先使用关联用户，其次使用记录中的名字）
    pub fn target_display(&self) -> String {
        self.target
            .as_ref()
            .and_then(|t| t.name.clone())
            .or_else(|| self.target_name.clone())
            .unwrap_or_else(|| "-".to_string())
    }

    pub fn target_email(&self) -> &str {
        self.target
            .as_ref()
            .and_then(|t| t.email.as_deref())
            .unwrap_or("-")
    }

    /// 格式化时间：dd/mm/YYYY HH:MM
    pub fn when_display(&self) -> String {
        self.occurred_at
            .map(|t| t.format("%d/%m/%Y %H:%M").to_string())
            .unwrap_or_else(|| "-".to_string())
    }
}
