use serde::{Deserialize, Serialize};
use std::fmt;

/// 用户角色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "ADMIN", alias = "Admin", alias = "admin")]
    Admin,
    #[serde(rename = "PROFESSOR", alias = "Professor", alias = "professor")]
    Professor,
}

impl Role {
    pub fn is_admin(self) -> bool {
        self == Role::Admin
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Admin => write!(f, "ADMIN"),
            Role::Professor => write!(f, "PROFESSOR"),
        }
    }
}

/// 用户（后端 Usuario，密码字段不保存）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    #[serde(rename = "nome")]
    pub name: String,
    pub email: String,
    #[serde(rename = "tipo")]
    pub role: Role,
}

/// 当前登录用户（本地会话记录）
pub type SessionUser = User;

/// 管理员创建/修改用户的表单
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserRegistration {
    #[serde(rename = "nome")]
    pub name: String,
    pub email: String,
    #[serde(rename = "tipo")]
    pub role: Role,
    #[serde(rename = "disciplinaIds")]
    pub discipline_ids: Vec<i64>,
}

/// 审计日志中引用的用户（字段可能不完整）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    pub id: i64,
    #[serde(rename = "nome", default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}
