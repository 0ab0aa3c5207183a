//! 路由守卫
//!
//! `/dashboard` 下的页面需要登录；用户管理、审计日志和学科管理只对管理员开放。

use crate::error::{AppResult, BusinessError};
use crate::models::SessionUser;

pub const SIGN_IN_ROUTE: &str = "/auth/sign-in";
pub const DASHBOARD_ROUTE: &str = "/dashboard";

const ADMIN_PREFIXES: [&str; 1] = ["/dashboard/users"];
const ADMIN_ROUTES: [&str; 2] = ["/dashboard/logs", "/dashboard/disciplinas"];

/// 路由检查结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    Proceed,
    Redirect(&'static str),
}

pub struct RouteGuard;

impl RouteGuard {
    /// 检查是否需要跳转到登录页
    pub fn check(path: &str, session: Option<&SessionUser>) -> RouteDecision {
        if is_protected(path) && session.is_none() {
            RouteDecision::Redirect(SIGN_IN_ROUTE)
        } else {
            RouteDecision::Proceed
        }
    }

    /// 是否为管理员专属页面
    pub fn requires_admin(path: &str) -> bool {
        ADMIN_PREFIXES.iter().any(|p| under(path, p)) || ADMIN_ROUTES.iter().any(|r| *r == path)
    }

    /// 校验会话和角色，返回当前用户
    ///
    /// # 返回
    /// - 未登录：`BusinessError::NotSignedIn`
    /// - 非管理员访问管理页面：`BusinessError::Forbidden`
    pub fn authorize<'a>(path: &str, session: Option<&'a SessionUser>) -> AppResult<&'a SessionUser> {
        if let RouteDecision::Redirect(_) = Self::check(path, session) {
            return Err(BusinessError::NotSignedIn {
                route: path.to_string(),
            }
            .into());
        }

        let user = session.ok_or_else(|| BusinessError::NotSignedIn {
            route: path.to_string(),
        })?;

        if Self::requires_admin(path) && !user.role.is_admin() {
            return Err(BusinessError::Forbidden {
                route: path.to_string(),
            }
            .into());
        }

        Ok(user)
    }
}

fn is_protected(path: &str) -> bool {
    under(path, DASHBOARD_ROUTE)
}

/// `path` 等于 `prefix` 或位于其下级
fn under(path: &str, prefix: &str) -> bool {
    path == prefix
        || path
            .strip_prefix(prefix)
            .map(|rest| rest.starts_with('/'))
            .unwrap_or(false)
}
