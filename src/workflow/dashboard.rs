//! 仪表盘 - 流程层
//!
//! 按角色过滤快捷入口，并附带对应范围的题型统计。

use crate::clients::{QuizClient, StatsScope};
use crate::error::AppResult;
use crate::models::{QuestionStats, SessionUser};
use crate::services::RouteGuard;

/// 快捷入口
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shortcut {
    pub title: &'static str,
    pub route: &'static str,
    /// 对应的命令行用法
    pub command: &'static str,
}

pub const SHORTCUTS: [Shortcut; 7] = [
    Shortcut {
        title: "Create question",
        route: "/dashboard/questions/new",
        command: "question new <draft.toml>",
    },
    Shortcut {
        title: "Generate exam",
        route: "/dashboard/generator",
        command: "generate --plan <plan.toml>",
    },
    Shortcut {
        title: "Profile",
        route: "/dashboard/profile",
        command: "profile update",
    },
    Shortcut {
        title: "My disciplines",
        route: "/dashboard/my-disciplines",
        command: "discipline list",
    },
    Shortcut {
        title: "Manage disciplines",
        route: "/dashboard/disciplinas",
        command: "discipline add <name>",
    },
    Shortcut {
        title: "Register user",
        route: "/dashboard/users/new",
        command: "user add",
    },
    Shortcut {
        title: "Audit log",
        route: "/dashboard/logs",
        command: "logs",
    },
];

/// 当前角色可见的快捷入口
pub fn shortcuts_for(user: &SessionUser) -> Vec<&'static Shortcut> {
    SHORTCUTS
        .iter()
        .filter(|s| user.role.is_admin() || !RouteGuard::requires_admin(s.route))
        .collect()
}

/// 仪表盘内容
#[derive(Debug, Clone)]
pub struct Dashboard {
    pub heading: &'static str,
    pub stats: QuestionStats,
    pub shortcuts: Vec<&'static Shortcut>,
}

impl Dashboard {
    /// 加载仪表盘
    pub async fn load(client: &QuizClient, user: &SessionUser) -> AppResult<Self> {
        let stats = client.question_stats(StatsScope::for_user(user)).await?;

        Ok(Self {
            heading: if user.role.is_admin() {
                "Overview (Admin)"
            } else {
                "My statistics"
            },
            stats,
            shortcuts: shortcuts_for(user),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use crate::models::{Role, User};
    use clap::Parser;

    fn user(role: Role) -> User {
        User {
            id: 3,
            name: "Jadir".to_string(),
            email: "jadir@easyquiz.com".to_string(),
            role,
        }
    }

    #[test]
    fn test_professor_sees_only_common_shortcuts() {
        let titles: Vec<&str> = shortcuts_for(&user(Role::Professor))
            .iter()
            .map(|s| s.title)
            .collect();
        assert_eq!(
            titles,
            vec!["Create question", "Generate exam", "Profile", "My disciplines"]
        );
    }

    #[test]
    fn test_discipline_shortcut_matches_command_route() {
        let cli = Cli::try_parse_from(["easyquiz", "discipline", "list"]).unwrap();
        let route = cli.command.route().unwrap();

        let shortcut = shortcuts_for(&user(Role::Professor))
            .into_iter()
            .find(|s| s.command == "discipline list")
            .unwrap();
        assert_eq!(shortcut.route, route);
    }

    #[test]
    fn test_admin_sees_everything() {
        assert_eq!(shortcuts_for(&user(Role::Admin)).len(), SHORTCUTS.len());
    }
}
