//! 登录会话存储
//!
//! 当前登录用户以 JSON 形式保存在本地文件中。

use crate::error::{AppError, AppResult};
use crate::models::SessionUser;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 读取当前会话
    ///
    /// 文件不存在返回 None；内容损坏时记录警告并视为未登录。
    pub async fn load(&self) -> AppResult<Option<SessionUser>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| AppError::file_read_failed(self.path.display().to_string(), e))?;

        match serde_json::from_str::<SessionUser>(&content) {
            Ok(user) => Ok(Some(user)),
            Err(e) => {
                warn!("⚠️ 会话文件 {} 已损坏，视为未登录: {}", self.path.display(), e);
                Ok(None)
            }
        }
    }

    /// 保存会话
    pub async fn save(&self, user: &SessionUser) -> AppResult<()> {
        let content = serde_json::to_string_pretty(user)?;
        tokio::fs::write(&self.path, content)
            .await
            .map_err(|e| AppError::file_write_failed(self.path.display().to_string(), e))?;
        debug!("会话已保存: {}", self.path.display());
        Ok(())
    }

    /// 清除会话（退出登录）
    pub async fn clear(&self) -> AppResult<()> {
        if self.path.exists() {
            tokio::fs::remove_file(&self.path)
                .await
                .map_err(|e| AppError::file_write_failed(self.path.display().to_string(), e))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Role, User};

    fn scratch(name: &str) -> SessionStore {
        let path = std::env::temp_dir().join(format!("easyquiz-session-{}-{}.json", name, std::process::id()));
        let _ = std::fs::remove_file(&path);
        SessionStore::new(path)
    }

    #[tokio::test]
    async fn test_save_load_clear() {
        let store = scratch("roundtrip");
        assert_eq!(store.load().await.unwrap(), None);

        let user = User {
            id: 1,
            name: "Super Admin".to_string(),
            email: "admin@easyquiz.com".to_string(),
            role: Role::Admin,
        };
        store.save(&user).await.unwrap();
        assert_eq!(store.load().await.unwrap(), Some(user));

        store.clear().await.unwrap();
        assert_eq!(store.load().await.unwrap(), None);
        store.clear().await.unwrap();
    }

    #[tokio::test]
    async fn test_corrupt_file_means_signed_out() {
        let store = scratch("corrupt");
        std::fs::write(store.path(), "{not json").unwrap();

        assert_eq!(store.load().await.unwrap(), None);
        let _ = std::fs::remove_file(store.path());
    }
}
