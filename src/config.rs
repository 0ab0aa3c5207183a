use crate::error::{AppError, AppResult, ConfigError, FileError};
use serde::Deserialize;
use std::path::Path;

/// 程序配置文件
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 后端 REST API 地址
    pub api_base_url: String,
    /// 登录会话文件（保存当前登录用户）
    pub session_file: String,
    /// 试卷 PDF 输出目录
    pub output_dir: String,
    /// Typst 排版程序路径
    pub typst_bin: String,
    /// 单次请求超时（秒）
    pub request_timeout_secs: u64,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8080".to_string(),
            session_file: ".easyquiz_user.json".to_string(),
            output_dir: "output_pdf".to_string(),
            typst_bin: "typst".to_string(),
            request_timeout_secs: 15,
            verbose_logging: false,
        }
    }
}

impl Config {
    /// 只从环境变量加载（未设置的字段使用默认值）
    pub fn from_env() -> AppResult<Self> {
        Self::default().with_env_overrides()
    }

    /// 从 TOML 文件加载，再用环境变量覆盖
    ///
    /// 文件不存在时直接使用默认值。
    pub fn load(path: &Path) -> AppResult<Self> {
        let base = if path.exists() {
            let content = std::fs::read_to_string(path)
                .map_err(|e| AppError::file_read_failed(path.display().to_string(), e))?;
            toml::from_str::<Config>(&content).map_err(|e| {
                AppError::File(FileError::TomlParseFailed {
                    path: path.display().to_string(),
                    source: Box::new(e),
                })
            })?
        } else {
            Self::default()
        };

        base.with_env_overrides()
    }

    fn with_env_overrides(self) -> AppResult<Self> {
        Ok(Self {
            api_base_url: env_string("EASYQUIZ_API_URL").unwrap_or(self.api_base_url),
            session_file: env_string("EASYQUIZ_SESSION_FILE").unwrap_or(self.session_file),
            output_dir: env_string("EASYQUIZ_OUTPUT_DIR").unwrap_or(self.output_dir),
            typst_bin: env_string("EASYQUIZ_TYPST_BIN").unwrap_or(self.typst_bin),
            request_timeout_secs: env_parsed("EASYQUIZ_REQUEST_TIMEOUT_SECS", "u64")?
                .unwrap_or(self.request_timeout_secs),
            verbose_logging: env_parsed("VERBOSE_LOGGING", "bool")?.unwrap_or(self.verbose_logging),
        })
    }

    /// 去掉末尾斜杠的 API 地址
    pub fn api_root(&self) -> &str {
        self.api_base_url.trim_end_matches('/')
    }
}

fn env_string(var_name: &str) -> Option<String> {
    std::env::var(var_name).ok().filter(|v| !v.trim().is_empty())
}

fn env_parsed<T: std::str::FromStr>(var_name: &str, expected_type: &str) -> AppResult<Option<T>> {
    match env_string(var_name) {
        None => Ok(None),
        Some(value) => value.trim().parse::<T>().map(Some).map_err(|_| {
            AppError::Config(ConfigError::EnvVarParseFailed {
                var_name: var_name.to_string(),
                value,
                expected_type: expected_type.to_string(),
            })
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
            api_base_url = "https://quiz.example.edu/"
            request_timeout_secs = 5
            "#,
        )
        .unwrap();

        assert_eq!(config.api_root(), "https://quiz.example.edu");
        assert_eq!(config.request_timeout_secs, 5);
        assert_eq!(config.typst_bin, "typst");
        assert_eq!(config.session_file, ".easyquiz_user.json");
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let path = std::env::temp_dir().join("easyquiz-config-does-not-exist.toml");
        let config = Config::load(&path).unwrap();
        assert_eq!(config.output_dir, "output_pdf");
    }
}
