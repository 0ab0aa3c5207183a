use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// API 调用错误
    #[error("API错误: {0}")]
    Api(#[from] ApiError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// 业务逻辑错误
    #[error("业务错误: {0}")]
    Business(#[from] BusinessError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// 文档渲染错误
    #[error("渲染错误: {0}")]
    Render(#[from] RenderError),
    /// 其他错误（用于包装第三方库错误）
    #[error("错误: {0}")]
    Other(String),
}

/// API 调用错误
#[derive(Debug, Error)]
pub enum ApiError {
    /// 网络请求失败（连接失败、超时）
    #[error("API请求失败 ({endpoint}): {source}")]
    RequestFailed {
        endpoint: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// API 返回错误响应
    #[error("API返回错误响应 ({endpoint}): status={status}, body={body:?}")]
    BadResponse {
        endpoint: String,
        status: u16,
        body: Option<String>,
    },
    /// 资源不存在
    #[error("资源不存在: {endpoint}")]
    NotFound { endpoint: String },
    /// 登录凭据无效
    #[error("邮箱或密码错误")]
    InvalidCredentials,
    /// JSON 解析失败
    #[error("JSON解析失败: {source}")]
    JsonParseFailed {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 文件不存在
    #[error("文件不存在: {path}")]
    NotFound { path: String },
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 写入文件失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// 业务逻辑错误
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BusinessError {
    /// 试卷没有选择任何题目
    #[error("请至少选择一道题目后再生成试卷")]
    EmptySelection,
    /// 未登录
    #[error("需要登录后才能访问 {route}")]
    NotSignedIn { route: String },
    /// 权限不足
    #[error("只有管理员可以访问 {route}")]
    Forbidden { route: String },
    /// 表单字段校验失败
    #[error("字段 {field} 无效: {reason}")]
    InvalidField { field: String, reason: String },
    /// 学科名称重复
    #[error("学科已存在: {name}")]
    DuplicateDiscipline { name: String },
    /// 管理员删除自己的账号
    #[error("不能删除当前登录的账号")]
    SelfDeletion,
    /// 当前密码错误
    #[error("当前密码不正确")]
    WrongCurrentPassword,
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 环境变量解析失败
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
}

/// 文档渲染错误
#[derive(Debug, Error)]
pub enum RenderError {
    /// 无法启动排版程序
    #[error("无法启动排版程序 {program}: {source}")]
    CompilerIo {
        program: String,
        #[source]
        source: std::io::Error,
    },
    /// 排版程序返回非零退出码
    #[error("排版程序退出码 {code:?}: {stderr}")]
    CompilerExit { code: Option<i32>, stderr: String },
}

// ========== 从常见错误类型转换 ==========

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        let endpoint = err
            .url()
            .map(|u| u.path().to_string())
            .unwrap_or_default();
        if err.is_decode() {
            AppError::Api(ApiError::JsonParseFailed {
                source: Box::new(err),
            })
        } else {
            AppError::Api(ApiError::RequestFailed {
                endpoint,
                source: Box::new(err),
            })
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Api(ApiError::JsonParseFailed {
            source: Box::new(err),
        })
    }
}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        AppError::File(FileError::TomlParseFailed {
            path: String::new(), // TOML错误通常不包含路径信息
            source: Box::new(err),
        })
    }
}

impl From<regex::Error> for AppError {
    fn from(err: regex::Error) -> Self {
        AppError::Other(format!("正则表达式无效: {}", err))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::File(FileError::ReadFailed {
            path: String::new(),
            source: Box::new(err),
        })
    }
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建字段校验错误
    pub fn invalid_field(field: impl Into<String>, reason: impl Into<String>) -> Self {
        AppError::Business(BusinessError::InvalidField {
            field: field.into(),
            reason: reason.into(),
        })
    }

    /// 创建文件读取错误
    pub fn file_read_failed(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::File(FileError::ReadFailed {
            path: path.into(),
            source: Box::new(source),
        })
    }

    /// 创建文件写入错误
    pub fn file_write_failed(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::File(FileError::WriteFailed {
            path: path.into(),
            source: Box::new(source),
        })
    }

    /// 面向用户的提示信息
    ///
    /// 网络错误统一提示，业务错误直接展示原因，其余给出通用描述。
    pub fn user_message(&self) -> String {
        match self {
            AppError::Api(ApiError::RequestFailed { .. }) => {
                "Could not reach the server.".to_string()
            }
            AppError::Api(ApiError::InvalidCredentials) => "Invalid email or password.".to_string(),
            AppError::Api(ApiError::NotFound { .. }) => "The requested record was not found.".to_string(),
            AppError::Api(_) => "The server returned an unexpected response.".to_string(),
            AppError::Business(BusinessError::EmptySelection) => {
                "Select at least one question before generating the exam.".to_string()
            }
            AppError::Business(e) => e.to_string(),
            AppError::Render(_) => "The exam document could not be rendered.".to_string(),
            AppError::File(e) => e.to_string(),
            AppError::Config(e) => e.to_string(),
            AppError::Other(msg) => msg.clone(),
        }
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
