/// EasyQuiz REST API 客户端
///
/// 封装所有与后端 API 相关的调用逻辑
use crate::clients::bank_api::BankApi;
use crate::config::Config;
use crate::error::{ApiError, AppError, AppResult, BusinessError};
use crate::models::discipline::{unwrap_links, ProfessorDiscipline};
use crate::models::{
    AuditEntry, Discipline, NewQuestion, Question, QuestionId, QuestionStats, User,
    UserRegistration,
};
use async_trait::async_trait;
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, warn};

/// 统计范围
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatsScope {
    /// 全部题目（管理员）
    All,
    /// 某位教师自己的题目
    Personal(i64),
}

impl StatsScope {
    /// 按登录用户的角色选择统计范围
    pub fn for_user(user: &User) -> Self {
        if user.role.is_admin() {
            StatsScope::All
        } else {
            StatsScope::Personal(user.id)
        }
    }
}

/// EasyQuiz API 客户端
pub struct QuizClient {
    http: reqwest::Client,
    base_url: String,
}

impl QuizClient {
    /// 创建新的客户端
    pub fn new(config: &Config) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.api_root().to_string(),
        })
    }

    /// 拼接完整 URL
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    // ========== 认证 ==========

    /// 登录
    ///
    /// # 参数
    /// - `email`: 邮箱
    /// - `password`: 密码
    ///
    /// # 返回
    /// 返回后端的用户记录（不含密码）
    pub async fn login(&self, email: &str, password: &str) -> AppResult<User> {
        let endpoint = "auth/login";
        let request = self
            .http
            .post(self.url(endpoint))
            .json(&json!({ "email": email, "senha": password }));

        match self.send_json::<User>(request, endpoint).await {
            Err(AppError::Api(ApiError::BadResponse { status, .. }))
                if status == StatusCode::UNAUTHORIZED.as_u16() =>
            {
                Err(AppError::Api(ApiError::InvalidCredentials))
            }
            other => other,
        }
    }

    // ========== 题目 ==========

    /// 获取单个题目
    pub async fn get_question(&self, id: &QuestionId) -> AppResult<Question> {
        let endpoint = format!("questao/{}", id);
        let request = self.http.get(self.url(&endpoint));
        self.send_json(request, &endpoint).await
    }

    /// 新建题目
    pub async fn create_question(&self, question: &NewQuestion) -> AppResult<()> {
        let endpoint = "questao/cadastrar";
        debug!("新建题目 Payload: {}", serde_json::to_string(question)?);
        let request = self.http.post(self.url(endpoint)).json(question);
        self.send_empty(request, endpoint).await
    }

    /// 删除题目
    pub async fn delete_question(&self, id: &QuestionId) -> AppResult<()> {
        let endpoint = format!("questao/delete/{}", id);
        let request = self.http.delete(self.url(&endpoint));
        self.send_empty(request, &endpoint).await
    }

    /// 题型统计
    pub async fn question_stats(&self, scope: StatsScope) -> AppResult<QuestionStats> {
        let endpoint = match scope {
            StatsScope::All => "questao/stats".to_string(),
            StatsScope::Personal(id) => format!("questao/stats/personal/{}", id),
        };
        let request = self.http.get(self.url(&endpoint));
        self.send_json(request, &endpoint).await
    }

    // ========== 学科 ==========

    /// 新建学科
    pub async fn create_discipline(&self, name: &str) -> AppResult<Discipline> {
        let endpoint = "disciplina/cadastrar";
        let request = self
            .http
            .post(self.url(endpoint))
            .json(&json!({ "nome": name }));
        self.send_json(request, endpoint).await
    }

    /// 重命名学科
    pub async fn rename_discipline(&self, id: i64, name: &str) -> AppResult<Discipline> {
        let endpoint = format!("disciplina/update/{}", id);
        let request = self
            .http
            .put(self.url(&endpoint))
            .json(&json!({ "nome": name }));
        self.send_json(request, &endpoint).await
    }

    /// 删除学科
    pub async fn delete_discipline(&self, id: i64) -> AppResult<()> {
        let endpoint = format!("disciplina/delete/{}", id);
        let request = self.http.delete(self.url(&endpoint));
        self.send_empty(request, &endpoint).await
    }

    // ========== 用户 ==========

    /// 全部用户
    pub async fn list_users(&self) -> AppResult<Vec<User>> {
        let endpoint = "usuarios/listar";
        let request = self.http.get(self.url(endpoint));
        self.send_json(request, endpoint).await
    }

    /// 管理员创建用户
    pub async fn register_user(&self, admin_id: i64, registration: &UserRegistration) -> AppResult<User> {
        let endpoint = format!("usuarios/cadastrar/{}", admin_id);
        let request = self.http.post(self.url(&endpoint)).json(registration);
        self.send_json(request, &endpoint).await
    }

    /// 管理员修改用户
    pub async fn admin_update_user(
        &self,
        user_id: i64,
        admin_id: i64,
        registration: &UserRegistration,
    ) -> AppResult<User> {
        let endpoint = format!("usuarios/admUpdate/{}/{}", user_id, admin_id);
        let request = self.http.put(self.url(&endpoint)).json(registration);
        self.send_json(request, &endpoint).await
    }

    /// 管理员删除用户
    pub async fn delete_user(&self, user_id: i64, admin_id: i64) -> AppResult<()> {
        let endpoint = format!("usuarios/delete/{}/{}", user_id, admin_id);
        let request = self.http.delete(self.url(&endpoint));
        self.send_empty(request, &endpoint).await
    }

    /// 修改自己的姓名和邮箱
    pub async fn update_profile(&self, id: i64, name: &str, email: &str) -> AppResult<User> {
        let endpoint = format!("usuarios/update/{}", id);
        let request = self
            .http
            .put(self.url(&endpoint))
            .json(&json!({ "nome": name, "email": email }));
        self.send_json(request, &endpoint).await
    }

    /// 修改密码
    pub async fn change_password(&self, id: i64, current: &str, new: &str) -> AppResult<()> {
        let endpoint = format!("usuarios/mudarSenha/{}", id);
        let request = self
            .http
            .put(self.url(&endpoint))
            .json(&json!({ "senhaAtual": current, "novaSenha": new }));

        match self.send_empty(request, &endpoint).await {
            Err(AppError::Api(ApiError::BadResponse { status, .. }))
                if status == StatusCode::BAD_REQUEST.as_u16() =>
            {
                Err(AppError::Business(BusinessError::WrongCurrentPassword))
            }
            other => other,
        }
    }

    // ========== 审计日志 ==========

    /// 审计日志
    pub async fn list_audit_log(&self) -> AppResult<Vec<AuditEntry>> {
        let endpoint = "logcadastro/listar";
        let request = self.http.get(self.url(endpoint));
        self.send_json(request, endpoint).await
    }

    // ========== 辅助函数 ==========

    /// 发送请求并解析 JSON 响应
    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder, endpoint: &str) -> AppResult<T> {
        let response = self.send(request, endpoint).await?;
        response.json::<T>().await.map_err(|e| {
            AppError::Api(ApiError::JsonParseFailed {
                source: Box::new(e),
            })
        })
    }

    /// 发送请求，不关心响应内容
    async fn send_empty(&self, request: RequestBuilder, endpoint: &str) -> AppResult<()> {
        self.send(request, endpoint).await?;
        Ok(())
    }

    async fn send(&self, request: RequestBuilder, endpoint: &str) -> AppResult<Response> {
        debug!("请求 {}", endpoint);
        let response = request.send().await.map_err(|e| {
            AppError::Api(ApiError::RequestFailed {
                endpoint: endpoint.to_string(),
                source: Box::new(e),
            })
        })?;
        Self::check_status(response, endpoint).await
    }

    /// 检查 HTTP 状态码
    async fn check_status(response: Response, endpoint: &str) -> AppResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        if status == StatusCode::NOT_FOUND {
            return Err(AppError::Api(ApiError::NotFound {
                endpoint: endpoint.to_string(),
            }));
        }

        let body = response.text().await.ok().filter(|b| !b.trim().is_empty());
        warn!("API {} 返回 {}: {:?}", endpoint, status, body);
        Err(AppError::Api(ApiError::BadResponse {
            endpoint: endpoint.to_string(),
            status: status.as_u16(),
            body,
        }))
    }
}

#[async_trait]
impl BankApi for QuizClient {
    async fn list_questions(&self) -> AppResult<Vec<Question>> {
        let endpoint = "questao/browse";
        let request = self.http.get(self.url(endpoint));
        let records: Vec<Value> = self.send_json(request, endpoint).await?;
        Ok(parse_questions(records))
    }

    async fn list_disciplines(&self) -> AppResult<Vec<Discipline>> {
        let endpoint = "disciplina/listar";
        let request = self.http.get(self.url(endpoint));
        self.send_json(request, endpoint).await
    }

    async fn list_professor_disciplines(&self, professor_id: i64) -> AppResult<Vec<Discipline>> {
        let endpoint = format!("professordisciplina/listarPorIDProfessor/{}", professor_id);
        let request = self.http.get(self.url(&endpoint));
        let links: Vec<ProfessorDiscipline> = self.send_json(request, &endpoint).await?;
        Ok(unwrap_links(links))
    }
}

/// 逐条解析题目记录
///
/// 无法解析的记录跳过并记录警告，不影响其余题目；违反选项约束的题目保留。
pub fn parse_questions(records: Vec<Value>) -> Vec<Question> {
    let mut questions = Vec::with_capacity(records.len());

    for record in records {
        let id_hint = record.get("id").cloned().unwrap_or(Value::Null);
        match serde_json::from_value::<Question>(record) {
            Ok(question) => {
                if let Err(e) = question.validate_options() {
                    warn!("题目 {} 选项不符合题型约束: {}", question.id, e);
                }
                questions.push(question);
            }
            Err(e) => {
                warn!("跳过无法解析的题目记录 (id: {}): {}", id_hint, e);
            }
        }
    }

    questions
}
