//! 题库加载 - 业务能力层
//!
//! 组卷页面挂载时并发拉取题目和学科，各自失败互不影响。

use crate::clients::BankApi;
use crate::models::{Discipline, Question, SessionUser};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{error, info};

/// 加载的数据类别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Questions,
    Disciplines,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resource::Questions => f.write_str("questions"),
            Resource::Disciplines => f.write_str("disciplines"),
        }
    }
}

/// 单个请求的失败记录
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchFailure {
    pub resource: Resource,
    pub message: String,
}

/// 一次加载的结果（可能只有部分数据）
#[derive(Debug, Clone, Default)]
pub struct BankSnapshot {
    pub questions: Vec<Question>,
    pub disciplines: Vec<Discipline>,
    pub failures: Vec<FetchFailure>,
}

impl BankSnapshot {
    pub fn failed(&self, resource: Resource) -> bool {
        self.failures.iter().any(|f| f.resource == resource)
    }
}

/// 题库加载器
///
/// 持有加载状态标志，请求进行中时为 true。
pub struct BankFetcher<A> {
    api: A,
    questions_loading: AtomicBool,
    disciplines_loading: AtomicBool,
}

impl<A: BankApi> BankFetcher<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            questions_loading: AtomicBool::new(false),
            disciplines_loading: AtomicBool::new(false),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn questions_loading(&self) -> bool {
        self.questions_loading.load(Ordering::SeqCst)
    }

    pub fn disciplines_loading(&self) -> bool {
        self.disciplines_loading.load(Ordering::SeqCst)
    }

    /// 并发加载题库和学科列表
    ///
    /// 管理员加载全部学科，教师只加载自己任教的学科。失败只记录，不重试。
    pub async fn load(&self, session: &SessionUser) -> BankSnapshot {
        self.questions_loading.store(true, Ordering::SeqCst);
        self.disciplines_loading.store(true, Ordering::SeqCst);

        let questions = async {
            let result = self.api.list_questions().await;
            self.questions_loading.store(false, Ordering::SeqCst);
            result
        };

        let disciplines = async {
            let result = if session.role.is_admin() {
                self.api.list_disciplines().await
            } else {
                self.api.list_professor_disciplines(session.id).await
            };
            self.disciplines_loading.store(false, Ordering::SeqCst);
            result
        };

        let (questions, disciplines) = futures::join!(questions, disciplines);

        let mut snapshot = BankSnapshot::default();

        match questions {
            Ok(list) => snapshot.questions = list,
            Err(e) => {
                error!("❌ 加载题库失败: {}", e);
                snapshot.failures.push(FetchFailure {
                    resource: Resource::Questions,
                    message: e.user_message(),
                });
            }
        }

        match disciplines {
            Ok(list) => snapshot.disciplines = list,
            Err(e) => {
                error!("❌ 加载学科失败: {}", e);
                snapshot.failures.push(FetchFailure {
                    resource: Resource::Disciplines,
                    message: e.user_message(),
                });
            }
        }

        info!(
            "📋 题库已加载: {} 道题目, {} 个学科",
            snapshot.questions.len(),
            snapshot.disciplines.len()
        );
        snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ApiError, AppError, AppResult};
    use crate::models::question::fixtures::question;
    use crate::models::{QuestionType, Role, User};
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    #[derive(Default)]
    struct FakeApi {
        fail_questions: bool,
        calls: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl BankApi for FakeApi {
        async fn list_questions(&self) -> AppResult<Vec<Question>> {
            self.calls.lock().unwrap().push("questions".to_string());
            if self.fail_questions {
                return Err(AppError::Api(ApiError::RequestFailed {
                    endpoint: "questao/browse".to_string(),
                    source: "connection refused".into(),
                }));
            }
            Ok(vec![question("1", QuestionType::Essay, "x")])
        }

        async fn list_disciplines(&self) -> AppResult<Vec<Discipline>> {
            self.calls.lock().unwrap().push("all-disciplines".to_string());
            Ok(vec![Discipline {
                id: 1,
                name: "Algoritmos".to_string(),
            }])
        }

        async fn list_professor_disciplines(&self, professor_id: i64) -> AppResult<Vec<Discipline>> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("professor-disciplines/{}", professor_id));
            Ok(Vec::new())
        }
    }

    /// 题目请求很慢，学科请求立即返回
    struct SlowQuestionsApi;

    #[async_trait]
    impl BankApi for SlowQuestionsApi {
        async fn list_questions(&self) -> AppResult<Vec<Question>> {
            tokio::time::sleep(Duration::from_millis(200)).await;
            Ok(vec![question("1", QuestionType::Essay, "x")])
        }

        async fn list_disciplines(&self) -> AppResult<Vec<Discipline>> {
            Ok(Vec::new())
        }

        async fn list_professor_disciplines(&self, _professor_id: i64) -> AppResult<Vec<Discipline>> {
            Ok(Vec::new())
        }
    }

    fn user(role: Role) -> User {
        User {
            id: 7,
            name: "Jadir".to_string(),
            email: "jadir@easyquiz.com".to_string(),
            role,
        }
    }

    #[tokio::test]
    async fn test_discipline_request_depends_on_role() {
        let fetcher = BankFetcher::new(FakeApi::default());
        fetcher.load(&user(Role::Professor)).await;
        fetcher.load(&user(Role::Admin)).await;

        let calls = fetcher.api().calls.lock().unwrap().clone();
        assert!(calls.contains(&"professor-disciplines/7".to_string()));
        assert!(calls.contains(&"all-disciplines".to_string()));
    }

    #[tokio::test]
    async fn test_partial_failure_keeps_other_data() {
        let fetcher = BankFetcher::new(FakeApi {
            fail_questions: true,
            ..FakeApi::default()
        });

        let snapshot = fetcher.load(&user(Role::Admin)).await;
        assert!(snapshot.questions.is_empty());
        assert_eq!(snapshot.disciplines.len(), 1);
        assert!(snapshot.failed(Resource::Questions));
        assert!(!snapshot.failed(Resource::Disciplines));
        assert_eq!(snapshot.failures[0].message, "Could not reach the server.");
        assert!(!fetcher.questions_loading());
        assert!(!fetcher.disciplines_loading());
    }

    #[tokio::test]
    async fn test_loading_flags_follow_requests_in_flight() {
        let fetcher = Arc::new(BankFetcher::new(SlowQuestionsApi));
        let session = user(Role::Professor);

        let task = {
            let fetcher = Arc::clone(&fetcher);
            tokio::spawn(async move { fetcher.load(&session).await })
        };

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(fetcher.questions_loading());
        assert!(!fetcher.disciplines_loading());

        let snapshot = task.await.unwrap();
        assert_eq!(snapshot.questions.len(), 1);
        assert!(!fetcher.questions_loading());
        assert!(!fetcher.disciplines_loading());
    }
}
