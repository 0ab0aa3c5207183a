//! 组卷页面依赖的远程数据接口
//!
//! 组卷流程只通过这个 trait 读取题库和学科，便于在测试中替换。

use crate::error::AppResult;
use crate::models::{Discipline, Question};
use async_trait::async_trait;

#[async_trait]
pub trait BankApi: Send + Sync {
    /// 全部题目（GET /questao/browse）
    async fn list_questions(&self) -> AppResult<Vec<Question>>;

    /// 全部学科（GET /disciplina/listar）
    async fn list_disciplines(&self) -> AppResult<Vec<Discipline>>;

    /// 某位教师关联的学科（GET /professordisciplina/listarPorIDProfessor/{id}）
    async fn list_professor_disciplines(&self, professor_id: i64) -> AppResult<Vec<Discipline>>;
}

#[async_trait]
impl<T: BankApi + ?Sized> BankApi for &T {
    async fn list_questions(&self) -> AppResult<Vec<Question>> {
        (**self).list_questions().await
    }

    async fn list_disciplines(&self) -> AppResult<Vec<Discipline>> {
        (**self).list_disciplines().await
    }

    async fn list_professor_disciplines(&self, professor_id: i64) -> AppResult<Vec<Discipline>> {
        (**self).list_professor_disciplines(professor_id).await
    }
}
