use crate::error::{AppError, AppResult, FileError};
use crate::models::draft::QuestionDraft;
use crate::models::exam::ExamPlan;
use serde::de::DeserializeOwned;
use std::path::Path;
use tokio::fs;

/// 读取并解析一个 TOML 文件
async fn load_toml<T: DeserializeOwned>(path: &Path) -> AppResult<T> {
    if !path.exists() {
        return Err(AppError::File(FileError::NotFound {
            path: path.display().to_string(),
        }));
    }

    let content = fs::read_to_string(path)
        .await
        .map_err(|e| AppError::file_read_failed(path.display().to_string(), e))?;

    toml::from_str(&content).map_err(|e| {
        AppError::File(FileError::TomlParseFailed {
            path: path.display().to_string(),
            source: Box::new(e),
        })
    })
}

/// 从 TOML 文件加载组卷计划
pub async fn load_exam_plan(path: &Path) -> AppResult<ExamPlan> {
    let plan: ExamPlan = load_toml(path).await?;
    tracing::info!(
        "已加载组卷计划: {} (勾选 {} 道题目)",
        path.file_name().unwrap_or_default().to_string_lossy(),
        plan.selected.len()
    );
    Ok(plan)
}

/// 从 TOML 文件加载题目草稿
pub async fn load_question_draft(path: &Path) -> AppResult<QuestionDraft> {
    let draft: QuestionDraft = load_toml(path).await?;
    tracing::debug!("已加载题目草稿: {}", path.display());
    Ok(draft)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::question::QuestionType;

    fn scratch_file(name: &str, content: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("easyquiz-{}-{}", std::process::id(), name));
        std::fs::write(&path, content).unwrap();
        path
    }

    #[tokio::test]
    async fn test_load_question_draft() {
        let path = scratch_file(
            "draft.toml",
            r#"
            statement = "Qual é a complexidade da busca binária?"
            difficulty = "Médio"
            kind = "MultipleChoice"
            discipline_id = 5

            [[options]]
            text = "O(log n)"
            correct = true

            [[options]]
            text = "O(n)"
            "#,
        );

        let draft = load_question_draft(&path).await.unwrap();
        assert_eq!(draft.kind, QuestionType::MultipleChoice);
        assert_eq!(draft.options.len(), 2);
        assert!(draft.options[0].correct);
        assert!(!draft.options[1].correct);

        std::fs::remove_file(path).ok();
    }

    #[tokio::test]
    async fn test_missing_plan_is_not_found() {
        let path = std::env::temp_dir().join("easyquiz-no-such-plan.toml");
        let err = load_exam_plan(&path).await.unwrap_err();
        assert!(matches!(err, AppError::File(FileError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_malformed_plan_reports_path() {
        let path = scratch_file("broken-plan.toml", "selected = [1, \"2\"");
        let err = load_exam_plan(&path).await.unwrap_err();
        match err {
            AppError::File(FileError::TomlParseFailed { path: p, .. }) => {
                assert!(p.ends_with("broken-plan.toml"))
            }
            other => panic!("unexpected error: {other}"),
        }
        std::fs::remove_file(path).ok();
    }
}
