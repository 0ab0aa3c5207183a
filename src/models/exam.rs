use super::filter::FilterState;
use super::question::QuestionId;
use serde::{Deserialize, Serialize};

/// 试卷抬头信息
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExamMetadata {
    /// 试卷标题
    pub title: String,
    /// 学校名称
    pub institution: String,
    /// 专业
    pub course: String,
    /// 学科
    pub discipline: String,
    /// 授课教师
    pub instructor: String,
}

/// 组卷计划（命令行下代替组卷页面的表单）
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExamPlan {
    /// 按顺序勾选的题目
    pub selected: Vec<QuestionId>,
    pub metadata: ExamMetadata,
    pub filters: FilterState,
}

/// 去掉首尾空白后为空则返回 None
pub(crate) fn non_blank(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}
