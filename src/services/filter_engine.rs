//! 题库筛选 - 业务能力层
//!
//! 纯函数：给定题库和筛选条件，返回可见题目（保持原顺序）。

use crate::models::{Discipline, FilterState, Question};

/// 出题人下拉选项上限
pub const MAX_AUTHOR_OPTIONS: usize = 20;

/// 筛选题库
///
/// # 参数
/// - `bank`: 已加载的题库
/// - `state`: 筛选条件
///
/// # 返回
/// 满足所有条件的题目，顺序与题库一致
pub fn filter_questions<'a>(bank: &'a [Question], state: &FilterState) -> Vec<&'a Question> {
    let needle = state.search.to_lowercase();

    bank.iter()
        .filter(|q| needle.is_empty() || q.haystack().to_lowercase().contains(&needle))
        .filter(|q| state.creator.admits(&q.author))
        .filter(|q| state.kind.admits(&q.kind))
        .filter(|q| state.difficulty.admits(&q.difficulty))
        .filter(|q| state.discipline.admits(&q.subject))
        .collect()
}

/// 各筛选维度的可选值
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FacetOptions {
    /// 出题人（首次出现顺序，最多 20 个）
    pub authors: Vec<String>,
    /// 学科
    pub disciplines: Vec<String>,
}

impl FacetOptions {
    /// 从题库和学科列表生成可选值
    ///
    /// 学科列表为空时退回到题库中出现过的学科。
    pub fn from_bank(bank: &[Question], disciplines: &[Discipline]) -> Self {
        let mut authors: Vec<String> = Vec::new();
        let mut subjects: Vec<String> = Vec::new();

        for q in bank {
            if authors.len() < MAX_AUTHOR_OPTIONS && !authors.contains(&q.author) {
                authors.push(q.author.clone());
            }
            if !subjects.contains(&q.subject) {
                subjects.push(q.subject.clone());
            }
        }

        let disciplines = if disciplines.is_empty() {
            subjects
        } else {
            disciplines.iter().map(|d| d.name.clone()).collect()
        };

        Self {
            authors,
            disciplines,
        }
    }
}
