use super::question::{Difficulty, QuestionType};
use serde::{Deserialize, Serialize};

/// 单个筛选维度：不限，或只保留某个取值
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<T>", into = "Option<T>")]
#[serde(bound(
    serialize = "T: Serialize + Clone",
    deserialize = "T: Deserialize<'de>"
))]
pub enum Facet<T> {
    All,
    Only(T),
}

impl<T> Default for Facet<T> {
    fn default() -> Self {
        Facet::All
    }
}

impl<T: PartialEq> Facet<T> {
    /// 取值是否通过该维度
    pub fn admits(&self, value: &T) -> bool {
        match self {
            Facet::All => true,
            Facet::Only(wanted) => wanted == value,
        }
    }
}

impl<T> Facet<T> {
    pub fn is_all(&self) -> bool {
        matches!(self, Facet::All)
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Facet::All => None,
            Facet::Only(v) => Some(v),
        }
    }
}

impl<T> From<Option<T>> for Facet<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Facet::Only(v),
            None => Facet::All,
        }
    }
}

impl<T> From<Facet<T>> for Option<T> {
    fn from(facet: Facet<T>) -> Self {
        match facet {
            Facet::All => None,
            Facet::Only(v) => Some(v),
        }
    }
}

/// 题库筛选条件
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterState {
    /// 自由文本搜索
    pub search: String,
    /// 出题人
    pub creator: Facet<String>,
    /// 题型
    pub kind: Facet<QuestionType>,
    /// 难度
    pub difficulty: Facet<Difficulty>,
    /// 学科
    pub discipline: Facet<String>,
}

impl FilterState {
    /// 清空所有条件
    pub fn reset(&mut self) {
        *self = FilterState::default();
    }

    /// 是否没有任何条件
    pub fn is_unconstrained(&self) -> bool {
        self.search.trim().is_empty()
            && self.creator.is_all()
            && self.kind.is_all()
            && self.difficulty.is_all()
            && self.discipline.is_all()
    }
}
