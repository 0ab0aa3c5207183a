//! 已选题目集合
//!
//! 有序、不重复；新选的题目追加到末尾。

use crate::models::{Question, QuestionId};
use tracing::debug;

#[derive(Debug, Clone, Default)]
pub struct SelectionSet {
    items: Vec<Question>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// 切换选中状态
    ///
    /// 已选则移除；未选则从题库中查找并追加。题库中不存在的 ID 直接忽略。
    ///
    /// # 返回
    /// 切换后该题是否处于选中状态
    pub fn toggle(&mut self, id: &QuestionId, bank: &[Question]) -> bool {
        if self.remove(id) {
            return false;
        }

        match bank.iter().find(|q| &q.id == id) {
            Some(question) => {
                self.items.push(question.clone());
                true
            }
            None => {
                debug!("题库中没有题目 {}，忽略选择", id);
                false
            }
        }
    }

    /// 移除题目（不存在时什么也不做）
    ///
    /// # 返回
    /// 是否真的移除了
    pub fn remove(&mut self, id: &QuestionId) -> bool {
        let before = self.items.len();
        self.items.retain(|q| &q.id != id);
        self.items.len() != before
    }

    pub fn contains(&self, id: &QuestionId) -> bool {
        self.items.iter().any(|q| &q.id == id)
    }

    pub fn ids(&self) -> Vec<QuestionId> {
        self.items.iter().map(|q| q.id.clone()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Question> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::question::fixtures::question;
    use crate::models::QuestionType;

    fn bank() -> Vec<Question> {
        vec![
            question("1", QuestionType::MultipleChoice, "a"),
            question("2", QuestionType::TrueFalse, "b"),
            question("3", QuestionType::Essay, "c"),
        ]
    }

    #[test]
    fn test_toggle_twice_restores_membership() {
        let bank = bank();
        let mut selection = SelectionSet::new();
        let id = QuestionId::new("2");

        assert!(selection.toggle(&id, &bank));
        assert!(selection.contains(&id));
        assert!(!selection.toggle(&id, &bank));
        assert!(selection.is_empty());
    }

    #[test]
    fn test_selection_keeps_insertion_order() {
        let bank = bank();
        let mut selection = SelectionSet::new();
        for id in ["3", "1", "2"] {
            selection.toggle(&QuestionId::new(id), &bank);
        }
        assert_eq!(
            selection.ids(),
            vec![QuestionId::new("3"), QuestionId::new("1"), QuestionId::new("2")]
        );

        // 重新选中的题目排到末尾
        selection.toggle(&QuestionId::new("3"), &bank);
        selection.toggle(&QuestionId::new("3"), &bank);
        assert_eq!(
            selection.ids(),
            vec![QuestionId::new("1"), QuestionId::new("2"), QuestionId::new("3")]
        );
    }

    #[test]
    fn test_remove_is_idempotent() {
        let bank = bank();
        let mut selection = SelectionSet::new();
        let id = QuestionId::new("1");
        selection.toggle(&id, &bank);

        assert!(selection.remove(&id));
        assert!(!selection.remove(&id));
        assert_eq!(selection.len(), 0);
    }

    #[test]
    fn test_unknown_id_is_ignored() {
        let bank = bank();
        let mut selection = SelectionSet::new();

        assert!(!selection.toggle(&QuestionId::new("99"), &bank));
        assert!(selection.is_empty());
    }
}
