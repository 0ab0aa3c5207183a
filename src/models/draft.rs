use super::question::{validate_options, AnswerOption, Difficulty, QuestionType, TRUE_FALSE_LABELS};
use crate::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// 新建题目的草稿（TOML 文件）
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct QuestionDraft {
    pub statement: String,
    pub difficulty: Difficulty,
    pub kind: QuestionType,
    pub discipline_id: i64,
    /// 选择题选项
    #[serde(default)]
    pub options: Vec<AnswerOption>,
    /// 判断题答案
    #[serde(default)]
    pub answer: Option<bool>,
}

/// 提交给后端的题目（/questao/cadastrar）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewQuestion {
    #[serde(rename = "enunciado")]
    pub statement: String,
    #[serde(rename = "dificuldade")]
    pub difficulty: Difficulty,
    #[serde(rename = "tipo")]
    pub kind: QuestionType,
    #[serde(rename = "disciplinaId")]
    pub discipline_id: i64,
    #[serde(rename = "criadorId")]
    pub creator_id: i64,
    #[serde(rename = "opcoes")]
    pub options: Vec<AnswerOption>,
}

impl QuestionDraft {
    /// 校验草稿并生成提交数据
    pub fn validate(self, creator_id: i64) -> AppResult<NewQuestion> {
        let statement = self.statement.trim().to_string();
        if statement.is_empty() {
            return Err(AppError::invalid_field("statement", "题干不能为空"));
        }

        let options = match self.kind {
            QuestionType::MultipleChoice => {
                if self.options.iter().any(|o| o.text.trim().is_empty()) {
                    return Err(AppError::invalid_field("options", "请填写所有选项"));
                }
                if !self.options.iter().any(|o| o.correct) {
                    return Err(AppError::invalid_field("options", "请选择正确选项"));
                }
                self.options
                    .into_iter()
                    .map(|o| AnswerOption::new(o.text.trim(), o.correct))
                    .collect()
            }
            QuestionType::TrueFalse => {
                let answer = self
                    .answer
                    .ok_or_else(|| AppError::invalid_field("answer", "请选择判断题答案"))?;
                vec![
                    AnswerOption::new(TRUE_FALSE_LABELS[0], answer),
                    AnswerOption::new(TRUE_FALSE_LABELS[1], !answer),
                ]
            }
            QuestionType::Essay => Vec::new(),
        };

        validate_options(self.kind, &options)?;

        Ok(NewQuestion {
            statement,
            difficulty: self.difficulty,
            kind: self.kind,
            discipline_id: self.discipline_id,
            creator_id,
            options,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn draft(kind: QuestionType) -> QuestionDraft {
        QuestionDraft {
            statement: "Qual camada do modelo OSI roteia pacotes?".to_string(),
            difficulty: Difficulty::Hard,
            kind,
            discipline_id: 4,
            options: Vec::new(),
            answer: None,
        }
    }

    #[test]
    fn test_multiple_choice_payload() {
        let mut d = draft(QuestionType::MultipleChoice);
        d.options = vec![
            AnswerOption::new("Camada de Enlace", false),
            AnswerOption::new("Camada de Rede", true),
        ];

        let q = d.validate(7).unwrap();
        let value = serde_json::to_value(&q).unwrap();
        assert_eq!(value["tipo"], json!("Multipla Escolha"));
        assert_eq!(value["dificuldade"], json!("Difícil"));
        assert_eq!(value["criadorId"], json!(7));
        assert_eq!(value["opcoes"][1], json!({"texto": "Camada de Rede", "correta": true}));
    }

    #[test]
    fn test_multiple_choice_requires_filled_options_and_answer() {
        let mut blank = draft(QuestionType::MultipleChoice);
        blank.options = vec![AnswerOption::new("A", true), AnswerOption::new(" ", false)];
        assert!(blank.validate(1).is_err());

        let mut unanswered = draft(QuestionType::MultipleChoice);
        unanswered.options = vec![AnswerOption::new("A", false), AnswerOption::new("B", false)];
        assert!(unanswered.validate(1).is_err());

        let mut two_right = draft(QuestionType::MultipleChoice);
        two_right.options = vec![AnswerOption::new("A", true), AnswerOption::new("B", true)];
        assert!(two_right.validate(1).is_err());
    }

    #[test]
    fn test_true_false_builds_fixed_pair() {
        let mut d = draft(QuestionType::TrueFalse);
        assert!(d.clone().validate(1).is_err());

        d.answer = Some(false);
        let q = d.validate(1).unwrap();
        assert_eq!(
            q.options,
            vec![
                AnswerOption::new("Verdadeiro", false),
                AnswerOption::new("Falso", true),
            ]
        );
    }

    #[test]
    fn test_essay_drops_options() {
        let mut d = draft(QuestionType::Essay);
        d.options = vec![AnswerOption::new("ignored", true)];
        let q = d.validate(1).unwrap();
        assert!(q.options.is_empty());
    }

    #[test]
    fn test_blank_statement_rejected() {
        let mut d = draft(QuestionType::Essay);
        d.statement = "   ".to_string();
        assert!(d.validate(1).is_err());
    }
}
