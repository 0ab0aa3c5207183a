use crate::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 作者缺失时的占位名称
pub const UNKNOWN_AUTHOR: &str = "Unknown author";
/// 学科缺失时的占位名称
pub const NO_DISCIPLINE: &str = "No discipline";
/// 判断题固定的两个选项
pub const TRUE_FALSE_LABELS: [&str; 2] = ["Verdadeiro", "Falso"];

/// 题目 ID（后端可能返回整数或字符串，统一保存为字符串）
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct QuestionId(String);

impl QuestionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for QuestionId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<i64> for QuestionId {
    fn from(value: i64) -> Self {
        Self(value.to_string())
    }
}

// 兼容整数和字符串两种 ID 写法
impl<'de> Deserialize<'de> for QuestionId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::Visitor;

        struct IdVisitor;

        impl<'de> Visitor<'de> for IdVisitor {
            type Value = QuestionId;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string or integer question id")
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(QuestionId::new(value))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(QuestionId::from(value))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(QuestionId(value.to_string()))
            }
        }

        deserializer.deserialize_any(IdVisitor)
    }
}

/// 难度（有序：Easy < Medium < Hard）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Difficulty {
    #[serde(rename = "Fácil", alias = "Easy", alias = "Facil")]
    Easy,
    #[serde(rename = "Médio", alias = "Medium", alias = "Medio")]
    Medium,
    #[serde(rename = "Difícil", alias = "Hard", alias = "Dificil")]
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// 显示名称
    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for Difficulty {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Easy" | "easy" | "Fácil" | "Facil" => Ok(Difficulty::Easy),
            "Medium" | "medium" | "Médio" | "Medio" => Ok(Difficulty::Medium),
            "Hard" | "hard" | "Difícil" | "Dificil" => Ok(Difficulty::Hard),
            other => Err(AppError::invalid_field("difficulty", format!("未知难度: {}", other))),
        }
    }
}

/// 题型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuestionType {
    #[serde(
        rename = "Multipla Escolha",
        alias = "Múltipla",
        alias = "MultipleChoice",
        alias = "Multiple Choice"
    )]
    MultipleChoice,
    #[serde(rename = "Verdadeiro/Falso", alias = "TrueFalse", alias = "True/False")]
    TrueFalse,
    #[serde(rename = "Dissertativa", alias = "Essay")]
    Essay,
}

impl QuestionType {
    pub const ALL: [QuestionType; 3] = [
        QuestionType::MultipleChoice,
        QuestionType::TrueFalse,
        QuestionType::Essay,
    ];

    pub fn label(self) -> &'static str {
        match self {
            QuestionType::MultipleChoice => "Multiple Choice",
            QuestionType::TrueFalse => "True/False",
            QuestionType::Essay => "Essay",
        }
    }

    /// 该题型是否带选项
    pub fn has_options(self) -> bool {
        !matches!(self, QuestionType::Essay)
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for QuestionType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "MultipleChoice" | "Multiple Choice" | "multiple-choice" | "mc" | "Multipla Escolha"
            | "Múltipla" => Ok(QuestionType::MultipleChoice),
            "TrueFalse" | "True/False" | "true-false" | "tf" | "Verdadeiro/Falso" => {
                Ok(QuestionType::TrueFalse)
            }
            "Essay" | "essay" | "Dissertativa" => Ok(QuestionType::Essay),
            other => Err(AppError::invalid_field("type", format!("未知题型: {}", other))),
        }
    }
}

/// 选项
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOption {
    #[serde(rename = "texto", alias = "text")]
    pub text: String,
    #[serde(rename = "correta", alias = "correct", default, deserialize_with = "null_as_false")]
    pub correct: bool,
}

impl AnswerOption {
    pub fn new(text: impl Into<String>, correct: bool) -> Self {
        Self {
            text: text.into(),
            correct,
        }
    }
}

fn null_as_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

/// 题目
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "QuestionRecord")]
pub struct Question {
    pub id: QuestionId,
    pub statement: String,
    pub subject: String,
    pub difficulty: Difficulty,
    pub kind: QuestionType,
    pub author: String,
    pub options: Vec<AnswerOption>,
}

impl Question {
    /// 检查选项是否符合题型约束
    ///
    /// 问答题没有选项；选择题和判断题至少一个选项且恰好一个正确。
    pub fn validate_options(&self) -> AppResult<()> {
        validate_options(self.kind, &self.options)
    }

    /// 用于搜索的拼接文本
    pub fn haystack(&self) -> String {
        format!("{} {} {}", self.statement, self.subject, self.author)
    }
}

pub(crate) fn validate_options(kind: QuestionType, options: &[AnswerOption]) -> AppResult<()> {
    if !kind.has_options() {
        if options.is_empty() {
            return Ok(());
        }
        return Err(AppError::invalid_field("options", "问答题不能包含选项"));
    }

    if options.is_empty() {
        return Err(AppError::invalid_field("options", "选项不能为空"));
    }

    let correct = options.iter().filter(|o| o.correct).count();
    if correct != 1 {
        return Err(AppError::invalid_field(
            "options",
            format!("必须恰好有一个正确选项，当前 {} 个", correct),
        ));
    }

    if kind == QuestionType::TrueFalse {
        let labels: Vec<&str> = options.iter().map(|o| o.text.as_str()).collect();
        if labels != TRUE_FALSE_LABELS {
            return Err(AppError::invalid_field("options", "判断题选项必须为 Verdadeiro/Falso"));
        }
    }

    Ok(())
}

/// 后端返回的题目记录（QuestaoDTO），可选字段可能为 null
///
/// 别名对应领域结构序列化后的字段名，便于读回本地 JSON。
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuestionRecord {
    id: QuestionId,
    #[serde(default, alias = "statement")]
    enunciado: Option<String>,
    #[serde(default, alias = "subject")]
    disciplina: Option<String>,
    #[serde(alias = "difficulty")]
    dificuldade: Difficulty,
    #[serde(alias = "kind")]
    tipo: QuestionType,
    #[serde(default, alias = "author")]
    nome_criador: Option<String>,
    #[serde(default, alias = "options")]
    opcoes: Option<Vec<AnswerOption>>,
}

impl From<QuestionRecord> for Question {
    fn from(r: QuestionRecord) -> Self {
        let non_blank = |v: Option<String>| v.filter(|s| !s.trim().is_empty());
        Self {
            id: r.id,
            statement: r.enunciado.unwrap_or_default(),
            subject: non_blank(r.disciplina).unwrap_or_else(|| NO_DISCIPLINE.to_string()),
            difficulty: r.dificuldade,
            kind: r.tipo,
            author: non_blank(r.nome_criador).unwrap_or_else(|| UNKNOWN_AUTHOR.to_string()),
            options: r.opcoes.unwrap_or_default(),
        }
    }
}

/// 题型统计（仪表盘）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionStats {
    #[serde(default)]
    pub total: u64,
    #[serde(rename = "multipla", default)]
    pub multiple_choice: u64,
    #[serde(rename = "vf", default)]
    pub true_false: u64,
    #[serde(rename = "dissertativa", default)]
    pub essay: u64,
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn question(id: &str, kind: QuestionType, statement: &str) -> Question {
        let options = match kind {
            QuestionType::MultipleChoice => vec![
                AnswerOption::new("A", true),
                AnswerOption::new("B", false),
            ],
            QuestionType::TrueFalse => vec![
                AnswerOption::new("Verdadeiro", false),
                AnswerOption::new("Falso", true),
            ],
            QuestionType::Essay => Vec::new(),
        };
        Question {
            id: QuestionId::new(id),
            statement: statement.to_string(),
            subject: "Algoritmos".to_string(),
            difficulty: Difficulty::Medium,
            kind,
            author: "Jadir".to_string(),
            options,
        }
    }
}
