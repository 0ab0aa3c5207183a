//! 试卷排版描述 - 业务能力层
//!
//! 把已选题目、抬头信息和当前筛选条件组合成与渲染器无关的文档描述。

use crate::error::{AppResult, BusinessError};
use crate::models::exam::non_blank;
use crate::models::{ExamMetadata, FilterState, Question, QuestionType};
use crate::services::selection::SelectionSet;
use serde::Serialize;

pub const DEFAULT_TITLE: &str = "Assessment";
pub const DEFAULT_INSTITUTION: &str = "Institution";
pub const DEFAULT_INSTRUCTOR: &str = "Teaching Staff";
pub const DEFAULT_DISCIPLINE: &str = "Diverse";
pub const PAGE_NUMBERING: &str = "Page {current} of {total}";

/// 问答题作答横线：条数、宽度（A4 减去 2cm 页边距）、间距
pub const ESSAY_RULES: u8 = 3;
pub const ESSAY_RULE_WIDTH_PT: u32 = 480;
pub const ESSAY_RULE_SPACING_PT: u32 = 24;

/// 完整的试卷描述
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExamDocument {
    pub blocks: Vec<Block>,
    /// 每一页都有
    pub footer: Footer,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "block", rename_all = "snake_case")]
pub enum Block {
    Header {
        logo: ImagePlaceholder,
        title: String,
    },
    IdentificationTable {
        rows: Vec<Vec<Cell>>,
    },
    Question(QuestionBlock),
}

/// 校徽占位
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImagePlaceholder {
    pub caption: String,
}

/// 表格单元格：标签 + 填写值（空字符串表示留空）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cell {
    pub label: String,
    pub value: String,
}

impl Cell {
    fn new(label: &str, value: impl Into<String>) -> Self {
        Self {
            label: label.to_string(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionBlock {
    /// 从 1 开始
    pub number: usize,
    pub statement: String,
    pub body: QuestionBody,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QuestionBody {
    Choices { options: Vec<ChoiceLine> },
    TrueFalse { markers: Vec<String> },
    Essay { rules: u8, width_pt: u32, spacing_pt: u32 },
}

/// 选项行（不包含正确答案信息）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChoiceLine {
    pub marker: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Footer {
    pub numbering: String,
}

/// 生成试卷描述
///
/// # 参数
/// - `selection`: 已选题目（按选择顺序出题）
/// - `metadata`: 抬头信息
/// - `filter`: 当前筛选条件（出题人 / 学科维度优先于抬头信息）
///
/// # 返回
/// 未选择任何题目时返回 `BusinessError::EmptySelection`
pub fn compose(
    selection: &SelectionSet,
    metadata: &ExamMetadata,
    filter: &FilterState,
) -> AppResult<ExamDocument> {
    if selection.is_empty() {
        return Err(BusinessError::EmptySelection.into());
    }

    let mut blocks = Vec::with_capacity(selection.len() + 2);

    blocks.push(Block::Header {
        logo: ImagePlaceholder {
            caption: non_blank(&metadata.institution)
                .unwrap_or(DEFAULT_INSTITUTION)
                .to_string(),
        },
        title: non_blank(&metadata.title).unwrap_or(DEFAULT_TITLE).to_string(),
    });

    blocks.push(identification_table(metadata, filter));

    blocks.extend(
        selection
            .iter()
            .enumerate()
            .map(|(i, q)| Block::Question(question_block(i + 1, q))),
    );

    Ok(ExamDocument {
        blocks,
        footer: Footer {
            numbering: PAGE_NUMBERING.to_string(),
        },
    })
}

fn identification_table(metadata: &ExamMetadata, filter: &FilterState) -> Block {
    let instructor = filter
        .creator
        .value()
        .map(String::as_str)
        .or_else(|| non_blank(&metadata.instructor))
        .unwrap_or(DEFAULT_INSTRUCTOR);

    let discipline = filter
        .discipline
        .value()
        .map(String::as_str)
        .or_else(|| non_blank(&metadata.discipline))
        .unwrap_or(DEFAULT_DISCIPLINE);

    Block::IdentificationTable {
        rows: vec![
            vec![
                Cell::new("Student name", ""),
                Cell::new("Registration no.", ""),
                Cell::new("Date", ""),
            ],
            vec![
                Cell::new("Instructor", instructor),
                Cell::new("Discipline", discipline),
                Cell::new("Course", metadata.course.trim()),
            ],
        ],
    }
}

fn question_block(number: usize, question: &Question) -> QuestionBlock {
    let body = match question.kind {
        QuestionType::MultipleChoice => QuestionBody::Choices {
            options: question
                .options
                .iter()
                .enumerate()
                .map(|(i, o)| ChoiceLine {
                    marker: format!("{})", option_marker(i)),
                    text: o.text.clone(),
                })
                .collect(),
        },
        QuestionType::TrueFalse => QuestionBody::TrueFalse {
            markers: vec!["( ) True".to_string(), "( ) False".to_string()],
        },
        QuestionType::Essay => QuestionBody::Essay {
            rules: ESSAY_RULES,
            width_pt: ESSAY_RULE_WIDTH_PT,
            spacing_pt: ESSAY_RULE_SPACING_PT,
        },
    };

    QuestionBlock {
        number,
        statement: question.statement.clone(),
        body,
    }
}

/// 选项字母：a, b, …, z, aa, ab, …
pub fn option_marker(index: usize) -> String {
    let mut n = index + 1;
    let mut letters = Vec::new();
    while n > 0 {
        n -= 1;
        letters.push((b'a' + (n % 26) as u8) as char);
        n /= 26;
    }
    letters.iter().rev().collect()
}
