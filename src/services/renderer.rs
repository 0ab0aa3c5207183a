//! 试卷渲染 - 业务能力层
//!
//! `DocumentRenderer` 把文档描述变成可打印文件。默认实现生成 Typst 源文件，
//! 再调用外部 `typst compile` 输出 PDF。

use crate::config::Config;
use crate::error::{AppError, AppResult, RenderError};
use crate::services::composer::{Block, Cell, ExamDocument, QuestionBlock, QuestionBody};
use async_trait::async_trait;
use chrono::{DateTime, Local};
use regex::Regex;
use std::path::PathBuf;
use tokio::process::Command;
use tracing::{debug, info};

/// 渲染结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedExam {
    pub pdf_path: PathBuf,
    pub source_path: PathBuf,
}

/// 文档渲染器
#[async_trait]
pub trait DocumentRenderer: Send + Sync {
    async fn render(&self, doc: &ExamDocument, file_stem: &str) -> AppResult<RenderedExam>;
}

#[async_trait]
impl<T: DocumentRenderer + ?Sized> DocumentRenderer for &T {
    async fn render(&self, doc: &ExamDocument, file_stem: &str) -> AppResult<RenderedExam> {
        (**self).render(doc, file_stem).await
    }
}

/// 调用 Typst 命令行的渲染器
pub struct TypstRenderer {
    typst_bin: String,
    output_dir: PathBuf,
}

impl TypstRenderer {
    pub fn new(config: &Config) -> Self {
        Self {
            typst_bin: config.typst_bin.clone(),
            output_dir: PathBuf::from(&config.output_dir),
        }
    }
}

#[async_trait]
impl DocumentRenderer for TypstRenderer {
    async fn render(&self, doc: &ExamDocument, file_stem: &str) -> AppResult<RenderedExam> {
        tokio::fs::create_dir_all(&self.output_dir)
            .await
            .map_err(|e| AppError::file_write_failed(self.output_dir.display().to_string(), e))?;

        let source_name = format!("{}.typ", file_stem);
        let pdf_name = format!("{}.pdf", file_stem);
        let source_path = self.output_dir.join(&source_name);
        let pdf_path = self.output_dir.join(&pdf_name);

        let markup = to_typst(doc);
        tokio::fs::write(&source_path, markup)
            .await
            .map_err(|e| AppError::file_write_failed(source_path.display().to_string(), e))?;
        debug!("已写入 Typst 源文件: {}", source_path.display());

        let output = Command::new(&self.typst_bin)
            .arg("compile")
            .arg(&source_name)
            .arg(&pdf_name)
            .current_dir(&self.output_dir)
            .output()
            .await
            .map_err(|e| RenderError::CompilerIo {
                program: self.typst_bin.clone(),
                source: e,
            })?;

        if !output.status.success() {
            return Err(RenderError::CompilerExit {
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            }
            .into());
        }

        info!("✓ 试卷已生成: {}", pdf_path.display());
        Ok(RenderedExam {
            pdf_path,
            source_path,
        })
    }
}

/// 由试卷标题生成文件名（不含扩展名）
///
/// 标题转小写，非字母数字字符合并为 `-`，再加上时间戳；标题为空时用 `exam`。
pub fn file_stem(title: &str, now: DateTime<Local>) -> AppResult<String> {
    let re = Regex::new(r"[^a-z0-9]+")?;
    let lowered = title.to_lowercase();
    let slug = re.replace_all(&lowered, "-").trim_matches('-').to_string();
    let slug = if slug.is_empty() { "exam".to_string() } else { slug };

    Ok(format!("{}-{}", slug, now.format("%Y%m%d-%H%M%S")))
}

// ========== Typst 源码生成 ==========

/// 生成完整的 Typst 源码
pub fn to_typst(doc: &ExamDocument) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "#set page(paper: \"a4\", margin: 2cm, footer: context align(center, [{}]))\n",
        footer_markup(&doc.footer.numbering)
    ));
    out.push_str("#set text(size: 11pt)\n\n");

    for block in &doc.blocks {
        match block {
            Block::Header { logo, title } => {
                out.push_str(&format!(
                    "#grid(columns: (80pt, 1fr), gutter: 12pt,\n  rect(width: 80pt, height: 60pt, align(center + horizon, text(size: 8pt, {}))),\n  align(horizon, text(size: 16pt, weight: \"bold\", {})))\n\n",
                    typst_str(&logo.caption),
                    typst_str(title)
                ));
            }
            Block::IdentificationTable { rows } => {
                let columns = rows.first().map(|r| r.len()).unwrap_or(1);
                out.push_str(&format!(
                    "#table(columns: ({}), inset: 6pt,\n",
                    vec!["1fr"; columns].join(", ")
                ));
                for cell in rows.iter().flatten() {
                    out.push_str(&format!("  {},\n", cell_markup(cell)));
                }
                out.push_str(")\n\n");
            }
            Block::Question(question) => out.push_str(&question_markup(question)),
        }
    }

    out
}

/// 转义为 Typst 字符串字面量（带引号）
pub fn typst_str(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len() + 2);
    escaped.push('"');
    for c in text.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\t' => escaped.push_str("\\t"),
            '\r' => {}
            other => escaped.push(other),
        }
    }
    escaped.push('"');
    escaped
}

fn cell_markup(cell: &Cell) -> String {
    format!(
        "[#strong({}) #{}]",
        typst_str(&format!("{}:", cell.label)),
        typst_str(&cell.value)
    )
}

fn question_markup(question: &QuestionBlock) -> String {
    let mut out = format!(
        "#block(above: 14pt, below: 8pt)[#strong({}) #{}]\n",
        typst_str(&format!("{}.", question.number)),
        typst_str(&question.statement)
    );

    match &question.body {
        QuestionBody::Choices { options } => {
            let lines: Vec<String> = options
                .iter()
                .map(|o| typst_str(&format!("{} {}", o.marker, o.text)))
                .collect();
            out.push_str(&format!(
                "#pad(left: 12pt, stack(spacing: 6pt, {}))\n",
                lines.join(", ")
            ));
        }
        QuestionBody::TrueFalse { markers } => {
            let markers: Vec<String> = markers.iter().map(|m| typst_str(m)).collect();
            out.push_str(&format!(
                "#pad(left: 12pt, stack(dir: ltr, spacing: 24pt, {}))\n",
                markers.join(", ")
            ));
        }
        QuestionBody::Essay {
            rules,
            width_pt,
            spacing_pt,
        } => {
            for _ in 0..*rules {
                out.push_str(&format!("#v({}pt)\n#line(length: {}pt)\n", spacing_pt, width_pt));
            }
        }
    }

    out.push('\n');
    out
}

/// 页脚模板中的 `{current}` / `{total}` 换成 Typst 页码表达式
fn footer_markup(template: &str) -> String {
    let mut out = String::new();
    let mut rest = template;

    while !rest.is_empty() {
        let next = [("{current}", "#str(here().page())"), ("{total}", "#str(counter(page).final().first())")]
            .iter()
            .filter_map(|(token, expr)| rest.find(token).map(|pos| (pos, *token, *expr)))
            .min_by_key(|(pos, _, _)| *pos);

        match next {
            Some((pos, token, expr)) => {
                if pos > 0 {
                    out.push('#');
                    out.push_str(&typst_str(&rest[..pos]));
                }
                out.push_str(expr);
                rest = &rest[pos + token.len()..];
            }
            None => {
                out.push('#');
                out.push_str(&typst_str(rest));
                rest = "";
            }
        }
    }

    out
}
