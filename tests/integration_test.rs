use async_trait::async_trait;
use easyquiz_builder::clients::{BankApi, QuizClient};
use easyquiz_builder::config::Config;
use easyquiz_builder::error::{AppError, AppResult, BusinessError};
use easyquiz_builder::models::{
    AnswerOption, Difficulty, Discipline, ExamMetadata, Facet, FilterState, Question, QuestionId,
    QuestionType, Role, User,
};
use easyquiz_builder::services::composer::{Block, QuestionBody};
use easyquiz_builder::services::renderer::RenderedExam;
use easyquiz_builder::services::{DocumentRenderer, ExamDocument};
use easyquiz_builder::ExamBuilder;
use std::path::PathBuf;
use std::sync::Mutex;
use tokio_test::{assert_err, assert_ok, block_on};

// ========== 测试替身 ==========

struct FakeBank {
    questions: Vec<Question>,
    disciplines_fail: bool,
}

#[async_trait]
impl BankApi for FakeBank {
    async fn list_questions(&self) -> AppResult<Vec<Question>> {
        Ok(self.questions.clone())
    }

    async fn list_disciplines(&self) -> AppResult<Vec<Discipline>> {
        Ok(vec![
            Discipline {
                id: 1,
                name: "Algorithms".to_string(),
            },
            Discipline {
                id: 2,
                name: "Databases".to_string(),
            },
        ])
    }

    async fn list_professor_disciplines(&self, _professor_id: i64) -> AppResult<Vec<Discipline>> {
        if self.disciplines_fail {
            return Err(AppError::Other("boom".to_string()));
        }
        Ok(vec![Discipline {
            id: 1,
            name: "Algorithms".to_string(),
        }])
    }
}

/// 记录收到的文档，不真正渲染
#[derive(Default)]
struct RecordingRenderer {
    documents: Mutex<Vec<ExamDocument>>,
}

#[async_trait]
impl DocumentRenderer for RecordingRenderer {
    async fn render(&self, doc: &ExamDocument, file_stem: &str) -> AppResult<RenderedExam> {
        self.documents.lock().unwrap().push(doc.clone());
        Ok(RenderedExam {
            pdf_path: PathBuf::from(format!("{}.pdf", file_stem)),
            source_path: PathBuf::from(format!("{}.typ", file_stem)),
        })
    }
}

fn question(id: &str, kind: QuestionType, statement: &str, subject: &str, options: Vec<AnswerOption>) -> Question {
    Question {
        id: QuestionId::new(id),
        statement: statement.to_string(),
        subject: subject.to_string(),
        difficulty: Difficulty::Medium,
        kind,
        author: "Jadir".to_string(),
        options,
    }
}

fn sample_bank() -> Vec<Question> {
    vec![
        question(
            "1",
            QuestionType::MultipleChoice,
            "What is the cost of a binary search?",
            "Algorithms",
            vec![AnswerOption::new("A", true), AnswerOption::new("B", false)],
        ),
        question(
            "2",
            QuestionType::Essay,
            "Explain binary large objects in SQL.",
            "Databases",
            Vec::new(),
        ),
        question(
            "3",
            QuestionType::TrueFalse,
            "Merge sort is stable.",
            "Algorithms",
            vec![
                AnswerOption::new("Verdadeiro", true),
                AnswerOption::new("Falso", false),
            ],
        ),
    ]
}

fn professor() -> User {
    User {
        id: 5,
        name: "Jadir".to_string(),
        email: "jadir@easyquiz.com".to_string(),
        role: Role::Professor,
    }
}

fn mounted_builder(renderer: &RecordingRenderer) -> ExamBuilder<FakeBank, &RecordingRenderer> {
    let api = FakeBank {
        questions: sample_bank(),
        disciplines_fail: false,
    };
    let mut builder = ExamBuilder::new(api, renderer, professor());
    block_on(builder.mount());
    builder
}

// ========== 筛选 ==========

#[test]
fn unconstrained_filter_shows_whole_bank() {
    let renderer = RecordingRenderer::default();
    let builder = mounted_builder(&renderer);

    assert_eq!(builder.visible().len(), builder.bank().len());
}

#[test]
fn exact_substring_of_statement_is_visible() {
    let renderer = RecordingRenderer::default();
    let mut builder = mounted_builder(&renderer);
    builder.set_filter(FilterState {
        search: "Merge sort is stable".to_string(),
        ..FilterState::default()
    });

    let visible = builder.visible();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].id, QuestionId::new("3"));
}

#[test]
fn discipline_facet_with_search_keeps_single_match() {
    let renderer = RecordingRenderer::default();
    let mut builder = mounted_builder(&renderer);
    builder.set_filter(FilterState {
        search: "binary".to_string(),
        discipline: Facet::Only("Algorithms".to_string()),
        ..FilterState::default()
    });

    let ids: Vec<&QuestionId> = builder.visible().iter().map(|q| &q.id).collect();
    assert_eq!(ids, vec![&QuestionId::new("1")]);

    builder.reset_filters();
    assert_eq!(builder.visible().len(), 3);
}

// ========== 选题 ==========

#[test]
fn toggle_twice_and_remove_are_stable() {
    let renderer = RecordingRenderer::default();
    let mut builder = mounted_builder(&renderer);
    let id = QuestionId::new("1");

    builder.toggle(&id);
    builder.toggle(&id);
    assert!(builder.selection().is_empty());

    builder.toggle(&id);
    assert!(builder.remove(&id));
    assert!(!builder.remove(&id));
    assert!(builder.selection().is_empty());
}

// ========== 生成 ==========

#[test]
fn empty_selection_never_calls_renderer() {
    let renderer = RecordingRenderer::default();
    let mut builder = mounted_builder(&renderer);

    let err = assert_err!(block_on(builder.generate("prova")));
    assert!(matches!(err, AppError::Business(BusinessError::EmptySelection)));
    assert!(renderer.documents.lock().unwrap().is_empty());
}

#[test]
fn multiple_choice_options_render_in_order_without_answers() {
    let renderer = RecordingRenderer::default();
    let mut builder = mounted_builder(&renderer);

    builder.toggle(&QuestionId::new("1"));
    let rendered = assert_ok!(block_on(builder.generate("prova-1")));
    assert_eq!(rendered.pdf_path, PathBuf::from("prova-1.pdf"));
    assert!(builder.selection().is_empty());

    let documents = renderer.documents.lock().unwrap();
    assert_eq!(documents.len(), 1);

    let questions: Vec<_> = documents[0]
        .blocks
        .iter()
        .filter_map(|b| match b {
            Block::Question(q) => Some(q),
            _ => None,
        })
        .collect();
    assert_eq!(questions.len(), 1);
    assert_eq!(questions[0].number, 1);

    let QuestionBody::Choices { options } = &questions[0].body else {
        panic!("expected choices");
    };
    let lines: Vec<String> = options.iter().map(|o| format!("{} {}", o.marker, o.text)).collect();
    assert_eq!(lines, vec!["a) A", "b) B"]);

    let json = serde_json::to_string(&documents[0]).unwrap();
    assert!(!json.contains("correct"));
}

#[test]
fn header_uses_metadata_and_facets() {
    let renderer = RecordingRenderer::default();
    let mut builder = mounted_builder(&renderer);

    builder.set_metadata(ExamMetadata {
        title: "Midterm".to_string(),
        institution: "Federal University".to_string(),
        course: "Computer Science".to_string(),
        discipline: String::new(),
        instructor: "Maria".to_string(),
    });
    builder.set_filter(FilterState {
        discipline: Facet::Only("Algorithms".to_string()),
        ..FilterState::default()
    });
    builder.toggle(&QuestionId::new("3"));

    let doc = assert_ok!(builder.compose());
    match &doc.blocks[0] {
        Block::Header { logo, title } => {
            assert_eq!(title, "Midterm");
            assert_eq!(logo.caption, "Federal University");
        }
        other => panic!("unexpected first block {:?}", other),
    }

    let Block::IdentificationTable { rows } = &doc.blocks[1] else {
        panic!("expected identification table");
    };
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1][0].value, "Maria");
    assert_eq!(rows[1][1].value, "Algorithms");
    assert_eq!(rows[1][2].value, "Computer Science");
}

// ========== 加载 ==========

#[test]
fn discipline_failure_keeps_question_bank() {
    let api = FakeBank {
        questions: sample_bank(),
        disciplines_fail: true,
    };
    let renderer = RecordingRenderer::default();
    let mut builder = ExamBuilder::new(api, &renderer, professor());

    let failures = block_on(builder.mount()).len();
    assert_eq!(failures, 1);
    assert_eq!(builder.bank().len(), 3);
    assert!(builder.disciplines().is_empty());

    // 学科列表为空时，学科选项来自题库
    assert_eq!(builder.facet_options().disciplines, vec!["Algorithms", "Databases"]);
}

// ========== 真实后端 ==========

#[tokio::test]
#[ignore] // 默认忽略，需要本地后端：cargo test -- --ignored
async fn test_live_login_and_browse() {
    let _ = tracing_subscriber::fmt::try_init();

    let config = Config::from_env().expect("加载配置失败");
    let client = QuizClient::new(&config).expect("创建客户端失败");

    let user = client
        .login("admin@easyquiz.com", "admin123")
        .await
        .expect("登录失败");
    println!("✓ 登录成功: {} ({})", user.name, user.role);

    let questions = client.list_questions().await.expect("加载题库失败");
    println!("📋 题库共 {} 道题目", questions.len());
}
