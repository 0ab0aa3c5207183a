/// 日志工具模块
///
/// 提供日志初始化、格式化和输出的辅助函数
use crate::config::Config;
use crate::models::Question;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// 初始化日志
///
/// `RUST_LOG` 优先；否则默认 info，详细模式下 debug。
///
/// # 参数
/// - `verbose`: 是否显示详细日志
pub fn init(verbose: bool) {
    let default_level = if verbose {
        "easyquiz_builder=debug,info"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 EasyQuiz 组卷工具");
    info!("🌐 后端地址: {}", config.api_root());
    info!("📁 输出目录: {}", config.output_dir);
    info!("{}", "=".repeat(60));
}

/// 打印题目列表（编号、题型、难度、学科、出题人、题干）
pub fn print_question_table<'a>(questions: impl IntoIterator<Item = &'a Question>) {
    println!(
        "{:<6} {:<16} {:<7} {:<18} {:<16} {}",
        "ID", "Type", "Level", "Discipline", "Author", "Statement"
    );
    println!("{}", "─".repeat(100));

    for q in questions {
        println!("{}", question_row(q));
    }
}

/// 题目表格中的一行
pub fn question_row(q: &Question) -> String {
    format!(
        "{:<6} {:<16} {:<7} {:<18} {:<16} {}",
        truncate_text(q.id.as_str(), 6),
        q.kind.label(),
        q.difficulty.label(),
        truncate_text(&q.subject, 15),
        truncate_text(&q.author, 13),
        truncate_text(&q.statement, 60)
    )
}

/// 打印最终统计信息
///
/// # 参数
/// - `visible`: 可见题目数
/// - `total`: 题库总数
pub fn print_browse_summary(visible: usize, total: usize) {
    println!("{}", "─".repeat(100));
    println!("📊 显示 {}/{} 道题目", visible, total);
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
