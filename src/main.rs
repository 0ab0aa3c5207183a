use anyhow::Result;
use clap::Parser;
use easyquiz_builder::cli::Cli;
use easyquiz_builder::utils::logging;
use easyquiz_builder::{App, Config};
use tracing::error;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 加载配置
    let config = Config::load(&cli.config)?;

    // 初始化日志
    logging::init(cli.verbose || config.verbose_logging);

    // 初始化并运行应用
    let app = App::initialize(config)?;
    if let Err(e) = app.run(cli.command).await {
        error!("❌ {}", e);
        eprintln!("{}", e.user_message());
        std::process::exit(1);
    }

    Ok(())
}
