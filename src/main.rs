use anyhow::Result;
use assignment_deploy::{logger, App, AppError, Cli, Config};
use clap::Parser;
use tracing::error;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 命令行参数覆盖环境变量配置
    let config = Cli::parse().apply(Config::from_env());

    // 初始化日志
    logger::init(config.verbose_logging);

    let tool = config.marker_tool.clone();
    let app = match App::initialize(config).await {
        Ok(app) => app,
        Err(e) if e.downcast_ref::<AppError>().is_some_and(AppError::is_tool_missing) => {
            error!("{}", e);
            eprintln!("必须先安装 '{}'。", tool);
            std::process::exit(-1);
        }
        Err(e) => return Err(e),
    };

    let stats = app.run().await?;
    if stats.failed > 0 {
        anyhow::bail!("{} 道题目处理失败", stats.failed);
    }

    Ok(())
}
