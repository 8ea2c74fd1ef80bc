use clap::Parser;
use thruster_dashboard::core::console::{run_console, HELP};
use thruster_dashboard::core::ConfigProvider;
use thruster_dashboard::utils::{logger, validation::Validate};
use thruster_dashboard::{CliConfig, Dashboard, TomlConfig};
use tokio::io::BufReader;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 載入 TOML 配置 (沒有指定檔案時使用預設值)
    let mut config = match &cli.config {
        Some(path) => match TomlConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("❌ Failed to load config file '{}': {}", path.display(), e);
                eprintln!("💡 {}", e.recovery_suggestion());
                std::process::exit(1);
            }
        },
        None => TomlConfig::default(),
    };
    cli.apply_to(&mut config);

    logger::init_logger(config.log_format(), config.verbose());
    tracing::info!("🚀 Starting thruster dashboard");
    tracing::debug!("Effective config: {:?}", config);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let mut dashboard = Dashboard::setup(&config)?;
    println!("{}", HELP);

    let interrupted = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Cannot listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };
    let stdin = BufReader::new(tokio::io::stdin());
    let result = run_console(
        &mut dashboard,
        stdin,
        &mut std::io::stdout(),
        config.poll_interval(),
        interrupted,
    )
    .await;

    dashboard.shutdown().await;
    result?;
    Ok(())
}
