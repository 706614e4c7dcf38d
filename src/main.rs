use clap::Parser;
use school_search::utils::{logger, validation::Validate};
use school_search::{
    load_school_data, run_session, CliConfig, ConfigProvider, DataExporter, Dispatcher,
    LocalStorage, TomlConfig,
};
use tokio::io::BufReader;

async fn run<C: ConfigProvider + Validate>(config: C) -> anyhow::Result<()> {
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let data_storage = LocalStorage::new(config.data_dir());
    let data = load_school_data(&data_storage, &config).await;

    let output_storage = LocalStorage::new(config.output_dir());
    let exporter = DataExporter::new(output_storage, &config);
    let dispatcher = Dispatcher::new(data, exporter);

    let stdin = BufReader::new(tokio::io::stdin());
    let handled = run_session(&dispatcher, stdin, tokio::io::stdout()).await?;

    tracing::info!("Session finished after {} commands", handled);
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    logger::init_cli_logger(cli.verbose);
    tracing::debug!("CLI config: {:?}", cli);

    match cli.config.clone() {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            let config = match TomlConfig::from_file(&path) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("❌ Failed to load config file '{}': {}", path, e);
                    eprintln!("💡 {}", e.recovery_suggestion());
                    std::process::exit(1);
                }
            };
            run(config).await
        }
        None => run(cli).await,
    }
}
