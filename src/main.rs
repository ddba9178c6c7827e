use clap::Parser;
use storefront_conformance::core::runner::exit_code;
use storefront_conformance::utils::logger;
use storefront_conformance::{CliConfig, ConformanceRunner, ConsoleReporter};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::debug!("CLI config: {:?}", cli);

    let config = match cli.load() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuration failed: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    };

    let mut runner = match ConformanceRunner::new(&config, ConsoleReporter::stdout()) {
        Ok(runner) => runner,
        Err(e) => {
            tracing::error!("❌ Could not build HTTP client: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(e.exit_code());
        }
    };

    std::process::exit(exit_code(runner.run_all().await));
}
