use anyhow::Context;
use clap::Parser;
use tokio::sync::watch;
use wiki_deaths_notifier::adapters::http;
use wiki_deaths_notifier::utils::{logger, validation::Validate};
use wiki_deaths_notifier::{
    CliArgs, DeliveryNotifier, FileSeenStore, Watcher, WatcherConfig, WikiListingSource,
    WikiSummaryResolver,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    // 初始化日誌
    logger::init_cli_logger(args.verbose);

    let mut config = match &args.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path.display());
            WatcherConfig::from_file(path)
                .with_context(|| format!("failed to load config file '{}'", path.display()))?
        }
        None => WatcherConfig::default(),
    };
    if args.dry_run {
        config.dry_run = true;
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }
    tracing::debug!("Config: {:?}", config);

    let client = http::build_client(&config)?;
    let source = WikiListingSource::new(client.clone());
    let resolver = WikiSummaryResolver::new(client, &config);
    let notifier = DeliveryNotifier::from_config(&config)?;
    let store = FileSeenStore::new(config.seen_file.clone());

    let mut watcher = Watcher::load(&config, source, resolver, notifier, store).await?;

    if args.once {
        let report = watcher.run_cycle().await?;
        tracing::info!(
            "✅ Single check finished: {} notified, {} failed",
            report.notified.len(),
            report.failed.len()
        );
        return Ok(());
    }

    let (stop_tx, stop_rx) = watch::channel(false);
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                tracing::info!("Stopping after the current step; press Ctrl-C again to quit now");
                let _ = stop_tx.send(true);
                if tokio::signal::ctrl_c().await.is_ok() {
                    std::process::exit(130);
                }
            }
            Err(e) => tracing::warn!("Cannot listen for Ctrl-C: {}", e),
        }
    });

    tracing::info!("🚀 Started, checking {}", config.current_listing_url());
    watcher.run(stop_rx).await;

    Ok(())
}
