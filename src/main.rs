use chrono::Local;
use clap::Parser;

use jobwatch::cli::{Cli, Commands};
use jobwatch::config::Config;
use jobwatch::errors::WatchResult;
use jobwatch::services::{Delivery, MonitorService, NotificationService, NotifyOutcome};
use jobwatch::sources::HttpFetcher;
use jobwatch::storage::{load_or_empty, JsonHistoryStore};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> WatchResult<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::from_env()?;

    // Initialize storage
    let store = JsonHistoryStore::new(&config.history_path);

    match cli.command {
        Commands::Run { dry_run } => cmd_run(&config, store, dry_run),
        Commands::List => cmd_list(&config, store),
    }
}

fn cmd_list(config: &Config, store: JsonHistoryStore) -> WatchResult<()> {
    let history = load_or_empty(&store);

    println!("Configured sources:\n");
    for source in &config.sources {
        println!("  {}", source.name);
        println!("    URL: {}", source.url);
        println!("    Selectors: {}", source.selectors.join(" | "));
        match history.get(&source.name) {
            Some(title) => println!("    Last seen: {}", title),
            None => println!("    Last seen: (never)"),
        }
        println!();
    }

    println!("History file: {}", store.path().display());
    Ok(())
}

fn cmd_run(config: &Config, store: JsonHistoryStore, dry_run: bool) -> WatchResult<()> {
    let fetcher = HttpFetcher::new(config.timeout, config.verify_tls, config.retry)?;
    let notifier = NotificationService::new(config)?;

    if !dry_run && !notifier.is_configured() {
        log::warn!("SCKEY is not set; updates will be recorded but not pushed");
    }

    let service = MonitorService::new(config.sources.clone(), fetcher, notifier, store);

    println!(
        "Checking {} sources at {}...\n",
        service.sources().len(),
        Local::now().format("%Y-%m-%d %H:%M:%S")
    );

    let report = service.run(dry_run, |source, status| {
        println!("  {}: {}", source.name, status);
    })?;
    println!();

    match &report.notify {
        NotifyOutcome::NothingToSend => println!("No new announcements."),
        NotifyOutcome::DryRun(notification) => {
            println!("[DRY RUN] Would send:\n");
            println!("{}", notification.format());
        }
        NotifyOutcome::Delivered(Delivery::Sent) => {
            println!("Notified {} updates.", report.batch.len())
        }
        NotifyOutcome::Delivered(Delivery::Skipped) => {
            println!("Found {} updates (notification skipped).", report.batch.len())
        }
        NotifyOutcome::Failed(e) => println!("Notification FAILED: {}", e),
    }

    if report.history_saved {
        println!("History saved.");
    }

    if report.failures() > 0 {
        println!("{} source(s) could not be checked.", report.failures());
    }

    Ok(())
}
