//! # slack-export
//!
//! Exports every public channel of a Slack workspace into one CSV table.

use std::process;
use std::sync::Arc;
use std::time::Instant;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use slackpack::api::WebClient;
use slackpack::cli::ExportArgs;
use slackpack::config::ExportConfig;
use slackpack::export::Exporter;
use slackpack::progress::Progress;
use slackpack::SlackpackError;

fn main() {
    let args = ExportArgs::parse();
    init_logging(args.verbose);

    if let Err(e) = run(&args) {
        eprintln!("❌ Error: {e}");
        if e.is_missing_token() {
            eprintln!("   Required scopes: channels:read, channels:history, channels:join, users:read");
        }
        process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "slackpack=debug" } else { "slackpack=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(args: &ExportArgs) -> Result<(), SlackpackError> {
    let total_start = Instant::now();

    // The token check happens before anything touches the network.
    let token = ExportConfig::from_env()?.token;
    let config = ExportConfig {
        token,
        ..args.to_config()
    };
    let client = WebClient::from_config(&config)?;

    println!("📦 slack-export v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("💾 Output:   {}", config.output.display());
    println!("🔁 Retries:  {}", config.max_retries);
    if !config.join_channels {
        println!("⏭️  Skipping channel joins (--no-join)");
    }
    if !config.include_threads {
        println!("⏭️  Skipping thread replies (--no-threads)");
    }
    println!();

    let exporter = Exporter::from_config(client, &config).with_progress(Arc::new(|p: Progress| {
        if p.is_complete() {
            return;
        }
        match p.percentage() {
            Some(pct) => println!(
                "⏳ [{}/{} {pct:.0}%] #{} ({} rows so far)",
                p.channels_done + 1,
                p.total_channels,
                p.channel,
                p.messages
            ),
            None => println!("⏳ #{}", p.channel),
        }
    }));

    let export = exporter.export()?;

    println!("💾 Writing CSV...");
    let write_start = Instant::now();
    export.write(&config)?;
    println!("   Written in {:.2}s", write_start.elapsed().as_secs_f64());

    let stats = &export.stats;
    println!();
    println!("✅ Done! Output saved to {}", config.output.display());

    println!();
    println!("📊 Summary:");
    println!("   Channels:  {}", stats.channels);
    println!("   Joined:    {}", stats.joined);
    println!("   Fetched:   {} messages", stats.fetched);
    if stats.skipped > 0 {
        println!("   Skipped:   {} without author", stats.skipped);
    }
    println!("   Rows:      {}", stats.rows);

    println!();
    println!("⚡ Total time: {:.2}s", total_start.elapsed().as_secs_f64());

    Ok(())
}
