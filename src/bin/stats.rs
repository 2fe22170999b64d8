//! # slack-stats
//!
//! Charts an exported Slack table: activity, sentiment and keywords.

use std::process;
use std::time::Instant;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use slackpack::SlackpackError;
use slackpack::cli::StatsArgs;
use slackpack::stats::{generate_charts, peak_hours};

fn main() {
    let args = StatsArgs::parse();
    init_logging(args.verbose);

    if let Err(e) = run(&args) {
        eprintln!("❌ Error: {e}");
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

fn run(args: &StatsArgs) -> Result<(), SlackpackError> {
    let start = Instant::now();
    let config = args.to_config();

    println!("📦 slack-stats v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("📂 Input:   {}", config.input.display());
    println!("💾 Output:  {}", config.output.display());
    println!();

    println!("📈 Computing statistics and rendering charts...");
    let report = generate_charts(&config)?;

    println!();
    println!("✅ Done! Charts saved to {}", config.output.display());

    println!();
    println!("📊 Summary:");
    println!("   Messages:  {}", report.total_messages);
    println!(
        "   Users:     {} with at least {} messages",
        report.users.len(),
        config.min_user_messages
    );
    println!(
        "   Channels:  {} with at least {} messages",
        report.channels.len(),
        config.min_channel_messages
    );
    let peaks: Vec<String> = peak_hours(&report.hourly, 3)
        .iter()
        .map(|(hour, count)| format!("{hour:02}:00 ({count})"))
        .collect();
    if !peaks.is_empty() {
        println!("   Peak hours: {}", peaks.join(", "));
    }
    if let Some((word, count)) = report.keywords.first() {
        println!("   Top word:  {word} ({count})");
    }

    println!();
    println!("⚡ Total time: {:.2}s", start.elapsed().as_secs_f64());

    Ok(())
}
