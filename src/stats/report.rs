//! The stats pipeline: table in, chart document out.
//!
//! The document is a single HTML file with one SVG chart per page; browsers
//! print (or "save as PDF") one chart per sheet.

use std::fs;
use std::path::Path;

use crate::config::StatsConfig;
use crate::core::models::ExportRow;
use crate::core::reader::read_csv;
use crate::error::Result;
use crate::stats::aggregates::{
    channel_sentiment, hourly_activity, most_active_channels, most_active_users,
};
use crate::stats::chart::{BarChart, CHART_SIZE};
use crate::stats::keywords::top_keywords;
use crate::stats::sentiment::{SentimentScorer, VaderScorer};

/// All aggregates computed from one export table.
#[derive(Debug, Clone, PartialEq)]
pub struct StatsReport {
    /// Rows in the table
    pub total_messages: usize,
    /// Users above the activity threshold, busiest first
    pub users: Vec<(String, usize)>,
    /// Channels above the activity threshold, busiest first
    pub channels: Vec<(String, usize)>,
    /// Messages per hour of day
    pub hourly: [usize; 24],
    /// Mean sentiment of the channels in [`channels`](Self::channels), ascending
    pub sentiment: Vec<(String, f64)>,
    /// Most frequent keywords
    pub keywords: Vec<(String, usize)>,
}

impl StatsReport {
    /// Computes every aggregate.
    ///
    /// Sentiment is only scored for channels that pass the channel activity
    /// threshold.
    pub fn compute<S>(rows: &[ExportRow], config: &StatsConfig, scorer: &S) -> Self
    where
        S: SentimentScorer + ?Sized,
    {
        let users = most_active_users(rows, config.min_user_messages);
        let channels = most_active_channels(rows, config.min_channel_messages);
        let active: Vec<String> = channels.iter().map(|(name, _)| name.clone()).collect();

        Self {
            total_messages: rows.len(),
            users,
            hourly: hourly_activity(rows),
            sentiment: channel_sentiment(rows, &active, scorer),
            keywords: top_keywords(rows, config.top_keywords),
            channels,
        }
    }

    /// One chart per aggregate, in document order.
    pub fn charts(&self) -> Vec<BarChart> {
        vec![
            BarChart::new("Most Active Users", "User", "Number of Messages")
                .with_counts(self.users.iter().map(|(n, c)| (n.as_str(), *c))),
            BarChart::new("Most Active Channels", "Channel", "Number of Messages")
                .with_counts(self.channels.iter().map(|(n, c)| (n.as_str(), *c))),
            BarChart::new("Peak Activity Times", "Hour of Day", "Number of Messages")
                .with_counts((0..24).map(|h: usize| (h.to_string(), self.hourly[h]))),
            BarChart::new("Message Sentiment by Channel", "Channel", "Sentiment Score")
                .with_values(self.sentiment.iter().map(|(n, s)| (n.as_str(), *s))),
            BarChart::new("Top Keywords", "Keyword", "Frequency")
                .with_counts(self.keywords.iter().map(|(w, c)| (w.as_str(), *c))),
        ]
    }
}

/// Renders the report as a paginated HTML document.
pub fn render_html(report: &StatsReport) -> Result<String> {
    let mut html = String::from(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>Slack statistics</title>\n<style>\n\
         body { font-family: sans-serif; margin: 0; }\n\
         .page { width: 900px; margin: 0 auto 2em; break-after: page; page-break-after: always; }\n\
         .page:last-child { break-after: auto; page-break-after: auto; }\n\
         </style>\n</head>\n<body>\n",
    );

    html.push_str(&format!(
        "<!-- {} messages, {} users, {} channels -->\n",
        report.total_messages,
        report.users.len(),
        report.channels.len()
    ));

    for chart in report.charts() {
        html.push_str("<section class=\"page\">\n");
        html.push_str(&chart.render_svg(CHART_SIZE)?);
        html.push_str("\n</section>\n");
    }

    html.push_str("</body>\n</html>\n");
    Ok(html)
}

/// Writes the chart document to `path`.
pub fn write_report(report: &StatsReport, path: impl AsRef<Path>) -> Result<()> {
    fs::write(path, render_html(report)?)?;
    Ok(())
}

/// Loads the table named in `config`, computes the report with VADER
/// sentiment and writes the chart document.
pub fn generate_charts(config: &StatsConfig) -> Result<StatsReport> {
    generate_charts_with(config, &VaderScorer::new())
}

/// Like [`generate_charts`], with a custom sentiment scorer.
pub fn generate_charts_with<S>(config: &StatsConfig, scorer: &S) -> Result<StatsReport>
where
    S: SentimentScorer + ?Sized,
{
    let rows = read_csv(&config.input)?;
    tracing::info!(rows = rows.len(), input = %config.input.display(), "export table loaded");

    let report = StatsReport::compute(&rows, config, scorer);
    write_report(&report, &config.output)?;
    tracing::info!(output = %config.output.display(), "charts written");

    Ok(report)
}
