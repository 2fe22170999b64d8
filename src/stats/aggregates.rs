//! Aggregate reductions over the export table.
//!
//! Every function here is a pure reduction over `&[ExportRow]`.

use std::cmp::Reverse;
use std::collections::HashMap;

use chrono::Timelike;

use crate::core::models::ExportRow;
use crate::stats::sentiment::SentimentScorer;

/// Counts rows per key, most frequent first; ties sorted by key.
pub fn count_by<'a, F>(rows: &'a [ExportRow], key: F) -> Vec<(String, usize)>
where
    F: Fn(&'a ExportRow) -> &'a str,
{
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for row in rows {
        *counts.entry(key(row)).or_insert(0) += 1;
    }

    let mut counted: Vec<_> = counts
        .into_iter()
        .map(|(name, count)| (name.to_string(), count))
        .collect();
    counted.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    counted
}

/// Message count per user, keeping users with at least `min` messages.
///
/// ```rust
/// use chrono::NaiveDateTime;
/// use slackpack::ExportRow;
/// use slackpack::stats::most_active_users;
///
/// let row = |user: &str| ExportRow::new(NaiveDateTime::default(), "general", user, "hi");
/// let rows = vec![row("alice"), row("alice"), row("bob")];
///
/// assert_eq!(most_active_users(&rows, 2), vec![("alice".to_string(), 2)]);
/// ```
pub fn most_active_users(rows: &[ExportRow], min: usize) -> Vec<(String, usize)> {
    let mut counts = count_by(rows, |row| row.username.as_str());
    counts.retain(|(_, count)| *count >= min);
    counts
}

/// Message count per channel, keeping channels with at least `min` messages.
pub fn most_active_channels(rows: &[ExportRow], min: usize) -> Vec<(String, usize)> {
    let mut counts = count_by(rows, |row| row.channel.as_str());
    counts.retain(|(_, count)| *count >= min);
    counts
}

/// Message count for each hour of the day, `0..24`.
pub fn hourly_activity(rows: &[ExportRow]) -> [usize; 24] {
    let mut hours = [0; 24];
    for row in rows {
        hours[row.timestamp.hour() as usize] += 1;
    }
    hours
}

/// Mean sentiment per channel, for the given channels only.
///
/// Channels without any rows are left out. Sorted by score, ascending.
pub fn channel_sentiment<S>(rows: &[ExportRow], channels: &[String], scorer: &S) -> Vec<(String, f64)>
where
    S: SentimentScorer + ?Sized,
{
    let mut sums: HashMap<&str, (f64, usize)> = HashMap::new();
    for row in rows {
        if !channels.iter().any(|c| c == &row.channel) {
            continue;
        }
        let entry = sums.entry(row.channel.as_str()).or_insert((0.0, 0));
        entry.0 += scorer.polarity(&row.message);
        entry.1 += 1;
    }

    let mut means: Vec<_> = sums
        .into_iter()
        .map(|(channel, (sum, count))| (channel.to_string(), sum / count as f64))
        .collect();
    means.sort_by(|a, b| a.1.total_cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
    means
}

/// The `n` busiest hours, busiest first. Handy for summaries.
pub fn peak_hours(hours: &[usize; 24], n: usize) -> Vec<(u32, usize)> {
    let mut ranked: Vec<(u32, usize)> = (0u32..)
        .zip(hours.iter().copied())
        .filter(|(_, count)| *count > 0)
        .collect();
    ranked.sort_by_key(|(hour, count)| (Reverse(*count), *hour));
    ranked.truncate(n);
    ranked
}
