//! Property-based tests for slackpack.
//!
//! These tests generate random inputs to check the retry schedule,
//! pagination, thread flattening and the aggregate thresholds.

use std::cell::Cell;
use std::time::Duration;

use chrono::NaiveDate;
use proptest::prelude::*;

use slackpack::api::Page;
use slackpack::export::{drain, sort_newest_first, splice_replies};
use slackpack::retry::RetryPolicy;
use slackpack::{ExportRow, Message, Result, SlackpackError};
use slackpack::stats::{hourly_activity, most_active_channels, most_active_users};

/// Operation that fails `failures` times with a transient error, then succeeds.
fn flaky(failures: u32, calls: &Cell<u32>) -> Result<u32> {
    calls.set(calls.get() + 1);
    if calls.get() <= failures {
        Err(SlackpackError::api("conversations.history", "ratelimited"))
    } else {
        Ok(calls.get())
    }
}

fn arb_row() -> impl Strategy<Value = ExportRow> {
    (
        prop::sample::select(vec!["alice", "bob", "carol", "dave", "erin"]),
        prop::sample::select(vec!["general", "random", "dev"]),
        0u32..24,
        0u32..60,
        prop::sample::select(vec!["hello", "deploy done", "lunch?", ""]),
    )
        .prop_map(|(user, channel, hour, minute, text)| {
            let ts = NaiveDate::from_ymd_opt(2024, 1, 15)
                .unwrap()
                .and_hms_opt(hour, minute, 0)
                .unwrap();
            ExportRow::new(ts, channel, user, text)
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// k <= N transient failures: success after k + 1 attempts, sleeping
    /// base, 2*base, 4*base, ...
    #[test]
    fn retry_recovers_within_budget(max in 0u32..8, seed in 0u32..8) {
        let failures = seed.min(max);
        let policy = RetryPolicy::new(max).with_base_delay(Duration::from_millis(100));
        let calls = Cell::new(0);
        let mut sleeps = Vec::new();

        let result = policy.run_with_sleep("test", || flaky(failures, &calls), |d| sleeps.push(d));

        prop_assert_eq!(result.unwrap(), failures + 1);
        prop_assert_eq!(calls.get(), failures + 1);
        let expected: Vec<_> = (0..failures)
            .map(|i| Duration::from_millis(100 * 2u64.pow(i)))
            .collect();
        prop_assert_eq!(sleeps, expected);
    }

    /// k > N transient failures: exactly N + 1 attempts, then the error.
    #[test]
    fn retry_gives_up_after_budget(max in 0u32..8, extra in 1u32..4) {
        let policy = RetryPolicy::new(max).with_base_delay(Duration::ZERO);
        let calls = Cell::new(0);

        let result = policy.run_with_sleep("test", || flaky(max + extra, &calls), |_| {});

        prop_assert!(result.unwrap_err().is_api());
        prop_assert_eq!(calls.get(), max + 1);
    }

    /// Chained pages concatenate in order, whatever the page sizes.
    #[test]
    fn drain_concatenates_pages(pages in prop::collection::vec(prop::collection::vec(any::<u16>(), 0..5), 1..8)) {
        let expected: Vec<u16> = pages.iter().flatten().copied().collect();

        let drained = drain(|cursor| {
            let index: usize = cursor.map_or(0, |c| c.parse().unwrap());
            let next = (index + 1 < pages.len()).then(|| (index + 1).to_string());
            Ok(Page::new(pages[index].clone(), next))
        });

        prop_assert_eq!(drained.pages, pages.len());
        prop_assert_eq!(drained.into_result().unwrap(), expected);
    }

    /// A failing page keeps everything fetched before it.
    #[test]
    fn drain_keeps_prefix_on_error(sizes in prop::collection::vec(1usize..4, 2..6), fail_at in 1usize..6) {
        let fail_at = fail_at.min(sizes.len() - 1);
        let drained = drain(|cursor| {
            let index: usize = cursor.map_or(0, |c| c.parse().unwrap());
            if index == fail_at {
                return Err(SlackpackError::api("conversations.history", "fatal_error"));
            }
            Ok(Page::new(vec![index; sizes[index]], Some((index + 1).to_string())))
        });

        prop_assert!(!drained.is_complete());
        prop_assert_eq!(drained.pages, fail_at);
        prop_assert_eq!(drained.items.len(), sizes[..fail_at].iter().sum::<usize>());
    }

    /// Every parent appears once and every reply is present.
    #[test]
    fn splice_keeps_parent_once(reply_counts in prop::collection::vec(0u32..4, 0..10)) {
        let messages: Vec<Message> = reply_counts
            .iter()
            .enumerate()
            .map(|(i, &n)| {
                let msg = Message::new(format!("{}.000000", 1000 + i * 10), "m");
                if n > 0 { msg.with_reply_count(n) } else { msg }
            })
            .collect();
        let expected = messages.len() + reply_counts.iter().sum::<u32>() as usize;

        let mut flat = splice_replies(messages, |parent| {
            let base: u64 = parent.ts.split('.').next().unwrap().parse().unwrap();
            let mut thread = vec![parent.clone()];
            for r in 1..=u64::from(parent.reply_count.unwrap_or(0)) {
                thread.push(Message::new(format!("{}.000000", base + r), "r").with_thread_ts(parent.ts.clone()));
            }
            thread
        });
        prop_assert_eq!(flat.len(), expected);

        sort_newest_first(&mut flat);
        let stamps: Vec<_> = flat.iter().map(|m| m.timestamp().unwrap()).collect();
        prop_assert!(stamps.windows(2).all(|w| w[0] >= w[1]));
    }

    /// Thresholds keep exactly the names at or above the minimum, and the
    /// hourly histogram accounts for every row.
    #[test]
    fn thresholds_and_histogram(rows in prop::collection::vec(arb_row(), 0..80), min in 0usize..10) {
        for (_, count) in most_active_users(&rows, min) {
            prop_assert!(count >= min);
        }
        for (_, count) in most_active_channels(&rows, min) {
            prop_assert!(count >= min);
        }
        let all_users: usize = most_active_users(&rows, 0).iter().map(|(_, n)| n).sum();
        prop_assert_eq!(all_users, rows.len());
        prop_assert_eq!(hourly_activity(&rows).iter().sum::<usize>(), rows.len());
    }
}
