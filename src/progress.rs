//! Progress reporting for the export pipeline.
//!
//! Exporting a large workspace takes a while: every channel is paged
//! through, every thread drained and every author looked up. A
//! [`ProgressCallback`] gets a [`Progress`] snapshot each time a channel
//! starts and finishes.
//!
//! # Example
//!
//! ```rust
//! use slackpack::progress::{Progress, ProgressCallback};
//! use std::sync::Arc;
//!
//! let callback: ProgressCallback = Arc::new(|progress| {
//!     if let Some(pct) = progress.percentage() {
//!         println!("{:.0}% - #{}", pct, progress.channel);
//!     }
//! });
//!
//! callback(Progress::new(3, 12, "general").with_messages(250));
//! ```

use std::sync::Arc;

/// Snapshot of export progress.
#[derive(Debug, Clone, Default)]
pub struct Progress {
    /// Channels fully processed so far.
    pub channels_done: usize,

    /// Total channels in the workspace listing.
    pub total_channels: usize,

    /// Channel currently being processed.
    pub channel: String,

    /// Rows collected so far across all channels.
    pub messages: usize,
}

impl Progress {
    /// Creates a new progress instance.
    pub fn new(channels_done: usize, total_channels: usize, channel: impl Into<String>) -> Self {
        Self {
            channels_done,
            total_channels,
            channel: channel.into(),
            messages: 0,
        }
    }

    /// Sets the running message count.
    #[must_use]
    pub fn with_messages(mut self, messages: usize) -> Self {
        self.messages = messages;
        self
    }

    /// Returns the channel progress as a percentage (0.0 - 100.0).
    ///
    /// Returns `None` when the workspace has no channels.
    ///
    /// ```rust
    /// use slackpack::progress::Progress;
    ///
    /// assert_eq!(Progress::new(1, 4, "general").percentage(), Some(25.0));
    /// assert_eq!(Progress::new(0, 0, "").percentage(), None);
    /// ```
    pub fn percentage(&self) -> Option<f64> {
        if self.total_channels == 0 {
            None
        } else {
            Some((self.channels_done as f64 / self.total_channels as f64) * 100.0)
        }
    }

    /// Returns whether every channel has been processed.
    pub fn is_complete(&self) -> bool {
        self.channels_done >= self.total_channels
    }
}

/// Callback invoked with progress updates.
pub type ProgressCallback = Arc<dyn Fn(Progress) + Send + Sync>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_percentage() {
        assert_eq!(Progress::new(0, 10, "a").percentage(), Some(0.0));
        assert_eq!(Progress::new(5, 10, "a").percentage(), Some(50.0));
        assert_eq!(Progress::new(10, 10, "a").percentage(), Some(100.0));
    }

    #[test]
    fn test_is_complete() {
        assert!(!Progress::new(2, 3, "a").is_complete());
        assert!(Progress::new(3, 3, "a").is_complete());
        assert!(Progress::default().is_complete());
    }

    #[test]
    fn test_callback_receives_updates() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let callback: ProgressCallback = Arc::new(move |p| {
            sink.lock().unwrap().push((p.channels_done, p.messages));
        });

        callback(Progress::new(0, 2, "general"));
        callback(Progress::new(1, 2, "general").with_messages(7));

        assert_eq!(*seen.lock().unwrap(), vec![(0, 0), (1, 7)]);
    }
}
