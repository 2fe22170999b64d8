//! Sentiment scoring.
//!
//! Aggregates only need a polarity per message, so scoring sits behind the
//! [`SentimentScorer`] trait. [`VaderScorer`] is the default and returns the
//! VADER compound score, in `[-1.0, 1.0]`.

use vader_sentiment::SentimentIntensityAnalyzer;

/// Scores the polarity of a piece of text.
///
/// Negative values are negative sentiment, positive values positive, `0.0`
/// neutral. Any closure `Fn(&str) -> f64` is a scorer.
///
/// ```rust
/// use slackpack::stats::SentimentScorer;
///
/// let shouty = |text: &str| if text.contains('!') { 1.0 } else { 0.0 };
/// assert_eq!(shouty.polarity("ship it!"), 1.0);
/// ```
pub trait SentimentScorer {
    fn polarity(&self, text: &str) -> f64;
}

impl<F> SentimentScorer for F
where
    F: Fn(&str) -> f64,
{
    fn polarity(&self, text: &str) -> f64 {
        self(text)
    }
}

/// Lexicon-based scorer backed by VADER.
pub struct VaderScorer {
    analyzer: SentimentIntensityAnalyzer<'static>,
}

impl VaderScorer {
    pub fn new() -> Self {
        Self {
            analyzer: SentimentIntensityAnalyzer::new(),
        }
    }
}

impl Default for VaderScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for VaderScorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VaderScorer").finish_non_exhaustive()
    }
}

impl SentimentScorer for VaderScorer {
    fn polarity(&self, text: &str) -> f64 {
        self.analyzer
            .polarity_scores(text)
            .get("compound")
            .copied()
            .unwrap_or(0.0)
    }
}
