//! Quote-of-the-day client for the dashboard.
//!
//! Fetches directly from a public quote API with a short timeout. The
//! upstream is best effort: any failure falls back to a built-in rotation
//! keyed by day of year, so the dashboard never waits on it or breaks.

use std::time::Duration;

use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use staffly_shared::config::QuoteSettings;

/// Built-in rotation used when the upstream API is unreachable.
const FALLBACK_QUOTES: &[(&str, &str)] = &[
    (
        "It is not the mountain we conquer, but ourselves.",
        "Edmund Hillary",
    ),
    (
        "Well done is better than well said.",
        "Benjamin Franklin",
    ),
    (
        "Quality is not an act, it is a habit.",
        "Aristotle",
    ),
    (
        "The secret of getting ahead is getting started.",
        "Mark Twain",
    ),
    (
        "Alone we can do so little; together we can do so much.",
        "Helen Keller",
    ),
];

/// A quote with its attribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Quote {
    /// The quote text.
    pub quote: String,
    /// Who said it.
    pub author: String,
}

/// Upstream response shape: an array of `{"q": ..., "a": ...}` objects.
#[derive(Debug, Deserialize)]
struct UpstreamQuote {
    q: String,
    a: String,
}

/// HTTP client for the quote-of-the-day API.
#[derive(Debug, Clone)]
pub struct QuoteClient {
    http: reqwest::Client,
    url: String,
}

impl QuoteClient {
    /// Builds a client from the quote settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(settings: &QuoteSettings) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            url: settings.url.clone(),
        })
    }

    /// Fetches the quote of the day, falling back to the built-in rotation.
    pub async fn quote_of_the_day(&self) -> Quote {
        match self.fetch().await {
            Ok(quote) => quote,
            Err(e) => {
                warn!(error = %e, "Quote API unavailable, using fallback");
                Self::fallback()
            }
        }
    }

    async fn fetch(&self) -> Result<Quote, reqwest::Error> {
        let quotes: Vec<UpstreamQuote> = self
            .http
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(quotes.into_iter().next().map_or_else(Self::fallback, |q| {
            Quote {
                quote: q.q,
                author: q.a,
            }
        }))
    }

    /// Picks today's entry from the built-in rotation.
    #[must_use]
    pub fn fallback() -> Quote {
        let index = Utc::now().ordinal0() as usize % FALLBACK_QUOTES.len();
        let (quote, author) = FALLBACK_QUOTES[index];
        Quote {
            quote: quote.to_string(),
            author: author.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_is_never_empty() {
        let quote = QuoteClient::fallback();
        assert!(!quote.quote.is_empty());
        assert!(!quote.author.is_empty());
    }

    #[test]
    fn test_fallback_is_stable_within_a_day() {
        assert_eq!(QuoteClient::fallback(), QuoteClient::fallback());
    }

    #[test]
    fn test_upstream_shape_parses() {
        let body = r#"[{"q": "Well begun is half done.", "a": "Aristotle"}]"#;
        let parsed: Vec<UpstreamQuote> = serde_json::from_str(body).unwrap();
        assert_eq!(parsed[0].a, "Aristotle");
    }
}
