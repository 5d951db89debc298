//! wikipedia.rs
//!
//! Client for the Wikipedia "on this day" feed.
//!
//! 1.  **WikipediaClient**: renders the feed URL from the configured template,
//!     performs the GET on a shared connection pool and decodes the `events`
//!     array.
//! 2.  **FetchError**: every way the upstream call can fail, tagged so callers
//!     can tell a timeout from a refused connection or an HTTP error status.
//!
//! No retries are made; a failed call fails the whole request.

use rand::Rng;
use reqwest::StatusCode;
use std::time::Duration;
use tracing::{debug, info};

use crate::config::WikipediaConfig;
use crate::language::Language;
use crate::models::{Event, OnThisDayFeed};

/// Feed type requested from the on-this-day endpoint.
pub const FEED_TYPE: &str = "events";

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Error fetching events from Wikipedia: request timed out: {0}")]
    Timeout(#[source] reqwest::Error),
    #[error("Error fetching events from Wikipedia: connection failed: {0}")]
    Connect(#[source] reqwest::Error),
    #[error("Error fetching events from Wikipedia: {status} for url {url}")]
    Status { status: StatusCode, url: String },
    #[error("Error fetching events from Wikipedia: invalid response body: {0}")]
    Decode(#[source] reqwest::Error),
    #[error("Error fetching events from Wikipedia: {0}")]
    Request(#[source] reqwest::Error),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout(err)
        } else if err.is_connect() {
            FetchError::Connect(err)
        } else if err.is_decode() {
            FetchError::Decode(err)
        } else {
            FetchError::Request(err)
        }
    }
}

/// Client for the on-this-day feed. Cheap to clone; clones share one pool.
#[derive(Clone, Debug)]
pub struct WikipediaClient {
    /// URL template with `{lang}`, `{type}`, `{month}` and `{day}` placeholders.
    url_template: String,
    http_client: reqwest::Client,
}

impl WikipediaClient {
    pub fn new(
        url_template: impl Into<String>,
        user_agent: &str,
        timeout: Duration,
    ) -> Result<Self, FetchError> {
        let http_client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .map_err(FetchError::Request)?;

        Ok(Self {
            url_template: url_template.into(),
            http_client,
        })
    }

    pub fn from_config(config: &WikipediaConfig) -> Result<Self, FetchError> {
        Self::new(&config.api_base, &config.user_agent, config.timeout())
    }

    pub fn url_template(&self) -> &str {
        &self.url_template
    }

    /// Month and day are always zero-padded; `{month:02d}` and `{day:02d}`
    /// are accepted as spellings of `{month}` and `{day}`.
    pub fn events_url(&self, language: Language, month: u32, day: u32) -> String {
        let month = format!("{:02}", month);
        let day = format!("{:02}", day);
        self.url_template
            .replace("{lang}", language.code())
            .replace("{type}", FEED_TYPE)
            .replace("{month:02d}", &month)
            .replace("{month}", &month)
            .replace("{day:02d}", &day)
            .replace("{day}", &day)
    }

    /// Every event the feed lists for the day, in feed order.
    pub async fn get_events(
        &self,
        month: u32,
        day: u32,
        language: Language,
    ) -> Result<Vec<Event>, FetchError> {
        let url = self.events_url(language, month, day);
        debug!("Fetching events from {}", url);

        let response = self.http_client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status { status, url });
        }

        let feed: OnThisDayFeed = response.json().await?;
        info!(
            "Fetched {} events for {:02}/{:02} ({})",
            feed.events.len(),
            month,
            day,
            language
        );
        Ok(feed.events)
    }

    /// One event of the day picked uniformly at random, or `None` when the
    /// feed is empty.
    pub async fn get_random_event(
        &self,
        month: u32,
        day: u32,
        language: Language,
    ) -> Result<Option<Event>, FetchError> {
        let events = self.get_events(month, day, language).await?;
        Ok(choose_event(events, &mut rand::thread_rng()))
    }
}

pub fn choose_event<R: Rng + ?Sized>(mut events: Vec<Event>, rng: &mut R) -> Option<Event> {
    if events.is_empty() {
        return None;
    }
    let index = rng.gen_range(0..events.len());
    Some(events.swap_remove(index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_API_BASE;
    use crate::models::Year;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn client() -> WikipediaClient {
        WikipediaClient::new(DEFAULT_API_BASE, "test-agent", Duration::from_secs(1)).unwrap()
    }

    fn event(year: i64) -> Event {
        Event {
            year: Some(Year::Number(year)),
            text: Some(format!("event {}", year)),
            pages: vec![],
        }
    }

    #[test]
    fn renders_zero_padded_feed_url() {
        assert_eq!(
            client().events_url(Language::Es, 2, 6),
            "https://es.wikipedia.org/api/rest_v1/feed/onthisday/events/02/06"
        );
        assert_eq!(
            client().events_url(Language::En, 12, 31),
            "https://en.wikipedia.org/api/rest_v1/feed/onthisday/events/12/31"
        );
    }

    #[test]
    fn accepts_format_spec_placeholders() {
        let client = WikipediaClient::new(
            "https://{lang}.wikipedia.org/api/rest_v1/feed/onthisday/{type}/{month:02d}/{day:02d}",
            "test-agent",
            Duration::from_secs(1),
        )
        .unwrap();
        assert_eq!(
            client.events_url(Language::Es, 2, 6),
            "https://es.wikipedia.org/api/rest_v1/feed/onthisday/events/02/06"
        );
    }

    #[test]
    fn choose_event_on_empty_list_is_none() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(choose_event(vec![], &mut rng), None);
    }

    #[test]
    fn choose_event_returns_a_member() {
        let events: Vec<Event> = (1900..1910).map(event).collect();
        for seed in 0..32 {
            let mut rng = StdRng::seed_from_u64(seed);
            let picked = choose_event(events.clone(), &mut rng).unwrap();
            assert!(events.contains(&picked));
        }
    }

    #[test]
    fn choose_event_reaches_every_element() {
        let events: Vec<Event> = (1..=3).map(event).collect();
        let mut rng = StdRng::seed_from_u64(42);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            let picked = choose_event(events.clone(), &mut rng).unwrap();
            seen.insert(picked.year.map(|y| y.to_string()));
        }
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn status_error_keeps_legacy_message_prefix() {
        let err = FetchError::Status {
            status: StatusCode::NOT_FOUND,
            url: "https://es.wikipedia.org/x".into(),
        };
        assert!(err.to_string().starts_with("Error fetching events from Wikipedia"));
        assert!(err.to_string().contains("404"));
    }
}
