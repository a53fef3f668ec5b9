//! Rate-limited HTTP fetch client
//!
//! A fetch is: acquire a global concurrency slot, apply the flat request
//! delay, issue the GET, and run the retry policy over the attempt result.
//! Every failure mode degrades to an absent body; callers cannot tell a 404
//! from a timeout, and the cause is visible only through diagnostics.

use crate::config::CrawlerConfig;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{Client, StatusCode};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Failure of a single fetch attempt, before the retry policy is applied
///
/// Non-200 statuses and transport faults carry the same retry behavior;
/// keeping them distinct here makes the policy a pure decision that tests
/// can drive without real network faults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Server responded with a non-200 status code
    Status(u16),

    /// Connection error, timeout, or malformed response
    Transport(String),
}

impl FetchError {
    /// HTTP 429, the rate-limit signal
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, FetchError::Status(429))
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Status(code) => write!(f, "HTTP {}", code),
            FetchError::Transport(message) => write!(f, "transport error: {}", message),
        }
    }
}

/// Exponential backoff retry policy
///
/// `max_retries` counts retries beyond the initial attempt. The backoff
/// before retry `n` (0-based) is `2^n` seconds: 1s, 2s, 4s, ...
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_retries: u32,
}

impl RetryPolicy {
    /// Delay before retry number `attempt`, or None when retries are exhausted
    pub fn backoff(&self, attempt: u32) -> Option<Duration> {
        if attempt < self.max_retries {
            Some(Duration::from_secs(2u64.saturating_pow(attempt)))
        } else {
            None
        }
    }

    /// Total number of attempts this policy allows (initial + retries)
    pub fn max_attempts(&self) -> u32 {
        self.max_retries + 1
    }
}

/// HTTP fetch client shared by every traversal branch
///
/// Holds the pooled `reqwest` client and the global concurrency semaphore.
/// The semaphore and pool are shared across domains, so one domain's burst
/// can starve another's fetch slots.
pub struct Fetcher {
    client: Client,
    semaphore: Arc<Semaphore>,
    request_delay: Duration,
    policy: RetryPolicy,
}

impl Fetcher {
    /// Builds a fetcher from the crawler configuration
    pub fn new(config: &CrawlerConfig) -> Result<Self, reqwest::Error> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
            ),
        );

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(Duration::from_secs_f64(config.timeout))
            .pool_max_idle_per_host(config.max_connections_per_host)
            .gzip(true)
            .brotli(true)
            .build()?;

        Ok(Self {
            client,
            semaphore: Arc::new(Semaphore::new(config.max_concurrent_requests)),
            request_delay: Duration::from_secs_f64(config.request_delay),
            policy: RetryPolicy {
                max_retries: config.max_retries,
            },
        })
    }

    /// Fetches a URL, returning its body or None once retries are exhausted
    ///
    /// The concurrency slot is held across retries, so backoff sleeps count
    /// against the global in-flight budget. The flat request delay applies
    /// per attempt, after the slot is acquired.
    pub async fn fetch(&self, url: &str) -> Option<String> {
        let _permit = self.semaphore.acquire().await.ok()?;

        let mut attempt = 0;
        loop {
            if !self.request_delay.is_zero() {
                tokio::time::sleep(self.request_delay).await;
            }

            match self.fetch_once(url).await {
                Ok(body) => return Some(body),
                Err(err) => match self.policy.backoff(attempt) {
                    Some(delay) => {
                        tracing::debug!(
                            "Fetch of {} failed ({}), retrying in {:?}",
                            url,
                            err,
                            delay
                        );
                        tokio::time::sleep(delay).await;
                        attempt += 1;
                    }
                    None => {
                        tracing::debug!(
                            "Giving up on {} after {} attempts: {}",
                            url,
                            self.policy.max_attempts(),
                            err
                        );
                        return None;
                    }
                },
            }
        }
    }

    /// Issues one GET attempt and classifies the outcome
    async fn fetch_once(&self, url: &str) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchError::Status(status.as_u16()));
        }

        response
            .text()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))
    }
}
