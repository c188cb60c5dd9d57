//! Wayback Machine timemap API query construction and response parsing.
//!
//! The timemap endpoint indexes every capture under a URL prefix. With
//! `output=json` it answers with a table: the first row names the columns
//! (`fl=` parameter), every following row is one capture.

mod response;

pub use response::{FileRecord, TimemapError, TimemapTable};

use std::fmt;

use url::Url;

/// Wayback Machine timemap API base URL.
pub const WAYBACK_TIMEMAP_URL: &str = "https://web.archive.org/web/timemap/";

/// Columns requested from the timemap (`fl=` parameter).
pub const TIMEMAP_FIELDS: &[&str] = &[
    "original",
    "mimetype",
    "timestamp",
    "endtimestamp",
    "groupcount",
    "uniqcount",
];

/// Excludes captures that answered with a 4xx or 5xx status.
pub const STATUS_FILTER: &str = "!statuscode:[45]..";

/// Maximum number of index rows requested in one query.
pub const TIMEMAP_LIMIT: usize = 100_000;

/// Scheme used for the target URL prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scheme {
    #[default]
    Https,
    Http,
}

impl Scheme {
    /// Resolve the `--http` flag.
    ///
    /// The flag may be given bare or with a value; any non-empty value selects
    /// plain HTTP. An absent or empty value keeps the HTTPS default.
    pub fn from_http_flag(flag: Option<&str>) -> Self {
        match flag {
            Some(value) if !value.is_empty() => Self::Http,
            _ => Self::Https,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Https => "https",
            Self::Http => "http",
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered timemap query parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(&'static str, String)>,
}

impl QueryParams {
    /// Get a parameter value by key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Iterate over `(key, value)` pairs in request order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (*k, v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// A complete timemap query for every capture under a domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimemapQuery {
    target: String,
    params: QueryParams,
}

impl TimemapQuery {
    /// Build the query for `domain`.
    ///
    /// `cache_buster` is sent as the `_` parameter so intermediate caches
    /// never serve a stale index; callers normally pass the current time in
    /// milliseconds.
    pub fn new(domain: &str, scheme: Scheme, cache_buster: i64) -> Self {
        let target = format!("{}://{}", scheme, domain);

        let pairs = vec![
            ("url", target.clone()),
            ("matchType", "prefix".to_string()),
            ("collapse", "urlkey".to_string()),
            ("output", "json".to_string()),
            ("fl", TIMEMAP_FIELDS.join(",")),
            ("filter", STATUS_FILTER.to_string()),
            ("limit", TIMEMAP_LIMIT.to_string()),
            ("_", cache_buster.to_string()),
        ];

        Self {
            target,
            params: QueryParams { pairs },
        }
    }

    /// The target URL prefix (`<scheme>://<domain>`).
    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn params(&self) -> &QueryParams {
        &self.params
    }

    /// Render the full GET URL against a timemap endpoint.
    pub fn request_url(&self, endpoint: &Url) -> Url {
        let mut url = endpoint.clone();
        url.query_pairs_mut().extend_pairs(self.params.iter());
        url
    }
}
