//! Session startup path: fetch the raw seed asset, normalize it, expand it
//! into the collection the layers consume.
//!
//! The fetch seam is a trait so tests (and offline tools) can substitute an
//! in-memory source for the HTTP one. A failed load is terminal for the
//! caller: there is no retry here and no substituted default dataset.

use std::fmt;
use std::future::Future;

use bytes::Bytes;
use dataset::{
    CategoryRegistry, ExpandError, ExpandOptions, NormalizeError, PointCollection,
    expand_points, normalize_seed_points,
};

/// Errors surfaced while loading and preparing the point dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    Transport(String),
    Http { status: u16, status_text: String },
    Decode(String),
    Normalize(NormalizeError),
    Expand(ExpandError),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Transport(msg) => write!(f, "seed fetch failed: {msg}"),
            LoadError::Http {
                status,
                status_text,
            } => write!(f, "failed to load seed points: {status} {status_text}"),
            LoadError::Decode(msg) => write!(f, "seed payload is not valid JSON: {msg}"),
            LoadError::Normalize(e) => write!(f, "{e}"),
            LoadError::Expand(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for LoadError {}

impl From<NormalizeError> for LoadError {
    fn from(e: NormalizeError) -> Self {
        LoadError::Normalize(e)
    }
}

impl From<ExpandError> for LoadError {
    fn from(e: ExpandError) -> Self {
        LoadError::Expand(e)
    }
}

/// A fetched seed asset, reduced to what the loader needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedResponse {
    pub status: u16,
    pub status_text: String,
    pub body: Bytes,
}

impl SeedResponse {
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Source of the raw seed asset.
pub trait SeedSource {
    fn fetch_seed(&self) -> impl Future<Output = Result<SeedResponse, LoadError>> + Send;
}

/// Fetches the seed asset over HTTP. Non-2xx responses are returned as
/// ordinary [`SeedResponse`]s; classifying them is the loader's job.
#[derive(Debug, Clone)]
pub struct HttpSeedSource {
    client: reqwest::Client,
    url: String,
}

impl HttpSeedSource {
    pub fn new(url: impl Into<String>) -> Self {
        HttpSeedSource {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }

    pub fn with_client(client: reqwest::Client, url: impl Into<String>) -> Self {
        HttpSeedSource {
            client,
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl SeedSource for HttpSeedSource {
    async fn fetch_seed(&self) -> Result<SeedResponse, LoadError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| LoadError::Transport(e.to_string()))?;
        let status = response.status();
        let status_text = status.canonical_reason().unwrap_or_default().to_string();
        let body = response
            .bytes()
            .await
            .map_err(|e| LoadError::Transport(e.to_string()))?;
        Ok(SeedResponse {
            status: status.as_u16(),
            status_text,
            body,
        })
    }
}

/// Fetch, normalize, and expand the seed dataset.
///
/// The fetch is the single suspension point; everything after it is pure,
/// synchronous transformation, so two loads of the same asset with the same
/// options produce equal collections.
pub async fn load_points<S: SeedSource>(
    source: &S,
    registry: &CategoryRegistry,
    options: &ExpandOptions,
) -> Result<PointCollection, LoadError> {
    let response = source.fetch_seed().await?;
    if !response.ok() {
        return Err(LoadError::Http {
            status: response.status,
            status_text: response.status_text,
        });
    }

    let raw: serde_json::Value =
        serde_json::from_slice(&response.body).map_err(|e| LoadError::Decode(e.to_string()))?;

    let seed = normalize_seed_points(&raw, registry, options.values)?;
    let collection = expand_points(&seed, options)?;
    Ok(collection)
}
