//! Request forwarding to the upstream provider.
//!
//! # Responsibilities
//! - Build the upstream URL and query for each route
//! - Inject the credential
//! - Make exactly one upstream call per request, no retries
//! - Map every failure to a [`ForwardError`]

use std::time::{Duration, Instant};

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use url::Url;

use crate::config::{ApiKey, EmptyResultsPolicy, ProxyConfig, UpstreamTargets};
use crate::forwarder::error::{ForwardError, UpstreamFailure, DATE_REQUIRED, QUERY_REQUIRED};
use crate::forwarder::route::Route;
use crate::observability::metrics::{self, Outcome};

/// Media types requested from the search upstream.
const MEDIA_TYPES: &str = "image,video";

/// Search result as returned to clients: only `collection.items` survives.
///
/// Deserializing the upstream payload into this type drops every other field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaSearchResponse {
    pub collection: MediaCollection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaCollection {
    pub items: Vec<Value>,
}

/// Error building a [`Forwarder`].
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("invalid upstream target `{name}`: {source}")]
    Target {
        name: &'static str,
        #[source]
        source: url::ParseError,
    },
}

#[derive(Debug, Clone)]
struct Targets {
    media_search: Url,
    epic: Url,
    apod: Url,
}

impl Targets {
    fn parse(targets: &UpstreamTargets) -> Result<Self, BuildError> {
        let parse = |name: &'static str, raw: &str| {
            Url::parse(raw).map_err(|source| BuildError::Target { name, source })
        };
        Ok(Self {
            media_search: parse("media_search", &targets.media_search)?,
            epic: parse("epic", &targets.epic)?,
            apod: parse("apod", &targets.apod)?,
        })
    }
}

/// Forwards the four supported operations to the upstream provider.
///
/// Immutable after construction; clone freely (the HTTP client is
/// reference-counted internally).
#[derive(Debug, Clone)]
pub struct Forwarder {
    client: Client,
    targets: Targets,
    api_key: ApiKey,
    send_api_key: bool,
    empty_results: EmptyResultsPolicy,
}

impl Forwarder {
    /// Build a forwarder from the proxy configuration.
    pub fn new(config: &ProxyConfig) -> Result<Self, BuildError> {
        let upstream = &config.upstream;

        let mut builder = Client::builder().user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));
        if upstream.timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(upstream.timeout_secs));
        }

        Ok(Self {
            client: builder.build()?,
            targets: Targets::parse(&upstream.targets)?,
            api_key: upstream.api_key.clone(),
            send_api_key: upstream.send_api_key,
            empty_results: config.search.empty_results,
        })
    }

    /// Search the media library.
    ///
    /// `query` must be present and non-empty; otherwise no upstream call is made.
    pub async fn search_media(
        &self,
        query: Option<&str>,
    ) -> Result<MediaSearchResponse, ForwardError> {
        let route = Route::MediaSearch;
        let query = require(route, query, QUERY_REQUIRED)?;

        let request = self
            .client
            .get(self.targets.media_search.clone())
            .query(&[("q", query), ("media_type", MEDIA_TYPES)]);

        let start = Instant::now();
        let response: MediaSearchResponse = self.forward(route, request, start).await?;

        if response.collection.items.is_empty()
            && self.empty_results == EmptyResultsPolicy::NotFound
        {
            tracing::debug!(route = %route, "Search returned no items");
            metrics::record_upstream(route.name(), Outcome::NoResults, start);
            return Err(ForwardError::NoResults);
        }

        metrics::record_upstream(route.name(), Outcome::Success, start);
        Ok(response)
    }

    /// Latest EPIC snapshot list, verbatim.
    pub async fn epic_snapshots(&self) -> Result<Value, ForwardError> {
        let request = self.client.get(self.targets.epic.clone());
        self.forward_verbatim(Route::EpicSnapshots, request).await
    }

    /// EPIC snapshots for `date` (`YYYY-MM-DD`, not validated), verbatim.
    pub async fn epic_snapshots_by_date(&self, date: Option<&str>) -> Result<Value, ForwardError> {
        let route = Route::EpicSnapshotsByDate;
        let date = require(route, date, DATE_REQUIRED)?;

        let url = append_segment(&self.targets.epic, date).map_err(|source| {
            tracing::error!(route = %route, error = %source, "Invalid upstream target");
            ForwardError::Upstream { route, source }
        })?;

        self.forward_verbatim(route, self.client.get(url)).await
    }

    /// Astronomy Picture of the Day, verbatim.
    pub async fn apod(&self) -> Result<Value, ForwardError> {
        let request = self.client.get(self.targets.apod.clone());
        self.forward_verbatim(Route::Apod, request).await
    }

    async fn forward_verbatim(
        &self,
        route: Route,
        request: RequestBuilder,
    ) -> Result<Value, ForwardError> {
        let start = Instant::now();
        let payload = self.forward(route, request, start).await?;
        metrics::record_upstream(route.name(), Outcome::Success, start);
        Ok(payload)
    }

    /// Send `request` with the credential attached and decode the body.
    ///
    /// Failures are logged and recorded here; successes are recorded by the
    /// caller once it has applied route-specific checks.
    async fn forward<T: DeserializeOwned>(
        &self,
        route: Route,
        request: RequestBuilder,
        start: Instant,
    ) -> Result<T, ForwardError> {
        let request = if self.send_api_key {
            request.query(&[("api_key", self.api_key.expose())])
        } else {
            request
        };

        tracing::debug!(route = %route, "Forwarding request upstream");

        match call(request).await {
            Ok(payload) => Ok(payload),
            Err(source) => {
                tracing::error!(
                    route = %route,
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    error = %source,
                    "Upstream request failed"
                );
                metrics::record_upstream(route.name(), Outcome::Error, start);
                Err(ForwardError::Upstream { route, source })
            }
        }
    }
}

async fn call<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, UpstreamFailure> {
    let response = request.send().await?.error_for_status()?;
    let body = response.bytes().await?;
    Ok(serde_json::from_slice(&body)?)
}

fn require<'a>(
    route: Route,
    value: Option<&'a str>,
    message: &'static str,
) -> Result<&'a str, ForwardError> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => {
            tracing::debug!(route = %route, "Missing required parameter");
            metrics::record_rejected(route.name());
            Err(ForwardError::MissingParameter(message))
        }
    }
}

/// Append `segment` to the path of `base` as one percent-encoded segment.
fn append_segment(base: &Url, segment: &str) -> Result<Url, UpstreamFailure> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| UpstreamFailure::InvalidTarget)?
        .pop_if_empty()
        .push(segment);
    Ok(url)
}
