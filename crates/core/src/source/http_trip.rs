//! HTTP client for the remote trip/hotel inventory.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use super::{SourceError, TripApi, TripQuery};
use crate::config::TripApiConfig;
use crate::listing::{Paged, Trip};

/// Trip API over HTTP.
///
/// `GET {base_url}/trips/popular` and `GET {base_url}/trips/recommended`,
/// both answering with `{data, page, totalPages, total}`.
pub struct HttpTripApi {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl HttpTripApi {
    pub fn new(config: &TripApiConfig) -> Result<Self, SourceError> {
        let base_url = config.base_url.trim().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(SourceError::NotConfigured(
                "trip API base URL is required".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs as u64))
            .build()
            .map_err(|e| SourceError::NotConfigured(format!("HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url,
            api_key: config.api_key.clone(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/trips/{}", self.base_url, path)
    }

    async fn fetch(&self, path: &str, query: &TripQuery) -> Result<Paged<Trip>, SourceError> {
        let url = self.endpoint(path);
        debug!(url = %url, page = query.page, page_size = query.page_size, "Trip API request");

        let mut request = self.client.get(&url).query(&query_params(query));
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                SourceError::Timeout
            } else {
                SourceError::ConnectionFailed(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SourceError::Api {
                status: status.as_u16(),
                message: body.chars().take(200).collect(),
            });
        }

        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                SourceError::Timeout
            } else {
                SourceError::ConnectionFailed(e.to_string())
            }
        })?;

        parse_page(&body)
    }
}

#[async_trait]
impl TripApi for HttpTripApi {
    fn name(&self) -> &str {
        "trip_http"
    }

    async fn list_popular(&self, query: &TripQuery) -> Result<Paged<Trip>, SourceError> {
        self.fetch("popular", query).await
    }

    async fn list_recommended(&self, query: &TripQuery) -> Result<Paged<Trip>, SourceError> {
        self.fetch("recommended", query).await
    }
}

/// URL parameters for a trip query, in a fixed order.
fn query_params(query: &TripQuery) -> Vec<(&'static str, String)> {
    let mut params = Vec::new();
    if !query.q.is_empty() {
        params.push(("q", query.q.clone()));
    }
    if let Some(city) = &query.city {
        params.push(("city", city.clone()));
    }
    if let Some(country) = &query.country {
        params.push(("country", country.clone()));
    }
    if let Some(min) = query.min_price {
        params.push(("minPrice", min.to_string()));
    }
    if let Some(max) = query.max_price {
        params.push(("maxPrice", max.to_string()));
    }
    if let Some(guests) = query.guests {
        params.push(("guests", guests.to_string()));
    }
    if let Some(start) = query.start_date {
        params.push(("startDate", start.format("%Y-%m-%d").to_string()));
    }
    if let Some(end) = query.end_date {
        params.push(("endDate", end.format("%Y-%m-%d").to_string()));
    }
    params.push(("page", query.page.to_string()));
    params.push(("pageSize", query.page_size.to_string()));
    params.push(("sort", query.sort.as_str().to_string()));
    params
}

fn parse_page(body: &str) -> Result<Paged<Trip>, SourceError> {
    serde_json::from_str(body).map_err(|e| SourceError::Parse(e.to_string()))
}
