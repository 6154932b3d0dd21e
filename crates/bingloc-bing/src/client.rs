//! HTTP client for the Bing location lookup services.
//!
//! Three SOAP services (Live Search phonebook, Virtual Earth business
//! search, Virtual Earth geocode) plus the REST reverse-geocode endpoint.
//! Each lookup is a single stateless request/response round trip: the
//! response is parsed into a raw JSON fragment, run through
//! [`crate::normalize::normalize`], and mapped into
//! [`LocationRecord`]s, silently dropping entries that are missing a
//! title/name or usable coordinates.

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode};
use serde_json::Value;

use bingloc_core::{AppConfig, LocationRecord, LocationSource};

use crate::envelope;
use crate::error::BingError;
use crate::normalize::normalize;
use crate::validate::{validate_coordinates, validate_query};
use crate::xml::{to_value, value_at};

const PHONEBOOK_ACTION: &str =
    "http://schemas.microsoft.com/LiveSearch/2008/03/Search/SearchService/Search";
const BUSINESS_ACTION: &str =
    "http://dev.virtualearth.net/webservices/v1/search/contracts/ISearchService/Search";
const GEOCODE_ACTION: &str =
    "http://dev.virtualearth.net/webservices/v1/geocode/contracts/IGeocodeService/Geocode";

/// Service endpoint URLs, overridable to point at a mock server in tests.
#[derive(Debug, Clone)]
pub struct Endpoints {
    pub phonebook: String,
    pub business: String,
    pub geocode: String,
    /// Base of the REST locations API; `/Locations/{lat},{lng}` is appended.
    pub reverse: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Endpoints {
            phonebook: "http://api.bing.net/soap.asmx".to_string(),
            business: "http://dev.virtualearth.net/webservices/v1/SearchService/SearchService.svc"
                .to_string(),
            geocode: "http://dev.virtualearth.net/webservices/v1/GeocodeService/GeocodeService.svc"
                .to_string(),
            reverse: "http://dev.virtualearth.net/REST/v1".to_string(),
        }
    }
}

impl Endpoints {
    /// Derives all four endpoints from one base URL (a wiremock server).
    #[must_use]
    pub fn mock(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Endpoints {
            phonebook: format!("{base}/soap/phonebook"),
            business: format!("{base}/soap/business"),
            geocode: format!("{base}/soap/geocode"),
            reverse: format!("{base}/REST/v1"),
        }
    }
}

/// Client for the Bing lookup services.
///
/// One `reqwest::Client` is shared across all calls, so connection reuse
/// happens per upstream host without any cross-request state of our own.
/// Lookups may run concurrently; nothing here is mutated after construction.
pub struct BingClient {
    http: Client,
    app_id: String,
    map_key: String,
    limit: u32,
    endpoints: Endpoints,
}

impl BingClient {
    /// Creates a client pointed at the production Bing services.
    ///
    /// # Errors
    ///
    /// Returns [`BingError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(config: &AppConfig) -> Result<Self, BingError> {
        Self::with_endpoints(config, Endpoints::default())
    }

    /// Creates a client with custom endpoints (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`BingError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn with_endpoints(config: &AppConfig, endpoints: Endpoints) -> Result<Self, BingError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.response_timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(BingClient {
            http,
            app_id: config.app_id.clone(),
            map_key: config.map_key.clone(),
            limit: config.items_per_category,
            endpoints,
        })
    }

    /// Searches the Live Search phonebook service.
    ///
    /// Accepted entries need a non-empty `Title` and both coordinates;
    /// everything else is dropped, order preserved. The phonebook service
    /// has no business id, so `external_id` is always empty.
    ///
    /// # Errors
    ///
    /// - [`BingError::InvalidInput`] for an empty query (no call is made).
    /// - [`BingError::Http`] / [`BingError::UnexpectedStatus`] on transport
    ///   failure.
    /// - [`BingError::Xml`] when the response body is not well-formed XML.
    pub async fn phonebook_lookup(&self, query: &str) -> Result<Vec<LocationRecord>, BingError> {
        let query = validate_query(query)?;
        let body = envelope::phonebook_search(&self.app_id, query, self.limit);
        let response = self
            .soap_call(&self.endpoints.phonebook, PHONEBOOK_ACTION, body)
            .await?;

        let fragment = value_at(
            &response,
            &[
                "Envelope",
                "Body",
                "SearchResponse",
                "parameters",
                "Phonebook",
                "Results",
                "PhonebookResult",
            ],
        );

        let mut records = Vec::new();
        for item in fragment.map(normalize).unwrap_or_default() {
            let Some(title) = non_empty_text(item.get("Title")) else {
                continue;
            };
            let (Some(latitude), Some(longitude)) = (
                coordinate(item.get("Latitude")),
                coordinate(item.get("Longitude")),
            ) else {
                continue;
            };
            records.push(LocationRecord {
                latitude,
                longitude,
                description: title.to_string(),
                address: non_empty_text(item.get("Address"))
                    .map(str::to_string)
                    .unwrap_or_default(),
                external_id: String::new(),
                source: LocationSource::Phonebook,
            });
        }
        tracing::debug!(count = records.len(), "phonebook lookup complete");
        Ok(records)
    }

    /// Searches the Virtual Earth business (point-of-interest) service.
    ///
    /// Accepted entries need a non-empty `Name` and at least one nested
    /// geocode location; the first nested location's coordinates win. The
    /// nested location list has the same one-vs-many ambiguity as the outer
    /// result list and is normalized the same way.
    ///
    /// # Errors
    ///
    /// Same as [`BingClient::phonebook_lookup`].
    pub async fn business_lookup(&self, query: &str) -> Result<Vec<LocationRecord>, BingError> {
        let query = validate_query(query)?;
        let body = envelope::business_search(&self.map_key, query, self.limit);
        let response = self
            .soap_call(&self.endpoints.business, BUSINESS_ACTION, body)
            .await?;

        let fragment = value_at(
            &response,
            &[
                "Envelope",
                "Body",
                "SearchResponse",
                "SearchResult",
                "ResultSets",
                "SearchResultSet",
                "Results",
                "SearchResultBase",
            ],
        );

        let mut records = Vec::new();
        for item in fragment.map(normalize).unwrap_or_default() {
            let Some(name) = non_empty_text(item.get("Name")) else {
                continue;
            };
            let Some((latitude, longitude)) =
                first_location(value_at(&item, &["LocationData", "Locations", "GeocodeLocation"]))
            else {
                continue;
            };
            records.push(LocationRecord {
                latitude,
                longitude,
                description: name.to_string(),
                address: non_empty_text(value_at(&item, &["Address", "FormattedAddress"]))
                    .map(str::to_string)
                    .unwrap_or_default(),
                external_id: non_empty_text(item.get("Id"))
                    .map(str::to_string)
                    .unwrap_or_default(),
                source: LocationSource::PointOfInterest,
            });
        }
        tracing::debug!(count = records.len(), "business lookup complete");
        Ok(records)
    }

    /// Geocodes a free-text address via the Virtual Earth geocode service.
    ///
    /// The service returns no display name, so `description` is always the
    /// original query text.
    ///
    /// # Errors
    ///
    /// Same as [`BingClient::phonebook_lookup`].
    pub async fn geocode_lookup(&self, query: &str) -> Result<Vec<LocationRecord>, BingError> {
        let query = validate_query(query)?;
        let body = envelope::geocode_search(&self.map_key, query, self.limit);
        let response = self
            .soap_call(&self.endpoints.geocode, GEOCODE_ACTION, body)
            .await?;

        let fragment = value_at(
            &response,
            &[
                "Envelope",
                "Body",
                "GeocodeResponse",
                "GeocodeResult",
                "Results",
                "GeocodeResult",
            ],
        );

        let mut records = Vec::new();
        for item in fragment.map(normalize).unwrap_or_default() {
            let Some((latitude, longitude)) =
                first_location(value_at(&item, &["Locations", "GeocodeLocation"]))
            else {
                continue;
            };
            records.push(LocationRecord {
                latitude,
                longitude,
                description: query.to_string(),
                address: non_empty_text(value_at(&item, &["Address", "FormattedAddress"]))
                    .map(str::to_string)
                    .unwrap_or_default(),
                external_id: String::new(),
                source: LocationSource::Address,
            });
        }
        tracing::debug!(count = records.len(), "geocode lookup complete");
        Ok(records)
    }

    /// Resolves coordinates to nearby address resources via the REST API.
    ///
    /// Any transport or parse problem degrades to an empty result so a
    /// failed address backfill never blocks pin placement; only coordinate
    /// validation is a hard error. On success the first result set's
    /// resources are returned as-is — the caller reads their `name` fields.
    ///
    /// # Errors
    ///
    /// Returns [`BingError::InvalidInput`] when the coordinates are out of
    /// range; no network call is attempted in that case.
    pub async fn reverse_geocode(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<Vec<Value>, BingError> {
        validate_coordinates(latitude, longitude)?;

        let url = format!(
            "{}/Locations/{latitude},{longitude}",
            self.endpoints.reverse.trim_end_matches('/')
        );
        let request = self
            .http
            .get(&url)
            .query(&[("output", "json"), ("key", self.map_key.as_str())]);

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(error = %e, "reverse geocode request failed");
                return Ok(Vec::new());
            }
        };
        if response.status() != StatusCode::OK {
            tracing::warn!(status = %response.status(), "reverse geocode returned non-200");
            return Ok(Vec::new());
        }
        let body: Value = match response.json().await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(error = %e, "reverse geocode body was not valid JSON");
                return Ok(Vec::new());
            }
        };

        let resources = value_at(&body, &["resourceSets"])
            .and_then(|sets| sets.get(0))
            .and_then(|set| set.get("resources"))
            .and_then(Value::as_array);
        Ok(resources.cloned().unwrap_or_default())
    }

    /// Posts a SOAP request document and parses the response body into a
    /// JSON value.
    async fn soap_call(
        &self,
        url: &str,
        action: &str,
        body: String,
    ) -> Result<Value, BingError> {
        let response = self
            .http
            .post(url)
            .header(CONTENT_TYPE, "text/xml; charset=utf-8")
            .header("SOAPAction", action)
            .body(body)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(BingError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        let text = response.text().await?;
        Ok(to_value(&text)?)
    }
}

/// Reads a trimmed, non-empty string field.
fn non_empty_text(value: Option<&Value>) -> Option<&str> {
    let text = value?.as_str()?.trim();
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Coerces a coordinate that may arrive as a number or as XML text.
fn coordinate(value: Option<&Value>) -> Option<f64> {
    let value = value?;
    let number = value
        .as_f64()
        .or_else(|| value.as_str().and_then(|s| s.trim().parse().ok()))?;
    if number.is_finite() {
        Some(number)
    } else {
        None
    }
}

/// Normalizes a nested geocode-location fragment and takes the first
/// entry's coordinate pair.
fn first_location(fragment: Option<&Value>) -> Option<(f64, f64)> {
    let locations = normalize(fragment?);
    let first = locations.first()?;
    let latitude = coordinate(first.get("Latitude"))?;
    let longitude = coordinate(first.get("Longitude"))?;
    Some((latitude, longitude))
}
