use thiserror::Error;

/// Errors returned by the Bing lookup adapters.
///
/// Transport failures on the three search services are hard failures: a
/// caller seeing zero results must be able to tell "no matches" apart from
/// "the call never completed". Reverse geocoding never surfaces transport
/// errors — it degrades to an empty result instead, so a failed address
/// backfill cannot block pin placement.
#[derive(Debug, Error)]
pub enum BingError {
    /// Query text or coordinate input failed validation before any network
    /// call was attempted.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success HTTP status.
    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// The SOAP response body could not be parsed as XML.
    #[error("XML parse error: {0}")]
    Xml(#[from] quick_xml::Error),
}
