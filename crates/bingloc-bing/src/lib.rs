//! Adapters for Bing's location search services.
//!
//! Three SOAP lookup services (phonebook, business/point-of-interest, geocode)
//! and one REST reverse-geocode endpoint are normalized into the canonical
//! [`bingloc_core::LocationRecord`] shape. The SOAP serializer collapses a
//! single result into a bare element and multiple results into repeated
//! elements; [`normalize::normalize`] resolves that ambiguity once, centrally,
//! so the adapters never care which shape arrived.

pub mod client;
pub mod envelope;
pub mod error;
pub mod normalize;
pub mod validate;
pub mod xml;

pub use client::{BingClient, Endpoints};
pub use error::BingError;
pub use normalize::normalize;
pub use validate::{validate_coordinates, validate_query};
