//! Hand-built SOAP request documents for the Bing lookup services.
//!
//! The Virtual Earth search and geocode services require namespace prefixes
//! on request elements that a generic SOAP serializer does not produce, so
//! these requests are assembled as raw payloads from small templates. Every
//! piece of caller-supplied text is escaped with
//! [`crate::xml::escape_text`] before insertion; the templates never see
//! unescaped input.

use crate::xml::escape_text;

/// Live Search phonebook request: query, application id, a phonebook source
/// filter, and the per-category result count.
#[must_use]
pub fn phonebook_search(app_id: &str, query: &str, count: u32) -> String {
    let app_id = escape_text(app_id);
    let query = escape_text(query);
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">
  <soap:Body>
    <SearchRequest xmlns="http://schemas.microsoft.com/LiveSearch/2008/03/Search">
      <parameters>
        <AppId>{app_id}</AppId>
        <Query>{query}</Query>
        <Sources><SourceType>Phonebook</SourceType></Sources>
        <Phonebook><Count>{count}</Count></Phonebook>
      </parameters>
    </SearchRequest>
  </soap:Body>
</soap:Envelope>"#
    )
}

/// Virtual Earth business search request with the contracts/common/search
/// namespace prefixes the service insists on.
#[must_use]
pub fn business_search(map_key: &str, query: &str, count: u32) -> String {
    let map_key = escape_text(map_key);
    let query = escape_text(query);
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">
  <soap:Body>
    <Search xmlns="http://dev.virtualearth.net/webservices/v1/search/contracts" xmlns:q1="http://dev.virtualearth.net/webservices/v1/common" xmlns:q2="http://dev.virtualearth.net/webservices/v1/search">
      <request>
        <q1:Credentials>
          <q1:ApplicationId>{map_key}</q1:ApplicationId>
        </q1:Credentials>
        <q2:Query>{query}</q2:Query>
        <q2:SearchOptions><q2:Count>{count}</q2:Count></q2:SearchOptions>
      </request>
    </Search>
  </soap:Body>
</soap:Envelope>"#
    )
}

/// Virtual Earth geocode request; same namespacing strategy as
/// [`business_search`], with an empty filter set.
#[must_use]
pub fn geocode_search(map_key: &str, query: &str, count: u32) -> String {
    let map_key = escape_text(map_key);
    let query = escape_text(query);
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">
  <soap:Body>
    <Geocode xmlns="http://dev.virtualearth.net/webservices/v1/geocode/contracts" xmlns:q1="http://dev.virtualearth.net/webservices/v1/common" xmlns:q2="http://dev.virtualearth.net/webservices/v1/geocode">
      <request>
        <q1:Credentials>
          <q1:ApplicationId>{map_key}</q1:ApplicationId>
        </q1:Credentials>
        <q2:Options><q2:Count>{count}</q2:Count><q2:Filters/></q2:Options>
        <q2:Query>{query}</q2:Query>
      </request>
    </Geocode>
  </soap:Body>
</soap:Envelope>"#
    )
}
