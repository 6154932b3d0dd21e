//! One-vs-many disambiguation of raw upstream result fragments.
//!
//! Bing's SOAP serializer collapses a single result into a bare mapping and
//! N>1 results into a sequence, with no discriminator in the payload. Every
//! adapter runs the raw fragment through [`normalize`] before reading fields,
//! so the ambiguity is resolved in exactly one place.

use serde_json::Value;

/// Returns a raw fragment as a uniform ordered sequence of results.
///
/// - A sequence is returned as its elements, order preserved.
/// - A mapping whose keys are exactly the indices `0..n-1` is an
///   already-indexed sequence; its values are returned ordered by index.
/// - Any other mapping is a single result and comes back as a one-element
///   sequence wrapping the whole fragment.
/// - Anything that is not a container yields an empty sequence.
#[must_use]
pub fn normalize(fragment: &Value) -> Vec<Value> {
    match fragment {
        Value::Array(items) => items.clone(),
        Value::Object(map) => {
            if let Some(indexed) = as_indexed_sequence(map) {
                indexed
            } else {
                vec![Value::Object(map.clone())]
            }
        }
        _ => Vec::new(),
    }
}

/// Interprets a mapping as a sequence when its keys are exactly `0..n-1`.
///
/// Key order in the mapping is not significant; elements are returned ordered
/// by their numeric index. An empty mapping is not a sequence.
fn as_indexed_sequence(map: &serde_json::Map<String, Value>) -> Option<Vec<Value>> {
    if map.is_empty() {
        return None;
    }
    let mut indexed: Vec<(usize, &Value)> = Vec::with_capacity(map.len());
    for (key, value) in map {
        // Reject keys like "01" that parse but are not canonical indices.
        let index: usize = key.parse().ok()?;
        if index.to_string() != *key {
            return None;
        }
        indexed.push((index, value));
    }
    indexed.sort_by_key(|(index, _)| *index);
    for (position, (index, _)) in indexed.iter().enumerate() {
        if position != *index {
            return None;
        }
    }
    Some(indexed.into_iter().map(|(_, value)| value.clone()).collect())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn array_passes_through_in_order() {
        let fragment = json!([{"Title": "a"}, {"Title": "b"}, {"Title": "c"}]);
        let results = normalize(&fragment);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0]["Title"], "a");
        assert_eq!(results[2]["Title"], "c");
    }

    #[test]
    fn plain_object_wraps_into_single_element() {
        let fragment = json!({"Title": "Cafe", "Latitude": "1.5"});
        let results = normalize(&fragment);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0], fragment);
    }

    #[test]
    fn indexed_object_is_treated_as_sequence() {
        let fragment = json!({"0": {"Title": "a"}, "1": {"Title": "b"}});
        let results = normalize(&fragment);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0]["Title"], "a");
        assert_eq!(results[1]["Title"], "b");
    }

    #[test]
    fn indexed_object_orders_by_index_not_key_text() {
        // Twelve entries so lexicographic key order ("10" < "2") would differ
        // from numeric index order.
        let mut map = serde_json::Map::new();
        for i in 0..12 {
            map.insert(i.to_string(), json!(i));
        }
        let results = normalize(&Value::Object(map));
        assert_eq!(results.len(), 12);
        for (i, value) in results.iter().enumerate() {
            assert_eq!(value, &json!(i));
        }
    }

    #[test]
    fn object_with_index_gap_is_a_single_result() {
        let fragment = json!({"0": "a", "2": "b"});
        let results = normalize(&fragment);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0], fragment);
    }

    #[test]
    fn object_with_non_canonical_index_is_a_single_result() {
        let fragment = json!({"00": "a", "1": "b"});
        let results = normalize(&fragment);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0], fragment);
    }

    #[test]
    fn object_with_mixed_keys_is_a_single_result() {
        let fragment = json!({"0": "a", "Title": "b"});
        let results = normalize(&fragment);
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn non_containers_yield_empty() {
        assert!(normalize(&json!("just a string")).is_empty());
        assert!(normalize(&json!(42)).is_empty());
        assert!(normalize(&json!(true)).is_empty());
        assert!(normalize(&Value::Null).is_empty());
    }

    #[test]
    fn empty_containers() {
        assert!(normalize(&json!([])).is_empty());
        // An empty mapping has no fields to read but is still "one result".
        assert_eq!(normalize(&json!({})).len(), 1);
    }
}
