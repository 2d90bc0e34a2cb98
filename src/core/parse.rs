//! Field extraction from the geocoding response.
//!
//! Fields are taken from the first place they occur in the document, the
//! same way a text scan of the body would find them. `geometry` is the first
//! object under that key, read only up to the first closing brace inside it;
//! `country` and `city` are the first non-empty string values anywhere in the
//! body.

use crate::core::normalize::strip_call_token;
use crate::domain::model::{GeocodeResult, ParseOutcome};
use crate::utils::error::Result;
use serde_json::{Number, Value};

/// What the API sends back for a query with no matches.
pub const EMPTY_RESULTS_MARKER: &str = "\"results\":[]";

pub fn parse_response(body: &str, fallback_name: &str) -> Result<ParseOutcome> {
    if body.contains(EMPTY_RESULTS_MARKER) {
        return Ok(ParseOutcome::Empty);
    }

    let document: Value = serde_json::from_str(body)?;
    if let Some(Value::Array(results)) = document.get("results") {
        if results.is_empty() {
            return Ok(ParseOutcome::Empty);
        }
    }

    let (latitude, longitude) = match find_first(&document, "geometry", &Value::is_object) {
        Some(geometry) => {
            let mut numbers = Vec::new();
            numbers_until_first_close(geometry, &mut numbers);
            (
                first_number(&numbers, "lat"),
                first_number(&numbers, "lng"),
            )
        }
        None => (String::new(), String::new()),
    };

    let country = first_string(&document, "country").unwrap_or_default();
    let fetched_city = first_string(&document, "city").unwrap_or_default();

    let city = if fetched_city.is_empty() {
        fallback_name
    } else {
        fetched_city.as_str()
    };

    Ok(ParseOutcome::Found(GeocodeResult {
        resolved_city_name: strip_call_token(city),
        country,
        latitude,
        longitude,
    }))
}

/// Depth-first, document order. Keys are checked before their values.
fn find_first<'a>(value: &'a Value, key: &str, accept: &dyn Fn(&Value) -> bool) -> Option<&'a Value> {
    match value {
        Value::Object(map) => {
            for (k, v) in map {
                if k == key && accept(v) {
                    return Some(v);
                }
                if let Some(found) = find_first(v, key, accept) {
                    return Some(found);
                }
            }
            None
        }
        Value::Array(items) => items.iter().find_map(|item| find_first(item, key, accept)),
        _ => None,
    }
}

fn first_string(document: &Value, key: &str) -> Option<String> {
    find_first(document, key, &|v: &Value| matches!(v, Value::String(s) if !s.is_empty()))
        .and_then(Value::as_str)
        .map(str::to_string)
}

/// Collects `key: number` pairs in document order until the first object
/// closes. Returns true once that happened.
fn numbers_until_first_close<'a>(
    value: &'a Value,
    out: &mut Vec<(&'a str, &'a Number)>,
) -> bool {
    match value {
        Value::Object(map) => {
            for (k, v) in map {
                if let Value::Number(n) = v {
                    out.push((k.as_str(), n));
                }
                if numbers_until_first_close(v, out) {
                    return true;
                }
            }
            true
        }
        Value::Array(items) => items.iter().any(|item| numbers_until_first_close(item, out)),
        _ => false,
    }
}

fn first_number(numbers: &[(&str, &Number)], key: &str) -> String {
    numbers
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, n)| n.to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn found(outcome: ParseOutcome) -> GeocodeResult {
        match outcome {
            ParseOutcome::Found(result) => result,
            ParseOutcome::Empty => panic!("expected a result"),
        }
    }

    #[test]
    fn test_extracts_opencage_fields() {
        let body = json!({
            "documentation": "https://opencagedata.com/api",
            "results": [{
                "annotations": {"timezone": {"name": "Europe/London"}},
                "components": {"city": "London", "country": "United Kingdom", "country_code": "gb"},
                "formatted": "London, United Kingdom",
                "geometry": {"lat": 51.5074, "lng": -0.1278}
            }, {
                "components": {"city": "London", "country": "Canada"},
                "geometry": {"lat": 42.98, "lng": -81.24}
            }],
            "status": {"code": 200, "message": "OK"}
        })
        .to_string();

        let result = found(parse_response(&body, "london").unwrap());

        assert_eq!(result.resolved_city_name, "London");
        assert_eq!(result.country, "United Kingdom");
        assert_eq!(result.latitude, "51.5074");
        assert_eq!(result.longitude, "-0.1278");
    }

    #[test]
    fn test_empty_results_marker() {
        let body = r#"{"results":[],"status":{"code":200},"total_results":0}"#;
        assert_eq!(parse_response(body, "Nowhere").unwrap(), ParseOutcome::Empty);

        let spaced = "{\"results\": [ ], \"total_results\": 0}";
        assert_eq!(parse_response(spaced, "Nowhere").unwrap(), ParseOutcome::Empty);
    }

    #[test]
    fn test_missing_city_falls_back_to_input() {
        let body = r#"{"results":[{"components":{"town":"Hay","country":"Wales"},"geometry":{"lat":52,"lng":-3.1}}]}"#;
        let result = found(parse_response(body, "hay on wye").unwrap());

        assert_eq!(result.resolved_city_name, "hay on wye");
        assert_eq!(result.country, "Wales");
        assert_eq!(result.latitude, "52");
        assert_eq!(result.longitude, "-3.1");
    }

    #[test]
    fn test_empty_city_string_is_skipped() {
        let body = r#"{"results":[{"components":{"city":""}},{"components":{"city":"Lyon"}}]}"#;
        assert_eq!(found(parse_response(body, "x").unwrap()).resolved_city_name, "Lyon");
    }

    #[test]
    fn test_missing_geometry_leaves_coordinates_empty() {
        let body = r#"{"results":[{"components":{"city":"Rome","country":"Italy"}}]}"#;
        let result = found(parse_response(body, "rome").unwrap());

        assert_eq!(result.latitude, "");
        assert_eq!(result.longitude, "");
        assert_eq!(result.country, "Italy");
    }

    #[test]
    fn test_geometry_read_up_to_first_closing_brace() {
        let body = r#"{"results":[
            {"geometry":{"lat":1.5,"bounds":{"x":1},"lng":2.5}},
            {"geometry":{"lat":10.5,"lng":20}}
        ]}"#;
        let result = found(parse_response(body, "x").unwrap());

        assert_eq!(result.latitude, "1.5");
        assert_eq!(result.longitude, "");
    }

    #[test]
    fn test_geometry_nested_block_is_scanned_before_close() {
        let body = r#"{"results":[
            {"geometry":{"bounds":{"lat":-3,"lng":7}},"components":{}},
            {"geometry":{"lat":10.5,"lng":20}}
        ]}"#;
        let result = found(parse_response(body, "x").unwrap());

        assert_eq!(result.latitude, "-3");
        assert_eq!(result.longitude, "7");
    }

    #[test]
    fn test_coordinate_text_kept_as_sent() {
        let body = r#"{"results":[{"geometry":{"lat":48.8566000,"lng":2.3522}}]}"#;
        let result = found(parse_response(body, "paris").unwrap());

        assert_eq!(result.latitude, "48.8566000");
        assert_eq!(result.longitude, "2.3522");
    }

    #[test]
    fn test_string_coordinates_are_ignored() {
        let body = r#"{"results":[{"geometry":{"lat":"51.5","lng":-0.12}}]}"#;
        let result = found(parse_response(body, "x").unwrap());

        assert_eq!(result.latitude, "");
        assert_eq!(result.longitude, "-0.12");
    }

    #[test]
    fn test_call_token_stripped_from_resolved_name() {
        let body = r#"{"results":[{"components":{"country":"France"}}]}"#;
        let result = found(parse_response(body, "Execute Paris").unwrap());
        assert_eq!(result.resolved_city_name, "Paris");
    }

    #[test]
    fn test_malformed_body_is_error() {
        assert!(parse_response("<html>502 Bad Gateway</html>", "x").is_err());
    }
}
