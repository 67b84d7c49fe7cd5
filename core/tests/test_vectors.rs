//! Verify URL building and response decoding against JSON test vectors
//! stored in `test-vectors/`.
//!
//! Each vector describes an input and the expected outcome. Expected bodies
//! are compared as parsed JSON, not raw strings, to avoid false negatives
//! from field ordering.

use shop_core::{ApiClient, ApiError, Category, HttpMethod, HttpResponse};

fn headers_from(value: &serde_json::Value) -> Vec<(String, String)> {
    value
        .as_array()
        .unwrap()
        .iter()
        .map(|h| {
            let pair = h.as_array().unwrap();
            (pair[0].as_str().unwrap().to_string(), pair[1].as_str().unwrap().to_string())
        })
        .collect()
}

// ---------------------------------------------------------------------------
// URLs
// ---------------------------------------------------------------------------

#[test]
fn url_test_vectors() {
    let raw = include_str!("../../test-vectors/urls.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = ApiClient::new(vectors["origin"].as_str().unwrap());
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let endpoint = case["endpoint"].as_str().unwrap();
        let expected = case["expected_url"].as_str().unwrap();

        assert_eq!(c.api_url(endpoint), expected, "{name}: url");

        let req = c.build_request::<()>(endpoint, HttpMethod::Get, None).unwrap();
        assert_eq!(req.url, expected, "{name}: request url");
    }
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

#[test]
fn response_test_vectors() {
    let raw = include_str!("../../test-vectors/responses.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = ApiClient::new("http://localhost:8080");
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let sim = &case["response"];
        let status = sim["status"].as_u64().unwrap() as u16;
        let mut response = HttpResponse::new(status, sim["body"].as_str().unwrap());
        response.headers = headers_from(&sim["headers"]);

        let outcome = c.parse_response(response);
        let expected = &case["expected"];
        if let Some(ok) = expected.get("ok") {
            let value = outcome.unwrap_or_else(|e| panic!("{name}: unexpected failure {e}"));
            let value = value.unwrap_or(serde_json::Value::Null);
            assert_eq!(&value, ok, "{name}: parsed body");
        } else {
            let message = expected["failure"].as_str().unwrap();
            let err = outcome.unwrap_err();
            assert_eq!(
                err,
                ApiError::RequestFailure {
                    status,
                    message: message.to_string()
                },
                "{name}: failure"
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Category listings
// ---------------------------------------------------------------------------

#[test]
fn category_listing_vectors() {
    let raw = include_str!("../../test-vectors/categories.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = ApiClient::new("http://localhost:8080");
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let response = HttpResponse::new(200, case["body"].as_str().unwrap());

        let categories: Vec<Category> = c
            .parse_json(response)
            .unwrap_or_else(|e| panic!("{name}: unexpected failure {e}"))
            .unwrap_or_default();
        let ids: Vec<i64> = categories.iter().map(|c| c.id).collect();
        let expected: Vec<i64> = serde_json::from_value(case["expected_ids"].clone()).unwrap();
        assert_eq!(ids, expected, "{name}: ids");
    }
}
