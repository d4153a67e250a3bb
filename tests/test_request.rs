use hostel::http::request::{Method, Request, RequestBuilder};
use std::collections::HashMap;

#[test]
fn test_request_header_retrieval() {
    let mut headers = HashMap::new();
    headers.insert("Host".to_string(), "example.com".to_string());
    headers.insert("Content-Type".to_string(), "application/json".to_string());

    let req = Request {
        method: Method::GET,
        host: "example.com".to_string(),
        path: "/".to_string(),
        headers,
    };

    assert_eq!(req.header("Host"), Some("example.com"));
    assert_eq!(req.header("Content-Type"), Some("application/json"));
    assert_eq!(req.header("content-type"), None);
    assert_eq!(req.header("Missing"), None);
}

#[test]
fn test_method_from_token() {
    assert_eq!(Method::from_token("GET"), Method::GET);
    assert_eq!(Method::from_token("POST"), Method::POST);
    assert_eq!(Method::from_token("PUT"), Method::INVALID);
    assert_eq!(Method::from_token("post"), Method::INVALID);
    assert_eq!(Method::from_token(""), Method::INVALID);
}

#[test]
fn test_invalid_request_is_empty() {
    let req = Request::invalid();

    assert_eq!(req.method, Method::INVALID);
    assert!(!req.is_valid());
    assert!(req.host.is_empty());
    assert!(req.path.is_empty());
    assert!(req.headers.is_empty());
}

#[test]
fn test_request_builder() {
    let req = RequestBuilder::new()
        .method(Method::POST)
        .host("example.com")
        .path("/form")
        .header("Host", "example.com:80")
        .build()
        .unwrap();

    assert_eq!(req.method, Method::POST);
    assert!(req.is_valid());
    assert_eq!(req.host, "example.com");
    assert_eq!(req.path, "/form");
    assert_eq!(req.header("Host"), Some("example.com:80"));
}

#[test]
fn test_request_builder_requires_fields() {
    assert_eq!(
        RequestBuilder::new().host("h").path("/").build().unwrap_err(),
        "method missing"
    );
    assert_eq!(
        RequestBuilder::new().method(Method::GET).path("/").build().unwrap_err(),
        "host missing"
    );
    assert_eq!(
        RequestBuilder::new().method(Method::GET).host("h").build().unwrap_err(),
        "path missing"
    );
}
