use std::collections::HashMap;

use vhttpd::http::request::Request;

fn request(headers: HashMap<String, String>, close: bool) -> Request {
    Request {
        method: "GET".to_string(),
        url: "/".to_string(),
        version: "HTTP/1.1".to_string(),
        headers,
        host: "example.com".to_string(),
        close,
    }
}

#[test]
fn test_request_header_retrieval() {
    let mut headers = HashMap::new();
    headers.insert("Accept".to_string(), "text/html".to_string());
    headers.insert("User-Agent".to_string(), "curl/8.0".to_string());

    let req = request(headers, false);

    assert_eq!(req.header("Accept"), Some("text/html"));
    assert_eq!(req.header("User-Agent"), Some("curl/8.0"));
    assert_eq!(req.header("Missing"), None);
}

#[test]
fn test_request_keep_alive_http11_default() {
    // HTTP/1.1 defaults to keep-alive
    let req = request(HashMap::new(), false);

    assert!(req.keep_alive());
}

#[test]
fn test_request_keep_alive_close() {
    let req = request(HashMap::new(), true);

    assert!(!req.keep_alive());
}
