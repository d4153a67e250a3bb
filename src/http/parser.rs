use crate::http::request::{Method, Request};
use std::collections::HashMap;
use thiserror::Error;

/// Upper bound on a request: a connection performs exactly one read of at
/// most this many bytes.
pub const MAX_REQUEST_LENGTH: usize = 8192;

const VERSION_SUFFIX: &str = " HTTP/1.1";

/// Malformed input detected while parsing a request.
///
/// Never surfaced to the client as-is: every variant collapses into an
/// `INVALID` request and a 400 response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BadRequest {
    #[error("empty request")]
    Empty,

    #[error("invalid version")]
    InvalidVersion,

    #[error("invalid header line: {0}")]
    InvalidHeaderLine(String),

    #[error("missing host header")]
    MissingHost,
}

/// Returns the text up to the first CRLF, or all of `raw` if there is none.
pub fn request_line(raw: &str) -> &str {
    raw.find("\r\n")
        .map_or(raw, |end| &raw[..end])
}

/// Splits `<method> <target> HTTP/1.1` into its method and target.
///
/// An unknown method is not an error, it comes back as `Method::INVALID`.
pub fn parse_request_line(line: &str) -> Result<(Method, String), BadRequest> {
    let target = line
        .strip_suffix(VERSION_SUFFIX)
        .ok_or(BadRequest::InvalidVersion)?;

    let (method, path) = target
        .split_once(' ')
        .unwrap_or((target, ""));

    Ok((Method::from_token(method), path.to_string()))
}

/// Parses the header block following the request line.
///
/// Stops at the first empty line. The first occurrence of a key wins.
pub fn parse_headers(raw: &str) -> Result<HashMap<String, String>, BadRequest> {
    let mut headers = HashMap::new();

    for line in raw.split("\r\n").skip(1) {
        if line.is_empty() {
            break;
        }

        let (key, value) = line
            .split_once(':')
            .ok_or_else(|| BadRequest::InvalidHeaderLine(line.to_string()))?;

        headers
            .entry(key.to_string())
            .or_insert_with(|| value.trim().to_string());
    }

    Ok(headers)
}

/// Extracts the `Host` header with any `:port` suffix dropped.
pub fn host_from_headers(headers: &HashMap<String, String>) -> Result<String, BadRequest> {
    let host = headers.get("Host").ok_or(BadRequest::MissingHost)?;
    let host = host
        .split_once(':')
        .map_or(host.as_str(), |(name, _port)| name);
    Ok(host.to_string())
}

/// Parses one raw request buffer.
///
/// Pure: the same bytes always give the same result. Invalid UTF-8 is
/// replaced rather than rejected.
pub fn parse_http_request(buf: &[u8]) -> Result<Request, BadRequest> {
    if buf.is_empty() {
        return Err(BadRequest::Empty);
    }

    let raw = String::from_utf8_lossy(buf);
    let (method, path) = parse_request_line(request_line(&raw))?;
    let headers = parse_headers(&raw)?;
    let host = host_from_headers(&headers)?;

    Ok(Request {
        method,
        host,
        path,
        headers,
    })
}
