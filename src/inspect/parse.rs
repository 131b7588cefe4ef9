//! URL decomposition.

use std::net::IpAddr;

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;
use url::Url;

/// Errors produced while inspecting a request or URL.
#[derive(Debug, Error)]
pub enum InspectError {
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("request has no Host header or absolute URI")]
    MissingHost,

    #[error("host `{0}` is not a valid authority")]
    InvalidHost(String),

    #[error("unsupported protocol `{0}`")]
    UnsupportedProtocol(String),
}

/// Components of an absolute URL.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UrlParts {
    pub href: String,
    /// Scheme with trailing colon, e.g. `https:`.
    pub protocol: String,
    /// Hostname plus the port when it is not the scheme default.
    pub host: String,
    pub hostname: String,
    pub port: Option<u16>,
    pub path: String,
    /// `?` plus the query string, or empty.
    pub search: String,
    pub querystring: String,
    pub query: Map<String, Value>,
    /// `#` plus the fragment, or empty.
    pub hash: String,
    pub origin: String,
}

/// Split an absolute URL into its components.
pub fn parse_url(input: &str) -> Result<UrlParts, InspectError> {
    let url = Url::parse(input)?;

    let hostname = url.host_str().unwrap_or_default().to_string();
    let host = match url.port() {
        Some(port) => format!("{hostname}:{port}"),
        None => hostname.clone(),
    };
    let querystring = url.query().unwrap_or_default().to_string();
    let search = if querystring.is_empty() {
        String::new()
    } else {
        format!("?{querystring}")
    };
    let hash = url
        .fragment()
        .filter(|f| !f.is_empty())
        .map(|f| format!("#{f}"))
        .unwrap_or_default();

    Ok(UrlParts {
        href: url.as_str().to_string(),
        protocol: format!("{}:", url.scheme()),
        host,
        hostname,
        port: url.port(),
        path: url.path().to_string(),
        search,
        querystring,
        query: query_object(&url),
        hash,
        origin: url.origin().ascii_serialization(),
    })
}

/// Decode the query into an object; repeated keys collect into arrays.
pub fn query_object(url: &Url) -> Map<String, Value> {
    let mut query = Map::new();
    for (key, value) in url.query_pairs() {
        let value = Value::String(value.into_owned());
        match query.get_mut(&*key) {
            Some(Value::Array(values)) => values.push(value),
            Some(existing) => {
                let first = existing.take();
                *existing = Value::Array(vec![first, value]);
            }
            None => {
                query.insert(key.into_owned(), value);
            }
        }
    }
    query
}

/// Subdomain labels, nearest first, after dropping `offset` trailing labels.
///
/// IP literals have no subdomains.
pub fn subdomains(hostname: &str, offset: usize) -> Vec<String> {
    let bare = hostname.trim_start_matches('[').trim_end_matches(']');
    if hostname.is_empty() || bare.parse::<IpAddr>().is_ok() {
        return Vec::new();
    }

    hostname
        .split('.')
        .rev()
        .skip(offset)
        .map(str::to_string)
        .collect()
}
