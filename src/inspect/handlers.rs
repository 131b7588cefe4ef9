//! Request inspection endpoints.
//!
//! Both endpoints are plain custom routes on a [`Router`], mounted by the
//! server like any resource.

use axum::extract::{OriginalUri, Request};
use axum::http::uri::Authority;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::config::InspectConfig;
use crate::inspect::parse::{parse_url, subdomains, InspectError};
use crate::routing::{Handler, Router, RouterError};

const X_FORWARDED_PROTO: &str = "x-forwarded-proto";
const X_FORWARDED_HOST: &str = "x-forwarded-host";

/// Body of `GET /headers`.
#[derive(Debug, Serialize)]
pub struct HeaderDump {
    pub header: Map<String, Value>,
    pub get_cache_control: Option<String>,
}

/// Body of `GET /url`.
#[derive(Debug, Serialize)]
pub struct RequestUrl {
    pub href: String,
    pub path: String,
    pub url: String,
    pub query: Map<String, Value>,
    pub querystring: String,
    pub search: String,
    pub host: String,
    pub hostname: String,
    /// Scheme without the trailing colon.
    pub protocol: String,
    pub secure: bool,
    pub subdomains: Vec<String>,
    pub origin: String,
}

/// Build the inspection router (`GET /headers`, `GET /url`).
pub fn inspect_router(config: &InspectConfig) -> Result<Router, RouterError> {
    let trust_proxy = config.trust_proxy;
    let subdomain_offset = config.subdomain_offset;

    let mut router = Router::new();
    router
        .get(
            "/headers",
            Handler::new(|req: Request, _params| async move { Json(dump_headers(req.headers())) }),
        )?
        .get(
            "/url",
            Handler::new(move |req: Request, _params| async move {
                match describe_url(&req, trust_proxy, subdomain_offset) {
                    Ok(url) => Json(url).into_response(),
                    Err(e) => bad_request(e),
                }
            }),
        )?;

    Ok(router)
}

/// Collect request headers; repeated headers are joined with ", ".
pub fn dump_headers(headers: &HeaderMap) -> HeaderDump {
    let mut all = Map::new();
    for name in headers.keys() {
        let joined = headers
            .get_all(name)
            .iter()
            .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
            .collect::<Vec<_>>()
            .join(", ");
        all.insert(name.as_str().to_string(), Value::String(joined));
    }

    HeaderDump {
        header: all,
        get_cache_control: header_str(headers, header::CACHE_CONTROL.as_str()).map(str::to_string),
    }
}

/// Describe the URL the client requested, as seen before any mount prefix
/// was stripped.
pub fn describe_url(
    req: &Request,
    trust_proxy: bool,
    subdomain_offset: usize,
) -> Result<RequestUrl, InspectError> {
    let uri = req
        .extensions()
        .get::<OriginalUri>()
        .map(|original| &original.0)
        .unwrap_or_else(|| req.uri());
    let headers = req.headers();

    let forwarded = |name: &str| {
        trust_proxy
            .then(|| header_str(headers, name))
            .flatten()
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|v| !v.is_empty())
    };

    let protocol = forwarded(X_FORWARDED_PROTO)
        .or_else(|| uri.scheme_str())
        .unwrap_or("http")
        .to_ascii_lowercase();
    if protocol != "http" && protocol != "https" {
        return Err(InspectError::UnsupportedProtocol(protocol));
    }

    let raw_host = forwarded(X_FORWARDED_HOST)
        .or_else(|| header_str(headers, header::HOST.as_str()))
        .or_else(|| uri.authority().map(|a| a.as_str()))
        .ok_or(InspectError::MissingHost)?;
    let host = parse_host(raw_host)?;
    let path_and_query = uri.path_and_query().map(|pq| pq.as_str()).unwrap_or("/");

    let parts = parse_url(&format!("{protocol}://{host}{path_and_query}"))?;

    Ok(RequestUrl {
        subdomains: subdomains(&parts.hostname, subdomain_offset),
        secure: protocol == "https",
        href: parts.href,
        path: parts.path,
        url: path_and_query.to_string(),
        query: parts.query,
        querystring: parts.querystring,
        search: parts.search,
        host: parts.host,
        hostname: parts.hostname,
        protocol,
        origin: parts.origin,
    })
}

/// A bare `host[:port]`; path, query, fragment and userinfo are rejected.
fn parse_host(raw: &str) -> Result<Authority, InspectError> {
    match raw.parse::<Authority>() {
        Ok(authority) if !authority.as_str().contains('@') => Ok(authority),
        _ => Err(InspectError::InvalidHost(raw.to_string())),
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

fn bad_request(e: InspectError) -> Response {
    (StatusCode::BAD_REQUEST, Json(json!({ "error": e.to_string() }))).into_response()
}
