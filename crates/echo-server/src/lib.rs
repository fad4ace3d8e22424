//! WebApi Echo - request mirroring fixture
//!
//! A single `/echo` route that accepts any method and answers with a JSON
//! document describing the request: method, form and JSON body fields merged
//! at the top level, headers and query parameters. It is a test target for the
//! step library and must never be exposed outside a test environment.

use std::io;
use std::net::SocketAddr;

use axum::body::Bytes;
use axum::extract::RawQuery;
use axum::http::{HeaderMap, Method, header::CONTENT_TYPE};
use axum::routing::any;
use axum::{Json, Router};
use serde_json::{Map, Value};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

/// Text returned under the `warning` key of every echo.
pub const WARNING: &str = "Do not expose this service in production : it is intrinsically unsafe";

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Builds the echo router.
pub fn router() -> Router {
    Router::new()
        .route("/echo", any(echo))
        .layer(TraceLayer::new_for_http())
}

/// Serves the echo router on an already bound listener until it fails.
///
/// # Errors
///
/// Returns the I/O error that stopped the server.
pub async fn serve(listener: TcpListener) -> io::Result<()> {
    axum::serve(listener, router()).await
}

/// Binds `addr`, serves in a background task and returns the bound address.
///
/// Binding port 0 picks a free port, which is how test suites start it.
///
/// # Errors
///
/// Returns an error if the address cannot be bound.
pub async fn spawn(addr: SocketAddr) -> io::Result<SocketAddr> {
    let listener = TcpListener::bind(addr).await?;
    let local = listener.local_addr()?;
    info!(%local, "echo server listening");

    tokio::spawn(async move {
        if let Err(e) = serve(listener).await {
            error!(error = %e, "echo server stopped");
        }
    });

    Ok(local)
}

async fn echo(
    method: Method,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
    body: Bytes,
) -> Json<Value> {
    Json(echo_document(&method, &headers, query.as_deref(), &body))
}

/// Describes a request as the JSON document the `/echo` route returns.
#[must_use]
pub fn echo_document(
    method: &Method,
    headers: &HeaderMap,
    query: Option<&str>,
    body: &[u8],
) -> Value {
    let mut document = Map::new();
    document.insert("warning".to_string(), Value::from(WARNING));
    document.insert("method".to_string(), Value::from(method.as_str()));

    if is_form(headers) {
        for (name, value) in decode_pairs(body) {
            document.insert(name, Value::String(value));
        }
    }

    if !body.is_empty() {
        match serde_json::from_slice::<Value>(body) {
            Ok(Value::Object(fields)) => document.extend(fields),
            Ok(Value::Array(items)) => document.extend(
                items
                    .into_iter()
                    .enumerate()
                    .map(|(index, item)| (index.to_string(), item)),
            ),
            _ => {
                document.insert(
                    "content".to_string(),
                    Value::String(String::from_utf8_lossy(body).into_owned()),
                );
            }
        }
    }

    document.insert("headers".to_string(), Value::Object(header_lists(headers)));
    document.insert(
        "query".to_string(),
        Value::Object(
            decode_pairs(query.unwrap_or_default().as_bytes())
                .into_iter()
                .map(|(name, value)| (name, Value::String(value)))
                .collect(),
        ),
    );

    Value::Object(document)
}

fn is_form(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with(FORM_CONTENT_TYPE))
}

fn decode_pairs(input: &[u8]) -> Vec<(String, String)> {
    serde_urlencoded::from_bytes(input).unwrap_or_default()
}

// HeaderMap names are already lowercase.
fn header_lists(headers: &HeaderMap) -> Map<String, Value> {
    headers
        .keys()
        .map(|name| {
            let values = headers
                .get_all(name)
                .iter()
                .map(|value| Value::String(String::from_utf8_lossy(value.as_bytes()).into_owned()))
                .collect();
            (name.as_str().to_string(), Value::Array(values))
        })
        .collect()
}
