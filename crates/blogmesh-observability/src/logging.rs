use std::time::Instant;

use axum::{
    extract::{MatchedPath, Request},
    http::HeaderValue,
    middleware::Next,
    response::Response,
};
use tracing::{error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Header carrying the request id. Reused when the caller already set one,
/// so a request keeps its id across the gateway hop.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

pub async fn logging_middleware(mut req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().clone();
    let uri = req.uri().clone();
    let matched_path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string());

    let request_id = req
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        req.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    info!(
        request_id = %request_id,
        method = %method,
        path = %matched_path,
        "Incoming request"
    );

    let mut response = next.run(req).await;
    let latency = start.elapsed();
    let status = response.status();

    match status.as_u16() {
        400..=499 => {
            warn!(
                request_id = %request_id,
                method = %method,
                path = %matched_path,
                status = %status.as_u16(),
                latency_ms = %latency.as_millis(),
                "Client error"
            );
        }
        500..=599 => {
            error!(
                request_id = %request_id,
                method = %method,
                path = %matched_path,
                status = %status.as_u16(),
                latency_ms = %latency.as_millis(),
                "Server error"
            );
        }
        _ => {
            info!(
                request_id = %request_id,
                method = %method,
                path = %matched_path,
                status = %status.as_u16(),
                latency_ms = %latency.as_millis(),
                "Request completed"
            );
        }
    }

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}

/// Installs the global tracing subscriber for `service`.
///
/// # Configuration
///
/// - **Filter**: `RUST_LOG` when set, otherwise `LOG_LEVEL` (default `info`)
///   with noisy dependencies held at `warn`
/// - **Format**: `LOG_FORMAT=json` switches the console to JSON lines
/// - **File**: `LOG_DIR` adds a daily-rolling JSON file named `<service>.log`
///
/// The returned guard flushes the file writer on drop and must be held for
/// the life of the process.
pub fn init_tracing(service: &str) -> Option<WorkerGuard> {
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "{log_level},tower_http=warn,hyper=warn,hyper_util=warn,reqwest=warn,sqlx=warn"
        ))
    });

    let json_console = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let console_layer = if json_console {
        fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(false)
            .boxed()
    } else {
        fmt::layer()
            .compact()
            .with_target(true)
            .with_thread_ids(false)
            .with_thread_names(false)
            .with_file(true)
            .with_line_number(true)
            .boxed()
    };

    let (file_layer, guard) = match std::env::var("LOG_DIR") {
        Ok(dir) if !dir.is_empty() => match std::fs::create_dir_all(&dir) {
            Ok(()) => {
                let appender = tracing_appender::rolling::daily(&dir, format!("{service}.log"));
                let (writer, guard) = tracing_appender::non_blocking(appender);
                let layer = fmt::layer()
                    .json()
                    .with_writer(writer)
                    .with_ansi(false)
                    .with_current_span(true);
                (Some(layer), Some(guard))
            }
            Err(e) => {
                eprintln!("Failed to create log directory {dir}: {e}. Logging to console only");
                (None, None)
            }
        },
        _ => (None, None),
    };

    let result = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init();

    match result {
        Ok(()) => info!(service = %service, "Tracing initialized"),
        Err(e) => eprintln!("Tracing subscriber already installed: {e}"),
    }

    guard
}
