//! Request-level logging and request IDs.

mod parent_context;
mod request_ids;
mod spans;

use std::time::Instant;

use salvo::{
    Request, handler,
    http::StatusCode,
    prelude::{Depot, FlowCtrl, Response},
};
use tracing::Instrument as _;
use tracing::{error, info, warn};
use tracing_opentelemetry::OpenTelemetrySpanExt as _;

use super::{metrics, settings};

const REQUEST_ID_DEPOT_KEY: &str = "request_id";

/// Probes are polled constantly and would drown out real traffic.
const UNLOGGED_PATHS: [&str; 2] = ["/metrics", "/healthcheck"];

#[derive(Debug)]
struct RequestContext {
    request_id: String,
    method: String,
    path: String,
    route: String,
}

impl RequestContext {
    fn capture(req: &Request) -> Self {
        let path = req.uri().path().to_owned();

        Self {
            request_id: request_ids::resolve_request_id(
                req.header::<String>(request_ids::REQUEST_ID_HEADER),
            ),
            method: req.method().to_string(),
            route: spans::route_for_path(&path),
            path,
        }
    }

    fn log_completion(&self, status: StatusCode, duration_ms: u128) {
        let threshold_ms = u128::from(settings::slow_request_threshold_ms());
        let Self {
            request_id,
            method,
            path,
            ..
        } = self;

        info!(status = status.as_u16(), duration_ms, "request.completed");

        if status.is_server_error() {
            error!(status = status.as_u16(), %method, %path, %request_id, "server error response");
        } else if status.is_client_error() {
            warn!(status = status.as_u16(), %method, %path, %request_id, "client error response");
        }

        if duration_ms > threshold_ms {
            warn!(
                %method,
                %path,
                %request_id,
                duration_ms,
                threshold_ms,
                "slow request detected"
            );
        }
    }
}

#[handler]
pub(crate) async fn request_logging(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    if UNLOGGED_PATHS.contains(&req.uri().path()) {
        ctrl.call_next(req, depot, res).await;
        return;
    }

    let started = Instant::now();
    let context = RequestContext::capture(req);

    depot.insert(REQUEST_ID_DEPOT_KEY, context.request_id.clone());
    request_ids::set_request_id_header(res, &context.request_id);

    let _in_flight = metrics::InFlightRequestGuard::track();
    let span_name = format!("{} {}", context.method, context.route);

    let span = tracing::info_span!(
        parent: None,
        "http.request",
        otel.name = %span_name,
        otel.kind = "server",
        route = %context.route,
        request_id = %context.request_id,
        method = %context.method,
        path = %context.path,
        remote_addr = %req.remote_addr(),
        status = tracing::field::Empty,
        duration_ms = tracing::field::Empty
    );

    if settings::parent_propagation_enabled()
        && let Some(parent) = parent_context::remote_parent(req.headers())
        && let Err(source) = span.set_parent(parent)
    {
        warn!("failed to set remote parent on request span: {source}");
    }

    ctrl.call_next(req, depot, res)
        .instrument(span.clone())
        .await;

    let duration = started.elapsed();
    let status = request_ids::response_status_or_ok(res.status_code);

    metrics::observe_request(
        &context.method,
        &context.route,
        status.as_u16(),
        duration.as_secs_f64(),
    );

    span.record("status", status.as_u16());
    span.record("duration_ms", duration.as_millis());
    span.in_scope(|| context.log_completion(status, duration.as_millis()));
}
