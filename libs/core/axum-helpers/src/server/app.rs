use super::shutdown::ShutdownCoordinator;
use crate::errors::handlers::{method_not_allowed, not_found, panic_response};
use crate::http::{REQUEST_ID_HEADER, TimestampRequestId, cors_layer, security_headers};
use axum::{
    Router,
    body::Body,
    http::{HeaderName, Request, StatusCode},
    middleware,
};
use core_config::AppInfo;
use core_config::server::ServerConfig;
use std::io;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::compression::CompressionLayer;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultOnResponse, TraceLayer};
use tracing::{Level, info, warn};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub const SWAGGER_UI_PATH: &str = "/swagger-ui";
pub const OPENAPI_JSON_PATH: &str = "/api-docs/openapi.json";

/// Combines application routes with documentation and cross-cutting layers.
///
/// - Swagger UI at `/swagger-ui`, the document at `/api-docs/openapi.json`
/// - `apis` merged at the root, with response compression (documentation is not compressed)
/// - JSON 404 and 405 fallbacks
/// - Handler panics recovered into a JSON 500
/// - Request timeout answering 408 after `server_config.request_timeout()`
/// - Request tracing, with the request ID recorded on the span
/// - Security headers and CORS (`server_config.cors_allowed_origins`)
/// - `x-request-id` taken from the request or generated as `{app name}-{nanos}`,
///   and echoed on the response
///
/// Routes in `apis` must already have their state applied.
///
/// # Example
/// ```ignore
/// let api_routes = domain_tasks::handlers::router(service);
/// let router = create_router::<ApiDoc>(api_routes, &app_info, &server_config);
/// ```
pub fn create_router<T>(apis: Router, app_info: &AppInfo, server_config: &ServerConfig) -> Router
where
    T: OpenApi + 'static,
{
    let request_id_header = HeaderName::from_static(REQUEST_ID_HEADER);

    Router::new()
        .merge(SwaggerUi::new(SWAGGER_UI_PATH).url(OPENAPI_JSON_PATH, T::openapi()))
        .merge(apis.layer(CompressionLayer::new()))
        .fallback(not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            server_config.request_timeout(),
        ))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = request
                        .headers()
                        .get(REQUEST_ID_HEADER)
                        .and_then(|value| value.to_str().ok())
                        .unwrap_or_default();
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = %request_id,
                    )
                })
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(middleware::from_fn(security_headers))
        .layer(cors_layer(&server_config.cors_allowed_origins))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(SetRequestIdLayer::new(
            request_id_header,
            TimestampRequestId::new(app_info.name.clone()),
        ))
}

/// Serve `router` until SIGINT/SIGTERM, then drain and run `cleanup`.
///
/// After the signal, the listener stops accepting and in-flight requests get
/// `server_config.shutdown_timeout()` to finish. Whatever is still running after
/// that is aborted. `cleanup` runs in both cases, after the server has stopped.
///
/// # Example
/// ```ignore
/// let cleanup = async move {
///     db.close().await.ok();
/// };
///
/// create_production_app(router, &config, cleanup).await?;
/// ```
pub async fn create_production_app<F>(
    router: Router,
    server_config: &ServerConfig,
    cleanup: F,
) -> io::Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let coordinator = ShutdownCoordinator::new();

    let listener = tokio::net::TcpListener::bind(server_config.address()).await?;
    info!(address = %listener.local_addr()?, "Server starting");

    let signal_watcher = coordinator.clone();
    tokio::spawn(async move { signal_watcher.wait_for_signal().await });

    let graceful = coordinator.clone();
    let mut server = tokio::spawn(async move {
        axum::serve(listener, router.into_make_service())
            .with_graceful_shutdown(async move { graceful.notified().await })
            .await
    });
    let server_abort = server.abort_handle();

    let grace_period = server_config.shutdown_timeout();
    let deadline = coordinator.clone();
    let grace_elapsed = async move {
        deadline.notified().await;
        tokio::time::sleep(grace_period).await;
    };

    let serve_result = tokio::select! {
        joined = &mut server => joined.map_err(io::Error::other)?,
        _ = grace_elapsed => {
            warn!(?grace_period, "Grace period elapsed, aborting in-flight requests");
            server_abort.abort();
            Ok(())
        }
    };

    info!("Server stopped, running cleanup");
    cleanup.await;
    info!("Cleanup completed");

    serve_result.inspect_err(|e| {
        tracing::error!(error = %e, "Server encountered an error");
    })
}
