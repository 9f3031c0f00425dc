//! HTTP endpoint the gateway posts to.
//!
//! One service is mounted on one POST route.  The handler hands the raw body
//! to [`process_request`] and maps its outcome to a status code:
//!
//! | Outcome                    | Status | Body                 |
//! |----------------------------|--------|----------------------|
//! | response encoded           | 200    | response JSON        |
//! | body is not a request      | 400    | plain-text reason    |
//! | service or encoding failed | 500    | plain-text reason    |

use std::future::Future;
use std::sync::Arc;

use anyhow::Context;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::Router;
use minipavi_core::protocol::{JsonStateCodec, StateCodec, StateFallbackHook, WireCodec};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

use crate::application::{process_request, MinitelService, RequestError};
use crate::domain::ServerConfig;

/// Shared by every request on the route.
struct AppState<S, C, H> {
    service: Arc<S>,
    codec: WireCodec<C, H>,
}

/// Mounts `service` on `config.path`, with session state stored as JSON.
///
/// The initial state comes from [`MinitelService::initial_state`].
pub fn router<S>(config: &ServerConfig, service: Arc<S>) -> Router
where
    S: MinitelService,
    S::State: Serialize + DeserializeOwned + 'static,
{
    let initial = Arc::clone(&service);
    let state_codec = JsonStateCodec::new(move || initial.initial_state());
    router_with_codec(
        config,
        service,
        WireCodec::new(config.service_version.clone(), state_codec),
    )
}

/// Mounts `service` on `config.path` with a caller-chosen state codec and
/// fallback hook.
pub fn router_with_codec<S, C, H>(
    config: &ServerConfig,
    service: Arc<S>,
    codec: WireCodec<C, H>,
) -> Router
where
    S: MinitelService,
    C: StateCodec<State = S::State> + Send + Sync + 'static,
    H: StateFallbackHook + Send + Sync + 'static,
{
    let state = Arc::new(AppState { service, codec });
    Router::new()
        .route(&config.path, post(handle_gateway::<S, C, H>))
        .with_state(state)
}

async fn handle_gateway<S, C, H>(
    State(state): State<Arc<AppState<S, C, H>>>,
    body: Bytes,
) -> Response
where
    S: MinitelService,
    C: StateCodec<State = S::State> + Send + Sync + 'static,
    H: StateFallbackHook + Send + Sync + 'static,
{
    match process_request(state.service.as_ref(), &state.codec, &body) {
        Ok(json) => ([(header::CONTENT_TYPE, "application/json")], json).into_response(),
        Err(err @ RequestError::Decode(_)) => {
            warn!(error = %err, "rejected gateway request");
            (StatusCode::BAD_REQUEST, err.to_string()).into_response()
        }
        Err(err) => {
            error!(error = %err, "gateway request failed");
            (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response()
        }
    }
}

/// Binds `config`'s address and serves `app` until `shutdown` resolves.
///
/// # Errors
///
/// Returns an error if the address is invalid, the port cannot be bound, or
/// the server fails while running.
pub async fn run_server<F>(config: &ServerConfig, app: Router, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = config.socket_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(
        %addr,
        path = %config.path,
        version = %config.service_version,
        "listening for gateway requests"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .context("HTTP server error")?;

    info!("HTTP server stopped");
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
