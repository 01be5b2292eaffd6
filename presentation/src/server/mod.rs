//! HTTP API for docent
//!
//! - `POST /api/ask`: answer a question (always 200 once the request is valid)
//! - `GET /api/history`: the caller's recent exchanges (requires `x-user-id`)
//! - `GET /health`: liveness

mod routes;

use axum::Router;
use axum::http::{HeaderValue, Method, header};
use docent_application::{AskQuestionUseCase, ListHistoryUseCase};
use std::io;
use std::sync::Arc;
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

pub use routes::{AskRequest, ErrorBody, HealthResponse, USER_ID_HEADER};

/// Errors that can stop the HTTP server
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Could not bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: io::Error,
    },

    #[error("Server error: {0}")]
    Serve(#[source] io::Error),
}

/// Application state shared across handlers
pub struct AppState {
    pub ask: AskQuestionUseCase,
    pub history: ListHistoryUseCase,
}

impl AppState {
    pub fn new(ask: AskQuestionUseCase, history: ListHistoryUseCase) -> Self {
        Self { ask, history }
    }
}

/// Build the router with tracing and CORS layers.
///
/// `cors_origins` empty disables CORS; an entry of `"*"` allows any origin.
pub fn router(state: AppState, cors_origins: &[String]) -> Router {
    let app = Router::new()
        .merge(routes::api_routes())
        .merge(routes::health_routes())
        .with_state(Arc::new(state))
        .layer(TraceLayer::new_for_http());

    match cors_layer(cors_origins) {
        Some(cors) => app.layer(cors),
        None => app,
    }
}

fn cors_layer(origins: &[String]) -> Option<CorsLayer> {
    if origins.is_empty() {
        return None;
    }

    let allow_origin = if origins.iter().any(|o| o == "*") {
        AllowOrigin::from(Any)
    } else {
        let values: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|origin| match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!("Ignoring invalid CORS origin '{}'", origin);
                    None
                }
            })
            .collect();
        AllowOrigin::list(values)
    };

    Some(
        CorsLayer::new()
            .allow_origin(allow_origin)
            .allow_methods([Method::GET, Method::POST])
            .allow_headers([
                header::CONTENT_TYPE,
                header::HeaderName::from_static(USER_ID_HEADER),
            ]),
    )
}

/// Run the HTTP server until the process is stopped
pub async fn run(state: AppState, bind: &str, cors_origins: &[String]) -> Result<(), ServerError> {
    let app = router(state, cors_origins);

    let listener = TcpListener::bind(bind)
        .await
        .map_err(|source| ServerError::Bind {
            addr: bind.to_string(),
            source,
        })?;
    info!("Listening on http://{}", bind);

    axum::serve(listener, app).await.map_err(ServerError::Serve)?;
    Ok(())
}
