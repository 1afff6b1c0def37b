//! HTTP API server for the tic-tac-toe service.
//!
//! Provides REST endpoints for registering players, creating and joining
//! games and placing moves, with structured logging (tracing) and
//! Prometheus metrics.

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use domain::GameService;
use game_store::{EventBus, GameStore, PlayerStore};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use routes::{AppState, SharedState};

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<G, P, B>(state: SharedState<G, P, B>, metrics_handle: PrometheusHandle) -> Router
where
    G: GameStore + 'static,
    P: PlayerStore + 'static,
    B: EventBus + 'static,
{
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check))
        .route("/players", post(routes::players::create::<G, P, B>))
        .route("/games", post(routes::games::create::<G, P, B>))
        .route("/games/{id}", get(routes::games::get::<G, P, B>))
        .route("/games/{id}/join", post(routes::games::join::<G, P, B>))
        .route("/games/{id}/moves", post(routes::games::place_move::<G, P, B>))
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Creates the application state over the given stores and event bus.
pub fn create_state<G, P, B>(game_store: G, player_store: P, bus: B) -> SharedState<G, P, B>
where
    G: GameStore,
    P: PlayerStore,
    B: EventBus,
{
    Arc::new(AppState {
        game_service: GameService::new(game_store, player_store, bus),
    })
}
