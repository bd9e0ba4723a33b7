/*
 * Responsibility
 * - Config 読み込み → 依存生成 (SettingsProvider / EdgeGate) → Router 組み立て
 * - Middleware の適用 (trace / request-id / limit / timeout)
 * - axum::serve() で起動
 */
use std::{panic, process, sync::Arc};

use anyhow::Result;
use axum::Router;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::services::gate::{EdgeGate, RequestRouter, TokenValidator};
use crate::services::settings::{EnvParameterStore, ParameterStoreProvider};
use crate::{api, config::Config, middleware, state::AppState};

fn init_tracing() {
    // Prefer RUST_LOG if set.
    // Ex:
    // RUST_LOG=info,edge_gate=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        tracing::error!(?info, "panic");

        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env()?;
    init_panic_hook(!config.app_env.is_production());

    tracing::info!(
        "starting edge gate in {:?} mode on {} (parameters under {})",
        config.app_env,
        config.addr,
        config.parameter_prefix
    );

    let state = build_state(&config);
    let app = build_router(state, &config);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

pub fn build_state(config: &Config) -> AppState {
    // Secrets are resolved per invocation from the environment, never at startup.
    let settings =
        ParameterStoreProvider::with_prefix(EnvParameterStore::new(), &config.parameter_prefix);
    let router = RequestRouter::new(
        TokenValidator::new(config.jwt_leeway_seconds),
        config.cookie_name.clone(),
    );

    AppState::new(EdgeGate::new(router), Arc::new(settings))
}

pub fn build_router(state: AppState, config: &Config) -> Router {
    let router = Router::new()
        .nest("/api/v1", api::v1::routes())
        .with_state(state);

    middleware::http::apply(router, config)
}
