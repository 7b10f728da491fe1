#![warn(clippy::pedantic)]

mod config;
mod error;
mod extract;
mod model;
mod openapi;
mod route;
mod store;
mod trace;

use std::{net::SocketAddr, sync::Arc, time::Duration};

use aide::{axum::ApiRouter, openapi::OpenApi};
use axum::{http::Response, middleware, Extension, Router};
use tower::ServiceBuilder;
use tower_http::{
	catch_panic::CatchPanicLayer,
	compression::CompressionLayer,
	cors::CorsLayer,
	request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
	trace::TraceLayer,
};

use crate::{
	config::Config,
	route::post::{policy::TitlePolicy, service::PostService},
	store::{MemoryPostRepository, PgPostRepository, PostRepository},
};

pub type Database = sqlx::Pool<sqlx::Postgres>;

/// The shared application state.
///
/// This should contain all shared dependencies that handlers need to access.
/// Handlers pull out the part they need with [`axum::extract::State`].
#[derive(Clone, axum::extract::FromRef)]
pub struct AppState {
	pub posts: PostService,
}

/// Builds the application router, including the `OpenAPI` document
/// at `/docs/api.json`.
pub fn app(state: AppState) -> Router {
	let mut api = OpenApi::default();

	ApiRouter::new()
		.nest("/posts", route::post::routes())
		.nest("/docs", route::docs::routes())
		.finish_api_with(&mut api, openapi::docs)
		.fallback(error::not_found)
		.layer(middleware::map_response(error::method_not_allowed))
		.layer(Extension(Arc::new(api)))
		.layer(
			ServiceBuilder::new()
				.layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
				.layer(TraceLayer::new_for_http().on_response(
					|response: &Response<_>, latency: Duration, _span: &tracing::Span| {
						trace::record_response(response.status(), latency);
					},
				))
				.layer(PropagateRequestIdLayer::x_request_id())
				.layer(CorsLayer::permissive())
				.layer(CompressionLayer::new())
				.layer(CatchPanicLayer::custom(error::handle_panic)),
		)
		.with_state(state)
}

/// Connects to the configured store, running migrations when it is Postgres.
async fn repository(config: &Config) -> Result<Arc<dyn PostRepository>, Box<dyn std::error::Error>> {
	let Some(url) = &config.database_url else {
		tracing::warn!("DATABASE_URL is not set, posts are kept in memory");

		return Ok(Arc::new(MemoryPostRepository::default()));
	};

	let database = Database::connect(url).await?;

	sqlx::migrate!().run(&database).await?;

	Ok(Arc::new(PgPostRepository::new(database)))
}

async fn shutdown_signal() {
	if let Err(error) = tokio::signal::ctrl_c().await {
		tracing::error!(%error, "failed to listen for shutdown signal");
	}
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	dotenvy::dotenv().ok();

	let config = Config::from_env()?;
	let _guard = trace::init_tracing_subscriber(config.otlp)?;

	let state = AppState {
		posts: PostService::new(repository(&config).await?, TitlePolicy::from_config(&config)),
	};

	let address = SocketAddr::new(config.host, config.port);
	let listener = tokio::net::TcpListener::bind(address).await?;

	tracing::info!("listening on {}", address);

	axum::serve(listener, app(state))
		.with_graceful_shutdown(shutdown_signal())
		.await?;

	Ok(())
}
