use axum::body::Body;
use bookshop::catalog::controller::app;
use bookshop::catalog::factory::create_catalog_service;
use bookshop::core::controller::AppState;
use bookshop::core::domain::{Configuration, RunMode};
use bookshop::utils::logs::setup_tracing;
use lambda_http::{run, Error};
use tracing::info;

// See https://docs.aws.amazon.com/lambda/latest/dg/lambda-rust.html
// https://docs.aws.amazon.com/lambda/latest/dg/rust-http-events.html

#[tokio::main]
async fn main() -> Result<(), Error> {
    let config = Configuration::from_env()?;
    setup_tracing(&config);

    let catalog_service = create_catalog_service(&config).await;
    let state = AppState::new(catalog_service);

    match config.run_mode {
        RunMode::Lambda => {
            info!(branch = %config.branch_id, store = %config.store, "starting catalog lambda");
            run(app::<lambda_http::Body>(state)).await
        }
        RunMode::Http => {
            info!(branch = %config.branch_id, store = %config.store, addr = %config.bind_addr, "starting catalog server");
            axum::Server::bind(&config.bind_addr)
                .serve(app::<Body>(state).into_make_service())
                .await?;
            Ok(())
        }
    }
}
