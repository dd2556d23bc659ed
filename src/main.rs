mod config;
mod errors;
mod handlers;
mod models;
mod services;

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::models::UploadTarget;
use crate::services::{s3, ObjectStore};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn cors(domains: &[String]) -> Cors {
    domains.iter().fold(
        Cors::default()
            .allowed_methods(["GET", "POST"])
            .allow_any_header()
            .max_age(3600),
        |cors, domain| cors.allowed_origin(domain),
    )
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_tracing();

    let config = Config::from_env()
        .inspect_err(|e| tracing::error!(error = %e, "invalid configuration"))?;

    let aws_config = s3::load_aws_config(&config).await;
    let store: Arc<dyn ObjectStore> = Arc::new(s3::Client::new(&aws_config));
    let store = web::Data::from(store);
    let target = web::Data::new(UploadTarget::new(
        config.aws_s3_bucket_name.clone(),
        config.aws_region.clone(),
    ));

    let bind = (config.host.clone(), config.service_port);
    tracing::info!(
        host = %bind.0,
        port = bind.1,
        bucket = %target.bucket,
        region = %target.region,
        "server starting"
    );

    HttpServer::new(move || {
        App::new()
            .wrap(cors(&config.cors_domains))
            .wrap(Logger::default())
            .app_data(store.clone())
            .app_data(target.clone())
            .app_data(handlers::multipart_config(config.upload_memory_limit))
            .configure(handlers::routes)
    })
    .bind(bind)?
    .run()
    .await?;

    Ok(())
}
