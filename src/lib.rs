#[cfg(feature = "server")]
use std::sync::Arc;

#[cfg(feature = "server")]
use actix_cors::Cors;
#[cfg(feature = "server")]
use actix_web::{App, HttpServer, middleware, web};

#[cfg(feature = "server")]
use crate::models::config::ServerConfig;
#[cfg(feature = "server")]
use crate::repository::Backend;
#[cfg(feature = "server")]
use crate::repository::http::HttpRepository;

pub mod domain;
pub mod dto;
pub mod error_conversions;
pub mod forms;
pub mod models;
pub mod pagination;
pub mod repository;
#[cfg(feature = "server")]
pub mod routes;
pub mod services;

/// Registers the `/api` scope with every JSON endpoint.
#[cfg(feature = "server")]
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    use crate::routes::application::{application_action, application_details};
    use crate::routes::inbox::search_inbox;
    use crate::routes::scrutiny::scrutiny_report;

    cfg.app_data(web::JsonConfig::default().error_handler(routes::json_error_handler))
        .service(
            web::scope("/api")
                .service(search_inbox)
                .service(scrutiny_report)
                .service(application_details)
                .service(application_action),
        );
}

/// Builds and runs the Actix-Web HTTP server using the provided configuration.
#[cfg(feature = "server")]
pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
    let repo = HttpRepository::new(&server_config)
        .map_err(|e| std::io::Error::other(format!("Failed to build backend client: {e}")))?;
    let repo: web::Data<dyn Backend> = web::Data::from(Arc::new(repo) as Arc<dyn Backend>);

    let bind_address = (server_config.address.clone(), server_config.port);
    log::info!(
        "Serving on {}:{} against {}",
        bind_address.0,
        bind_address.1,
        server_config.backend_url
    );

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .configure(configure_api)
            .app_data(repo.clone())
    })
    .bind(bind_address)?
    .run()
    .await
}
