mod error;
mod event;
mod export;
mod reminder;
mod schedule;
mod shared;
mod status;

use actix_cors::Cors;
use actix_web::{dev::Server, middleware, web, App, HttpServer};
pub use error::PlannerError;
use planner_infra::PlannerContext;
use std::net::TcpListener;
use tracing::info;
use tracing_actix_web::TracingLogger;

pub fn configure_server_api(cfg: &mut web::ServiceConfig) {
    event::configure_routes(cfg);
    export::configure_routes(cfg);
    reminder::configure_routes(cfg);
    schedule::configure_routes(cfg);
    status::configure_routes(cfg);
}

fn bad_client_data(e: impl std::fmt::Display) -> actix_web::Error {
    PlannerError::BadClientData(e.to_string()).into()
}

pub struct Application {
    server: Server,
    port: u16,
}

impl Application {
    pub async fn new(context: PlannerContext) -> Result<Self, std::io::Error> {
        let (server, port) = Application::configure_server(context).await?;

        Ok(Self { server, port })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    async fn configure_server(context: PlannerContext) -> Result<(Server, u16), std::io::Error> {
        let port = context.config.port;
        let workers = context.config.workers;
        let address = format!("0.0.0.0:{}", port);
        let listener = TcpListener::bind(&address)?;
        let port = listener.local_addr()?.port();
        info!("Listening on port {} with {} workers", port, workers);

        let server = HttpServer::new(move || {
            let ctx = context.clone();

            App::new()
                .wrap(Cors::permissive())
                .wrap(middleware::Compress::default())
                .wrap(TracingLogger::default())
                .app_data(web::Data::new(ctx))
                .app_data(web::JsonConfig::default().error_handler(|e, _| bad_client_data(e)))
                .app_data(web::QueryConfig::default().error_handler(|e, _| bad_client_data(e)))
                .app_data(web::PathConfig::default().error_handler(|e, _| bad_client_data(e)))
                .configure(configure_server_api)
        })
        .listen(listener)?
        .workers(workers)
        .run();

        Ok((server, port))
    }

    pub async fn start(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}
