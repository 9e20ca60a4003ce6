use std::net::TcpListener;

use actix_web::dev::Server;
use actix_web::web::{self, Data, JsonConfig, ServiceConfig};
use actix_web::{App, HttpServer, ResponseError};
use tracing_actix_web::TracingLogger;

pub mod campaign;
pub mod cli;
pub mod dashboard;
pub mod database;
pub mod error;
pub mod seed;
pub mod typedid;

pub use campaign::{BudgetField, CampaignBody, CreateCampaignBody};
pub use database::{Database, MemoryDatabase, MongoDatabase};
pub use error::Error;

/// Registers the campaign routes along with the json and fallback error
/// handling they rely on.
pub fn configure(cfg: &mut ServiceConfig) {
    cfg.app_data(JsonConfig::default().error_handler(|err, _req| {
        // format json errors with custom format
        Error::InvalidJson(err).into()
    }));

    campaign::endpoints::configure(cfg);

    cfg.default_service(web::to(|| async { Error::PathNotFound.error_response() }));
}

/// Builds the http server on an already bound listener. The returned server
/// does nothing until it is awaited or spawned.
pub fn server(listener: TcpListener, db: Box<dyn Database>) -> Result<Server, Error> {
    let db: Data<Box<dyn Database>> = Data::new(db);

    let server = HttpServer::new(move || {
        App::new()
            .app_data(db.clone())
            .wrap(TracingLogger::default())
            .configure(configure)
    })
    .listen(listener)?
    .run();

    Ok(server)
}
