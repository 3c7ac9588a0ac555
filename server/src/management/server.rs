use crate::management::artifact_manager::ArtifactManager;
use crate::management::cleanup_manager::CleanupManager;
use crate::utils::config::Config;
use crate::utils::logging::*;
use crate::web::api::{config, detection, invoice, log};
use actix_web::{App, HttpServer};
use std::time::Duration;
use tokio::time::sleep;

pub struct Server;

impl Server {
    pub async fn run() {
        logging_information!(SystemEntry::Initializing);
        Config::now().await;
        ArtifactManager::initialize().await;
        CleanupManager::run().await;
        let http_server = loop {
            let config = Config::now().await;
            let http_server = HttpServer::new(|| {
                let cors = actix_cors::Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600);
                App::new()
                    .wrap(cors)
                    .service(config::initialize())
                    .service(detection::initialize())
                    .service(invoice::initialize())
                    .service(log::initialize())
            })
            .bind(format!("0.0.0.0:{}", config.http_server_bind_port));
            match http_server {
                Ok(http_server) => break http_server,
                Err(err) => {
                    logging_critical!(NetworkEntry::BindPortError(err));
                    sleep(Duration::from_secs(config.bind_retry_duration)).await;
                    continue;
                }
            }
        };
        logging_information!(SystemEntry::WebReady);
        logging_information!(SystemEntry::InitializeComplete);
        logging_information!(SystemEntry::Online);
        if let Err(err) = http_server.run().await {
            logging_emergency!(SystemEntry::WebPanic(err));
        }
    }

    pub async fn terminate() {
        logging_information!(SystemEntry::Terminating);
        CleanupManager::terminate().await;
        logging_information!(SystemEntry::TerminateComplete);
    }
}
