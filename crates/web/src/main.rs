//! RNAi Design Web Server
//!
//! API HTTP du moteur de design RNAi

use actix_cors::Cors;
use actix_web::{error, web, App, HttpResponse, HttpServer};
use rnai_core::{seeded, DesignEngine};
use rnai_storage::{DesignPool, DesignService};
use tracing_actix_web::TracingLogger;

mod config;
mod models;
mod routes;

use config::AppConfig;
use models::{AppState, ErrorResponse};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Charger la configuration
    let config = match AppConfig::load_from_file("config.toml") {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Erreur de chargement de la configuration: {}. Utilisation des valeurs par défaut.", e);
            AppConfig::default()
        }
    };

    // Initialiser le logging
    init_logging(&config.logging);

    let pool = DesignPool::open(config.storage.clone())
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;
    tracing::info!("{} designs chargés", pool.len());

    let app_state = web::Data::new(AppState {
        service: DesignService::new(DesignEngine::new(config.engine.clone()), pool),
        rng: tokio::sync::Mutex::new(seeded(config.engine.seed)),
        config: config.clone(),
    });

    // Corps JSON invalides (type de construction inconnu, champ manquant) → 400
    let json_config = web::JsonConfig::default().error_handler(|err, _req| {
        let response = HttpResponse::BadRequest().json(ErrorResponse::with_details(
            "Requête invalide".to_string(),
            err.to_string(),
            400,
        ));
        error::InternalError::from_response(err, response).into()
    });

    tracing::info!(
        "🧬 Démarrage du serveur RNAi sur http://{}:{}",
        config.server.host,
        config.server.port
    );

    HttpServer::new(move || {
        // Configurer CORS
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);

        App::new()
            .wrap(TracingLogger::default())
            .wrap(cors)
            .app_data(app_state.clone())
            .app_data(json_config.clone())
            .configure(routes::configure)
    })
    .workers(config.server.workers)
    .bind((config.server.host.clone(), config.server.port))?
    .run()
    .await
}

/// Initialise le système de logging
fn init_logging(config: &crate::config::LoggingConfig) {
    let filter = match config.level.to_lowercase().as_str() {
        "trace" => "trace",
        "debug" => "debug",
        "warn" => "warn",
        "error" => "error",
        _ => "info",
    };

    match config.format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::fmt()
                .json()
                .with_env_filter(filter)
                .init();
        }
        _ => {
            tracing_subscriber::fmt()
                .compact()
                .with_env_filter(filter)
                .init();
        }
    }
}
