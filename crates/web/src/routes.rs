//! Routes de l'API web

use actix_web::{get, post, web, HttpResponse, Responder};
use rnai_core::{seeded, DesignId, DesignRequest, NoiseSource, ValidationRequest};
use tracing::{info, instrument, warn};

use crate::models::{ApiError, AppState, BenchmarkRequest, DesignListResponse, SimulateRequest};

fn parse_id(raw: &str) -> Result<DesignId, ApiError> {
    Ok(raw.parse::<DesignId>()?)
}

/// Tire une graine du générateur partagé; le verrou est relâché au retour
async fn draw_seed(data: &web::Data<AppState>) -> u64 {
    data.rng.lock().await.next_seed()
}

/// Génère, score et enregistre des designs
#[post("/api/designs")]
#[instrument(skip(data, request), fields(construct = %request.construct_type))]
pub async fn create_designs(
    data: web::Data<AppState>,
    request: web::Json<DesignRequest>,
) -> Result<HttpResponse, ApiError> {
    let seed = draw_seed(&data).await;
    let state = data.clone();
    let request = request.into_inner();

    // Scoring et écriture disque hors de l'exécuteur async
    let outcome = web::block(move || {
        let outcome = state.service.design(&request, &mut seeded(seed));
        if outcome.is_ok() {
            if let Err(e) = state.service.store().flush() {
                warn!("Échec de persistance du pool: {}", e);
            }
        }
        outcome
    })
    .await??;

    info!(
        "{} designs créés pour la cible {}",
        outcome.designs.len(),
        outcome.target_id
    );
    Ok(HttpResponse::Created().json(outcome))
}

/// Valide un guide contre une cible
#[post("/api/validate")]
#[instrument(skip(data, request))]
pub async fn validate_guide(
    data: web::Data<AppState>,
    request: web::Json<ValidationRequest>,
) -> Result<HttpResponse, ApiError> {
    let seed = draw_seed(&data).await;
    let state = data.clone();
    let request = request.into_inner();

    let result = web::block(move || state.service.validate(&request, &mut seeded(seed))).await?;
    Ok(HttpResponse::Ok().json(result))
}

#[get("/api/designs")]
#[instrument(skip(data))]
pub async fn list_designs(data: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let designs = data.service.list()?;
    Ok(HttpResponse::Ok().json(DesignListResponse {
        total: designs.len(),
        designs,
    }))
}

#[get("/api/designs/{id}")]
#[instrument(skip(data))]
pub async fn get_design(
    data: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let record = data.service.get(parse_id(&id)?)?;
    Ok(HttpResponse::Ok().json(record))
}

/// Prédiction d'efficacité d'un design enregistré
#[get("/api/designs/{id}/efficiency")]
#[instrument(skip(data))]
pub async fn design_efficiency(
    data: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let prediction = data.service.predict_efficiency(parse_id(&id)?)?;
    Ok(HttpResponse::Ok().json(prediction))
}

/// Simule une expérience sur un design enregistré
#[post("/api/designs/{id}/simulate")]
#[instrument(skip(data, request))]
pub async fn simulate_experiment(
    data: web::Data<AppState>,
    id: web::Path<String>,
    request: web::Json<SimulateRequest>,
) -> Result<HttpResponse, ApiError> {
    let id = parse_id(&id)?;
    let seed = draw_seed(&data).await;
    let state = data.clone();
    let request = request.into_inner();

    let result = web::block(move || {
        state
            .service
            .simulate(id, request.experiment_type, &request.parameters, &mut seeded(seed))
    })
    .await??;
    Ok(HttpResponse::Ok().json(result))
}

/// Compare des designs enregistrés
#[post("/api/benchmark")]
#[instrument(skip(data, request), fields(axis = %request.axis))]
pub async fn benchmark_designs(
    data: web::Data<AppState>,
    request: web::Json<BenchmarkRequest>,
) -> Result<HttpResponse, ApiError> {
    let seed = draw_seed(&data).await;
    let state = data.clone();
    let request = request.into_inner();

    let result = web::block(move || {
        state
            .service
            .benchmark(&request.design_ids, request.axis, &mut seeded(seed))
    })
    .await??;
    Ok(HttpResponse::Ok().json(result))
}

/// Route pour la santé de l'API
#[get("/health")]
pub async fn health_check(data: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now(),
        "version": env!("CARGO_PKG_VERSION"),
        "designs": data.service.store().len(),
        "engine": data.config.engine
    }))
}

/// Enregistre toutes les routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(create_designs)
        .service(validate_guide)
        .service(list_designs)
        .service(get_design)
        .service(design_efficiency)
        .service(simulate_experiment)
        .service(benchmark_designs)
        .service(health_check);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use actix_web::http::StatusCode;
    use actix_web::{test, App};
    use rnai_core::{seeded, DesignEngine};
    use rnai_storage::{DesignOutcome, DesignPool};

    const TARGET: &str = "GGCATGCTACGTAGCATGCATGCCTTAGGACCGTAAGCTTGCAGGTCAGTCCGATGACCTAGG";

    fn state() -> web::Data<AppState> {
        let config = AppConfig::default();
        web::Data::new(AppState {
            service: rnai_storage::DesignService::new(
                DesignEngine::new(config.engine.clone()),
                DesignPool::default(),
            ),
            rng: tokio::sync::Mutex::new(seeded(config.engine.seed)),
            config,
        })
    }

    fn design_body() -> serde_json::Value {
        serde_json::json!({
            "target_sequence": TARGET,
            "construct_type": "siRNA",
            "design_parameters": { "filter_repeats": false, "gc_min": 0.0, "gc_max": 1.0 },
            "max_designs": 3
        })
    }

    #[actix_web::test]
    async fn test_design_lifecycle() {
        let app = test::init_service(App::new().app_data(state()).configure(configure)).await;

        let req = test::TestRequest::post()
            .uri("/api/designs")
            .set_json(design_body())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let outcome: DesignOutcome = test::read_body_json(resp).await;
        assert_eq!(outcome.designs.len(), 3);
        let id = outcome.designs[0].id;

        let req = test::TestRequest::get().uri("/api/designs").to_request();
        let list: DesignListResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(list.total, 3);

        let req = test::TestRequest::get()
            .uri(&format!("/api/designs/{}/efficiency", id))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let req = test::TestRequest::post()
            .uri(&format!("/api/designs/{}/simulate", id))
            .set_json(serde_json::json!({ "experiment_type": "in_silico" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let ids: Vec<_> = outcome.designs.iter().map(|d| d.id).collect();
        let req = test::TestRequest::post()
            .uri("/api/benchmark")
            .set_json(serde_json::json!({ "design_ids": ids, "axis": "specificity" }))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["rankings"].as_array().unwrap().len(), 3);
    }

    #[actix_web::test]
    async fn test_concurrent_designs_release_rng() {
        let data = state();
        let app = test::init_service(App::new().app_data(data.clone()).configure(configure)).await;

        let first = test::TestRequest::post().uri("/api/designs").set_json(design_body()).to_request();
        let second = test::TestRequest::post().uri("/api/designs").set_json(design_body()).to_request();
        let (a, b) = tokio::join!(test::call_service(&app, first), test::call_service(&app, second));
        assert_eq!(a.status(), StatusCode::CREATED);
        assert_eq!(b.status(), StatusCode::CREATED);

        let a: DesignOutcome = test::read_body_json(a).await;
        let b: DesignOutcome = test::read_body_json(b).await;
        assert_eq!(a.target_id, b.target_id);
        assert_ne!(a.designs[0].id, b.designs[0].id);

        assert!(data.rng.try_lock().is_ok());
        assert_eq!(data.service.store().len(), 6);
        assert_eq!(data.service.store().target_count(), 1);
    }

    #[actix_web::test]
    async fn test_error_mapping() {
        let app = test::init_service(App::new().app_data(state()).configure(configure)).await;

        let missing = DesignId::generate();
        let req = test::TestRequest::get()
            .uri(&format!("/api/designs/{}", missing))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::get().uri("/api/designs/not-a-uuid").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let mut body = design_body();
        body["target_sequence"] = serde_json::json!("ACGTXACGTACGTACGTACGTACGT");
        let req = test::TestRequest::post().uri("/api/designs").set_json(body).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::post()
            .uri("/api/benchmark")
            .set_json(serde_json::json!({ "design_ids": [missing], "axis": "safety" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_validate_and_health() {
        let app = test::init_service(App::new().app_data(state()).configure(configure)).await;

        let req = test::TestRequest::post()
            .uri("/api/validate")
            .set_json(serde_json::json!({
                "guide_sequence": "ACGTNACGTACGTACGTACGT",
                "target_sequence": TARGET,
                "construct_type": "siRNA"
            }))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["is_valid"], false);

        let req = test::TestRequest::get().uri("/health").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["status"], "healthy");
    }
}
