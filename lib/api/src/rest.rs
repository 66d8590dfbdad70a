use actix_cors::Cors;
use actix_web::{web, App, HttpResponse, HttpServer, Result as ActixResult};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info};
use vibematch_core::{
    EmbeddingProvider, Error, Gender, MatchOrchestrator, ProfileStore, UserId, UserProfile, Vector,
};

const NO_MATCH_DETAIL: &str = "No suitable match found";

/// Shared handles for every request handler
pub struct AppState {
    pub orchestrator: MatchOrchestrator,
    pub profiles: Arc<dyn ProfileStore>,
    pub embedder: Arc<dyn EmbeddingProvider>,
}

#[derive(Deserialize)]
struct UploadProfileRequest {
    gender: String,
    #[serde(default)]
    transcript: String,
    /// Computed from the transcript when omitted
    embedding: Option<Vec<f32>>,
}

#[derive(Serialize)]
struct UploadProfileResponse {
    user_id: String,
    transcript: String,
}

#[derive(Deserialize)]
struct MatchQuery {
    looking_for_gender: String,
}

pub struct RestApi;

impl RestApi {
    pub async fn start(state: Arc<AppState>, port: u16) -> std::io::Result<()> {
        info!("REST API listening on 0.0.0.0:{}", port);
        HttpServer::new(move || {
            let cors = Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
                .max_age(3600);

            App::new()
                .wrap(cors)
                .app_data(web::Data::new(state.clone()))
                .configure(Self::configure)
        })
        .bind(("0.0.0.0", port))?
        .run()
        .await
    }

    /// Register routes. The app must carry `web::Data<Arc<AppState>>`.
    pub fn configure(cfg: &mut web::ServiceConfig) {
        cfg.route("/healthz", web::get().to(healthz))
            .route("/profiles/{user_id}", web::put().to(upsert_profile))
            .route("/profiles/{user_id}", web::get().to(get_profile))
            .route("/match_user/{user_id}", web::get().to(match_user));
    }
}

fn detail(message: impl std::fmt::Display) -> serde_json::Value {
    serde_json::json!({ "detail": message.to_string() })
}

fn internal_error(e: &Error) -> HttpResponse {
    error!("request failed: {}", e);
    HttpResponse::InternalServerError().json(detail(e))
}

async fn healthz() -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    })))
}

async fn upsert_profile(
    state: web::Data<Arc<AppState>>,
    path: web::Path<String>,
    req: web::Json<UploadProfileRequest>,
) -> ActixResult<HttpResponse> {
    let user_id = path.into_inner();
    let req = req.into_inner();

    let embedding = match req.embedding {
        Some(data) if data.len() != state.embedder.dim() => {
            let e = Error::InvalidProfile(format!(
                "profile {} has a {}-dimensional embedding, expected {}",
                user_id,
                data.len(),
                state.embedder.dim()
            ));
            return Ok(HttpResponse::BadRequest().json(detail(e)));
        }
        Some(data) => Vector::new(data),
        None => state.embedder.embed(&req.transcript),
    };
    let profile = UserProfile::new(user_id.as_str(), Gender::new(req.gender), req.transcript.clone())
        .with_embedding(embedding);

    match state.profiles.upsert_profile(profile) {
        Ok(()) => Ok(HttpResponse::Ok().json(UploadProfileResponse {
            user_id,
            transcript: req.transcript,
        })),
        Err(e @ Error::InvalidProfile(_)) => Ok(HttpResponse::BadRequest().json(detail(e))),
        Err(e) => Ok(internal_error(&e)),
    }
}

async fn get_profile(
    state: web::Data<Arc<AppState>>,
    path: web::Path<String>,
) -> ActixResult<HttpResponse> {
    let user_id = UserId::new(path.into_inner());

    match state.profiles.get_profile(&user_id) {
        Ok(Some(profile)) => Ok(HttpResponse::Ok().json(profile)),
        Ok(None) => Ok(HttpResponse::NotFound().json(detail("Profile not found"))),
        Err(e) => Ok(internal_error(&e)),
    }
}

async fn match_user(
    state: web::Data<Arc<AppState>>,
    path: web::Path<String>,
    query: web::Query<MatchQuery>,
) -> ActixResult<HttpResponse> {
    let user_id = UserId::new(path.into_inner());
    let gender = Gender::new(query.into_inner().looking_for_gender);

    // Filtering and search are CPU-bound; keep them off the async workers
    let state = state.into_inner();
    let result = web::block(move || state.orchestrator.find_best_match(&user_id, &gender)).await?;

    match result {
        Ok(Some(found)) => Ok(HttpResponse::Ok().json(found)),
        Ok(None) => Ok(HttpResponse::NotFound().json(detail(NO_MATCH_DETAIL))),
        Err(e) => Ok(internal_error(&e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test;
    use vibematch_core::{HashingEmbedder, LexicalKeywordExtractor, MatchConfig, MatchResult};
    use vibematch_storage::MemoryStorage;

    fn test_state(config: MatchConfig) -> (Arc<AppState>, Arc<MemoryStorage>) {
        let storage = Arc::new(MemoryStorage::new());
        let orchestrator = MatchOrchestrator::new(
            storage.clone(),
            storage.clone(),
            Arc::new(LexicalKeywordExtractor::new()),
            &config,
        )
        .unwrap();
        let state = Arc::new(AppState {
            orchestrator,
            profiles: storage.clone(),
            embedder: Arc::new(HashingEmbedder::new(DIM)),
        });
        (state, storage)
    }

    macro_rules! app {
        ($state:expr) => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new($state.clone()))
                    .configure(RestApi::configure),
            )
            .await
        };
    }

    const DIM: usize = 8;

    /// Unit vector along `axis` in the test deployment's dimension
    fn axis(axis: usize) -> Vec<f32> {
        let mut v = vec![0.0; DIM];
        v[axis] = 1.0;
        v
    }

    fn put_profile(id: &str, body: serde_json::Value) -> test::TestRequest {
        test::TestRequest::put()
            .uri(&format!("/profiles/{}", id))
            .set_json(body)
    }

    #[actix_web::test]
    async fn test_match_flow() {
        let (state, storage) = test_state(MatchConfig::default());
        let app = app!(state);

        for (id, gender, embedding, transcript) in [
            ("U1", "M", axis(0), "I love hiking and cooking"),
            ("U2", "F", axis(0), "I love hiking"),
            ("U3", "F", axis(1), "I enjoy painting"),
        ] {
            let req = put_profile(
                id,
                serde_json::json!({"gender": gender, "transcript": transcript, "embedding": embedding}),
            );
            let resp = test::call_service(&app, req.to_request()).await;
            assert_eq!(resp.status(), StatusCode::OK);
        }

        let req = test::TestRequest::get()
            .uri("/match_user/U1?looking_for_gender=F")
            .to_request();
        let result: MatchResult = test::call_and_read_body_json(&app, req).await;
        assert_eq!(result.matched_user_id.as_str(), "U2");
        assert_eq!(result.matched_on, vec!["hiking"]);
        assert!(result.mutual_match);
        assert_eq!(storage.match_log_len(), 2);
    }

    #[actix_web::test]
    async fn test_no_match_is_404() {
        let (state, _) = test_state(MatchConfig::default());
        let app = app!(state);

        let req = test::TestRequest::get()
            .uri("/match_user/ghost?looking_for_gender=F")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["detail"], NO_MATCH_DETAIL);
    }

    #[actix_web::test]
    async fn test_upload_without_embedding_uses_embedder() {
        let (state, storage) = test_state(MatchConfig::default());
        let app = app!(state);

        let resp = test::call_service(
            &app,
            put_profile("U7", serde_json::json!({"gender": "F", "transcript": "jazz piano"})).to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);

        let stored = storage.get_profile(&"U7".into()).unwrap().unwrap();
        assert_eq!(stored.embedding.unwrap().dim(), DIM);

        let req = test::TestRequest::get().uri("/profiles/U7").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["transcript"], "jazz piano");
    }

    #[actix_web::test]
    async fn test_invalid_embedding_is_400() {
        let (state, _) = test_state(MatchConfig::default());
        let app = app!(state);

        let resp = test::call_service(
            &app,
            put_profile("U8", serde_json::json!({"gender": "F", "embedding": []})).to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_wrong_dimension_upload_is_rejected() {
        let (state, storage) = test_state(MatchConfig::default());
        let app = app!(state);

        for (id, gender, transcript) in [("U1", "M", "hiking"), ("U2", "F", "hiking")] {
            let req = put_profile(id, serde_json::json!({"gender": gender, "transcript": transcript}));
            let resp = test::call_service(&app, req.to_request()).await;
            assert_eq!(resp.status(), StatusCode::OK);
        }

        let req = put_profile("U3", serde_json::json!({"gender": "F", "embedding": [1.0, 0.0, 0.0]}));
        let resp = test::call_service(&app, req.to_request()).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert!(storage.get_profile(&"U3".into()).unwrap().is_none());

        // The pool stays searchable
        let req = test::TestRequest::get()
            .uri("/match_user/U1?looking_for_gender=F")
            .to_request();
        let result: MatchResult = test::call_and_read_body_json(&app, req).await;
        assert_eq!(result.matched_user_id.as_str(), "U2");
    }

    #[actix_web::test]
    async fn test_healthz() {
        let (state, _) = test_state(MatchConfig::default());
        let app = app!(state);
        let req = test::TestRequest::get().uri("/healthz").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["status"], "ok");
    }
}
