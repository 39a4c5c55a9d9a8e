use actix_cors::Cors;
use actix_web::error::InternalError;
use actix_web::http::StatusCode;
use actix_web::{web, App, HttpResponse, HttpServer, Result as ActixResult};
use organix_advisor::{AdviceGenerator, Advisor};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::Instrument;
use uuid::Uuid;

#[derive(Deserialize)]
struct RecommendRequest {
    chemical: Option<String>,
    crop: Option<String>,
    /// Number or numeric string; form inputs send strings
    acres: Option<serde_json::Value>,
}

#[derive(Serialize)]
struct RecommendResponse {
    status: &'static str,
    alternative: String,
    dosage: String,
    application_time: String,
    safety_note: String,
    llm_advice: String,
    confidence: f64,
}

#[derive(Serialize)]
struct ErrorResponse<'a> {
    status: &'static str,
    message: &'a str,
}

fn error_response(status: StatusCode, message: &str) -> HttpResponse {
    HttpResponse::build(status).json(ErrorResponse {
        status: "error",
        message,
    })
}

const MISSING_FIELDS: &str = "Missing required fields.";

fn parse_acres(value: Option<&serde_json::Value>) -> Result<f64, String> {
    match value {
        None | Some(serde_json::Value::Null) => Err(MISSING_FIELDS.to_string()),
        Some(serde_json::Value::Number(n)) => n
            .as_f64()
            .ok_or_else(|| format!("acres must be a positive number, got {}", n)),
        Some(serde_json::Value::String(s)) if s.trim().is_empty() => {
            Err(MISSING_FIELDS.to_string())
        }
        Some(serde_json::Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| format!("acres must be a positive number, got '{}'", s)),
        Some(other) => Err(format!("acres must be a positive number, got {}", other)),
    }
}

pub struct RestApi;

impl RestApi {
    pub async fn start<G>(
        advisor: Arc<Advisor<G>>,
        port: u16,
        cors_origins: Vec<String>,
    ) -> std::io::Result<()>
    where
        G: AdviceGenerator + 'static,
    {
        HttpServer::new(move || {
            let cors = if cors_origins.is_empty() {
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600)
            } else {
                cors_origins
                    .iter()
                    .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
                    .allowed_methods(vec!["GET", "POST"])
                    .allow_any_header()
                    .max_age(3600)
            };

            App::new()
                .wrap(cors)
                .app_data(web::Data::from(advisor.clone()))
                .configure(Self::configure::<G>)
        })
        .bind(("0.0.0.0", port))?
        .run()
        .await
    }

    /// Register routes. The app must carry `web::Data<Advisor<G>>`.
    pub fn configure<G>(cfg: &mut web::ServiceConfig)
    where
        G: AdviceGenerator + 'static,
    {
        let json_config = web::JsonConfig::default().error_handler(|err, _req| {
            let response = error_response(StatusCode::BAD_REQUEST, &err.to_string());
            InternalError::from_response(err, response).into()
        });

        cfg.app_data(json_config)
            .route("/", web::get().to(health))
            .route("/recommend", web::post().to(recommend::<G>));
    }
}

async fn health() -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "status": "Backend Running"
    })))
}

async fn recommend<G>(
    advisor: web::Data<Advisor<G>>,
    req: web::Json<RecommendRequest>,
) -> ActixResult<HttpResponse>
where
    G: AdviceGenerator + 'static,
{
    let request_id = Uuid::new_v4();
    let span = tracing::info_span!("recommend", %request_id);

    async move {
        let chemical = req.chemical.as_deref().unwrap_or_default();
        let crop = req.crop.as_deref().unwrap_or_default();
        if chemical.trim().is_empty() || crop.trim().is_empty() {
            return Ok(error_response(StatusCode::BAD_REQUEST, MISSING_FIELDS));
        }
        let acres = match parse_acres(req.acres.as_ref()) {
            Ok(acres) => acres,
            Err(message) => return Ok(error_response(StatusCode::BAD_REQUEST, &message)),
        };

        match advisor.recommend(chemical, crop, acres).await {
            Ok(rec) => Ok(HttpResponse::Ok().json(RecommendResponse {
                status: "success",
                alternative: rec.alternative,
                dosage: rec.dosage,
                application_time: rec.application_time,
                safety_note: rec.safety_note,
                llm_advice: rec.advice_text,
                confidence: rec.confidence_score,
            })),
            Err(e) if e.is_client_error() => {
                tracing::info!(error = %e, "recommendation refused");
                Ok(error_response(StatusCode::BAD_REQUEST, &e.to_string()))
            }
            Err(e) => {
                tracing::error!(error = %e, "recommendation failed");
                Ok(error_response(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string()))
            }
        }
    }
    .instrument(span)
    .await
}
