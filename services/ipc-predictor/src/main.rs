//! HTTP front for the keyword based IPC section predictor.

use actix_cors::Cors;
use actix_web::{web, App, HttpResponse, HttpServer, Responder};
use shared::dto::{ErrorResponse, PredictRequest, PredictResponse};
use shared::ipc_predictor;
use tracing::{error, info};

const PORT: u16 = 8084;

async fn health() -> impl Responder {
    "OK"
}

/// `POST /api/predict-ipc`. The body is parsed by hand so a malformed payload
/// gets the JSON error body instead of actix's plain-text rejection.
async fn predict_ipc(body: web::Bytes) -> HttpResponse {
    let req: PredictRequest = match serde_json::from_slice(&body) {
        Ok(req) => req,
        Err(e) => {
            error!(%e, "unreadable prediction request");
            return HttpResponse::InternalServerError()
                .json(ErrorResponse::new("Failed to process prediction"));
        }
    };

    let Some(description) = req.description.filter(|d| !d.is_empty()) else {
        return HttpResponse::BadRequest().json(ErrorResponse::new("Description is required"));
    };

    let predictions = ipc_predictor::predict(&description);
    info!(
        chars = description.chars().count(),
        results = predictions.len(),
        top = predictions.first().map(|p| p.section.as_str()).unwrap_or("-"),
        "predicted IPC sections"
    );
    HttpResponse::Ok().json(PredictResponse { predictions })
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    shared::logging::init();
    info!(port = PORT, "starting ipc-predictor");
    HttpServer::new(|| {
        App::new()
            .wrap(Cors::permissive())
            .route("/health", web::get().to(health))
            .route("/api/predict-ipc", web::post().to(predict_ipc))
    })
    .bind(("0.0.0.0", PORT))?
    .run()
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{test, App};
    use serde_json::{json, Value};

    macro_rules! app {
        () => {
            test::init_service(
                App::new()
                    .route("/health", web::get().to(health))
                    .route("/api/predict-ipc", web::post().to(predict_ipc)),
            )
            .await
        };
    }

    #[actix_rt::test]
    async fn health_ok() {
        let app = app!();
        let req = test::TestRequest::get().uri("/health").to_request();
        let body = test::call_and_read_body(&app, req).await;
        assert_eq!(body, "OK");
    }

    #[actix_rt::test]
    async fn theft_description_predicts_378() {
        let app = app!();
        let req = test::TestRequest::post()
            .uri("/api/predict-ipc")
            .set_json(json!({"description": "Someone stole my scooter outside the office"}))
            .to_request();
        let body: PredictResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body.predictions[0].section, "IPC 378");
        assert!(body.predictions.len() <= 5);
    }

    #[actix_rt::test]
    async fn missing_or_empty_description_is_400() {
        let app = app!();
        for payload in [json!({}), json!({"description": ""}), json!({"description": null})] {
            let req = test::TestRequest::post()
                .uri("/api/predict-ipc")
                .set_json(&payload)
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{payload}");
            let body: Value = test::read_body_json(resp).await;
            assert_eq!(body, json!({"error": "Description is required"}));
        }
    }

    #[actix_rt::test]
    async fn malformed_body_is_500() {
        let app = app!();
        for raw in ["not json", r#"{"description": 42}"#] {
            let req = test::TestRequest::post()
                .uri("/api/predict-ipc")
                .insert_header(("content-type", "application/json"))
                .set_payload(raw)
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
            let body: Value = test::read_body_json(resp).await;
            assert_eq!(body, json!({"error": "Failed to process prediction"}));
        }
    }
}
