use actix_cors::Cors;
use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer, Responder};
use awc::Client;
use shared::config::Settings;
use tracing::{debug, error, info, warn};

const PORT: u16 = 8080;
const FORWARDED_HEADERS: &[&str] = &[
    "content-type",
    "x-wallet-address",
    "x-wallet-signature",
    "x-wallet-issued-at",
];

/// Downstream base URLs.
#[derive(Clone)]
struct Upstreams {
    predictor: String,
    assistant: String,
    fir: String,
}

impl From<&Settings> for Upstreams {
    fn from(settings: &Settings) -> Self {
        let trim = |url: &str| url.trim_end_matches('/').to_string();
        Self {
            predictor: trim(&settings.predictor_url),
            assistant: trim(&settings.assistant_url),
            fir: trim(&settings.fir_service_url),
        }
    }
}

async fn health(upstreams: web::Data<Upstreams>) -> impl Responder {
    debug!("health check request");
    let client = Client::default();
    for base in [&upstreams.predictor, &upstreams.assistant, &upstreams.fir] {
        let url = format!("{base}/health");
        match client.get(&url).send().await {
            Ok(res) if res.status().is_success() => {}
            Ok(res) => {
                warn!(%url, status = %res.status(), "upstream unhealthy");
                return HttpResponse::ServiceUnavailable().finish();
            }
            Err(e) => {
                warn!(%url, %e, "upstream unreachable");
                return HttpResponse::ServiceUnavailable().finish();
            }
        }
    }
    HttpResponse::Ok().body("OK")
}

/// Relays the request unchanged (method, path, query, body) to `base`,
/// keeping the wallet authorization headers.
async fn forward(base: &str, req: &HttpRequest, body: web::Bytes) -> HttpResponse {
    let url = match req.uri().query() {
        Some(q) => format!("{base}{}?{q}", req.path()),
        None => format!("{base}{}", req.path()),
    };
    info!(method = %req.method(), %url, "forwarding request");

    let mut forward = Client::default().request(req.method().clone(), &url);
    for name in FORWARDED_HEADERS {
        if let Some(value) = req.headers().get(*name) {
            forward = forward.insert_header((*name, value.clone()));
        }
    }

    let mut res = match forward.send_body(body).await {
        Ok(r) => r,
        Err(e) => {
            error!(%url, %e, "upstream request failed");
            return HttpResponse::BadGateway().body(format!("{e}"));
        }
    };
    let status = res.status();
    let content_type = res.headers().get("content-type").cloned();
    let bytes = res.body().await.unwrap_or_default();

    let mut out = HttpResponse::build(status);
    if let Some(ct) = content_type {
        out.insert_header(("content-type", ct));
    }
    out.body(bytes)
}

async fn to_predictor(
    upstreams: web::Data<Upstreams>,
    req: HttpRequest,
    body: web::Bytes,
) -> HttpResponse {
    forward(&upstreams.predictor, &req, body).await
}

async fn to_assistant(
    upstreams: web::Data<Upstreams>,
    req: HttpRequest,
    body: web::Bytes,
) -> HttpResponse {
    forward(&upstreams.assistant, &req, body).await
}

async fn to_fir_service(
    upstreams: web::Data<Upstreams>,
    req: HttpRequest,
    body: web::Bytes,
) -> HttpResponse {
    forward(&upstreams.fir, &req, body).await
}

fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health))
        .route("/api/predict-ipc", web::post().to(to_predictor))
        .route("/api/chat", web::post().to(to_assistant))
        .service(
            web::resource(vec![
                "/api/fir/{tail:.*}",
                "/api/officers",
                "/api/officers/{tail:.*}",
                "/api/wallet/{tail:.*}",
            ])
            .to(to_fir_service),
        );
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    shared::logging::init();
    info!(port = PORT, "starting api-gateway");

    let settings = Settings::new().unwrap_or_else(|e| {
        warn!(%e, "invalid settings, using defaults");
        Settings::default()
    });
    let upstreams = web::Data::new(Upstreams::from(&settings));

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .app_data(upstreams.clone())
            .configure(configure)
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

    fn upstream(base: &str) -> Upstreams {
        Upstreams {
            predictor: base.to_string(),
            assistant: base.to_string(),
            fir: base.to_string(),
        }
    }

    #[actix_rt::test]
    async fn health_reports_unreachable_upstreams() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(upstream("http://127.0.0.1:9")))
                .configure(configure),
        )
        .await;
        let req = test::TestRequest::get().uri("/health").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[actix_rt::test]
    async fn forwarding_failure_is_bad_gateway() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(upstream("http://127.0.0.1:9")))
                .configure(configure),
        )
        .await;
        for (method, uri) in [
            (actix_web::http::Method::POST, "/api/chat"),
            (actix_web::http::Method::GET, "/api/fir/1"),
            (actix_web::http::Method::DELETE, "/api/officers/0xabc"),
        ] {
            let req = test::TestRequest::default()
                .method(method)
                .uri(uri)
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::BAD_GATEWAY, "{uri}");
        }
    }

    #[::core::prelude::v1::test]
    fn upstream_urls_are_trimmed() {
        let mut settings = Settings::default();
        settings.fir_service_url = "http://fir:8086/".into();
        let upstreams = Upstreams::from(&settings);
        assert_eq!(upstreams.fir, "http://fir:8086");
        assert_eq!(upstreams.predictor, "http://ipc-predictor:8084");
    }
}
