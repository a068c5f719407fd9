//! Map HTTP endpoint
//!
//! Serves a freshly rendered map on every request. Uses hyper for the HTTP server.
//!
//! Routes:
//! - `GET /` - HTML page
//! - `GET /map.json` - map view as JSON
//! - `GET /legend` - legend HTML fragment
//! - `GET /health` - liveness

use crate::domain::legend::Legend;
use crate::infra::config::Config;
use crate::io::feed::FeedSource;
use crate::io::page::render_page;
use crate::services::renderer::render;
use bytes::Bytes;
use http_body_util::Full;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Method, Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::{debug, error, info};

fn respond(status: StatusCode, content_type: &str, body: impl Into<Bytes>) -> Response<Full<Bytes>> {
    Response::builder()
        .status(status)
        .header("Content-Type", content_type)
        .header("Cache-Control", "no-store")
        .body(Full::new(body.into()))
        .expect("static response should not fail")
}

fn internal_error(e: &serde_json::Error) -> Response<Full<Bytes>> {
    error!(error = %e, "map_serialize_failed");
    respond(StatusCode::INTERNAL_SERVER_ERROR, "text/plain; charset=utf-8", "render failed")
}

/// Handle HTTP requests
async fn handle_request<S: FeedSource + ?Sized>(
    method: &Method,
    path: &str,
    config: &Config,
    source: &S,
) -> Response<Full<Bytes>> {
    debug!(method = %method, path = %path, "map_request");

    match (method, path) {
        (&Method::GET, "/") | (&Method::GET, "/index.html") => {
            let rendered = render(config, source).await;
            rendered.summary.log();
            match render_page(&rendered.view, config.leaflet_url()) {
                Ok(html) => respond(StatusCode::OK, "text/html; charset=utf-8", html),
                Err(e) => internal_error(&e),
            }
        }
        (&Method::GET, "/map.json") => {
            let rendered = render(config, source).await;
            rendered.summary.log();
            match serde_json::to_vec(&rendered.view) {
                Ok(json) => respond(StatusCode::OK, "application/json", json),
                Err(e) => internal_error(&e),
            }
        }
        (&Method::GET, "/legend") => {
            respond(StatusCode::OK, "text/html; charset=utf-8", Legend::magnitude().to_html())
        }
        (&Method::GET, "/health") => respond(StatusCode::OK, "text/plain", "ok"),
        _ => respond(StatusCode::NOT_FOUND, "text/plain", "Not Found"),
    }
}

/// Start the map HTTP server
pub async fn start_map_server<S: FeedSource + 'static>(
    config: Arc<Config>,
    source: Arc<S>,
    mut shutdown: watch::Receiver<bool>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let addr: SocketAddr = format!("{}:{}", config.bind_address(), config.server_port()).parse()?;
    let listener = TcpListener::bind(addr).await?;

    info!(addr = %addr, "map_server_started");

    loop {
        tokio::select! {
            result = listener.accept() => {
                match result {
                    Ok((stream, _addr)) => {
                        let io = TokioIo::new(stream);
                        let config = config.clone();
                        let source = source.clone();

                        tokio::spawn(async move {
                            let service = service_fn(move |req: Request<hyper::body::Incoming>| {
                                let config = config.clone();
                                let source = source.clone();
                                async move {
                                    let response = handle_request(
                                        req.method(),
                                        req.uri().path(),
                                        &config,
                                        source.as_ref(),
                                    )
                                    .await;
                                    Ok::<_, Infallible>(response)
                                }
                            });

                            if let Err(e) = http1::Builder::new()
                                .serve_connection(io, service)
                                .await
                            {
                                error!(error = %e, "map_http_error");
                            }
                        });
                    }
                    Err(e) => {
                        error!(error = %e, "map_accept_error");
                    }
                }
            }
            _ = shutdown.changed() => {
                if *shutdown.borrow() {
                    info!("map_server_shutdown");
                    return Ok(());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::geojson::FeatureCollection;
    use crate::io::feed::FetchError;
    use async_trait::async_trait;
    use http_body_util::BodyExt;

    struct EmptyFeeds;

    #[async_trait]
    impl FeedSource for EmptyFeeds {
        async fn fetch(&self, _url: &str) -> Result<FeatureCollection, FetchError> {
            Ok(FeatureCollection { features: vec![] })
        }
    }

    async fn body_text(response: Response<Full<Bytes>>) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_index_route() {
        let config = Config::default();
        let response = handle_request(&Method::GET, "/", &config, &EmptyFeeds).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["Content-Type"], "text/html; charset=utf-8");
        assert!(body_text(response).await.contains("<!DOCTYPE html>"));
    }

    #[tokio::test]
    async fn test_map_json_route() {
        let config = Config::default();
        let response = handle_request(&Method::GET, "/map.json", &config, &EmptyFeeds).await;
        assert_eq!(response.status(), StatusCode::OK);

        let view: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(view["overlays"]["earthquakes"]["markers"], serde_json::json!([]));
        assert_eq!(view["initial_layers"], serde_json::json!(["Outdoor Map", "Earthquakes", "FaultLines"]));
    }

    #[tokio::test]
    async fn test_health_legend_and_not_found() {
        let config = Config::default();

        let health = handle_request(&Method::GET, "/health", &config, &EmptyFeeds).await;
        assert_eq!(body_text(health).await, "ok");

        let legend = handle_request(&Method::GET, "/legend", &config, &EmptyFeeds).await;
        assert!(body_text(legend).await.contains("5+"));

        let missing = handle_request(&Method::POST, "/", &config, &EmptyFeeds).await;
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    }
}
