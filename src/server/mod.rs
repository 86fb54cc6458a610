//! HTTP server for the site

use anyhow::Result;
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::Marquee;

/// Cache window for pages with no CMS content behind them.
const STATIC_PAGE_SECS: u64 = 3600;

/// Start the site server.
pub async fn start(app: Marquee, ip: &str, port: u16) -> Result<()> {
    let router = router(app);

    // Handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}", ip, port);
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}

/// Build the site router.
pub fn router(app: Marquee) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/about", get(about))
        .route("/blog", get(blog_index))
        .route("/blog/:slug", get(blog_post))
        .route("/sitemap.xml", get(sitemap))
        .route("/healthz", get(healthz))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(app))
}

/// Cache-Control value declaring the revalidation window for a page. The
/// CDN in front of the site enforces it; this code only declares it.
fn cache_value(secs: u64) -> String {
    format!(
        "public, s-maxage={}, stale-while-revalidate={}",
        secs, secs
    )
}

fn html_page(html: String, secs: u64) -> Response {
    ([(header::CACHE_CONTROL, cache_value(secs))], Html(html)).into_response()
}

/// A template that fails to render is a bug, not missing content.
fn render_error(err: anyhow::Error) -> Response {
    tracing::error!("template render failed: {}", err);
    (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
}

async fn home(State(app): State<Arc<Marquee>>) -> Response {
    match app.pages.home() {
        Ok(html) => html_page(html, STATIC_PAGE_SECS),
        Err(err) => render_error(err),
    }
}

async fn about(State(app): State<Arc<Marquee>>) -> Response {
    match app.pages.about() {
        Ok(html) => html_page(html, STATIC_PAGE_SECS),
        Err(err) => render_error(err),
    }
}

async fn blog_index(State(app): State<Arc<Marquee>>) -> Response {
    let posts = app.loader.posts().await;
    match app.pages.blog_index(&posts) {
        Ok(html) => html_page(html, app.config.revalidate.list_secs),
        Err(err) => render_error(err),
    }
}

async fn blog_post(State(app): State<Arc<Marquee>>, Path(slug): Path<String>) -> Response {
    match app.loader.post_by_slug(&slug).await {
        Some(post) => match app.pages.post(&post) {
            Ok(html) => html_page(html, app.config.revalidate.post_secs),
            Err(err) => render_error(err),
        },
        None => not_found_page(&app),
    }
}

async fn sitemap(State(app): State<Arc<Marquee>>) -> Response {
    let slugs = app.loader.slugs().await;
    let xml = app.pages.sitemap(&slugs);
    (
        [
            (header::CONTENT_TYPE, "application/xml".to_string()),
            (
                header::CACHE_CONTROL,
                cache_value(app.config.revalidate.list_secs),
            ),
        ],
        xml,
    )
        .into_response()
}

/// Liveness check for load balancers. Never calls the CMS.
async fn healthz() -> Json<serde_json::Value> {
    Json(json!({"status": "ok"}))
}

async fn not_found(State(app): State<Arc<Marquee>>) -> Response {
    not_found_page(&app)
}

fn not_found_page(app: &Marquee) -> Response {
    match app.pages.not_found() {
        Ok(html) => (
            StatusCode::NOT_FOUND,
            [(
                header::CACHE_CONTROL,
                cache_value(app.config.revalidate.post_secs),
            )],
            Html(html),
        )
            .into_response(),
        Err(err) => render_error(err),
    }
}
