//! Static file server for the generated site

use anyhow::Result;
use axum::{
    body::Body,
    extract::{Query, State},
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::Site;

/// Server state
struct ServerState {
    public_dir: PathBuf,
}

/// Query string of `/post`
#[derive(Debug, Deserialize)]
struct PostQuery {
    slug: Option<String>,
}

/// Build the router serving `public_dir`
pub fn router(public_dir: PathBuf) -> Router {
    let state = Arc::new(ServerState { public_dir });

    Router::new()
        .route("/post", get(post_handler))
        .route("/blog-index", get(blog_index_handler))
        .fallback(fallback_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the server
pub async fn start(site: &Site, ip: &str, port: u16, open: bool) -> Result<()> {
    let app = router(site.public_dir.clone());

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    let url = format!("http://{}:{}", ip, port);
    println!("Server running at {}", url);
    println!("Press Ctrl+C to stop.");

    if open {
        if let Err(e) = open_browser(&url) {
            tracing::warn!("Failed to open browser: {}", e);
        }
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Serving {:?} on {}", site.public_dir, addr);
    axum::serve(listener, app).await?;

    Ok(())
}

/// `/post?slug=<slug>` serves posts/<slug>.html
async fn post_handler(
    State(state): State<Arc<ServerState>>,
    Query(query): Query<PostQuery>,
    request: Request<Body>,
) -> Response {
    match query
        .slug
        .as_deref()
        .and_then(|slug| post_path(&state.public_dir, slug))
    {
        Some(path) => serve_file(&path, request).await,
        None => not_found(),
    }
}

/// `/blog-index` serves blog-index.html
async fn blog_index_handler(
    State(state): State<Arc<ServerState>>,
    request: Request<Body>,
) -> Response {
    serve_file(&state.public_dir.join("blog-index.html"), request).await
}

/// Everything else: static files from the public directory. A request that
/// misses and has no extension is retried as `<path>.html`, so `/portfolio`
/// finds `portfolio.html`.
async fn fallback_handler(
    State(state): State<Arc<ServerState>>,
    request: Request<Body>,
) -> Response {
    let retry = html_fallback(request.uri().path()).and_then(|uri| {
        Request::builder()
            .method(request.method().clone())
            .uri(uri)
            .body(Body::empty())
            .ok()
    });

    let response = serve_dir(&state.public_dir, request).await;
    match retry {
        Some(retry) if response.status() == StatusCode::NOT_FOUND => {
            serve_dir(&state.public_dir, retry).await
        }
        _ => response,
    }
}

/// The built page for a post slug. Anything but a plain file name is
/// rejected.
fn post_path(public_dir: &Path, slug: &str) -> Option<PathBuf> {
    let is_plain = !slug.is_empty()
        && !slug.starts_with('.')
        && !slug.contains(['/', '\\'])
        && !slug.contains("..");
    if !is_plain {
        return None;
    }
    Some(public_dir.join("posts").join(format!("{}.html", slug)))
}

/// `<path>.html` for an extension-less request path, still percent-encoded
fn html_fallback(uri_path: &str) -> Option<String> {
    let trimmed = uri_path.trim_end_matches('/');
    if trimmed.is_empty() || Path::new(trimmed).extension().is_some() {
        return None;
    }
    Some(format!("{}.html", trimmed))
}

/// Serve from the public directory. Decoding, directory indexes and
/// traversal rejection are left to `ServeDir`.
async fn serve_dir(public_dir: &Path, request: Request<Body>) -> Response {
    let mut service = ServeDir::new(public_dir).append_index_html_on_directories(true);
    match service.try_call(request).await {
        Ok(response) => response.into_response(),
        Err(e) => {
            tracing::error!("Failed to serve from {:?}: {}", public_dir, e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response()
        }
    }
}

/// Serve a single file, or 404 when it is not there
async fn serve_file(path: &Path, request: Request<Body>) -> Response {
    if !path.is_file() {
        return not_found();
    }
    match ServeFile::new(path).try_call(request).await {
        Ok(response) => response.into_response(),
        Err(e) => {
            tracing::error!("Failed to serve {:?}: {}", path, e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response()
        }
    }
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "Not found").into_response()
}

/// Open a URL in the default browser
fn open_browser(url: &str) -> Result<()> {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open").arg(url).spawn()?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open").arg(url).spawn()?;
    }

    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/c", "start", url])
            .spawn()?;
    }

    Ok(())
}
