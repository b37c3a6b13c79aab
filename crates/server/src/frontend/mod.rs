//! Serving the Mini App next to the API: a dev-server proxy or the built bundle.

use axum::Router;
use axum_reverse_proxy::ReverseProxy;
use std::path::PathBuf;
use tower_http::services::{ServeDir, ServeFile};

use crate::config::FrontendMode;

/// Attach the frontend to a router that already has its state applied.
///
/// API routes win; everything else goes to the frontend. Static mode answers
/// unknown paths with `index.html` so client-side routes survive a reload.
pub fn with_frontend_fallback(router: Router, mode: &FrontendMode) -> Router {
    match mode {
        FrontendMode::Proxy { target } => {
            tracing::info!("Frontend mode: proxy to {}", target);
            let proxy: Router = ReverseProxy::new("/", target).into();
            router.merge(proxy)
        }
        FrontendMode::Static { dir } => {
            tracing::info!("Frontend mode: static files from {}", dir);
            let path = PathBuf::from(dir);
            let index = ServeFile::new(path.join("index.html"));
            router.fallback_service(ServeDir::new(&path).fallback(index))
        }
        FrontendMode::Disabled => {
            tracing::info!("Frontend mode: disabled (API only)");
            router
        }
    }
}
