use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;

pub const HEALTH_PATH: &str = "/kaithheathcheck";

pub fn router() -> Router {
    Router::new().route(HEALTH_PATH, get(|| async { StatusCode::OK }))
}

/// Serve the liveness check. Runs on its own task and shares nothing with the bot.
pub async fn serve(addr: &str) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Health check listening on {}{}", addr, HEALTH_PATH);
    axum::serve(listener, router()).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    #[tokio::test]
    async fn health_path_returns_ok() {
        let response = router()
            .oneshot(Request::builder().uri(HEALTH_PATH).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn other_paths_are_not_found() {
        let response = router()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
