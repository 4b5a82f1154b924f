//! `GET /health`, answered without a database round trip so it stays
//! useful while Postgres is down

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};

const VERSION: &str = env!("CARGO_PKG_VERSION");

async fn liveness() -> Json<Value> {
    Json(json!({ "status": "ok", "version": VERSION }))
}

pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/health", get(liveness))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reports_status_and_crate_version() {
        let Json(body) = liveness().await;
        assert_eq!(body, json!({ "status": "ok", "version": VERSION }));
    }
}
