use crate::server::SharedState;
use std::convert::Infallible;
use warp::{http::StatusCode, reply::json, Filter, Rejection, Reply};

type Result<T> = std::result::Result<T, Rejection>;

pub fn routes(
    state: SharedState,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    let health_route = warp::path!("health")
        .and(warp::get())
        .and_then(health_handler);
    let stats_route = warp::path!("stats")
        .and(warp::get())
        .and(with_state(state))
        .and_then(stats_handler);
    health_route.or(stats_route)
}

fn with_state(state: SharedState) -> impl Filter<Extract = (SharedState,), Error = Infallible> + Clone {
    warp::any().map(move || state.clone())
}

pub async fn health_handler() -> Result<impl Reply> {
    Ok(StatusCode::OK)
}

pub async fn stats_handler(state: SharedState) -> Result<impl Reply> {
    let stats = state.lock().await.stats();
    Ok(json(&stats))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::Sender;
    use crate::server::ServerState;
    use std::sync::Arc;
    use tokio::sync::{mpsc, Mutex};

    fn state() -> SharedState {
        Arc::new(Mutex::new(ServerState::default()))
    }

    #[tokio::test]
    async fn test_health() {
        let response = warp::test::request()
            .method("GET")
            .path("/health")
            .reply(&routes(state()))
            .await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_stats() {
        let state = state();
        let (tx, _rx) = mpsc::unbounded_channel();
        state
            .lock()
            .await
            .connect("127.0.0.1:7000".parse().unwrap(), Sender(tx));

        let response = warp::test::request()
            .method("GET")
            .path("/stats")
            .reply(&routes(state))
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: serde_json::Value = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(
            body,
            serde_json::json!({ "connected": 1, "queued": 1, "games": 0 })
        );
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let response = warp::test::request()
            .method("GET")
            .path("/register")
            .reply(&routes(state()))
            .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
