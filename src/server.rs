use crate::{
    config::Config,
    errors::{into_response, AppError},
    host::{
        registry::{ActionRegistry, CallRequest, CallResponse},
        types::{ActionInfo, Capabilities, ErrorObj},
    },
};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub cfg: Arc<Config>,
    pub registry: Arc<ActionRegistry>,
}

pub async fn serve(cfg: Config, registry: ActionRegistry) -> anyhow::Result<()> {
    let shared = AppState {
        cfg: Arc::new(cfg),
        registry: Arc::new(registry),
    };

    let app = build_router(shared.clone());

    let addr: std::net::SocketAddr =
        format!("{}:{}", shared.cfg.server.bind_addr, shared.cfg.server.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

pub fn build_router(shared: AppState) -> Router {
    let base = shared.cfg.server.base_path.clone();
    use tower_http::limit::RequestBodyLimitLayer;
    use tower_http::trace::TraceLayer;
    let limit_bytes = shared.cfg.limits.max_request_kb * 1024;
    Router::new()
        .route("/healthz", get(health))
        .route(&format!("{base}/capabilities"), get(capabilities))
        .route(
            &format!("{base}/call"),
            post(call).layer(RequestBodyLimitLayer::new(limit_bytes)),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(shared)
}

async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"status":"ok"})))
}

async fn capabilities(State(state): State<AppState>) -> Response {
    let actions: Vec<ActionInfo> = state
        .registry
        .list_ids()
        .into_iter()
        .filter_map(|id| state.registry.get(&id).map(|a| (id, a)))
        .map(|(id, a)| {
            let schema = a.schema();
            ActionInfo {
                id,
                input_schema: schema["input"].clone(),
                output_schema: schema["output"].clone(),
            }
        })
        .collect();
    let caps = Capabilities { version: "1.0", actions };
    (StatusCode::OK, Json(caps)).into_response()
}

async fn call(State(state): State<AppState>, Json(req): Json<CallRequest>) -> Response {
    use std::time::Instant;
    let started = Instant::now();
    let request_id = uuid::Uuid::new_v4().to_string();

    let Some(action) = state.registry.get(&req.action) else {
        let err = AppError::UnknownAction(req.action.clone());
        audit(&request_id, &req.action, "deny", err.code(), started.elapsed().as_millis() as u64, 0);
        return into_response(err).into_response();
    };

    match action.call(req.params).await {
        Ok(result) => {
            let payload = CallResponse { id: req.id, result: Some(result), error: None };
            let bytes_out = serde_json::to_vec(&payload).map(|v| v.len()).unwrap_or(0) as u64;
            audit(&request_id, &req.action, "allow", "OK", started.elapsed().as_millis() as u64, bytes_out);
            (StatusCode::OK, Json(payload)).into_response()
        }
        Err(e) => {
            let payload = CallResponse {
                id: req.id,
                result: None,
                error: Some(ErrorObj { code: e.code().to_string(), message: e.to_string() }),
            };
            let bytes_out = serde_json::to_vec(&payload).map(|v| v.len()).unwrap_or(0) as u64;
            audit(&request_id, &req.action, "error", e.code(), started.elapsed().as_millis() as u64, bytes_out);
            (e.status(), Json(payload)).into_response()
        }
    }
}

fn audit(request_id: &str, action: &str, decision: &str, code: &str, duration_ms: u64, bytes_out: u64) {
    tracing::info!(
        request_id = request_id,
        action = action,
        decision = decision,
        code = code,
        duration_ms = duration_ms,
        bytes_out = bytes_out,
        "audit"
    );
}
