use std::convert::Infallible;
use std::sync::Arc;

use serde_json::{Value, json};
use tracing::{debug, warn};
use warp::Filter;
use warp::hyper::body::Bytes;

use crate::services::lead_forward::{LeadSink, forward_best_effort};

/// `POST /api/lead`: relays the JSON body unchanged to the sink, if any,
/// and always acknowledges with `{"ok": true}`.
pub fn lead_routes(
    sink: Option<Arc<dyn LeadSink>>,
) -> impl Filter<Extract = (warp::reply::Json,), Error = warp::Rejection> + Clone {
    warp::path!("api" / "lead")
        .and(warp::post())
        .and(warp::body::bytes())
        .and(warp::any().map(move || sink.clone()))
        .and_then(relay_lead)
}

async fn relay_lead(body: Bytes, sink: Option<Arc<dyn LeadSink>>) -> Result<warp::reply::Json, Infallible> {
    let payload = parse_body(&body);
    match sink {
        Some(sink) => {
            forward_best_effort(sink.as_ref(), &payload).await;
        }
        None => debug!("no lead sink configured, relay skipped"),
    }
    Ok(warp::reply::json(&json!({ "ok": true })))
}

/// Unparsable bodies are relayed as an empty object.
fn parse_body(body: &[u8]) -> Value {
    serde_json::from_slice(body).unwrap_or_else(|e| {
        warn!(error = %e, "lead body is not valid JSON");
        json!({})
    })
}
