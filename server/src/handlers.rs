use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use floorplan_shared::{
    ActionEvent, EventAck, FeedbackAck, FeedbackEvent, Health, PredictionResponse,
};
use uuid::Uuid;

use crate::logic::{apply_feedback, predict, sanitize_event};
use crate::state::AppState;

pub async fn event_handler(
    State(state): State<AppState>,
    Json(event): Json<ActionEvent>,
) -> Result<Json<EventAck>, StatusCode> {
    let event = sanitize_event(event).ok_or(StatusCode::UNPROCESSABLE_ENTITY)?;
    let action = event.action;
    let points = event.coords.len();
    let count = {
        let mut store = state.store.write().await;
        store.add(event);
        store.len()
    };
    log::debug!(
        "Event {} points={points} stored={count}",
        action.wire_name()
    );
    Ok(Json(EventAck { ok: true, count }))
}

pub async fn predict_handler(State(state): State<AppState>) -> Json<PredictionResponse> {
    let history = state.store.read().await.last(state.context);
    let prediction_id = Uuid::new_v4().to_string();
    let response = predict(&history, prediction_id.clone());
    state.predictor.write().await.current_id = Some(prediction_id);
    log::debug!(
        "Predict from {} events -> {:?} {:?}",
        history.len(),
        response.predicted_action,
        response.predicted_coords
    );
    Json(response)
}

pub async fn feedback_handler(
    State(state): State<AppState>,
    Json(feedback): Json<FeedbackEvent>,
) -> Json<FeedbackAck> {
    let mut predictor = state.predictor.write().await;
    if apply_feedback(&mut predictor, &feedback) {
        log::info!(
            "Prediction {} confirmed reward={} accepted={} total_reward={}",
            feedback.prediction_id,
            feedback.reward,
            predictor.accepted,
            predictor.total_reward
        );
    } else {
        log::debug!("Ignoring feedback for {}", feedback.prediction_id);
    }
    Json(FeedbackAck { ok: true })
}

pub async fn health_handler() -> Json<Health> {
    Json(Health {
        status: "ok".to_string(),
    })
}
