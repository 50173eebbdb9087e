use floorplan_shared::{ActionEvent, ActionKind, FeedbackEvent, Point, PredictionResponse};

use crate::state::{PredictorState, MAX_POINTS_PER_EVENT};

pub fn sanitize_event(mut event: ActionEvent) -> Option<ActionEvent> {
    event
        .coords
        .retain(|[x, y]| x.is_finite() && y.is_finite());
    event.coords.truncate(MAX_POINTS_PER_EVENT);
    if !event.timestamp.is_finite() {
        return None;
    }
    Some(event)
}

fn centroid(event: &ActionEvent) -> Option<Point> {
    if event.coords.is_empty() {
        return None;
    }
    let count = event.coords.len() as f64;
    let (sum_x, sum_y) = event
        .coords
        .iter()
        .fold((0.0_f64, 0.0_f64), |(sx, sy), [x, y]| (sx + *x, sy + *y));
    Some(Point::new(sum_x / count, sum_y / count))
}

/// Guesses the next action from recent history without any learned state:
/// the dominant kind, placed one step further along the last movement.
pub fn predict(history: &[ActionEvent], prediction_id: String) -> PredictionResponse {
    let Some(last) = history.last() else {
        return PredictionResponse {
            predicted_action: Some(ActionKind::RoomPlacement.wire_name().to_string()),
            predicted_coords: None,
            confidence: Some(0.0),
            prediction_id: Some(prediction_id),
        };
    };

    let rooms = history
        .iter()
        .filter(|event| event.action == ActionKind::RoomPlacement)
        .count();
    let paths = history.len() - rooms;
    let kind = if rooms == paths {
        last.action
    } else if rooms > paths {
        ActionKind::RoomPlacement
    } else {
        ActionKind::PathSegment
    };
    let confidence = rooms.max(paths) as f64 / history.len() as f64;

    let mut centroids = history.iter().rev().filter_map(centroid);
    let coords = match (centroids.next(), centroids.next()) {
        (Some(latest), Some(previous)) => Some(
            Point::new(
                latest.x + (latest.x - previous.x),
                latest.y + (latest.y - previous.y),
            )
            .clamp(),
        ),
        (Some(latest), None) => Some(latest.clamp()),
        _ => None,
    };

    PredictionResponse {
        predicted_action: Some(kind.wire_name().to_string()),
        predicted_coords: coords.map(Point::to_pair),
        confidence: Some(confidence),
        prediction_id: Some(prediction_id),
    }
}

/// Only feedback for the prediction handed out last is counted.
pub fn apply_feedback(state: &mut PredictorState, feedback: &FeedbackEvent) -> bool {
    if state.current_id.as_deref() != Some(feedback.prediction_id.as_str()) {
        return false;
    }
    state.current_id = None;
    state.accepted += 1;
    state.total_reward += i64::from(feedback.reward);
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(action: ActionKind, coords: Vec<[f64; 2]>) -> ActionEvent {
        ActionEvent {
            action,
            coords,
            timestamp: 0.0,
        }
    }

    #[test]
    fn no_history_means_no_coordinates() {
        let response = predict(&[], "id".into());
        assert_eq!(response.predicted_coords, None);
        assert_eq!(response.prediction_id.as_deref(), Some("id"));
    }

    #[test]
    fn majority_kind_and_extrapolated_anchor() {
        let history = vec![
            event(ActionKind::RoomPlacement, vec![[0.1, 0.1], [0.3, 0.3]]),
            event(ActionKind::PathSegment, vec![[0.3, 0.3]]),
            event(ActionKind::RoomPlacement, vec![[0.4, 0.3], [0.6, 0.5]]),
        ];
        let response = predict(&history, "id".into());
        assert_eq!(response.predicted_action.as_deref(), Some("place_room"));
        let [x, y] = response.predicted_coords.unwrap();
        assert!((x - 0.7).abs() < 1e-9);
        assert!((y - 0.5).abs() < 1e-9);
        let confidence = response.confidence.unwrap();
        assert!((confidence - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn tie_goes_to_latest_kind_and_anchor_is_clamped() {
        let history = vec![
            event(ActionKind::RoomPlacement, vec![[0.2, 0.2]]),
            event(ActionKind::PathSegment, vec![[0.9, 0.9]]),
        ];
        let response = predict(&history, "id".into());
        assert_eq!(response.predicted_action.as_deref(), Some("pathway_segment"));
        assert_eq!(response.predicted_coords, Some([1.0, 1.0]));
        assert_eq!(response.confidence, Some(0.5));
    }

    #[test]
    fn feedback_requires_current_prediction() {
        let mut state = PredictorState {
            current_id: Some("p-1".into()),
            ..PredictorState::default()
        };
        let stale = FeedbackEvent {
            prediction_id: "p-0".into(),
            reward: 1,
        };
        assert!(!apply_feedback(&mut state, &stale));
        let current = FeedbackEvent {
            prediction_id: "p-1".into(),
            reward: 1,
        };
        assert!(apply_feedback(&mut state, &current));
        assert_eq!(state.accepted, 1);
        assert_eq!(state.total_reward, 1);
        assert!(!apply_feedback(&mut state, &current));
    }

    #[test]
    fn sanitize_drops_bad_points() {
        let event = event(
            ActionKind::PathSegment,
            vec![[0.1, f64::NAN], [0.2, 0.2]],
        );
        let event = sanitize_event(event).unwrap();
        assert_eq!(event.coords, vec![[0.2, 0.2]]);
    }
}
