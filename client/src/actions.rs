use chrono::Utc;

use floorplan_shared::ActionEvent;

use crate::state::{Action, Stroke, Tool};

/// Turns a completed stroke into a committed action. Empty strokes (a press
/// with no recorded sample) produce nothing.
pub fn finalize(stroke: Stroke, tool: Tool) -> Option<Action> {
    if stroke.is_empty() {
        return None;
    }
    Some(Action {
        kind: tool.action_kind(),
        points: stroke.points,
        created_at: Utc::now(),
    })
}

pub fn action_event(action: &Action) -> ActionEvent {
    ActionEvent::new(action.kind, &action.points, action.timestamp_secs())
}
