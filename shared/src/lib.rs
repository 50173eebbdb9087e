use serde::{Deserialize, Serialize};

pub mod wire;

pub use wire::{ActionEvent, EventAck, FeedbackAck, FeedbackEvent, Health, PredictionResponse};

pub const EVENT_PATH: &str = "/api/event";
pub const PREDICT_PATH: &str = "/api/predict";
pub const FEEDBACK_PATH: &str = "/api/feedback";
pub const HEALTH_PATH: &str = "/api/health";

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn clamp(self) -> Self {
        Self {
            x: clamp_unit(self.x),
            y: clamp_unit(self.y),
        }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub fn to_pair(self) -> [f64; 2] {
        [self.x, self.y]
    }

    pub fn from_pair([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

fn clamp_unit(value: f64) -> f64 {
    value.max(0.0).min(1.0)
}

/// Semantic kind of a committed stroke, named on the wire the way the backend expects.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ActionKind {
    #[serde(rename = "place_room")]
    RoomPlacement,
    #[serde(rename = "pathway_segment")]
    PathSegment,
}

impl ActionKind {
    pub fn wire_name(self) -> &'static str {
        match self {
            ActionKind::RoomPlacement => "place_room",
            ActionKind::PathSegment => "pathway_segment",
        }
    }

    pub fn from_wire_name(value: &str) -> Option<Self> {
        match value {
            "place_room" => Some(ActionKind::RoomPlacement),
            "pathway_segment" => Some(ActionKind::PathSegment),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_keeps_points_on_the_unit_square() {
        let point = Point::new(-0.5, 1.25).clamp();
        assert_eq!(point, Point::new(0.0, 1.0));
    }

    #[test]
    fn action_kind_uses_backend_names() {
        assert_eq!(
            serde_json::to_string(&ActionKind::RoomPlacement).unwrap(),
            "\"place_room\""
        );
        assert_eq!(
            ActionKind::from_wire_name("pathway_segment"),
            Some(ActionKind::PathSegment)
        );
        assert_eq!(ActionKind::from_wire_name("stairs"), None);
    }
}
