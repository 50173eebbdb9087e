use serde::{Deserialize, Serialize};

use crate::{ActionKind, Point};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ActionEvent {
    pub action: ActionKind,
    pub coords: Vec<[f64; 2]>,
    pub timestamp: f64,
}

impl ActionEvent {
    pub fn new(action: ActionKind, points: &[Point], timestamp: f64) -> Self {
        Self {
            action,
            coords: points.iter().map(|point| point.to_pair()).collect(),
            timestamp,
        }
    }
}

// Every field is optional so that a partial payload still decodes and can be
// rejected by the client instead of failing the whole response.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct PredictionResponse {
    #[serde(default)]
    pub predicted_action: Option<String>,
    #[serde(default)]
    pub predicted_coords: Option<[f64; 2]>,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub prediction_id: Option<String>,
}

impl PredictionResponse {
    pub fn empty() -> Self {
        Self::default()
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct FeedbackEvent {
    pub prediction_id: String,
    pub reward: i32,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct EventAck {
    pub ok: bool,
    pub count: usize,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct FeedbackAck {
    pub ok: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Health {
    pub status: String,
}
