use floorplan_shared::{ActionKind, Point, PredictionResponse};

use crate::config::{GhostConfig, PredictionOrdering};
use crate::error::Result;
use crate::geometry::{GhostShape, Surface};
use crate::render::{draw_ghost, Canvas, Layer};
use crate::state::Prediction;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    Shown,
    Cleared,
    /// Transport failure; whatever was on screen stays.
    Kept,
    Stale,
}

/// Single slot for the live prediction and its rendered ghost.
#[derive(Debug)]
pub struct PredictionOverlay {
    config: GhostConfig,
    live: Option<Prediction>,
    ghost: Option<GhostShape>,
    next_seq: u64,
    last_applied: Option<u64>,
}

impl PredictionOverlay {
    pub fn new(config: GhostConfig) -> Self {
        Self {
            config,
            live: None,
            ghost: None,
            next_seq: 0,
            last_applied: None,
        }
    }

    pub fn live(&self) -> Option<&Prediction> {
        self.live.as_ref()
    }

    pub fn ghost(&self) -> Option<GhostShape> {
        self.ghost
    }

    pub fn issue(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }

    pub fn resolve(
        &mut self,
        seq: u64,
        result: Result<PredictionResponse>,
        canvas: &mut dyn Canvas,
        surface: Option<&Surface>,
    ) -> Resolution {
        if self.config.ordering == PredictionOrdering::DiscardStale
            && self.last_applied.is_some_and(|last| seq < last)
        {
            log::debug!("Dropping stale prediction #{seq}");
            return Resolution::Stale;
        }
        let response = match result {
            Ok(response) => Some(response),
            Err(error) if error.is_malformed_payload() => {
                log::warn!("Prediction #{seq} payload malformed: {error}");
                None
            }
            Err(error) => {
                log::warn!("Prediction #{seq} request failed: {error}");
                return Resolution::Kept;
            }
        };
        self.last_applied = Some(seq);

        let prediction = match response.map(prediction_from_response) {
            Some(Ok(Some(prediction))) => prediction,
            Some(Ok(None)) => {
                log::debug!("Prediction #{seq} has no coordinates");
                self.clear(canvas);
                return Resolution::Cleared;
            }
            Some(Err(reason)) => {
                log::warn!("Prediction #{seq} rejected: {reason}");
                self.clear(canvas);
                return Resolution::Cleared;
            }
            None => {
                self.clear(canvas);
                return Resolution::Cleared;
            }
        };

        log::debug!(
            "Showing prediction #{seq} id={} kind={:?} conf={:.2}",
            prediction.id,
            prediction.kind,
            prediction.confidence
        );
        self.live = Some(prediction);
        self.render(canvas, surface);
        Resolution::Shown
    }

    /// Repaints the ghost layer from the live prediction, e.g. after the surface is resized.
    pub fn render(&mut self, canvas: &mut dyn Canvas, surface: Option<&Surface>) {
        canvas.clear(Layer::Ghost);
        self.ghost = None;
        let Some(prediction) = &self.live else {
            return;
        };
        if let Some(surface) = surface {
            let shape = match prediction.kind {
                ActionKind::RoomPlacement => {
                    GhostShape::square_at(prediction.coords, surface, self.config.room_size)
                }
                ActionKind::PathSegment => {
                    GhostShape::circle_at(prediction.coords, surface, self.config.path_radius)
                }
            };
            draw_ghost(canvas, shape, &self.config);
            self.ghost = Some(shape);
        }
        canvas.set_status(&status_text(prediction));
    }

    pub fn take_live(&mut self) -> Option<Prediction> {
        self.live.take()
    }

    pub fn clear(&mut self, canvas: &mut dyn Canvas) {
        self.live = None;
        self.ghost = None;
        canvas.clear(Layer::Ghost);
        canvas.set_status("");
    }
}

pub fn status_text(prediction: &Prediction) -> String {
    format!(
        "Suggest: {} (conf {:.2})",
        prediction.kind.wire_name(),
        prediction.confidence
    )
}

pub fn prediction_from_response(
    response: PredictionResponse,
) -> std::result::Result<Option<Prediction>, &'static str> {
    let Some(coords) = response.predicted_coords else {
        return Ok(None);
    };
    let coords = Point::from_pair(coords);
    if !coords.is_finite() {
        return Err("non-finite coordinates");
    }
    let kind = response
        .predicted_action
        .as_deref()
        .and_then(ActionKind::from_wire_name)
        .ok_or("unknown predicted_action")?;
    let id = response
        .prediction_id
        .filter(|id| !id.is_empty())
        .ok_or("missing prediction_id")?;
    let confidence = response
        .confidence
        .filter(|value| value.is_finite())
        .ok_or("missing confidence")?;
    Ok(Some(Prediction {
        id,
        kind,
        coords,
        confidence,
    }))
}
