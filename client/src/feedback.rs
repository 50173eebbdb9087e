use floorplan_shared::FeedbackEvent;

use crate::overlay::PredictionOverlay;
use crate::render::Canvas;

/// Confirmation is the only feedback gesture, so every event carries the same
/// positive reward.
#[derive(Debug, Clone, Copy)]
pub struct FeedbackController {
    reward: i32,
}

impl FeedbackController {
    pub fn new(reward: i32) -> Self {
        Self { reward }
    }

    pub fn confirm(
        &self,
        overlay: &mut PredictionOverlay,
        canvas: &mut dyn Canvas,
    ) -> Option<FeedbackEvent> {
        let prediction = overlay.take_live()?;
        overlay.clear(canvas);
        Some(FeedbackEvent {
            prediction_id: prediction.id,
            reward: self.reward,
        })
    }
}

#[cfg(test)]
mod tests {
    use floorplan_shared::PredictionResponse;

    use super::*;
    use crate::config::GhostConfig;
    use crate::geometry::Surface;
    use crate::render::RecordingCanvas;

    #[test]
    fn confirm_without_live_prediction_is_a_no_op() {
        let controller = FeedbackController::new(1);
        let mut overlay = PredictionOverlay::new(GhostConfig::default());
        let mut canvas = RecordingCanvas::default();
        assert!(controller.confirm(&mut overlay, &mut canvas).is_none());
    }

    #[test]
    fn confirm_references_live_prediction_once() {
        let controller = FeedbackController::new(1);
        let mut overlay = PredictionOverlay::new(GhostConfig::default());
        let mut canvas = RecordingCanvas::default();
        let surface = Surface::new(100.0, 100.0).unwrap();
        let seq = overlay.issue();
        overlay.resolve(
            seq,
            Ok(PredictionResponse {
                predicted_action: Some("place_room".into()),
                predicted_coords: Some([0.4, 0.4]),
                confidence: Some(0.5),
                prediction_id: Some("P1".into()),
            }),
            &mut canvas,
            Some(&surface),
        );

        let event = controller.confirm(&mut overlay, &mut canvas).unwrap();
        assert_eq!(
            event,
            FeedbackEvent {
                prediction_id: "P1".into(),
                reward: 1
            }
        );
        assert!(overlay.live().is_none());
        assert!(canvas.ghost_layer.is_empty());
        assert!(controller.confirm(&mut overlay, &mut canvas).is_none());
    }
}
