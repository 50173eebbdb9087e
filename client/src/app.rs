use std::sync::Arc;

use tokio::sync::mpsc;

use floorplan_shared::PredictionResponse;

use crate::actions::{action_event, finalize};
use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::feedback::FeedbackController;
use crate::geometry::{to_normalized, Surface};
use crate::net::{EventSink, PredictionService};
use crate::overlay::{PredictionOverlay, Resolution};
use crate::render::{draw_stroke_preview, redraw, Canvas};
use crate::state::{Session, Tool};
use crate::surface::{ImageInfo, InputEvent, PointerSample};

#[derive(Debug)]
pub enum EngineEvent {
    Input(InputEvent),
    SelectTool(Tool),
    ImageLoaded(ImageInfo),
    Confirm,
    RequestPrediction,
    PredictionResolved {
        seq: u64,
        result: Result<PredictionResponse>,
    },
    Shutdown,
}

/// Cloneable entry point for input surfaces and UI chrome. Everything sent
/// here is applied in order by [`Engine::run`].
#[derive(Clone)]
pub struct EngineHandle {
    tx: mpsc::UnboundedSender<EngineEvent>,
}

impl EngineHandle {
    pub fn send(&self, event: EngineEvent) -> bool {
        self.tx.send(event).is_ok()
    }

    pub fn on_stroke_start(&self, sample: PointerSample) -> bool {
        self.send(EngineEvent::Input(InputEvent::StrokeStart(sample)))
    }

    pub fn on_stroke_point(&self, sample: PointerSample) -> bool {
        self.send(EngineEvent::Input(InputEvent::StrokePoint(sample)))
    }

    pub fn on_stroke_end(&self) -> bool {
        self.send(EngineEvent::Input(InputEvent::StrokeEnd))
    }

    pub fn on_pointer_leave(&self) -> bool {
        self.send(EngineEvent::Input(InputEvent::PointerLeave))
    }

    pub fn on_ghost_click(&self, sample: PointerSample) -> bool {
        self.send(EngineEvent::Input(InputEvent::GhostClick(sample)))
    }

    pub fn select_tool(&self, tool: Tool) -> bool {
        self.send(EngineEvent::SelectTool(tool))
    }

    pub fn image_loaded(&self, info: ImageInfo) -> bool {
        self.send(EngineEvent::ImageLoaded(info))
    }

    pub fn confirm(&self) -> bool {
        self.send(EngineEvent::Confirm)
    }

    pub fn shutdown(&self) -> bool {
        self.send(EngineEvent::Shutdown)
    }
}

pub struct Engine<C: Canvas> {
    config: ClientConfig,
    session: Session,
    feedback: FeedbackController,
    surface: Option<Surface>,
    canvas: C,
    sink: Arc<dyn EventSink>,
    predictor: Arc<dyn PredictionService>,
    events: mpsc::UnboundedSender<EngineEvent>,
}

impl<C: Canvas> Engine<C> {
    pub fn new(
        config: ClientConfig,
        canvas: C,
        sink: Arc<dyn EventSink>,
        predictor: Arc<dyn PredictionService>,
    ) -> (Self, mpsc::UnboundedReceiver<EngineEvent>) {
        let (events, inbox) = mpsc::unbounded_channel();
        let session = Session::new(PredictionOverlay::new(config.ghost.clone()));
        let feedback = FeedbackController::new(config.feedback.reward);
        let engine = Self {
            config,
            session,
            feedback,
            surface: None,
            canvas,
            sink,
            predictor,
            events,
        };
        (engine, inbox)
    }

    pub fn handle(&self) -> EngineHandle {
        EngineHandle {
            tx: self.events.clone(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    pub fn surface(&self) -> Option<Surface> {
        self.surface
    }

    /// Asks for the first suggestion before anything has been drawn.
    pub fn start(&mut self) {
        self.request_prediction();
    }

    pub async fn run(mut self, mut inbox: mpsc::UnboundedReceiver<EngineEvent>) -> Self {
        while let Some(event) = inbox.recv().await {
            if !self.dispatch(event) {
                break;
            }
        }
        log::debug!(
            "Engine stopped with {} committed actions",
            self.session.action_log.len()
        );
        self
    }

    /// Applies one event. Returns `false` once the engine should stop.
    pub fn dispatch(&mut self, event: EngineEvent) -> bool {
        match event {
            EngineEvent::Input(input) => self.on_input(input),
            EngineEvent::SelectTool(tool) => self.select_tool(tool),
            EngineEvent::ImageLoaded(info) => {
                if let Err(error) = self.load_image(info) {
                    log::warn!("Ignoring image: {error}");
                }
            }
            EngineEvent::Confirm => {
                self.confirm();
            }
            EngineEvent::RequestPrediction => {
                self.request_prediction();
            }
            EngineEvent::PredictionResolved { seq, result } => {
                self.apply_prediction(seq, result);
            }
            EngineEvent::Shutdown => return false,
        }
        true
    }

    pub fn select_tool(&mut self, tool: Tool) {
        if self.session.tool.select(tool) {
            log::debug!("Tool switched to {tool:?}");
        }
    }

    pub fn load_image(&mut self, info: ImageInfo) -> Result<()> {
        let surface = Surface::new(info.width as f64, info.height as f64).ok_or(
            ClientError::InvalidSurface {
                width: info.width as f64,
                height: info.height as f64,
            },
        )?;
        self.canvas.resize(info.width, info.height);
        self.surface = Some(surface);
        self.redraw_committed();
        self.session
            .overlay
            .render(&mut self.canvas, self.surface.as_ref());
        Ok(())
    }

    pub fn on_input(&mut self, input: InputEvent) {
        match input {
            InputEvent::StrokeStart(sample) => self.stroke_start(sample),
            InputEvent::StrokePoint(sample) => self.stroke_point(sample),
            InputEvent::StrokeEnd => self.finish_stroke(),
            InputEvent::PointerLeave => {
                if self.session.stroke.is_drawing() {
                    self.finish_stroke();
                }
            }
            InputEvent::GhostClick(sample) => self.ghost_click(sample),
        }
    }

    fn stroke_start(&mut self, sample: PointerSample) {
        if self.surface.is_none() {
            log::debug!("Pointer down before an image is loaded, ignoring");
            return;
        }
        self.session.stroke.begin();
        self.stroke_point(sample);
    }

    fn stroke_point(&mut self, sample: PointerSample) {
        if !self.session.stroke.is_drawing() {
            return;
        }
        let Some(point) = to_normalized(sample.x, sample.y, sample.width, sample.height) else {
            return;
        };
        // Drags past the edge are pinned to the border before the leave event arrives.
        self.session.stroke.append(point.clamp());
        self.redraw_preview();
    }

    fn finish_stroke(&mut self) {
        let stroke = self.session.stroke.end();
        let tool = self.session.tool.active();
        let Some(action) = finalize(stroke, tool) else {
            return;
        };
        log::debug!(
            "Committed {:?} with {} points",
            action.kind,
            action.points.len()
        );
        let event = action_event(&action);
        self.session.action_log.push(action);

        let sink = self.sink.clone();
        tokio::spawn(async move {
            if let Err(error) = sink.submit_action(&event).await {
                log::warn!("Dropped {} event: {error}", event.action.wire_name());
            }
        });

        self.redraw_committed();
        self.request_prediction();
    }

    fn ghost_click(&mut self, sample: PointerSample) {
        let (Some(surface), Some(ghost)) = (self.surface, self.session.overlay.ghost()) else {
            return;
        };
        let Some(point) = to_normalized(sample.x, sample.y, sample.width, sample.height) else {
            return;
        };
        let (x, y) = surface.to_pixels(point);
        if ghost.contains(x, y, self.config.feedback.ghost_hit_slop) {
            self.confirm();
        }
    }

    /// Confirms the live prediction. Returns `false` when there was nothing to confirm.
    pub fn confirm(&mut self) -> bool {
        let Some(event) = self
            .feedback
            .confirm(&mut self.session.overlay, &mut self.canvas)
        else {
            return false;
        };
        log::debug!("Confirmed prediction {}", event.prediction_id);
        let sink = self.sink.clone();
        tokio::spawn(async move {
            if let Err(error) = sink.submit_feedback(&event).await {
                log::warn!("Dropped feedback for {}: {error}", event.prediction_id);
            }
        });
        self.request_prediction();
        true
    }

    pub fn request_prediction(&mut self) -> u64 {
        let seq = self.session.overlay.issue();
        let predictor = self.predictor.clone();
        let events = self.events.clone();
        tokio::spawn(async move {
            let result = predictor.predict().await;
            let _ = events.send(EngineEvent::PredictionResolved { seq, result });
        });
        seq
    }

    fn apply_prediction(&mut self, seq: u64, result: Result<PredictionResponse>) -> Resolution {
        self.session
            .overlay
            .resolve(seq, result, &mut self.canvas, self.surface.as_ref())
    }

    fn redraw_committed(&mut self) {
        if let Some(surface) = &self.surface {
            redraw(
                &mut self.canvas,
                surface,
                self.session.action_log.iter(),
                &self.config.tools,
            );
        }
    }

    fn redraw_preview(&mut self) {
        self.redraw_committed();
        let Some(surface) = &self.surface else {
            return;
        };
        let color = self.session.tool.stroke_color(&self.config.tools);
        draw_stroke_preview(
            &mut self.canvas,
            surface,
            self.session.stroke.points(),
            self.session.tool.active().action_kind(),
            color,
            self.config.tools.line_width,
        );
    }
}
