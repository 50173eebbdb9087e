//! Interaction engine for sketching floorplans over an image while a backend
//! suggests the next room or pathway.

pub mod actions;
pub mod app;
pub mod config;
pub mod error;
pub mod feedback;
pub mod geometry;
pub mod net;
pub mod overlay;
pub mod render;
pub mod state;
pub mod surface;

pub use app::{Engine, EngineEvent, EngineHandle};
pub use config::ClientConfig;
pub use error::{ClientError, Result};
pub use net::{EventSink, HttpBackend, PredictionService};
pub use render::{Canvas, RecordingCanvas};
pub use state::Tool;
pub use surface::{FileImageSource, ImageInfo, ImageSource, InputEvent, PointerSample};
