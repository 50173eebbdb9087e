use chrono::{DateTime, Utc};

use floorplan_shared::{ActionKind, Point};

use crate::config::ToolsConfig;
use crate::overlay::PredictionOverlay;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Tool {
    #[default]
    Room,
    Path,
}

impl Tool {
    pub fn action_kind(self) -> ActionKind {
        match self {
            Tool::Room => ActionKind::RoomPlacement,
            Tool::Path => ActionKind::PathSegment,
        }
    }
}

/// Exactly one tool is active at any time; selecting is idempotent.
#[derive(Debug, Default)]
pub struct ToolMode {
    active: Tool,
}

impl ToolMode {
    pub fn active(&self) -> Tool {
        self.active
    }

    pub fn select(&mut self, tool: Tool) -> bool {
        let changed = self.active != tool;
        self.active = tool;
        changed
    }

    pub fn is_active(&self, tool: Tool) -> bool {
        self.active == tool
    }

    pub fn stroke_color<'a>(&self, tools: &'a ToolsConfig) -> &'a str {
        match self.active {
            Tool::Room => tools.room_color.as_str(),
            Tool::Path => tools.path_color.as_str(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Stroke {
    pub points: Vec<Point>,
}

impl Stroke {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[derive(Debug, Default)]
pub enum DrawMode {
    #[default]
    Idle,
    Drawing {
        points: Vec<Point>,
    },
}

#[derive(Debug, Default)]
pub struct StrokeBuffer {
    mode: DrawMode,
}

impl StrokeBuffer {
    pub fn begin(&mut self) {
        self.mode = DrawMode::Drawing { points: Vec::new() };
    }

    pub fn append(&mut self, point: Point) {
        if let DrawMode::Drawing { points } = &mut self.mode {
            points.push(point);
        }
    }

    pub fn end(&mut self) -> Stroke {
        match std::mem::take(&mut self.mode) {
            DrawMode::Drawing { points } => Stroke { points },
            DrawMode::Idle => Stroke::default(),
        }
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self.mode, DrawMode::Drawing { .. })
    }

    pub fn points(&self) -> &[Point] {
        match &self.mode {
            DrawMode::Drawing { points } => points,
            DrawMode::Idle => &[],
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Action {
    pub kind: ActionKind,
    pub points: Vec<Point>,
    pub created_at: DateTime<Utc>,
}

impl Action {
    pub fn timestamp_secs(&self) -> f64 {
        self.created_at.timestamp_millis() as f64 / 1000.0
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Prediction {
    pub id: String,
    pub kind: ActionKind,
    pub coords: Point,
    pub confidence: f64,
}

#[derive(Debug, Default)]
pub struct ActionLog {
    actions: Vec<Action>,
}

impl ActionLog {
    pub fn push(&mut self, action: Action) {
        self.actions.push(action);
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn last(&self) -> Option<&Action> {
        self.actions.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Action> {
        self.actions.iter()
    }
}

#[derive(Debug)]
pub struct Session {
    pub tool: ToolMode,
    pub stroke: StrokeBuffer,
    pub action_log: ActionLog,
    pub overlay: PredictionOverlay,
}

impl Session {
    pub fn new(overlay: PredictionOverlay) -> Self {
        Self {
            tool: ToolMode::default(),
            stroke: StrokeBuffer::default(),
            action_log: ActionLog::default(),
            overlay,
        }
    }
}
