use floorplan_shared::{ActionKind, Point};

use crate::config::{GhostConfig, ToolsConfig};
use crate::geometry::{room_rect, GhostShape, Rect, Surface};
use crate::state::Action;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layer {
    /// Committed actions plus the stroke being drawn.
    Draw,
    Ghost,
}

/// Pixel-space primitives handed to the rendering backend.
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    Polyline {
        points: Vec<(f64, f64)>,
        color: String,
        width: f64,
    },
    Rect {
        rect: Rect,
        stroke: String,
        fill: Option<String>,
        width: f64,
    },
    Circle {
        cx: f64,
        cy: f64,
        radius: f64,
        stroke: String,
        fill: Option<String>,
    },
}

pub trait Canvas {
    fn resize(&mut self, width: u32, height: u32);
    fn clear(&mut self, layer: Layer);
    fn draw(&mut self, layer: Layer, shape: Shape);
    fn set_status(&mut self, text: &str);
}

pub fn draw_polyline(
    canvas: &mut dyn Canvas,
    surface: &Surface,
    points: &[Point],
    color: &str,
    width: f64,
) {
    if points.is_empty() {
        return;
    }
    canvas.draw(
        Layer::Draw,
        Shape::Polyline {
            points: points.iter().map(|point| surface.to_pixels(*point)).collect(),
            color: color.to_string(),
            width,
        },
    );
}

pub fn draw_room(
    canvas: &mut dyn Canvas,
    surface: &Surface,
    points: &[Point],
    color: &str,
    width: f64,
) {
    if let Some(rect) = room_rect(points) {
        canvas.draw(
            Layer::Draw,
            Shape::Rect {
                rect: rect.to_pixels(surface),
                stroke: color.to_string(),
                fill: None,
                width,
            },
        );
    }
}

/// Live feedback while the pointer is down: the raw trace, plus the derived
/// rectangle once a room stroke has two points.
pub fn draw_stroke_preview(
    canvas: &mut dyn Canvas,
    surface: &Surface,
    points: &[Point],
    kind: ActionKind,
    color: &str,
    width: f64,
) {
    draw_polyline(canvas, surface, points, color, width);
    if kind == ActionKind::RoomPlacement && points.len() >= 2 {
        draw_room(canvas, surface, points, color, width);
    }
}

pub fn draw_action(
    canvas: &mut dyn Canvas,
    surface: &Surface,
    action: &Action,
    tools: &ToolsConfig,
) {
    match action.kind {
        ActionKind::RoomPlacement => draw_room(
            canvas,
            surface,
            &action.points,
            &tools.room_color,
            tools.line_width,
        ),
        ActionKind::PathSegment => draw_polyline(
            canvas,
            surface,
            &action.points,
            &tools.path_color,
            tools.line_width,
        ),
    }
}

pub fn redraw<'a>(
    canvas: &mut dyn Canvas,
    surface: &Surface,
    actions: impl Iterator<Item = &'a Action>,
    tools: &ToolsConfig,
) {
    canvas.clear(Layer::Draw);
    for action in actions {
        draw_action(canvas, surface, action, tools);
    }
}

pub fn draw_ghost(canvas: &mut dyn Canvas, shape: GhostShape, ghost: &GhostConfig) {
    let shape = match shape {
        GhostShape::Square { x, y, size } => Shape::Rect {
            rect: Rect {
                x,
                y,
                width: size,
                height: size,
            },
            stroke: ghost.stroke_color.clone(),
            fill: Some(ghost.fill_color.clone()),
            width: 1.0,
        },
        GhostShape::Circle { cx, cy, radius } => Shape::Circle {
            cx,
            cy,
            radius,
            stroke: ghost.stroke_color.clone(),
            fill: Some(ghost.fill_color.clone()),
        },
    };
    canvas.draw(Layer::Ghost, shape);
}

/// Keeps the current contents of each layer in memory. Useful for headless
/// sessions and for asserting on what a frontend would have painted.
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    pub size: (u32, u32),
    pub draw_layer: Vec<Shape>,
    pub ghost_layer: Vec<Shape>,
    pub status: String,
}

impl Canvas for RecordingCanvas {
    fn resize(&mut self, width: u32, height: u32) {
        self.size = (width, height);
        self.draw_layer.clear();
        self.ghost_layer.clear();
    }

    fn clear(&mut self, layer: Layer) {
        match layer {
            Layer::Draw => self.draw_layer.clear(),
            Layer::Ghost => self.ghost_layer.clear(),
        }
    }

    fn draw(&mut self, layer: Layer, shape: Shape) {
        match layer {
            Layer::Draw => self.draw_layer.push(shape),
            Layer::Ghost => self.ghost_layer.push(shape),
        }
    }

    fn set_status(&mut self, text: &str) {
        self.status = text.to_string();
    }
}
