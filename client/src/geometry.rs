use floorplan_shared::Point;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Surface {
    pub width: f64,
    pub height: f64,
}

impl Surface {
    pub fn new(width: f64, height: f64) -> Option<Self> {
        if valid_extent(width) && valid_extent(height) {
            Some(Self { width, height })
        } else {
            None
        }
    }

    pub fn to_pixels(&self, point: Point) -> (f64, f64) {
        to_pixels(point, self.width, self.height)
    }
}

fn valid_extent(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

pub fn normalize_point(point: Point) -> Option<Point> {
    if !point.is_finite() {
        return None;
    }
    Some(point)
}

/// Converts a pixel position into a fraction of the surface it was sampled on.
pub fn to_normalized(pixel_x: f64, pixel_y: f64, width: f64, height: f64) -> Option<Point> {
    if !valid_extent(width) || !valid_extent(height) {
        return None;
    }
    normalize_point(Point {
        x: pixel_x / width,
        y: pixel_y / height,
    })
}

pub fn to_pixels(point: Point, width: f64, height: f64) -> (f64, f64) {
    (point.x * width, point.y * height)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            x: a.x.min(b.x),
            y: a.y.min(b.y),
            width: (b.x - a.x).abs(),
            height: (b.y - a.y).abs(),
        }
    }

    pub fn to_pixels(&self, surface: &Surface) -> Rect {
        Rect {
            x: self.x * surface.width,
            y: self.y * surface.height,
            width: self.width * surface.width,
            height: self.height * surface.height,
        }
    }
}

// The stored action keeps every point; the rectangle only exists for drawing.
pub fn room_rect(points: &[Point]) -> Option<Rect> {
    let first = points.first()?;
    let last = points.last()?;
    Some(Rect::from_corners(*first, *last))
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GhostShape {
    Square { x: f64, y: f64, size: f64 },
    Circle { cx: f64, cy: f64, radius: f64 },
}

impl GhostShape {
    pub fn square_at(anchor: Point, surface: &Surface, size: f64) -> Self {
        let (cx, cy) = surface.to_pixels(anchor);
        GhostShape::Square {
            x: cx - size / 2.0,
            y: cy - size / 2.0,
            size,
        }
    }

    pub fn circle_at(anchor: Point, surface: &Surface, radius: f64) -> Self {
        let (cx, cy) = surface.to_pixels(anchor);
        GhostShape::Circle { cx, cy, radius }
    }

    pub fn contains(&self, x: f64, y: f64, slop: f64) -> bool {
        match *self {
            GhostShape::Square { x: left, y: top, size } => {
                hit_rect(x, y, left + size / 2.0, top + size / 2.0, size + slop * 2.0)
            }
            GhostShape::Circle { cx, cy, radius } => hit_circle(x, y, cx, cy, radius + slop),
        }
    }
}

fn hit_rect(x: f64, y: f64, cx: f64, cy: f64, size: f64) -> bool {
    let half = size / 2.0;
    x >= cx - half && x <= cx + half && y >= cy - half && y <= cy + half
}

fn hit_circle(x: f64, y: f64, cx: f64, cy: f64, radius: f64) -> bool {
    let dx = x - cx;
    let dy = y - cy;
    dx * dx + dy * dy <= radius * radius
}
