use serde::{Deserialize, Serialize};

/// A point on the canvas, in whole pixels from the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl std::ops::Sub for Position {
    type Output = Position;

    fn sub(self, rhs: Position) -> Position {
        Position::new(self.x.saturating_sub(rhs.x), self.y.saturating_sub(rhs.y))
    }
}

/// Dimensions reported by the hosting surface: the canvas and a single node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasSize {
    pub width: i32,
    pub height: i32,
    pub node_width: i32,
    pub node_height: i32,
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 800,
            node_width: 200,
            node_height: 100,
        }
    }
}

impl CanvasSize {
    /// The largest origin a node may take while staying fully on the canvas.
    pub fn bounds(&self) -> CanvasBounds {
        CanvasBounds {
            max_x: self.width.saturating_sub(self.node_width).max(0),
            max_y: self.height.saturating_sub(self.node_height).max(0),
        }
    }
}

/// The inclusive range `[0, max_x] × [0, max_y]` a node origin is clamped into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasBounds {
    pub max_x: i32,
    pub max_y: i32,
}

impl Default for CanvasBounds {
    fn default() -> Self {
        CanvasSize::default().bounds()
    }
}

impl CanvasBounds {
    pub fn clamp(&self, position: Position) -> Position {
        Position::new(
            position.x.clamp(0, self.max_x.max(0)),
            position.y.clamp(0, self.max_y.max(0)),
        )
    }

    pub fn contains(&self, position: Position) -> bool {
        (0..=self.max_x).contains(&position.x) && (0..=self.max_y).contains(&position.y)
    }
}
