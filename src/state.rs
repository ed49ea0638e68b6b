use crate::color::HexColor;
use crate::geometry::Point;

/// Whether a stroke is currently being dragged out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StrokePhase {
    #[default]
    Idle,
    Drawing,
}

/// Everything the stroke engine remembers between pointer events.
///
/// `last_point` is `None` exactly when no segment has been committed since the
/// most recent drag start or drag end.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawingState {
    pub(crate) last_point: Option<Point>,
    pub(crate) is_dragging: bool,
    pub(crate) current_color: HexColor,
    pub(crate) current_stroke_width: f32,
}

impl DrawingState {
    pub fn new(color: HexColor, stroke_width: f32) -> Self {
        Self {
            last_point: None,
            is_dragging: false,
            current_color: color,
            current_stroke_width: stroke_width,
        }
    }

    pub fn last_point(&self) -> Option<Point> {
        self.last_point
    }

    pub fn is_dragging(&self) -> bool {
        self.is_dragging
    }

    pub fn current_color(&self) -> &HexColor {
        &self.current_color
    }

    pub fn current_stroke_width(&self) -> f32 {
        self.current_stroke_width
    }

    pub fn phase(&self) -> StrokePhase {
        if self.is_dragging {
            StrokePhase::Drawing
        } else {
            StrokePhase::Idle
        }
    }
}

impl Default for DrawingState {
    fn default() -> Self {
        Self::new(HexColor::BLACK, 1.0)
    }
}
