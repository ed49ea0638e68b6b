//! The stroke-rendering state machine.
//!
//! ```text
//!   ┌────────┐  begin_stroke  ┌─────────┐
//!   │  Idle  ├───────────────►│ Drawing │
//!   │        │◄───────────────┤         │
//!   └────────┘   end_stroke   └─────────┘
//! ```
//!
//! `extend_stroke` only paints in `Drawing`. `render_width_indicator` works in
//! both states.

use std::f32::consts::TAU;

use crate::color::HexColor;
use crate::config::CanvasConfig;
use crate::geometry::Point;
use crate::state::{DrawingState, StrokePhase};
use crate::surface::{LineCap, LineJoin, Surface};

/// Line width of the width-indicator circle.
const INDICATOR_LINE_WIDTH: f32 = 1.0;

/// Turns pointer movement into line segments on the main surface and keeps
/// the brush preview on the indicator surface up to date.
#[derive(Debug)]
pub struct StrokeEngine<S> {
    state: DrawingState,
    canvas: S,
    indicator: S,
}

impl<S: Surface> StrokeEngine<S> {
    pub fn new(canvas: S, indicator: S, state: DrawingState) -> Self {
        Self {
            state,
            canvas,
            indicator,
        }
    }

    /// Creates an engine with the initial brush from `config`.
    pub fn with_config(canvas: S, indicator: S, config: &CanvasConfig) -> Self {
        let state = DrawingState::new(config.initial_color.clone(), config.initial_stroke_width);
        Self::new(canvas, indicator, state)
    }

    pub fn state(&self) -> &DrawingState {
        &self.state
    }

    pub fn phase(&self) -> StrokePhase {
        self.state.phase()
    }

    pub fn canvas(&self) -> &S {
        &self.canvas
    }

    pub fn indicator(&self) -> &S {
        &self.indicator
    }

    /// Starts a fresh path on the main surface and enters `Drawing`.
    pub fn begin_stroke(&mut self) {
        self.canvas.begin_path();
        self.state.is_dragging = true;
        log::debug!("Stroke started");
    }

    /// Closes the current path and returns to `Idle`.
    ///
    /// Safe to call in any state; calling it twice is the same as once.
    pub fn end_stroke(&mut self) {
        if self.state.is_dragging {
            log::debug!("Stroke ended at {:?}", self.state.last_point);
        }
        self.canvas.close_path();
        self.state.is_dragging = false;
        self.state.last_point = None;
    }

    /// Draws a segment from the previous point to `p`.
    ///
    /// The first call after `begin_stroke` draws a zero-length segment at `p`,
    /// which establishes the origin. Ignored while idle.
    pub fn extend_stroke(&mut self, p: Point) {
        if !self.state.is_dragging {
            return;
        }

        // Round caps and joins hide the seams between short segments.
        self.canvas.set_line_cap(LineCap::Round);
        self.canvas.set_line_join(LineJoin::Round);
        self.canvas.set_line_width(self.state.current_stroke_width);
        self.canvas.set_stroke_color(&self.state.current_color);

        self.canvas.move_to(self.state.last_point.unwrap_or(p));
        self.canvas.line_to(p);
        self.canvas.stroke();

        self.state.last_point = Some(p);
    }

    pub fn set_color(&mut self, color: impl Into<HexColor>) {
        self.state.current_color = color.into();
    }

    pub fn set_stroke_width(&mut self, width: f32) {
        self.state.current_stroke_width = width;
    }

    /// Wipes the whole main surface. Irreversible.
    pub fn clear_surface(&mut self) {
        self.canvas.clear();
        log::info!("Canvas cleared");
    }

    /// Redraws the brush preview circle centered at `p`.
    ///
    /// The indicator surface is cleared first on every call so previous
    /// circles never accumulate.
    pub fn render_width_indicator(&mut self, p: Point) {
        self.indicator.set_line_cap(LineCap::Round);
        self.indicator.set_line_join(LineJoin::Round);
        self.indicator.set_stroke_color(&self.state.current_color);
        self.indicator.set_line_width(INDICATOR_LINE_WIDTH);

        self.indicator.clear();

        self.indicator.begin_path();
        self.indicator
            .arc(p, self.state.current_stroke_width / 2.0, 0.0, TAU);
        self.indicator.stroke();
    }
}
