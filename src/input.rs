use egui::{Event, PointerButton, Pos2, Rect};

use crate::engine::StrokeEngine;
use crate::geometry::{Point, to_local};
use crate::surface::Surface;

/// Pointer input as the stroke engine sees it, in surface-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Primary button pressed over the canvas
    DragStart(Point),
    /// Primary button released over the canvas
    DragEnd,
    /// Pointer left the canvas
    Leave,
    /// Pointer moved over the canvas
    Move(Point),
}

impl PointerEvent {
    /// Runs the engine operations this event stands for.
    pub fn apply<S: Surface>(self, engine: &mut StrokeEngine<S>) {
        match self {
            PointerEvent::DragStart(_) => engine.begin_stroke(),
            PointerEvent::DragEnd | PointerEvent::Leave => engine.end_stroke(),
            PointerEvent::Move(p) => {
                engine.extend_stroke(p);
                engine.render_width_indicator(p);
            }
        }
    }
}

/// Translates raw egui events into [`PointerEvent`]s for a canvas rectangle.
///
/// Only events over the canvas count, the same as mouse listeners attached to
/// the canvas element itself. A position inside the rectangle that is covered
/// by another layer, such as an open color picker, counts as outside. Leaving
/// the canvas always ends a drag, so a stroke never continues across the edge.
#[derive(Debug, Default)]
pub struct InputHandler {
    pointer_inside: bool,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pointer_inside(&self) -> bool {
        self.pointer_inside
    }

    /// Walks `events` in order and returns the pointer events for `canvas_rect`.
    ///
    /// `on_top` tells whether the canvas is the topmost layer at a position.
    pub fn translate(
        &mut self,
        events: &[Event],
        canvas_rect: Rect,
        on_top: impl Fn(Pos2) -> bool,
    ) -> Vec<PointerEvent> {
        let mut out = Vec::new();
        let over_canvas = |pos: Pos2| canvas_rect.contains(pos) && on_top(pos);

        for event in events {
            match event {
                Event::PointerMoved(pos) => {
                    self.pointer_moved(*pos, over_canvas(*pos), canvas_rect, &mut out)
                }
                Event::PointerButton {
                    pos,
                    button: PointerButton::Primary,
                    pressed,
                    ..
                } => {
                    // A press usually arrives without a preceding move on touchpads.
                    self.pointer_moved_silently(over_canvas(*pos), &mut out);
                    if self.pointer_inside {
                        out.push(if *pressed {
                            PointerEvent::DragStart(to_local(*pos, canvas_rect))
                        } else {
                            PointerEvent::DragEnd
                        });
                    }
                }
                Event::PointerGone => {
                    if self.pointer_inside {
                        self.pointer_inside = false;
                        out.push(PointerEvent::Leave);
                    }
                }
                _ => {}
            }
        }

        out
    }

    fn pointer_moved(&mut self, pos: Pos2, inside: bool, canvas_rect: Rect, out: &mut Vec<PointerEvent>) {
        if inside {
            self.pointer_inside = true;
            out.push(PointerEvent::Move(to_local(pos, canvas_rect)));
        } else if self.pointer_inside {
            self.pointer_inside = false;
            out.push(PointerEvent::Leave);
        }
    }

    /// Updates the inside flag for a button event without emitting a move.
    fn pointer_moved_silently(&mut self, inside: bool, out: &mut Vec<PointerEvent>) {
        if self.pointer_inside && !inside {
            out.push(PointerEvent::Leave);
        }
        self.pointer_inside = inside;
    }

    /// Forgets the pointer, e.g. while a modal dialog owns the input.
    ///
    /// Returns `Leave` when the pointer was over the canvas so an open stroke
    /// can be ended.
    pub fn release(&mut self) -> Option<PointerEvent> {
        std::mem::take(&mut self.pointer_inside).then_some(PointerEvent::Leave)
    }
}
