#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod color;
pub mod config;
pub mod engine;
pub mod error;
pub mod export;
pub mod geometry;
pub mod input;
pub mod panels;
pub mod state;
pub mod surface;

pub use app::FreehandApp;
pub use color::HexColor;
pub use config::CanvasConfig;
pub use engine::StrokeEngine;
pub use error::{CanvasError, Result};
pub use geometry::Point;
pub use input::{InputHandler, PointerEvent};
pub use state::{DrawingState, StrokePhase};
pub use surface::{RasterSurface, RecordingSurface, Surface};
