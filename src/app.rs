use egui::{Color32, TextureHandle, TextureId, TextureOptions};

use crate::config::CanvasConfig;
use crate::engine::StrokeEngine;
use crate::error::Result;
use crate::export;
use crate::input::InputHandler;
use crate::panels;
use crate::surface::RasterSurface;

/// GPU copy of a raster surface, re-uploaded only when the surface changed.
struct SurfaceTexture {
    name: &'static str,
    handle: Option<TextureHandle>,
    revision: Option<u64>,
}

impl SurfaceTexture {
    fn new(name: &'static str) -> Self {
        Self {
            name,
            handle: None,
            revision: None,
        }
    }

    fn sync(&mut self, ctx: &egui::Context, surface: &RasterSurface) -> TextureId {
        let revision = surface.revision();
        if let Some(handle) = self.handle.as_mut() {
            if self.revision != Some(revision) {
                handle.set(surface.to_color_image(), TextureOptions::LINEAR);
                self.revision = Some(revision);
            }
            return handle.id();
        }

        let handle = ctx.load_texture(self.name, surface.to_color_image(), TextureOptions::LINEAR);
        let id = handle.id();
        self.handle = Some(handle);
        self.revision = Some(revision);
        id
    }
}

pub struct FreehandApp {
    config: CanvasConfig,
    engine: StrokeEngine<RasterSurface>,
    input: InputHandler,
    canvas_texture: SurfaceTexture,
    indicator_texture: SurfaceTexture,
    // Mirrors of the panel controls
    pub(crate) picked_color: Color32,
    pub(crate) stroke_width: f32,
    show_clear_confirm: bool,
    status: Option<String>,
}

impl FreehandApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>, config: CanvasConfig) -> Result<Self> {
        cc.egui_ctx.set_visuals(egui::Visuals::light());
        Self::from_config(config)
    }

    /// Builds the app state without a window, e.g. for tests.
    pub fn from_config(config: CanvasConfig) -> Result<Self> {
        config.validate()?;
        let canvas = RasterSurface::new(config.width, config.height)?;
        let indicator = RasterSurface::new(config.width, config.height)?;
        let engine = StrokeEngine::with_config(canvas, indicator, &config);
        log::info!(
            "Canvas ready: {}x{}, color {}, width {}",
            config.width,
            config.height,
            config.initial_color,
            config.initial_stroke_width
        );

        Ok(Self {
            picked_color: config.initial_color.to_color32().unwrap_or(Color32::BLACK),
            stroke_width: config.initial_stroke_width,
            engine,
            input: InputHandler::new(),
            canvas_texture: SurfaceTexture::new("canvas"),
            indicator_texture: SurfaceTexture::new("width_indicator"),
            show_clear_confirm: false,
            status: None,
            config,
        })
    }

    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    pub fn engine(&self) -> &StrokeEngine<RasterSurface> {
        &self.engine
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn is_clear_pending(&self) -> bool {
        self.show_clear_confirm
    }

    pub fn is_eraser_active(&self) -> bool {
        self.engine.state().current_color() == &self.config.eraser_color
    }

    /// Applies the color chosen in the palette.
    pub fn choose_color(&mut self, color: Color32) {
        self.picked_color = color;
        self.engine.set_color(color);
        log::info!("Color chosen: {}", self.engine.state().current_color());
    }

    /// Erasing paints with the background color.
    pub fn select_eraser(&mut self) {
        self.engine.set_color(self.config.eraser_color.clone());
        log::info!("Eraser selected");
    }

    pub fn choose_stroke_width(&mut self, width: f32) {
        self.stroke_width = width;
        self.engine.set_stroke_width(width);
    }

    /// Asks for confirmation before the canvas is cleared.
    pub fn request_clear(&mut self) {
        self.show_clear_confirm = true;
    }

    /// Answers the clear confirmation; only a yes touches the canvas.
    pub fn confirm_clear(&mut self, confirmed: bool) {
        self.show_clear_confirm = false;
        if confirmed {
            self.engine.clear_surface();
        }
    }

    pub fn export(&mut self) {
        self.status = Some(match export::export_png(self.engine.canvas(), &self.config) {
            Ok(destination) => format!("Saved {destination}"),
            Err(err) => {
                log::error!("Export failed: {err}");
                format!("Export failed: {err}")
            }
        });
    }

    /// Feeds this frame's pointer events for the canvas behind `response` to the engine.
    pub(crate) fn handle_input(&mut self, ctx: &egui::Context, response: &egui::Response) {
        let events = ctx.input(|i| i.raw.events.clone());
        let canvas_layer = response.layer_id;
        // Panels report no layer; popups and windows report their own.
        self.handle_events(&events, response.rect, |pos| {
            ctx.layer_id_at(pos).is_none_or(|layer| layer == canvas_layer)
        });
    }

    pub(crate) fn handle_events(
        &mut self,
        events: &[egui::Event],
        canvas_rect: egui::Rect,
        on_top: impl Fn(egui::Pos2) -> bool,
    ) {
        // The confirmation dialog blocks the canvas.
        if self.show_clear_confirm {
            if let Some(event) = self.input.release() {
                event.apply(&mut self.engine);
            }
            return;
        }

        for event in self.input.translate(events, canvas_rect, on_top) {
            event.apply(&mut self.engine);
        }
    }

    pub(crate) fn background_color(&self) -> Color32 {
        self.config.background_color.to_color32().unwrap_or(Color32::WHITE)
    }

    pub(crate) fn canvas_texture(&mut self, ctx: &egui::Context) -> TextureId {
        self.canvas_texture.sync(ctx, self.engine.canvas())
    }

    pub(crate) fn indicator_texture(&mut self, ctx: &egui::Context) -> TextureId {
        self.indicator_texture.sync(ctx, self.engine.indicator())
    }
}

impl eframe::App for FreehandApp {
    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        panels::tools_panel(self, ctx);
        panels::central_panel(self, ctx);
        panels::clear_dialog(self, ctx);
    }
}
