use crate::FreehandApp;

pub fn central_panel(app: &mut FreehandApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let size = egui::vec2(app.config().width as f32, app.config().height as f32);
        let (response, painter) = ui.allocate_painter(size, egui::Sense::drag());
        let canvas_rect = response.rect;

        app.handle_input(ctx, &response);

        let uv = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));

        // Drawing surface first, width indicator layered on top
        painter.rect_filled(canvas_rect, 0.0, app.background_color());
        painter.image(app.canvas_texture(ctx), canvas_rect, uv, egui::Color32::WHITE);
        painter.image(app.indicator_texture(ctx), canvas_rect, uv, egui::Color32::WHITE);

        response.on_hover_cursor(egui::CursorIcon::Crosshair);
    });
}
