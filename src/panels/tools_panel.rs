use egui::color_picker::{self, Alpha};

use crate::FreehandApp;

pub fn tools_panel(app: &mut FreehandApp, ctx: &egui::Context) {
    egui::SidePanel::left("tools_panel")
        .resizable(false)
        .default_width(180.0)
        .show(ctx, |ui| {
            ui.heading("Tools");
            ui.separator();

            // Color picker
            ui.horizontal(|ui| {
                ui.label("Color:");
                let mut color = app.picked_color;
                if color_picker::color_edit_button_srgba(ui, &mut color, Alpha::Opaque).changed() {
                    app.choose_color(color);
                }
            });

            if ui.selectable_label(app.is_eraser_active(), "⌫ Eraser").clicked() {
                app.select_eraser();
            }

            ui.separator();

            // Line width slider with the current value as text
            let (min, max) = (app.config().min_stroke_width, app.config().max_stroke_width);
            ui.label("Line width:");
            ui.horizontal(|ui| {
                let mut width = app.stroke_width;
                let slider = egui::Slider::new(&mut width, min..=max)
                    .step_by(1.0)
                    .show_value(false);
                if ui.add(slider).changed() {
                    app.choose_stroke_width(width);
                }
                ui.label(format!("{width}"));
            });

            ui.separator();

            if ui.button("Clear").clicked() {
                app.request_clear();
            }
            if ui.button("Download PNG").clicked() {
                app.export();
            }

            if let Some(status) = app.status() {
                ui.separator();
                ui.small(status);
            }
        });
}
