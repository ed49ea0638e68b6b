use crate::FreehandApp;

/// Blocking yes/no prompt shown before the canvas is cleared.
pub fn clear_dialog(app: &mut FreehandApp, ctx: &egui::Context) {
    if !app.is_clear_pending() {
        return;
    }

    egui::Window::new("Clear canvas")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label("Clear the whole canvas?");
            ui.horizontal(|ui| {
                if ui.button("Yes").clicked() {
                    app.confirm_clear(true);
                }
                if ui.button("No").clicked() {
                    app.confirm_clear(false);
                }
            });
        });
}
