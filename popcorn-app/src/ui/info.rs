use eframe::egui;

use popcorn_core::PickInfo;

use crate::app::PopcornApp;

/// Popup offset from the picked dot, in points.
const POPUP_OFFSET: egui::Vec2 = egui::vec2(10.0, -10.0);

/// Where the popup's bottom-left corner goes, so the label sits above and to
/// the right of the dot without covering it.
fn popup_anchor(canvas_origin: egui::Pos2, info: &PickInfo) -> egui::Pos2 {
    canvas_origin + egui::vec2(info.screen.x as f32, info.screen.y as f32) + POPUP_OFFSET
}

impl PopcornApp {
    /// Show `i / j` just above and to the right of the picked dot.
    /// `canvas_origin` is the top-left of the canvas in screen coordinates.
    pub(crate) fn show_info_popup(
        &self,
        ctx: &egui::Context,
        canvas_origin: egui::Pos2,
        info: PickInfo,
    ) {
        egui::Area::new(egui::Id::new("pick_info"))
            .order(egui::Order::Foreground)
            .pivot(egui::Align2::LEFT_BOTTOM)
            .fixed_pos(popup_anchor(canvas_origin, &info))
            .interactable(false)
            .show(ctx, |ui| {
                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    ui.label(egui::RichText::new(info.ratio.to_string()).monospace());
                });
            });
    }
}
