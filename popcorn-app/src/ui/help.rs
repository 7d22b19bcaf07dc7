use eframe::egui;

const SHORTCUTS: &[(&str, &str)] = &[
    ("Left drag", "Pan"),
    ("Shift + left drag", "Rotate (when rotation is on)"),
    ("Wheel", "Zoom at cursor"),
    ("Shift + wheel", "Zoom vertically"),
    ("Ctrl + wheel", "Zoom horizontally"),
    ("Middle click", "Toggle fraction readout"),
    ("R", "Cycle rotation mode"),
    ("Esc", "Reset view"),
];

pub(crate) fn key_help(ui: &mut egui::Ui) {
    egui::CollapsingHeader::new("Controls")
        .default_open(true)
        .show(ui, |ui| {
            egui::Grid::new("help_keys")
                .num_columns(2)
                .spacing([12.0, 2.0])
                .show(ui, |ui| {
                    for &(k, d) in SHORTCUTS {
                        ui.label(egui::RichText::new(k).strong());
                        ui.label(d);
                        ui.end_row();
                    }
                });
        });
}
