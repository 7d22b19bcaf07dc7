use std::path::Path;

use eframe::egui;
use tracing::{error, info, warn};

use popcorn_core::{levels_from_slider, registry, ColourMode, Projection, LEVELS_SLIDER_RANGE};
use popcorn_render::{export_png, ExportMetadata};

use crate::app::PopcornApp;
use crate::app_dir;
use crate::ui::help;

impl PopcornApp {
    pub(crate) fn show_controls_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::left("controls")
            .resizable(false)
            .default_width(220.0)
            .show(ctx, |ui| {
                ui.heading("Popcorn");
                ui.add_space(6.0);

                self.levels_controls(ui);
                ui.separator();
                self.plot_controls(ui);
                ui.separator();
                self.colour_controls(ui);
                ui.separator();

                ui.label(format!(
                    "Rotation: {}",
                    self.explorer.viewport().rotation_mode().label()
                ));
                ui.horizontal(|ui| {
                    if ui.button("Reset view").clicked() {
                        self.explorer.reset_view();
                        self.view_changed();
                    }
                    if ui.button("Export PNG\u{2026}").clicked() {
                        self.export_dialog();
                    }
                });
                if let Some(ref status) = self.status {
                    ui.small(status);
                }

                ui.separator();
                help::key_help(ui);
            });
    }

    fn levels_controls(&mut self, ui: &mut egui::Ui) {
        ui.label("Levels");
        let slider = egui::Slider::new(&mut self.levels_slider, LEVELS_SLIDER_RANGE)
            .show_value(false)
            .step_by(0.01);
        if ui.add(slider).changed() {
            let levels = levels_from_slider(self.levels_slider);
            if levels != self.explorer.levels() {
                match self.explorer.set_levels(levels) {
                    Ok(()) => self.needs_redraw = true,
                    Err(e) => warn!("Rejected levels: {e}"),
                }
            }
        }
        ui.label(format!("{} denominators", self.explorer.levels()));
    }

    fn plot_controls(&mut self, ui: &mut egui::Ui) {
        ui.label("Plot");
        let current = self.explorer.plot().name();
        for name in registry().names() {
            if ui.radio(current == name, name).clicked() && current != name {
                match self.explorer.set_plot(name) {
                    Ok(()) => self.view_changed(),
                    Err(e) => warn!("{e}"),
                }
            }
        }
    }

    fn colour_controls(&mut self, ui: &mut egui::Ui) {
        ui.label("Colour");
        let mut colour = self.explorer.colour();
        for mode in ColourMode::ALL {
            ui.radio_value(&mut colour, mode, mode.name());
        }
        if colour != self.explorer.colour() {
            self.explorer.set_colour(colour);
            self.needs_redraw = true;
        }
    }

    fn export_dialog(&mut self) {
        let dir = app_dir::images_directory();
        let mut dialog = rfd::FileDialog::new()
            .add_filter("PNG image", &["png"])
            .set_file_name(format!(
                "popcorn_{}_{}.png",
                self.explorer.plot().name().to_lowercase(),
                self.explorer.levels()
            ));
        if dir.is_dir() {
            dialog = dialog.set_directory(&dir);
        }
        if let Some(path) = dialog.save_file() {
            self.export_to(&path);
        }
    }

    fn export_to(&mut self, path: &Path) {
        let metadata = ExportMetadata {
            plot: self.explorer.plot().name().to_string(),
            levels: self.explorer.levels(),
            colour: self.explorer.colour(),
            view: self.explorer.viewport().view().ok(),
        };
        match export_png(&self.raster, path, &metadata) {
            Ok(()) => {
                info!("Exported {}", path.display());
                self.status = Some(format!("Saved {}", path.display()));
            }
            Err(e) => {
                error!("PNG export failed: {e}");
                self.status = Some(format!("Export failed: {e}"));
            }
        }
    }
}
