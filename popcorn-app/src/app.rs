use std::error::Error;

use eframe::egui;
use tracing::{info, warn};

use popcorn_core::{slider_from_levels, Explorer, InputEvent, PickInfo, Response};
use popcorn_render::{render, Raster, RenderSurface};

use crate::preferences::AppPreferences;

// ---------------------------------------------------------------------------
// Application
// ---------------------------------------------------------------------------

pub(crate) struct PopcornApp {
    pub(crate) explorer: Explorer,
    pub(crate) raster: Raster,
    texture: Option<egui::TextureHandle>,
    pub(crate) needs_redraw: bool,

    // UI state
    panel_size: Option<[u32; 2]>,
    pub(crate) levels_slider: f64,
    pub(crate) info: Option<PickInfo>,
    pub(crate) status: Option<String>,
    pub(crate) preferences: AppPreferences,
}

impl PopcornApp {
    /// The canvas size is unknown until the first frame, so the explorer and
    /// raster start at 1×1 and are fitted in [`check_resize`](Self::check_resize).
    pub(crate) fn new(preferences: AppPreferences) -> Result<Self, Box<dyn Error + Send + Sync>> {
        let explorer = Explorer::new(1, 1, preferences.settings.clone())?;
        let raster = Raster::new(1, 1)?;
        let levels_slider = slider_from_levels(explorer.levels());
        info!(levels = explorer.levels(), "Popcorn ready");
        Ok(Self {
            explorer,
            raster,
            texture: None,
            needs_redraw: true,
            panel_size: None,
            levels_slider,
            info: None,
            status: None,
            preferences,
        })
    }

    /// Fold an explorer response into the redraw flag and popup state.
    ///
    /// A redraw without a fresh pick means the view moved under the popup,
    /// so the old position is dropped.
    pub(crate) fn apply(&mut self, response: Response) {
        self.needs_redraw |= response.redraw;
        if !self.explorer.info_visible() {
            self.info = None;
        } else if let Some(info) = response.info {
            self.info = Some(info);
        } else if response.redraw {
            self.info = None;
        }
    }

    /// The view was changed from the side panel (reset or new plot).
    pub(crate) fn view_changed(&mut self) {
        self.needs_redraw = true;
        self.info = None;
    }

    pub(crate) fn dispatch(&mut self, event: InputEvent) {
        let response = self.explorer.handle(event);
        self.apply(response);
    }

    /// Resize the canvas if the panel changed size. The view is kept.
    fn check_resize(&mut self, width: u32, height: u32) {
        let previous = self.panel_size.replace([width, height]);
        if previous == Some([width, height]) {
            return;
        }
        self.raster.set_size(width, height);
        self.dispatch(InputEvent::Resize { width, height });
        if previous.is_none() {
            self.explorer.reset_view();
        }
    }

    fn redraw(&mut self, ctx: &egui::Context) {
        let stats = render(
            &mut self.raster,
            self.explorer.viewport(),
            &self.explorer.plot(),
            self.explorer.levels(),
            self.explorer.colour(),
        );
        if stats.skipped {
            warn!("Frame skipped: view transform is singular");
        }

        let image = egui::ColorImage::from_rgba_unmultiplied(
            [self.raster.width() as usize, self.raster.height() as usize],
            self.raster.pixels(),
        );
        match self.texture {
            Some(ref mut tex) => tex.set(image, egui::TextureOptions::LINEAR),
            None => {
                self.texture = Some(ctx.load_texture("plot", image, egui::TextureOptions::LINEAR));
            }
        }
        self.needs_redraw = false;
    }

    fn update_canvas(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                let available = ui.available_size();
                let width = available.x.max(1.0) as u32;
                let height = available.y.max(1.0) as u32;

                self.check_resize(width, height);

                let (response, painter) =
                    ui.allocate_painter(available, egui::Sense::click_and_drag());

                self.handle_canvas_input(ctx, &response);

                if self.needs_redraw {
                    self.redraw(ctx);
                }

                let uv = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
                if let Some(ref tex) = self.texture {
                    painter.image(tex.id(), response.rect, uv, egui::Color32::WHITE);
                }

                if let Some(info) = self.info {
                    self.show_info_popup(ctx, response.rect.min, info);
                }
            });
    }

    fn remember_window_size(&mut self, ctx: &egui::Context) {
        if let Some(rect) = ctx.input(|i| i.viewport().inner_rect) {
            self.preferences.window_width = rect.width();
            self.preferences.window_height = rect.height();
        }
    }
}

impl eframe::App for PopcornApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.show_controls_panel(ctx);
        self.update_canvas(ctx);
        self.remember_window_size(ctx);
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.preferences.settings = self.explorer.settings().clone();
        self.preferences.save();
        info!("Preferences saved on exit");
    }
}
