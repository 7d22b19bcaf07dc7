//! Interaction state for one canvas: turns pointer, wheel and key events
//! into viewport changes and tells the caller when to redraw.

use tracing::{debug, info};

use crate::colour::ColourMode;
use crate::config::Settings;
use crate::error::CoreError;
use crate::geometry::Point;
use crate::pick::nearest;
use crate::plot::{registry, PlotVariant, Projection};
use crate::rational::Ratio;
use crate::viewport::{ViewportController, ZoomAxis};

/// Horizontal drag distance, in pixels, per radian of rotation.
const ROTATE_PIXELS_PER_RADIAN: f64 = 200.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Middle,
    Secondary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    pub const SHIFT: Self = Self {
        shift: true,
        ..Self::NONE
    };

    pub const CTRL: Self = Self {
        ctrl: true,
        ..Self::NONE
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Char(char),
}

/// A discrete input event in canvas pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerDown {
        button: PointerButton,
        position: Point,
    },
    PointerUp {
        button: PointerButton,
    },
    PointerMove {
        position: Point,
        delta: Point,
        modifiers: Modifiers,
    },
    /// `delta_y` uses the browser convention: positive scrolls down (zooms out).
    Wheel {
        position: Point,
        delta_y: f64,
        modifiers: Modifiers,
    },
    KeyDown {
        key: Key,
        modifiers: Modifiers,
    },
    Resize {
        width: u32,
        height: u32,
    },
}

/// The pair under the pointer, for an info popup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickInfo {
    pub ratio: Ratio,
    /// Screen position of the pair's projected dot.
    pub screen: Point,
}

/// What the caller should do after an event.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Response {
    pub redraw: bool,
    /// Present while the info popup is visible and the pointer position is known.
    pub info: Option<PickInfo>,
}

/// One interactive canvas session.
#[derive(Debug, Clone)]
pub struct Explorer {
    viewport: ViewportController,
    plot: PlotVariant,
    settings: Settings,
    dragging: bool,
    info_visible: bool,
}

impl Explorer {
    /// Start a session on a `width × height` canvas with the view reset.
    pub fn new(width: u32, height: u32, settings: Settings) -> crate::Result<Self> {
        settings.validate()?;
        let plot: PlotVariant = settings.plot.parse()?;
        let mut viewport = ViewportController::new(width, height);
        viewport.reset_view(&plot, settings.levels);
        info!(
            levels = settings.levels,
            plot = plot.name(),
            colour = %settings.colour,
            "Explorer initialized"
        );
        Ok(Self {
            viewport,
            plot,
            settings,
            dragging: false,
            info_visible: false,
        })
    }

    pub fn viewport(&self) -> &ViewportController {
        &self.viewport
    }

    pub fn plot(&self) -> PlotVariant {
        self.plot
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn levels(&self) -> u32 {
        self.settings.levels
    }

    pub fn colour(&self) -> ColourMode {
        self.settings.colour
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn info_visible(&self) -> bool {
        self.info_visible
    }

    /// Change the level count. The view is left where it is.
    pub fn set_levels(&mut self, levels: u32) -> crate::Result<()> {
        if levels < 1 {
            return Err(CoreError::InvalidLevels(i64::from(levels)));
        }
        info!(levels, "Levels changed");
        self.settings.levels = levels;
        Ok(())
    }

    /// Switch plot by name and reset the view. An unknown name leaves the
    /// current plot in place.
    pub fn set_plot(&mut self, name: &str) -> crate::Result<()> {
        let plot = registry()
            .lookup(name)
            .ok_or_else(|| CoreError::UnknownPlot(name.to_string()))?;
        info!(plot = plot.name(), "Plot changed");
        self.plot = plot;
        self.settings.plot = plot.name().to_string();
        self.reset_view();
        Ok(())
    }

    pub fn set_colour(&mut self, colour: ColourMode) {
        info!(%colour, "Colour changed");
        self.settings.colour = colour;
    }

    pub fn reset_view(&mut self) {
        self.viewport.reset_view(&self.plot, self.settings.levels);
    }

    /// Pick the pair under `screen`. `None` while the transform is singular
    /// or when the nearest pair has no finite position (the Semicircle origin).
    pub fn pick(&self, screen: Point) -> Option<PickInfo> {
        let ratio = match nearest(screen, &self.viewport, &self.plot) {
            Ok(r) => r,
            Err(e) => {
                debug!("Skipping pick: {e}");
                return None;
            }
        };
        let model = self.plot.project(ratio.numerator, ratio.denominator);
        let screen = self.viewport.effective_transform().ok()?.apply(model);
        if !(screen.x.is_finite() && screen.y.is_finite()) {
            debug!(%ratio, "Picked pair has no finite position");
            return None;
        }
        debug!(%ratio, "Info");
        Some(PickInfo { ratio, screen })
    }

    fn info_at(&self, position: Point) -> Option<PickInfo> {
        if self.info_visible {
            self.pick(position)
        } else {
            None
        }
    }

    /// Apply one input event.
    pub fn handle(&mut self, event: InputEvent) -> Response {
        match event {
            InputEvent::PointerDown { button, position } => match button {
                PointerButton::Primary => {
                    self.dragging = true;
                    Response::default()
                }
                PointerButton::Middle => {
                    self.info_visible = !self.info_visible;
                    debug!(visible = self.info_visible, "Toggling info popup");
                    Response {
                        redraw: false,
                        info: self.info_at(position),
                    }
                }
                PointerButton::Secondary => Response::default(),
            },
            InputEvent::PointerUp { button } => {
                if button == PointerButton::Primary {
                    self.dragging = false;
                }
                Response::default()
            }
            InputEvent::PointerMove {
                position,
                delta,
                modifiers,
            } => {
                let mut redraw = false;
                if self.dragging && (delta.x != 0.0 || delta.y != 0.0) {
                    if modifiers.shift {
                        self.viewport.rotate_by(delta.x / ROTATE_PIXELS_PER_RADIAN);
                    } else if let Err(e) = self.viewport.pan(delta.x, delta.y) {
                        debug!("Skipping pan: {e}");
                    }
                    redraw = true;
                }
                Response {
                    redraw,
                    info: self.info_at(position),
                }
            }
            InputEvent::Wheel {
                position,
                delta_y,
                modifiers,
            } => {
                let factor = ViewportController::zoom_factor(delta_y);
                let axis = if modifiers.shift {
                    ZoomAxis::Y
                } else if modifiers.ctrl {
                    ZoomAxis::X
                } else {
                    ZoomAxis::Both
                };
                if let Err(e) = self.viewport.zoom(position, factor, axis) {
                    debug!("Skipping zoom: {e}");
                }
                Response {
                    redraw: true,
                    info: self.info_at(position),
                }
            }
            InputEvent::KeyDown { key, modifiers } => match key {
                Key::Escape => {
                    self.dragging = false;
                    self.reset_view();
                    Response {
                        redraw: true,
                        info: None,
                    }
                }
                Key::Char('r') if !modifiers.ctrl && !modifiers.alt && !modifiers.meta => {
                    self.viewport.cycle_rotation_mode();
                    Response {
                        redraw: true,
                        info: None,
                    }
                }
                Key::Char(_) => Response::default(),
            },
            InputEvent::Resize { width, height } => {
                self.viewport.set_size(width, height);
                Response {
                    redraw: true,
                    info: None,
                }
            }
        }
    }
}
