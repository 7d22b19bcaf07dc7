//! Maps egui pointer, wheel and key input on the canvas to [`InputEvent`]s.

use eframe::egui;

use popcorn_core::{InputEvent, Key, Modifiers, Point, PointerButton};

use crate::app::PopcornApp;

/// egui reports wheel steps as roughly half the browser's `deltaY` and with
/// the opposite sign.
const WHEEL_TO_BROWSER: f64 = -2.0;

pub(crate) fn modifiers(m: egui::Modifiers) -> Modifiers {
    Modifiers {
        shift: m.shift,
        ctrl: m.ctrl,
        alt: m.alt,
        meta: m.mac_cmd,
    }
}

/// Browser-convention `deltaY` for an egui scroll delta. Some platforms turn
/// shift+wheel into horizontal scrolling, so `x` is used when `y` is zero.
pub(crate) fn wheel_delta(raw: egui::Vec2) -> f64 {
    let d = if raw.y != 0.0 { raw.y } else { raw.x };
    f64::from(d) * WHEEL_TO_BROWSER
}

fn canvas_point(pos: egui::Pos2, origin: egui::Pos2) -> Point {
    Point::new(f64::from(pos.x - origin.x), f64::from(pos.y - origin.y))
}

impl PopcornApp {
    pub(crate) fn handle_canvas_input(&mut self, ctx: &egui::Context, response: &egui::Response) {
        let origin = response.rect.min;
        let hover = response.hover_pos().map(|p| canvas_point(p, origin));
        let (events, keys) = ctx.input(|i| {
            let mods = modifiers(i.modifiers);
            let mut events = Vec::new();

            if let Some(position) = hover {
                if i.pointer.button_pressed(egui::PointerButton::Primary) {
                    events.push(InputEvent::PointerDown {
                        button: PointerButton::Primary,
                        position,
                    });
                }
                if i.pointer.button_pressed(egui::PointerButton::Middle) {
                    events.push(InputEvent::PointerDown {
                        button: PointerButton::Middle,
                        position,
                    });
                }
                let scroll = i.raw_scroll_delta;
                if scroll != egui::Vec2::ZERO {
                    events.push(InputEvent::Wheel {
                        position,
                        delta_y: wheel_delta(scroll),
                        modifiers: mods,
                    });
                }
            }

            // Drags continue outside the canvas until the button is released.
            if let Some(pos) = i.pointer.latest_pos() {
                let delta = i.pointer.delta();
                if delta != egui::Vec2::ZERO {
                    events.push(InputEvent::PointerMove {
                        position: canvas_point(pos, origin),
                        delta: Point::new(f64::from(delta.x), f64::from(delta.y)),
                        modifiers: mods,
                    });
                }
            }
            if i.pointer.button_released(egui::PointerButton::Primary) {
                events.push(InputEvent::PointerUp {
                    button: PointerButton::Primary,
                });
            }

            let mut keys = Vec::new();
            if i.key_pressed(egui::Key::Escape) {
                keys.push(InputEvent::KeyDown {
                    key: Key::Escape,
                    modifiers: mods,
                });
            }
            if i.key_pressed(egui::Key::R) {
                keys.push(InputEvent::KeyDown {
                    key: Key::Char('r'),
                    modifiers: mods,
                });
            }
            (events, keys)
        });

        for event in events {
            self.dispatch(event);
        }
        if !ctx.wants_keyboard_input() {
            for event in keys {
                self.dispatch(event);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wheel_up_zooms_in() {
        let d = wheel_delta(egui::vec2(0.0, 50.0));
        assert_eq!(d, -100.0);
        assert!(popcorn_core::ViewportController::zoom_factor(d) > 1.0);
    }

    #[test]
    fn horizontal_wheel_is_used_when_vertical_is_zero() {
        assert_eq!(wheel_delta(egui::vec2(-25.0, 0.0)), 50.0);
    }

    #[test]
    fn command_maps_to_meta() {
        let m = modifiers(egui::Modifiers {
            mac_cmd: true,
            ..Default::default()
        });
        assert!(m.meta);
        assert!(!m.ctrl && !m.shift && !m.alt);
    }

    #[test]
    fn canvas_coordinates_are_panel_relative() {
        let p = canvas_point(egui::pos2(110.0, 45.0), egui::pos2(100.0, 40.0));
        assert_eq!(p, Point::new(10.0, 5.0));
    }
}
