use popcorn_core::{registry, ColourMode, Explorer, InputEvent, Key, Modifiers, Point, Settings};
use popcorn_render::{render, Raster, RenderSurface};

const WHITE: [u8; 4] = [255, 255, 255, 255];

fn non_white(raster: &Raster) -> usize {
    raster
        .pixels()
        .chunks_exact(4)
        .filter(|px| *px != WHITE)
        .count()
}

#[test]
fn every_plot_paints_something() {
    for plot in registry().iter() {
        let ex = Explorer::new(
            320,
            240,
            Settings {
                levels: 40,
                plot: plot.to_string(),
                colour: ColourMode::Value,
            },
        )
        .unwrap();
        let mut raster = Raster::new(320, 240).unwrap();
        let stats = render(&mut raster, ex.viewport(), &ex.plot(), ex.levels(), ex.colour());
        assert!(!stats.skipped);
        assert!(stats.dots > 0);
        assert!(non_white(&raster) > 0, "{plot} drew nothing visible");
    }
}

#[test]
fn render_is_deterministic() {
    let ex = Explorer::new(200, 150, Settings::default()).unwrap();
    let mut a = Raster::new(200, 150).unwrap();
    let mut b = Raster::new(200, 150).unwrap();
    render(&mut a, ex.viewport(), &ex.plot(), 50, ColourMode::Denominator);
    render(&mut b, ex.viewport(), &ex.plot(), 50, ColourMode::Denominator);
    assert_eq!(a.pixels(), b.pixels());
}

#[test]
fn colour_modes_change_the_image() {
    let ex = Explorer::new(200, 150, Settings::default()).unwrap();
    let mut black = Raster::new(200, 150).unwrap();
    let mut value = Raster::new(200, 150).unwrap();
    render(&mut black, ex.viewport(), &ex.plot(), 30, ColourMode::Black);
    render(&mut value, ex.viewport(), &ex.plot(), 30, ColourMode::Value);
    assert_ne!(black.pixels(), value.pixels());
}

#[test]
fn unit_dot_lands_on_the_expected_pixel() {
    // Rationals at 10 levels on 200×100: x ∈ [−10, 10], y ∈ [0, 10], 10 px per unit.
    let settings = Settings {
        levels: 10,
        plot: "rationals".into(),
        colour: ColourMode::Black,
    };
    let ex = Explorer::new(200, 100, settings).unwrap();
    let mut raster = Raster::new(200, 100).unwrap();
    render(&mut raster, ex.viewport(), &ex.plot(), 10, ColourMode::Black);
    // (3, 4) → pixel (130, 60)
    assert_eq!(raster.pixel(130, 60), [0, 0, 0, 255]);
    // Halfway between (3, 4) and (4, 4) nothing is drawn.
    assert_eq!(raster.pixel(135, 60), WHITE);
}

#[test]
fn interaction_then_render_keeps_surface_state() {
    let mut ex = Explorer::new(160, 120, Settings::default()).unwrap();
    ex.handle(InputEvent::KeyDown {
        key: Key::Char('r'),
        modifiers: Modifiers::NONE,
    });
    ex.handle(InputEvent::Wheel {
        position: Point::new(80.0, 60.0),
        delta_y: -250.0,
        modifiers: Modifiers::NONE,
    });
    let mut raster = Raster::new(160, 120).unwrap();
    let before = raster.transform();
    let stats = render(&mut raster, ex.viewport(), &ex.plot(), ex.levels(), ex.colour());
    assert!(!stats.skipped);
    assert_eq!(raster.transform(), before);
    assert_eq!(raster.depth(), 0);
}

#[test]
fn resize_to_zero_skips_frame() {
    let mut ex = Explorer::new(0, 0, Settings::default()).unwrap();
    ex.handle(InputEvent::Resize {
        width: 0,
        height: 0,
    });
    let mut raster = Raster::new(1, 1).unwrap();
    let stats = render(&mut raster, ex.viewport(), &ex.plot(), ex.levels(), ex.colour());
    assert!(stats.skipped);
}
