use crate::geometry::Point;
use crate::plot::Projection;
use crate::rational::Ratio;
use crate::viewport::ViewportController;

/// The pair whose dot is (approximately) under `screen`.
///
/// Inverts the effective transform, unprojects and rounds each component.
/// There is no neighbourhood search, so the result is not guaranteed to be
/// a coprime pair or the closest drawn dot; it is exact when the cursor is
/// on a dot centre. Non-finite intermediate values round to 0.
pub fn nearest<P: Projection>(
    screen: Point,
    viewport: &ViewportController,
    plot: &P,
) -> crate::Result<Ratio> {
    let model = viewport.to_model(screen)?;
    let (numerator, denominator) = plot.unproject(model);
    Ok(Ratio::new(
        numerator.round() as i64,
        denominator.round() as i64,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plot::PlotVariant;
    use crate::viewport::RotationMode;
    use crate::CoreError;

    fn viewport_for(plot: PlotVariant, levels: u32) -> ViewportController {
        let mut vp = ViewportController::new(800, 600);
        vp.reset_view(&plot, levels);
        vp
    }

    #[test]
    fn picks_dot_under_cursor() {
        for plot in PlotVariant::ALL {
            let vp = viewport_for(plot, 20);
            for (i, j) in [(1, 2), (3, 7), (5, 11), (1, 1)] {
                let screen = vp.base().apply(plot.project(i, j));
                let got = nearest(screen, &vp, &plot).unwrap();
                assert_eq!(got, Ratio::new(i, j), "{plot} at {screen:?}");
            }
        }
    }

    #[test]
    fn picks_under_rotation() {
        let plot = PlotVariant::Rationals;
        let mut vp = viewport_for(plot, 20);
        vp.set_rotation_mode(RotationMode::Baked);
        vp.rotate_by(0.6);
        let screen = vp.effective_transform().unwrap().apply(plot.project(-4, 9));
        assert_eq!(nearest(screen, &vp, &plot).unwrap(), Ratio::new(-4, 9));
    }

    #[test]
    fn rounds_nearby_points() {
        let plot = PlotVariant::Rationals;
        let vp = viewport_for(plot, 20);
        let screen = vp.base().apply(Point::new(2.3, 5.6));
        assert_eq!(nearest(screen, &vp, &plot).unwrap(), Ratio::new(2, 6));
    }

    #[test]
    fn singular_view_is_an_error() {
        let mut vp = ViewportController::new(800, 0);
        vp.reset_view(&PlotVariant::Normal, 10);
        assert!(matches!(
            nearest(Point::ORIGIN, &vp, &PlotVariant::Normal),
            Err(CoreError::SingularMatrix { .. })
        ));
    }
}
