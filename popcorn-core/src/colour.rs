//! Dot colouring: maps a pair `(i, j)` to a fill colour.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Saturation and lightness shared by every hue-based mode.
const SATURATION: f64 = 100.0;
const LIGHTNESS: f64 = 40.0;

/// A fill colour in the form a 2D canvas accepts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Colour {
    Black,
    White,
    /// `hue` in degrees (not wrapped), `saturation`/`lightness` in percent.
    Hsl {
        hue: f64,
        saturation: f64,
        lightness: f64,
    },
}

impl Colour {
    pub fn hue(hue: f64) -> Self {
        Self::Hsl {
            hue,
            saturation: SATURATION,
            lightness: LIGHTNESS,
        }
    }

    /// Convert to opaque RGBA8. Hue wraps modulo 360 like CSS.
    pub fn to_rgba(self) -> [u8; 4] {
        match self {
            Self::Black => [0, 0, 0, 255],
            Self::White => [255, 255, 255, 255],
            Self::Hsl {
                hue,
                saturation,
                lightness,
            } => {
                let h = if hue.is_finite() { hue.rem_euclid(360.0) } else { 0.0 };
                let s = (saturation / 100.0).clamp(0.0, 1.0);
                let l = (lightness / 100.0).clamp(0.0, 1.0);
                let chroma = (1.0 - (2.0 * l - 1.0).abs()) * s;
                let sector = h / 60.0;
                let x = chroma * (1.0 - (sector % 2.0 - 1.0).abs());
                let (r, g, b) = match sector as u32 {
                    0 => (chroma, x, 0.0),
                    1 => (x, chroma, 0.0),
                    2 => (0.0, chroma, x),
                    3 => (0.0, x, chroma),
                    4 => (x, 0.0, chroma),
                    _ => (chroma, 0.0, x),
                };
                let m = l - chroma / 2.0;
                let to_u8 = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
                [to_u8(r), to_u8(g), to_u8(b), 255]
            }
        }
    }
}

impl fmt::Display for Colour {
    /// CSS colour syntax.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Black => f.write_str("black"),
            Self::White => f.write_str("white"),
            Self::Hsl {
                hue,
                saturation,
                lightness,
            } => write!(f, "hsl({hue}, {saturation}%, {lightness}%)"),
        }
    }
}

/// How dots are coloured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColourMode {
    #[default]
    Black,
    /// Hue follows the value `i/j` around the colour wheel.
    Value,
    Denominator,
    Numerator,
    /// Distance to the nearer end of the row, so `i/j` and `(j−i)/j` match.
    Symmetric,
    Ratio,
    Quotient,
    Remainder,
}

impl ColourMode {
    pub const ALL: [ColourMode; 8] = [
        Self::Black,
        Self::Value,
        Self::Denominator,
        Self::Numerator,
        Self::Symmetric,
        Self::Ratio,
        Self::Quotient,
        Self::Remainder,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Black => "black",
            Self::Value => "value",
            Self::Denominator => "denominator",
            Self::Numerator => "numerator",
            Self::Symmetric => "symmetric",
            Self::Ratio => "ratio",
            Self::Quotient => "quotient",
            Self::Remainder => "remainder",
        }
    }

    /// Colour for the pair `(i, j)`.
    #[inline]
    pub fn fill(self, i: i64, j: i64) -> Colour {
        (self.painter())(i, j)
    }

    /// Resolve the mode once to a plain function, so a draw loop does not
    /// branch on the mode for every dot.
    pub fn painter(self) -> fn(i64, i64) -> Colour {
        match self {
            Self::Black => |_, _| Colour::Black,
            Self::Value => value,
            Self::Denominator => |_, j| decade(j - 1),
            Self::Numerator => |i, _| decade(i - 1),
            Self::Symmetric => |i, j| decade(i.abs().min((j - i.abs()).abs()) - 1),
            Self::Ratio => ratio,
            Self::Quotient => |i, j| decade(if j == 0 { 0 } else { floor_div(i, j) - 1 }),
            Self::Remainder => |i, j| decade(if j == 0 { 0 } else { i % j }),
        }
    }
}

/// Ten hues, 36° apart. Uses truncating `%`, so negative `d` gives negative hues.
#[inline]
fn decade(d: i64) -> Colour {
    Colour::hue(((d % 10) * 36) as f64)
}

fn value(i: i64, j: i64) -> Colour {
    if j == 0 {
        return Colour::hue(0.0);
    }
    Colour::hue(i as f64 * 360.0 / j as f64)
}

fn ratio(i: i64, j: i64) -> Colour {
    if j == 0 {
        return Colour::hue(0.0);
    }
    Colour::hue(((floor_div(36 * i, j) - 36) % 360) as f64)
}

#[inline]
fn floor_div(n: i64, d: i64) -> i64 {
    (n as f64 / d as f64).floor() as i64
}

impl fmt::Display for ColourMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ColourMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| CoreError::UnknownColourMode(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hue_of(c: Colour) -> f64 {
        match c {
            Colour::Hsl { hue, .. } => hue,
            other => panic!("expected hsl, got {other:?}"),
        }
    }

    #[test]
    fn black_ignores_pair() {
        assert_eq!(ColourMode::Black.fill(3, 7), Colour::Black);
    }

    #[test]
    fn value_hue() {
        assert_eq!(hue_of(ColourMode::Value.fill(1, 2)), 180.0);
        assert_eq!(hue_of(ColourMode::Value.fill(1, 3)), 120.0);
    }

    #[test]
    fn decade_modes() {
        assert_eq!(hue_of(ColourMode::Denominator.fill(1, 13)), 72.0);
        assert_eq!(hue_of(ColourMode::Numerator.fill(4, 9)), 108.0);
        // min(|2|, |7 − 2|) − 1 = 1
        assert_eq!(hue_of(ColourMode::Symmetric.fill(2, 7)), 36.0);
        assert_eq!(hue_of(ColourMode::Symmetric.fill(5, 7)), 36.0);
        assert_eq!(hue_of(ColourMode::Quotient.fill(7, 2)), 72.0);
        assert_eq!(hue_of(ColourMode::Remainder.fill(7, 3)), 36.0);
    }

    #[test]
    fn ratio_hue() {
        // floor(36 · 1/2) − 36 = −18
        assert_eq!(hue_of(ColourMode::Ratio.fill(1, 2)), -18.0);
        assert_eq!(hue_of(ColourMode::Ratio.fill(5, 1)), 144.0);
    }

    #[test]
    fn zero_denominator_is_hue_zero() {
        for mode in [ColourMode::Ratio, ColourMode::Quotient, ColourMode::Remainder] {
            assert_eq!(hue_of(mode.fill(1, 0)), 0.0, "{mode}");
        }
    }

    #[test]
    fn negative_numerators_keep_truncating_remainder() {
        // Rationals plot: i = −3, j = 1 → d = −4 → hue −144
        assert_eq!(hue_of(ColourMode::Numerator.fill(-3, 1)), -144.0);
        // floor(−3/2) − 1 = −3
        assert_eq!(hue_of(ColourMode::Quotient.fill(-3, 2)), -108.0);
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("Quotient".parse::<ColourMode>(), Ok(ColourMode::Quotient));
        assert_eq!(
            "plaid".parse::<ColourMode>(),
            Err(CoreError::UnknownColourMode("plaid".into()))
        );
        for mode in ColourMode::ALL {
            assert_eq!(mode.to_string().parse::<ColourMode>(), Ok(mode));
        }
    }

    #[test]
    fn css_strings() {
        assert_eq!(Colour::Black.to_string(), "black");
        assert_eq!(Colour::hue(72.0).to_string(), "hsl(72, 100%, 40%)");
    }

    #[test]
    fn hsl_to_rgba() {
        assert_eq!(Colour::hue(0.0).to_rgba(), [204, 0, 0, 255]);
        assert_eq!(Colour::hue(120.0).to_rgba(), [0, 204, 0, 255]);
        assert_eq!(Colour::hue(-120.0).to_rgba(), Colour::hue(240.0).to_rgba());
        assert_eq!(Colour::White.to_rgba(), [255, 255, 255, 255]);
    }
}
