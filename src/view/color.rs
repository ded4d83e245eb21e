//! Colour scale for social impact scores

use std::fmt;

/// Segment boundaries on the 0-100 score scale
const COLD_MAX: f64 = 30.0;
const MID_MAX: f64 = 60.0;
const HOT_MAX: f64 = 100.0;

/// Hue stops: blue, cyan, yellow, red
const HUE_COLD: f64 = 220.0;
const HUE_COOL: f64 = 180.0;
const HUE_WARM: f64 = 60.0;
const HUE_HOT: f64 = 0.0;

const SATURATION: f64 = 75.0;
const LIGHTNESS: f64 = 50.0;

/// A colour in HSL space (hue in degrees, saturation/lightness in percent)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub hue: f64,
    pub saturation: f64,
    pub lightness: f64,
}

impl Hsl {
    /// Convert to 8-bit RGB
    pub fn to_rgb(&self) -> (u8, u8, u8) {
        let s = (self.saturation / 100.0).clamp(0.0, 1.0);
        let l = (self.lightness / 100.0).clamp(0.0, 1.0);
        let h = self.hue.rem_euclid(360.0) / 60.0;

        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = c * (1.0 - (h % 2.0 - 1.0).abs());
        let m = l - c / 2.0;

        let (r, g, b) = match h as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };

        let channel = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
        (channel(r), channel(g), channel(b))
    }
}

/// CSS notation, e.g. `hsl(180, 75%, 50%)`
impl fmt::Display for Hsl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hsl({:.0}, {:.0}%, {:.0}%)",
            self.hue, self.saturation, self.lightness
        )
    }
}

fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

/// Map a social score onto a cold-to-hot gradient.
///
/// `[0,30]` runs blue to cyan, `(30,60]` cyan to yellow, `(60,100]` yellow
/// to red. Hue falls strictly as the score rises. Scores outside 0-100 are
/// clamped; absent or non-finite scores have no colour.
pub fn color_for_social_score(score: Option<f64>) -> Option<Hsl> {
    let score = score.filter(|s| s.is_finite())?.clamp(0.0, HOT_MAX);

    let hue = if score <= COLD_MAX {
        lerp(HUE_COLD, HUE_COOL, score / COLD_MAX)
    } else if score <= MID_MAX {
        lerp(HUE_COOL, HUE_WARM, (score - COLD_MAX) / (MID_MAX - COLD_MAX))
    } else {
        lerp(HUE_WARM, HUE_HOT, (score - MID_MAX) / (HOT_MAX - MID_MAX))
    };

    Some(Hsl {
        hue,
        saturation: SATURATION,
        lightness: LIGHTNESS,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hue(score: f64) -> f64 {
        color_for_social_score(Some(score)).unwrap().hue
    }

    #[test]
    fn test_boundaries_defined() {
        assert_eq!(hue(0.0), 220.0);
        assert_eq!(hue(30.0), 180.0);
        assert_eq!(hue(60.0), 60.0);
        assert_eq!(hue(100.0), 0.0);
    }

    #[test]
    fn test_absent_score() {
        assert_eq!(color_for_social_score(None), None);
        assert_eq!(color_for_social_score(Some(f64::NAN)), None);
    }

    #[test]
    fn test_monotonic_cold_to_hot() {
        let hues: Vec<f64> = (0..=100).map(|s| hue(s as f64)).collect();
        assert!(hues.windows(2).all(|w| w[1] < w[0]));
    }

    #[test]
    fn test_out_of_range_clamped() {
        assert_eq!(hue(-5.0), hue(0.0));
        assert_eq!(hue(140.0), hue(100.0));
    }

    #[test]
    fn test_rgb_conversion() {
        let pure = |hue| Hsl {
            hue,
            saturation: 100.0,
            lightness: 50.0,
        };
        assert_eq!(pure(0.0).to_rgb(), (255, 0, 0));
        assert_eq!(pure(120.0).to_rgb(), (0, 255, 0));
        assert_eq!(pure(240.0).to_rgb(), (0, 0, 255));
        assert_eq!(pure(60.0).to_rgb(), (255, 255, 0));
    }

    #[test]
    fn test_css_notation() {
        let color = color_for_social_score(Some(45.0)).unwrap();
        assert_eq!(color.to_string(), "hsl(120, 75%, 50%)");
    }
}
