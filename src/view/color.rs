use serde::{Serialize, Serializer};

/// 24-bit color, serialized as `#rrggbb`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }

    /// Linear interpolation between two colors, `t` in [0, 1]
    pub fn lerp(self, other: Rgb, t: f64) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Rgb(mix(self.0, other.0), mix(self.1, other.1), mix(self.2, other.2))
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.hex())
    }
}

pub const BLUE: Rgb = Rgb(0, 0, 255);
pub const RED: Rgb = Rgb(255, 0, 0);
pub const BLACK: Rgb = Rgb(0, 0, 0);
pub const SKY_BLUE: Rgb = Rgb(135, 206, 235);
/// Land not covered by any layer entry
pub const LAND: Rgb = Rgb(229, 236, 246);
pub const COASTLINE: Rgb = Rgb(42, 63, 95);

/// Sequential color scale made of evenly spaced stops.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ColorScale {
    pub name: &'static str,
    pub stops: &'static [Rgb],
}

/// Single-hue green scale, light to dark.
pub const GREENS: ColorScale = ColorScale {
    name: "Greens",
    stops: &[
        Rgb(247, 252, 245),
        Rgb(229, 245, 224),
        Rgb(199, 233, 192),
        Rgb(161, 217, 155),
        Rgb(116, 196, 118),
        Rgb(65, 171, 93),
        Rgb(35, 139, 69),
        Rgb(0, 109, 44),
        Rgb(0, 68, 27),
    ],
};

impl ColorScale {
    /// Sample the scale at `t` in [0, 1]; values outside are clamped.
    pub fn sample(&self, t: f64) -> Rgb {
        let Some(&first) = self.stops.first() else {
            return BLACK;
        };
        if self.stops.len() == 1 || t.is_nan() {
            return first;
        }

        let pos = t.clamp(0.0, 1.0) * (self.stops.len() - 1) as f64;
        let lower = (pos.floor() as usize).min(self.stops.len() - 2);
        self.stops[lower].lerp(self.stops[lower + 1], pos - lower as f64)
    }
}
