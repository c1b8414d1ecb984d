//! Colour arithmetic on CSS hex strings.

use std::fmt;

/// An 8-bit-per-channel colour.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

/// Hue in degrees, saturation and lightness in percent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hsl {
    pub hue: f64,
    pub saturation: f64,
    pub lightness: f64,
}

impl Rgba {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parse `#rgb`, `#rgba`, `#rrggbb` or `#rrggbbaa`.
    pub fn parse(text: &str) -> Option<Self> {
        let digits = text.trim().strip_prefix('#')?;
        if !digits.is_ascii() {
            return None;
        }

        let short = |i: usize| {
            let digit = u8::from_str_radix(&digits[i..i + 1], 16).ok()?;
            Some(digit * 17)
        };

        let long = |i: usize| u8::from_str_radix(&digits[2 * i..2 * i + 2], 16).ok();

        match digits.len() {
            3 => Some(Self::new(short(0)?, short(1)?, short(2)?)),
            4 => Some(Self {
                a: short(3)?,
                ..Self::new(short(0)?, short(1)?, short(2)?)
            }),
            6 => Some(Self::new(long(0)?, long(1)?, long(2)?)),
            8 => Some(Self {
                a: long(3)?,
                ..Self::new(long(0)?, long(1)?, long(2)?)
            }),
            _ => None,
        }
    }

    pub fn to_hsl(self) -> Hsl {
        let r = f64::from(self.r) / 255.0;
        let g = f64::from(self.g) / 255.0;
        let b = f64::from(self.b) / 255.0;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let lightness = (max + min) / 2.0;

        if max == min {
            return Hsl {
                hue: 0.0,
                saturation: 0.0,
                lightness: lightness * 100.0,
            };
        }

        let delta = max - min;
        let saturation = if lightness > 0.5 {
            delta / (2.0 - max - min)
        } else {
            delta / (max + min)
        };

        let hue = if max == r {
            (g - b) / delta + if g < b { 6.0 } else { 0.0 }
        } else if max == g {
            (b - r) / delta + 2.0
        } else {
            (r - g) / delta + 4.0
        };

        Hsl {
            hue: hue * 60.0,
            saturation: saturation * 100.0,
            lightness: lightness * 100.0,
        }
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)?;
        if self.a != 255 {
            write!(f, "{:02x}", self.a)?;
        }

        Ok(())
    }
}

impl Hsl {
    /// Create a colour, wrapping the hue and clamping the percentages.
    pub fn new(hue: f64, saturation: f64, lightness: f64) -> Self {
        Self {
            hue: hue.rem_euclid(360.0),
            saturation: saturation.clamp(0.0, 100.0),
            lightness: lightness.clamp(0.0, 100.0),
        }
    }

    pub fn to_rgba(self, alpha: u8) -> Rgba {
        let h = self.hue.rem_euclid(360.0) / 360.0;
        let s = self.saturation.clamp(0.0, 100.0) / 100.0;
        let l = self.lightness.clamp(0.0, 100.0) / 100.0;

        let channel = |value: f64| (value * 255.0).round().clamp(0.0, 255.0) as u8;

        if s == 0.0 {
            let grey = channel(l);
            return Rgba {
                r: grey,
                g: grey,
                b: grey,
                a: alpha,
            };
        }

        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;

        Rgba {
            r: channel(hue_to_rgb(p, q, h + 1.0 / 3.0)),
            g: channel(hue_to_rgb(p, q, h)),
            b: channel(hue_to_rgb(p, q, h - 1.0 / 3.0)),
            a: alpha,
        }
    }
}

fn hue_to_rgb(p: f64, q: f64, t: f64) -> f64 {
    let t = t.rem_euclid(1.0);

    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

/// Parse a colour, change it in HSL space and print it again.
pub fn transform(text: &str, f: impl FnOnce(Hsl) -> Hsl) -> Option<String> {
    let rgba = Rgba::parse(text)?;
    let hsl = f(rgba.to_hsl());
    Some(hsl.to_rgba(rgba.a).to_string())
}
