//! Colour parsing and contrast helpers.
//!
//! Used to derive readable foreground tokens from theme colours. Renderers
//! still reference the resulting values by role name only.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// WCAG relative luminance in `0.0..=1.0`.
    pub fn luminance(&self) -> f64 {
        fn channel(c: u8) -> f64 {
            let c = c as f64 / 255.0;
            if c <= 0.03928 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        }
        0.2126 * channel(self.r) + 0.7152 * channel(self.g) + 0.0722 * channel(self.b)
    }
}

/// Parse `#rgb`, `#rrggbb`, `rgb(r, g, b)` and `hsl(h, s%, l%)`.
pub fn parse_color(value: &str) -> Option<Rgb> {
    let value = value.trim();

    if let Some(hex) = value.strip_prefix('#') {
        return parse_hex(hex);
    }

    if let Some(args) = function_args(value, "rgb") {
        let [r, g, b] = split_args(args)?;
        return Some(Rgb::new(
            r.parse::<f64>().ok()?.clamp(0.0, 255.0).round() as u8,
            g.parse::<f64>().ok()?.clamp(0.0, 255.0).round() as u8,
            b.parse::<f64>().ok()?.clamp(0.0, 255.0).round() as u8,
        ));
    }

    if let Some(args) = function_args(value, "hsl") {
        let [h, s, l] = split_args(args)?;
        let h: f64 = h.trim_end_matches("deg").parse().ok()?;
        let s: f64 = s.trim_end_matches('%').parse().ok()?;
        let l: f64 = l.trim_end_matches('%').parse().ok()?;
        return Some(hsl_to_rgb(h, s / 100.0, l / 100.0));
    }

    None
}

/// WCAG contrast ratio between two colours (`1.0..=21.0`).
pub fn contrast_ratio(a: Rgb, b: Rgb) -> f64 {
    let (la, lb) = (a.luminance(), b.luminance());
    let (hi, lo) = if la > lb { (la, lb) } else { (lb, la) };
    (hi + 0.05) / (lo + 0.05)
}

/// Pick white or near-black text, whichever reads better on `background`.
///
/// Unparseable colours get white text.
pub fn readable_text_on(background: &str) -> &'static str {
    const LIGHT: &str = "#ffffff";
    const DARK: &str = "#111827";

    match parse_color(background) {
        Some(bg) => {
            let white = contrast_ratio(bg, Rgb::new(255, 255, 255));
            let dark = contrast_ratio(bg, Rgb::new(0x11, 0x18, 0x27));
            if white >= dark {
                LIGHT
            } else {
                DARK
            }
        }
        None => LIGHT,
    }
}

fn parse_hex(hex: &str) -> Option<Rgb> {
    let digits: Vec<u8> = hex
        .chars()
        .map(|c| c.to_digit(16).map(|d| d as u8))
        .collect::<Option<Vec<_>>>()?;

    match digits.as_slice() {
        [r, g, b] => Some(Rgb::new(r * 17, g * 17, b * 17)),
        [r1, r2, g1, g2, b1, b2] => Some(Rgb::new(r1 * 16 + r2, g1 * 16 + g2, b1 * 16 + b2)),
        _ => None,
    }
}

fn function_args<'a>(value: &'a str, name: &str) -> Option<&'a str> {
    value
        .strip_prefix(name)?
        .trim_start()
        .strip_prefix('(')?
        .strip_suffix(')')
}

fn split_args(args: &str) -> Option<[&str; 3]> {
    let parts: Vec<&str> = args
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|p| !p.is_empty())
        .collect();
    match parts.as_slice() {
        [a, b, c] => Some([*a, *b, *c]),
        _ => None,
    }
}

fn hsl_to_rgb(h: f64, s: f64, l: f64) -> Rgb {
    let h = h.rem_euclid(360.0) / 360.0;
    let s = s.clamp(0.0, 1.0);
    let l = l.clamp(0.0, 1.0);

    if s == 0.0 {
        let v = (l * 255.0).round() as u8;
        return Rgb::new(v, v, v);
    }

    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;

    fn hue(p: f64, q: f64, mut t: f64) -> f64 {
        if t < 0.0 {
            t += 1.0;
        }
        if t > 1.0 {
            t -= 1.0;
        }
        if t < 1.0 / 6.0 {
            p + (q - p) * 6.0 * t
        } else if t < 0.5 {
            q
        } else if t < 2.0 / 3.0 {
            p + (q - p) * (2.0 / 3.0 - t) * 6.0
        } else {
            p
        }
    }

    Rgb::new(
        (hue(p, q, h + 1.0 / 3.0) * 255.0).round() as u8,
        (hue(p, q, h) * 255.0).round() as u8,
        (hue(p, q, h - 1.0 / 3.0) * 255.0).round() as u8,
    )
}
