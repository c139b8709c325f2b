use serde::Deserialize;
use serde_json::Value;

use crate::foundation::core::Rgba8Premul;

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ColorDef {
    pub(crate) r: f64,
    pub(crate) g: f64,
    pub(crate) b: f64,
    pub(crate) a: f64,
}

impl ColorDef {
    pub(crate) fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    pub(crate) fn to_rgba8_premul(self) -> Rgba8Premul {
        fn to_u8(x: f64) -> u8 {
            (x.clamp(0.0, 1.0) * 255.0).round() as u8
        }

        let a = self.a.clamp(0.0, 1.0);
        let r = (self.r.clamp(0.0, 1.0) * a).clamp(0.0, 1.0);
        let g = (self.g.clamp(0.0, 1.0) * a).clamp(0.0, 1.0);
        let b = (self.b.clamp(0.0, 1.0) * a).clamp(0.0, 1.0);

        Rgba8Premul {
            r: to_u8(r),
            g: to_u8(g),
            b: to_u8(b),
            a: to_u8(a),
        }
    }
}

impl<'de> Deserialize<'de> for ColorDef {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Text(String),
            Record {
                r: f64,
                g: f64,
                b: f64,
                #[serde(default = "one")]
                a: f64,
            },
            Channels(Vec<f64>),
        }

        fn one() -> f64 {
            1.0
        }

        match Repr::deserialize(deserializer)? {
            Repr::Text(s) => named(&s)
                .or_else(|| parse_hex(&s))
                .ok_or_else(|| serde::de::Error::custom(format!("unknown color `{s}`"))),
            Repr::Record { r, g, b, a } => Ok(Self::rgba(r, g, b, a)),
            Repr::Channels(v) => match v.as_slice() {
                [r, g, b] => Ok(Self::rgba(*r, *g, *b, 1.0)),
                [r, g, b, a] => Ok(Self::rgba(*r, *g, *b, *a)),
                _ => Err(serde::de::Error::custom(
                    "color array must have len 3 ([r,g,b]) or 4 ([r,g,b,a])",
                )),
            },
        }
    }
}

/// Parse a descriptor color value; `None` when absent or malformed.
pub fn parse_color(value: Option<&Value>) -> Option<Rgba8Premul> {
    let value = value?;
    match ColorDef::deserialize(value) {
        Ok(def) => Some(def.to_rgba8_premul()),
        Err(e) => {
            tracing::debug!(error = %e, "color ignored");
            None
        }
    }
}

/// Parse a descriptor color value, falling back to `default`.
pub fn parse_color_or(value: Option<&Value>, default: Rgba8Premul) -> Rgba8Premul {
    parse_color(value).unwrap_or(default)
}

fn named(s: &str) -> Option<ColorDef> {
    let (r, g, b, a) = match s.trim() {
        "red" => (1.0, 0.0, 0.0, 1.0),
        "black" => (0.0, 0.0, 0.0, 1.0),
        "blue" => (0.0, 0.0, 1.0, 1.0),
        "white" => (1.0, 1.0, 1.0, 1.0),
        "green" => (0.0, 1.0, 0.0, 1.0),
        "yellow" => (1.0, 1.0, 0.0, 1.0),
        "purple" => (0.5, 0.0, 0.5, 1.0),
        "gray" => (0.5, 0.5, 0.5, 1.0),
        "darkGray" => (1.0 / 3.0, 1.0 / 3.0, 1.0 / 3.0, 1.0),
        "lightGray" => (2.0 / 3.0, 2.0 / 3.0, 2.0 / 3.0, 1.0),
        "brown" => (0.6, 0.4, 0.2, 1.0),
        "orange" => (1.0, 0.5, 0.0, 1.0),
        "cyan" => (0.0, 1.0, 1.0, 1.0),
        "magenta" => (1.0, 0.0, 1.0, 1.0),
        "clear" => (0.0, 0.0, 0.0, 0.0),
        _ => return None,
    };
    Some(ColorDef::rgba(r, g, b, a))
}

fn parse_hex(s: &str) -> Option<ColorDef> {
    let s = s.trim();
    let s = s.strip_prefix('#')?;
    if !s.is_ascii() {
        return None;
    }

    let nibble = |i: usize| u8::from_str_radix(&s[i..=i], 16).ok().map(|v| v * 17);
    let byte = |i: usize| u8::from_str_radix(&s[i..i + 2], 16).ok();

    let (r, g, b, a) = match s.len() {
        3 => (nibble(0)?, nibble(1)?, nibble(2)?, 255),
        4 => (nibble(0)?, nibble(1)?, nibble(2)?, nibble(3)?),
        6 => (byte(0)?, byte(2)?, byte(4)?, 255),
        8 => (byte(0)?, byte(2)?, byte(4)?, byte(6)?),
        _ => return None,
    };

    Some(ColorDef::rgba(
        f64::from(r) / 255.0,
        f64::from(g) / 255.0,
        f64::from(b) / 255.0,
        f64::from(a) / 255.0,
    ))
}
