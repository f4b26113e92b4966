//! Window geometry document

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// Smallest window the UI layer allows
pub const MIN_WIDTH: i32 = 400;
pub const MIN_HEIGHT: i32 = 300;

const DEFAULT_WIDTH: i32 = 1024;
const DEFAULT_HEIGHT: i32 = 720;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowGeometry {
    #[serde(default = "default_width", deserialize_with = "dimension")]
    pub width: i32,
    #[serde(default = "default_height", deserialize_with = "dimension")]
    pub height: i32,
}

fn default_width() -> i32 {
    DEFAULT_WIDTH
}

fn default_height() -> i32 {
    DEFAULT_HEIGHT
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawDimension {
    Int(i64),
    Float(f64),
    Text(String),
}

/// Accepts `800`, `800.0` (truncated) and `"800"`
fn dimension<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i32, D::Error> {
    let value = match RawDimension::deserialize(deserializer)? {
        RawDimension::Int(n) => n,
        RawDimension::Float(f) if f.is_finite() => f.trunc() as i64,
        RawDimension::Float(f) => return Err(D::Error::custom(format!("bad dimension {f}"))),
        RawDimension::Text(text) => text
            .trim()
            .parse::<i64>()
            .map_err(|e| D::Error::custom(format!("bad dimension {text:?}: {e}")))?,
    };
    i32::try_from(value).map_err(|_| D::Error::custom(format!("dimension {value} out of range")))
}

impl WindowGeometry {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Size to hand to the window, raised to the minimum where needed.
    ///
    /// The stored value is left as recorded.
    pub fn clamped(&self) -> Self {
        Self {
            width: self.width.max(MIN_WIDTH),
            height: self.height.max(MIN_HEIGHT),
        }
    }
}

impl Default for WindowGeometry {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}
