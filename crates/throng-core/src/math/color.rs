// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Defines the `Rgb` color triple and the color-space tag attached to it.

use serde::{Deserialize, Serialize};

/// The space a material color triple is expressed in.
///
/// Crowd descriptions default to HSV, with every component in `[0, 1]`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorSpace {
    /// Hue, saturation, value.
    #[default]
    Hsv,
    /// Red, green, blue.
    Rgb,
}

impl std::str::FromStr for ColorSpace {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "hsv" => Ok(ColorSpace::Hsv),
            "rgb" => Ok(ColorSpace::Rgb),
            other => Err(format!("unknown color space '{other}'")),
        }
    }
}

/// A color as three `f32` components.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgb(pub [f32; 3]);

impl Rgb {
    /// Creates a new color triple.
    #[inline]
    pub const fn new(a: f32, b: f32, c: f32) -> Self {
        Self([a, b, c])
    }

    /// Returns the components as an array.
    #[inline]
    pub const fn to_array(self) -> [f32; 3] {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_space_parse() {
        assert_eq!("HSV".parse::<ColorSpace>(), Ok(ColorSpace::Hsv));
        assert_eq!("rgb".parse::<ColorSpace>(), Ok(ColorSpace::Rgb));
        assert!("cmyk".parse::<ColorSpace>().is_err());
    }
}
