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

//! Defines animation curves and the actions that group them.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// The only interpolation type kept by [`Action::add_curve`].
pub const LINEAR: &str = "linear";

/// An animation curve for one object channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Curve {
    /// Channel identifier, `"object:attribute"` or a bare `"attribute"`.
    pub channel: String,
    /// Interpolation type tag.
    pub kind: String,
    /// `(time, value)` samples.
    pub points: Vec<(f32, f32)>,
}

impl Curve {
    /// Creates a curve with `num_points` zeroed samples.
    pub fn new(channel: impl Into<String>, kind: impl Into<String>, num_points: usize) -> Self {
        Self {
            channel: channel.into(),
            kind: kind.into(),
            points: vec![(0.0, 0.0); num_points],
        }
    }

    /// Splits the channel identifier into its object and attribute parts.
    pub fn key(&self) -> ChannelKey {
        match self.channel.split_once(':') {
            Some((object, attribute)) => ChannelKey::new(object, attribute),
            None => ChannelKey::new("", self.channel.as_str()),
        }
    }
}

/// Identifies an animated attribute of an object.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChannelKey {
    /// The animated object; empty when the curve names only an attribute.
    pub object: String,
    /// The animated attribute.
    pub attribute: String,
}

impl ChannelKey {
    /// Creates a channel key.
    pub fn new(object: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self {
            object: object.into(),
            attribute: attribute.into(),
        }
    }
}

impl fmt::Display for ChannelKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.object, self.attribute)
    }
}

/// A named animation: a set of linear curves keyed by object channel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Action {
    /// Name of the action.
    pub name: String,
    /// Curves by object channel.
    pub curves: HashMap<ChannelKey, Curve>,
    /// Largest point count of any curve, used to size playback buffers.
    pub max_points: usize,
}

impl Action {
    /// Creates an empty action.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Adds a curve, keyed by its object channel.
    ///
    /// Curves that are not [`LINEAR`] are dropped.
    pub fn add_curve(&mut self, curve: Curve) {
        if curve.kind != LINEAR {
            log::debug!(
                "Action '{}': skipping {} curve on '{}'",
                self.name,
                curve.kind,
                curve.channel
            );
            return;
        }
        self.max_points = self.max_points.max(curve.points.len());
        self.curves.insert(curve.key(), curve);
    }

    /// Returns the curve animating the given object channel.
    pub fn curve(&self, object: &str, attribute: &str) -> Option<&Curve> {
        self.curves.get(&ChannelKey::new(object, attribute))
    }
}
