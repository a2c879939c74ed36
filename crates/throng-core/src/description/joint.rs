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

//! Defines skeleton joints and their animation channels.

use super::Primitive;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the six animatable degrees of freedom of a joint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    /// Translation along X.
    Tx,
    /// Translation along Y.
    Ty,
    /// Translation along Z.
    Tz,
    /// Rotation about X.
    Rx,
    /// Rotation about Y.
    Ry,
    /// Rotation about Z.
    Rz,
}

impl Channel {
    /// All channels, in their canonical order.
    pub const ALL: [Channel; 6] = [
        Channel::Tx,
        Channel::Ty,
        Channel::Tz,
        Channel::Rx,
        Channel::Ry,
        Channel::Rz,
    ];

    /// Returns the position of the channel in [`Channel::ALL`].
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Returns `true` for rotation channels.
    #[inline]
    pub fn is_rotate(self) -> bool {
        self.index() >= Channel::Rx.index()
    }

    /// Returns `true` for translation channels.
    #[inline]
    pub fn is_translate(self) -> bool {
        !self.is_rotate()
    }

    /// Returns the two-letter token of the channel.
    pub fn as_str(self) -> &'static str {
        match self {
            Channel::Tx => "tx",
            Channel::Ty => "ty",
            Channel::Tz => "tz",
            Channel::Rx => "rx",
            Channel::Ry => "ry",
            Channel::Rz => "rz",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Channel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Channel::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("unknown channel '{s}'"))
    }
}

/// A joint of an agent type's skeleton.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Joint {
    /// Name of the joint.
    pub name: String,
    /// Name of the parent joint; empty for the root.
    pub parent: String,
    /// Enabled degrees of freedom, ordered as [`Channel::ALL`].
    pub dof: [bool; 6],
    /// The procedural shape owned by this joint.
    pub primitive: Option<Primitive>,
    /// Evaluation order of the channels.
    pub order: Vec<Channel>,
    /// Rest translation values.
    pub translate: Vec<f32>,
    /// Rest transform values.
    pub transform: Vec<f32>,
    /// Variable that scales the joint.
    pub scale_var: Option<String>,
    /// Agent type of the description that owns the joint.
    pub agent_type: String,
}

impl Joint {
    /// Creates a joint with every degree of freedom enabled.
    pub fn new(name: impl Into<String>, agent_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: String::new(),
            dof: [true; 6],
            primitive: None,
            order: Channel::ALL.to_vec(),
            translate: Vec::new(),
            transform: Vec::new(),
            scale_var: None,
            agent_type: agent_type.into(),
        }
    }

    /// Returns `true` if the joint has no parent.
    pub fn is_root(&self) -> bool {
        self.parent.is_empty()
    }

    /// Returns `true` if the given channel may be animated.
    pub fn is_enabled(&self, channel: Channel) -> bool {
        self.dof[channel.index()]
    }

    /// Returns the rest translation as a triple, zero-padded.
    pub fn rest_translation(&self) -> [f32; 3] {
        let mut out = [0.0; 3];
        for (slot, value) in out.iter_mut().zip(&self.translate) {
            *slot = *value;
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_classification() {
        assert!(Channel::Tz.is_translate());
        assert!(Channel::Rx.is_rotate());
        assert_eq!("ry".parse::<Channel>(), Ok(Channel::Ry));
        assert!("sx".parse::<Channel>().is_err());
    }

    #[test]
    fn test_rest_translation_pads() {
        let mut joint = Joint::new("hips", "soldier");
        joint.translate = vec![1.0, 2.0];
        assert_eq!(joint.rest_translation(), [1.0, 2.0, 0.0]);
        assert!(joint.is_root());
        assert!(joint.is_enabled(Channel::Rz));
    }
}
