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

//! Dense storage for simulated joint animation.
//!
//! Samples arrive frame by frame, per joint, in no particular order. Each
//! [`SimJoint`] keeps six dense channel arrays indexed by
//! `frame - start_frame`; a [`Sim`] groups the joints of one agent and keeps
//! the frame range covering every sample it has seen.

mod joint;

pub use joint::*;

use std::collections::HashMap;
use throng_core::error::CrowdResult;

/// The simulated animation of one agent.
#[derive(Debug, Clone, Default)]
pub struct Sim {
    /// Name of the agent.
    pub agent_name: String,
    /// Agent type of the agent.
    pub agent_type: String,
    /// Selected candidate index per option slot.
    pub options: HashMap<String, usize>,
    joints: HashMap<String, SimJoint>,
    start_frame: Option<i32>,
    end_frame: Option<i32>,
}

impl Sim {
    /// Creates an empty sim for one agent.
    pub fn new(agent_name: impl Into<String>, agent_type: impl Into<String>) -> Self {
        Self {
            agent_name: agent_name.into(),
            agent_type: agent_type.into(),
            ..Default::default()
        }
    }

    /// Records the rotation and translation of a joint at a frame.
    ///
    /// The joint is created on its first sample. A second sample for the same
    /// frame overwrites the first.
    ///
    /// # Errors
    /// Returns [`CrowdError::Bounds`](throng_core::error::CrowdError::Bounds)
    /// if the joint would cover more than [`MAX_FRAME_SPAN`] frames.
    pub fn add_sample(
        &mut self,
        frame: i32,
        joint: &str,
        rotate: [f32; 3],
        translate: [f32; 3],
    ) -> CrowdResult<()> {
        match self.joints.get_mut(joint) {
            Some(sim_joint) => sim_joint.add_sample(frame, rotate, translate)?,
            None => {
                let mut sim_joint = SimJoint::new(frame);
                sim_joint.add_sample(frame, rotate, translate)?;
                self.joints.insert(joint.to_string(), sim_joint);
            }
        }

        self.start_frame = Some(self.start_frame.map_or(frame, |start| start.min(frame)));
        self.end_frame = Some(self.end_frame.map_or(frame, |end| end.max(frame)));
        Ok(())
    }

    /// Returns the samples of a joint.
    pub fn joint(&self, name: &str) -> Option<&SimJoint> {
        self.joints.get(name)
    }

    /// Iterates over the sampled joints.
    pub fn joints(&self) -> impl Iterator<Item = (&str, &SimJoint)> {
        self.joints.iter().map(|(name, joint)| (name.as_str(), joint))
    }

    /// Returns the first frame sampled for any joint.
    pub fn start_frame(&self) -> Option<i32> {
        self.start_frame
    }

    /// Returns the last frame sampled for any joint.
    pub fn end_frame(&self) -> Option<i32> {
        self.end_frame
    }

    /// Returns the inclusive frame range, or `None` before the first sample.
    pub fn frame_range(&self) -> Option<(i32, i32)> {
        Some((self.start_frame?, self.end_frame?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use throng_core::description::Channel;

    const ROT: [f32; 3] = [10.0, 20.0, 30.0];
    const TRANS: [f32; 3] = [1.0, 2.0, 3.0];

    #[test]
    fn test_same_frame_overwrites() {
        let mut sim = Sim::new("agent_1", "soldier");
        sim.add_sample(5, "j", ROT, TRANS).unwrap();
        sim.add_sample(5, "j", [0.0; 3], [9.0, 9.0, 9.0]).unwrap();

        let joint = sim.joint("j").unwrap();
        assert_eq!(joint.num_frames(), 1);
        assert_eq!(joint.sample(5, Channel::Tx), Some(9.0));
        assert_eq!(joint.sample(5, Channel::Rz), Some(0.0));
    }

    #[test]
    fn test_gaps_are_zero_filled() {
        let mut sim = Sim::new("agent_1", "soldier");
        sim.add_sample(0, "j", ROT, TRANS).unwrap();
        sim.add_sample(3, "j", ROT, TRANS).unwrap();

        let joint = sim.joint("j").unwrap();
        assert_eq!(joint.num_frames(), 4);
        assert_eq!(joint.channel(Channel::Rx), &[10.0, 0.0, 0.0, 10.0]);
        assert_eq!(joint.channel(Channel::Tz), &[3.0, 0.0, 0.0, 3.0]);
    }

    #[test]
    fn test_bounds_cover_every_joint() {
        let mut sim = Sim::new("agent_1", "soldier");
        assert_eq!(sim.frame_range(), None);

        sim.add_sample(10, "hips", ROT, TRANS).unwrap();
        sim.add_sample(4, "spine", ROT, TRANS).unwrap();
        sim.add_sample(12, "spine", ROT, TRANS).unwrap();
        sim.add_sample(7, "hips", ROT, TRANS).unwrap();

        assert_eq!(sim.frame_range(), Some((4, 12)));
        assert_eq!(sim.joints().count(), 2);
        assert_eq!(sim.joint("hips").unwrap().start_frame(), 7);

        // A rejected sample leaves the bounds alone.
        assert!(sim.add_sample(i32::MAX, "hips", ROT, TRANS).is_err());
        assert_eq!(sim.frame_range(), Some((4, 12)));
    }
}
