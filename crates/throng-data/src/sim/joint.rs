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

use throng_core::description::Channel;
use throng_core::error::{CrowdError, CrowdResult};

/// Largest number of frames a joint may cover, gaps included.
pub const MAX_FRAME_SPAN: usize = 1 << 20;

/// Per-channel samples of one joint, dense from `start_frame`.
#[derive(Debug, Clone, PartialEq)]
pub struct SimJoint {
    channels: [Vec<f32>; 6],
    start_frame: i32,
}

impl SimJoint {
    /// Creates an empty joint whose first frame is `start_frame`.
    pub fn new(start_frame: i32) -> Self {
        Self {
            channels: Default::default(),
            start_frame,
        }
    }

    /// Writes the six channel values of a frame.
    ///
    /// Frames past the end grow every channel, zero-filling skipped frames.
    /// Frames before `start_frame` grow the channels backward and move
    /// `start_frame`, so existing samples keep their frame.
    ///
    /// # Errors
    /// Returns [`CrowdError::Bounds`] if the joint would cover more than
    /// [`MAX_FRAME_SPAN`] frames; the joint is left unchanged.
    pub fn add_sample(
        &mut self,
        frame: i32,
        rotate: [f32; 3],
        translate: [f32; 3],
    ) -> CrowdResult<()> {
        let start = i64::from(self.start_frame.min(frame));
        let last = i64::from(self.start_frame) + self.num_frames() as i64 - 1;
        let span = last.max(i64::from(frame)) - start + 1;
        if span > MAX_FRAME_SPAN as i64 {
            return Err(CrowdError::Bounds {
                context: format!("frames of a joint starting at {}", self.start_frame),
                index: i64::from(frame),
                len: MAX_FRAME_SPAN,
            });
        }

        if frame < self.start_frame {
            let shift = (i64::from(self.start_frame) - i64::from(frame)) as usize;
            for channel in &mut self.channels {
                channel.splice(0..0, std::iter::repeat(0.0).take(shift));
            }
            self.start_frame = frame;
        }

        let index = (i64::from(frame) - i64::from(self.start_frame)) as usize;
        if index >= self.num_frames() {
            for channel in &mut self.channels {
                channel.resize(index + 1, 0.0);
            }
        }

        let values = [
            translate[0],
            translate[1],
            translate[2],
            rotate[0],
            rotate[1],
            rotate[2],
        ];
        for (channel, value) in self.channels.iter_mut().zip(values) {
            channel[index] = value;
        }
        Ok(())
    }

    /// Returns the samples of one channel, starting at `start_frame`.
    pub fn channel(&self, channel: Channel) -> &[f32] {
        &self.channels[channel.index()]
    }

    /// Returns the value of a channel at a frame, if sampled.
    pub fn sample(&self, frame: i32, channel: Channel) -> Option<f32> {
        let index = usize::try_from(frame.checked_sub(self.start_frame)?).ok()?;
        self.channels[channel.index()].get(index).copied()
    }

    /// Returns the first frame covered by the arrays.
    pub fn start_frame(&self) -> i32 {
        self.start_frame
    }

    /// Returns the last frame covered by the arrays, if any.
    pub fn end_frame(&self) -> Option<i32> {
        let len = i32::try_from(self.num_frames()).ok()?;
        (len > 0).then(|| self.start_frame + len - 1)
    }

    /// Returns the current length of the channel arrays.
    pub fn num_frames(&self) -> usize {
        self.channels[0].len()
    }
}
