// Copyright 2025 Fernando Borretti
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

use std::f64::consts::PI;

/// The number of ticks a flip takes to complete.
pub const DEFAULT_FLIP_STEPS: u32 = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Face {
    Front,
    Back,
}

impl Face {
    pub fn flipped(self) -> Self {
        match self {
            Face::Front => Face::Back,
            Face::Back => Face::Front,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlipState {
    Resting(Face),
    Animating {
        from: Face,
        to: Face,
        /// Ticks elapsed since the flip was triggered.
        tick: u32,
    },
}

/// The card flip animation. A flip squashes the card horizontally to zero
/// and back out over a fixed number of ticks, driven by the host's frame
/// loop.
#[derive(Clone, Debug)]
pub struct FlipAnimation {
    state: FlipState,
    steps: u32,
}

impl FlipAnimation {
    pub fn new(steps: u32) -> Self {
        Self {
            state: FlipState::Resting(Face::Front),
            steps: steps.max(1),
        }
    }

    pub fn state(&self) -> FlipState {
        self.state
    }

    pub fn steps(&self) -> u32 {
        self.steps
    }

    /// The face being shown, or the face being flipped to.
    pub fn face(&self) -> Face {
        match self.state {
            FlipState::Resting(face) => face,
            FlipState::Animating { to, .. } => to,
        }
    }

    pub fn is_flipped(&self) -> bool {
        self.face() == Face::Back
    }

    pub fn is_animating(&self) -> bool {
        matches!(self.state, FlipState::Animating { .. })
    }

    /// Animation progress in `[0, 1]`. A resting card is complete.
    pub fn progress(&self) -> f64 {
        match self.state {
            FlipState::Resting(_) => 1.0,
            FlipState::Animating { tick, .. } => (tick as f64 / self.steps as f64).min(1.0),
        }
    }

    /// The horizontal scale factor to draw the card with.
    pub fn scale(&self) -> f64 {
        match self.state {
            FlipState::Resting(_) => 1.0,
            FlipState::Animating { .. } => (self.progress() * PI).cos(),
        }
    }

    /// Starts flipping towards the other face. A flip in progress is
    /// abandoned and the new one starts from the beginning.
    pub fn trigger(&mut self) {
        let from = self.face();
        self.state = FlipState::Animating {
            from,
            to: from.flipped(),
            tick: 0,
        };
    }

    /// Advances the animation by one frame. Returns true while more frames
    /// are needed.
    pub fn tick(&mut self) -> bool {
        match self.state {
            FlipState::Resting(_) => false,
            FlipState::Animating { from, to, tick } => {
                let tick = tick + 1;
                if tick >= self.steps {
                    self.state = FlipState::Resting(to);
                    false
                } else {
                    self.state = FlipState::Animating { from, to, tick };
                    true
                }
            }
        }
    }

    /// Runs the animation to completion, returning the scale factor of each
    /// frame.
    pub fn drain(&mut self) -> Vec<f64> {
        let mut frames = Vec::new();
        while self.is_animating() {
            frames.push(self.scale());
            self.tick();
        }
        frames
    }

    /// Shows the front face immediately.
    pub fn reset(&mut self) {
        self.state = FlipState::Resting(Face::Front);
    }
}

impl Default for FlipAnimation {
    fn default() -> Self {
        Self::new(DEFAULT_FLIP_STEPS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{a} != {b}");
    }

    #[test]
    fn test_starts_resting_on_front() {
        let flip = FlipAnimation::default();
        assert_eq!(flip.state(), FlipState::Resting(Face::Front));
        assert!(!flip.is_flipped());
        assert_close(flip.scale(), 1.0);
    }

    #[test]
    fn test_full_flip() {
        let mut flip = FlipAnimation::default();
        flip.trigger();
        assert_eq!(
            flip.state(),
            FlipState::Animating {
                from: Face::Front,
                to: Face::Back,
                tick: 0
            }
        );
        assert_close(flip.progress(), 0.0);
        for _ in 0..9 {
            assert!(flip.tick());
        }
        assert_close(flip.progress(), 0.9);
        assert!(!flip.tick());
        assert_eq!(flip.state(), FlipState::Resting(Face::Back));
        assert_close(flip.progress(), 1.0);
        // Further ticks do nothing.
        assert!(!flip.tick());
        assert_eq!(flip.state(), FlipState::Resting(Face::Back));
    }

    #[test]
    fn test_scale_squashes_through_zero() {
        let mut flip = FlipAnimation::default();
        flip.trigger();
        assert_close(flip.scale(), 1.0);
        for _ in 0..5 {
            flip.tick();
        }
        assert_close(flip.scale(), 0.0);
        for _ in 0..4 {
            flip.tick();
        }
        assert_close(flip.scale(), (0.9 * PI).cos());
    }

    #[test]
    fn test_retrigger_restarts() {
        let mut flip = FlipAnimation::default();
        flip.trigger();
        for _ in 0..4 {
            flip.tick();
        }
        assert_close(flip.progress(), 0.4);
        flip.trigger();
        assert_eq!(
            flip.state(),
            FlipState::Animating {
                from: Face::Back,
                to: Face::Front,
                tick: 0
            }
        );
    }

    #[test]
    fn test_drain() {
        let mut flip = FlipAnimation::new(4);
        flip.trigger();
        let frames = flip.drain();
        assert_eq!(frames.len(), 4);
        assert_close(frames[0], 1.0);
        assert_close(frames[2], 0.0);
        assert_eq!(flip.state(), FlipState::Resting(Face::Back));
        assert!(flip.drain().is_empty());
    }

    #[test]
    fn test_zero_steps_is_one_step() {
        let mut flip = FlipAnimation::new(0);
        assert_eq!(flip.steps(), 1);
        flip.trigger();
        assert!(!flip.tick());
        assert!(flip.is_flipped());
    }
}
