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

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// A position in the filtered view, and whether the term at that position
/// is the active card.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Cursor {
    position: Option<usize>,
    active: bool,
}

impl Cursor {
    /// The cursor for a freshly computed view of length `len`. A lone match
    /// is activated immediately.
    pub fn reset(len: usize) -> Self {
        Self {
            position: if len == 0 { None } else { Some(0) },
            active: len == 1,
        }
    }

    pub fn position(&self) -> Option<usize> {
        self.position
    }

    /// The position of the active card, if there is one.
    pub fn active(&self) -> Option<usize> {
        if self.active { self.position } else { None }
    }

    /// Moves one step through a view of length `len`, wrapping around at
    /// either end. Returns false if the view is empty.
    pub fn navigate(&mut self, direction: Direction, len: usize) -> bool {
        if len == 0 {
            return false;
        }
        let next = match (self.active(), direction) {
            (None, Direction::Forward) => 0,
            (None, Direction::Backward) => len - 1,
            (Some(index), Direction::Forward) => (index + 1) % len,
            (Some(index), Direction::Backward) => (index + len - 1) % len,
        };
        self.position = Some(next);
        self.active = true;
        true
    }

    /// Activates the term at `position`. Returns false if it is out of range.
    pub fn select(&mut self, position: usize, len: usize) -> bool {
        if position >= len {
            return false;
        }
        self.position = Some(position);
        self.active = true;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset() {
        assert_eq!(Cursor::reset(0).position(), None);
        assert_eq!(Cursor::reset(0).active(), None);
        assert_eq!(Cursor::reset(1).active(), Some(0));
        assert_eq!(Cursor::reset(3).position(), Some(0));
        assert_eq!(Cursor::reset(3).active(), None);
    }

    #[test]
    fn test_empty_view_is_noop() {
        let mut cursor = Cursor::reset(0);
        assert!(!cursor.navigate(Direction::Forward, 0));
        assert!(!cursor.navigate(Direction::Backward, 0));
        assert_eq!(cursor, Cursor::reset(0));
    }

    #[test]
    fn test_first_step_without_active_card() {
        let mut cursor = Cursor::reset(4);
        cursor.navigate(Direction::Forward, 4);
        assert_eq!(cursor.active(), Some(0));
        let mut cursor = Cursor::reset(4);
        cursor.navigate(Direction::Backward, 4);
        assert_eq!(cursor.active(), Some(3));
    }

    #[test]
    fn test_wraparound() {
        let mut cursor = Cursor::reset(3);
        cursor.select(2, 3);
        cursor.navigate(Direction::Forward, 3);
        assert_eq!(cursor.active(), Some(0));
        cursor.navigate(Direction::Backward, 3);
        assert_eq!(cursor.active(), Some(2));
    }

    #[test]
    fn test_forward_then_backward_is_identity() {
        for len in 1..6 {
            for start in 0..len {
                let mut cursor = Cursor::reset(len);
                cursor.select(start, len);
                cursor.navigate(Direction::Forward, len);
                cursor.navigate(Direction::Backward, len);
                assert_eq!(cursor.active(), Some(start));
            }
        }
    }

    #[test]
    fn test_select_out_of_range() {
        let mut cursor = Cursor::reset(2);
        assert!(!cursor.select(2, 2));
        assert_eq!(cursor.active(), None);
    }
}
