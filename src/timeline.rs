// Copyright (C) 2026 Michael Wilson <mike@mdwn.dev>
//
// This program is free software: you can redistribute it and/or modify it under
// the terms of the GNU General Public License as published by the Free Software
// Foundation, version 3.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with
// this program. If not, see <https://www.gnu.org/licenses/>.
//
use std::fmt;

/// Errors raised when timeline bounds can't form a usable range.
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum TimelineError {
    #[error("timeline bounds must be finite (lower: {lower}, upper: {upper})")]
    NotFinite { lower: f64, upper: f64 },
    #[error("timeline lower bound {lower} must be less than upper bound {upper}")]
    EmptyRange { lower: f64, upper: f64 },
}

/// A point on the rendering surface.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Point {
        Point { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.1}, {:.1})", self.x, self.y)
    }
}

/// The interactive horizontal range that markers live on. The bounds are fixed once the
/// timeline is built.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Timeline {
    lower: f64,
    upper: f64,
}

impl Timeline {
    /// Creates a new timeline over [lower, upper].
    pub fn new(lower: f64, upper: f64) -> Result<Timeline, TimelineError> {
        if !lower.is_finite() || !upper.is_finite() {
            return Err(TimelineError::NotFinite { lower, upper });
        }
        if lower >= upper {
            return Err(TimelineError::EmptyRange { lower, upper });
        }

        Ok(Timeline { lower, upper })
    }

    /// Derives the timeline from the width of the rendering surface, leaving the given
    /// margins on either side for the rest of the page.
    pub fn from_surface(
        width: f64,
        left_inset: f64,
        right_inset: f64,
    ) -> Result<Timeline, TimelineError> {
        Timeline::new(left_inset, width - right_inset)
    }

    pub fn lower(&self) -> f64 {
        self.lower
    }

    pub fn upper(&self) -> f64 {
        self.upper
    }

    pub fn length(&self) -> f64 {
        self.upper - self.lower
    }

    /// Constrains x to the timeline bounds.
    pub fn clamp(&self, x: f64) -> f64 {
        self.lower.max(self.upper.min(x))
    }

    pub fn midpoint(&self) -> f64 {
        (self.lower + self.upper) / 2.0
    }

    /// Returns true if x lies strictly between the endpoints.
    pub fn contains_open(&self, x: f64) -> bool {
        self.lower < x && x < self.upper
    }

    /// The relative position of x along the timeline, from 0.0 at the lower bound to 1.0 at
    /// the upper bound. Positions outside the timeline are clamped first.
    pub fn fraction(&self, x: f64) -> f64 {
        (self.clamp(x) - self.lower) / self.length()
    }
}

impl fmt::Display for Timeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:.1}, {:.1}]", self.lower, self.upper)
    }
}
