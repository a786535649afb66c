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
use std::{error::Error, fmt, sync::Arc};

use crate::markers::MarkerSet;

pub mod mock;
pub mod text;

/// The pointer affordance shown over the surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Cursor {
    #[default]
    Default,
    Pointer,
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cursor::Default => write!(f, "default"),
            Cursor::Pointer => write!(f, "pointer"),
        }
    }
}

/// The fixed size of the rendering surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
}

impl Dimensions {
    pub fn new(width: f64, height: f64) -> Dimensions {
        Dimensions { width, height }
    }

    /// The vertical coordinate of the timeline. Markers never leave it.
    pub fn baseline(&self) -> f64 {
        self.height / 2.0
    }

    /// The radius of a marker's interactive disc.
    pub fn marker_radius(&self) -> f64 {
        self.width / 80.0
    }
}

/// A drawing surface for the timeline and its markers. The surface is created once with fixed
/// dimensions; the annotator redraws it after every change.
pub trait Surface: fmt::Display + Send + Sync {
    /// Draws the timeline and every marker currently in the set.
    fn redraw(&self, markers: &MarkerSet);

    /// Changes the pointer affordance.
    fn set_cursor(&self, cursor: Cursor);
}

/// Gets a surface of the given kind.
pub fn get_surface(kind: &str, dimensions: Dimensions) -> Result<Arc<dyn Surface>, Box<dyn Error>> {
    if kind.starts_with("mock") {
        return Ok(Arc::new(mock::Surface::get(kind)));
    }

    match kind {
        "text" => Ok(Arc::new(text::Surface::stdout(dimensions))),
        _ => Err(format!("unsupported surface kind {}", kind).into()),
    }
}
