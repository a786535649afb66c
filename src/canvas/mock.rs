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
use std::{
    fmt,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
};

use tracing::debug;

use crate::markers::MarkerSet;

use super::Cursor;

/// A mock surface. Doesn't draw anything, but remembers what it was asked to draw.
#[derive(Clone)]
pub struct Surface {
    name: String,
    redraws: Arc<AtomicUsize>,
    positions: Arc<Mutex<Vec<f64>>>,
    cursor: Arc<Mutex<Cursor>>,
}

impl Surface {
    /// Gets the given mock surface.
    pub fn get(name: &str) -> Surface {
        Surface {
            name: name.to_string(),
            redraws: Arc::new(AtomicUsize::new(0)),
            positions: Arc::new(Mutex::new(Vec::new())),
            cursor: Arc::new(Mutex::new(Cursor::Default)),
        }
    }

    /// The number of times the surface has been redrawn.
    pub fn redraws(&self) -> usize {
        self.redraws.load(Ordering::Relaxed)
    }

    /// The marker positions from the last redraw.
    pub fn positions(&self) -> Vec<f64> {
        self.positions.lock().expect("unable to get lock").clone()
    }

    pub fn cursor(&self) -> Cursor {
        *self.cursor.lock().expect("unable to get lock")
    }
}

impl super::Surface for Surface {
    fn redraw(&self, markers: &MarkerSet) {
        debug!(surface = %self.name, markers = markers.len(), "Redrawing (mock).");
        let mut positions = self.positions.lock().expect("unable to get lock");
        *positions = markers.iter().map(|marker| marker.position()).collect();
        self.redraws.fetch_add(1, Ordering::Relaxed);
    }

    fn set_cursor(&self, cursor: Cursor) {
        *self.cursor.lock().expect("unable to get lock") = cursor;
    }
}

impl fmt::Display for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (Mock)", self.name)
    }
}
