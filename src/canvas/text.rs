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
    io::{self, Write},
    sync::Mutex,
};

use tracing::{debug, error};

use crate::markers::MarkerSet;

use super::{Cursor, Dimensions};

const DEFAULT_COLUMNS: usize = 80;
const BLANK: char = ' ';
const LINE: char = '-';
const MARKER: char = 'o';

/// Draws the timeline as a single row of characters, one column per slice of the surface width.
pub struct Surface {
    dimensions: Dimensions,
    columns: usize,
    writer: Mutex<Box<dyn Write + Send>>,
}

impl Surface {
    /// Creates a text surface that draws to stdout.
    pub fn stdout(dimensions: Dimensions) -> Surface {
        Surface::new(dimensions, DEFAULT_COLUMNS, Box::new(io::stdout()))
    }

    pub fn new(dimensions: Dimensions, columns: usize, writer: Box<dyn Write + Send>) -> Surface {
        Surface {
            dimensions,
            columns: columns.max(1),
            writer: Mutex::new(writer),
        }
    }

    fn column(&self, x: f64) -> usize {
        let column = (x / self.dimensions.width * self.columns as f64).floor();
        (column.max(0.0) as usize).min(self.columns - 1)
    }

    /// Renders the markers to a single line.
    pub fn render(&self, markers: &MarkerSet) -> String {
        let timeline = markers.timeline();
        let mut row = vec![BLANK; self.columns];
        let (start, end) = (self.column(timeline.lower()), self.column(timeline.upper()));
        for cell in row.iter_mut().take(end + 1).skip(start) {
            *cell = LINE;
        }
        for marker in markers.iter() {
            row[self.column(marker.position())] = MARKER;
        }

        row.into_iter().collect()
    }

    fn write_line(&self, line: &str) {
        let mut writer = match self.writer.lock() {
            Ok(writer) => writer,
            Err(e) => {
                error!(err = %e, "Unable to lock surface writer");
                return;
            }
        };
        if let Err(e) = writeln!(writer, "{}", line).and_then(|_| writer.flush()) {
            error!(err = %e, "Unable to draw surface");
        }
    }
}

impl super::Surface for Surface {
    fn redraw(&self, markers: &MarkerSet) {
        debug!(markers = markers.len(), "Redrawing timeline.");
        let line = format!("|{}|", self.render(markers));
        self.write_line(&line);
    }

    fn set_cursor(&self, cursor: Cursor) {
        self.write_line(&format!("(cursor: {})", cursor));
    }
}

impl fmt::Display for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "text surface ({}x{}, {} columns)",
            self.dimensions.width, self.dimensions.height, self.columns
        )
    }
}
