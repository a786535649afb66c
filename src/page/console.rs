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
use tracing::info;

/// A page that prints its elements to stdout.
pub struct Page {}

impl Page {
    pub fn new() -> Page {
        Page {}
    }
}

impl Default for Page {
    fn default() -> Self {
        Page::new()
    }
}

impl super::Label for Page {
    fn set_text(&self, text: &str) {
        println!("== {} ==", text);
    }
}

impl super::AdvanceControl for Page {
    fn set_label(&self, label: &str) {
        println!("[{}]", label);
    }

    fn set_enabled(&self, enabled: bool) {
        info!(enabled, "Advance control toggled.");
    }
}

impl super::Navigator for Page {
    fn navigate(&self, destination: &str) {
        info!(destination, "Navigating.");
        println!("-> {}", destination);
    }
}
