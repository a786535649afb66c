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
use std::sync::{Arc, Mutex};

use tracing::debug;

/// A mock page that remembers what was displayed.
#[derive(Clone)]
pub struct Page {
    name: String,
    text: Arc<Mutex<String>>,
    control_label: Arc<Mutex<String>>,
    control_labels: Arc<Mutex<Vec<String>>>,
    enabled: Arc<Mutex<bool>>,
    navigations: Arc<Mutex<Vec<String>>>,
}

impl Page {
    /// Gets the given mock page. The control starts labeled "Next" and enabled.
    pub fn get(name: &str) -> Page {
        Page {
            name: name.to_string(),
            text: Arc::new(Mutex::new(String::new())),
            control_label: Arc::new(Mutex::new("Next".to_string())),
            control_labels: Arc::new(Mutex::new(Vec::new())),
            enabled: Arc::new(Mutex::new(true)),
            navigations: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// The current label text.
    pub fn text(&self) -> String {
        self.text.lock().expect("unable to get lock").clone()
    }

    /// The current advance control label.
    pub fn control_label(&self) -> String {
        self.control_label.lock().expect("unable to get lock").clone()
    }

    /// Every label the advance control has been given, in order.
    pub fn control_labels(&self) -> Vec<String> {
        self.control_labels.lock().expect("unable to get lock").clone()
    }

    pub fn is_enabled(&self) -> bool {
        *self.enabled.lock().expect("unable to get lock")
    }

    /// Every destination navigated to, in order.
    pub fn navigations(&self) -> Vec<String> {
        self.navigations.lock().expect("unable to get lock").clone()
    }
}

impl super::Label for Page {
    fn set_text(&self, text: &str) {
        *self.text.lock().expect("unable to get lock") = text.to_string();
    }
}

impl super::AdvanceControl for Page {
    fn set_label(&self, label: &str) {
        *self.control_label.lock().expect("unable to get lock") = label.to_string();
        self.control_labels
            .lock()
            .expect("unable to get lock")
            .push(label.to_string());
    }

    fn set_enabled(&self, enabled: bool) {
        *self.enabled.lock().expect("unable to get lock") = enabled;
    }
}

impl super::Navigator for Page {
    fn navigate(&self, destination: &str) {
        debug!(page = %self.name, destination, "Navigating (mock).");
        self.navigations
            .lock()
            .expect("unable to get lock")
            .push(destination.to_string());
    }
}
