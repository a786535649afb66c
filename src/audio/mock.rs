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
        atomic::{AtomicBool, AtomicUsize, Ordering},
        Arc, Mutex,
    },
};

use tracing::{info, span, Level};

/// A mock player. Doesn't actually play anything.
#[derive(Clone)]
pub struct Player {
    name: String,
    sources: Arc<Mutex<Vec<String>>>,
    loads: Arc<AtomicUsize>,
    looping: Arc<AtomicBool>,
}

impl Player {
    /// Gets the given mock player.
    pub fn get(name: &str) -> Player {
        Player {
            name: name.to_string(),
            sources: Arc::new(Mutex::new(Vec::new())),
            loads: Arc::new(AtomicUsize::new(0)),
            looping: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Every source the player has been pointed at, in order.
    pub fn sources(&self) -> Vec<String> {
        self.sources.lock().expect("unable to get lock").clone()
    }

    /// The number of times a source was loaded.
    pub fn loads(&self) -> usize {
        self.loads.load(Ordering::Relaxed)
    }

    pub fn is_looping(&self) -> bool {
        self.looping.load(Ordering::Relaxed)
    }
}

impl super::Player for Player {
    fn set_source(&self, source: &str) {
        let span = span!(Level::INFO, "set source (mock)");
        let _enter = span.enter();

        info!(player = %self.name, source, "Setting source.");
        self.sources
            .lock()
            .expect("unable to get lock")
            .push(source.to_string());
    }

    fn load(&self) {
        self.loads.fetch_add(1, Ordering::Relaxed);
    }

    fn set_loop(&self, enabled: bool) {
        self.looping.store(enabled, Ordering::Relaxed);
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (Mock)", self.name)
    }
}
