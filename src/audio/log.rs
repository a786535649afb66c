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
        atomic::{AtomicBool, Ordering},
        Mutex,
    },
};

use tracing::{info, span, Level, Span};

/// A player that only reports what it's asked to do.
pub struct Player {
    source: Mutex<Option<String>>,
    looping: AtomicBool,
    span: Span,
}

impl Player {
    pub fn new() -> Player {
        Player {
            source: Mutex::new(None),
            looping: AtomicBool::new(false),
            span: span!(Level::INFO, "player"),
        }
    }
}

impl Default for Player {
    fn default() -> Self {
        Player::new()
    }
}

impl super::Player for Player {
    fn set_source(&self, source: &str) {
        let _enter = self.span.enter();
        if let Ok(mut current) = self.source.lock() {
            *current = Some(source.to_string());
        }
        info!(source, "Set audio source.");
    }

    fn load(&self) {
        let _enter = self.span.enter();
        let source = self
            .source
            .lock()
            .map(|source| source.clone())
            .unwrap_or_default();
        info!(
            source = source.as_deref().unwrap_or("<none>"),
            looping = self.looping.load(Ordering::Relaxed),
            "Loaded audio source."
        );
    }

    fn set_loop(&self, enabled: bool) {
        let _enter = self.span.enter();
        self.looping.store(enabled, Ordering::Relaxed);
        info!(enabled, "Set looping.");
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "log player")
    }
}
