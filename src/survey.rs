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
use std::{fmt, sync::Arc};

use tracing::info;

use crate::{
    annotator::{Annotator, PointerEvent},
    audio,
    gesture::{Effect, Gesture},
    page::Page,
    progression::{Progression, ProgressionError, State},
};

/// The survey widget: the markers for the current sample and the progression through the
/// samples.
pub struct Survey {
    annotator: Annotator,
    progression: Progression,
    player: Arc<dyn audio::Player>,
}

impl fmt::Display for Survey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.progression)?;
        if !self.progression.is_finished() {
            write!(f, "{}", self.annotator.markers())?;
        }

        Ok(())
    }
}

impl Survey {
    /// Loads the survey: the first sample becomes current and its markers are seeded.
    pub fn new(
        mut annotator: Annotator,
        samples: Vec<String>,
        destination: &str,
        player: Arc<dyn audio::Player>,
        page: Page,
        looping: bool,
    ) -> Result<Survey, ProgressionError> {
        player.set_loop(looping);
        let progression =
            Progression::new(samples, destination, player.clone(), page, &mut annotator)?;
        info!(
            samples = progression.sample_count(),
            timeline = %annotator.timeline(),
            "Survey loaded."
        );

        Ok(Survey {
            annotator,
            progression,
            player,
        })
    }

    pub fn annotator(&self) -> &Annotator {
        &self.annotator
    }

    pub fn progression(&self) -> &Progression {
        &self.progression
    }

    pub fn is_finished(&self) -> bool {
        self.progression.is_finished()
    }

    /// Applies a gesture to the current sample's markers. Ignored once finished.
    pub fn gesture(&mut self, gesture: Gesture) -> Effect {
        if self.is_finished() {
            return Effect::Unchanged;
        }
        self.annotator.gesture(gesture)
    }

    /// Feeds raw pointer input to the current sample's markers. Ignored once finished.
    pub fn pointer(&mut self, event: PointerEvent) {
        if self.is_finished() {
            return;
        }
        self.annotator.pointer(event)
    }

    /// Advances to the next sample or submits.
    pub fn advance(&mut self) -> State {
        self.progression.advance(&mut self.annotator)
    }

    /// Passes the loop checkbox straight through to the player.
    pub fn set_loop(&self, enabled: bool) {
        self.player.set_loop(enabled);
    }
}
