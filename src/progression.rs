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

use tracing::{info, span, warn, Level, Span};

use crate::{audio, page::Page};

/// The advance control label while more samples follow.
pub const NEXT_LABEL: &str = "Next";
/// The advance control label on the last sample.
pub const SUBMIT_LABEL: &str = "Submit";

/// Anything that holds per-sample state that must be discarded between samples.
pub trait Reset {
    fn reset(&mut self);
}

/// Errors building a progression.
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum ProgressionError {
    #[error("a survey needs at least one sample")]
    NoSamples,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum State {
    /// The sample at the index is loaded and being annotated.
    Playing(usize),
    /// The survey has been submitted.
    Finished,
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            State::Playing(index) => write!(f, "playing sample {}", index + 1),
            State::Finished => write!(f, "finished"),
        }
    }
}

/// The display label for the sample at the given index.
pub fn sample_label(index: usize) -> String {
    format!("Sample {}", index + 1)
}

/// Walks through a fixed list of samples, one explicit advance at a time, and finishes by
/// navigating to the completion destination.
pub struct Progression {
    /// The audio sources, in presentation order.
    samples: Vec<String>,
    /// Where the listener goes once the survey is submitted.
    destination: String,
    /// The current state.
    state: State,
    /// The audio player.
    player: Arc<dyn audio::Player>,
    /// The page elements to keep up to date.
    page: Page,
    /// The logging span.
    span: Span,
}

impl fmt::Display for Progression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Samples ({}, {}):", self.samples.len(), self.state)?;
        for (index, sample) in self.samples.iter().enumerate() {
            let current = if self.state == State::Playing(index) {
                "*"
            } else {
                "-"
            };
            writeln!(f, "  {} {}: {}", current, sample_label(index), sample)?;
        }

        Ok(())
    }
}

impl Progression {
    /// Creates a progression and enters the first sample: its source is loaded, the page is
    /// labeled and the markers are reset.
    pub fn new<R: Reset + ?Sized>(
        samples: Vec<String>,
        destination: &str,
        player: Arc<dyn audio::Player>,
        page: Page,
        markers: &mut R,
    ) -> Result<Progression, ProgressionError> {
        if samples.is_empty() {
            return Err(ProgressionError::NoSamples);
        }

        let mut progression = Progression {
            samples,
            destination: destination.to_string(),
            state: State::Playing(0),
            player,
            page,
            span: span!(Level::INFO, "progression"),
        };
        progression.page.control.set_label(progression.control_label(0));
        progression.page.control.set_enabled(true);
        progression.enter(0, markers);

        Ok(progression)
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    /// The current sample, or None once finished.
    pub fn current_sample(&self) -> Option<&str> {
        match self.state {
            State::Playing(index) => Some(&self.samples[index]),
            State::Finished => None,
        }
    }

    /// Returns true if the current sample is the last one.
    pub fn is_final(&self) -> bool {
        self.state == State::Playing(self.samples.len() - 1)
    }

    pub fn is_finished(&self) -> bool {
        self.state == State::Finished
    }

    /// The advance control label while the given sample is current. The control reads
    /// "Submit" exactly when the next advance will finish the survey, so a single-sample survey
    /// shows "Submit" from the start rather than keeping the initial "Next".
    fn control_label(&self, index: usize) -> &'static str {
        if index == self.samples.len() - 1 {
            SUBMIT_LABEL
        } else {
            NEXT_LABEL
        }
    }

    /// Moves to the next sample, or finishes if the current sample is the last. Does nothing
    /// once finished. Returns the new state.
    pub fn advance<R: Reset + ?Sized>(&mut self, markers: &mut R) -> State {
        let span = self.span.clone();
        let _enter = span.enter();

        let index = match self.state {
            State::Playing(index) => index,
            State::Finished => {
                warn!("Advance requested after the survey finished, ignoring.");
                return self.state;
            }
        };

        if index == self.samples.len() - 1 {
            self.finish();
            return self.state;
        }

        let next = index + 1;
        if self.control_label(next) != self.control_label(index) {
            self.page.control.set_label(self.control_label(next));
        }
        self.enter(next, markers);
        self.state
    }

    /// Makes the given sample current.
    fn enter<R: Reset + ?Sized>(&mut self, index: usize, markers: &mut R) {
        let sample = &self.samples[index];
        self.player.set_source(sample);
        self.player.load();
        self.page.label.set_text(&sample_label(index));
        markers.reset();
        self.state = State::Playing(index);

        info!(
            position = index,
            sample = sample.as_str(),
            remaining = self.samples.len() - index - 1,
            "Moved to sample."
        );
    }

    fn finish(&mut self) {
        self.page.control.set_enabled(false);
        self.state = State::Finished;
        info!(destination = %self.destination, "Survey finished.");
        self.page.navigator.navigate(&self.destination);
    }
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use crate::{audio, page};

    use super::{Progression, ProgressionError, Reset, State, NEXT_LABEL, SUBMIT_LABEL};

    /// Counts resets and records which sample's markers were discarded.
    #[derive(Default)]
    struct Markers {
        resets: usize,
        created: Vec<usize>,
    }

    impl Reset for Markers {
        fn reset(&mut self) {
            self.resets += 1;
            self.created.clear();
        }
    }

    fn samples(count: usize) -> Vec<String> {
        (1..=count).map(|i| format!("samples/{}.wav", i)).collect()
    }

    fn progression(
        count: usize,
        markers: &mut Markers,
    ) -> (Progression, audio::mock::Player, page::mock::Page) {
        let player = audio::mock::Player::get("mock-player");
        let page = page::mock::Page::get("mock-page");
        let progression = Progression::new(
            samples(count),
            "thankyou.html",
            Arc::new(player.clone()),
            page::Page::shared(Arc::new(page.clone())),
            markers,
        )
        .expect("progression should be created");
        (progression, player, page)
    }

    #[test]
    fn test_no_samples() {
        let mut markers = Markers::default();
        let result = Progression::new(
            vec![],
            "thankyou.html",
            Arc::new(audio::mock::Player::get("mock-player")),
            page::Page::shared(Arc::new(page::mock::Page::get("mock-page"))),
            &mut markers,
        );
        assert_eq!(Some(ProgressionError::NoSamples), result.err());
        assert_eq!(0, markers.resets);
    }

    #[test]
    fn test_initial_state() {
        let mut markers = Markers::default();
        let (progression, player, page) = progression(3, &mut markers);

        assert_eq!(State::Playing(0), progression.state());
        assert_eq!(Some("samples/1.wav"), progression.current_sample());
        assert_eq!(vec!["samples/1.wav".to_string()], player.sources());
        assert_eq!(1, player.loads());
        assert_eq!("Sample 1", page.text());
        assert_eq!(NEXT_LABEL, page.control_label());
        assert!(page.is_enabled());
        assert_eq!(1, markers.resets);
        assert!(!progression.is_final());
    }

    #[test]
    fn test_three_samples() {
        let mut markers = Markers::default();
        let (mut progression, player, page) = progression(3, &mut markers);

        markers.created.push(0);
        assert_eq!(State::Playing(1), progression.advance(&mut markers));
        assert_eq!("Sample 2", page.text());
        assert_eq!(NEXT_LABEL, page.control_label());
        assert_eq!(2, markers.resets);
        assert!(markers.created.is_empty());
        assert!(page.is_enabled());

        markers.created.push(1);
        assert_eq!(State::Playing(2), progression.advance(&mut markers));
        assert_eq!("Sample 3", page.text());
        assert_eq!(SUBMIT_LABEL, page.control_label());
        assert_eq!(3, markers.resets);
        assert!(markers.created.is_empty());
        assert!(progression.is_final());
        assert!(page.navigations().is_empty());

        assert_eq!(State::Finished, progression.advance(&mut markers));
        assert!(!page.is_enabled());
        assert_eq!(vec!["thankyou.html".to_string()], page.navigations());
        // Finishing doesn't touch the markers, the audio or the label.
        assert_eq!(3, markers.resets);
        assert_eq!("Sample 3", page.text());
        assert_eq!(
            vec![
                "samples/1.wav".to_string(),
                "samples/2.wav".to_string(),
                "samples/3.wav".to_string()
            ],
            player.sources()
        );
        assert_eq!(3, player.loads());
        assert_eq!(None, progression.current_sample());

        // Further advances do nothing.
        assert_eq!(State::Finished, progression.advance(&mut markers));
        assert_eq!(State::Finished, progression.advance(&mut markers));
        assert_eq!(1, page.navigations().len());
        assert_eq!(3, markers.resets);
        assert_eq!(3, player.loads());
        assert_eq!(
            vec![NEXT_LABEL.to_string(), SUBMIT_LABEL.to_string()],
            page.control_labels()
        );
    }

    #[test]
    fn test_single_sample() {
        let mut markers = Markers::default();
        let (mut progression, player, page) = progression(1, &mut markers);

        assert!(progression.is_final());
        assert_eq!(SUBMIT_LABEL, page.control_label());

        assert_eq!(State::Finished, progression.advance(&mut markers));
        assert_eq!(vec![SUBMIT_LABEL.to_string()], page.control_labels());
        assert!(!page.is_enabled());
        assert_eq!(vec!["thankyou.html".to_string()], page.navigations());
        assert_eq!(1, markers.resets);
        assert_eq!(1, player.loads());
    }

    #[test]
    fn test_two_samples() {
        let mut markers = Markers::default();
        let (mut progression, _, page) = progression(2, &mut markers);

        assert_eq!(NEXT_LABEL, page.control_label());
        assert_eq!(State::Playing(1), progression.advance(&mut markers));
        assert_eq!(SUBMIT_LABEL, page.control_label());
        assert_eq!("Sample 2", page.text());
        assert_eq!(State::Finished, progression.advance(&mut markers));
        assert_eq!(1, page.navigations().len());
    }

    #[test]
    fn test_display() {
        let mut markers = Markers::default();
        let (progression, _, _) = progression(2, &mut markers);
        assert_eq!(
            "Samples (2, playing sample 1):\n  * Sample 1: samples/1.wav\n  - Sample 2: samples/2.wav\n",
            progression.to_string()
        );
    }
}
