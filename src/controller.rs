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
use std::error::Error;
use std::io;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinError;
use tokio::{sync::mpsc::Sender, task::JoinHandle};
use tracing::{debug, error, info, span, Instrument, Level};

use crate::annotator::PointerEvent;
use crate::progression::State;
use crate::survey::Survey;

pub mod keyboard;

/// Controller events that will trigger behavior in the survey.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Event {
    /// Raw pointer input on the timeline.
    Pointer(PointerEvent),

    /// Advances to the next sample, or submits on the last one.
    Advance,

    /// Turns looping of the current sample on or off.
    Loop(bool),

    /// Prints the current state of the survey.
    Show,
}

pub trait Driver: Send + Sync + 'static {
    fn monitor_events(&self, events_tx: Sender<Event>) -> JoinHandle<Result<(), io::Error>>;
}

/// Drives a survey from a stream of input events.
pub struct Controller {
    handle: JoinHandle<()>,
}

impl Controller {
    /// Creates a new controller with the given driver.
    pub fn new(survey: Survey, driver: Arc<dyn Driver>) -> Result<Controller, Box<dyn Error>> {
        let span = span!(Level::INFO, "controller");
        Ok(Controller {
            handle: tokio::spawn(Controller::trigger_events(survey, driver).instrument(span)),
        })
    }

    /// Join will block until the survey finishes or the driver stops sending events.
    pub async fn join(&mut self) -> Result<(), JoinError> {
        (&mut self.handle).await
    }

    /// Handles events from the driver one at a time, each to completion before the next.
    async fn trigger_events(mut survey: Survey, driver: Arc<dyn Driver>) {
        let (events_tx, mut events_rx) = mpsc::channel(1);
        let join_handle = driver.monitor_events(events_tx);

        info!(
            first_sample = survey.progression().current_sample(),
            "Controller started."
        );

        loop {
            if let Some(event) = events_rx.recv().await {
                debug!(event = ?event, "Received event.");

                match event {
                    Event::Pointer(pointer) => survey.pointer(pointer),
                    Event::Advance => {
                        if survey.advance() == State::Finished {
                            info!("Survey complete.");
                            return;
                        }
                    }
                    Event::Loop(enabled) => survey.set_loop(enabled),
                    Event::Show => println!("{}", survey),
                }
            } else {
                info!("Controller closing.");
                match join_handle.await {
                    Ok(Err(e)) => error!("Error from event monitor: {}", e),
                    Err(e) => error!("Error waiting for event monitor to stop: {}", e),
                    Ok(Ok(())) => {}
                }
                return;
            }
        }
    }
}

#[cfg(test)]
mod test {
    use std::{
        error::Error,
        io,
        sync::{Arc, Mutex},
    };

    use tokio::{sync::mpsc::Sender, task::JoinHandle};

    use crate::{
        annotator::{Annotator, PointerEvent},
        audio,
        canvas::{mock, Dimensions},
        gesture::{Bindings, Modifier, Modifiers},
        page,
        survey::Survey,
        timeline::{Point, Timeline},
    };

    use super::{Driver, Event};

    /// A driver that plays back a fixed list of events and then stops.
    struct ScriptDriver {
        events: Mutex<Vec<Event>>,
    }

    impl ScriptDriver {
        fn new(events: Vec<Event>) -> ScriptDriver {
            ScriptDriver {
                events: Mutex::new(events),
            }
        }
    }

    impl Driver for ScriptDriver {
        fn monitor_events(&self, events_tx: Sender<Event>) -> JoinHandle<Result<(), io::Error>> {
            let events = std::mem::take(&mut *self.events.lock().expect("failed to get lock"));
            tokio::task::spawn_blocking(move || {
                for event in events {
                    // The controller stops listening once the survey is submitted.
                    if events_tx.blocking_send(event).is_err() {
                        break;
                    }
                }
                Ok(())
            })
        }
    }

    struct Fixture {
        survey: Survey,
        surface: mock::Surface,
        player: audio::mock::Player,
        page: page::mock::Page,
    }

    fn fixture(count: usize) -> Fixture {
        let surface = mock::Surface::get("mock-surface");
        let player = audio::mock::Player::get("mock-player");
        let page = page::mock::Page::get("mock-page");
        let dimensions = Dimensions::new(800.0, 100.0);
        let annotator = Annotator::new(
            Timeline::from_surface(dimensions.width, 107.0, 188.0)
                .expect("timeline should be valid"),
            dimensions,
            Arc::new(surface.clone()),
            Bindings::default(),
        );
        let survey = Survey::new(
            annotator,
            (1..=count).map(|i| format!("sample{}.wav", i)).collect(),
            "thankyou.html",
            Arc::new(player.clone()),
            page::Page::shared(Arc::new(page.clone())),
            false,
        )
        .expect("survey should load");

        Fixture {
            survey,
            surface,
            player,
            page,
        }
    }

    fn ctrl_click(x: f64) -> Vec<Event> {
        let point = Point::new(x, 50.0);
        let ctrl = Modifiers::only(Modifier::Ctrl);
        vec![
            Event::Pointer(PointerEvent::Press(point, ctrl)),
            Event::Pointer(PointerEvent::Release(point, ctrl)),
        ]
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_controller_runs_to_completion() -> Result<(), Box<dyn Error>> {
        let Fixture {
            survey,
            surface,
            player,
            page,
        } = fixture(3);

        let mut events = ctrl_click(200.0);
        events.extend(ctrl_click(450.0));
        events.push(Event::Loop(true));
        events.push(Event::Show);
        events.push(Event::Advance);
        events.extend(ctrl_click(300.0));
        events.push(Event::Advance);
        events.push(Event::Advance);
        // Never delivered: the survey is already submitted.
        events.push(Event::Advance);

        let mut controller = super::Controller::new(survey, Arc::new(ScriptDriver::new(events)))?;
        assert!(controller.join().await.is_ok(), "Error waiting for controller");

        assert!(player.is_looping());
        assert_eq!(
            vec![
                "sample1.wav".to_string(),
                "sample2.wav".to_string(),
                "sample3.wav".to_string()
            ],
            player.sources()
        );
        assert_eq!("Sample 3", page.text());
        assert_eq!("Submit", page.control_label());
        assert!(!page.is_enabled());
        assert_eq!(vec!["thankyou.html".to_string()], page.navigations());
        // The last sample's markers were reset and left alone.
        assert_eq!(vec![359.5], surface.positions());
        Ok(())
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_controller_stops_when_driver_stops() -> Result<(), Box<dyn Error>> {
        let Fixture {
            survey,
            surface,
            page,
            ..
        } = fixture(2);

        let mut controller =
            super::Controller::new(survey, Arc::new(ScriptDriver::new(ctrl_click(200.0))))?;
        assert!(controller.join().await.is_ok(), "Error waiting for controller");

        assert_eq!(2, surface.positions().len());
        assert_eq!("Sample 1", page.text());
        assert!(page.navigations().is_empty());
        Ok(())
    }
}
