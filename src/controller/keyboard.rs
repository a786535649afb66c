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
use std::{error::Error, io};

use tokio::{sync::mpsc::Sender, task::JoinHandle};
use tracing::{info, span, warn, Level};

use crate::{annotator::PointerEvent, gesture::Modifiers, timeline::Point};

use super::Event;

const MOVE: &str = "move";
const PRESS: &str = "press";
const RELEASE: &str = "release";
const CLICK: &str = "click";
const DRAG: &str = "drag";
const NEXT: &str = "next";
const LOOP: &str = "loop";
const SHOW: &str = "show";

/// A controller that drives a survey from typed commands.
pub struct Driver {}

impl Driver {
    pub fn new() -> Driver {
        Driver {}
    }

    /// Parses a single command into the events it stands for.
    fn parse(input: &str) -> Result<Vec<Event>, Box<dyn Error>> {
        let mut words = input.split_whitespace();
        let Some(command) = words.next() else {
            return Ok(vec![]);
        };
        let args: Vec<&str> = words.collect();

        let events = match command.to_lowercase().as_str() {
            MOVE => vec![Event::Pointer(PointerEvent::Move(point(&args, 0)?))],
            PRESS => vec![Event::Pointer(PointerEvent::Press(
                point(&args, 0)?,
                modifiers(&args, 2)?,
            ))],
            RELEASE => vec![Event::Pointer(PointerEvent::Release(
                point(&args, 0)?,
                modifiers(&args, 2)?,
            ))],
            CLICK => {
                let (at, modifiers) = (point(&args, 0)?, modifiers(&args, 2)?);
                vec![
                    Event::Pointer(PointerEvent::Press(at, modifiers)),
                    Event::Pointer(PointerEvent::Release(at, modifiers)),
                ]
            }
            DRAG => {
                let (from, to, modifiers) =
                    (point(&args, 0)?, point(&args, 2)?, modifiers(&args, 4)?);
                vec![
                    Event::Pointer(PointerEvent::Press(from, modifiers)),
                    Event::Pointer(PointerEvent::Move(to)),
                    Event::Pointer(PointerEvent::Release(to, modifiers)),
                ]
            }
            NEXT => vec![Event::Advance],
            LOOP => match args.first().map(|arg| arg.to_lowercase()).as_deref() {
                Some("on") => vec![Event::Loop(true)],
                Some("off") => vec![Event::Loop(false)],
                _ => return Err("loop expects on or off".into()),
            },
            SHOW => vec![Event::Show],
            _ => return Err(format!("unrecognized command {}", command).into()),
        };

        Ok(events)
    }

    /// Reads one command and sends its events. Returns false once the input is exhausted.
    fn monitor_io<R, W>(
        events_tx: &Sender<Event>,
        mut reader: R,
        mut writer: W,
    ) -> Result<bool, io::Error>
    where
        R: io::BufRead,
        W: io::Write,
    {
        write!(
            writer,
            "Command ({} X Y, {} X Y [mods], {} X1 Y1 X2 Y2 [mods], {}, {} on|off, {}): ",
            MOVE, CLICK, DRAG, NEXT, LOOP, SHOW,
        )?;
        writer.flush()?;
        let mut input: String = String::default();
        if reader.read_line(&mut input)? == 0 {
            return Ok(false);
        }

        match Driver::parse(&input) {
            Ok(events) => {
                for event in events {
                    events_tx
                        .blocking_send(event)
                        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
                }
            }
            Err(e) => warn!(input = input.trim(), err = %e, "Unrecognized input"),
        }

        Ok(true)
    }
}

impl Default for Driver {
    fn default() -> Self {
        Driver::new()
    }
}

fn point(args: &[&str], start: usize) -> Result<Point, Box<dyn Error>> {
    match (args.get(start), args.get(start + 1)) {
        (Some(x), Some(y)) => Ok(Point::new(x.parse()?, y.parse()?)),
        _ => Err("expected X and Y coordinates".into()),
    }
}

fn modifiers(args: &[&str], index: usize) -> Result<Modifiers, Box<dyn Error>> {
    match args.get(index) {
        Some(modifiers) => modifiers.parse(),
        None => Ok(Modifiers::NONE),
    }
}

impl super::Driver for Driver {
    fn monitor_events(&self, events_tx: Sender<Event>) -> JoinHandle<Result<(), io::Error>> {
        tokio::task::spawn_blocking(move || {
            let span = span!(Level::INFO, "keyboard driver");
            let _enter = span.enter();

            info!("Keyboard driver started.");

            while Self::monitor_io(&events_tx, io::stdin().lock(), io::stdout())? {}

            info!("Keyboard input closed.");
            Ok(())
        })
    }
}

#[cfg(test)]
mod test {
    use std::io::{self, BufReader, BufWriter};

    use tokio::sync::mpsc;

    use crate::{
        annotator::PointerEvent,
        controller::Event,
        gesture::{Modifier, Modifiers},
        timeline::Point,
    };

    use super::Driver;

    fn get_events(input: &str) -> Result<Vec<Event>, io::Error> {
        let (sender, mut receiver) = mpsc::channel::<Event>(8);

        let reader = BufReader::new(input.as_bytes());
        let writer = BufWriter::new(Vec::new());
        assert!(Driver::monitor_io(&sender, reader, writer)?);

        // Force the sender to close.
        drop(sender);
        let mut events = Vec::new();
        while let Some(event) = receiver.blocking_recv() {
            events.push(event);
        }
        Ok(events)
    }

    #[test]
    fn test_keyboard_events() -> Result<(), io::Error> {
        let at = Point::new(200.0, 50.0);
        let shift = Modifiers::only(Modifier::Shift);

        assert_eq!(vec![Event::Advance], get_events("next\n")?);
        assert_eq!(vec![Event::Show], get_events("SHOW\n")?);
        assert_eq!(vec![Event::Loop(true)], get_events("loop on\n")?);
        assert_eq!(vec![Event::Loop(false)], get_events("loop OFF\n")?);
        assert_eq!(
            vec![Event::Pointer(PointerEvent::Move(Point::new(12.5, 3.0)))],
            get_events("move 12.5 3\n")?
        );
        assert_eq!(
            vec![Event::Pointer(PointerEvent::Press(at, Modifiers::NONE))],
            get_events("press 200 50\n")?
        );
        assert_eq!(
            vec![Event::Pointer(PointerEvent::Release(at, shift))],
            get_events("release 200 50 shift\n")?
        );
        assert_eq!(
            vec![
                Event::Pointer(PointerEvent::Press(at, shift)),
                Event::Pointer(PointerEvent::Release(at, shift)),
            ],
            get_events("click 200 50 shift\n")?
        );
        assert_eq!(
            vec![
                Event::Pointer(PointerEvent::Press(at, Modifiers::NONE)),
                Event::Pointer(PointerEvent::Move(Point::new(400.0, 80.0))),
                Event::Pointer(PointerEvent::Release(Point::new(400.0, 80.0), Modifiers::NONE)),
            ],
            get_events("drag 200 50 400 80\n")?
        );
        Ok(())
    }

    #[test]
    fn test_unrecognized_input() -> Result<(), io::Error> {
        assert!(get_events("unrecognized\n")?.is_empty());
        assert!(get_events("click 200\n")?.is_empty());
        assert!(get_events("click a b\n")?.is_empty());
        assert!(get_events("click 200 50 meta\n")?.is_empty());
        assert!(get_events("loop maybe\n")?.is_empty());
        assert!(get_events("\n")?.is_empty());
        Ok(())
    }

    #[test]
    fn test_end_of_input() -> Result<(), io::Error> {
        let (sender, _receiver) = mpsc::channel::<Event>(1);
        let reader = BufReader::new(io::empty());
        let writer = BufWriter::new(Vec::new());
        assert!(!Driver::monitor_io(&sender, reader, writer)?);
        Ok(())
    }
}
