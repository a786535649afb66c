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
//! Gestures on the timeline and the table that maps each kind of gesture onto a change to the
//! marker set. Handlers are plain functions over [MarkerSet] and know nothing about the surface.
use std::{error::Error, fmt, str::FromStr};

use crate::{
    canvas::Cursor,
    markers::{MarkerId, MarkerSet},
    timeline::Point,
};

/// A keyboard modifier that can gate a gesture.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Modifier {
    Shift,
    Ctrl,
    Alt,
}

impl FromStr for Modifier {
    type Err = Box<dyn Error>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "shift" => Ok(Modifier::Shift),
            "ctrl" | "control" => Ok(Modifier::Ctrl),
            "alt" => Ok(Modifier::Alt),
            _ => Err(format!("unrecognized modifier {}", s).into()),
        }
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Modifier::Shift => write!(f, "shift"),
            Modifier::Ctrl => write!(f, "ctrl"),
            Modifier::Alt => write!(f, "alt"),
        }
    }
}

/// The modifiers held while a gesture happened.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
    };

    /// Modifiers with only the given modifier held.
    pub fn only(modifier: Modifier) -> Modifiers {
        let mut modifiers = Modifiers::NONE;
        match modifier {
            Modifier::Shift => modifiers.shift = true,
            Modifier::Ctrl => modifiers.ctrl = true,
            Modifier::Alt => modifiers.alt = true,
        }
        modifiers
    }

    pub fn held(&self, modifier: Modifier) -> bool {
        match modifier {
            Modifier::Shift => self.shift,
            Modifier::Ctrl => self.ctrl,
            Modifier::Alt => self.alt,
        }
    }

    pub fn is_empty(&self) -> bool {
        !(self.shift || self.ctrl || self.alt)
    }
}

/// Parses modifiers joined with '+', e.g. "shift+ctrl".
impl FromStr for Modifiers {
    type Err = Box<dyn Error>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut modifiers = Modifiers::NONE;
        for part in s.split('+').filter(|part| !part.trim().is_empty()) {
            match part.parse::<Modifier>()? {
                Modifier::Shift => modifiers.shift = true,
                Modifier::Ctrl => modifiers.ctrl = true,
                Modifier::Alt => modifiers.alt = true,
            }
        }
        Ok(modifiers)
    }
}

/// Which modifier gates which destructive or creative gesture.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bindings {
    /// Held while clicking a marker to delete it.
    pub delete: Modifier,
    /// Held while clicking the background to insert a marker.
    pub insert: Modifier,
}

impl Default for Bindings {
    fn default() -> Self {
        Bindings {
            delete: Modifier::Shift,
            insert: Modifier::Ctrl,
        }
    }
}

/// What a click landed on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Target {
    Marker(MarkerId),
    Background,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Gesture {
    /// The pointer entered a marker's interactive region.
    HoverEnter(MarkerId),
    /// The pointer left a marker's interactive region.
    HoverLeave(MarkerId),
    /// A click with no modifiers held.
    PrimaryClick { target: Target, point: Point },
    /// A click with at least one modifier held.
    ModifiedClick {
        target: Target,
        point: Point,
        modifiers: Modifiers,
    },
    /// A marker was dragged to the given (unconstrained) point.
    DragMove { id: MarkerId, point: Point },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GestureKind {
    HoverEnter,
    HoverLeave,
    PrimaryClick,
    ModifiedClick,
    DragMove,
}

impl Gesture {
    pub fn kind(&self) -> GestureKind {
        match self {
            Gesture::HoverEnter(_) => GestureKind::HoverEnter,
            Gesture::HoverLeave(_) => GestureKind::HoverLeave,
            Gesture::PrimaryClick { .. } => GestureKind::PrimaryClick,
            Gesture::ModifiedClick { .. } => GestureKind::ModifiedClick,
            Gesture::DragMove { .. } => GestureKind::DragMove,
        }
    }

    /// Builds the click gesture for the given modifiers.
    pub fn click(target: Target, point: Point, modifiers: Modifiers) -> Gesture {
        if modifiers.is_empty() {
            Gesture::PrimaryClick { target, point }
        } else {
            Gesture::ModifiedClick {
                target,
                point,
                modifiers,
            }
        }
    }
}

/// The result of handling a gesture.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Effect {
    Unchanged,
    Added(MarkerId),
    Moved(MarkerId, f64),
    Removed(MarkerId),
    Cursor(Cursor),
}

impl Effect {
    /// Returns true if the marker set was modified.
    pub fn is_change(&self) -> bool {
        matches!(
            self,
            Effect::Added(_) | Effect::Moved(_, _) | Effect::Removed(_)
        )
    }
}

type Handler = fn(&mut MarkerSet, &Gesture, &Bindings) -> Effect;

const HANDLERS: [(GestureKind, Handler); 5] = [
    (GestureKind::HoverEnter, hover_enter),
    (GestureKind::HoverLeave, hover_leave),
    (GestureKind::PrimaryClick, primary_click),
    (GestureKind::ModifiedClick, modified_click),
    (GestureKind::DragMove, drag_move),
];

/// Applies the gesture to the marker set.
pub fn dispatch(markers: &mut MarkerSet, gesture: &Gesture, bindings: &Bindings) -> Effect {
    let kind = gesture.kind();
    HANDLERS
        .iter()
        .find(|(handled, _)| *handled == kind)
        .map_or(Effect::Unchanged, |(_, handler)| {
            handler(markers, gesture, bindings)
        })
}

fn hover_enter(markers: &mut MarkerSet, gesture: &Gesture, _: &Bindings) -> Effect {
    match gesture {
        Gesture::HoverEnter(id) if markers.contains(*id) => Effect::Cursor(Cursor::Pointer),
        _ => Effect::Unchanged,
    }
}

fn hover_leave(_: &mut MarkerSet, _: &Gesture, _: &Bindings) -> Effect {
    Effect::Cursor(Cursor::Default)
}

// Ordinary activation never creates or deletes anything.
fn primary_click(_: &mut MarkerSet, _: &Gesture, _: &Bindings) -> Effect {
    Effect::Unchanged
}

fn modified_click(markers: &mut MarkerSet, gesture: &Gesture, bindings: &Bindings) -> Effect {
    let Gesture::ModifiedClick {
        target,
        point,
        modifiers,
    } = gesture
    else {
        return Effect::Unchanged;
    };

    match target {
        Target::Marker(id) => {
            if markers.delete(*id, modifiers.held(bindings.delete)) {
                Effect::Removed(*id)
            } else {
                Effect::Unchanged
            }
        }
        Target::Background => markers
            .insert_from_background(point.x, modifiers.held(bindings.insert))
            .map_or(Effect::Unchanged, Effect::Added),
    }
}

fn drag_move(markers: &mut MarkerSet, gesture: &Gesture, _: &Bindings) -> Effect {
    let Gesture::DragMove { id, point } = gesture else {
        return Effect::Unchanged;
    };

    markers
        .move_to(*id, point.x)
        .map_or(Effect::Unchanged, |position| Effect::Moved(*id, position))
}
