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
use std::collections::BTreeMap;
use std::fmt;

use crate::timeline::Timeline;

/// Identifies a marker. Ids are never reused, even across resets, so a marker from a previous
/// sample can't be confused with a current one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MarkerId(u64);

impl MarkerId {
    pub fn new(id: u64) -> MarkerId {
        MarkerId(id)
    }
}

impl fmt::Display for MarkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single timestamp annotation on the timeline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Marker {
    id: MarkerId,
    position: f64,
}

impl Marker {
    pub fn id(&self) -> MarkerId {
        self.id
    }

    pub fn position(&self) -> f64 {
        self.position
    }
}

/// The markers placed on the timeline for the current sample. Every position stored here is
/// within the timeline bounds.
pub struct MarkerSet {
    timeline: Timeline,
    markers: BTreeMap<MarkerId, Marker>,
    next_id: u64,
}

impl fmt::Display for MarkerSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Markers ({} on {}):", self.markers.len(), self.timeline)?;
        for marker in self.markers.values() {
            writeln!(
                f,
                "  - #{} at {:.1} ({:.1}%)",
                marker.id,
                marker.position,
                self.timeline.fraction(marker.position) * 100.0
            )?;
        }

        Ok(())
    }
}

impl MarkerSet {
    /// Creates an empty marker set on the given timeline.
    pub fn new(timeline: Timeline) -> MarkerSet {
        MarkerSet {
            timeline,
            markers: BTreeMap::new(),
            next_id: 0,
        }
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Builds a new marker with a fresh id at the clamped position. The marker is not inserted.
    fn create(&mut self, x: f64) -> Marker {
        let id = MarkerId(self.next_id);
        self.next_id += 1;
        Marker {
            id,
            position: self.timeline.clamp(x),
        }
    }

    /// Adds a marker at x, clamped to the timeline.
    pub fn add(&mut self, x: f64) -> MarkerId {
        let marker = self.create(x);
        self.markers.insert(marker.id, marker);
        marker.id
    }

    /// Moves the marker to x, clamped to the timeline. Returns the new position, or None if
    /// there is no such marker.
    pub fn move_to(&mut self, id: MarkerId, x: f64) -> Option<f64> {
        let position = self.timeline.clamp(x);
        let marker = self.markers.get_mut(&id)?;
        marker.position = position;
        Some(position)
    }

    /// Removes the marker unconditionally.
    pub fn remove(&mut self, id: MarkerId) -> Option<Marker> {
        self.markers.remove(&id)
    }

    /// Removes the marker only if the delete modifier was held. Returns true if a marker was
    /// removed.
    pub fn delete(&mut self, id: MarkerId, modifier_held: bool) -> bool {
        modifier_held && self.remove(id).is_some()
    }

    /// Adds a marker where the background was clicked, only if the insert modifier was held and
    /// x is strictly inside the timeline.
    pub fn insert_from_background(&mut self, x: f64, modifier_held: bool) -> Option<MarkerId> {
        if !modifier_held || !self.timeline.contains_open(x) {
            return None;
        }

        Some(self.add(x))
    }

    /// Discards every marker and seeds a single one at the midpoint of the timeline.
    pub fn reset(&mut self) {
        self.markers.clear();
        self.add(self.timeline.midpoint());
    }

    pub fn get(&self, id: MarkerId) -> Option<&Marker> {
        self.markers.get(&id)
    }

    pub fn contains(&self, id: MarkerId) -> bool {
        self.markers.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Marker> {
        self.markers.values()
    }

    pub fn ids(&self) -> Vec<MarkerId> {
        self.markers.keys().copied().collect()
    }
}
