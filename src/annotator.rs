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
use std::sync::Arc;

use tracing::{debug, info, span, Level, Span};

use crate::{
    canvas::{Cursor, Dimensions, Surface},
    gesture::{self, Bindings, Effect, Gesture, Modifier, Modifiers, Target},
    markers::{MarkerId, MarkerSet},
    progression::Reset,
    timeline::{Point, Timeline},
};

/// Raw pointer input on the surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    Move(Point),
    Press(Point, Modifiers),
    Release(Point, Modifiers),
}

/// A press that hasn't been released yet.
struct Grab {
    target: Target,
    start: Point,
    moved: bool,
}

/// Owns the markers for the current sample and keeps the surface in sync with them.
pub struct Annotator {
    /// The markers for the current sample.
    markers: MarkerSet,
    /// The surface the markers are drawn on.
    surface: Arc<dyn Surface>,
    /// The surface dimensions, used for hit testing and the marker baseline.
    dimensions: Dimensions,
    /// The modifiers that gate deletion and insertion.
    bindings: Bindings,
    /// The marker currently under the pointer.
    hovered: Option<MarkerId>,
    /// The in-progress press, if any.
    grab: Option<Grab>,
    /// The logging span.
    span: Span,
}

impl Annotator {
    /// Creates a new annotator with an empty marker set. Nothing is drawn until the first
    /// change.
    pub fn new(
        timeline: Timeline,
        dimensions: Dimensions,
        surface: Arc<dyn Surface>,
        bindings: Bindings,
    ) -> Annotator {
        Annotator {
            markers: MarkerSet::new(timeline),
            surface,
            dimensions,
            bindings,
            hovered: None,
            grab: None,
            span: span!(Level::INFO, "annotator"),
        }
    }

    pub fn markers(&self) -> &MarkerSet {
        &self.markers
    }

    pub fn timeline(&self) -> &Timeline {
        self.markers.timeline()
    }

    pub fn bindings(&self) -> &Bindings {
        &self.bindings
    }

    pub fn hovered(&self) -> Option<MarkerId> {
        self.hovered
    }

    /// Drags the marker towards the raw point. Only the horizontal component is honoured: the
    /// returned point is the clamped x on the baseline. Returns None for an unknown marker.
    pub fn move_marker(&mut self, id: MarkerId, raw: Point) -> Option<Point> {
        match self.gesture(Gesture::DragMove { id, point: raw }) {
            Effect::Moved(_, position) => Some(Point::new(position, self.dimensions.baseline())),
            _ => None,
        }
    }

    /// Deletes the marker if the delete modifier was held.
    pub fn delete_marker(&mut self, id: MarkerId, modifier_held: bool) -> bool {
        let Some(marker) = self.markers.get(id) else {
            return false;
        };
        let point = Point::new(marker.position(), self.dimensions.baseline());
        let modifiers = Self::held(self.bindings.delete, modifier_held);

        self.gesture(Gesture::click(Target::Marker(id), point, modifiers)) == Effect::Removed(id)
    }

    /// Inserts a marker where the background was clicked, if the insert modifier was held and x
    /// is strictly inside the timeline.
    pub fn insert_marker_from_background(
        &mut self,
        x: f64,
        modifier_held: bool,
    ) -> Option<MarkerId> {
        let point = Point::new(x, self.dimensions.baseline());
        let modifiers = Self::held(self.bindings.insert, modifier_held);

        match self.gesture(Gesture::click(Target::Background, point, modifiers)) {
            Effect::Added(id) => Some(id),
            _ => None,
        }
    }

    /// The pointer entered the marker.
    pub fn hover_enter(&mut self, id: MarkerId) {
        self.gesture(Gesture::HoverEnter(id));
    }

    /// The pointer left the marker.
    pub fn hover_leave(&mut self, id: MarkerId) {
        self.gesture(Gesture::HoverLeave(id));
    }

    /// Runs a gesture through the dispatch table and reflects the result on the surface.
    pub fn gesture(&mut self, gesture: Gesture) -> Effect {
        let span = self.span.clone();
        let _enter = span.enter();

        let effect = gesture::dispatch(&mut self.markers, &gesture, &self.bindings);
        debug!(gesture = ?gesture, effect = ?effect, "Handled gesture.");

        match effect {
            Effect::Cursor(cursor) => match gesture {
                Gesture::HoverEnter(id) => {
                    self.hovered = Some(id);
                    self.surface.set_cursor(cursor);
                }
                // Leaving a marker other than the hovered one changes nothing.
                Gesture::HoverLeave(id) if self.hovered == Some(id) => {
                    self.hovered = None;
                    self.surface.set_cursor(cursor);
                }
                _ => return Effect::Unchanged,
            },
            Effect::Removed(id) => {
                self.forget(id);
                self.redraw();
            }
            Effect::Added(_) | Effect::Moved(_, _) => self.redraw(),
            Effect::Unchanged => {}
        }

        effect
    }

    /// Resolves raw pointer input into gestures. A press on a marker grabs it and subsequent
    /// moves drag it. A press and release without movement in between is a click, provided both
    /// land on the same target.
    pub fn pointer(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Move(point) => match self.grab.as_mut() {
                Some(grab) => {
                    grab.moved |= point != grab.start;
                    let target = grab.target;
                    if let Target::Marker(id) = target {
                        self.gesture(Gesture::DragMove { id, point });
                    }
                }
                None => self.track_hover(point),
            },
            PointerEvent::Press(point, _) => {
                self.grab = Some(Grab {
                    target: self.hit_test(point),
                    start: point,
                    moved: false,
                });
            }
            PointerEvent::Release(point, modifiers) => {
                let Some(grab) = self.grab.take() else {
                    return;
                };
                if !grab.moved && self.hit_test(point) == grab.target {
                    self.gesture(Gesture::click(grab.target, point, modifiers));
                }
                self.track_hover(point);
            }
        }
    }

    /// Returns the marker whose disc contains the point, preferring the closest.
    pub fn hit_test(&self, point: Point) -> Target {
        let baseline = self.dimensions.baseline();
        let radius = self.dimensions.marker_radius();
        self.markers
            .iter()
            .map(|marker| {
                let (dx, dy) = (marker.position() - point.x, baseline - point.y);
                (marker.id(), (dx * dx + dy * dy).sqrt())
            })
            .filter(|(_, distance)| *distance <= radius)
            .min_by(|(_, a), (_, b)| a.total_cmp(b))
            .map_or(Target::Background, |(id, _)| Target::Marker(id))
    }

    /// Emits hover enter/leave when the pointer crosses into or out of a marker.
    fn track_hover(&mut self, point: Point) {
        let under = match self.hit_test(point) {
            Target::Marker(id) => Some(id),
            Target::Background => None,
        };
        if under == self.hovered {
            return;
        }

        if let Some(previous) = self.hovered {
            self.gesture(Gesture::HoverLeave(previous));
        }
        if let Some(id) = under {
            self.gesture(Gesture::HoverEnter(id));
        }
    }

    /// The modifiers for a gesture made with the given binding held, or with none.
    fn held(modifier: Modifier, held: bool) -> Modifiers {
        if held {
            Modifiers::only(modifier)
        } else {
            Modifiers::NONE
        }
    }

    /// Drops any pointer state referring to a removed marker.
    fn forget(&mut self, id: MarkerId) {
        if self.hovered == Some(id) {
            self.hovered = None;
            self.surface.set_cursor(Cursor::Default);
        }
        if matches!(&self.grab, Some(grab) if grab.target == Target::Marker(id)) {
            self.grab = None;
        }
    }

    fn redraw(&self) {
        self.surface.redraw(&self.markers);
    }
}

impl Reset for Annotator {
    /// Discards every marker and seeds one at the midpoint of the timeline.
    fn reset(&mut self) {
        let _enter = self.span.enter();

        if self.hovered.take().is_some() {
            self.surface.set_cursor(Cursor::Default);
        }
        self.grab = None;
        self.markers.reset();
        info!(markers = self.markers.len(), "Reset markers.");
        self.redraw();
    }
}
