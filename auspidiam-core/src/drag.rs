//! Pointer-driven dragging of the placed labels.
//!
//! Committed positions only change when a gesture ends. While a label is
//! held, its live position lives in the [`DragSession`].

use crate::constants::{DRAG_THRESHOLD, DROP_ZONE_INFLATE};
use crate::geometry::{Point, Rect, Size};
use crate::links::{LinkId, LinkMap, Route};
use crate::placement::Placement;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PointerId(pub i32);

/// What happens to a dragged label when it is let go.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ReleasePolicy {
    /// Always return to where the drag started.
    SnapBack,
    /// Keep the dropped position for the rest of the visit.
    Persist,
    /// Navigate when the label lands fully inside the title box grown by
    /// `inflate`; snap back otherwise.
    DropTarget { inflate: f64 },
}

impl ReleasePolicy {
    pub fn drop_target() -> Self {
        ReleasePolicy::DropTarget {
            inflate: DROP_ZONE_INFLATE,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragSession {
    pub link: LinkId,
    pub pointer: PointerId,
    /// Last pointer sample, deltas are taken against it.
    pub last: Point,
    /// Committed position when the drag began.
    pub origin: Point,
    pub live: Point,
    /// Accumulated pointer travel.
    pub travelled: f64,
    pub moved: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(DragSession),
}

/// How the host should treat the click that follows a release.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReleaseAction {
    /// No drag happened, let the link navigate normally.
    FollowLink,
    /// The press was a drag; swallow the click.
    SuppressClick,
    /// Dropped on the target zone; navigate programmatically.
    Navigate(Route),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Release {
    pub link: LinkId,
    pub position: Point,
    pub action: ReleaseAction,
    /// A placement queued during the drag was applied.
    pub relaid: bool,
}

#[derive(Clone, Debug)]
pub struct NavController {
    policy: ReleasePolicy,
    positions: Option<LinkMap<Point>>,
    drop_zone: Option<Rect>,
    state: DragState,
    pending: Option<Placement>,
}

impl NavController {
    pub fn new(policy: ReleasePolicy) -> Self {
        NavController {
            policy,
            positions: None,
            drop_zone: None,
            state: DragState::Idle,
            pending: None,
        }
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    /// Rendered position: the live one for the held label, the committed one
    /// otherwise. `None` until the first layout.
    pub fn position(&self, link: LinkId) -> Option<Point> {
        if let DragState::Dragging(s) = &self.state
            && s.link == link
        {
            return Some(s.live);
        }
        self.positions.as_ref().map(|p| p[link])
    }

    pub fn positions(&self) -> Option<LinkMap<Point>> {
        let committed = self.positions?;
        Some(LinkMap::from_fn(|id| self.position(id).unwrap_or(committed[id])))
    }

    /// Installs a fresh layout. While a label is held the layout is queued
    /// and applied once the gesture ends; returns whether it applied now.
    pub fn apply_placement(&mut self, placement: Placement) -> bool {
        if self.is_dragging() {
            self.pending = Some(placement);
            return false;
        }
        self.install(placement);
        true
    }

    fn install(&mut self, placement: Placement) {
        self.positions = Some(placement.positions);
        self.drop_zone = match self.policy {
            ReleasePolicy::DropTarget { inflate } => Some(placement.focal.inflate(inflate)),
            _ => None,
        };
    }

    pub fn pointer_down(&mut self, link: LinkId, pointer: PointerId, at: Point) -> bool {
        if self.is_dragging() {
            return false;
        }
        let Some(positions) = &self.positions else {
            return false;
        };
        let origin = positions[link];
        self.state = DragState::Dragging(DragSession {
            link,
            pointer,
            last: at,
            origin,
            live: origin,
            travelled: 0.0,
            moved: false,
        });
        true
    }

    pub fn pointer_move(&mut self, pointer: PointerId, at: Point) -> Option<Point> {
        let DragState::Dragging(s) = &mut self.state else {
            return None;
        };
        if s.pointer != pointer {
            return None;
        }
        let dx = at.x - s.last.x;
        let dy = at.y - s.last.y;
        s.live = s.live.offset(dx, dy);
        s.last = at;
        s.travelled += dx.hypot(dy);
        if s.travelled > DRAG_THRESHOLD {
            s.moved = true;
        }
        Some(s.live)
    }

    /// Ends the gesture for `pointer`. `label_size` is the rendered size of
    /// the held label, used for the drop-zone test.
    pub fn pointer_up(&mut self, pointer: PointerId, at: Point, label_size: Size) -> Option<Release> {
        self.pointer_move(pointer, at)?;
        let DragState::Dragging(s) = std::mem::take(&mut self.state) else {
            return None;
        };
        let target = s.link.descriptor().target;
        let (position, action) = match self.policy {
            _ if !s.moved => (s.origin, ReleaseAction::FollowLink),
            ReleasePolicy::SnapBack => (s.origin, ReleaseAction::SuppressClick),
            ReleasePolicy::Persist => (s.live, ReleaseAction::SuppressClick),
            ReleasePolicy::DropTarget { .. } => {
                let label = Rect::centered_at(s.live, label_size);
                match self.drop_zone {
                    Some(zone) if zone.contains_rect(&label) => {
                        (s.origin, ReleaseAction::Navigate(target))
                    }
                    _ => (s.origin, ReleaseAction::SuppressClick),
                }
            }
        };
        self.commit(s.link, position);
        let relaid = self.flush_pending();
        Some(Release {
            link: s.link,
            position: self.position(s.link).unwrap_or(position),
            action,
            relaid,
        })
    }

    /// Aborts the gesture (pointer cancel, lost capture, blur). The label
    /// returns to its origin and nothing navigates. `None` cancels whatever
    /// session is open.
    pub fn cancel(&mut self, pointer: Option<PointerId>) -> Option<LinkId> {
        let DragState::Dragging(s) = self.state else {
            return None;
        };
        if pointer.is_some_and(|p| p != s.pointer) {
            return None;
        }
        self.state = DragState::Idle;
        self.commit(s.link, s.origin);
        self.flush_pending();
        Some(s.link)
    }

    fn commit(&mut self, link: LinkId, position: Point) {
        if let Some(positions) = &mut self.positions {
            positions[link] = position;
        }
    }

    fn flush_pending(&mut self) -> bool {
        match self.pending.take() {
            Some(p) => {
                self.install(p);
                true
            }
            None => false,
        }
    }
}
