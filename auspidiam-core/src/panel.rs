//! The small nav panel whose corner survives reloads.

use std::collections::HashMap;
use std::fmt;

use serde::Deserialize;

use crate::constants::{PANEL_DEFAULT, PANEL_HEIGHT, PANEL_STORAGE_KEY, PANEL_WIDTH};
use crate::drag::PointerId;
use crate::geometry::{Point, Size};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StorageError {
    /// No storage backend (private mode, disabled cookies, no window).
    Unavailable,
    /// The backend refused the operation, e.g. quota exceeded.
    Rejected(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Unavailable => f.write_str("storage unavailable"),
            StorageError::Rejected(msg) => write!(f, "storage rejected operation: {msg}"),
        }
    }
}

impl std::error::Error for StorageError {}

/// String key/value store, shaped after `window.localStorage`.
pub trait Storage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-memory store. `failing` makes every call error out.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    pub items: HashMap<String, String>,
    pub failing: bool,
}

impl MemoryStorage {
    pub fn with_item(key: &str, value: &str) -> Self {
        let mut items = HashMap::new();
        items.insert(key.to_string(), value.to_string());
        MemoryStorage {
            items,
            failing: false,
        }
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        if self.failing {
            return Err(StorageError::Unavailable);
        }
        Ok(self.items.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.failing {
            return Err(StorageError::Rejected("quota exceeded".to_string()));
        }
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[derive(Deserialize)]
struct StoredCorner {
    x: f64,
    y: f64,
}

pub fn panel_size() -> Size {
    Size::new(PANEL_WIDTH, PANEL_HEIGHT)
}

/// Keeps the panel inside the viewport. A viewport smaller than the panel
/// pins the corner to the origin so the handle stays on screen.
pub fn clamp_panel(pos: Point, viewport: Size, panel: Size) -> Point {
    Point::new(
        pos.x.min(viewport.width - panel.width).max(0.0),
        pos.y.min(viewport.height - panel.height).max(0.0),
    )
}

fn parse_corner(raw: &str) -> Option<Point> {
    let stored: StoredCorner = serde_json::from_str(raw).ok()?;
    (stored.x.is_finite() && stored.y.is_finite()).then_some(Point::new(stored.x, stored.y))
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct PanelGrab {
    pointer: PointerId,
    offset: (f64, f64),
}

/// Panel position mirrored into a storage slot.
#[derive(Debug)]
pub struct PersistedPanel<S: Storage> {
    storage: S,
    key: String,
    size: Size,
    pos: Point,
    grab: Option<PanelGrab>,
    /// Error from the most recent write, kept for the host to log.
    last_error: Option<StorageError>,
}

impl<S: Storage> PersistedPanel<S> {
    pub fn load(storage: S, viewport: Size) -> Self {
        Self::load_with(storage, PANEL_STORAGE_KEY, panel_size(), viewport)
    }

    /// Reads the slot at `key`. Anything unreadable falls back to the default
    /// corner; the effective corner is written back.
    pub fn load_with(storage: S, key: &str, size: Size, viewport: Size) -> Self {
        let stored = storage
            .get(key)
            .ok()
            .flatten()
            .and_then(|raw| parse_corner(&raw));
        let pos = clamp_panel(stored.unwrap_or(Point::from(PANEL_DEFAULT)), viewport, size);
        let mut panel = PersistedPanel {
            storage,
            key: key.to_string(),
            size,
            pos,
            grab: None,
            last_error: None,
        };
        panel.persist();
        panel
    }

    pub fn position(&self) -> Point {
        self.pos
    }

    pub fn is_dragging(&self) -> bool {
        self.grab.is_some()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn take_error(&mut self) -> Option<StorageError> {
        self.last_error.take()
    }

    /// Starts a drag when the press landed on the handle.
    pub fn begin_drag(&mut self, pointer: PointerId, at: Point, on_handle: bool) -> bool {
        if !on_handle || self.grab.is_some() {
            return false;
        }
        self.grab = Some(PanelGrab {
            pointer,
            offset: (at.x - self.pos.x, at.y - self.pos.y),
        });
        true
    }

    pub fn drag_to(&mut self, pointer: PointerId, at: Point, viewport: Size) -> Option<Point> {
        let grab = self.grab.filter(|g| g.pointer == pointer)?;
        let next = Point::new(at.x - grab.offset.0, at.y - grab.offset.1);
        self.pos = clamp_panel(next, viewport, self.size);
        Some(self.pos)
    }

    /// Commits the last clamped corner and writes it out. `None` ends the
    /// drag whichever pointer holds it (window blur); interrupted gestures
    /// keep the corner the same way a release does.
    pub fn end_drag(&mut self, pointer: Option<PointerId>) -> Option<Point> {
        self.grab.filter(|g| pointer.is_none_or(|p| g.pointer == p))?;
        self.grab = None;
        self.persist();
        Some(self.pos)
    }

    /// Re-clamps after a viewport change.
    pub fn fit_viewport(&mut self, viewport: Size) -> Point {
        let fitted = clamp_panel(self.pos, viewport, self.size);
        if fitted != self.pos {
            self.pos = fitted;
            self.persist();
        }
        self.pos
    }

    fn persist(&mut self) {
        let raw = match serde_json::to_string(&self.pos) {
            Ok(raw) => raw,
            Err(e) => {
                self.last_error = Some(StorageError::Rejected(e.to_string()));
                return;
            }
        };
        if let Err(e) = self.storage.set(&self.key, &raw) {
            self.last_error = Some(e);
        }
    }
}
