//! Layout and gesture logic for the Auspidiam navigation widgets.
//!
//! Nothing in here touches the browser. The wasm binding measures the page,
//! feeds pointer events in and renders whatever positions come back out.

pub mod constants;
pub mod drag;
pub mod geometry;
pub mod links;
pub mod panel;
pub mod placement;
pub mod preset;

pub use drag::{DragSession, DragState, NavController, PointerId, Release, ReleaseAction, ReleasePolicy};
pub use geometry::{Bounds, Point, Rect, Size};
pub use links::{LinkId, LinkMap, NavLink, PanelLink, Route, NAV_LINKS, PANEL_LINKS};
pub use panel::{MemoryStorage, PersistedPanel, Storage, StorageError};
pub use placement::{place, LayoutError, Placement, PlacementConfig, Strategy};
pub use preset::{NavConfig, Preset};
