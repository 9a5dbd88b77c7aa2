//! Shared numeric constants. Values are CSS pixels unless noted otherwise.

/// Inset from every viewport edge that placed labels must respect.
pub const VIEWPORT_MARGIN: f64 = 24.0;
/// Minimum center-to-center distance between two placed labels.
pub const MIN_SEPARATION: f64 = 96.0;
/// Clearance kept between a label center and the title box.
pub const FOCAL_PADDING: f64 = 16.0;
/// Samples tried per label before falling back to its fixed slot.
pub const MAX_PLACEMENT_ATTEMPTS: u32 = 48;
/// Pointer travel below which a press still counts as a click.
pub const DRAG_THRESHOLD: f64 = 3.0;
/// Growth of the title box used as the drop zone.
pub const DROP_ZONE_INFLATE: f64 = 24.0;

pub const PANEL_WIDTH: f64 = 220.0;
pub const PANEL_HEIGHT: f64 = 140.0;
/// Panel top-left corner used when nothing usable is stored.
pub const PANEL_DEFAULT: (f64, f64) = (20.0, 20.0);
/// `localStorage` key holding the panel corner.
pub const PANEL_STORAGE_KEY: &str = "navPanelPos_v1";
