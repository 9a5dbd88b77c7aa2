//! Randomized placement of the navigation labels around the site title.
//!
//! Every strategy follows the same loop: sample a candidate for the label's
//! slot, clamp it into the inset viewport, and keep it if it clears the title
//! and every label placed before it. A label that exhausts its attempts takes
//! the unjittered position of its slot instead.

use std::f64::consts::PI;
use std::fmt;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::constants::{FOCAL_PADDING, MAX_PLACEMENT_ATTEMPTS, MIN_SEPARATION, VIEWPORT_MARGIN};
use crate::geometry::{Bounds, Point, Rect, Size};
use crate::links::{LinkId, LinkMap};

/// Base angles (degrees, screen space, y down) for ring-style slots.
const RING_ANGLES_DEG: [f64; 3] = [-90.0, 30.0, 150.0];
/// Distances of the four fixed anchors from the title edges.
const ANCHOR_VERTICAL_GAP: f64 = 110.0;
const ANCHOR_HORIZONTAL_GAP: f64 = 150.0;
const ANCHOR_COUNT: usize = 4;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Strategy {
    /// Ellipse hugging the title; `gap_*` is the distance beyond its edges.
    Ring {
        gap_min: f64,
        gap_max: f64,
        jitter_deg: f64,
    },
    /// Above, left, right and below the title, jittered per axis.
    Anchors { jitter: f64 },
    /// Uniform samples in the title box grown by `reach`.
    Scatter { reach: f64 },
}

impl Strategy {
    fn slot_count(&self) -> usize {
        match self {
            Strategy::Ring { .. } | Strategy::Scatter { .. } => RING_ANGLES_DEG.len(),
            Strategy::Anchors { .. } => ANCHOR_COUNT,
        }
    }

    /// Shuffles the slots and hands one to each label.
    fn assign_slots<R: Rng + ?Sized>(&self, rng: &mut R) -> LinkMap<usize> {
        let mut order: Vec<usize> = (0..self.slot_count()).collect();
        order.shuffle(rng);
        LinkMap::from_fn(|id| order[id.index()])
    }

    fn sample<R: Rng + ?Sized>(&self, focal: &Rect, slot: usize, rng: &mut R) -> Point {
        match *self {
            Strategy::Ring {
                gap_min,
                gap_max,
                jitter_deg,
            } => {
                let angle = RING_ANGLES_DEG[slot] + jitter(rng, jitter_deg);
                let (lo, hi) = ordered(gap_min, gap_max);
                let gap = rng.random_range(lo..=hi);
                ring_point(focal, angle, gap)
            }
            Strategy::Anchors { jitter: amount } => {
                let dx = jitter(rng, amount);
                let dy = jitter(rng, amount);
                anchor_point(focal, slot).offset(dx, dy)
            }
            Strategy::Scatter { reach } => {
                let area = focal.inflate(reach.max(0.0));
                Point::new(
                    rng.random_range(area.x..=area.right()),
                    rng.random_range(area.y..=area.bottom()),
                )
            }
        }
    }

    fn fallback(&self, focal: &Rect, slot: usize) -> Point {
        match *self {
            Strategy::Ring {
                gap_min, gap_max, ..
            } => ring_point(focal, RING_ANGLES_DEG[slot], (gap_min + gap_max) / 2.0),
            Strategy::Anchors { .. } => anchor_point(focal, slot),
            Strategy::Scatter { reach } => ring_point(focal, RING_ANGLES_DEG[slot], reach / 2.0),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacementConfig {
    pub strategy: Strategy,
    pub margin: f64,
    pub min_separation: f64,
    pub focal_padding: f64,
    pub max_attempts: u32,
}

impl PlacementConfig {
    pub fn with_strategy(strategy: Strategy) -> Self {
        PlacementConfig {
            strategy,
            ..Self::default()
        }
    }
}

impl Default for PlacementConfig {
    fn default() -> Self {
        PlacementConfig {
            strategy: Strategy::Ring {
                gap_min: 56.0,
                gap_max: 120.0,
                jitter_deg: 18.0,
            },
            margin: VIEWPORT_MARGIN,
            min_separation: MIN_SEPARATION,
            focal_padding: FOCAL_PADDING,
            max_attempts: MAX_PLACEMENT_ATTEMPTS,
        }
    }
}

/// Label centers from one layout run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    pub positions: LinkMap<Point>,
    /// Labels that ran out of attempts and sit on their fixed slot.
    pub fallbacks: LinkMap<bool>,
    /// Title box the placement was computed against.
    pub focal: Rect,
}

impl Placement {
    pub fn used_fallback(&self) -> bool {
        self.fallbacks.values().any(|f| *f)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayoutError {
    /// The title has not been laid out yet.
    FocalNotMeasured,
    ViewportNotMeasured,
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutError::FocalNotMeasured => f.write_str("focal element has no size yet"),
            LayoutError::ViewportNotMeasured => f.write_str("viewport has no size yet"),
        }
    }
}

impl std::error::Error for LayoutError {}

pub fn place<R: Rng + ?Sized>(
    focal: Rect,
    viewport: Size,
    config: &PlacementConfig,
    rng: &mut R,
) -> Result<Placement, LayoutError> {
    if viewport.is_empty() {
        return Err(LayoutError::ViewportNotMeasured);
    }
    if focal.is_empty() {
        return Err(LayoutError::FocalNotMeasured);
    }
    let bounds = Bounds::inset(viewport, config.margin);
    let keep_out = focal.inflate(config.focal_padding);
    let slots = config.strategy.assign_slots(rng);

    let mut positions = LinkMap::<Point>::default();
    let mut fallbacks = LinkMap::<bool>::default();
    let mut placed: Vec<Point> = Vec::with_capacity(LinkId::COUNT);
    for id in LinkId::ALL {
        let slot = slots[id];
        let accepted = (0..config.max_attempts).find_map(|_| {
            let candidate = bounds.clamp(config.strategy.sample(&focal, slot, rng));
            let clear = !keep_out.contains_point(candidate)
                && placed
                    .iter()
                    .all(|p| p.distance(candidate) >= config.min_separation);
            clear.then_some(candidate)
        });
        let pos = match accepted {
            Some(p) => p,
            None => {
                fallbacks[id] = true;
                bounds.clamp(config.strategy.fallback(&focal, slot))
            }
        };
        positions[id] = pos;
        placed.push(pos);
    }
    Ok(Placement {
        positions,
        fallbacks,
        focal,
    })
}

fn ring_point(focal: &Rect, angle_deg: f64, gap: f64) -> Point {
    let c = focal.center();
    let theta = angle_deg * PI / 180.0;
    let rx = focal.width / 2.0 + gap;
    let ry = focal.height / 2.0 + gap;
    Point::new(c.x + theta.cos() * rx, c.y + theta.sin() * ry)
}

fn anchor_point(focal: &Rect, slot: usize) -> Point {
    let c = focal.center();
    let hx = focal.width / 2.0;
    let hy = focal.height / 2.0;
    match slot {
        0 => Point::new(c.x, c.y - hy - ANCHOR_VERTICAL_GAP),
        1 => Point::new(c.x - hx - ANCHOR_HORIZONTAL_GAP, c.y),
        2 => Point::new(c.x + hx + ANCHOR_HORIZONTAL_GAP, c.y),
        _ => Point::new(c.x, c.y + hy + ANCHOR_VERTICAL_GAP),
    }
}

fn jitter<R: Rng + ?Sized>(rng: &mut R, amount: f64) -> f64 {
    if amount > 0.0 {
        rng.random_range(-amount..=amount)
    } else {
        0.0
    }
}

fn ordered(a: f64, b: f64) -> (f64, f64) {
    if a <= b { (a, b) } else { (b, a) }
}
