use auspidiam_core::constants::PANEL_STORAGE_KEY;
use auspidiam_core::{
    place, Bounds, LinkId, MemoryStorage, NavController, PersistedPanel, Placement, Point,
    PointerId, Preset, Rect, ReleaseAction, ReleasePolicy, Size,
};
use rand::SeedableRng;
use rand::rngs::SmallRng;

const VIEWPORT: Size = Size::new(1280.0, 800.0);

fn title() -> Rect {
    Rect::new(470.0, 360.0, 340.0, 80.0)
}

fn placement_for(preset: Preset, seed: u64) -> Placement {
    let mut rng = SmallRng::seed_from_u64(seed);
    place(title(), VIEWPORT, &preset.config().placement, &mut rng).expect("measured title")
}

#[test]
fn placed_labels_are_separated_or_fell_back() {
    for preset in Preset::ALL {
        let min_sep = preset.config().placement.min_separation;
        for seed in 0..200 {
            let p = placement_for(preset, seed);
            for a in LinkId::ALL {
                for b in LinkId::ALL {
                    if a == b {
                        continue;
                    }
                    let d = p.positions[a].distance(p.positions[b]);
                    assert!(
                        d >= min_sep || p.fallbacks[a] || p.fallbacks[b],
                        "{preset} seed {seed}: {a} and {b} only {d:.1}px apart"
                    );
                }
            }
        }
    }
}

#[test]
fn placed_labels_stay_inside_inset_viewport() {
    let viewports = [VIEWPORT, Size::new(480.0, 800.0), Size::new(1280.0, 420.0)];
    for preset in Preset::ALL {
        let cfg = preset.config().placement;
        for viewport in viewports {
            let focal = Rect::centered_at(
                Point::new(viewport.width / 2.0, viewport.height / 2.0),
                Size::new(300.0, 72.0),
            );
            for seed in 0..100 {
                let mut rng = SmallRng::seed_from_u64(seed);
                let p = place(focal, viewport, &cfg, &mut rng).expect("measured title");
                for pos in p.positions.values() {
                    assert!(pos.x >= cfg.margin && pos.x <= viewport.width - cfg.margin);
                    assert!(pos.y >= cfg.margin && pos.y <= viewport.height - cfg.margin);
                }
                let bounds = Bounds::inset(viewport, cfg.margin);
                assert!(p.positions.values().all(|pos| bounds.contains(*pos)));
            }
        }
    }
}

#[test]
fn same_seed_same_placement() {
    for preset in Preset::ALL {
        assert_eq!(placement_for(preset, 42), placement_for(preset, 42));
    }
}

#[test]
fn reseeding_varies_the_arrangement() {
    let first = placement_for(Preset::Orbit, 0);
    assert!((1..20).any(|seed| placement_for(Preset::Orbit, seed).positions != first.positions));
}

fn controller(policy: ReleasePolicy, seed: u64) -> (NavController, Placement) {
    let mut c = NavController::new(policy);
    let p = placement_for(Preset::Orbit, seed);
    assert!(c.apply_placement(p));
    (c, p)
}

#[test]
fn snap_back_round_trip_returns_to_start() {
    let (mut c, p) = controller(ReleasePolicy::SnapBack, 11);
    let start = p.positions[LinkId::Audits];
    assert!(c.pointer_down(LinkId::Audits, PointerId(1), Point::new(500.0, 500.0)));
    c.pointer_move(PointerId(1), Point::new(540.0, 470.0));
    let r = c
        .pointer_up(PointerId(1), Point::new(600.0, 420.0), Size::new(70.0, 24.0))
        .expect("release");
    assert_eq!(r.position, start);
    assert_eq!(c.position(LinkId::Audits), Some(start));
    assert_eq!(r.action, ReleaseAction::SuppressClick);
}

#[test]
fn persist_round_trip_adds_the_delta() {
    let (mut c, p) = controller(ReleasePolicy::Persist, 12);
    let start = p.positions[LinkId::Analysis];
    let (dx, dy) = (-35.0, 60.0);
    assert!(c.pointer_down(LinkId::Analysis, PointerId(4), Point::new(200.0, 200.0)));
    c.pointer_move(PointerId(4), Point::new(190.0, 230.0));
    let r = c
        .pointer_up(PointerId(4), Point::new(200.0 + dx, 200.0 + dy), Size::default())
        .expect("release");
    assert_eq!(r.position, Point::new(start.x + dx, start.y + dy));
    assert_eq!(c.position(LinkId::Analysis), Some(Point::new(start.x + dx, start.y + dy)));
    // Other labels are untouched.
    assert_eq!(c.position(LinkId::About), Some(p.positions[LinkId::About]));
}

#[test]
fn click_without_movement_navigates() {
    for policy in [ReleasePolicy::SnapBack, ReleasePolicy::Persist, ReleasePolicy::drop_target()] {
        let (mut c, _) = controller(policy, 13);
        let at = Point::new(320.0, 240.0);
        assert!(c.pointer_down(LinkId::About, PointerId(1), at));
        let r = c.pointer_up(PointerId(1), at, Size::default()).expect("release");
        assert_eq!(r.action, ReleaseAction::FollowLink);
    }
}

#[test]
fn drag_beyond_threshold_suppresses_navigation() {
    for policy in [ReleasePolicy::SnapBack, ReleasePolicy::Persist] {
        let (mut c, _) = controller(policy, 14);
        assert!(c.pointer_down(LinkId::About, PointerId(1), Point::new(320.0, 240.0)));
        c.pointer_move(PointerId(1), Point::new(340.0, 240.0));
        let r = c
            .pointer_up(PointerId(1), Point::new(340.0, 240.0), Size::default())
            .expect("release");
        assert_eq!(r.action, ReleaseAction::SuppressClick);
    }
}

#[test]
fn stored_corner_far_off_screen_is_clamped() {
    let storage = MemoryStorage::with_item(PANEL_STORAGE_KEY, r#"{"x": 5000, "y": 5000}"#);
    let panel = PersistedPanel::load(storage, Size::new(1024.0, 768.0));
    assert_eq!(panel.position(), Point::new(804.0, 628.0));
}

#[test]
fn invalid_json_falls_back_to_default() {
    let storage = MemoryStorage::with_item(PANEL_STORAGE_KEY, "{");
    let panel = PersistedPanel::load(storage, Size::new(1024.0, 768.0));
    assert_eq!(panel.position(), Point::new(20.0, 20.0));
}

#[test]
fn unreadable_storage_falls_back_to_default() {
    let storage = MemoryStorage {
        failing: true,
        ..MemoryStorage::default()
    };
    let panel = PersistedPanel::load(storage, Size::new(1024.0, 768.0));
    assert_eq!(panel.position(), Point::new(20.0, 20.0));
}
