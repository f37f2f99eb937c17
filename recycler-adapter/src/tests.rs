use crate::*;

use alloc::boxed::Box;
use alloc::vec;
use alloc::vec::Vec;
use std::cell::RefCell;
use std::rc::Rc;

use recycler::{
    Alignment, CellBinding, CellSource, CellView, MovementType, ScrollDirection, Scroller,
    ScrollerOptions,
};

#[derive(Debug)]
struct Row {
    binding: Option<CellBinding>,
}

impl CellView for Row {
    type Kind = ();

    fn kind(&self) {}

    fn binding(&self) -> Option<CellBinding> {
        self.binding
    }

    fn set_binding(&mut self, binding: Option<CellBinding>) {
        self.binding = binding;
    }
}

struct Rows {
    sizes: Vec<f32>,
}

impl CellSource for Rows {
    type View = Row;

    fn cell_count(&self) -> usize {
        self.sizes.len()
    }

    fn cell_size(&self, data_index: usize) -> f32 {
        self.sizes[data_index]
    }

    fn cell_kind(&self, _data_index: usize) {}

    fn create_view(&mut self, _kind: &(), binding: CellBinding) -> Row {
        Row {
            binding: Some(binding),
        }
    }
}

fn controller(
    options: ScrollerOptions,
    count: usize,
    size: f32,
    surface: SimSurface,
    config: SnapConfig,
) -> Controller<Rows, SimSurface> {
    let mut scroller = Scroller::new(
        Rows {
            sizes: vec![size; count],
        },
        options,
    );
    scroller.reload(0.0);
    Controller::new(scroller, surface, config)
}

/// 100 items of 50px in a 300px viewport, snapping on drag end with a 200px/s threshold.
fn snapping_list() -> Controller<Rows, SimSurface> {
    controller(
        ScrollerOptions::vertical(300.0),
        100,
        50.0,
        SimSurface::new(),
        SnapConfig::new()
            .with_snap_on_end_drag(true)
            .with_velocity_threshold(200.0)
            .with_easing(Easing::Linear)
            .with_duration_ms(300),
    )
}

type EndLog = Rc<RefCell<Vec<TweenEnd>>>;

fn recorder() -> (EndLog, Option<OnTweenEnd>) {
    let log: EndLog = Rc::default();
    let sink = Rc::clone(&log);
    let cb: OnTweenEnd = Box::new(move |end| sink.borrow_mut().push(end));
    (log, Some(cb))
}

#[test]
fn easing_curves_start_at_zero_and_end_at_one() {
    let curves = [
        Easing::Linear,
        Easing::EaseInQuad,
        Easing::EaseOutQuad,
        Easing::EaseInOutQuad,
        Easing::EaseInCubic,
        Easing::EaseOutCubic,
        Easing::EaseInOutCubic,
        Easing::SmoothStep,
    ];
    for easing in curves {
        assert_eq!(easing.sample(0.0), 0.0, "{easing:?}");
        assert_eq!(easing.sample(1.0), 1.0, "{easing:?}");
        let mut prev = 0.0;
        for step in 1..=20 {
            let v = easing.sample(step as f32 / 20.0);
            assert!(v >= prev, "{easing:?} not monotonic at step {step}");
            prev = v;
        }
    }
    assert_eq!(Easing::Immediate.sample(0.0), 1.0);
    assert_eq!(Easing::Linear.sample(2.0), 1.0);
}

#[test]
fn tween_samples_between_endpoints() {
    let t = Tween::new(100.0, 0.0, 1_000, 200, Easing::Linear);

    assert_eq!(t.direction(), ScrollDirection::Backward);
    assert_eq!(t.sample(900), 100.0);
    assert_eq!(t.sample(1_100), 50.0);
    assert!(!t.is_done(1_199));
    assert!(t.is_done(1_200));
    assert_eq!(t.sample(5_000), 0.0);
}

#[test]
fn zero_duration_or_immediate_tween_lands_on_target() {
    let t = Tween::new(0.0, 40.0, 10, 0, Easing::EaseOutCubic);
    assert!(t.is_immediate());
    assert!(t.is_done(10));
    assert_eq!(t.sample(10), 40.0);

    let t = Tween::new(0.0, 40.0, 10, 500, Easing::Immediate);
    assert!(t.is_immediate());
    assert_eq!(t.sample(10), 40.0);
}

#[test]
fn tween_retarget_continues_from_current_sample() {
    let mut t = Tween::new(0.0, 100.0, 0, 100, Easing::Linear);
    t.retarget(50, 0.0, 100);

    assert_eq!(t.from, 50.0);
    assert_eq!(t.to, 0.0);
    assert_eq!(t.start_ms, 50);
    assert_eq!(t.direction(), ScrollDirection::Backward);
}

#[test]
fn sim_surface_decays_velocity() {
    let mut s = SimSurface::new();
    s.set_velocity(1_000.0);

    let moved = s.step(1_000);
    assert!(moved > 0.0);
    assert!(s.velocity() > 100.0 && s.velocity() < 200.0, "{}", s.velocity());

    let mut frozen = SimSurface::new().with_inertia(false);
    frozen.set_velocity(1_000.0);
    assert_eq!(frozen.step(16), 0.0);
    assert_eq!(frozen.velocity(), 0.0);

    let mut slow = SimSurface::new().with_decay_per_ms(0.5);
    slow.set_velocity(100.0);
    slow.step(16);
    assert_eq!(slow.velocity(), 0.0);
}

#[test]
fn slow_release_snaps_on_the_next_tick() {
    let mut c = snapping_list();
    c.set_scroll_position(130.0);

    c.on_begin_drag();
    assert_eq!(c.snap_state(), SnapState::Dragging);
    c.surface_mut().set_velocity(180.0);
    c.on_end_drag();
    assert_eq!(c.snap_state(), SnapState::Settling);

    c.tick(0);
    assert_eq!(c.snap_state(), SnapState::Tweening);
    let tween = *c.snap().tween().unwrap();
    assert_eq!(tween.from, 130.0);
    assert_eq!(tween.to, 100.0);

    // The surface is owned by the tween until it ends.
    assert_eq!(c.surface().velocity(), 0.0);
    assert!(!c.surface().inertia());
    assert_eq!(c.surface().movement_type(), MovementType::Unrestricted);

    c.tick(150);
    assert_eq!(c.scroller().scroll_position(), 115.0);

    c.tick(300);
    assert_eq!(c.snap_state(), SnapState::Idle);
    assert_eq!(c.scroller().scroll_position(), 100.0);
    assert!(c.surface().inertia());
    assert_eq!(c.surface().movement_type(), MovementType::Elastic);
}

#[test]
fn fast_release_waits_and_compensates_stalls() {
    let mut c = snapping_list();
    c.set_scroll_position(130.0);
    c.on_begin_drag();
    c.surface_mut().set_velocity(500.0);
    c.on_end_drag();

    c.tick(0);
    assert_eq!(c.snap_state(), SnapState::Settling);

    // A one-tick zero reading while the average is still fast.
    c.surface_mut().set_velocity(0.0);
    c.tick(16);
    assert_eq!(c.snap_state(), SnapState::Settling);
    assert_eq!(c.surface().velocity(), 250.0);

    // (150 + 250) / 2 = 200: at the threshold.
    c.surface_mut().set_velocity(150.0);
    c.tick(32);
    assert_eq!(c.snap_state(), SnapState::Tweening);
}

#[test]
fn stall_is_left_alone_without_inertia() {
    let mut c = controller(
        ScrollerOptions::vertical(300.0),
        100,
        50.0,
        SimSurface::new().with_inertia(false),
        SnapConfig::new().with_snap_on_end_drag(true),
    );
    c.on_begin_drag();
    c.surface_mut().set_velocity(900.0);
    c.on_end_drag();
    c.surface_mut().set_velocity(0.0);

    c.tick(0);
    assert_eq!(c.surface().velocity(), 0.0);
    assert_eq!(c.snap_state(), SnapState::Settling);
}

#[test]
fn release_without_snap_on_end_drag_stays_idle() {
    let mut c = controller(
        ScrollerOptions::vertical(300.0),
        100,
        50.0,
        SimSurface::new(),
        SnapConfig::new(),
    );
    c.set_scroll_position(130.0);
    c.on_begin_drag();
    c.on_end_drag();
    for now in 0..20 {
        c.tick(now * 16);
    }
    assert_eq!(c.snap_state(), SnapState::Idle);
    assert_eq!(c.scroller().scroll_position(), 130.0);
}

#[test]
fn scroll_input_arms_a_delayed_snap() {
    let mut c = snapping_list();
    c.set_scroll_position(130.0);
    c.on_scroll_input();

    for tick in 1..SCROLL_INPUT_SETTLE_TICKS as u64 {
        c.tick(tick * 16);
        assert_eq!(c.snap_state(), SnapState::Idle, "tick {tick}");
    }
    c.tick(SCROLL_INPUT_SETTLE_TICKS as u64 * 16);
    assert_eq!(c.snap_state(), SnapState::Tweening);
    assert_eq!(c.snap().tween().unwrap().to, 100.0);
}

#[test]
fn drag_cancels_the_running_tween_and_restores_the_surface() {
    let mut c = controller(
        ScrollerOptions::vertical(300.0),
        100,
        50.0,
        SimSurface::new().with_movement_type(MovementType::Clamped),
        SnapConfig::new(),
    );
    let (log, cb) = recorder();
    c.jump_to_item(40, Alignment::Before, Easing::Linear, 100, 0, cb);
    c.tick(50);
    assert_eq!(c.scroller().scroll_position(), 1_000.0);

    c.on_begin_drag();
    assert_eq!(c.snap_state(), SnapState::Dragging);
    assert!(c.surface().inertia());
    assert_eq!(c.surface().movement_type(), MovementType::Clamped);
    assert_eq!(c.surface().velocity(), 0.0);
    assert_eq!(*log.borrow(), vec![TweenEnd::Canceled { position: 1_000.0 }]);
}

#[test]
fn starting_a_tween_cancels_the_previous_one() {
    let mut c = snapping_list();
    let (log_a, cb_a) = recorder();
    let (log_b, cb_b) = recorder();

    let target_a = c.jump_to_item(50, Alignment::Before, Easing::Linear, 100, 0, cb_a);
    assert_eq!(target_a, 2_500.0);
    c.tick(50);
    assert_eq!(c.scroller().scroll_position(), 1_250.0);

    let target_b = c.jump_to_item(10, Alignment::Before, Easing::Linear, 100, 50, cb_b);
    assert_eq!(target_b, 500.0);
    assert_eq!(*log_a.borrow(), vec![TweenEnd::Canceled { position: 1_250.0 }]);
    assert!(log_b.borrow().is_empty());

    c.tick(100);
    c.tick(150);
    assert!(!c.is_tweening());
    assert_eq!(c.scroller().scroll_position(), 500.0);
    assert_eq!(*log_a.borrow(), vec![TweenEnd::Canceled { position: 1_250.0 }]);
    assert_eq!(*log_b.borrow(), vec![TweenEnd::Completed { target: 500.0 }]);
}

#[test]
fn immediate_jump_completes_before_returning() {
    let mut c = snapping_list();
    let (log, cb) = recorder();

    c.jump_to_item(20, Alignment::Before, Easing::Immediate, 300, 0, cb);
    assert!(!c.is_tweening());
    assert_eq!(c.scroller().scroll_position(), 1_000.0);
    assert_eq!(*log.borrow(), vec![TweenEnd::Completed { target: 1_000.0 }]);
    assert_eq!(c.scroller().window().range(), c.scroller().visible_range());
    assert!(c.surface().inertia());

    let (log, cb) = recorder();
    c.jump_to_item(30, Alignment::Before, Easing::Linear, 0, 10, cb);
    assert_eq!(c.scroller().scroll_position(), 1_500.0);
    assert_eq!(*log.borrow(), vec![TweenEnd::Completed { target: 1_500.0 }]);
}

#[test]
fn last_item_jump_respects_the_trailing_alignment() {
    let mut c = snapping_list();
    let target = c.jump_to_item(99, Alignment::After, Easing::Immediate, 0, 0, None);

    let table = c.scroller().table();
    assert_eq!(target, table.offset_after(99) - 300.0);
    assert_eq!(c.scroller().end_data_index(), 99);
}

#[test]
fn clamped_surfaces_get_clamped_targets() {
    let mut elastic = snapping_list();
    assert_eq!(
        elastic.jump_to_item(0, Alignment::Center, Easing::Linear, 100, 0, None),
        -125.0
    );

    let mut clamped = controller(
        ScrollerOptions::vertical(300.0),
        100,
        50.0,
        SimSurface::new().with_movement_type(MovementType::Clamped),
        SnapConfig::new(),
    );
    assert_eq!(
        clamped.jump_to_item(0, Alignment::Center, Easing::Linear, 100, 0, None),
        0.0
    );
}

#[test]
fn looping_tween_wraps_through_the_seam() {
    let mut c = controller(
        ScrollerOptions::vertical(200.0).with_loop(true),
        10,
        40.0,
        SimSurface::new(),
        SnapConfig::new(),
    );
    c.set_scroll_position(780.0);
    c.tick(0);

    // Copies of item 2 start at 80, 480 and 880; 880 is the closest.
    let (log, cb) = recorder();
    let target = c.jump_to_item(2, Alignment::Before, Easing::Linear, 100, 0, cb);
    assert_eq!(target, 880.0);

    c.tick(50);
    assert_eq!(c.scroller().scroll_position(), 430.0);
    assert_eq!(c.scroller().scroll_direction(), Some(ScrollDirection::Forward));

    c.tick(100);
    assert_eq!(c.scroller().scroll_position(), 480.0);
    assert_eq!(c.scroller().start_data_index(), 1);
    assert_eq!(*log.borrow(), vec![TweenEnd::Completed { target: 880.0 }]);
}

#[test]
fn snap_now_targets_the_item_under_the_alignment_point() {
    let mut c = controller(
        ScrollerOptions::vertical(300.0),
        100,
        50.0,
        SimSurface::new(),
        SnapConfig::new()
            .with_alignment(Alignment::Center)
            .with_easing(Easing::Immediate),
    );
    c.set_scroll_position(130.0);

    let t = c.snap_now(0).unwrap();
    assert_eq!(t.data_index, 5);
    assert_eq!(t.position, 125.0);
    assert_eq!(c.scroller().scroll_position(), 125.0);
}

#[test]
fn snap_now_without_items_is_a_no_op() {
    let mut c = controller(
        ScrollerOptions::vertical(300.0),
        0,
        50.0,
        SimSurface::new(),
        SnapConfig::new(),
    );
    assert!(c.snap_now(0).is_none());
    assert!(!c.is_tweening());
}

#[test]
fn clamped_surface_scroll_zeroes_velocity() {
    let mut c = snapping_list();
    c.surface_mut().set_velocity(500.0);

    assert!(!c.on_surface_scrolled(0.5));
    assert_eq!(c.surface().velocity(), 500.0);
    assert_eq!(c.scroller().scroll_position(), 2_350.0);

    assert!(c.on_surface_scrolled(1.0 + 1_000.0 / 4_700.0));
    assert_eq!(c.scroller().scroll_position(), -300.0);
    assert_eq!(c.surface().velocity(), 0.0);
}

#[test]
fn cancel_tween_reports_where_it_stopped() {
    let mut c = snapping_list();
    let (log, cb) = recorder();
    c.jump_to_item(10, Alignment::Before, Easing::Linear, 100, 0, cb);
    c.tick(20);

    assert!(c.cancel_tween());
    assert!(!c.cancel_tween());
    assert_eq!(*log.borrow(), vec![TweenEnd::Canceled { position: 100.0 }]);
    assert_eq!(c.snap_state(), SnapState::Idle);
}

#[test]
fn free_scroll_then_snap_with_the_sim_surface() {
    let mut c = snapping_list();
    c.on_begin_drag();
    c.set_scroll_position(1_010.0);
    c.surface_mut().set_velocity(900.0);
    c.on_end_drag();

    let mut now = 0;
    while c.snap_state() == SnapState::Settling && now < 10_000 {
        let dx = c.surface_mut().step(16);
        let p = c.scroller().scroll_position() + dx;
        c.set_scroll_position(p);
        now += 16;
        c.tick(now);
    }
    assert_eq!(c.snap_state(), SnapState::Tweening);
    while c.is_tweening() {
        now += 16;
        c.tick(now);
    }

    // Lands on a leading item edge past the release point.
    let p = c.scroller().scroll_position();
    assert!(p > 1_010.0);
    assert_eq!(p % 50.0, 0.0);
    assert_eq!(c.scroller().window().range(), c.scroller().visible_range());
}

#[test]
fn surface_position_follows_a_finished_jump() {
    let mut c = snapping_list();
    assert_eq!(c.surface().normalized_position(), 1.0);

    c.jump_to_item(40, Alignment::Before, Easing::Immediate, 0, 0, None);
    assert_eq!(c.scroller().scroll_position(), 2_000.0);
    let expected = 1.0 - 2_000.0 / 4_700.0;
    let n = c.surface().normalized_position();
    assert!(n > expected - 1e-6 && n < expected + 1e-6, "surface at {n}, expected {expected}");

    // The host reports back what its surface holds; the jump must survive it.
    c.on_surface_scrolled(n);
    let p = c.scroller().scroll_position();
    assert!(p >= 1_999.99 && p <= 2_000.01, "scroller moved to {p}");
}

#[test]
fn surface_position_follows_tween_frames_and_loop_wraps() {
    let mut c = controller(
        ScrollerOptions::vertical(200.0).with_loop(true),
        10,
        40.0,
        SimSurface::new(),
        SnapConfig::new(),
    );
    c.set_scroll_position(780.0);
    c.tick(0);
    assert_eq!(
        c.surface().normalized_position(),
        c.scroller().normalized_position()
    );

    c.jump_to_item(2, Alignment::Before, Easing::Linear, 100, 0, None);
    c.tick(50);
    // The frame at 830 wrapped back by one copy; the surface sees the wrapped position.
    assert_eq!(c.scroller().scroll_position(), 430.0);
    assert_eq!(
        c.surface().normalized_position(),
        c.scroller().normalized_position()
    );

    c.tick(100);
    let n = c.surface().normalized_position();
    assert_eq!(n, c.scroller().normalized_position());
    c.on_surface_scrolled(n);
    let p = c.scroller().scroll_position();
    assert!(p >= 479.99 && p <= 480.01, "scroller moved to {p}");
}

#[test]
fn clamped_position_is_written_back_to_the_surface() {
    let mut c = snapping_list();
    assert!(c.set_scroll_position(-1_000.0));
    assert_eq!(c.scroller().scroll_position(), -300.0);
    assert_eq!(
        c.surface().normalized_position(),
        c.scroller().normalized_position()
    );
    assert!(c.surface().normalized_position() > 1.0);
}
