use crate::*;

use carousel::{
    Axis, AxisGeometry, AutoplayOptions, Carousel, CarouselOptions, Direction, PointerPosition,
    Release, ReleaseOutcome,
};

fn at(x: f32, y: f32) -> PointerPosition {
    PointerPosition::new(x, y)
}

fn controller(options: CarouselOptions) -> Controller {
    let mut c = Controller::new(options);
    c.on_container_size(100.0);
    c
}

fn position(c: &Controller) -> Option<usize> {
    c.carousel().current_position()
}

#[test]
fn tween_samples_between_endpoints() {
    let t = Tween::new(0.0, -100.0, 10, 100, Easing::Linear);
    assert_eq!(t.sample(0), 0.0);
    assert_eq!(t.sample(10), 0.0);
    assert_eq!(t.sample(60), -50.0);
    assert_eq!(t.sample(110), -100.0);
    assert!(!t.is_done(109));
    assert!(t.is_done(110));

    let mut t = Tween::new(0.0, 10.0, 0, 0, Easing::SmoothStep);
    assert_eq!(t.duration_ms, 1);
    t.retarget(1, 20.0, 10);
    assert_eq!(t.from, 10.0);
    assert_eq!(t.sample(11), 20.0);
}

#[test]
fn easings_start_at_zero_and_end_at_one() {
    for easing in [
        Easing::Linear,
        Easing::SmoothStep,
        Easing::EaseInOutCubic,
        Easing::EaseOutCubic,
    ] {
        assert!(easing.sample(0.0).abs() < 1e-6, "{easing:?}");
        assert!((easing.sample(1.0) - 1.0).abs() < 1e-6, "{easing:?}");
        let mut last = 0.0;
        for i in 1..=20 {
            let v = easing.sample(i as f32 / 20.0);
            assert!(v >= last, "{easing:?} is not monotonic");
            last = v;
        }
    }
}

#[test]
fn gesture_locks_axis_then_classifies_swipe() {
    let mut g = GestureTracker::new(AxisGeometry::new(Axis::Horizontal, Direction::Ltr));
    g.pointer_down(at(0.0, 0.0), 0);
    assert_eq!(g.phase(), GesturePhase::Armed);
    assert_eq!(g.pointer_move(at(3.0, 0.0), 5), GestureEvent::None);
    assert_eq!(
        g.pointer_move(at(10.0, 0.0), 10),
        GestureEvent::DragStart { delta: 10.0 }
    );
    assert_eq!(g.phase(), GesturePhase::Dragging);
    assert_eq!(
        g.pointer_move(at(20.0, 0.0), 20),
        GestureEvent::Drag { delta: 10.0 }
    );
    assert_eq!(g.velocity(), 16.0);
    assert_eq!(
        g.pointer_up(at(20.0, 0.0), 40),
        Some(Release::Swipe { velocity: 16.0 })
    );
    assert_eq!(g.phase(), GesturePhase::Idle);
    assert_eq!(g.pointer_up(at(20.0, 0.0), 50), None);
}

#[test]
fn gesture_click_and_settle() {
    let mut g = GestureTracker::new(AxisGeometry::default());

    // Never locked.
    g.pointer_down(at(0.0, 0.0), 0);
    g.pointer_move(at(4.0, 3.0), 10);
    assert_eq!(g.pointer_up(at(4.0, 3.0), 20), Some(Release::Click));

    // Locked, then came back close to the press position.
    g.pointer_down(at(0.0, 0.0), 0);
    g.pointer_move(at(10.0, 0.0), 10);
    assert_eq!(
        g.pointer_move(at(2.0, 0.0), 20),
        GestureEvent::Drag { delta: -8.0 }
    );
    assert_eq!(g.pointer_up(at(2.0, 0.0), 300), Some(Release::Click));

    // Too slow for a swipe.
    g.pointer_down(at(0.0, 0.0), 0);
    g.pointer_move(at(30.0, 0.0), 100);
    assert_eq!(g.pointer_up(at(30.0, 0.0), 250), Some(Release::Settle));
}

#[test]
fn gesture_cross_axis_movement_aborts() {
    let mut g = GestureTracker::new(AxisGeometry::default());
    g.pointer_down(at(0.0, 0.0), 0);
    assert_eq!(g.pointer_move(at(2.0, 9.0), 10), GestureEvent::Aborted);
    assert_eq!(g.phase(), GesturePhase::Idle);
    assert_eq!(g.pointer_move(at(40.0, 9.0), 20), GestureEvent::None);
    assert_eq!(g.pointer_up(at(40.0, 9.0), 30), None);
}

#[test]
fn gesture_deltas_follow_axis_and_direction() {
    let mut g = GestureTracker::new(AxisGeometry::new(Axis::Vertical, Direction::Ltr));
    g.pointer_down(at(0.0, 0.0), 0);
    assert_eq!(
        g.pointer_move(at(0.0, -12.0), 10),
        GestureEvent::DragStart { delta: -12.0 }
    );

    let mut g = GestureTracker::new(AxisGeometry::new(Axis::Horizontal, Direction::Rtl));
    g.pointer_down(at(0.0, 0.0), 0);
    assert_eq!(
        g.pointer_move(at(10.0, 0.0), 10),
        GestureEvent::DragStart { delta: -10.0 }
    );
}

#[test]
fn gesture_swipe_velocity_falls_back_to_average_after_jitter() {
    let mut g = GestureTracker::new(AxisGeometry::default());
    g.pointer_down(at(0.0, 0.0), 0);
    g.pointer_move(at(30.0, 0.0), 10);
    g.pointer_move(at(28.0, 0.0), 20);
    assert!(g.velocity() < 0.0);
    let Some(Release::Swipe { velocity }) = g.pointer_up(at(28.0, 0.0), 30) else {
        panic!("expected a swipe");
    };
    assert!((velocity - 28.0 / 30.0 * FRAME_MS).abs() < 1e-4);
}

#[test]
fn autoplay_steps_after_delay_and_respects_pauses() {
    let mut a = Autoplay::new(AutoplayOptions {
        delay_ms: 100,
        ..AutoplayOptions::default()
    });
    assert_eq!(a.tick(0), None);
    assert_eq!(a.tick(99), None);
    assert_eq!(a.tick(100), Some(AutoplayStep::Next));
    assert_eq!(a.tick(150), None);
    assert_eq!(a.tick(200), Some(AutoplayStep::Next));

    a.pause(PauseReason::Hover);
    a.pause(PauseReason::Focus);
    assert_eq!(a.tick(1000), None);
    a.resume(PauseReason::Hover, 1000);
    assert!(a.is_paused());
    assert_eq!(a.tick(2000), None);

    // Resuming starts a full delay.
    a.resume(PauseReason::Focus, 2000);
    assert!(a.is_running());
    assert_eq!(a.tick(2099), None);
    assert_eq!(a.tick(2100), Some(AutoplayStep::Next));
}

#[test]
fn autoplay_options_shape_the_timer() {
    let mut a = Autoplay::new(AutoplayOptions {
        delay_ms: 50,
        pause_on_hover: false,
        reverse: true,
        ..AutoplayOptions::default()
    });
    a.pause(PauseReason::Hover);
    assert!(!a.is_paused());
    a.tick(0);
    assert_eq!(a.tick(50), Some(AutoplayStep::Prev));

    let mut a = Autoplay::new(AutoplayOptions {
        delay_ms: 50,
        stop_on_interaction: true,
        ..AutoplayOptions::default()
    });
    a.tick(0);
    a.notify_interaction(10);
    assert!(a.is_stopped());
    assert_eq!(a.tick(100), None);
    a.start(100);
    assert_eq!(a.tick(149), None);
    assert_eq!(a.tick(150), Some(AutoplayStep::Next));
}

#[test]
fn inertia_driver_cancel_leaves_translate_in_place() {
    let mut c = Carousel::new(CarouselOptions::new(10).with_free_mode(true));
    c.set_container_size(100.0);
    assert!(c.begin_drag());
    c.drag_by(-10.0);
    let ReleaseOutcome::Inertia(inertia) = c.release(Release::Swipe { velocity: -40.0 }) else {
        panic!("free-mode swipe should glide");
    };

    let mut driver = InertiaDriver::new(inertia);
    let token = driver.token();
    assert!(driver.frame(&mut c));
    let after_first = c.translate();
    assert!(after_first < -10.0);

    token.cancel();
    assert!(token.is_cancelled());
    assert!(!driver.is_running());
    assert!(!driver.frame(&mut c));
    assert_eq!(c.translate(), after_first);
}

#[test]
fn controller_tween_drives_visual_translate() {
    let mut c = controller(CarouselOptions::new(5));
    assert!(c.next(0));
    assert_eq!(position(&c), Some(1));
    assert_eq!(c.carousel().translate(), -100.0);
    assert!(c.is_animating());

    let mut last = 0.0;
    for now_ms in [0u64, 10, 50, 150, 250, 300] {
        let v = c.tick(now_ms).unwrap();
        assert!(v <= last);
        last = v;
    }
    assert_eq!(last, -100.0);
    assert!(!c.is_animating());
    assert_eq!(c.tick(320), None);
    assert_eq!(c.transform_string(320), "translate3d(-100px, 0px, 0px)");
}

#[test]
fn controller_pointer_swipe_navigates() {
    let mut c = controller(CarouselOptions::new(5));
    c.pointer_down(at(100.0, 50.0), 0);
    assert!(c.pointer_move(at(90.0, 50.0), 10));
    assert!(c.carousel().is_dragging());
    assert!(c.pointer_move(at(70.0, 50.0), 20));
    assert_eq!(c.carousel().translate(), -30.0);

    let outcome = c.pointer_up(at(70.0, 50.0), 30);
    assert_eq!(outcome, ReleaseOutcome::Navigated { moved: true });
    assert_eq!(position(&c), Some(1));
    assert_eq!(c.visual_translate(30), -30.0);
    assert_eq!(c.tick(330), Some(-100.0));
}

#[test]
fn controller_slow_drag_settles_on_nearest() {
    let mut c = controller(CarouselOptions::new(5));
    c.pointer_down(at(100.0, 50.0), 0);
    c.pointer_move(at(40.0, 50.0), 100);
    assert_eq!(c.carousel().translate(), -60.0);
    assert_eq!(
        c.pointer_up(at(40.0, 50.0), 500),
        ReleaseOutcome::Settled { index: 1 }
    );
    assert_eq!(c.visual_translate(500), -60.0);
}

#[test]
fn controller_tap_during_tween_settles_from_screen_position() {
    let mut c = controller(CarouselOptions::new(5));
    c.next(0);
    c.pointer_down(at(50.0, 50.0), 150);
    // EaseOutCubic at half time.
    assert_eq!(c.carousel().translate(), -87.5);
    assert_eq!(c.pointer_up(at(50.0, 50.0), 160), ReleaseOutcome::Clicked);
    assert_eq!(position(&c), Some(1));
    assert_eq!(c.visual_translate(160), -87.5);
    assert_eq!(c.tick(460), Some(-100.0));
    assert_eq!(c.carousel().translate(), -100.0);
}

#[test]
fn controller_ignores_drags_when_not_draggable() {
    let mut c = controller(CarouselOptions::new(5).with_draggable(false));
    c.pointer_down(at(100.0, 0.0), 0);
    assert!(!c.pointer_move(at(50.0, 0.0), 10));
    assert_eq!(c.gesture().phase(), GesturePhase::Idle);
    assert_eq!(c.pointer_up(at(50.0, 0.0), 20), ReleaseOutcome::Ignored);
    assert_eq!(c.carousel().translate(), 0.0);
}

#[test]
fn controller_keyboard_follows_direction() {
    let mut c = controller(CarouselOptions::new(5).with_direction(Direction::Rtl));
    assert!(c.key(Key::ArrowLeft, 0));
    assert_eq!(position(&c), Some(1));
    assert!(c.key(Key::ArrowRight, 10));
    assert_eq!(position(&c), Some(0));
    assert!(!c.key(Key::ArrowUp, 20));
    assert!(c.key(Key::End, 30));
    assert_eq!(position(&c), Some(4));
    assert!(c.key(Key::Home, 40));
    assert_eq!(position(&c), Some(0));

    let mut c = controller(CarouselOptions::new(5).with_axis(Axis::Vertical));
    assert!(c.key(Key::ArrowDown, 0));
    assert_eq!(position(&c), Some(1));
    assert!(!c.key(Key::ArrowRight, 10));

    let mut c = controller(CarouselOptions::new(5).with_keyboard(false));
    assert!(!c.key(Key::ArrowRight, 0));
    assert_eq!(position(&c), Some(0));
}

#[test]
fn controller_wheel_is_debounced() {
    let mut c = controller(CarouselOptions::new(5));
    assert!(!c.wheel(10.0, 0));

    let mut c = controller(CarouselOptions::new(5).with_mouse_wheel(true));
    assert!(c.wheel(10.0, 0));
    assert_eq!(position(&c), Some(1));
    assert!(c.wheel(10.0, 100));
    assert_eq!(position(&c), Some(1));
    assert!(c.wheel(10.0, 400));
    assert_eq!(position(&c), Some(2));
    assert!(c.wheel(-5.0, 800));
    assert_eq!(position(&c), Some(1));
}

#[test]
fn controller_wheel_moves_freely_in_free_mode() {
    let mut c = controller(
        CarouselOptions::new(5)
            .with_free_mode(true)
            .with_mouse_wheel(true),
    );
    assert!(c.wheel(30.0, 0));
    assert_eq!(c.carousel().translate(), -30.0);
    assert!(c.wheel(-100.0, 10));
    assert_eq!(c.carousel().translate(), 0.0);
    assert!(!c.wheel(-10.0, 20));
}

#[test]
fn controller_free_swipe_glides_until_stopped() {
    let mut c = controller(CarouselOptions::new(10).with_free_mode(true));
    c.pointer_down(at(200.0, 0.0), 0);
    c.pointer_move(at(190.0, 0.0), 10);
    c.pointer_move(at(150.0, 0.0), 20);
    let outcome = c.pointer_up(at(150.0, 0.0), 30);
    assert!(matches!(outcome, ReleaseOutcome::Inertia(_)));
    assert!(c.is_animating());

    let mut now = 30;
    let mut frames = 0;
    while c.is_animating() {
        now += 16;
        frames += 1;
        assert!(frames < 1000, "inertia never stopped");
        let v = c.tick(now).unwrap();
        assert!(v >= -900.5 && v <= 0.5);
    }
    assert!(c.carousel().translate() < -100.0);
    let layout = c.carousel().layout();
    assert_eq!(
        position(&c),
        layout.nearest_index(c.carousel().translate())
    );
}

#[test]
fn controller_autoplay_advances_and_pauses_on_hover() {
    let mut c = controller(CarouselOptions::new(5).with_autoplay(Some(AutoplayOptions {
        delay_ms: 1000,
        ..AutoplayOptions::default()
    })));
    assert_eq!(c.tick(0), None);
    assert_eq!(c.tick(999), None);
    assert_eq!(c.tick(1000), Some(0.0));
    assert_eq!(position(&c), Some(1));

    c.hover(true, 1100);
    assert_eq!(c.tick(1300), Some(-100.0));
    assert_eq!(c.tick(5000), None);
    assert_eq!(position(&c), Some(1));

    c.hover(false, 5000);
    assert_eq!(c.tick(5999), None);
    assert!(c.tick(6000).is_some());
    assert_eq!(position(&c), Some(2));
}

#[test]
fn controller_user_navigation_stops_autoplay_when_configured() {
    let mut c = controller(CarouselOptions::new(5).with_autoplay(Some(AutoplayOptions {
        delay_ms: 100,
        stop_on_interaction: true,
        ..AutoplayOptions::default()
    })));
    c.tick(0);
    c.next(10);
    assert!(c.autoplay().is_some_and(|a| a.is_stopped()));
    c.cancel_animation();
    assert_eq!(c.tick(500), None);
    assert_eq!(position(&c), Some(1));
}

#[test]
fn controller_set_options_rebuilds_autoplay() {
    let mut c = controller(CarouselOptions::new(5));
    assert!(c.autoplay().is_none());
    c.set_options(CarouselOptions::new(5).with_autoplay(Some(AutoplayOptions::default())));
    assert!(c.autoplay().is_some());
    c.set_options(CarouselOptions::new(5));
    assert!(c.autoplay().is_none());
}
