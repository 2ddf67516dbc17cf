use std::rc::Rc;
use std::time::Duration;

use scroller_core::{
    AnimatorConfig, AutoScroller, Direction, HeadlessHost, HeadlessSurface, ScrollerError,
    ScrollerOptions, DEFAULT_EVENT_NAME,
};

const TICK: Duration = Duration::from_millis(16);

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn attach(
    scroll_height: f64,
    options: ScrollerOptions,
) -> (Rc<HeadlessHost>, HeadlessSurface, AutoScroller<HeadlessHost, HeadlessSurface>) {
    init_logging();
    let host = Rc::new(HeadlessHost::new());
    let surface = HeadlessSurface::new(scroll_height);
    let scroller = AutoScroller::attach(Rc::clone(&host), surface.clone(), options).unwrap();
    (host, surface, scroller)
}

#[test]
fn test_attach_starts_by_default() {
    let (host, surface, scroller) = attach(300.0, ScrollerOptions::default());

    assert!(scroller.is_running());
    assert_eq!(host.active_intervals(), 1);
    assert_eq!(surface.listener_count(), 1);
    assert_eq!(scroller.direction(), Direction::Descending);
}

#[test]
fn test_paused_attach_does_not_tick() {
    let (host, _surface, scroller) = attach(300.0, ScrollerOptions::default().paused());

    assert!(!scroller.is_running());
    assert_eq!(host.advance(TICK * 10), 0);
    assert_eq!(scroller.position(), 0.0);
}

#[test]
fn test_first_tick_moves_half_pixel() {
    let options = ScrollerOptions::default()
        .with_animator(AnimatorConfig::default().with_speed_units(1.0));
    let (host, surface, scroller) = attach(300.0, options);

    assert_eq!(host.advance(TICK), 1);
    assert_eq!(scroller.position(), 0.5);

    // painting lags until the frame runs
    assert_eq!(surface.offset(), 0.0);
    assert_eq!(host.flush_frames(), 1);
    assert_eq!(surface.transform(), "translateY(-0.5px)");
}

#[test]
fn test_full_cycle_stays_in_bounds() {
    let (host, surface, scroller) = attach(300.0, ScrollerOptions::default());
    let mut seen_ascending = false;

    for _ in 0..400 {
        host.advance(TICK);
        host.flush_frames();
        let position = scroller.position();
        assert!((0.0..=100.0).contains(&position));
        assert_eq!(surface.offset(), position);
        seen_ascending |= scroller.direction() == Direction::Ascending;
    }

    assert!(seen_ascending);
}

#[test]
fn test_start_is_idempotent() {
    let (host, _surface, mut scroller) = attach(300.0, ScrollerOptions::default());

    assert_eq!(scroller.start(), Ok(false));
    assert_eq!(host.active_intervals(), 1);

    host.advance(TICK);
    assert_eq!(scroller.position(), 0.5);
}

#[test]
fn test_stop_freezes_position() {
    let (host, _surface, mut scroller) = attach(300.0, ScrollerOptions::default());
    host.advance(TICK * 4);
    let frozen = scroller.position();

    assert!(scroller.stop());
    assert!(!scroller.stop());
    host.advance(TICK * 20);

    assert_eq!(scroller.position(), frozen);
    assert_eq!(host.active_intervals(), 0);

    assert_eq!(scroller.start(), Ok(true));
    host.advance(TICK);
    assert_eq!(scroller.position(), frozen + 0.5);
}

#[test]
fn test_dispose_cancels_timer_and_listener() {
    let (host, surface, scroller) = attach(300.0, ScrollerOptions::default());
    host.advance(TICK);

    scroller.dispose();

    assert_eq!(host.active_intervals(), 0);
    assert_eq!(surface.listener_count(), 0);
    assert_eq!(host.advance(TICK * 10), 0);
    assert!(host.dispatched().is_empty());
}

#[test]
fn test_drop_cancels_timer() {
    let (host, surface, scroller) = attach(300.0, ScrollerOptions::default());
    drop(scroller);

    assert_eq!(host.active_intervals(), 0);
    assert_eq!(surface.listener_count(), 0);
}

#[test]
fn test_ticks_never_dispatch() {
    let (host, _surface, _scroller) = attach(300.0, ScrollerOptions::default());
    host.advance(TICK * 100);
    host.flush_frames();

    assert!(host.dispatched().is_empty());
}

#[test]
fn test_native_scroll_dispatches_detail() {
    let (host, surface, _scroller) = attach(3000.0, ScrollerOptions::default());
    host.advance(TICK * 4);

    let event = surface.scroll();

    assert!(event.default_prevented());
    assert!(event.propagation_stopped());

    let dispatched = host.take_dispatched();
    assert_eq!(dispatched.len(), 1);
    let (name, detail) = &dispatched[0];
    assert_eq!(name, DEFAULT_EVENT_NAME);
    assert_eq!(detail.position, 0.02);
    assert_eq!(detail.direction, Direction::Descending);
}

#[test]
fn test_no_propagation_keeps_event_bubbling() {
    let options = ScrollerOptions {
        stop_propagation: false,
        event_name: "feed-scroll".to_string(),
        ..ScrollerOptions::default()
    };
    let (host, surface, _scroller) = attach(300.0, options);

    let event = surface.scroll();

    assert!(event.default_prevented());
    assert!(!event.propagation_stopped());
    assert_eq!(host.dispatched()[0].0, "feed-scroll");
}

#[test]
fn test_scroll_reports_ascending_after_bound() {
    let (host, surface, scroller) = attach(300.0, ScrollerOptions::default());
    host.advance(TICK * 201);
    assert_eq!(scroller.direction(), Direction::Ascending);

    surface.scroll();
    let dispatched = host.dispatched();
    assert_eq!(dispatched[0].1.direction, Direction::Ascending);
    assert_eq!(dispatched[0].1.position, 0.84);
}

#[test]
fn test_attach_rejects_missing_geometry() {
    let host = Rc::new(HeadlessHost::new());
    let result = AutoScroller::attach(
        host.clone(),
        HeadlessSurface::without_geometry(),
        ScrollerOptions::default(),
    );

    assert!(matches!(result, Err(ScrollerError::MissingScrollGeometry)));
    assert_eq!(host.active_intervals(), 0);
}

#[test]
fn test_attach_rejects_bad_speed() {
    let host = Rc::new(HeadlessHost::new());
    let options = ScrollerOptions::default()
        .with_animator(AnimatorConfig::default().with_speed_units(-2.0));
    let result = AutoScroller::attach(host, HeadlessSurface::new(300.0), options);

    assert!(matches!(result, Err(ScrollerError::InvalidSpeed(_))));
}

#[test]
fn test_resized_content_changes_bound() {
    let options = ScrollerOptions::default()
        .with_animator(AnimatorConfig::default().with_speed_units(100.0));
    let (host, surface, scroller) = attach(300.0, options);

    host.advance(TICK * 2);
    assert_eq!(scroller.position(), 100.0);

    surface.set_scroll_height(Some(600.0));
    host.advance(TICK * 2);
    assert_eq!(scroller.position(), 200.0);
}

#[test]
fn test_lost_geometry_keeps_last_bound() {
    let options = ScrollerOptions::default()
        .with_animator(AnimatorConfig::default().with_speed_units(100.0));
    let (host, surface, scroller) = attach(300.0, options);

    surface.set_scroll_height(None);
    host.advance(TICK * 5);

    assert!((0.0..=100.0).contains(&scroller.position()));
    assert_eq!(host.active_intervals(), 1);
}

#[test]
fn test_retarget_moves_listener() {
    let (host, first, mut scroller) = attach(300.0, ScrollerOptions::default());
    let second = HeadlessSurface::new(900.0);

    scroller.retarget(second.clone()).unwrap();
    assert_eq!(first.listener_count(), 0);
    assert_eq!(second.listener_count(), 1);

    host.advance(TICK);
    host.flush_frames();
    assert_eq!(second.offset(), 0.5);
    assert_eq!(first.offset(), 0.0);

    first.scroll();
    assert!(host.dispatched().is_empty());
    second.scroll();
    assert_eq!(host.dispatched().len(), 1);
}

#[test]
fn test_retarget_rejects_missing_geometry() {
    let (_host, first, mut scroller) = attach(300.0, ScrollerOptions::default());

    let result = scroller.retarget(HeadlessSurface::without_geometry());

    assert_eq!(result, Err(ScrollerError::MissingScrollGeometry));
    assert_eq!(first.listener_count(), 1);
}

#[test]
fn test_custom_interval() {
    let options = ScrollerOptions::default()
        .with_animator(AnimatorConfig::default().with_tick_interval_ms(40));
    let (host, _surface, scroller) = attach(300.0, options);

    assert_eq!(host.advance(Duration::from_millis(100)), 2);
    assert_eq!(scroller.position(), 1.0);
}

#[test]
fn test_failed_retarget_keeps_current_surface() {
    let (host, first, mut scroller) = attach(300.0, ScrollerOptions::default());
    let refusing = HeadlessSurface::new(900.0);
    refusing.reject_listeners(true);

    let result = scroller.retarget(refusing.clone());

    assert_eq!(result, Err(ScrollerError::host("scroll listener rejected")));
    assert_eq!(first.listener_count(), 1);
    assert_eq!(refusing.listener_count(), 0);

    host.advance(TICK);
    host.flush_frames();
    assert_eq!(first.offset(), 0.5);
    assert_eq!(refusing.offset(), 0.0);

    first.scroll();
    assert_eq!(host.dispatched().len(), 1);
}

#[test]
fn test_retarget_rejects_invalid_height() {
    let (_host, first, mut scroller) = attach(300.0, ScrollerOptions::default());
    let broken = HeadlessSurface::new(f64::NAN);

    let result = scroller.retarget(broken.clone());

    assert!(matches!(result, Err(ScrollerError::InvalidScrollHeight(_))));
    assert_eq!(first.listener_count(), 1);
    assert_eq!(broken.listener_count(), 0);
}
