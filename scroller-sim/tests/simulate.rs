use scroller_core::{AnimatorConfig, Direction, ScrollerOptions};
use scroller_sim::{simulate, Simulation};

fn simulation(scroll_height: f64, ticks: usize) -> Simulation {
    Simulation {
        scroll_height,
        options: ScrollerOptions::default()
            .with_animator(AnimatorConfig::default().with_speed_units(1.0)),
        ticks,
        scroll_every: None,
    }
}

#[test]
fn test_trace_follows_one_full_bounce() {
    let samples = simulate(&simulation(300.0, 208)).unwrap();

    assert_eq!(samples.len(), 208);
    assert_eq!(samples[0].position, 0.5);
    assert_eq!(samples[0].elapsed_ms, 16);
    assert_eq!(samples[0].transform, "translateY(-0.5px)");

    assert_eq!(samples[199].position, 100.0);
    assert_eq!(samples[200].position, 84.0);
    assert_eq!(samples[200].direction, Direction::Ascending);
    assert_eq!(samples[206].position, 0.0);
    assert_eq!(samples[207].position, 0.5);
    assert_eq!(samples[207].direction, Direction::Descending);

    assert!(samples.iter().all(|s| (0.0..=100.0).contains(&s.position)));
}

#[test]
fn test_notifications_only_on_scroll_events() {
    let quiet = simulate(&simulation(300.0, 50)).unwrap();
    assert!(quiet.iter().all(|s| s.notifications.is_empty()));

    let mut noisy = simulation(300.0, 50);
    noisy.scroll_every = Some(10);
    let samples = simulate(&noisy).unwrap();

    let with_events: Vec<_> = samples
        .iter()
        .filter(|s| !s.notifications.is_empty())
        .map(|s| s.tick)
        .collect();
    assert_eq!(with_events, vec![10, 20, 30, 40, 50]);
    assert_eq!(samples[9].notifications[0].position, 0.05);
}

#[test]
fn test_paused_options_still_run() {
    let mut paused = simulation(300.0, 3);
    paused.options = paused.options.paused();

    let samples = simulate(&paused).unwrap();
    assert_eq!(samples[2].position, 1.5);
}

#[test]
fn test_invalid_geometry_fails() {
    let error = simulate(&simulation(-10.0, 3)).unwrap_err();
    assert!(format!("{:#}", error).contains("scroll height must be finite"));
}
