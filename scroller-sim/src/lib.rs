use std::fmt::Write as _;
use std::rc::Rc;

use anyhow::{Context, Result};
use scroller_core::{
    AutoScroller, Direction, HeadlessHost, HeadlessSurface, ScrollDetail, ScrollerOptions,
};
use serde::Serialize;

/// Parameters of a headless run
#[derive(Debug, Clone)]
pub struct Simulation {
    pub scroll_height: f64,
    pub options: ScrollerOptions,
    pub ticks: usize,
    /// Fire a native scroll event after every n-th tick.
    pub scroll_every: Option<usize>,
}

/// State observed after one tick and its paint frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sample {
    pub tick: usize,
    pub elapsed_ms: u64,
    pub position: f64,
    pub direction: Direction,
    pub transform: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub notifications: Vec<ScrollDetail>,
}

pub fn simulate(simulation: &Simulation) -> Result<Vec<Sample>> {
    let host = Rc::new(HeadlessHost::new());
    let surface = HeadlessSurface::new(simulation.scroll_height);
    let options = ScrollerOptions {
        start: true,
        ..simulation.options.clone()
    };

    let scroller = AutoScroller::attach(Rc::clone(&host), surface.clone(), options)
        .context("Failed to attach scroller")?;
    let period = scroller.options().animator.tick_interval();
    log::info!(
        "Simulating {} ticks of {:?} over {}px of content",
        simulation.ticks,
        period,
        simulation.scroll_height
    );

    let mut samples = Vec::with_capacity(simulation.ticks);
    for tick in 1..=simulation.ticks {
        host.advance(period);
        host.flush_frames();

        if matches!(simulation.scroll_every, Some(every) if every > 0 && tick % every == 0) {
            surface.scroll();
        }

        let notifications = host
            .take_dispatched()
            .into_iter()
            .map(|(_, detail)| detail)
            .collect();

        samples.push(Sample {
            tick,
            elapsed_ms: host.now().as_millis() as u64,
            position: scroller.position(),
            direction: scroller.direction(),
            transform: surface.transform(),
            notifications,
        });
    }

    scroller.dispose();
    Ok(samples)
}

pub fn render_table(samples: &[Sample]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>6} {:>8} {:>10} {:>5}  transform",
        "tick", "ms", "position", "dir"
    );
    for sample in samples {
        let _ = write!(
            out,
            "{:>6} {:>8} {:>10.3} {:>5}  {}",
            sample.tick,
            sample.elapsed_ms,
            sample.position,
            sample.direction.as_str(),
            sample.transform
        );
        for detail in &sample.notifications {
            let _ = write!(
                out,
                "  -> scroll event position={} direction={}",
                detail.position,
                detail.direction.as_str()
            );
        }
        out.push('\n');
    }
    out
}

pub fn render_json(samples: &[Sample]) -> Result<String> {
    let mut out = String::new();
    for sample in samples {
        out.push_str(&serde_json::to_string(sample).context("Failed to encode sample")?);
        out.push('\n');
    }
    Ok(out)
}
