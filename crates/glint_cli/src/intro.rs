//! Terminal preview of the page intro animations

use std::time::Duration;

use anyhow::Result;
use glint_animation::{AnimatedCounter, AnimatedText, AnimationScheduler, TypewriterConfig};

/// Skills shown under the headline
pub const SKILLS: [(&str, u32); 3] = [
    ("Web Design", 95),
    ("Frontend Development", 90),
    ("Creative Strategy", 85),
];

/// Width of a rendered skill bar in characters
const BAR_WIDTH: usize = 20;

/// Render a skill bar as text
pub fn skill_bar(name: &str, counter: &AnimatedCounter) -> String {
    let filled = (counter.fill() * BAR_WIDTH as f32).round() as usize;
    format!(
        "{:<22} [{}{}] {:>3}%",
        name,
        "#".repeat(filled.min(BAR_WIDTH)),
        " ".repeat(BAR_WIDTH - filled.min(BAR_WIDTH)),
        counter.displayed()
    )
}

/// Step the intro for `duration_ms` and print a snapshot every `step_ms`
pub fn run(text: &str, duration_ms: u64, step_ms: u64) -> Result<Vec<String>> {
    if step_ms == 0 {
        anyhow::bail!("step must be at least 1ms");
    }

    let scheduler = AnimationScheduler::new();
    let headline = AnimatedText::new(
        scheduler.handle(),
        text,
        TypewriterConfig::default().with_delay(500.0),
    );
    let counters: Vec<(&str, AnimatedCounter)> = SKILLS
        .iter()
        .enumerate()
        .map(|(index, (name, level))| {
            (*name, AnimatedCounter::new(scheduler.handle(), *level, index))
        })
        .collect();

    // The skills section is visible from the start
    for (_, counter) in &counters {
        counter.start();
    }

    let mut snapshots = Vec::new();
    let mut elapsed = 0;
    while elapsed <= duration_ms {
        let mut frame = format!("[{:>5}ms] {}", elapsed, headline.render());
        for (name, counter) in &counters {
            frame.push_str("\n           ");
            frame.push_str(&skill_bar(name, counter));
        }
        println!("{}\n", frame);
        snapshots.push(frame);

        scheduler.tick(Duration::from_millis(step_ms));
        elapsed += step_ms;
    }

    tracing::debug!(
        "Intro preview done (text complete: {}, animations active: {})",
        headline.is_complete(),
        scheduler.has_active_animations()
    );
    Ok(snapshots)
}
