//! Skill level count-up
//!
//! Counts a percentage from 0 to its level in fixed 16 ms steps once
//! triggered, after a per-row stagger. Sixty steps cover the whole range,
//! so every counter finishes in about a second regardless of its level.

/// Interval between count steps
pub const COUNT_STEP_MS: f32 = 16.0;

/// Steps taken to reach the full level
pub const COUNT_STEPS: u32 = 60;

/// Stagger between consecutive rows
pub const STAGGER_MS: f32 = 200.0;

#[derive(Clone, Copy, Debug, PartialEq)]
enum CounterPhase {
    /// Waiting for the visibility trigger
    Idle,
    /// Triggered, waiting out the stagger
    Delayed { remaining_ms: f32 },
    /// Counting; `steps` taken so far, `carry_ms` toward the next one
    Counting { steps: u32, carry_ms: f32 },
    Finished,
}

/// A percentage that counts up when its row becomes visible
#[derive(Clone, Debug)]
pub struct SkillCounter {
    level: u32,
    stagger_ms: f32,
    phase: CounterPhase,
}

impl SkillCounter {
    /// Counter for the `index`-th row, staggered by [`STAGGER_MS`] per row
    ///
    /// Levels above 100 are clamped.
    pub fn new(level: u32, index: usize) -> Self {
        Self {
            level: level.min(100),
            stagger_ms: STAGGER_MS * index as f32,
            phase: CounterPhase::Idle,
        }
    }

    /// Begin counting (the row scrolled into view)
    ///
    /// Ignored unless the counter is idle.
    pub fn start(&mut self) {
        if self.phase == CounterPhase::Idle {
            self.phase = CounterPhase::Delayed {
                remaining_ms: self.stagger_ms,
            };
        }
    }

    /// Advance by `dt_ms` milliseconds
    pub fn tick(&mut self, dt_ms: f32) {
        let mut dt = dt_ms.max(0.0);

        if let CounterPhase::Delayed { remaining_ms } = self.phase {
            if dt < remaining_ms {
                self.phase = CounterPhase::Delayed {
                    remaining_ms: remaining_ms - dt,
                };
                return;
            }
            dt -= remaining_ms;
            self.phase = CounterPhase::Counting {
                steps: 0,
                carry_ms: 0.0,
            };
        }

        if let CounterPhase::Counting { steps, carry_ms } = self.phase {
            let total = carry_ms + dt;
            let taken = (total / COUNT_STEP_MS).floor() as u32;
            let steps = steps.saturating_add(taken);
            self.phase = if steps >= COUNT_STEPS {
                CounterPhase::Finished
            } else {
                CounterPhase::Counting {
                    steps,
                    carry_ms: total - taken as f32 * COUNT_STEP_MS,
                }
            };
        }
    }

    /// Value shown next to the bar (floored while counting)
    pub fn displayed(&self) -> u32 {
        match self.phase {
            CounterPhase::Idle | CounterPhase::Delayed { .. } => 0,
            CounterPhase::Counting { steps, .. } => self.level * steps / COUNT_STEPS,
            CounterPhase::Finished => self.level,
        }
    }

    /// Bar fill as a fraction of its track
    pub fn fill(&self) -> f32 {
        self.displayed() as f32 / 100.0
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn is_counting(&self) -> bool {
        matches!(
            self.phase,
            CounterPhase::Delayed { .. } | CounterPhase::Counting { .. }
        )
    }

    pub fn is_finished(&self) -> bool {
        self.phase == CounterPhase::Finished
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_until_started() {
        let mut counter = SkillCounter::new(90, 0);
        counter.tick(10_000.0);
        assert_eq!(counter.displayed(), 0);
        assert!(!counter.is_counting());
    }

    #[test]
    fn test_counts_to_level() {
        let mut counter = SkillCounter::new(90, 0);
        counter.start();

        counter.tick(16.0);
        assert_eq!(counter.displayed(), 1); // 90 * 1 / 60
        counter.tick(16.0 * 29.0);
        assert_eq!(counter.displayed(), 45);
        assert!(counter.is_counting());

        counter.tick(16.0 * 30.0);
        assert_eq!(counter.displayed(), 90);
        assert!(counter.is_finished());
        assert_eq!(counter.fill(), 0.9);
    }

    #[test]
    fn test_stagger_by_index() {
        let mut counter = SkillCounter::new(60, 2);
        counter.start();

        counter.tick(399.0);
        assert_eq!(counter.displayed(), 0);
        assert!(counter.is_counting());

        // 1ms of stagger left, then 16ms of counting
        counter.tick(17.0);
        assert_eq!(counter.displayed(), 1);
    }

    #[test]
    fn test_uneven_ticks_match_even_ticks() {
        let mut even = SkillCounter::new(75, 1);
        let mut uneven = SkillCounter::new(75, 1);
        even.start();
        uneven.start();

        for _ in 0..40 {
            even.tick(16.0);
        }
        uneven.tick(5.0);
        uneven.tick(300.0);
        uneven.tick(335.0);

        assert_eq!(even.displayed(), uneven.displayed());
    }

    #[test]
    fn test_level_clamped_and_restart_ignored() {
        let mut counter = SkillCounter::new(150, 0);
        assert_eq!(counter.level(), 100);

        counter.start();
        counter.tick(2_000.0);
        assert!(counter.is_finished());
        counter.start();
        assert!(counter.is_finished());
    }
}
