//! Animation scheduler
//!
//! Owns every active intro animation and advances them each frame.
//! Animations are implicitly registered when created through wrapper types:
//! - `AnimatedText` - typewriter text reveals
//! - `AnimatedCounter` - staggered skill counters
//!
//! Wrappers hold a weak [`SchedulerHandle`] and unregister on drop, so a
//! component going away takes its animations with it.

use std::sync::{Arc, Mutex, MutexGuard, Weak};
use std::time::Duration;

use slotmap::{new_key_type, SlotMap};

use crate::counter::SkillCounter;
use crate::typewriter::{Typewriter, TypewriterConfig};

new_key_type! {
    /// Handle to a registered typewriter
    pub struct TypewriterId;
    /// Handle to a registered skill counter
    pub struct CounterId;
}

/// Internal state of the animation scheduler
struct SchedulerInner {
    typewriters: SlotMap<TypewriterId, Typewriter>,
    counters: SlotMap<CounterId, SkillCounter>,
    last_frame: Option<Duration>,
}

impl SchedulerInner {
    fn step(&mut self, dt_ms: f32) -> bool {
        for (_, typewriter) in self.typewriters.iter_mut() {
            typewriter.tick(dt_ms);
        }
        for (_, counter) in self.counters.iter_mut() {
            counter.tick(dt_ms);
        }

        // Finished animations stay registered until their wrapper drops,
        // so a completed typewriter keeps its blinking cursor.
        self.has_active()
    }

    fn has_active(&self) -> bool {
        self.typewriters.iter().any(|(_, t)| !t.is_complete())
            || self.counters.iter().any(|(_, c)| c.is_counting())
    }
}

fn millis(dt: Duration) -> f32 {
    dt.as_micros() as f32 / 1000.0
}

fn lock(inner: &Mutex<SchedulerInner>) -> MutexGuard<'_, SchedulerInner> {
    // Animation state stays usable even if a holder panicked mid-tick
    inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// The scheduler that ticks all registered intro animations
///
/// Typically owned by the page and shared with components via
/// [`SchedulerHandle`].
pub struct AnimationScheduler {
    inner: Arc<Mutex<SchedulerInner>>,
}

impl AnimationScheduler {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(SchedulerInner {
                typewriters: SlotMap::with_key(),
                counters: SlotMap::with_key(),
                last_frame: None,
            })),
        }
    }

    /// Get a handle to this scheduler for passing to components
    pub fn handle(&self) -> SchedulerHandle {
        SchedulerHandle {
            inner: Arc::downgrade(&self.inner),
        }
    }

    /// Advance every animation by `dt`
    ///
    /// Returns true if any animation is still in progress.
    pub fn tick(&self, dt: Duration) -> bool {
        lock(&self.inner).step(millis(dt))
    }

    /// Advance to the host frame time `now`
    ///
    /// The first call only records the time. Returns true if any animation
    /// is still in progress.
    pub fn tick_at(&self, now: Duration) -> bool {
        let mut inner = lock(&self.inner);
        let dt = match inner.last_frame {
            Some(last) => now.saturating_sub(last),
            None => Duration::ZERO,
        };
        inner.last_frame = Some(now);
        inner.step(millis(dt))
    }

    /// Check if any animations are still active
    pub fn has_active_animations(&self) -> bool {
        lock(&self.inner).has_active()
    }

    /// Get the number of registered typewriters
    pub fn typewriter_count(&self) -> usize {
        lock(&self.inner).typewriters.len()
    }

    /// Get the number of registered counters
    pub fn counter_count(&self) -> usize {
        lock(&self.inner).counters.len()
    }
}

impl Default for AnimationScheduler {
    fn default() -> Self {
        Self::new()
    }
}

/// A weak handle to the animation scheduler
///
/// This is passed to components that need to register animations.
/// It won't prevent the scheduler from being dropped; once it is, every
/// operation is a no-op.
#[derive(Clone)]
pub struct SchedulerHandle {
    inner: Weak<Mutex<SchedulerInner>>,
}

impl SchedulerHandle {
    // =========================================================================
    // Typewriter Operations
    // =========================================================================

    pub fn register_typewriter(&self, typewriter: Typewriter) -> Option<TypewriterId> {
        self.inner
            .upgrade()
            .map(|inner| lock(&inner).typewriters.insert(typewriter))
    }

    /// Read a typewriter's state
    pub fn with_typewriter<F, R>(&self, id: TypewriterId, f: F) -> Option<R>
    where
        F: FnOnce(&mut Typewriter) -> R,
    {
        let inner = self.inner.upgrade()?;
        let mut guard = lock(&inner);
        guard.typewriters.get_mut(id).map(f)
    }

    pub fn remove_typewriter(&self, id: TypewriterId) {
        if let Some(inner) = self.inner.upgrade() {
            lock(&inner).typewriters.remove(id);
        }
    }

    // =========================================================================
    // Counter Operations
    // =========================================================================

    pub fn register_counter(&self, counter: SkillCounter) -> Option<CounterId> {
        self.inner
            .upgrade()
            .map(|inner| lock(&inner).counters.insert(counter))
    }

    pub fn with_counter<F, R>(&self, id: CounterId, f: F) -> Option<R>
    where
        F: FnOnce(&mut SkillCounter) -> R,
    {
        let inner = self.inner.upgrade()?;
        let mut guard = lock(&inner);
        guard.counters.get_mut(id).map(f)
    }

    pub fn remove_counter(&self, id: CounterId) {
        if let Some(inner) = self.inner.upgrade() {
            lock(&inner).counters.remove(id);
        }
    }

    /// Check if the scheduler is still alive
    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }
}

// ============================================================================
// Animated Text
// ============================================================================

/// Typewriter text that registers itself with the scheduler
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use glint_animation::{AnimatedText, AnimationScheduler, TypewriterConfig};
///
/// let scheduler = AnimationScheduler::new();
/// let title = AnimatedText::new(scheduler.handle(), "Hi", TypewriterConfig::default());
///
/// scheduler.tick(Duration::from_millis(100));
/// assert_eq!(title.visible_text(), "H");
/// ```
pub struct AnimatedText {
    handle: SchedulerHandle,
    id: Option<TypewriterId>,
}

impl AnimatedText {
    pub fn new(handle: SchedulerHandle, text: impl Into<String>, config: TypewriterConfig) -> Self {
        let id = handle.register_typewriter(Typewriter::new(text, config));
        Self { handle, id }
    }

    /// Text revealed so far (empty if the scheduler is gone)
    pub fn visible_text(&self) -> String {
        self.read(|t| t.visible_text().to_string())
            .unwrap_or_default()
    }

    /// Visible text with the cursor glyph when shown
    pub fn render(&self) -> String {
        self.read(|t| t.render()).unwrap_or_default()
    }

    pub fn is_complete(&self) -> bool {
        self.read(|t| t.is_complete()).unwrap_or(true)
    }

    pub fn cursor_visible(&self) -> bool {
        self.read(|t| t.cursor_visible()).unwrap_or(false)
    }

    /// Type the text again from the start
    pub fn restart(&self) {
        self.read(|t| t.restart());
    }

    fn read<R>(&self, f: impl FnOnce(&mut Typewriter) -> R) -> Option<R> {
        self.id.and_then(|id| self.handle.with_typewriter(id, f))
    }
}

impl Drop for AnimatedText {
    fn drop(&mut self) {
        if let Some(id) = self.id {
            self.handle.remove_typewriter(id);
        }
    }
}

// ============================================================================
// Animated Counter
// ============================================================================

/// Skill counter that registers itself with the scheduler
pub struct AnimatedCounter {
    handle: SchedulerHandle,
    id: Option<CounterId>,
}

impl AnimatedCounter {
    pub fn new(handle: SchedulerHandle, level: u32, index: usize) -> Self {
        let id = handle.register_counter(SkillCounter::new(level, index));
        Self { handle, id }
    }

    /// Trigger the count-up
    pub fn start(&self) {
        self.read(|c| c.start());
    }

    pub fn displayed(&self) -> u32 {
        self.read(|c| c.displayed()).unwrap_or(0)
    }

    pub fn fill(&self) -> f32 {
        self.read(|c| c.fill()).unwrap_or(0.0)
    }

    pub fn is_finished(&self) -> bool {
        self.read(|c| c.is_finished()).unwrap_or(false)
    }

    fn read<R>(&self, f: impl FnOnce(&mut SkillCounter) -> R) -> Option<R> {
        self.id.and_then(|id| self.handle.with_counter(id, f))
    }
}

impl Drop for AnimatedCounter {
    fn drop(&mut self) {
        if let Some(id) = self.id {
            self.handle.remove_counter(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scheduler_tick() {
        let scheduler = AnimationScheduler::new();
        let text = AnimatedText::new(
            scheduler.handle(),
            "abc",
            TypewriterConfig::default().with_speed(10.0),
        );

        assert!(scheduler.tick(Duration::from_millis(10)));
        assert_eq!(text.visible_text(), "a");

        assert!(!scheduler.tick(Duration::from_millis(100)));
        assert!(text.is_complete());
        assert_eq!(text.visible_text(), "abc");
    }

    #[test]
    fn test_tick_at_uses_frame_deltas() {
        let scheduler = AnimationScheduler::new();
        let counter = AnimatedCounter::new(scheduler.handle(), 60, 0);
        counter.start();

        scheduler.tick_at(Duration::from_millis(1_000)); // records the time
        assert_eq!(counter.displayed(), 0);

        scheduler.tick_at(Duration::from_millis(1_160));
        assert_eq!(counter.displayed(), 10);
        assert!(scheduler.has_active_animations());

        scheduler.tick_at(Duration::from_millis(3_000));
        assert!(counter.is_finished());
        assert_eq!(counter.fill(), 0.6);
        assert!(!scheduler.has_active_animations());
    }

    #[test]
    fn test_wrappers_unregister_on_drop() {
        let scheduler = AnimationScheduler::new();
        {
            let _text = AnimatedText::new(scheduler.handle(), "x", TypewriterConfig::default());
            let _counter = AnimatedCounter::new(scheduler.handle(), 50, 0);
            assert_eq!(scheduler.typewriter_count(), 1);
            assert_eq!(scheduler.counter_count(), 1);
        }
        assert_eq!(scheduler.typewriter_count(), 0);
        assert_eq!(scheduler.counter_count(), 0);
    }

    #[test]
    fn test_handle_weak_reference() {
        let handle = {
            let scheduler = AnimationScheduler::new();
            scheduler.handle()
        };

        // Scheduler is dropped, handle should not be alive
        assert!(!handle.is_alive());

        // Operations should safely no-op
        assert!(handle
            .register_counter(SkillCounter::new(10, 0))
            .is_none());
        let text = AnimatedText::new(handle, "gone", TypewriterConfig::default());
        assert_eq!(text.visible_text(), "");
        assert!(text.is_complete());
    }

    #[test]
    fn test_restart_text() {
        let scheduler = AnimationScheduler::new();
        let text = AnimatedText::new(
            scheduler.handle(),
            "go",
            TypewriterConfig::default().with_speed(10.0),
        );
        scheduler.tick(Duration::from_millis(50));
        assert!(text.is_complete());

        text.restart();
        assert_eq!(text.render(), "|");
        assert!(scheduler.has_active_animations());
    }
}
