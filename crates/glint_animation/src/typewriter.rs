//! Typewriter text reveal
//!
//! Reveals a string one character at a time after an initial delay, then
//! blinks a cursor. State is derived from total elapsed time, so ticking
//! with uneven frame times gives the same result as ticking evenly.

/// Default pause between characters
pub const DEFAULT_CHAR_INTERVAL_MS: f32 = 100.0;

/// Default cursor blink half-period once typing is done
pub const DEFAULT_BLINK_INTERVAL_MS: f32 = 500.0;

/// Timing for a typewriter
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TypewriterConfig {
    /// Wait before the first character starts typing
    pub delay_ms: f32,
    /// Time per character
    pub char_interval_ms: f32,
    /// Cursor toggle period after completion
    pub blink_interval_ms: f32,
}

impl Default for TypewriterConfig {
    fn default() -> Self {
        Self {
            delay_ms: 0.0,
            char_interval_ms: DEFAULT_CHAR_INTERVAL_MS,
            blink_interval_ms: DEFAULT_BLINK_INTERVAL_MS,
        }
    }
}

impl TypewriterConfig {
    pub fn with_delay(mut self, delay_ms: f32) -> Self {
        self.delay_ms = delay_ms.max(0.0);
        self
    }

    pub fn with_speed(mut self, char_interval_ms: f32) -> Self {
        self.char_interval_ms = char_interval_ms.max(0.0);
        self
    }
}

/// A string being typed out
#[derive(Clone, Debug)]
pub struct Typewriter {
    text: String,
    char_count: usize,
    config: TypewriterConfig,
    elapsed_ms: f32,
    revealed: usize,
}

impl Typewriter {
    pub fn new(text: impl Into<String>, config: TypewriterConfig) -> Self {
        let text = text.into();
        let char_count = text.chars().count();
        Self {
            text,
            char_count,
            config,
            elapsed_ms: 0.0,
            revealed: 0,
        }
    }

    /// Advance by `dt_ms` milliseconds
    pub fn tick(&mut self, dt_ms: f32) {
        self.elapsed_ms += dt_ms.max(0.0);
        self.revealed = self.revealed_at(self.elapsed_ms);
    }

    fn revealed_at(&self, elapsed_ms: f32) -> usize {
        let typing_ms = elapsed_ms - self.config.delay_ms;
        if typing_ms < 0.0 {
            return 0;
        }
        if self.config.char_interval_ms <= 0.0 {
            return self.char_count;
        }
        let typed = (typing_ms / self.config.char_interval_ms).floor() as usize;
        typed.min(self.char_count)
    }

    /// Moment the last character appears
    pub fn completion_ms(&self) -> f32 {
        self.config.delay_ms + self.config.char_interval_ms * self.char_count as f32
    }

    /// Text revealed so far
    pub fn visible_text(&self) -> &str {
        match self.text.char_indices().nth(self.revealed) {
            Some((byte, _)) => &self.text[..byte],
            None => &self.text,
        }
    }

    /// Number of characters revealed so far
    pub fn revealed(&self) -> usize {
        self.revealed
    }

    pub fn is_complete(&self) -> bool {
        self.revealed == self.char_count
    }

    /// Whether the cursor is drawn right now
    ///
    /// Solid while typing; toggles every blink interval once complete,
    /// starting visible.
    pub fn cursor_visible(&self) -> bool {
        if !self.is_complete() || self.config.blink_interval_ms <= 0.0 {
            return true;
        }
        let since = (self.elapsed_ms - self.completion_ms()).max(0.0);
        let toggles = (since / self.config.blink_interval_ms).floor() as u64;
        toggles % 2 == 0
    }

    /// Visible text with the cursor glyph appended when shown
    pub fn render(&self) -> String {
        let mut out = self.visible_text().to_string();
        if self.cursor_visible() {
            out.push('|');
        }
        out
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Start over from the first character
    pub fn restart(&mut self) {
        self.elapsed_ms = 0.0;
        self.revealed = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reveals_one_char_per_interval() {
        let mut tw = Typewriter::new("Hello", TypewriterConfig::default().with_speed(100.0));
        assert_eq!(tw.visible_text(), "");

        tw.tick(99.0);
        assert_eq!(tw.visible_text(), "");
        tw.tick(1.0);
        assert_eq!(tw.visible_text(), "H");
        tw.tick(250.0);
        assert_eq!(tw.visible_text(), "Hel");
        assert!(!tw.is_complete());

        tw.tick(1000.0);
        assert_eq!(tw.visible_text(), "Hello");
        assert!(tw.is_complete());
    }

    #[test]
    fn test_delay_before_typing() {
        let config = TypewriterConfig::default().with_delay(500.0).with_speed(50.0);
        let mut tw = Typewriter::new("ab", config);

        tw.tick(540.0);
        assert_eq!(tw.revealed(), 0);
        tw.tick(10.0);
        assert_eq!(tw.revealed(), 1);
        assert_eq!(tw.completion_ms(), 600.0);
    }

    #[test]
    fn test_multibyte_text() {
        let mut tw = Typewriter::new("héllo ✨", TypewriterConfig::default().with_speed(10.0));
        tw.tick(20.0);
        assert_eq!(tw.visible_text(), "hé");
        tw.tick(100.0);
        assert_eq!(tw.visible_text(), "héllo ✨");
    }

    #[test]
    fn test_cursor_blinks_after_completion() {
        let mut tw = Typewriter::new("ok", TypewriterConfig::default().with_speed(100.0));
        tw.tick(100.0);
        assert!(tw.cursor_visible());
        assert_eq!(tw.render(), "o|");

        tw.tick(100.0); // complete at 200ms
        assert!(tw.cursor_visible());
        tw.tick(500.0);
        assert!(!tw.cursor_visible());
        assert_eq!(tw.render(), "ok");
        tw.tick(500.0);
        assert!(tw.cursor_visible());
    }

    #[test]
    fn test_zero_speed_and_restart() {
        let mut tw = Typewriter::new("instant", TypewriterConfig::default().with_speed(0.0));
        tw.tick(0.0);
        assert!(tw.is_complete());

        tw.restart();
        assert_eq!(tw.revealed(), 0);
        assert_eq!(tw.text(), "instant");
    }
}
