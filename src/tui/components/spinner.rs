//! Frame-cycling progress spinner driven by the session timer.

/// Braille spinner frames, advanced one step per animation tick.
const FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// A progress spinner with no timing of its own; the session posts ticks.
#[derive(Debug, Clone, Default)]
pub struct Spinner {
    frame: usize,
}

impl Spinner {
    /// Creates a spinner at its first frame.
    #[must_use]
    pub const fn new() -> Self {
        Self { frame: 0 }
    }

    /// Advances to the next frame.
    pub const fn advance(&mut self) {
        self.frame = (self.frame + 1) % FRAMES.len();
    }

    /// Returns the glyph for the current frame.
    #[must_use]
    pub fn frame(&self) -> &'static str {
        FRAMES.get(self.frame).copied().unwrap_or("⠋")
    }
}

#[cfg(test)]
mod tests {
    use super::{FRAMES, Spinner};

    #[test]
    fn advance_wraps_around() {
        let mut spinner = Spinner::new();
        for _ in 0..FRAMES.len() {
            spinner.advance();
        }
        assert_eq!(spinner.frame(), FRAMES[0]);
    }
}
