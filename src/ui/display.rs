//! Display surfaces the calculator renders to.

/// Anything that can show the calculator readout.
pub trait DisplaySurface {
    /// Show `text`, replacing whatever was shown before.
    fn render(&mut self, text: &str);
}

impl<D: DisplaySurface + ?Sized> DisplaySurface for &mut D {
    fn render(&mut self, text: &str) {
        (**self).render(text);
    }
}

/// A surface that remembers every frame it was asked to show.
///
/// Used by the scripted front-end to print a trace, and by tests.
#[derive(Clone, Debug, Default)]
pub struct RecordingDisplay {
    frames: Vec<String>,
}

impl RecordingDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    /// All rendered frames, oldest first.
    pub fn frames(&self) -> &[String] {
        &self.frames
    }

    /// The frame currently shown.
    pub fn current(&self) -> Option<&str> {
        self.frames.last().map(String::as_str)
    }
}

impl DisplaySurface for RecordingDisplay {
    fn render(&mut self, text: &str) {
        self.frames.push(text.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_display() {
        let mut display = RecordingDisplay::new();
        assert_eq!(display.current(), None);
        display.render("0");
        display.render("12");
        assert_eq!(display.frames(), ["0", "12"]);
        assert_eq!(display.current(), Some("12"));
    }

    #[test]
    fn test_render_through_reference() {
        fn show<S: DisplaySurface>(mut surface: S) {
            surface.render("7");
        }

        let mut display = RecordingDisplay::new();
        show(&mut display);
        assert_eq!(display.current(), Some("7"));
    }
}
