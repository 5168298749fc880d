pub mod display;
pub mod terminal;
pub mod widget;

pub use display::{DisplaySurface, RecordingDisplay};
pub use terminal::{TerminalDisplay, run_interactive};
pub use widget::Calculator;
