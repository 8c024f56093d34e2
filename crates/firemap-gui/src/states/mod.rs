mod ui;

pub use ui::{UIState, ViewMode};
