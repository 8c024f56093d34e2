use std::fmt;
use std::path::PathBuf;

/// Which map fills the central panel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ViewMode {
    #[default]
    RiskMap,
    Heatmap,
}

impl ViewMode {
    pub const ALL: &[Self] = &[Self::RiskMap, Self::Heatmap];
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RiskMap => write!(f, "Risk Map"),
            Self::Heatmap => write!(f, "Geo Heatmap"),
        }
    }
}

/// Overall UI state.
#[derive(Default)]
pub struct UIState {
    pub view: ViewMode,

    /// Where the current entity fixtures came from (None = built-in sample).
    pub fixtures_path: Option<PathBuf>,

    /// Heatmap date field, parsed on reload.
    pub date_input: String,

    /// Log messages.
    pub log_messages: Vec<String>,
}

impl UIState {
    pub fn new(date_input: String) -> Self {
        Self {
            date_input,
            ..Default::default()
        }
    }

    pub fn add_log(&mut self, msg: String) {
        self.log_messages.push(msg);
    }
}
