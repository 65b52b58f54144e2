/// Log tags scope messages to the subsystem that emitted them.
///
/// Tags double as debug keys: `TOKENDECK_DEBUG=filtering,viewport` unlocks
/// debug-level output for exactly those subsystems.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogTag {
    System,
    Storage,
    Config,
    Filtering,
    Trends,
    History,
    Viewport,
}

impl LogTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogTag::System => "SYSTEM",
            LogTag::Storage => "STORAGE",
            LogTag::Config => "CONFIG",
            LogTag::Filtering => "FILTERING",
            LogTag::Trends => "TRENDS",
            LogTag::History => "HISTORY",
            LogTag::Viewport => "VIEWPORT",
        }
    }

    /// Lowercase key used in TOKENDECK_DEBUG lists.
    pub fn to_debug_key(&self) -> String {
        self.as_str().to_lowercase()
    }
}

impl std::fmt::Display for LogTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
