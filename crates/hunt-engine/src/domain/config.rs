//! Engine configuration.

/// Tunables for the engine's read surfaces.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Leaderboard page size when the caller supplies none.
    pub default_page_limit: usize,
    /// Hard cap on a requested leaderboard page size.
    pub max_page_limit: usize,
    /// How many recent scans the stats report includes.
    pub recent_scan_window: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            default_page_limit: 100,
            max_page_limit: 500,
            recent_scan_window: 5,
        }
    }
}

impl GameConfig {
    /// Clamps a requested page limit into `[1, max_page_limit]`, falling
    /// back to the default when absent or zero.
    pub fn clamp_limit(&self, requested: Option<usize>) -> usize {
        match requested {
            None | Some(0) => self.default_page_limit,
            Some(n) => n.min(self.max_page_limit),
        }
    }
}
