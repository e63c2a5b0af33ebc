/// Tunables for a [`PathFinder`](crate::PathFinder).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SearchConfig {
    /// Upper bound on the number of cells expanded in one run. `None` lets
    /// the search run until it finds the goal or exhausts the frontier.
    pub max_expansions: Option<usize>,
}

impl SearchConfig {
    /// Cap the number of expansions per run (builder).
    #[inline]
    pub const fn with_max_expansions(mut self, limit: usize) -> Self {
        self.max_expansions = Some(limit);
        self
    }
}
