//! Feature flags for optional behaviour.

/// Feature flags controlling how input is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureFlags {
    /// Require both "who" and the stat/extremum keyword before a leaderboard
    /// or extremum rule fires. When disabled the stat keyword alone is
    /// enough, which is how the original prompt behaved.
    pub require_keyword_conjunction: bool,
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self::strict()
    }
}

impl FeatureFlags {
    /// Both keywords must be present.
    #[must_use]
    pub const fn strict() -> Self {
        Self {
            require_keyword_conjunction: true,
        }
    }

    /// Single stat keyword triggers a rule.
    #[must_use]
    pub const fn legacy() -> Self {
        Self {
            require_keyword_conjunction: false,
        }
    }
}
