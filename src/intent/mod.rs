//! Intent resolution.
//!
//! Maps a free-text line to one of a fixed set of [`Intent`]s.
//!
//! # Resolution Order
//!
//! | Rule | Matches | Intent |
//! |------|---------|--------|
//! | empty | blank input | [`Intent::Empty`] |
//! | exit | `exit`, `e` (any case) | [`Intent::Exit`] |
//! | help | `help`, `?` | [`Intent::Help`] |
//! | leaderboard | `who` + `points`/`assists`/`rebounds` | [`Intent::Leaderboard`] |
//! | extremum | `who` + `tallest`/`shortest` | [`Intent::Extremum`] |
//! | player name | catalog player name, any case | [`Intent::Player`] |
//! | team name | catalog team name, any case | [`Intent::Team`] |
//!
//! Anything else is [`Intent::Invalid`]. With
//! [`FeatureFlags::require_keyword_conjunction`] off, the `who` requirement
//! is dropped.
//!
//! # Example
//!
//! ```rust
//! use hoopgraph::{FeatureFlags, Intent, IntentResolver, NameCatalog, Stat};
//!
//! let catalog = NameCatalog::from_names(["LeBron James"], ["Los Angeles Lakers"]);
//! let resolver = IntentResolver::new(catalog, FeatureFlags::default());
//!
//! assert_eq!(
//!     resolver.resolve("Who has the most   POINTS"),
//!     Intent::Leaderboard(Stat::Points)
//! );
//! assert!(matches!(resolver.resolve("lebron james"), Intent::Player { .. }));
//! ```

mod catalog;
mod keyword;
mod normalize;
mod types;

pub use catalog::NameCatalog;
pub use keyword::{RULES, Rule, RuleInput};
pub use normalize::{normalize, title_case};
pub use types::{Extremum, Intent, Stat};

use crate::config::FeatureFlags;

/// Classifies input lines against a fixed catalog and flag set.
#[derive(Debug, Clone, Default)]
pub struct IntentResolver {
    catalog: NameCatalog,
    flags: FeatureFlags,
}

impl IntentResolver {
    /// Creates a resolver.
    #[must_use]
    pub const fn new(catalog: NameCatalog, flags: FeatureFlags) -> Self {
        Self { catalog, flags }
    }

    /// The names this resolver matches against.
    #[must_use]
    pub const fn catalog(&self) -> &NameCatalog {
        &self.catalog
    }

    /// Classifies one line of input.
    #[must_use]
    pub fn resolve(&self, input: &str) -> Intent {
        let normalized = normalize(input);
        let lower = normalized.to_lowercase();
        let (rule, intent) = keyword::apply_rules(&RuleInput {
            normalized: &normalized,
            lower: &lower,
            catalog: &self.catalog,
            flags: &self.flags,
        });
        tracing::debug!(rule, intent = intent.kind(), input = %normalized, "Resolved intent");
        intent
    }
}
