//! Pure qualifier matching over registry items.
//!
//! Matching is conjunctive and evaluated in a fixed order: verification,
//! provider, relevance score, uptime. The first failing qualifier decides an
//! item's rejection; candidates are never ranked beyond input order.

use super::TrustQualifiers;
use crate::discovery::domain::RegistryItem;
use std::fmt;

/// Identifies one of the four mandatory qualifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QualifierKind {
    /// Exact verification marker match.
    Verified,
    /// Provider allow-list membership.
    Provider,
    /// Minimum relevance score.
    RelevanceScore,
    /// Minimum uptime.
    Uptime,
}

impl QualifierKind {
    /// Returns the qualifier name used in policy documents.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Verified => super::qualifier::VERIFIED,
            Self::Provider => super::qualifier::PROVIDER,
            Self::RelevanceScore => super::qualifier::RELEVANCE_SCORE,
            Self::Uptime => super::qualifier::UPTIME,
        }
    }
}

impl fmt::Display for QualifierKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Returns the first qualifier `item` fails, or `None` when it passes all.
#[must_use]
pub fn first_failing_qualifier(
    item: &RegistryItem,
    qualifiers: &TrustQualifiers,
) -> Option<QualifierKind> {
    if item.verified() != qualifiers.verified() {
        return Some(QualifierKind::Verified);
    }
    if !qualifiers.providers().permits(item.provider()) {
        return Some(QualifierKind::Provider);
    }
    if item.relevance_score() < qualifiers.min_relevance_score() {
        return Some(QualifierKind::RelevanceScore);
    }
    if item.uptime() < qualifiers.min_uptime() {
        return Some(QualifierKind::Uptime);
    }
    None
}

/// Returns whether `item` satisfies every mandatory qualifier.
#[must_use]
pub fn passes(item: &RegistryItem, qualifiers: &TrustQualifiers) -> bool {
    first_failing_qualifier(item, qualifiers).is_none()
}

/// Returns the first item, in input order, that satisfies every qualifier.
#[must_use]
pub fn first_match<'a>(
    items: &'a [RegistryItem],
    qualifiers: &TrustQualifiers,
) -> Option<&'a RegistryItem> {
    items.iter().find(|item| passes(item, qualifiers))
}
