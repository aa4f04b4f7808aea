//! Visibility filter: decides which symbols participate in comparison.
//!
//! The filter is applied once, during snapshot construction, to both the old
//! and new inputs. Because both sides pass through the same immutable
//! [`VisibilityConfig`], a visibility setting can never produce a spurious
//! add/remove in the diff.
//!
//! A property accessor is independently visible only if it exists *and*
//! itself passes the filter; a property whose setter is filtered out is
//! treated as read-only for diff purposes.

use crate::config::VisibilityConfig;
use crate::symbol::{Accessibility, HasAccessibility, Member, MemberKind};

/// Whether a declared accessibility participates in comparison.
///
/// Protected and protected-internal members are always part of the surface:
/// they are reachable by subtypes outside the assembly. Private-protected
/// counts as private, the narrowest level it is bounded by.
pub fn accessibility_visible(acc: Accessibility, config: &VisibilityConfig) -> bool {
    match acc {
        Accessibility::Public | Accessibility::Protected | Accessibility::ProtectedInternal => true,
        Accessibility::Internal => config.include_internal,
        Accessibility::Private | Accessibility::PrivateProtected => config.include_private,
    }
}

/// Whether a symbol participates in comparison.
pub fn symbol_visible<S: HasAccessibility>(symbol: &S, config: &VisibilityConfig) -> bool {
    accessibility_visible(symbol.accessibility(), config)
}

/// Effective accessibility of a property accessor after filtering.
///
/// Returns `None` when the accessor is absent or invisible under the
/// configuration, which normalizes a property with a filtered setter to
/// read-only.
pub fn effective_accessor(
    accessor: Option<Accessibility>,
    config: &VisibilityConfig,
) -> Option<Accessibility> {
    accessor.filter(|acc| accessibility_visible(*acc, config))
}

/// Whether a member survives filtering for snapshot inclusion.
///
/// Besides the accessibility check, overridden members are excluded
/// entirely: an override never re-introduces the inherited contract as a
/// separate entity, and keeping them would poison both the set difference
/// and the relocation heuristic.
pub fn member_included(member: &Member, config: &VisibilityConfig) -> bool {
    if member.is_override {
        return false;
    }
    // Enum constants carry no meaningful accessibility of their own.
    if member.kind == MemberKind::EnumConstant {
        return true;
    }
    symbol_visible(member, config)
}
