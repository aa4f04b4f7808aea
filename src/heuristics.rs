//! Post-processing heuristics that suppress false-positive removals.
//!
//! A naive set difference misreports two legitimate refactors as breaking
//! changes:
//!
//! - **Relocation**: a member moved up to a base type still satisfies every
//!   caller, but it disappears from the subtype's member set.
//! - **Optional-parameter → overload**: replacing `M(a, b = x)` with
//!   explicit `M(a)` / `M(a, b)` overloads keeps every call site compiling,
//!   but the naive diff reports one removal and two additions.
//!
//! Both heuristics run over a reconciled method/constructor category and
//! only ever *drop* entries, never invent them. The overload heuristic
//! aborts conservatively when arity matching is ambiguous: a refactor the
//! engine cannot prove unique stays visible as raw add/remove entries.

use tracing::debug;

use crate::canon::member_display;
use crate::reconcile::{DiffStatus, MemberDiff};
use crate::snapshot::Snapshot;
use crate::symbol::{Member, TypeDef};

// ============================================================================
// Relocation
// ============================================================================

/// Suppress removals for members that moved up the new-version ancestor
/// chain.
///
/// For each removed member, walk the ancestors of the member's new-version
/// containing type. If any ancestor declares a member with an identical
/// display (ignoring the containing type), the removal is a non-event and
/// the entry is dropped from the removed set. Only the exact relocated
/// member is suppressed; an added member that merely shares its name and
/// parameter types stays visible. Overridden members never get here; they
/// are excluded during snapshot construction.
pub fn apply_relocation(
    diffs: &mut Vec<MemberDiff<'_>>,
    new_type: &TypeDef,
    new_snapshot: &Snapshot,
) {
    let ancestors = new_snapshot.base_chain(new_type);
    if ancestors.is_empty() {
        return;
    }

    let relocated: Vec<String> = diffs
        .iter()
        .filter(|d| d.status == DiffStatus::Removed)
        .filter_map(|d| {
            let member = d.member();
            let display_key = member_display(member);
            let moved = ancestors.iter().any(|ancestor| {
                ancestor
                    .members_of(member.kind)
                    .any(|base_member| member_display(base_member) == display_key)
            });
            if moved {
                debug!(member = %display_key, "suppressing removal: member relocated to a base type");
                Some(display_key)
            } else {
                None
            }
        })
        .collect();

    if relocated.is_empty() {
        return;
    }
    diffs.retain(|d| {
        d.status != DiffStatus::Removed || !relocated.contains(&member_display(d.member()))
    });
}

// ============================================================================
// Optional-parameter → overload refactor
// ============================================================================

/// Suppress the add/remove noise of an optional-parameter-to-overload
/// refactor.
///
/// For a removed member with at least one optional parameter, every arity
/// from the first optional position through the full parameter count must
/// resolve to exactly one new-set overload whose leading parameter types
/// match positionally. On success the removal and the matched overloads'
/// additions are all dropped; on any zero or multiple match the heuristic
/// aborts and the raw entries stand.
pub fn apply_overload_refactor(diffs: &mut Vec<MemberDiff<'_>>) {
    // Indices of entries to drop, collected before any mutation.
    let mut drop: Vec<usize> = Vec::new();

    for removed_idx in 0..diffs.len() {
        if diffs[removed_idx].status != DiffStatus::Removed {
            continue;
        }
        let removed = diffs[removed_idx].member();
        let Some(first_optional) = removed.first_optional_param() else {
            continue;
        };
        let overloads: Vec<(usize, &Member)> = diffs
            .iter()
            .enumerate()
            .filter(|(_, d)| d.new.is_some())
            .map(|(i, d)| (i, d.member()))
            .filter(|(_, m)| m.name == removed.name)
            .collect();
        if overloads.is_empty() {
            continue;
        }

        match match_arities(removed, first_optional, &overloads) {
            Some(matched) => {
                debug!(
                    member = %member_display(removed),
                    overloads = matched.len(),
                    "suppressing removal: optional parameters refactored to explicit overloads"
                );
                drop.push(removed_idx);
                for idx in matched {
                    if diffs[idx].status == DiffStatus::Added {
                        drop.push(idx);
                    }
                }
            }
            None => {
                debug!(
                    member = %member_display(removed),
                    "ambiguous overload refactor match, keeping raw add/remove entries"
                );
            }
        }
    }

    if drop.is_empty() {
        return;
    }
    let mut i = 0usize;
    diffs.retain(|_| {
        let retained = !drop.contains(&i);
        i += 1;
        retained
    });
}

/// Match every arity from `first_optional` through the full parameter count
/// against the new-set overloads. Returns the matched entry indices, or
/// `None` when any arity has zero or multiple candidates.
fn match_arities(
    removed: &Member,
    first_optional: usize,
    overloads: &[(usize, &Member)],
) -> Option<Vec<usize>> {
    let mut matched = Vec::new();
    for arity in first_optional..=removed.params.len() {
        let candidates: Vec<usize> = overloads
            .iter()
            .filter(|(_, m)| m.params.len() == arity)
            .filter(|(_, m)| {
                m.params
                    .iter()
                    .zip(&removed.params)
                    .take(arity)
                    .all(|(a, b)| a.type_name == b.type_name)
            })
            .map(|(i, _)| *i)
            .collect();
        match candidates.as_slice() {
            [single] => matched.push(*single),
            _ => return None,
        }
    }
    Some(matched)
}

// ============================================================================
// Tests
// ============================================================================
