//! Generic set reconciliation: added/removed/obsoleted/unchanged per member
//! category.
//!
//! One algorithm serves every category. The category's canon supplies the
//! identity key (hash-index bucket) and the equivalence relation (full match
//! within a bucket), so set difference is O(n) in the number of members, not
//! a pairwise scan.
//!
//! Output ordering is fixed: methods and constructors sort by member name
//! then joined parameter names; every other category sorts by member name.
//! The display key and status break any remaining ties so repeated runs over
//! an unordered provider stream produce byte-identical results.

use std::collections::HashMap;

use serde::Serialize;

use crate::canon::{canon_for, member_display, MemberCanon};
use crate::symbol::{Member, MemberKind};

// ============================================================================
// Diff entries
// ============================================================================

/// Change status of one diff entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffStatus {
    Added,
    Removed,
    Obsoleted,
    Unchanged,
}

impl DiffStatus {
    fn rank(self) -> u8 {
        match self {
            DiffStatus::Added => 0,
            DiffStatus::Removed => 1,
            DiffStatus::Obsoleted => 2,
            DiffStatus::Unchanged => 3,
        }
    }
}

/// One member paired across snapshots with its change status.
///
/// Invariants: at least one side is present; `Added` has no old side,
/// `Removed` has no new side, `Obsoleted` and `Unchanged` have both.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct MemberDiff<'a> {
    /// The member in the new snapshot, if present there.
    pub new: Option<&'a Member>,
    /// The matched member in the old snapshot, if present there.
    pub old: Option<&'a Member>,
    /// Change status.
    pub status: DiffStatus,
}

impl<'a> MemberDiff<'a> {
    /// The representative member: the new side when present, otherwise the
    /// old side.
    pub fn member(&self) -> &'a Member {
        self.new
            .or(self.old)
            .unwrap_or_else(|| unreachable!("diff entry with neither side"))
    }
}

// ============================================================================
// Reconciliation
// ============================================================================

fn index_by_identity<'a>(
    items: &[&'a Member],
    canon: &dyn MemberCanon,
) -> HashMap<String, Vec<&'a Member>> {
    let mut index: HashMap<String, Vec<&'a Member>> = HashMap::with_capacity(items.len());
    for m in items {
        index.entry(canon.identity(m)).or_default().push(m);
    }
    index
}

fn find_equivalent<'a>(
    index: &HashMap<String, Vec<&'a Member>>,
    member: &Member,
    canon: &dyn MemberCanon,
) -> Option<&'a Member> {
    index
        .get(&canon.identity(member))
        .and_then(|bucket| bucket.iter().find(|c| canon.equivalent(member, c)))
        .copied()
}

/// Reconcile one member category across two snapshots.
///
/// Every member of both sets appears in the result exactly once:
/// - in `new` but not `old` (under the canon) → `Added`
/// - in `old` but not `new` → `Removed`
/// - matched, deprecation flag newly set → `Obsoleted`
/// - matched otherwise → `Unchanged`
pub fn reconcile<'a>(
    kind: MemberKind,
    new_items: &[&'a Member],
    old_items: &[&'a Member],
) -> Vec<MemberDiff<'a>> {
    let canon = canon_for(kind);
    let old_index = index_by_identity(old_items, canon);
    let new_index = index_by_identity(new_items, canon);

    let mut result = Vec::with_capacity(new_items.len() + old_items.len());
    for &m in new_items {
        match find_equivalent(&old_index, m, canon) {
            None => result.push(MemberDiff {
                new: Some(m),
                old: None,
                status: DiffStatus::Added,
            }),
            Some(old) => {
                let status = if m.is_deprecated && !old.is_deprecated {
                    DiffStatus::Obsoleted
                } else {
                    DiffStatus::Unchanged
                };
                result.push(MemberDiff {
                    new: Some(m),
                    old: Some(old),
                    status,
                });
            }
        }
    }
    for &m in old_items {
        if find_equivalent(&new_index, m, canon).is_none() {
            result.push(MemberDiff {
                new: None,
                old: Some(m),
                status: DiffStatus::Removed,
            });
        }
    }

    sort_member_diffs(kind, &mut result);
    result
}

/// List one category of a single snapshot, every entry carrying the same
/// status (document mode, or the members of a wholly added/removed type).
pub fn list_members<'a>(
    kind: MemberKind,
    items: &[&'a Member],
    status: DiffStatus,
) -> Vec<MemberDiff<'a>> {
    let mut result: Vec<MemberDiff<'a>> = items
        .iter()
        .map(|&m| MemberDiff {
            new: if status == DiffStatus::Removed {
                None
            } else {
                Some(m)
            },
            old: if status == DiffStatus::Removed {
                Some(m)
            } else {
                None
            },
            status,
        })
        .collect();
    if kind == MemberKind::EnumConstant {
        // Single-snapshot enum listings read best in value order.
        result.sort_by(|a, b| {
            let ka = enum_value_key(a.member());
            let kb = enum_value_key(b.member());
            ka.cmp(&kb).then_with(|| a.member().name.cmp(&b.member().name))
        });
    } else {
        sort_member_diffs(kind, &mut result);
    }
    result
}

fn enum_value_key(member: &Member) -> (i128, String) {
    let raw = member.constant_value.as_deref().unwrap_or("");
    match raw.parse::<i128>() {
        Ok(v) => (v, String::new()),
        Err(_) => (i128::MAX, raw.to_string()),
    }
}

/// Apply the category's fixed output ordering.
pub fn sort_member_diffs(kind: MemberKind, diffs: &mut [MemberDiff<'_>]) {
    diffs.sort_by(|a, b| {
        let (ma, mb) = (a.member(), b.member());
        let key_a = sort_key(kind, ma);
        let key_b = sort_key(kind, mb);
        key_a
            .cmp(&key_b)
            .then_with(|| member_display(ma).cmp(&member_display(mb)))
            .then_with(|| a.status.rank().cmp(&b.status.rank()))
    });
}

fn sort_key(kind: MemberKind, member: &Member) -> (String, String) {
    if kind.has_params() {
        (member.name.clone(), member.joined_param_names())
    } else {
        (member.name.clone(), String::new())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol::{Accessibility, Param};

    fn method(name: &str) -> Member {
        Member::method(name, Accessibility::Public)
    }

    fn refs(items: &[Member]) -> Vec<&Member> {
        items.iter().collect()
    }

    mod set_difference {
        use super::*;

        #[test]
        fn added_and_removed_are_disjoint() {
            let new_items = [method("A"), method("B")];
            let old_items = [method("B"), method("C")];
            let diffs = reconcile(MemberKind::Method, &refs(&new_items), &refs(&old_items));

            let added: Vec<&str> = diffs
                .iter()
                .filter(|d| d.status == DiffStatus::Added)
                .map(|d| d.member().name.as_str())
                .collect();
            let removed: Vec<&str> = diffs
                .iter()
                .filter(|d| d.status == DiffStatus::Removed)
                .map(|d| d.member().name.as_str())
                .collect();
            assert_eq!(added, ["A"]);
            assert_eq!(removed, ["C"]);
            assert!(added.iter().all(|a| !removed.contains(a)));
        }

        #[test]
        fn identical_sets_are_all_unchanged() {
            let items = [method("A"), method("B")];
            let diffs = reconcile(MemberKind::Method, &refs(&items), &refs(&items));
            assert!(diffs.iter().all(|d| d.status == DiffStatus::Unchanged));
            assert_eq!(diffs.len(), 2);
        }

        #[test]
        fn same_identity_different_return_is_remove_plus_add() {
            let new_items = [method("Load").with_value_type("System.Boolean")];
            let old_items = [method("Load").with_value_type("System.Void")];
            let diffs = reconcile(MemberKind::Method, &refs(&new_items), &refs(&old_items));
            let statuses: Vec<DiffStatus> = diffs.iter().map(|d| d.status).collect();
            assert_eq!(statuses, [DiffStatus::Added, DiffStatus::Removed]);
        }

        #[test]
        fn changed_enum_constant_never_unchanged() {
            let new_items = [Member::enum_constant("A", "2")];
            let old_items = [Member::enum_constant("A", "1")];
            let diffs = reconcile(
                MemberKind::EnumConstant,
                &refs(&new_items),
                &refs(&old_items),
            );
            assert!(diffs.iter().all(|d| d.status != DiffStatus::Unchanged));
            assert_eq!(diffs.len(), 2);
        }
    }

    mod obsoletion {
        use super::*;

        #[test]
        fn newly_deprecated_member_is_obsoleted() {
            let new_items = [method("Load").deprecated()];
            let old_items = [method("Load")];
            let diffs = reconcile(MemberKind::Method, &refs(&new_items), &refs(&old_items));
            assert_eq!(diffs.len(), 1);
            assert_eq!(diffs[0].status, DiffStatus::Obsoleted);
            assert!(diffs[0].new.is_some() && diffs[0].old.is_some());
        }

        #[test]
        fn already_deprecated_member_is_unchanged() {
            let new_items = [method("Load").deprecated()];
            let old_items = [method("Load").deprecated()];
            let diffs = reconcile(MemberKind::Method, &refs(&new_items), &refs(&old_items));
            assert_eq!(diffs[0].status, DiffStatus::Unchanged);
        }
    }

    mod ordering {
        use super::*;

        #[test]
        fn methods_order_by_name_then_param_names() {
            let a = method("Load").with_param(Param::new("T", "zeta"));
            let b = method("Load").with_param(Param::new("T", "alpha"));
            let c = method("Init");
            let new_items = [a, b, c];
            let diffs = reconcile(MemberKind::Method, &refs(&new_items), &[]);
            let keys: Vec<String> = diffs
                .iter()
                .map(|d| format!("{}|{}", d.member().name, d.member().joined_param_names()))
                .collect();
            assert_eq!(keys, ["Init|", "Load|alpha", "Load|zeta"]);
        }

        #[test]
        fn result_is_independent_of_input_order() {
            let m1 = method("B");
            let m2 = method("A").with_param(Param::new("T", "x"));
            let m3 = method("A");
            let fwd = [m1.clone(), m2.clone(), m3.clone()];
            let rev = [m3, m2, m1];
            let d1 = reconcile(MemberKind::Method, &refs(&fwd), &[]);
            let d2 = reconcile(MemberKind::Method, &refs(&rev), &[]);
            let names1: Vec<String> = d1.iter().map(|d| member_display(d.member())).collect();
            let names2: Vec<String> = d2.iter().map(|d| member_display(d.member())).collect();
            assert_eq!(names1, names2);
        }
    }

    mod document_listing {
        use super::*;

        #[test]
        fn enum_constants_list_in_value_order() {
            let items = [
                Member::enum_constant("Zebra", "1"),
                Member::enum_constant("Apple", "10"),
                Member::enum_constant("Mango", "2"),
            ];
            let listed = list_members(MemberKind::EnumConstant, &refs(&items), DiffStatus::Unchanged);
            let names: Vec<&str> = listed.iter().map(|d| d.member().name.as_str()).collect();
            assert_eq!(names, ["Zebra", "Mango", "Apple"]);
        }

        #[test]
        fn removed_listing_populates_old_side_only() {
            let items = [method("Gone")];
            let listed = list_members(MemberKind::Method, &refs(&items), DiffStatus::Removed);
            assert!(listed[0].new.is_none());
            assert!(listed[0].old.is_some());
        }
    }
}
