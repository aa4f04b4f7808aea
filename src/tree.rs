//! Diff tree assembly: pairing types across snapshots and descending into
//! members and nested types.
//!
//! The tree is built once per comparison run and handed read-only to exactly
//! one renderer. Entries are ordered by `(namespace, name)` of the
//! representative type, which is the precondition the renderer's namespace
//! grouping machine relies on.
//!
//! Diff mode emits only types with changes (added, removed, obsoleted, or
//! changed somewhere beneath them); document mode emits every type of a
//! single snapshot with no old side.

use serde::Serialize;

use crate::heuristics::{apply_overload_refactor, apply_relocation};
use crate::reconcile::{list_members, reconcile, DiffStatus, MemberDiff};
use crate::snapshot::Snapshot;
use crate::symbol::{Member, MemberKind, TypeDef};

// ============================================================================
// Tree shapes
// ============================================================================

/// One implemented interface paired across snapshots.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct InterfaceDiff<'a> {
    /// Interface display name.
    pub name: &'a str,
    /// Change status (never `Obsoleted`; interfaces carry no deprecation).
    pub status: DiffStatus,
}

/// Member diffs grouped by category, each pre-sorted per the category's
/// fixed ordering.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CategoryDiffs<'a> {
    pub constructors: Vec<MemberDiff<'a>>,
    pub methods: Vec<MemberDiff<'a>>,
    pub properties: Vec<MemberDiff<'a>>,
    pub events: Vec<MemberDiff<'a>>,
    pub fields: Vec<MemberDiff<'a>>,
    pub enum_constants: Vec<MemberDiff<'a>>,
}

impl<'a> CategoryDiffs<'a> {
    /// The entries of one member category.
    pub fn by_kind(&self, kind: MemberKind) -> &[MemberDiff<'a>] {
        match kind {
            MemberKind::Constructor => &self.constructors,
            MemberKind::Method => &self.methods,
            MemberKind::Property => &self.properties,
            MemberKind::Event => &self.events,
            MemberKind::Field => &self.fields,
            MemberKind::EnumConstant => &self.enum_constants,
        }
    }

    fn set(&mut self, kind: MemberKind, diffs: Vec<MemberDiff<'a>>) {
        match kind {
            MemberKind::Constructor => self.constructors = diffs,
            MemberKind::Method => self.methods = diffs,
            MemberKind::Property => self.properties = diffs,
            MemberKind::Event => self.events = diffs,
            MemberKind::Field => self.fields = diffs,
            MemberKind::EnumConstant => self.enum_constants = diffs,
        }
    }

    /// Whether any entry in any category is not `Unchanged`.
    pub fn any_changes(&self) -> bool {
        MemberKind::ALL
            .iter()
            .any(|k| self.by_kind(*k).iter().any(|d| d.status != DiffStatus::Unchanged))
    }
}

/// One type paired across snapshots, with its member diffs and nested types.
///
/// Invariants: at least one of `new`/`old` is present; `Added` has no old
/// side; `Removed` has no new side; `Obsoleted` has both, with the new side
/// carrying the deprecation flag the old side lacks. Document-mode entries
/// are `Unchanged` with no old side.
#[derive(Debug, Clone, Serialize)]
pub struct TypeDiff<'a> {
    /// The type in the new snapshot, if present there.
    pub new: Option<&'a TypeDef>,
    /// The type in the old snapshot, if present there.
    pub old: Option<&'a TypeDef>,
    /// Change status of the type itself.
    pub status: DiffStatus,
    /// Whether the base-type display name differs between versions.
    pub base_changed: bool,
    /// Implemented-interface diffs, sorted by name.
    pub interfaces: Vec<InterfaceDiff<'a>>,
    /// Member diffs grouped by category.
    pub members: CategoryDiffs<'a>,
    /// Nested types with changes (diff mode) or all nested types (document
    /// mode).
    pub nested: Vec<TypeDiff<'a>>,
}

impl<'a> TypeDiff<'a> {
    /// The representative type: the new side when present, otherwise the old
    /// side.
    pub fn type_def(&self) -> &'a TypeDef {
        self.new
            .or(self.old)
            .unwrap_or_else(|| unreachable!("type diff with neither side"))
    }

    /// Whether this entry or any descendant carries a change.
    pub fn has_changes(&self) -> bool {
        self.status != DiffStatus::Unchanged
            || self.base_changed
            || self.interfaces.iter().any(|i| i.status != DiffStatus::Unchanged)
            || self.members.any_changes()
            || self.nested.iter().any(TypeDiff::has_changes)
    }
}

/// How a tree was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffMode {
    /// Single-snapshot documentation of one version.
    Document,
    /// Three-way status against a prior version.
    Diff,
}

/// The assembled diff tree: ordered type entries grouped by namespace at
/// render time.
#[derive(Debug, Clone, Serialize)]
pub struct DiffTree<'a> {
    /// Mode the tree was built in.
    pub mode: DiffMode,
    /// Type entries, sorted by `(namespace, name)`.
    pub entries: Vec<TypeDiff<'a>>,
}

impl<'a> DiffTree<'a> {
    /// Number of top-level entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the tree reports nothing.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ============================================================================
// Assembly
// ============================================================================

/// Diff two snapshots into a tree of changed types.
///
/// Both snapshots must come from builders configured with the same
/// [`VisibilityConfig`]; the filter ran during their construction, so no
/// visibility decisions happen here.
///
/// [`VisibilityConfig`]: crate::config::VisibilityConfig
pub fn diff_snapshots<'a>(new: &'a Snapshot, old: &'a Snapshot) -> DiffTree<'a> {
    let entries = diff_type_lists(new.types(), old.types(), new);
    DiffTree {
        mode: DiffMode::Diff,
        entries,
    }
}

/// Document a single snapshot: every type, no old side, all entries
/// implicitly unchanged.
pub fn document_snapshot(snapshot: &Snapshot) -> DiffTree<'_> {
    let entries = snapshot
        .types()
        .iter()
        .map(|t| list_type(t, DiffStatus::Unchanged))
        .collect();
    DiffTree {
        mode: DiffMode::Document,
        entries,
    }
}

/// Pair two pre-sorted type lists by full display name and keep the entries
/// with changes. Shared between the top level and nested-type recursion.
fn diff_type_lists<'a>(
    new_types: &'a [TypeDef],
    old_types: &'a [TypeDef],
    new_snapshot: &'a Snapshot,
) -> Vec<TypeDiff<'a>> {
    let mut entries: Vec<TypeDiff<'a>> = Vec::new();

    for new_t in new_types {
        match old_types.iter().find(|o| o.full_name() == new_t.full_name()) {
            None => entries.push(list_type(new_t, DiffStatus::Added)),
            Some(old_t) => {
                let entry = diff_type(new_t, old_t, new_snapshot);
                if entry.has_changes() {
                    entries.push(entry);
                }
            }
        }
    }
    for old_t in old_types {
        if !new_types.iter().any(|n| n.full_name() == old_t.full_name()) {
            entries.push(list_type(old_t, DiffStatus::Removed));
        }
    }

    entries.sort_by(|a, b| {
        let (ta, tb) = (a.type_def(), b.type_def());
        (ta.namespace.as_str(), ta.name.as_str()).cmp(&(tb.namespace.as_str(), tb.name.as_str()))
    });
    entries
}

/// Diff one type pair: reconcile every member category, run the relocation
/// and overload heuristics over methods and constructors, diff interfaces,
/// and recurse into nested types.
fn diff_type<'a>(
    new_t: &'a TypeDef,
    old_t: &'a TypeDef,
    new_snapshot: &'a Snapshot,
) -> TypeDiff<'a> {
    let mut members = CategoryDiffs::default();
    for kind in MemberKind::ALL {
        let new_members: Vec<&Member> = new_t.members_of(kind).collect();
        let old_members: Vec<&Member> = old_t.members_of(kind).collect();
        let mut diffs = reconcile(kind, &new_members, &old_members);
        if kind.has_params() {
            apply_relocation(&mut diffs, new_t, new_snapshot);
            apply_overload_refactor(&mut diffs);
        }
        members.set(kind, diffs);
    }

    let status = if new_t.is_deprecated && !old_t.is_deprecated {
        DiffStatus::Obsoleted
    } else {
        DiffStatus::Unchanged
    };

    TypeDiff {
        new: Some(new_t),
        old: Some(old_t),
        status,
        base_changed: new_t.base_type != old_t.base_type,
        interfaces: diff_interfaces(new_t, old_t),
        members,
        nested: diff_type_lists(&new_t.nested, &old_t.nested, new_snapshot),
    }
}

fn diff_interfaces<'a>(new_t: &'a TypeDef, old_t: &'a TypeDef) -> Vec<InterfaceDiff<'a>> {
    let mut diffs: Vec<InterfaceDiff<'a>> = Vec::new();
    for name in &new_t.interfaces {
        let status = if old_t.interfaces.contains(name) {
            DiffStatus::Unchanged
        } else {
            DiffStatus::Added
        };
        diffs.push(InterfaceDiff { name, status });
    }
    for name in &old_t.interfaces {
        if !new_t.interfaces.contains(name) {
            diffs.push(InterfaceDiff {
                name,
                status: DiffStatus::Removed,
            });
        }
    }
    diffs.sort_by(|a, b| a.name.cmp(b.name));
    diffs
}

/// Build the entry for a type present on one side only, or for document
/// mode. Every member and nested type carries the same status.
fn list_type(type_def: &TypeDef, status: DiffStatus) -> TypeDiff<'_> {
    let mut members = CategoryDiffs::default();
    for kind in MemberKind::ALL {
        let items: Vec<&Member> = type_def.members_of(kind).collect();
        members.set(kind, list_members(kind, &items, status));
    }
    let interfaces = type_def
        .interfaces
        .iter()
        .map(|name| InterfaceDiff {
            name,
            status: match status {
                DiffStatus::Unchanged => DiffStatus::Unchanged,
                DiffStatus::Removed => DiffStatus::Removed,
                _ => DiffStatus::Added,
            },
        })
        .collect();
    let (new, old) = if status == DiffStatus::Removed {
        (None, Some(type_def))
    } else {
        (Some(type_def), None)
    };
    TypeDiff {
        new,
        old,
        status,
        base_changed: false,
        interfaces,
        members,
        nested: type_def
            .nested
            .iter()
            .map(|t| list_type(t, status))
            .collect(),
    }
}

// ============================================================================
// Tests
// ============================================================================
