//! Immutable snapshots of one codebase version's declared surface.
//!
//! A [`Snapshot`] is built once from provider output via [`SnapshotBuilder`],
//! then consumed read-only by the diff engine. The visibility filter runs
//! here, during construction, so that both sides of a comparison are reduced
//! to the same configured surface before any set difference happens.
//!
//! Storage follows the same shape as a facts store: a sorted vector for
//! deterministic iteration plus a hash index for O(1) full-name lookups
//! (the relocation heuristic walks base chains through that index).

use std::collections::HashMap;

use serde::Serialize;
use tracing::warn;

use crate::canon::member_display;
use crate::config::VisibilityConfig;
use crate::error::DiffError;
use crate::filter::{effective_accessor, member_included, symbol_visible};
use crate::symbol::{Symbol, TypeDef};

// ============================================================================
// Snapshot
// ============================================================================

/// An immutable, ordered collection of types captured from one codebase
/// version.
///
/// Types are sorted by `(namespace, name)`; this ordering is the precondition
/// for the renderer's namespace grouping state machine. Never mutated after
/// construction.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    types: Vec<TypeDef>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl Snapshot {
    /// All top-level types, sorted by `(namespace, name)`.
    pub fn types(&self) -> &[TypeDef] {
        &self.types
    }

    /// Look up a top-level or nested type by namespace-qualified display
    /// name. Nested types are addressed as `Namespace.Outer.Inner`.
    pub fn find_type(&self, full_name: &str) -> Option<&TypeDef> {
        // The index stores top-level positions; nested paths resolve by
        // walking the owner's nested list.
        if let Some(&i) = self.index.get(full_name) {
            return Some(&self.types[i]);
        }
        let mut path = full_name;
        while let Some(split) = path.rfind('.') {
            path = &full_name[..split];
            if let Some(&i) = self.index.get(path) {
                let rest = &full_name[split + 1..];
                return Self::find_nested(&self.types[i], rest);
            }
        }
        None
    }

    fn find_nested<'a>(owner: &'a TypeDef, path: &str) -> Option<&'a TypeDef> {
        let (head, rest) = match path.split_once('.') {
            Some((h, r)) => (h, Some(r)),
            None => (path, None),
        };
        let next = owner.nested.iter().find(|t| t.name == head)?;
        match rest {
            Some(r) => Self::find_nested(next, r),
            None => Some(next),
        }
    }

    /// Ancestors of `start` that are declared in this snapshot, nearest
    /// first. The walk stops at the first base type the snapshot does not
    /// declare (external bases are opaque) and refuses to revisit a type,
    /// so a cyclic base edge from a malformed provider terminates.
    pub fn base_chain<'a>(&'a self, start: &TypeDef) -> Vec<&'a TypeDef> {
        let mut chain: Vec<&'a TypeDef> = Vec::new();
        let start_name = start.full_name();
        let mut current = start.base_type.as_deref();
        while let Some(base_name) = current {
            if base_name == start_name || chain.iter().any(|t| t.full_name() == base_name) {
                break;
            }
            match self.find_type(base_name) {
                Some(base) => {
                    chain.push(base);
                    current = base.base_type.as_deref();
                }
                None => break,
            }
        }
        chain
    }

    /// Number of top-level types in the snapshot.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether the snapshot holds no types.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Builds a [`Snapshot`] from provider output, applying the visibility
/// filter exactly once.
///
/// The builder accepts raw [`Symbol`] values so a provider can stream its
/// whole model at it; symbol kinds that cannot be placed at the snapshot
/// level are logged and skipped, and the run continues.
#[derive(Debug)]
pub struct SnapshotBuilder {
    config: VisibilityConfig,
    types: Vec<TypeDef>,
}

impl SnapshotBuilder {
    /// Create a builder for the given visibility configuration.
    ///
    /// Configuration problems are fatal and surface here, before any
    /// snapshot work begins.
    pub fn new(config: VisibilityConfig) -> Result<Self, DiffError> {
        config.validate()?;
        Ok(SnapshotBuilder {
            config,
            types: Vec::new(),
        })
    }

    /// Add a type declaration.
    pub fn add_type(&mut self, type_def: TypeDef) -> &mut Self {
        self.types.push(type_def);
        self
    }

    /// Add a raw provider symbol.
    ///
    /// Namespaces are implied by each type's namespace path and are ignored;
    /// a free-standing member has no containing type at this level and is
    /// skipped with a warning.
    pub fn add_symbol(&mut self, symbol: Symbol) -> &mut Self {
        match symbol {
            Symbol::Type(t) => {
                self.types.push(t);
            }
            Symbol::Namespace(_) => {}
            Symbol::Member(m) => {
                warn!(member = %m.name, kind = ?m.kind, "skipping free-standing member symbol");
            }
        }
        self
    }

    /// Finish the snapshot: filter, normalize accessors, and sort.
    pub fn build(self) -> Snapshot {
        let config = self.config;
        let mut types: Vec<TypeDef> = self
            .types
            .into_iter()
            .filter(|t| symbol_visible(t, &config))
            .map(|t| Self::reduce_type(t, &config))
            .collect();
        types.sort_by(|a, b| {
            (a.namespace.as_str(), a.name.as_str()).cmp(&(b.namespace.as_str(), b.name.as_str()))
        });

        let mut index = HashMap::with_capacity(types.len());
        for (i, t) in types.iter().enumerate() {
            index.insert(t.full_name(), i);
        }
        Snapshot { types, index }
    }

    /// Reduce one type to the configured surface: drop invisible members and
    /// nested types, normalize property accessors so an invisible setter or
    /// getter reads as absent, and put members into canonical order so two
    /// providers emitting the same surface in different orders build
    /// identical snapshots.
    fn reduce_type(mut type_def: TypeDef, config: &VisibilityConfig) -> TypeDef {
        type_def.members.retain(|m| member_included(m, config));
        for member in &mut type_def.members {
            member.getter = effective_accessor(member.getter, config);
            member.setter = effective_accessor(member.setter, config);
        }
        type_def.members.sort_by(|a, b| {
            (a.kind, a.name.as_str(), a.joined_param_names())
                .cmp(&(b.kind, b.name.as_str(), b.joined_param_names()))
                .then_with(|| member_display(a).cmp(&member_display(b)))
        });
        type_def.interfaces.sort();
        let nested = std::mem::take(&mut type_def.nested);
        type_def.nested = nested
            .into_iter()
            .filter(|t| symbol_visible(t, config))
            .map(|t| Self::reduce_type(t, config))
            .collect();
        type_def.nested.sort_by(|a, b| a.name.cmp(&b.name));
        type_def
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol::{Accessibility, Member, TypeKind};

    fn class(ns: &str, name: &str) -> TypeDef {
        TypeDef::new(TypeKind::Class, ns, name, Accessibility::Public)
    }

    mod building {
        use super::*;

        #[test]
        fn types_sort_by_namespace_then_name() {
            let mut b = SnapshotBuilder::new(VisibilityConfig::public_only()).unwrap();
            b.add_type(class("B", "Zeta"))
                .add_type(class("A", "Beta"))
                .add_type(class("B", "Alpha"))
                .add_type(class("A", "Alpha"));
            let snap = b.build();
            let names: Vec<String> = snap.types().iter().map(|t| t.full_name()).collect();
            assert_eq!(names, ["A.Alpha", "A.Beta", "B.Alpha", "B.Zeta"]);
        }

        #[test]
        fn internal_types_filtered_under_public_config() {
            let mut b = SnapshotBuilder::new(VisibilityConfig::public_only()).unwrap();
            b.add_type(class("A", "Visible")).add_type(TypeDef::new(
                TypeKind::Class,
                "A",
                "Hidden",
                Accessibility::Internal,
            ));
            let snap = b.build();
            assert_eq!(snap.len(), 1);
            assert!(snap.find_type("A.Hidden").is_none());
        }

        #[test]
        fn invalid_config_rejected_before_any_work() {
            let cfg = VisibilityConfig {
                include_internal: false,
                include_private: true,
            };
            assert!(SnapshotBuilder::new(cfg).is_err());
        }

        #[test]
        fn free_standing_member_symbol_is_skipped() {
            let mut b = SnapshotBuilder::new(VisibilityConfig::public_only()).unwrap();
            b.add_symbol(Symbol::Member(Member::method(
                "Orphan",
                Accessibility::Public,
            )));
            b.add_symbol(Symbol::Namespace("A".into()));
            b.add_symbol(Symbol::Type(class("A", "Kept")));
            assert_eq!(b.build().len(), 1);
        }

        #[test]
        fn invisible_setter_normalized_to_read_only() {
            let prop = Member::property("Text", Accessibility::Public, "System.String")
                .with_setter(Some(Accessibility::Private));
            let mut b = SnapshotBuilder::new(VisibilityConfig::public_only()).unwrap();
            b.add_type(class("A", "C").with_member(prop));
            let snap = b.build();
            let t = snap.find_type("A.C").unwrap();
            assert_eq!(t.members[0].setter, None);
            assert_eq!(t.members[0].getter, Some(Accessibility::Public));
        }

        #[test]
        fn overrides_dropped_during_construction() {
            let mut b = SnapshotBuilder::new(VisibilityConfig::public_only()).unwrap();
            b.add_type(
                class("A", "C")
                    .with_member(Member::method("ToString", Accessibility::Public).as_override())
                    .with_member(Member::method("Own", Accessibility::Public)),
            );
            let snap = b.build();
            let t = snap.find_type("A.C").unwrap();
            assert_eq!(t.members.len(), 1);
            assert_eq!(t.members[0].name, "Own");
        }
    }

    mod lookup {
        use super::*;

        #[test]
        fn find_type_resolves_nested_paths() {
            let mut b = SnapshotBuilder::new(VisibilityConfig::public_only()).unwrap();
            b.add_type(class("A", "Outer").with_nested(
                TypeDef::new(TypeKind::Class, "A", "Inner", Accessibility::Public)
                    .with_nested(TypeDef::new(
                        TypeKind::Enum,
                        "A",
                        "Deep",
                        Accessibility::Public,
                    )),
            ));
            let snap = b.build();
            assert!(snap.find_type("A.Outer").is_some());
            assert_eq!(snap.find_type("A.Outer.Inner").unwrap().name, "Inner");
            assert_eq!(snap.find_type("A.Outer.Inner.Deep").unwrap().name, "Deep");
            assert!(snap.find_type("A.Outer.Missing").is_none());
        }

        #[test]
        fn base_chain_terminates_on_cyclic_edges() {
            let mut b = SnapshotBuilder::new(VisibilityConfig::public_only()).unwrap();
            b.add_type(class("A", "First").with_base("A.Second"))
                .add_type(class("A", "Second").with_base("A.First"));
            let snap = b.build();
            let first = snap.find_type("A.First").unwrap();
            let chain: Vec<&str> = snap
                .base_chain(first)
                .iter()
                .map(|t| t.name.as_str())
                .collect();
            assert_eq!(chain, ["Second"]);
        }

        #[test]
        fn base_chain_walks_declared_ancestors_only() {
            let mut b = SnapshotBuilder::new(VisibilityConfig::public_only()).unwrap();
            b.add_type(class("A", "Leaf").with_base("A.Mid"))
                .add_type(class("A", "Mid").with_base("A.Root"))
                .add_type(class("A", "Root").with_base("System.Object"));
            let snap = b.build();
            let leaf = snap.find_type("A.Leaf").unwrap();
            let chain: Vec<&str> = snap
                .base_chain(leaf)
                .iter()
                .map(|t| t.name.as_str())
                .collect();
            assert_eq!(chain, ["Mid", "Root"]);
        }
    }
}
