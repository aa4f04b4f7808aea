//! omdiff: structural diff engine for API surface snapshots.
//!
//! Given two snapshots of a codebase's declared surface (types and members
//! with signatures, accessibility, attributes, inheritance, and docs), the
//! engine produces a deterministic tree of additions, removals, changed
//! members, and deprecation transitions. Two disambiguation heuristics keep
//! legitimate refactors out of the report: a member moved up to a base type
//! is not a removal, and an optional parameter split into explicit overloads
//! is not a break.
//!
//! Parsing source, loading assemblies, fetching packages, and rendering the
//! result stay outside this crate: a symbol provider fills the model in, and
//! a [`Renderer`] consumes the tree through a visitor protocol.
//!
//! ```
//! use omdiff::config::VisibilityConfig;
//! use omdiff::snapshot::SnapshotBuilder;
//! use omdiff::symbol::{Accessibility, Member, TypeDef, TypeKind};
//! use omdiff::tree::diff_snapshots;
//!
//! # fn main() -> Result<(), omdiff::error::DiffError> {
//! let mut old = SnapshotBuilder::new(VisibilityConfig::public_only())?;
//! old.add_type(TypeDef::new(TypeKind::Class, "Acme", "Widget", Accessibility::Public));
//! let old = old.build();
//!
//! let mut new = SnapshotBuilder::new(VisibilityConfig::public_only())?;
//! new.add_type(
//!     TypeDef::new(TypeKind::Class, "Acme", "Widget", Accessibility::Public)
//!         .with_member(Member::method("Render", Accessibility::Public)),
//! );
//! let new = new.build();
//!
//! let tree = diff_snapshots(&new, &old);
//! assert_eq!(tree.len(), 1);
//! # Ok(())
//! # }
//! ```
//!
//! [`Renderer`]: crate::render::Renderer

pub mod canon;
pub mod config;
pub mod error;
pub mod filter;
pub mod heuristics;
pub mod reconcile;
pub mod render;
pub mod snapshot;
pub mod symbol;
pub mod tree;

pub use config::VisibilityConfig;
pub use error::{DiffError, DiffErrorCode};
pub use reconcile::{DiffStatus, MemberDiff};
pub use render::{render, Renderer};
pub use snapshot::{Snapshot, SnapshotBuilder};
pub use symbol::{Accessibility, Member, MemberKind, Param, Symbol, TypeDef, TypeKind};
pub use tree::{diff_snapshots, document_snapshot, DiffMode, DiffTree, TypeDiff};
