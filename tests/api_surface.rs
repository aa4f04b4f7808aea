//! Compile-only test to verify the public API surface.
//!
//! This file serves as a compile-time contract for the public API.
//! If this file fails to compile, the public API has regressed.
//!
//! Run with: cargo test -- api_surface

// Allow unused imports - this test is about compile-time verification, not runtime usage
#![allow(unused_imports)]

// ============================================================================
// Symbol model
// ============================================================================

use omdiff::symbol::{
    Accessibility, HasAccessibility, HasDeprecation, HasSignature, Member, MemberKind, Param,
    Symbol, TypeDef, TypeKind,
};

// ============================================================================
// Configuration, filtering, snapshots
// ============================================================================

use omdiff::config::VisibilityConfig;
use omdiff::filter::{accessibility_visible, effective_accessor, member_included, symbol_visible};
use omdiff::snapshot::{Snapshot, SnapshotBuilder};

// ============================================================================
// Diff engine
// ============================================================================

use omdiff::canon::{
    canon_for, member_display, EventCanon, FieldCanon, MemberCanon, PropertyCanon, SignatureCanon,
};
use omdiff::heuristics::{apply_overload_refactor, apply_relocation};
use omdiff::reconcile::{list_members, reconcile, sort_member_diffs, DiffStatus, MemberDiff};
use omdiff::tree::{
    diff_snapshots, document_snapshot, CategoryDiffs, DiffMode, DiffTree, InterfaceDiff, TypeDiff,
};

// ============================================================================
// Renderer protocol and errors
// ============================================================================

use omdiff::error::{DiffError, DiffErrorCode};
use omdiff::render::{render, Renderer};

// Crate-root re-exports stay stable too.
use omdiff::{
    diff_snapshots as _diff, document_snapshot as _doc, DiffError as _E, Snapshot as _S,
    VisibilityConfig as _V,
};

#[test]
fn api_surface_compiles() {
    // The imports above are the test; nothing to execute.
}
