//! Equality canons: per-category identity and equality for member matching.
//!
//! Each member category defines two relations:
//!
//! - **identity**: the bucket key used by the reconciler's hash index. Two
//!   members with different identity keys can never match.
//! - **equivalence**: the full equality check run inside a bucket. Members
//!   that share identity but fail equivalence surface as a remove+add pair.
//!
//! Identity is deliberately coarser than equivalence: a method keeps its
//! identity (name + ordered parameter types) when only its return type or
//! accessibility changes, which is exactly what lets the reconciler report
//! that as a change to one member rather than two unrelated ones. Neither
//! relation ever looks at the deprecation flag; obsoletion is detected by
//! matching under the canon and comparing flags afterwards.

use crate::symbol::{Member, MemberKind};

// ============================================================================
// Display
// ============================================================================

/// Canonical display string for a member, excluding the containing type.
///
/// This is the equivalence key for most categories: accessibility,
/// modifiers, value/return type, name, and the full parameter list with
/// names and default values. The deprecation flag never appears here.
pub fn member_display(member: &Member) -> String {
    let mut out = String::new();
    out.push_str(&member.accessibility.to_string());
    if member.is_static {
        out.push_str(" static");
    }
    if let Some(vt) = &member.value_type {
        out.push(' ');
        out.push_str(vt);
    }
    out.push(' ');
    out.push_str(&member.name);
    if member.kind.has_params() {
        out.push('(');
        for (i, p) in member.params.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            out.push_str(&p.type_name);
            out.push(' ');
            out.push_str(&p.name);
            if p.has_default {
                out.push_str(" = ");
                out.push_str(p.default_value.as_deref().unwrap_or("default"));
            }
        }
        out.push(')');
    }
    out
}

// ============================================================================
// Canon trait
// ============================================================================

/// Identity and equality for one member category.
pub trait MemberCanon {
    /// Bucket key for the reconciler's index.
    fn identity(&self, member: &Member) -> String;

    /// Full equality within a bucket. Defaults to display equality.
    fn equivalent(&self, a: &Member, b: &Member) -> bool {
        member_display(a) == member_display(b)
    }
}

/// Canon for methods and constructors: identity is the signature excluding
/// the containing type.
pub struct SignatureCanon;

impl MemberCanon for SignatureCanon {
    fn identity(&self, member: &Member) -> String {
        let types: Vec<&str> = member.params.iter().map(|p| p.type_name.as_str()).collect();
        format!("{}({})", member.name, types.join(","))
    }
}

/// Canon for properties: identity is name + value type; equivalence also
/// requires the post-filter accessor accessibilities to match, so a
/// narrowed or widened accessor is a reportable change even when the
/// property type is unchanged.
pub struct PropertyCanon;

impl MemberCanon for PropertyCanon {
    fn identity(&self, member: &Member) -> String {
        format!(
            "{}:{}",
            member.name,
            member.value_type.as_deref().unwrap_or("")
        )
    }

    fn equivalent(&self, a: &Member, b: &Member) -> bool {
        member_display(a) == member_display(b) && a.getter == b.getter && a.setter == b.setter
    }
}

/// Canon for events: identity is name + handler type.
pub struct EventCanon;

impl MemberCanon for EventCanon {
    fn identity(&self, member: &Member) -> String {
        format!(
            "{}:{}",
            member.name,
            member.value_type.as_deref().unwrap_or("")
        )
    }
}

/// Canon for fields and enum constants: the constant value folds into
/// equivalence, so a changed constant registers as remove+add, never
/// "unchanged".
pub struct FieldCanon;

impl MemberCanon for FieldCanon {
    fn identity(&self, member: &Member) -> String {
        format!(
            "{}:{}",
            member.name,
            member.value_type.as_deref().unwrap_or("")
        )
    }

    fn equivalent(&self, a: &Member, b: &Member) -> bool {
        member_display(a) == member_display(b) && a.constant_value == b.constant_value
    }
}

/// The canon for a member category.
pub fn canon_for(kind: MemberKind) -> &'static dyn MemberCanon {
    match kind {
        MemberKind::Constructor | MemberKind::Method => &SignatureCanon,
        MemberKind::Property => &PropertyCanon,
        MemberKind::Event => &EventCanon,
        MemberKind::Field | MemberKind::EnumConstant => &FieldCanon,
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol::{Accessibility, Param};

    mod signatures {
        use super::*;

        #[test]
        fn identity_is_name_plus_param_types() {
            let m = Member::method("Load", Accessibility::Public)
                .with_param(Param::new("System.String", "path"))
                .with_param(Param::new("System.Int32", "timeout"));
            assert_eq!(
                SignatureCanon.identity(&m),
                "Load(System.String,System.Int32)"
            );
        }

        #[test]
        fn identity_ignores_param_names_and_return_type() {
            let a = Member::method("Load", Accessibility::Public)
                .with_value_type("System.Boolean")
                .with_param(Param::new("System.String", "path"));
            let b = Member::method("Load", Accessibility::Public)
                .with_value_type("System.Void")
                .with_param(Param::new("System.String", "file"));
            assert_eq!(SignatureCanon.identity(&a), SignatureCanon.identity(&b));
            assert!(!SignatureCanon.equivalent(&a, &b));
        }

        #[test]
        fn equivalence_ignores_deprecation() {
            let a = Member::method("Load", Accessibility::Public);
            let b = Member::method("Load", Accessibility::Public).deprecated();
            assert!(SignatureCanon.equivalent(&a, &b));
        }
    }

    mod properties {
        use super::*;

        #[test]
        fn narrowed_setter_breaks_equivalence() {
            let a = Member::property("Text", Accessibility::Public, "System.String");
            let b = Member::property("Text", Accessibility::Public, "System.String")
                .with_setter(None);
            assert_eq!(PropertyCanon.identity(&a), PropertyCanon.identity(&b));
            assert!(!PropertyCanon.equivalent(&a, &b));
        }

        #[test]
        fn identical_properties_are_equivalent() {
            let a = Member::property("Text", Accessibility::Public, "System.String");
            let b = Member::property("Text", Accessibility::Public, "System.String");
            assert!(PropertyCanon.equivalent(&a, &b));
        }
    }

    mod fields {
        use super::*;

        #[test]
        fn changed_constant_breaks_equivalence() {
            let a = Member::enum_constant("Red", "1");
            let b = Member::enum_constant("Red", "2");
            assert_eq!(FieldCanon.identity(&a), FieldCanon.identity(&b));
            assert!(!FieldCanon.equivalent(&a, &b));
        }
    }
}
