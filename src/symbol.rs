//! Symbol model: the closed type/member vocabulary the diff engine operates on.
//!
//! This module provides the language-agnostic symbol data model:
//! - [`TypeDef`]: Declared types (classes, interfaces, enums, delegates, structs)
//! - [`Member`]: Type members (constructors, methods, properties, events, fields,
//!   enum constants)
//! - [`Param`]: Ordered parameters with default-value information
//! - [`Symbol`]: The closed tagged union handed over by a symbol provider
//!
//! Everything here is plain data: the provider fills it in, a [`Snapshot`]
//! owns it, and the diff engine only ever reads it. Identity and equality for
//! diffing live in the `canon` module, not on these types. Derived `PartialEq`
//! is structural and intentionally not what the reconciler uses.
//!
//! # Capability traits
//!
//! [`HasAccessibility`], [`HasSignature`], and [`HasDeprecation`] expose the
//! facets shared by several symbol kinds. Dispatch is always by variant tag;
//! there is no runtime type inspection anywhere in the crate.
//!
//! [`Snapshot`]: crate::snapshot::Snapshot

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Enums
// ============================================================================

/// Declared accessibility of a type or member.
///
/// The lattice follows C#-style accessibility, which is the richest model the
/// engine needs to support. Providers for languages with fewer levels map onto
/// a subset (e.g. Rust `pub` → `Public`, `pub(crate)` → `Internal`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Accessibility {
    /// Visible everywhere.
    Public,
    /// Visible to subtypes.
    Protected,
    /// Visible to subtypes or within the assembly (`protected internal`).
    ProtectedInternal,
    /// Visible within the assembly.
    Internal,
    /// Visible to subtypes within the assembly (`private protected`).
    PrivateProtected,
    /// Visible within the declaring type only.
    Private,
}

impl fmt::Display for Accessibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Accessibility::Public => "public",
            Accessibility::Protected => "protected",
            Accessibility::ProtectedInternal => "protected internal",
            Accessibility::Internal => "internal",
            Accessibility::PrivateProtected => "private protected",
            Accessibility::Private => "private",
        };
        write!(f, "{}", s)
    }
}

/// Kind of declared type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    Class,
    Interface,
    Enum,
    Delegate,
    Struct,
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TypeKind::Class => "class",
            TypeKind::Interface => "interface",
            TypeKind::Enum => "enum",
            TypeKind::Delegate => "delegate",
            TypeKind::Struct => "struct",
        };
        write!(f, "{}", s)
    }
}

/// Kind of type member.
///
/// Each kind is one member category for reconciliation; the per-category
/// identity rules live in the `canon` module. The derived ordering is the
/// category order used when grouping member diffs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberKind {
    Constructor,
    Method,
    Property,
    Event,
    Field,
    EnumConstant,
}

impl MemberKind {
    /// All member categories, in the order member diffs are grouped.
    pub const ALL: [MemberKind; 6] = [
        MemberKind::Constructor,
        MemberKind::Method,
        MemberKind::Property,
        MemberKind::Event,
        MemberKind::Field,
        MemberKind::EnumConstant,
    ];

    /// Whether members of this kind carry an ordered parameter list.
    pub fn has_params(&self) -> bool {
        matches!(self, MemberKind::Constructor | MemberKind::Method)
    }
}

// ============================================================================
// Parameters
// ============================================================================

/// One parameter of a constructor, method, or delegate signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Param {
    /// Display name of the parameter type (e.g. `"System.String"`).
    pub type_name: String,
    /// Parameter name.
    pub name: String,
    /// Whether the parameter declares a default value (optional parameter).
    pub has_default: bool,
    /// The default value, when one is declared.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
}

impl Param {
    /// Create a required parameter.
    pub fn new(type_name: impl Into<String>, name: impl Into<String>) -> Self {
        Param {
            type_name: type_name.into(),
            name: name.into(),
            has_default: false,
            default_value: None,
        }
    }

    /// Create an optional parameter with a default value.
    pub fn optional(
        type_name: impl Into<String>,
        name: impl Into<String>,
        default_value: impl Into<String>,
    ) -> Self {
        Param {
            type_name: type_name.into(),
            name: name.into(),
            has_default: true,
            default_value: Some(default_value.into()),
        }
    }
}

// ============================================================================
// Members
// ============================================================================

/// A type member: constructor, method, property, event, field, or enum constant.
///
/// One struct covers all six kinds; fields that do not apply to a kind stay at
/// their `None`/empty defaults. Construct with the kind-specific constructors
/// ([`Member::method`], [`Member::property`], ...) and refine with `with_*`
/// builders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    /// Member category.
    pub kind: MemberKind,
    /// Member name. Constructors use the declaring type's name.
    pub name: String,
    /// Declared accessibility.
    pub accessibility: Accessibility,
    /// Ordered parameter list (constructors and methods only).
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub params: Vec<Param>,
    /// Value type: property/event/field type, or method return type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_type: Option<String>,
    /// Whether the member carries the deprecation attribute.
    pub is_deprecated: bool,
    /// Constant value (fields and enum constants).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub constant_value: Option<String>,
    /// Getter accessibility (properties; `None` = no getter declared).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub getter: Option<Accessibility>,
    /// Setter accessibility (properties; `None` = no setter declared).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub setter: Option<Accessibility>,
    /// Whether this member overrides an inherited member.
    pub is_override: bool,
    /// Whether this member is static.
    pub is_static: bool,
    /// Brief documentation text (summary), if the provider captured one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
}

impl Member {
    fn base(kind: MemberKind, name: impl Into<String>, accessibility: Accessibility) -> Self {
        Member {
            kind,
            name: name.into(),
            accessibility,
            params: Vec::new(),
            value_type: None,
            is_deprecated: false,
            constant_value: None,
            getter: None,
            setter: None,
            is_override: false,
            is_static: false,
            doc: None,
        }
    }

    /// Create a constructor member. `name` is the declaring type's name.
    pub fn constructor(name: impl Into<String>, accessibility: Accessibility) -> Self {
        Member::base(MemberKind::Constructor, name, accessibility)
    }

    /// Create a method member.
    pub fn method(name: impl Into<String>, accessibility: Accessibility) -> Self {
        Member::base(MemberKind::Method, name, accessibility)
    }

    /// Create a property member with a public getter and setter.
    pub fn property(
        name: impl Into<String>,
        accessibility: Accessibility,
        value_type: impl Into<String>,
    ) -> Self {
        let mut m = Member::base(MemberKind::Property, name, accessibility);
        m.value_type = Some(value_type.into());
        m.getter = Some(accessibility);
        m.setter = Some(accessibility);
        m
    }

    /// Create an event member.
    pub fn event(
        name: impl Into<String>,
        accessibility: Accessibility,
        handler_type: impl Into<String>,
    ) -> Self {
        let mut m = Member::base(MemberKind::Event, name, accessibility);
        m.value_type = Some(handler_type.into());
        m
    }

    /// Create a field member.
    pub fn field(
        name: impl Into<String>,
        accessibility: Accessibility,
        value_type: impl Into<String>,
    ) -> Self {
        let mut m = Member::base(MemberKind::Field, name, accessibility);
        m.value_type = Some(value_type.into());
        m
    }

    /// Create an enum constant member.
    pub fn enum_constant(name: impl Into<String>, value: impl Into<String>) -> Self {
        let mut m = Member::base(MemberKind::EnumConstant, name, Accessibility::Public);
        m.constant_value = Some(value.into());
        m
    }

    /// Append a parameter.
    pub fn with_param(mut self, param: Param) -> Self {
        self.params.push(param);
        self
    }

    /// Set the value type (property/event/field type, method return type).
    pub fn with_value_type(mut self, value_type: impl Into<String>) -> Self {
        self.value_type = Some(value_type.into());
        self
    }

    /// Mark the member deprecated.
    pub fn deprecated(mut self) -> Self {
        self.is_deprecated = true;
        self
    }

    /// Set the constant value (fields, enum constants).
    pub fn with_constant(mut self, value: impl Into<String>) -> Self {
        self.constant_value = Some(value.into());
        self
    }

    /// Set getter accessibility; `None` removes the getter.
    pub fn with_getter(mut self, accessibility: Option<Accessibility>) -> Self {
        self.getter = accessibility;
        self
    }

    /// Set setter accessibility; `None` removes the setter.
    pub fn with_setter(mut self, accessibility: Option<Accessibility>) -> Self {
        self.setter = accessibility;
        self
    }

    /// Mark the member as an override of an inherited member.
    pub fn as_override(mut self) -> Self {
        self.is_override = true;
        self
    }

    /// Mark the member static.
    pub fn as_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    /// Set the documentation summary.
    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Joined parameter names, the first-level sort key for methods and
    /// constructors.
    pub fn joined_param_names(&self) -> String {
        let names: Vec<&str> = self.params.iter().map(|p| p.name.as_str()).collect();
        names.join(",")
    }

    /// Index of the first optional parameter, if any.
    pub fn first_optional_param(&self) -> Option<usize> {
        self.params.iter().position(|p| p.has_default)
    }
}

// ============================================================================
// Types
// ============================================================================

/// A declared type: class, interface, enum, delegate, or struct.
///
/// Owned exclusively by the [`Snapshot`] that created it and never shared
/// across snapshots.
///
/// [`Snapshot`]: crate::snapshot::Snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDef {
    /// Simple type name (no namespace).
    pub name: String,
    /// Dotted namespace path; empty string for the global namespace.
    pub namespace: String,
    /// Kind of type.
    pub kind: TypeKind,
    /// Declared accessibility.
    pub accessibility: Accessibility,
    /// Display name of the base type, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_type: Option<String>,
    /// Display names of implemented interfaces.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub interfaces: Vec<String>,
    /// Whether the type is static.
    pub is_static: bool,
    /// Whether the type is sealed.
    pub is_sealed: bool,
    /// Whether the type is abstract.
    pub is_abstract: bool,
    /// Whether the type carries the deprecation attribute.
    pub is_deprecated: bool,
    /// Members declared directly on this type.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub members: Vec<Member>,
    /// Nested type declarations.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub nested: Vec<TypeDef>,
    /// Brief documentation text (summary), if the provider captured one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
}

impl TypeDef {
    /// Create a new type with no members.
    pub fn new(
        kind: TypeKind,
        namespace: impl Into<String>,
        name: impl Into<String>,
        accessibility: Accessibility,
    ) -> Self {
        TypeDef {
            name: name.into(),
            namespace: namespace.into(),
            kind,
            accessibility,
            base_type: None,
            interfaces: Vec::new(),
            is_static: false,
            is_sealed: false,
            is_abstract: false,
            is_deprecated: false,
            members: Vec::new(),
            nested: Vec::new(),
            doc: None,
        }
    }

    /// Set the base type display name.
    pub fn with_base(mut self, base_type: impl Into<String>) -> Self {
        self.base_type = Some(base_type.into());
        self
    }

    /// Add an implemented interface.
    pub fn with_interface(mut self, name: impl Into<String>) -> Self {
        self.interfaces.push(name.into());
        self
    }

    /// Add a member.
    pub fn with_member(mut self, member: Member) -> Self {
        self.members.push(member);
        self
    }

    /// Add a nested type.
    pub fn with_nested(mut self, nested: TypeDef) -> Self {
        self.nested.push(nested);
        self
    }

    /// Mark the type deprecated.
    pub fn deprecated(mut self) -> Self {
        self.is_deprecated = true;
        self
    }

    /// Mark the type static.
    pub fn as_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    /// Mark the type sealed.
    pub fn as_sealed(mut self) -> Self {
        self.is_sealed = true;
        self
    }

    /// Mark the type abstract.
    pub fn as_abstract(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    /// Set the documentation summary.
    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Namespace-qualified display name (`Namespace.Name`, or just `Name` in
    /// the global namespace).
    pub fn full_name(&self) -> String {
        if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.namespace, self.name)
        }
    }

    /// Members of one category, in declaration order.
    pub fn members_of(&self, kind: MemberKind) -> impl Iterator<Item = &Member> {
        self.members.iter().filter(move |m| m.kind == kind)
    }
}

// ============================================================================
// Symbol union
// ============================================================================

/// The closed union of symbol kinds a provider can hand to the snapshot
/// builder.
///
/// Only `Type` symbols can be placed at the snapshot level; `Namespace` is
/// implied by each type's namespace path and `Member` symbols belong inside a
/// [`TypeDef`]. The builder logs and skips anything it cannot place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "symbol", content = "value")]
pub enum Symbol {
    /// A namespace, identified by its dotted path.
    Namespace(String),
    /// A type declaration.
    Type(TypeDef),
    /// A free-standing member (only valid inside a type).
    Member(Member),
}

// ============================================================================
// Capability traits
// ============================================================================

/// Symbols with a declared accessibility.
pub trait HasAccessibility {
    /// Declared accessibility of the symbol.
    fn accessibility(&self) -> Accessibility;
}

impl HasAccessibility for Member {
    fn accessibility(&self) -> Accessibility {
        self.accessibility
    }
}

impl HasAccessibility for TypeDef {
    fn accessibility(&self) -> Accessibility {
        self.accessibility
    }
}

/// Symbols with a callable signature (constructors, methods).
pub trait HasSignature {
    /// Full signature excluding the containing type: name plus ordered
    /// parameter type names.
    fn signature(&self) -> String;
}

impl HasSignature for Member {
    fn signature(&self) -> String {
        let types: Vec<&str> = self.params.iter().map(|p| p.type_name.as_str()).collect();
        format!("{}({})", self.name, types.join(", "))
    }
}

/// Symbols that can carry the deprecation attribute.
pub trait HasDeprecation {
    /// Whether the symbol is flagged deprecated.
    fn is_deprecated(&self) -> bool;
}

impl HasDeprecation for Member {
    fn is_deprecated(&self) -> bool {
        self.is_deprecated
    }
}

impl HasDeprecation for TypeDef {
    fn is_deprecated(&self) -> bool {
        self.is_deprecated
    }
}

impl HasDeprecation for Symbol {
    fn is_deprecated(&self) -> bool {
        match self {
            Symbol::Namespace(_) => false,
            Symbol::Type(t) => t.is_deprecated,
            Symbol::Member(m) => m.is_deprecated,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
