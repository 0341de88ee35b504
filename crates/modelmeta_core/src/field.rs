//! Field descriptors and the raw extraction interface.
//!
//! [`RawClass`] / [`RawField`] / [`RawType`] are the shapes an extraction
//! backend hands to the registry builder: names exactly as written in the
//! source, before any resolution. [`FieldDescriptor`] is the resolved,
//! immutable form stored in the registry.

use crate::identity::TypeIdentity;

/// A declared type name as written in the source, with its type arguments.
///
/// `name` may be a bare simple name (`Person`), a qualified name
/// (`com.example.Person`), or a parameterized outer type whose arguments are
/// carried in `args` (`List` with `args = [Person]`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawType {
    pub name: String,
    pub args: Vec<RawType>,
}

impl RawType {
    pub fn simple(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
        }
    }

    pub fn parameterized(name: impl Into<String>, args: Vec<RawType>) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }
}

/// A field as extracted from a class body, before resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawField {
    pub name: String,
    pub ty: RawType,
    pub is_static: bool,
}

/// One extracted class: its simple name, fully-qualified imports, and fields
/// in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawClass {
    pub simple_name: String,
    pub imports: Vec<String>,
    pub fields: Vec<RawField>,
}

/// Everything extracted from one namespace: the namespace identifier and the
/// classes discovered in it.
#[derive(Debug, Clone)]
pub struct NamespaceInput {
    pub namespace: String,
    pub classes: Vec<RawClass>,
}

/// A resolved field, immutable once built.
///
/// `element_type` is present only for parameterized (collection-like)
/// declared types and records the first resolved type argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: String,
    pub declared_type: TypeIdentity,
    pub element_type: Option<TypeIdentity>,
    pub is_static: bool,
}
