//! External class descriptors for the typeloom code model.
//!
//! The code model never authors these classes; it only refers to them. This
//! crate describes them the way a host runtime would report them:
//!
//! - [`ClassInfo`] - One externally compiled class (kind, supertypes, nesting)
//! - [`ClassResolver`] - Lookup of a [`ClassInfo`] by binary name
//! - [`ClassCatalog`] - Insertion-ordered resolver, loadable from TOML or JSON
//! - [`Primitive`] - Primitive keywords, descriptors and their boxed classes
//! - [`names`] - Binary-name helpers (simple name, qualified name, package)

mod catalog;
mod error;
mod info;
pub mod names;
mod primitive;

pub use catalog::{ClassCatalog, ClassResolver};
pub use error::{CatalogError, Result};
pub use info::{ClassInfo, ClassKind};
pub use primitive::Primitive;

/// Binary name of the universal root type.
pub const OBJECT: &str = "java.lang.Object";

/// Package whose classes are visible without an import.
pub const JAVA_LANG: &str = "java.lang";
