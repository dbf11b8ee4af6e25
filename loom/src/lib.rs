//! A code model for generating Java-family source.
//!
//! A [`CodeModel`] owns every type a program talks about: classes referenced
//! from a [`ClassResolver`], classes defined in the model, and the types built
//! from them (parameterized types, arrays, wildcards, type variables). The
//! [`Formatter`] prints declarations built on top of the model and decides,
//! per compilation unit, which classes can be imported and written by their
//! simple name.
//!
//! - [`CodeModel`] - Type pool, construction and hierarchy queries
//! - [`Generics`] / [`Generifiable`] - Type parameter lists
//! - [`decl`] - Class, method and field declarations, statements, expressions
//! - [`Formatter`] - Two-phase, import-aware printer
//! - [`CompilationUnit`] / [`SourceTree`] - Rendered files
//!
//! # Example
//!
//! ```
//! use typeloom::{ClassKind, CodeModel, Formatter, decl::ClassDecl};
//!
//! let model = CodeModel::new();
//! let mut class = ClassDecl::new(&model, "com.acme", "Registry", ClassKind::Class).unwrap();
//! let list = model.resolve("java.util.List").unwrap();
//! let string = model.resolve("java.lang.String").unwrap();
//! class.field(
//!     typeloom::decl::Modifiers::private(),
//!     model.narrow(list, &[string]).unwrap(),
//!     "names",
//! ).unwrap();
//!
//! let unit = Formatter::new(&model).write(&class).unwrap();
//! assert!(unit.imports.contains("java.util.List"));
//! assert!(unit.render().contains("private List<String> names;"));
//! ```

pub mod decl;
mod error;
mod format;
mod generics;
mod model;
mod types;
mod unit;

pub use error::{Error, Result};
pub use format::{
    CLOSE_TYPE_ARGS, Declaration, FormatOptions, Formatter, Generable, ImportSet, Indent,
    LineEnding, Mode, Statement,
};
pub use generics::{Generics, Generifiable};
pub use model::{CodeModel, ModelId};
pub use types::{Interfaces, TypeId, TypeKind, WildcardMode};
pub use typeloom_catalog::{
    CatalogError, ClassCatalog, ClassInfo, ClassKind, ClassResolver, JAVA_LANG, OBJECT, Primitive,
};
pub use unit::{CompilationUnit, Overwrite, SourceTree};
