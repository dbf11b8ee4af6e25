//! Declarations, statements and expressions.
//!
//! These nodes describe themselves to a [`Formatter`](crate::Formatter)
//! through [`Declaration`](crate::Declaration),
//! [`Statement`](crate::Statement) and [`Generable`](crate::Generable). They
//! never look at the formatter's mode, so the same calls serve both the
//! collecting and the printing pass.
//!
//! - [`ClassDecl`] - A defined class with fields, methods and nested classes
//! - [`MethodDecl`] - A method or constructor
//! - [`FieldDecl`] / [`Param`] - Variables declared by classes and methods
//! - [`Modifiers`] - Visibility, `static`, `final`, `abstract`
//! - [`stmt`] - Blocks and statements
//! - [`expr`] - Expressions

mod class;
pub mod expr;
mod field;
mod method;
mod mods;
pub mod stmt;

pub use class::ClassDecl;
pub use field::{FieldDecl, Param};
pub use method::MethodDecl;
pub use mods::{Modifiers, Visibility};
