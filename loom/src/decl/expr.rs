//! Expressions.
//!
//! Every expression is a [`Generable`]; composite expressions own their
//! operands as boxed trait objects, so any node (including a plain
//! [`TypeId`]) can appear as an operand.

use std::fmt::Write as _;

use typeloom_catalog::names;

use crate::{CodeModel, Error, Formatter, Generable, Result, TypeId};

type Operand = Box<dyn Generable>;

fn operand(g: impl Generable + 'static) -> Operand {
    Box::new(g)
}

/// A literal value.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Int(i32),
    /// Printed with an `L` suffix.
    Long(i64),
    Boolean(bool),
    Str(String),
    Char(char),
    Null,
}

impl Literal {
    pub fn str(s: impl Into<String>) -> Self {
        Self::Str(s.into())
    }
}

impl Generable for Literal {
    fn generate(&self, f: &mut Formatter) {
        match self {
            Self::Int(n) => f.print(&n.to_string()),
            Self::Long(n) => f.print(&format!("{n}L")),
            Self::Boolean(b) => f.print(if *b { "true" } else { "false" }),
            Self::Str(s) => f.print(&quote(s, '"')),
            Self::Char(c) => f.print(&quote(&c.to_string(), '\'')),
            Self::Null => f.print("null"),
        };
    }
}

/// Quote `s`, escaping what a source literal cannot hold as is.
fn quote(s: &str, delimiter: char) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push(delimiter);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{8}' => out.push_str("\\b"),
            '\u{c}' => out.push_str("\\f"),
            c if c == delimiter => {
                out.push('\\');
                out.push(c);
            }
            c if c.is_control() || u32::from(c) > 0x7e => {
                let mut units = [0; 2];
                for unit in c.encode_utf16(&mut units) {
                    let _ = write!(out, "\\u{unit:04x}");
                }
            }
            c => out.push(c),
        }
    }
    out.push(delimiter);
    out
}

/// A reference to a local variable, parameter or `this`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarRef {
    name: String,
}

impl VarRef {
    /// Fails with [`Error::InvalidIdentifier`] unless `name` is an identifier
    /// or `this`.
    pub fn new(name: &str) -> Result<Self> {
        if name != "this" && !names::is_identifier(name) {
            return Err(Error::InvalidIdentifier {
                name: name.to_string(),
                context: "variable".to_string(),
            }
            .into());
        }
        Ok(Self {
            name: name.to_string(),
        })
    }

    /// The `this` reference.
    pub fn this() -> Self {
        Self::trusted("this")
    }

    /// For names validated by the declaration that introduced them.
    pub(crate) fn trusted(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Generable for VarRef {
    fn generate(&self, f: &mut Formatter) {
        f.id(&self.name);
    }
}

/// `(lhs op rhs)`.
pub struct BinaryOp {
    lhs: Operand,
    op: &'static str,
    rhs: Operand,
}

impl BinaryOp {
    pub fn new(
        lhs: impl Generable + 'static,
        op: &'static str,
        rhs: impl Generable + 'static,
    ) -> Self {
        Self {
            lhs: operand(lhs),
            op,
            rhs: operand(rhs),
        }
    }
}

impl Generable for BinaryOp {
    fn generate(&self, f: &mut Formatter) {
        f.print_char('(')
            .generable(&self.lhs)
            .op(self.op)
            .generable(&self.rhs)
            .print_char(')');
    }
}

/// `lhs = rhs`.
pub struct Assign {
    lhs: Operand,
    rhs: Operand,
}

impl Assign {
    pub fn new(lhs: impl Generable + 'static, rhs: impl Generable + 'static) -> Self {
        Self {
            lhs: operand(lhs),
            rhs: operand(rhs),
        }
    }
}

impl Generable for Assign {
    fn generate(&self, f: &mut Formatter) {
        f.generable(&self.lhs).print_char('=').generable(&self.rhs);
    }
}

/// What a method or field is selected from.
#[derive(Default)]
pub enum Target {
    /// Unqualified: a member of the enclosing class.
    #[default]
    None,
    Expr(Operand),
    /// A static member of a type.
    Type(TypeId),
}

impl Target {
    pub fn expr(e: impl Generable + 'static) -> Self {
        Self::Expr(operand(e))
    }

    fn generate_prefix(&self, f: &mut Formatter) {
        match self {
            Self::None => {}
            Self::Expr(e) => {
                f.generable(e).print_char('.');
            }
            Self::Type(ty) => {
                f.type_(*ty).print_char('.');
            }
        }
    }
}

/// `new Type(args)`.
pub struct New {
    ty: TypeId,
    args: Vec<Operand>,
}

impl New {
    pub fn new(ty: TypeId) -> Self {
        Self {
            ty,
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Generable + 'static) -> Self {
        self.args.push(operand(arg));
        self
    }
}

impl Generable for New {
    fn generate(&self, f: &mut Formatter) {
        f.print("new")
            .type_(self.ty)
            .print_char('(')
            .generables(&self.args)
            .print_char(')');
    }
}

/// A method call.
pub struct Invocation {
    target: Target,
    method: String,
    args: Vec<Operand>,
}

impl Invocation {
    pub fn new(target: Target, method: &str) -> Result<Self> {
        if !names::is_identifier(method) {
            return Err(Error::InvalidIdentifier {
                name: method.to_string(),
                context: "method".to_string(),
            }
            .into());
        }
        Ok(Self {
            target,
            method: method.to_string(),
            args: Vec::new(),
        })
    }

    pub fn arg(mut self, arg: impl Generable + 'static) -> Self {
        self.args.push(operand(arg));
        self
    }
}

impl Generable for Invocation {
    fn generate(&self, f: &mut Formatter) {
        self.target.generate_prefix(f);
        f.id(&self.method)
            .print_char('(')
            .generables(&self.args)
            .print_char(')');
    }
}

/// `((Type) expr)`.
pub struct Cast {
    ty: TypeId,
    expr: Operand,
}

impl Cast {
    pub fn new(ty: TypeId, expr: impl Generable + 'static) -> Self {
        Self {
            ty,
            expr: operand(expr),
        }
    }
}

impl Generable for Cast {
    fn generate(&self, f: &mut Formatter) {
        f.print_char('(')
            .print_char('(')
            .type_(self.ty)
            .print_char(')')
            .generable(&self.expr)
            .print_char(')');
    }
}

/// `Type.class`, always of the raw type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassLiteral {
    ty: TypeId,
}

impl ClassLiteral {
    pub fn new(model: &CodeModel, ty: TypeId) -> Result<Self> {
        Ok(Self {
            ty: model.erasure(ty)?,
        })
    }
}

impl Generable for ClassLiteral {
    fn generate(&self, f: &mut Formatter) {
        f.type_(self.ty).print_char('.').print("class");
    }
}

/// `target.name`.
pub struct FieldRef {
    target: Target,
    name: String,
}

impl FieldRef {
    pub fn new(target: Target, name: &str) -> Result<Self> {
        if !names::is_identifier(name) {
            return Err(Error::InvalidIdentifier {
                name: name.to_string(),
                context: "field".to_string(),
            }
            .into());
        }
        Ok(Self {
            target,
            name: name.to_string(),
        })
    }
}

impl Generable for FieldRef {
    fn generate(&self, f: &mut Formatter) {
        self.target.generate_prefix(f);
        f.id(&self.name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn print(model: &CodeModel, g: &dyn Generable) -> String {
        let mut f = Formatter::new(model);
        f.generable(g);
        f.finish().unwrap()
    }

    #[test]
    fn test_literals() {
        let model = CodeModel::new();
        assert_eq!(print(&model, &Literal::Int(-3)), "-3");
        assert_eq!(print(&model, &Literal::Long(7)), "7L");
        assert_eq!(print(&model, &Literal::Boolean(true)), "true");
        assert_eq!(print(&model, &Literal::Null), "null");
        assert_eq!(print(&model, &Literal::Char('\'')), r"'\''");
        assert_eq!(
            print(&model, &Literal::str("say \"hi\"\n\\é")),
            r#""say \"hi\"\n\\\u00e9""#
        );
    }

    #[test]
    fn test_var_ref_validation() {
        assert!(VarRef::new("count").is_ok());
        assert_eq!(VarRef::new("this").unwrap(), VarRef::this());
        let err = VarRef::new("class").unwrap_err();
        assert!(matches!(*err, Error::InvalidIdentifier { .. }));
    }

    #[test]
    fn test_binary_and_assign() {
        let model = CodeModel::new();
        let a = VarRef::new("a").unwrap();
        let sum = BinaryOp::new(a.clone(), "+", Literal::Int(1));
        assert_eq!(print(&model, &sum), "(a + 1)");

        let assign = Assign::new(FieldRef::new(Target::expr(VarRef::this()), "a").unwrap(), sum);
        assert_eq!(print(&model, &assign), "this.a = (a + 1)");
    }

    #[test]
    fn test_new_and_invocation() {
        let model = CodeModel::new();
        let list = model.resolve("java.util.ArrayList").unwrap();
        let string = model.resolve("java.lang.String").unwrap();
        let strings = model.narrow(list, &[string]).unwrap();

        let created = New::new(strings);
        insta::assert_snapshot!(print(&model, &created), @"new java.util.ArrayList<java.lang.String>()");

        let call = Invocation::new(Target::expr(created), "add")
            .unwrap()
            .arg(Literal::str("x"))
            .arg(Literal::Int(2));
        insta::assert_snapshot!(
            print(&model, &call),
            @r#"new java.util.ArrayList<java.lang.String>().add("x", 2)"#
        );

        let call = Invocation::new(Target::Type(string), "valueOf")
            .unwrap()
            .arg(Literal::Boolean(false));
        assert_eq!(print(&model, &call), "java.lang.String.valueOf(false)");
    }

    #[test]
    fn test_cast_and_class_literal() {
        let model = CodeModel::new();
        let list = model.resolve("java.util.List").unwrap();
        let string = model.resolve("java.lang.String").unwrap();
        let strings = model.narrow(list, &[string]).unwrap();

        let cast = Cast::new(string, VarRef::new("o").unwrap());
        assert_eq!(print(&model, &cast), "((java.lang.String) o)");

        let literal = ClassLiteral::new(&model, strings).unwrap();
        assert_eq!(print(&model, &literal), "java.util.List.class");
    }
}
