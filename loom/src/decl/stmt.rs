//! Statements and blocks.

use typeloom_catalog::names;

use super::expr::VarRef;
use crate::{Error, Formatter, Generable, Result, Statement, TypeId};

/// `{ ... }`: a sequence of statements.
#[derive(Default)]
pub struct Block {
    statements: Vec<Box<dyn Statement>>,
}

impl Block {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, statement: impl Statement + 'static) -> &mut Self {
        self.statements.push(Box::new(statement));
        self
    }

    /// Append `return expr;`.
    pub fn return_(&mut self, expr: impl Generable + 'static) -> &mut Self {
        self.add(Return::value(expr))
    }

    /// Append an expression statement.
    pub fn expr(&mut self, expr: impl Generable + 'static) -> &mut Self {
        self.add(ExprStatement::new(expr))
    }

    /// Declare a local variable and return a reference to it.
    pub fn local(
        &mut self,
        ty: TypeId,
        name: &str,
        init: Option<Box<dyn Generable>>,
    ) -> Result<VarRef> {
        self.add(LocalVar::new(ty, name, init)?);
        Ok(VarRef::trusted(name))
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }
}

impl Statement for Block {
    fn state(&self, f: &mut Formatter) {
        f.print_char('{').newline().indent();
        for statement in &self.statements {
            f.statement(statement);
        }
        f.outdent().print_char('}').newline();
    }
}

/// `return;` or `return expr;`.
#[derive(Default)]
pub struct Return {
    expr: Option<Box<dyn Generable>>,
}

impl Return {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(expr: impl Generable + 'static) -> Self {
        Self {
            expr: Some(Box::new(expr)),
        }
    }
}

impl Statement for Return {
    fn state(&self, f: &mut Formatter) {
        f.print("return");
        if let Some(expr) = &self.expr {
            f.space().generable(expr);
        }
        f.print_char(';').newline();
    }
}

/// An expression evaluated for its effect: `expr;`.
pub struct ExprStatement {
    expr: Box<dyn Generable>,
}

impl ExprStatement {
    pub fn new(expr: impl Generable + 'static) -> Self {
        Self {
            expr: Box::new(expr),
        }
    }
}

impl Statement for ExprStatement {
    fn state(&self, f: &mut Formatter) {
        f.generable(&self.expr).print_char(';').newline();
    }
}

/// `Type name = init;`.
pub struct LocalVar {
    ty: TypeId,
    name: String,
    init: Option<Box<dyn Generable>>,
}

impl LocalVar {
    pub fn new(ty: TypeId, name: &str, init: Option<Box<dyn Generable>>) -> Result<Self> {
        if !names::is_identifier(name) {
            return Err(Error::InvalidIdentifier {
                name: name.to_string(),
                context: "variable".to_string(),
            }
            .into());
        }
        Ok(Self {
            ty,
            name: name.to_string(),
            init,
        })
    }
}

impl Statement for LocalVar {
    fn state(&self, f: &mut Formatter) {
        f.type_(self.ty).id(&self.name);
        if let Some(init) = &self.init {
            f.print_char('=').generable(init);
        }
        f.print_char(';').newline();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        CodeModel,
        decl::expr::{BinaryOp, Invocation, Literal, New, Target},
    };

    fn print(model: &CodeModel, s: &dyn Statement) -> String {
        let mut f = Formatter::new(model);
        f.statement(s);
        f.finish().unwrap()
    }

    #[test]
    fn test_return() {
        let model = CodeModel::new();
        assert_eq!(print(&model, &Return::new()), "return;\n");
        assert_eq!(print(&model, &Return::value(Literal::str("x"))), "return \"x\";\n");
    }

    #[test]
    fn test_block() {
        let model = CodeModel::new();
        let list = model.resolve("java.util.ArrayList").unwrap();
        let string = model.resolve("java.lang.String").unwrap();
        let strings = model.narrow(list, &[string]).unwrap();

        let mut block = Block::new();
        let names = block
            .local(strings, "names", Some(Box::new(New::new(strings))))
            .unwrap();
        block.expr(
            Invocation::new(Target::expr(names.clone()), "add")
                .unwrap()
                .arg(Literal::str("a")),
        );
        block.return_(BinaryOp::new(names, "!=", Literal::Null));
        assert_eq!(block.len(), 3);

        assert_eq!(
            print(&model, &block),
            "{\n    java.util.ArrayList<java.lang.String> names = new java.util.ArrayList<java.lang.String>();\n    names.add(\"a\");\n    return (names != null);\n}\n"
        );
    }

    #[test]
    fn test_local_rejects_keyword() {
        let model = CodeModel::new();
        let mut block = Block::new();
        let err = block.local(model.object(), "int", None).unwrap_err();
        assert!(matches!(*err, Error::InvalidIdentifier { .. }));
        assert!(block.is_empty());
    }
}
