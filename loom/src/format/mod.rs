//! Two-phase, import-aware source printer.
//!
//! Writing a class takes two passes over the same declaration. The first
//! pass ([`Mode::Collecting`]) prints nothing: it records every class
//! referenced by simple name and every identifier. From those records the
//! formatter decides which simple names are unambiguous and can be imported.
//! The second pass ([`Mode::Printing`]) emits the text, writing imported
//! classes by simple name and every other class by its qualified name.
//!
//! Nodes never look at the mode; they describe themselves through the same
//! calls in both passes.

mod imports;
mod indent;
mod options;
mod writer;

use indexmap::{IndexMap, IndexSet};

pub use self::{
    imports::ImportSet,
    indent::{Indent, LineEnding},
    options::FormatOptions,
    writer::CLOSE_TYPE_ARGS,
};
use self::{imports::ReferenceList, writer::SourceWriter};
use crate::{
    CodeModel, Error, Result, TypeId, TypeKind, WildcardMode, decl::ClassDecl,
    unit::CompilationUnit,
};

/// A node that prints itself as part of an expression or type.
pub trait Generable {
    fn generate(&self, f: &mut Formatter);
}

/// A node that prints itself as a declaration (class, method, field, ...).
pub trait Declaration {
    fn declare(&self, f: &mut Formatter);
}

/// A node that prints itself as a statement.
pub trait Statement {
    fn state(&self, f: &mut Formatter);
}

impl<T: Generable + ?Sized> Generable for &T {
    fn generate(&self, f: &mut Formatter) {
        (*self).generate(f)
    }
}

impl<T: Generable + ?Sized> Generable for Box<T> {
    fn generate(&self, f: &mut Formatter) {
        self.as_ref().generate(f)
    }
}

impl<T: Statement + ?Sized> Statement for Box<T> {
    fn state(&self, f: &mut Formatter) {
        self.as_ref().state(f)
    }
}

impl Generable for TypeId {
    fn generate(&self, f: &mut Formatter) {
        f.type_(*self);
    }
}

/// Which pass the formatter is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Record type references and identifiers; print nothing.
    Collecting,
    /// Emit text.
    Printing,
}

/// Prints model nodes as source text.
///
/// A formatter writes at most one compilation unit: [`Formatter::write`]
/// consumes it. For printing loose fragments, call the printing methods
/// directly and take the text with [`Formatter::finish`]; in that case no
/// class is imported and every class is printed by its qualified name.
///
/// Failures while printing (an error type, a type of another model) do not
/// interrupt the fluent calls. The first one is kept and returned by
/// [`Formatter::finish`] or [`Formatter::write`].
///
/// # Example
///
/// ```
/// use typeloom::{CodeModel, Formatter};
///
/// let model = CodeModel::new();
/// let map = model.resolve("java.util.Map").unwrap();
/// let string = model.resolve("java.lang.String").unwrap();
/// let ty = model.narrow(map, &[string, string]).unwrap();
///
/// let mut f = Formatter::new(&model);
/// f.type_(ty).id("names").print_char(';');
/// assert_eq!(
///     f.finish().unwrap(),
///     "java.util.Map<java.lang.String, java.lang.String> names;"
/// );
/// ```
#[derive(Debug)]
pub struct Formatter {
    model: CodeModel,
    options: FormatOptions,
    mode: Mode,
    writer: SourceWriter,
    collected: IndexMap<String, ReferenceList>,
    imported: IndexSet<TypeId>,
    error: Option<Box<Error>>,
}

impl Formatter {
    /// A formatter with default options.
    pub fn new(model: &CodeModel) -> Self {
        Self::with_options(model, FormatOptions::default())
    }

    /// A formatter using the given settings.
    pub fn with_options(model: &CodeModel, options: FormatOptions) -> Self {
        Self {
            model: model.clone(),
            writer: SourceWriter::new(options.indent),
            options,
            mode: Mode::Printing,
            collected: IndexMap::new(),
            imported: IndexSet::new(),
            error: None,
        }
    }

    /// The model whose types this formatter prints.
    pub fn model(&self) -> &CodeModel {
        &self.model
    }

    /// The current pass.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Settings in effect.
    pub fn options(&self) -> &FormatOptions {
        &self.options
    }

    /// Record the error of a failed model query and continue.
    ///
    /// Only the first recorded error is kept.
    pub fn checked<T>(&mut self, result: Result<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                self.fail(err);
                None
            }
        }
    }

    fn fail(&mut self, err: Box<Error>) {
        if self.error.is_none() {
            tracing::debug!(error = %err, "formatter failed");
            self.error = Some(err);
        }
    }

    // =========================================================================
    // Raw output
    // =========================================================================

    /// Print a token; spacing against the previous token is automatic.
    pub fn print(&mut self, s: &str) -> &mut Self {
        if self.mode == Mode::Printing {
            self.writer.token(s);
        }
        self
    }

    /// Print a single-character token.
    pub fn print_char(&mut self, c: char) -> &mut Self {
        let mut buf = [0; 4];
        self.print(c.encode_utf8(&mut buf))
    }

    /// Print a binary operator with a space on each side.
    pub fn op(&mut self, op: &str) -> &mut Self {
        self.space().print(op).space()
    }

    /// Separate the next token by a space.
    pub fn space(&mut self) -> &mut Self {
        if self.mode == Mode::Printing {
            self.writer.space();
        }
        self
    }

    /// Close a type-argument list.
    pub fn close_type_args(&mut self) -> &mut Self {
        self.print_char(CLOSE_TYPE_ARGS)
    }

    /// End the current line.
    pub fn newline(&mut self) -> &mut Self {
        if self.mode == Mode::Printing {
            self.writer.newline();
        }
        self
    }

    /// Increase the nesting depth of the following lines.
    pub fn indent(&mut self) -> &mut Self {
        if self.mode == Mode::Printing {
            self.writer.indent();
        }
        self
    }

    /// Decrease the nesting depth of the following lines.
    pub fn outdent(&mut self) -> &mut Self {
        if self.mode == Mode::Printing {
            self.writer.outdent();
        }
        self
    }

    // =========================================================================
    // Names
    // =========================================================================

    /// Print a reference to a type.
    ///
    /// While collecting, classes are recorded under their simple name. While
    /// printing, an imported class prints its simple name, a nested class its
    /// outer class followed by `.Name`, and any other class its qualified
    /// name.
    pub fn type_(&mut self, ty: TypeId) -> &mut Self {
        if let Err(err) = self.emit_type(ty) {
            self.fail(err);
        }
        self
    }

    fn emit_type(&mut self, ty: TypeId) -> Result<()> {
        let model = self.model.clone();
        match model.kind(ty)? {
            TypeKind::Primitive | TypeKind::Null => {
                self.print(&model.name(ty)?);
            }
            TypeKind::Referenced | TypeKind::Direct | TypeKind::Defined => {
                self.emit_class(ty)?;
            }
            TypeKind::TypeVar => {
                self.id(&model.name(ty)?);
            }
            TypeKind::TypeVarClass => {
                let wrapped = model.wrapped_class(ty)?;
                self.id(&model.name(wrapped)?);
                let params = model.type_params(wrapped)?;
                if !params.is_empty() {
                    self.print_char('<');
                    for (i, param) in params.into_iter().enumerate() {
                        if i > 0 {
                            self.print_char(',');
                        }
                        self.emit_type(param)?;
                    }
                    self.close_type_args();
                }
            }
            TypeKind::Narrowed => {
                self.emit_type(model.erasure(ty)?)?;
                self.print_char('<');
                for (i, arg) in model.type_args(ty)?.into_iter().enumerate() {
                    if i > 0 {
                        self.print_char(',');
                    }
                    self.emit_type(arg)?;
                }
                self.close_type_args();
            }
            TypeKind::Array => {
                self.emit_type(model.element_type(ty)?)?;
                self.print("[]");
            }
            TypeKind::Wildcard => {
                if let Some((bound, mode)) = model.wildcard_bound(ty)? {
                    self.print("?");
                    if mode != WildcardMode::Extends || bound != model.object() {
                        self.space().print(mode.keyword());
                        self.emit_type(bound)?;
                    }
                }
            }
            TypeKind::Error => {
                // naming an error type reports it
                model.name(ty)?;
            }
        }
        Ok(())
    }

    fn emit_class(&mut self, ty: TypeId) -> Result<()> {
        let model = self.model.clone();
        let name = model.name(ty)?;
        match self.mode {
            Mode::Collecting => {
                self.collected.entry(name).or_default().add(ty);
            }
            Mode::Printing => {
                if self.imported.contains(&ty) {
                    self.print(&name);
                } else if let Some(outer) = model.outer(ty)? {
                    self.emit_type(outer)?;
                    self.print_char('.').print(&name);
                } else {
                    self.print(&model.full_name(ty)?);
                }
            }
        }
        Ok(())
    }

    /// Print an identifier.
    ///
    /// While collecting, an identifier that equals the simple name of a
    /// referenced class keeps that class from being imported.
    pub fn id(&mut self, id: &str) -> &mut Self {
        match self.mode {
            Mode::Printing => {
                self.print(id);
            }
            Mode::Collecting => {
                let has_nested = match self.collected.get(id) {
                    Some(list) => {
                        let classes = list.classes().to_vec();
                        let mut nested = false;
                        for class in classes {
                            if let Some(outer) = self.checked(self.model.outer(class)) {
                                nested |= outer.is_some();
                            }
                        }
                        nested
                    }
                    None => false,
                };
                tracing::trace!(id, has_nested, "identifier collected");
                self.collected.entry(id.to_string()).or_default().set_id(!has_nested);
            }
        }
        self
    }

    // =========================================================================
    // Nodes
    // =========================================================================

    /// Print an expression or type.
    pub fn generable(&mut self, g: &dyn Generable) -> &mut Self {
        g.generate(self);
        self
    }

    /// Print the items separated by commas.
    pub fn generables<G: Generable>(&mut self, items: impl IntoIterator<Item = G>) -> &mut Self {
        for (i, item) in items.into_iter().enumerate() {
            if i > 0 {
                self.print_char(',');
            }
            item.generate(self);
        }
        self
    }

    /// Print a declaration.
    pub fn declaration(&mut self, d: &dyn Declaration) -> &mut Self {
        d.declare(self);
        self
    }

    /// Print a statement, on its own line.
    pub fn statement(&mut self, s: &dyn Statement) -> &mut Self {
        s.state(self);
        self
    }

    /// Print a type variable in declaration form: `T` or `T extends Bound`.
    pub fn type_param(&mut self, var: TypeId) -> &mut Self {
        let model = self.model.clone();
        let Some(name) = self.checked(model.name(var)) else {
            return self;
        };
        self.id(&name);
        if let Some(Some(bound)) = self.checked(model.bound(var)) {
            self.print("extends").type_(bound);
        }
        self
    }

    // =========================================================================
    // Output
    // =========================================================================

    /// Take the printed text.
    pub fn finish(self) -> Result<String> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.writer.finish(self.options.line_ending)),
        }
    }

    /// Write a top-level class as one compilation unit.
    pub fn write(mut self, class: &ClassDecl) -> Result<CompilationUnit> {
        let model = self.model.clone();
        let ty = class.ty();
        model.check(ty)?;
        let class_name = model.name(ty)?;
        let package = model.package(ty)?.unwrap_or_default();

        self.mode = Mode::Collecting;
        self.declaration(class);
        if let Some(err) = self.error.take() {
            return Err(err);
        }

        let unit_names = model
            .package_classes(&package)
            .into_iter()
            .map(|c| model.name(c))
            .collect::<Result<Vec<_>>>()?;
        for list in self.collected.values() {
            if list.is_id()
                || list.collides(&model, &self.options.implicit_packages, &unit_names)?
            {
                continue;
            }
            let &[class] = list.classes() else {
                continue;
            };
            if self.options.never_import.contains(&model.full_name(class)?) {
                continue;
            }
            self.imported.insert(class);
        }
        // the class being written is always accessible
        self.imported.insert(ty);

        tracing::debug!(
            class = %class_name,
            references = self.collected.len(),
            imported = self.imported.len(),
            "collected references",
        );

        self.mode = Mode::Printing;
        self.declaration(class);
        if let Some(err) = self.error.take() {
            return Err(err);
        }

        let mut imports = ImportSet::new();
        for &class in &self.imported {
            if !imports::is_implicit(&model, class, &package, &self.options.implicit_packages)? {
                imports.add(model.full_name(model.erasure(class)?)?);
            }
        }

        Ok(CompilationUnit {
            package,
            class_name,
            imports,
            body: self.writer.finish(self.options.line_ending),
            line_ending: self.options.line_ending,
        })
    }
}
