use miette::Diagnostic;
use thiserror::Error;
use typeloom_catalog::CatalogError;

use crate::ModelId;

/// Result type for code model operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("type parameter '{name}' is already declared")]
    #[diagnostic(
        code(typeloom::duplicate_type_parameter),
        help("type parameter names must be unique within one declaration")
    )]
    DuplicateTypeParameter { name: String },

    #[error("'{name}' is not a valid {context} name")]
    #[diagnostic(
        code(typeloom::invalid_identifier),
        help("names must start with a letter, '_' or '$' and must not be a reserved word")
    )]
    InvalidIdentifier { name: String, context: String },

    #[error("class '{name}' is already defined")]
    #[diagnostic(code(typeloom::duplicate_class))]
    DuplicateClass { name: String },

    #[error("cannot narrow '{name}' with an empty argument list")]
    #[diagnostic(
        code(typeloom::empty_narrowing),
        help("pass at least one type argument")
    )]
    EmptyNarrowing { name: String },

    #[error("primitive type '{name}' cannot be used as {context}")]
    #[diagnostic(
        code(typeloom::primitive_not_allowed),
        help("use the boxed class instead")
    )]
    PrimitiveNotAllowed { name: String, context: String },

    #[error("'{name}' is not a type variable")]
    #[diagnostic(code(typeloom::not_a_type_variable))]
    NotATypeVariable { name: String },

    #[error("type variable '{name}' already has a bound")]
    #[diagnostic(code(typeloom::bound_already_set))]
    BoundAlreadySet { name: String },

    #[error("expected {expected} type arguments, found {found}")]
    #[diagnostic(code(typeloom::arity_mismatch))]
    ArityMismatch { expected: usize, found: usize },

    #[error("type belongs to model {owner}, not to model {model}")]
    #[diagnostic(
        code(typeloom::foreign_owner),
        help("types can only be combined and printed within the model that created them")
    )]
    ForeignOwner { owner: ModelId, model: ModelId },

    #[error("'{name}' is not an array type")]
    #[diagnostic(code(typeloom::not_an_array))]
    NotAnArray { name: String },

    #[error("'{name}' is not a class defined in this model")]
    #[diagnostic(code(typeloom::not_a_defined_class))]
    NotADefinedClass { name: String },

    #[error("failed to parse format options")]
    #[diagnostic(
        code(typeloom::invalid_options),
        help("supported keys are 'indent', 'line_ending', 'implicit_packages' and 'never_import'")
    )]
    InvalidOptions {
        #[source]
        source: toml::de::Error,
    },

    #[error("class '{name}' is not known to the class resolver")]
    #[diagnostic(
        code(typeloom::unresolved_type),
        help("add the class to the catalog the model was created with")
    )]
    UnresolvedType { name: String },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Catalog(#[from] CatalogError),

    #[error("error type used in emitted code: {message}")]
    #[diagnostic(
        code(typeloom::error_type_used),
        help("error types are placeholders and can never be printed")
    )]
    ErrorTypeUsed { message: String },
}

impl From<CatalogError> for Box<Error> {
    fn from(err: CatalogError) -> Self {
        Box::new(Error::Catalog(err))
    }
}
