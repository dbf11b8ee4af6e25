use miette::Diagnostic;
use thiserror::Error;

/// Result type for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;

#[derive(Debug, Error, Diagnostic)]
pub enum CatalogError {
    #[error("failed to parse class catalog")]
    #[diagnostic(
        code(typeloom::catalog::toml),
        help("a catalog is a list of [[class]] tables, each with at least a 'name'")
    )]
    Toml {
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to parse class catalog")]
    #[diagnostic(
        code(typeloom::catalog::json),
        help("a JSON catalog is an array of class objects, each with at least a 'name'")
    )]
    Json {
        #[source]
        source: serde_json::Error,
    },

    #[error("'{name}' is not a valid binary class name")]
    #[diagnostic(
        code(typeloom::catalog::invalid_name),
        help("use dotted package segments and '$' for nested classes, e.g. 'java.util.Map$Entry'")
    )]
    InvalidName { name: String },

    #[error("class '{name}' is listed twice")]
    #[diagnostic(code(typeloom::catalog::duplicate))]
    Duplicate { name: String },
}
