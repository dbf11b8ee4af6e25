//! Properties of the code model that hold across its public API.

use typeloom::{ClassKind, CodeModel, Error, Generifiable, Generics, TypeKind, decl::ClassDecl};

const CATALOG: &str = r#"
[[class]]
name = "pkg.Outer"

[[class]]
name = "pkg.Outer$Inner"

[[class]]
name = "Simple"

[[class]]
name = "com.acme.Repository"
kind = "interface"
interfaces = ["java.lang.Iterable"]
"#;

#[test]
fn test_package_derivation() {
    let model = CodeModel::with_toml_catalog(CATALOG).unwrap();

    let inner = model.resolve("pkg.Outer$Inner").unwrap();
    assert_eq!(model.package(inner).unwrap().as_deref(), Some("pkg"));
    assert_eq!(model.name(inner).unwrap(), "Inner");
    assert_eq!(model.full_name(inner).unwrap(), "pkg.Outer.Inner");
    assert_eq!(model.binary_name(inner).unwrap(), "pkg.Outer$Inner");
    assert_eq!(model.outer(inner).unwrap(), Some(model.resolve("pkg.Outer").unwrap()));

    let simple = model.resolve("Simple").unwrap();
    assert_eq!(model.package(simple).unwrap().as_deref(), Some(""));
    assert_eq!(model.outer(simple).unwrap(), None);
}

#[test]
fn test_resolution_is_memoized_per_model() {
    let a = CodeModel::new();
    let b = CodeModel::new();

    let first = a.resolve("java.util.List").unwrap();
    assert_eq!(a.resolve("java.util.List").unwrap(), first);
    assert_eq!(a.kind(first).unwrap(), TypeKind::Referenced);

    let other = b.resolve("java.util.List").unwrap();
    assert_ne!(first, other);
    assert_eq!(other.owner(), b.id());
}

#[test]
fn test_unknown_class() {
    let model = CodeModel::new();
    let err = model.resolve("com.acme.Missing").unwrap_err();
    assert!(matches!(*err, Error::UnresolvedType { ref name } if name == "com.acme.Missing"));
}

#[test]
fn test_type_parameters_are_per_declaration() {
    let model = CodeModel::new();
    let mut a = ClassDecl::new(&model, "p", "A", ClassKind::Class).unwrap();
    let mut b = ClassDecl::new(&model, "p", "B", ClassKind::Class).unwrap();

    a.generify("T").unwrap();
    assert!(matches!(
        *a.generify("T").unwrap_err(),
        Error::DuplicateTypeParameter { .. }
    ));
    b.generify("T").unwrap();
    assert_eq!(a.type_params().len(), 1);
    assert_eq!(b.type_params().len(), 1);
}

#[test]
fn test_erasure_of_narrowed() {
    let model = CodeModel::new();
    let map = model.resolve("java.util.Map").unwrap();
    let string = model.resolve("java.lang.String").unwrap();

    for args in [vec![string], vec![string, string], vec![string, map, string]] {
        let narrowed = model.narrow(map, &args).unwrap();
        assert_eq!(model.erasure(narrowed).unwrap(), map);
    }
}

#[test]
fn test_empty_substitution_returns_same_type() {
    let model = CodeModel::new();
    let list = model.resolve("java.util.List").unwrap();
    let mut generics = Generics::new();
    let t = generics.introduce(&model, "T").unwrap();
    let list_t = model.narrow(list, &[t]).unwrap();

    assert_eq!(model.substitute(list_t, &[], &[]).unwrap(), list_t);
}

#[test]
fn test_supertypes_of_generic_defined_class() {
    let model = CodeModel::new();
    let list = model.resolve("java.util.List").unwrap();
    let string = model.resolve("java.lang.String").unwrap();

    let mut class = ClassDecl::new(&model, "p", "Names", ClassKind::Class).unwrap();
    let t = class.generify("T").unwrap();
    class.implements(model.narrow(list, &[t]).unwrap()).unwrap();

    let names_of_string = model.narrow(class.ty(), &[string]).unwrap();
    let interfaces = model
        .interfaces(names_of_string)
        .unwrap()
        .collect::<typeloom::Result<Vec<_>>>()
        .unwrap();
    assert_eq!(interfaces, vec![model.narrow(list, &[string]).unwrap()]);

    let list_of_string = model.narrow(list, &[string]).unwrap();
    assert!(model.is_assignable_from(list_of_string, names_of_string).unwrap());
    assert_eq!(
        model.base_class(names_of_string, list).unwrap(),
        Some(list_of_string)
    );
}

#[test]
fn test_catalog_class_without_superclass() {
    let model = CodeModel::with_toml_catalog(
        r#"
        [[class]]
        name = "com.acme.Builder"

        [[class]]
        name = "com.acme.Shape"
        kind = "interface"
        "#,
    )
    .unwrap();
    let builder = model.resolve("com.acme.Builder").unwrap();
    let shape = model.resolve("com.acme.Shape").unwrap();
    let object = model.object();

    assert_eq!(model.superclass(builder).unwrap(), Some(object));
    assert_eq!(model.base_class(builder, object).unwrap(), Some(object));
    assert!(model.is_abstract(shape).unwrap());
    assert!(!model.is_abstract(builder).unwrap());
}

#[test]
fn test_catalog_interface_hierarchy() {
    let model = CodeModel::with_toml_catalog(CATALOG).unwrap();
    let repository = model.resolve("com.acme.Repository").unwrap();
    let iterable = model.resolve("java.lang.Iterable").unwrap();

    assert!(model.is_interface(repository).unwrap());
    assert_eq!(model.superclass(repository).unwrap(), Some(model.object()));
    assert!(model.is_assignable_from(iterable, repository).unwrap());
    assert!(!model.is_assignable_from(repository, iterable).unwrap());
}
