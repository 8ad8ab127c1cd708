#![allow(non_snake_case)]

use super::*;
use test_case::test_case;

#[test_case(GenerateError::Catalog(CatalogError::Config("x".into())), 1, "Catalog")]
#[test_case(
    GenerateError::Filesystem { path: "/tmp".into(), reason: "denied".into() },
    2,
    "Filesystem"
)]
#[test_case(GenerateError::invalid_tagging("VmInstanceVO", "x"), 3, "InvalidSchemaTagging")]
#[test_case(
    GenerateError::Instantiation { type_name: "E".into(), reason: "x".into() },
    4,
    "Instantiation"
)]
#[test_case(GenerateError::CyclicHierarchy { chain: vec![] }, 5, "CyclicHierarchy")]
#[test_case(GenerateError::Render("x".into()), 6, "Render")]
fn GenerateError___variant___maps_to_code(error: GenerateError, expected: u32, variant: &str) {
    assert_eq!(error.error_code(), expected, "{variant} should map to {expected}");
}

#[test]
fn GenerateError___cyclic_hierarchy___displays_chain() {
    let err = GenerateError::CyclicHierarchy {
        chain: vec!["A".into(), "B".into(), "A".into()],
    };

    assert_eq!(err.to_string(), "cyclic type hierarchy: A -> B -> A");
}

#[test]
fn GenerateError___catalog___is_transparent() {
    let err: GenerateError = CatalogError::Config("bad schema".into()).into();

    assert_eq!(err.to_string(), "configuration error: bad schema");
}

#[test]
fn GenerateError___filesystem___includes_path() {
    let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");

    let err = GenerateError::filesystem(Path::new("/srv/out"), io);

    assert!(err.to_string().starts_with("filesystem failure at /srv/out"));
}
