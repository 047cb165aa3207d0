#![allow(non_snake_case)]

use super::*;
use crate::model::{ConstraintHints, PrimitiveKind};
use crate::reader::{SourceEnum, SourceField, TypeCatalog};
use test_case::test_case;

fn catalog() -> TypeCatalog {
    let mut catalog = TypeCatalog::new();
    catalog
        .insert_class(SourceClass::new("com.shop.Customer"))
        .unwrap();
    catalog
        .insert_class(SourceClass::new("com.shop.LineItem"))
        .unwrap();
    catalog
        .insert_enum(SourceEnum {
            qualified_name: "com.shop.Status".into(),
            values: vec!["NEW".into(), "PAID".into()],
        })
        .unwrap();
    catalog
}

fn classify(type_name: &str) -> Result<TypeDescriptor, String> {
    let reader = catalog();
    let mut owner = SourceClass::new("com.shop.Order");
    owner.type_params = vec!["T".into()];
    let classifier = Classifier {
        reader: &reader,
        source: &owner,
    };
    classifier.classify(type_name)
}

fn text() -> TypeDescriptor {
    TypeDescriptor::primitive(PrimitiveKind::Text, "String")
}

fn customer() -> TypeDescriptor {
    TypeDescriptor::reference("com.shop.Customer")
}

// ============================================================================
// Classification
// ============================================================================

#[test_case("String", text() ; "java string")]
#[test_case("Customer", customer() ; "sibling reference")]
#[test_case("com.shop.Customer", customer() ; "qualified reference")]
#[test_case("Option<Customer>", customer() ; "option is transparent")]
#[test_case("Box < Customer >", customer() ; "token spacing")]
#[test_case("List<Customer>", TypeDescriptor::list(customer()) ; "java list")]
#[test_case("Vec<String>", TypeDescriptor::list(text()) ; "rust vec")]
#[test_case("java.util.Set<Customer>", TypeDescriptor::set(customer()) ; "qualified set")]
#[test_case("BTreeSet<String>", TypeDescriptor::set(text()) ; "rust set")]
#[test_case("Map<String, Customer>", TypeDescriptor::map(text(), customer()) ; "map")]
#[test_case("Customer[]", TypeDescriptor::array(customer()) ; "java array")]
#[test_case("String[][]", TypeDescriptor::array(TypeDescriptor::array(text())) ; "nested java array")]
#[test_case("[Customer; 4]", TypeDescriptor::array(customer()) ; "rust array")]
#[test_case("[String]", TypeDescriptor::array(text()) ; "rust slice")]
#[test_case("T", TypeDescriptor::generic("T") ; "declared parameter")]
#[test_case("List<T>", TypeDescriptor::list(TypeDescriptor::generic("T")) ; "collection of parameter")]
#[test_case("crate::model::Customer", customer() ; "rust path")]
fn Classifier___classify___accepts(type_name: &str, expected: TypeDescriptor) {
    assert_eq!(classify(type_name), Ok(expected));
}

#[test]
fn Classifier___enum_reference___carries_values() {
    assert_eq!(
        classify("Status"),
        Ok(TypeDescriptor::enumeration(
            "com.shop.Status",
            vec!["NEW".into(), "PAID".into()]
        ))
    );
}

#[test]
fn Classifier___parameterized_primitive___stays_primitive() {
    let ty = classify("DateTime<Utc>").unwrap();

    assert_eq!(ty.primitive_kind(), Some(PrimitiveKind::LocalDateTime));
}

#[test]
fn Classifier___unknown_simple_name___lands_in_owner_package() {
    assert_eq!(
        classify("Warehouse"),
        Ok(TypeDescriptor::reference("com.shop.Warehouse"))
    );
}

#[test]
fn Classifier___unknown_qualified_name___is_kept_as_written() {
    assert_eq!(
        classify("com.depot.Warehouse"),
        Ok(TypeDescriptor::reference("com.depot.Warehouse"))
    );
}

#[test]
fn Classifier___single_letter_class___resolves_before_parameter_check() {
    let mut reader = TypeCatalog::new();
    reader.insert_class(SourceClass::new("g.A")).unwrap();
    reader.insert_class(SourceClass::new("g.B")).unwrap();
    let owner = SourceClass::new("g.A");
    let classifier = Classifier {
        reader: &reader,
        source: &owner,
    };

    assert_eq!(classifier.classify("B"), Ok(TypeDescriptor::reference("g.B")));
    assert_eq!(
        classifier.classify("C1"),
        Err("undeclared type parameter `C1`".to_string())
    );
}

#[test_case("" ; "empty")]
#[test_case("   " ; "blank")]
#[test_case("List<?>" ; "wildcard")]
#[test_case("List<? extends Customer>" ; "bounded wildcard")]
#[test_case("List<String, String>" ; "list arity")]
#[test_case("Map<String>" ; "map arity")]
#[test_case("Optional<>" ; "empty arguments")]
#[test_case("Page<Customer>" ; "parameterized non collection")]
#[test_case("U" ; "undeclared parameter")]
#[test_case("Object" ; "untyped object")]
#[test_case("List<Customer" ; "unclosed")]
#[test_case("&'a str" ; "borrowed")]
#[test_case("Customer Customer" ; "trailing tokens")]
fn Classifier___classify___rejects(type_name: &str) {
    assert!(classify(type_name).is_err(), "{type_name} should be rejected");
}

#[test]
fn Classifier___arity_error___names_expected_count() {
    let reason = classify("Map<String>").unwrap_err();

    assert_eq!(reason, "`Map` expects 2 type arguments, found 1");
}

// ============================================================================
// build_class_model
// ============================================================================

fn order_catalog() -> TypeCatalog {
    let mut catalog = catalog();
    catalog
        .insert_class(
            SourceClass::new("com.shop.Order")
                .with_field(SourceField::new("id", "long").with_hints(ConstraintHints::required()))
                .with_field(SourceField::new("customer", "Customer"))
                .with_field(SourceField::new("anything", "List<?>"))
                .with_field(SourceField::new("items", "List<LineItem>"))
                .with_field(SourceField::new("id", "String")),
        )
        .unwrap();
    catalog
}

#[test]
fn build_class_model___keeps_declared_field_order() {
    let (model, _) = build_class_model(&order_catalog(), "com.shop.Order").unwrap();

    assert_eq!(model.qualified_name, "com.shop.Order");
    assert_eq!(model.field_names(), vec!["id", "customer", "items"]);
    assert!(model.fields[0].hints.required);
    assert_eq!(
        model.fields[2].ty,
        TypeDescriptor::list(TypeDescriptor::reference("com.shop.LineItem"))
    );
}

#[test]
fn build_class_model___reports_unsupported_fields_without_aborting() {
    let (_, diagnostics) = build_class_model(&order_catalog(), "com.shop.Order").unwrap();

    assert_eq!(diagnostics.len(), 2);
    assert!(matches!(
        &diagnostics[0],
        GenerationError::UnsupportedFieldType { field, reason, .. }
            if field == "anything" && reason.contains("wildcard")
    ));
    assert!(matches!(
        &diagnostics[1],
        GenerationError::UnsupportedFieldType { field, reason, .. }
            if field == "id" && reason == "duplicate field name"
    ));
}

#[test]
fn build_class_model___colliding_java_names___keeps_first_field() {
    let mut catalog = TypeCatalog::new();
    catalog
        .insert_class(
            SourceClass::new("g.User")
                .with_field(SourceField::new("user_name", "String"))
                .with_field(SourceField::new("userName", "String"))
                .with_field(SourceField::new("class", "String"))
                .with_field(SourceField::new("class_", "String")),
        )
        .unwrap();

    let (model, diagnostics) = build_class_model(&catalog, "g.User").unwrap();

    let names: Vec<&str> = model.fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["user_name", "class"]);
    assert_eq!(diagnostics.len(), 2);
    assert!(matches!(
        &diagnostics[0],
        GenerationError::UnsupportedFieldType { field, reason, .. }
            if field == "userName" && reason.contains("`user_name`")
    ));
}

#[test]
fn build_class_model___unknown_class___is_type_not_found() {
    let err = build_class_model(&order_catalog(), "com.shop.Missing").unwrap_err();

    assert_eq!(err, GenerationError::type_not_found("com.shop.Missing"));
}
