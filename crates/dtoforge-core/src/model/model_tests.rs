#![allow(non_snake_case)]

use super::*;
use test_case::test_case;

#[test_case("String", PrimitiveKind::Text)]
#[test_case("java.lang.String", PrimitiveKind::Text)]
#[test_case("string", PrimitiveKind::Text)]
#[test_case("int", PrimitiveKind::Integer)]
#[test_case("Integer", PrimitiveKind::Integer)]
#[test_case("i32", PrimitiveKind::Integer)]
#[test_case("u64", PrimitiveKind::Long)]
#[test_case("bool", PrimitiveKind::Boolean)]
#[test_case("java.math.BigDecimal", PrimitiveKind::Decimal)]
#[test_case("decimal", PrimitiveKind::Decimal)]
#[test_case("f64", PrimitiveKind::Double)]
#[test_case("chrono::NaiveDate", PrimitiveKind::LocalDate)]
#[test_case("datetime", PrimitiveKind::LocalDateTime)]
#[test_case("uuid::Uuid", PrimitiveKind::Uuid)]
fn PrimitiveKind___from_type_name___recognises_known_names(name: &str, expected: PrimitiveKind) {
    assert_eq!(PrimitiveKind::from_type_name(name), Some(expected));
}

#[test_case("Customer")]
#[test_case("com.shop.Order")]
#[test_case("List")]
fn PrimitiveKind___from_type_name___rejects_composites(name: &str) {
    assert_eq!(PrimitiveKind::from_type_name(name), None);
}

#[test]
fn PrimitiveKind___numeric_groups___are_disjoint() {
    assert!(PrimitiveKind::Long.is_integral());
    assert!(!PrimitiveKind::Long.is_fractional());
    assert!(PrimitiveKind::Decimal.is_fractional());
    assert!(!PrimitiveKind::Decimal.is_integral());
    assert!(!PrimitiveKind::Text.is_numeric());
}

#[test]
fn TypeDescriptor___is_composite___covers_references_and_wrappers() {
    let reference = TypeDescriptor::reference("com.shop.Customer");
    let list = TypeDescriptor::list(TypeDescriptor::primitive(PrimitiveKind::Text, "String"));
    let primitive = TypeDescriptor::primitive(PrimitiveKind::Integer, "int");
    let enumeration = TypeDescriptor::enumeration("com.shop.Status", vec!["NEW".into()]);

    assert!(reference.is_composite());
    assert!(list.is_composite());
    assert!(!primitive.is_composite());
    assert!(!enumeration.is_composite());
}

#[test]
fn TypeDescriptor___referenced_types___walks_map_key_then_value() {
    let ty = TypeDescriptor::map(
        TypeDescriptor::reference("a.Key"),
        TypeDescriptor::list(TypeDescriptor::reference("a.Value")),
    );

    assert_eq!(ty.referenced_types(), vec!["a.Key", "a.Value"]);
}

#[test]
fn TypeDescriptor___map_references___preserves_wrapper_structure() {
    let ty = TypeDescriptor::array(TypeDescriptor::set(TypeDescriptor::reference("a.Item")));

    let mapped = ty.map_references(&mut |name| format!("{name}Dto"));

    assert_eq!(
        mapped,
        TypeDescriptor::array(TypeDescriptor::set(TypeDescriptor::reference("a.ItemDto")))
    );
}

#[test]
fn TypeDescriptor___map_references___leaves_leaf_scalars_alone() {
    let ty = TypeDescriptor::list(TypeDescriptor::generic("T"));

    let mapped = ty.map_references(&mut |_| unreachable!("no references"));

    assert_eq!(mapped, ty);
}

#[test]
fn TypeDescriptor___display___uses_neutral_notation() {
    let ty = TypeDescriptor::map(
        TypeDescriptor::primitive(PrimitiveKind::Text, "String"),
        TypeDescriptor::array(TypeDescriptor::reference("Item")),
    );

    assert_eq!(ty.to_string(), "Map<String, Item[]>");
}

#[test]
fn TypeDescriptor___serde___uses_shape_tag() {
    let ty = TypeDescriptor::list(TypeDescriptor::reference("a.B"));

    let json = serde_json::to_value(&ty).unwrap();

    assert_eq!(json["shape"], "collection");
    assert_eq!(json["kind"], "ordered");
    assert_eq!(json["element"]["shape"], "reference");
    let back: TypeDescriptor = serde_json::from_value(json).unwrap();
    assert_eq!(back, ty);
}

#[test]
fn ConstraintHints___default___is_empty() {
    assert!(ConstraintHints::default().is_empty());
    assert!(!ConstraintHints::required().is_empty());
}

#[test]
fn ConstraintHints___deserialize___fills_missing_with_defaults() {
    let hints: ConstraintHints = serde_json::from_str(r#"{"max_length": 40}"#).unwrap();

    assert!(!hints.required);
    assert_eq!(hints.max_length, Some(40));
    assert!(hints.allowed_values.is_empty());
}

#[test]
fn ClassModel___names___split_package_and_simple_name() {
    let class = ClassModel::new("com.shop.Order");

    assert_eq!(class.simple_name(), "Order");
    assert_eq!(class.package(), "com.shop");
}

#[test]
fn ClassModel___field___finds_by_name() {
    let mut class = ClassModel::new("Order");
    class.fields.push(Field::new(
        "id",
        TypeDescriptor::primitive(PrimitiveKind::Long, "Long"),
    ));

    assert!(class.field("id").is_some());
    assert!(class.field("missing").is_none());
    assert_eq!(class.field_names(), vec!["id"]);
}
