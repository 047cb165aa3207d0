#![allow(non_snake_case)]

use super::*;

const SHOP_TOML: &str = r#"
[[classes]]
qualified_name = "com.shop.Order"

[[classes.fields]]
name = "id"
type = "Long"
required = true

[[classes.fields]]
name = "items"
type = "List<LineItem>"
min_length = 1
comment = "Ordered items"

[[classes]]
qualified_name = "com.shop.LineItem"

[[classes.fields]]
name = "price"
type = "BigDecimal"
digits = { integer = 10, fraction = 2 }

[[enums]]
qualified_name = "com.shop.Status"
values = ["NEW", "PAID"]
"#;

fn shop() -> TypeCatalog {
    TypeCatalog::from_toml(SHOP_TOML).unwrap()
}

// ============================================================================
// Loading
// ============================================================================

#[test]
fn TypeCatalog___from_toml___reads_classes_and_enums() {
    let catalog = shop();

    assert_eq!(catalog.len(), 3);
    assert_eq!(
        catalog.class_names().collect::<Vec<_>>(),
        vec!["com.shop.LineItem", "com.shop.Order"]
    );
    assert_eq!(catalog.enum_names().collect::<Vec<_>>(), vec!["com.shop.Status"]);
}

#[test]
fn TypeCatalog___from_toml___flattens_hints_onto_fields() {
    let order = shop().resolve_fields("com.shop.Order").unwrap();

    assert_eq!(order.fields[0].name, "id");
    assert!(order.fields[0].hints.required);
    assert_eq!(order.fields[1].type_name, "List<LineItem>");
    assert_eq!(order.fields[1].hints.min_length, Some(1));
    assert_eq!(order.fields[1].comment.as_deref(), Some("Ordered items"));
}

#[test]
fn TypeCatalog___from_json___reads_same_layout() {
    let json = r#"{
        "classes": [
            {
                "qualified_name": "a.Node",
                "type_params": ["T"],
                "fields": [
                    {"name": "value", "type": "T"},
                    {"name": "next", "type": "Node", "max": 10, "serialized_name": "nxt"}
                ]
            }
        ]
    }"#;

    let catalog = TypeCatalog::from_json(json).unwrap();
    let node = catalog.resolve_fields("a.Node").unwrap();

    assert_eq!(node.type_params, vec!["T"]);
    assert_eq!(node.fields[1].hints.max, Some(10));
    assert_eq!(node.fields[1].serialized_name.as_deref(), Some("nxt"));
}

#[test]
fn TypeCatalog___duplicate_name___is_catalog_error() {
    let toml = r#"
[[classes]]
qualified_name = "a.Same"

[[enums]]
qualified_name = "a.Same"
"#;

    let err = TypeCatalog::from_toml(toml).unwrap_err();

    assert!(matches!(err, GenerationError::CatalogError(msg) if msg.contains("a.Same")));
}

#[test]
fn TypeCatalog___malformed_json___is_catalog_error() {
    let err = TypeCatalog::from_json("{ not json").unwrap_err();

    assert_eq!(err.error_code(), 5);
}

#[test]
fn TypeCatalog___load_missing_file___is_catalog_error() {
    let err = TypeCatalog::load("/definitely/not/here.json").unwrap_err();

    assert!(matches!(err, GenerationError::CatalogError(_)));
}

// ============================================================================
// SourceReader
// ============================================================================

#[test]
fn TypeCatalog___resolve_fields_unknown___is_type_not_found() {
    let err = shop().resolve_fields("com.shop.Missing").unwrap_err();

    assert_eq!(err, GenerationError::type_not_found("com.shop.Missing"));
}

#[test]
fn TypeCatalog___resolve_enum___returns_values_only_for_enums() {
    let catalog = shop();

    assert_eq!(
        catalog.resolve_enum("com.shop.Status"),
        Some(vec!["NEW".to_string(), "PAID".to_string()])
    );
    assert_eq!(catalog.resolve_enum("com.shop.Order"), None);
}

#[test]
fn TypeCatalog___resolve_name___prefers_exact_then_package() {
    let mut catalog = shop();
    catalog
        .insert_class(SourceClass::new("com.other.LineItem"))
        .unwrap();

    assert_eq!(
        catalog.resolve_name("com.other.LineItem", "com.shop.Order"),
        Some("com.other.LineItem".to_string())
    );
    assert_eq!(
        catalog.resolve_name("LineItem", "com.shop.Order"),
        Some("com.shop.LineItem".to_string())
    );
}

#[test]
fn TypeCatalog___resolve_name___falls_back_to_unique_simple_name() {
    let catalog = shop();

    assert_eq!(
        catalog.resolve_name("Status", "x.Elsewhere"),
        Some("com.shop.Status".to_string())
    );
    assert_eq!(
        catalog.resolve_name("crate::model::Order", "x.Elsewhere"),
        Some("com.shop.Order".to_string())
    );
}

#[test]
fn TypeCatalog___resolve_name___ambiguous_or_unknown_is_none() {
    let mut catalog = shop();
    catalog
        .insert_class(SourceClass::new("com.other.LineItem"))
        .unwrap();

    assert_eq!(catalog.resolve_name("LineItem", "x.Elsewhere"), None);
    assert_eq!(catalog.resolve_name("Nope", "com.shop.Order"), None);
    assert_eq!(catalog.resolve_name("com.nope.Order", "com.shop.Order"), None);
}

#[test]
fn SourceReader___reference_impl___delegates() {
    fn count_fields<R: SourceReader>(reader: R, name: &str) -> usize {
        reader.resolve_fields(name).map(|c| c.fields.len()).unwrap_or(0)
    }
    let catalog = shop();

    assert_eq!(count_fields(&catalog, "com.shop.Order"), 2);
}
