//! End-to-end generation tests
//!
//! Runs complete requests through `generate` against catalog and Rust source
//! readers, and checks that independent requests can run in parallel.

use dtoforge_core::prelude::*;
use dtoforge_core::{Provenance, ValidationNamespace};
use std::thread;

const SHOP_CATALOG: &str = r#"{
  "classes": [
    {
      "qualified_name": "com.shop.Order",
      "fields": [
        { "name": "id", "type": "int" },
        { "name": "customer", "type": "Customer" },
        { "name": "items", "type": "Collection<LineItem>" }
      ]
    },
    {
      "qualified_name": "com.shop.Customer",
      "fields": [
        { "name": "name", "type": "String", "required": true }
      ]
    },
    {
      "qualified_name": "com.shop.LineItem",
      "fields": [
        { "name": "sku", "type": "String" },
        { "name": "qty", "type": "int", "min": 1 }
      ]
    },
    {
      "qualified_name": "com.shop.Node",
      "fields": [
        { "name": "value", "type": "int" },
        { "name": "next", "type": "Node" }
      ]
    },
    {
      "qualified_name": "com.shop.Invoice",
      "fields": [
        { "name": "total", "type": "BigDecimal" },
        { "name": "vendor", "type": "Vendor" }
      ]
    }
  ]
}"#;

fn shop() -> TypeCatalog {
    TypeCatalog::from_json(SHOP_CATALOG).unwrap()
}

#[test]
fn test_order_example_generates_three_linked_classes() {
    let output = generate(&shop(), &GenerationRequest::new("com.shop.Order"));

    assert!(output.is_clean(), "{:?}", output.diagnostics);
    assert_eq!(
        output.forest.emission_order(),
        vec![
            "com.shop.OrderDto",
            "com.shop.CustomerDto",
            "com.shop.LineItemDto"
        ]
    );

    let order = &output.rendered[0].source;
    assert!(order.contains("    private Integer id;\n"));
    assert!(order.contains("    @Valid\n    private CustomerDto customer;\n"));
    assert!(order.contains("    @Valid\n    private List<LineItemDto> items;\n"));

    let customer = &output.rendered[1].source;
    assert!(customer.contains("    @NotNull\n    private String name;\n"));

    let line_item = &output.rendered[2].source;
    assert!(line_item.contains("\n\n    private String sku;\n"));
    assert!(line_item.contains("    @Min(1)\n    private Integer qty;\n"));
}

#[test]
fn test_self_reference_generates_single_class() {
    let output = generate(&shop(), &GenerationRequest::new("com.shop.Node"));

    assert!(output.is_clean());
    assert_eq!(output.forest.len(), 1);
    assert!(output.rendered[0].source.contains("    private NodeDto next;\n"));
}

#[test]
fn test_missing_nested_type_reports_and_continues() {
    let output = generate(&shop(), &GenerationRequest::new("com.shop.Invoice"));

    assert_eq!(output.rendered.len(), 2);
    assert_eq!(
        output.diagnostics,
        vec![GenerationError::TypeNotFound {
            type_name: "com.shop.Vendor".into(),
            referenced_from: Some("com.shop.InvoiceDto.vendor".into()),
        }]
    );
    assert!(output.rendered[0].source.contains("private BigDecimal total;"));
    let vendor = &output.rendered[1];
    assert_eq!(vendor.qualified_name, "com.shop.VendorDto");
    assert!(vendor.source.starts_with("package com.shop;\n"));
}

#[test]
fn test_request_from_toml_drives_rendering() {
    let request = GenerationRequest::from_toml(
        r#"
root = "com.shop.Order"

[convention]
suffix = "Response"

[options]
generate_accessors = true
target_package = "com.shop.api"
validation_namespace = "javax"
"#,
    )
    .unwrap();

    let output = generate(&shop(), &request);

    assert_eq!(request.options.validation_namespace, ValidationNamespace::Javax);
    let customer = &output.rendered[1];
    assert_eq!(customer.qualified_name, "com.shop.api.CustomerResponse");
    assert!(customer.source.starts_with("package com.shop.api;\n"));
    assert!(customer.source.contains("import javax.validation.constraints.NotNull;\n"));
    assert!(customer.source.contains("public String getName() {"));
    assert_eq!(
        output.forest.by_source("com.shop.Customer").unwrap().model.provenance,
        Provenance::Nested {
            parent: "com.shop.api.OrderResponse".into(),
            field: "customer".into(),
        }
    );
}

#[test]
fn test_rust_source_reader_end_to_end() {
    let reader = RustSourceReader::parse_source(
        r#"
        pub struct Account {
            /// Login handle
            #[validate(required, length(min = 3, max = 20))]
            pub user_name: String,
            pub roles: Vec<Role>,
            pub manager: Option<Box<Account>>,
            #[serde(rename = "createdAt")]
            pub created: chrono::NaiveDateTime,
        }

        pub enum Role {
            Admin,
            Member,
        }
        "#,
        "com.acme",
    )
    .unwrap();

    let output = generate(&reader, &GenerationRequest::new("com.acme.Account"));

    assert!(output.is_clean(), "{:?}", output.diagnostics);
    assert_eq!(output.forest.len(), 1);
    let source = &output.rendered[0].source;
    assert!(source.contains(
        "    /**\n     * Login handle\n     */\n    @NotNull\n    @Size(min = 3, max = 20)\n    @JsonProperty(\"user_name\")\n    private String userName;\n"
    ));
    assert!(source.contains("    private List<Role> roles;\n"));
    assert!(source.contains("    @Valid\n    private AccountDto manager;\n"));
    assert!(source.contains("    @JsonProperty(\"createdAt\")\n    private LocalDateTime created;\n"));
}

#[test]
fn test_concurrent_requests_are_independent() {
    let catalog = shop();
    let roots = ["com.shop.Order", "com.shop.Node", "com.shop.Invoice"];

    let expected: Vec<GenerationOutput> = roots
        .iter()
        .map(|root| generate(&catalog, &GenerationRequest::new(*root)))
        .collect();

    let parallel: Vec<GenerationOutput> = thread::scope(|scope| {
        let handles: Vec<_> = roots
            .iter()
            .map(|root| {
                let catalog = &catalog;
                scope.spawn(move || generate(catalog, &GenerationRequest::new(*root)))
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(parallel, expected);
}
