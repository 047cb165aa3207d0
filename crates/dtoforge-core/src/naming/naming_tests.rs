#![allow(non_snake_case)]

use super::*;
use test_case::test_case;

// Qualified name handling

#[test_case("com.shop.Order", "Order")]
#[test_case("crate::model::Order", "Order")]
#[test_case("Order", "Order")]
#[test_case("", "")]
fn simple_name___extracts_last_segment(input: &str, expected: &str) {
    assert_eq!(simple_name(input), expected);
}

#[test_case("com.shop.Order", "com.shop")]
#[test_case("Order", "")]
fn package_of___returns_everything_before_last_dot(input: &str, expected: &str) {
    assert_eq!(package_of(input), expected);
}

#[test]
fn qualify___skips_separator_for_default_package() {
    assert_eq!(qualify("", "Order"), "Order");
    assert_eq!(qualify("com.shop", "Order"), "com.shop.Order");
}

// NamingConvention tests

#[test]
fn NamingConvention___default___appends_dto() {
    assert_eq!(NamingConvention::default().apply("Customer"), "CustomerDto");
}

#[test]
fn NamingConvention___prefix_and_suffix___wrap_name() {
    let convention = NamingConvention::new("Api", "Response");

    assert_eq!(convention.apply("Order"), "ApiOrderResponse");
}

#[test_case("", "Dto", true)]
#[test_case("V2_", "", true)]
#[test_case("", "-dto", false)]
#[test_case("my prefix", "", false)]
fn NamingConvention___is_valid___checks_identifier_chars(prefix: &str, suffix: &str, valid: bool) {
    assert_eq!(NamingConvention::new(prefix, suffix).is_valid(), valid);
}

#[test]
fn NamingConvention___deserialize___missing_fields_fall_back_to_default() {
    let convention: NamingConvention = serde_json::from_str(r#"{"prefix": "X"}"#).unwrap();

    assert_eq!(convention.prefix, "X");
    assert_eq!(convention.suffix, "Dto");
}

// Case conversions

#[test]
fn to_camel_case___converts_snake_case() {
    assert_eq!(to_camel_case("hello_world"), "helloWorld");
    assert_eq!(to_camel_case("display_name"), "displayName");
    assert_eq!(to_camel_case("foo_bar_baz"), "fooBarBaz");
}

#[test]
fn to_camel_case___handles_edge_underscores() {
    assert_eq!(to_camel_case("foo__bar"), "fooBar");
    assert_eq!(to_camel_case("_leading"), "leading");
    assert_eq!(to_camel_case("trailing_"), "trailing");
    assert_eq!(to_camel_case(""), "");
}

#[test]
fn capitalize___capitalizes_first_letter() {
    assert_eq!(capitalize("hello"), "Hello");
    assert_eq!(capitalize("helloWorld"), "HelloWorld");
    assert_eq!(capitalize(""), "");
}

#[test_case("user_name", "userName")]
#[test_case("UserName", "userName")]
#[test_case("id", "id")]
fn java_field_name___produces_lower_camel(input: &str, expected: &str) {
    assert_eq!(java_field_name(input), expected);
}

// NameStyle tests

#[test_case(NameStyle::Original, "userName", "userName")]
#[test_case(NameStyle::Upper, "userName", "USERNAME")]
#[test_case(NameStyle::Lower, "userName", "username")]
#[test_case(NameStyle::UpperSnake, "userName", "USER_NAME")]
#[test_case(NameStyle::UpperSnake, "user_name", "USER_NAME")]
#[test_case(NameStyle::LowerCamel, "USER_NAME", "userName")]
#[test_case(NameStyle::LowerCamel, "user_name", "userName")]
#[test_case(NameStyle::UpperCamel, "user_name", "UserName")]
#[test_case(NameStyle::UpperCamel, "userName", "UserName")]
fn NameStyle___apply___formats_name(style: NameStyle, input: &str, expected: &str) {
    assert_eq!(style.apply(input), expected);
}

#[test]
fn NameStyle___deserialize___uses_snake_case_names() {
    let style: NameStyle = serde_json::from_str(r#""upper_snake""#).unwrap();

    assert_eq!(style, NameStyle::UpperSnake);
}
