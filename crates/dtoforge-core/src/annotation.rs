//! Annotation policy mapping.
//!
//! Maps a field's [`TypeDescriptor`] and [`ConstraintHints`] to an ordered list
//! of abstract validation annotations. The mapping is an explicit table of
//! [`Rule`]s held by [`DefaultAnnotationPolicy`]; callers that need a different
//! vocabulary implement [`AnnotationPolicy`] or swap the rule table.
//!
//! Output is always sorted by [`AnnotationKind`], so the order of rules in a
//! table never changes the order of the emitted annotations:
//!
//! ```text
//! NotNull, Size, Min, Max, DecimalMin, DecimalMax, Digits, Pattern, OneOf, Valid
//! ```
//!
//! Hint combinations no rule understands simply produce nothing.

use crate::model::{ConstraintHints, TypeDescriptor};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Abstract validation annotation kinds, declared in emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnnotationKind {
    NotNull,
    Size,
    Min,
    Max,
    DecimalMin,
    DecimalMax,
    Digits,
    Pattern,
    /// Value membership in a closed set
    OneOf,
    /// Cascade validation into a nested DTO
    Valid,
}

/// Annotation parameter value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Int(i64),
    Str(String),
    List(Vec<String>),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Int(v) => write!(f, "{v}"),
            ParamValue::Str(s) => write!(f, "{s}"),
            ParamValue::List(values) => write!(f, "{}", values.join(", ")),
        }
    }
}

/// One resolved annotation: a kind, named parameters in order, and an
/// optional validation message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    pub kind: AnnotationKind,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<(String, ParamValue)>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Annotation {
    pub fn new(kind: AnnotationKind) -> Self {
        Self {
            kind,
            params: Vec::new(),
            message: None,
        }
    }

    /// Append a parameter.
    pub fn with(mut self, name: impl Into<String>, value: ParamValue) -> Self {
        self.params.push((name.into(), value));
        self
    }

    pub fn param(&self, name: &str) -> Option<&ParamValue> {
        self.params
            .iter()
            .find(|(param, _)| param == name)
            .map(|(_, value)| value)
    }
}

/// The policy's view of a field.
#[derive(Debug, Clone, Copy)]
pub struct FieldInput<'a> {
    pub name: &'a str,
    pub ty: &'a TypeDescriptor,
    pub hints: &'a ConstraintHints,
    pub comment: Option<&'a str>,
}

impl<'a> FieldInput<'a> {
    pub fn new(name: &'a str, ty: &'a TypeDescriptor, hints: &'a ConstraintHints) -> Self {
        Self {
            name,
            ty,
            hints,
            comment: None,
        }
    }

    /// Human-facing label: the comment if present, otherwise the name.
    pub fn label(&self) -> &'a str {
        match self.comment {
            Some(comment) if !comment.trim().is_empty() => comment.trim(),
            _ => self.name,
        }
    }
}

/// Options that change which annotations the default rules emit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PolicyOptions {
    /// Composite fields get `NotNull` even without a `required` hint
    pub include_not_null_defaults: bool,

    /// Attach validation messages rendered from these templates
    pub messages: Option<MessageTemplates>,
}

/// Maps one field to its ordered annotation list.
///
/// Implementations must be deterministic: the same input always yields the
/// same annotations in the same order.
pub trait AnnotationPolicy {
    fn annotate(&self, field: &FieldInput<'_>) -> Vec<Annotation>;
}

impl<P: AnnotationPolicy + ?Sized> AnnotationPolicy for &P {
    fn annotate(&self, field: &FieldInput<'_>) -> Vec<Annotation> {
        (**self).annotate(field)
    }
}

/// A single entry in a policy's rule table.
pub type Rule = fn(&FieldInput<'_>, &PolicyOptions) -> Option<Annotation>;

/// The default rule table, one rule per [`AnnotationKind`].
pub const DEFAULT_RULES: &[Rule] = &[
    rules::not_null,
    rules::size,
    rules::min,
    rules::max,
    rules::decimal_min,
    rules::decimal_max,
    rules::digits,
    rules::pattern,
    rules::one_of,
    rules::valid,
];

/// Rule-table driven policy.
#[derive(Debug, Clone)]
pub struct DefaultAnnotationPolicy {
    options: PolicyOptions,
    rules: Vec<Rule>,
}

impl Default for DefaultAnnotationPolicy {
    fn default() -> Self {
        Self::new(PolicyOptions::default())
    }
}

impl DefaultAnnotationPolicy {
    pub fn new(options: PolicyOptions) -> Self {
        Self::with_rules(options, DEFAULT_RULES.to_vec())
    }

    /// Build a policy with a custom rule table.
    pub fn with_rules(options: PolicyOptions, rules: Vec<Rule>) -> Self {
        Self { options, rules }
    }

    pub fn options(&self) -> &PolicyOptions {
        &self.options
    }
}

impl AnnotationPolicy for DefaultAnnotationPolicy {
    fn annotate(&self, field: &FieldInput<'_>) -> Vec<Annotation> {
        let mut annotations: Vec<Annotation> = self
            .rules
            .iter()
            .filter_map(|rule| rule(field, &self.options))
            .collect();

        // Stable sort keeps the first rule's output when two rules emit one kind
        annotations.sort_by_key(|a| a.kind);
        annotations.dedup_by_key(|a| a.kind);

        if let Some(templates) = &self.options.messages {
            for annotation in &mut annotations {
                annotation.message = templates.render(field, annotation);
            }
        }

        annotations
    }
}

/// The default rules.
pub mod rules {
    use super::*;

    fn to_param(value: u64) -> ParamValue {
        ParamValue::Int(i64::try_from(value).unwrap_or(i64::MAX))
    }

    fn sized(ty: &TypeDescriptor) -> bool {
        ty.is_container() || ty.primitive_kind().is_some_and(|k| k.is_text())
    }

    fn integral(ty: &TypeDescriptor) -> bool {
        ty.primitive_kind().is_some_and(|k| k.is_integral())
    }

    fn fractional(ty: &TypeDescriptor) -> bool {
        ty.primitive_kind().is_some_and(|k| k.is_fractional())
    }

    fn text(ty: &TypeDescriptor) -> bool {
        ty.primitive_kind().is_some_and(|k| k.is_text())
    }

    pub fn not_null(field: &FieldInput<'_>, options: &PolicyOptions) -> Option<Annotation> {
        let by_default = options.include_not_null_defaults && field.ty.is_composite();
        (field.hints.required || by_default).then(|| Annotation::new(AnnotationKind::NotNull))
    }

    pub fn size(field: &FieldInput<'_>, _: &PolicyOptions) -> Option<Annotation> {
        let hints = field.hints;
        if !sized(field.ty) || (hints.min_length.is_none() && hints.max_length.is_none()) {
            return None;
        }
        let mut annotation = Annotation::new(AnnotationKind::Size);
        if let Some(min) = hints.min_length {
            annotation = annotation.with("min", to_param(min));
        }
        if let Some(max) = hints.max_length {
            annotation = annotation.with("max", to_param(max));
        }
        Some(annotation)
    }

    pub fn min(field: &FieldInput<'_>, _: &PolicyOptions) -> Option<Annotation> {
        let min = field.hints.min.filter(|_| integral(field.ty))?;
        Some(Annotation::new(AnnotationKind::Min).with("value", ParamValue::Int(min)))
    }

    pub fn max(field: &FieldInput<'_>, _: &PolicyOptions) -> Option<Annotation> {
        let max = field.hints.max.filter(|_| integral(field.ty))?;
        Some(Annotation::new(AnnotationKind::Max).with("value", ParamValue::Int(max)))
    }

    pub fn decimal_min(field: &FieldInput<'_>, _: &PolicyOptions) -> Option<Annotation> {
        let min = field.hints.min.filter(|_| fractional(field.ty))?;
        Some(
            Annotation::new(AnnotationKind::DecimalMin)
                .with("value", ParamValue::Str(min.to_string())),
        )
    }

    pub fn decimal_max(field: &FieldInput<'_>, _: &PolicyOptions) -> Option<Annotation> {
        let max = field.hints.max.filter(|_| fractional(field.ty))?;
        Some(
            Annotation::new(AnnotationKind::DecimalMax)
                .with("value", ParamValue::Str(max.to_string())),
        )
    }

    pub fn digits(field: &FieldInput<'_>, _: &PolicyOptions) -> Option<Annotation> {
        let numeric = field.ty.primitive_kind().is_some_and(|k| k.is_numeric());
        let digits = field.hints.digits.filter(|_| numeric)?;
        Some(
            Annotation::new(AnnotationKind::Digits)
                .with("integer", ParamValue::Int(i64::from(digits.integer)))
                .with("fraction", ParamValue::Int(i64::from(digits.fraction))),
        )
    }

    pub fn pattern(field: &FieldInput<'_>, _: &PolicyOptions) -> Option<Annotation> {
        let pattern = field.hints.pattern.as_ref().filter(|_| text(field.ty))?;
        Some(
            Annotation::new(AnnotationKind::Pattern)
                .with("regexp", ParamValue::Str(pattern.clone())),
        )
    }

    pub fn one_of(field: &FieldInput<'_>, _: &PolicyOptions) -> Option<Annotation> {
        let values = match field.ty {
            TypeDescriptor::Enum { values, .. } => values,
            ty if text(ty) => &field.hints.allowed_values,
            _ => return None,
        };
        if values.is_empty() {
            return None;
        }
        Some(Annotation::new(AnnotationKind::OneOf).with("values", ParamValue::List(values.clone())))
    }

    pub fn valid(field: &FieldInput<'_>, _: &PolicyOptions) -> Option<Annotation> {
        field
            .ty
            .contains_reference()
            .then(|| Annotation::new(AnnotationKind::Valid))
    }
}

/// Validation message templates.
///
/// Placeholders: `${name}` (field name), `${comment}` (field comment, falling
/// back to the name) and `${<param>}` for every annotation parameter, e.g.
/// `${min}`, `${max}`, `${value}`, `${integer}`, `${fraction}`. An empty
/// template disables the message for that kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageTemplates {
    pub not_null: String,
    pub size: String,
    pub min: String,
    pub max: String,
    pub decimal_min: String,
    pub decimal_max: String,
    pub digits: String,
    pub pattern: String,
}

impl Default for MessageTemplates {
    fn default() -> Self {
        Self::standard()
    }
}

impl MessageTemplates {
    /// English defaults.
    pub fn standard() -> Self {
        Self {
            not_null: "${comment} is required".to_string(),
            size: "${comment} has an invalid length".to_string(),
            min: "${comment} must be at least ${value}".to_string(),
            max: "${comment} must be at most ${value}".to_string(),
            decimal_min: "${comment} must be at least ${value}".to_string(),
            decimal_max: "${comment} must be at most ${value}".to_string(),
            digits: "${comment} allows ${integer} integer and ${fraction} fraction digits"
                .to_string(),
            pattern: "${comment} has an invalid format".to_string(),
        }
    }

    pub fn template_for(&self, kind: AnnotationKind) -> Option<&str> {
        let template = match kind {
            AnnotationKind::NotNull => &self.not_null,
            AnnotationKind::Size => &self.size,
            AnnotationKind::Min => &self.min,
            AnnotationKind::Max => &self.max,
            AnnotationKind::DecimalMin => &self.decimal_min,
            AnnotationKind::DecimalMax => &self.decimal_max,
            AnnotationKind::Digits => &self.digits,
            AnnotationKind::Pattern => &self.pattern,
            AnnotationKind::OneOf | AnnotationKind::Valid => return None,
        };
        (!template.is_empty()).then_some(template.as_str())
    }

    /// Render the message for one annotation on one field.
    pub fn render(&self, field: &FieldInput<'_>, annotation: &Annotation) -> Option<String> {
        let mut message = self
            .template_for(annotation.kind)?
            .replace("${name}", field.name)
            .replace("${comment}", field.label());
        for (name, value) in &annotation.params {
            message = message.replace(&format!("${{{name}}}"), &value.to_string());
        }
        Some(message)
    }
}
