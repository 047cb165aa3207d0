//! Java source rendering.
//!
//! Projects a [`GeneratedForest`] into one Java source file per generated
//! class. Rendering only reads the forest.
//!
//! Each file contains, in order: the `package` line, sorted imports, a class
//! Javadoc naming the source type, optional Lombok annotations, the class
//! header, annotated `private` fields in declared order and, if configured,
//! constructors and accessors.
//!
//! Types are written by simple name and imported. When two referenced types
//! share a simple name (or one shares the class's own name), both are written
//! fully qualified instead.
//!
//! | Descriptor | Java |
//! |------------|------|
//! | `Primitive(Integer)` | `Integer` |
//! | `Primitive(Decimal)` | `BigDecimal` |
//! | `Collection(Ordered, T)` | `List<T>` |
//! | `Collection(Unordered, T)` | `Set<T>` |
//! | `Map(K, V)` | `Map<K, V>` |
//! | `Array(T)` | `T[]` |

use crate::annotation::{Annotation, AnnotationKind, ParamValue};
use crate::config::GenerationOptions;
use crate::error::GenerationError;
use crate::model::{CollectionKind, Field, PrimitiveKind, Provenance, TypeDescriptor};
use crate::naming::{self, capitalize, java_field_name};
use crate::synth::{GeneratedClass, GeneratedForest};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::debug;

const JSON_PROPERTY: &str = "com.fasterxml.jackson.annotation.JsonProperty";
const JSON_ALIAS: &str = "com.fasterxml.jackson.annotation.JsonAlias";
const SCHEMA: &str = "io.swagger.v3.oas.annotations.media.Schema";
const LOMBOK_DATA: &str = "lombok.Data";
const LOMBOK_NO_ARGS: &str = "lombok.NoArgsConstructor";
const LOMBOK_ALL_ARGS: &str = "lombok.AllArgsConstructor";

const JAVA_KEYWORDS: &[&str] = &[
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class", "const",
    "continue", "default", "do", "double", "else", "enum", "extends", "false", "final", "finally",
    "float", "for", "goto", "if", "implements", "import", "instanceof", "int", "interface", "long",
    "native", "new", "null", "package", "private", "protected", "public", "return", "short",
    "static", "strictfp", "super", "switch", "synchronized", "this", "throw", "throws",
    "transient", "true", "try", "void", "volatile", "while",
];

/// One rendered source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedClass {
    /// Simple class name, e.g. `OrderDto`
    pub class_name: String,

    pub qualified_name: String,

    pub package: String,

    /// Qualified name of the source type
    pub source_name: String,

    /// Complete Java source text
    pub source: String,
}

impl RenderedClass {
    pub fn file_name(&self) -> String {
        format!("{}.java", self.class_name)
    }
}

/// Renders generated classes as Java source.
#[derive(Debug, Clone, Copy)]
pub struct JavaRenderer<'a> {
    options: &'a GenerationOptions,
}

impl<'a> JavaRenderer<'a> {
    pub fn new(options: &'a GenerationOptions) -> Self {
        Self { options }
    }

    /// Render every class in emission order.
    ///
    /// Classes whose final qualified name is shared with another class are
    /// skipped and reported as [`GenerationError::RenderConflict`].
    pub fn render_forest(
        &self,
        forest: &GeneratedForest,
    ) -> (Vec<RenderedClass>, Vec<GenerationError>) {
        let mut sources_by_name: HashMap<&str, Vec<&str>> = HashMap::new();
        for class in forest.classes() {
            sources_by_name
                .entry(class.qualified_name())
                .or_default()
                .push(class.source_name());
        }

        let mut rendered = Vec::new();
        let mut diagnostics = Vec::new();
        let mut reported = BTreeSet::new();

        for class in forest.classes() {
            let name = class.qualified_name();
            let sources = sources_by_name.get(name).map(Vec::as_slice).unwrap_or(&[]);
            if sources.len() > 1 {
                if reported.insert(name) {
                    diagnostics.push(GenerationError::RenderConflict {
                        qualified_name: name.to_string(),
                        sources: sources.iter().map(|s| s.to_string()).collect(),
                    });
                }
                continue;
            }
            rendered.push(self.render_class(class));
        }

        (rendered, diagnostics)
    }

    /// Render a single generated class.
    pub fn render_class(&self, class: &GeneratedClass) -> RenderedClass {
        let model = &class.model;
        let package = model.package().to_string();
        let class_name = model.simple_name().to_string();

        let fields: Vec<FieldPlan> = model
            .fields
            .iter()
            .map(|field| self.plan_field(field))
            .collect();
        let class_annotations = self.class_annotations();

        let mut referenced = Vec::new();
        for plan in &fields {
            collect_type_names(&plan.ty, &mut referenced);
            referenced.extend(plan.annotations.iter().map(|a| a.ty.clone()));
        }
        referenced.extend(class_annotations.iter().map(|a| a.to_string()));
        let names = TypeNames::new(&model.qualified_name, referenced);

        let mut code = String::new();

        if !package.is_empty() {
            code.push_str(&format!("package {package};\n\n"));
        }

        let imports = names.imports();
        if !imports.is_empty() {
            for import in &imports {
                code.push_str(&format!("import {import};\n"));
            }
            code.push('\n');
        }

        self.push_class_doc(&mut code, class);

        for annotation in &class_annotations {
            code.push_str(&format!("@{}\n", names.resolve(annotation)));
        }

        let type_params = if model.type_params.is_empty() {
            String::new()
        } else {
            format!("<{}>", model.type_params.join(", "))
        };
        code.push_str(&format!("public class {class_name}{type_params} {{\n"));

        let typed: Vec<(&FieldPlan, String)> = fields
            .iter()
            .map(|plan| (plan, java_type(&plan.ty, &names)))
            .collect();

        for (plan, java_type) in &typed {
            code.push('\n');
            if let Some(comment) = &plan.comment {
                code.push_str("    /**\n");
                for line in comment.lines() {
                    code.push_str(&format!("     * {}\n", line.trim()));
                }
                code.push_str("     */\n");
            }
            for annotation in &plan.annotations {
                code.push_str(&format!(
                    "    @{}{}\n",
                    names.resolve(&annotation.ty),
                    annotation.args
                ));
            }
            code.push_str(&format!("    private {java_type} {};\n", plan.java_name));
        }

        if self.options.generate_accessors && !self.options.lombok {
            push_constructors(&mut code, &class_name, &typed);
            push_accessors(&mut code, &typed);
        }

        code.push_str("}\n");

        debug!(class = %model.qualified_name, bytes = code.len(), "Rendered class");

        RenderedClass {
            class_name,
            qualified_name: model.qualified_name.clone(),
            package,
            source_name: class.source_name().to_string(),
            source: code,
        }
    }

    fn class_annotations(&self) -> Vec<&'static str> {
        match (self.options.lombok, self.options.generate_accessors) {
            (false, _) => Vec::new(),
            (true, false) => vec![LOMBOK_DATA],
            (true, true) => vec![LOMBOK_DATA, LOMBOK_NO_ARGS, LOMBOK_ALL_ARGS],
        }
    }

    fn push_class_doc(&self, code: &mut String, class: &GeneratedClass) {
        code.push_str("/**\n");
        code.push_str(&format!(
            " * Data transfer object for {{@code {}}}.\n",
            class.source_name()
        ));
        if let Provenance::Nested { parent, field } = &class.model.provenance {
            code.push_str(" *\n");
            code.push_str(&format!(
                " * <p>Referenced from {{@code {}.{}}}.\n",
                naming::simple_name(parent),
                java_field_name(field)
            ));
        }
        if let Some(author) = &self.options.author {
            code.push_str(" *\n");
            code.push_str(&format!(" * @author {author}\n"));
        }
        code.push_str(" */\n");
    }

    fn plan_field(&self, field: &Field) -> FieldPlan {
        let java_name = java_identifier(&field.name);
        let ns = self.options.validation_namespace.package();

        let mut annotations: Vec<AnnotationLine> = field
            .annotations
            .iter()
            .map(|a| AnnotationLine {
                ty: validation_type(a.kind, ns),
                args: annotation_args(a),
            })
            .collect();
        annotations.extend(self.json_annotations(field, &java_name));

        FieldPlan {
            java_name,
            ty: field.ty.clone(),
            comment: field.comment.clone(),
            annotations,
        }
    }

    /// `@JsonProperty` and `@JsonAlias` for one field.
    fn json_annotations(&self, field: &Field, java_name: &str) -> Vec<AnnotationLine> {
        let wire = field.serialized_name.as_deref().unwrap_or(&field.name);
        let property = match self.options.json_property_style {
            Some(style) => Some(style.apply(wire)),
            None if field.serialized_name.is_some() || java_name != field.name => {
                Some(wire.to_string())
            }
            None => None,
        };

        let mut lines = Vec::new();
        if let Some(property) = &property {
            lines.push(AnnotationLine {
                ty: JSON_PROPERTY.to_string(),
                args: format!("({})", java_string(property)),
            });
        }

        let primary = property.as_deref().unwrap_or(java_name);
        let mut aliases: Vec<String> = Vec::new();
        for style in &self.options.json_alias_styles {
            let alias = style.apply(wire);
            if alias != primary && !aliases.contains(&alias) {
                aliases.push(alias);
            }
        }
        if !aliases.is_empty() {
            lines.push(AnnotationLine {
                ty: JSON_ALIAS.to_string(),
                args: format!("({})", java_array(&aliases)),
            });
        }

        lines
    }
}

/// A field ready to print: Java name, type and annotation lines.
struct FieldPlan {
    java_name: String,
    ty: TypeDescriptor,
    comment: Option<String>,
    annotations: Vec<AnnotationLine>,
}

/// Annotation type (qualified) and its rendered argument list (`""` or `(...)`).
struct AnnotationLine {
    ty: String,
    args: String,
}

/// Simple-name resolution and import set for one compilation unit.
struct TypeNames {
    package: String,
    by_simple: BTreeMap<String, BTreeSet<String>>,
}

impl TypeNames {
    fn new(own: &str, referenced: Vec<String>) -> Self {
        let mut by_simple: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        for name in std::iter::once(own.to_string()).chain(referenced) {
            by_simple
                .entry(naming::simple_name(&name).to_string())
                .or_default()
                .insert(name);
        }
        Self {
            package: naming::package_of(own).to_string(),
            by_simple,
        }
    }

    fn is_unique(&self, qualified: &str) -> bool {
        self.by_simple
            .get(naming::simple_name(qualified))
            .is_some_and(|names| names.len() == 1)
    }

    /// How to write `qualified` in this file.
    fn resolve(&self, qualified: &str) -> String {
        if self.is_unique(qualified) {
            naming::simple_name(qualified).to_string()
        } else {
            qualified.to_string()
        }
    }

    /// Sorted import lines for every uniquely named type outside this package.
    fn imports(&self) -> Vec<&str> {
        self.by_simple
            .values()
            .filter(|names| names.len() == 1)
            .flatten()
            .map(String::as_str)
            .filter(|name| {
                let package = naming::package_of(name);
                !package.is_empty() && package != "java.lang" && package != self.package
            })
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

fn java_primitive(kind: PrimitiveKind) -> &'static str {
    match kind {
        PrimitiveKind::Text => "java.lang.String",
        PrimitiveKind::Char => "java.lang.Character",
        PrimitiveKind::Boolean => "java.lang.Boolean",
        PrimitiveKind::Byte => "java.lang.Byte",
        PrimitiveKind::Short => "java.lang.Short",
        PrimitiveKind::Integer => "java.lang.Integer",
        PrimitiveKind::Long => "java.lang.Long",
        PrimitiveKind::BigInteger => "java.math.BigInteger",
        PrimitiveKind::Float => "java.lang.Float",
        PrimitiveKind::Double => "java.lang.Double",
        PrimitiveKind::Decimal => "java.math.BigDecimal",
        PrimitiveKind::Date => "java.util.Date",
        PrimitiveKind::Timestamp => "java.sql.Timestamp",
        PrimitiveKind::LocalDate => "java.time.LocalDate",
        PrimitiveKind::LocalTime => "java.time.LocalTime",
        PrimitiveKind::LocalDateTime => "java.time.LocalDateTime",
        PrimitiveKind::Instant => "java.time.Instant",
        PrimitiveKind::Uuid => "java.util.UUID",
    }
}

fn collection_type(kind: CollectionKind) -> &'static str {
    match kind {
        CollectionKind::Ordered => "java.util.List",
        CollectionKind::Unordered => "java.util.Set",
    }
}

fn collect_type_names(ty: &TypeDescriptor, out: &mut Vec<String>) {
    match ty {
        TypeDescriptor::Primitive { kind, .. } => out.push(java_primitive(*kind).to_string()),
        TypeDescriptor::Reference { name } | TypeDescriptor::Enum { name, .. } => {
            out.push(name.clone())
        }
        TypeDescriptor::Collection { kind, element } => {
            out.push(collection_type(*kind).to_string());
            collect_type_names(element, out);
        }
        TypeDescriptor::Map { key, value } => {
            out.push("java.util.Map".to_string());
            collect_type_names(key, out);
            collect_type_names(value, out);
        }
        TypeDescriptor::Array { element } => collect_type_names(element, out),
        TypeDescriptor::Generic { .. } => {}
    }
}

/// Java spelling of a descriptor. Primitives are always boxed.
fn java_type(ty: &TypeDescriptor, names: &TypeNames) -> String {
    match ty {
        TypeDescriptor::Primitive { kind, .. } => names.resolve(java_primitive(*kind)),
        TypeDescriptor::Reference { name } | TypeDescriptor::Enum { name, .. } => {
            names.resolve(name)
        }
        TypeDescriptor::Collection { kind, element } => format!(
            "{}<{}>",
            names.resolve(collection_type(*kind)),
            java_type(element, names)
        ),
        TypeDescriptor::Map { key, value } => format!(
            "{}<{}, {}>",
            names.resolve("java.util.Map"),
            java_type(key, names),
            java_type(value, names)
        ),
        TypeDescriptor::Array { element } => format!("{}[]", java_type(element, names)),
        TypeDescriptor::Generic { parameter } => parameter.clone(),
    }
}

fn validation_type(kind: AnnotationKind, ns: &str) -> String {
    let simple = match kind {
        AnnotationKind::Valid => return format!("{ns}.Valid"),
        AnnotationKind::OneOf => return SCHEMA.to_string(),
        AnnotationKind::NotNull => "NotNull",
        AnnotationKind::Size => "Size",
        AnnotationKind::Min => "Min",
        AnnotationKind::Max => "Max",
        AnnotationKind::DecimalMin => "DecimalMin",
        AnnotationKind::DecimalMax => "DecimalMax",
        AnnotationKind::Digits => "Digits",
        AnnotationKind::Pattern => "Pattern",
    };
    format!("{ns}.constraints.{simple}")
}

/// Argument list for an annotation: `""`, `(value)` or `(a = 1, b = 2)`.
fn annotation_args(annotation: &Annotation) -> String {
    let mut args: Vec<(&str, String)> = annotation
        .params
        .iter()
        .map(|(name, value)| {
            let name = match (annotation.kind, name.as_str()) {
                (AnnotationKind::OneOf, "values") => "allowableValues",
                (_, name) => name,
            };
            (name, java_literal(value))
        })
        .collect();
    if let Some(message) = &annotation.message {
        args.push(("message", java_string(message)));
    }

    match args.as_slice() {
        [] => String::new(),
        [("value", value)] => format!("({value})"),
        _ => {
            let joined: Vec<String> = args
                .iter()
                .map(|(name, value)| format!("{name} = {value}"))
                .collect();
            format!("({})", joined.join(", "))
        }
    }
}

fn java_literal(value: &ParamValue) -> String {
    match value {
        ParamValue::Int(v) if i32::try_from(*v).is_err() => format!("{v}L"),
        ParamValue::Int(v) => v.to_string(),
        ParamValue::Str(s) => java_string(s),
        ParamValue::List(values) => java_array(values),
    }
}

fn java_array(values: &[String]) -> String {
    let items: Vec<String> = values.iter().map(|v| java_string(v)).collect();
    format!("{{{}}}", items.join(", "))
}

/// Quoted Java string literal.
fn java_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// lowerCamel field name, suffixed with `_` if it is a Java keyword.
pub(crate) fn java_identifier(name: &str) -> String {
    let java_name = java_field_name(name);
    if JAVA_KEYWORDS.contains(&java_name.as_str()) {
        format!("{java_name}_")
    } else {
        java_name
    }
}

fn push_constructors(code: &mut String, class_name: &str, fields: &[(&FieldPlan, String)]) {
    code.push_str(&format!("\n    public {class_name}() {{}}\n"));

    if fields.is_empty() {
        return;
    }

    let params: Vec<String> = fields
        .iter()
        .map(|(plan, java_type)| format!("{java_type} {}", plan.java_name))
        .collect();
    code.push_str(&format!(
        "\n    public {class_name}({}) {{\n",
        params.join(", ")
    ));
    for (plan, _) in fields {
        code.push_str(&format!(
            "        this.{0} = {0};\n",
            plan.java_name
        ));
    }
    code.push_str("    }\n");
}

fn push_accessors(code: &mut String, fields: &[(&FieldPlan, String)]) {
    for (plan, java_type) in fields {
        let name = &plan.java_name;
        let method_name_part = capitalize(name);

        code.push_str(&format!(
            "\n    public {java_type} get{method_name_part}() {{\n"
        ));
        code.push_str(&format!("        return {name};\n"));
        code.push_str("    }\n");

        code.push_str(&format!(
            "\n    public void set{method_name_part}({java_type} {name}) {{\n"
        ));
        code.push_str(&format!("        this.{name} = {name};\n"));
        code.push_str("    }\n");
    }
}
