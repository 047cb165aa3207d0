//! Class model construction.
//!
//! Turns a [`SourceClass`] (type names as written) into a [`ClassModel`]
//! (classified [`TypeDescriptor`]s). Type expressions use a small grammar that
//! accepts both Java and Rust spellings:
//!
//! ```text
//! type  := '?' ...                          (wildcard, rejected)
//!        | '[' type [';' len] ']'           (Rust array or slice)
//!        | path ['<' type (',' type)* '>'] ('[' ']')*
//! path  := ident (('.' | '::') ident)*
//! ```
//!
//! A field whose type cannot be classified is left out of the model and
//! reported as [`GenerationError::UnsupportedFieldType`]; the rest of the class
//! is still built.

use crate::error::{GenerationError, GenerationResult};
use crate::model::{ClassModel, Field, PrimitiveKind, TypeDescriptor};
use crate::naming;
use crate::reader::{SourceClass, SourceReader};
use crate::render::java_identifier;
use std::collections::HashMap;
use tracing::debug;

const ORDERED: &[&str] = &[
    "List",
    "ArrayList",
    "LinkedList",
    "Collection",
    "Iterable",
    "Vec",
    "VecDeque",
];
const UNORDERED: &[&str] = &["Set", "HashSet", "LinkedHashSet", "TreeSet", "BTreeSet"];
const MAPS: &[&str] = &["Map", "HashMap", "LinkedHashMap", "TreeMap", "BTreeMap"];
const WRAPPERS: &[&str] = &["Option", "Optional", "Box", "Rc", "Arc"];

/// Build the class model for `qualified_name`.
///
/// Fails only when the reader cannot resolve the class itself; per-field
/// problems come back as diagnostics next to the (partial) model.
pub fn build_class_model<R: SourceReader + ?Sized>(
    reader: &R,
    qualified_name: &str,
) -> GenerationResult<(ClassModel, Vec<GenerationError>)> {
    let source = reader.resolve_fields(qualified_name)?;
    Ok(class_model_from_source(reader, &source))
}

/// Classify every field of an already-resolved source class.
pub fn class_model_from_source<R: SourceReader + ?Sized>(
    reader: &R,
    source: &SourceClass,
) -> (ClassModel, Vec<GenerationError>) {
    let mut model = ClassModel::new(&source.qualified_name);
    model.type_params = source.type_params.clone();

    let mut diagnostics = Vec::new();
    // Java field name -> first source field that claimed it
    let mut seen: HashMap<String, &str> = HashMap::new();
    let classifier = Classifier { reader, source };

    for source_field in &source.fields {
        let unsupported = |reason: String| GenerationError::UnsupportedFieldType {
            class: source.qualified_name.clone(),
            field: source_field.name.clone(),
            type_name: source_field.type_name.clone(),
            reason,
        };

        let java_name = java_identifier(&source_field.name);
        match seen.get(&java_name) {
            Some(&first) if first == source_field.name => {
                diagnostics.push(unsupported("duplicate field name".to_string()));
                continue;
            }
            Some(&first) => {
                diagnostics.push(unsupported(format!(
                    "field name collides with `{first}` in generated code"
                )));
                continue;
            }
            None => {
                seen.insert(java_name, &source_field.name);
            }
        }

        match classifier.classify(&source_field.type_name) {
            Ok(ty) => {
                debug!(
                    class = %source.qualified_name,
                    field = %source_field.name,
                    ty = %ty,
                    "Classified field"
                );
                let mut field =
                    Field::new(&source_field.name, ty).with_hints(source_field.hints.clone());
                field.comment = source_field.comment.clone();
                field.serialized_name = source_field.serialized_name.clone();
                model.fields.push(field);
            }
            Err(reason) => diagnostics.push(unsupported(reason)),
        }
    }

    (model, diagnostics)
}

/// Parsed type expression.
#[derive(Debug, Clone, PartialEq, Eq)]
enum TypeExpr {
    Path { name: String, args: Vec<TypeExpr> },
    Array(Box<TypeExpr>),
    Wildcard,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Ident(String),
    Punct(char),
    PathSep,
}

fn tokenize(input: &str) -> Result<Vec<Token>, String> {
    let mut tokens = Vec::new();
    let mut chars = input.chars().peekable();

    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
        } else if c.is_alphanumeric() || c == '_' || c == '$' {
            let mut ident = String::new();
            while let Some(&c) = chars.peek() {
                if c.is_alphanumeric() || c == '_' || c == '$' {
                    ident.push(c);
                    chars.next();
                } else {
                    break;
                }
            }
            tokens.push(Token::Ident(ident));
        } else if c == ':' {
            chars.next();
            if chars.next() != Some(':') {
                return Err("expected `::`".to_string());
            }
            tokens.push(Token::PathSep);
        } else if "<>,[];?.".contains(c) {
            tokens.push(Token::Punct(c));
            chars.next();
        } else {
            return Err(format!("unexpected character `{c}`"));
        }
    }

    Ok(tokens)
}

/// Recursive-descent parser over the token list.
struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn parse(input: &str) -> Result<TypeExpr, String> {
        let tokens = tokenize(input)?;
        if tokens.is_empty() {
            return Err("empty type expression".to_string());
        }

        let mut parser = Parser { tokens, pos: 0 };
        let expr = parser.ty()?;
        match parser.peek() {
            None => Ok(expr),
            Some(token) => Err(format!("unexpected {} after type", describe(token))),
        }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        self.pos += 1;
        token
    }

    fn eat(&mut self, c: char) -> bool {
        if self.peek() == Some(&Token::Punct(c)) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, c: char) -> Result<(), String> {
        if self.eat(c) {
            Ok(())
        } else {
            match self.peek() {
                Some(token) => Err(format!("expected `{c}`, found {}", describe(token))),
                None => Err(format!("expected `{c}`, found end of input")),
            }
        }
    }

    fn ty(&mut self) -> Result<TypeExpr, String> {
        if self.eat('?') {
            // Consume any bound so the error names the wildcard, not the bound
            while self
                .peek()
                .is_some_and(|t| *t != Token::Punct('>') && *t != Token::Punct(','))
            {
                self.pos += 1;
            }
            return Ok(TypeExpr::Wildcard);
        }

        if self.eat('[') {
            let element = self.ty()?;
            if self.eat(';') {
                while self.peek().is_some_and(|t| *t != Token::Punct(']')) {
                    self.pos += 1;
                }
            }
            self.expect(']')?;
            return Ok(TypeExpr::Array(Box::new(element)));
        }

        let name = self.path()?;
        let mut args = Vec::new();
        if self.eat('<') {
            loop {
                args.push(self.ty()?);
                if !self.eat(',') {
                    break;
                }
            }
            self.expect('>')?;
        }

        let mut expr = TypeExpr::Path { name, args };
        while self.eat('[') {
            self.expect(']')?;
            expr = TypeExpr::Array(Box::new(expr));
        }
        Ok(expr)
    }

    fn path(&mut self) -> Result<String, String> {
        let mut path = self.ident()?;
        loop {
            if self.eat('.') {
                path.push('.');
            } else if self.peek() == Some(&Token::PathSep) {
                self.pos += 1;
                path.push_str("::");
            } else {
                return Ok(path);
            }
            path.push_str(&self.ident()?);
        }
    }

    fn ident(&mut self) -> Result<String, String> {
        match self.next() {
            Some(Token::Ident(ident)) => Ok(ident),
            Some(token) => Err(format!("expected a type name, found {}", describe(&token))),
            None => Err("expected a type name, found end of input".to_string()),
        }
    }
}

fn describe(token: &Token) -> String {
    match token {
        Token::Ident(ident) => format!("`{ident}`"),
        Token::Punct(c) => format!("`{c}`"),
        Token::PathSep => "`::`".to_string(),
    }
}

/// Classifies type expressions written inside one source class.
struct Classifier<'a, R: ?Sized> {
    reader: &'a R,
    source: &'a SourceClass,
}

impl<R: SourceReader + ?Sized> Classifier<'_, R> {
    fn classify(&self, type_name: &str) -> Result<TypeDescriptor, String> {
        let expr = Parser::parse(type_name)?;
        self.descriptor(&expr)
    }

    fn descriptor(&self, expr: &TypeExpr) -> Result<TypeDescriptor, String> {
        let (name, args) = match expr {
            TypeExpr::Wildcard => return Err("wildcard types are not supported".to_string()),
            TypeExpr::Array(element) => {
                return Ok(TypeDescriptor::array(self.descriptor(element)?));
            }
            TypeExpr::Path { name, args } => (name, args),
        };
        let simple = naming::simple_name(name);

        if args.is_empty() && self.source.type_params.iter().any(|p| p == name) {
            return Ok(TypeDescriptor::generic(name.clone()));
        }
        if WRAPPERS.contains(&simple) {
            let [inner] = self.arity::<1>(simple, args)?;
            return self.descriptor(inner);
        }
        if ORDERED.contains(&simple) {
            let [element] = self.arity::<1>(simple, args)?;
            return Ok(TypeDescriptor::list(self.descriptor(element)?));
        }
        if UNORDERED.contains(&simple) {
            let [element] = self.arity::<1>(simple, args)?;
            return Ok(TypeDescriptor::set(self.descriptor(element)?));
        }
        if MAPS.contains(&simple) {
            let [key, value] = self.arity::<2>(simple, args)?;
            return Ok(TypeDescriptor::map(
                self.descriptor(key)?,
                self.descriptor(value)?,
            ));
        }
        // Primitives may carry arguments, e.g. `DateTime<Utc>`
        if let Some(kind) = PrimitiveKind::from_type_name(name) {
            return Ok(TypeDescriptor::primitive(kind, name.clone()));
        }
        if simple == "Object" {
            return Err("untyped `Object` fields are not supported".to_string());
        }
        if !args.is_empty() {
            return Err(format!("parameterized type `{simple}` is not a collection"));
        }

        let owner = &self.source.qualified_name;
        match self.reader.resolve_name(name, owner) {
            Some(qualified) => match self.reader.resolve_enum(&qualified) {
                Some(values) => Ok(TypeDescriptor::enumeration(qualified, values)),
                None => Ok(TypeDescriptor::reference(qualified)),
            },
            None if is_type_parameter_name(name) => {
                Err(format!("undeclared type parameter `{name}`"))
            }
            // Left for the synthesizer to report as not found. Simple names
            // stay in the owner's package so the stub is importable.
            None if name.contains('.') => Ok(TypeDescriptor::reference(name.clone())),
            None => Ok(TypeDescriptor::reference(naming::qualify(
                naming::package_of(owner),
                simple,
            ))),
        }
    }

    fn arity<'e, const N: usize>(
        &self,
        simple: &str,
        args: &'e [TypeExpr],
    ) -> Result<&'e [TypeExpr; N], String> {
        args.try_into().map_err(|_| {
            format!(
                "`{simple}` expects {N} type argument{}, found {}",
                if N == 1 { "" } else { "s" },
                args.len()
            )
        })
    }
}

/// Single uppercase letter, optionally followed by digits (`T`, `E1`).
fn is_type_parameter_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(|c| c.is_ascii_uppercase()) && chars.all(|c| c.is_ascii_digit())
}

#[cfg(test)]
#[path = "classify/classify_tests.rs"]
mod classify_tests;
