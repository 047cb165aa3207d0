//! Generation request and options.

use crate::annotation::{MessageTemplates, PolicyOptions};
use crate::error::{GenerationError, GenerationResult};
use crate::naming::{NameStyle, NamingConvention};
use serde::{Deserialize, Serialize};

/// Validation annotation package family.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationNamespace {
    /// `jakarta.validation` (Jakarta EE 9+)
    #[default]
    Jakarta,
    /// `javax.validation` (Java EE)
    Javax,
}

impl ValidationNamespace {
    /// Root package, e.g. `jakarta.validation`.
    pub fn package(&self) -> &'static str {
        match self {
            ValidationNamespace::Jakarta => "jakarta.validation",
            ValidationNamespace::Javax => "javax.validation",
        }
    }
}

/// Options that shape the generated classes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationOptions {
    /// Emit constructors and getter/setter stubs
    #[serde(default)]
    pub generate_accessors: bool,

    /// Composite fields get a not-null annotation without a `required` hint
    #[serde(default)]
    pub include_not_null_defaults: bool,

    /// Package for all generated classes (default: each source type's package)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_package: Option<String>,

    #[serde(default)]
    pub validation_namespace: ValidationNamespace,

    /// Emit Lombok `@Data` instead of hand-written accessors
    #[serde(default)]
    pub lombok: bool,

    /// Naming style for `@JsonProperty`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json_property_style: Option<NameStyle>,

    /// Naming styles for `@JsonAlias`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub json_alias_styles: Vec<NameStyle>,

    /// Attach validation messages rendered from these templates
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub messages: Option<MessageTemplates>,

    /// `@author` tag for the class Javadoc
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            generate_accessors: false,
            include_not_null_defaults: false,
            target_package: None,
            validation_namespace: ValidationNamespace::default(),
            lombok: false,
            json_property_style: None,
            json_alias_styles: Vec::new(),
            messages: None,
            author: None,
        }
    }
}

impl GenerationOptions {
    /// The subset of options the annotation policy reads.
    pub fn policy_options(&self) -> PolicyOptions {
        PolicyOptions {
            include_not_null_defaults: self.include_not_null_defaults,
            messages: self.messages.clone(),
        }
    }
}

/// One generation request: a root class, a naming convention and options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Qualified name of the root source class
    pub root: String,

    #[serde(default)]
    pub convention: NamingConvention,

    #[serde(default)]
    pub options: GenerationOptions,
}

impl GenerationRequest {
    pub fn new(root: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            convention: NamingConvention::default(),
            options: GenerationOptions::default(),
        }
    }

    pub fn with_convention(mut self, convention: NamingConvention) -> Self {
        self.convention = convention;
        self
    }

    pub fn with_options(mut self, options: GenerationOptions) -> Self {
        self.options = options;
        self
    }

    /// Parse a request from JSON.
    pub fn from_json(content: &str) -> GenerationResult<Self> {
        serde_json::from_str(content).map_err(|e| GenerationError::InvalidRequest(e.to_string()))
    }

    /// Parse a request from TOML.
    pub fn from_toml(content: &str) -> GenerationResult<Self> {
        toml::from_str(content).map_err(|e| GenerationError::InvalidRequest(e.to_string()))
    }

    /// Check the request before any generation work.
    pub fn validate(&self) -> GenerationResult<()> {
        if self.root.trim().is_empty() {
            return Err(GenerationError::InvalidRequest(
                "root class name cannot be empty".to_string(),
            ));
        }

        if !self.convention.is_valid() {
            return Err(GenerationError::InvalidRequest(format!(
                "naming convention `{}`/`{}` contains characters not allowed in class names",
                self.convention.prefix, self.convention.suffix
            )));
        }

        if let Some(package) = &self.options.target_package {
            if !is_valid_package(package) {
                return Err(GenerationError::InvalidRequest(format!(
                    "invalid target package: {package}"
                )));
            }
        }

        Ok(())
    }
}

/// Dotted sequence of Java identifiers. The empty string is the default package.
fn is_valid_package(package: &str) -> bool {
    package.is_empty()
        || package.split('.').all(|segment| {
            let mut chars = segment.chars();
            chars
                .next()
                .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        })
}
