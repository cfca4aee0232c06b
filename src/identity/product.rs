// src/identity/product.rs
use std::fmt;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ProductError {
    #[error("Product {0} must not be empty")]
    Empty(&'static str),

    #[error("Product {field} '{value}' contains an invalid character")]
    InvalidCharacter { field: &'static str, value: String },
}

/// Client identification sent as `User-Agent`, rendered as `name/version`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductHeader {
    name: String,
    version: String,
}

impl ProductHeader {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Result<Self, ProductError> {
        let name = name.into();
        let version = version.into();
        validate_token("name", &name)?;
        validate_token("version", &version)?;
        Ok(Self { name, version })
    }

    /// Header for this crate itself.
    pub fn crate_default() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }
}

impl fmt::Display for ProductHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.name, self.version)
    }
}

fn validate_token(field: &'static str, value: &str) -> Result<(), ProductError> {
    if value.is_empty() {
        return Err(ProductError::Empty(field));
    }
    if value
        .chars()
        .any(|c| c == '/' || c.is_whitespace() || c.is_control() || !c.is_ascii())
    {
        return Err(ProductError::InvalidCharacter {
            field,
            value: value.to_string(),
        });
    }
    Ok(())
}
