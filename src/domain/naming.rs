//! Strategy name normalization.
//!
//! A free-text name such as `"Alpha Edge"` becomes the Python module name
//! `alpha_edge` and the class name `AlphaEdgeStrategy`.

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NameError {
    #[error("strategy name must include alphanumeric characters")]
    NoAlphanumeric,

    #[error("strategy name must not start with a digit")]
    LeadingDigit,
    #[error("class name {0:?} is not a Python identifier")]
    InvalidClassName(String),
    #[error("package name {0:?} is not a Python identifier")]
    InvalidPackage(String),
}

/// Normalized identifiers for one strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrategyName {
    pub module_name: String,
    pub class_name: String,
}

impl StrategyName {
    /// Derive both names from user input. `class_override` replaces the
    /// derived class name verbatim.
    pub fn parse(input: &str, class_override: Option<&str>) -> Result<Self, NameError> {
        let module_name = snake_case(input)?;
        let class_name = match class_override.map(str::trim).filter(|s| !s.is_empty()) {
            Some(name) if is_identifier(name) => name.to_string(),
            Some(name) => return Err(NameError::InvalidClassName(name.to_string())),
            None => format!("{}Strategy", pascal_case(&module_name)?),
        };
        Ok(Self {
            module_name,
            class_name,
        })
    }
}

/// Collapse every run of non-alphanumeric ASCII into `_`, trim underscores,
/// lowercase.
pub fn snake_case(name: &str) -> Result<String, NameError> {
    let mut out = String::with_capacity(name.len());
    let mut pending_sep = false;

    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_sep && !out.is_empty() {
                out.push('_');
            }
            pending_sep = false;
            out.push(ch.to_ascii_lowercase());
        } else {
            pending_sep = true;
        }
    }

    match out.chars().next() {
        None => Err(NameError::NoAlphanumeric),
        Some(c) if c.is_ascii_digit() => Err(NameError::LeadingDigit),
        Some(_) => Ok(out),
    }
}

pub fn pascal_case(name: &str) -> Result<String, NameError> {
    let snake = snake_case(name)?;
    Ok(snake
        .split('_')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect())
}

pub fn check_package(package: &str) -> Result<(), NameError> {
    if is_identifier(package) {
        Ok(())
    } else {
        Err(NameError::InvalidPackage(package.to_string()))
    }
}

/// True if `s` is a valid Python identifier (ASCII subset).
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c == '_' || c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
}
