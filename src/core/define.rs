//! Preprocessor macro definitions.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A preprocessor define.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Define {
    /// Simple flag: -DFOO
    Flag(String),
    /// Key-value: -DFOO=bar
    KeyValue { name: String, value: String },
}

impl Define {
    /// Create a simple flag define.
    pub fn flag(name: impl Into<String>) -> Self {
        Define::Flag(name.into())
    }

    /// Create a key-value define.
    pub fn key_value(name: impl Into<String>, value: impl Into<String>) -> Self {
        Define::KeyValue {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Get the define name.
    pub fn name(&self) -> &str {
        match self {
            Define::Flag(n) => n,
            Define::KeyValue { name, .. } => name,
        }
    }

    /// Get the define value, if any.
    pub fn value(&self) -> Option<&str> {
        match self {
            Define::Flag(_) => None,
            Define::KeyValue { value, .. } => Some(value),
        }
    }

    /// Convert to compiler flag format.
    pub fn to_flag(&self) -> String {
        format!("-D{}", self)
    }

    /// Split into the `(name, value)` pair the toolchain layer consumes.
    pub fn to_pair(&self) -> (String, Option<String>) {
        (self.name().to_string(), self.value().map(str::to_string))
    }
}

impl fmt::Display for Define {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Define::Flag(name) => write!(f, "{}", name),
            Define::KeyValue { name, value } => write!(f, "{}={}", name, value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_define_flags() {
        let d1 = Define::flag("SPIRV_CROSS_FORCE_STL_TYPES");
        assert_eq!(d1.to_flag(), "-DSPIRV_CROSS_FORCE_STL_TYPES");
        assert_eq!(d1.value(), None);

        let d2 = Define::key_value("SPIRV_CROSS_C_API_GLSL", "1");
        assert_eq!(d2.name(), "SPIRV_CROSS_C_API_GLSL");
        assert_eq!(d2.to_flag(), "-DSPIRV_CROSS_C_API_GLSL=1");
        assert_eq!(
            d2.to_pair(),
            ("SPIRV_CROSS_C_API_GLSL".to_string(), Some("1".to_string()))
        );
    }

    #[test]
    fn test_define_serializes_untagged() {
        let json = serde_json::to_string(&Define::key_value("A", "1")).unwrap();
        assert_eq!(json, r#"{"name":"A","value":"1"}"#);
        let json = serde_json::to_string(&Define::flag("B")).unwrap();
        assert_eq!(json, r#""B""#);
    }
}
