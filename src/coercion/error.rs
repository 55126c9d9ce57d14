use super::TypeSuffix;

/// A raw instance value could not be coerced to the declared field type
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("expected {expected}, found {found}")]
pub struct TypeMismatch {
    /// Type the schema declares for the field
    pub expected: TypeSuffix,
    /// Rendering of the offending raw value
    pub found: String,
}

impl TypeMismatch {
    pub(crate) fn new(expected: TypeSuffix, found: impl Into<String>) -> Self {
        Self {
            expected,
            found: found.into(),
        }
    }
}
