/// Outcome of reading a single field from a record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<T> {
    /// The field holds a usable value.
    Present(T),

    /// The field is absent or `null`.
    Missing,

    /// The field is present but its value cannot be interpreted.
    Malformed,
}

impl<T> FieldValue<T> {
    /// Returns `true` if the result is `Present`.
    #[must_use]
    pub const fn is_present(&self) -> bool {
        matches!(self, Self::Present(_))
    }

    /// Converts into an `Option`, discarding the difference between missing and malformed.
    #[must_use]
    pub fn present(self) -> Option<T> {
        match self {
            Self::Present(value) => Some(value),
            Self::Missing | Self::Malformed => None,
        }
    }

    #[must_use]
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> FieldValue<U> {
        match self {
            Self::Present(value) => FieldValue::Present(f(value)),
            Self::Missing => FieldValue::Missing,
            Self::Malformed => FieldValue::Malformed,
        }
    }

    #[must_use]
    pub fn and_then<U>(self, f: impl FnOnce(T) -> FieldValue<U>) -> FieldValue<U> {
        match self {
            Self::Present(value) => f(value),
            Self::Missing => FieldValue::Missing,
            Self::Malformed => FieldValue::Malformed,
        }
    }
}
