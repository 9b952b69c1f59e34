//! Generator output: either a structured value or opaque text

/// One generator's output
///
/// Rule-based generation yields `Structured`; delegated generation yields
/// `Freeform` text that is passed through untouched.
#[derive(Debug, Clone, PartialEq)]
pub enum Artifact<T> {
    Structured(T),
    Freeform(String),
}

impl<T> Artifact<T> {
    pub fn as_structured(&self) -> Option<&T> {
        match self {
            Artifact::Structured(value) => Some(value),
            Artifact::Freeform(_) => None,
        }
    }

    pub fn as_freeform(&self) -> Option<&str> {
        match self {
            Artifact::Structured(_) => None,
            Artifact::Freeform(text) => Some(text),
        }
    }

    pub fn is_structured(&self) -> bool {
        matches!(self, Artifact::Structured(_))
    }
}
