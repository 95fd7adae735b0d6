//! Error taxonomy for the toolkit.
//!
//! Split by failure class:
//! - Structural/configuration errors (nesting too deep, unknown style or tag,
//!   duplicate registration) are programmer errors and propagate to the
//!   application boundary.
//! - Input-decoding errors never surface here at all: the decoder logs the
//!   malformed sequence and drops the in-flight event.
//! - Layout overflow is not an error. Content that does not fit is clamped or
//!   spills per the element's overflow policy.

use thiserror::Error;

/// Errors produced while laying out the element tree.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// The element tree is nested deeper than the configured bound.
    #[error("element <{element}> exceeds the maximum nesting depth of {max}")]
    NestingTooDeep { element: String, max: u32 },
}

/// Errors produced by style property access and parsing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StyleError {
    /// A string-keyed (XML/runtime) lookup named a property that was never
    /// registered.
    #[error("unknown style property '{0}'")]
    UnknownProperty(String),

    /// A dimension that has no scalar form (auto, min-content, max-content)
    /// was asked to resolve to one.
    #[error("dimension '{0}' cannot be resolved to a scalar value")]
    NotScalar(String),

    /// A property value string failed to parse.
    #[error("invalid value '{value}' for style property '{property}'")]
    BadValue { property: String, value: String },
}

/// Errors produced while loading the XML element dialect.
#[derive(Debug, Error)]
pub enum DomError {
    /// The document used a tag that no factory is registered for.
    #[error("unknown element tag <{0}>")]
    UnknownTag(String),

    /// A tag was registered twice.
    #[error("element tag <{0}> is already registered")]
    DuplicateTag(String),

    /// The registered factory offers no constructor compatible with the
    /// document (text content, empty, or child elements).
    #[error("element <{0}> has no suitable constructor for its content")]
    NoConstructor(String),

    /// An attribute could not be applied to the element.
    #[error("cannot apply attribute '{name}' on <{tag}>: {source}")]
    BadAttribute {
        tag: String,
        name: String,
        #[source]
        source: StyleError,
    },

    /// The XML itself is malformed.
    #[error("malformed document: {0}")]
    Parse(#[from] quick_xml::Error),

    /// The document is empty or has no root element.
    #[error("document has no root element")]
    NoRoot,
}

/// Errors surfacing from the application loop.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Layout(#[from] LayoutError),
}

/// Errors produced by the typed accessors of decoded input payloads.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InputError {
    /// A window-operations response was read through the accessor of a
    /// different variant.
    #[error("window-ops response is {actual}, not {expected}")]
    WrongResponseKind {
        expected: &'static str,
        actual: &'static str,
    },
}
