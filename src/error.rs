//! Structured error types for the pagekit pagination engine.
//!
//! Everything is a configuration error: a paginator either has a complete,
//! consistent configuration and renders deterministically, or it refuses to
//! render at all. The capacity variants (`Capacity`, `MenuCapacity`) are the
//! subset raised when a computed widget total exceeds the host's hard
//! per-page ceiling.
//!
//! Messages are descriptive and carry the offending values; hosts are
//! expected to surface them verbatim.

use thiserror::Error;

/// Maximum interactive widgets (panel entries, menu options) the host can
/// address on a single page.
pub const MAX_WIDGETS_PER_PAGE: usize = 25;

/// The unified error type returned by all public pagekit API functions.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Neither an item collection, an option collection, nor a standalone
    /// select menu was configured.
    #[error("define items, options, or a select menu before rendering (items() / options() / menu())")]
    MissingCollection,

    /// Items and options are both present but not paired 1:1.
    #[error("items (length {items}) and options (length {options}) must have the same length")]
    LengthMismatch { items: usize, options: usize },

    /// The baseline control set lacks a required control id.
    #[error("add a '{0}' control to the control set")]
    MissingControl(&'static str),

    /// Rows or columns were never configured.
    #[error("missing geometry: {0} is not set")]
    MissingGeometry(&'static str),

    /// A page index outside `[0, total_pages]` was requested.
    #[error("page {requested} is out of range 0..={total}")]
    PageOutOfRange { requested: usize, total: usize },

    /// Widgets per page (items plus row-spacing placeholders) exceed the
    /// host ceiling.
    #[error(
        "a {rows}x{columns} grid renders {widgets} widgets per page \
         ({rows}*{columns} items + {spacers} row spacers); max is {max}"
    )]
    Capacity {
        rows: usize,
        columns: usize,
        widgets: usize,
        spacers: usize,
        max: usize,
    },

    /// A rendered select menu would exceed the host's option ceiling.
    #[error(
        "select menu would hold {total} options on one page \
         ({page_items} page items + {fixed} fixed options); max is {max}"
    )]
    MenuCapacity {
        page_items: usize,
        fixed: usize,
        total: usize,
        max: usize,
    },

    /// An image-path container or gradient parameter is absent.
    #[error("missing canvas parameter: {0} is not set")]
    MissingCanvas(&'static str),

    /// An image-path numeric parameter is NaN or infinite.
    #[error("canvas parameter {0} is not a finite number")]
    NonFinite(&'static str),

    /// A cell text field was declared without a name.
    #[error("cell field is missing a name")]
    UnnamedField,

    /// JSON configuration failed to deserialize.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// The host raster surface reported a failure (e.g. during encoding).
    #[error("surface error: {0}")]
    Surface(String),
}

impl ConfigError {
    /// Whether this error is one of the capacity (widget-ceiling) kinds.
    pub fn is_capacity(&self) -> bool {
        matches!(
            self,
            ConfigError::Capacity { .. } | ConfigError::MenuCapacity { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_classification() {
        let err = ConfigError::Capacity {
            rows: 5,
            columns: 5,
            widgets: 30,
            spacers: 5,
            max: MAX_WIDGETS_PER_PAGE,
        };
        assert!(err.is_capacity());
        assert!(!ConfigError::MissingCollection.is_capacity());
    }

    #[test]
    fn test_messages_carry_offending_values() {
        let err = ConfigError::LengthMismatch {
            items: 10,
            options: 7,
        };
        let msg = err.to_string();
        assert!(msg.contains("10"));
        assert!(msg.contains("7"));

        let err = ConfigError::PageOutOfRange {
            requested: 9,
            total: 2,
        };
        assert_eq!(err.to_string(), "page 9 is out of range 0..=2");
    }
}
