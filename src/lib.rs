//! # pagekit
//!
//! A pagination and cell-layout engine for interactive chat surfaces.
//!
//! A host hands pagekit a flat item collection, a grid geometry, and a
//! baseline control set; pagekit slices the collection into pages, tracks
//! the current-page cursor, derives the navigation controls for that cursor
//! (enabled/disabled/labeled, pruned entirely on single-page collections),
//! and renders the visible page either as structured text-panel entries or
//! as a composited image on a host-supplied raster surface.
//!
//! The host's widgets and raster backend are capability seams, not
//! dependencies: control rows and menus come back as plain data, and the
//! image path draws through the [`surface::RasterSurface`] trait.
//!
//! ## Architecture
//!
//! ```text
//! Builder (chainable config, validated once at build())
//!       ↓
//!  [pager]      — cursor state machine, validation checklist, Frame
//!       ↓
//!  [page_math]  — slice bounds, page counts, widget-capacity rules
//!  [controls]   — per-render control derivation from an immutable baseline
//!       ↓
//!  [panel]      — (name, value, inline) entries + row spacers
//!  [image]      — cell grid via [cell], drawn through [surface]
//!       ↓
//!  RenderPayload — body + control row + menu + ephemeral flag
//! ```
//!
//! Rendering is synchronous and idempotent: the same cursor state always
//! produces the same payload, because every render derives its control row
//! fresh from the untouched baseline.

pub mod cell;
pub mod controls;
pub mod error;
pub mod image;
pub mod page_math;
pub mod pager;
pub mod panel;
pub mod payload;
pub mod surface;

pub use cell::{Corner, LinearEstimate, Point, Rect, TextAlign, TextBaseline, TruncateToWidth};
pub use controls::{Control, ControlSet, ControlStyle, CountDisplay};
pub use error::{ConfigError, MAX_WIDGETS_PER_PAGE};
pub use image::{CellItem, CellStyle, FieldSpec, ImagePaginator, ImagePaginatorBuilder, MaxWidth};
pub use page_math::PagePosition;
pub use pager::{Geometry, MenuOption, SelectMenu};
pub use panel::{PanelItem, PanelPaginator, PanelPaginatorBuilder};
pub use payload::{PageBody, PanelEntry, RenderPayload, RenderedMenu};
pub use surface::{Color, RasterSurface, TextPaint};
