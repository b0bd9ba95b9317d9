//! # Render Payloads
//!
//! What a render hands back to the host: the page body (panel entries or
//! encoded image bytes), the derived control row, the populated select menu
//! if one is configured, and the ephemeral flag. The payload is plain data —
//! serializable so hosts can ship it across a process boundary — and
//! comparable so idempotence is testable with `==`.

use serde::Serialize;

use crate::controls::Control;
use crate::pager::MenuOption;

/// One entry of a structured text panel: `(name, value, inline)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PanelEntry {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

impl PanelEntry {
    /// The zero-width-space placeholder that forces a row break in the
    /// host's panel layout.
    pub fn spacer() -> Self {
        PanelEntry {
            name: "\u{200b}".to_string(),
            value: "\u{200b}".to_string(),
            inline: false,
        }
    }

    pub fn is_spacer(&self) -> bool {
        self.name == "\u{200b}" && self.value == "\u{200b}"
    }
}

/// The rendered page content.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum PageBody {
    /// Ordered panel entries for the text specialization.
    Panel(Vec<PanelEntry>),
    /// Encoded raster bytes for the image specialization.
    Image(Vec<u8>),
}

/// A selector populated for the current page: the page's option slice
/// followed by the menu's fixed options.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedMenu {
    pub id: String,
    pub placeholder: Option<String>,
    pub options: Vec<MenuOption>,
}

/// The complete result of one render pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderPayload {
    pub body: PageBody,
    /// The derived control row, in baseline order.
    pub controls: Vec<Control>,
    pub menu: Option<RenderedMenu>,
    pub ephemeral: bool,
    /// Zero-based index of the rendered page.
    pub page: usize,
    /// Zero-based index of the last page.
    pub total_pages: usize,
}
