//! # Text Panel Specialization
//!
//! Renders each page as an ordered list of `(name, value, inline)` panel
//! entries plus the derived control row. The host's panel layout flows
//! inline entries left to right, three to a row; the grid geometry is
//! expressed through inline flags and zero-width-space spacer entries:
//!
//! - one column: every entry is a block (inline = false);
//! - three columns: entries pack naturally, no spacers needed;
//! - any other width: a spacer entry before each row-start item forces the
//!   row break early. These spacers are exactly the widgets counted by
//!   [`crate::page_math::row_spacing_overhead`].

use serde::{Deserialize, Serialize};

use crate::controls::{ControlSet, CountDisplay};
use crate::error::ConfigError;
use crate::page_math::PagePosition;
use crate::pager::{Geometry, MenuOption, Pager, PagerConfig, SelectMenu};
use crate::payload::{PageBody, PanelEntry, RenderPayload};

/// One displayed record: a name/value pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelItem {
    pub name: String,
    pub value: String,
}

impl PanelItem {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Builder for [`PanelPaginator`]. Setters accrete configuration and are
/// chainable; the whole checklist runs once in [`build`](Self::build).
#[derive(Debug, Clone, Default)]
pub struct PanelPaginatorBuilder {
    config: PagerConfig,
    items: Option<Vec<PanelItem>>,
}

impl PanelPaginatorBuilder {
    pub fn new() -> Self {
        Self {
            config: PagerConfig::new(),
            items: None,
        }
    }

    /// The primary item collection.
    pub fn items(mut self, items: Vec<PanelItem>) -> Self {
        self.items = Some(items);
        self
    }

    /// The auxiliary option collection, paired 1:1 with the items.
    pub fn options(mut self, options: Vec<MenuOption>) -> Self {
        self.config.options = Some(options);
        self
    }

    /// The select menu the page options populate.
    pub fn menu(mut self, menu: SelectMenu) -> Self {
        self.config.menu = Some(menu);
        self
    }

    /// The baseline control set; must contain `previous` and `next`.
    pub fn controls(mut self, controls: ControlSet) -> Self {
        self.config.controls = Some(controls);
        self
    }

    /// Rows and columns per page.
    pub fn geometry(mut self, rows: usize, columns: usize) -> Self {
        self.config.geometry = Some(Geometry::new(rows, columns));
        self
    }

    /// Show or hide the `current_page` counter control. Toggling requires a
    /// `current_page` control in the baseline set.
    pub fn page_counter(mut self, show: bool) -> Self {
        self.config.show_counter = show;
        self.config.counter_requested = true;
        self
    }

    /// Display a page counter on the previous/next controls themselves.
    pub fn count_on_controls(mut self, count: impl Into<CountDisplay>) -> Self {
        self.config.count = count.into();
        self
    }

    pub fn ephemeral(mut self, ephemeral: bool) -> Self {
        self.config.ephemeral = ephemeral;
        self
    }

    /// Validate the accreted configuration and construct the paginator.
    pub fn build(self) -> Result<PanelPaginator, ConfigError> {
        let item_count = self.items.as_ref().map(Vec::len);
        let pager = Pager::new(self.config, item_count)?;
        Ok(PanelPaginator {
            pager,
            items: self.items.unwrap_or_default(),
        })
    }
}

/// The text-panel paginator: slices items into pages and renders each page
/// as panel entries plus a control row.
#[derive(Debug, Clone)]
pub struct PanelPaginator {
    pager: Pager,
    items: Vec<PanelItem>,
}

impl PanelPaginator {
    pub fn builder() -> PanelPaginatorBuilder {
        PanelPaginatorBuilder::new()
    }

    pub fn page(&self) -> usize {
        self.pager.page()
    }

    pub fn total_pages(&self) -> usize {
        self.pager.total_pages()
    }

    pub fn position(&self) -> PagePosition {
        self.pager.position()
    }

    /// Render the current page. Idempotent: repeated calls without cursor
    /// movement produce identical payloads.
    pub fn render(&self) -> Result<RenderPayload, ConfigError> {
        let frame = self.pager.frame()?;
        let columns = self
            .pager
            .geometry()
            .map(|g| g.columns)
            .unwrap_or(1);

        // options-only collections page the menu; there are no items to slice
        let slice = self.items.get(frame.range.clone()).unwrap_or(&[]);
        let mut entries = Vec::with_capacity(slice.len());
        for (i, item) in slice.iter().enumerate() {
            if columns == 1 {
                entries.push(PanelEntry {
                    name: item.name.clone(),
                    value: item.value.clone(),
                    inline: false,
                });
            } else {
                if i > 0 && i % columns == 0 && columns != 3 {
                    entries.push(PanelEntry::spacer());
                }
                entries.push(PanelEntry {
                    name: item.name.clone(),
                    value: item.value.clone(),
                    inline: true,
                });
            }
        }

        Ok(RenderPayload {
            body: PageBody::Panel(entries),
            controls: frame.controls,
            menu: frame.menu,
            ephemeral: frame.ephemeral,
            page: frame.page,
            total_pages: frame.total_pages,
        })
    }

    /// Advance one page (clamped) and render.
    pub fn next(&mut self) -> Result<RenderPayload, ConfigError> {
        self.pager.advance();
        self.render()
    }

    /// Retreat one page (clamped) and render.
    pub fn previous(&mut self) -> Result<RenderPayload, ConfigError> {
        self.pager.retreat();
        self.render()
    }

    /// Jump to an absolute page index and render.
    pub fn jump_to(&mut self, page: usize) -> Result<RenderPayload, ConfigError> {
        self.pager.jump_to(page)?;
        self.render()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(n: usize) -> Vec<PanelItem> {
        (0..n)
            .map(|i| PanelItem::new(format!("name {i}"), format!("value {i}")))
            .collect()
    }

    fn builder(n: usize, rows: usize, columns: usize) -> PanelPaginatorBuilder {
        PanelPaginator::builder()
            .items(items(n))
            .controls(ControlSet::standard())
            .geometry(rows, columns)
    }

    fn panel_entries(payload: &RenderPayload) -> &[PanelEntry] {
        match &payload.body {
            PageBody::Panel(entries) => entries,
            PageBody::Image(_) => panic!("expected panel body"),
        }
    }

    #[test]
    fn test_single_column_renders_blocks() {
        let pager = builder(3, 3, 1).build().unwrap();
        let payload = pager.render().unwrap();
        let entries = panel_entries(&payload);
        assert_eq!(entries.len(), 3);
        assert!(entries.iter().all(|e| !e.inline && !e.is_spacer()));
    }

    #[test]
    fn test_triple_column_needs_no_spacers() {
        let pager = builder(6, 2, 3).build().unwrap();
        let payload = pager.render().unwrap();
        let entries = panel_entries(&payload);
        assert_eq!(entries.len(), 6);
        assert!(entries.iter().all(|e| e.inline));
    }

    #[test]
    fn test_row_spacers_inserted_at_row_starts() {
        // 2 columns → a spacer before items 2 and 4 (rows two and three)
        let pager = builder(6, 3, 2).build().unwrap();
        let payload = pager.render().unwrap();
        let entries = panel_entries(&payload);
        assert_eq!(entries.len(), 8);
        let spacer_positions: Vec<usize> = entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.is_spacer())
            .map(|(i, _)| i)
            .collect();
        assert_eq!(spacer_positions, vec![2, 5]);
    }

    #[test]
    fn test_render_is_idempotent() {
        let mut pager = builder(10, 2, 2)
            .count_on_controls(true)
            .build()
            .unwrap();
        pager.jump_to(1).unwrap();
        let first = pager.render().unwrap();
        let second = pager.render().unwrap();
        assert_eq!(first, second);

        // round-trip through another jump to the same page
        let third = pager.jump_to(1).unwrap();
        assert_eq!(first, third);
    }

    #[test]
    fn test_next_walks_to_last_then_sticks() {
        let mut pager = builder(10, 2, 2).build().unwrap();
        assert_eq!(pager.total_pages(), 2);
        pager.next().unwrap();
        pager.next().unwrap();
        assert_eq!(pager.position(), PagePosition::Last);
        let payload = pager.next().unwrap();
        assert_eq!(payload.page, 2);
        // last page holds the 2 leftover items
        assert_eq!(panel_entries(&payload).iter().filter(|e| !e.is_spacer()).count(), 2);
    }

    #[test]
    fn test_previous_from_first_is_noop() {
        let mut pager = builder(10, 2, 2).build().unwrap();
        let payload = pager.previous().unwrap();
        assert_eq!(payload.page, 0);
        assert_eq!(pager.position(), PagePosition::First);
    }

    #[test]
    fn test_single_page_payload_excludes_navigation() {
        let pager = builder(3, 2, 2).build().unwrap();
        let payload = pager.render().unwrap();
        assert!(!payload.controls.iter().any(|c| c.id == "previous"));
        assert!(!payload.controls.iter().any(|c| c.id == "next"));
    }

    #[test]
    fn test_mismatched_collections_fail_at_build() {
        let err = builder(4, 2, 2)
            .options(vec![MenuOption::new("only one", "1")])
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::LengthMismatch {
                items: 4,
                options: 1
            }
        ));
    }

    #[test]
    fn test_options_only_collection_renders_empty_body() {
        // no items at all: the option collection drives pagination and the
        // body stays empty
        let options: Vec<MenuOption> = (0..10)
            .map(|i| MenuOption::new(format!("opt {i}"), format!("{i}")))
            .collect();
        let mut pager = PanelPaginator::builder()
            .options(options)
            .menu(SelectMenu::new("pick"))
            .controls(ControlSet::standard())
            .geometry(2, 2)
            .build()
            .unwrap();
        assert_eq!(pager.total_pages(), 2);

        let payload = pager.next().unwrap();
        assert!(panel_entries(&payload).is_empty());
        let menu = payload.menu.unwrap();
        assert_eq!(menu.options.len(), 4);
        assert_eq!(menu.options[0].value, "4");
    }

    #[test]
    fn test_paired_options_follow_the_page() {
        let options: Vec<MenuOption> = (0..10)
            .map(|i| MenuOption::new(format!("opt {i}"), format!("{i}")))
            .collect();
        let mut pager = builder(10, 2, 2)
            .options(options)
            .menu(SelectMenu::new("pick"))
            .build()
            .unwrap();
        let payload = pager.next().unwrap();
        let menu = payload.menu.unwrap();
        assert_eq!(menu.options.len(), 4);
        assert_eq!(menu.options[0].value, "4");
    }
}
