//! # Pager Core
//!
//! The pagination state machine shared by both render specializations. It
//! owns the geometry, the cursor, the baseline control set, and the select
//! menu configuration; the specializations own their typed item collections
//! and report the item count here.
//!
//! Configuration is accreted by a builder and validated ONCE at the build
//! boundary, so the precondition set is auditable in one place. The same
//! checklist re-runs at the top of every render, in a fixed order, so the
//! first unmet precondition is always the one reported:
//!
//! 1. collection presence
//! 2. items/options length match
//! 3. controls present (with `previous` and `next`)
//! 4. geometry present
//! 5. page capacity
//! 6. counter prerequisites

use std::ops::Range;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::controls::{self, ControlSet, CountDisplay};
use crate::error::ConfigError;
use crate::page_math::{self, PagePosition};
use crate::payload::RenderedMenu;

/// Fixed page geometry: the grid the items flow into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Geometry {
    pub rows: usize,
    pub columns: usize,
}

impl Geometry {
    pub fn new(rows: usize, columns: usize) -> Self {
        Self { rows, columns }
    }

    pub fn items_per_page(&self) -> usize {
        self.rows * self.columns
    }
}

/// One selector option: `(label, value, description)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuOption {
    pub label: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl MenuOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            description: None,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A select menu configuration: identity plus the FIXED options that appear
/// on every page, after the page's own option slice.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SelectMenu {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default)]
    pub options: Vec<MenuOption>,
}

impl SelectMenu {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            placeholder: None,
            options: Vec::new(),
        }
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn option(mut self, option: MenuOption) -> Self {
        self.options.push(option);
        self
    }
}

/// The configuration shared by every paginator, accreted by the
/// specialization builders.
#[derive(Debug, Clone, Default)]
pub struct PagerConfig {
    pub(crate) geometry: Option<Geometry>,
    pub(crate) controls: Option<ControlSet>,
    pub(crate) menu: Option<SelectMenu>,
    pub(crate) options: Option<Vec<MenuOption>>,
    pub(crate) count: CountDisplay,
    pub(crate) show_counter: bool,
    /// Set when the host explicitly toggled the counter; only then is a
    /// missing `current_page` control a configuration error.
    pub(crate) counter_requested: bool,
    pub(crate) ephemeral: bool,
}

impl PagerConfig {
    pub(crate) fn new() -> Self {
        Self {
            show_counter: true,
            ..Self::default()
        }
    }

    /// The full validation checklist, in the fixed reporting order.
    pub(crate) fn validate(&self, item_count: Option<usize>) -> Result<(), ConfigError> {
        let has_collection =
            item_count.is_some() || self.options.is_some() || self.menu.is_some();
        if !has_collection {
            return Err(ConfigError::MissingCollection);
        }

        if let (Some(items), Some(options)) = (item_count, self.options.as_ref()) {
            if items != options.len() {
                return Err(ConfigError::LengthMismatch {
                    items,
                    options: options.len(),
                });
            }
        }

        let controls = self
            .controls
            .as_ref()
            .ok_or(ConfigError::MissingControl(controls::PREVIOUS))?;
        if !controls.contains(controls::PREVIOUS) {
            return Err(ConfigError::MissingControl(controls::PREVIOUS));
        }
        if !controls.contains(controls::NEXT) {
            return Err(ConfigError::MissingControl(controls::NEXT));
        }

        let geometry = self
            .geometry
            .ok_or(ConfigError::MissingGeometry("rows"))?;
        if geometry.rows == 0 {
            return Err(ConfigError::MissingGeometry("rows"));
        }
        if geometry.columns == 0 {
            return Err(ConfigError::MissingGeometry("columns"));
        }

        page_math::check_page_capacity(geometry.rows, geometry.columns)?;

        if self.counter_requested && !controls.contains(controls::CURRENT_PAGE) {
            return Err(ConfigError::MissingControl(controls::CURRENT_PAGE));
        }

        Ok(())
    }
}

/// Everything a render needs that is independent of the page body: the
/// visible slice, the derived control row, and the populated menu.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub range: Range<usize>,
    pub controls: Vec<crate::controls::Control>,
    pub menu: Option<RenderedMenu>,
    pub page: usize,
    pub total_pages: usize,
    pub ephemeral: bool,
}

/// The pagination state machine: configuration plus the current-page cursor.
#[derive(Debug, Clone)]
pub struct Pager {
    config: PagerConfig,
    item_count: Option<usize>,
    page: usize,
}

impl Pager {
    /// Validate the configuration and construct the state machine at page 0.
    pub(crate) fn new(config: PagerConfig, item_count: Option<usize>) -> Result<Self, ConfigError> {
        config.validate(item_count)?;
        Ok(Self {
            config,
            item_count,
            page: 0,
        })
    }

    pub fn page(&self) -> usize {
        self.page
    }

    /// The collection length the cursor paginates over: the primary items
    /// when present, else the auxiliary options.
    fn effective_count(&self) -> Option<usize> {
        self.item_count
            .or_else(|| self.config.options.as_ref().map(|o| o.len()))
    }

    /// Zero-based index of the last page. A paginator whose collection is a
    /// standalone menu (no items, no options) is a single page.
    pub fn total_pages(&self) -> usize {
        let per_page = self
            .config
            .geometry
            .map(|g| g.items_per_page())
            .unwrap_or(0);
        self.effective_count()
            .and_then(|count| page_math::total_pages(count, per_page))
            .unwrap_or(0)
    }

    pub fn position(&self) -> PagePosition {
        page_math::position(self.page, self.total_pages())
    }

    pub fn geometry(&self) -> Option<Geometry> {
        self.config.geometry
    }

    pub fn ephemeral(&self) -> bool {
        self.config.ephemeral
    }

    /// Advance the cursor one page, clamped at the last page.
    pub fn advance(&mut self) {
        if self.page < self.total_pages() {
            self.page += 1;
        }
    }

    /// Retreat the cursor one page, clamped at page 0.
    pub fn retreat(&mut self) {
        self.page = self.page.saturating_sub(1);
    }

    /// Move the cursor to an absolute page index.
    pub fn jump_to(&mut self, page: usize) -> Result<(), ConfigError> {
        let total = self.total_pages();
        if page > total {
            return Err(ConfigError::PageOutOfRange {
                requested: page,
                total,
            });
        }
        self.page = page;
        Ok(())
    }

    /// Run the validation checklist, slice the page, derive the control row,
    /// and populate the menu.
    pub fn frame(&self) -> Result<Frame, ConfigError> {
        self.config.validate(self.item_count)?;

        let total_pages = self.total_pages();
        let per_page = self
            .config
            .geometry
            .map(|g| g.items_per_page())
            .unwrap_or(0);
        let range = match self.effective_count() {
            Some(count) => page_math::page_slice(self.page, per_page, count),
            None => 0..0,
        };

        let controls = controls::derive_controls(
            self.config
                .controls
                .as_ref()
                .expect("validated: controls present"),
            self.position(),
            self.page,
            total_pages,
            &self.config.count,
            self.config.show_counter,
        );

        let menu = match (&self.config.menu, &self.config.options) {
            (Some(menu), options) => {
                let mut combined: Vec<MenuOption> = options
                    .as_ref()
                    .map(|all| all[range.clone()].to_vec())
                    .unwrap_or_default();
                page_math::check_menu_capacity(combined.len(), menu.options.len())?;
                combined.extend(menu.options.iter().cloned());
                Some(RenderedMenu {
                    id: menu.id.clone(),
                    placeholder: menu.placeholder.clone(),
                    options: combined,
                })
            }
            (None, _) => None,
        };

        debug!(
            "frame: page {}/{} slice {:?} ({} controls)",
            self.page,
            total_pages,
            range,
            controls.len()
        );

        Ok(Frame {
            range,
            controls: controls.into_row(),
            menu,
            page: self.page,
            total_pages,
            ephemeral: self.config.ephemeral,
        })
    }
}
