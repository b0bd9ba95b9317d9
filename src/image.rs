//! # Image Specialization
//!
//! Renders each page as a composited raster: the container rectangle is
//! divided into the configured grid, and every visible item gets a cell with
//! a corner-oriented gradient background, its image aspect-fit in the
//! center, and corner-pinned text fields on top. The finished surface is
//! encoded to PNG bytes and handed back with the same control row the text
//! specialization produces.
//!
//! Field configuration follows the spec-then-resolve pattern: a [`FieldSpec`]
//! is the sparse, JSON-friendly input; [`FieldSpec::resolve`] fills the
//! defaults once at build time so the draw loop only ever sees concrete
//! values.

use std::collections::HashMap;
use std::fmt;

use log::{debug, trace};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::cell::{
    fit_rect, gradient_anchors, text_anchor, CellGrid, Corner, LinearEstimate, Rect, TextAlign,
    TextBaseline, TruncateToWidth,
};
use crate::controls::{ControlSet, CountDisplay};
use crate::error::ConfigError;
use crate::page_math::PagePosition;
use crate::pager::{Geometry, MenuOption, Pager, PagerConfig, SelectMenu};
use crate::payload::{PageBody, RenderPayload};
use crate::surface::{Color, RasterSurface, TextPaint};

/// PNG compression level passed to the surface encoder.
const PNG_COMPRESSION: u8 = 4;

/// Width limit for a cell text field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MaxWidth {
    /// The cell width minus the field's horizontal margin.
    Parent,
    /// A literal pixel limit.
    Px(f64),
}

impl Serialize for MaxWidth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            MaxWidth::Parent => serializer.serialize_str("parent"),
            MaxWidth::Px(px) => serializer.serialize_f64(*px),
        }
    }
}

impl<'de> Deserialize<'de> for MaxWidth {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        use serde::de::Error as _;
        let value = serde_json::Value::deserialize(deserializer)?;
        match value {
            serde_json::Value::String(s) if s == "parent" => Ok(MaxWidth::Parent),
            serde_json::Value::Number(n) => n
                .as_f64()
                .map(MaxWidth::Px)
                .ok_or_else(|| D::Error::custom("maxWidth number out of range")),
            other => Err(D::Error::custom(format!(
                "expected \"parent\" or a pixel number for maxWidth, got {other}"
            ))),
        }
    }
}

/// Sparse configuration for one text field drawn in every cell.
///
/// `name` selects the value from each item's value map; everything else is
/// optional and defaulted by [`resolve`](Self::resolve).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSpec {
    pub name: String,
    pub font: Option<String>,
    pub color: Option<Color>,
    #[serde(default)]
    pub margin_x: f64,
    #[serde(default)]
    pub margin_y: f64,
    pub max_width: Option<MaxWidth>,
    pub corner: Option<Corner>,
    pub baseline: Option<TextBaseline>,
    pub align: Option<TextAlign>,
    #[serde(default)]
    pub stroke: bool,
    pub stroke_color: Option<Color>,
    pub stroke_width: Option<f64>,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Fill defaults, producing the concrete field the draw loop uses.
    pub fn resolve(&self) -> Result<ResolvedField, ConfigError> {
        if self.name.is_empty() {
            return Err(ConfigError::UnnamedField);
        }
        Ok(ResolvedField {
            name: self.name.clone(),
            font: self
                .font
                .clone()
                .unwrap_or_else(|| "20px sans-serif".to_string()),
            color: self.color.unwrap_or(Color::WHITE),
            margin_x: self.margin_x,
            margin_y: self.margin_y,
            max_width: self.max_width,
            corner: self.corner.unwrap_or(Corner::TopLeft),
            baseline: self.baseline,
            align: self.align,
            stroke: self.stroke,
            stroke_color: self.stroke_color.unwrap_or(Color::BLACK),
            stroke_width: self.stroke_width.unwrap_or(3.0),
        })
    }
}

/// A field with every default filled. Alignment and baseline stay optional
/// here: their defaults depend on the corner and are resolved per anchor.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedField {
    pub name: String,
    pub font: String,
    pub color: Color,
    pub margin_x: f64,
    pub margin_y: f64,
    pub max_width: Option<MaxWidth>,
    pub corner: Corner,
    pub baseline: Option<TextBaseline>,
    pub align: Option<TextAlign>,
    pub stroke: bool,
    pub stroke_color: Color,
    pub stroke_width: f64,
}

/// Visual configuration shared by every cell.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CellStyle {
    pub spacing_x: f64,
    pub spacing_y: f64,
    pub gradient_start: Color,
    pub gradient_end: Color,
    pub gradient_corner: Corner,
    pub fields: Vec<FieldSpec>,
}

impl Default for CellStyle {
    fn default() -> Self {
        Self {
            spacing_x: 0.0,
            spacing_y: 0.0,
            gradient_start: Color::hex("#2f3944"),
            gradient_end: Color::hex("#455467"),
            gradient_corner: Corner::BottomLeft,
            fields: Vec::new(),
        }
    }
}

impl CellStyle {
    /// Deserialize a style described as JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn field(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }
}

/// One displayed record on the image path: a host image handle plus the
/// text values the configured fields select by name.
#[derive(Debug, Clone)]
pub struct CellItem<I> {
    pub image: I,
    pub values: HashMap<String, String>,
}

impl<I> CellItem<I> {
    pub fn new(image: I) -> Self {
        Self {
            image,
            values: HashMap::new(),
        }
    }

    /// Chainable value setter.
    pub fn value(mut self, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.values.insert(name.into(), text.into());
        self
    }
}

/// Builder for [`ImagePaginator`]. Same accretion-then-`build()` contract as
/// the panel builder, with the image-path extras: container rectangle, cell
/// style, and an optional truncation strategy override.
pub struct ImagePaginatorBuilder<I> {
    config: PagerConfig,
    entries: Option<Vec<CellItem<I>>>,
    style: CellStyle,
    container_width: Option<f64>,
    container_height: Option<f64>,
    offset_x: f64,
    offset_y: f64,
    truncation: Option<Box<dyn TruncateToWidth>>,
}

impl<I> ImagePaginatorBuilder<I> {
    pub fn new() -> Self {
        Self {
            config: PagerConfig::new(),
            entries: None,
            style: CellStyle::default(),
            container_width: None,
            container_height: None,
            offset_x: 0.0,
            offset_y: 0.0,
            truncation: None,
        }
    }

    /// The primary item collection.
    pub fn items(mut self, entries: Vec<CellItem<I>>) -> Self {
        self.entries = Some(entries);
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

    /// Show or hide the `current_page` counter control.
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

    /// Pixel dimensions of the cell container within the surface.
    pub fn container(mut self, width: f64, height: f64) -> Self {
        self.container_width = Some(width);
        self.container_height = Some(height);
        self
    }

    /// Offset of the cell container from the surface origin.
    pub fn container_offset(mut self, x: f64, y: f64) -> Self {
        self.offset_x = x;
        self.offset_y = y;
        self
    }

    /// Cell visuals: spacing, gradient, text fields.
    pub fn cell_style(mut self, style: CellStyle) -> Self {
        self.style = style;
        self
    }

    /// Replace the default linear-estimate truncation strategy.
    pub fn truncation(mut self, strategy: impl TruncateToWidth + 'static) -> Self {
        self.truncation = Some(Box::new(strategy));
        self
    }

    /// Validate the accreted configuration (pagination checklist plus the
    /// image-path canvas checks) and construct the paginator.
    pub fn build(self) -> Result<ImagePaginator<I>, ConfigError> {
        let item_count = self.entries.as_ref().map(Vec::len);
        let pager = Pager::new(self.config, item_count)?;

        let width = self
            .container_width
            .ok_or(ConfigError::MissingCanvas("container width"))?;
        let height = self
            .container_height
            .ok_or(ConfigError::MissingCanvas("container height"))?;
        check_dimension(width, "container width")?;
        check_dimension(height, "container height")?;
        check_finite(self.offset_x, "container x offset")?;
        check_finite(self.offset_y, "container y offset")?;
        check_finite(self.style.spacing_x, "cell x spacing")?;
        check_finite(self.style.spacing_y, "cell y spacing")?;

        let fields = self
            .style
            .fields
            .iter()
            .map(FieldSpec::resolve)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ImagePaginator {
            pager,
            entries: self.entries.unwrap_or_default(),
            container: Rect::new(self.offset_x, self.offset_y, width, height),
            spacing_x: self.style.spacing_x,
            spacing_y: self.style.spacing_y,
            gradient_start: self.style.gradient_start,
            gradient_end: self.style.gradient_end,
            gradient_corner: self.style.gradient_corner,
            fields,
            truncation: self.truncation.unwrap_or_else(|| Box::new(LinearEstimate)),
        })
    }
}

impl<I> Default for ImagePaginatorBuilder<I> {
    fn default() -> Self {
        Self::new()
    }
}

fn check_finite(value: f64, name: &'static str) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonFinite(name))
    }
}

/// Container dimensions must be finite AND positive; a zero-sized container
/// is treated as unset.
fn check_dimension(value: f64, name: &'static str) -> Result<(), ConfigError> {
    check_finite(value, name)?;
    if value <= 0.0 {
        return Err(ConfigError::MissingCanvas(name));
    }
    Ok(())
}

/// The image paginator: slices items into pages and composites each page
/// onto a host raster surface.
pub struct ImagePaginator<I> {
    pager: Pager,
    entries: Vec<CellItem<I>>,
    container: Rect,
    spacing_x: f64,
    spacing_y: f64,
    gradient_start: Color,
    gradient_end: Color,
    gradient_corner: Corner,
    fields: Vec<ResolvedField>,
    truncation: Box<dyn TruncateToWidth>,
}

// Manual impl: the truncation strategy is a trait object without Debug.
impl<I: fmt::Debug> fmt::Debug for ImagePaginator<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImagePaginator")
            .field("pager", &self.pager)
            .field("entries", &self.entries)
            .field("container", &self.container)
            .field("fields", &self.fields)
            .finish_non_exhaustive()
    }
}

impl<I> ImagePaginator<I> {
    pub fn builder() -> ImagePaginatorBuilder<I> {
        ImagePaginatorBuilder::new()
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

    /// Render the current page onto `surface` and encode it.
    ///
    /// The surface is expected to arrive pre-composited with the page
    /// background; this pass draws the cell grid on top and encodes the
    /// result. Validation runs in full before the first draw call — a
    /// misconfigured paginator never produces a partial raster.
    pub fn render<S>(&self, surface: &mut S) -> Result<RenderPayload, ConfigError>
    where
        S: RasterSurface<Image = I>,
    {
        let frame = self.pager.frame()?;
        let geometry = self
            .pager
            .geometry()
            .expect("validated: geometry present");

        let grid = CellGrid::new(
            self.container,
            geometry.rows,
            geometry.columns,
            self.spacing_x,
            self.spacing_y,
        );
        debug!(
            "image render: page {}/{}, {} cells of {:.1}x{:.1}",
            frame.page,
            frame.total_pages,
            frame.range.len(),
            grid.cell_width(),
            grid.cell_height()
        );

        // options-only collections page the menu; there are no cells to draw
        let visible = self.entries.get(frame.range.clone()).unwrap_or(&[]);
        for (i, item) in visible.iter().enumerate() {
            self.draw_cell(surface, &grid, i, item);
        }

        let bytes = surface
            .encode_png(PNG_COMPRESSION)
            .map_err(ConfigError::Surface)?;

        Ok(RenderPayload {
            body: PageBody::Image(bytes),
            controls: frame.controls,
            menu: frame.menu,
            ephemeral: frame.ephemeral,
            page: frame.page,
            total_pages: frame.total_pages,
        })
    }

    /// Advance one page (clamped), render, encode.
    pub fn next<S>(&mut self, surface: &mut S) -> Result<RenderPayload, ConfigError>
    where
        S: RasterSurface<Image = I>,
    {
        self.pager.advance();
        self.render(surface)
    }

    /// Retreat one page (clamped), render, encode.
    pub fn previous<S>(&mut self, surface: &mut S) -> Result<RenderPayload, ConfigError>
    where
        S: RasterSurface<Image = I>,
    {
        self.pager.retreat();
        self.render(surface)
    }

    /// Jump to an absolute page index, render, encode.
    pub fn jump_to<S>(&mut self, page: usize, surface: &mut S) -> Result<RenderPayload, ConfigError>
    where
        S: RasterSurface<Image = I>,
    {
        self.pager.jump_to(page)?;
        self.render(surface)
    }

    /// Draw one item's cell: gradient background, aspect-fit image, then
    /// the text fields (stroke pass before fill pass, per field).
    fn draw_cell<S>(&self, surface: &mut S, grid: &CellGrid, i: usize, item: &CellItem<I>)
    where
        S: RasterSurface<Image = I>,
    {
        let cell = grid.cell(i);
        trace!("cell {i}: {cell:?}");

        let (from, to) = gradient_anchors(cell, self.gradient_corner);
        surface.fill_gradient_rect(cell, from, to, self.gradient_start, self.gradient_end);

        let (img_w, img_h) = surface.image_size(&item.image);
        surface.draw_image(&item.image, fit_rect(cell, img_w, img_h));

        for field in &self.fields {
            let Some(text) = item.values.get(&field.name) else {
                continue;
            };

            let anchor = text_anchor(
                cell,
                field.corner,
                field.margin_x,
                field.margin_y,
                field.align,
                field.baseline,
            );

            let text = match field.max_width {
                Some(limit) => {
                    let max = match limit {
                        MaxWidth::Parent => grid.cell_width() - field.margin_x,
                        MaxWidth::Px(px) => px,
                    };
                    let measured = surface.measure_text(text, &field.font);
                    self.truncation.truncate(text, measured, max)
                }
                None => text.clone(),
            };

            let paint = TextPaint {
                font: field.font.clone(),
                color: field.color,
                align: anchor.align,
                baseline: anchor.baseline,
                stroke_color: field.stroke_color,
                stroke_width: field.stroke_width,
            };
            if field.stroke {
                surface.stroke_text(&text, anchor.at, &paint);
            }
            surface.fill_text(&text, anchor.at, &paint);
        }
    }
}
