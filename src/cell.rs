//! # Cell Layout
//!
//! The geometry engine behind the image specialization. A container
//! rectangle is divided into a `rows × columns` grid of cells with
//! inter-cell spacing; for each cell this module derives the bounding box,
//! the gradient anchor pair for a chosen corner, the text anchor point for a
//! corner-pinned field, and the aspect-correct fit rectangle for the cell's
//! foreground image.
//!
//! Everything here is pure arithmetic over an already-known coordinate
//! space; nothing draws. The origin is the container's top-left, y grows
//! downward (raster convention).

use serde::{Deserialize, Serialize};

/// A point in surface pixel space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle in surface pixel space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// The corner a gradient starts from or a text field is pinned to.
///
/// Serialized as `TOP_LEFT`, `BOT_RIGHT`, ... on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Corner {
    #[serde(rename = "TOP_LEFT")]
    TopLeft,
    #[serde(rename = "TOP_RIGHT")]
    TopRight,
    #[serde(rename = "BOT_LEFT")]
    BottomLeft,
    #[serde(rename = "BOT_RIGHT")]
    BottomRight,
}

/// Horizontal text alignment, relative to the anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Start,
    End,
    Left,
    Right,
    Center,
}

/// Vertical text baseline placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextBaseline {
    Top,
    Hanging,
    Middle,
    Alphabetic,
    Ideographic,
    Bottom,
}

/// A container rectangle divided into a grid of equally sized cells.
#[derive(Debug, Clone, Copy)]
pub struct CellGrid {
    container: Rect,
    columns: usize,
    spacing_x: f64,
    spacing_y: f64,
    cell_width: f64,
    cell_height: f64,
}

impl CellGrid {
    /// Divide `container` into `rows × columns` cells. Each cell gives up
    /// one spacing unit of its track share; half the spacing pads each side,
    /// so adjacent cells sit one full spacing apart.
    pub fn new(container: Rect, rows: usize, columns: usize, spacing_x: f64, spacing_y: f64) -> Self {
        let cell_width = container.width / columns as f64 - spacing_x;
        let cell_height = container.height / rows as f64 - spacing_y;
        Self {
            container,
            columns,
            spacing_x,
            spacing_y,
            cell_width,
            cell_height,
        }
    }

    pub fn cell_width(&self) -> f64 {
        self.cell_width
    }

    pub fn cell_height(&self) -> f64 {
        self.cell_height
    }

    /// Bounding box of the cell holding the flat item index `i`
    /// (row-major: `row = i / columns`, `col = i % columns`).
    pub fn cell(&self, i: usize) -> Rect {
        let row = (i / self.columns) as f64;
        let col = (i % self.columns) as f64;
        let x = self.container.x
            + self.cell_width * col
            + self.spacing_x * col
            + self.spacing_x * 0.5;
        let y = self.container.y
            + self.cell_height * row
            + self.spacing_y * row
            + self.spacing_y * 0.5;
        Rect::new(x, y, self.cell_width, self.cell_height)
    }
}

/// The start/end anchor pair for a cell's linear background gradient: the
/// chosen corner and its diagonal opposite.
pub fn gradient_anchors(rect: Rect, corner: Corner) -> (Point, Point) {
    let tl = Point::new(rect.x, rect.y);
    let tr = Point::new(rect.right(), rect.y);
    let bl = Point::new(rect.x, rect.bottom());
    let br = Point::new(rect.right(), rect.bottom());
    match corner {
        Corner::TopLeft => (tl, br),
        Corner::TopRight => (tr, bl),
        Corner::BottomLeft => (bl, tr),
        Corner::BottomRight => (br, tl),
    }
}

/// Scale an image uniformly so it fits entirely within `cell`, centered.
///
/// Scale factor is `min(cell_w / img_w, cell_h / img_h)` — aspect preserved,
/// never overflowing either axis.
pub fn fit_rect(cell: Rect, img_width: f64, img_height: f64) -> Rect {
    let ratio = (cell.width / img_width).min(cell.height / img_height);
    let width = img_width * ratio;
    let height = img_height * ratio;
    Rect::new(
        cell.x + (cell.width - width) * 0.5,
        cell.y + (cell.height - height) * 0.5,
        width,
        height,
    )
}

/// A resolved text placement: where to anchor, and how the renderer should
/// align against that anchor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextAnchor {
    pub at: Point,
    pub align: TextAlign,
    pub baseline: TextBaseline,
}

/// Anchor a text field to a cell corner.
///
/// Left corners anchor at the left edge with start alignment, right corners
/// at the right edge with end alignment; top corners sit the baseline on
/// top, bottom corners on bottom. Margins shift inward on the x axis for
/// left corners and are applied as given for right corners (a negative
/// margin pulls right-corner text inward). Center-aligned fields get an
/// extra half-cell-width shift toward the horizontal midpoint, whichever
/// corner's margins they inherit.
pub fn text_anchor(
    cell: Rect,
    corner: Corner,
    margin_x: f64,
    margin_y: f64,
    align: Option<TextAlign>,
    baseline: Option<TextBaseline>,
) -> TextAnchor {
    let (default_align, default_baseline, base_x, base_y, centered_sign) = match corner {
        Corner::TopLeft => (TextAlign::Start, TextBaseline::Top, cell.x, cell.y, 1.0),
        Corner::TopRight => (TextAlign::End, TextBaseline::Top, cell.right(), cell.y, -1.0),
        Corner::BottomLeft => (
            TextAlign::Start,
            TextBaseline::Bottom,
            cell.x,
            cell.bottom(),
            1.0,
        ),
        Corner::BottomRight => (
            TextAlign::End,
            TextBaseline::Bottom,
            cell.right(),
            cell.bottom(),
            -1.0,
        ),
    };

    let align = align.unwrap_or(default_align);
    let baseline = baseline.unwrap_or(default_baseline);
    let center_shift = if align == TextAlign::Center {
        cell.width * 0.5 * centered_sign
    } else {
        0.0
    };

    TextAnchor {
        at: Point::new(base_x + margin_x + center_shift, base_y + margin_y),
        align,
        baseline,
    }
}

/// Strategy for shortening text that overflows a width limit.
///
/// The measured width comes from the host's font backend; the strategy
/// decides how many characters survive. Implementations must be
/// deterministic for a given `(text, measured_width, max_width)` triple.
pub trait TruncateToWidth {
    /// Return the text to draw. When `measured_width <= max_width` the text
    /// passes through unchanged.
    fn truncate(&self, text: &str, measured_width: f64, max_width: f64) -> String;
}

/// The default strategy: linear character-width interpolation.
///
/// Assumes every character is `measured_width / char_count` wide, removes
/// enough trailing characters for the estimate to fit (reserving room in the
/// ellipsis arithmetic), and appends `"..."`. The result is never remeasured;
/// swap in another [`TruncateToWidth`] for exact remeasurement.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearEstimate;

impl TruncateToWidth for LinearEstimate {
    fn truncate(&self, text: &str, measured_width: f64, max_width: f64) -> String {
        if measured_width <= max_width || text.is_empty() {
            return text.to_string();
        }
        let len = text.chars().count() as f64;
        let overflow = measured_width - max_width;
        let keep = (len - 2.0 - overflow * len / measured_width).floor().max(0.0) as usize;
        let mut out: String = text.chars().take(keep).collect();
        out.push_str("...");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_grid_cell_dimensions() {
        // 400x300 container, 2x2, spacing 20/10
        let grid = CellGrid::new(Rect::new(0.0, 0.0, 400.0, 300.0), 2, 2, 20.0, 10.0);
        assert!(close(grid.cell_width(), 180.0)); // 400/2 - 20
        assert!(close(grid.cell_height(), 140.0)); // 300/2 - 10
    }

    #[test]
    fn test_grid_cell_positions() {
        let grid = CellGrid::new(Rect::new(0.0, 0.0, 400.0, 300.0), 2, 2, 20.0, 10.0);

        // first cell: half-spacing inset
        let c0 = grid.cell(0);
        assert!(close(c0.x, 10.0));
        assert!(close(c0.y, 5.0));

        // second column: one cell width + one full spacing further
        let c1 = grid.cell(1);
        assert!(close(c1.x, 10.0 + 180.0 + 20.0));
        assert!(close(c1.y, 5.0));

        // second row wraps
        let c2 = grid.cell(2);
        assert!(close(c2.x, 10.0));
        assert!(close(c2.y, 5.0 + 140.0 + 10.0));
    }

    #[test]
    fn test_grid_honors_container_offset() {
        let grid = CellGrid::new(Rect::new(50.0, 30.0, 200.0, 100.0), 1, 2, 0.0, 0.0);
        let c0 = grid.cell(0);
        assert!(close(c0.x, 50.0));
        assert!(close(c0.y, 30.0));
        let c1 = grid.cell(1);
        assert!(close(c1.x, 150.0));
    }

    #[test]
    fn test_gradient_anchor_pairs_are_diagonals() {
        let rect = Rect::new(10.0, 20.0, 100.0, 50.0);

        let (from, to) = gradient_anchors(rect, Corner::TopLeft);
        assert_eq!(from, Point::new(10.0, 20.0));
        assert_eq!(to, Point::new(110.0, 70.0));

        let (from, to) = gradient_anchors(rect, Corner::BottomLeft);
        assert_eq!(from, Point::new(10.0, 70.0));
        assert_eq!(to, Point::new(110.0, 20.0));

        // every pair is corner + opposite corner
        for corner in [
            Corner::TopLeft,
            Corner::TopRight,
            Corner::BottomLeft,
            Corner::BottomRight,
        ] {
            let (from, to) = gradient_anchors(rect, corner);
            assert!(close(from.x + to.x, rect.x + rect.right()));
            assert!(close(from.y + to.y, rect.y + rect.bottom()));
        }
    }

    #[test]
    fn test_fit_rect_wide_image_in_tall_cell() {
        let cell = Rect::new(0.0, 0.0, 100.0, 200.0);
        let fitted = fit_rect(cell, 200.0, 100.0);
        // width-bound: scale 0.5 → 100x50, vertically centered
        assert!(close(fitted.width, 100.0));
        assert!(close(fitted.height, 50.0));
        assert!(close(fitted.x, 0.0));
        assert!(close(fitted.y, 75.0));
    }

    #[test]
    fn test_fit_rect_never_overflows_cell() {
        let cell = Rect::new(0.0, 0.0, 90.0, 60.0);
        for (w, h) in [(300.0, 40.0), (40.0, 300.0), (10.0, 10.0), (90.0, 60.0)] {
            let fitted = fit_rect(cell, w, h);
            assert!(fitted.width <= cell.width + 1e-9);
            assert!(fitted.height <= cell.height + 1e-9);
            // aspect preserved
            assert!(close(fitted.width / fitted.height, w / h));
        }
    }

    #[test]
    fn test_text_anchor_corner_defaults() {
        let cell = Rect::new(0.0, 0.0, 100.0, 60.0);

        let a = text_anchor(cell, Corner::TopLeft, 4.0, 2.0, None, None);
        assert_eq!(a.align, TextAlign::Start);
        assert_eq!(a.baseline, TextBaseline::Top);
        assert_eq!(a.at, Point::new(4.0, 2.0));

        let a = text_anchor(cell, Corner::BottomRight, -4.0, -2.0, None, None);
        assert_eq!(a.align, TextAlign::End);
        assert_eq!(a.baseline, TextBaseline::Bottom);
        assert_eq!(a.at, Point::new(96.0, 58.0));
    }

    #[test]
    fn test_text_anchor_center_shifts_to_midpoint() {
        let cell = Rect::new(0.0, 0.0, 100.0, 60.0);

        // centered from a left corner: +half width
        let a = text_anchor(cell, Corner::TopLeft, 0.0, 0.0, Some(TextAlign::Center), None);
        assert_eq!(a.at.x, 50.0);

        // centered from a right corner: -half width lands on the same midpoint
        let a = text_anchor(cell, Corner::TopRight, 0.0, 0.0, Some(TextAlign::Center), None);
        assert_eq!(a.at.x, 50.0);
    }

    #[test]
    fn test_text_anchor_explicit_overrides() {
        let cell = Rect::new(0.0, 0.0, 100.0, 60.0);
        let a = text_anchor(
            cell,
            Corner::TopLeft,
            0.0,
            0.0,
            Some(TextAlign::Right),
            Some(TextBaseline::Middle),
        );
        assert_eq!(a.align, TextAlign::Right);
        assert_eq!(a.baseline, TextBaseline::Middle);
    }

    #[test]
    fn test_linear_truncation_fits_passthrough() {
        let strategy = LinearEstimate;
        assert_eq!(strategy.truncate("hello", 40.0, 100.0), "hello");
    }

    #[test]
    fn test_linear_truncation_deterministic_estimate() {
        // 10 chars measuring 150px against a 100px limit:
        // keep = floor(10 - 2 - 50 * 10 / 150) = floor(4.66) = 4
        let strategy = LinearEstimate;
        let out = strategy.truncate("abcdefghij", 150.0, 100.0);
        assert_eq!(out, "abcd...");
        // same inputs, same answer
        assert_eq!(strategy.truncate("abcdefghij", 150.0, 100.0), out);
    }

    #[test]
    fn test_linear_truncation_clamps_at_bare_ellipsis() {
        let strategy = LinearEstimate;
        // extreme overflow: keep clamps to zero characters
        let out = strategy.truncate("abc", 1000.0, 10.0);
        assert_eq!(out, "...");
    }

    #[test]
    fn test_linear_truncation_multibyte_safe() {
        let strategy = LinearEstimate;
        let out = strategy.truncate("héllo wörld", 200.0, 100.0);
        assert!(out.ends_with("..."));
        assert!(out.chars().count() < 11 + 3);
    }

    #[test]
    fn test_corner_wire_format() {
        assert_eq!(
            serde_json::to_string(&Corner::BottomLeft).unwrap(),
            "\"BOT_LEFT\""
        );
        let corner: Corner = serde_json::from_str("\"TOP_RIGHT\"").unwrap();
        assert_eq!(corner, Corner::TopRight);
    }
}
