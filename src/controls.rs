//! # Navigation Controls
//!
//! Control descriptors and the per-render derivation of their state.
//!
//! The paginator owns one BASELINE control set, supplied by the host and
//! never mutated. Every render derives a fresh working set from it —
//! enabling, disabling, relabeling, or pruning controls according to the
//! cursor — so repeated renders are idempotent with respect to cursor state
//! instead of accumulating label edits.
//!
//! The count-on-control labels intentionally preview the DESTINATION page,
//! not the current one: an enabled `previous` at page index 1 of 3 reads
//! "1/3", an enabled `next` reads "3/3". Disabled controls show the current
//! page. Preserve the asymmetry exactly.

use serde::{Deserialize, Serialize};

use crate::page_math::PagePosition;

/// Well-known control ids the derivation rules act on.
pub const PREVIOUS: &str = "previous";
pub const NEXT: &str = "next";
pub const CURRENT_PAGE: &str = "current_page";

/// Host-interpreted visual style of a control.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControlStyle {
    #[default]
    Primary,
    Secondary,
    Success,
    Danger,
    Link,
}

/// One interactive control: a button-like widget with an id, a label, a
/// style, and a disabled flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Control {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub style: ControlStyle,
    #[serde(default)]
    pub disabled: bool,
}

impl Control {
    pub fn new(id: impl Into<String>, label: impl Into<String>, style: ControlStyle) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            style,
            disabled: false,
        }
    }

    /// Chainable disabled flag, for building baseline sets.
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
}

/// An insertion-ordered mapping from control id to descriptor.
///
/// This is the one canonical control representation; inserting an id that is
/// already present replaces the descriptor in place, keeping its slot in the
/// rendered row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ControlSet {
    controls: Vec<Control>,
}

impl ControlSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// The default control row: previous, current_page (disabled counter),
    /// next, exit.
    pub fn standard() -> Self {
        let mut set = Self::new();
        set.insert(Control::new(PREVIOUS, "Previous", ControlStyle::Primary));
        set.insert(
            Control::new(CURRENT_PAGE, "current_page/total_page", ControlStyle::Secondary)
                .disabled(true),
        );
        set.insert(Control::new(NEXT, "Next", ControlStyle::Primary));
        set.insert(Control::new("exit", "Exit", ControlStyle::Danger));
        set
    }

    /// Insert or replace a control, keyed by id.
    pub fn insert(&mut self, control: Control) -> &mut Self {
        match self.controls.iter_mut().find(|c| c.id == control.id) {
            Some(slot) => *slot = control,
            None => self.controls.push(control),
        }
        self
    }

    pub fn get(&self, id: &str) -> Option<&Control> {
        self.controls.iter().find(|c| c.id == id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Control> {
        self.controls.iter_mut().find(|c| c.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Remove a control from the row entirely (not merely disable it).
    pub fn remove(&mut self, id: &str) {
        self.controls.retain(|c| c.id != id);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Control> {
        self.controls.iter()
    }

    pub fn len(&self) -> usize {
        self.controls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }

    /// Consume into the ordered control row.
    pub fn into_row(self) -> Vec<Control> {
        self.controls
    }
}

impl FromIterator<Control> for ControlSet {
    fn from_iter<T: IntoIterator<Item = Control>>(iter: T) -> Self {
        let mut set = ControlSet::new();
        for control in iter {
            set.insert(control);
        }
        set
    }
}

/// Whether and how previous/next carry a page counter in their label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CountDisplay {
    /// Labels are left as configured in the baseline.
    #[default]
    Off,
    /// Labels show destination-previewing page numbers.
    PageNumbers,
    /// A fixed label override applied to previous and next alike.
    Label(String),
}

impl From<bool> for CountDisplay {
    fn from(on: bool) -> Self {
        if on {
            CountDisplay::PageNumbers
        } else {
            CountDisplay::Off
        }
    }
}

/// Derive the rendered control set for one cursor state.
///
/// Pure over the baseline: the returned set is a fresh working copy with
/// enable/disable/label transforms applied; the baseline is untouched.
pub fn derive_controls(
    baseline: &ControlSet,
    pos: PagePosition,
    page: usize,
    total_pages: usize,
    count: &CountDisplay,
    show_counter: bool,
) -> ControlSet {
    let mut working = baseline.clone();

    if working.contains(CURRENT_PAGE) {
        if show_counter {
            if let Some(counter) = working.get_mut(CURRENT_PAGE) {
                counter.label = format!("{}/{}", page + 1, total_pages + 1);
            }
        } else {
            working.remove(CURRENT_PAGE);
        }
    }

    if total_pages == 0 {
        // Single page: nothing to navigate, drop the pair from the row.
        working.remove(PREVIOUS);
        working.remove(NEXT);
        return working;
    }

    match pos {
        PagePosition::First => {
            set_state(&mut working, PREVIOUS, true, page, total_pages, count);
            set_state(&mut working, NEXT, false, page, total_pages, count);
        }
        PagePosition::Middle => {
            set_state(&mut working, PREVIOUS, false, page, total_pages, count);
            set_state(&mut working, NEXT, false, page, total_pages, count);
        }
        PagePosition::Last => {
            set_state(&mut working, PREVIOUS, false, page, total_pages, count);
            set_state(&mut working, NEXT, true, page, total_pages, count);
        }
    }

    working
}

/// Apply disabled flag and count label to one navigation control.
fn set_state(
    set: &mut ControlSet,
    id: &str,
    disabled: bool,
    page: usize,
    total_pages: usize,
    count: &CountDisplay,
) {
    let Some(control) = set.get_mut(id) else {
        return;
    };
    control.disabled = disabled;
    match count {
        CountDisplay::Off => {}
        CountDisplay::Label(text) => control.label = text.clone(),
        CountDisplay::PageNumbers => {
            let shown = if disabled {
                page + 1
            } else if id == PREVIOUS {
                page // one less: the page you would land on
            } else {
                page + 2 // one more, same reason
            };
            control.label = format!("{}/{}", shown, total_pages + 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn baseline() -> ControlSet {
        ControlSet::standard()
    }

    #[test]
    fn test_standard_set_defaults() {
        let set = baseline();
        let counter = set.get(CURRENT_PAGE).unwrap();
        assert_eq!(counter.label, "current_page/total_page");
        assert!(counter.disabled);
        assert_eq!(counter.style, ControlStyle::Secondary);
        assert_eq!(set.get("exit").unwrap().style, ControlStyle::Danger);
    }

    #[test]
    fn test_insert_replaces_by_id() {
        let mut set = baseline();
        let before = set.len();
        set.insert(Control::new(NEXT, "Forward", ControlStyle::Success));
        assert_eq!(set.len(), before);
        assert_eq!(set.get(NEXT).unwrap().label, "Forward");
        // slot order preserved
        let ids: Vec<&str> = set.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec![PREVIOUS, CURRENT_PAGE, NEXT, "exit"]);
    }

    #[test]
    fn test_first_page_states() {
        let row = derive_controls(
            &baseline(),
            PagePosition::First,
            0,
            2,
            &CountDisplay::Off,
            true,
        );
        assert!(row.get(PREVIOUS).unwrap().disabled);
        assert!(!row.get(NEXT).unwrap().disabled);
        assert_eq!(row.get(CURRENT_PAGE).unwrap().label, "1/3");
    }

    #[test]
    fn test_last_page_states() {
        let row = derive_controls(
            &baseline(),
            PagePosition::Last,
            2,
            2,
            &CountDisplay::Off,
            true,
        );
        assert!(!row.get(PREVIOUS).unwrap().disabled);
        assert!(row.get(NEXT).unwrap().disabled);
    }

    #[test]
    fn test_single_page_prunes_navigation() {
        let row = derive_controls(
            &baseline(),
            PagePosition::First,
            0,
            0,
            &CountDisplay::PageNumbers,
            true,
        );
        assert!(!row.contains(PREVIOUS));
        assert!(!row.contains(NEXT));
        // counter and extra controls survive
        assert_eq!(row.get(CURRENT_PAGE).unwrap().label, "1/1");
        assert!(row.contains("exit"));
    }

    #[test]
    fn test_counter_removed_when_hidden() {
        let row = derive_controls(
            &baseline(),
            PagePosition::First,
            0,
            2,
            &CountDisplay::Off,
            false,
        );
        assert!(!row.contains(CURRENT_PAGE));
    }

    #[test]
    fn test_count_labels_preview_destination() {
        // First page of three: disabled previous shows current, next previews
        let row = derive_controls(
            &baseline(),
            PagePosition::First,
            0,
            2,
            &CountDisplay::PageNumbers,
            true,
        );
        assert_eq!(row.get(PREVIOUS).unwrap().label, "1/3");
        assert_eq!(row.get(NEXT).unwrap().label, "2/3");

        // Middle page: previous previews one less, next one more
        let row = derive_controls(
            &baseline(),
            PagePosition::Middle,
            1,
            2,
            &CountDisplay::PageNumbers,
            true,
        );
        assert_eq!(row.get(PREVIOUS).unwrap().label, "1/3");
        assert_eq!(row.get(NEXT).unwrap().label, "3/3");

        // Last page: disabled next shows current
        let row = derive_controls(
            &baseline(),
            PagePosition::Last,
            2,
            2,
            &CountDisplay::PageNumbers,
            true,
        );
        assert_eq!(row.get(NEXT).unwrap().label, "3/3");
        assert_eq!(row.get(PREVIOUS).unwrap().label, "2/3");
    }

    #[test]
    fn test_fixed_label_override() {
        let row = derive_controls(
            &baseline(),
            PagePosition::Middle,
            1,
            3,
            &CountDisplay::Label("~".to_string()),
            true,
        );
        assert_eq!(row.get(PREVIOUS).unwrap().label, "~");
        assert_eq!(row.get(NEXT).unwrap().label, "~");
    }

    #[test]
    fn test_baseline_untouched() {
        let base = baseline();
        let before = base.clone();
        let _ = derive_controls(
            &base,
            PagePosition::Middle,
            1,
            2,
            &CountDisplay::PageNumbers,
            true,
        );
        assert_eq!(base, before);
    }
}
