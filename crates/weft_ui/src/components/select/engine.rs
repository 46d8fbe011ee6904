//! Select interaction engine
//!
//! The render-free core of the combobox: option normalization, the text
//! filter, the open/close machine, the roving active index, the selection
//! reducer, and dropdown placement. The widget layer feeds it discrete
//! input events; each event method returns the effects ([`SelectEmit`])
//! the widget maps onto consumer callbacks.
//!
//! The engine mirrors the controlled value it is given via
//! [`SelectEngine::sync_value`] and never owns it beyond the current
//! render: every mutation is reported through [`SelectEmit::Change`] and
//! the consumer echoes it back as a prop.

use smallvec::SmallVec;
use weft_core::Key;
use weft_view::{resolve_placement, Placement, Rect};

// ---------------------------------------------------------------------------
// Option model
// ---------------------------------------------------------------------------

/// The comparable identity of an option
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum OptionScalar {
    Str(String),
    Int(i64),
}

impl std::fmt::Display for OptionScalar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OptionScalar::Str(s) => f.write_str(s),
            OptionScalar::Int(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for OptionScalar {
    fn from(value: &str) -> Self {
        OptionScalar::Str(value.to_string())
    }
}

impl From<String> for OptionScalar {
    fn from(value: String) -> Self {
        OptionScalar::Str(value)
    }
}

impl From<i64> for OptionScalar {
    fn from(value: i64) -> Self {
        OptionScalar::Int(value)
    }
}

/// An option as the consumer supplied it: bare scalar or labeled pair
#[derive(Clone, Debug, PartialEq)]
pub enum OptionEntry {
    Primitive(OptionScalar),
    Labeled { value: OptionScalar, label: String },
}

/// An option normalized to a canonical value + display label
///
/// `labeled` remembers the original shape so commits echo the option back
/// the way it came in: a primitive stays a primitive.
#[derive(Clone, Debug, PartialEq)]
pub struct SelectOption {
    value: OptionScalar,
    label: String,
    labeled: bool,
}

impl SelectOption {
    /// Normalize a bare scalar; the label is its display form
    pub fn primitive(value: impl Into<OptionScalar>) -> Self {
        let value = value.into();
        let label = value.to_string();
        Self {
            value,
            label,
            labeled: false,
        }
    }

    /// Normalize a labeled pair
    ///
    /// An empty label degrades to the value's display form rather than an
    /// unlabeled row.
    pub fn labeled(value: impl Into<OptionScalar>, label: impl Into<String>) -> Self {
        let value = value.into();
        let mut label = label.into();
        if label.is_empty() {
            label = value.to_string();
        }
        Self {
            value,
            label,
            labeled: true,
        }
    }

    pub fn value(&self) -> &OptionScalar {
        &self.value
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// The option in its original shape
    pub fn entry(&self) -> OptionEntry {
        if self.labeled {
            OptionEntry::Labeled {
                value: self.value.clone(),
                label: self.label.clone(),
            }
        } else {
            OptionEntry::Primitive(self.value.clone())
        }
    }

    /// Case-insensitive substring match of the query against the label
    pub fn matches(&self, query: &str) -> bool {
        if query.is_empty() {
            return true;
        }
        self.label.to_lowercase().contains(&query.to_lowercase())
    }
}

impl From<&str> for SelectOption {
    fn from(value: &str) -> Self {
        SelectOption::primitive(value)
    }
}

impl From<i64> for SelectOption {
    fn from(value: i64) -> Self {
        SelectOption::primitive(value)
    }
}

impl From<OptionEntry> for SelectOption {
    fn from(entry: OptionEntry) -> Self {
        match entry {
            OptionEntry::Primitive(value) => SelectOption::primitive(value),
            OptionEntry::Labeled { value, label } => SelectOption::labeled(value, label),
        }
    }
}

impl<V: Into<OptionScalar>, L: Into<String>> From<(V, L)> for SelectOption {
    fn from((value, label): (V, L)) -> Self {
        SelectOption::labeled(value, label)
    }
}

// ---------------------------------------------------------------------------
// Selection value
// ---------------------------------------------------------------------------

/// Single vs multiple selection
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SelectMode {
    #[default]
    Single,
    Multiple,
}

/// The controlled selection value
///
/// Single mode holds at most one option; multiple mode an ordered,
/// duplicate-free sequence (insertion order is selection order).
#[derive(Clone, Debug, Default, PartialEq)]
pub enum SelectValue {
    #[default]
    Empty,
    Single(SelectOption),
    Multiple(Vec<SelectOption>),
}

impl SelectValue {
    pub fn is_empty(&self) -> bool {
        match self {
            SelectValue::Empty => true,
            SelectValue::Single(_) => false,
            SelectValue::Multiple(options) => options.is_empty(),
        }
    }

    /// Whether a value is selected
    pub fn contains(&self, value: &OptionScalar) -> bool {
        match self {
            SelectValue::Empty => false,
            SelectValue::Single(option) => option.value() == value,
            SelectValue::Multiple(options) => options.iter().any(|o| o.value() == value),
        }
    }

    /// The selected options in order
    pub fn options(&self) -> &[SelectOption] {
        match self {
            SelectValue::Empty => &[],
            SelectValue::Single(option) => std::slice::from_ref(option),
            SelectValue::Multiple(options) => options.as_slice(),
        }
    }
}

// ---------------------------------------------------------------------------
// Effects
// ---------------------------------------------------------------------------

/// Effects an event produced, in order
///
/// The widget maps these onto the consumer callbacks (`on_change`,
/// `on_change_input`, `on_clear`, `on_blur`) and its own focus plumbing.
#[derive(Clone, Debug, PartialEq)]
pub enum SelectEmit {
    /// The selection changed; carries the fully-updated value
    Change(SelectValue),
    /// The filter text changed; carries the raw typed text
    InputChange(String),
    /// The explicit clear control fired
    Clear,
    /// Focus left the component
    Blur,
    /// Logical focus should return to the trigger
    FocusTrigger,
    /// Logical focus should move to the remove control of the chip at
    /// this position
    FocusChip(usize),
}

/// Effect list for one event
pub type Emits = SmallVec<[SelectEmit; 2]>;

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// The combobox state machine
#[derive(Clone, Debug)]
pub struct SelectEngine {
    options: Vec<SelectOption>,
    /// Indices into `options` matching the current query
    filtered: Vec<usize>,
    mode: SelectMode,
    value: SelectValue,
    query: String,
    open: bool,
    /// Roving cursor into `filtered`; `None` = no active row
    active: Option<usize>,
    auto_complete: bool,
    auto_position: bool,
    disabled: bool,
    read_only: bool,
}

impl Default for SelectEngine {
    fn default() -> Self {
        Self::new(SelectMode::default())
    }
}

impl SelectEngine {
    pub fn new(mode: SelectMode) -> Self {
        Self {
            options: Vec::new(),
            filtered: Vec::new(),
            mode,
            value: SelectValue::Empty,
            query: String::new(),
            open: false,
            active: None,
            auto_complete: false,
            auto_position: false,
            disabled: false,
            read_only: false,
        }
    }

    pub fn with_autocomplete(mut self, enabled: bool) -> Self {
        self.auto_complete = enabled;
        self
    }

    pub fn with_auto_position(mut self, enabled: bool) -> Self {
        self.auto_position = enabled;
        self
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    /// Switch selection mode (prop change); the mirrored value is
    /// re-synced right after, so no coercion happens here
    pub fn set_mode(&mut self, mode: SelectMode) {
        self.mode = mode;
    }

    pub fn set_autocomplete(&mut self, enabled: bool) {
        self.auto_complete = enabled;
    }

    pub fn set_auto_position(&mut self, enabled: bool) {
        self.auto_position = enabled;
    }

    pub fn auto_complete(&self) -> bool {
        self.auto_complete
    }

    pub fn auto_position(&self) -> bool {
        self.auto_position
    }

    // -- controlled props in --------------------------------------------

    /// Replace the options list (prop change), re-deriving the view
    pub fn sync_options(&mut self, options: impl IntoIterator<Item = SelectOption>) {
        self.options = options.into_iter().collect();
        self.refilter();
    }

    /// Mirror the externally-owned value (prop change)
    ///
    /// Idempotent: display label and view re-derive from the new value
    /// with no user interaction, which is how asynchronously arriving
    /// values take effect.
    pub fn sync_value(&mut self, value: SelectValue) {
        self.value = value;
    }

    // -- queries ---------------------------------------------------------

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn mode(&self) -> SelectMode {
        self.mode
    }

    pub fn value(&self) -> &SelectValue {
        &self.value
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    /// The visible (filtered) options in order
    pub fn visible_options(&self) -> impl Iterator<Item = &SelectOption> {
        self.filtered.iter().map(|&i| &self.options[i])
    }

    pub fn visible_len(&self) -> usize {
        self.filtered.len()
    }

    /// Whether the open listbox has nothing to show (not-found row)
    pub fn is_view_empty(&self) -> bool {
        self.filtered.is_empty()
    }

    /// The text the trigger displays
    ///
    /// Single mode: the selected option's label, preferring the options
    /// list's label for the same value (the controlled value may arrive as
    /// a bare primitive while the list carries display labels). Multiple
    /// and empty values display no trigger text (chips and placeholder own
    /// that space).
    pub fn display_label(&self) -> Option<&str> {
        match &self.value {
            SelectValue::Single(selected) => {
                let from_options = self
                    .options
                    .iter()
                    .find(|o| o.value() == selected.value())
                    .map(|o| o.label());
                Some(from_options.unwrap_or_else(|| selected.label()))
            }
            _ => None,
        }
    }

    /// Dropdown side for the given geometry
    ///
    /// Measured fresh per open; with auto-positioning off the dropdown
    /// always opens below.
    pub fn placement(
        &self,
        trigger: Rect,
        listbox_height: f32,
        viewport_height: f32,
    ) -> Placement {
        if self.auto_position {
            resolve_placement(trigger, listbox_height, viewport_height)
        } else {
            Placement::Below
        }
    }

    // -- events ----------------------------------------------------------

    /// Pointer press on the trigger: toggle the listbox
    pub fn trigger_pressed(&mut self) -> Emits {
        if self.interaction_locked() {
            return Emits::new();
        }
        if self.open {
            self.close();
        } else {
            self.open_listbox();
        }
        Emits::new()
    }

    /// Key press while the trigger/input has focus
    pub fn key_down(&mut self, key: Key) -> Emits {
        if self.interaction_locked() {
            return Emits::new();
        }
        if !self.open {
            return match key {
                Key::ArrowDown | Key::ArrowUp | Key::Enter | Key::Space => {
                    self.open_listbox();
                    Emits::new()
                }
                _ => Emits::new(),
            };
        }
        match key {
            Key::ArrowDown => {
                self.move_active(1);
                Emits::new()
            }
            Key::ArrowUp => {
                self.move_active(-1);
                Emits::new()
            }
            Key::Home => {
                if !self.filtered.is_empty() {
                    self.active = Some(0);
                }
                Emits::new()
            }
            Key::End => {
                if !self.filtered.is_empty() {
                    self.active = Some(self.filtered.len() - 1);
                }
                Emits::new()
            }
            Key::Enter | Key::Space => match self.active {
                Some(index) => self.commit(index),
                None => Emits::new(),
            },
            Key::Escape => {
                self.close();
                let mut emits = Emits::new();
                emits.push(SelectEmit::FocusTrigger);
                emits
            }
            // Tab moves neither the index nor the open state
            _ => Emits::new(),
        }
    }

    /// Filter text changed (autocomplete mode)
    pub fn input_changed(&mut self, text: &str) -> Emits {
        if self.interaction_locked() || !self.auto_complete {
            return Emits::new();
        }
        self.query = text.to_string();
        self.refilter();
        if !self.open {
            self.open_listbox();
        }
        let mut emits = Emits::new();
        emits.push(SelectEmit::InputChange(self.query.clone()));
        emits
    }

    /// Pointer press on a visible option row
    pub fn option_pressed(&mut self, visible_index: usize) -> Emits {
        if self.interaction_locked() || !self.open {
            return Emits::new();
        }
        if visible_index >= self.filtered.len() {
            tracing::warn!(visible_index, "option press out of view range, skipping");
            return Emits::new();
        }
        self.commit(visible_index)
    }

    /// Remove control of a selected chip activated (click or
    /// Delete/Backspace)
    pub fn chip_removed(&mut self, value: &OptionScalar) -> Emits {
        if self.interaction_locked() {
            return Emits::new();
        }
        let SelectValue::Multiple(options) = &self.value else {
            return Emits::new();
        };
        let Some(position) = options.iter().position(|o| o.value() == value) else {
            return Emits::new();
        };
        let mut next = options.clone();
        next.remove(position);
        let focus = if next.is_empty() {
            SelectEmit::FocusTrigger
        } else {
            SelectEmit::FocusChip(position.min(next.len() - 1))
        };
        self.value = SelectValue::Multiple(next);
        let mut emits = Emits::new();
        emits.push(SelectEmit::Change(self.value.clone()));
        emits.push(focus);
        emits
    }

    /// Explicit clear control activated
    ///
    /// Fires the clear effect exactly once; the consumer owns resetting
    /// the value prop.
    pub fn clear_pressed(&mut self) -> Emits {
        if self.interaction_locked() {
            return Emits::new();
        }
        self.value = match self.mode {
            SelectMode::Single => SelectValue::Empty,
            SelectMode::Multiple => SelectValue::Multiple(Vec::new()),
        };
        self.query.clear();
        self.refilter();
        let mut emits = Emits::new();
        emits.push(SelectEmit::Clear);
        emits
    }

    /// Focus left the trigger subtree
    ///
    /// `moved_inside` is true when focus hopped to a descendant (the
    /// listbox, a chip), which is not a blur.
    pub fn focus_left(&mut self, moved_inside: bool) -> Emits {
        let mut emits = Emits::new();
        if moved_inside {
            return emits;
        }
        if self.open {
            self.close();
        }
        emits.push(SelectEmit::Blur);
        emits
    }

    /// Pointer press outside the component while open
    pub fn outside_pressed(&mut self) -> Emits {
        if self.open {
            self.close();
        }
        Emits::new()
    }

    // -- internals -------------------------------------------------------

    fn interaction_locked(&self) -> bool {
        self.disabled || self.read_only
    }

    fn refilter(&mut self) {
        self.filtered = self
            .options
            .iter()
            .enumerate()
            .filter(|(_, option)| option.matches(&self.query))
            .map(|(i, _)| i)
            .collect();
        match self.active {
            Some(index) if index >= self.filtered.len() => self.active = None,
            _ => {}
        }
        if self.filtered.is_empty() {
            self.active = None;
        }
    }

    /// Entering OPEN: compute the active row and leave measurement to the
    /// widget's position pass
    fn open_listbox(&mut self) {
        self.open = true;
        self.refilter();
        self.active = self.initial_active();
    }

    /// Preserved if still valid, else the selected row, else the first
    fn initial_active(&self) -> Option<usize> {
        if self.filtered.is_empty() {
            return None;
        }
        if let Some(index) = self.active {
            if index < self.filtered.len() {
                return Some(index);
            }
        }
        if let SelectValue::Single(selected) = &self.value {
            if let Some(position) = self
                .filtered
                .iter()
                .position(|&i| self.options[i].value() == selected.value())
            {
                return Some(position);
            }
        }
        Some(0)
    }

    fn close(&mut self) {
        self.open = false;
        self.active = None;
        self.query.clear();
        self.refilter();
    }

    /// Roving index step with wrap at both ends
    fn move_active(&mut self, delta: i64) {
        let len = self.filtered.len();
        if len == 0 {
            self.active = None;
            return;
        }
        self.active = Some(match self.active {
            None => {
                if delta > 0 {
                    0
                } else {
                    len - 1
                }
            }
            Some(index) => {
                (((index as i64) + delta).rem_euclid(len as i64)) as usize
            }
        });
    }

    /// Apply the selection reducer for the option at a visible index
    fn commit(&mut self, visible_index: usize) -> Emits {
        let option = self.options[self.filtered[visible_index]].clone();
        let mut emits = Emits::new();
        match self.mode {
            SelectMode::Single => {
                self.value = SelectValue::Single(option);
                self.close();
                emits.push(SelectEmit::Change(self.value.clone()));
            }
            SelectMode::Multiple => {
                let mut options = match &self.value {
                    SelectValue::Multiple(options) => options.clone(),
                    SelectValue::Single(selected) => vec![selected.clone()],
                    SelectValue::Empty => Vec::new(),
                };
                match options.iter().position(|o| o.value() == option.value()) {
                    // Toggle off
                    Some(position) => {
                        options.remove(position);
                    }
                    // Append in selection order
                    None => options.push(option),
                }
                self.value = SelectValue::Multiple(options);
                emits.push(SelectEmit::Change(self.value.clone()));
            }
        }
        emits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine_with(mode: SelectMode, options: &[&str]) -> SelectEngine {
        let mut engine = SelectEngine::new(mode);
        engine.sync_options(options.iter().map(|&o| SelectOption::from(o)));
        engine
    }

    fn changes(emits: &Emits) -> Vec<&SelectValue> {
        emits
            .iter()
            .filter_map(|e| match e {
                SelectEmit::Change(v) => Some(v),
                _ => None,
            })
            .collect()
    }

    // -- option model ----------------------------------------------------

    #[test]
    fn test_primitive_normalization() {
        let opt = SelectOption::primitive("banana");
        assert_eq!(opt.label(), "banana");
        assert_eq!(opt.entry(), OptionEntry::Primitive(OptionScalar::Str("banana".into())));

        let opt = SelectOption::primitive(7i64);
        assert_eq!(opt.label(), "7");
    }

    #[test]
    fn test_labeled_normalization_keeps_shape() {
        let opt = SelectOption::labeled("banana", "Banana");
        assert_eq!(opt.label(), "Banana");
        assert_eq!(
            opt.entry(),
            OptionEntry::Labeled {
                value: OptionScalar::Str("banana".into()),
                label: "Banana".into()
            }
        );
    }

    #[test]
    fn test_empty_label_degrades_to_value() {
        let opt = SelectOption::labeled("banana", "");
        assert_eq!(opt.label(), "banana");
    }

    #[test]
    fn test_matches_is_case_insensitive_substring() {
        let opt = SelectOption::labeled("us", "United States");
        assert!(opt.matches(""));
        assert!(opt.matches("united"));
        assert!(opt.matches("STATES"));
        assert!(!opt.matches("canada"));
    }

    // -- open/close machine ---------------------------------------------

    #[test]
    fn test_trigger_toggles_open() {
        let mut engine = engine_with(SelectMode::Single, &["a", "b"]);
        engine.trigger_pressed();
        assert!(engine.is_open());
        engine.trigger_pressed();
        assert!(!engine.is_open());
    }

    #[test]
    fn test_disabled_and_read_only_never_open() {
        let mut engine = engine_with(SelectMode::Single, &["a"]);
        engine.set_disabled(true);
        engine.trigger_pressed();
        engine.key_down(Key::ArrowDown);
        assert!(!engine.is_open());

        let mut engine = engine_with(SelectMode::Single, &["a"]);
        engine.set_read_only(true);
        engine.trigger_pressed();
        engine.key_down(Key::Enter);
        assert!(!engine.is_open());
    }

    #[test]
    fn test_keys_open_from_closed() {
        for key in [Key::ArrowDown, Key::ArrowUp, Key::Enter, Key::Space] {
            let mut engine = engine_with(SelectMode::Single, &["a", "b"]);
            engine.key_down(key);
            assert!(engine.is_open(), "{key:?} should open");
        }
    }

    #[test]
    fn test_escape_closes_and_returns_focus_to_trigger() {
        let mut engine = engine_with(SelectMode::Single, &["a", "b"]);
        engine.trigger_pressed();
        let emits = engine.key_down(Key::Escape);
        assert!(!engine.is_open());
        assert_eq!(engine.active_index(), None);
        assert_eq!(emits.as_slice(), &[SelectEmit::FocusTrigger]);
    }

    #[test]
    fn test_focus_leaving_closes_and_blurs() {
        let mut engine = engine_with(SelectMode::Single, &["a"]);
        engine.trigger_pressed();
        // Focus hopping inside the component is not a blur.
        assert!(engine.focus_left(true).is_empty());
        assert!(engine.is_open());

        let emits = engine.focus_left(false);
        assert!(!engine.is_open());
        assert_eq!(emits.as_slice(), &[SelectEmit::Blur]);
    }

    #[test]
    fn test_outside_press_closes_silently() {
        let mut engine = engine_with(SelectMode::Single, &["a"]);
        engine.trigger_pressed();
        let emits = engine.outside_pressed();
        assert!(!engine.is_open());
        assert!(emits.is_empty());
    }

    #[test]
    fn test_tab_changes_nothing() {
        let mut engine = engine_with(SelectMode::Single, &["a", "b"]);
        engine.trigger_pressed();
        engine.key_down(Key::ArrowDown);
        let active = engine.active_index();
        engine.key_down(Key::Tab);
        assert!(engine.is_open());
        assert_eq!(engine.active_index(), active);
    }

    // -- active-option tracker ------------------------------------------

    #[test]
    fn test_arrow_down_wraps_exactly_once_over_n() {
        let options = ["a", "b", "c", "d", "e"];
        let mut engine = engine_with(SelectMode::Single, &options);
        engine.trigger_pressed();
        engine.active = None;
        // N presses from unset land back on 0: unset -> 0 -> 1 ... -> N-1 -> 0
        for _ in 0..=options.len() {
            engine.key_down(Key::ArrowDown);
        }
        assert_eq!(engine.active_index(), Some(0));
    }

    #[test]
    fn test_arrow_up_from_zero_wraps_to_last() {
        let mut engine = engine_with(SelectMode::Single, &["a", "b", "c"]);
        engine.trigger_pressed();
        engine.key_down(Key::Home);
        assert_eq!(engine.active_index(), Some(0));
        engine.key_down(Key::ArrowUp);
        assert_eq!(engine.active_index(), Some(2));
    }

    #[test]
    fn test_arrow_up_from_unset_starts_at_end() {
        let mut engine = engine_with(SelectMode::Single, &["a", "b", "c"]);
        engine.trigger_pressed();
        engine.active = None;
        engine.key_down(Key::ArrowUp);
        assert_eq!(engine.active_index(), Some(2));
    }

    #[test]
    fn test_home_and_end() {
        let mut engine = engine_with(SelectMode::Single, &["a", "b", "c", "d"]);
        engine.trigger_pressed();
        engine.key_down(Key::End);
        assert_eq!(engine.active_index(), Some(3));
        engine.key_down(Key::Home);
        assert_eq!(engine.active_index(), Some(0));
    }

    #[test]
    fn test_active_prefers_selected_row_on_open() {
        let mut engine = engine_with(SelectMode::Single, &["a", "b", "c"]);
        engine.sync_value(SelectValue::Single(SelectOption::from("b")));
        engine.trigger_pressed();
        assert_eq!(engine.active_index(), Some(1));
    }

    // -- selection reducer ----------------------------------------------

    #[test]
    fn test_single_commit_sets_label_and_emits_labeled_shape() {
        let mut engine = SelectEngine::new(SelectMode::Single);
        engine.sync_options([SelectOption::labeled("banana", "Banana")]);
        engine.trigger_pressed();
        let emits = engine.option_pressed(0);

        assert_eq!(engine.display_label(), Some("Banana"));
        assert!(!engine.is_open(), "single-mode commit closes the listbox");
        let [SelectEmit::Change(SelectValue::Single(committed))] = emits.as_slice() else {
            panic!("expected a single change emit, got {emits:?}");
        };
        assert_eq!(
            committed.entry(),
            OptionEntry::Labeled {
                value: OptionScalar::Str("banana".into()),
                label: "Banana".into()
            }
        );
    }

    #[test]
    fn test_single_commit_of_primitive_emits_primitive_shape() {
        let mut engine = engine_with(SelectMode::Single, &["banana"]);
        engine.trigger_pressed();
        let emits = engine.option_pressed(0);
        let [SelectEmit::Change(SelectValue::Single(committed))] = emits.as_slice() else {
            panic!("expected a single change emit, got {emits:?}");
        };
        assert_eq!(
            committed.entry(),
            OptionEntry::Primitive(OptionScalar::Str("banana".into()))
        );
    }

    #[test]
    fn test_multiple_commit_keeps_listbox_open_and_appends_in_order() {
        let mut engine = engine_with(SelectMode::Multiple, &["a", "b", "c"]);
        engine.trigger_pressed();
        engine.option_pressed(2);
        engine.option_pressed(0);
        assert!(engine.is_open());
        let SelectValue::Multiple(selected) = engine.value() else {
            panic!("expected multiple value");
        };
        let labels: Vec<&str> = selected.iter().map(|o| o.label()).collect();
        assert_eq!(labels, ["c", "a"]);
    }

    #[test]
    fn test_toggle_twice_restores_contents_and_order() {
        let mut engine = engine_with(SelectMode::Multiple, &["a", "b", "c"]);
        engine.trigger_pressed();
        engine.option_pressed(0);
        engine.option_pressed(2);
        let before = engine.value().clone();

        engine.option_pressed(1);
        engine.option_pressed(1);
        assert_eq!(engine.value(), &before);
    }

    #[test]
    fn test_every_commit_emits_updated_value() {
        let mut engine = engine_with(SelectMode::Multiple, &["a", "b"]);
        engine.trigger_pressed();
        let emits = engine.option_pressed(1);
        let committed = changes(&emits);
        assert_eq!(committed.len(), 1);
        assert!(committed[0].contains(&OptionScalar::Str("b".into())));
    }

    #[test]
    fn test_chip_removal_moves_focus_to_next_chip() {
        let mut engine = engine_with(SelectMode::Multiple, &["a", "b", "c"]);
        engine.trigger_pressed();
        engine.option_pressed(0);
        engine.option_pressed(1);
        engine.option_pressed(2);

        let emits = engine.chip_removed(&OptionScalar::Str("b".into()));
        assert_eq!(emits.len(), 2);
        assert!(matches!(emits[0], SelectEmit::Change(_)));
        // "b" was at position 1; the former "c" now sits there.
        assert_eq!(emits[1], SelectEmit::FocusChip(1));
    }

    #[test]
    fn test_removing_last_chip_focuses_trigger() {
        let mut engine = engine_with(SelectMode::Multiple, &["a"]);
        engine.trigger_pressed();
        engine.option_pressed(0);
        let emits = engine.chip_removed(&OptionScalar::Str("a".into()));
        assert_eq!(emits[1], SelectEmit::FocusTrigger);
        assert!(engine.value().is_empty());
    }

    #[test]
    fn test_clear_emits_clear_exactly_once() {
        let mut engine = engine_with(SelectMode::Multiple, &["a", "b"]);
        engine.trigger_pressed();
        engine.option_pressed(0);
        let emits = engine.clear_pressed();
        assert_eq!(emits.as_slice(), &[SelectEmit::Clear]);
        assert_eq!(engine.value(), &SelectValue::Multiple(Vec::new()));
    }

    // -- filter stage ----------------------------------------------------

    #[test]
    fn test_filter_narrows_view_and_emits_raw_text() {
        let mut engine = SelectEngine::new(SelectMode::Single).with_autocomplete(true);
        engine.sync_options(["banana", "sushi"].map(SelectOption::from));
        let emits = engine.input_changed("BAN");
        assert!(engine.is_open(), "typing opens the listbox");
        assert_eq!(emits.as_slice(), &[SelectEmit::InputChange("BAN".into())]);
        let visible: Vec<&str> = engine.visible_options().map(|o| o.label()).collect();
        assert_eq!(visible, ["banana"]);
    }

    #[test]
    fn test_no_match_yields_empty_view() {
        let mut engine = SelectEngine::new(SelectMode::Single).with_autocomplete(true);
        engine.sync_options(["banana", "sushi"].map(SelectOption::from));
        engine.input_changed("xyz");
        assert!(engine.is_view_empty());
        assert_eq!(engine.visible_len(), 0);
        assert_eq!(engine.active_index(), None);
    }

    #[test]
    fn test_filter_disabled_without_autocomplete() {
        let mut engine = engine_with(SelectMode::Single, &["banana", "sushi"]);
        let emits = engine.input_changed("ban");
        assert!(emits.is_empty());
        assert_eq!(engine.visible_len(), 2);
    }

    #[test]
    fn test_async_value_arrival_rederives_label() {
        let mut engine = engine_with(SelectMode::Single, &["banana"]);
        assert_eq!(engine.display_label(), None);
        // Value arrives later (e.g. after a fetch), as a bare primitive.
        engine.sync_value(SelectValue::Single(SelectOption::from("banana")));
        assert_eq!(engine.display_label(), Some("banana"));

        // With a labeled options list, the list's label wins.
        engine.sync_options([SelectOption::labeled("banana", "Banana")]);
        assert_eq!(engine.display_label(), Some("Banana"));
    }

    #[test]
    fn test_close_resets_query_and_view() {
        let mut engine = SelectEngine::new(SelectMode::Single).with_autocomplete(true);
        engine.sync_options(["banana", "sushi"].map(SelectOption::from));
        engine.input_changed("ban");
        assert_eq!(engine.visible_len(), 1);
        engine.key_down(Key::Escape);
        assert_eq!(engine.query(), "");
        assert_eq!(engine.visible_len(), 2);
    }

    // -- placement -------------------------------------------------------

    #[test]
    fn test_auto_position_flips_above_near_bottom() {
        let engine = SelectEngine::new(SelectMode::Single).with_auto_position(true);
        let trigger = Rect::new(0.0, 520.0, 200.0, 40.0);
        assert_eq!(engine.placement(trigger, 300.0, 600.0), Placement::Above);
        let trigger = Rect::new(0.0, 40.0, 200.0, 40.0);
        assert_eq!(engine.placement(trigger, 300.0, 600.0), Placement::Below);
    }

    #[test]
    fn test_without_auto_position_always_below() {
        let engine = SelectEngine::new(SelectMode::Single);
        let trigger = Rect::new(0.0, 520.0, 200.0, 40.0);
        assert_eq!(engine.placement(trigger, 300.0, 600.0), Placement::Below);
    }
}
