//! Select component - combobox with single and multiple selection
//!
//! A trigger row (display text or chips) plus a dropdown listbox shown
//! through the overlay manager. All interaction logic lives in the
//! render-free [`engine`]; this module wires engine effects onto consumer
//! callbacks and the overlay lifecycle.
//!
//! The value is controlled: pass it in with [`SelectBuilder::value`] and
//! echo updates back through `on_change`. The component never persists
//! the value itself.
//!
//! # Example
//!
//! ```ignore
//! cn::select()
//!     .placeholder("Choose a fruit...")
//!     .option("banana", "Banana")
//!     .option("sushi", "Sushi")
//!     .value(current.clone())
//!     .on_change(|value| tracing::debug!(?value, "selected"))
//!
//! // Multiple selection with chips and a clear control
//! cn::select()
//!     .multiple(true)
//!     .clearable(true)
//!     .options(["a", "b", "c"])
//!
//! // Autocomplete with repositioning near viewport edges
//! cn::select()
//!     .auto_complete(true)
//!     .auto_position(true)
//! ```

pub mod engine;
mod options_list;
mod selected;

pub use engine::{
    Emits, OptionEntry, OptionScalar, SelectEmit, SelectEngine, SelectMode, SelectOption,
    SelectValue,
};

use std::cell::OnceCell;
use std::sync::{Arc, Mutex};

use weft_core::{ContextState, State};
use weft_theme::{ColorToken, RadiusToken, ThemeState};
use weft_view::overlay::OverlayBuilder;
use weft_view::prelude::*;
use weft_view::stateful::{use_shared_state, ButtonState, Stateful};
use weft_view::tree::{LayoutNodeId, LayoutTree};

use crate::components::icon::{glyphs, to_svg};
use crate::components::input::{text_input_data, SharedTextInputData};

use options_list::{build_dropdown, close_dropdown};
use selected::selected_chips;

/// Shared handle to a persisted engine
pub(crate) type SharedEngine = Arc<Mutex<SelectEngine>>;

/// The consumer-facing callback set
#[derive(Clone, Default)]
pub(crate) struct SelectCallbacks {
    on_change: Option<Arc<dyn Fn(&SelectValue) + Send + Sync>>,
    on_change_input: Option<Arc<dyn Fn(&str) + Send + Sync>>,
    on_clear: Option<Arc<dyn Fn() + Send + Sync>>,
    on_blur: Option<Arc<dyn Fn() + Send + Sync>>,
}

/// Map engine effects onto callbacks and the logical chip focus marker
pub(crate) fn apply_emits(
    emits: Emits,
    callbacks: &SelectCallbacks,
    chip_focus: &State<Option<usize>>,
) {
    for emit in emits {
        match emit {
            SelectEmit::Change(value) => {
                if let Some(ref on_change) = callbacks.on_change {
                    on_change(&value);
                }
            }
            SelectEmit::InputChange(typed) => {
                if let Some(ref on_change_input) = callbacks.on_change_input {
                    on_change_input(&typed);
                }
            }
            SelectEmit::Clear => {
                if let Some(ref on_clear) = callbacks.on_clear {
                    on_clear();
                }
            }
            SelectEmit::Blur => {
                if let Some(ref on_blur) = callbacks.on_blur {
                    on_blur();
                }
            }
            SelectEmit::FocusTrigger => chip_focus.set(None),
            SelectEmit::FocusChip(position) => chip_focus.set(Some(position)),
        }
    }
}

/// Select size variants
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SelectSize {
    /// Height 32, text 13
    Small,
    /// Height 40, text 14
    #[default]
    Medium,
    /// Height 48, text 16
    Large,
}

impl SelectSize {
    fn height(&self) -> f32 {
        match self {
            SelectSize::Small => 32.0,
            SelectSize::Medium => 40.0,
            SelectSize::Large => 48.0,
        }
    }

    fn font_size(&self) -> f32 {
        match self {
            SelectSize::Small => 13.0,
            SelectSize::Medium => 14.0,
            SelectSize::Large => 16.0,
        }
    }

    fn padding(&self) -> f32 {
        match self {
            SelectSize::Small => 8.0,
            SelectSize::Medium => 12.0,
            SelectSize::Large => 16.0,
        }
    }
}

#[derive(Clone)]
struct SelectConfig {
    value: SelectValue,
    options: Vec<SelectOption>,
    multiple: bool,
    auto_complete: bool,
    clearable: bool,
    auto_position: bool,
    read_only: bool,
    disabled: bool,
    not_found_label: String,
    placeholder: Option<String>,
    size: SelectSize,
    width: Option<f32>,
    callbacks: SelectCallbacks,
}

impl Default for SelectConfig {
    fn default() -> Self {
        Self {
            value: SelectValue::Empty,
            options: Vec::new(),
            multiple: false,
            auto_complete: false,
            clearable: false,
            auto_position: false,
            read_only: false,
            disabled: false,
            not_found_label: "No results found".to_string(),
            placeholder: None,
            size: SelectSize::default(),
            width: None,
            callbacks: SelectCallbacks::default(),
        }
    }
}

/// Show the dropdown overlay anchored to the trigger rect
#[allow(clippy::too_many_arguments)]
fn show_dropdown(
    key: &str,
    engine: &SharedEngine,
    callbacks: &SelectCallbacks,
    chip_focus: &State<Option<usize>>,
    handle_state: &State<Option<u64>>,
    search_data: &SharedTextInputData,
    trigger: Rect,
    width: f32,
    font_size: f32,
    padding: f32,
    not_found_label: String,
    placeholder: Option<String>,
    auto_position: bool,
) {
    let content_key = key.to_string();
    let engine_for_content = SharedEngine::clone(engine);
    let callbacks_for_content = callbacks.clone();
    let chip_focus_for_content = chip_focus.clone();
    let handle_state_for_content = handle_state.clone();
    let search_data_for_content = SharedTextInputData::clone(search_data);

    let engine_for_close = SharedEngine::clone(engine);
    let handle_state_for_close = handle_state.clone();
    let search_data_for_close = SharedTextInputData::clone(search_data);

    let handle = OverlayBuilder::dropdown()
        .anchored(trigger, 4.0, auto_position)
        .content(move || {
            build_dropdown(
                content_key.clone(),
                SharedEngine::clone(&engine_for_content),
                callbacks_for_content.clone(),
                chip_focus_for_content.clone(),
                handle_state_for_content.clone(),
                SharedTextInputData::clone(&search_data_for_content),
                width,
                font_size,
                padding,
                not_found_label.clone(),
                placeholder.clone(),
            )
        })
        .on_close(move || {
            // Sync engine state when the manager dismissed us (outside
            // press, shell-level escape)
            engine_for_close.lock().unwrap().outside_pressed();
            handle_state_for_close.set(None);
            search_data_for_close.lock().unwrap().clear();
            weft_core::request_rebuild();
        })
        .show();

    handle_state.set(Some(handle.id()));
}

/// The built select element
pub struct Select {
    inner: Div,
}

impl Select {
    fn from_config(instance_key: &str, config: SelectConfig) -> Self {
        let theme = ThemeState::get();
        let height = config.size.height();
        let font_size = config.size.font_size();
        let padding = config.size.padding();
        let radius = theme.radius(RadiusToken::Default);

        let surface = theme.color(ColorToken::Surface);
        let border = theme.color(ColorToken::Border);
        let border_hover = theme.color(ColorToken::BorderHover);
        let border_focus = theme.color(ColorToken::BorderFocus);
        let text_primary = theme.color(ColorToken::TextPrimary);
        let text_tertiary = theme.color(ColorToken::TextTertiary);

        let mode = if config.multiple {
            SelectMode::Multiple
        } else {
            SelectMode::Single
        };

        let ctx = ContextState::get();

        // The engine persists across rebuilds; props re-sync every build.
        let engine: SharedEngine = ctx
            .use_state_keyed(&format!("{instance_key}_engine"), SharedEngine::default)
            .get();
        {
            let mut engine = engine.lock().unwrap();
            engine.set_mode(mode);
            engine.set_autocomplete(config.auto_complete);
            engine.set_auto_position(config.auto_position);
            engine.set_disabled(config.disabled);
            engine.set_read_only(config.read_only);
            engine.sync_options(config.options.clone());
            engine.sync_value(config.value.clone());
        }

        let handle_state: State<Option<u64>> =
            ctx.use_state_keyed(&format!("{instance_key}_overlay"), || None);
        let chip_focus: State<Option<usize>> =
            ctx.use_state_keyed(&format!("{instance_key}_chip_focus"), || None);
        let search_data: SharedTextInputData = ctx
            .use_state_keyed(&format!("{instance_key}_search"), text_input_data)
            .get();

        let trigger_state = use_shared_state::<ButtonState>(&format!("{instance_key}_trigger"));
        let callbacks = config.callbacks.clone();
        let disabled = config.disabled;
        let multiple = config.multiple;
        let width = config.width.unwrap_or(220.0);

        // -- trigger visuals --------------------------------------------

        let engine_for_display = SharedEngine::clone(&engine);
        let callbacks_for_chips = callbacks.clone();
        let chip_focus_for_chips = chip_focus.clone();
        let placeholder_for_display = config.placeholder.clone();
        let key_for_display = instance_key.to_string();

        // -- trigger events ---------------------------------------------

        let engine_for_click = SharedEngine::clone(&engine);
        let callbacks_for_click = callbacks.clone();
        let chip_focus_for_click = chip_focus.clone();
        let handle_state_for_click = handle_state.clone();
        let search_data_for_click = SharedTextInputData::clone(&search_data);
        let key_for_click = instance_key.to_string();
        let not_found_for_click = config.not_found_label.clone();
        let placeholder_for_click = config.placeholder.clone();
        let auto_position = config.auto_position;

        let engine_for_keys = SharedEngine::clone(&engine);
        let callbacks_for_keys = callbacks.clone();
        let chip_focus_for_keys = chip_focus.clone();
        let handle_state_for_keys = handle_state.clone();
        let search_data_for_keys = SharedTextInputData::clone(&search_data);
        let key_for_keys = instance_key.to_string();
        let not_found_for_keys = config.not_found_label.clone();
        let placeholder_for_keys = config.placeholder.clone();

        let engine_for_blur = SharedEngine::clone(&engine);
        let callbacks_for_blur = callbacks.clone();
        let chip_focus_for_blur = chip_focus.clone();
        let handle_state_for_blur = handle_state.clone();
        let search_data_for_blur = SharedTextInputData::clone(&search_data);

        let trigger = Stateful::with_shared_state(trigger_state)
            .w_full()
            .h(height)
            .cursor(if disabled {
                CursorStyle::NotAllowed
            } else {
                CursorStyle::Pointer
            })
            .focusable()
            .id(format!("{instance_key}_trigger"))
            .on_state(move |state| {
                let (is_open, display, query, value_empty) = {
                    let engine = engine_for_display.lock().unwrap();
                    (
                        engine.is_open(),
                        engine.display_label().map(str::to_string),
                        engine.query().to_string(),
                        engine.value().is_empty(),
                    )
                };

                let border_color = if is_open {
                    border_focus
                } else if state == ButtonState::Hovered && !disabled {
                    border_hover
                } else {
                    border
                };

                let mut content_area = div()
                    .flex_1()
                    .flex_row()
                    .items_center()
                    .gap(6.0)
                    .overflow_clip();

                if multiple && !value_empty {
                    content_area = content_area.child(selected_chips(
                        &key_for_display,
                        &engine_for_display,
                        &callbacks_for_chips,
                        &chip_focus_for_chips,
                        disabled,
                    ));
                } else {
                    let (shown, color) = match display {
                        Some(label) => (label, text_primary),
                        None if is_open && !query.is_empty() => (query, text_primary),
                        None => (
                            placeholder_for_display
                                .clone()
                                .unwrap_or_else(|| "Select...".to_string()),
                            text_tertiary,
                        ),
                    };
                    content_area =
                        content_area.child(text(shown).size(font_size).color(color).no_wrap());
                }

                let chevron = if is_open {
                    glyphs::CHEVRON_UP
                } else {
                    glyphs::CHEVRON_DOWN
                };

                let mut row = div()
                    .flex_row()
                    .items_center()
                    .w_full()
                    .h(height)
                    .px(padding)
                    .gap(6.0)
                    .bg(surface)
                    .border(1.0, border_color)
                    .rounded(radius)
                    .child(content_area)
                    .child(
                        svg(to_svg(chevron))
                            .size(16.0, 16.0)
                            .tint(text_tertiary),
                    );
                if disabled {
                    row = row.opacity(0.5);
                }
                row
            })
            .on_click(move |ctx| {
                let (emits, opened) = {
                    let mut engine = engine_for_click.lock().unwrap();
                    let emits = engine.trigger_pressed();
                    (emits, engine.is_open())
                };
                apply_emits(emits, &callbacks_for_click, &chip_focus_for_click);
                if opened {
                    show_dropdown(
                        &key_for_click,
                        &engine_for_click,
                        &callbacks_for_click,
                        &chip_focus_for_click,
                        &handle_state_for_click,
                        &search_data_for_click,
                        ctx.bounds(),
                        width,
                        font_size,
                        padding,
                        not_found_for_click.clone(),
                        placeholder_for_click.clone(),
                        auto_position,
                    );
                } else {
                    close_dropdown(&handle_state_for_click);
                    search_data_for_click.lock().unwrap().clear();
                }
                weft_core::request_rebuild();
            })
            .on_key_down(move |ctx| {
                let Some(key) = ctx.key else {
                    return;
                };
                let (emits, was_open, now_open) = {
                    let mut engine = engine_for_keys.lock().unwrap();
                    let was_open = engine.is_open();
                    let emits = engine.key_down(key);
                    (emits, was_open, engine.is_open())
                };
                apply_emits(emits, &callbacks_for_keys, &chip_focus_for_keys);
                if !was_open && now_open {
                    show_dropdown(
                        &key_for_keys,
                        &engine_for_keys,
                        &callbacks_for_keys,
                        &chip_focus_for_keys,
                        &handle_state_for_keys,
                        &search_data_for_keys,
                        ctx.bounds(),
                        width,
                        font_size,
                        padding,
                        not_found_for_keys.clone(),
                        placeholder_for_keys.clone(),
                        auto_position,
                    );
                } else if was_open && !now_open {
                    close_dropdown(&handle_state_for_keys);
                    search_data_for_keys.lock().unwrap().clear();
                }
                weft_core::request_rebuild();
            })
            .on_focus_out(move |ctx| {
                let emits = engine_for_blur
                    .lock()
                    .unwrap()
                    .focus_left(ctx.focus_moved_inside);
                apply_emits(emits, &callbacks_for_blur, &chip_focus_for_blur);
                if !ctx.focus_moved_inside {
                    close_dropdown(&handle_state_for_blur);
                    search_data_for_blur.lock().unwrap().clear();
                }
                weft_core::request_rebuild();
            });

        // -- assembly ----------------------------------------------------

        let mut outer = div().flex_row().items_center().gap(4.0).w(width).child(trigger);

        let show_clear = config.clearable && !config.value.is_empty() && !disabled;
        if show_clear {
            let engine_for_clear = SharedEngine::clone(&engine);
            let callbacks_for_clear = callbacks.clone();
            let chip_focus_for_clear = chip_focus.clone();
            let engine_for_clear_keys = SharedEngine::clone(&engine);
            let callbacks_for_clear_keys = callbacks.clone();
            let chip_focus_for_clear_keys = chip_focus.clone();
            let clear_state =
                use_shared_state::<ButtonState>(&format!("{instance_key}_clear"));
            let clear_hover_bg = text_primary.with_alpha(0.1);

            let clear_control = Stateful::with_shared_state(clear_state)
                .cursor_pointer()
                .focusable()
                .id(format!("{instance_key}_clear"))
                .on_state(move |state| {
                    let bg = if state == ButtonState::Hovered {
                        clear_hover_bg
                    } else {
                        weft_core::Color::TRANSPARENT
                    };
                    div()
                        .items_center()
                        .justify_center()
                        .w(20.0)
                        .h(20.0)
                        .rounded(radius)
                        .bg(bg)
                        .child(svg(to_svg(glyphs::X)).size(12.0, 12.0).tint(text_tertiary))
                })
                .on_click(move |_ctx| {
                    let emits = engine_for_clear.lock().unwrap().clear_pressed();
                    apply_emits(emits, &callbacks_for_clear, &chip_focus_for_clear);
                    weft_core::request_rebuild();
                })
                .on_key_down(move |ctx| {
                    if matches!(ctx.key, Some(weft_core::Key::Enter | weft_core::Key::Space)) {
                        let emits = engine_for_clear_keys.lock().unwrap().clear_pressed();
                        apply_emits(emits, &callbacks_for_clear_keys, &chip_focus_for_clear_keys);
                        weft_core::request_rebuild();
                    }
                });

            outer = outer.child(clear_control);
        }

        Self { inner: outer }
    }
}

impl ElementBuilder for Select {
    fn build(&self, tree: &mut LayoutTree) -> LayoutNodeId {
        self.inner.build(tree)
    }
}

/// Builder for Select components
pub struct SelectBuilder {
    key: InstanceKey,
    config: SelectConfig,
    built: OnceCell<Select>,
}

/// Create a select
///
/// Uses `#[track_caller]` with a per-instance UUID so keyed state stays
/// unique in loops and closures.
#[track_caller]
pub fn select() -> SelectBuilder {
    SelectBuilder {
        key: InstanceKey::new("select"),
        config: SelectConfig::default(),
        built: OnceCell::new(),
    }
}

impl SelectBuilder {
    /// Create with an explicit key (stable across rebuilds and testable)
    pub fn with_key(key: impl Into<String>) -> Self {
        Self {
            key: InstanceKey::explicit(key),
            config: SelectConfig::default(),
            built: OnceCell::new(),
        }
    }

    fn get_or_build(&self) -> &Select {
        self.built
            .get_or_init(|| Select::from_config(self.key.get(), self.config.clone()))
    }

    /// The controlled selection value
    pub fn value(mut self, value: SelectValue) -> Self {
        self.config.value = value;
        self
    }

    /// Add one labeled option
    pub fn option(
        mut self,
        value: impl Into<OptionScalar>,
        label: impl Into<String>,
    ) -> Self {
        self.config.options.push(SelectOption::labeled(value, label));
        self
    }

    /// Add options from any mix of primitives and pairs
    pub fn options<I, O>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = O>,
        O: Into<SelectOption>,
    {
        self.config.options.extend(options.into_iter().map(Into::into));
        self
    }

    pub fn multiple(mut self, multiple: bool) -> Self {
        self.config.multiple = multiple;
        self
    }

    pub fn auto_complete(mut self, auto_complete: bool) -> Self {
        self.config.auto_complete = auto_complete;
        self
    }

    pub fn clearable(mut self, clearable: bool) -> Self {
        self.config.clearable = clearable;
        self
    }

    pub fn auto_position(mut self, auto_position: bool) -> Self {
        self.config.auto_position = auto_position;
        self
    }

    pub fn read_only(mut self, read_only: bool) -> Self {
        self.config.read_only = read_only;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.config.disabled = disabled;
        self
    }

    /// Text of the empty-view row
    pub fn not_found_label(mut self, label: impl Into<String>) -> Self {
        self.config.not_found_label = label.into();
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.config.placeholder = Some(placeholder.into());
        self
    }

    pub fn size(mut self, size: SelectSize) -> Self {
        self.config.size = size;
        self
    }

    pub fn w(mut self, width: f32) -> Self {
        self.config.width = Some(width);
        self
    }

    pub fn on_change<F>(mut self, on_change: F) -> Self
    where
        F: Fn(&SelectValue) + Send + Sync + 'static,
    {
        self.config.callbacks.on_change = Some(Arc::new(on_change));
        self
    }

    pub fn on_change_input<F>(mut self, on_change_input: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.config.callbacks.on_change_input = Some(Arc::new(on_change_input));
        self
    }

    pub fn on_clear<F>(mut self, on_clear: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.config.callbacks.on_clear = Some(Arc::new(on_clear));
        self
    }

    pub fn on_blur<F>(mut self, on_blur: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.config.callbacks.on_blur = Some(Arc::new(on_blur));
        self
    }
}

impl ElementBuilder for SelectBuilder {
    fn build(&self, tree: &mut LayoutTree) -> LayoutNodeId {
        self.get_or_build().build(tree)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(builder: SelectBuilder) -> LayoutTree {
        let mut tree = LayoutTree::new();
        let root = div().w(400.0).h(200.0).child(builder).build(&mut tree);
        tree.set_root(root);
        tree.compute_layout(400.0, 200.0);
        tree
    }

    #[test]
    fn test_trigger_is_built_and_focusable() {
        let tree = build(SelectBuilder::with_key("sel_build").options(["a", "b"]));
        let trigger = tree.node_by_element_id("sel_build_trigger").unwrap();
        assert!(tree.props(trigger).unwrap().focusable);
        assert!(tree.handlers(trigger).is_some());
    }

    #[test]
    fn test_clear_control_requires_clearable_and_value() {
        let tree = build(SelectBuilder::with_key("sel_noclear").clearable(true));
        assert!(tree.node_by_element_id("sel_noclear_clear").is_none());

        let tree = build(
            SelectBuilder::with_key("sel_clear")
                .clearable(true)
                .options(["a"])
                .value(SelectValue::Single(SelectOption::from("a"))),
        );
        assert!(tree.node_by_element_id("sel_clear_clear").is_some());
    }

    #[test]
    fn test_clear_fires_on_clear_exactly_once_per_activation() {
        use std::sync::atomic::{AtomicU32, Ordering};
        use weft_core::Modifiers;
        use weft_view::EventRouter;

        let cleared = Arc::new(AtomicU32::new(0));
        let cleared_in = cleared.clone();
        let tree = build(
            SelectBuilder::with_key("sel_clear_fire")
                .clearable(true)
                .options(["a"])
                .value(SelectValue::Single(SelectOption::from("a")))
                .on_clear(move || {
                    cleared_in.fetch_add(1, Ordering::SeqCst);
                }),
        );
        let control = tree.node_by_element_id("sel_clear_fire_clear").unwrap();
        let rect = tree.rect(control).unwrap();

        let mut router = EventRouter::new();
        router.pointer_up(&tree, rect.x + 1.0, rect.y + 1.0);
        assert_eq!(cleared.load(Ordering::SeqCst), 1);

        router.set_focus(&tree, Some(control));
        router.key_down(&tree, weft_core::Key::Enter, Modifiers::NONE);
        assert_eq!(cleared.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_multiple_value_renders_chips() {
        let tree = build(
            SelectBuilder::with_key("sel_chips")
                .multiple(true)
                .options(["a", "b", "c"])
                .value(SelectValue::Multiple(vec![
                    SelectOption::from("a"),
                    SelectOption::from("c"),
                ])),
        );
        assert!(tree.node_by_element_id("sel_chips_chip-0_remove").is_some());
        assert!(tree.node_by_element_id("sel_chips_chip-1_remove").is_some());
        assert!(tree.node_by_element_id("sel_chips_chip-2_remove").is_none());
    }
}
