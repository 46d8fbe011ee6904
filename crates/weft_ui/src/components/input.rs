//! Input component - single-line text field
//!
//! The field's text lives in a [`SharedTextInputData`] store so composite
//! widgets (Select in autocomplete mode) can own the same buffer the
//! field edits. Editing is routed text input plus Backspace/Delete;
//! anything richer (selections, IME composition) belongs to the host.
//!
//! # Example
//!
//! ```ignore
//! let data = text_input_data();
//! cn::input(&data)
//!     .placeholder("Search...")
//!     .on_change(|value| tracing::debug!(value, "changed"))
//! ```

use std::cell::OnceCell;
use std::sync::{Arc, Mutex};

use weft_core::{EventType, Key};
use weft_theme::{ColorToken, RadiusToken, ThemeState};
use weft_view::prelude::*;
use weft_view::stateful::{use_shared_state, StateTransitions, Stateful};
use weft_view::tree::{LayoutNodeId, LayoutTree};

/// Backing store for a text field
#[derive(Clone, Debug, Default)]
pub struct TextInputData {
    pub value: String,
    /// Byte offset of the caret within `value`
    pub cursor: usize,
}

impl TextInputData {
    /// Insert committed text at the caret
    pub fn insert(&mut self, text: &str) {
        self.value.insert_str(self.cursor, text);
        self.cursor += text.len();
    }

    /// Remove the character before the caret
    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let prev = self.value[..self.cursor]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
            .unwrap_or(0);
        self.value.replace_range(prev..self.cursor, "");
        self.cursor = prev;
    }

    /// Remove the character after the caret
    pub fn delete_forward(&mut self) {
        if self.cursor >= self.value.len() {
            return;
        }
        let next = self.value[self.cursor..]
            .char_indices()
            .nth(1)
            .map(|(i, _)| self.cursor + i)
            .unwrap_or(self.value.len());
        self.value.replace_range(self.cursor..next, "");
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }
}

/// Shared handle to a field's backing store
pub type SharedTextInputData = Arc<Mutex<TextInputData>>;

/// Create an empty backing store
pub fn text_input_data() -> SharedTextInputData {
    Arc::new(Mutex::new(TextInputData::default()))
}

/// Interaction states of the field
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum InputState {
    #[default]
    Idle,
    Hovered,
    Focused,
    Disabled,
}

impl StateTransitions for InputState {
    fn on_event(&self, event: EventType) -> Option<Self> {
        use InputState::*;
        match (self, event) {
            (Idle, EventType::PointerEnter) => Some(Hovered),
            (Hovered, EventType::PointerLeave) => Some(Idle),
            (Idle | Hovered, EventType::FocusIn) => Some(Focused),
            (Focused, EventType::FocusOut) => Some(Idle),
            _ => None,
        }
    }
}

/// Input size variants
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InputSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl InputSize {
    fn height(&self) -> f32 {
        match self {
            InputSize::Small => 32.0,
            InputSize::Medium => 40.0,
            InputSize::Large => 48.0,
        }
    }

    fn font_size(&self) -> f32 {
        match self {
            InputSize::Small => 13.0,
            InputSize::Medium => 14.0,
            InputSize::Large => 16.0,
        }
    }
}

#[derive(Clone)]
struct InputConfig {
    data: SharedTextInputData,
    placeholder: Option<String>,
    size: InputSize,
    disabled: bool,
    read_only: bool,
    on_change: Option<Arc<dyn Fn(&str) + Send + Sync>>,
    on_blur: Option<Arc<dyn Fn() + Send + Sync>>,
}

/// The built input element
pub struct Input {
    inner: Div,
}

impl Input {
    fn from_config(instance_key: &str, config: InputConfig) -> Self {
        let theme = ThemeState::get();
        let height = config.size.height();
        let font_size = config.size.font_size();
        let radius = theme.radius(RadiusToken::Default);

        let border = theme.color(ColorToken::Border);
        let border_hover = theme.color(ColorToken::BorderHover);
        let border_focus = theme.color(ColorToken::BorderFocus);
        let bg = theme.color(ColorToken::InputBg);
        let bg_hover = theme.color(ColorToken::InputBgHover);
        let bg_disabled = theme.color(ColorToken::InputBgDisabled);
        let text_color = theme.color(ColorToken::TextPrimary);
        let placeholder_color = theme.color(ColorToken::TextTertiary);

        let state_key = format!("{instance_key}_state");
        let shared = use_shared_state::<InputState>(&state_key);
        let disabled = config.disabled;
        let read_only = config.read_only;

        let data_for_display = Arc::clone(&config.data);
        let placeholder = config.placeholder.clone();

        let data_for_text = Arc::clone(&config.data);
        let data_for_keys = Arc::clone(&config.data);
        let on_change_for_text = config.on_change.clone();
        let on_change_for_keys = config.on_change.clone();
        let on_blur = config.on_blur.clone();

        let mut field = Stateful::with_shared_state(shared)
            .w_full()
            .h(height)
            .cursor(if disabled {
                CursorStyle::NotAllowed
            } else {
                CursorStyle::Text
            })
            .focusable()
            .id(instance_key.to_string())
            .on_state(move |state| {
                let state = if disabled { InputState::Disabled } else { state };
                let (border_color, bg_color) = match state {
                    InputState::Focused => (border_focus, bg),
                    InputState::Hovered => (border_hover, bg_hover),
                    InputState::Disabled => (border, bg_disabled),
                    InputState::Idle => (border, bg),
                };
                let data = data_for_display.lock().unwrap();
                let (content, color) = if data.value.is_empty() {
                    (
                        placeholder.clone().unwrap_or_default(),
                        placeholder_color,
                    )
                } else {
                    (data.value.clone(), text_color)
                };
                let mut row = div()
                    .flex_row()
                    .items_center()
                    .w_full()
                    .h(height)
                    .px(12.0)
                    .bg(bg_color)
                    .border(1.0, border_color)
                    .rounded(radius)
                    .overflow_clip()
                    .child(text(content).size(font_size).color(color).no_wrap());
                if disabled {
                    row = row.opacity(0.6);
                }
                row
            });

        if !disabled && !read_only {
            field = field
                .on_key_down(move |ctx| {
                    let changed = {
                        let mut data = data_for_keys.lock().unwrap();
                        match ctx.key {
                            Some(Key::Backspace) => {
                                data.backspace();
                                true
                            }
                            Some(Key::Delete) => {
                                data.delete_forward();
                                true
                            }
                            _ => false,
                        }
                    };
                    if changed {
                        weft_core::request_rebuild();
                        if let Some(ref on_change) = on_change_for_keys {
                            on_change(&data_for_keys.lock().unwrap().value);
                        }
                    }
                })
                .on_text_input(move |ctx| {
                    // TextInput events carry host-committed text
                    let Some(ref committed) = ctx.text else {
                        return;
                    };
                    data_for_text.lock().unwrap().insert(committed);
                    weft_core::request_rebuild();
                    if let Some(ref on_change) = on_change_for_text {
                        on_change(&data_for_text.lock().unwrap().value);
                    }
                })
                .on_focus_out(move |_ctx| {
                    if let Some(ref on_blur) = on_blur {
                        on_blur();
                    }
                });
        }

        Self {
            inner: div().w_full().child(field),
        }
    }
}

impl ElementBuilder for Input {
    fn build(&self, tree: &mut LayoutTree) -> LayoutNodeId {
        self.inner.build(tree)
    }
}

/// Builder for inputs
pub struct InputBuilder {
    key: InstanceKey,
    config: InputConfig,
    built: OnceCell<Input>,
}

/// Create an input over a shared backing store
#[track_caller]
pub fn input(data: &SharedTextInputData) -> InputBuilder {
    InputBuilder {
        key: InstanceKey::new("input"),
        config: InputConfig {
            data: Arc::clone(data),
            placeholder: None,
            size: InputSize::default(),
            disabled: false,
            read_only: false,
            on_change: None,
            on_blur: None,
        },
        built: OnceCell::new(),
    }
}

impl InputBuilder {
    /// Create with an explicit key
    pub fn with_key(key: impl Into<String>, data: &SharedTextInputData) -> Self {
        Self {
            key: InstanceKey::explicit(key),
            config: InputConfig {
                data: Arc::clone(data),
                placeholder: None,
                size: InputSize::default(),
                disabled: false,
                read_only: false,
                on_change: None,
                on_blur: None,
            },
            built: OnceCell::new(),
        }
    }

    fn get_or_build(&self) -> &Input {
        self.built
            .get_or_init(|| Input::from_config(self.key.get(), self.config.clone()))
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.config.placeholder = Some(placeholder.into());
        self
    }

    pub fn size(mut self, size: InputSize) -> Self {
        self.config.size = size;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.config.disabled = disabled;
        self
    }

    pub fn read_only(mut self, read_only: bool) -> Self {
        self.config.read_only = read_only;
        self
    }

    pub fn on_change<F>(mut self, on_change: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.config.on_change = Some(Arc::new(on_change));
        self
    }

    pub fn on_blur<F>(mut self, on_blur: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.config.on_blur = Some(Arc::new(on_blur));
        self
    }
}

impl ElementBuilder for InputBuilder {
    fn build(&self, tree: &mut LayoutTree) -> LayoutNodeId {
        self.get_or_build().build(tree)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_backspace() {
        let mut data = TextInputData::default();
        data.insert("ban");
        data.insert("ana");
        assert_eq!(data.value, "banana");
        assert_eq!(data.cursor, 6);
        data.backspace();
        assert_eq!(data.value, "banan");
        assert_eq!(data.cursor, 5);
    }

    #[test]
    fn test_backspace_at_start_is_noop() {
        let mut data = TextInputData::default();
        data.backspace();
        assert_eq!(data.value, "");
    }

    #[test]
    fn test_backspace_handles_multibyte() {
        let mut data = TextInputData::default();
        data.insert("héllo");
        for _ in 0..5 {
            data.backspace();
        }
        assert_eq!(data.value, "");
        assert_eq!(data.cursor, 0);
    }

    #[test]
    fn test_delete_forward() {
        let mut data = TextInputData::default();
        data.insert("abc");
        data.cursor = 0;
        data.delete_forward();
        assert_eq!(data.value, "bc");
        data.cursor = 2;
        data.delete_forward();
        assert_eq!(data.value, "bc");
    }

    #[test]
    fn test_input_state_transitions() {
        use InputState::*;
        assert_eq!(Idle.on_event(EventType::FocusIn), Some(Focused));
        assert_eq!(Hovered.on_event(EventType::FocusIn), Some(Focused));
        assert_eq!(Focused.on_event(EventType::FocusOut), Some(Idle));
        assert_eq!(Focused.on_event(EventType::PointerLeave), None);
    }
}
