//! The dropdown listbox for Select
//!
//! Built fresh by the overlay's content closure on every open and
//! rebuild: a search input row in autocomplete mode, then the filtered
//! option rows (or the not-found row). The logically active row is
//! marked with the selection color; real focus stays on the trigger.

use weft_core::State;
use weft_theme::{ColorToken, RadiusToken, ThemeState};
use weft_view::overlay::{overlay_manager, OverlayHandle};
use weft_view::prelude::*;
use weft_view::stateful::{use_shared_state, ButtonState, Stateful};

use super::engine::SelectOption;
use super::{apply_emits, SelectCallbacks, SharedEngine};
use crate::components::icon::{glyphs, to_svg};
use crate::components::input::{InputBuilder, SharedTextInputData};

const LISTBOX_MAX_HEIGHT: f32 = 240.0;

/// Snapshot of what the listbox shows, taken under one engine lock
struct ListboxView {
    options: Vec<SelectOption>,
    active: Option<usize>,
    selected: Vec<bool>,
    auto_complete: bool,
}

fn snapshot(engine: &SharedEngine) -> ListboxView {
    let engine = engine.lock().unwrap();
    let options: Vec<SelectOption> = engine.visible_options().cloned().collect();
    let selected = options
        .iter()
        .map(|o| engine.value().contains(o.value()))
        .collect();
    ListboxView {
        active: engine.active_index(),
        selected,
        auto_complete: engine.auto_complete(),
        options,
    }
}

/// Close the dropdown overlay tracked in `handle_state`
pub(crate) fn close_dropdown(handle_state: &State<Option<u64>>) {
    if let Some(raw) = handle_state.get() {
        overlay_manager()
            .lock()
            .unwrap()
            .close(OverlayHandle::from_raw(raw));
        handle_state.set(None);
    }
}

/// Build the dropdown content
#[allow(clippy::too_many_arguments)]
pub(crate) fn build_dropdown(
    key: String,
    engine: SharedEngine,
    callbacks: SelectCallbacks,
    chip_focus: State<Option<usize>>,
    handle_state: State<Option<u64>>,
    search_data: SharedTextInputData,
    width: f32,
    font_size: f32,
    padding: f32,
    not_found_label: String,
    placeholder: Option<String>,
) -> Div {
    let theme = ThemeState::get();
    let bg = theme.color(ColorToken::Surface);
    let border = theme.color(ColorToken::Border);
    let text_color = theme.color(ColorToken::TextPrimary);
    let text_tertiary = theme.color(ColorToken::TextTertiary);
    let surface_elevated = theme.color(ColorToken::SurfaceElevated);
    let selection = theme.color(ColorToken::Selection);
    let accent = theme.color(ColorToken::Accent);
    let radius = theme.radius(RadiusToken::Md);

    let view = snapshot(&engine);

    let mut listbox = div()
        .id(format!("{key}_listbox"))
        .flex_col()
        .w(width)
        .bg(bg)
        .border(1.0, border)
        .rounded(radius)
        .shadow_lg()
        .overflow_clip()
        .motion(Motion::EnterFade { duration_ms: 150 });

    if view.auto_complete {
        let search_placeholder = placeholder.unwrap_or_else(|| "Type to search...".to_string());
        let engine_for_search = SharedEngine::clone(&engine);
        let callbacks_for_search = callbacks.clone();
        let chip_focus_for_search = chip_focus.clone();

        let search_input = InputBuilder::with_key(format!("{key}_search"), &search_data)
            .placeholder(search_placeholder)
            .on_change(move |typed: &str| {
                let emits = engine_for_search.lock().unwrap().input_changed(typed);
                apply_emits(emits, &callbacks_for_search, &chip_focus_for_search);
                weft_core::request_rebuild();
            });

        listbox = listbox.child(
            div()
                .w_full()
                .flex_shrink_0()
                .p(padding / 2.0)
                .border_bottom(1.0, border)
                .child(search_input),
        );
    }

    let mut rows = div().flex_col().w_full();

    if view.options.is_empty() {
        rows = rows.child(
            div()
                .w_full()
                .p(padding)
                .child(text(not_found_label).size(font_size).color(text_tertiary)),
        );
    } else {
        for (index, option) in view.options.iter().enumerate() {
            let is_active = view.active == Some(index);
            let is_selected = view.selected[index];
            let label = option.label().to_string();

            let engine_for_row = SharedEngine::clone(&engine);
            let callbacks_for_row = callbacks.clone();
            let chip_focus_for_row = chip_focus.clone();
            let handle_state_for_row = handle_state.clone();
            let search_data_for_row = SharedTextInputData::clone(&search_data);

            let base_bg = if is_active {
                selection
            } else if is_selected {
                surface_elevated
            } else {
                bg
            };

            let row_state = use_shared_state::<ButtonState>(&format!("{key}_opt-{index}"));

            let row = Stateful::with_shared_state(row_state)
                .w_full()
                .h_fit()
                .py(padding / 4.0)
                .px(padding / 2.0)
                .cursor_pointer()
                .on_state(move |state| {
                    let row_bg = if state == ButtonState::Hovered && !is_active {
                        surface_elevated
                    } else {
                        base_bg
                    };
                    let mut content = div()
                        .w_full()
                        .flex_row()
                        .items_center()
                        .justify_between()
                        .bg(row_bg)
                        .rounded(radius / 2.0)
                        .px(4.0)
                        .py(4.0)
                        .child(text(&label).size(font_size).color(text_color).no_wrap());
                    if is_selected {
                        content = content
                            .child(svg(to_svg(glyphs::CHECK)).size(12.0, 12.0).tint(accent));
                    }
                    content
                })
                .on_click(move |_ctx| {
                    let (emits, still_open) = {
                        let mut engine = engine_for_row.lock().unwrap();
                        let emits = engine.option_pressed(index);
                        (emits, engine.is_open())
                    };
                    apply_emits(emits, &callbacks_for_row, &chip_focus_for_row);
                    if !still_open {
                        close_dropdown(&handle_state_for_row);
                        search_data_for_row.lock().unwrap().clear();
                    }
                    weft_core::request_rebuild();
                });

            rows = rows.child(row);
        }
    }

    listbox.child(div().w_full().max_h(LISTBOX_MAX_HEIGHT).overflow_clip().child(rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::input::text_input_data;
    use crate::components::select::engine::{SelectEngine, SelectMode, SelectOption};
    use std::sync::{Arc, Mutex};
    use weft_core::ContextState;
    use weft_view::tree::LayoutTree;
    use weft_view::ElementBuilder;

    fn tree_texts(tree: &LayoutTree, node: weft_view::LayoutNodeId, out: &mut Vec<String>) {
        if let Some(text_props) = tree.props(node).and_then(|p| p.text.clone()) {
            out.push(text_props.content);
        }
        for &child in tree.children(node) {
            tree_texts(tree, child, out);
        }
    }

    fn dropdown_texts(engine: SelectEngine, key: &str) -> Vec<String> {
        let ctx = ContextState::get();
        let dropdown = build_dropdown(
            key.to_string(),
            Arc::new(Mutex::new(engine)),
            SelectCallbacks::default(),
            ctx.use_state_keyed(&format!("{key}_chip_focus"), || None),
            ctx.use_state_keyed(&format!("{key}_overlay"), || None),
            text_input_data(),
            220.0,
            14.0,
            12.0,
            "Nothing here".to_string(),
            None,
        );
        let mut tree = LayoutTree::new();
        let root = dropdown.build(&mut tree);
        let mut texts = Vec::new();
        tree_texts(&tree, root, &mut texts);
        texts
    }

    #[test]
    fn test_empty_view_renders_not_found_label() {
        let mut engine = SelectEngine::new(SelectMode::Single).with_autocomplete(true);
        engine.sync_options(["banana", "sushi"].map(SelectOption::from));
        engine.input_changed("xyz");
        assert!(engine.is_view_empty());

        let texts = dropdown_texts(engine, "ol_notfound");
        assert!(texts.iter().any(|t| t == "Nothing here"));
        assert!(!texts.iter().any(|t| t == "banana"));
    }

    #[test]
    fn test_rows_render_filtered_labels() {
        let mut engine = SelectEngine::new(SelectMode::Single).with_autocomplete(true);
        engine.sync_options(["banana", "sushi"].map(SelectOption::from));
        engine.input_changed("ban");

        let texts = dropdown_texts(engine, "ol_rows");
        assert!(texts.iter().any(|t| t == "banana"));
        assert!(!texts.iter().any(|t| t == "sushi"));
        assert!(!texts.iter().any(|t| t == "Nothing here"));
    }
}
