//! Selected-option chips for multiple mode
//!
//! Each selected option renders as a removable chip inside the trigger
//! row. Logical focus among the remove controls is application state (a
//! keyed signal), not DOM focus: removing a chip moves the marker to the
//! chip now occupying that position, or back to the trigger when none
//! remain.

use weft_core::State;
use weft_view::prelude::*;

use super::{apply_emits, SelectCallbacks, SharedEngine};
use crate::components::chip::ChipBuilder;

/// Build the chips row from the engine's current value
pub(crate) fn selected_chips(
    key: &str,
    engine: &SharedEngine,
    callbacks: &SelectCallbacks,
    chip_focus: &State<Option<usize>>,
    disabled: bool,
) -> Div {
    let selected: Vec<_> = engine.lock().unwrap().value().options().to_vec();
    let focused_chip = chip_focus.get();

    let mut row = div().flex_row().items_center().flex_wrap().gap(4.0);

    for (position, option) in selected.iter().enumerate() {
        let value = option.value().clone();
        let engine = SharedEngine::clone(engine);
        let callbacks = callbacks.clone();
        let chip_focus = chip_focus.clone();

        row = row.child(
            ChipBuilder::with_key(format!("{key}_chip-{position}"), option.label())
                .disabled(disabled)
                .focused(focused_chip == Some(position))
                .on_remove(move || {
                    let emits = engine.lock().unwrap().chip_removed(&value);
                    apply_emits(emits, &callbacks, &chip_focus);
                    weft_core::request_rebuild();
                }),
        );
    }

    row
}
