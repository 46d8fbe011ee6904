//! Headless component gallery
//!
//! Builds a tree of every component, runs a layout pass, and drives a few
//! synthetic input events through the router, logging what fires. A
//! stand-in for a rendering host: everything up to rasterization.
//!
//! ```sh
//! RUST_LOG=debug cargo run -p weft_ui --example gallery
//! ```

use weft_theme::{ColorScheme, DefaultTheme, ThemeState};
use weft_ui::prelude::*;
use weft_view::overlay::overlay_manager;
use weft_view::{EventRouter, LayoutTree};

fn build_ui() -> Div {
    div()
        .flex_col()
        .gap(16.0)
        .p(24.0)
        .w(480.0)
        .child(cn::title("Weft gallery", TitleLevel::H2))
        .child(
            div()
                .flex_row()
                .gap(8.0)
                .child(cn::button("Primary"))
                .child(cn::button("Ghost").variant(ButtonVariant::Ghost))
                .child(cn::icon_button(IconName::X)),
        )
        .child(cn::checkbox("Email me updates").checked(true))
        .child(
            cn::radio_group()
                .item("s", "Small")
                .item("m", "Medium")
                .selected(Some("m".into())),
        )
        .child(
            cn::select()
                .placeholder("Pick a fruit...")
                .option("banana", "Banana")
                .option("cherry", "Cherry")
                .option("sushi", "Sushi")
                .clearable(true)
                .auto_position(true)
                .on_change(|value| tracing::info!(?value, "select changed")),
        )
        .child(cn::tooltip(cn::button("Hover me"), "A helpful hint"))
        .child(cn::spinner())
        .child(cn::link("Documentation", "https://example.com").external_icon())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    ThemeState::install_from_bundle(&DefaultTheme::bundle(), ColorScheme::Light);
    overlay_manager().lock().unwrap().set_viewport(800.0, 600.0);

    let mut tree = LayoutTree::new();
    let root = build_ui().build(&mut tree);
    tree.set_root(root);
    tree.compute_layout(800.0, 600.0);
    tracing::info!(nodes = tree.len(), "tree built");

    let mut router = EventRouter::new();

    // Hover the tooltip target, then open the select with a click.
    router.pointer_move(&tree, 40.0, 300.0);
    router.pointer_down(&tree, 40.0, 260.0);
    router.pointer_up(&tree, 40.0, 260.0);

    let overlays = overlay_manager().lock().unwrap().open_count();
    tracing::info!(overlays, "after synthetic input");

    // Advance the toast clock: a snackbar auto-dismisses.
    let handle = cn::snackbar("Saved!")
        .severity(SnackbarSeverity::Success)
        .duration_ms(1500)
        .show();
    overlay_manager().lock().unwrap().update(1400);
    tracing::info!(open = overlay_manager().lock().unwrap().is_open(handle), "before deadline");
    overlay_manager().lock().unwrap().update(1500);
    tracing::info!(open = overlay_manager().lock().unwrap().is_open(handle), "after deadline");
}
