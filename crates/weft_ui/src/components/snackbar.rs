//! Snackbar component - transient toast notifications
//!
//! Shown through the overlay manager's toast lifecycle: corner placement
//! and an auto-dismiss deadline on the manager's clock. Re-showing
//! replaces the previous snackbar (and with it the old deadline); the
//! close control and [`dismiss`] end it early. `on_dismiss` fires exactly
//! once however the snackbar ends.
//!
//! # Example
//!
//! ```ignore
//! cn::snackbar("Saved!")
//!     .severity(SnackbarSeverity::Success)
//!     .duration_ms(2500)
//!     .show();
//! ```

use std::sync::{Arc, Mutex, OnceLock};

use weft_theme::{ColorToken, RadiusToken, ThemeState};
use weft_view::overlay::{overlay_manager, Corner, OverlayBuilder, OverlayHandle};
use weft_view::prelude::*;
use weft_view::stateful::{use_shared_state, ButtonState, Stateful};

/// The one live snackbar; showing a new one replaces it
static CURRENT: OnceLock<Mutex<Option<OverlayHandle>>> = OnceLock::new();

fn current() -> &'static Mutex<Option<OverlayHandle>> {
    CURRENT.get_or_init(|| Mutex::new(None))
}

use super::icon::{glyphs, to_svg, IconName};

/// Snackbar severity variants
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SnackbarSeverity {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

impl SnackbarSeverity {
    fn accent_token(&self) -> ColorToken {
        match self {
            SnackbarSeverity::Info => ColorToken::Info,
            SnackbarSeverity::Success => ColorToken::Success,
            SnackbarSeverity::Warning => ColorToken::Warning,
            SnackbarSeverity::Error => ColorToken::Error,
        }
    }

    fn icon(&self) -> IconName {
        match self {
            SnackbarSeverity::Info => IconName::Info,
            SnackbarSeverity::Success => IconName::CircleCheck,
            SnackbarSeverity::Warning => IconName::TriangleAlert,
            SnackbarSeverity::Error => IconName::CircleX,
        }
    }
}

/// Builder for snackbars
pub struct SnackbarBuilder {
    key: InstanceKey,
    message: String,
    severity: SnackbarSeverity,
    duration_ms: u32,
    corner: Corner,
    on_dismiss: Option<Arc<dyn Fn() + Send + Sync>>,
}

/// Create a snackbar with a message
#[track_caller]
pub fn snackbar(message: impl Into<String>) -> SnackbarBuilder {
    SnackbarBuilder {
        key: InstanceKey::new("snackbar"),
        message: message.into(),
        severity: SnackbarSeverity::default(),
        duration_ms: 3000,
        corner: Corner::BottomRight,
        on_dismiss: None,
    }
}

/// Dismiss a snackbar early
///
/// A no-op if it already auto-dismissed.
pub fn dismiss(handle: OverlayHandle) {
    overlay_manager().lock().unwrap().close(handle);
}

impl SnackbarBuilder {
    pub fn severity(mut self, severity: SnackbarSeverity) -> Self {
        self.severity = severity;
        self
    }

    /// Auto-dismiss deadline in milliseconds
    pub fn duration_ms(mut self, duration_ms: u32) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    pub fn corner(mut self, corner: Corner) -> Self {
        self.corner = corner;
        self
    }

    pub fn on_dismiss<F>(mut self, on_dismiss: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on_dismiss = Some(Arc::new(on_dismiss));
        self
    }

    /// Show the snackbar, returning its overlay handle
    ///
    /// At most one snackbar is live: showing while a previous one is open
    /// replaces it, which also discards the old deadline.
    pub fn show(self) -> OverlayHandle {
        if let Some(previous) = current().lock().unwrap().take() {
            overlay_manager().lock().unwrap().close(previous);
        }
        let theme = ThemeState::get();
        let surface = theme.color(ColorToken::Surface);
        let border = theme.color(ColorToken::Border);
        let text_color = theme.color(ColorToken::TextPrimary);
        let text_tertiary = theme.color(ColorToken::TextTertiary);
        let accent = theme.color(self.severity.accent_token());
        let radius = theme.radius(RadiusToken::Md);

        let message = self.message;
        let severity = self.severity;
        let key = self.key.get().to_string();
        // Filled in after show(); the close control reads it lazily.
        let handle_cell: Arc<Mutex<Option<OverlayHandle>>> = Arc::new(Mutex::new(None));
        let handle_for_content = Arc::clone(&handle_cell);

        let on_dismiss = self.on_dismiss;
        let handle = OverlayBuilder::toast()
            .corner(self.corner)
            .auto_dismiss_ms(self.duration_ms)
            .content(move || {
                let close_key = format!("{key}_close");
                let close_state = use_shared_state::<ButtonState>(&close_key);
                let handle_for_click = Arc::clone(&handle_for_content);
                let close_hover = text_color.with_alpha(0.1);

                let close_control = Stateful::with_shared_state(close_state)
                    .cursor_pointer()
                    .on_state(move |state| {
                        let bg = if state == ButtonState::Hovered {
                            close_hover
                        } else {
                            weft_core::Color::TRANSPARENT
                        };
                        div()
                            .w(18.0)
                            .h(18.0)
                            .items_center()
                            .justify_center()
                            .rounded(radius)
                            .bg(bg)
                            .child(svg(to_svg(glyphs::X)).size(10.0, 10.0).tint(text_tertiary))
                    })
                    .on_click(move |_ctx| {
                        if let Some(handle) = *handle_for_click.lock().unwrap() {
                            dismiss(handle);
                        }
                    });

                div()
                    .flex_row()
                    .items_center()
                    .gap(8.0)
                    .min_w(240.0)
                    .p(12.0)
                    .bg(surface)
                    .border(1.0, border)
                    .border_bottom(2.0, accent)
                    .rounded(radius)
                    .shadow_lg()
                    .child(
                        svg(to_svg(severity.icon().markup()))
                            .size(16.0, 16.0)
                            .tint(accent),
                    )
                    .child(
                        div()
                            .flex_1()
                            .child(text(&message).size(13.0).color(text_color)),
                    )
                    .child(close_control)
            })
            .on_close(move || {
                if let Some(ref on_dismiss) = on_dismiss {
                    on_dismiss();
                }
            })
            .show();

        *handle_cell.lock().unwrap() = Some(handle);
        *current().lock().unwrap() = Some(handle);
        handle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[test]
    fn test_severity_tokens() {
        assert_eq!(
            SnackbarSeverity::Error.accent_token(),
            ColorToken::Error
        );
        assert_eq!(SnackbarSeverity::Success.icon(), IconName::CircleCheck);
    }

    #[test]
    fn test_show_replace_dismiss_lifecycle() {
        let dismissed = Arc::new(AtomicU32::new(0));

        let first_sink = dismissed.clone();
        let first = snackbar("saved")
            .duration_ms(60_000)
            .on_dismiss(move || {
                first_sink.fetch_add(1, Ordering::SeqCst);
            })
            .show();
        assert!(overlay_manager().lock().unwrap().is_open(first));

        // Re-showing replaces the live snackbar and its deadline.
        let second_sink = dismissed.clone();
        let second = snackbar("saved again")
            .duration_ms(60_000)
            .on_dismiss(move || {
                second_sink.fetch_add(1, Ordering::SeqCst);
            })
            .show();
        assert!(!overlay_manager().lock().unwrap().is_open(first));
        assert!(overlay_manager().lock().unwrap().is_open(second));
        assert_eq!(dismissed.load(Ordering::SeqCst), 1);

        dismiss(second);
        assert!(!overlay_manager().lock().unwrap().is_open(second));
        // Dismissing a dead handle is a no-op.
        dismiss(second);
        assert_eq!(dismissed.load(Ordering::SeqCst), 2);
    }
}
