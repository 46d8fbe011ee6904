//! # Weft Component Library (weft_ui)
//!
//! Themed, accessible components built on `weft_view` primitives.
//!
//! ## Philosophy
//!
//! - **Primitives**: `weft_view` provides low-level building blocks
//!   (div, text, svg, overlays, event routing)
//! - **Theme tokens**: `weft_theme` provides design tokens (colors,
//!   spacing, radii, shadows)
//! - **Components**: `weft_ui` provides styled components that resolve
//!   those tokens per interaction state
//!
//! ## Example
//!
//! ```ignore
//! use weft_ui::prelude::*;
//!
//! cn::button("Click me")
//!     .variant(ButtonVariant::Primary)
//!     .size(ButtonSize::Medium)
//!
//! cn::select()
//!     .placeholder("Pick a fruit...")
//!     .option("banana", "Banana")
//!     .option("cherry", "Cherry")
//!     .on_change(|value| tracing::debug!(?value, "changed"))
//! ```
//!
//! ## Components
//!
//! Button, Card, Checkbox (+group), Chip, Icon, IconButton, Input, Link,
//! Radio (+group), Select (single/multiple/autocomplete), Snackbar,
//! Spinner, Text/Title typography, Tooltip.

pub mod components;

pub use components::*;

/// Convenience module for accessing components with a `cn::` prefix
pub mod cn {
    pub use crate::components::button::{button, icon_button};
    pub use crate::components::card::card;
    pub use crate::components::checkbox::{checkbox, checkbox_group};
    pub use crate::components::chip::chip;
    pub use crate::components::icon::icon;
    pub use crate::components::input::input;
    pub use crate::components::link::link;
    pub use crate::components::radio::{radio, radio_group};
    pub use crate::components::select::select;
    pub use crate::components::snackbar::snackbar;
    pub use crate::components::spinner::spinner;
    pub use crate::components::tooltip::tooltip;
    pub use crate::components::typography::{body, title};
}

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::cn;
    pub use crate::components::button::{ButtonSize, ButtonVariant, IconPosition};
    pub use crate::components::chip::ChipVariant;
    pub use crate::components::icon::IconName;
    pub use crate::components::input::{text_input_data, InputSize};
    pub use crate::components::select::{
        OptionEntry, OptionScalar, SelectMode, SelectOption, SelectSize, SelectValue,
    };
    pub use crate::components::snackbar::SnackbarSeverity;
    pub use crate::components::spinner::SpinnerSize;
    pub use crate::components::typography::{TextTone, TitleLevel};
    // Re-export commonly needed theme and view types
    pub use weft_theme::{ColorToken, RadiusToken, ShadowToken, SpacingToken, ThemeState};
    pub use weft_view::prelude::*;
}
