//! Themed components built on weft_view primitives
//!
//! Each component follows a consistent pattern:
//! - Builder function (e.g. `button("Label")`)
//! - Variant enum (e.g. `ButtonVariant`)
//! - Size enum where sizing varies (e.g. `ButtonSize`)
//! - Implements `ElementBuilder` for rendering

pub mod button;
pub mod card;
pub mod checkbox;
pub mod chip;
pub mod icon;
pub mod input;
pub mod link;
pub mod radio;
pub mod select;
pub mod snackbar;
pub mod spinner;
pub mod tooltip;
pub mod typography;

pub use button::{
    button, icon_button, Button, ButtonBuilder, ButtonSize, ButtonVariant, IconPosition,
};
pub use card::{card, CardBuilder};
pub use checkbox::{checkbox, checkbox_group, Checkbox, CheckboxBuilder, CheckboxGroupBuilder};
pub use chip::{chip, Chip, ChipBuilder, ChipVariant};
pub use icon::{icon, to_svg, IconName};
pub use input::{
    input, text_input_data, Input, InputBuilder, InputSize, InputState, SharedTextInputData,
    TextInputData,
};
pub use link::{link, Link, LinkBuilder};
pub use radio::{radio, radio_group, Radio, RadioBuilder, RadioGroupBuilder};
pub use select::{
    select, OptionEntry, OptionScalar, Select, SelectBuilder, SelectEmit, SelectEngine,
    SelectMode, SelectOption, SelectSize, SelectValue,
};
pub use snackbar::{dismiss as dismiss_snackbar, snackbar, SnackbarBuilder, SnackbarSeverity};
pub use spinner::{spinner, SpinnerBuilder, SpinnerSize};
pub use tooltip::{tooltip, TooltipBuilder};
pub use typography::{body, body_toned, title, TextTone, TitleLevel};
