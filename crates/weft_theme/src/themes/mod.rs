//! Built-in themes

mod default;

pub use default::DefaultTheme;
