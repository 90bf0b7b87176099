//! # FitCoach Style
//!
//! Runtime theming for the application shell.
//!
//! ## Pipeline
//!
//! ```text
//!  ThemeConfig ──► apply_theme ──► StyleStore ──► renderer
//!       │               │
//!       │               └─ ColorRamp::generate (12 shades from one color)
//!       └─ primaryColor, backgroundColor, textColor, ...
//! ```
//!
//! The store is an explicit object rather than ambient document state, so
//! everything here can be exercised without a window or a DOM.

mod color;
mod ramp;
mod store;
mod theme;

pub use color::{HexColor, shade};
pub use ramp::{ColorRamp, SHADE_OFFSET, ShadeStep};
pub use store::StyleStore;
pub use theme::{ThemeConfig, ThemeField, apply_theme, primary_var};

/// Result type for color parsing.
pub type StyleResult<T> = Result<T, ColorError>;

/// Errors raised when validating a hex color.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColorError {
    #[error("Color {input:?} must have 6 hex digits, found {len}")]
    InvalidLength { input: String, len: usize },

    #[error("Color {0:?} contains non-hex characters")]
    InvalidDigits(String),
}
