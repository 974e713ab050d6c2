//! Layout engine for the Wren browser.
//!
//! # Scope
//!
//! This crate provides:
//! - **Font Metrics** - the measurement capability layout depends on, plus a
//!   fixed-ratio approximation for headless use and tests
//! - **Text Style** - the bold/italic state toggled by `<b>` and `<i>`
//! - **Layout** - word wrapping of a token stream into positioned words
//! - **Display List** - the positioned, styled words a paint surface draws
//!
//! # Not Implemented
//!
//! - CSS, the box model, and block-level line breaks
//! - Any tag other than `b` and `i` affecting layout

pub mod display_list;
pub mod font_metrics;
pub mod layout;
pub mod style;

pub use display_list::{DisplayList, LayoutItem};
pub use font_metrics::{ApproximateFontMetrics, FontMetrics};
pub use layout::{LayoutConfig, layout, layout_html};
pub use style::TextStyle;
