//! # taps-tools
//!
//! Asset and routing helpers for the Limitless Taps website.
//!
//! - [`lottie`]: strip text layers and font tables from Lottie animations, or white out
//!   their fills and strokes
//! - [`batch`]: apply one of those transforms to every `lottie-*.json` file of a directory
//! - [`locale`]: decide whether a request path needs a locale-prefix redirect
//!
//! ## Example
//!
//! ```
//! use taps_tools::lottie::{recolor, sanitize};
//! use serde_json::json;
//!
//! let doc = json!({
//!     "fonts": {"list": []},
//!     "layers": [
//!         {"ty": 4, "shapes": [{"ty": "fl", "c": {"a": 0, "k": [0.1, 0.2, 0.3]}}]},
//!         {"ty": 5, "nm": "Caption"}
//!     ]
//! });
//!
//! let mut clean = sanitize(doc).unwrap();
//! assert_eq!(recolor(&mut clean), 1);
//! assert_eq!(clean["layers"].as_array().unwrap().len(), 1);
//! ```

pub mod batch;
pub mod error;
pub mod locale;
pub mod lottie;

// Re-export commonly used items
pub use batch::{BatchOptions, BatchReport, Operation};
pub use error::{Result, ToolError};
pub use locale::{decide, LocaleConfig, RedirectDecision};
