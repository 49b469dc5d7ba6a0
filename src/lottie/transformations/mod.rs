/// Transformation passes applied to Lottie animation documents
///
/// - `text_layer_removal`: Drop text layers and embedded `chars`/`fonts` tables
/// - `fill_stroke_whiteout`: Force every fill and stroke color to opaque white
pub mod fill_stroke_whiteout;
pub mod text_layer_removal;

pub use fill_stroke_whiteout::{recolor, WHITE};
pub use text_layer_removal::{sanitize, sanitize_with_stats, SanitizeStats};
