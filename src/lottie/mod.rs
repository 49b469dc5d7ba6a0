pub mod transformations;

// Re-export commonly used items
pub use transformations::{recolor, sanitize, sanitize_with_stats, SanitizeStats};
