use serde_json::{Map, Value as JsonValue};

/// Lottie layer type code for text layers
pub const TEXT_LAYER_TYPE: f64 = 5.0;

/// Keys holding embedded glyph and font tables
const FONT_TABLE_KEYS: [&str; 2] = ["chars", "fonts"];

/// Counters collected while sanitizing a document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SanitizeStats {
    /// Text layers dropped, wherever they were found
    pub text_layers: usize,
    /// `chars` / `fonts` entries dropped
    pub font_tables: usize,
    /// `null` array elements dropped
    pub nulls: usize,
}

impl SanitizeStats {
    /// True when the pass did not remove anything
    pub fn is_empty(&self) -> bool {
        self.text_layers == 0 && self.font_tables == 0 && self.nulls == 0
    }
}

/// Remove text layers and embedded font data from a Lottie document
///
/// Builds a new tree where:
/// - every object whose own `ty` is `5` (a text layer) is dropped with its whole subtree
/// - every `chars` and `fonts` entry is dropped, at any depth, inside a layer or not
/// - arrays are compacted: dropped layers and `null` elements leave no holes
///
/// Surviving values are copied unchanged and keep their order. Containers emptied by
/// the removal are kept as empty containers.
///
/// # Returns
/// * `Some(value)` - The sanitized document
/// * `None` - The document itself is a text layer, nothing survives
///
/// # Examples
/// ```
/// use taps_tools::lottie::sanitize;
/// use serde_json::json;
///
/// let doc = json!({
///     "layers": [{"ty": 4, "nm": "Shape"}, {"ty": 5, "nm": "Title"}],
///     "fonts": {"list": []}
/// });
/// let clean = sanitize(doc).unwrap();
/// assert_eq!(clean, json!({"layers": [{"ty": 4, "nm": "Shape"}]}));
/// ```
pub fn sanitize(doc: JsonValue) -> Option<JsonValue> {
    sanitize_with_stats(doc).0
}

/// Same as [`sanitize`], also reporting what was removed
pub fn sanitize_with_stats(doc: JsonValue) -> (Option<JsonValue>, SanitizeStats) {
    let mut stats = SanitizeStats::default();
    let result = sanitize_recursive(doc, &mut stats);
    (result, stats)
}

fn sanitize_recursive(value: JsonValue, stats: &mut SanitizeStats) -> Option<JsonValue> {
    match value {
        JsonValue::Array(items) => {
            let mut kept = Vec::with_capacity(items.len());
            for item in items {
                if item.is_null() {
                    stats.nulls += 1;
                    continue;
                }
                // Text layers go as a whole, no partial cleanup of their content
                if is_text_layer(&item) {
                    stats.text_layers += 1;
                    continue;
                }
                if let Some(clean) = sanitize_recursive(item, stats) {
                    kept.push(clean);
                }
            }
            Some(JsonValue::Array(kept))
        }
        JsonValue::Object(map) => {
            let mut kept = Map::with_capacity(map.len());
            for (key, val) in map {
                if FONT_TABLE_KEYS.contains(&key.as_str()) {
                    stats.font_tables += 1;
                    continue;
                }
                if let Some(clean) = sanitize_recursive(val, stats) {
                    kept.insert(key, clean);
                }
            }

            let rebuilt = JsonValue::Object(kept);
            // Object-valued fields shaped like a text layer vanish with their key
            if is_text_layer(&rebuilt) {
                stats.text_layers += 1;
                return None;
            }
            Some(rebuilt)
        }
        scalar => Some(scalar),
    }
}

/// Check if a JSON value is an object whose own `ty` is the number 5
///
/// Integer and float encodings both count, string `"5"` does not.
fn is_text_layer(value: &JsonValue) -> bool {
    value
        .get("ty")
        .and_then(JsonValue::as_f64)
        .is_some_and(|ty| ty == TEXT_LAYER_TYPE)
}
