use serde_json::{Map, Value as JsonValue};

/// Opaque white, the color every fill and stroke ends up with
pub const WHITE: [u64; 4] = [1, 1, 1, 1];

/// Shape types whose `c` property is a color
const COLORED_SHAPE_TYPES: [&str; 2] = ["fl", "st"];

/// Key of the color property on fill and stroke shapes
const COLOR_KEY: &str = "c";

/// Replace every fill and stroke color of a Lottie document with opaque white
///
/// Recursively traverses the JSON tree. When an object is a fill (`"ty": "fl"`) or a
/// stroke (`"ty": "st"`) shape, its `c` child is rewritten:
/// - static color (`"a": 0`) with a `k` array of at least 3 channels: `k` becomes `[1,1,1,1]`
/// - animated color (`"a": 1`): every keyframe's array-valued `s` and `e` become `[1,1,1,1]`
///
/// Anything else is left as is, including `c` objects under other shape types and
/// other properties of fill/stroke shapes such as opacity `o` or width `w`. Nothing is
/// ever removed.
///
/// # Arguments
/// * `tree` - The JSON tree to modify (usually the animation root)
///
/// # Returns
/// The number of color arrays that were rewritten
///
/// # Examples
/// ```
/// use taps_tools::lottie::recolor;
/// use serde_json::json;
///
/// let mut shape = json!({"ty": "fl", "c": {"a": 0, "k": [0.2, 0.4, 0.6]}, "o": {"a": 0, "k": 100}});
/// assert_eq!(recolor(&mut shape), 1);
/// assert_eq!(shape["c"]["k"], json!([1, 1, 1, 1]));
/// ```
pub fn recolor(tree: &mut JsonValue) -> usize {
    recolor_recursive(tree)
}

fn recolor_recursive(value: &mut JsonValue) -> usize {
    let mut rewritten = 0;

    match value {
        JsonValue::Object(map) => {
            if is_colored_shape(map) {
                if let Some(JsonValue::Object(color)) = map.get_mut(COLOR_KEY) {
                    rewritten += whiten_color_property(color);
                }
            }

            // Matched or not, nested groups and precomps still need a visit
            for val in map.values_mut() {
                rewritten += recolor_recursive(val);
            }
        }
        JsonValue::Array(arr) => {
            for val in arr.iter_mut() {
                rewritten += recolor_recursive(val);
            }
        }
        _ => {
            // Primitives - nothing to do
        }
    }

    rewritten
}

/// Check if an object is a fill or stroke shape, judged by its own `ty`
fn is_colored_shape(map: &Map<String, JsonValue>) -> bool {
    map.get("ty")
        .and_then(JsonValue::as_str)
        .is_some_and(|ty| COLORED_SHAPE_TYPES.contains(&ty))
}

/// Rewrite a color property in place, returning how many arrays changed
fn whiten_color_property(color: &mut Map<String, JsonValue>) -> usize {
    match color.get("a").and_then(JsonValue::as_f64) {
        Some(a) if a == 0.0 => match color.get_mut("k") {
            Some(JsonValue::Array(channels)) if channels.len() >= 3 => {
                *channels = white();
                1
            }
            _ => 0,
        },
        Some(a) if a == 1.0 => match color.get_mut("k") {
            Some(JsonValue::Array(keyframes)) => keyframes
                .iter_mut()
                .filter_map(JsonValue::as_object_mut)
                .map(whiten_keyframe)
                .sum(),
            _ => 0,
        },
        _ => 0,
    }
}

/// Rewrite the start and end values of a color keyframe, leaving timing and easing alone
fn whiten_keyframe(keyframe: &mut Map<String, JsonValue>) -> usize {
    let mut rewritten = 0;
    for key in ["s", "e"] {
        if let Some(JsonValue::Array(channels)) = keyframe.get_mut(key) {
            *channels = white();
            rewritten += 1;
        }
    }
    rewritten
}

fn white() -> Vec<JsonValue> {
    WHITE.iter().copied().map(JsonValue::from).collect()
}
