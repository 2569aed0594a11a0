//! String-to-value conversion.
//!
//! [`convert`] is the single dispatch point from a raw content token to a typed
//! [`Value`]. The rules are the bit-exact contract of the content format:
//!
//! | tag          | accepted text                      | result                          |
//! |--------------|------------------------------------|---------------------------------|
//! | `bool`       | anything                           | `"1"` is true, the rest false   |
//! | `int`        | decimal `i32`, surrounding blanks  | parse error is `Malformed`      |
//! | `float`      | decimal `f32`, surrounding blanks  | parse error is `Malformed`      |
//! | `string`     | anything                           | unchanged                       |
//! | `color`      | `"r g b"` / `"r g b a"` in 0..255  | normalized; short input → black |
//! | `*_ref`      | resource name                      | resolver handle or absent       |

use tracing::{debug, warn};

use crate::error::{ConversionError, ErrorKind};
use crate::resolve::Resolver;
use crate::tag::TypeTag;
use crate::value::{Color, Value};

/// Converts `raw` into a value of type `tag`.
///
/// Reference tags ask `resolver`; a miss yields an absent reference rather
/// than an error.
///
/// # Errors
///
/// Returns [`ConversionError::Malformed`] when a numeric or color token does
/// not parse.
pub fn convert(tag: TypeTag, raw: &str, resolver: &dyn Resolver) -> Result<Value, ConversionError> {
    let value = match tag {
        TypeTag::Bool => Value::Bool(parse_bool(raw)),
        TypeTag::Int => Value::Int(parse_int(raw)?),
        TypeTag::Float => Value::Float(parse_float(raw)?),
        TypeTag::String => Value::String(raw.to_string()),
        TypeTag::Color => Value::Color(parse_color(raw)?),
        TypeTag::ClassRef => Value::Class(resolved(tag, raw, resolver.class(raw))),
        TypeTag::RegionRef => Value::Region(resolved(tag, raw, resolver.region(raw))),
        TypeTag::PathRef => Value::Path(resolved(tag, raw, resolver.path(raw))),
        TypeTag::TextureRef => Value::Texture(resolved(tag, raw, resolver.texture(raw))),
        TypeTag::AudioRef => Value::Audio(resolved(tag, raw, resolver.audio(raw))),
    };
    Ok(value)
}

/// Content booleans are written `0`/`1`; anything that is not `"1"` is false.
pub fn parse_bool(raw: &str) -> bool {
    raw == "1"
}

/// Parses a decimal `i32`, ignoring surrounding whitespace.
pub fn parse_int(raw: &str) -> Result<i32, ConversionError> {
    raw.trim()
        .parse()
        .map_err(|_| ConversionError::malformed(TypeTag::Int, raw))
}

/// Parses a decimal `f32`, ignoring surrounding whitespace.
pub fn parse_float(raw: &str) -> Result<f32, ConversionError> {
    raw.trim()
        .parse()
        .map_err(|_| ConversionError::malformed(TypeTag::Float, raw))
}

/// Parses `"r g b"` or `"r g b a"` with 0..255 channels.
///
/// Fewer than three tokens logs a warning and yields [`Color::BLACK`].
///
/// With exactly four tokens the alpha channel is read from the *first*
/// token, not the fourth. Existing content was authored against that
/// behavior, so it is kept as-is.
pub fn parse_color(raw: &str) -> Result<Color, ConversionError> {
    let tokens: Vec<&str> = raw.split_whitespace().collect();
    if tokens.len() < 3 {
        warn!(
            target: "props::convert",
            raw,
            got = tokens.len(),
            "expected 3 or 4 color arguments (rgb / rgba)"
        );
        return Ok(Color::BLACK);
    }

    let channel = |token: &str| -> Result<f32, ConversionError> {
        token
            .parse::<f32>()
            .map_err(|_| ConversionError::malformed(TypeTag::Color, raw))
    };

    let (r, g, b) = (channel(tokens[0])?, channel(tokens[1])?, channel(tokens[2])?);
    // Four-token colors take alpha from the first token, not the last.
    let a = if tokens.len() == 4 { r } else { 255.0 };
    Ok(Color::from_bytes(r, g, b, a))
}

fn resolved<T>(tag: TypeTag, raw: &str, handle: Option<T>) -> Option<T> {
    if handle.is_none() {
        debug!(
            target: "props::convert",
            kind = %ErrorKind::ResolverMiss,
            tag = %tag,
            name = raw,
            "reference not resolved, storing absent handle"
        );
    }
    handle
}
