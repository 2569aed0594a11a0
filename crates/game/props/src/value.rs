//! Tagged property values.
//!
//! [`Value`] is the untyped currency of the engine: conversions produce it,
//! multi-value rows store it, and `set_by_name` accepts it. Each variant maps
//! to exactly one [`TypeTag`].

use std::fmt;

use crate::resolve::{AudioRef, ClassRef, PathRef, RegionRef, TextureRef};
use crate::tag::TypeTag;

/// Normalized RGBA color, each channel in `0.0..=1.0`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    /// Opaque black, the fallback for short color declarations.
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    /// Opaque white.
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from normalized channels.
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Color from 0..255 channel values, as written in content files.
    pub fn from_bytes(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self::new(r / 255.0, g / 255.0, b / 255.0, a / 255.0)
    }
}

impl fmt::Display for Color {
    /// Writes the content-file encoding: `"r g b"` when opaque, else `"r g b a"`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.r * 255.0,
            self.g * 255.0,
            self.b * 255.0
        )?;
        if self.a != 1.0 {
            write!(f, " {}", self.a * 255.0)?;
        }
        Ok(())
    }
}

/// A property value of any supported type.
///
/// Reference variants hold `None` when the resolver did not know the name.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Bool(bool),
    Int(i32),
    Float(f32),
    String(String),
    Color(Color),
    Class(Option<ClassRef>),
    Region(Option<RegionRef>),
    Path(Option<PathRef>),
    Texture(Option<TextureRef>),
    Audio(Option<AudioRef>),
}

impl Value {
    /// Returns the tag of this value's variant.
    pub const fn tag(&self) -> TypeTag {
        match self {
            Self::Bool(_) => TypeTag::Bool,
            Self::Int(_) => TypeTag::Int,
            Self::Float(_) => TypeTag::Float,
            Self::String(_) => TypeTag::String,
            Self::Color(_) => TypeTag::Color,
            Self::Class(_) => TypeTag::ClassRef,
            Self::Region(_) => TypeTag::RegionRef,
            Self::Path(_) => TypeTag::PathRef,
            Self::Texture(_) => TypeTag::TextureRef,
            Self::Audio(_) => TypeTag::AudioRef,
        }
    }

    /// Zero value for a tag: `false`, `0`, `0.0`, empty text, transparent
    /// black, or an absent reference.
    pub fn default_for(tag: TypeTag) -> Value {
        match tag {
            TypeTag::Bool => Self::Bool(false),
            TypeTag::Int => Self::Int(0),
            TypeTag::Float => Self::Float(0.0),
            TypeTag::String => Self::String(String::new()),
            TypeTag::Color => Self::Color(Color::default()),
            TypeTag::ClassRef => Self::Class(None),
            TypeTag::RegionRef => Self::Region(None),
            TypeTag::PathRef => Self::Path(None),
            TypeTag::TextureRef => Self::Texture(None),
            TypeTag::AudioRef => Self::Audio(None),
        }
    }

    /// Converts between primitive kinds without going through text.
    ///
    /// - same tag: unchanged
    /// - `Int` <-> `Float` (floats round half to even, must fit in `i32`)
    /// - `Bool` -> `Int`/`Float` as `1`/`0`, numbers -> `Bool` as `!= 0`
    /// - any primitive -> `String` using its content-file encoding
    ///
    /// References and text never coerce; text goes through
    /// [`crate::convert`] instead.
    pub fn coerce(self, tag: TypeTag) -> Option<Value> {
        if self.tag() == tag {
            return Some(self);
        }

        match (self, tag) {
            (Self::Int(v), TypeTag::Float) => Some(Self::Float(v as f32)),
            (Self::Float(v), TypeTag::Int) => {
                let rounded = v.round_ties_even();
                (rounded.is_finite() && rounded >= i32::MIN as f32 && rounded <= i32::MAX as f32)
                    .then(|| Self::Int(rounded as i32))
            }
            (Self::Bool(v), TypeTag::Int) => Some(Self::Int(i32::from(v))),
            (Self::Bool(v), TypeTag::Float) => Some(Self::Float(if v { 1.0 } else { 0.0 })),
            (Self::Int(v), TypeTag::Bool) => Some(Self::Bool(v != 0)),
            (Self::Float(v), TypeTag::Bool) => Some(Self::Bool(v != 0.0)),
            (
                value @ (Self::Bool(_) | Self::Int(_) | Self::Float(_) | Self::Color(_)),
                TypeTag::String,
            ) => Some(Self::String(value.to_string())),
            _ => None,
        }
    }

    /// Returns the text if this is a `String` value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    /// Writes the content-file encoding of the value.
    ///
    /// Absent references write nothing.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => f.write_str(if *v { "1" } else { "0" }),
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::String(v) => f.write_str(v),
            Self::Color(v) => write!(f, "{v}"),
            Self::Class(v) => f.write_str(v.as_ref().map_or("", |h| h.name())),
            Self::Region(v) => f.write_str(v.as_ref().map_or("", |h| h.name())),
            Self::Path(v) => f.write_str(v.as_ref().map_or("", |h| h.name())),
            Self::Texture(v) => f.write_str(v.as_ref().map_or("", |h| h.name())),
            Self::Audio(v) => f.write_str(v.as_ref().map_or("", |h| h.name())),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<Color> for Value {
    fn from(v: Color) -> Self {
        Self::Color(v)
    }
}
