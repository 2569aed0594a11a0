//! Destination type tags.
//!
//! Every property slot declares one [`TypeTag`]. The tag selects exactly one
//! conversion rule in [`crate::convert`], so adding a destination type means
//! adding a variant here and a match arm there.

/// Closed set of value kinds the conversion engine understands.
///
/// Tags parse case-insensitively from their snake_case names, which lets
/// content files declare multi-value slot layouts as text (`"string float"`).
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum TypeTag {
    /// `"1"` is true, everything else false.
    Bool,
    /// 32-bit signed integer.
    Int,
    /// 32-bit float.
    Float,
    /// Raw text, unchanged.
    String,
    /// `"r g b"` or `"r g b a"` in 0..255.
    Color,
    /// Entity class looked up by name.
    ClassRef,
    /// Scene region looked up by name.
    RegionRef,
    /// Scene path looked up by name.
    PathRef,
    /// Texture imported by name.
    TextureRef,
    /// Audio clip loaded by name.
    AudioRef,
}

impl TypeTag {
    /// Returns true for tags whose values are resolved through a [`crate::Resolver`].
    pub const fn is_reference(&self) -> bool {
        matches!(
            self,
            Self::ClassRef | Self::RegionRef | Self::PathRef | Self::TextureRef | Self::AudioRef
        )
    }

    /// Iterates over every tag in declaration order.
    pub fn all() -> impl Iterator<Item = TypeTag> {
        <Self as strum::IntoEnumIterator>::iter()
    }
}
