//! Property handles and the scalar type mapping.
//!
//! A registry stores [`PropertyHandle`]s: one closed enum covering every
//! scalar destination type plus the multi-value and section containers.
//! [`PropertyType`] ties a Rust type to its [`TypeTag`] and to the handle
//! variant that stores it, which is what makes typed lookup possible without
//! any runtime type inspection.

use std::fmt;

use crate::error::PropertyError;
use crate::multi::MultiProp;
use crate::resolve::{AudioRef, ClassRef, PathRef, RegionRef, Resolver, TextureRef};
use crate::scalar::Scalar;
use crate::section::PropertySection;
use crate::tag::TypeTag;
use crate::value::{Color, Value};

/// A Rust type that can back a [`Scalar`] property.
///
/// Implemented for `bool`, `i32`, `f32`, `String`, [`Color`] and
/// `Option<_>` of each reference handle.
pub trait PropertyType: Clone + Default + fmt::Debug + Sized + 'static {
    /// Conversion rule used for this type.
    const TAG: TypeTag;

    /// Extracts `Self` from a value of the matching variant.
    fn from_value(value: Value) -> Option<Self>;

    /// Wraps `self` in its value variant.
    fn into_value(self) -> Value;

    /// Borrows the scalar if `handle` stores this type.
    fn scalar(handle: &PropertyHandle) -> Option<&Scalar<Self>>;

    /// Mutably borrows the scalar if `handle` stores this type.
    fn scalar_mut(handle: &mut PropertyHandle) -> Option<&mut Scalar<Self>>;

    /// Wraps a scalar in its handle variant.
    fn into_handle(scalar: Scalar<Self>) -> PropertyHandle;
}

macro_rules! property_type {
    ($ty:ty, $tag:ident, $variant:ident) => {
        impl PropertyType for $ty {
            const TAG: TypeTag = TypeTag::$tag;

            fn from_value(value: Value) -> Option<Self> {
                match value {
                    Value::$variant(v) => Some(v),
                    _ => None,
                }
            }

            fn into_value(self) -> Value {
                Value::$variant(self)
            }

            fn scalar(handle: &PropertyHandle) -> Option<&Scalar<Self>> {
                match handle {
                    PropertyHandle::$variant(s) => Some(s),
                    _ => None,
                }
            }

            fn scalar_mut(handle: &mut PropertyHandle) -> Option<&mut Scalar<Self>> {
                match handle {
                    PropertyHandle::$variant(s) => Some(s),
                    _ => None,
                }
            }

            fn into_handle(scalar: Scalar<Self>) -> PropertyHandle {
                PropertyHandle::$variant(scalar)
            }
        }
    };
}

property_type!(bool, Bool, Bool);
property_type!(i32, Int, Int);
property_type!(f32, Float, Float);
property_type!(String, String, String);
property_type!(Color, Color, Color);
property_type!(Option<ClassRef>, ClassRef, Class);
property_type!(Option<RegionRef>, RegionRef, Region);
property_type!(Option<PathRef>, PathRef, Path);
property_type!(Option<TextureRef>, TextureRef, Texture);
property_type!(Option<AudioRef>, AudioRef, Audio);

/// A registered property of any kind.
#[derive(Clone, Debug)]
pub enum PropertyHandle {
    Bool(Scalar<bool>),
    Int(Scalar<i32>),
    Float(Scalar<f32>),
    String(Scalar<String>),
    Color(Scalar<Color>),
    Class(Scalar<Option<ClassRef>>),
    Region(Scalar<Option<RegionRef>>),
    Path(Scalar<Option<PathRef>>),
    Texture(Scalar<Option<TextureRef>>),
    Audio(Scalar<Option<AudioRef>>),
    /// Repeated property accumulating one row per occurrence.
    Multi(MultiProp),
    /// Repeated group of named properties.
    Section(PropertySection),
}

/// Runs `$body` with `$s` bound to the scalar of any scalar variant.
macro_rules! with_scalar {
    ($handle:expr, |$s:ident| $body:expr, $($rest:pat => $other:expr),+ $(,)?) => {
        match $handle {
            PropertyHandle::Bool($s) => $body,
            PropertyHandle::Int($s) => $body,
            PropertyHandle::Float($s) => $body,
            PropertyHandle::String($s) => $body,
            PropertyHandle::Color($s) => $body,
            PropertyHandle::Class($s) => $body,
            PropertyHandle::Region($s) => $body,
            PropertyHandle::Path($s) => $body,
            PropertyHandle::Texture($s) => $body,
            PropertyHandle::Audio($s) => $body,
            $($rest => $other),+
        }
    };
}

impl PropertyHandle {
    /// Scalar property with a default value.
    pub fn scalar<T: PropertyType>(default: T) -> Self {
        T::into_handle(Scalar::new(default))
    }

    /// Multi-value property with the given slot layout.
    pub fn multi(slot_types: impl Into<Vec<TypeTag>>) -> Self {
        Self::Multi(MultiProp::new(slot_types))
    }

    /// Scalar tag, or `None` for multi-value and section handles.
    pub fn tag(&self) -> Option<TypeTag> {
        with_scalar!(self, |s| Some(scalar_tag(s)),
            Self::Multi(_) | Self::Section(_) => None,
        )
    }

    /// Returns true for single-valued handles.
    pub fn is_scalar(&self) -> bool {
        self.tag().is_some()
    }

    /// Current scalar value as a [`Value`], or `None` for containers.
    pub fn value(&self) -> Option<Value> {
        with_scalar!(self, |s| Some(s.get().clone().into_value()),
            Self::Multi(_) | Self::Section(_) => None,
        )
    }

    /// Applies one raw string to the handle.
    ///
    /// Scalars convert and replace. A multi-value property appends a row
    /// (arity problems are logged, never returned). A section starts a new
    /// entry; the text itself is ignored.
    pub fn set_from_string(
        &mut self,
        text: &str,
        resolver: &dyn Resolver,
    ) -> Result<(), PropertyError> {
        with_scalar!(self, |s| s.set_from_string(text, resolver),
            Self::Multi(m) => {
                m.append_from_string(text, resolver);
                Ok(())
            },
            Self::Section(section) => {
                section.begin_entry();
                Ok(())
            },
        )
    }

    /// Applies a tagged value to the handle.
    ///
    /// Containers only accept text, which is forwarded to
    /// [`PropertyHandle::set_from_string`].
    pub fn set_from_value(
        &mut self,
        value: Value,
        resolver: &dyn Resolver,
    ) -> Result<(), PropertyError> {
        with_scalar!(self, |s| s.set_from_value(value, resolver),
            Self::Multi(_) | Self::Section(_) => match value {
                Value::String(text) => self.set_from_string(&text, resolver),
                other => Err(PropertyError::TypeMismatch {
                    expected: TypeTag::String,
                    got: other.tag(),
                }),
            },
        )
    }
}

fn scalar_tag<T: PropertyType>(_: &Scalar<T>) -> TypeTag {
    T::TAG
}

impl<T: PropertyType> From<Scalar<T>> for PropertyHandle {
    fn from(scalar: Scalar<T>) -> Self {
        T::into_handle(scalar)
    }
}

impl From<MultiProp> for PropertyHandle {
    fn from(multi: MultiProp) -> Self {
        Self::Multi(multi)
    }
}

impl From<PropertySection> for PropertyHandle {
    fn from(section: PropertySection) -> Self {
        Self::Section(section)
    }
}

impl fmt::Display for PropertyHandle {
    /// Writes the scalar's content encoding, or a summary for containers.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        with_scalar!(self, |s| write!(f, "{}", s.get().clone().into_value()),
            Self::Multi(m) => write!(f, "[{} rows]", m.len()),
            Self::Section(section) => write!(f, "[{} entries]", section.len()),
        )
    }
}
