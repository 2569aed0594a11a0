//! Typed, data-driven entity properties.
//!
//! Entity classes declare named, strongly-typed fields in a
//! [`PropertyRegistry`]. At load time a [`PropertyBinder`] fills them from the
//! raw text of a class override chain ([`PropertySource`]); at runtime the same
//! registry accepts tagged [`Value`]s by name. Every conversion goes through
//! [`convert`], which dispatches on the closed [`TypeTag`] set and resolves
//! references through a caller-supplied [`Resolver`].
//!
//! Nothing here fails hard on bad data: unknown names, malformed tokens and
//! arity problems are logged through `tracing` and the affected property keeps
//! its previous value.
pub mod binder;
pub mod convert;
pub mod error;
pub mod handle;
pub mod multi;
pub mod name;
pub mod registry;
pub mod resolve;
pub mod scalar;
pub mod section;
pub mod tag;
pub mod value;

pub use binder::{Assigned, BindReport, PropertyBinder, PropertySource};
pub use convert::{convert, parse_bool, parse_color, parse_float, parse_int};
pub use error::{ConversionError, ErrorKind, PropertyError};
pub use handle::{PropertyHandle, PropertyType};
pub use multi::{AppendReport, MultiProp};
pub use name::{PropKey, PropertyName};
pub use registry::PropertyRegistry;
pub use resolve::{AudioRef, ClassRef, NullResolver, PathRef, RegionRef, Resolver, TextureRef};
pub use scalar::{ChangeCallback, Scalar};
pub use section::PropertySection;
pub use tag::TypeTag;
pub use value::{Color, Value};
