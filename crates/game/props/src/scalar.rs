//! Single-valued properties.

use std::fmt;

use crate::convert::convert;
use crate::error::PropertyError;
use crate::handle::PropertyType;
use crate::resolve::Resolver;
use crate::value::Value;

/// Observer invoked after a successful write with the previous value and a
/// reference to the value now stored.
pub type ChangeCallback<T> = Box<dyn FnMut(T, &T)>;

/// A named field holding one value of type `T`.
///
/// Writes are all-or-nothing: either the value is replaced and the observer
/// runs exactly once, or the write fails and nothing changes. The observer
/// runs before the setter returns, after the value is replaced. It receives
/// the old value and borrows the new one, since the scalar itself is still
/// mutably borrowed while it runs.
pub struct Scalar<T: PropertyType> {
    value: T,
    on_change: Option<ChangeCallback<T>>,
}

impl<T: PropertyType> Scalar<T> {
    /// Creates a property holding `value`. Every scalar starts with a default.
    pub fn new(value: T) -> Self {
        Self {
            value,
            on_change: None,
        }
    }

    /// Returns the current value.
    #[inline]
    pub fn get(&self) -> &T {
        &self.value
    }

    /// Replaces the value and notifies the observer.
    pub fn set(&mut self, value: T) {
        let old = std::mem::replace(&mut self.value, value);
        if let Some(callback) = self.on_change.as_mut() {
            callback(old, &self.value);
        }
    }

    /// Registers the change observer, replacing any previous one.
    pub fn on_change(&mut self, callback: impl FnMut(T, &T) + 'static) {
        self.on_change = Some(Box::new(callback));
    }

    /// Builder form of [`Scalar::on_change`].
    #[must_use]
    pub fn with_observer(mut self, callback: impl FnMut(T, &T) + 'static) -> Self {
        self.on_change(callback);
        self
    }

    /// Returns true if a change observer is registered.
    pub fn has_observer(&self) -> bool {
        self.on_change.is_some()
    }

    /// Converts `text` with `T`'s tag and stores the result.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError::Conversion`] and leaves the value untouched
    /// when `text` does not parse.
    pub fn set_from_string(
        &mut self,
        text: &str,
        resolver: &dyn Resolver,
    ) -> Result<(), PropertyError> {
        let value = convert(T::TAG, text, resolver)?;
        self.assign(value)
    }

    /// Stores a tagged value.
    ///
    /// Text is routed through [`Scalar::set_from_string`]; a value of the
    /// right kind is stored as-is; other primitives go through
    /// [`Value::coerce`].
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError::TypeMismatch`] when the value cannot be
    /// coerced, or the conversion error for unparsable text. The stored value
    /// is unchanged in both cases.
    pub fn set_from_value(
        &mut self,
        value: Value,
        resolver: &dyn Resolver,
    ) -> Result<(), PropertyError> {
        if let Value::String(text) = value {
            return self.set_from_string(&text, resolver);
        }

        let got = value.tag();
        let coerced = value.coerce(T::TAG).ok_or(PropertyError::TypeMismatch {
            expected: T::TAG,
            got,
        })?;
        self.assign(coerced)
    }

    fn assign(&mut self, value: Value) -> Result<(), PropertyError> {
        let got = value.tag();
        let typed = T::from_value(value).ok_or(PropertyError::TypeMismatch {
            expected: T::TAG,
            got,
        })?;
        self.set(typed);
        Ok(())
    }
}

impl<T: PropertyType> Clone for Scalar<T> {
    /// Copies the value. Observers stay with the source and are not cloned.
    fn clone(&self) -> Self {
        Self::new(self.value.clone())
    }
}

impl<T: PropertyType> Default for Scalar<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: PropertyType> fmt::Debug for Scalar<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scalar")
            .field("value", &self.value)
            .field("observed", &self.on_change.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::error::ConversionError;
    use crate::resolve::NullResolver;
    use crate::tag::TypeTag;

    fn recorded<T: PropertyType>(scalar: &mut Scalar<T>) -> Rc<RefCell<Vec<T>>> {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&calls);
        scalar.on_change(move |old, _| sink.borrow_mut().push(old));
        calls
    }

    #[test]
    fn set_from_string_notifies_once_with_old_value() {
        let mut prop = Scalar::new(5);
        let calls = recorded(&mut prop);

        prop.set_from_string("9", &NullResolver).unwrap();

        assert_eq!(*prop.get(), 9);
        assert_eq!(*calls.borrow(), vec![5]);
    }

    #[test]
    fn failed_conversion_leaves_value_and_skips_observer() {
        let mut prop = Scalar::new(5);
        let calls = recorded(&mut prop);

        let err = prop.set_from_string("not-a-number", &NullResolver).unwrap_err();

        assert_eq!(
            err,
            PropertyError::Conversion(ConversionError::Malformed {
                tag: TypeTag::Int,
                raw: "not-a-number".into(),
            })
        );
        assert_eq!(*prop.get(), 5);
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn set_from_value_matches_coerces_or_redirects() {
        let mut prop = Scalar::new(100.0_f32);

        prop.set_from_value(Value::Float(80.0), &NullResolver).unwrap();
        assert_eq!(*prop.get(), 80.0);

        prop.set_from_value(Value::Int(60), &NullResolver).unwrap();
        assert_eq!(*prop.get(), 60.0);

        prop.set_from_value(Value::from("42.5"), &NullResolver).unwrap();
        assert_eq!(*prop.get(), 42.5);
    }

    #[test]
    fn float_to_int_rounds_half_to_even() {
        let mut prop = Scalar::new(0);

        prop.set_from_value(Value::Float(2.5), &NullResolver).unwrap();
        assert_eq!(*prop.get(), 2);

        prop.set_from_value(Value::Float(3.5), &NullResolver).unwrap();
        assert_eq!(*prop.get(), 4);
    }

    #[test]
    fn set_from_value_rejects_incompatible_kinds() {
        let mut prop = Scalar::new(1.0_f32);
        let calls = recorded(&mut prop);

        let err = prop
            .set_from_value(Value::Texture(None), &NullResolver)
            .unwrap_err();

        assert_eq!(
            err,
            PropertyError::TypeMismatch {
                expected: TypeTag::Float,
                got: TypeTag::TextureRef,
            }
        );
        assert_eq!(*prop.get(), 1.0);
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn observer_receives_previous_text() {
        let shared = Rc::new(RefCell::new(Scalar::new(String::from("person"))));
        let seen = Rc::new(RefCell::new(None));

        let sink = Rc::clone(&seen);
        shared
            .borrow_mut()
            .on_change(move |old: String, _: &String| *sink.borrow_mut() = Some(old));
        shared
            .borrow_mut()
            .set_from_string("droid", &NullResolver)
            .unwrap();

        assert_eq!(seen.borrow().as_deref(), Some("person"));
        assert_eq!(shared.borrow().get(), "droid");
    }

    #[test]
    fn observer_sees_old_and_new_value_of_a_shared_scalar() {
        let shared = Rc::new(RefCell::new(Scalar::new(5)));
        let seen = Rc::new(RefCell::new(Vec::new()));

        let sink = Rc::clone(&seen);
        shared
            .borrow_mut()
            .on_change(move |old, new: &i32| sink.borrow_mut().push((old, *new)));
        shared
            .borrow_mut()
            .set_from_string("9", &NullResolver)
            .unwrap();
        shared.borrow_mut().set(12);

        assert_eq!(*seen.borrow(), vec![(5, 9), (9, 12)]);
        assert_eq!(*shared.borrow().get(), 12);
    }

    #[test]
    fn clone_drops_observer() {
        let mut prop = Scalar::new(true);
        let _calls = recorded(&mut prop);

        let copy = prop.clone();

        assert!(prop.has_observer());
        assert!(!copy.has_observer());
        assert!(*copy.get());
    }
}
