//! Multi-value properties.
//!
//! Some properties are declared several times in the same class hierarchy and
//! every declaration counts. A control zone, for example, lists one ambient
//! sound per faction:
//!
//! ```text
//! AmbientSound = "all com_blg_commandpost_goodie defer"
//! AmbientSound = "cis com_blg_commandpost_baddie defer"
//! AmbientSound = "imp com_blg_commandpost_baddie defer"
//! AmbientSound = "rep com_blg_commandpost_goodie defer"
//! ```
//!
//! [`MultiProp`] keeps one row per declaration, in declaration order. Rows are
//! never overwritten.

use tracing::warn;

use crate::convert::convert;
use crate::error::PropertyError;
use crate::handle::PropertyType;
use crate::resolve::Resolver;
use crate::tag::TypeTag;
use crate::value::Value;

/// Ordered rows of fixed-arity tuples.
///
/// Slot `i` of every row holds a value tagged `slot_types[i]`.
#[derive(Clone, Debug, PartialEq)]
pub struct MultiProp {
    slot_types: Box<[TypeTag]>,
    rows: Vec<Box<[Value]>>,
}

/// What happened while appending one row.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AppendReport {
    /// Number of declared slots.
    pub expected: usize,
    /// Number of non-empty tokens in the input.
    pub got: usize,
    /// Slots whose token failed to convert and were left at their default.
    pub failed_slots: Vec<usize>,
}

impl AppendReport {
    /// Tokens beyond the declared slots, dropped.
    pub fn surplus(&self) -> usize {
        self.got.saturating_sub(self.expected)
    }

    /// Slots with no token, left at their default.
    pub fn missing(&self) -> usize {
        self.expected.saturating_sub(self.got)
    }

    /// True when every slot was filled from a well-formed token.
    pub fn is_clean(&self) -> bool {
        self.got == self.expected && self.failed_slots.is_empty()
    }

    /// The arity problem as an error, if there was one.
    pub fn arity_error(&self) -> Option<PropertyError> {
        (self.got != self.expected).then_some(PropertyError::Arity {
            expected: self.expected,
            got: self.got,
        })
    }
}

impl MultiProp {
    /// Creates an empty property with a fixed slot layout.
    pub fn new(slot_types: impl Into<Vec<TypeTag>>) -> Self {
        Self {
            slot_types: slot_types.into().into_boxed_slice(),
            rows: Vec::new(),
        }
    }

    /// Declared slot layout.
    pub fn slot_types(&self) -> &[TypeTag] {
        &self.slot_types
    }

    /// Number of slots per row.
    pub fn arity(&self) -> usize {
        self.slot_types.len()
    }

    /// Parses one declaration and appends it as a new row.
    ///
    /// Tokens are separated by whitespace. Surplus tokens are dropped, missing
    /// ones and tokens that fail to convert leave their slot at
    /// [`Value::default_for`] its tag. The row is appended in every case;
    /// problems are logged and returned in the report.
    pub fn append_from_string(&mut self, text: &str, resolver: &dyn Resolver) -> AppendReport {
        let tokens: Vec<&str> = text.split_whitespace().collect();
        let mut report = AppendReport {
            expected: self.arity(),
            got: tokens.len(),
            failed_slots: Vec::new(),
        };

        if report.surplus() > 0 {
            warn!(
                target: "props::multi",
                expected = report.expected,
                got = report.got,
                "encountered more property args than expected, ignoring surplus"
            );
        } else if report.missing() > 0 {
            warn!(
                target: "props::multi",
                expected = report.expected,
                got = report.got,
                "encountered fewer property args than expected, leaving slots at default"
            );
        }

        let mut row = Vec::with_capacity(self.slot_types.len());
        for (slot, &tag) in self.slot_types.iter().enumerate() {
            let value = match tokens.get(slot) {
                Some(token) => match convert(tag, token, resolver) {
                    Ok(value) => value,
                    Err(err) => {
                        warn!(
                            target: "props::multi",
                            slot,
                            token = *token,
                            tag = %tag,
                            error = %err,
                            "property arg does not match expected arg type"
                        );
                        report.failed_slots.push(slot);
                        Value::default_for(tag)
                    }
                },
                None => Value::default_for(tag),
            };
            row.push(value);
        }

        self.rows.push(row.into_boxed_slice());
        report
    }

    /// Slot `slot` of the first row as `T`.
    ///
    /// Returns `T::default()` when there are no rows, the slot does not exist,
    /// or it holds a different type.
    pub fn first<T: PropertyType>(&self, slot: usize) -> T {
        self.get(0, slot).unwrap_or_default()
    }

    /// Slot `slot` of row `row` as `T`, if present and of that type.
    pub fn get<T: PropertyType>(&self, row: usize, slot: usize) -> Option<T> {
        self.rows
            .get(row)
            .and_then(|values| values.get(slot))
            .cloned()
            .and_then(T::from_value)
    }

    /// All rows in declaration order.
    pub fn rows(&self) -> &[Box<[Value]>] {
        &self.rows
    }

    /// Row `index`, if present.
    pub fn row(&self, index: usize) -> Option<&[Value]> {
        self.rows.get(index).map(|row| &row[..])
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if nothing was declared.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Removes every row, keeping the slot layout.
    pub fn clear(&mut self) {
        self.rows.clear();
    }
}
