use super::{OrderError, OrderKind};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;

/// A numeric order value.
///
/// The reconciler only needs zero, one, unit increments and a total order,
/// so every supported column type can be driven through this trait.
pub trait OrderIndex:
    Copy + fmt::Debug + fmt::Display + PartialEq + PartialOrd + Serialize + DeserializeOwned + Send + Sync + 'static
{
    const ZERO: Self;
    const ONE: Self;
    const KIND: OrderKind;

    /// `self + 1`, or `None` when the result is not representable or no
    /// longer distinct from `self`.
    fn checked_add_one(self) -> Option<Self>;

    /// Total order used for sets and maps of order values.
    fn order_cmp(&self, other: &Self) -> Ordering;

    /// Convert a requested (floating point) position into this type.
    fn from_requested(value: f64) -> Result<Self, OrderError>;

    fn is_zero(self) -> bool {
        self.order_cmp(&Self::ZERO) == Ordering::Equal
    }
}

/// Largest magnitude (exclusive on the positive side) representable as `i64`.
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

/// Round half to even and check the result lies in `[min, max]`.
fn round_into_range(value: f64, min: f64, max: f64, target: OrderKind) -> Result<f64, OrderError> {
    let rounded = value.round_ties_even();
    if rounded.is_finite() && rounded >= min && rounded <= max {
        Ok(rounded)
    } else {
        Err(OrderError::InvalidOrderValue {
            value,
            target: target.to_string(),
        })
    }
}

impl OrderIndex for i32 {
    const ZERO: Self = 0;
    const ONE: Self = 1;
    const KIND: OrderKind = OrderKind::Int32;

    fn checked_add_one(self) -> Option<Self> {
        self.checked_add(1)
    }

    fn order_cmp(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }

    #[allow(clippy::cast_possible_truncation)]
    fn from_requested(value: f64) -> Result<Self, OrderError> {
        let rounded = round_into_range(value, f64::from(i32::MIN), f64::from(i32::MAX), Self::KIND)?;
        Ok(rounded as i32)
    }
}

impl OrderIndex for i64 {
    const ZERO: Self = 0;
    const ONE: Self = 1;
    const KIND: OrderKind = OrderKind::Int64;

    fn checked_add_one(self) -> Option<Self> {
        self.checked_add(1)
    }

    fn order_cmp(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }

    #[allow(clippy::cast_possible_truncation)]
    fn from_requested(value: f64) -> Result<Self, OrderError> {
        let rounded = round_into_range(value, -I64_BOUND, I64_BOUND, Self::KIND)?;
        if rounded >= I64_BOUND {
            return Err(OrderError::InvalidOrderValue {
                value,
                target: Self::KIND.to_string(),
            });
        }
        Ok(rounded as i64)
    }
}

/// `-0.0` and `0.0` are the same order value.
fn unsigned_zero_f32(value: f32) -> f32 {
    if value == 0.0 {
        0.0
    } else {
        value
    }
}

fn unsigned_zero_f64(value: f64) -> f64 {
    if value == 0.0 {
        0.0
    } else {
        value
    }
}

impl OrderIndex for f32 {
    const ZERO: Self = 0.0;
    const ONE: Self = 1.0;
    const KIND: OrderKind = OrderKind::Float32;

    #[allow(clippy::arithmetic_side_effects)]
    fn checked_add_one(self) -> Option<Self> {
        let next = self + 1.0;
        (next.is_finite() && next > self).then_some(next)
    }

    fn order_cmp(&self, other: &Self) -> Ordering {
        unsigned_zero_f32(*self).total_cmp(&unsigned_zero_f32(*other))
    }

    #[allow(clippy::cast_possible_truncation)]
    fn from_requested(value: f64) -> Result<Self, OrderError> {
        let narrowed = value as f32;
        if narrowed.is_finite() {
            Ok(unsigned_zero_f32(narrowed))
        } else {
            Err(OrderError::InvalidOrderValue {
                value,
                target: Self::KIND.to_string(),
            })
        }
    }
}

impl OrderIndex for f64 {
    const ZERO: Self = 0.0;
    const ONE: Self = 1.0;
    const KIND: OrderKind = OrderKind::Float64;

    #[allow(clippy::arithmetic_side_effects)]
    fn checked_add_one(self) -> Option<Self> {
        let next = self + 1.0;
        (next.is_finite() && next > self).then_some(next)
    }

    fn order_cmp(&self, other: &Self) -> Ordering {
        unsigned_zero_f64(*self).total_cmp(&unsigned_zero_f64(*other))
    }

    fn from_requested(value: f64) -> Result<Self, OrderError> {
        if value.is_finite() {
            Ok(unsigned_zero_f64(value))
        } else {
            Err(OrderError::InvalidOrderValue {
                value,
                target: Self::KIND.to_string(),
            })
        }
    }
}

/// Wrapper giving any [`OrderIndex`] a total `Ord`, so order values can key
/// `BTreeSet`s and `BTreeMap`s regardless of representation.
#[derive(Debug, Clone, Copy)]
pub struct Ordinal<T>(pub T);

impl<T: OrderIndex> PartialEq for Ordinal<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0.order_cmp(&other.0) == Ordering::Equal
    }
}

impl<T: OrderIndex> Eq for Ordinal<T> {}

impl<T: OrderIndex> PartialOrd for Ordinal<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: OrderIndex> Ord for Ordinal<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.order_cmp(&other.0)
    }
}
