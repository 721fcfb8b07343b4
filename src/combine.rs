//! Combining two series over the union of their timestamps.

use std::ops::{Add, BitOr, Div, Mul, Sub};

use log::trace;

use crate::series::Series;
use crate::time::Time;

/// Elementwise arithmetic applied when combining series
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Add,
    Subtract,
    Multiply,
    /// Division by zero yields `0.0`, never an error or infinity
    Divide,
}

impl Op {
    #[inline]
    #[must_use]
    pub fn apply(self, lhs: f64, rhs: f64) -> f64 {
        match self {
            Self::Add => lhs + rhs,
            Self::Subtract => lhs - rhs,
            Self::Multiply => lhs * rhs,
            Self::Divide => {
                if rhs == 0.0 {
                    0.0
                } else {
                    lhs / rhs
                }
            }
        }
    }
}

/// Sorted, deduplicated union of two ascending time lists
pub(crate) fn union_times<T: Time>(a: &[T], b: &[T]) -> Vec<T> {
    let mut out = Vec::with_capacity(a.len() + b.len());
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        if a[i] < b[j] {
            out.push(a[i]);
            i += 1;
        } else if b[j] < a[i] {
            out.push(b[j]);
            j += 1;
        } else {
            out.push(a[i]);
            i += 1;
            j += 1;
        }
    }
    out.extend_from_slice(&a[i..]);
    out.extend_from_slice(&b[j..]);
    out
}

/// Union of two ascending point lists where `right` wins on equal times
pub(crate) fn merge_points<T: Time, V: Clone>(left: (&[T], &[V]), right: (&[T], &[V])) -> (Vec<T>, Vec<V>) {
    let ((lt, lv), (rt, rv)) = (left, right);
    let mut times = Vec::with_capacity(lt.len() + rt.len());
    let mut values = Vec::with_capacity(lt.len() + rt.len());
    let (mut i, mut j) = (0, 0);
    while i < lt.len() || j < rt.len() {
        let take_left = j >= rt.len() || (i < lt.len() && lt[i] < rt[j]);
        if take_left {
            times.push(lt[i]);
            values.push(lv[i].clone());
            i += 1;
        } else {
            if i < lt.len() && lt[i] == rt[j] {
                i += 1;
            }
            times.push(rt[j]);
            values.push(rv[j].clone());
            j += 1;
        }
    }
    (times, values)
}

impl<T: Time> Series<T> {
    /// Apply `op` pointwise over the union of both series' times
    ///
    /// Each side is sampled with its own point query (hold, interpolation and
    /// boundary rules included). The result takes the left configuration.
    #[must_use]
    pub fn combine(&self, other: &Self, op: Op) -> Self {
        let times = union_times(self.times(), other.times());
        let values = times.iter().map(|&t| op.apply(self.at(t), other.at(t))).collect();
        trace!("{op:?} over {} + {} points -> {}", self.len(), other.len(), times.len());
        self.derive(times, values)
    }

    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn add(&self, other: &Self) -> Self {
        self.combine(other, Op::Add)
    }

    #[must_use]
    pub fn subtract(&self, other: &Self) -> Self {
        self.combine(other, Op::Subtract)
    }

    #[must_use]
    pub fn multiply(&self, other: &Self) -> Self {
        self.combine(other, Op::Multiply)
    }

    /// Pointwise quotient; a zero denominator gives `0.0`
    #[must_use]
    pub fn divide(&self, other: &Self) -> Self {
        self.combine(other, Op::Divide)
    }

    /// Structural union: recorded values of `other` win where both series
    /// have a time, recorded values of `self` fill the rest
    #[must_use]
    pub fn merge(&self, other: &Self) -> Self {
        let (times, values) = merge_points(self.to_lists(), other.to_lists());
        self.derive(times, values)
    }
}

/// Operator impls for owned and borrowed operands, all delegating to the named method
macro_rules! impl_binary_ops {
    ($ty:ident; $($trait:ident :: $method:ident => $call:ident),* $(,)?) => {
        $(
            impl<T: Time> $trait<&$ty<T>> for &$ty<T> {
                type Output = $ty<T>;

                fn $method(self, rhs: &$ty<T>) -> $ty<T> {
                    $ty::$call(self, rhs)
                }
            }

            impl<T: Time> $trait<$ty<T>> for $ty<T> {
                type Output = $ty<T>;

                fn $method(self, rhs: $ty<T>) -> $ty<T> {
                    $ty::$call(&self, &rhs)
                }
            }

            impl<T: Time> $trait<&$ty<T>> for $ty<T> {
                type Output = $ty<T>;

                fn $method(self, rhs: &$ty<T>) -> $ty<T> {
                    $ty::$call(&self, rhs)
                }
            }
        )*
    };
}

pub(crate) use impl_binary_ops;

impl_binary_ops!(
    Series;
    Add::add => add,
    Sub::sub => subtract,
    Mul::mul => multiply,
    Div::div => divide,
    BitOr::bitor => merge,
);
