//! Scalar-or-pair argument resolution.
//!
//! Shape, offset and relative-offset arguments across the crate accept either
//! a single value (applied to both axes) or an explicit `(row, col)` pair.
//! The union is resolved once at the API boundary into a canonical pair so
//! downstream code never re-checks argument arity.

use serde::{Deserialize, Serialize};

/// A per-axis argument given either as one value for both axes or as an
/// explicit `(row, col)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ScalarOrPair<T> {
    Scalar(T),
    Pair(T, T),
}

impl<T: Copy> ScalarOrPair<T> {
    /// Canonical `(row, col)` form.
    pub fn resolve(self) -> (T, T) {
        match self {
            Self::Scalar(v) => (v, v),
            Self::Pair(r, c) => (r, c),
        }
    }
}

macro_rules! scalar_or_pair_from {
    ($($t:ty),*) => {
        $(
            impl From<$t> for ScalarOrPair<$t> {
                fn from(v: $t) -> Self {
                    Self::Scalar(v)
                }
            }

            impl From<($t, $t)> for ScalarOrPair<$t> {
                fn from((r, c): ($t, $t)) -> Self {
                    Self::Pair(r, c)
                }
            }

            impl From<[$t; 2]> for ScalarOrPair<$t> {
                fn from([r, c]: [$t; 2]) -> Self {
                    Self::Pair(r, c)
                }
            }
        )*
    };
}

scalar_or_pair_from!(usize, i64, f64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_broadcasts_to_both_axes() {
        let e: ScalarOrPair<usize> = 5.into();
        assert_eq!(e.resolve(), (5, 5));
    }

    #[test]
    fn pair_resolves_in_row_col_order() {
        let e: ScalarOrPair<i64> = (-2i64, 3i64).into();
        assert_eq!(e.resolve(), (-2, 3));
    }

    #[test]
    fn array_form_matches_tuple_form() {
        let a: ScalarOrPair<f64> = [0.5, -1.0].into();
        let b: ScalarOrPair<f64> = (0.5, -1.0).into();
        assert_eq!(a.resolve(), b.resolve());
    }
}
