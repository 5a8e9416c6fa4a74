use crate::error::{Error, Result};

// standard library
use std::cmp::Ordering;

/// Extends functionality for slices of float arrays
///
/// Coordinate axes are stored as plain slices of grid line positions, so most
/// of the interesting lookups live here rather than on any particular type.
pub trait SliceExt<T> {
    /// Find the minimum value in float arrays
    ///
    /// Only provides the minimum value from a collection of valid numbers. Any
    /// NAN values, infinite values, or empty slices will return an error.
    ///
    /// ```rust
    /// # use layerview_utils::SliceExt;
    /// # use layerview_utils::Error;
    /// // Successful cases
    /// assert_eq!([1.1_f64, 0.5, 2.2].try_min(), Ok(0.5));
    /// assert_eq!([1.1_f64, f64::MIN, 2.2].try_min(), Ok(f64::MIN));
    ///
    /// // Error cases
    /// assert_eq!([1.1_f64, f64::NAN, 2.2].try_min(), Err(Error::SliceContainsUndefinedValues));
    /// assert_eq!(Vec::<f64>::new().try_min(), Err(Error::SliceContainsNoValues));
    /// ```
    ///
    /// Uses `total_cmp` so that an ordering always exists, even though the
    /// float primitives do not implement `Ord`.
    fn try_min(&self) -> Result<T>;

    /// Find the maximum value in float arrays
    ///
    /// Only provides the maximum value from a collection of valid numbers. Any
    /// NAN values, infinite values, or empty slices will return an error.
    ///
    /// ```rust
    /// # use layerview_utils::SliceExt;
    /// # use layerview_utils::Error;
    /// // Successful cases
    /// assert_eq!([1.1_f64, 0.5, 2.2].try_max(), Ok(2.2));
    ///
    /// // Error cases
    /// assert_eq!([1.1_f64, f64::INFINITY, 2.2].try_max(), Err(Error::SliceContainsUndefinedValues));
    /// assert_eq!(Vec::<f64>::new().try_max(), Err(Error::SliceContainsNoValues));
    /// ```
    fn try_max(&self) -> Result<T>;

    /// Check every value is strictly greater than the one before it
    ///
    /// Returns the index of the first value that breaks the ordering, if any.
    ///
    /// ```rust
    /// # use layerview_utils::SliceExt;
    /// assert_eq!([0.0_f64, 1.0, 2.5].first_unordered(), None);
    /// assert_eq!([0.0_f64, 1.0, 1.0].first_unordered(), Some(2));
    /// assert_eq!([0.0_f64, f64::NAN].first_unordered(), Some(1));
    /// ```
    fn first_unordered(&self) -> Option<usize>;

    /// Find how many grid lines to keep for a coordinate `value`
    ///
    /// Bisects the ascending slice with a half-open `[lo, hi)` bracket that
    /// starts at `[0, len)`:
    ///
    /// ```text
    ///     hi - lo == 1       => hi
    ///     value == axis[mid] => mid + 1
    ///     value  > axis[mid] => lo = mid
    ///     otherwise          => hi = mid
    /// ```
    ///
    /// The result is a count rather than a position, so it is always in
    /// `1..=len` and can be used directly as the exclusive end of a range.
    /// Values outside the axis are not an error and saturate at either end.
    ///
    /// Note that an exact hit returns one past the matching index, while a
    /// value between grid lines returns the index of the upper line. The two
    /// disagree by one, and existing plots depend on it.
    ///
    /// ```rust
    /// # use layerview_utils::SliceExt;
    /// let axis = vec![10.0_f64, 20.0, 30.0, 40.0];
    ///
    /// // Exact hits are one past the matching index
    /// assert_eq!(axis.find_truncation_index(30.0), Ok(3));
    /// assert_eq!(axis.find_truncation_index(40.0), Ok(4));
    ///
    /// // Values between grid lines
    /// assert_eq!(axis.find_truncation_index(25.0), Ok(2));
    ///
    /// // Saturation outside of the axis
    /// assert_eq!(axis.find_truncation_index(-5.0), Ok(1));
    /// assert_eq!(axis.find_truncation_index(99.0), Ok(4));
    ///
    /// // Nothing to search
    /// assert!(Vec::<f64>::new().find_truncation_index(1.0).is_err());
    /// ```
    fn find_truncation_index(&self, value: T) -> Result<usize>;
}

impl SliceExt<f64> for [f64] {
    fn try_min(&self) -> Result<f64> {
        if self.iter().any(|v| !v.is_finite()) {
            return Err(Error::SliceContainsUndefinedValues);
        };

        if let Some(v) = self.iter().min_by(|a, b| a.total_cmp(b)).copied() {
            Ok(v)
        } else {
            Err(Error::SliceContainsNoValues)
        }
    }

    fn try_max(&self) -> Result<f64> {
        if self.iter().any(|v| !v.is_finite()) {
            return Err(Error::SliceContainsUndefinedValues);
        };

        if let Some(v) = self.iter().max_by(|a, b| a.total_cmp(b)).copied() {
            Ok(v)
        } else {
            Err(Error::SliceContainsNoValues)
        }
    }

    fn first_unordered(&self) -> Option<usize> {
        self.windows(2)
            .position(|pair| pair[1].partial_cmp(&pair[0]) != Some(Ordering::Greater))
            .map(|i| i + 1)
    }

    fn find_truncation_index(&self, value: f64) -> Result<usize> {
        // need at least one grid line for the result to be in 1..=len
        if self.is_empty() {
            return Err(Error::BelowMinimumSliceLength {
                length: 0,
                minimum_required: 1,
            });
        }

        let mut lo = 0;
        let mut hi = self.len();

        loop {
            if hi - lo == 1 {
                return Ok(hi);
            }

            let mid = (hi + lo) / 2;
            if value == self[mid] {
                return Ok(mid + 1);
            } else if value > self[mid] {
                lo = mid;
            } else {
                hi = mid;
            }
        }
    }
}
