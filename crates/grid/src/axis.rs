//! Module for coordinate axis data and implementations

// crate modules
use crate::error::{Error, Result};

// layerview modules
use layerview_utils::{f, SliceExt, ValueExt};

/// The three spatial dimensions of a model
///
/// Parsing is forgiving about case and accepts the `<name>_axis` spelling used
/// by slider callbacks, so `"x"`, `"X"`, and `"x_axis"` are all [AxisName::X].
///
/// ```rust
/// # use layerview_grid::AxisName;
/// assert_eq!("x".parse::<AxisName>().unwrap(), AxisName::X);
/// assert_eq!("Z_axis".parse::<AxisName>().unwrap(), AxisName::Z);
/// assert!("theta".parse::<AxisName>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AxisName {
    /// Horizontal x direction
    X,
    /// Horizontal y direction
    Y,
    /// Vertical z direction (depth)
    Z,
}

impl AxisName {
    /// All axes in source order
    pub const ALL: [AxisName; 3] = [AxisName::X, AxisName::Y, AxisName::Z];

    /// Key of the axis in the `output_axes` object, e.g. `x_ax`
    pub const fn json_key(&self) -> &'static str {
        match self {
            Self::X => "x_ax",
            Self::Y => "y_ax",
            Self::Z => "z_ax",
        }
    }
}

impl std::str::FromStr for AxisName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let lower = s.trim().to_lowercase();
        match lower.strip_suffix("_axis").unwrap_or(&lower) {
            "x" => Ok(Self::X),
            "y" => Ok(Self::Y),
            "z" => Ok(Self::Z),
            _ => Err(Error::UnknownAxis(s.to_string())),
        }
    }
}

impl std::fmt::Display for AxisName {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::X => write!(f, "x"),
            Self::Y => write!(f, "y"),
            Self::Z => write!(f, "z"),
        }
    }
}

/// Physical coordinates of the grid lines along one dimension
///
/// Values are expected to be strictly increasing. Model files written by the
/// generator store either one value per layer or the full set of layer edges,
/// so an axis may be one longer than the grid dimension it labels.
///
/// ```rust
/// # use layerview_grid::Axis;
/// let axis = Axis::from(vec![0.0, 50.0, 100.0]);
/// assert_eq!(axis.len(), 3);
/// assert_eq!(axis.bounds(), Some((0.0, 100.0)));
/// assert!(axis.is_strictly_increasing());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Axis {
    values: Vec<f64>,
}

impl Axis {
    /// Build an axis, checking that values are strictly increasing
    pub fn try_new(name: AxisName, values: Vec<f64>) -> Result<Self> {
        if let Some(index) = values.first_unordered() {
            return Err(Error::AxisNotIncreasing { axis: name, index });
        }
        Ok(Self { values })
    }

    /// Coordinate values as a slice
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of grid lines
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// No coordinates at all
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Coordinate of the first grid line
    pub fn first(&self) -> Option<f64> {
        self.values.first().copied()
    }

    /// Coordinate of the last grid line
    pub fn last(&self) -> Option<f64> {
        self.values.last().copied()
    }

    /// The (first, last) coordinates, used for labelling plot bounds
    pub fn bounds(&self) -> Option<(f64, f64)> {
        Some((self.first()?, self.last()?))
    }

    /// True if every value is greater than the one before it
    pub fn is_strictly_increasing(&self) -> bool {
        self.values.first_unordered().is_none()
    }

    /// Number of grid lines to keep for a physical coordinate `value`
    ///
    /// See [SliceExt::find_truncation_index] for the exact search rules. The
    /// result is always in `1..=len` and out of range values saturate.
    ///
    /// ```rust
    /// # use layerview_grid::Axis;
    /// let axis = Axis::from(vec![10.0, 20.0, 30.0, 40.0]);
    /// assert_eq!(axis.find_truncation_index(30.0).unwrap(), 3);
    /// assert_eq!(axis.find_truncation_index(25.0).unwrap(), 2);
    /// assert_eq!(axis.find_truncation_index(10.0).unwrap(), 1);
    /// assert_eq!(axis.find_truncation_index(40.0).unwrap(), 4);
    /// ```
    pub fn find_truncation_index(&self, value: f64) -> Result<usize> {
        Ok(self.values.find_truncation_index(value)?)
    }

    /// Check the axis can label a grid dimension of `extent` cells
    ///
    /// Either one coordinate per cell or one per cell edge is accepted.
    pub(crate) fn check_extent(&self, name: AxisName, extent: usize) -> Result<()> {
        if self.len() == extent || self.len() == extent + 1 {
            Ok(())
        } else {
            Err(Error::AxisLengthMismatch {
                axis: name,
                expected: extent,
                found: self.len(),
            })
        }
    }
}

impl From<Vec<f64>> for Axis {
    fn from(values: Vec<f64>) -> Self {
        Self { values }
    }
}

impl std::fmt::Display for Axis {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        let range = match self.bounds() {
            Some((lo, hi)) => f!("{} to {}", lo.sci(3, 2), hi.sci(3, 2)),
            None => "empty".to_string(),
        };
        write!(fmt, "{} values, {}", self.len(), range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axis_name_parsing() {
        assert_eq!("y".parse::<AxisName>().unwrap(), AxisName::Y);
        assert_eq!(" Y ".parse::<AxisName>().unwrap(), AxisName::Y);
        assert_eq!("y_axis".parse::<AxisName>().unwrap(), AxisName::Y);
        assert!(matches!(
            "w_axis".parse::<AxisName>(),
            Err(Error::UnknownAxis(name)) if name == "w_axis"
        ));
    }

    #[test]
    fn try_new_rejects_unordered() {
        let result = Axis::try_new(AxisName::Z, vec![1.0, 2.0, 2.0, 3.0]);
        assert!(matches!(
            result,
            Err(Error::AxisNotIncreasing {
                axis: AxisName::Z,
                index: 2
            })
        ));
        assert!(Axis::try_new(AxisName::Z, vec![1.0, 2.0, 3.0]).is_ok());
    }

    #[test]
    fn extent_check() {
        let axis = Axis::from(vec![0.0, 1.0, 2.0]);
        assert!(axis.check_extent(AxisName::X, 3).is_ok());
        assert!(axis.check_extent(AxisName::X, 2).is_ok());
        assert!(axis.check_extent(AxisName::X, 4).is_err());
        assert!(axis.check_extent(AxisName::X, 1).is_err());
    }

    #[test]
    fn display_summary() {
        let axis = Axis::from(vec![0.0, 250.0]);
        assert_eq!(axis.to_string(), "2 values, 0.000e+00 to 2.500e+02");
        assert_eq!(Axis::default().to_string(), "0 values, empty");
    }
}
