//! Baseline population density grid.
//!
//! The density grid is supplied by an external provider (typically a
//! rasterisation of city populations) and is immutable once built. All
//! validation happens here so that the engine can never be constructed
//! over a malformed grid.

use crate::error::GridError;
use crate::id::CellCoord;

/// A `width x height` raster of non-negative baseline populations.
///
/// Stored row-major: cell `(x, y)` lives at `y * width + x`.
///
/// # Examples
///
/// ```
/// use pestis_core::DensityGrid;
///
/// let grid = DensityGrid::from_rows(vec![
///     vec![0.0, 10.0],
///     vec![5.0, 0.0],
/// ]).unwrap();
/// assert_eq!(grid.width(), 2);
/// assert_eq!(grid.population_at(1, 0), Some(10.0));
/// assert_eq!(grid.total(), 15.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct DensityGrid {
    width: u32,
    height: u32,
    values: Vec<f64>,
}

impl DensityGrid {
    /// Build a grid from a row-major buffer.
    ///
    /// # Errors
    ///
    /// Fails if either dimension is zero, the buffer length is not
    /// `width * height`, or any value is negative or non-finite.
    pub fn new(width: u32, height: u32, values: Vec<f64>) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::EmptyDimensions { width, height });
        }
        let expected = width as usize * height as usize;
        if values.len() != expected {
            return Err(GridError::LengthMismatch {
                expected,
                actual: values.len(),
            });
        }
        for (index, &value) in values.iter().enumerate() {
            if !value.is_finite() {
                return Err(GridError::NonFinite { index });
            }
            if value < 0.0 {
                return Err(GridError::NegativePopulation { index, value });
            }
        }
        Ok(Self {
            width,
            height,
            values,
        })
    }

    /// Build a grid from a list of equally long rows.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, GridError> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        for (row, r) in rows.iter().enumerate() {
            if r.len() != width {
                return Err(GridError::RaggedRows {
                    row,
                    expected: width,
                    actual: r.len(),
                });
            }
        }
        let width_u32 =
            u32::try_from(width).map_err(|_| GridError::DimensionTooLarge { value: width })?;
        let height_u32 =
            u32::try_from(height).map_err(|_| GridError::DimensionTooLarge { value: height })?;
        Self::new(width_u32, height_u32, rows.into_iter().flatten().collect())
    }

    /// An all-zero grid with a handful of populated cells.
    pub fn from_cells(
        width: u32,
        height: u32,
        cells: impl IntoIterator<Item = (CellCoord, f64)>,
    ) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::EmptyDimensions { width, height });
        }
        let mut values = vec![0.0; width as usize * height as usize];
        for (coord, pop) in cells {
            if coord.x < width && coord.y < height {
                values[coord.index(width)] += pop;
            }
        }
        Self::new(width, height, values)
    }

    /// Number of columns.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        self.values.len()
    }

    /// Row-major baseline populations.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Baseline population at `(x, y)`, or `None` if out of bounds.
    pub fn population_at(&self, x: u32, y: u32) -> Option<f64> {
        if x < self.width && y < self.height {
            Some(self.values[CellCoord::new(x, y).index(self.width)])
        } else {
            None
        }
    }

    /// Sum of all baseline populations.
    pub fn total(&self) -> f64 {
        self.values.iter().sum()
    }

    /// Coordinates of every cell whose baseline population exceeds
    /// `threshold`, in row-major order.
    pub fn cells_above(&self, threshold: f64) -> Vec<CellCoord> {
        self.values
            .iter()
            .enumerate()
            .filter(|&(_, &v)| v > threshold)
            .map(|(i, _)| CellCoord::from_index(i, self.width))
            .collect()
    }
}
