//! Error types shared across the Pestis workspace.
//!
//! Construction-time failures (malformed density grids, out-of-range
//! disease parameters) and telemetry write failures. Recoverable
//! conditions inside the engine (out-of-bounds seeding, empty candidate
//! sets, zero-population cells) are handled by policy and never appear
//! here.

use std::error::Error;
use std::fmt;
use std::io;

/// Errors from constructing a [`DensityGrid`](crate::DensityGrid).
#[derive(Clone, Debug, PartialEq)]
pub enum GridError {
    /// Width or height is zero.
    EmptyDimensions {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },
    /// The value buffer does not hold `width * height` cells.
    LengthMismatch {
        /// `width * height`.
        expected: usize,
        /// Length of the supplied buffer.
        actual: usize,
    },
    /// Rows supplied to `from_rows` do not all have the same length.
    RaggedRows {
        /// Index of the first offending row.
        row: usize,
        /// Length of row 0.
        expected: usize,
        /// Length of the offending row.
        actual: usize,
    },
    /// A cell holds a negative population.
    NegativePopulation {
        /// Row-major index of the cell.
        index: usize,
        /// The offending value.
        value: f64,
    },
    /// A cell holds NaN or an infinity.
    NonFinite {
        /// Row-major index of the cell.
        index: usize,
    },
    /// Width or height does not fit the coordinate type.
    DimensionTooLarge {
        /// The offending dimension.
        value: usize,
    },
    /// A row band is empty or runs past the last row.
    BandOutOfRange {
        /// First row of the band.
        start_row: u32,
        /// One past the last row of the band.
        end_row: u32,
        /// Rows in the grid.
        height: u32,
    },
    /// A row band is not as wide as the grid it is written into.
    BandWidthMismatch {
        /// Width of the grid.
        expected: u32,
        /// Width of the band.
        actual: u32,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyDimensions { width, height } => {
                write!(f, "density grid must be non-empty, got {width}x{height}")
            }
            Self::LengthMismatch { expected, actual } => {
                write!(f, "density grid expected {expected} cells, got {actual}")
            }
            Self::RaggedRows {
                row,
                expected,
                actual,
            } => write!(
                f,
                "density grid row {row} has {actual} cells, expected {expected}"
            ),
            Self::NegativePopulation { index, value } => {
                write!(f, "negative population {value} at cell {index}")
            }
            Self::NonFinite { index } => write!(f, "non-finite population at cell {index}"),
            Self::DimensionTooLarge { value } => {
                write!(f, "grid dimension {value} exceeds u32::MAX")
            }
            Self::BandOutOfRange {
                start_row,
                end_row,
                height,
            } => write!(
                f,
                "row band {start_row}..{end_row} does not fit a grid of {height} rows"
            ),
            Self::BandWidthMismatch { expected, actual } => {
                write!(f, "row band is {actual} cells wide, grid is {expected}")
            }
        }
    }
}

impl Error for GridError {}

/// A disease parameter is outside its valid range.
#[derive(Clone, Debug, PartialEq)]
pub struct ProfileError {
    /// Name of the disease profile.
    pub disease: String,
    /// Name of the offending parameter.
    pub parameter: &'static str,
    /// The offending value.
    pub value: f64,
    /// What the parameter must satisfy.
    pub requirement: &'static str,
}

impl fmt::Display for ProfileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "disease '{}': {} = {} (must be {})",
            self.disease, self.parameter, self.value, self.requirement
        )
    }
}

impl Error for ProfileError {}

/// Errors from a [`TelemetrySink`](crate::TelemetrySink).
#[derive(Debug)]
pub enum SinkError {
    /// The underlying writer failed.
    Io(io::Error),
    /// The record could not be encoded.
    Encode {
        /// Human-readable description of the failure.
        detail: String,
    },
}

impl fmt::Display for SinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "telemetry I/O error: {e}"),
            Self::Encode { detail } => write!(f, "telemetry encode error: {detail}"),
        }
    }
}

impl Error for SinkError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Encode { .. } => None,
        }
    }
}

impl From<io::Error> for SinkError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}
