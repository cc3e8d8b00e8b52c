use core::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The run lengths do not cover exactly `h * w` pixels.
    MalformedRle { expected: u64, actual: u64 },
    /// A boundary walk ran out of edges before returning to its start vertex.
    UnclosedBoundary { x: u32, y: u32 },
    /// A pixel or score buffer does not hold `h * w` elements.
    SizeMismatch { expected: usize, actual: usize },
    /// A COCO compressed counts string could not be parsed.
    InvalidCompressedCounts { offset: usize },
    /// An array dimension does not fit in `u32`.
    DimensionTooLarge { value: usize },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedRle { expected, actual } => {
                write!(f, "malformed RLE: counts sum to {actual}, expected {expected}")
            }
            Self::UnclosedBoundary { x, y } => {
                write!(f, "unclosed boundary: walk stranded at ({x}, {y})")
            }
            Self::SizeMismatch { expected, actual } => {
                write!(f, "size mismatch: expected {expected}, got {actual}")
            }
            Self::InvalidCompressedCounts { offset } => {
                write!(f, "invalid compressed counts at byte {offset}")
            }
            Self::DimensionTooLarge { value } => {
                write!(f, "dimension {value} does not fit in u32")
            }
        }
    }
}

impl std::error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;
