use thiserror::Error;

/// Errors raised while decoding or validating a maze descriptor.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The document was not valid JSON or lacked a required field.
    #[error("could not parse maze descriptor: {0}")]
    Json(#[from] serde_json::Error),
    /// Width or height fell outside the supported range.
    #[error("maze dimensions {width}x{height} are outside 1..={max}")]
    InvalidDimensions {
        /// Declared width.
        width: u32,
        /// Declared height.
        height: u32,
        /// Largest accepted dimension.
        max: u32,
    },
    /// A matrix row had a different length than the first row.
    #[error("matrix row {row} has {found} cells, expected {expected}")]
    RaggedMatrix {
        /// Index of the offending row.
        row: usize,
        /// Length of the first row.
        expected: usize,
        /// Length of the offending row.
        found: usize,
    },
    /// The matrix shape disagreed with the declared width and height.
    #[error("matrix is {columns}x{rows} but the descriptor declares {width}x{height}")]
    DimensionMismatch {
        /// Columns found in the matrix.
        columns: usize,
        /// Rows found in the matrix.
        rows: usize,
        /// Declared width.
        width: u32,
        /// Declared height.
        height: u32,
    },
    /// An entity was placed outside the grid.
    #[error("{entity} at ({x}, {y}) lies outside the {width}x{height} grid")]
    OutOfBounds {
        /// Kind of entity that was misplaced.
        entity: &'static str,
        /// Column of the entity.
        x: i64,
        /// Row of the entity.
        y: i64,
        /// Grid width.
        width: u32,
        /// Grid height.
        height: u32,
    },
    /// The pixel width the level should be fitted to was not positive.
    #[error("map width must be a positive number of pixels, got {0}")]
    InvalidMapWidth(f32),
}

/// Errors raised while decoding share codes.
#[derive(Debug, Error)]
pub enum ShareCodeError {
    /// The provided string was empty or contained only whitespace.
    #[error("share code was empty")]
    EmptyPayload,
    /// The code did not contain a version segment.
    #[error("share code is missing the version")]
    MissingVersion,
    /// The code did not include grid dimensions.
    #[error("share code is missing the grid dimensions")]
    MissingDimensions,
    /// The code did not include the payload segment.
    #[error("share code is missing the payload")]
    MissingPayload,
    /// The code used an unexpected prefix segment.
    #[error("share code prefix '{0}' is not supported")]
    InvalidPrefix(String),
    /// The code used an unsupported version identifier.
    #[error("share code version '{0}' is not supported")]
    UnsupportedVersion(String),
    /// The grid dimensions could not be parsed.
    #[error("could not parse grid dimensions '{0}'")]
    InvalidDimensions(String),
    /// The header dimensions disagree with the embedded descriptor.
    #[error("share code header declares {header_width}x{header_height} but the maze is {width}x{height}")]
    DimensionMismatch {
        /// Width declared in the header.
        header_width: u32,
        /// Height declared in the header.
        header_height: u32,
        /// Width of the embedded descriptor.
        width: u32,
        /// Height of the embedded descriptor.
        height: u32,
    },
    /// The base64 payload could not be decoded.
    #[error("could not decode share code payload: {0}")]
    InvalidEncoding(#[from] base64::DecodeError),
    /// The embedded descriptor could not be serialised or was malformed.
    #[error(transparent)]
    InvalidDescriptor(#[from] CodecError),
}
