//! Single-line share codes for clipboard transfer of mazes.

use base64::{engine::general_purpose::STANDARD_NO_PAD, Engine as _};

use crate::{CodecError, MazeConfig, ShareCodeError};

const SHARE_DOMAIN: &str = "maze";
const SHARE_VERSION: &str = "v1";

/// Identifier prefix emitted before the encoded maze payload.
pub const SHARE_CODE_HEADER: &str = "maze:v1";
const FIELD_DELIMITER: char = ':';

/// Encodes the maze as `maze:v1:<W>x<H>:<payload>`.
pub fn encode_share_code(config: &MazeConfig) -> Result<String, ShareCodeError> {
    let json = serde_json::to_vec(config).map_err(CodecError::from)?;
    let encoded = STANDARD_NO_PAD.encode(json);
    Ok(format!(
        "{SHARE_CODE_HEADER}:{}x{}:{encoded}",
        config.width, config.height
    ))
}

/// Decodes and validates a maze from its share code.
pub fn decode_share_code(value: &str) -> Result<MazeConfig, ShareCodeError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ShareCodeError::EmptyPayload);
    }

    let mut parts = trimmed.split(FIELD_DELIMITER);
    let domain = parts.next().unwrap_or_default();
    let version = parts.next().ok_or(ShareCodeError::MissingVersion)?;
    let dimensions = parts.next().ok_or(ShareCodeError::MissingDimensions)?;
    let payload = parts.next().ok_or(ShareCodeError::MissingPayload)?;

    if domain != SHARE_DOMAIN {
        return Err(ShareCodeError::InvalidPrefix(domain.to_owned()));
    }
    if version != SHARE_VERSION {
        return Err(ShareCodeError::UnsupportedVersion(version.to_owned()));
    }

    let (header_width, header_height) = parse_dimensions(dimensions)?;
    let bytes = STANDARD_NO_PAD.decode(payload.as_bytes())?;
    let config: MazeConfig = serde_json::from_slice(&bytes).map_err(CodecError::from)?;

    if config.width != header_width || config.height != header_height {
        return Err(ShareCodeError::DimensionMismatch {
            header_width,
            header_height,
            width: config.width,
            height: config.height,
        });
    }
    config.validate()?;

    Ok(config)
}

fn parse_dimensions(dimensions: &str) -> Result<(u32, u32), ShareCodeError> {
    let invalid = || ShareCodeError::InvalidDimensions(dimensions.to_owned());
    let (columns, rows) = dimensions.split_once(['x', 'X']).ok_or_else(invalid)?;

    let columns = columns.trim().parse::<u32>().map_err(|_| invalid())?;
    let rows = rows.trim().parse::<u32>().map_err(|_| invalid())?;

    if columns == 0 || rows == 0 {
        return Err(invalid());
    }

    Ok((columns, rows))
}
