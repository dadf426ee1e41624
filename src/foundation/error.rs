/// Convenience result type used across Framecraft.
pub type FramecraftResult<T> = Result<T, FramecraftError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Every user-triggered variant is recoverable: the controller reports it via
/// the notification interface and leaves the editor fully usable for a retry.
#[derive(thiserror::Error, Debug)]
pub enum FramecraftError {
    /// Uploaded file declared a MIME type outside the allow-list.
    #[error("unsupported image format: {0}")]
    UnsupportedFormat(String),

    /// Uploaded file exceeds the configured byte ceiling.
    #[error("file is {size} bytes, limit is {limit} bytes")]
    FileTooLarge {
        /// Declared byte length of the upload.
        size: u64,
        /// Configured ceiling.
        limit: u64,
    },

    /// Upload bytes are not a decodable image.
    #[error("image decode failed: {0}")]
    DecodeFailure(String),

    /// Decoded bitmap is smaller than the configured minimum edge.
    #[error("image is {width}x{height} px, minimum edge is {min} px")]
    DimensionTooSmall {
        /// Decoded bitmap width in pixels.
        width: u32,
        /// Decoded bitmap height in pixels.
        height: u32,
        /// Configured minimum edge length.
        min: u32,
    },

    /// Invalid construction or configuration data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FramecraftError {
    /// Build a [`FramecraftError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`FramecraftError::DecodeFailure`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::DecodeFailure(msg.into())
    }

    /// True for variants meant to be shown to the shopper verbatim.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedFormat(_)
                | Self::FileTooLarge { .. }
                | Self::DecodeFailure(_)
                | Self::DimensionTooSmall { .. }
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
