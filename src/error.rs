use thiserror::Error;

use crate::params::MIN_ATLAS_RESOLUTION;

/// Errors raised while constructing lighting parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LightingError {
    #[error(
        "invalid argument: max texture size {max_texture_size} is below the {} texel atlas minimum",
        MIN_ATLAS_RESOLUTION
    )]
    InvalidArgument { max_texture_size: u32 },
}
