//! Global parameters for clustered lighting.
//!
//! [`LightingParams`] owns the tunables that control how world space is split
//! into light clusters, how large the shadow and cookie atlases are and which
//! optional lighting features are compiled into lit shaders. Changes that
//! affect generated shader code are reported through a callback injected at
//! construction, so the shader cache lives outside of this crate.

pub mod atlas;
pub mod error;
pub mod invalidation;
pub mod params;
pub mod settings;
pub mod shadow;

pub use atlas::{AtlasSplit, LayerId};
pub use error::LightingError;
pub use invalidation::ShaderGeneration;
pub use params::{
    ClusteredShaderOptions, LightingParams, DEFAULT_ATLAS_RESOLUTION, DEFAULT_CELLS,
    MAX_LIGHTS_PER_CELL, MIN_ATLAS_RESOLUTION,
};
pub use settings::RenderSettings;
pub use shadow::ShadowType;
