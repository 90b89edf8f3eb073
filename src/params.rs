use std::fmt;

use glam::UVec3;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::atlas::{AtlasSplit, LayerId};
use crate::error::LightingError;
use crate::settings::RenderSettings;
use crate::shadow::ShadowType;

/// Smallest atlas resolution, in texels, the renderer can work with.
pub const MIN_ATLAS_RESOLUTION: u32 = 32;
pub const DEFAULT_ATLAS_RESOLUTION: u32 = 2048;
pub const MAX_LIGHTS_PER_CELL: u32 = 255;
pub const DEFAULT_CELLS: UVec3 = UVec3::new(10, 3, 10);

type InvalidateFn = Box<dyn FnMut() + Send>;

/// Global parameters of the clustered lighting pipeline.
///
/// Changing a field that feeds into generated lit shaders (shadows, shadow
/// type, cookies, area lights) calls the invalidation callback supplied at
/// construction. Writing the value already stored does nothing. Resolution
/// and count fields saturate into their valid ranges instead of failing.
pub struct LightingParams {
    supports_area_lights: bool,
    max_texture_size: u32,
    on_invalidate: InvalidateFn,

    cells: UVec3,
    max_lights_per_cell: u32,

    shadows_enabled: bool,
    shadow_type: ShadowType,
    shadow_atlas_resolution: u32,

    cookies_enabled: bool,
    cookie_atlas_resolution: u32,

    area_lights_enabled: bool,

    atlas_split: Option<AtlasSplit>,
    debug_layer: Option<LayerId>,
}

/// The subset of lighting parameters that lit shader generation depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusteredShaderOptions {
    pub shadows_enabled: bool,
    pub shadow_type: ShadowType,
    pub cookies_enabled: bool,
    pub area_lights_enabled: bool,
}

impl LightingParams {
    /// Creates parameters for a device with the given capabilities.
    pub fn new<F>(
        supports_area_lights: bool,
        max_texture_size: u32,
        on_invalidate: F,
    ) -> Result<Self, LightingError>
    where
        F: FnMut() + Send + 'static,
    {
        if max_texture_size < MIN_ATLAS_RESOLUTION {
            return Err(LightingError::InvalidArgument { max_texture_size });
        }
        Ok(Self {
            supports_area_lights,
            max_texture_size,
            on_invalidate: Box::new(on_invalidate),
            cells: DEFAULT_CELLS,
            max_lights_per_cell: MAX_LIGHTS_PER_CELL,
            shadows_enabled: true,
            shadow_type: ShadowType::Pcf3,
            shadow_atlas_resolution: DEFAULT_ATLAS_RESOLUTION,
            cookies_enabled: false,
            cookie_atlas_resolution: DEFAULT_ATLAS_RESOLUTION,
            area_lights_enabled: false,
            atlas_split: None,
            debug_layer: None,
        })
    }

    /// Copies every field present in `settings` through its setter.
    pub fn apply_settings(&mut self, settings: &RenderSettings) {
        if let Some(enabled) = settings.lighting_shadows_enabled {
            self.set_shadows_enabled(enabled);
        }
        if let Some(enabled) = settings.lighting_cookies_enabled {
            self.set_cookies_enabled(enabled);
        }
        if let Some(enabled) = settings.lighting_area_lights_enabled {
            self.set_area_lights_enabled(enabled);
        }
        if let Some(resolution) = settings.lighting_shadow_atlas_resolution {
            self.set_shadow_atlas_resolution(resolution);
        }
        if let Some(resolution) = settings.lighting_cookie_atlas_resolution {
            self.set_cookie_atlas_resolution(resolution);
        }
        if let Some(count) = settings.lighting_max_lights_per_cell {
            self.set_max_lights_per_cell(count);
        }
        if let Some(shadow_type) = settings.lighting_shadow_type {
            self.set_shadow_type(shadow_type);
        }
        if let Some(cells) = settings.lighting_cells {
            self.set_cells(cells);
        }
    }

    pub fn supports_area_lights(&self) -> bool {
        self.supports_area_lights
    }

    pub fn max_texture_size(&self) -> u32 {
        self.max_texture_size
    }

    /// Number of cells along each world axis. Components are at least 1.
    pub fn cells(&self) -> UVec3 {
        self.cells
    }

    pub fn set_cells(&mut self, cells: UVec3) {
        self.cells = cells.max(UVec3::ONE);
    }

    pub fn max_lights_per_cell(&self) -> u32 {
        self.max_lights_per_cell
    }

    pub fn set_max_lights_per_cell(&mut self, count: u32) {
        self.max_lights_per_cell = count.clamp(1, MAX_LIGHTS_PER_CELL);
    }

    pub fn shadows_enabled(&self) -> bool {
        self.shadows_enabled
    }

    pub fn set_shadows_enabled(&mut self, enabled: bool) {
        if self.shadows_enabled != enabled {
            self.shadows_enabled = enabled;
            self.invalidate("shadows_enabled");
        }
    }

    pub fn shadow_type(&self) -> ShadowType {
        self.shadow_type
    }

    pub fn set_shadow_type(&mut self, shadow_type: ShadowType) {
        if self.shadow_type != shadow_type {
            self.shadow_type = shadow_type;
            self.invalidate("shadow_type");
        }
    }

    pub fn shadow_atlas_resolution(&self) -> u32 {
        self.shadow_atlas_resolution
    }

    pub fn set_shadow_atlas_resolution(&mut self, resolution: u32) {
        self.shadow_atlas_resolution = self.clamp_resolution(resolution);
    }

    pub fn cookies_enabled(&self) -> bool {
        self.cookies_enabled
    }

    pub fn set_cookies_enabled(&mut self, enabled: bool) {
        if self.cookies_enabled != enabled {
            self.cookies_enabled = enabled;
            self.invalidate("cookies_enabled");
        }
    }

    pub fn cookie_atlas_resolution(&self) -> u32 {
        self.cookie_atlas_resolution
    }

    pub fn set_cookie_atlas_resolution(&mut self, resolution: u32) {
        self.cookie_atlas_resolution = self.clamp_resolution(resolution);
    }

    pub fn area_lights_enabled(&self) -> bool {
        self.area_lights_enabled
    }

    /// Requests area light support. Always stays disabled on devices that
    /// cannot render area lights.
    pub fn set_area_lights_enabled(&mut self, enabled: bool) {
        if enabled && !self.supports_area_lights {
            debug!("area lights requested but not supported by the device");
        }
        let enabled = enabled && self.supports_area_lights;
        if self.area_lights_enabled != enabled {
            self.area_lights_enabled = enabled;
            self.invalidate("area_lights_enabled");
        }
    }

    pub fn atlas_split(&self) -> Option<&AtlasSplit> {
        self.atlas_split.as_ref()
    }

    /// `None` selects the automatic per-frame split.
    pub fn set_atlas_split(&mut self, split: Option<AtlasSplit>) {
        self.atlas_split = split;
    }

    pub fn debug_layer(&self) -> Option<LayerId> {
        self.debug_layer
    }

    pub fn set_debug_layer(&mut self, layer: Option<LayerId>) {
        self.debug_layer = layer;
    }

    pub fn shader_options(&self) -> ClusteredShaderOptions {
        ClusteredShaderOptions {
            shadows_enabled: self.shadows_enabled,
            shadow_type: self.shadow_type,
            cookies_enabled: self.cookies_enabled,
            area_lights_enabled: self.area_lights_enabled,
        }
    }

    fn clamp_resolution(&self, resolution: u32) -> u32 {
        resolution.clamp(MIN_ATLAS_RESOLUTION, self.max_texture_size)
    }

    fn invalidate(&mut self, field: &str) {
        debug!("lighting parameter `{field}` changed, invalidating lit shaders");
        (self.on_invalidate)();
    }
}

impl fmt::Debug for LightingParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LightingParams")
            .field("supports_area_lights", &self.supports_area_lights)
            .field("max_texture_size", &self.max_texture_size)
            .field("cells", &self.cells)
            .field("max_lights_per_cell", &self.max_lights_per_cell)
            .field("shadows_enabled", &self.shadows_enabled)
            .field("shadow_type", &self.shadow_type)
            .field("shadow_atlas_resolution", &self.shadow_atlas_resolution)
            .field("cookies_enabled", &self.cookies_enabled)
            .field("cookie_atlas_resolution", &self.cookie_atlas_resolution)
            .field("area_lights_enabled", &self.area_lights_enabled)
            .field("atlas_split", &self.atlas_split)
            .field("debug_layer", &self.debug_layer)
            .finish_non_exhaustive()
    }
}
