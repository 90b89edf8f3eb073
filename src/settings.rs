use anyhow::{anyhow, Context, Result};
use glam::UVec3;
use roxmltree::{Document, Node};
use serde::{Deserialize, Serialize};

use crate::shadow::ShadowType;

/// Lighting fields of a loaded render configuration.
///
/// Every field is optional; [`crate::LightingParams::apply_settings`] only
/// touches the ones that are present. Keys follow the camelCase names used
/// by exported render settings, unknown keys are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lighting_shadows_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lighting_cookies_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lighting_area_lights_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lighting_shadow_atlas_resolution: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lighting_cookie_atlas_resolution: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lighting_max_lights_per_cell: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lighting_shadow_type: Option<ShadowType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lighting_cells: Option<UVec3>,
}

impl RenderSettings {
    /// Parses a JSON render settings object.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("invalid render settings JSON")
    }

    /// Parses render settings XML, one child element per setting:
    ///
    /// ```xml
    /// <render>
    ///     <lightingShadowType>pcf5</lightingShadowType>
    ///     <lightingCells>16 4 16</lightingCells>
    /// </render>
    /// ```
    pub fn from_xml(xml: &str) -> Result<Self> {
        let document = Document::parse(xml).context("invalid render settings XML")?;
        let root = document.root_element();

        Ok(Self {
            lighting_shadows_enabled: parse_bool(optional_text(&root, "lightingShadowsEnabled"))
                .context("lightingShadowsEnabled")?,
            lighting_cookies_enabled: parse_bool(optional_text(&root, "lightingCookiesEnabled"))
                .context("lightingCookiesEnabled")?,
            lighting_area_lights_enabled: parse_bool(optional_text(
                &root,
                "lightingAreaLightsEnabled",
            ))
            .context("lightingAreaLightsEnabled")?,
            lighting_shadow_atlas_resolution: parse_u32(optional_text(
                &root,
                "lightingShadowAtlasResolution",
            ))
            .context("lightingShadowAtlasResolution")?,
            lighting_cookie_atlas_resolution: parse_u32(optional_text(
                &root,
                "lightingCookieAtlasResolution",
            ))
            .context("lightingCookieAtlasResolution")?,
            lighting_max_lights_per_cell: parse_u32(optional_text(
                &root,
                "lightingMaxLightsPerCell",
            ))
            .context("lightingMaxLightsPerCell")?,
            lighting_shadow_type: optional_text(&root, "lightingShadowType")
                .map(|value| value.parse::<ShadowType>())
                .transpose()
                .context("lightingShadowType")?,
            lighting_cells: parse_uvec3(optional_text(&root, "lightingCells"))
                .context("lightingCells")?,
        })
    }
}

fn optional_text(node: &Node<'_, '_>, tag: &str) -> Option<String> {
    node.children()
        .find(|child| child.has_tag_name(tag))
        .and_then(|child| child.text())
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(|text| text.to_string())
}

fn parse_bool(value: Option<String>) -> Result<Option<bool>> {
    let Some(value) = value else {
        return Ok(None);
    };
    match value.as_str() {
        "true" | "1" => Ok(Some(true)),
        "false" | "0" => Ok(Some(false)),
        other => Err(anyhow!("expected a boolean, found `{other}`")),
    }
}

fn parse_u32(value: Option<String>) -> Result<Option<u32>> {
    value
        .map(|value| {
            value
                .parse::<u32>()
                .map_err(|err| anyhow!("failed to parse integer `{value}`: {err}"))
        })
        .transpose()
}

fn parse_uvec3(value: Option<String>) -> Result<Option<UVec3>> {
    let Some(value) = value else {
        return Ok(None);
    };
    let components = value
        .split_whitespace()
        .map(|component| {
            component
                .parse::<u32>()
                .map_err(|err| anyhow!("failed to parse vector component `{component}`: {err}"))
        })
        .collect::<Result<Vec<_>>>()?;
    match components.as_slice() {
        [x, y, z] => Ok(Some(UVec3::new(*x, *y, *z))),
        _ => Err(anyhow!(
            "vector needs 3 components, found {}",
            components.len()
        )),
    }
}

#[cfg(test)]
mod tests {
    use once_cell::sync::Lazy;

    use super::*;

    static FULL_XML: Lazy<String> = Lazy::new(|| {
        r#"
        <render>
            <lightingShadowsEnabled>false</lightingShadowsEnabled>
            <lightingCookiesEnabled>1</lightingCookiesEnabled>
            <lightingAreaLightsEnabled>true</lightingAreaLightsEnabled>
            <lightingShadowAtlasResolution>1024</lightingShadowAtlasResolution>
            <lightingCookieAtlasResolution>512</lightingCookieAtlasResolution>
            <lightingMaxLightsPerCell>32</lightingMaxLightsPerCell>
            <lightingShadowType>pcf5</lightingShadowType>
            <lightingCells>16 4 16</lightingCells>
        </render>
        "#
        .to_string()
    });

    fn full_settings() -> RenderSettings {
        RenderSettings {
            lighting_shadows_enabled: Some(false),
            lighting_cookies_enabled: Some(true),
            lighting_area_lights_enabled: Some(true),
            lighting_shadow_atlas_resolution: Some(1024),
            lighting_cookie_atlas_resolution: Some(512),
            lighting_max_lights_per_cell: Some(32),
            lighting_shadow_type: Some(ShadowType::Pcf5),
            lighting_cells: Some(UVec3::new(16, 4, 16)),
        }
    }

    #[test]
    fn parse_xml_populates_every_field() {
        let settings = RenderSettings::from_xml(&FULL_XML).unwrap();
        assert_eq!(settings, full_settings());
    }

    #[test]
    fn parse_json_uses_camel_case_keys() {
        let json = r#"{
            "lightingShadowsEnabled": false,
            "lightingCookiesEnabled": true,
            "lightingAreaLightsEnabled": true,
            "lightingShadowAtlasResolution": 1024,
            "lightingCookieAtlasResolution": 512,
            "lightingMaxLightsPerCell": 32,
            "lightingShadowType": 4,
            "lightingCells": [16, 4, 16],
            "gammaCorrection": 1
        }"#;
        let settings = RenderSettings::from_json(json).unwrap();
        assert_eq!(settings, full_settings());
    }

    #[test]
    fn missing_fields_stay_unset() {
        let xml = "<render><lightingCells>1 2 3</lightingCells></render>";
        let settings = RenderSettings::from_xml(xml).unwrap();
        assert_eq!(settings.lighting_cells, Some(UVec3::new(1, 2, 3)));
        assert!(settings.lighting_shadow_type.is_none());
        assert!(settings.lighting_max_lights_per_cell.is_none());

        let settings = RenderSettings::from_json("{}").unwrap();
        assert_eq!(settings, RenderSettings::default());
    }

    #[test]
    fn unknown_shadow_type_is_an_error() {
        let xml = "<render><lightingShadowType>vsm8</lightingShadowType></render>";
        assert!(RenderSettings::from_xml(xml).is_err());
        assert!(RenderSettings::from_json(r#"{"lightingShadowType": 1}"#).is_err());
    }

    #[test]
    fn malformed_values_are_errors() {
        let short_vector = "<render><lightingCells>4 4</lightingCells></render>";
        assert!(RenderSettings::from_xml(short_vector).is_err());
        assert!(RenderSettings::from_xml(
            "<render><lightingShadowsEnabled>maybe</lightingShadowsEnabled></render>"
        )
        .is_err());
        assert!(RenderSettings::from_xml("<render>").is_err());
    }
}
