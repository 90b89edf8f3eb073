use assert_cmd::prelude::*;
use predicates::str::contains;
use std::io::Write;
use std::process::Command;
use tempfile::NamedTempFile;

fn write_settings(suffix: &str, contents: &str) -> NamedTempFile {
    let mut tmp = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("temp settings");
    tmp.write_all(contents.as_bytes()).expect("write settings");
    tmp
}

#[test]
fn cli_applies_json_settings_with_clamping() {
    let settings = write_settings(
        ".json",
        r#"{
    "lightingCookieAtlasResolution": 8192,
    "lightingShadowAtlasResolution": 64,
    "lightingMaxLightsPerCell": 1000,
    "lightingCookiesEnabled": true
}"#,
    );
    let mut cmd = Command::cargo_bin("clustered-lighting").expect("binary exists");
    cmd.arg(settings.path()).arg("--max-texture-size").arg("2048");
    cmd.assert()
        .success()
        .stdout(contains("Applied settings from"))
        .stdout(contains(" - cookie_atlas_resolution = 2048"))
        .stdout(contains(" - shadow_atlas_resolution = 64"))
        .stdout(contains(" - max_lights_per_cell = 255"))
        .stdout(contains(" - cookies_enabled = true"))
        .stdout(contains("Shader invalidations: 1"));
}

#[test]
fn cli_reads_xml_and_downgrades_area_lights() {
    let settings = write_settings(
        ".xml",
        r#"<render>
  <lightingAreaLightsEnabled>true</lightingAreaLightsEnabled>
  <lightingShadowType>pcf5</lightingShadowType>
  <lightingCells>16 4 16</lightingCells>
</render>
"#,
    );
    let mut cmd = Command::cargo_bin("clustered-lighting").expect("binary exists");
    cmd.arg(settings.path()).arg("--no-area-lights");
    cmd.assert()
        .success()
        .stdout(contains(" - cells = (16, 4, 16)"))
        .stdout(contains(" - shadow_type = pcf5"))
        .stdout(contains(" - area_lights_enabled = false"))
        .stdout(contains("Shader invalidations: 1"));
}

#[test]
fn cli_rejects_texture_size_below_atlas_minimum() {
    let settings = write_settings(".json", "{}");
    let mut cmd = Command::cargo_bin("clustered-lighting").expect("binary exists");
    cmd.arg(settings.path()).arg("--max-texture-size").arg("16");
    cmd.assert()
        .failure()
        .stderr(contains("Error:"))
        .stderr(contains("max texture size 16"));
}
