//! Scene loading for the reference host.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use log::info;
use loot_data::SceneDef;

use crate::sim::SimWorld;

/// Read a `SceneDef` from a RON file.
pub fn load_scene_def(path: &Path) -> Result<SceneDef> {
    let text = fs::read_to_string(path).with_context(|| format!("reading scene from '{}'", path.display()))?;
    ron::from_str(&text).with_context(|| format!("parsing scene RON from '{}'", path.display()))
}

/// Load, validate and build a [`SimWorld`] from a RON scene file.
///
/// # Errors
/// Errors bubble up from file IO and deserialization; validation failures
/// are reported together in a single error.
pub fn load_scene(path: &Path) -> Result<SimWorld> {
    let scene = load_scene_def(path).context("while loading scene from file")?;
    validate(&scene)?;
    info!(
        "scene '{}' loaded: {} forms, {} references",
        path.display(),
        scene.forms.len(),
        scene.refs.len()
    );
    Ok(SimWorld::from_scene(scene))
}

fn validate(scene: &SceneDef) -> Result<()> {
    let errors = loot_data::validate_scene(scene);
    if errors.is_empty() {
        return Ok(());
    }
    let details = errors
        .into_iter()
        .map(|err| format!("- {err}"))
        .collect::<Vec<_>>()
        .join("\n");
    bail!("scene validation failed:\n{details}");
}
