//! Station module catalog and per-module lookup tables

use serde::{Deserialize, Serialize};

use crate::constants::FALLBACK_DENSITY;
use crate::material::MaterialKind;

/// Entry shown in the module library
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleCatalogEntry {
    pub id: &'static str,
    pub name: &'static str,
    /// Functional kind: basic, structural, habitat, utility, core
    pub kind: &'static str,
    pub category: &'static str,
}

/// Loader parameters for a catalog key
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModuleSpec {
    pub key: &'static str,
    pub module_name: &'static str,
    pub path: &'static str,
    /// Largest extent, in meters, the loaded model is scaled to
    pub target_size: f32,
}

const CATALOG: &[ModuleCatalogEntry] = &[
    entry("a1preset", "A1 Preset", "basic", "presets"),
    entry("a2preset", "A2 Preset", "basic", "presets"),
    entry("a3preset", "A3 Preset", "basic", "presets"),
    entry("a1light", "A1 Light Block", "structural", "blocks"),
    entry("a2long", "A2 Long Block", "structural", "blocks"),
    entry("a4medium", "A4 Medium Block", "structural", "blocks"),
    entry("biguniversal_v1", "Big Universal V1", "habitat", "modules"),
    entry("bumroof", "BUM Roof", "structural", "modules"),
    entry("sunpanels", "Solar Panels", "utility", "energy"),
    entry("mothermodule", "Mother Module", "core", "modules"),
];

const MODULE_SPECS: &[ModuleSpec] = &[
    spec("a1preset", "A1Preset", "/models/A1Preset.glb", 7.0),
    spec("a2preset", "A2Preset", "/models/A2Preset.glb", 7.0),
    spec("a3preset", "A3Preset", "/models/A3Preset.glb", 7.0),
    spec("a1light", "A1LightBlock", "/models/SS_A1Light_Block.glb", 4.0),
    spec("a2long", "A2LongBlock", "/models/SS_A2Long_Block.glb", 13.0),
    spec("a4medium", "A4MediumBlock", "/models/SS_A4Medium_Block.glb", 14.0),
    spec("biguniversal_v1", "BigUniversalV1", "/models/SS_BigUniversalModular_v1.glb", 22.0),
    spec("bumroof", "BUMRoof", "/models/SS_BUM_Roof.glb", 19.5),
    spec("sunpanels", "SunPanels", "/models/SS_SunPanels.glb", 15.0),
    spec("mothermodule", "MotherModule", "/models/SS_MotherModule.glb", 20.0),
];

/// Modules that never show the CAD dimension panel
pub const CAD_EXCLUDED_MODULES: &[&str] = &[
    "SunPanels",
    "A1Preset",
    "A2Preset",
    "A3Preset",
    "BUMRoof",
    "BigUniversalV1",
];

const fn entry(
    id: &'static str,
    name: &'static str,
    kind: &'static str,
    category: &'static str,
) -> ModuleCatalogEntry {
    ModuleCatalogEntry {
        id,
        name,
        kind,
        category,
    }
}

const fn spec(
    key: &'static str,
    module_name: &'static str,
    path: &'static str,
    target_size: f32,
) -> ModuleSpec {
    ModuleSpec {
        key,
        module_name,
        path,
        target_size,
    }
}

/// The static module library
pub fn available_modules() -> &'static [ModuleCatalogEntry] {
    CATALOG
}

/// Look up loader parameters by catalog key, ignoring case
pub fn module_spec(key: &str) -> Option<&'static ModuleSpec> {
    MODULE_SPECS
        .iter()
        .find(|s| s.key.eq_ignore_ascii_case(key.trim()))
}

/// Density (kg/m^3) assumed for a loaded module
pub fn module_density(module_name: &str) -> f32 {
    match module_name {
        "A1LightBlock" => 800.0,
        "A2LongBlock" => 1200.0,
        "A4MediumBlock" => 1000.0,
        "BigUniversalV1" => 1500.0,
        "BUMRoof" => 600.0,
        "SunPanels" => 300.0,
        "MotherModule" => 2000.0,
        _ => FALLBACK_DENSITY,
    }
}

/// Material label reported for a loaded module
pub fn module_material(module_name: &str) -> MaterialKind {
    let name = module_name.to_ascii_lowercase();
    if name.contains("light") {
        MaterialKind::Aluminum
    } else if name.contains("sun") {
        MaterialKind::Composite
    } else {
        MaterialKind::Steel
    }
}

/// Whether the CAD panel is suppressed for this module
pub fn is_cad_excluded(module_name: &str) -> bool {
    CAD_EXCLUDED_MODULES.contains(&module_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_has_every_spec() {
        assert_eq!(available_modules().len(), 10);
        for entry in available_modules() {
            assert!(module_spec(entry.id).is_some(), "missing {}", entry.id);
        }
    }

    #[test]
    fn test_module_spec_case_insensitive() {
        let spec = module_spec("A1Light").unwrap();
        assert_eq!(spec.module_name, "A1LightBlock");
        assert_eq!(spec.target_size, 4.0);
        assert_eq!(module_spec("bumroof").unwrap().target_size, 19.5);
        assert!(module_spec("warpdrive").is_none());
    }

    #[test]
    fn test_module_density() {
        assert_eq!(module_density("SunPanels"), 300.0);
        assert_eq!(module_density("MotherModule"), 2000.0);
        assert_eq!(module_density("A1Preset"), FALLBACK_DENSITY);
    }

    #[test]
    fn test_module_material() {
        assert_eq!(module_material("A1LightBlock"), MaterialKind::Aluminum);
        assert_eq!(module_material("SunPanels"), MaterialKind::Composite);
        assert_eq!(module_material("BUMRoof"), MaterialKind::Steel);
    }

    #[test]
    fn test_cad_exclusion() {
        assert!(is_cad_excluded("SunPanels"));
        assert!(is_cad_excluded("BigUniversalV1"));
        assert!(!is_cad_excluded("A1LightBlock"));
        assert!(!is_cad_excluded("MotherModule"));
    }
}
