/// Registry consulted when neither `--registry` nor the settings file name one.
pub const DEFAULT_REGISTRY_SOURCE: &str =
    "https://raw.githubusercontent.com/ec-europa/qa-tests/components/module_list.json";

/// Path fragment identifying third-party (contrib) modules. Modules outside
/// this location are project-owned code and exempt from registry checks.
pub const CONTRIB_PATH_MARKER: &str = "modules/contrib";

/// Manifests under any other `modules/` segment are still inventoried so the
/// unused check can see project-owned code.
pub const MODULES_PATH_MARKER: &str = "modules/";

/// Obsolete modules excluded from discovery altogether.
pub const OBSOLETE_MODULES: &[&str] = &["views_export"];
