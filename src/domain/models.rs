use serde::{Deserialize, Serialize};

#[derive(Serialize)]
pub struct JsonOut<T: Serialize> {
    pub ok: bool,
    pub data: T,
}

#[derive(Debug, Deserialize, Serialize, Default)]
pub struct State {
    pub project_id: Option<String>,
}

/// One discovered module manifest. Enumerated fresh on each run; never
/// persisted.
#[derive(Debug, Clone, Serialize)]
pub struct InstalledModule {
    pub id: String,
    /// Manifest directory, relative to the install root.
    pub path: String,
    pub version: Option<String>,
    /// Owning project declared in the manifest. Sub-modules report their
    /// parent project here, which the evaluator guards against.
    pub project: Option<String>,
}

/// One row of the module-review registry. `restricted_use` is `"0"` for
/// modules authorized everywhere, `"1"` for blanket-restricted modules, and
/// a comma-separated project-id allowlist otherwise. The same name may occur
/// in several rows with different scopes; row order is significant for the
/// minimum-version lookup.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReviewEntry {
    pub name: String,
    #[serde(alias = "restricted_us")]
    pub restricted_use: String,
    /// Minimum accepted version for this scope.
    #[serde(default)]
    pub version: String,
}

/// One row of the security-update feed, keyed by module id.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpdateInfo {
    pub name: String,
    #[serde(default)]
    pub existing_version: String,
    #[serde(default)]
    pub recommended: String,
    #[serde(default)]
    pub security_updates: Vec<serde_json::Value>,
}

/// Project identifier the run is evaluated for. Threaded explicitly through
/// every call; never stashed in ambient configuration.
#[derive(Debug, Clone, Default)]
pub struct ProjectContext {
    pub project_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SecurityUpdateInfo {
    pub module: String,
    pub existing_version: String,
    pub recommended: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct MinimumVersionFinding {
    pub module: String,
    pub current: String,
    pub minimum: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ClassificationResult {
    pub unauthorized: Vec<String>,
    pub security_updates_needed: Vec<SecurityUpdateInfo>,
    pub below_minimum_version: Vec<MinimumVersionFinding>,
}

#[derive(Serialize)]
pub struct AuthorizedCheckReport {
    pub project_id: Option<String>,
    pub unauthorized: Vec<String>,
    pub security_updates_needed: Vec<SecurityUpdateInfo>,
}

#[derive(Serialize)]
pub struct MinVersionCheckReport {
    pub project_id: Option<String>,
    pub below_minimum_version: Vec<MinimumVersionFinding>,
}

#[derive(Serialize)]
pub struct UnusedModuleFinding {
    pub module: String,
    pub path: String,
}

#[derive(Serialize)]
pub struct UnusedCheckReport {
    pub path: String,
    pub lockfile_present: bool,
    pub unused: Vec<UnusedModuleFinding>,
}

#[derive(Serialize)]
pub struct FullCheckReport {
    pub project_id: Option<String>,
    pub modules_scanned: usize,
    pub result: ClassificationResult,
}
