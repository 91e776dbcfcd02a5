use assert_cmd::Command;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub struct TestEnv {
    _tmp: TempDir,
    pub home: PathBuf,
    pub site: PathBuf,
    pub registry: PathBuf,
    pub feed: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let home = tmp.path().join("home");
        fs::create_dir_all(&home).expect("create isolated home");

        let site = make_fixture_site(tmp.path());
        let registry = make_fixture_registry(tmp.path());
        let feed = make_fixture_feed(tmp.path());

        Self {
            _tmp: tmp,
            home,
            site,
            registry,
            feed,
        }
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("modaudit").expect("binary under test");
        cmd.env("HOME", &self.home).env_remove("GITHUB_API_TOKEN");
        cmd
    }

    pub fn run_json(&self, args: &[&str]) -> Value {
        let mut cmd = self.cmd();
        let out = cmd
            .arg("--json")
            .args(args)
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&out).expect("valid json output")
    }

    /// Runs against the fixture site and registry.
    pub fn run_json_site(&self, args: &[&str]) -> Value {
        let mut cmd = self.cmd();
        let out = cmd
            .arg("--json")
            .arg("--root")
            .arg(self.site.to_str().expect("site path utf8"))
            .arg("--registry")
            .arg(self.registry.to_str().expect("registry path utf8"))
            .args(args)
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&out).expect("valid json output")
    }

    pub fn feed_arg(&self) -> String {
        self.feed.to_str().expect("feed path utf8").to_string()
    }
}

fn write_manifest(site: &Path, rel_dir: &str, id: &str, version: &str, project: &str) {
    let dir = site.join(rel_dir);
    fs::create_dir_all(&dir).expect("create module dir");
    fs::write(
        dir.join(format!("{}.info.yml", id)),
        format!(
            "name: {}\ntype: module\nversion: '{}'\nproject: {}\n",
            id, version, project
        ),
    )
    .expect("write manifest");
}

fn make_fixture_site(base: &Path) -> PathBuf {
    let site = base.join("site");

    write_manifest(&site, "web/modules/contrib/token", "token", "1.9", "token");
    write_manifest(&site, "web/modules/contrib/rogue", "rogue", "2.0", "rogue");
    write_manifest(&site, "web/modules/contrib/devel", "devel", "5.1", "devel");
    write_manifest(
        &site,
        "web/modules/contrib/webform",
        "webform",
        "6.0",
        "webform",
    );
    // Sub-module: declares its parent project.
    write_manifest(
        &site,
        "web/modules/contrib/webform/modules/webform_ui",
        "webform_ui",
        "6.0",
        "webform",
    );
    // Project-owned code outside the contrib location.
    write_manifest(&site, "web/modules/custom/mysite", "mysite", "1.0", "mysite");

    let lock = serde_json::json!({
        "packages": [
            {"name": "drupal/token", "type": "drupal-module"},
            {"name": "drupal/webform", "type": "drupal-module"},
            {"name": "drupal/rogue", "type": "drupal-module"},
            {"name": "drupal/core", "type": "drupal-core"}
        ],
        "packages-dev": [
            {"name": "drupal/devel", "type": "drupal-module"}
        ]
    });
    fs::write(
        site.join("composer.lock"),
        serde_json::to_string_pretty(&lock).expect("serialize lockfile"),
    )
    .expect("write lockfile");

    let sync = site.join("config/sync");
    fs::create_dir_all(&sync).expect("create config sync dir");
    fs::write(
        sync.join("core.extension.yml"),
        "module:\n  token: 0\n  webform: 0\nprofile: standard\n",
    )
    .expect("write extension config");

    site
}

fn make_fixture_registry(base: &Path) -> PathBuf {
    let registry = base.join("registry.json");
    let entries = serde_json::json!([
        {"name": "token", "restricted_use": "0", "version": "1.10"},
        {"name": "webform", "restricted_use": "12,7", "version": "6.2"},
        {"name": "badmod", "restricted_use": "1", "version": "1.0"}
    ]);
    fs::write(
        &registry,
        serde_json::to_string_pretty(&entries).expect("serialize registry"),
    )
    .expect("write registry");
    registry
}

fn make_fixture_feed(base: &Path) -> PathBuf {
    let feed = base.join("feed.json");
    let body = serde_json::json!({
        "token": {
            "name": "token",
            "existing_version": "1.9",
            "recommended": "1.11",
            "security_updates": [{"version": "1.11"}]
        },
        "rogue": {
            "name": "rogue",
            "existing_version": "2.0",
            "recommended": "2.1",
            "security_updates": []
        }
    });
    fs::write(
        &feed,
        serde_json::to_string_pretty(&body).expect("serialize feed"),
    )
    .expect("write feed");
    feed
}
