//! Service layer containing the evaluator core and side-effect helpers.
//!
//! ## Service map
//! - `evaluator.rs` — authorized-set build, classification, security and
//!   minimum-version checks (pure functions, no I/O).
//! - `version.rs` — dotted/suffixed version comparison.
//! - `inventory.rs` — module manifest discovery under the install root.
//! - `lockfile.rs` — composer.lock dev/production module sets.
//! - `updates.rs` — security-update feed client.
//! - `settings.rs` — config.toml loading + source precedence.
//! - `storage.rs` — state persistence + audit log.
//! - `output.rs` — JSON/text output helpers.
//!
//! ## Conventions
//! - Prefer pure helpers where possible.
//! - Side effects should be explicit and localized.
//! - Keep command handlers thin; delegate to services.

pub mod evaluator;
pub mod inventory;
pub mod lockfile;
pub mod output;
pub mod settings;
pub mod storage;
pub mod updates;
pub mod version;
