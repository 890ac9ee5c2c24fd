//! Incremental path validation against operating-system and cloud-storage
//! naming rules.
//!
//! `fpv-core` splits a path into components, runs a policy's rule pipeline
//! over each one, and records structured issues and corrective actions.
//! Actions are applied in priority order to produce a cleaned path. The whole
//! state can be saved as a [`Snapshot`] and restored later, so that adding or
//! removing one component only checks what changed.
//!
//! # Examples
//!
//! ```
//! use fpv_core::Engine;
//! use fpv_core::PathOptions;
//! use fpv_core::Provider;
//! use fpv_core::rules::Mode;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let policy = Provider::Windows.policy()?;
//! let mut engine = Engine::new("C:\\Projects\\draft.", &policy, &PathOptions::default());
//!
//! let issues = engine.validate()?;
//! assert_eq!(issues.len(), 1);
//!
//! // Only the new component is checked.
//! engine.add_part("NUL", false, Some(Mode::Validate))?;
//! assert_eq!(engine.issues().len(), 2);
//!
//! let report = engine.clean(true)?;
//! assert_eq!(report.cleaned_path, "C:\\Projects\\draft");
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod engine;
pub mod error;
pub mod policy;
pub mod provider;
pub mod report;
pub mod rules;
pub mod snapshot;
pub mod state;
pub mod types;

// Re-export main API types
pub use api::add_parts;
pub use api::build_path;
pub use api::clean_path;
pub use api::remove_part;
pub use api::validate_path;
pub use config::PathOptions;
pub use config::PolicyConfig;
pub use config::Priorities;
pub use engine::Engine;
pub use error::PathError;
pub use error::Result;
pub use policy::Policy;
pub use provider::Provider;
pub use report::AddReport;
pub use report::BuildReport;
pub use report::CleanReport;
pub use report::RemoveReport;
pub use report::ValidationReport;
pub use snapshot::Snapshot;

// Re-export types module for easier access
pub use types::Action;
pub use types::Category;
pub use types::Details;
pub use types::Issue;
pub use types::Part;
pub use types::Subtype;
