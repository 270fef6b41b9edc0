//! # marvin-projects
//!
//! Engine project scaffolding for the Marvin CLI:
//! - Naming rules for slugs, packages and directories
//! - Template sets (embedded or from a directory) rendered with Tera
//! - Generation with removal of partially created projects on failure
//! - Git repository initialization
//!
//! # Example
//!
//! ```no_run
//! use marvin_projects::{GenerateOutcome, GenerateRequest, Maintainer, ProjectType, Scaffolder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let request = GenerateRequest {
//!     name: "Iris Species".to_string(),
//!     description: "Marvin engine".to_string(),
//!     maintainer: Maintainer {
//!         name: "Marvin AI Community".to_string(),
//!         email: "dev@marvin.apache.org".to_string(),
//!     },
//!     package: String::new(),
//!     dest_root: "/opt/marvin".into(),
//!     project_type: ProjectType::engine(false),
//!     data_path: "/opt/marvin/data".into(),
//!     toolbox_version: None,
//!     interpreter: "python".to_string(),
//!     skip_git: false,
//! };
//!
//! match Scaffolder::default().generate(&request).await? {
//!     GenerateOutcome::Created { path, .. } => println!("created {}", path),
//!     GenerateOutcome::Failed { error, .. } => eprintln!("{}", error),
//! }
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod git;
pub mod naming;
pub mod scaffold;
pub mod templates;
pub mod types;

pub use error::{Error, Result};
pub use naming::{dir_name, package_name, slugify};
pub use scaffold::{GenerateOutcome, GitStatus, ScaffoldStage, Scaffolder};
pub use templates::{TemplateRenderer, TemplateSource};
pub use types::{GenerateRequest, Maintainer, ProjectDescriptor, ProjectType};
