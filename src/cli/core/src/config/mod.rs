/* src/cli/core/src/config/mod.rs */

mod loader;
mod types;


pub use loader::{find_seam_config, load_seam_config};
pub use types::{
  BuildSection, CopyOptions, CopyRuleSection, EntrySection, GlobalsSection, MiddlewareSection,
  ProjectConfig, RouterSection, SeamConfig, ServiceWorkerSection, StoreSection,
};
