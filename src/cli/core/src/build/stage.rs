/* src/cli/core/src/build/stage.rs */

use super::config::BuildConfig;
use super::error::BuildError;
use super::fs::empty_dir;

/// Empty (or create) the output directory. Runs before anything else writes
/// there, so no artifact of a previous build survives into this one.
pub async fn stage_output(config: &BuildConfig) -> Result<(), BuildError> {
  empty_dir(&config.output_path).await
}
