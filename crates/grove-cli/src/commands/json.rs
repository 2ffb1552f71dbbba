//! `grove json` command implementation.
//!
//! Emits the decoded manifest in the JSON form consumed by downstream tools.

use super::CommandContext;
use camino::Utf8PathBuf;
use grove_config::json::{serialize_config_json, write_to_file};
use grove_config::ConfigResult;

/// Execute the `grove json` command
pub async fn execute(output: Option<Utf8PathBuf>, ctx: &CommandContext) -> ConfigResult<()> {
    let config = ctx.load_config().await?;

    match output {
        Some(path) => {
            let path = ctx.cwd.join(path);
            write_to_file(&path, &config).await?;
            ctx.output.success(&format!("Wrote {}", path));
        }
        None => ctx.output.line(&serialize_config_json(&config)?),
    }

    Ok(())
}
