//! `grove deps` command implementation.

use super::CommandContext;
use grove_config::ConfigResult;

/// Execute the `grove deps` command
pub async fn execute(ctx: &CommandContext) -> ConfigResult<()> {
    let config = ctx.load_config().await?;

    if config.dependencies.is_empty() {
        ctx.output.info("No direct dependencies");
        return Ok(());
    }

    for name in &config.dependencies {
        match config.package(name.as_str()) {
            Some(package) => ctx.output.line(&format!(
                "{} {} {}",
                name,
                package.version,
                ctx.output.colors().dim(&package.repo)
            )),
            None => ctx
                .output
                .warn(&format!("{} (not in the package set)", name)),
        }
    }

    Ok(())
}
