//! `grove check` command implementation.
//!
//! Loads and decodes the manifest, reporting the first problem found.

use super::CommandContext;
use grove_config::ConfigResult;

/// Execute the `grove check` command
pub async fn execute(ctx: &CommandContext) -> ConfigResult<()> {
    let (config, path) = ctx.loader().load().await?;

    ctx.output.success(&format!(
        "{}: project '{}' with {} direct {} and {} {} in the package set",
        path,
        config.name,
        config.dependencies.len(),
        plural(config.dependencies.len(), "dependency", "dependencies"),
        config.packages.len(),
        plural(config.packages.len(), "package", "packages"),
    ));

    // Not an error here; resolution decides whether it is fatal
    for missing in config.missing_dependencies() {
        ctx.output
            .warn(&format!("Dependency '{}' is not in the package set", missing));
    }

    Ok(())
}

fn plural<'a>(count: usize, one: &'a str, many: &'a str) -> &'a str {
    if count == 1 {
        one
    } else {
        many
    }
}
