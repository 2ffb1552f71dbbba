//! `grove packages` command implementation.

use super::CommandContext;
use grove_config::ConfigResult;

/// Execute the `grove packages` command
pub async fn execute(ctx: &CommandContext) -> ConfigResult<()> {
    let config = ctx.load_config().await?;

    // BTreeMap iteration is already sorted by name
    for (name, package) in &config.packages {
        let deps: Vec<&str> = package.dependencies.iter().map(|d| d.as_str()).collect();
        ctx.output.line(&format!("{} {}", name, package.version));
        ctx.output.info(&format!("  repo: {}", package.repo));
        if !deps.is_empty() {
            ctx.output.info(&format!("  depends on: {}", deps.join(", ")));
        }
    }

    ctx.output
        .info(&format!("{} packages", config.packages.len()));
    Ok(())
}
