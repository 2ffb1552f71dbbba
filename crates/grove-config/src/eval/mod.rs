//! Expression evaluators.
//!
//! Grove does not parse the configuration language itself. An [`Evaluator`]
//! resolves imports, normalises the manifest and hands back an [`Expr`]:
//! - [`Dhall`] runs the `dhall` interpreter on a `.dhall` manifest and reads
//!   back the binary encoding of the result, which keeps annotations, optionals
//!   and union alternatives intact
//! - [`JsonEvaluator`] reads a manifest that is already normal form encoded as JSON

pub mod binary;

use crate::expr::Expr;
use crate::ConfigResult;
use camino::Utf8Path;
use grove_core::error::{GroveError, GroveResult};
use serde_json::Value;
use std::ffi::OsStr;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, info};

/// Produces the normal form of a manifest
#[allow(async_fn_in_trait)]
pub trait Evaluator {
    /// Resolve imports and normalise the manifest at `path`
    async fn normalize(&self, path: &Utf8Path) -> ConfigResult<Expr>;
}

/// Reads manifests that are already JSON
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonEvaluator;

impl Evaluator for JsonEvaluator {
    async fn normalize(&self, path: &Utf8Path) -> ConfigResult<Expr> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| GroveError::io(format!("Failed to read {}", path), e))?;
        Ok(expr_from_json_str(&content).map_err(|e| match e {
            GroveError::Json { message } => GroveError::Json {
                message: format!("In file {}: {}", path, message),
            },
            other => other,
        })?)
    }
}

/// Shells out to the `dhall` interpreter
#[derive(Debug, Clone)]
pub struct Dhall {
    program: PathBuf,
}

impl Dhall {
    /// Program looked up on `PATH` when no override is given
    pub const PROGRAM: &'static str = "dhall";

    /// Find the interpreter, either `program` (a name or a path) or `dhall` on `PATH`
    pub fn locate(program: Option<&str>) -> GroveResult<Self> {
        let name = program.unwrap_or(Self::PROGRAM);
        let program = which::which(name).map_err(|e| GroveError::EvaluatorNotFound {
            program: name.to_string(),
            reason: e.to_string(),
        })?;
        info!("Found expression evaluator at: {}", program.display());
        Ok(Self { program })
    }

    /// Use a specific interpreter binary without searching `PATH`
    pub fn with_path(program: PathBuf) -> Self {
        Self { program }
    }

    /// Run the interpreter, feeding `input` on stdin, and collect stdout
    async fn run(&self, args: &[&OsStr], input: Option<&[u8]>) -> GroveResult<Vec<u8>> {
        debug!(program = %self.program.display(), args = ?args, "Running evaluator");
        let failed = |e| GroveError::io(format!("Failed to run {}", self.program.display()), e);

        let mut child = Command::new(&self.program)
            .args(args)
            .stdin(if input.is_some() { Stdio::piped() } else { Stdio::null() })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(failed)?;

        if let (Some(input), Some(mut stdin)) = (input, child.stdin.take()) {
            stdin.write_all(input).await.map_err(failed)?;
        }

        let output = child.wait_with_output().await.map_err(failed)?;
        if !output.status.success() {
            return Err(GroveError::Evaluator {
                program: self.program.display().to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(output.stdout)
    }
}

impl Evaluator for Dhall {
    async fn normalize(&self, path: &Utf8Path) -> ConfigResult<Expr> {
        // Type-checks, resolves imports and prints the normal form as source
        let normal = self
            .run(&[OsStr::new("--file"), path.as_std_path().as_os_str()], None)
            .await?;
        // The normal form has no imports left, so encoding is a plain parse
        let encoded = self.run(&[OsStr::new("encode")], Some(normal.as_slice())).await?;
        debug!(bytes = encoded.len(), "Decoding binary normal form");
        Ok(binary::expr_from_cbor_slice(&encoded)?)
    }
}

/// Parse JSON text into a normal-form expression
pub fn expr_from_json_str(content: &str) -> GroveResult<Expr> {
    let value: Value = serde_json::from_str(content).map_err(|e| GroveError::Json {
        message: format!("JSON parsing error: {}", e),
    })?;
    expr_from_json(value)
}

/// Convert a JSON value into a normal-form expression
///
/// JSON carries no type annotations, so arrays become unannotated lists and
/// `null` an unannotated `None`.
pub fn expr_from_json(value: Value) -> GroveResult<Expr> {
    Ok(match value {
        Value::Null => Expr::None(None),
        Value::Bool(b) => Expr::Bool(b),
        Value::Number(n) => {
            if let Some(natural) = n.as_u64() {
                Expr::Natural(natural)
            } else if let Some(integer) = n.as_i64() {
                Expr::Integer(integer)
            } else if let Some(double) = n.as_f64() {
                Expr::Double(double)
            } else {
                return Err(GroveError::NotNormalForm {
                    message: format!("number {} is out of range", n),
                });
            }
        }
        Value::String(text) => Expr::Text(text),
        Value::Array(items) => Expr::list(
            items
                .into_iter()
                .map(expr_from_json)
                .collect::<GroveResult<_>>()?,
        ),
        Value::Object(fields) => Expr::Record(
            fields
                .into_iter()
                .map(|(label, value)| Ok((label, expr_from_json(value)?)))
                .collect::<GroveResult<_>>()?,
        ),
    })
}

/// Write a stand-in interpreter into `dir` that echoes the manifest for `--file`
/// and answers `encode` with `encoded`, recording what it was fed
#[cfg(all(test, unix))]
pub(crate) fn fake_dhall(dir: &std::path::Path, encoded: &ciborium::value::Value) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let output = dir.join("normal.cbor");
    std::fs::write(&output, binary::encode::to_bytes(encoded)).unwrap();
    let fed = dir.join("encode-input");
    let script = dir.join("fake-dhall");
    std::fs::write(
        &script,
        format!(
            "#!/bin/sh\ncase \"$1\" in\n  --file) cat \"$2\" ;;\n  encode) cat > '{}'; cat '{}' ;;\n  *) exit 2 ;;\nesac\n",
            fed.display(),
            output.display()
        ),
    )
    .unwrap();
    std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();
    script
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::Type;
    use camino::Utf8PathBuf;
    use serde_json::json;

    #[test]
    fn test_scalars_from_json() {
        assert_eq!(expr_from_json(json!(null)).unwrap(), Expr::None(None));
        assert_eq!(expr_from_json(json!(true)).unwrap(), Expr::Bool(true));
        assert_eq!(expr_from_json(json!(3)).unwrap(), Expr::Natural(3));
        assert_eq!(expr_from_json(json!(-3)).unwrap(), Expr::Integer(-3));
        assert_eq!(expr_from_json(json!(0.5)).unwrap(), Expr::Double(0.5));
        assert_eq!(expr_from_json(json!("x")).unwrap(), Expr::text("x"));
    }

    #[test]
    fn test_structures_from_json() {
        let value = json!({
            "name": "my-project",
            "dependencies": [],
            "packages": { "prelude": { "dependencies": [], "repo": "r", "version": "v" } }
        });
        let expr = expr_from_json(value).unwrap();
        let Expr::Record(fields) = &expr else {
            panic!("Expected a record");
        };
        assert_eq!(fields.len(), 3);
        assert_eq!(fields["dependencies"], Expr::list(vec![]));
        assert!(matches!(fields["packages"], Expr::Record(_)));
    }

    #[test]
    fn test_invalid_json_text() {
        assert!(matches!(expr_from_json_str("{ name"), Err(GroveError::Json { .. })));
    }

    #[tokio::test]
    async fn test_json_evaluator_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::try_from(dir.path().join("grove.json")).unwrap();
        std::fs::write(&path, r#"{ "dependencies": ["prelude"] }"#).unwrap();

        let expr = JsonEvaluator.normalize(&path).await.unwrap();
        assert_eq!(
            expr,
            Expr::record([("dependencies", Expr::list(vec![Expr::text("prelude")]))])
        );
        assert_ne!(expr, Expr::record([("dependencies", Expr::empty_list(Type::Text))]));
    }

    #[tokio::test]
    async fn test_json_evaluator_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::try_from(dir.path().join("nope.json")).unwrap();
        let err = JsonEvaluator.normalize(&path).await.unwrap_err();
        assert!(matches!(err, crate::ConfigError::Grove(GroveError::Io { .. })));
    }

    #[test]
    fn test_locate_unknown_program() {
        let err = Dhall::locate(Some("grove-definitely-not-a-real-evaluator")).unwrap_err();
        assert!(matches!(err, GroveError::EvaluatorNotFound { .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_dhall_normalizes_then_encodes() {
        use binary::encode::*;

        let dir = tempfile::tempdir().unwrap();
        let encoded = record([
            ("dependencies", empty_list(builtin("Text"))),
            ("version", some(text("v1"))),
        ]);
        let script = fake_dhall(dir.path(), &encoded);

        let manifest = Utf8PathBuf::try_from(dir.path().join("grove.dhall")).unwrap();
        std::fs::write(&manifest, "{ dependencies = [] : List Text, version = Some \"v1\" }").unwrap();

        let expr = Dhall::with_path(script).normalize(&manifest).await.unwrap();
        assert_eq!(
            expr,
            Expr::record([
                ("dependencies", Expr::empty_list(Type::Text)),
                ("version", Expr::Some(Box::new(Expr::text("v1")))),
            ])
        );
        let fed = std::fs::read_to_string(dir.path().join("encode-input")).unwrap();
        assert_eq!(fed, "{ dependencies = [] : List Text, version = Some \"v1\" }");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_dhall_failure_keeps_stderr() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("failing-dhall");
        std::fs::write(&script, "#!/bin/sh\necho 'Error: Missing file ./packages.dhall' >&2\nexit 1\n")
            .unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

        let manifest = Utf8PathBuf::try_from(dir.path().join("grove.dhall")).unwrap();
        let err = Dhall::with_path(script).normalize(&manifest).await.unwrap_err();
        match err {
            crate::ConfigError::Grove(GroveError::Evaluator { stderr, .. }) => {
                assert_eq!(stderr, "Error: Missing file ./packages.dhall");
            }
            other => panic!("Expected evaluator error, got {:?}", other),
        }
    }
}
