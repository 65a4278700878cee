//! External compiler seam.
//!
//! The generator only needs the ABI of each compiled unit, in the order the
//! compiler emitted them. [`CommandCompiler`] drives any program that reads
//! source on stdin and prints solc-style combined JSON:
//!
//! ```text
//! {"contracts": {"<stdin>:Token": {"abi": [...]}, ...}}
//! ```

use std::io::Write;
use std::panic;
use std::process::{Command, Stdio};
use std::thread;

use serde_json::Value;
use tracing::debug;

use crate::config::CompilerConfig;
use crate::error::{AbiGenError, Result};

/// One contract out of a compilation.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledUnit {
    pub name: String,
    pub abi: Value,
}

pub trait Compiler {
    /// Compile `source`, returning its units in output order.
    fn combined(&self, source: &str) -> Result<Vec<CompiledUnit>>;
}

impl<C: Compiler + ?Sized> Compiler for &C {
    fn combined(&self, source: &str) -> Result<Vec<CompiledUnit>> {
        (**self).combined(source)
    }
}

/// Compiler run as a child process.
pub struct CommandCompiler {
    program: String,
    args: Vec<String>,
}

impl CommandCompiler {
    pub fn new(config: &CompilerConfig) -> Self {
        Self {
            program: config.program.clone(),
            args: config.args.clone(),
        }
    }
}

impl Compiler for CommandCompiler {
    fn combined(&self, source: &str) -> Result<Vec<CompiledUnit>> {
        debug!(program = %self.program, args = ?self.args, "running compiler");

        let spawn_error = |source: std::io::Error| AbiGenError::CompilerSpawn {
            program: self.program.clone(),
            source,
        };

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(spawn_error)?;

        // Stdin is fed from its own thread so that a compiler filling its
        // stdout pipe before reading all of the source cannot deadlock us
        let stdin = child.stdin.take();
        let (written, output) = thread::scope(|scope| {
            let writer = scope.spawn(move || match stdin {
                Some(mut stdin) => stdin.write_all(source.as_bytes()),
                None => Ok(()),
            });
            let output = child.wait_with_output();
            let written = writer.join().unwrap_or_else(|payload| panic::resume_unwind(payload));
            (written, output)
        });

        // A compiler that quits early closes stdin; its exit status explains why
        let output = output.map_err(spawn_error)?;
        if !output.status.success() {
            return Err(AbiGenError::CompilerFailed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        written.map_err(spawn_error)?;

        parse_combined_json(&String::from_utf8_lossy(&output.stdout))
    }
}

/// Units of a solc `--combined-json` document, in document order.
///
/// Older compilers emit each `abi` as a JSON-encoded string; both forms are accepted.
pub fn parse_combined_json(text: &str) -> Result<Vec<CompiledUnit>> {
    let document: Value = serde_json::from_str(text)?;

    let contracts = document
        .get("contracts")
        .and_then(Value::as_object)
        .ok_or_else(|| AbiGenError::MalformedOutput("missing \"contracts\" object".to_string()))?;

    contracts
        .iter()
        .map(|(name, unit)| {
            let abi = match unit.get("abi") {
                Some(Value::String(encoded)) => serde_json::from_str(encoded)?,
                Some(abi) => abi.clone(),
                None => {
                    return Err(AbiGenError::MalformedOutput(format!("unit {} has no \"abi\"", name)))
                }
            };
            Ok(CompiledUnit {
                name: name.clone(),
                abi,
            })
        })
        .collect()
}
