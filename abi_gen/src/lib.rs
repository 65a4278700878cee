//! ABI generation for contract sources.
//!
//! For each configured contract: resolve preprocessing directives, run the
//! external compiler, keep the ABI of the final compiled unit and save it as
//! `<output_dir>/<ContractName>.json`.

pub mod compiler;
pub mod config;
pub mod error;
pub mod generator;
pub mod preprocessor;

pub use compiler::{CommandCompiler, CompiledUnit, Compiler};
pub use config::{CompilerConfig, GeneratorConfig};
pub use error::{AbiGenError, Result};
pub use generator::{base_name, AbiGenerator, GeneratedAbi};
pub use preprocessor::PreProcessor;
