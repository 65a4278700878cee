use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, info};

use crate::compiler::Compiler;
use crate::config::GeneratorConfig;
use crate::error::{AbiGenError, Result};
use crate::preprocessor::PreProcessor;

/// Writes one ABI file per configured contract.
pub struct AbiGenerator<C> {
    config: GeneratorConfig,
    preprocessor: PreProcessor,
    compiler: C,
}

/// One written ABI file.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedAbi {
    pub name: String,
    pub path: PathBuf,
}

impl<C: Compiler> AbiGenerator<C> {
    pub fn new(config: GeneratorConfig, compiler: C) -> Self {
        let preprocessor = PreProcessor::new(config.addresses.clone());
        Self {
            config,
            preprocessor,
            compiler,
        }
    }

    /// Generate every configured contract in order, stopping at the first error.
    pub fn generate_all(&self) -> Result<Vec<GeneratedAbi>> {
        self.config
            .contracts
            .iter()
            .map(|contract| self.generate(contract))
            .collect()
    }

    /// Preprocess, compile and save the ABI of the last compiled unit of `contract`.
    pub fn generate(&self, contract: &str) -> Result<GeneratedAbi> {
        let source = self.preprocessor.process(
            contract,
            self.config.add_dev_code,
            &self.config.contract_dir,
            self.config.replace_unknown_addresses,
        )?;
        debug!(contract, bytes = source.len(), "preprocessed");

        let units = self.compiler.combined(&source)?;
        let unit = units
            .last()
            .ok_or_else(|| AbiGenError::NoCompiledUnits(contract.to_string()))?;
        if !matches!(unit.abi, Value::Array(_)) {
            return Err(AbiGenError::InvalidAbi {
                contract: contract.to_string(),
            });
        }

        fs::create_dir_all(&self.config.output_dir).map_err(|source| AbiGenError::Write {
            path: self.config.output_dir.clone(),
            source,
        })?;

        let name = base_name(contract);
        let path = self.config.output_dir.join(format!("{}.json", name));
        let json = serde_json::to_string(&unit.abi)?;
        fs::write(&path, json).map_err(|source| AbiGenError::Write {
            path: path.clone(),
            source,
        })?;

        info!(contract, unit = %unit.name, path = %path.display(), "{} ABI generated.", name);
        Ok(GeneratedAbi { name, path })
    }
}

/// File name of `contract` up to its first dot: `DO/DutchAuction.sol` -> `DutchAuction`.
pub fn base_name(contract: &str) -> String {
    let file_name = Path::new(contract)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(contract);
    file_name.split('.').next().unwrap_or(file_name).to_string()
}
