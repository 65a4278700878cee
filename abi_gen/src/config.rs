//! Generator configuration, loaded from TOML.
//!
//! Every field is optional; the defaults generate the ABIs of the auction
//! contracts from `solidity/` into `abi/` with `solc`.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{AbiGenError, Result};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Contract sources, relative to `contract_dir`.
    pub contracts: Vec<String>,
    pub contract_dir: PathBuf,
    pub output_dir: PathBuf,
    /// Keep `// #dev` blocks.
    pub add_dev_code: bool,
    /// Substitute the zero address for placeholders missing from `addresses`.
    pub replace_unknown_addresses: bool,
    /// Contract name to address, for `{{Name}}` placeholders.
    pub addresses: BTreeMap<String, String>,
    pub compiler: CompilerConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CompilerConfig {
    pub program: String,
    pub args: Vec<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            contracts: vec![
                "DO/DutchAuction.sol".to_string(),
                "DO/GnosisToken.sol".to_string(),
            ],
            contract_dir: PathBuf::from("solidity"),
            output_dir: PathBuf::from("abi"),
            add_dev_code: false,
            replace_unknown_addresses: true,
            addresses: BTreeMap::new(),
            compiler: CompilerConfig::default(),
        }
    }
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            program: "solc".to_string(),
            args: vec!["--combined-json".to_string(), "abi".to_string(), "-".to_string()],
        }
    }
}

impl GeneratorConfig {
    pub fn from_toml(text: &str, path: &Path) -> Result<Self> {
        toml::from_str(text).map_err(|source| AbiGenError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| AbiGenError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text, path)
    }
}
