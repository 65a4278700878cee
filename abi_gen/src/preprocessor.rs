//! Contract source preprocessing.
//!
//! Resolves three directives before the source reaches the compiler:
//! - `import "File.sol";` lines are replaced by the imported file, each file
//!   inlined at most once
//! - lines between `// #dev` and `// #enddev` are kept only with dev code enabled
//! - `{{ContractName}}` placeholders are replaced by configured addresses

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

use crate::error::{AbiGenError, Result};

pub const ZERO_ADDRESS: &str = "0x0000000000000000000000000000000000000000";

const DEV_START: &str = "// #dev";
const DEV_END: &str = "// #enddev";

static IMPORT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^\s*import\s+"([^"]+)"\s*;\s*$"#).unwrap());

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{\s*([A-Za-z_][A-Za-z0-9_]*)\s*\}\}").unwrap());

pub struct PreProcessor {
    addresses: BTreeMap<String, String>,
}

impl PreProcessor {
    pub fn new(addresses: BTreeMap<String, String>) -> Self {
        Self { addresses }
    }

    /// Preprocessed source of `path` (relative to `contract_dir`).
    pub fn process(
        &self,
        path: &str,
        add_dev_code: bool,
        contract_dir: &Path,
        replace_unknown_addresses: bool,
    ) -> Result<String> {
        let mut seen = HashSet::new();
        let mut out = String::new();
        self.inline(&contract_dir.join(path), add_dev_code, &mut seen, &mut out)?;
        self.substitute_addresses(&out, &contract_dir.join(path), replace_unknown_addresses)
    }

    fn inline(
        &self,
        file: &Path,
        add_dev_code: bool,
        seen: &mut HashSet<PathBuf>,
        out: &mut String,
    ) -> Result<()> {
        if !seen.insert(normalize(file)) {
            debug!(file = %file.display(), "already inlined");
            return Ok(());
        }

        let text = fs::read_to_string(file).map_err(|source| AbiGenError::Read {
            path: file.to_path_buf(),
            source,
        })?;
        let parent = file.parent().unwrap_or_else(|| Path::new(""));

        let mut dev_start: Option<usize> = None;
        for (index, line) in text.lines().enumerate() {
            let number = index + 1;
            match line.trim() {
                DEV_START => {
                    dev_start = Some(number);
                    continue;
                }
                DEV_END => {
                    if dev_start.take().is_none() {
                        return Err(AbiGenError::UnexpectedDevEnd {
                            path: file.to_path_buf(),
                            line: number,
                        });
                    }
                    continue;
                }
                _ => {}
            }

            if dev_start.is_some() && !add_dev_code {
                continue;
            }

            if let Some(captures) = IMPORT.captures(line) {
                self.inline(&parent.join(&captures[1]), add_dev_code, seen, out)?;
                continue;
            }

            out.push_str(line);
            out.push('\n');
        }

        match dev_start {
            Some(line) => Err(AbiGenError::UnterminatedDevBlock {
                path: file.to_path_buf(),
                line,
            }),
            None => Ok(()),
        }
    }

    fn substitute_addresses(
        &self,
        source: &str,
        file: &Path,
        replace_unknown_addresses: bool,
    ) -> Result<String> {
        // Fail on the first unresolvable name before building the output
        for captures in PLACEHOLDER.captures_iter(source) {
            let name = &captures[1];
            if self.addresses.contains_key(name) {
                continue;
            }
            if !replace_unknown_addresses {
                return Err(AbiGenError::UnknownAddress {
                    path: file.to_path_buf(),
                    name: name.to_string(),
                });
            }
            warn!(contract = name, "no address configured, using the zero address");
        }

        let replaced = PLACEHOLDER.replace_all(source, |captures: &regex::Captures| {
            self.addresses
                .get(&captures[1])
                .cloned()
                .unwrap_or_else(|| ZERO_ADDRESS.to_string())
        });
        Ok(replaced.into_owned())
    }
}

/// Collapse `.` and `..` so an import reached by two routes is inlined once.
fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            std::path::Component::CurDir => {}
            std::path::Component::ParentDir => {
                if !normalized.pop() {
                    normalized.push("..");
                }
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}
