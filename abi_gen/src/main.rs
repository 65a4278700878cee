use std::env;
use std::path::PathBuf;

use abi_gen::{AbiGenerator, CommandCompiler, GeneratorConfig};
use anyhow::{Context, Result};
use clap::Parser;

/// Generate JSON ABI files for the configured contracts
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long, env = "ABI_GEN_CONFIG")]
    config: Option<PathBuf>,

    /// Directory holding the contract sources
    #[arg(long)]
    contract_dir: Option<PathBuf>,

    /// Directory the ABI files are written to
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Keep dev-only code blocks
    #[arg(long)]
    dev: bool,

    /// Fail on address placeholders with no configured address
    #[arg(long)]
    strict_addresses: bool,

    /// Compiler executable
    #[arg(long, env = "ABI_GEN_COMPILER")]
    compiler: Option<String>,

    /// Contracts to generate, relative to the contract directory
    contracts: Vec<String>,
}

impl Cli {
    fn into_config(self) -> Result<GeneratorConfig> {
        let mut config = match &self.config {
            Some(path) => GeneratorConfig::load(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => GeneratorConfig::default(),
        };

        if let Some(dir) = self.contract_dir {
            config.contract_dir = dir;
        }
        if let Some(dir) = self.output_dir {
            config.output_dir = dir;
        }
        if self.dev {
            config.add_dev_code = true;
        }
        if self.strict_addresses {
            config.replace_unknown_addresses = false;
        }
        if let Some(program) = self.compiler {
            config.compiler.program = program;
        }
        if !self.contracts.is_empty() {
            config.contracts = self.contracts;
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    let filter = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = Cli::parse().into_config()?;
    let compiler = CommandCompiler::new(&config.compiler);
    let generator = AbiGenerator::new(config, compiler);

    for generated in generator.generate_all()? {
        println!("{} ABI generated.", generated.name);
    }
    Ok(())
}
