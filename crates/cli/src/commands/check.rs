use anyhow::Result;
use clap::Parser;
use reroute_core::ReaderRegistry;
use std::path::PathBuf;

use crate::harness::parse_config;

/// Validate a redirect rules config
#[derive(Debug, Parser)]
pub struct CheckCommand {
    /// Path to the rules config YAML file
    #[arg(value_name = "CONFIG")]
    pub config_path: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl CheckCommand {
    pub fn execute(&self) -> Result<i32> {
        // Parse config (includes structural validation)
        let config = match parse_config(&self.config_path) {
            Ok(config) => config,
            Err(error) => {
                println!("Config: {}", self.config_path.display());
                println!("Status: ERROR");
                println!();
                println!("Error: {}", error);
                if self.verbose {
                    println!();
                    println!("Details:");
                    println!("{:?}", error);
                }
                return Ok(2);
            }
        };

        let name = config
            .name
            .clone()
            .unwrap_or_else(|| self.config_path.display().to_string());
        println!("Config: {name}");

        // Check every referenced reader against the built-in registry
        let registry = ReaderRegistry::new();
        if let Err(error) = config.validate_readers(&registry) {
            println!("Status: INVALID");
            println!();
            println!("Error: {}", error);
            return Ok(1);
        }

        println!("Status: VALID");
        println!();
        println!("✓ {} rules", config.rules.len());
        println!("✓ All referenced readers are registered");

        if self.verbose {
            println!();
            println!("Rules:");
            for (position, rule) in config.rules.iter().enumerate() {
                println!("  {position}: {} / {}", rule.reader, rule.key);
            }
        }

        Ok(0)
    }
}
