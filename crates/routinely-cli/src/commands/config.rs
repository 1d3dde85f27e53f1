//! Configuration CLI commands.

use clap::Subcommand;
use routinely_core::Config;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show the effective configuration as TOML
    Show,
    /// Print the config file path
    Path,
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Show => {
            let config = Config::load()?;
            print!("{}", toml::to_string_pretty(&config)?);
            Ok(())
        }
        ConfigAction::Path => {
            println!("{}", Config::path()?.display());
            Ok(())
        }
    }
}
