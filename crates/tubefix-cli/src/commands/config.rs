use anyhow::Result;
use tubefix_config::Config;

use crate::cli::ConfigCommands;

pub fn handle(cmd: ConfigCommands, config: &Config) -> Result<()> {
    match cmd {
        ConfigCommands::Path => {
            println!("{}", Config::config_path().display());
        }
        ConfigCommands::Show => {
            println!("# {}", Config::config_path().display());
            print!("{}", toml::to_string_pretty(config)?);
            println!("\n# token file: {}", config.token_path().display());
            match config.client_credentials() {
                Ok(client) => println!("# oauth client: {}", client.client_id),
                Err(_) => println!("# oauth client: not configured"),
            }
        }
    }
    Ok(())
}
