use anyhow::Result;
use time::OffsetDateTime;
use tubefix_config::Config;

use crate::cli::AuthCommands;

pub async fn handle(cmd: AuthCommands, config: &Config) -> Result<()> {
    match cmd {
        AuthCommands::Login => login(config).await,
        AuthCommands::Status => status(config),
        AuthCommands::Logout => logout(config),
    }
}

async fn login(config: &Config) -> Result<()> {
    let provider = super::auth_provider(config)?;
    let token = provider.login().await?;

    println!("✓ Authorized");
    println!("  Token: {}", provider.store().path().display());
    if token.refresh_token.is_none() {
        println!("  No refresh token was issued; you will be asked again when it expires.");
    }
    Ok(())
}

fn status(config: &Config) -> Result<()> {
    let store = super::token_store(config);
    println!("Token: {}", store.path().display());

    let Some(token) = store.load() else {
        println!("  Not logged in. Run `tubefix auth login`.");
        return Ok(());
    };

    let refreshable = token.refresh_token.is_some();
    match token.expires_at {
        _ if token.is_expired() => println!(
            "  Expired ({})",
            if refreshable { "will refresh on next run" } else { "login required" }
        ),
        Some(expires_at) => {
            let remaining = expires_at - OffsetDateTime::now_utc().unix_timestamp();
            println!("  Valid for {} more minutes", remaining / 60);
        }
        None => println!("  Valid (no expiry recorded)"),
    }
    println!("  Refresh token: {}", if refreshable { "yes" } else { "no" });
    if !token.scope.is_empty() {
        println!("  Scope: {}", token.scope);
    }
    Ok(())
}

fn logout(config: &Config) -> Result<()> {
    let store = super::token_store(config);
    if store.delete()? {
        println!("✓ Removed {}", store.path().display());
    } else {
        println!("No stored token at {}", store.path().display());
    }
    Ok(())
}
