//! Admin credential helpers.

use clap::{Args, Subcommand};

use schoolsite_auth::PasswordHasher;
use schoolsite_core::error::AppError;

use crate::output;

/// Arguments for auth commands
#[derive(Debug, Args)]
pub struct AuthArgs {
    /// Auth subcommand
    #[command(subcommand)]
    pub command: AuthCommand,
}

/// Auth subcommands
#[derive(Debug, Subcommand)]
pub enum AuthCommand {
    /// Prompt for a password and print its argon2 hash for `auth.static_password_hash`
    HashPassword,
}

/// Execute auth commands
pub fn execute(args: &AuthArgs) -> Result<(), AppError> {
    match &args.command {
        AuthCommand::HashPassword => {
            let password = dialoguer::Password::new()
                .with_prompt("Admin password")
                .with_confirmation("Repeat password", "Passwords do not match")
                .interact()
                .map_err(|e| AppError::internal(format!("Input error: {e}")))?;

            let hash = PasswordHasher::new().hash_password(&password)?;
            output::print_success("Set this as auth.static_password_hash:");
            println!("{hash}");
        }
    }

    Ok(())
}
