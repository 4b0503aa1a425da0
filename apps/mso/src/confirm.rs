//! Interactive confirmation for destructive commands

use dialoguer::{theme::ColorfulTheme, Confirm};
use mso_errors::Error;

/// Ask before changing anything unless `--yes` was given.
///
/// Declining yields [`Error::Cancelled`].
pub fn confirm_destructive(prompt: &str, yes: bool) -> Result<(), Error> {
    if yes {
        return Ok(());
    }

    let proceed = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| Error::internal(format!("Failed to get user confirmation: {e}")))?;

    if proceed {
        Ok(())
    } else {
        Err(Error::Cancelled)
    }
}
