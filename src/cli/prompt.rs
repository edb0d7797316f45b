//! Interactive input.
//!
//! On a terminal every prompt goes through `dialoguer`.  When stdin is
//! piped, prompts read one line each from stdin instead, which is how
//! scripts and the integration tests drive pm.

use std::io::{self, BufRead, IsTerminal};

use dialoguer::{Confirm, Input, Password};
use zeroize::Zeroizing;

use super::output;
use super::MIN_PASSWORD_LEN;
use crate::errors::{PmError, Result};

/// Environment variable that supplies the master password non-interactively.
pub const PASSWORD_ENV: &str = "PM_MASTER_PASSWORD";

/// Get the master password, trying in order:
/// 1. `PM_MASTER_PASSWORD` env var
/// 2. Interactive hidden prompt (or a line from piped stdin)
///
/// Returns `Zeroizing<String>` so the password is wiped from memory on drop.
pub fn master_password() -> Result<Zeroizing<String>> {
    if let Some(pw) = password_from_env() {
        return Ok(pw);
    }
    secret("Enter master password")
}

/// Prompt for a new master password with confirmation (used during `init`).
///
/// Also respects `PM_MASTER_PASSWORD` for scripted usage.
/// Enforces a minimum password length.
pub fn new_master_password() -> Result<Zeroizing<String>> {
    if let Some(pw) = password_from_env() {
        check_length(&pw)?;
        return Ok(pw);
    }

    if !io::stdin().is_terminal() {
        let first = read_line()?;
        let second = read_line()?;
        if *first != *second {
            return Err(PmError::PasswordMismatch);
        }
        check_length(&first)?;
        return Ok(first);
    }

    loop {
        let password = Password::new()
            .with_prompt("Enter master password")
            .with_confirmation(
                "Confirm master password",
                "Passwords do not match, try again",
            )
            .interact()
            .map_err(|e| PmError::CommandFailed(format!("password prompt: {e}")))?;

        if password.len() < MIN_PASSWORD_LEN {
            output::warning(&format!(
                "Password must be at least {MIN_PASSWORD_LEN} characters. Try again."
            ));
            continue;
        }

        return Ok(Zeroizing::new(password));
    }
}

/// Hidden single-line input.  May be empty.
pub fn secret(prompt: &str) -> Result<Zeroizing<String>> {
    if !io::stdin().is_terminal() {
        return read_line();
    }
    let value = Password::new()
        .with_prompt(prompt)
        .allow_empty_password(true)
        .interact()
        .map_err(|e| PmError::CommandFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(value))
}

/// Move a prompted secret into the plain `String` a record stores.
///
/// The buffer is moved rather than copied, so no unwiped duplicate is
/// left behind by the wrapper.
pub fn take_secret(mut secret: Zeroizing<String>) -> String {
    std::mem::take(&mut *secret)
}

/// Visible single-line input.  May be empty.
pub fn line(prompt: &str) -> Result<String> {
    if !io::stdin().is_terminal() {
        let value = read_line()?;
        return Ok(value.to_string());
    }
    Input::<String>::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()
        .map_err(|e| PmError::CommandFailed(format!("input prompt: {e}")))
}

/// Yes/no confirmation, defaulting to no.
pub fn confirm(prompt: &str) -> Result<bool> {
    if !io::stdin().is_terminal() {
        let answer = read_line()?;
        return Ok(matches!(answer.trim(), "y" | "Y" | "yes"));
    }
    Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| PmError::CommandFailed(format!("confirm prompt: {e}")))
}

fn password_from_env() -> Option<Zeroizing<String>> {
    match std::env::var(PASSWORD_ENV) {
        Ok(pw) if !pw.is_empty() => Some(Zeroizing::new(pw)),
        _ => None,
    }
}

fn check_length(password: &str) -> Result<()> {
    if password.len() < MIN_PASSWORD_LEN {
        return Err(PmError::CommandFailed(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    Ok(())
}

/// One line from stdin without its line ending.  EOF reads as empty.
fn read_line() -> Result<Zeroizing<String>> {
    let mut buf = Zeroizing::new(String::new());
    io::stdin().lock().read_line(&mut buf)?;
    let trimmed = buf.trim_end_matches(['\r', '\n']).len();
    buf.truncate(trimmed);
    Ok(buf)
}
