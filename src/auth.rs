//! Password acquisition for the CLI.
//!
//! Three sources, tried in order: the `PAGELOCK_PASSWORD` environment
//! variable, piped stdin, and an interactive prompt. `build` asks for
//! confirmation on the interactive and piped paths since a typo there
//! produces an artifact nobody can unlock.

use anyhow::{Result, bail};
use std::io::{self, BufRead, IsTerminal};
use zeroize::Zeroizing;

pub const PASSWORD_ENV: &str = "PAGELOCK_PASSWORD";

/// Reads the password for a build or a verify run.
///
/// With `confirm`, the piped path expects the password twice on two
/// lines, and the interactive path prompts twice.
pub fn read_password(confirm: bool) -> Result<Zeroizing<String>> {
    //  PAGELOCK_PASSWORD="secret" pagelock build
    if let Ok(pw) = std::env::var(PASSWORD_ENV) {
        if !pw.is_empty() {
            return Ok(Zeroizing::new(pw));
        }
    }

    //  printf "%s\n%s\n" "$PW" "$PW" | pagelock build
    if !io::stdin().is_terminal() {
        return read_piped(confirm);
    }

    let pw1 = if confirm {
        rpassword::prompt_password("New password: ")?
    } else {
        rpassword::prompt_password("Password: ")?
    };

    if pw1.is_empty() {
        bail!("password cannot be empty");
    }

    if confirm {
        let pw2 = rpassword::prompt_password("Confirm password: ")?;
        if pw1 != pw2 {
            bail!("passwords do not match");
        }
    }

    Ok(Zeroizing::new(pw1))
}

fn read_piped(confirm: bool) -> Result<Zeroizing<String>> {
    let stdin = io::stdin();
    let mut handle = stdin.lock();

    let mut pw1 = Zeroizing::new(String::new());
    handle.read_line(&mut pw1)?;
    trim_newline(&mut pw1);

    if pw1.is_empty() {
        bail!("password cannot be empty");
    }

    if confirm {
        let mut pw2 = Zeroizing::new(String::new());
        handle.read_line(&mut pw2)?;
        trim_newline(&mut pw2);

        if pw1 != pw2 {
            bail!("passwords do not match");
        }
    }

    Ok(pw1)
}

fn trim_newline(s: &mut String) {
    while s.ends_with('\n') || s.ends_with('\r') {
        s.pop();
    }
}
