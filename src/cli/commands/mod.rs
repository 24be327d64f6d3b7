pub mod auth;
pub mod browse;
pub mod products;

use anyhow::{bail, Result};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines, Stdin};

use crate::forms::FormErrors;

pub type StdinLines = Lines<BufReader<Stdin>>;

pub fn stdin_lines() -> StdinLines {
    BufReader::new(tokio::io::stdin()).lines()
}

/// Print `prompt` without a newline and read one line. `None` at end of input.
pub async fn prompt(lines: &mut StdinLines, prompt: &str) -> Result<Option<String>> {
    let mut stdout = tokio::io::stdout();
    stdout.write_all(prompt.as_bytes()).await?;
    stdout.flush().await?;
    Ok(lines.next_line().await?)
}

/// Report validation failures per field. Nothing is dispatched.
pub fn invalid(errors: FormErrors) -> Result<()> {
    for (field, error) in errors.iter() {
        eprintln!("  {field}: {error}");
    }
    bail!("Invalid input")
}
