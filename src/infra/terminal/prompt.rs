use std::{io, sync::Arc};

use async_trait::async_trait;
use tokio::{
    io::{AsyncBufRead, AsyncBufReadExt, AsyncWriteExt, BufReader, Lines, Stdin},
    sync::Mutex,
};
use tracing::warn;

use crate::application::notify::Confirm;

/// Line reader shared by the command loop and confirmation prompts.
pub struct SharedInput<R = BufReader<Stdin>> {
    lines: Arc<Mutex<Lines<R>>>,
}

impl<R> Clone for SharedInput<R> {
    fn clone(&self) -> Self {
        Self {
            lines: Arc::clone(&self.lines),
        }
    }
}

impl SharedInput<BufReader<Stdin>> {
    pub fn stdin() -> Self {
        Self::new(BufReader::new(tokio::io::stdin()))
    }
}

impl<R: AsyncBufRead + Unpin + Send> SharedInput<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: Arc::new(Mutex::new(reader.lines())),
        }
    }

    /// Next line without its terminator, or `None` at end of input.
    /// Cancel safe.
    pub async fn next_line(&self) -> io::Result<Option<String>> {
        self.lines.lock().await.next_line().await
    }
}

/// Asks on stdout and reads the answer from the shared input.
pub struct PromptConfirm<R = BufReader<Stdin>> {
    input: SharedInput<R>,
}

impl<R> PromptConfirm<R> {
    pub fn new(input: SharedInput<R>) -> Self {
        Self { input }
    }
}

#[async_trait]
impl<R: AsyncBufRead + Unpin + Send + 'static> Confirm for PromptConfirm<R> {
    async fn confirm(&self, question: &str) -> bool {
        let mut stdout = tokio::io::stdout();
        let prompt = format!("{question} [y/N] ");
        if let Err(err) = stdout.write_all(prompt.as_bytes()).await {
            warn!(error = %err, "failed to write confirmation prompt");
        }
        let _ = stdout.flush().await;

        match self.input.next_line().await {
            Ok(Some(answer)) => is_yes(&answer),
            Ok(None) => false,
            Err(err) => {
                warn!(error = %err, "failed to read confirmation answer");
                false
            }
        }
    }
}

/// Answers every question the same way.
#[derive(Debug, Clone, Copy)]
pub struct AutoConfirm(pub bool);

#[async_trait]
impl Confirm for AutoConfirm {
    async fn confirm(&self, _question: &str) -> bool {
        self.0
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
