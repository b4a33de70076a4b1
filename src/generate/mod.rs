//! Text generation through an external language-model CLI.
//!
//! [`Invoker::invoke`] is synchronous and blocks for as long as the tool runs;
//! [`spawn_generation`] moves it onto tokio's blocking pool so the UI loop
//! stays responsive.

pub mod error;
pub mod invoker;
pub mod prompts;
pub mod sanitize;

use tokio::task::JoinHandle;

pub use error::{ErrorKind, GenerateError, Result};
pub use invoker::Invoker;
pub use prompts::{Prompt, QuickAction};
pub use sanitize::{clean, clean_bytes, clean_output};

/// Run `invoker` on a blocking worker thread.
pub fn spawn_generation(invoker: Invoker, prompt: Prompt) -> JoinHandle<Result<String>> {
    tokio::task::spawn_blocking(move || invoker.invoke(&prompt))
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn spawned_generation_returns_cleaned_text() {
        let dir = tempfile::TempDir::new().unwrap();
        let invoker = Invoker::new("sh")
            .args(["-c", r"printf '\033[1mbold\033[0m\n'"])
            .work_dir(dir.path());
        let result = spawn_generation(invoker, Prompt::new("x").unwrap())
            .await
            .unwrap();
        assert_eq!(result.unwrap(), "bold");
    }
}
