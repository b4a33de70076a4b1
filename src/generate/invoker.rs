use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::Instant;

use tracing::{debug, info, warn};
use uuid::Uuid;

use super::error::{GenerateError, Result};
use super::prompts::Prompt;
use super::sanitize::clean_output;
use crate::config::GeneratorSettings;

/// Largest response read back from the tool; anything past it is dropped.
pub const DEFAULT_MAX_CAPTURE_BYTES: usize = 49_999;
pub const DEFAULT_INSTALL_HINT: &str = "https://ollama.com/download";

const TRIMMED: &[char] = &[' ', '\t', '\n', '\r'];

/// Runs one prompt through an external generation tool.
///
/// The prompt is written to a request file that becomes the tool's stdin, the
/// tool's stdout goes to a response file, and stderr is discarded. Both files
/// are named per call, so independent invocations never collide.
#[derive(Debug, Clone)]
pub struct Invoker {
    program: String,
    args: Vec<String>,
    work_dir: PathBuf,
    max_capture_bytes: usize,
    install_hint: String,
}

impl Invoker {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            work_dir: std::env::temp_dir(),
            max_capture_bytes: DEFAULT_MAX_CAPTURE_BYTES,
            install_hint: DEFAULT_INSTALL_HINT.to_string(),
        }
    }

    pub fn from_settings(settings: &GeneratorSettings) -> Self {
        let mut invoker = Self::new(settings.program.clone())
            .args(settings.args.iter().cloned())
            .max_capture_bytes(settings.max_capture_bytes)
            .install_hint(settings.install_hint.clone());
        if let Some(ref dir) = settings.work_dir {
            invoker = invoker.work_dir(dir.clone());
        }
        invoker
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn work_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.work_dir = dir.into();
        self
    }

    pub fn max_capture_bytes(mut self, limit: usize) -> Self {
        self.max_capture_bytes = limit;
        self
    }

    pub fn install_hint(mut self, hint: impl Into<String>) -> Self {
        self.install_hint = hint.into();
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Run the tool on `prompt` and return its cleaned, trimmed output.
    ///
    /// Blocks until the tool exits. There is no timeout. An empty or
    /// whitespace-only response is returned as `Ok(String::new())`.
    pub fn invoke(&self, prompt: &Prompt) -> Result<String> {
        let started = Instant::now();
        let files = TransientFiles::new(&self.work_dir);
        info!(
            program = %self.program,
            prompt_bytes = prompt.as_str().len(),
            "starting generation"
        );

        fs::write(&files.request, prompt.as_str()).map_err(GenerateError::CreateRequest)?;
        self.run_tool(&files)?;
        let raw = self.read_response(&files.response)?;
        drop(files);

        let response = clean_output(&raw).trim_matches(TRIMMED).to_string();

        info!(
            raw_bytes = raw.len(),
            response_bytes = response.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "generation finished"
        );
        Ok(response)
    }

    fn run_tool(&self, files: &TransientFiles) -> Result<()> {
        let stdin = File::open(&files.request).map_err(GenerateError::CreateRequest)?;
        let stdout = File::create(&files.response).map_err(GenerateError::CreateResponse)?;

        let status = Command::new(&self.program)
            .args(&self.args)
            .stdin(stdin)
            .stdout(stdout)
            .stderr(Stdio::null())
            .status()
            .map_err(|e| {
                warn!(program = %self.program, error = %e, "could not start generation tool");
                self.tool_error(e.to_string())
            })?;

        if !status.success() {
            warn!(program = %self.program, %status, "generation tool failed");
            return Err(self.tool_error(status.to_string()));
        }
        Ok(())
    }

    fn read_response(&self, path: &Path) -> Result<Vec<u8>> {
        let file = File::open(path).map_err(GenerateError::ReadResponse)?;
        let mut raw = Vec::new();
        // One byte past the limit tells us whether anything was cut.
        file.take(self.max_capture_bytes as u64 + 1)
            .read_to_end(&mut raw)
            .map_err(GenerateError::ReadResponse)?;
        if raw.len() > self.max_capture_bytes {
            raw.truncate(self.max_capture_bytes);
            debug!(limit = self.max_capture_bytes, "response truncated");
        }
        Ok(raw)
    }

    fn tool_error(&self, detail: String) -> GenerateError {
        let program = Path::new(&self.program)
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.program.clone());
        GenerateError::Tool {
            program,
            detail,
            hint: self.install_hint.clone(),
        }
    }
}

/// Request/response paths for a single invocation, removed on drop.
struct TransientFiles {
    request: PathBuf,
    response: PathBuf,
}

impl TransientFiles {
    fn new(dir: &Path) -> Self {
        let id = Uuid::new_v4();
        Self {
            request: dir.join(format!("genpad-{}-request.txt", id)),
            response: dir.join(format!("genpad-{}-response.txt", id)),
        }
    }
}

impl Drop for TransientFiles {
    fn drop(&mut self) {
        remove_quietly(&self.request);
        remove_quietly(&self.response);
    }
}

fn remove_quietly(path: &Path) {
    match fs::remove_file(path) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => debug!(path = %path.display(), error = %e, "could not remove transient file"),
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::generate::ErrorKind;
    use tempfile::TempDir;

    fn script(dir: &TempDir, body: &str) -> Invoker {
        Invoker::new("sh").args(["-c", body]).work_dir(dir.path())
    }

    fn prompt(text: &str) -> Prompt {
        Prompt::new(text).unwrap()
    }

    fn leftovers(dir: &TempDir) -> Vec<PathBuf> {
        fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .collect()
    }

    #[test]
    fn cleans_and_trims_tool_output() {
        let dir = TempDir::new().unwrap();
        let invoker = script(&dir, r"printf '\033[32mHello, world!\033[0m\n'");
        assert_eq!(invoker.invoke(&prompt("hi")).unwrap(), "Hello, world!");
        assert!(leftovers(&dir).is_empty());
    }

    #[test]
    fn prompt_is_fed_on_stdin() {
        let dir = TempDir::new().unwrap();
        let invoker = Invoker::new("cat").work_dir(dir.path());
        let out = invoker.invoke(&prompt("  Write a haiku\nabout rust\n")).unwrap();
        assert_eq!(out, "Write a haiku\nabout rust");
    }

    #[test]
    fn non_zero_exit_is_a_tool_error() {
        let dir = TempDir::new().unwrap();
        let invoker = script(&dir, "echo partial output; exit 3")
            .install_hint("https://example.invalid/install");
        let err = invoker.invoke(&prompt("hi")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Tool);
        let message = err.to_string();
        assert!(message.starts_with("sh failed (exit status: 3)"), "{}", message);
        assert!(message.ends_with("Make sure it's installed: https://example.invalid/install"));
        assert!(leftovers(&dir).is_empty());
    }

    #[test]
    fn missing_program_is_a_tool_error() {
        let dir = TempDir::new().unwrap();
        let invoker = Invoker::new("genpad-no-such-generation-tool").work_dir(dir.path());
        let err = invoker.invoke(&prompt("hi")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Tool);
        assert!(leftovers(&dir).is_empty());
    }

    #[test]
    fn unwritable_request_skips_the_tool() {
        let dir = TempDir::new().unwrap();
        let marker = dir.path().join("ran");
        let invoker = Invoker::new("sh")
            .args(["-c".to_string(), format!("touch '{}'", marker.display())])
            .work_dir(dir.path().join("does-not-exist"));
        let err = invoker.invoke(&prompt("hi")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
        assert_eq!(err.to_string(), "cannot create request");
        assert!(!marker.exists());
    }

    #[test]
    fn vanished_response_is_a_read_error() {
        let dir = TempDir::new().unwrap();
        let body = format!("rm -f '{}'/*-response.txt; echo hi", dir.path().display());
        let invoker = script(&dir, &body);
        let err = invoker.invoke(&prompt("hi")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
        assert_eq!(err.to_string(), "cannot read response");
        assert!(leftovers(&dir).is_empty());
    }

    #[test]
    fn utf8_output_keeps_its_characters() {
        let dir = TempDir::new().unwrap();
        let invoker = script(&dir, r"printf '[1mÃber Ä[0m
'");
        assert_eq!(invoker.invoke(&prompt("hi")).unwrap(), "Ûber ě");
    }

    #[test]
    fn raw_csi_byte_in_non_utf8_output() {
        let dir = TempDir::new().unwrap();
        let invoker = script(&dir, r"printf 'a1mb
'");
        assert_eq!(invoker.invoke(&prompt("hi")).unwrap(), "ab");
    }

    #[test]
    fn blank_output_is_an_empty_success() {
        let dir = TempDir::new().unwrap();
        let invoker = script(&dir, r"printf ' \n\t\033[0m\r\n'");
        assert_eq!(invoker.invoke(&prompt("hi")).unwrap(), "");
    }

    #[test]
    fn long_output_is_truncated() {
        let dir = TempDir::new().unwrap();
        let invoker = script(&dir, "printf 'abcdefghij'").max_capture_bytes(4);
        assert_eq!(invoker.invoke(&prompt("hi")).unwrap(), "abcd");
    }

    #[test]
    fn concurrent_invocations_do_not_share_files() {
        let dir = TempDir::new().unwrap();
        let invoker = Invoker::new("cat").work_dir(dir.path());
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let invoker = invoker.clone();
                std::thread::spawn(move || invoker.invoke(&prompt(&format!("prompt {}", i))))
            })
            .collect();
        for (i, handle) in handles.into_iter().enumerate() {
            assert_eq!(handle.join().unwrap().unwrap(), format!("prompt {}", i));
        }
        assert!(leftovers(&dir).is_empty());
    }

    #[test]
    fn builds_from_settings() {
        let settings = GeneratorSettings {
            program: "/usr/local/bin/ollama".into(),
            args: vec!["run".into(), "llama3".into()],
            max_capture_bytes: 10,
            install_hint: "see docs".into(),
            work_dir: Some(PathBuf::from("/var/tmp")),
        };
        let invoker = Invoker::from_settings(&settings);
        assert_eq!(invoker.program(), "/usr/local/bin/ollama");
        assert_eq!(invoker.args, vec!["run", "llama3"]);
        assert_eq!(invoker.max_capture_bytes, 10);
        assert_eq!(invoker.work_dir, PathBuf::from("/var/tmp"));

        let err = invoker.tool_error("exit status: 1".into());
        assert!(err.to_string().starts_with("ollama failed"));
    }
}
