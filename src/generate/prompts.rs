use super::error::{GenerateError, Result};

/// A prompt ready to hand to the generation tool. Never empty or whitespace-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt(String);

impl Prompt {
    pub fn new(text: impl Into<String>) -> Result<Self> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(GenerateError::EmptyPrompt);
        }
        Ok(Self(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

pub const QUOTE_PROMPT: &str =
    "Generate a short inspiring quote about programming and technology. Keep it under 50 words.";

pub const DEFAULT_BLOG_TOPIC: &str = "Future of AI";
pub const DEFAULT_CODE_TASK: &str = "reverse a string";

/// Canned generation shortcuts offered from the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuickAction {
    Quote,
    Blog,
    Code,
    Explain,
}

impl QuickAction {
    /// Title used for input dialogs and status messages.
    pub fn title(self) -> &'static str {
        match self {
            QuickAction::Quote => "Quote",
            QuickAction::Blog => "Blog",
            QuickAction::Code => "Code",
            QuickAction::Explain => "Explanation",
        }
    }

    /// Question shown when the action needs a value from the user.
    pub fn input_label(self) -> Option<&'static str> {
        match self {
            QuickAction::Blog => Some("Blog topic:"),
            QuickAction::Code => Some("What function to create?"),
            QuickAction::Quote | QuickAction::Explain => None,
        }
    }

    pub fn default_input(self) -> &'static str {
        match self {
            QuickAction::Blog => DEFAULT_BLOG_TOPIC,
            QuickAction::Code => DEFAULT_CODE_TASK,
            QuickAction::Quote | QuickAction::Explain => "",
        }
    }

    /// Rough wait shown while the tool runs.
    pub fn wait_hint(self) -> &'static str {
        match self {
            QuickAction::Quote | QuickAction::Explain => "15-30 seconds",
            QuickAction::Blog => "30-60 seconds",
            QuickAction::Code => "20-40 seconds",
        }
    }

    /// Generated text goes into the buffer; explanations are only displayed.
    pub fn inserts(self) -> bool {
        !matches!(self, QuickAction::Explain)
    }

    /// Build the full prompt. `input` is the topic, task description or
    /// selected text depending on the action, and is ignored for quotes.
    pub fn prompt(self, input: &str) -> Result<Prompt> {
        match self {
            QuickAction::Quote => Prompt::new(QUOTE_PROMPT),
            QuickAction::Blog => {
                non_empty(input)?;
                Prompt::new(format!("Write a 200-word blog post about: {}", input))
            }
            QuickAction::Code => {
                non_empty(input)?;
                Prompt::new(format!(
                    "Write a Python function to {}. Include comments and a usage example.",
                    input
                ))
            }
            QuickAction::Explain => {
                non_empty(input)?;
                Prompt::new(format!("Explain this briefly:\n\n{}", input))
            }
        }
    }
}

fn non_empty(input: &str) -> Result<()> {
    if input.trim().is_empty() {
        Err(GenerateError::EmptyPrompt)
    } else {
        Ok(())
    }
}
