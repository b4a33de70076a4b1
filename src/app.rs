use tokio::sync::mpsc;

use genpad::buffer::TextBuffer;
use genpad::config::AppConfig;
use genpad::generate::{Invoker, Prompt, QuickAction};

const WELCOME_TEXT: &str = "\
# genpad: Free AI Editor

AI features (local and offline):
--------------------------------------
* Ctrl+A  AI Assistant
* F2      Generate quote
* F3      Write blog post
* F4      Generate code
* Ctrl+E  Explain selected text
* F1      Help

Output from the model is cleaned before it reaches the editor.
Start using AI!
";

/// What asked for a generation, which decides where the result goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Generation {
    Assistant,
    Quick(QuickAction),
}

impl Generation {
    fn wait_hint(self) -> &'static str {
        match self {
            Generation::Assistant => "15-30 seconds",
            Generation::Quick(action) => action.wait_hint(),
        }
    }
}

/// Events sent from background tasks back to the main loop.
#[derive(Debug)]
pub enum BgEvent {
    Generated { generation: Generation, text: String },
    Failed { generation: Generation, message: String },
}

/// Active modal overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActiveModal {
    None,
    Assistant,
    /// Assistant produced a response; asking whether to insert it.
    ConfirmInsert,
    QuickInput(QuickAction),
    Explanation(String),
    Help,
}

/// Central application state.
pub struct App {
    pub running: bool,
    pub invoker: Invoker,

    // Document
    pub buffer: TextBuffer,
    /// (row, column) of the top-left visible cell.
    pub editor_scroll: (usize, usize),

    // UI state
    pub modal: ActiveModal,
    pub status_message: String,
    pub status_is_error: bool,

    // Modal input buffer (byte cursor, always on a char boundary)
    pub input_buffer: String,
    pub input_cursor: usize,
    pub assistant_response: String,
    /// Assistant response waiting for the current modal to close.
    pub response_waiting: bool,

    // Generation bookkeeping. At most one runs at a time.
    pub pending_generation: Option<(Generation, Prompt)>,
    pub generating: bool,
    pub bg_tx: mpsc::UnboundedSender<BgEvent>,
    pub bg_rx: mpsc::UnboundedReceiver<BgEvent>,
}

impl App {
    pub fn new(config: &AppConfig) -> Self {
        let invoker = Invoker::from_settings(&config.generator);
        let (bg_tx, bg_rx) = mpsc::unbounded_channel();
        Self {
            running: true,
            invoker,
            buffer: TextBuffer::new(WELCOME_TEXT),
            editor_scroll: (0, 0),
            modal: ActiveModal::None,
            status_message: String::from("Free AI ready | Ctrl+A assistant | F1 help"),
            status_is_error: false,
            input_buffer: String::new(),
            input_cursor: 0,
            assistant_response: String::new(),
            response_waiting: false,
            pending_generation: None,
            generating: false,
            bg_tx,
            bg_rx,
        }
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
        self.status_is_error = false;
    }

    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
        self.status_is_error = true;
    }

    fn reset_input(&mut self, value: &str) {
        self.input_buffer = value.to_string();
        self.input_cursor = self.input_buffer.len();
    }

    pub fn open_assistant(&mut self) {
        self.reset_input("");
        self.modal = ActiveModal::Assistant;
    }

    /// Start a quick action, asking for its input first when it needs one.
    pub fn open_quick(&mut self, action: QuickAction) {
        match action {
            QuickAction::Quote => {
                if let Ok(prompt) = action.prompt("") {
                    self.request_generation(Generation::Quick(action), prompt);
                }
            }
            QuickAction::Blog | QuickAction::Code => {
                self.reset_input(action.default_input());
                self.modal = ActiveModal::QuickInput(action);
            }
            QuickAction::Explain => {
                let built = match self.buffer.selected_text() {
                    Some(selected) => action.prompt(selected),
                    None => {
                        self.set_error("Please select some text first!");
                        return;
                    }
                };
                match built {
                    Ok(prompt) => {
                        self.request_generation(Generation::Quick(action), prompt);
                    }
                    Err(_) => self.set_error("Please select some text first!"),
                }
            }
        }
    }

    pub fn submit_assistant_prompt(&mut self) {
        match Prompt::new(self.input_buffer.clone()) {
            Ok(prompt) => {
                if self.request_generation(Generation::Assistant, prompt) {
                    self.assistant_response.clear();
                }
            }
            Err(e) => self.set_error(e.to_string()),
        }
    }

    pub fn submit_quick_input(&mut self, action: QuickAction) {
        match action.prompt(&self.input_buffer) {
            Ok(prompt) => {
                if self.request_generation(Generation::Quick(action), prompt) {
                    self.modal = ActiveModal::None;
                }
            }
            Err(_) => {
                let label = action.input_label().unwrap_or("Input").trim_end_matches(':');
                self.set_error(format!("{} cannot be empty", label));
            }
        }
    }

    /// Queue a generation for the main loop to spawn. Refused while another
    /// one is still running.
    pub fn request_generation(&mut self, generation: Generation, prompt: Prompt) -> bool {
        if self.generating || self.pending_generation.is_some() {
            self.set_status("A generation is already in progress...");
            return false;
        }
        self.pending_generation = Some((generation, prompt));
        self.generating = true;
        self.set_status(format!(
            "Generating... (may take {})",
            generation.wait_hint()
        ));
        true
    }

    /// Apply the result of a background generation.
    pub fn handle_bg_event(&mut self, event: BgEvent) {
        self.generating = false;
        match event {
            BgEvent::Generated {
                generation: Generation::Assistant,
                text,
            } => {
                self.assistant_response = text;
                if matches!(self.modal, ActiveModal::None | ActiveModal::Assistant) {
                    self.modal = ActiveModal::ConfirmInsert;
                    self.set_status("Response ready");
                } else {
                    self.response_waiting = true;
                    self.set_status("Assistant response ready");
                }
            }
            BgEvent::Generated {
                generation: Generation::Quick(action),
                text,
            } => {
                if action.inserts() {
                    self.buffer.insert_generated(&text);
                    self.set_status(format!("{} inserted!", action.title()));
                } else {
                    self.modal = ActiveModal::Explanation(text);
                    self.set_status("Explanation ready");
                }
            }
            BgEvent::Failed { generation, message } => {
                if generation == Generation::Assistant {
                    self.assistant_response = message.clone();
                }
                self.set_error(message);
            }
        }
    }

    /// Ask about a waiting assistant response once no other modal is open.
    pub fn show_waiting_response(&mut self) {
        if self.response_waiting && self.modal == ActiveModal::None {
            self.response_waiting = false;
            self.modal = ActiveModal::ConfirmInsert;
        }
    }

    /// Answer the "Insert into editor?" question.
    pub fn confirm_insert(&mut self, insert: bool) {
        if insert {
            let text = std::mem::take(&mut self.assistant_response);
            self.buffer.insert_generated(&text);
            self.modal = ActiveModal::None;
            self.set_status("Response inserted");
        } else {
            self.reset_input("");
            self.modal = ActiveModal::Assistant;
        }
    }
}
