use console::{style, Term};
use std::io::{self, BufRead};

/// One text input in a prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptField {
    pub label: String,
    pub default: Option<String>,
}

impl PromptField {
    pub fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            default: None,
        }
    }

    pub fn with_default(mut self, default: &str) -> Self {
        self.default = Some(default.to_string());
        self
    }
}

/// The UI the install flow talks to.
pub trait Host {
    /// Ask for one value per field. Answers come back in field order.
    fn prompt_for_text(&self, title: &str, fields: &[PromptField]) -> io::Result<Vec<String>>;

    fn show_message(&self, text: &str);
}

/// Prompts on stderr and prints messages to stdout.
pub struct TerminalHost {
    prompt: Term,
    out: Term,
}

impl TerminalHost {
    pub fn new() -> Self {
        Self {
            prompt: Term::stderr(),
            out: Term::stdout(),
        }
    }
}

impl Default for TerminalHost {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalHost {
    /// One line of input. When stderr is not a terminal (piped, redirected)
    /// answers are read from stdin line by line instead.
    fn read_answer(&self) -> io::Result<String> {
        if self.prompt.is_term() {
            return self.prompt.read_line();
        }
        let mut line = String::new();
        io::stdin().lock().read_line(&mut line)?;
        Ok(line)
    }
}

impl Host for TerminalHost {
    fn prompt_for_text(&self, title: &str, fields: &[PromptField]) -> io::Result<Vec<String>> {
        self.prompt.write_line(&style(title).bold().to_string())?;
        collect_answers(fields, |field| {
            let label = match &field.default {
                Some(default) => format!("{} [{}]: ", field.label, style(default).dim()),
                None => format!("{}: ", field.label),
            };
            self.prompt.write_str(&label)?;
            self.read_answer()
        })
    }

    fn show_message(&self, text: &str) {
        if let Err(e) = self.out.write_line(text) {
            tracing::error!("Could not print message: {}", e);
        }
    }
}

/// Ask each field in turn. Blank answers, including end of input, take the
/// field's default.
fn collect_answers<F>(fields: &[PromptField], mut ask: F) -> io::Result<Vec<String>>
where
    F: FnMut(&PromptField) -> io::Result<String>,
{
    let mut answers = Vec::with_capacity(fields.len());
    for field in fields {
        let answer = ask(field)?;
        let answer = answer.trim();
        answers.push(match (&field.default, answer.is_empty()) {
            (Some(default), true) => default.clone(),
            _ => answer.to_string(),
        });
    }
    Ok(answers)
}

/// Answers prompts from values given up front, e.g. on the command line.
pub struct PresetHost<H> {
    inner: H,
    answers: Vec<String>,
}

impl<H: Host> PresetHost<H> {
    pub fn new(inner: H, answers: Vec<String>) -> Self {
        Self { inner, answers }
    }
}

impl<H: Host> Host for PresetHost<H> {
    fn prompt_for_text(&self, _title: &str, fields: &[PromptField]) -> io::Result<Vec<String>> {
        Ok(fields
            .iter()
            .enumerate()
            .map(|(i, field)| match self.answers.get(i) {
                Some(answer) if !answer.is_empty() => answer.clone(),
                _ => field.default.clone().unwrap_or_default(),
            })
            .collect())
    }

    fn show_message(&self, text: &str) {
        self.inner.show_message(text);
    }
}
