use std::collections::HashMap;

/// What a rendered control does when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiAction {
    Reserve { replica_id: i64 },
    EditQuantity { booking_id: i64 },
    Cancel { booking_id: i64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEvent {
    Click,
    Submit,
}

/// A handler the view registers on the element with `control_id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub control_id: String,
    pub event: UiEvent,
    pub action: UiAction,
}

/// Markup for the mount point plus the handlers it needs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rendered {
    pub markup: String,
    pub bindings: Vec<Binding>,
}

impl Rendered {
    pub fn message(markup: String) -> Self {
        Self {
            markup,
            bindings: Vec::new(),
        }
    }
}

/// The mount point and the blocking prompts of the host page.
pub trait View {
    /// Replace the whole content of the mount point, dropping old bindings.
    fn mount(&mut self, content: Rendered);

    fn alert(&mut self, message: &str);

    fn confirm(&mut self, question: &str) -> bool;

    /// Current value of the input with this id, if one is mounted.
    fn input_value(&self, control_id: &str) -> Option<String>;
}

impl<V: View + ?Sized> View for &mut V {
    fn mount(&mut self, content: Rendered) {
        (**self).mount(content)
    }

    fn alert(&mut self, message: &str) {
        (**self).alert(message)
    }

    fn confirm(&mut self, question: &str) -> bool {
        (**self).confirm(question)
    }

    fn input_value(&self, control_id: &str) -> Option<String> {
        (**self).input_value(control_id)
    }
}

/// Headless [`View`]: keeps the mounted content, records prompts and lets
/// the caller type into inputs and answer confirmations.
#[derive(Debug, Default)]
pub struct MemoryView {
    content: Rendered,
    inputs: HashMap<String, String>,
    alerts: Vec<String>,
    questions: Vec<String>,
    confirm_answer: bool,
    mounts: usize,
}

impl MemoryView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answer_confirm(&mut self, answer: bool) {
        self.confirm_answer = answer;
    }

    pub fn set_input(&mut self, control_id: impl Into<String>, value: impl Into<String>) {
        self.inputs.insert(control_id.into(), value.into());
    }

    pub fn markup(&self) -> &str {
        &self.content.markup
    }

    pub fn bindings(&self) -> &[Binding] {
        &self.content.bindings
    }

    /// Action bound to `control_id` for `event`, as a click or submit would trigger.
    pub fn trigger(&self, control_id: &str, event: UiEvent) -> Option<UiAction> {
        self.content
            .bindings
            .iter()
            .find(|binding| binding.control_id == control_id && binding.event == event)
            .map(|binding| binding.action)
    }

    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }

    pub fn questions(&self) -> &[String] {
        &self.questions
    }

    pub fn mount_count(&self) -> usize {
        self.mounts
    }
}

impl View for MemoryView {
    fn mount(&mut self, content: Rendered) {
        self.inputs.clear();
        for (id, value) in input_defaults(&content.markup) {
            self.inputs.insert(id, value);
        }
        self.content = content;
        self.mounts += 1;
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }

    fn confirm(&mut self, question: &str) -> bool {
        self.questions.push(question.to_string());
        self.confirm_answer
    }

    fn input_value(&self, control_id: &str) -> Option<String> {
        self.inputs.get(control_id).cloned()
    }
}

/// `(id, value)` of every `<input>` in markup produced by [`crate::ui`].
fn input_defaults(markup: &str) -> Vec<(String, String)> {
    let mut found = Vec::new();
    let mut rest = markup;
    while let Some(start) = rest.find("<input") {
        let tail = &rest[start..];
        let end = tail.find('>').unwrap_or(tail.len());
        let tag = &tail[..end];
        if let (Some(id), Some(value)) = (attribute(tag, "id"), attribute(tag, "value")) {
            found.push((id, value));
        }
        rest = &tail[end..];
    }
    found
}

fn attribute(tag: &str, name: &str) -> Option<String> {
    let needle = format!(" {name}=\"");
    let start = tag.find(&needle)? + needle.len();
    let len = tag[start..].find('"')?;
    Some(tag[start..start + len].to_string())
}
