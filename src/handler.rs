//! Slot-filling registration conversation handler.
//!
//! The handler owns the canonical [`CollectedInfo`] snapshot and walks the
//! registrant through one field at a time. The upstream assistant judges
//! whether a user message answers the current field: replies beginning with
//! `VALID:` record the (cleaned) answer and advance to the next field, any
//! other reply leaves the state untouched.

use std::sync::{Arc, LazyLock};

use regex::Regex;

use crate::assistant::Assistant;
use crate::error::Result;
use crate::observability::{HANDLER_COMPLETIONS, HANDLER_FIELDS_CAPTURED, HANDLER_TURNS};
use crate::types::{ChatReply, CollectedInfo};

/// Prefix the assistant uses to mark a user message as a valid answer.
pub const VALID_PREFIX: &str = "VALID:";

static NAME_PREFIXES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(?:my name is|i am|it's|its|i'm|\s)+").unwrap());
static USERNAME_PREFIXES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(?:my username is|username|\s)+").unwrap());
static USERNAME_CHARS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\w\-]").unwrap());
static WORKPLACE_PREFIXES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:i work at|i study at|i'm at|i am at|workplace is|school is|\s)+").unwrap()
});
static TRAILING_PUNCTUATION: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[.,!]$").unwrap());

/// The field the handler is currently collecting.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Field {
    /// The registrant's display name.
    Name,

    /// The login name.
    Username,

    /// The password.
    Password,

    /// Workplace or school.
    Workplace,

    /// Every field has been captured.
    Completed,
}

impl Field {
    /// Returns the field collected after this one.
    fn next(self) -> Field {
        match self {
            Field::Name => Field::Username,
            Field::Username => Field::Password,
            Field::Password => Field::Workplace,
            Field::Workplace => Field::Completed,
            Field::Completed => Field::Completed,
        }
    }

    /// Returns the snake_case key used in prompts.
    pub fn key(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Username => "username",
            Field::Password => "password",
            Field::Workplace => "workplace",
            Field::Completed => "completed",
        }
    }
}

/// Conversation state for one registration session.
///
/// As in the original service, one handler instance serves the whole process;
/// the wire contract carries no session identifier.
pub struct RegistrationHandler {
    assistant: Arc<dyn Assistant>,
    collected: CollectedInfo,
    current: Field,
}

impl RegistrationHandler {
    /// Creates a new handler starting at the `name` field with nothing
    /// collected.
    pub fn new(assistant: Arc<dyn Assistant>) -> Self {
        Self {
            assistant,
            collected: CollectedInfo::new(),
            current: Field::Name,
        }
    }

    /// Returns the canonical snapshot.
    pub fn collected(&self) -> &CollectedInfo {
        &self.collected
    }

    /// Returns the field currently being collected.
    pub fn current_field(&self) -> Field {
        self.current
    }

    /// Handles one user message and produces the reply for the wire.
    ///
    /// # Errors
    ///
    /// Returns an error if the upstream assistant call fails; the
    /// conversation state is left unchanged in that case.
    pub async fn handle_message(&mut self, user_message: &str) -> Result<ChatReply> {
        HANDLER_TURNS.click();
        let system_prompt = self.system_prompt();
        let ai_message = self.assistant.reply(&system_prompt, user_message).await?;

        let display_message = match ai_message.strip_prefix(VALID_PREFIX) {
            Some(rest) => {
                self.record_answer(user_message);
                rest.trim_start().to_string()
            }
            None => ai_message,
        };

        let registration_complete =
            self.current == Field::Completed && self.collected.is_complete();

        Ok(ChatReply::new(
            display_message,
            self.collected.clone(),
            registration_complete,
        ))
    }

    fn system_prompt(&self) -> String {
        let collected =
            serde_json::to_string_pretty(&self.collected).unwrap_or_else(|_| "{}".to_string());
        format!(
            "You are a registration assistant. You need to collect: name, username, password, and workplace/school.\n\
             Currently collecting: {current}\n\
             Already collected: {collected}\n\
             \n\
             Respond naturally and conversationally. Ask for one piece of information at a time.\n\
             For passwords, ensure they are at least 8 characters with numbers and special characters.\n\
             \n\
             IMPORTANT: When the user provides valid information, start your response with \"VALID:\"\n\
             When the user asks questions or provides invalid input, respond normally without the \"VALID:\" prefix.",
            current = self.current.key(),
            collected = collected,
        )
    }

    /// Records the user's message into the current field, advancing on
    /// success. Passwords are stored verbatim; other fields are cleaned
    /// first and only non-empty results are accepted.
    fn record_answer(&mut self, user_message: &str) {
        let accepted = match self.current {
            Field::Name if self.collected.name.is_none() => {
                let cleaned = clean_field_input(Field::Name, user_message);
                if cleaned.is_empty() {
                    false
                } else {
                    self.collected.name = Some(cleaned);
                    true
                }
            }
            Field::Username if self.collected.username.is_none() => {
                let cleaned = clean_field_input(Field::Username, user_message);
                if cleaned.is_empty() {
                    false
                } else {
                    self.collected.username = Some(cleaned);
                    true
                }
            }
            Field::Password if self.collected.password.is_none() => {
                if user_message.chars().count() >= 8 {
                    self.collected.password = Some(user_message.to_string());
                    true
                } else {
                    false
                }
            }
            Field::Workplace if self.collected.workplace.is_none() => {
                let cleaned = clean_field_input(Field::Workplace, user_message);
                if cleaned.is_empty() {
                    false
                } else {
                    self.collected.workplace = Some(cleaned);
                    true
                }
            }
            _ => false,
        };

        if accepted {
            HANDLER_FIELDS_CAPTURED.click();
            self.current = self.current.next();
            if self.current == Field::Completed {
                HANDLER_COMPLETIONS.click();
            }
        }
    }
}

/// Clean raw user input for the given field.
///
/// Strips conversational prefixes ("my name is ...", "i work at ...") and
/// normalizes the remainder per field. Passwords are never cleaned; this
/// function returns them unchanged.
pub fn clean_field_input(field: Field, value: &str) -> String {
    let value = value.trim();

    match field {
        Field::Name => {
            let stripped = NAME_PREFIXES.replace(value, "");
            let stripped = TRAILING_PUNCTUATION.replace(&stripped, "");
            title_case(&stripped)
        }
        Field::Username => {
            let stripped = USERNAME_PREFIXES.replace(value, "");
            USERNAME_CHARS
                .replace_all(stripped.trim(), "")
                .to_lowercase()
        }
        Field::Workplace => {
            let stripped = WORKPLACE_PREFIXES.replace(value, "");
            let stripped = TRAILING_PUNCTUATION.replace(&stripped, "");
            stripped.trim().to_string()
        }
        Field::Password | Field::Completed => value.to_string(),
    }
}

/// Capitalize the first letter of each word, lowercasing the rest.
fn title_case(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    let mut prev_alphabetic = false;
    for c in value.chars() {
        if c.is_alphabetic() {
            if prev_alphabetic {
                result.extend(c.to_lowercase());
            } else {
                result.extend(c.to_uppercase());
            }
            prev_alphabetic = true;
        } else {
            result.push(c);
            prev_alphabetic = false;
        }
    }
    result
}
