//! Prompt profiles: the data that distinguishes the organizer from the
//! plain describer.

use std::str::FromStr;

use crate::provider::{ChatCompletionRequest, ChatMessage};

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

const ORGANIZER_SYSTEM: &str = "You are a grocery packing assistant. Read the grocery list in the \
image and respond with exactly one JSON object of the form \
{\"grocery_list\": [\"item\", ...]}. The array must contain every item from the list, \
ordered from most fragile to least fragile. Use plain item names as strings.";

const ORGANIZER_USER: &str = "Here is my grocery list. Organize it from most to least fragile.";

const DESCRIBER_USER: &str = "What's in this image?";

/// How the upload UI presents a successful result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultView {
    /// Extract and render the `grocery_list` array.
    List,
    /// Render the model text verbatim.
    Text,
}

impl ResultView {
    pub fn as_str(self) -> &'static str {
        match self {
            ResultView::List => "list",
            ResultView::Text => "text",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Organize,
    Describe,
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "organize" => Ok(Mode::Organize),
            "describe" => Ok(Mode::Describe),
            other => Err(format!("unknown mode `{other}`, expected `organize` or `describe`")),
        }
    }
}

/// Everything that varies between endpoint variants.
#[derive(Debug, Clone, PartialEq)]
pub struct PromptProfile {
    pub system_instruction: Option<String>,
    pub user_instruction: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub view: ResultView,
}

impl PromptProfile {
    /// Fragility-sorted organizer that answers in a JSON envelope.
    pub fn organize() -> Self {
        Self {
            system_instruction: Some(ORGANIZER_SYSTEM.to_string()),
            user_instruction: ORGANIZER_USER.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: 500,
            temperature: 0.7,
            view: ResultView::List,
        }
    }

    /// Plain image description.
    pub fn describe() -> Self {
        Self {
            system_instruction: None,
            user_instruction: DESCRIBER_USER.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: 300,
            temperature: 0.2,
            view: ResultView::Text,
        }
    }

    pub fn for_mode(mode: Mode) -> Self {
        match mode {
            Mode::Organize => Self::organize(),
            Mode::Describe => Self::describe(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Builds the completion request: optional system turn, then the user
    /// turn carrying `image_data_uri`.
    pub fn build_request(&self, image_data_uri: String) -> ChatCompletionRequest {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = &self.system_instruction {
            messages.push(ChatMessage::system(system.clone()));
        }
        messages.push(ChatMessage::user_with_image(
            self.user_instruction.clone(),
            image_data_uri,
        ));

        ChatCompletionRequest {
            model: self.model.clone(),
            messages,
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::Role;

    #[test]
    fn organizer_leads_with_system_instruction() {
        let request = PromptProfile::organize().build_request("data:image/png;base64,AA==".into());
        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.messages[0].role, Role::System);
        assert_eq!(request.messages[1].role, Role::User);
        assert_eq!(
            request.messages[1].image_url(),
            Some("data:image/png;base64,AA==")
        );
    }

    #[test]
    fn describer_sends_only_user_turn() {
        let request = PromptProfile::describe().build_request("data:image/gif;base64,".into());
        assert_eq!(request.messages.len(), 1);
        assert_eq!(request.messages[0].role, Role::User);
        assert_eq!(request.max_tokens, 300);
        assert_eq!(request.model, DEFAULT_MODEL);
    }

    #[test]
    fn organizer_samples_hotter_than_describer() {
        assert!(PromptProfile::organize().temperature > PromptProfile::describe().temperature);
    }

    #[test]
    fn mode_parsing() {
        assert_eq!("Organize".parse::<Mode>(), Ok(Mode::Organize));
        assert_eq!(" describe ".parse::<Mode>(), Ok(Mode::Describe));
        assert!("sort".parse::<Mode>().is_err());
        assert_eq!(PromptProfile::for_mode(Mode::Describe).view, ResultView::Text);
    }

    #[test]
    fn model_override() {
        let profile = PromptProfile::organize().with_model("gpt-4o");
        assert_eq!(profile.build_request(String::new()).model, "gpt-4o");
    }
}
