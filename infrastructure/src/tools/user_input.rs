//! Operator tool: ask_user_input

use async_trait::async_trait;
use eventcrew_application::ports::tool_handler::{ToolContext, ToolHandler};
use eventcrew_application::ports::user_input::InputError;
use eventcrew_domain::{DEFAULT_TERMINATION_TOKEN, ToolCall, ToolDefinition, ToolParameter};
use tracing::{info, warn};

pub const ASK_USER_INPUT: &str = "ask_user_input";

/// Answers that end the conversation, compared case-insensitively.
const EXIT_WORDS: &[&str] = &["exit", "quit", "terminate"];

/// Puts a question to the operator through the context's input port.
///
/// Exit words and a closed or cancelled input end the run with the
/// termination token. A timeout or an empty answer yields the configured
/// default answer.
pub struct AskUserInput {
    default_answer: String,
}

impl AskUserInput {
    pub fn new(default_answer: impl Into<String>) -> Self {
        Self {
            default_answer: default_answer.into(),
        }
    }
}

#[async_trait]
impl ToolHandler for AskUserInput {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(ASK_USER_INPUT, "Ask the user for input when needed")
            .with_parameter(ToolParameter::new("question", "The question to ask the user", true))
    }

    async fn handle(&self, call: &ToolCall, ctx: &ToolContext) -> String {
        let question = call.string_or("question", "");

        match ctx.input.ask(question).await {
            Ok(answer) => {
                let answer = answer.trim();
                if EXIT_WORDS.contains(&answer.to_lowercase().as_str()) {
                    DEFAULT_TERMINATION_TOKEN.to_string()
                } else if answer.is_empty() {
                    self.default_answer.clone()
                } else {
                    answer.to_string()
                }
            }
            Err(InputError::Closed | InputError::Cancelled) => {
                info!("Operator input closed, ending the run");
                DEFAULT_TERMINATION_TOKEN.to_string()
            }
            Err(InputError::TimedOut) => {
                info!("No answer in time, using default response");
                self.default_answer.clone()
            }
            Err(e) => {
                warn!("{}; using default response", e);
                self.default_answer.clone()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::test_support::{MockSheets, ScriptedInput};
    use eventcrew_application::DataFetcher;
    use eventcrew_application::ports::user_input::UserInputPort;
    use std::sync::Arc;

    async fn ask(answer: Result<String, InputError>) -> (String, Arc<ScriptedInput>) {
        let input = Arc::new(ScriptedInput::new(vec![answer]));
        let ctx = ToolContext::new(
            Arc::new(DataFetcher::new(Arc::new(MockSheets::default()))),
            input.clone() as Arc<dyn UserInputPort>,
        );
        let call = ToolCall::new(ASK_USER_INPUT).with_arg("question", "Which date works?");
        let out = AskUserInput::new("Default response").handle(&call, &ctx).await;
        (out, input)
    }

    #[tokio::test]
    async fn test_answer_is_trimmed() {
        let (out, input) = ask(Ok("  May 3rd \n".into())).await;
        assert_eq!(out, "May 3rd");
        assert_eq!(*input.questions.lock().unwrap(), vec!["Which date works?"]);
    }

    #[tokio::test]
    async fn test_exit_words_terminate() {
        for word in ["exit", "QUIT", " Terminate "] {
            let (out, _) = ask(Ok(word.into())).await;
            assert_eq!(out, "TERMINATE");
        }
    }

    #[tokio::test]
    async fn test_closed_or_cancelled_input_terminates() {
        assert_eq!(ask(Err(InputError::Closed)).await.0, "TERMINATE");
        assert_eq!(ask(Err(InputError::Cancelled)).await.0, "TERMINATE");
    }

    #[tokio::test]
    async fn test_timeout_and_empty_use_default() {
        assert_eq!(ask(Err(InputError::TimedOut)).await.0, "Default response");
        assert_eq!(ask(Ok("   ".into())).await.0, "Default response");
        assert_eq!(
            ask(Err(InputError::Io("broken pipe".into()))).await.0,
            "Default response"
        );
    }
}
