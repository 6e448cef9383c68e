//! Run Team use case.
//!
//! Drives a selector group chat: starting from the task message, an LLM
//! picks the next speaker, that agent answers (calling its tools when the
//! model asks for them), and the loop repeats until the termination
//! condition holds, the run is cancelled, or the timeout expires.
//!
//! ```text
//! task ─▶ [check termination] ─▶ select speaker ─▶ agent turn ─┐
//!              ▲                                              │
//!              └──────────── append + emit messages ◀─────────┘
//! ```

use crate::config::TeamParams;
use crate::ports::conversation_observer::{
    ConversationObserver, NoConversationObserver, TranscriptSink,
};
use crate::ports::llm_gateway::{CompletionRequest, GatewayError, LlmGateway};
use crate::ports::tool_executor::ToolExecutorPort;
use crate::ports::tool_schema::ToolSchemaPort;
use crate::use_cases::resolve_agent_tools::Agent;
use eventcrew_domain::{
    ChatEvent, ChatMessage, DomainError, Message, MessageKind, TaskResult, TerminationCondition,
    ToolCall, ToolError, ToolResult,
};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Source name of the task message.
pub const TASK_SOURCE: &str = "user";

pub const STOP_CANCELLED: &str = "Cancelled";
pub const STOP_TIMED_OUT: &str = "Timed out";

/// Errors that end a team run.
#[derive(Error, Debug)]
pub enum RunTeamError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),
}

/// Input for the [`RunTeamUseCase`].
#[derive(Debug, Clone)]
pub struct RunTeamInput {
    pub task: String,
    pub agents: Vec<Agent>,
    pub params: TeamParams,
}

impl RunTeamInput {
    pub fn new(task: impl Into<String>, agents: Vec<Agent>) -> Self {
        Self {
            task: task.into(),
            agents,
            params: TeamParams::default(),
        }
    }

    pub fn with_params(mut self, params: TeamParams) -> Self {
        self.params = params;
        self
    }
}

/// Use case for running an agent team on a task.
#[derive(Clone)]
pub struct RunTeamUseCase {
    gateway: Arc<dyn LlmGateway>,
    tool_executor: Arc<dyn ToolExecutorPort>,
    tool_schema: Arc<dyn ToolSchemaPort>,
    observer: Arc<dyn ConversationObserver>,
    transcript_sink: Option<Arc<dyn TranscriptSink>>,
}

impl RunTeamUseCase {
    pub fn new(
        gateway: Arc<dyn LlmGateway>,
        tool_executor: Arc<dyn ToolExecutorPort>,
        tool_schema: Arc<dyn ToolSchemaPort>,
    ) -> Self {
        Self {
            gateway,
            tool_executor,
            tool_schema,
            observer: Arc::new(NoConversationObserver),
            transcript_sink: None,
        }
    }

    pub fn with_observer(mut self, observer: Arc<dyn ConversationObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn with_transcript_sink(mut self, sink: Arc<dyn TranscriptSink>) -> Self {
        self.transcript_sink = Some(sink);
        self
    }

    /// Run the team until it terminates, is cancelled, or times out.
    ///
    /// The terminal [`ChatEvent::Finished`] is always emitted and the
    /// transcript is always written, including when the run fails.
    pub async fn execute(
        &self,
        input: RunTeamInput,
        cancel: CancellationToken,
    ) -> Result<TaskResult, RunTeamError> {
        validate_agents(&input.agents)?;
        if input.task.trim().is_empty() {
            return Err(DomainError::InvalidTask("task is empty".to_string()).into());
        }

        info!(
            "Starting team run with {} agents: {}",
            input.agents.len(),
            input
                .agents
                .iter()
                .map(Agent::name)
                .collect::<Vec<_>>()
                .join(", ")
        );

        let mut transcript = Vec::new();
        let outcome = tokio::select! {
            outcome = self.converse(&input, &mut transcript) => outcome,
            _ = cancel.cancelled() => {
                info!("Team run cancelled");
                Ok(STOP_CANCELLED.to_string())
            }
            _ = sleep_or_pending(input.params.timeout) => {
                warn!("Team run timed out");
                Ok(STOP_TIMED_OUT.to_string())
            }
        };

        let stop_reason = match &outcome {
            Ok(reason) => reason.clone(),
            Err(e) => {
                error!("Team run failed: {}", e);
                format!("Error: {}", e)
            }
        };
        info!(
            "Team run finished after {} messages: {}",
            transcript.len(),
            stop_reason
        );

        let result = TaskResult {
            messages: transcript,
            stop_reason: Some(stop_reason),
        };
        self.observer.on_event(&ChatEvent::Finished(result.clone()));

        if let Some(sink) = &self.transcript_sink {
            if let Err(e) = sink.write_transcript(&result.messages) {
                warn!("{}", e);
            }
        }

        outcome.map(|_| result)
    }

    /// The conversation loop. Returns the stop reason.
    async fn converse(
        &self,
        input: &RunTeamInput,
        transcript: &mut Vec<ChatMessage>,
    ) -> Result<String, RunTeamError> {
        let params = &input.params;

        if let Some(reason) = self.append(
            transcript,
            &params.termination,
            ChatMessage::text(TASK_SOURCE, input.task.clone()),
        ) {
            return Ok(reason);
        }

        let mut last_speaker: Option<usize> = None;
        loop {
            let speaker = self
                .select_speaker(&input.agents, transcript, last_speaker, params)
                .await;
            let agent = &input.agents[speaker];
            debug!("Selected speaker: {}", agent.name());

            let produced = self.agent_turn(agent, transcript, params).await?;

            let mut stop = None;
            for message in produced {
                let reason = self.append(transcript, &params.termination, message);
                stop = stop.or(reason);
            }
            if let Some(reason) = stop {
                return Ok(reason);
            }

            last_speaker = Some(speaker);
        }
    }

    /// Append a message, emit it, and report whether the run should stop.
    fn append(
        &self,
        transcript: &mut Vec<ChatMessage>,
        termination: &TerminationCondition,
        message: ChatMessage,
    ) -> Option<String> {
        self.observer.on_event(&ChatEvent::Message(message.clone()));
        transcript.push(message);
        termination.check(transcript)
    }

    /// Pick the index of the next speaker.
    ///
    /// Asks the model with the selector prompt; when the reply names no
    /// eligible agent (or the request fails) the turn goes round-robin.
    async fn select_speaker(
        &self,
        agents: &[Agent],
        transcript: &[ChatMessage],
        last_speaker: Option<usize>,
        params: &TeamParams,
    ) -> usize {
        let mut candidates: Vec<usize> = (0..agents.len())
            .filter(|&i| params.allow_repeated_speaker || Some(i) != last_speaker)
            .collect();
        // a lone agent speaks again even when repeats are disallowed
        if candidates.is_empty() {
            candidates = (0..agents.len()).collect();
        }

        if let [only] = candidates.as_slice() {
            return *only;
        }

        let prompt = render_selector_prompt(&params.selector_prompt, agents, &candidates, transcript);
        let request = CompletionRequest::new(vec![Message::user(prompt)]);

        match self.gateway.complete(request).await {
            Ok(response) => {
                let reply = response.text_content();
                if let Some(choice) = mentioned_agent(&reply, agents, &candidates) {
                    return choice;
                }
                warn!(
                    "Speaker selector named no eligible agent ({}); using round-robin",
                    reply.trim()
                );
            }
            Err(e) => warn!("Speaker selection failed: {}; using round-robin", e),
        }

        round_robin(&candidates, last_speaker)
    }

    /// One agent turn: a completion, then tool execution and reflection when
    /// the model asked for tools.
    async fn agent_turn(
        &self,
        agent: &Agent,
        transcript: &[ChatMessage],
        params: &TeamParams,
    ) -> Result<Vec<ChatMessage>, RunTeamError> {
        let name = agent.name().to_string();
        let mut messages = agent_history(agent, transcript);
        let tools = self.tool_schema.all_tools_schema(&agent.tools);

        let response = self
            .gateway
            .complete(CompletionRequest::new(messages.clone()).with_tools(tools))
            .await?;

        let calls = response.tool_calls();
        if calls.is_empty() {
            return Ok(vec![ChatMessage::text(name, response.text_content())]);
        }

        info!("{} requested {} tool call(s)", name, calls.len());
        let mut produced = vec![ChatMessage::new(
            name.clone(),
            describe_calls(&calls),
            MessageKind::ToolCallRequestEvent,
        )];

        let mut outputs = Vec::with_capacity(calls.len());
        for (i, call) in calls.iter().enumerate() {
            let result = self.execute_scoped(agent, call).await;
            let call_id = call
                .native_id
                .clone()
                .unwrap_or_else(|| format!("call_{}", i));
            outputs.push((call_id, result.into_text()));
        }

        let combined = outputs
            .iter()
            .map(|(_, text)| text.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        produced.push(ChatMessage::new(
            name.clone(),
            combined.clone(),
            MessageKind::ToolCallExecutionEvent,
        ));

        if !params.reflect_on_tool_use {
            produced.push(ChatMessage::new(
                name,
                combined,
                MessageKind::ToolCallSummaryMessage,
            ));
            return Ok(produced);
        }

        messages.push(Message::assistant_tool_calls(
            response.text_content(),
            calls
                .into_iter()
                .enumerate()
                .map(|(i, call)| {
                    if call.native_id.is_some() {
                        call
                    } else {
                        call.with_native_id(format!("call_{}", i))
                    }
                })
                .collect(),
        ));
        messages.extend(outputs.into_iter().map(|(id, text)| Message::tool(id, text)));

        let reflection = self
            .gateway
            .complete(CompletionRequest::new(messages))
            .await?;
        produced.push(ChatMessage::text(name, reflection.text_content()));
        Ok(produced)
    }

    /// Execute a call only if it is within the agent's tool scope.
    async fn execute_scoped(&self, agent: &Agent, call: &ToolCall) -> ToolResult {
        if !agent.tools.contains(&call.tool_name) {
            warn!(
                "Agent '{}' called '{}' outside its tool scope",
                agent.name(),
                call.tool_name
            );
            return ToolResult::failure(&call.tool_name, ToolError::unknown_tool(&call.tool_name));
        }

        debug!("Executing tool {} for {}", call.tool_name, agent.name());
        self.tool_executor.execute(call).await
    }
}

fn validate_agents(agents: &[Agent]) -> Result<(), DomainError> {
    if agents.is_empty() {
        return Err(DomainError::NoParticipants);
    }
    let mut seen = HashSet::new();
    for agent in agents {
        if !seen.insert(agent.name()) {
            return Err(DomainError::DuplicateAgent(agent.name().to_string()));
        }
    }
    Ok(())
}

async fn sleep_or_pending(timeout: Option<Duration>) {
    match timeout {
        Some(duration) => tokio::time::sleep(duration).await,
        None => std::future::pending::<()>().await,
    }
}

/// The conversation as seen by one agent: its system prompt, then every
/// conversational message, its own as assistant turns and the rest as named
/// user turns.
fn agent_history(agent: &Agent, transcript: &[ChatMessage]) -> Vec<Message> {
    let mut messages = Vec::with_capacity(transcript.len() + 1);
    if !agent.profile.system_prompt.is_empty() {
        messages.push(Message::system(agent.profile.system_prompt.clone()));
    }
    for m in transcript.iter().filter(|m| m.kind.is_conversational()) {
        if m.source == agent.profile.name {
            messages.push(Message::assistant(m.content.clone()));
        } else {
            messages.push(Message::user(m.content.clone()).named(m.source.clone()));
        }
    }
    messages
}

fn describe_calls(calls: &[ToolCall]) -> String {
    calls
        .iter()
        .map(|call| {
            let args = serde_json::to_string(&call.arguments).unwrap_or_default();
            format!("{}({})", call.tool_name, args)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_selector_prompt(
    template: &str,
    agents: &[Agent],
    candidates: &[usize],
    transcript: &[ChatMessage],
) -> String {
    let roles = agents
        .iter()
        .map(|a| format!("{}: {}", a.profile.name, a.profile.description))
        .collect::<Vec<_>>()
        .join("\n");
    let history = transcript
        .iter()
        .filter(|m| m.kind.is_conversational())
        .map(|m| format!("{}: {}", m.source, m.content))
        .collect::<Vec<_>>()
        .join("\n");
    let participants = format!(
        "[{}]",
        candidates
            .iter()
            .map(|&i| format!("'{}'", agents[i].name()))
            .collect::<Vec<_>>()
            .join(", ")
    );

    template
        .replace("{roles}", &roles)
        .replace("{history}", &history)
        .replace("{participants}", &participants)
}

/// The eligible agent named earliest in the reply.
///
/// A name only counts as a whole identifier, so `user` is not found inside
/// `user_assistant`.
fn mentioned_agent(reply: &str, agents: &[Agent], candidates: &[usize]) -> Option<usize> {
    candidates
        .iter()
        .filter_map(|&i| find_identifier(reply, agents[i].name()).map(|pos| (pos, i)))
        .min()
        .map(|(_, i)| i)
}

fn find_identifier(text: &str, name: &str) -> Option<usize> {
    if name.is_empty() {
        return None;
    }
    let is_ident = |c: char| c.is_alphanumeric() || c == '_';
    text.match_indices(name).map(|(pos, _)| pos).find(|&pos| {
        let before = text[..pos].chars().next_back();
        let after = text[pos + name.len()..].chars().next();
        !before.is_some_and(is_ident) && !after.is_some_and(is_ident)
    })
}

fn round_robin(candidates: &[usize], last_speaker: Option<usize>) -> usize {
    match last_speaker {
        Some(last) => candidates
            .iter()
            .copied()
            .find(|&i| i > last)
            .unwrap_or(candidates[0]),
        None => candidates[0],
    }
}
