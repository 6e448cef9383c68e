//! CLI entrypoint for eventcrew
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::{CommandFactory, Parser};
use eventcrew_application::{
    CompositeObserver, ConversationObserver, DataFetcher, LlmGateway, ResolveAgentToolsUseCase,
    RunTeamInput, RunTeamUseCase, SpreadsheetGateway, ToolContext, ToolExecutorPort,
    UserInputPort,
};
use eventcrew_domain::{DomainPattern, DomainRouter, ToolCall};
use eventcrew_infrastructure::config::{FileConfig, FileTransport, Severity};
use eventcrew_infrastructure::{
    ConfigLoader, JsonSchemaToolConverter, JsonlEventLog, McpServer, NoOperatorInput, PromptBook,
    StdinInput, ToolRegistry, TranscriptFileWriter, UnconfiguredSheets, openai, sheets,
};
use eventcrew_presentation::{Cli, Command, ConsoleFormatter, ConsoleObserver, Transport};
use serde_json::Value;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    // stderr keeps stdout free for the stdio tool server
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("{}", e))
            .context("Failed to load configuration")?
    };
    check_config(&config)?;

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let cancel = CancellationToken::new();
    let on_ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Ctrl-C received, stopping");
            on_ctrl_c.cancel();
        }
    });

    match command {
        Command::Run {
            task,
            prompts,
            output,
            max_messages,
            timeout,
            event_log,
        } => {
            let mut team = config.team.clone();
            if let Some(path) = prompts {
                team.prompts_file = path;
            }
            if let Some(path) = output {
                team.transcript_file = path;
            }
            if let Some(n) = max_messages {
                team.max_messages = n;
            }
            if timeout.is_some() {
                team.timeout_secs = timeout;
            }
            let config = FileConfig { team, ..config };
            run_team(&config, task, event_log, cancel).await
        }
        Command::Serve {
            transport,
            host,
            port,
        } => {
            let transport = match transport {
                Some(Transport::Stdio) => FileTransport::Stdio,
                Some(Transport::Http) => FileTransport::Http,
                Some(Transport::Sse) => FileTransport::Sse,
                None => config.server.transport,
            };
            let host = host.unwrap_or_else(|| config.server.host.clone());
            let port = port.unwrap_or(config.server.port);
            serve(&config, transport, &host, port, cancel).await
        }
        Command::Tools { domains } => {
            list_tools(&config, &domains);
            Ok(())
        }
        Command::Call { tool, args } => call_tool(&config, &tool, args.as_deref(), cancel).await,
    }
}

/// Log warnings; refuse to start on errors.
fn check_config(config: &FileConfig) -> Result<()> {
    let issues = config.validate();
    for issue in issues.iter().filter(|i| i.severity == Severity::Warning) {
        warn!("Config: {}", issue);
    }
    let errors: Vec<String> = issues
        .iter()
        .filter(|i| i.severity == Severity::Error)
        .map(|i| format!("  {}", i))
        .collect();
    if !errors.is_empty() {
        bail!("Invalid configuration:\n{}", errors.join("\n"));
    }
    Ok(())
}

fn build_registry(
    config: &FileConfig,
    sheets: Arc<dyn SpreadsheetGateway>,
    input: Arc<dyn UserInputPort>,
) -> Arc<ToolRegistry> {
    let context = ToolContext::new(Arc::new(DataFetcher::new(sheets)), input);
    Arc::new(ToolRegistry::builtin(
        context,
        config.input.default_answer.clone(),
    ))
}

fn console_input(config: &FileConfig, cancel: &CancellationToken) -> Arc<dyn UserInputPort> {
    Arc::new(
        StdinInput::stdio()
            .with_timeout(config.input.timeout())
            .with_cancellation(cancel.clone()),
    )
}

async fn run_team(
    config: &FileConfig,
    task: Option<String>,
    event_log: Option<PathBuf>,
    cancel: CancellationToken,
) -> Result<()> {
    let team = &config.team;
    let book = PromptBook::load(&team.prompts_file)?;
    let task = book.task(task.as_deref().or(team.task.as_deref()))?;

    // === Dependency Injection ===
    let sheets = sheets::build_gateway(&config.sheets)?;
    let registry = build_registry(config, sheets, console_input(config, &cancel));
    let gateway: Arc<dyn LlmGateway> = Arc::new(openai::build_gateway(&config.llm)?);

    let profiles = book.apply(config.roster());
    let agents = ResolveAgentToolsUseCase::new(registry.clone()).execute(profiles);

    let mut observers: Vec<Arc<dyn ConversationObserver>> = vec![Arc::new(ConsoleObserver::new())];
    if let Some(path) = event_log {
        match JsonlEventLog::new(&path) {
            Some(log) => observers.push(Arc::new(log)),
            None => warn!("Event log disabled"),
        }
    }

    let use_case = RunTeamUseCase::new(gateway.clone(), registry, Arc::new(JsonSchemaToolConverter))
        .with_observer(Arc::new(CompositeObserver::new(observers)))
        .with_transcript_sink(Arc::new(TranscriptFileWriter::new(&team.transcript_file)));

    let input = RunTeamInput::new(task, agents).with_params(team.to_params());
    let result = use_case.execute(input, cancel).await;

    if let Err(e) = gateway.close().await {
        warn!("Closing LLM gateway: {}", e);
    }
    result?;

    println!("Transcript written to {}", team.transcript_file.display());
    Ok(())
}

async fn serve(
    config: &FileConfig,
    transport: FileTransport,
    host: &str,
    port: u16,
    cancel: CancellationToken,
) -> Result<()> {
    let sheets = sheets::build_gateway(&config.sheets)?;
    // stdin carries the protocol in stdio mode
    let input: Arc<dyn UserInputPort> = match transport {
        FileTransport::Stdio => Arc::new(NoOperatorInput),
        FileTransport::Http | FileTransport::Sse => console_input(config, &cancel),
    };
    let registry = build_registry(config, sheets, input);
    let server = McpServer::new(registry, Arc::new(JsonSchemaToolConverter));

    info!("Serving tools over {}", transport);
    match transport {
        FileTransport::Stdio => server.serve_stdio(cancel).await?,
        FileTransport::Http => server.serve_http(host, port, cancel).await?,
        FileTransport::Sse => server.serve_sse(host, port, cancel).await?,
    }
    Ok(())
}

fn list_tools(config: &FileConfig, domains: &[String]) {
    let registry = build_registry(
        config,
        Arc::new(UnconfiguredSheets::new("not needed for listing")),
        Arc::new(NoOperatorInput),
    );
    let spec = registry.tool_spec();

    let tools = if domains.is_empty() {
        registry.list_all()
    } else {
        DomainRouter::resolve(spec, &DomainPattern::parse_all(domains))
    };
    print!("{}", ConsoleFormatter::format_tools(&tools));
}

async fn call_tool(
    config: &FileConfig,
    tool: &str,
    args: Option<&str>,
    cancel: CancellationToken,
) -> Result<()> {
    let arguments = parse_arguments(args)?;
    let sheets = sheets::build_gateway(&config.sheets)?;
    let registry = build_registry(config, sheets, console_input(config, &cancel));

    let result = registry
        .execute(&ToolCall::new(tool).with_arguments(arguments))
        .await;
    if !result.is_success() {
        bail!("{}", result.into_text());
    }
    println!("{}", result.into_text());
    Ok(())
}

fn parse_arguments(args: Option<&str>) -> Result<HashMap<String, Value>> {
    let Some(args) = args else {
        return Ok(HashMap::new());
    };
    match serde_json::from_str::<Value>(args).context("--args is not valid JSON")? {
        Value::Object(map) => Ok(map.into_iter().collect()),
        other => bail!("--args must be a JSON object, got {}", other),
    }
}
