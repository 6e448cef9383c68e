//! Scripted ports shared by the handler tests.

use async_trait::async_trait;
use eventcrew_application::ports::spreadsheet::{SheetsError, SpreadsheetGateway};
use eventcrew_application::ports::tool_handler::ToolContext;
use eventcrew_application::ports::user_input::{InputError, UserInputPort};
use eventcrew_application::services::DataFetcher;
use eventcrew_domain::{DocumentSummary, SheetTable, SpreadsheetMetadata};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

/// In-memory spreadsheet keyed by range.
#[derive(Default)]
pub struct MockSheets {
    pub ranges: HashMap<String, Result<SheetTable, SheetsError>>,
    pub metadata: Option<Result<SpreadsheetMetadata, SheetsError>>,
    pub documents: Option<Result<Vec<DocumentSummary>, SheetsError>>,
}

impl MockSheets {
    pub fn with_range(mut self, range: &str, rows: Vec<Vec<&str>>) -> Self {
        self.ranges
            .insert(range.to_string(), Ok(rows.into_iter().collect()));
        self
    }

    pub fn with_failing_range(mut self, range: &str, error: SheetsError) -> Self {
        self.ranges.insert(range.to_string(), Err(error));
        self
    }
}

#[async_trait]
impl SpreadsheetGateway for MockSheets {
    async fn get_values(&self, _document_id: &str, range: &str) -> Result<SheetTable, SheetsError> {
        self.ranges
            .get(range)
            .cloned()
            .unwrap_or_else(|| Ok(SheetTable::empty()))
    }

    async fn get_metadata(&self, document_id: &str) -> Result<SpreadsheetMetadata, SheetsError> {
        self.metadata
            .clone()
            .unwrap_or_else(|| Err(SheetsError::NotFound(document_id.to_string())))
    }

    async fn list_documents(&self) -> Result<Vec<DocumentSummary>, SheetsError> {
        self.documents.clone().unwrap_or_else(|| Ok(Vec::new()))
    }
}

/// Operator stand-in that replays scripted answers and records questions.
#[derive(Default)]
pub struct ScriptedInput {
    answers: Mutex<VecDeque<Result<String, InputError>>>,
    pub questions: Mutex<Vec<String>>,
}

impl ScriptedInput {
    pub fn new(answers: Vec<Result<String, InputError>>) -> Self {
        Self {
            answers: Mutex::new(answers.into()),
            questions: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl UserInputPort for ScriptedInput {
    async fn ask(&self, question: &str) -> Result<String, InputError> {
        self.questions.lock().unwrap().push(question.to_string());
        self.answers
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(InputError::Closed))
    }
}

pub fn context_with(sheets: MockSheets) -> ToolContext {
    ToolContext::new(
        Arc::new(DataFetcher::new(Arc::new(sheets))),
        Arc::new(ScriptedInput::default()),
    )
}

pub fn context() -> ToolContext {
    context_with(MockSheets::default())
}
