//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("No agents configured for the team")]
    NoParticipants,

    #[error("Duplicate agent name: {0}")]
    DuplicateAgent(String),

    #[error("Invalid task: {0}")]
    InvalidTask(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_agent_names_agent() {
        let error = DomainError::DuplicateAgent("sheets_explorer".to_string());
        assert_eq!(error.to_string(), "Duplicate agent name: sheets_explorer");
    }
}
