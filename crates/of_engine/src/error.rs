use thiserror::Error;

use crate::models::{PlayerId, TeamId};

/// Fatal conditions that abort a tick.
///
/// Probabilistic outcomes (missed tackle, saved shot, misplaced pass) are never
/// errors; they are ordinary state transitions.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MatchError {
    #[error("Invalid team size for {team}: expected 11, found {found}")]
    InvalidTeamSize { team: String, found: usize },

    #[error("Missing field {field} on {document}")]
    MissingField { document: String, field: String },

    #[error("Invalid half: {0} (halves are numbered from 1)")]
    InvalidHalf(u8),

    #[error("Player {name} has been sent off and has no position")]
    PlayerSentOff { name: String },

    #[error("Invalid player action for {player}: {action}")]
    InvalidAction { player: String, action: String },

    #[error("Invalid pitch: {0}")]
    InvalidPitch(String),

    #[error("Unknown player id: {0}")]
    UnknownPlayer(PlayerId),

    #[error("Unknown team id: {0}")]
    UnknownTeam(TeamId),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("Config error: {0}")]
    Config(String),
}

impl MatchError {
    /// Data/programmer errors in the input documents, as opposed to engine faults.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            MatchError::InvalidTeamSize { .. }
                | MatchError::MissingField { .. }
                | MatchError::InvalidHalf(_)
                | MatchError::InvalidAction { .. }
                | MatchError::InvalidPitch(_)
                | MatchError::Validation(_)
                | MatchError::Deserialization(_)
        )
    }
}

impl From<serde_json::Error> for MatchError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_data() || err.is_syntax() || err.is_eof() {
            MatchError::Deserialization(err.to_string())
        } else {
            MatchError::Serialization(err.to_string())
        }
    }
}

impl From<serde_yaml::Error> for MatchError {
    fn from(err: serde_yaml::Error) -> Self {
        MatchError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, MatchError>;
