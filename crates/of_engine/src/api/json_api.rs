use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::engine::{EngineConfig, MatchEngine};
use crate::error::{MatchError, Result};
use crate::models::{MatchDetails, Pitch, TeamInput};

pub const SCHEMA_VERSION: u8 = 1;

/// Two rosters and a pitch to start a match from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitiateRequest {
    pub schema_version: u8,
    pub seed: u64,
    pub team1: TeamInput,
    pub team2: TeamInput,
    pub pitch: Pitch,
    #[serde(default)]
    pub config: Option<EngineConfig>,
}

/// An in-progress match to advance, used for both ticks and half time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IterationRequest {
    pub schema_version: u8,
    pub seed: u64,
    pub match_details: MatchDetails,
    #[serde(default)]
    pub config: Option<EngineConfig>,
}

fn check_schema(version: u8) -> Result<()> {
    if version != SCHEMA_VERSION {
        return Err(MatchError::Validation(format!("Unsupported schema version: {version}")));
    }
    Ok(())
}

fn engine_for(seed: u64, config: Option<EngineConfig>) -> Result<MatchEngine<ChaCha8Rng>> {
    let config = config.unwrap_or_default();
    config.validate()?;
    Ok(MatchEngine::with_config(ChaCha8Rng::seed_from_u64(seed), config))
}

/// `InitiateRequest` JSON in, `MatchDetails` JSON out.
pub fn initiate_game_json(request_json: &str) -> Result<String> {
    let request: InitiateRequest = serde_json::from_str(request_json)?;
    check_schema(request.schema_version)?;
    let mut engine = engine_for(request.seed, request.config)?;
    let md = engine.initiate_game(request.team1, request.team2, request.pitch)?;
    Ok(serde_json::to_string(&md)?)
}

/// One tick over the request's match.
pub fn play_iteration_json(request_json: &str) -> Result<String> {
    let request: IterationRequest = serde_json::from_str(request_json)?;
    check_schema(request.schema_version)?;
    let mut engine = engine_for(request.seed, request.config)?;
    let mut md = request.match_details;
    engine.play_iteration(&mut md)?;
    Ok(serde_json::to_string(&md)?)
}

pub fn start_second_half_json(request_json: &str) -> Result<String> {
    let request: IterationRequest = serde_json::from_str(request_json)?;
    check_schema(request.schema_version)?;
    let mut engine = engine_for(request.seed, request.config)?;
    let mut md = request.match_details;
    engine.start_second_half(&mut md)?;
    Ok(serde_json::to_string(&md)?)
}
