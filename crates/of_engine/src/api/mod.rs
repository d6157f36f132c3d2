//! JSON entry points for callers that hold match documents as strings.

pub mod json_api;

pub use json_api::{
    initiate_game_json, play_iteration_json, start_second_half_json, InitiateRequest,
    IterationRequest, SCHEMA_VERSION,
};
