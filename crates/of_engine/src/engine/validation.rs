//! Input checks run before setup and at the start of every tick.

use crate::error::{MatchError, Result};
use crate::models::{MatchDetails, Pitch, PitchPosition, Team, TeamInput, SQUAD_SIZE};

pub(crate) fn validate_pitch(pitch: &Pitch) -> Result<()> {
    let dims = [pitch.width, pitch.height, pitch.goal_width];
    if dims.iter().any(|d| !d.is_finite() || *d <= 0.0) {
        return Err(MatchError::InvalidPitch(format!(
            "dimensions must be positive, got {}x{} goal {}",
            pitch.width, pitch.height, pitch.goal_width
        )));
    }
    if pitch.goal_width >= pitch.width {
        return Err(MatchError::InvalidPitch(format!(
            "goal width {} does not fit a pitch {} wide",
            pitch.goal_width, pitch.width
        )));
    }
    Ok(())
}

pub(crate) fn validate_team_input(team: &TeamInput) -> Result<()> {
    if team.name.trim().is_empty() {
        return Err(MatchError::MissingField { document: "team".to_string(), field: "name".to_string() });
    }
    if team.players.len() != SQUAD_SIZE {
        return Err(MatchError::InvalidTeamSize { team: team.name.clone(), found: team.players.len() });
    }
    for player in &team.players {
        if player.name.trim().is_empty() {
            return Err(MatchError::MissingField {
                document: format!("player of {}", team.name),
                field: "name".to_string(),
            });
        }
        if !player.current_pos.is_finite() {
            return Err(MatchError::Validation(format!(
                "{} has a non-numeric starting position",
                player.name
            )));
        }
    }
    if !team.players[0].position.is_goalkeeper() {
        return Err(MatchError::Validation(format!(
            "{} must list its goalkeeper first",
            team.name
        )));
    }
    Ok(())
}

fn validate_team(team: &Team) -> Result<()> {
    if team.players.len() != SQUAD_SIZE {
        return Err(MatchError::InvalidTeamSize { team: team.name.clone(), found: team.players.len() });
    }
    for player in &team.players {
        if let PitchPosition::OnPitch(p) = player.pitch_position() {
            if !p.is_finite() {
                return Err(MatchError::Validation(format!(
                    "{} has a non-numeric position",
                    player.name
                )));
            }
        }
    }
    Ok(())
}

pub(crate) fn validate_match(md: &MatchDetails) -> Result<()> {
    if md.half == 0 {
        return Err(MatchError::InvalidHalf(md.half));
    }
    validate_pitch(&md.pitch)?;
    validate_team(&md.kick_off_team)?;
    validate_team(&md.second_team)?;
    if md.kick_off_team.team_id == md.second_team.team_id {
        return Err(MatchError::Validation(format!(
            "both teams share id {}",
            md.kick_off_team.team_id
        )));
    }
    if !md.ball.position.planar().is_finite() || !md.ball.position.z.is_finite() {
        return Err(MatchError::Validation("ball position is not numeric".to_string()));
    }
    if let Some(id) = md.ball.with_team {
        if md.side_of(id).is_none() {
            return Err(MatchError::UnknownTeam(id));
        }
    }
    if let Some(id) = md.ball.player {
        if md.find_player(id).is_none() {
            return Err(MatchError::UnknownPlayer(id));
        }
    }
    Ok(())
}
