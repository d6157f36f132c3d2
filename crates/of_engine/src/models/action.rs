use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Player action vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Action {
    Shoot,
    ThroughBall,
    Pass,
    Cross,
    Tackle,
    Intercept,
    Slide,
    Run,
    Sprint,
    Cleared,
    Boot,
    Penalty,
    Wait,
}

impl Action {
    /// Column order of every weight vector in the decision tables.
    pub const WEIGHTED: [Action; 11] = [
        Action::Shoot,
        Action::ThroughBall,
        Action::Pass,
        Action::Cross,
        Action::Tackle,
        Action::Intercept,
        Action::Slide,
        Action::Run,
        Action::Sprint,
        Action::Cleared,
        Action::Boot,
    ];

    /// Ball actions a carrier may be redirected to when a provided action is illegal.
    pub const REPLACEMENT_BALL_ACTIONS: [Action; 6] = [
        Action::Shoot,
        Action::ThroughBall,
        Action::Pass,
        Action::Cross,
        Action::Cleared,
        Action::Boot,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Action::Shoot => "shoot",
            Action::ThroughBall => "throughBall",
            Action::Pass => "pass",
            Action::Cross => "cross",
            Action::Tackle => "tackle",
            Action::Intercept => "intercept",
            Action::Slide => "slide",
            Action::Run => "run",
            Action::Sprint => "sprint",
            Action::Cleared => "cleared",
            Action::Boot => "boot",
            Action::Penalty => "penalty",
            Action::Wait => "wait",
        }
    }

    /// Actions that need the player to hold the ball.
    pub fn requires_ball(self) -> bool {
        matches!(
            self,
            Action::Shoot
                | Action::ThroughBall
                | Action::Pass
                | Action::Cross
                | Action::Cleared
                | Action::Boot
                | Action::Penalty
        )
    }

    /// Actions that only make sense against an opponent in possession.
    pub fn is_challenge(self) -> bool {
        matches!(self, Action::Tackle | Action::Intercept | Action::Slide)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownAction(pub String);

impl FromStr for Action {
    type Err = UnknownAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let action = match s {
            "shoot" => Action::Shoot,
            "throughBall" => Action::ThroughBall,
            "pass" => Action::Pass,
            "cross" => Action::Cross,
            "tackle" => Action::Tackle,
            "intercept" => Action::Intercept,
            "slide" => Action::Slide,
            "run" => Action::Run,
            "sprint" => Action::Sprint,
            "cleared" => Action::Cleared,
            "boot" => Action::Boot,
            "penalty" => Action::Penalty,
            "wait" => Action::Wait,
            other => return Err(UnknownAction(other.to_string())),
        };
        Ok(action)
    }
}
