//! Fixed geometry and restart constants.
//!
//! Tunable probabilities live in [`super::config::EngineConfig`]; everything here is
//! part of the pitch layout or the restart recipes and never changes per match.

// ============================================================
// Penalty Box
// ============================================================
pub mod penalty_box {
    /// Horizontal slack around the `width/4 .. 3*width/4` box.
    pub const X_MARGIN: f64 = 5.0;

    /// Depth slack beyond `height/6` from the byline.
    pub const Y_MARGIN: f64 = 7.0;

    /// Inset used when scattering players inside the box.
    pub const SCATTER_INSET: f64 = 6.0;
}

// ============================================================
// Ball Contact
// ============================================================
pub mod contact {
    /// Outfield touch window on both axes (strict).
    pub const PLAYER_REACH: f64 = 3.0;

    /// Goalkeeper touch window, x then y (strict).
    pub const KEEPER_REACH_X: f64 = 11.0;
    pub const KEEPER_REACH_Y: f64 = 2.0;

    /// Lowest elevation a player can reach; highest is `jumping + JUMP_ALLOWANCE`.
    pub const ELEVATION_FLOOR: f64 = -1.0;
    pub const JUMP_ALLOWANCE: f64 = 1.0;

    /// Sub-tick count divisor range for a kick.
    pub const SPEED_DIVISOR_MIN: i64 = 2;
    pub const SPEED_DIVISOR_MAX: i64 = 3;

    /// Cross-axis jitter after a deflection off a cardinal heading.
    pub const DEFLECTION_JITTER: i64 = 3;
}

// ============================================================
// Goal
// ============================================================
pub mod goal {
    /// Keeper claims a ball within this many units on both axes (strict).
    pub const KEEPER_CLAIM_WINDOW: f64 = 8.0;

    /// Ball crossing the top byline: `y < TOP_LINE`.
    pub const TOP_LINE: f64 = 1.0;

    /// Shot target spread around the centre of the goal mouth.
    pub const TARGET_SPREAD: f64 = 50.0;

    /// Off-target shots land at least this far from the centre line.
    pub const WIDE_CLEARANCE: f64 = 55.0;

    /// Shooting skill must beat `random(0, SHOT_ROLL)` to hit the target.
    pub const SHOT_ROLL: i64 = 40;
}

// ============================================================
// Passing
// ============================================================
pub mod passing {
    /// Passing skill must beat `random(0, ACCURACY_ROLL)`.
    pub const ACCURACY_ROLL: i64 = 100;

    /// Misplaced pass spread by pitch third of the kicker.
    pub const SPREAD_FINAL_THIRD: f64 = 10.0;
    pub const SPREAD_MIDDLE_THIRD: f64 = 50.0;
    pub const SPREAD_OWN_THIRD: f64 = 30.0;

    /// Through balls land this far ahead of the receiver.
    pub const THROUGH_BALL_LEAD: f64 = 10.0;

    /// Cross targets: near edge at `height / CROSS_NEAR_DIVISOR`, far edge at `height / 6`.
    pub const CROSS_NEAR_DIVISOR: f64 = 17.5;

    /// Re-rolls made while choosing a pass target.
    pub const TARGET_REROLLS: usize = 3;
}

// ============================================================
// Movement
// ============================================================
pub mod movement {
    pub const RUN_STEPS: [f64; 3] = [-1.0, 0.0, 1.0];
    pub const SPRINT_STEPS: [f64; 5] = [-2.0, -1.0, 0.0, 1.0, 2.0];

    /// Players may stand up to one unit outside the lines.
    pub const PITCH_OVERHANG: f64 = 1.0;

    /// Intent slot drift: fraction of the ball's offset from halfway.
    pub const INTENT_BALL_FOLLOW: f64 = 0.5;

    /// Intent slot push forward/back, as a fraction of pitch height.
    pub const INTENT_PUSH_DIVISOR: f64 = 20.0;
}

// ============================================================
// Decision Proximity Windows
// ============================================================
pub mod pressure {
    /// (x, y) windows inside which an opponent presses the carrier.
    pub const OWN_BOX: (f64, f64) = (20.0, 20.0);
    pub const OPPOSITION_BOX: (f64, f64) = (6.0, 6.0);
    pub const OPEN_PLAY: (f64, f64) = (10.0, 10.0);
    pub const DEEP: (f64, f64) = (10.0, 25.0);

    /// Player-to-ball windows for off-ball decisions.
    pub const CLOSE: (f64, f64) = (10.0, 10.0);
    pub const NEAR: (f64, f64) = (40.0, 40.0);

    /// Width fraction of each touchline lane; the rest is the central lane.
    pub const WIDE_LANE: f64 = 0.25;
}

// ============================================================
// Restarts
// ============================================================
pub mod restart {
    /// Throw-in y is clamped to `[THROW_IN_MIN_Y, height - THROW_IN_BOTTOM_MARGIN]`.
    pub const THROW_IN_MIN_Y: f64 = 30.0;
    pub const THROW_IN_BOTTOM_MARGIN: f64 = 10.0;

    /// Squad indices used by the throw-in shape.
    pub const THROW_IN_TAKER: usize = 5;
    pub const THROW_IN_SHORT: usize = 8;
    pub const THROW_IN_AHEAD: usize = 7;
    pub const THROW_IN_BEHIND: usize = 9;

    pub const CORNER_TAKER: usize = 1;
    pub const CORNER_NEAR_POST: usize = 4;
    pub const CORNER_NEAR_POST_DEPTH: f64 = 20.0;

    pub const GOAL_KICK_SHIFT: f64 = 80.0;
    pub const GOAL_KICK_DEPTH: f64 = 20.0;

    /// Kick-off is taken by index 9 or 10; the partner stands this far across.
    pub const KICK_OFF_FORWARDS: (usize, usize) = (9, 10);
    pub const KICK_OFF_PARTNER_OFFSET: f64 = 20.0;

    pub const PENALTY_TAKER: usize = 10;
    /// Penalty spot at `round(height / PENALTY_SPOT_DIVISOR)` from the byline.
    pub const PENALTY_SPOT_DIVISOR: f64 = 17.5;
    pub const PENALTY_ATTACK_START: f64 = -9.0;
    pub const PENALTY_DEFENCE_START: f64 = -10.0;
    pub const PENALTY_STAGGER: f64 = 2.0;

    /// Free-kick wall sits this fraction of pitch height in front of the ball.
    pub const WALL_DEPTH: f64 = 0.09;
}
