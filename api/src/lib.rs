pub mod client;
pub mod statsapi;

// ---------------------------------------------------------------------------
// View types — clean model, independent of the Stats API wire format
// ---------------------------------------------------------------------------

/// Normalized, render-ready snapshot of the tracked team's current game.
/// Recomputed from scratch on every poll; never mutated in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameView {
    pub is_live: bool,
    pub astros_score: u32,
    pub opponent_score: u32,
    pub opponent: String,
    pub opponent_team_id: Option<u32>,
    /// Formatted ordinal + half ("7th Top"), or the "N/A"/"Live" sentinels.
    pub inning: String,
    pub status: GameStatus,
    pub time: String,
    pub venue: String,
    /// None when no comparison is possible (no game, or a tied score —
    /// the presenter tells those apart via `status` and score equality).
    pub is_winning: Option<bool>,
    pub balls: Option<u8>,
    pub strikes: Option<u8>,
    pub current_batter: Option<String>,
    pub last_play: String,
}

impl GameView {
    /// Canonical "no game in the lookahead window" view.
    pub fn no_game() -> Self {
        Self {
            is_live: false,
            astros_score: 0,
            opponent_score: 0,
            opponent: "No Game".into(),
            opponent_team_id: None,
            inning: "N/A".into(),
            status: GameStatus::NoGameToday,
            time: "N/A".into(),
            venue: "N/A".into(),
            is_winning: None,
            balls: None,
            strikes: None,
            current_batter: None,
            last_play: String::new(),
        }
    }

    /// Fixed stand-in shown when every fetch path fails. Deliberately
    /// fictional and constant, so it can never pass for a stale live feed.
    pub fn fallback() -> Self {
        Self {
            is_live: true,
            astros_score: 5,
            opponent_score: 3,
            opponent: "Rangers".into(),
            opponent_team_id: None,
            inning: "7th".into(),
            status: GameStatus::Live,
            time: "8:30 PM".into(),
            venue: "Minute Maid Park".into(),
            is_winning: Some(true),
            balls: None,
            strikes: None,
            current_batter: None,
            last_play: String::new(),
        }
    }
}

/// Most recent completed game, shown beside the live card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LastGameView {
    pub astros_score: u32,
    pub opponent_score: u32,
    pub opponent: String,
    pub opponent_team_id: Option<u32>,
    pub date: String,
    pub time: String,
    pub venue: String,
    pub result: GameResult,
}

impl LastGameView {
    /// No completed game found in the lookback window.
    pub fn no_recent() -> Self {
        Self {
            astros_score: 0,
            opponent_score: 0,
            opponent: "No Recent Games".into(),
            opponent_team_id: None,
            date: "N/A".into(),
            time: "N/A".into(),
            venue: "N/A".into(),
            result: GameResult::None,
        }
    }

    /// Fixed stand-in for the fetch-failure path; see `GameView::fallback`.
    pub fn fallback() -> Self {
        Self {
            astros_score: 6,
            opponent_score: 4,
            opponent: "Rangers".into(),
            opponent_team_id: None,
            date: "Yesterday".into(),
            time: "8:30 PM".into(),
            venue: "Minute Maid Park".into(),
            result: GameResult::Win,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GameStatus {
    Live,
    Final,
    Scheduled,
    #[default]
    NoGameToday,
}

impl GameStatus {
    pub fn label(&self) -> &'static str {
        match self {
            GameStatus::Live => "Live",
            GameStatus::Final => "Final",
            GameStatus::Scheduled => "Scheduled",
            GameStatus::NoGameToday => "No Game Today",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GameResult {
    Win,
    Loss,
    Tie,
    /// No qualifying game in the lookback window — a classification, not an error.
    #[default]
    None,
}

impl GameResult {
    pub fn label(&self) -> &'static str {
        match self {
            GameResult::Win => "WIN",
            GameResult::Loss => "LOSS",
            GameResult::Tie => "TIE",
            GameResult::None => "",
        }
    }
}

// ---------------------------------------------------------------------------
// Pure score/format helpers
// ---------------------------------------------------------------------------

/// Some(true) when the Astros lead, Some(false) when they trail, None on a tie.
pub fn winning_flag(astros_score: u32, opponent_score: u32) -> Option<bool> {
    if astros_score > opponent_score {
        Some(true)
    } else if astros_score < opponent_score {
        Some(false)
    } else {
        None
    }
}

/// Result of a completed game as a pure function of the final score.
pub fn result_for(astros_score: u32, opponent_score: u32) -> GameResult {
    match winning_flag(astros_score, opponent_score) {
        Some(true) => GameResult::Win,
        Some(false) => GameResult::Loss,
        None => GameResult::Tie,
    }
}

/// English ordinal: 1st, 2nd, 3rd, 4th... with the 11th/12th/13th exception.
pub fn ordinal(n: u32) -> String {
    let suffix = match n % 100 {
        11..=13 => "th",
        _ => match n % 10 {
            1 => "st",
            2 => "nd",
            3 => "rd",
            _ => "th",
        },
    };
    format!("{n}{suffix}")
}
