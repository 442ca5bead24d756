//! MLB Stats API raw wire types: serde shapes for deserializing statsapi.mlb.com
//! responses. These map to the clean view types via the mapping functions in client.rs.

use serde::Deserialize;

// ---------------------------------------------------------------------------
// Schedule  (v1 API)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ScheduleResponse {
    pub dates: Option<Vec<ScheduleDate>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ScheduleDate {
    pub date: Option<String>, // "2026-08-26"
    pub games: Option<Vec<ScheduleGame>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ScheduleGame {
    #[serde(rename = "gamePk")]
    pub game_pk: Option<u64>,
    #[serde(rename = "gameDate")]
    pub game_date: Option<String>, // ISO 8601
    pub status: Option<GameState>,
    pub teams: Option<GameTeams>,
    pub venue: Option<Venue>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct GameState {
    /// "Scheduled", "Warmup", "In Progress", "Delayed Start: Rain", "Final", ...
    #[serde(rename = "detailedState")]
    pub detailed_state: Option<String>,
    /// "Preview" | "Live" | "Final"
    #[serde(rename = "abstractGameState")]
    pub abstract_game_state: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct GameTeams {
    #[serde(default)]
    pub away: TeamSide,
    #[serde(default)]
    pub home: TeamSide,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct TeamSide {
    pub score: Option<u32>,
    pub team: Option<TeamInfo>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct TeamInfo {
    pub id: Option<u32>,
    pub name: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct Venue {
    pub name: Option<String>,
}

// ---------------------------------------------------------------------------
// Live feed  (v1.1 API)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct FeedResponse {
    #[serde(rename = "liveData")]
    pub live_data: Option<LiveData>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct LiveData {
    pub linescore: Option<Linescore>,
    pub plays: Option<Plays>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct Linescore {
    #[serde(rename = "currentInning")]
    pub current_inning: Option<u32>,
    /// "Top" | "Bottom" | "Middle" | "End" — older feeds abbreviate to "T"/"B"/"M"
    #[serde(rename = "inningHalf")]
    pub inning_half: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct Plays {
    #[serde(rename = "currentPlay")]
    pub current_play: Option<Play>,
    #[serde(rename = "allPlays")]
    pub all_plays: Option<Vec<Play>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct Play {
    pub result: Option<PlayResult>,
    pub count: Option<PlayCount>,
    pub matchup: Option<Matchup>,
    #[serde(rename = "playEvents")]
    pub play_events: Option<Vec<PlayEvent>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct PlayResult {
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct PlayCount {
    pub balls: Option<u8>,
    pub strikes: Option<u8>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct Matchup {
    pub batter: Option<Batter>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct Batter {
    #[serde(rename = "fullName")]
    pub full_name: Option<String>,
}

/// Pitch-level sub-event inside currentPlay. The result description is only
/// written once the at-bat resolves, so these fill the gap mid-at-bat.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct PlayEvent {
    pub details: Option<EventDetails>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EventDetails {
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schedule_camel_case_fields_deserialize() {
        let raw = r#"{
          "dates": [{
            "date": "2026-08-26",
            "games": [{
              "gamePk": 716463,
              "gameDate": "2026-08-26T00:10:00Z",
              "status": {"detailedState": "Warmup", "abstractGameState": "Preview"},
              "teams": {"away": {"score": 0, "team": {"id": 117, "name": "Houston Astros"}}},
              "venue": {"name": "Daikin Park"}
            }]
          }]
        }"#;
        let schedule: ScheduleResponse = serde_json::from_str(raw).expect("valid schedule");
        let dates = schedule.dates.unwrap();
        let game = &dates[0].games.as_ref().unwrap()[0];
        assert_eq!(game.game_pk, Some(716463));
        assert_eq!(
            game.status.as_ref().unwrap().detailed_state.as_deref(),
            Some("Warmup")
        );
        // Missing "home" side falls back to the empty default.
        let teams = game.teams.as_ref().unwrap();
        assert!(teams.home.team.is_none());
        assert_eq!(teams.away.team.as_ref().unwrap().id, Some(117));
    }

    #[test]
    fn feed_tolerates_sparse_payloads() {
        let raw = r#"{"liveData": {"plays": {"currentPlay": {"count": {"balls": 3}}}}}"#;
        let feed: FeedResponse = serde_json::from_str(raw).expect("valid feed");
        let plays = feed.live_data.unwrap().plays.unwrap();
        let count = plays.current_play.unwrap().count.unwrap();
        assert_eq!(count.balls, Some(3));
        assert_eq!(count.strikes, None);
    }
}
