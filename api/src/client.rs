use crate::statsapi::{
    FeedResponse, Linescore, Plays, ScheduleGame, ScheduleResponse, TeamInfo, TeamSide,
};
use crate::{GameStatus, GameView, LastGameView, ordinal, result_for, winning_flag};
use chrono::{DateTime, Local, Utc};
use reqwest::Client;
use std::fmt;
use std::time::Duration;

pub type ApiResult<T> = Result<T, ApiError>;

const STATSAPI_BASE: &str = "https://statsapi.mlb.com";
/// Houston Astros franchise id in the Stats API.
pub const ASTROS_TEAM_ID: u32 = 117;
pub const ASTROS_TEAM_NAME: &str = "Houston Astros";
const FETCH_TIMEOUT: Duration = Duration::from_secs(8);
const LOOKAHEAD_DAYS: u64 = 7;
const LOOKBACK_DAYS: u64 = 7;
const LIVE_INNING: &str = "Live";
const LAST_PLAY_FALLBACK: &str = "Game in progress";

/// MLB Stats API client backed by statsapi.mlb.com's public endpoints.
#[derive(Debug, Clone)]
pub struct MlbApi {
    client: Client,
    base: String,
    timeout: Duration,
}

impl Default for MlbApi {
    fn default() -> Self {
        Self {
            client: Client::builder()
                .user_agent("astros-tui/0.1 (terminal live score widget)")
                .build()
                .unwrap_or_default(),
            base: STATSAPI_BASE.to_owned(),
            timeout: FETCH_TIMEOUT,
        }
    }
}

#[derive(Debug)]
pub enum ApiError {
    Network(reqwest::Error, String),
    /// Request exceeded its timeout budget — kept distinct from transport
    /// failures so callers can message the user appropriately.
    Timeout(String),
    Api(reqwest::Error, String),
    Parsing(reqwest::Error, String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(e, url) => write!(f, "Network error for {url}: {e}"),
            ApiError::Timeout(url) => write!(f, "Timed out waiting for {url}"),
            ApiError::Api(e, url) => write!(f, "API error for {url}: {e}"),
            ApiError::Parsing(e, url) => write!(f, "Parse error for {url}: {e}"),
        }
    }
}

impl MlbApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Point the client at a different host. Used by tests.
    pub fn with_base_url(base: impl Into<String>) -> Self {
        Self { base: base.into(), ..Self::default() }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Fetch and normalize the current game picture for the Astros.
    ///
    /// Resolution order:
    /// 1) Today's schedule — first game, with a secondary live-feed fetch
    ///    when the game classifies as live.
    /// 2) A 7-day lookahead — earliest upcoming game, marked Scheduled.
    /// 3) The canonical no-game view.
    pub async fn fetch_game_view(&self) -> ApiResult<GameView> {
        let today = Utc::now().date_naive();
        let url = self.schedule_url(&format!("date={today}"));
        let schedule: ScheduleResponse = self.get(&url).await?;

        if let Some(game) = first_game(&schedule) {
            let mut view = map_schedule_game(game, false);
            if view.status == GameStatus::Live {
                self.apply_live_detail(game.game_pk, &mut view).await;
            }
            return Ok(view);
        }

        let end = today + chrono::Days::new(LOOKAHEAD_DAYS);
        let url = self.schedule_url(&format!("startDate={today}&endDate={end}"));
        let upcoming: ScheduleResponse = self.get(&url).await?;
        match first_game(&upcoming) {
            Some(game) => Ok(map_schedule_game(game, true)),
            None => Ok(GameView::no_game()),
        }
    }

    /// Fetch and normalize the most recent completed game.
    ///
    /// Yesterday's schedule first; if empty, a 7-day lookback window scanned
    /// newest-first for a Final game.
    pub async fn fetch_last_game_view(&self) -> ApiResult<LastGameView> {
        let today = Utc::now().date_naive();
        let yesterday = today - chrono::Days::new(1);
        let url = self.schedule_url(&format!("date={yesterday}"));
        let schedule: ScheduleResponse = self.get(&url).await?;

        if let Some(game) = first_game(&schedule) {
            return Ok(map_last_game(game));
        }

        let week_ago = today - chrono::Days::new(LOOKBACK_DAYS);
        let url = self.schedule_url(&format!("startDate={week_ago}&endDate={yesterday}"));
        let window: ScheduleResponse = self.get(&url).await?;
        match most_recent_final(&window) {
            Some(game) => Ok(map_last_game(game)),
            None => Ok(LastGameView::no_recent()),
        }
    }

    /// Secondary fetch of the live feed for count, batter, inning, and last
    /// play. A failure here degrades gracefully: the view stays Live with the
    /// inning forced to the "Live" placeholder rather than failing the update.
    async fn apply_live_detail(&self, game_pk: Option<u64>, view: &mut GameView) {
        let feed = match game_pk {
            Some(pk) => {
                let url = format!("{}/api/v1.1/game/{pk}/feed/live", self.base);
                self.get::<FeedResponse>(&url).await.ok()
            }
            None => None,
        };

        let Some(feed) = feed else {
            view.inning = LIVE_INNING.into();
            return;
        };

        let live = feed.live_data.as_ref();
        let linescore = live.and_then(|l| l.linescore.as_ref());
        let plays = live.and_then(|l| l.plays.as_ref());
        let current = plays.and_then(|p| p.current_play.as_ref());

        view.inning = format_inning(linescore);
        view.balls = current.and_then(|p| p.count.as_ref()).and_then(|c| c.balls);
        view.strikes = current.and_then(|p| p.count.as_ref()).and_then(|c| c.strikes);
        view.current_batter = current
            .and_then(|p| p.matchup.as_ref())
            .and_then(|m| m.batter.as_ref())
            .and_then(|b| b.full_name.clone());
        view.last_play = extract_last_play(plays);
    }

    fn schedule_url(&self, range: &str) -> String {
        format!(
            "{}/api/v1/schedule?sportId=1&teamId={ASTROS_TEAM_ID}&{range}",
            self.base
        )
    }

    async fn get<T: serde::de::DeserializeOwned>(&self, url: &str) -> ApiResult<T> {
        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ApiError::Timeout(url.to_owned())
                } else {
                    ApiError::Network(e, url.to_owned())
                }
            })?;

        match response.error_for_status() {
            Ok(res) => res
                .json::<T>()
                .await
                .map_err(|e| {
                    if e.is_timeout() {
                        ApiError::Timeout(url.to_owned())
                    } else {
                        ApiError::Parsing(e, url.to_owned())
                    }
                }),
            Err(e) => Err(ApiError::Api(e, url.to_owned())),
        }
    }
}

// ---------------------------------------------------------------------------
// Mapping: Stats API wire types → clean view types
// ---------------------------------------------------------------------------

fn first_game(schedule: &ScheduleResponse) -> Option<&ScheduleGame> {
    schedule
        .dates
        .iter()
        .flatten()
        .flat_map(|d| d.games.iter().flatten())
        .next()
}

/// Newest date first, so a series finale beats earlier games in the window.
fn most_recent_final(schedule: &ScheduleResponse) -> Option<&ScheduleGame> {
    schedule
        .dates
        .iter()
        .flatten()
        .rev()
        .flat_map(|d| d.games.iter().flatten().rev())
        .find(|g| classify_status(g) == GameStatus::Final)
}

fn is_tracked_team(team: &TeamInfo) -> bool {
    team.id == Some(ASTROS_TEAM_ID) || team.name.as_deref() == Some(ASTROS_TEAM_NAME)
}

/// Split a schedule game into (astros side, opponent side).
fn split_sides(game: &ScheduleGame) -> (TeamSide, TeamSide) {
    let teams = game.teams.clone().unwrap_or_default();
    let away_is_astros = teams.away.team.as_ref().map(is_tracked_team).unwrap_or(false);
    if away_is_astros {
        (teams.away, teams.home)
    } else {
        (teams.home, teams.away)
    }
}

/// Classify the raw state strings into the four-way status enum.
///
/// Warmup, delays, suspensions, and rain delays are all widened to Live —
/// any of them can still show meaningful in-progress data, and the abstract
/// state is Live for all of them once the game has started.
fn classify_status(game: &ScheduleGame) -> GameStatus {
    let Some(status) = game.status.as_ref() else {
        return GameStatus::Scheduled;
    };
    if status.abstract_game_state.as_deref() == Some("Live") {
        return GameStatus::Live;
    }
    let detailed = status.detailed_state.as_deref().unwrap_or("");
    if matches!(detailed, "Live" | "In Progress" | "Warmup" | "Rain Delay")
        || detailed.starts_with("Delayed")
        || detailed.starts_with("Suspended")
    {
        GameStatus::Live
    } else if detailed == "Final" || detailed == "Game Over" || detailed.starts_with("Completed") {
        GameStatus::Final
    } else {
        GameStatus::Scheduled
    }
}

fn map_schedule_game(game: &ScheduleGame, upcoming: bool) -> GameView {
    let (astros, opponent) = split_sides(game);
    let astros_score = astros.score.unwrap_or(0);
    let opponent_score = opponent.score.unwrap_or(0);

    let status = if upcoming {
        GameStatus::Scheduled
    } else {
        classify_status(game)
    };

    GameView {
        is_live: status == GameStatus::Live,
        astros_score,
        opponent_score,
        opponent: opponent
            .team
            .as_ref()
            .and_then(|t| t.name.clone())
            .unwrap_or_else(|| "Unknown".into()),
        opponent_team_id: opponent.team.as_ref().and_then(|t| t.id),
        inning: "N/A".into(),
        status,
        time: format_game_time(game.game_date.as_deref()),
        venue: game
            .venue
            .as_ref()
            .and_then(|v| v.name.clone())
            .unwrap_or_else(|| "N/A".into()),
        is_winning: winning_flag(astros_score, opponent_score),
        balls: None,
        strikes: None,
        current_batter: None,
        last_play: String::new(),
    }
}

fn map_last_game(game: &ScheduleGame) -> LastGameView {
    let (astros, opponent) = split_sides(game);
    let astros_score = astros.score.unwrap_or(0);
    let opponent_score = opponent.score.unwrap_or(0);
    let (date, time) = format_game_date_time(game.game_date.as_deref());

    LastGameView {
        astros_score,
        opponent_score,
        opponent: opponent
            .team
            .as_ref()
            .and_then(|t| t.name.clone())
            .unwrap_or_else(|| "Unknown".into()),
        opponent_team_id: opponent.team.as_ref().and_then(|t| t.id),
        date,
        time,
        venue: game
            .venue
            .as_ref()
            .and_then(|v| v.name.clone())
            .unwrap_or_else(|| "N/A".into()),
        result: result_for(astros_score, opponent_score),
    }
}

/// "7th Top" / "9th Bottom" / "5th"; "N/A" when the linescore has no inning.
fn format_inning(linescore: Option<&Linescore>) -> String {
    let Some(inning) = linescore.and_then(|ls| ls.current_inning) else {
        return "N/A".into();
    };
    let ord = ordinal(inning);
    match linescore
        .and_then(|ls| ls.inning_half.as_deref())
        .and_then(half_suffix)
    {
        Some(half) => format!("{ord} {half}"),
        None => ord,
    }
}

fn half_suffix(half: &str) -> Option<&'static str> {
    match half {
        "T" | "Top" => Some("Top"),
        "B" | "Bottom" => Some("Bottom"),
        "M" | "Middle" => Some("Middle"),
        _ => None,
    }
}

/// Most recent play description. No single field is reliably populated across
/// game states, so: the current play's structured result, then its newest
/// sub-event, then the newest resolved play, then a generic fallback.
fn extract_last_play(plays: Option<&Plays>) -> String {
    let Some(plays) = plays else {
        return LAST_PLAY_FALLBACK.into();
    };

    if let Some(current) = &plays.current_play {
        if let Some(desc) = current.result.as_ref().and_then(|r| r.description.as_ref())
            && !desc.trim().is_empty()
        {
            return desc.clone();
        }
        for event in current.play_events.iter().flatten().rev() {
            if let Some(desc) = event.details.as_ref().and_then(|d| d.description.as_ref())
                && !desc.trim().is_empty()
            {
                return desc.clone();
            }
        }
    }

    for play in plays.all_plays.iter().flatten().rev() {
        if let Some(desc) = play.result.as_ref().and_then(|r| r.description.as_ref())
            && !desc.trim().is_empty()
        {
            return desc.clone();
        }
    }

    LAST_PLAY_FALLBACK.into()
}

fn format_game_time(raw: Option<&str>) -> String {
    format_game_date_time(raw).1
}

fn format_game_date_time(raw: Option<&str>) -> (String, String) {
    match raw.and_then(|d| DateTime::parse_from_rfc3339(d).ok()) {
        Some(dt) => {
            let local = dt.with_timezone(&Local);
            (
                local.format("%b %-d, %Y").to_string(),
                local.format("%-I:%M %p").to_string(),
            )
        }
        None => ("N/A".into(), "N/A".into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GameResult;
    use crate::statsapi::{
        EventDetails, GameState, GameTeams, Play, PlayEvent, PlayResult, ScheduleDate, Venue,
    };

    fn side(id: u32, name: &str, score: Option<u32>) -> TeamSide {
        TeamSide {
            score,
            team: Some(TeamInfo { id: Some(id), name: Some(name.into()) }),
        }
    }

    fn game(
        detailed: &str,
        abstract_state: &str,
        away: TeamSide,
        home: TeamSide,
    ) -> ScheduleGame {
        ScheduleGame {
            game_pk: Some(716463),
            game_date: Some("2026-08-25T00:10:00Z".into()),
            status: Some(GameState {
                detailed_state: Some(detailed.into()),
                abstract_game_state: Some(abstract_state.into()),
            }),
            teams: Some(GameTeams { away, home }),
            venue: Some(Venue { name: Some("Daikin Park".into()) }),
        }
    }

    // -----------------------------------------------------------------------
    // Classification
    // -----------------------------------------------------------------------

    #[test]
    fn delays_and_warmup_widen_to_live() {
        for detailed in ["In Progress", "Live", "Warmup", "Rain Delay", "Delayed Start: Rain", "Suspended: Rain"] {
            let g = game(detailed, "Preview", TeamSide::default(), TeamSide::default());
            assert_eq!(classify_status(&g), GameStatus::Live, "{detailed}");
        }
    }

    #[test]
    fn abstract_live_state_wins_over_detailed() {
        let g = game("Pre-Game", "Live", TeamSide::default(), TeamSide::default());
        assert_eq!(classify_status(&g), GameStatus::Live);
    }

    #[test]
    fn final_states_classify_as_final() {
        for detailed in ["Final", "Game Over", "Completed Early: Rain"] {
            let g = game(detailed, "Final", TeamSide::default(), TeamSide::default());
            assert_eq!(classify_status(&g), GameStatus::Final, "{detailed}");
        }
    }

    #[test]
    fn everything_else_classifies_as_scheduled() {
        for detailed in ["Scheduled", "Pre-Game", "Postponed"] {
            let g = game(detailed, "Preview", TeamSide::default(), TeamSide::default());
            assert_eq!(classify_status(&g), GameStatus::Scheduled, "{detailed}");
        }
    }

    // -----------------------------------------------------------------------
    // Schedule game mapping
    // -----------------------------------------------------------------------

    #[test]
    fn astros_side_is_found_whether_home_or_away() {
        let away = game(
            "In Progress",
            "Live",
            side(ASTROS_TEAM_ID, ASTROS_TEAM_NAME, Some(4)),
            side(140, "Texas Rangers", Some(2)),
        );
        let view = map_schedule_game(&away, false);
        assert_eq!(view.astros_score, 4);
        assert_eq!(view.opponent, "Texas Rangers");
        assert_eq!(view.opponent_team_id, Some(140));
        assert_eq!(view.is_winning, Some(true));
        assert!(view.is_live);

        let home = game(
            "In Progress",
            "Live",
            side(140, "Texas Rangers", Some(2)),
            side(ASTROS_TEAM_ID, ASTROS_TEAM_NAME, Some(1)),
        );
        let view = map_schedule_game(&home, false);
        assert_eq!(view.astros_score, 1);
        assert_eq!(view.opponent_score, 2);
        assert_eq!(view.is_winning, Some(false));
    }

    #[test]
    fn upcoming_games_are_forced_to_scheduled() {
        let g = game(
            "Pre-Game",
            "Preview",
            side(ASTROS_TEAM_ID, ASTROS_TEAM_NAME, None),
            side(147, "New York Yankees", None),
        );
        let view = map_schedule_game(&g, true);
        assert_eq!(view.status, GameStatus::Scheduled);
        assert!(!view.is_live);
        assert_eq!((view.astros_score, view.opponent_score), (0, 0));
        assert_eq!(view.is_winning, None);
        assert_eq!(view.venue, "Daikin Park");
    }

    #[test]
    fn last_game_result_follows_the_score() {
        let g = game(
            "Final",
            "Final",
            side(ASTROS_TEAM_ID, ASTROS_TEAM_NAME, Some(6)),
            side(140, "Texas Rangers", Some(4)),
        );
        let view = map_last_game(&g);
        assert_eq!(view.result, GameResult::Win);
        assert_eq!(view.opponent, "Texas Rangers");
        assert_ne!(view.date, "N/A");
    }

    #[test]
    fn lookback_window_prefers_the_newest_final() {
        let day = |date: &str, detailed: &str, astros: u32, opp: u32| ScheduleDate {
            date: Some(date.into()),
            games: Some(vec![game(
                detailed,
                "",
                side(ASTROS_TEAM_ID, ASTROS_TEAM_NAME, Some(astros)),
                side(140, "Texas Rangers", Some(opp)),
            )]),
        };
        let window = ScheduleResponse {
            dates: Some(vec![
                day("2026-08-20", "Final", 1, 0),
                day("2026-08-22", "Final", 2, 5),
                day("2026-08-24", "Postponed", 0, 0),
            ]),
        };
        let picked = most_recent_final(&window).expect("a final game exists");
        let view = map_last_game(picked);
        assert_eq!((view.astros_score, view.opponent_score), (2, 5));
        assert_eq!(view.result, GameResult::Loss);
    }

    #[test]
    fn empty_window_yields_no_final() {
        let window = ScheduleResponse { dates: Some(vec![]) };
        assert!(most_recent_final(&window).is_none());
    }

    // -----------------------------------------------------------------------
    // Inning formatting
    // -----------------------------------------------------------------------

    fn linescore(inning: Option<u32>, half: Option<&str>) -> Linescore {
        Linescore { current_inning: inning, inning_half: half.map(Into::into) }
    }

    #[test]
    fn inning_formats_ordinal_and_half() {
        assert_eq!(format_inning(Some(&linescore(Some(1), Some("T")))), "1st Top");
        assert_eq!(format_inning(Some(&linescore(Some(2), Some("B")))), "2nd Bottom");
        assert_eq!(format_inning(Some(&linescore(Some(7), Some("Top")))), "7th Top");
        assert_eq!(format_inning(Some(&linescore(Some(5), Some("Middle")))), "5th Middle");
    }

    #[test]
    fn unknown_half_omits_the_suffix() {
        assert_eq!(format_inning(Some(&linescore(Some(9), Some("End")))), "9th");
        assert_eq!(format_inning(Some(&linescore(Some(9), None))), "9th");
    }

    #[test]
    fn missing_inning_is_not_available() {
        assert_eq!(format_inning(None), "N/A");
        assert_eq!(format_inning(Some(&linescore(None, Some("T")))), "N/A");
    }

    // -----------------------------------------------------------------------
    // Last play extraction
    // -----------------------------------------------------------------------

    fn play_with_result(desc: Option<&str>) -> Play {
        Play {
            result: Some(PlayResult { description: desc.map(Into::into) }),
            ..Default::default()
        }
    }

    #[test]
    fn last_play_prefers_the_structured_result() {
        let plays = Plays {
            current_play: Some(Play {
                result: Some(PlayResult { description: Some("Altuve homers (22).".into()) }),
                play_events: Some(vec![PlayEvent {
                    details: Some(EventDetails { description: Some("Ball".into()) }),
                }]),
                ..Default::default()
            }),
            all_plays: Some(vec![play_with_result(Some("Previous play."))]),
        };
        assert_eq!(extract_last_play(Some(&plays)), "Altuve homers (22).");
    }

    #[test]
    fn last_play_falls_back_to_newest_sub_event() {
        let plays = Plays {
            current_play: Some(Play {
                result: Some(PlayResult { description: Some("  ".into()) }),
                play_events: Some(vec![
                    PlayEvent { details: Some(EventDetails { description: Some("Ball".into()) }) },
                    PlayEvent { details: Some(EventDetails { description: Some("Swinging Strike".into()) }) },
                ]),
                ..Default::default()
            }),
            all_plays: None,
        };
        assert_eq!(extract_last_play(Some(&plays)), "Swinging Strike");
    }

    #[test]
    fn last_play_scans_resolved_plays_newest_first() {
        let plays = Plays {
            current_play: None,
            all_plays: Some(vec![
                play_with_result(Some("Older play.")),
                play_with_result(Some("Newest play.")),
                play_with_result(None),
            ]),
        };
        assert_eq!(extract_last_play(Some(&plays)), "Newest play.");
    }

    #[test]
    fn last_play_has_a_generic_fallback() {
        assert_eq!(extract_last_play(None), LAST_PLAY_FALLBACK);
        assert_eq!(extract_last_play(Some(&Plays::default())), LAST_PLAY_FALLBACK);
    }

    // -----------------------------------------------------------------------
    // HTTP behavior (mockito)
    // -----------------------------------------------------------------------

    const LIVE_SCHEDULE_JSON: &str = r#"{
      "dates": [{
        "date": "2026-08-26",
        "games": [{
          "gamePk": 716463,
          "gameDate": "2026-08-26T00:10:00Z",
          "status": {"detailedState": "In Progress", "abstractGameState": "Live"},
          "teams": {
            "away": {"score": 3, "team": {"id": 117, "name": "Houston Astros"}},
            "home": {"score": 2, "team": {"id": 140, "name": "Texas Rangers"}}
          },
          "venue": {"name": "Globe Life Field"}
        }]
      }]
    }"#;

    const FEED_JSON: &str = r#"{
      "liveData": {
        "linescore": {"currentInning": 7, "inningHalf": "Top"},
        "plays": {
          "currentPlay": {
            "result": {"description": "Jose Altuve singles on a line drive."},
            "count": {"balls": 1, "strikes": 2},
            "matchup": {"batter": {"fullName": "Jose Altuve"}}
          },
          "allPlays": []
        }
      }
    }"#;

    const EMPTY_SCHEDULE_JSON: &str = r#"{"dates": []}"#;

    #[tokio::test]
    async fn live_game_today_is_enriched_from_the_feed() {
        let mut server = mockito::Server::new_async().await;
        let _schedule = server
            .mock("GET", "/api/v1/schedule")
            .match_query(mockito::Matcher::Any)
            .with_body(LIVE_SCHEDULE_JSON)
            .create_async()
            .await;
        let _feed = server
            .mock("GET", "/api/v1.1/game/716463/feed/live")
            .with_body(FEED_JSON)
            .create_async()
            .await;

        let api = MlbApi::with_base_url(server.url());
        let view = api.fetch_game_view().await.expect("fetch succeeds");
        assert_eq!(view.status, GameStatus::Live);
        assert!(view.is_live);
        assert_eq!(view.inning, "7th Top");
        assert_eq!(view.balls, Some(1));
        assert_eq!(view.strikes, Some(2));
        assert_eq!(view.current_batter.as_deref(), Some("Jose Altuve"));
        assert_eq!(view.last_play, "Jose Altuve singles on a line drive.");
        assert_eq!(view.is_winning, Some(true));
    }

    #[tokio::test]
    async fn failed_feed_fetch_degrades_to_the_live_placeholder() {
        let mut server = mockito::Server::new_async().await;
        let _schedule = server
            .mock("GET", "/api/v1/schedule")
            .match_query(mockito::Matcher::Any)
            .with_body(LIVE_SCHEDULE_JSON)
            .create_async()
            .await;
        let _feed = server
            .mock("GET", "/api/v1.1/game/716463/feed/live")
            .with_status(500)
            .create_async()
            .await;

        let api = MlbApi::with_base_url(server.url());
        let view = api.fetch_game_view().await.expect("fetch still succeeds");
        assert_eq!(view.status, GameStatus::Live);
        assert_eq!(view.inning, LIVE_INNING);
        assert_eq!(view.balls, None);
    }

    #[tokio::test]
    async fn no_games_anywhere_yields_the_no_game_view() {
        let mut server = mockito::Server::new_async().await;
        let _schedule = server
            .mock("GET", "/api/v1/schedule")
            .match_query(mockito::Matcher::Any)
            .with_body(EMPTY_SCHEDULE_JSON)
            .expect_at_least(2)
            .create_async()
            .await;

        let api = MlbApi::with_base_url(server.url());
        let view = api.fetch_game_view().await.expect("fetch succeeds");
        assert_eq!(view, GameView::no_game());
    }

    #[tokio::test]
    async fn http_status_errors_are_classified_as_api() {
        let mut server = mockito::Server::new_async().await;
        let _schedule = server
            .mock("GET", "/api/v1/schedule")
            .match_query(mockito::Matcher::Any)
            .with_status(503)
            .create_async()
            .await;

        let api = MlbApi::with_base_url(server.url());
        let err = api.fetch_game_view().await.expect_err("503 must fail");
        assert!(matches!(err, ApiError::Api(_, _)), "got {err}");
    }

    #[tokio::test]
    async fn malformed_body_is_classified_as_parsing() {
        let mut server = mockito::Server::new_async().await;
        let _schedule = server
            .mock("GET", "/api/v1/schedule")
            .match_query(mockito::Matcher::Any)
            .with_body("not json at all")
            .create_async()
            .await;

        let api = MlbApi::with_base_url(server.url());
        let err = api.fetch_game_view().await.expect_err("garbage must fail");
        assert!(matches!(err, ApiError::Parsing(_, _)), "got {err}");
    }

    #[tokio::test]
    async fn stalled_server_is_classified_as_timeout() {
        // Bound but never accepted: the handshake completes, then nothing.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
        let addr = listener.local_addr().expect("local addr");

        let api = MlbApi::with_base_url(format!("http://{addr}"))
            .with_timeout(Duration::from_millis(200));
        let err = api.fetch_game_view().await.expect_err("must time out");
        assert!(matches!(err, ApiError::Timeout(_)), "got {err}");
        drop(listener);
    }

    #[tokio::test]
    async fn yesterdays_final_becomes_the_last_game_view() {
        let yesterday_json = r#"{
          "dates": [{
            "date": "2026-08-25",
            "games": [{
              "gamePk": 716400,
              "gameDate": "2026-08-25T00:10:00Z",
              "status": {"detailedState": "Final", "abstractGameState": "Final"},
              "teams": {
                "away": {"score": 4, "team": {"id": 140, "name": "Texas Rangers"}},
                "home": {"score": 6, "team": {"id": 117, "name": "Houston Astros"}}
              },
              "venue": {"name": "Daikin Park"}
            }]
          }]
        }"#;

        let mut server = mockito::Server::new_async().await;
        let _schedule = server
            .mock("GET", "/api/v1/schedule")
            .match_query(mockito::Matcher::Any)
            .with_body(yesterday_json)
            .create_async()
            .await;

        let api = MlbApi::with_base_url(server.url());
        let view = api.fetch_last_game_view().await.expect("fetch succeeds");
        assert_eq!(view.result, GameResult::Win);
        assert_eq!((view.astros_score, view.opponent_score), (6, 4));
        assert_eq!(view.opponent, "Texas Rangers");
        assert_eq!(view.venue, "Daikin Park");
    }
}
