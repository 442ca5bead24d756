use mlb_api::{GameView, LastGameView};

/// Coarse-grained change filter deciding whether a freshly normalized view is
/// worth presenting. Compares a fixed field subset; ball-strike count and
/// batter are deliberately excluded, so those can go stale between accepted
/// updates in exchange for fewer visual refreshes.
pub fn game_view_changed(old: Option<&GameView>, new: &GameView) -> bool {
    let Some(old) = old else {
        return true;
    };
    old.astros_score != new.astros_score
        || old.opponent_score != new.opponent_score
        || old.status != new.status
        || old.is_live != new.is_live
        || old.inning != new.inning
        || old.opponent != new.opponent
}

pub fn last_game_changed(old: Option<&LastGameView>, new: &LastGameView) -> bool {
    let Some(old) = old else {
        return true;
    };
    old.astros_score != new.astros_score
        || old.opponent_score != new.opponent_score
        || old.result != new.result
        || old.opponent != new.opponent
}
