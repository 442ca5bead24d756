use tui::backend::Backend;
use tui::layout::{Alignment, Constraint, Layout, Rect};
use tui::style::{Color, Modifier, Style};
use tui::text::{Line, Span};
use tui::widgets::{Block, BorderType, Borders, Paragraph};
use tui::{Frame, Terminal};

use crate::app::App;
use crate::state::network::LoadingState;
use mlb_api::{GameResult, GameStatus, GameView};

pub fn draw<B>(terminal: &mut Terminal<B>, app: &App, loading: LoadingState)
where
    B: Backend,
{
    let current_size = terminal.size().unwrap_or_default();
    if current_size.width <= 10 || current_size.height <= 10 {
        return;
    }

    terminal
        .draw(|f| {
            let show_logs = app.state.show_logs;
            let log_height = if show_logs { 8 } else { 0 };
            let [status_bar, game_area, last_game_area, log_area, help_line] =
                Layout::vertical([
                    Constraint::Length(3),
                    Constraint::Fill(3),
                    Constraint::Fill(2),
                    Constraint::Length(log_height),
                    Constraint::Length(1),
                ])
                .areas(f.area());

            draw_status_bar(f, status_bar, app, loading);
            draw_game_card(f, game_area, app);
            draw_last_game_card(f, last_game_area, app);
            if show_logs {
                draw_logs(f, log_area);
            }
            draw_help(f, help_line);
        })
        .unwrap();
}

pub fn default_border<'a>(color: Color) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
}

fn status_color(status: GameStatus) -> Color {
    match status {
        GameStatus::Live => Color::Green,
        GameStatus::Final => Color::Blue,
        GameStatus::Scheduled => Color::Yellow,
        GameStatus::NoGameToday => Color::DarkGray,
    }
}

fn draw_status_bar(f: &mut Frame, area: Rect, app: &App, loading: LoadingState) {
    let block = default_border(Color::DarkGray);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let mut left = vec![
        Span::styled(
            format!("{} ", loading.spinner_char),
            Style::default().fg(Color::Cyan),
        ),
        Span::raw(app.state.status_line.clone()),
    ];
    if app.state.suspended {
        left.push(Span::styled(
            "  (paused — terminal unfocused)",
            Style::default().fg(Color::Yellow),
        ));
    }

    let auto = if app.state.auto_refresh { "auto-refresh on" } else { "auto-refresh off" };
    let right = match &app.state.last_updated {
        Some(stamp) => format!("updated {stamp} • {auto}"),
        None => auto.to_string(),
    };

    let [left_area, right_area] =
        Layout::horizontal([Constraint::Fill(1), Constraint::Length(right.len() as u16 + 1)])
            .areas(inner);
    f.render_widget(Paragraph::new(Line::from(left)), left_area);
    f.render_widget(
        Paragraph::new(right)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Right),
        right_area,
    );
}

fn draw_game_card(f: &mut Frame, area: Rect, app: &App) {
    let Some(game) = app.state.game.as_ref() else {
        let block = default_border(Color::White).title(" Houston Astros ");
        let inner = block.inner(area);
        f.render_widget(block, area);
        f.render_widget(
            Paragraph::new("Loading game data...")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            inner,
        );
        return;
    };

    let color = status_color(game.status);
    let block = default_border(color).title(" Houston Astros ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let (indicator, indicator_color) = winning_indicator(game);

    let mut lines = vec![
        Line::from(Span::styled(
            format!(" {} ", game.status.label()),
            Style::default().fg(Color::Black).bg(color).add_modifier(Modifier::BOLD),
        )),
        Line::default(),
        Line::from(Span::styled(indicator, Style::default().fg(indicator_color))),
    ];

    if app.state.celebrate {
        lines.push(Line::from(Span::styled(
            "*** Astros scored! ***",
            Style::default().fg(Color::LightYellow).add_modifier(Modifier::BOLD),
        )));
    }

    lines.push(Line::default());
    lines.push(score_line(
        "Houston Astros",
        game.astros_score,
        &game.opponent,
        game.opponent_score,
    ));
    lines.push(Line::default());
    lines.push(detail_line("Inning", &game.inning));
    lines.push(detail_line("Time", &game.time));
    lines.push(detail_line("Venue", &game.venue));

    if game.is_live {
        if let (Some(balls), Some(strikes)) = (game.balls, game.strikes) {
            let batter = game.current_batter.as_deref().unwrap_or("—");
            lines.push(detail_line("Count", &format!("{balls}-{strikes}  Batter: {batter}")));
        }
        if !game.last_play.is_empty() {
            lines.push(Line::default());
            lines.push(Line::from(Span::styled(
                game.last_play.clone(),
                Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC),
            )));
        }
    }

    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}

fn draw_last_game_card(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::White).title(" Last Game ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let Some(last) = app.state.last_game.as_ref() else {
        f.render_widget(
            Paragraph::new("Loading last game...")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            inner,
        );
        return;
    };

    if last.result == GameResult::None {
        f.render_widget(
            Paragraph::new("No recent games found")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            inner,
        );
        return;
    }

    let result_color = match last.result {
        GameResult::Win => Color::Green,
        GameResult::Loss => Color::Red,
        _ => Color::Yellow,
    };

    let lines = vec![
        Line::from(Span::styled(
            format!(" {} ", last.result.label()),
            Style::default()
                .fg(Color::Black)
                .bg(result_color)
                .add_modifier(Modifier::BOLD),
        )),
        Line::default(),
        score_line(
            "Houston Astros",
            last.astros_score,
            &last.opponent,
            last.opponent_score,
        ),
        Line::default(),
        detail_line("Date", &last.date),
        detail_line("Time", &last.time),
        detail_line("Venue", &last.venue),
    ];

    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}

fn draw_logs(f: &mut Frame, area: Rect) {
    let widget = tui_logger::TuiLoggerWidget::default()
        .block(default_border(Color::DarkGray).title(" Logs "))
        .style_error(Style::default().fg(Color::Red))
        .style_warn(Style::default().fg(Color::Yellow))
        .style_info(Style::default().fg(Color::Gray));
    f.render_widget(widget, area);
}

fn draw_help(f: &mut Frame, area: Rect) {
    f.render_widget(
        Paragraph::new("q=quit  r=refresh now  a=auto-refresh  \"=logs")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center),
        area,
    );
}

fn score_line<'a>(home_name: &'a str, home: u32, away_name: &'a str, away: u32) -> Line<'a> {
    Line::from(vec![
        Span::raw(home_name),
        Span::styled(
            format!("  {home}"),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled("  vs  ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("{away}  "),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(away_name),
    ])
}

fn detail_line<'a>(label: &'a str, value: &str) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("{label}: "), Style::default().fg(Color::DarkGray)),
        Span::raw(value.to_owned()),
    ])
}

/// Tied is only meaningful while a game is actually being played; a 0-0
/// scheduled or empty slate reads as "no active game", like the original page.
fn winning_indicator(game: &GameView) -> (&'static str, Color) {
    match (game.is_winning, game.status) {
        (Some(true), _) => ("Astros are WINNING!", Color::Green),
        (Some(false), _) => ("Astros are losing", Color::Red),
        (None, GameStatus::Live) => ("Game is tied!", Color::Yellow),
        (None, _) => ("No active game", Color::DarkGray),
    }
}
