use crate::game::{HandSummary, Prompt, Street, HUMAN_SEAT};
use crate::snapshot::{SeatView, TableSnapshot};
use crate::tui::app::AppState;
use ratatui::prelude::*;
use ratatui::widgets::*;

use super::card_span;
use super::layout::{centered_rect, inner};

pub(super) fn draw_table(f: &mut Frame, app: &AppState) {
    let snap = app.snapshot();
    let [header, board, seats, footer] = Layout::vertical([
        Constraint::Length(4),
        Constraint::Length(5),
        Constraint::Min(7),
        Constraint::Length(6),
    ])
    .areas(f.area());

    let cfg = app.session().config();
    let header_lines = vec![
        Line::from(format!(
            "Hand #{}   Blinds {}/{}   Pot ${}",
            snap.hand_no, cfg.small_blind, cfg.big_blind, snap.pot
        )),
        Line::from(format!("Bet to match: {}   Bankroll: ${}", snap.current_bet, app.session().record().funds)),
    ];
    let header_para = Paragraph::new(header_lines)
        .block(Block::default().title("Heads-up Hold'em").borders(Borders::ALL));
    f.render_widget(header_para, header);

    draw_board(f, board, &snap);

    let [left, right] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(seats);
    for (idx, (seat, area)) in snap.seats.iter().zip([left, right]).enumerate() {
        let won = snap.summary.as_ref().is_some_and(|s| s.winners.contains(&idx));
        draw_seat(f, area, seat, won);
    }

    match app.prompt() {
        Some(Prompt::HandOver(summary)) => draw_result(f, footer, summary, &snap),
        _ => draw_actions(f, footer, app),
    }

    if app.help_open() {
        draw_help(f);
    }
}

fn draw_board(f: &mut Frame, area: Rect, snap: &TableSnapshot) {
    let title = format!("Board: {}", snap.street.label());
    f.render_widget(Block::default().title(title).borders(Borders::ALL), area);
    let slots = Layout::horizontal([Constraint::Ratio(1, 5); 5]).split(inner(area));
    for (i, slot) in slots.iter().enumerate() {
        let fresh = matches!((snap.street, i), (Street::Flop, 0..=2) | (Street::Turn, 3) | (Street::River, 4));
        draw_card(f, *slot, snap.board.get(i).copied(), fresh.then_some(Color::Yellow));
    }
}

fn draw_card(f: &mut Frame, area: Rect, card: Option<crate::cards::Card>, border: Option<Color>) {
    let mut block = Block::default().borders(Borders::ALL);
    if let Some(color) = border {
        block = block.border_style(Style::default().fg(color));
    }
    let content = match card {
        Some(c) => Line::from(card_span(c)),
        None => Line::from(Span::styled("··", Style::default().add_modifier(Modifier::DIM))),
    };
    f.render_widget(Paragraph::new(content).alignment(Alignment::Center).block(block), area);
}

fn draw_seat(f: &mut Frame, area: Rect, seat: &SeatView, won: bool) {
    let mut title = seat.name.clone();
    if seat.is_dealer {
        title.push_str(" [D]");
    }
    if seat.is_current {
        title.push_str(" [Act]");
    }
    let border = if seat.folded {
        Color::DarkGray
    } else if won {
        Color::Green
    } else if seat.is_current {
        Color::Yellow
    } else {
        Color::Reset
    };
    let block = Block::default().title(title).borders(Borders::ALL).border_style(Style::default().fg(border));
    f.render_widget(block, area);

    let [text, cards] = Layout::vertical([Constraint::Min(1), Constraint::Length(3)]).areas(inner(area));
    let last = seat.action.map_or("--", |a| a.label());
    let lines = vec![
        Line::from(format!("Funds: ${}", seat.funds)),
        Line::from(format!("Bet: {}", seat.bet)),
        Line::from(format!("Last: {last}")),
    ];
    f.render_widget(Paragraph::new(lines), text);

    let [a, b] = Layout::horizontal([Constraint::Length(8), Constraint::Length(8)]).areas(cards);
    match seat.hole {
        Some(h) => {
            draw_card(f, a, Some(h.first()), Some(Color::Cyan));
            draw_card(f, b, Some(h.second()), Some(Color::Cyan));
        }
        None if !seat.folded => {
            draw_card(f, a, None, None);
            draw_card(f, b, None, None);
        }
        None => {}
    }
}

fn draw_actions(f: &mut Frame, area: Rect, app: &AppState) {
    let block = Block::default().title("Your move").borders(Borders::ALL);
    let mut lines = Vec::new();
    if let Some(Prompt::AwaitAction { legal, .. }) = app.prompt() {
        let mut spans = Vec::new();
        for (i, action) in legal.iter().enumerate() {
            let style = if i == app.selected() {
                Style::default().fg(Color::Black).bg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default().add_modifier(Modifier::BOLD)
            };
            spans.push(Span::styled(format!(" {action} "), style));
            spans.push(Span::raw("  "));
        }
        lines.push(Line::from(spans));
    } else {
        lines.push(Line::from("Waiting..."));
    }
    lines.push(Line::from(Span::styled(
        "Left/Right select  Enter submit  F/K/C/B/R/A shortcuts  ? help  M menu",
        Style::default().add_modifier(Modifier::DIM),
    )));
    if let Some(err) = app.action_error() {
        lines.push(Line::from(Span::styled(format!("Error: {err}"), Style::default().fg(Color::Red))));
    }
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }).block(block), area);
}

fn draw_result(f: &mut Frame, area: Rect, summary: &HandSummary, snap: &TableSnapshot) {
    let block = Block::default().title("Result").borders(Borders::ALL);
    let name = |seat: usize| snap.seats.get(seat).map_or("?", |s| s.name.as_str());
    let mut lines = Vec::new();

    if let Some(short) = summary.blind_shortfall {
        lines.push(Line::from(format!("{} cannot cover the blind.", name(short))));
    } else {
        let winners: Vec<String> = summary
            .winners
            .iter()
            .map(|&w| format!("{} (+{})", name(w), summary.payouts.get(w).copied().unwrap_or(0)))
            .collect();
        let verb = if winners.len() > 1 { "split the pot" } else { "wins" };
        lines.push(Line::from(format!("{} {verb}", winners.join(" and "))));
    }
    for (seat, best) in summary.showdown.iter().enumerate() {
        if let Some(best) = best {
            let mut spans = vec![Span::raw(format!("{}: {}  ", name(seat), best.classification))];
            for card in best.best_five {
                spans.push(card_span(card));
                spans.push(Span::raw(" "));
            }
            lines.push(Line::from(spans));
        }
    }

    let keys = match summary.match_result {
        Some(result) => {
            let outcome = if result.human_won { "You won the match" } else { "You lost the match" };
            lines.push(Line::from(Span::styled(
                format!("{outcome} ({:+})", result.funds_delta),
                Style::default().add_modifier(Modifier::BOLD),
            )));
            "G new match  M menu"
        }
        None => "N next hand  G new match  M menu",
    };
    lines.push(Line::from(Span::styled(keys, Style::default().add_modifier(Modifier::DIM))));
    if summary.winners.contains(&HUMAN_SEAT) && summary.winners.len() == 1 {
        f.render_widget(Paragraph::new(lines).block(block.border_style(Style::default().fg(Color::Green))), area);
    } else {
        f.render_widget(Paragraph::new(lines).block(block), area);
    }
}

fn draw_help(f: &mut Frame) {
    let area = centered_rect(60, 60, f.area());
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let lines = vec![
        Line::from(Span::styled("Betting:", bold)),
        Line::from("- Left / Right: choose an action"),
        Line::from("- Enter: submit the chosen action"),
        Line::from("- F fold, K check, C call, B bet, R raise, A all-in"),
        Line::from(""),
        Line::from(Span::styled("After a hand:", bold)),
        Line::from("- N: next hand"),
        Line::from("- G: new match"),
        Line::from(""),
        Line::from("- M: menu   Q: quit from the menu"),
        Line::from("Close help: ? or Esc"),
    ];
    f.render_widget(Clear, area);
    f.render_widget(Block::default().title("Help").borders(Borders::ALL), area);
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner(area));
}
