use crate::tui::app::AppState;
use ratatui::prelude::*;
use ratatui::widgets::*;

use super::layout::{centered_rect, inner};

const BANNER: &str = r#"
  _   _                _                         _   _       _     _ _
 | | | | ___  __ _  __| |___       _   _ _ __   | | | | ___ | | __| ( ) ___ _ __ ___
 | |_| |/ _ \/ _` |/ _` / __|_____| | | | '_ \  | |_| |/ _ \| |/ _` |/ / _ \ '_ ` _ \
 |  _  |  __/ (_| | (_| \__ \_____| |_| | |_) | |  _  | (_) | | (_| | |  __/ | | | | |
 |_| |_|\___|\__,_|\__,_|___/      \__,_| .__/  |_| |_|\___/|_|\__,_|  \___|_| |_| |_|
                                        |_|
"#;

pub(super) fn draw_menu(f: &mut Frame, app: &AppState) {
    let area = centered_rect(80, 80, f.area());
    let record = app.session().record();
    let title = format!("{}  ${}", record.name, record.funds);
    f.render_widget(Clear, area);
    f.render_widget(Block::default().title(title).borders(Borders::ALL), area);

    let banner: Vec<Line> = BANNER
        .lines()
        .map(|l| Line::from(Span::styled(l.to_string(), Style::default().fg(Color::Green))))
        .collect();
    let [top, items, info] = Layout::vertical([
        Constraint::Length(banner.len() as u16 + 1),
        Constraint::Length(8),
        Constraint::Min(3),
    ])
    .areas(inner(area));
    f.render_widget(Paragraph::new(banner).alignment(Alignment::Center), top);

    let mut lines: Vec<Line> = app
        .menu_items_display()
        .into_iter()
        .enumerate()
        .map(|(i, label)| {
            if i == app.menu_index {
                Line::from(Span::styled(
                    format!("> {label} <"),
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(label)
            }
        })
        .collect();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "[Enter] Select  [Up/Down] Move  [M] Table  [Q] Quit",
        Style::default().add_modifier(Modifier::DIM),
    )));
    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), items);

    if !app.info.is_empty() {
        let info_lines: Vec<Line> = app.info.iter().map(|l| Line::from(l.as_str())).collect();
        let para = Paragraph::new(info_lines)
            .block(Block::default().borders(Borders::TOP))
            .wrap(Wrap { trim: true })
            .alignment(Alignment::Center);
        f.render_widget(para, info);
    }
}
