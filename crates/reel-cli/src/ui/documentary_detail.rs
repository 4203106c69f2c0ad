//! Documentary detail pane — right panel.

use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::{
  app::{App, Screen},
  output::format_rating,
};

/// Render the record under the cursor into `area`.
pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let record = app.cursor_record();

  let focused = matches!(app.screen, Screen::Detail | Screen::ConfirmDelete(_));
  let border = if focused { Color::Cyan } else { Color::DarkGray };

  let block = Block::default()
    .title(" Detail ")
    .borders(Borders::ALL)
    .border_style(Style::default().fg(border));
  let inner = block.inner(area);
  f.render_widget(block, area);

  let Some(d) = record else {
    f.render_widget(
      Paragraph::new("Nothing selected.").style(Style::default().fg(Color::DarkGray)),
      inner,
    );
    return;
  };

  let rows = [
    ("id", d.id.to_string()),
    ("title", d.title.clone()),
    ("director", d.director.clone()),
    ("year", d.year.to_string()),
    ("category", d.category.clone()),
    ("rating", format_rating(d.rating)),
  ];

  let lines: Vec<Line> = rows
    .into_iter()
    .map(|(label, value)| {
      Line::from(vec![
        Span::styled(
          format!("{label:<10}"),
          Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
        ),
        Span::raw(value),
      ])
    })
    .collect();

  f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}
