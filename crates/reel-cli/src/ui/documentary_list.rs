//! Documentary list pane — left panel.

use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use crate::{app::App, output::format_rating};

/// Render the record list into `area`.
pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let filtered = app.filtered_records();
  let total = app.records.len();

  let title = if app.filter_active || !app.filter.is_empty() {
    format!(" Documentaries ({}/{}) ", filtered.len(), total)
  } else {
    format!(" Documentaries ({}) ", total)
  };

  let block = Block::default()
    .title(title)
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));

  let mut inner_area = block.inner(area);
  f.render_widget(block, area);

  if (app.filter_active || !app.filter.is_empty()) && inner_area.height > 2 {
    let filter_area = Rect {
      x:      inner_area.x,
      y:      inner_area.y + inner_area.height - 1,
      width:  inner_area.width,
      height: 1,
    };
    inner_area.height = inner_area.height.saturating_sub(1);

    let filter_text = if app.filter_active {
      format!("/{}_", app.filter)
    } else {
      format!("/{}", app.filter)
    };
    f.render_widget(
      Paragraph::new(filter_text).style(Style::default().fg(Color::Yellow)),
      filter_area,
    );
  }

  if total == 0 {
    f.render_widget(
      Paragraph::new("No documentaries yet.").style(Style::default().fg(Color::DarkGray)),
      inner_area,
    );
    return;
  }

  let items: Vec<ListItem> = filtered
    .iter()
    .map(|d| {
      ListItem::new(Line::from(vec![
        Span::styled(format!("{:>4} ", d.year), Style::default().fg(Color::DarkGray)),
        Span::raw(d.title.clone()),
        Span::styled(
          format!("  {}", format_rating(d.rating)),
          Style::default().fg(Color::Yellow),
        ),
      ]))
    })
    .collect();

  let mut state = ListState::default();
  state.select(if filtered.is_empty() {
    None
  } else {
    Some(app.list_cursor)
  });

  f.render_stateful_widget(
    List::new(items).highlight_style(
      Style::default()
        .bg(Color::Blue)
        .fg(Color::White)
        .add_modifier(Modifier::BOLD),
    ),
    inner_area,
    &mut state,
  );
}
