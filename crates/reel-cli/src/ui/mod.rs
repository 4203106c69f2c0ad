//! TUI rendering — orchestrates all panes.

pub mod documentary_detail;
pub mod documentary_list;

use chrono::Local;
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Paragraph},
};

use crate::{
  app::{App, Screen, sort_label},
  output::format_average,
};

// ─── Root draw ────────────────────────────────────────────────────────────────

/// Main draw function called each frame.
pub fn draw(f: &mut Frame, app: &App) {
  let area = f.area();

  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // header
      Constraint::Min(0),    // body
      Constraint::Length(1), // status bar
    ])
    .split(area);

  draw_header(f, rows[0], app);
  draw_body(f, rows[1], app);
  draw_status(f, rows[2], app);
}

// ─── Header ───────────────────────────────────────────────────────────────────

fn draw_header(f: &mut Frame, area: Rect, app: &App) {
  let date = Local::now().format("%Y-%m-%d").to_string();

  let left = Span::styled(
    format!(
      " reel  sort: {}  category: {}",
      sort_label(app.sort),
      app.category.as_deref().unwrap_or("all"),
    ),
    Style::default()
      .fg(Color::White)
      .add_modifier(Modifier::BOLD),
  );
  let right = Span::styled(
    format!("{date} "),
    Style::default().fg(Color::DarkGray),
  );

  let left_width = left.width() as u16;
  let right_width = right.width() as u16;
  let pad = area
    .width
    .saturating_sub(left_width)
    .saturating_sub(right_width);

  let line = Line::from(vec![
    left,
    Span::raw(" ".repeat(pad as usize)),
    right,
  ]);

  let block = Block::default().style(Style::default().bg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);
  f.render_widget(Paragraph::new(line), inner);
}

// ─── Body ─────────────────────────────────────────────────────────────────────

fn draw_body(f: &mut Frame, area: Rect, app: &App) {
  let cols = Layout::default()
    .direction(Direction::Horizontal)
    .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
    .split(area);

  documentary_list::draw(f, cols[0], app);
  documentary_detail::draw(f, cols[1], app);
}

// ─── Status bar ───────────────────────────────────────────────────────────────

fn draw_status(f: &mut Frame, area: Rect, app: &App) {
  let (mode_label, hints) = match &app.screen {
    _ if app.filter_active => ("SEARCH", "Type to filter  Esc cancel  Enter select".to_string()),
    Screen::ConfirmDelete(id) => ("DELETE", format!("Delete documentary {id}? y/n")),
    Screen::List => (
      "NORMAL",
      "↑↓/jk navigate  / search  s sort  c category  d delete  e export  q quit".to_string(),
    ),
    Screen::Detail => (
      "DETAIL",
      "↑↓/[] prev/next  Esc back  d delete  e export  q quit".to_string(),
    ),
  };

  let status = match &app.screen {
    Screen::ConfirmDelete(_) => hints,
    _ if !app.status_msg.is_empty() => app.status_msg.clone(),
    _ => hints,
  };

  let mode_span = Span::styled(
    format!(" {mode_label} "),
    Style::default()
      .fg(Color::Black)
      .bg(Color::Cyan)
      .add_modifier(Modifier::BOLD),
  );
  let hint_span = Span::styled(
    format!("  {status}"),
    Style::default().fg(Color::DarkGray),
  );
  let totals = Span::styled(
    format!(
      "  [{} · avg {}]",
      app.stats.count,
      format_average(&app.stats)
    ),
    Style::default().fg(Color::Gray),
  );

  let line = Line::from(vec![mode_span, totals, hint_span]);
  f.render_widget(
    Paragraph::new(line).style(Style::default().bg(Color::Black)),
    area,
  );
}
