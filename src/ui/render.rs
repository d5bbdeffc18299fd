use anyhow::Result;
use crossterm::{
    ExecutableCommand,
    event::{self, Event, KeyEventKind},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Wrap},
};
use std::{
    io,
    time::{Duration, Instant},
};

use crate::app::{AppState, InputMode};
use crate::layout::LayoutDetail;
use crate::table::{TableController, ViewState};
use crate::ui::handlers::handle_key_event;
use crate::utils::{display_width, truncate_to_width};

const ROW_NUMBER_WIDTH: u16 = 5;

pub fn run_app(mut app_state: AppState) -> Result<()> {
    let mut terminal = setup_terminal()?;
    let result = event_loop(&mut terminal, &mut app_state);
    restore_terminal(&mut terminal)?;
    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app_state: &mut AppState,
) -> Result<()> {
    while !app_state.should_quit {
        terminal.draw(|f| ui(f, app_state))?;

        // The loading screen is on screen before the blocking fetch starts.
        if app_state.needs_load() {
            app_state.load_current_view();
            continue;
        }

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    handle_key_event(app_state, key);
                }
            }
        }
    }

    Ok(())
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;

    Ok(terminal)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(())
}

/// Works out how many rows and columns of the table fit in `area`.
fn update_visible_area(app_state: &mut AppState, area: Rect) {
    // Borders and the header row.
    app_state.visible_rows = (area.height as usize).saturating_sub(3).max(1);

    let available_width = (area.width as usize).saturating_sub(ROW_NUMBER_WIDTH as usize + 2);
    app_state.visible_cols = (available_width / app_state.column_width.max(1)).max(1);

    app_state.handle_scrolling();
}

fn ui(f: &mut Frame, app_state: &mut AppState) {
    let size = f.size();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(app_state.info_panel_height as u16),
            Constraint::Length(1),
        ])
        .split(size);

    draw_title_with_tabs(f, app_state, chunks[0]);

    update_visible_area(app_state, chunks[1]);
    let counted = app_state
        .controller()
        .map(|controller| controller.summary().filtered_rows);
    let shown = counted.map(|target| {
        app_state.counter.retarget(target);
        app_state.counter.tick(Instant::now())
    });

    match &app_state.tab().state {
        ViewState::Loading => {
            let config = app_state.tab().config();
            draw_message(f, chunks[1], config.title, config.loading_message, "", Color::Gray);
        }
        ViewState::Failed(message) => {
            let config = app_state.tab().config();
            draw_message(
                f,
                chunks[1],
                config.error_title,
                message,
                config.error_hint,
                Color::LightRed,
            );
        }
        ViewState::Ready(controller) if controller.is_empty() => {
            let config = controller.config();
            draw_message(
                f,
                chunks[1],
                config.empty_title,
                config.empty_hint,
                "",
                Color::Gray,
            );
        }
        ViewState::Ready(controller) => draw_table(f, app_state, controller, chunks[1]),
    }

    draw_info_panel(f, app_state, shown, chunks[2]);
    draw_status_bar(f, app_state, chunks[3]);

    match app_state.input_mode {
        InputMode::Help => draw_help_popup(f, app_state, size),
        InputMode::Detail => {
            if let Some(detail) = &app_state.detail {
                draw_detail_popup(f, detail, size);
            }
        }
        _ => {}
    }
}

/// Loading, error and empty screens share one centered layout.
fn draw_message(f: &mut Frame, area: Rect, title: &str, body: &str, hint: &str, color: Color) {
    let block = Block::default().borders(Borders::ALL);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let mut lines = vec![
        Line::from(Span::styled(
            title.to_string(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    if !body.is_empty() {
        lines.push(Line::from(body.to_string()));
    }
    if !hint.is_empty() {
        lines.push(Line::from(Span::styled(
            hint.to_string(),
            Style::default().fg(Color::DarkGray),
        )));
    }

    let top = inner.height.saturating_sub(lines.len() as u16) / 2;
    let text_area = Rect {
        y: inner.y + top,
        height: inner.height.saturating_sub(top),
        ..inner
    };

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, text_area);
}

fn header_label(controller: &TableController, column: &str) -> String {
    let mut label = format!("{column} {}", controller.sort_indicator(column));
    if controller.column_filters().is_active(column) {
        label.push('*');
    }
    label
}

fn draw_table(f: &mut Frame, app_state: &AppState, controller: &TableController, area: Rect) {
    let tab = app_state.tab();
    let width = app_state.column_width;

    let columns = controller.display_columns();
    let visible_columns: Vec<&str> = columns
        .iter()
        .skip(tab.start_col)
        .take(app_state.visible_cols)
        .copied()
        .collect();

    let mut constraints = Vec::with_capacity(visible_columns.len() + 1);
    constraints.push(Constraint::Length(ROW_NUMBER_WIDTH));
    constraints.extend(visible_columns.iter().map(|_| Constraint::Length(width as u16)));

    let (table_block, header_style) = if matches!(app_state.input_mode, InputMode::Normal) {
        (
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::LightCyan)),
            Style::default().bg(Color::DarkGray).fg(Color::Gray),
        )
    } else {
        (
            Block::default().borders(Borders::ALL),
            Style::default().fg(Color::DarkGray),
        )
    };

    let mut header_cells = Vec::with_capacity(visible_columns.len() + 1);
    header_cells.push(Cell::from("").style(header_style));
    for (offset, column) in visible_columns.iter().enumerate() {
        let style = if tab.start_col + offset == tab.selected_col {
            header_style.add_modifier(Modifier::BOLD)
        } else {
            header_style
        };
        let label = truncate_to_width(&header_label(controller, column), width);
        header_cells.push(Cell::from(label).style(style));
    }
    let header = Row::new(header_cells).height(1);

    let view = controller.view();
    let rows = view
        .iter()
        .enumerate()
        .skip(tab.start_row)
        .take(app_state.visible_rows)
        .map(|(index, row)| {
            let mut cells = Vec::with_capacity(visible_columns.len() + 1);
            cells.push(Cell::from((index + 1).to_string()).style(header_style));

            for (offset, column) in visible_columns.iter().enumerate() {
                let content = truncate_to_width(&controller.format_cell(row, column), width);
                let style = if index == tab.selected_row && tab.start_col + offset == tab.selected_col
                {
                    Style::default().bg(Color::White).fg(Color::Black)
                } else if index == tab.selected_row {
                    Style::default().bg(Color::Rgb(40, 40, 40))
                } else {
                    Style::default()
                };
                cells.push(Cell::from(content).style(style));
            }

            Row::new(cells)
        });

    let table = Table::new(std::iter::once(header).chain(rows))
        .block(table_block)
        .widths(&constraints);

    f.render_widget(table, area);
}

// Keywords of the command line in yellow, arguments in cyan.
fn parse_command(input: &str) -> Vec<Span> {
    if input.is_empty() {
        return vec![Span::raw("")];
    }

    let known_commands = [
        "q", "q!", "quit", "help", "reload", "e", "view", "sort", "search", "col", "cols", "all",
        "filter", "values", "pick", "clear", "export", "spec",
    ];
    let special_keywords = ["*", "all"];

    let (cmd, args) = match input.split_once(' ') {
        Some((cmd, args)) => (cmd, Some(args)),
        None => (input, None),
    };

    if !known_commands.contains(&cmd) {
        return vec![Span::raw(input)];
    }

    let mut spans = vec![Span::styled(cmd, Style::default().fg(Color::Yellow))];

    if let Some(args) = args {
        spans.push(Span::raw(" "));
        match args.split_once('=') {
            Some((left, right)) => {
                let value_style = if special_keywords.contains(&right.trim()) {
                    Style::default().fg(Color::Yellow)
                } else {
                    Style::default().fg(Color::LightCyan)
                };
                spans.push(Span::styled(left, Style::default().fg(Color::LightCyan)));
                spans.push(Span::raw("="));
                spans.push(Span::styled(right, value_style));
            }
            None => spans.push(Span::styled(args, Style::default().fg(Color::LightCyan))),
        }
    }

    spans
}

fn filter_lines(controller: &TableController) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    if !controller.search().is_empty() {
        lines.push(Line::from(vec![
            Span::styled("Search: ", Style::default().fg(Color::Yellow)),
            Span::raw(controller.search().to_string()),
        ]));
    }

    for (field, value) in controller.dropdowns().active() {
        lines.push(Line::from(vec![
            Span::styled(format!("{field}: "), Style::default().fg(Color::Yellow)),
            Span::raw(value.to_string()),
        ]));
    }

    for (column, values) in controller.column_filters().active() {
        lines.push(Line::from(vec![
            Span::styled(format!("{column}: "), Style::default().fg(Color::Yellow)),
            Span::raw(values.join(", ")),
        ]));
    }

    lines
}

fn draw_info_panel(f: &mut Frame, app_state: &AppState, shown: Option<usize>, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let config = app_state.tab().config();
    let mut lines = Vec::new();

    if let Some(controller) = app_state.controller() {
        let summary = controller.summary();
        lines.push(Line::from(vec![
            Span::styled("Total Layouts: ", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(
                shown.unwrap_or(summary.filtered_rows).to_string(),
                Style::default()
                    .fg(Color::LightGreen)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(
                    "  of {} rows, {}/{} columns",
                    summary.total_rows, summary.visible_columns, summary.data_columns
                ),
                Style::default().fg(Color::DarkGray),
            ),
        ]));
        lines.extend(filter_lines(controller));

        if let (Some(row), Some(column)) = (app_state.selected_row(), app_state.selected_column()) {
            lines.push(Line::from(vec![
                Span::styled(format!("{column}: "), Style::default().fg(Color::LightCyan)),
                Span::raw(controller.format_cell(row, &column)),
            ]));
        }
    } else if !config.subtitle.is_empty() {
        lines.push(Line::from(config.subtitle));
    }

    let title = format!(" {} ", config.title);
    let summary_paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(title))
        .wrap(Wrap { trim: false });
    f.render_widget(summary_paragraph, chunks[0]);

    let notification_block = Block::default()
        .borders(Borders::ALL)
        .title(" Notifications ");

    let notification_height = notification_block.inner(chunks[1]).height as usize;
    let messages = &app_state.notification_messages;
    let start_idx = messages.len().saturating_sub(notification_height);
    let notifications_text = messages[start_idx..].join("\n");

    let notification_paragraph = Paragraph::new(notifications_text)
        .block(notification_block)
        .wrap(Wrap { trim: false });

    f.render_widget(notification_paragraph, chunks[1]);
}

fn draw_status_bar(f: &mut Frame, app_state: &AppState, area: Rect) {
    match app_state.input_mode {
        InputMode::Normal => {
            let status = "Input :help for operating instructions | hjkl=move [ ]=prev/next-view s=sort x=hide-column /=search Enter=details :=command ";

            let status_widget = Paragraph::new(status).alignment(Alignment::Left);
            f.render_widget(status_widget, area);
        }

        InputMode::Command => {
            let mut spans = vec![Span::raw(":")];
            spans.extend(parse_command(&app_state.input_buffer));

            let status_widget = Paragraph::new(Line::from(spans)).alignment(Alignment::Left);
            f.render_widget(status_widget, area);
        }

        InputMode::Search => {
            let chunks = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Length(1), Constraint::Min(1)])
                .split(area);

            f.render_widget(Paragraph::new("/"), chunks[0]);

            let mut text_area = app_state.text_area.clone();
            text_area.set_cursor_line_style(Style::default());
            text_area.set_cursor_style(Style::default().add_modifier(Modifier::REVERSED));

            f.render_widget(text_area.widget(), chunks[1]);
        }

        InputMode::Detail => {
            let status_widget = Paragraph::new("Esc/Enter/q to close | :spec [file.xlsx] to save")
                .style(Style::default().fg(Color::DarkGray));
            f.render_widget(status_widget, area);
        }

        InputMode::Help => {}
    }
}

/// A rectangle of `width` x `height` centered in `area`, clipped to it.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

fn draw_help_popup(f: &mut Frame, app_state: &mut AppState, area: Rect) {
    f.render_widget(Clear, area);

    let line_count = app_state.help_text.lines().count();
    let max_line_width = app_state
        .help_text
        .lines()
        .map(display_width)
        .max()
        .unwrap_or(40) as u16;

    let popup_area = centered(
        area,
        (max_line_width + 4).min(area.width.saturating_sub(4)),
        (line_count as u16 + 2).min(area.height.saturating_sub(4)),
    );

    let visible_lines = popup_area.height.saturating_sub(2) as usize;
    app_state.help_visible_lines = visible_lines;

    let max_scroll = line_count.saturating_sub(visible_lines);
    app_state.help_scroll = app_state.help_scroll.min(max_scroll);

    let mut title = " [ESC/Enter to close] ".to_string();
    if max_scroll > 0 {
        let scroll_indicator = if app_state.help_scroll == 0 {
            " [↓ or j to scroll] "
        } else if app_state.help_scroll >= max_scroll {
            " [↑ or k to scroll] "
        } else {
            " [↑↓ or j/k to scroll] "
        };
        title.push_str(scroll_indicator);
    }

    let help_block = Block::default()
        .title(title)
        .title_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::LightCyan))
        .style(Style::default().bg(Color::Blue).fg(Color::White));

    let help_paragraph = Paragraph::new(app_state.help_text.clone())
        .block(help_block)
        .wrap(Wrap { trim: false })
        .scroll((app_state.help_scroll as u16, 0));

    f.render_widget(help_paragraph, popup_area);
}

/// Scales a pixel size into terminal cells, which are about twice as tall as wide.
fn preview_cells(width: f64, height: f64, area: Rect) -> (u16, u16) {
    // A bordered box needs at least two cells each way.
    if width <= 0.0 || height <= 0.0 || area.width < 2 || area.height < 2 {
        return (0, 0);
    }
    let scale = (area.width as f64 / (width * 2.0)).min(area.height as f64 / height);
    let cols = ((width * 2.0 * scale).round() as u16).clamp(2, area.width);
    let rows = ((height * scale).round() as u16).clamp(2, area.height);
    (cols, rows)
}

fn draw_detail_popup(f: &mut Frame, detail: &LayoutDetail, area: Rect) {
    let popup_area = centered(
        area,
        area.width.saturating_sub(8),
        area.height.saturating_sub(4),
    );
    f.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(format!(" {} ", detail.name()))
        .title_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::LightCyan));
    let inner = block.inner(popup_area);
    f.render_widget(block, popup_area);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(inner);

    let label_width = detail
        .specifications
        .iter()
        .map(|spec| display_width(&spec.label))
        .max()
        .unwrap_or(0);
    let lines: Vec<Line> = detail
        .specifications
        .iter()
        .map(|spec| {
            Line::from(vec![
                Span::styled(
                    format!("{:<label_width$}  ", spec.label),
                    Style::default().fg(Color::LightGreen),
                ),
                Span::raw(spec.value.clone()),
            ])
        })
        .collect();
    let table = Paragraph::new(lines)
        .block(Block::default().borders(Borders::RIGHT).title(" Specifications "))
        .wrap(Wrap { trim: false });
    f.render_widget(table, chunks[0]);

    let preview = detail.preview;
    let preview_area = Rect {
        x: chunks[1].x + 1,
        y: chunks[1].y + 1,
        width: chunks[1].width.saturating_sub(2),
        height: chunks[1].height.saturating_sub(2),
    };
    let (cols, rows) = preview_cells(preview.width, preview.height, preview_area);
    if cols > 0 && rows > 0 {
        let label = format!("{}x{}", preview.width.round(), preview.height.round());
        let screen = Paragraph::new(label)
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::LightGreen)),
            );
        f.render_widget(screen, centered(preview_area, cols, rows));
    }
}

fn draw_title_with_tabs(f: &mut Frame, app_state: &AppState, area: Rect) {
    let title_content = " DDF Dashboard ";
    let title_width = display_width(title_content) as u16;

    let horizontal_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(title_width), Constraint::Min(0)])
        .split(area);

    let title_widget = Paragraph::new(title_content)
        .style(Style::default().bg(Color::DarkGray).fg(Color::White));
    f.render_widget(title_widget, horizontal_layout[0]);

    let mut spans = Vec::with_capacity(app_state.tabs.len() * 2);
    for (index, tab) in app_state.tabs.iter().enumerate() {
        let name = format!(" {} ", tab.config().title);
        let style = if index == app_state.current_tab {
            Style::default()
                .bg(Color::DarkGray)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else if matches!(tab.state, ViewState::Failed(_)) {
            Style::default().fg(Color::LightRed)
        } else {
            Style::default()
        };
        spans.push(Span::styled(name, style));
        spans.push(Span::raw(" "));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), horizontal_layout[1]);
}
