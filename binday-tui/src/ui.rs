use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};

use crate::app::{App, INTENTS, Screen};

pub(crate) fn draw(frame: &mut Frame<'_>, app: &App) {
    let area = frame.area();

    // Outer layout: title, main content, status line
    let layout_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(area);

    let chunks = layout_chunks.as_ref();
    let [header_area, content_area, status_area] = chunks else {
        return;
    };

    let header = Paragraph::new(format!(
        "binday – bin collections for {} · {}",
        app.council_name(),
        app.reference_date.format("%A %d %B %Y")
    ))
    .block(Block::default().borders(Borders::ALL).title("Binday"));
    frame.render_widget(header, *header_area);

    match app.screen {
        Screen::IntentSelect => draw_intent_select(frame, app, *content_area),
        Screen::BinTypeInput => draw_bin_type_input(frame, app, *content_area),
        Screen::AnswerView => draw_answer_view(frame, app, *content_area),
    }

    let nav_hint = match app.screen {
        Screen::IntentSelect => "↑/↓ move · Enter/Space ask · q/Ctrl-C quit",
        Screen::BinTypeInput => "Type a bin · Tab suggest · Enter ask · Left/Esc back · Ctrl-C quit",
        Screen::AnswerView => "Esc/←/b back to questions · q/Ctrl-C quit",
    };

    let status_text = if app.is_loading {
        format!("Loading… · {nav_hint}")
    } else if let Some(msg) = &app.error_message {
        format!("{msg} · {nav_hint}")
    } else {
        nav_hint.to_owned()
    };

    let status_style = if app.error_message.is_some() {
        Style::default().fg(Color::Red)
    } else if app.is_loading {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };

    let status = Paragraph::new(status_text)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(status_style)
        .wrap(Wrap { trim: true });

    frame.render_widget(status, *status_area);
}

fn draw_intent_select(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let items = INTENTS
        .iter()
        .enumerate()
        .map(|(idx, (_name, label))| {
            let prefix = if idx == app.intent_list_index {
                "> "
            } else {
                "  "
            };
            ListItem::new(format!("{prefix}{label}"))
        })
        .collect::<Vec<ListItem<'_>>>();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Ask a question (↑/↓, Enter)"),
        )
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );

    let mut state = ListState::default();
    state.select(Some(app.intent_list_index));
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_bin_type_input(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let layout_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // input
            Constraint::Min(0),    // known categories
        ])
        .split(area);

    let chunks = layout_chunks.as_ref();
    let [input_area, categories_area] = chunks else {
        return;
    };

    let input = Paragraph::new(app.bin_type_input.as_str())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Which bin? (e.g. glass, food, blue bin; Enter)"),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(input, *input_area);

    let items = app
        .categories
        .iter()
        .map(|category| {
            let style = if category.as_str() == app.bin_type_input {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default()
            };
            ListItem::new(category.as_str()).style(style)
        })
        .collect::<Vec<ListItem<'_>>>();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Known bins (Tab to fill in)"),
    );
    frame.render_widget(list, *categories_area);
}

fn draw_answer_view(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let title = "Answer (Esc/←/b to go back)";

    if app.is_loading {
        let paragraph = Paragraph::new("Checking the schedule…")
            .block(Block::default().borders(Borders::ALL).title(title))
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
        return;
    }

    let Some(reply) = &app.reply else {
        let paragraph = Paragraph::new("No answer yet.")
            .block(Block::default().borders(Borders::ALL).title(title))
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
        return;
    };

    let mut lines = vec![Line::from(Span::styled(
        reply.text.clone(),
        Style::default().add_modifier(Modifier::BOLD),
    ))];
    if let Some(request) = &reply.permission_request {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            format!("Permission needed: {}", request.scope),
            Style::default().fg(Color::Yellow),
        )));
    }

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(title))
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}
