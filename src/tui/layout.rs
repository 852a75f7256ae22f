use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::config::ColorConfig;
use crate::domain::{plain_text, Category, CommentNode, Item};
use crate::thread::{Thread, ThreadComments, ThreadView};
use crate::tui::app::{TuiApp, View};

pub fn render(frame: &mut Frame, app: &mut TuiApp, colors: &ColorConfig) {
    let banner_height = u16::from(matches!(app.view, View::Feed) && app.fresh_available);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),             // category tabs
            Constraint::Min(5),                // feed list / thread
            Constraint::Length(banner_height), // live banner, when raised
            Constraint::Length(1),             // status bar
        ])
        .split(frame.area());

    render_tabs(frame, app, chunks[0], colors);
    match &app.view {
        View::Feed => render_feed(frame, app, chunks[1], colors),
        View::Thread(view) => render_thread(frame, view, app.thread_scroll, chunks[1], colors),
    }
    if banner_height > 0 {
        render_banner(frame, chunks[2], colors);
    }
    render_status_bar(frame, app, chunks[3], colors);
}

fn render_tabs(frame: &mut Frame, app: &TuiApp, area: Rect, colors: &ColorConfig) {
    let mut spans = vec![Span::raw(" ")];
    for category in Category::ALL {
        let style = if category == app.category {
            Style::default()
                .fg(colors.tab_active.0)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(colors.tab_inactive.0)
        };
        spans.push(Span::styled(format!(" {} ", category.label()), style));
        spans.push(Span::raw(" "));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_feed(frame: &mut Frame, app: &mut TuiApp, area: Rect, colors: &ColorConfig) {
    let rows: Vec<ListItem> = app.items.iter().map(|item| feed_row(item, colors)).collect();

    let title = if app.items.is_empty() {
        format!(" {} (empty) ", app.category.label())
    } else {
        let more = if app.has_more { ", n: load more" } else { "" };
        format!(" {} ({}{}) ", app.category.label(), app.items.len(), more)
    };

    let list = List::new(rows)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(colors.border.0)),
        )
        .highlight_style(
            Style::default()
                .bg(colors.selection_bg.0)
                .fg(colors.selection_fg.0)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, area, &mut app.list_state);
}

fn feed_row<'a>(item: &'a Item, colors: &ColorConfig) -> ListItem<'a> {
    let mut spans = vec![Span::styled(
        item.display_title().to_string(),
        Style::default().fg(colors.title.0),
    )];
    if let Some(host) = item.host() {
        spans.push(Span::styled(
            format!(" ({host})"),
            Style::default().fg(colors.host.0),
        ));
    }
    let comments = item.descendants.unwrap_or(0);
    spans.push(Span::styled(
        format!(
            "  {} pts by {} | {} comments",
            item.score.unwrap_or(0),
            item.display_author(),
            comments
        ),
        Style::default().fg(colors.metadata.0),
    ));
    ListItem::new(Line::from(spans))
}

fn render_thread(
    frame: &mut Frame,
    view: &ThreadView,
    scroll: u16,
    area: Rect,
    colors: &ColorConfig,
) {
    let (title, body) = match view {
        ThreadView::NotFound(id) => (
            " Not found ".to_string(),
            Text::from(format!("Item {id} not found.")),
        ),
        ThreadView::Loaded(thread) => (
            format!(" {} ", thread.root.display_title()),
            thread_text(thread, colors),
        ),
    };

    let paragraph = Paragraph::new(body)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(colors.border.0)),
        )
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));

    frame.render_widget(paragraph, area);
}

fn thread_text<'a>(thread: &'a Thread, colors: &ColorConfig) -> Text<'a> {
    let mut lines = Vec::new();
    let root = &thread.root;

    lines.push(Line::from(Span::styled(
        root.display_title(),
        Style::default()
            .fg(colors.title.0)
            .add_modifier(Modifier::BOLD),
    )));
    let when = root
        .time_utc()
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default();
    lines.push(Line::from(Span::styled(
        format!("by {} | {}", root.display_author(), when),
        Style::default().fg(colors.metadata.0),
    )));
    lines.push(Line::from(Span::styled(
        root.link(),
        Style::default().fg(colors.host.0),
    )));

    if let Some(text) = &root.text {
        lines.push(Line::from(""));
        for line in plain_text(text).lines() {
            lines.push(Line::from(line.to_string()));
        }
    }

    if !thread.poll_options.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Poll:",
            Style::default().add_modifier(Modifier::BOLD),
        )));
        for option in &thread.poll_options {
            lines.push(Line::from(format!(
                "  {} - {} votes",
                option.display_text(),
                option.vote_count()
            )));
        }
    }

    lines.push(Line::from(""));
    match &thread.comments {
        ThreadComments::Empty => lines.push(Line::from("No comments.")),
        ThreadComments::Loaded(nodes) => {
            for node in nodes {
                push_comment(&mut lines, node, colors);
            }
        }
    }

    Text::from(lines)
}

fn push_comment(lines: &mut Vec<Line<'_>>, node: &CommentNode, colors: &ColorConfig) {
    let indent = "  ".repeat(node.depth);
    lines.push(Line::from(Span::styled(
        format!("{}{}:", indent, node.display_author()),
        Style::default()
            .fg(colors.comment_author.0)
            .add_modifier(Modifier::BOLD),
    )));
    if let Some(text) = &node.text {
        for line in plain_text(text).lines() {
            lines.push(Line::from(format!("{indent}{line}")));
        }
    }
    lines.push(Line::from(""));
}

fn render_banner(frame: &mut Frame, area: Rect, colors: &ColorConfig) {
    let banner = Paragraph::new(" New content available - press r to refresh ").style(
        Style::default()
            .fg(colors.banner_fg.0)
            .bg(colors.banner_bg.0)
            .add_modifier(Modifier::BOLD),
    );
    frame.render_widget(banner, area);
}

fn render_status_bar(frame: &mut Frame, app: &TuiApp, area: Rect, colors: &ColorConfig) {
    let status = if app.is_loading {
        "Loading...".to_string()
    } else if let Some(ref msg) = app.status_message {
        msg.clone()
    } else {
        match app.view {
            View::Feed => {
                "j/k:Nav  Enter:Open  Tab:Category  n:More  r:Refresh  o:Browser  q:Quit"
                    .to_string()
            }
            View::Thread(_) => "j/k:Scroll  Esc:Back  o:Browser  q:Quit".to_string(),
        }
    };

    let paragraph = Paragraph::new(status).style(
        Style::default()
            .fg(colors.status_fg.0)
            .bg(colors.status_bg.0),
    );
    frame.render_widget(paragraph, area);
}
