pub mod app;
pub mod event;
pub mod layout;

use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::app::{AppContext, Result};
use crate::domain::Category;
use crate::feed::FeedSession;
use crate::thread;
use crate::tui::app::{TuiApp, View};
use crate::tui::event::{Action, AppEvent, EventHandler};

type Tui = Terminal<CrosstermBackend<Stdout>>;

pub async fn run(ctx: Arc<AppContext>) -> Result<()> {
    let mut terminal = setup_terminal()?;
    let result = run_app(&mut terminal, ctx).await;
    restore_terminal(&mut terminal)?;
    result
}

fn setup_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

async fn run_app(terminal: &mut Tui, ctx: Arc<AppContext>) -> Result<()> {
    let mut app = TuiApp::new(Category::Top);
    let event_handler = EventHandler::new(Duration::from_millis(200));

    let mut session = open_session(terminal, &mut app, &ctx, Category::Top).await?;

    loop {
        terminal.draw(|frame| layout::render(frame, &mut app, &ctx.config.colors))?;

        match event_handler.next()? {
            AppEvent::Key(key) => match ctx.config.keybindings.get_action(&key) {
                Action::Quit => app.should_quit = true,
                Action::MoveUp => app.move_up(),
                Action::MoveDown => app.move_down(),
                Action::Select => {
                    if matches!(app.view, View::Feed) {
                        if let Some(id) = app.selected_item().map(|item| item.id) {
                            show_loading(terminal, &mut app, &ctx)?;
                            let view = thread::open_thread(&ctx.source, &ctx.resolver, id).await;
                            app.is_loading = false;
                            app.open_thread(view);
                        }
                    }
                }
                Action::Back => app.close_thread(),
                Action::NextCategory => {
                    let next = app.category.next();
                    session = open_session(terminal, &mut app, &ctx, next).await?;
                }
                Action::PrevCategory => {
                    let prev = app.category.prev();
                    session = open_session(terminal, &mut app, &ctx, prev).await?;
                }
                Action::LoadMore => {
                    if matches!(app.view, View::Feed) && session.has_more() {
                        show_loading(terminal, &mut app, &ctx)?;
                        let page = session.next_page(&ctx.resolver, ctx.page_size()).await;
                        app.is_loading = false;
                        app.append_page(page);
                    }
                }
                Action::Refresh => {
                    // Replacing the session resets the live baseline and
                    // clears the banner.
                    let current = app.category;
                    session = open_session(terminal, &mut app, &ctx, current).await?;
                }
                Action::OpenInBrowser => {
                    let link = match &app.view {
                        View::Feed => app.selected_item().map(|item| item.link()),
                        View::Thread(thread::ThreadView::Loaded(t)) => Some(t.root.link()),
                        View::Thread(thread::ThreadView::NotFound(_)) => None,
                    };
                    if let Some(link) = link {
                        if let Err(err) = open::that(&link) {
                            app.set_status(format!("Failed to open browser: {err}"));
                        }
                    }
                }
                Action::None => {}
            },
            AppEvent::Tick => {
                if session.fresh_available() {
                    app.fresh_available = true;
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Build a fresh session for `category` and load its first page. The old
/// session (and its live-poll task) is dropped by assignment at the call
/// sites.
async fn open_session(
    terminal: &mut Tui,
    app: &mut TuiApp,
    ctx: &Arc<AppContext>,
    category: Category,
) -> Result<FeedSession> {
    app.reset_feed(category);
    show_loading(terminal, app, ctx)?;

    let mut session = FeedSession::open(&ctx.source, category, ctx.poll_interval()).await;
    let page = session.next_page(&ctx.resolver, ctx.page_size()).await;
    app.is_loading = false;
    app.append_page(page);
    if app.items.is_empty() {
        app.set_status(format!("No items in {}.", category.label()));
    }
    Ok(session)
}

/// Repaint once with the loading indicator up before a blocking await.
fn show_loading(terminal: &mut Tui, app: &mut TuiApp, ctx: &Arc<AppContext>) -> Result<()> {
    app.is_loading = true;
    terminal.draw(|frame| layout::render(frame, app, &ctx.config.colors))?;
    Ok(())
}
