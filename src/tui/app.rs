use ratatui::widgets::ListState;

use crate::domain::{Category, Item};
use crate::feed::FeedPage;
use crate::thread::ThreadView;

/// Which screen is showing. The thread view owns its resolved tree and is
/// discarded wholesale on `Back`.
pub enum View {
    Feed,
    Thread(ThreadView),
}

/// Render state for the TUI. The feed session itself lives in the run
/// loop; this struct only holds what the layout needs to paint.
pub struct TuiApp {
    pub view: View,
    pub category: Category,
    /// Accumulated renderable rows, append-only per page.
    pub items: Vec<Item>,
    pub selected: usize,
    pub list_state: ListState,
    pub has_more: bool,
    pub fresh_available: bool,
    pub thread_scroll: u16,
    pub is_loading: bool,
    pub status_message: Option<String>,
    pub should_quit: bool,
}

impl TuiApp {
    pub fn new(category: Category) -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self {
            view: View::Feed,
            category,
            items: Vec::new(),
            selected: 0,
            list_state,
            has_more: false,
            fresh_available: false,
            thread_scroll: 0,
            is_loading: false,
            status_message: None,
            should_quit: false,
        }
    }

    pub fn selected_item(&self) -> Option<&Item> {
        self.items.get(self.selected)
    }

    /// Wipe feed state for a fresh session (category switch or refresh).
    pub fn reset_feed(&mut self, category: Category) {
        self.category = category;
        self.items.clear();
        self.selected = 0;
        self.list_state.select(Some(0));
        self.has_more = false;
        self.fresh_available = false;
        self.view = View::Feed;
        self.status_message = None;
    }

    pub fn append_page(&mut self, page: FeedPage) {
        self.items.extend(page.items);
        self.has_more = page.has_more;
        if self.selected >= self.items.len() && !self.items.is_empty() {
            self.selected = self.items.len() - 1;
        }
        self.list_state.select(Some(self.selected));
    }

    pub fn open_thread(&mut self, thread: ThreadView) {
        self.thread_scroll = 0;
        self.view = View::Thread(thread);
    }

    pub fn close_thread(&mut self) {
        self.view = View::Feed;
    }

    pub fn move_up(&mut self) {
        match self.view {
            View::Feed => {
                if self.selected > 0 {
                    self.selected -= 1;
                    self.list_state.select(Some(self.selected));
                }
            }
            View::Thread(_) => {
                self.thread_scroll = self.thread_scroll.saturating_sub(1);
            }
        }
    }

    pub fn move_down(&mut self) {
        match self.view {
            View::Feed => {
                if !self.items.is_empty() && self.selected < self.items.len() - 1 {
                    self.selected += 1;
                    self.list_state.select(Some(self.selected));
                }
            }
            View::Thread(_) => {
                self.thread_scroll = self.thread_scroll.saturating_add(1);
            }
        }
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }
}
