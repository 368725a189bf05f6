use std::cell::RefCell;
use std::rc::Rc;

use crate::client::{GoalService, ServiceError};
use crate::html;
use crate::render::{RenderPort, SectionToggle};
use crate::store::{SearchState, SearchStore};
use crate::view;

/// Orchestrates the detail page: fetches a goal through the service,
/// holds the search state, and re-renders through the page port on
/// every state change. The store is owned here, not a page-wide
/// singleton, and the page is only reachable through `RenderPort`.
pub struct GoalDetailsController<S, R> {
    service: S,
    store: SearchStore,
    page: Rc<RefCell<R>>,
    panel: SectionToggle,
}

impl<S: GoalService, R: RenderPort + 'static> GoalDetailsController<S, R> {
    pub fn new(service: S, page: Rc<RefCell<R>>) -> Self {
        let mut store = SearchStore::new();
        let render_page = Rc::clone(&page);
        store.add_change_listener(move |state| {
            render_state(state, &mut *render_page.borrow_mut());
        });
        Self {
            service,
            store,
            page,
            panel: SectionToggle::default(),
        }
    }

    /// Query-parameter entry point: one-shot, always fetches.
    pub async fn mount(&mut self, goal_name: Option<&str>) -> Result<(), ServiceError> {
        self.load_goal(goal_name).await
    }

    /// Form-submission entry point: resubmitting the value already on
    /// display is a no-op, nothing is fetched.
    pub async fn submit(&mut self, criteria: &str) -> Result<(), ServiceError> {
        if criteria == self.store.state().criteria() {
            return Ok(());
        }
        self.load_goal(Some(criteria)).await
    }

    /// One state transition per successful call: either a loaded state
    /// with criteria and results set together, or the canonical empty
    /// state. A failed fetch leaves the state untouched.
    pub async fn load_goal(&mut self, goal_name: Option<&str>) -> Result<(), ServiceError> {
        match goal_name {
            Some(name) if !name.is_empty() => {
                let payload = self.service.get_goal_details(name).await?;
                self.store.set_state(SearchState::loaded(name, payload));
            }
            _ => self.store.set_state(SearchState::empty()),
        }
        Ok(())
    }

    pub fn toggle_panel(&mut self) {
        self.panel.toggle();
        self.page.borrow_mut().set_panel_visible(self.panel.is_visible());
    }

    pub fn state(&self) -> &SearchState {
        self.store.state()
    }
}

/// Change listener body: derive the three groupings and push their
/// markup through the port, or clear every region for the empty state.
/// Panel visibility is deliberately left alone.
fn render_state<R: RenderPort>(state: &SearchState, page: &mut R) {
    match state.results() {
        None => {
            page.write_summary("");
            page.write_daily_table("");
            page.write_entries_table("");
        }
        Some(payload) => {
            page.write_summary(&html::summary_fragment(&view::build_summary(payload)));
            page.write_daily_table(&html::daily_table_fragment(&view::build_daily_rows(payload)));
            page.write_entries_table(&html::entries_table_fragment(&view::build_all_entries_rows(
                payload,
            )));
        }
    }
}
