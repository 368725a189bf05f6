use crate::models::GoalDetailsPayload;

/// Currently displayed search: criteria and results change together,
/// never one without the other. The constructors are the only way to
/// build a state, which keeps the pairing intact.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchState {
    criteria: String,
    results: Option<GoalDetailsPayload>,
}

impl SearchState {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn loaded(criteria: impl Into<String>, payload: GoalDetailsPayload) -> Self {
        Self {
            criteria: criteria.into(),
            results: Some(payload),
        }
    }

    pub fn criteria(&self) -> &str {
        &self.criteria
    }

    pub fn results(&self) -> Option<&GoalDetailsPayload> {
        self.results.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }
}

type ChangeListener = Box<dyn FnMut(&SearchState)>;

/// Minimal observable state container: one owned state, replaced
/// atomically, listeners notified synchronously in registration order.
#[derive(Default)]
pub struct SearchStore {
    state: SearchState,
    listeners: Vec<ChangeListener>,
}

impl SearchStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn set_state(&mut self, next: SearchState) {
        self.state = next;
        for listener in self.listeners.iter_mut() {
            listener(&self.state);
        }
    }

    pub fn add_change_listener(&mut self, listener: impl FnMut(&SearchState) + 'static) {
        self.listeners.push(Box::new(listener));
    }
}
