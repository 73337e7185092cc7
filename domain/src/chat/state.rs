//! Chat state entity

use super::message::Message;
use std::collections::VecDeque;

/// Pending messages plus request bookkeeping (Entity)
///
/// `current()` is always the head of the queue; there is no separate field
/// that could drift from it.
#[derive(Debug, Clone)]
pub struct ChatState {
    messages: VecDeque<Message>,
    in_flight: usize,
    camera_zoomed: bool,
}

impl ChatState {
    pub fn new() -> Self {
        Self {
            messages: VecDeque::new(),
            in_flight: 0,
            camera_zoomed: true,
        }
    }

    /// The oldest pending message
    pub fn current(&self) -> Option<&Message> {
        self.messages.front()
    }

    pub fn messages(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter()
    }

    pub fn to_vec(&self) -> Vec<Message> {
        self.messages.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Append a batch to the tail, keeping its order
    pub fn append(&mut self, batch: impl IntoIterator<Item = Message>) -> usize {
        let before = self.messages.len();
        self.messages.extend(batch);
        self.messages.len() - before
    }

    /// Remove and return the head; `None` when empty
    pub fn consume_one(&mut self) -> Option<Message> {
        self.messages.pop_front()
    }

    pub fn begin_request(&mut self) {
        self.in_flight += 1;
    }

    pub fn finish_request(&mut self) {
        self.in_flight = self.in_flight.saturating_sub(1);
    }

    /// True while at least one request is outstanding
    pub fn is_loading(&self) -> bool {
        self.in_flight > 0
    }

    pub fn camera_zoomed(&self) -> bool {
        self.camera_zoomed
    }

    pub fn set_camera_zoomed(&mut self, zoomed: bool) {
        self.camera_zoomed = zoomed;
    }
}

impl Default for ChatState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state() {
        let state = ChatState::new();
        assert!(state.is_empty());
        assert!(state.current().is_none());
        assert!(!state.is_loading());
        assert!(state.camera_zoomed());
    }

    #[test]
    fn test_current_tracks_head() {
        let mut state = ChatState::new();
        state.append([Message::text("a"), Message::text("b")]);
        assert_eq!(state.current().unwrap().text, "a");

        state.consume_one();
        assert_eq!(state.current().unwrap().text, "b");

        state.consume_one();
        assert!(state.current().is_none());
    }

    #[test]
    fn test_consume_one_on_empty_is_noop() {
        let mut state = ChatState::new();
        assert!(state.consume_one().is_none());
        assert!(state.is_empty());
    }

    #[test]
    fn test_append_preserves_existing_and_order() {
        let mut state = ChatState::new();
        state.append([Message::text("a")]);
        let added = state.append([Message::text("b"), Message::text("c")]);
        assert_eq!(added, 2);
        let texts: Vec<_> = state.messages().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_loading_counts_outstanding_requests() {
        let mut state = ChatState::new();
        state.begin_request();
        state.begin_request();
        state.finish_request();
        assert!(state.is_loading());
        state.finish_request();
        assert!(!state.is_loading());
        // Extra finishes never underflow
        state.finish_request();
        assert!(!state.is_loading());
    }

    #[test]
    fn test_camera_zoom_toggle() {
        let mut state = ChatState::new();
        state.set_camera_zoomed(false);
        assert!(!state.camera_zoomed());
    }
}
