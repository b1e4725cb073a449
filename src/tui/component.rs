use ratatui::Frame;
use ratatui::layout::Rect;

/// A reusable UI component.
///
/// Components receive data via props (struct fields), may borrow
/// persistent state from `TuiState`, and render into a `Rect`.
///
/// `render` takes `&mut self` so stateful wrappers can update their state
/// during the render pass (list scroll offsets, picker rebuilds).
pub trait Component {
    fn render(&mut self, frame: &mut Frame, area: Rect);
}

/// A component that handles terminal events on its own.
///
/// Components that need core data to interpret a key (the browser and quiz
/// views read the `Navigator`) take it as an extra argument instead.
pub trait EventHandler {
    /// The type of high-level event this component emits.
    type Event;

    /// Handle a low-level `TuiEvent` and optionally return a high-level event.
    fn handle_event(&mut self, event: &super::event::TuiEvent) -> Option<Self::Event>;
}
