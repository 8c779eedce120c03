use std::{cell::Cell, rc::Rc};

use gtk::prelude::*;
use notification_bus::{CloseReason, Signal};

use crate::action::ActionIndex;

/// An event the bar reacts to. Button clicks, the window manager, the action listener and the timeout all
/// feed into the same channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarEvent {
    ActionSelected(ActionIndex),
    Dismissed,
    TimedOut,
    Shutdown,
}

/// How a bar ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarOutcome {
    ActionInvoked(ActionIndex),
    Closed(CloseReason),
}

impl BarOutcome {
    /// The signals a notification daemon would emit for this outcome.
    pub fn signals(&self, id: u32) -> Vec<Signal> {
        match self {
            BarOutcome::ActionInvoked(action) => vec![
                Signal::ActionInvoked { id, action_key: action.action_key() },
                Signal::NotificationClosed { id, reason: CloseReason::Dismissed },
            ],
            BarOutcome::Closed(reason) => vec![Signal::NotificationClosed { id, reason: *reason }],
        }
    }
}

impl std::fmt::Display for BarOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BarOutcome::ActionInvoked(action) => write!(f, "action {} invoked", action),
            BarOutcome::Closed(reason) => write!(f, "closed ({})", reason),
        }
    }
}

/// Something that can take the bar off the screen.
pub trait BarHandle {
    fn close(&self);
}

impl BarHandle for gtk::Window {
    fn close(&self) {
        self.hide();
        gtk::main_quit();
    }
}

pub struct App<H: BarHandle> {
    pub bar: H,
    pub button_count: usize,
    /// Set by the first event that closes the bar, read once the main loop is done.
    pub outcome: Rc<Cell<Option<BarOutcome>>>,
}

impl<H: BarHandle> App<H> {
    pub fn handle_event(&mut self, event: BarEvent) {
        log::debug!("Handling event: {:?}", &event);
        if let Some(outcome) = self.outcome.get() {
            log::debug!("bar already {}, ignoring {:?}", outcome, event);
            return;
        }

        let outcome = match event {
            BarEvent::ActionSelected(action) if action.as_usize() < self.button_count => BarOutcome::ActionInvoked(action),
            BarEvent::ActionSelected(action) => {
                log::warn!("Ignoring action {}, the bar only has {} button(s)", action, self.button_count);
                return;
            }
            BarEvent::Dismissed => BarOutcome::Closed(CloseReason::Dismissed),
            BarEvent::TimedOut => BarOutcome::Closed(CloseReason::Expired),
            BarEvent::Shutdown => BarOutcome::Closed(CloseReason::Undefined),
        };

        log::info!("Bar {}", outcome);
        self.outcome.set(Some(outcome));
        self.bar.close();
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[derive(Default)]
    struct FakeBar {
        closed: Cell<usize>,
    }

    impl BarHandle for Rc<FakeBar> {
        fn close(&self) {
            self.closed.set(self.closed.get() + 1);
        }
    }

    fn app(button_count: usize) -> (App<Rc<FakeBar>>, Rc<FakeBar>) {
        let bar = Rc::new(FakeBar::default());
        (App { bar: bar.clone(), button_count, outcome: Rc::new(Cell::new(None)) }, bar)
    }

    #[test]
    fn test_action_closes_bar() {
        let (mut app, bar) = app(2);
        app.handle_event(BarEvent::ActionSelected(ActionIndex(1)));
        assert_eq!(Some(BarOutcome::ActionInvoked(ActionIndex(1))), app.outcome.get());
        assert_eq!(1, bar.closed.get());
    }

    #[test]
    fn test_out_of_range_action_is_ignored() {
        let (mut app, bar) = app(1);
        app.handle_event(BarEvent::ActionSelected(ActionIndex(1)));
        assert_eq!(None, app.outcome.get());
        assert_eq!(0, bar.closed.get());

        app.handle_event(BarEvent::TimedOut);
        assert_eq!(Some(BarOutcome::Closed(CloseReason::Expired)), app.outcome.get());
    }

    #[test]
    fn test_only_first_closing_event_counts() {
        let (mut app, bar) = app(1);
        app.handle_event(BarEvent::Dismissed);
        app.handle_event(BarEvent::ActionSelected(ActionIndex(0)));
        app.handle_event(BarEvent::Shutdown);
        assert_eq!(Some(BarOutcome::Closed(CloseReason::Dismissed)), app.outcome.get());
        assert_eq!(1, bar.closed.get());
    }

    #[test]
    fn test_shutdown_closes_as_undefined() {
        let (mut app, bar) = app(2);
        app.handle_event(BarEvent::Shutdown);
        app.handle_event(BarEvent::TimedOut);
        assert_eq!(Some(BarOutcome::Closed(CloseReason::Undefined)), app.outcome.get());
        assert_eq!(1, bar.closed.get());
    }

    #[test]
    fn test_outcome_signals() {
        assert_eq!(
            vec![
                Signal::ActionInvoked { id: 4, action_key: "0".to_string() },
                Signal::NotificationClosed { id: 4, reason: CloseReason::Dismissed },
            ],
            BarOutcome::ActionInvoked(ActionIndex(0)).signals(4)
        );
        assert_eq!(
            vec![Signal::NotificationClosed { id: 4, reason: CloseReason::Expired }],
            BarOutcome::Closed(CloseReason::Expired).signals(4)
        );
        assert_eq!(
            vec![Signal::NotificationClosed { id: 0, reason: CloseReason::Undefined }],
            BarOutcome::Closed(CloseReason::Undefined).signals(0)
        );
    }
}
