use gtk::prelude::*;
use tokio::sync::mpsc::UnboundedSender;

use crate::{action::ActionIndex, app::BarEvent, display_backend, geometry::Rect};

/// Label of the only button of a bar that didn't get any.
pub const DEFAULT_BUTTON_LABEL: &str = "_OK";

/// The labels shown on the bar, in action order.
pub fn button_labels(requested: &[String]) -> Vec<String> {
    if requested.is_empty() {
        vec![DEFAULT_BUTTON_LABEL.to_string()]
    } else {
        requested.to_vec()
    }
}

/// Build the bar window with its message and buttons. Every interaction is sent to `evt_send`.
pub fn build_bar(message: &str, buttons: &[String], evt_send: UnboundedSender<BarEvent>) -> gtk::Window {
    let window = display_backend::initialize_window();

    {
        let evt_send = evt_send.clone();
        window.connect_delete_event(move |_, _| {
            crate::print_result_err!("while sending dismiss event", evt_send.send(BarEvent::Dismissed));
            glib::Propagation::Stop
        });
    }

    let hbox = gtk::Box::new(gtk::Orientation::Horizontal, 10);
    hbox.set_homogeneous(false);

    let label = gtk::Label::new(Some(message));
    hbox.pack_start(&label, false, true, 0);

    // pack_end stacks from the right edge, so go backwards to keep the buttons in order
    for (index, button_label) in buttons.iter().enumerate().rev() {
        let button = gtk::Button::with_mnemonic(button_label);
        let evt_send = evt_send.clone();
        let action = ActionIndex(index as u32);
        button.connect_clicked(move |_| {
            log::debug!("button {} clicked", action);
            crate::print_result_err!("while sending button event", evt_send.send(BarEvent::ActionSelected(action)));
        });
        hbox.pack_end(&button, false, false, 0);
    }

    window.add(&hbox);
    window
}

/// Move the window into place. Geometry is only a request, the window manager has the last word.
pub fn place_bar(window: &gtk::Window, rect: Rect) {
    log::info!("bar: start={} end={} height={}", rect.x, rect.end_x(), rect.height);
    window.move_(rect.x, rect.y);
    window.set_size_request(rect.width, rect.height);
    window.resize(rect.width, rect.height);
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_button_labels() {
        assert_eq!(vec!["_OK".to_string()], button_labels(&[]));
        let requested = vec!["Snooze".to_string(), "Open".to_string()];
        assert_eq!(requested, button_labels(&requested));
    }
}
