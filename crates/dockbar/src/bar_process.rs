use std::{cell::Cell, rc::Rc, time::Duration};

use anyhow::{Context, Result};
use gtk::prelude::*;
use notification_bus::CloseReason;
use tokio::sync::{broadcast, mpsc::UnboundedSender};

use crate::{
    action_channel,
    app::{App, BarEvent, BarOutcome},
    application_lifecycle, bar, display_backend,
    geometry::{Rect, StrutDefinition},
    monitor,
    opts::BarArgs,
    paths::DockbarPaths,
    style,
};

/// Show the bar and block until it is closed, returning how it ended.
pub fn run_bar(paths: DockbarPaths, args: BarArgs) -> Result<BarOutcome> {
    let (evt_send, mut evt_recv) = tokio::sync::mpsc::unbounded_channel();

    log::info!("Loading paths: {}", &paths);

    let exit_recv = application_lifecycle::subscribe_exit();
    application_lifecycle::install_signal_handlers();

    gtk::init().context("Failed to initialize GTK")?;
    log::info!("Gtk {}.{}.{}", gtk::major_version(), gtk::minor_version(), gtk::micro_version());

    style::apply_styles(args.urgency, &paths)?;

    let display = gdk::Display::default().context("Failed to get the default display")?;
    monitor::log_monitors(&display);
    let monitor = monitor::select_monitor(&display, args.screen.as_ref())?;
    let monitor_rect = Rect::from(monitor.geometry());
    log::info!("showing bar on monitor {} ({})", monitor.model().as_deref().unwrap_or("unknown model"), monitor_rect);

    let strut = StrutDefinition { side: args.side, dist: args.height };
    let buttons = bar::button_labels(&args.buttons);
    let window = bar::build_bar(&args.message, &buttons, evt_send.clone());
    bar::place_bar(&window, strut.bar_rect(monitor_rect));

    // the X window only exists once the bar is shown
    window.show_all();
    log::debug!("Window shown");
    if let Err(err) = display_backend::set_xprops(&window, monitor_rect, strut) {
        log::error!("Failed to reserve screen space for the bar: {:?}", err);
    }

    init_async_part(args.port, args.timeout, evt_send, exit_recv);

    let outcome = Rc::new(Cell::new(None));
    let mut app = App { bar: window, button_count: buttons.len(), outcome: outcome.clone() };
    glib::MainContext::default().spawn_local(async move {
        while let Some(event) = evt_recv.recv().await {
            app.handle_event(event);
        }
    });

    log::debug!("Running main loop");
    gtk::main();
    log::info!("main loop finished");

    if let Err(err) = application_lifecycle::send_exit() {
        log::debug!("no task left to notify about exit: {}", err);
    }

    outcome
        .get()
        .or_else(|| application_lifecycle::shutdown_requested().then_some(BarOutcome::Closed(CloseReason::Undefined)))
        .context("Main loop ended without the bar being closed")
}

fn init_async_part(port: u16, timeout_secs: u64, evt_send: UnboundedSender<BarEvent>, exit_recv: broadcast::Receiver<()>) {
    std::thread::Builder::new()
        .name("dockbar-async".to_string())
        .spawn(move || {
            let rt = match tokio::runtime::Builder::new_multi_thread().worker_threads(1).enable_all().build() {
                Ok(rt) => rt,
                Err(err) => {
                    log::error!("Failed to initialize tokio runtime: {:?}", err);
                    return;
                }
            };
            rt.block_on(async {
                let listener_join_handle = {
                    let evt_send = evt_send.clone();
                    tokio::spawn(async move {
                        let result = match action_channel::bind(port).await {
                            Ok(listener) => action_channel::run_listener(listener, evt_send).await,
                            Err(err) => Err(err),
                        };
                        crate::print_result_err!("in action listener", result);
                    })
                };

                let timeout_join_handle = {
                    let evt_send = evt_send.clone();
                    let exit_recv = exit_recv.resubscribe();
                    tokio::spawn(async move { run_timeout(timeout_secs, evt_send, exit_recv).await })
                };

                let forward_exit_to_app_handle = tokio::spawn(forward_exit(exit_recv, evt_send));

                let result = tokio::try_join!(listener_join_handle, timeout_join_handle, forward_exit_to_app_handle);

                if let Err(e) = result {
                    log::error!("Async tasks of the bar failed: {:?}", e);
                }
            })
        })
        .map(|_| ())
        .unwrap_or_else(|err| log::error!("Failed to spawn async thread: {:?}", err));
}

/// Turn the first exit event into [`BarEvent::Shutdown`].
/// `exit_recv` is subscribed before the signal handlers exist, so early signals are still delivered.
async fn forward_exit(mut exit_recv: broadcast::Receiver<()>, evt_send: UnboundedSender<BarEvent>) {
    let _ = exit_recv.recv().await;
    log::debug!("Forward task received exit event");
    let _ = evt_send.send(BarEvent::Shutdown);
}

/// Send [`BarEvent::TimedOut`] after `timeout_secs` seconds, unless the bar exits first.
/// A timeout of 0 never fires.
async fn run_timeout(timeout_secs: u64, evt_send: UnboundedSender<BarEvent>, mut exit_recv: broadcast::Receiver<()>) {
    if timeout_secs == 0 {
        log::debug!("bar has no timeout");
        return;
    }
    tokio::select! {
        _ = exit_recv.recv() => {}
        _ = tokio::time::sleep(Duration::from_secs(timeout_secs)) => {
            log::info!("bar timed out after {}s", timeout_secs);
            let _ = evt_send.send(BarEvent::TimedOut);
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_timeout_fires() {
        let (evt_send, mut evt_recv) = tokio::sync::mpsc::unbounded_channel();
        let (_exit_send, exit_recv) = broadcast::channel(2);
        run_timeout(1, evt_send, exit_recv).await;
        assert_eq!(Some(BarEvent::TimedOut), evt_recv.recv().await);
    }

    #[tokio::test]
    async fn test_zero_timeout_never_fires() {
        let (evt_send, mut evt_recv) = tokio::sync::mpsc::unbounded_channel();
        let (_exit_send, exit_recv) = broadcast::channel(2);
        run_timeout(0, evt_send, exit_recv).await;
        assert_eq!(None, evt_recv.recv().await);
    }

    #[tokio::test]
    async fn test_exit_cancels_timeout() {
        let (evt_send, mut evt_recv) = tokio::sync::mpsc::unbounded_channel();
        let (exit_send, exit_recv) = broadcast::channel(2);
        exit_send.send(()).unwrap();
        tokio::time::timeout(Duration::from_secs(5), run_timeout(3600, evt_send, exit_recv))
            .await
            .expect("timeout task should stop on exit");
        assert_eq!(None, evt_recv.recv().await);
    }

    #[tokio::test]
    async fn test_exit_before_forwarding_starts_becomes_shutdown() {
        let (evt_send, mut evt_recv) = tokio::sync::mpsc::unbounded_channel();
        let (exit_send, exit_recv) = broadcast::channel(2);
        // exit arrives while the async part is still starting up
        exit_send.send(()).unwrap();
        forward_exit(exit_recv, evt_send).await;
        assert_eq!(Some(BarEvent::Shutdown), evt_recv.recv().await);
    }
}
