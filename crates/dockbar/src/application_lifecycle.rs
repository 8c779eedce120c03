//! Global shutdown handling of the bar process.
//!
//! The UI thread and the async tasks share a broadcast channel. Signals and the closing bar
//! call [`send_exit`], long running tasks await [`recv_exit`] (usually via [`loop_select_exiting`]).

use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use tokio::sync::broadcast;

pub static APPLICATION_EXIT_SENDER: Lazy<broadcast::Sender<()>> = Lazy::new(|| broadcast::channel(2).0);

/// Set once SIGINT or SIGTERM arrived, even if no task was listening at that moment.
static SHUTDOWN_REQUESTED: AtomicBool = AtomicBool::new(false);

/// Notify all listening tasks that the bar is going away.
/// Fails if nothing is listening anymore.
pub fn send_exit() -> Result<()> {
    (APPLICATION_EXIT_SENDER).send(()).context("Failed to send exit lifecycle event")?;
    Ok(())
}

/// Yields Ok(()) once the bar is shutting down.
pub async fn recv_exit() -> Result<()> {
    (APPLICATION_EXIT_SENDER).subscribe().recv().await.context("Failed to receive lifecycle event")
}

/// Receiver for exit events sent from now on, for tasks that are started later.
pub fn subscribe_exit() -> broadcast::Receiver<()> {
    APPLICATION_EXIT_SENDER.subscribe()
}

/// Whether a signal asked the bar to shut down.
pub fn shutdown_requested() -> bool {
    SHUTDOWN_REQUESTED.load(Ordering::SeqCst)
}

/// Turn SIGINT and SIGTERM into an exit lifecycle event.
/// The GTK main loop swallows Ctrl-C otherwise.
///
/// Subscribe with [`subscribe_exit`] before calling this, so a signal arriving during startup
/// is not lost.
pub fn install_signal_handlers() {
    simple_signal::set_handler(&[simple_signal::Signal::Int, simple_signal::Signal::Term], |signals| {
        log::info!("Received {:?}, closing bar...", signals);
        request_shutdown(&APPLICATION_EXIT_SENDER, &SHUTDOWN_REQUESTED);
    });
}

/// Record the shutdown in `requested` and tell whoever listens on `sender`.
/// Returns whether any task was notified.
fn request_shutdown(sender: &broadcast::Sender<()>, requested: &AtomicBool) -> bool {
    requested.store(true, Ordering::SeqCst);
    match sender.send(()) {
        Ok(_) => true,
        Err(_) => {
            log::debug!("No task is listening for the exit event, shutdown is only recorded");
            false
        }
    }
}

/// Select in a loop, breaking once an application exit event is received.
#[macro_export]
macro_rules! loop_select_exiting {
    ($($content:tt)*) => {
        loop {
            tokio::select! {
                Ok(()) = $crate::application_lifecycle::recv_exit() => {
                    break;
                }
                $($content)*
            }
        }
    };
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_shutdown_without_listeners_is_recorded() {
        let (sender, _) = broadcast::channel(2);
        let requested = AtomicBool::new(false);
        assert_eq!(false, request_shutdown(&sender, &requested));
        assert!(requested.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_early_subscriber_sees_shutdown() {
        let (sender, _) = broadcast::channel(2);
        let mut exit_recv = sender.subscribe();
        let requested = AtomicBool::new(false);
        // the signal arrives before the receiving task runs
        assert!(request_shutdown(&sender, &requested));
        assert_eq!(Ok(()), exit_recv.recv().await);
        assert!(requested.load(Ordering::SeqCst));
    }
}
