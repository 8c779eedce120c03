//! Loopback channel used to deliver an action selection to a running bar.
//!
//! Every message is a 4 byte big-endian length header followed by the action as a decimal string.
//! The bar listens, and `dockbar action <n>` connects, writes a single message and hangs up.

use std::{
    io::Write,
    net::{Ipv4Addr, SocketAddr, TcpStream},
    time::Duration,
};

use anyhow::{bail, Context, Result};
use tokio::{
    io::{AsyncRead, AsyncReadExt},
    net::TcpListener,
    sync::mpsc::UnboundedSender,
};

use crate::{action::ActionIndex, app::BarEvent};

pub const DEFAULT_ACTION_PORT: u16 = 5557;

/// Upper bound for the length of a message. Any valid action fits easily.
const MAX_MESSAGE_LEN: u32 = 64;

pub fn loopback_addr(port: u16) -> SocketAddr {
    SocketAddr::from((Ipv4Addr::LOCALHOST, port))
}

pub async fn bind(port: u16) -> Result<TcpListener> {
    let addr = loopback_addr(port);
    TcpListener::bind(addr).await.with_context(|| format!("Failed to bind action listener to {}", addr))
}

/// Accept connections until the application exits, forwarding every valid action to the bar.
pub async fn run_listener(listener: TcpListener, evt_send: UnboundedSender<BarEvent>) -> Result<()> {
    log::info!("Action listener initialized on {}", listener.local_addr()?);
    crate::loop_select_exiting! {
        connection = listener.accept() => match connection {
            Ok((stream, addr)) => {
                log::debug!("action listener accepted connection from {}", addr);
                let evt_send = evt_send.clone();
                tokio::spawn(async move {
                    let result = handle_connection(stream, evt_send).await;
                    crate::print_result_err!("while handling action listener connection", result);
                });
            },
            Err(e) => log::error!("Failed to accept action listener connection: {:?}", e),
        }
    }
    Ok(())
}

async fn handle_connection(mut stream: tokio::net::TcpStream, evt_send: UnboundedSender<BarEvent>) -> Result<()> {
    let action = read_action_from_stream(&mut stream).await?;
    log::info!("received action {} from action listener", action);
    evt_send.send(BarEvent::ActionSelected(action))?;
    Ok(())
}

/// Read a single message from a stream, and parse it into an [`ActionIndex`].
async fn read_action_from_stream<R: AsyncRead + Unpin>(stream: &mut R) -> Result<ActionIndex> {
    let mut message_byte_length = [0u8; 4];
    stream.read_exact(&mut message_byte_length).await.context("Failed to read message size header in action message")?;
    let message_byte_length = u32::from_be_bytes(message_byte_length);
    if message_byte_length > MAX_MESSAGE_LEN {
        bail!("Action message of {} bytes exceeds the limit of {} bytes", message_byte_length, MAX_MESSAGE_LEN);
    }
    let mut raw_message = vec![0u8; message_byte_length as usize];
    stream.read_exact(&mut raw_message).await.context("Failed to read actual action message")?;
    let message = String::from_utf8(raw_message).context("Action message is not valid utf-8")?;
    Ok(message.parse()?)
}

/// Encode an action into a single message, header included.
pub fn encode_message(action: ActionIndex) -> Vec<u8> {
    let payload = action.to_string().into_bytes();
    let mut message = Vec::with_capacity(payload.len() + 4);
    message.extend_from_slice(&(payload.len() as u32).to_be_bytes());
    message.extend_from_slice(&payload);
    message
}

/// Validate the given action and send it to the bar listening on `port`.
pub fn send_action(action: &str, port: u16) -> Result<ActionIndex> {
    let action: ActionIndex = action.parse()?;
    send_action_to(action, loopback_addr(port), 5)?;
    Ok(action)
}

pub fn send_action_to(action: ActionIndex, addr: SocketAddr, connect_attempts: usize) -> Result<()> {
    log::debug!("Trying to reach bar at {}", addr);
    let mut stream = attempt_connect(addr, connect_attempts).with_context(|| format!("Failed to connect to bar at {}", addr))?;
    stream.write_all(&encode_message(action)).context("Failed to write action to stream")?;
    stream.shutdown(std::net::Shutdown::Write).context("Failed to shut down action stream")?;
    log::debug!("sent action {} to {}", action, addr);
    Ok(())
}

fn attempt_connect(addr: SocketAddr, attempts: usize) -> Option<TcpStream> {
    for attempt in 0..attempts {
        match TcpStream::connect_timeout(&addr, Duration::from_millis(500)) {
            Ok(stream) => return Some(stream),
            Err(err) => log::debug!("connection attempt {} to {} failed: {}", attempt + 1, addr, err),
        }
        std::thread::sleep(Duration::from_millis(200));
    }
    None
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_encode_message() {
        assert_eq!(vec![0, 0, 0, 2, b'4', b'2'], encode_message(ActionIndex(42)));
    }

    #[tokio::test]
    async fn test_read_action_from_stream() {
        let mut message: &[u8] = &encode_message(ActionIndex(3));
        assert_eq!(ActionIndex(3), read_action_from_stream(&mut message).await.unwrap());

        let mut not_a_number: &[u8] = &[0, 0, 0, 2, b'-', b'1'];
        assert!(read_action_from_stream(&mut not_a_number).await.is_err());

        let mut truncated: &[u8] = &[0, 0, 0, 4, b'1'];
        assert!(read_action_from_stream(&mut truncated).await.is_err());

        let mut oversized: &[u8] = &[0, 0, 1, 0];
        assert!(read_action_from_stream(&mut oversized).await.is_err());
    }

    #[test]
    fn test_send_action_rejects_invalid_before_connecting() {
        // nothing listens here, so an error about connecting would show that validation was skipped
        let err = send_action("abc", 9).unwrap_err();
        assert_eq!("Argument must be positive integer. Found abc", err.to_string());
    }

    #[tokio::test]
    async fn test_listener_forwards_actions() {
        let listener = TcpListener::bind(loopback_addr(0)).await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (evt_send, mut evt_recv) = tokio::sync::mpsc::unbounded_channel();
        tokio::spawn(run_listener(listener, evt_send));

        // a malformed message must not stop the listener
        tokio::task::spawn_blocking(move || {
            let mut stream = TcpStream::connect(addr).unwrap();
            stream.write_all(&[0, 0, 0, 1, b'x']).unwrap();
        })
        .await
        .unwrap();

        tokio::task::spawn_blocking(move || send_action_to(ActionIndex(2), addr, 3)).await.unwrap().unwrap();

        let event = tokio::time::timeout(Duration::from_secs(5), evt_recv.recv()).await.unwrap();
        assert_eq!(Some(BarEvent::ActionSelected(ActionIndex(2))), event);
    }
}
