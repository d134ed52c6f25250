// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{pin::Pin,
          task::{Context, Poll}};

use futures_core::Stream;
use tokio::sync::mpsc;

use crate::Command;

/// The consumer's end of the delivery channel, returned by
/// [`crate::LineEngine::commands()`]. It yields commands in the order the lines were
/// submitted, and [`None`] once the session has terminated.
///
/// There is no timeout on [`Self::next_command()`]. Wrap it with
/// [`tokio::time::timeout`] if you need one.
#[derive(Debug)]
pub struct CommandStream {
    receiver: mpsc::Receiver<Command>,
}

impl CommandStream {
    #[must_use]
    pub fn new(receiver: mpsc::Receiver<Command>) -> Self { Self { receiver } }

    /// This is cancel safe, since [`mpsc::Receiver::recv()`] is.
    pub async fn next_command(&mut self) -> Option<Command> { self.receiver.recv().await }
}

impl Stream for CommandStream {
    type Item = Command;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.receiver.poll_recv(cx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CommandError;
    use futures_util::StreamExt;

    #[tokio::test]
    #[allow(clippy::needless_return)]
    async fn test_stream_ends_when_sender_is_dropped() {
        let (sender, receiver) = mpsc::channel(1);
        let mut command_stream = CommandStream::new(receiver);

        sender
            .send(Command::Terminated(CommandError::ExitRequested))
            .await
            .unwrap();
        drop(sender);

        assert!(command_stream.next().await.unwrap().is_terminated());
        assert!(command_stream.next_command().await.is_none());
    }
}
