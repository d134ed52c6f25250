// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Drives a [`LineEngine`] end to end with scripted keys, and checks what the consumer
//! receives on the [`CommandStream`].

use std::{io, time::Duration};

use pretty_assertions::assert_eq;
use r3bl_line_engine::{AckToken, Command, CommandError, CommandStream, InlineVec, KeyEvent,
                       KeyEventResult, KeyKind, KeySource, LineEngine, OutputDevice,
                       test_fixtures::{KeySourceExtMock, OutputDeviceExtMock,
                                       RawModeSwitchMock, StdoutMock, key_results, typed,
                                       typed_line}};
use smallvec::smallvec;
use tokio::time::timeout;

const PROMPT: &str = "momoko> ";
const NO_COMMAND_WAIT: Duration = Duration::from_millis(100);

struct Fixture {
    line_engine: LineEngine,
    command_stream: CommandStream,
    stdout_mock: StdoutMock,
    raw_mode: RawModeSwitchMock,
}

/// The key stream stays open after the scripted keys, like a user that stopped typing.
fn start_engine(keys: InlineVec<KeyEventResult>) -> Fixture {
    let (key_source, raw_mode) = KeySource::new_mock_then_pending(keys);
    start_engine_with(key_source, raw_mode)
}

fn start_engine_with(key_source: KeySource, raw_mode: RawModeSwitchMock) -> Fixture {
    let (output_device, stdout_mock) = OutputDevice::new_mock();
    let mut line_engine = LineEngine::new(PROMPT, key_source, output_device);
    line_engine.open().unwrap();
    let command_stream = line_engine.commands().unwrap();
    Fixture {
        line_engine,
        command_stream,
        stdout_mock,
        raw_mode,
    }
}

async fn next_input(command_stream: &mut CommandStream) -> (String, AckToken) {
    match command_stream.next_command().await {
        Some(Command::Input { input, ack }) => (input, ack),
        other => panic!("expected an input command, got {other:?}"),
    }
}

async fn next_terminated(command_stream: &mut CommandStream) -> CommandError {
    match command_stream.next_command().await {
        Some(Command::Terminated(error)) => error,
        other => panic!("expected a terminated command, got {other:?}"),
    }
}

#[tokio::test]
#[allow(clippy::needless_return)]
async fn test_typed_line_is_delivered_without_prompt() {
    let mut fixture = start_engine(key_results(typed_line("hi")));

    let (input, ack) = next_input(&mut fixture.command_stream).await;
    assert_eq!(input, "hi");
    ack.ack();

    let output = fixture.stdout_mock.get_copy_of_buffer_as_string_strip_ansi();
    assert!(output.starts_with(PROMPT));
    assert!(output.contains("momoko> hi"));
}

#[tokio::test]
#[allow(clippy::needless_return)]
async fn test_up_then_down_restores_empty_live_line() {
    let mut keys = typed_line("hi");
    keys.push(KeyEvent::new(KeyKind::ArrowUp));
    keys.push(KeyEvent::new(KeyKind::ArrowDown));
    keys.push(KeyEvent::new(KeyKind::Enter));
    let mut fixture = start_engine(key_results(keys));

    let (input, ack) = next_input(&mut fixture.command_stream).await;
    assert_eq!(input, "hi");
    ack.ack();

    let (input, ack) = next_input(&mut fixture.command_stream).await;
    assert_eq!(input, "");
    ack.ack();
}

#[tokio::test]
#[allow(clippy::needless_return)]
async fn test_recalled_history_entry_is_resubmitted() {
    let mut keys = typed_line("ls -la");
    keys.push(KeyEvent::new(KeyKind::ArrowUp));
    keys.push(KeyEvent::new(KeyKind::Enter));
    let mut fixture = start_engine(key_results(keys));

    for _ in 0..2 {
        let (input, ack) = next_input(&mut fixture.command_stream).await;
        assert_eq!(input, "ls -la");
        ack.ack();
    }
}

#[tokio::test]
#[allow(clippy::needless_return)]
async fn test_left_then_backspace_deletes_previous_char() {
    let mut keys = typed("ab");
    keys.push(KeyEvent::new(KeyKind::ArrowLeft));
    keys.push(KeyEvent::new(KeyKind::Backspace));
    keys.push(KeyEvent::new(KeyKind::Enter));
    let mut fixture = start_engine(key_results(keys));

    let (input, ack) = next_input(&mut fixture.command_stream).await;
    assert_eq!(input, "b");
    ack.ack();
}

#[tokio::test]
#[allow(clippy::needless_return)]
async fn test_next_command_waits_for_ack() {
    let mut keys = typed_line("one");
    keys.extend(typed_line("two"));
    let mut fixture = start_engine(key_results(keys));

    let (input, ack) = next_input(&mut fixture.command_stream).await;
    assert_eq!(input, "one");

    // Nothing else is produced (or drawn) until the ack.
    let maybe_command = timeout(NO_COMMAND_WAIT, fixture.command_stream.next_command()).await;
    assert!(maybe_command.is_err());
    let output = fixture.stdout_mock.get_copy_of_buffer_as_string_strip_ansi();
    assert!(!output.contains("two"));

    ack.ack();

    let (input, ack) = next_input(&mut fixture.command_stream).await;
    assert_eq!(input, "two");
    ack.ack();
}

#[tokio::test]
#[allow(clippy::needless_return)]
async fn test_dropped_ack_token_counts_as_ack() {
    let mut keys = typed_line("one");
    keys.extend(typed_line("two"));
    let mut fixture = start_engine(key_results(keys));

    let (input, ack) = next_input(&mut fixture.command_stream).await;
    assert_eq!(input, "one");
    drop(ack);

    let (input, _ack) = next_input(&mut fixture.command_stream).await;
    assert_eq!(input, "two");
}

#[tokio::test]
#[allow(clippy::needless_return)]
async fn test_n_submissions_arrive_in_order() {
    let lines = ["ls", "cd /tmp", "", "echo 日本", "exit"];
    let mut keys: InlineVec<KeyEvent> = smallvec![];
    for line in lines {
        keys.extend(typed_line(line));
    }
    let mut fixture = start_engine(key_results(keys));

    for line in lines {
        let (input, ack) = next_input(&mut fixture.command_stream).await;
        assert_eq!(input, line);
        ack.ack();
    }
}

#[tokio::test]
#[allow(clippy::needless_return)]
async fn test_interrupt_terminates_exactly_once() {
    let mut keys = typed("ab");
    keys.push(KeyEvent::new(KeyKind::Interrupt));
    keys.extend(typed_line("never"));
    let mut fixture = start_engine(key_results(keys));

    let error = next_terminated(&mut fixture.command_stream).await;
    assert!(error.is_exit_requested());
    assert!(fixture.command_stream.next_command().await.is_none());
    assert!(fixture.command_stream.next_command().await.is_none());

    // Closing after termination is fine.
    fixture.line_engine.close().unwrap();
    fixture.line_engine.close().unwrap();
    assert_eq!(fixture.raw_mode.disable_count(), 1);
}

#[tokio::test]
#[allow(clippy::needless_return)]
async fn test_key_source_error_terminates() {
    let keys: InlineVec<KeyEventResult> = smallvec![
        Ok(KeyEvent::char('a')),
        Err(io::Error::other("keyboard unplugged")),
        Ok(KeyEvent::new(KeyKind::Enter)),
    ];
    let mut fixture = start_engine(keys);

    let error = next_terminated(&mut fixture.command_stream).await;
    assert!(matches!(error, CommandError::IO(ref it) if it.to_string() == "keyboard unplugged"));
    assert!(fixture.command_stream.next_command().await.is_none());
}

#[tokio::test]
#[allow(clippy::needless_return)]
async fn test_end_of_key_stream_terminates() {
    let (key_source, raw_mode) = KeySource::new_mock(key_results(typed_line("last")));
    let mut fixture = start_engine_with(key_source, raw_mode);

    let (input, ack) = next_input(&mut fixture.command_stream).await;
    assert_eq!(input, "last");
    ack.ack();

    let error = next_terminated(&mut fixture.command_stream).await;
    assert!(
        matches!(error, CommandError::IO(ref it) if it.kind() == io::ErrorKind::UnexpectedEof)
    );
    assert!(fixture.command_stream.next_command().await.is_none());
}

#[tokio::test]
#[allow(clippy::needless_return)]
async fn test_close_while_waiting_for_keys_terminates() {
    let mut fixture = start_engine(key_results(typed("half typed")));

    let maybe_command = timeout(NO_COMMAND_WAIT, fixture.command_stream.next_command()).await;
    assert!(maybe_command.is_err());

    fixture.line_engine.close().unwrap();

    let error = next_terminated(&mut fixture.command_stream).await;
    assert!(matches!(error, CommandError::IO(_)));
    assert!(fixture.command_stream.next_command().await.is_none());
    assert_eq!(fixture.raw_mode.enable_count(), 1);
    assert_eq!(fixture.raw_mode.disable_count(), 1);
}

#[tokio::test]
#[allow(clippy::needless_return)]
async fn test_dropping_engine_restores_terminal_and_ends_stream() {
    let Fixture {
        line_engine,
        mut command_stream,
        raw_mode,
        ..
    } = start_engine(key_results(typed("abc")));

    drop(line_engine);

    assert_eq!(raw_mode.disable_count(), 1);
    assert!(command_stream.next_command().await.is_none());
}

#[tokio::test]
#[allow(clippy::needless_return)]
async fn test_close_before_ack_terminates_on_next_line() {
    let mut keys = typed_line("one");
    keys.extend(typed_line("two"));
    let mut fixture = start_engine(key_results(keys));

    let (input, ack) = next_input(&mut fixture.command_stream).await;
    assert_eq!(input, "one");

    // The loop is parked on the ack, so it only sees the close once it resumes.
    fixture.line_engine.close().unwrap();
    ack.ack();

    let error = next_terminated(&mut fixture.command_stream).await;
    assert!(matches!(error, CommandError::IO(ref it) if it.to_string() == "key source was closed"));
    assert!(fixture.command_stream.next_command().await.is_none());
    assert_eq!(fixture.raw_mode.disable_count(), 1);
}

#[tokio::test]
#[allow(clippy::needless_return)]
async fn test_slowly_typed_keys_are_not_read_until_ack() {
    const KEY_DELAY: Duration = Duration::from_millis(5);

    let mut keys = typed_line("one");
    keys.extend(typed_line("two"));
    let (key_source, raw_mode) = KeySource::new_mock_with_delay(key_results(keys), KEY_DELAY);
    let mut fixture = start_engine_with(key_source, raw_mode);

    let (input, ack) = next_input(&mut fixture.command_stream).await;
    assert_eq!(input, "one");

    // Long enough for every remaining key to arrive, if anything were reading them.
    let maybe_command = timeout(NO_COMMAND_WAIT, fixture.command_stream.next_command()).await;
    assert!(maybe_command.is_err());
    // Not even the first key of "two" is drawn.
    let output = fixture.stdout_mock.get_copy_of_buffer_as_string_strip_ansi();
    assert!(!output.contains('t'));

    ack.ack();

    let (input, ack) = next_input(&mut fixture.command_stream).await;
    assert_eq!(input, "two");
    ack.ack();

    let error = next_terminated(&mut fixture.command_stream).await;
    assert!(
        matches!(error, CommandError::IO(ref it) if it.kind() == io::ErrorKind::UnexpectedEof)
    );
}
