//! The text supplier state machine and its background thread.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::{Duration, Instant};

use glyphfall_core::{StreamSettings, SupplierCommand, SupplierMessage};

use crate::fetch::{TextLoader, load_text};
use crate::looped::LoopedText;

/// Settings for the supplier thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SupplierSettings {
    /// Minimum number of copies of the base text in the looped sequence.
    pub loop_multiplier: usize,
    /// Interval of unsolicited batch pushes once loaded.
    pub stream_interval: Duration,
}

impl Default for SupplierSettings {
    fn default() -> Self {
        Self::from(&StreamSettings::default())
    }
}

impl From<&StreamSettings> for SupplierSettings {
    fn from(stream: &StreamSettings) -> Self {
        Self {
            loop_multiplier: stream.loop_multiplier,
            stream_interval: Duration::from_millis(stream.stream_interval_ms),
        }
    }
}

/// Command handling of the supplier, independent of threads and timers.
#[derive(Debug)]
pub struct SupplierCore {
    loop_multiplier: usize,
    text: Option<LoopedText>,
    /// Batch size of the periodic push, fixed by the first successful load.
    push_batch_size: usize,
}

impl SupplierCore {
    pub fn new(loop_multiplier: usize) -> Self {
        Self {
            loop_multiplier,
            text: None,
            push_batch_size: 0,
        }
    }

    /// Whether the source text has been loaded.
    pub fn is_loaded(&self) -> bool {
        self.text.is_some()
    }

    /// Apply one command and return the messages it produces.
    pub fn handle(
        &mut self,
        command: SupplierCommand,
        loader: &dyn TextLoader,
    ) -> Vec<SupplierMessage> {
        match command {
            SupplierCommand::Load { url, batch_size } => {
                if self.is_loaded() {
                    return Vec::new();
                }
                self.load(url.as_deref(), batch_size, loader)
            }
            SupplierCommand::RequestMore { batch_size } => {
                self.batch(batch_size).into_iter().collect()
            }
        }
    }

    /// The batch sent by the periodic push, if loaded.
    pub fn periodic_push(&mut self) -> Option<SupplierMessage> {
        self.batch(self.push_batch_size)
    }

    fn load(
        &mut self,
        url: Option<&str>,
        batch_size: usize,
        loader: &dyn TextLoader,
    ) -> Vec<SupplierMessage> {
        let loaded = loader
            .load(url)
            .and_then(|base| LoopedText::new(&base, self.loop_multiplier));

        match loaded {
            Ok(text) => {
                let info = SupplierMessage::Info {
                    message: format!("Loaded {} characters", text.len()),
                };
                self.text = Some(text);
                self.push_batch_size = batch_size;

                // Streaming starts with an immediate push.
                let mut messages = vec![info];
                messages.extend(self.periodic_push());
                messages
            }
            Err(e) => vec![SupplierMessage::Error {
                message: e.to_string(),
            }],
        }
    }

    fn batch(&mut self, batch_size: usize) -> Option<SupplierMessage> {
        let text = self.text.as_mut()?;
        Some(SupplierMessage::Character {
            data: text.next_batch(batch_size),
        })
    }
}

/// Handle to the supplier running on a background thread.
///
/// Dropping the handle disconnects the command channel, which ends the thread.
#[derive(Debug)]
pub struct TextSupplier {
    commands: Sender<SupplierCommand>,
    events: Receiver<SupplierMessage>,
}

impl TextSupplier {
    /// Start a supplier that loads text from URLs, files or the bundled text.
    pub fn spawn(settings: SupplierSettings) -> Self {
        Self::spawn_with(settings, load_text)
    }

    /// Start a supplier with a custom text loader.
    pub fn spawn_with<L: TextLoader + 'static>(settings: SupplierSettings, loader: L) -> Self {
        let (command_tx, command_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || run(settings, &loader, &command_rx, &event_tx));

        Self {
            commands: command_tx,
            events: event_rx,
        }
    }

    /// Send a command. Returns false if the supplier thread has stopped.
    pub fn send(&self, command: SupplierCommand) -> bool {
        if self.commands.send(command).is_err() {
            tracing::warn!("text supplier has stopped, command dropped");
            return false;
        }
        true
    }

    /// Take every message that has arrived, without blocking.
    pub fn drain(&self) -> Vec<SupplierMessage> {
        self.events.try_iter().collect()
    }

    /// Wait up to `timeout` for the next message.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<SupplierMessage> {
        self.events.recv_timeout(timeout).ok()
    }
}

/// Supplier thread body: serve commands and push batches on a timer.
fn run(
    settings: SupplierSettings,
    loader: &dyn TextLoader,
    commands: &Receiver<SupplierCommand>,
    events: &Sender<SupplierMessage>,
) {
    let mut core = SupplierCore::new(settings.loop_multiplier);
    let mut next_push: Option<Instant> = None;

    loop {
        let received = match next_push {
            Some(deadline) => {
                commands.recv_timeout(deadline.saturating_duration_since(Instant::now()))
            }
            None => commands.recv().map_err(|_| RecvTimeoutError::Disconnected),
        };

        let messages = match received {
            Ok(command) => {
                let was_loaded = core.is_loaded();
                let messages = core.handle(command, loader);
                if !was_loaded && core.is_loaded() {
                    next_push = Some(Instant::now() + settings.stream_interval);
                }
                messages
            }
            Err(RecvTimeoutError::Timeout) => {
                next_push = Some(Instant::now() + settings.stream_interval);
                core.periodic_push().into_iter().collect()
            }
            Err(RecvTimeoutError::Disconnected) => break,
        };

        for message in messages {
            if events.send(message).is_err() {
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TextError;

    fn fixed_loader(url: Option<&str>) -> Result<String, TextError> {
        match url {
            Some("broken") => Err(TextError::EmptyText),
            _ => Ok("abcd".to_string()),
        }
    }

    fn load(batch_size: usize) -> SupplierCommand {
        SupplierCommand::Load {
            url: None,
            batch_size,
        }
    }

    #[test]
    fn test_load_reports_info_and_pushes() {
        let mut core = SupplierCore::new(2);
        let messages = core.handle(load(3), &fixed_loader);

        assert_eq!(
            messages,
            vec![
                SupplierMessage::Info {
                    message: "Loaded 8 characters".to_string()
                },
                SupplierMessage::Character {
                    data: vec!['a', 'b', 'c']
                },
            ]
        );
        assert!(core.is_loaded());
    }

    #[test]
    fn test_load_is_idempotent() {
        let mut core = SupplierCore::new(1);
        core.handle(load(2), &fixed_loader);
        assert!(core.handle(load(2), &fixed_loader).is_empty());

        // The cursor was not reset by the second load.
        assert_eq!(
            core.handle(SupplierCommand::RequestMore { batch_size: 2 }, &fixed_loader),
            vec![SupplierMessage::Character {
                data: vec!['c', 'd']
            }]
        );
    }

    #[test]
    fn test_load_failure_is_reported() {
        let mut core = SupplierCore::new(1);
        let messages = core.handle(
            SupplierCommand::Load {
                url: Some("broken".to_string()),
                batch_size: 10,
            },
            &fixed_loader,
        );

        assert_eq!(
            messages,
            vec![SupplierMessage::Error {
                message: "Invalid JSON structure or empty text".to_string()
            }]
        );
        assert!(!core.is_loaded());
    }

    #[test]
    fn test_request_before_load_is_ignored() {
        let mut core = SupplierCore::new(1);
        let messages = core.handle(SupplierCommand::RequestMore { batch_size: 5 }, &fixed_loader);
        assert!(messages.is_empty());
        assert!(core.periodic_push().is_none());
    }

    #[test]
    fn test_request_more_wraps() {
        let mut core = SupplierCore::new(1);
        core.handle(load(3), &fixed_loader);

        let messages = core.handle(SupplierCommand::RequestMore { batch_size: 3 }, &fixed_loader);
        assert_eq!(
            messages,
            vec![SupplierMessage::Character {
                data: vec!['d', 'a', 'b']
            }]
        );
    }

    #[test]
    fn test_periodic_push_uses_load_batch_size() {
        let mut core = SupplierCore::new(1);
        core.handle(load(1), &fixed_loader);

        assert_eq!(
            core.periodic_push(),
            Some(SupplierMessage::Character { data: vec!['b'] })
        );
    }

    #[test]
    fn test_thread_serves_commands_and_pushes() {
        let settings = SupplierSettings {
            loop_multiplier: 1,
            stream_interval: Duration::from_millis(20),
        };
        let supplier = TextSupplier::spawn_with(settings, fixed_loader);
        let timeout = Duration::from_secs(5);

        assert!(supplier.send(load(2)));
        assert_eq!(
            supplier.recv_timeout(timeout),
            Some(SupplierMessage::Info {
                message: "Loaded 4 characters".to_string()
            })
        );
        assert_eq!(
            supplier.recv_timeout(timeout),
            Some(SupplierMessage::Character {
                data: vec!['a', 'b']
            })
        );

        // Unsolicited pushes keep the stream going.
        assert_eq!(
            supplier.recv_timeout(timeout),
            Some(SupplierMessage::Character {
                data: vec!['c', 'd']
            })
        );
    }

    #[test]
    fn test_thread_reports_errors() {
        let supplier = TextSupplier::spawn_with(SupplierSettings::default(), fixed_loader);
        supplier.send(SupplierCommand::Load {
            url: Some("broken".to_string()),
            batch_size: 1,
        });

        assert!(matches!(
            supplier.recv_timeout(Duration::from_secs(5)),
            Some(SupplierMessage::Error { .. })
        ));
    }
}
