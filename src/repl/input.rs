//! Input tokenising and line reading for the shell.

use std::io::{self, BufRead};
use std::thread;

use tokio::sync::mpsc;
use tracing::debug;

/// Splits a line into lower-cased words, dropping all whitespace.
pub fn clean_input(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_lowercase).collect()
}

// == Line Reader ==
/// Reads lines from `reader` on a dedicated OS thread.
///
/// A blocking read never sits on the tokio runtime, so the runtime can shut
/// down while the thread is still waiting for input. The channel closes at end
/// of input, after the first read error, or once the receiver is dropped and
/// the next line arrives.
pub fn spawn_line_reader<R>(reader: R) -> io::Result<mpsc::Receiver<io::Result<String>>>
where
    R: BufRead + Send + 'static,
{
    let (tx, rx) = mpsc::channel(1);

    thread::Builder::new()
        .name("line-reader".to_string())
        .spawn(move || {
            for line in reader.lines() {
                let failed = line.is_err();
                if tx.blocking_send(line).is_err() || failed {
                    break;
                }
            }
            debug!("Line reader finished");
        })?;

    Ok(rx)
}
