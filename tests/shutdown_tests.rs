//! Process-level shutdown tests
//!
//! Runs the real `pokedex` binary with stdin held open and checks that a
//! signal ends it promptly instead of leaving it waiting on a pending read.

#![cfg(unix)]

use std::io::Read;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

const PROMPT: &str = "Pokedex > ";
const EXIT_BOUND: Duration = Duration::from_secs(5);

// == Helper Functions ==

fn spawn_shell() -> Child {
    Command::new(env!("CARGO_BIN_EXE_pokedex"))
        // Nothing listens here; no command is run that would reach it
        .env("POKEAPI_BASE_URL", "http://127.0.0.1:9/")
        .env("RUST_LOG", "off")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("failed to start pokedex binary")
}

/// Blocks until the shell has printed its first prompt.
fn wait_for_prompt(child: &mut Child) {
    let mut stdout = child.stdout.take().expect("stdout is piped");
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        let mut seen = Vec::new();
        let mut buf = [0u8; 256];
        loop {
            match stdout.read(&mut buf) {
                Ok(0) | Err(_) => return,
                Ok(n) => {
                    seen.extend_from_slice(&buf[..n]);
                    if String::from_utf8_lossy(&seen).contains(PROMPT) {
                        let _ = tx.send(());
                    }
                }
            }
        }
    });

    if rx.recv_timeout(EXIT_BOUND).is_err() {
        let _ = child.kill();
        panic!("shell never printed its prompt");
    }
}

fn send_signal(child: &Child, signal: &str) {
    let status = Command::new("kill")
        .arg(format!("-{}", signal))
        .arg(child.id().to_string())
        .status()
        .expect("failed to run kill");
    assert!(status.success(), "kill -{} failed", signal);
}

fn wait_with_bound(child: &mut Child, bound: Duration) -> Option<ExitStatus> {
    let deadline = Instant::now() + bound;
    while Instant::now() < deadline {
        if let Some(status) = child.try_wait().expect("failed to poll child") {
            return Some(status);
        }
        thread::sleep(Duration::from_millis(20));
    }
    let _ = child.kill();
    let _ = child.wait();
    None
}

fn assert_exits_on(signal: &str) {
    let mut child = spawn_shell();
    // Held open for the whole test, so the reader thread stays blocked
    let _stdin = child.stdin.take().expect("stdin is piped");

    wait_for_prompt(&mut child);
    // Signal handlers are installed alongside the prompt loop
    thread::sleep(Duration::from_millis(200));
    send_signal(&child, signal);

    let status = wait_with_bound(&mut child, EXIT_BOUND)
        .unwrap_or_else(|| panic!("shell still running {:?} after SIG{}", EXIT_BOUND, signal));
    assert!(status.success(), "unexpected exit status after SIG{}: {:?}", signal, status);
}

// == Tests ==

#[test]
fn test_ctrl_c_exits_while_waiting_for_input() {
    assert_exits_on("INT");
}

#[test]
fn test_sigterm_exits_while_waiting_for_input() {
    assert_exits_on("TERM");
}

#[test]
fn test_end_of_input_exits() {
    let mut child = spawn_shell();
    wait_for_prompt(&mut child);
    drop(child.stdin.take());

    let status = wait_with_bound(&mut child, EXIT_BOUND).expect("shell ignored end of input");
    assert!(status.success());
}
