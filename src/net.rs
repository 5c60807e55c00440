//! Host network address discovery.
//!
//! The header line on the panel shows the appliance's IP so it can be
//! reached over SSH without a keyboard.  Resolution shells out to
//! `hostname -I`, which lists the host's addresses space-separated; the
//! first one is the primary interface.

use std::process::Command;

/// First address reported by `hostname -I`, or `None` when the command is
/// unavailable, fails, or reports nothing (no network yet).
pub fn host_ip() -> Option<String> {
    let output = match Command::new("hostname").arg("-I").output() {
        Ok(output) => output,
        Err(e) => {
            log::warn!("hostname -I failed to run: {e}");
            return None;
        }
    };

    if !output.status.success() {
        log::warn!("hostname -I exited with {}", output.status);
        return None;
    }

    first_address(&String::from_utf8_lossy(&output.stdout))
}

/// Pull the first whitespace-separated token out of `hostname -I` output.
fn first_address(stdout: &str) -> Option<String> {
    stdout.split_whitespace().next().map(str::to_string)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
