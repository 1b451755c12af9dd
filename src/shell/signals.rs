use log::warn;
use nix::sys::signal::{signal, SigHandler, Signal};

/// Keeps the interpreter alive across Ctrl-C / Ctrl-\ at the prompt. Job
/// control is out of scope; only the dispositions of the interpreter's own
/// process change here.
pub fn ignore_block_signals() {
    for sig in [Signal::SIGINT, Signal::SIGQUIT] {
        if let Err(err) = unsafe { signal(sig, SigHandler::SigIgn) } {
            warn!("unable to ignore {}: {}", sig, err);
        }
    }
}

/// Restores default dispositions in a forked child, so the programs it
/// execs can be interrupted normally. Ignored dispositions survive exec.
pub fn restore_default_signals() {
    for sig in [Signal::SIGINT, Signal::SIGQUIT] {
        if let Err(err) = unsafe { signal(sig, SigHandler::SigDfl) } {
            warn!("unable to restore {}: {}", sig, err);
        }
    }
}
