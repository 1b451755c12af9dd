use colored::Colorize;
use log::debug;
use nix::fcntl::{open, OFlag};
use nix::sys::stat::Mode;
use nix::sys::wait::{waitpid, WaitStatus};
use nix::unistd::{close, dup2, execvp, fork, pipe, ForkResult, Pid};
use std::ffi::CString;
use std::io;
use std::os::fd::IntoRawFd;
use std::path::Path;
use std::process;

use super::alias::AliasTable;
use super::parser::ast::{Command, RedirectKind};

/// Prints a diagnostic from whichever process hit the failure.
pub(crate) fn report(hint: &str) {
    eprintln!("{}", format!("[panic]: {}", hint).bright_red());
}

/// Realizes a command tree as a process graph. `run` expects to already be
/// inside a process dedicated to the current line: a `Simple` node replaces
/// the process image, and composite nodes fork children that exit once their
/// subtree is done.
pub struct Executor {
    aliases: AliasTable,
}

impl Executor {
    pub fn new(aliases: AliasTable) -> Self {
        Self { aliases }
    }

    pub fn run(&self, command: Command) -> io::Result<i32> {
        match command {
            Command::Simple { argv } => self.exec_simple(argv),
            Command::Pipe { left, right } => self.run_pipe(*left, *right),
            Command::Redirect { kind, inner, path } => self.run_redirect(kind, *inner, path),
        }
    }

    /// Replaces the current process with the named program. Returns only on
    /// failure; success is observed by whoever waits on this process.
    fn exec_simple(&self, argv: Vec<String>) -> io::Result<i32> {
        let argv = self.aliases.expand(argv);

        let mut args = Vec::with_capacity(argv.len());
        for arg in &argv {
            let arg = arg.trim();
            if arg.is_empty() {
                continue;
            }
            args.push(CString::new(arg).map_err(|_| {
                io::Error::new(io::ErrorKind::InvalidInput, "argument contains NUL")
            })?);
        }
        if args.is_empty() {
            return Err(io::Error::new(io::ErrorKind::InvalidInput, "empty command"));
        }

        let program = args[0].to_string_lossy().into_owned();
        debug!("exec {:?}", args);
        match execvp(&args[0], &args) {
            Ok(never) => match never {},
            Err(errno) => Err(io::Error::new(
                io::Error::from(errno).kind(),
                format!("exec {} failed: {}", program, errno.desc()),
            )),
        }
    }

    fn run_pipe(&self, left: Command, right: Command) -> io::Result<i32> {
        let (read_end, write_end) = pipe().map_err(io::Error::from)?;
        let (read_fd, write_fd) = (read_end.into_raw_fd(), write_end.into_raw_fd());

        let producer = match self.spawn_branch(|| {
            close(read_fd).map_err(io::Error::from)?;
            dup2(write_fd, libc::STDOUT_FILENO).map_err(io::Error::from)?;
            close(write_fd).map_err(io::Error::from)?;
            self.run(left)
        }) {
            Ok(pid) => pid,
            Err(err) => {
                let _ = close(read_fd);
                let _ = close(write_fd);
                return Err(err);
            }
        };

        let consumer = self.spawn_branch(|| {
            close(write_fd).map_err(io::Error::from)?;
            dup2(read_fd, libc::STDIN_FILENO).map_err(io::Error::from)?;
            close(read_fd).map_err(io::Error::from)?;
            self.run(right)
        });

        // The parent's copies close as soon as both forks are behind us;
        // a surviving write end would keep the consumer from seeing EOF.
        let _ = close(read_fd);
        let _ = close(write_fd);

        match consumer {
            Ok(consumer) => {
                let left_status = wait_for(producer)?;
                let right_status = wait_for(consumer)?;
                debug!("pipe statuses: left={} right={}", left_status, right_status);
                Ok(right_status)
            }
            Err(err) => {
                let _ = wait_for(producer);
                Err(err)
            }
        }
    }

    fn run_redirect(&self, kind: RedirectKind, inner: Command, path: String) -> io::Result<i32> {
        let child = self.spawn_branch(move || {
            let (oflag, target) = match kind {
                RedirectKind::In => (OFlag::O_RDONLY, libc::STDIN_FILENO),
                RedirectKind::Out => (
                    OFlag::O_WRONLY | OFlag::O_CREAT | OFlag::O_TRUNC,
                    libc::STDOUT_FILENO,
                ),
            };
            let fd = open(Path::new(&path), oflag, Mode::from_bits_truncate(0o644)).map_err(
                |errno| {
                    io::Error::new(
                        io::Error::from(errno).kind(),
                        format!("open {} failed: {}", path, errno.desc()),
                    )
                },
            )?;
            dup2(fd, target).map_err(io::Error::from)?;
            close(fd).map_err(io::Error::from)?;
            self.run(inner)
        })?;

        wait_for(child)
    }

    /// Forks one branch of a composite node. The child wires up its
    /// descriptors, runs its subtree, and exits unconditionally; it must
    /// never fall through into work meant for a sibling branch.
    fn spawn_branch<F>(&self, branch: F) -> io::Result<Pid>
    where
        F: FnOnce() -> io::Result<i32>,
    {
        match unsafe { fork() }.map_err(io::Error::from)? {
            ForkResult::Parent { child } => Ok(child),
            ForkResult::Child => {
                let status = match branch() {
                    Ok(status) => status,
                    Err(err) => {
                        report(&err.to_string());
                        1
                    }
                };
                process::exit(status);
            }
        }
    }
}

/// Blocks until `pid` reaches a terminal state. Termination by signal maps
/// to the conventional 128+signo.
pub(crate) fn wait_for(pid: Pid) -> io::Result<i32> {
    loop {
        match waitpid(pid, None).map_err(io::Error::from)? {
            WaitStatus::Exited(_, code) => return Ok(code),
            WaitStatus::Signaled(_, signal, _) => return Ok(128 + signal as i32),
            _ => continue,
        }
    }
}
