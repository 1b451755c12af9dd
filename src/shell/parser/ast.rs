/// Direction of an I/O redirection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectKind {
    In,  // <
    Out, // >
}

/// A parsed command line. Each node owns its subtrees outright; the tree is
/// built once by the parser and consumed by the executor.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// argv[0] is the program name. Empty argv only occurs for a blank
    /// line and is rejected by the executor before any fork.
    Simple { argv: Vec<String> },
    /// left's stdout feeds right's stdin.
    Pipe {
        left: Box<Command>,
        right: Box<Command>,
    },
    /// Rebinds inner's stdin (In) or stdout (Out) to the named file.
    Redirect {
        kind: RedirectKind,
        inner: Box<Command>,
        path: String,
    },
}
