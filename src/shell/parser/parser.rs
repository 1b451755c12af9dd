use super::ast::{Command, RedirectKind};
use super::lexer;

fn is_symbol(b: u8) -> bool {
    matches!(b, b'|' | b'<' | b'>')
}

/// Parses one command line into a `Command` tree.
///
/// The scan runs left to right, accumulating a pending segment until it hits
/// an operator. `<`/`>` wrap the segment (or the node already built for it)
/// in a `Redirect`; `|` hands the rest of the line to a recursive call, so a
/// pipeline associates to the right: `a|b|c` is `a | (b | c)`. Double-quoted
/// spans are opaque to this scan, which is what keeps `"a|b"` a single word.
pub fn parse(line: &str) -> Result<Command, String> {
    let line = line.trim();
    let bytes = line.as_bytes();
    let mut built: Option<Command> = None;
    let mut seg_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'"' => match bytes[i + 1..].iter().position(|&b| b == b'"') {
                Some(off) => i += off + 2,
                None => return Err(String::from("unclosed quote")),
            },
            b'<' | b'>' => {
                let kind = if bytes[i] == b'<' {
                    RedirectKind::In
                } else {
                    RedirectKind::Out
                };
                let inner = match built.take() {
                    Some(node) => node,
                    None => simple(&line[seg_start..i])?,
                };
                // the filename runs to the next operator or end of line
                let mut j = i + 1;
                while j < bytes.len() && !is_symbol(bytes[j]) {
                    j += 1;
                }
                let path = line[i + 1..j].trim();
                if path.is_empty() {
                    return Err(String::from("missing redirection target"));
                }
                built = Some(Command::Redirect {
                    kind,
                    inner: Box::new(inner),
                    path: path.to_string(),
                });
                seg_start = j;
                i = j;
            }
            b'|' => {
                let right = parse(&line[i + 1..])?;
                let left = match built.take() {
                    Some(node) => node,
                    None => simple(&line[seg_start..i])?,
                };
                return Ok(Command::Pipe {
                    left: Box::new(left),
                    right: Box::new(right),
                });
            }
            _ => i += 1,
        }
    }

    match built {
        Some(node) => Ok(node),
        None => simple(&line[seg_start..]),
    }
}

fn simple(segment: &str) -> Result<Command, String> {
    let argv = lexer::tokenize(segment.trim())?;
    Ok(Command::Simple { argv })
}
