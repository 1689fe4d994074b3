//! Comment and literal blanking.
//!
//! Blanked characters become spaces of the same UTF-8 width and newlines are
//! kept, so byte offsets line up between the original text and every
//! stripped variant of it.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Code,
    LineComment,
    BlockComment,
    Quoted(char),
    Template,
}

/// Blank `//` and `/* */` comments; string and template literals are kept.
pub fn strip_comments(source: &str) -> String {
    strip(source, false)
}

/// Blank comments and the contents of string and template literals.
///
/// Quote characters and `${ ... }` interpolations stay in place.
pub fn strip_comments_and_literals(source: &str) -> String {
    strip(source, true)
}

fn blank(out: &mut String, c: char) {
    if c == '\n' || c == '\r' {
        out.push(c);
    } else {
        out.extend(std::iter::repeat_n(' ', c.len_utf8()));
    }
}

fn strip(source: &str, blank_literals: bool) -> String {
    let mut out = String::with_capacity(source.len());
    let mut chars = source.chars().peekable();
    let mut state = State::Code;
    // Open brace depth inside each `${` interpolation, innermost last.
    let mut interpolations: Vec<usize> = Vec::new();

    let literal = |out: &mut String, c: char| {
        if blank_literals {
            blank(out, c);
        } else {
            out.push(c);
        }
    };

    while let Some(c) = chars.next() {
        match state {
            State::Code => match c {
                '/' if chars.peek() == Some(&'/') => {
                    chars.next();
                    out.push_str("  ");
                    state = State::LineComment;
                }
                '/' if chars.peek() == Some(&'*') => {
                    chars.next();
                    out.push_str("  ");
                    state = State::BlockComment;
                }
                '"' | '\'' => {
                    out.push(c);
                    state = State::Quoted(c);
                }
                '`' => {
                    out.push(c);
                    state = State::Template;
                }
                '{' => {
                    if let Some(depth) = interpolations.last_mut() {
                        *depth += 1;
                    }
                    out.push(c);
                }
                '}' => {
                    out.push(c);
                    match interpolations.last().copied() {
                        Some(0) => {
                            interpolations.pop();
                            state = State::Template;
                        }
                        Some(_) => {
                            if let Some(depth) = interpolations.last_mut() {
                                *depth -= 1;
                            }
                        }
                        None => {}
                    }
                }
                _ => out.push(c),
            },
            State::LineComment => {
                if c == '\n' {
                    out.push(c);
                    state = State::Code;
                } else {
                    blank(&mut out, c);
                }
            }
            State::BlockComment => {
                if c == '*' && chars.peek() == Some(&'/') {
                    chars.next();
                    out.push_str("  ");
                    state = State::Code;
                } else {
                    blank(&mut out, c);
                }
            }
            State::Quoted(quote) => {
                if c == '\\' {
                    literal(&mut out, c);
                    if let Some(next) = chars.next() {
                        literal(&mut out, next);
                    }
                } else if c == quote {
                    out.push(c);
                    state = State::Code;
                } else if c == '\n' {
                    // Unterminated string; recover at end of line.
                    out.push(c);
                    state = State::Code;
                } else {
                    literal(&mut out, c);
                }
            }
            State::Template => {
                if c == '\\' {
                    literal(&mut out, c);
                    if let Some(next) = chars.next() {
                        literal(&mut out, next);
                    }
                } else if c == '`' {
                    out.push(c);
                    state = State::Code;
                } else if c == '$' && chars.peek() == Some(&'{') {
                    chars.next();
                    out.push_str("${");
                    interpolations.push(0);
                    state = State::Code;
                } else {
                    literal(&mut out, c);
                }
            }
        }
    }

    out
}
