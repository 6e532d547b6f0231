use memchr::{memchr, memchr2};

use crate::captures::Captures;

/// The replacement-template grammar used when expanding a replacement
/// string against a match.
///
/// Which grammar applies is a property of the pattern's syntax flavor, and
/// is selected once when the owning [`Regex`](crate::Regex) is built. The
/// escape table of each grammar is independently authoritative; in
/// particular the two backslash grammars preserve a backslash before an
/// unrecognized escape target, while the Java grammar drops it.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TemplateSyntax {
    /// Python style references: `\1`, `\g<name>`, `\g<2>`.
    Python,
    /// Ruby style references: `\1`, `\k<name>`, `\k<2>`.
    Ruby,
    /// Java style references: `$1`, `${name}`.
    Java,
}

impl Default for TemplateSyntax {
    fn default() -> TemplateSyntax {
        TemplateSyntax::Ruby
    }
}

/// A compiled replacement template.
///
/// A template is parsed once from a syntax-specific replacement string into
/// a sequence of literal and group-reference tokens, independent of any
/// particular match. It can then be replayed against any number of
/// [`Captures`] values via [`Template::expand`].
///
/// Templates are immutable after construction and can be shared freely
/// between threads.
#[derive(Clone, Debug)]
pub struct Template {
    tokens: Vec<Token>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
enum Token {
    Literal(String),
    Group(usize),
    NamedGroup(String),
}

impl Template {
    /// Compile the given replacement string under the given grammar.
    ///
    /// Malformed references — an unterminated `${name`/`\g<name`, a bare
    /// trailing escape, or (for the Java grammar) a `$` followed by neither
    /// a digit nor `{` — are compile errors. References to groups the
    /// pattern doesn't have are *not* errors; they expand to the empty
    /// string.
    pub fn new(
        syntax: TemplateSyntax,
        template: &str,
    ) -> Result<Template, TemplateError> {
        let tokens = match syntax {
            TemplateSyntax::Python => parse_backslash(template, b'g')?,
            TemplateSyntax::Ruby => parse_backslash(template, b'k')?,
            TemplateSyntax::Java => parse_dollar(template)?,
        };
        debug!(
            "compiled {:?} replacement template into {} tokens",
            syntax,
            tokens.len(),
        );
        Ok(Template { tokens })
    }

    /// Expand this template against the given captures, appending the
    /// result to `dst`.
    ///
    /// Numeric references past the pattern's group count and named
    /// references to unknown names expand to the empty string, matching the
    /// capture set's own "no match" convention.
    pub fn expand(&self, caps: &Captures<'_>, dst: &mut String) {
        for token in self.tokens.iter() {
            match *token {
                Token::Literal(ref literal) => dst.push_str(literal),
                Token::Group(index) => dst.push_str(caps.get(index)),
                Token::NamedGroup(ref name) => {
                    dst.push_str(caps.get_name(name))
                }
            }
        }
    }
}

/// Turns the content of a group reference into a token. Content that parses
/// as a decimal integer is a numeric reference; everything else is a name.
fn group_token(name: &str) -> Token {
    match name.parse::<usize>() {
        Ok(index) => Token::Group(index),
        Err(_) => Token::NamedGroup(name.to_string()),
    }
}

/// Pushes a pending literal run as a token, if there is one.
fn flush(tokens: &mut Vec<Token>, literal: &mut String) {
    if !literal.is_empty() {
        tokens.push(Token::Literal(core::mem::take(literal)));
    }
}

/// Parses the backslash grammar shared by the Python and Ruby flavors,
/// parameterized by the one-byte named-group introducer (`g` or `k`).
///
/// `\N` with a single digit refers to group N. `\<introducer><content>`
/// with the content delimited by `<`/`>` refers to a named or numbered
/// group. `\\` is a literal backslash. Any other escape target is emitted
/// with the backslash preserved, which is this grammar's convention for
/// unrecognized directives.
fn parse_backslash(
    template: &str,
    introducer: u8,
) -> Result<Vec<Token>, TemplateError> {
    let bytes = template.as_bytes();
    let mut tokens = vec![];
    let mut literal = String::new();
    let mut at = 0;
    while at < bytes.len() {
        let escape = match memchr(b'\\', &bytes[at..]) {
            None => {
                literal.push_str(&template[at..]);
                break;
            }
            Some(offset) => at + offset,
        };
        literal.push_str(&template[at..escape]);
        at = escape + 1;
        let ch = match template[at..].chars().next() {
            None => return Err(TemplateError::trailing_escape()),
            Some(ch) => ch,
        };
        if ch.is_ascii_digit() {
            flush(&mut tokens, &mut literal);
            tokens.push(Token::Group(ch as usize - '0' as usize));
            at += 1;
        } else if ch == char::from(introducer)
            && bytes.get(at + 1) == Some(&b'<')
        {
            let start = at + 2;
            let close = match memchr(b'>', &bytes[start..]) {
                None => return Err(TemplateError::unterminated_group_name()),
                Some(offset) => start + offset,
            };
            // Stray '<' bytes inside the reference carry no meaning and
            // are skipped.
            let name: String =
                template[start..close].chars().filter(|&c| c != '<').collect();
            flush(&mut tokens, &mut literal);
            tokens.push(group_token(&name));
            at = close + 1;
        } else if ch == '\\' {
            literal.push('\\');
            at += 1;
        } else {
            // Not a recognized directive: keep the backslash.
            literal.push('\\');
            literal.push(ch);
            at += ch.len_utf8();
        }
    }
    flush(&mut tokens, &mut literal);
    Ok(tokens)
}

/// Parses the Java grammar: `$N` with one or more consecutive digits refers
/// to group N, `${name}` refers to a named or numbered group, and `\`
/// escapes the next character literally (backslash dropped). Any other
/// `$`-prefixed construct is a syntax error.
fn parse_dollar(template: &str) -> Result<Vec<Token>, TemplateError> {
    let bytes = template.as_bytes();
    let mut tokens = vec![];
    let mut literal = String::new();
    let mut at = 0;
    while at < bytes.len() {
        let special = match memchr2(b'\\', b'$', &bytes[at..]) {
            None => {
                literal.push_str(&template[at..]);
                break;
            }
            Some(offset) => at + offset,
        };
        literal.push_str(&template[at..special]);
        at = special;
        if bytes[at] == b'\\' {
            at += 1;
            let ch = match template[at..].chars().next() {
                None => return Err(TemplateError::trailing_escape()),
                Some(ch) => ch,
            };
            literal.push(ch);
            at += ch.len_utf8();
            continue;
        }
        // '$'
        at += 1;
        match bytes.get(at) {
            None => return Err(TemplateError::incomplete_directive()),
            Some(&b'{') => {
                let start = at + 1;
                let close = match memchr(b'}', &bytes[start..]) {
                    None => {
                        return Err(TemplateError::unterminated_group_name())
                    }
                    Some(offset) => start + offset,
                };
                flush(&mut tokens, &mut literal);
                tokens.push(group_token(&template[start..close]));
                at = close + 1;
            }
            Some(&byte) if byte.is_ascii_digit() => {
                let start = at;
                while at < bytes.len() && bytes[at].is_ascii_digit() {
                    at += 1;
                }
                let number = &template[start..at];
                flush(&mut tokens, &mut literal);
                match number.parse::<usize>() {
                    Ok(index) => tokens.push(Token::Group(index)),
                    Err(_) => {
                        return Err(TemplateError::invalid_group_number(
                            number,
                        ))
                    }
                }
            }
            Some(_) => {
                // `at` sits right after the ASCII '$', so it is on a
                // character boundary.
                let got = match template[at..].chars().next() {
                    None => return Err(TemplateError::incomplete_directive()),
                    Some(ch) => ch,
                };
                return Err(TemplateError::bad_directive(got));
            }
        }
    }
    flush(&mut tokens, &mut literal);
    Ok(tokens)
}

/// An error that occurred while compiling a replacement template.
///
/// Missing groups are never a template error; only structurally malformed
/// templates are rejected.
#[derive(Clone, Debug)]
pub struct TemplateError {
    kind: TemplateErrorKind,
}

#[derive(Clone, Debug)]
enum TemplateErrorKind {
    /// The template ended with a bare escape character.
    TrailingEscape,
    /// A named-group reference was opened but its closing delimiter never
    /// appeared.
    UnterminatedGroupName,
    /// The template ended in the middle of a `$` directive.
    IncompleteDirective,
    /// A `$` directive was followed by a character that is neither a digit
    /// nor `{`.
    BadDirective { got: char },
    /// A numeric group reference did not fit in a group index.
    InvalidGroupNumber { number: String },
}

impl TemplateError {
    fn trailing_escape() -> TemplateError {
        TemplateError { kind: TemplateErrorKind::TrailingEscape }
    }

    fn unterminated_group_name() -> TemplateError {
        TemplateError { kind: TemplateErrorKind::UnterminatedGroupName }
    }

    fn incomplete_directive() -> TemplateError {
        TemplateError { kind: TemplateErrorKind::IncompleteDirective }
    }

    fn bad_directive(got: char) -> TemplateError {
        TemplateError { kind: TemplateErrorKind::BadDirective { got } }
    }

    fn invalid_group_number(number: &str) -> TemplateError {
        TemplateError {
            kind: TemplateErrorKind::InvalidGroupNumber {
                number: number.to_string(),
            },
        }
    }
}

impl std::error::Error for TemplateError {}

impl core::fmt::Display for TemplateError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        use self::TemplateErrorKind::*;

        match self.kind {
            TrailingEscape => {
                write!(f, "replacement template ends with a bare escape")
            }
            UnterminatedGroupName => {
                write!(f, "missing closing delimiter for group name in replacement template")
            }
            IncompleteDirective => {
                write!(f, "incomplete group reference at end of replacement template")
            }
            BadDirective { got } => {
                write!(f, "unexpected character {:?} after '$' in replacement template", got)
            }
            InvalidGroupNumber { ref number } => {
                write!(f, "invalid capture group number '{}' in replacement template", number)
            }
        }
    }
}
