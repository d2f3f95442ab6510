//! Single-pass recursive descent reader.
//!
//! Lexing and structural parsing happen in the same pass: every call to
//! [`read`] consumes exactly one form starting at a byte offset and reports
//! where the next form may begin, so one buffer can be drained form by form.

use crate::errors::*;
use crate::symbol::Symbol;

/// Untyped S-expression structure, as produced by the reader.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    List(Vec<Token>),
    Symbol(Symbol),
    Integer(i64),
    Bool(bool),
    Quote(Box<Token>),
}

impl Token {
    pub fn symbol(name: &str) -> Self {
        Token::Symbol(Symbol::new(name))
    }

    pub fn as_symbol(&self) -> Option<&Symbol> {
        match self {
            Token::Symbol(s) => Some(s),
            _ => None,
        }
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Token::List(items) => {
                let tmp: Vec<_> = items.iter().map(|item| format!("{}", item)).collect();
                write!(f, "({})", tmp.join(" "))
            }
            Token::Symbol(s) => write!(f, "{}", s),
            Token::Integer(i) => write!(f, "{}", i),
            Token::Bool(true) => write!(f, "#t"),
            Token::Bool(false) => write!(f, "#f"),
            Token::Quote(inner) => write!(f, "'{}", inner),
        }
    }
}

/// Read one form starting at byte offset `pos`.
///
/// Returns the form together with the offset just past it. Leading
/// whitespace and comments are skipped; if nothing but those remain the
/// result is `UnexpectedEof`.
pub fn read(input: &str, pos: usize) -> Result<(Token, usize)> {
    let start = skip_whitespace(input, pos);
    match input.as_bytes().get(start) {
        None => Err(ErrorKind::UnexpectedEof)?,
        Some(b'(') => read_list(input, start),
        Some(ch) if ch.is_ascii_digit() => read_integer(input, start),
        Some(b'#') => Ok(read_bool(input, start)),
        Some(b'\'') => {
            let (quoted, next) = read(input, start + 1)?;
            Ok((Token::Quote(Box::new(quoted)), next))
        }
        Some(&ch) if is_delimiter(ch) => Err(ErrorKind::UnexpectedChar(ch as char))?,
        Some(_) => Ok(read_symbol(input, start)),
    }
}

/// Read every form in `input`, failing on the first malformed one.
pub fn read_all(input: &str) -> Result<Vec<Token>> {
    Reader::new(input).collect()
}

/// Iterator over the top-level forms of a buffer.
///
/// Stops after the first error, since the reader has no way to resynchronize
/// inside a malformed form.
pub struct Reader<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Reader<'a> {
    pub fn new(input: &'a str) -> Self {
        Reader { input, pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }
}

impl<'a> Iterator for Reader<'a> {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        self.pos = skip_whitespace(self.input, self.pos);
        if self.pos >= self.input.len() {
            return None;
        }
        match read(self.input, self.pos) {
            Ok((token, next)) => {
                self.pos = next;
                Some(Ok(token))
            }
            Err(e) => {
                self.pos = self.input.len();
                Some(Err(e))
            }
        }
    }
}

fn read_list(input: &str, start: usize) -> Result<(Token, usize)> {
    let mut items = vec![];
    let mut pos = start + 1;
    loop {
        pos = skip_whitespace(input, pos);
        match input.as_bytes().get(pos) {
            None => return Err(ErrorKind::UnterminatedList)?,
            Some(b')') => return Ok((Token::List(items), pos + 1)),
            Some(_) => {
                let (item, next) = read(input, pos).map_err(|e| {
                    if matches!(e.kind(), ErrorKind::UnexpectedEof) {
                        ErrorKind::UnterminatedList.into()
                    } else {
                        e
                    }
                })?;
                items.push(item);
                pos = next;
            }
        }
    }
}

fn read_integer(input: &str, start: usize) -> Result<(Token, usize)> {
    let end = scan_while(input, start, |ch| ch.is_ascii_digit());
    let digits = &input[start..end];
    match digits.parse() {
        Ok(i) => Ok((Token::Integer(i), end)),
        Err(_) => Err(ErrorKind::IntegerOverflow(digits.to_string()))?,
    }
}

// `#t` is true, `#` followed by anything else (or nothing) is false.
fn read_bool(input: &str, start: usize) -> (Token, usize) {
    let next = input[start + 1..].chars().next();
    let width = next.map_or(0, char::len_utf8);
    (Token::Bool(next == Some('t')), start + 1 + width)
}

fn read_symbol(input: &str, start: usize) -> (Token, usize) {
    let end = scan_while(input, start, |ch| {
        !ch.is_ascii_whitespace() && !is_delimiter(ch)
    });
    (Token::symbol(&input[start..end]), end)
}

fn scan_while(input: &str, start: usize, pred: impl Fn(u8) -> bool) -> usize {
    input.as_bytes()[start..]
        .iter()
        .position(|&ch| !pred(ch))
        .map_or(input.len(), |n| start + n)
}

/// Skip whitespace and `;` line comments.
fn skip_whitespace(input: &str, mut pos: usize) -> usize {
    let bytes = input.as_bytes();
    while let Some(&ch) = bytes.get(pos) {
        if ch.is_ascii_whitespace() {
            pos += 1;
        } else if ch == b';' {
            pos = scan_while(input, pos, |ch| ch != b'\n');
        } else {
            break;
        }
    }
    pos
}

fn is_delimiter(ch: u8) -> bool {
    match ch {
        b'(' | b')' | b'{' | b'}' | b';' => true,
        _ => false,
    }
}
