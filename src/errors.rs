use crate::symbol::Symbol;
use rustyline::error::ReadlineError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum ErrorKind {
    Arity { expected: usize, found: usize },
    DivisionByZero,
    IntegerOverflow(String),
    NotCallable(String),
    Syntax(String),
    TypeError(String),
    UnboundSymbol(Symbol),
    UnexpectedChar(char),
    UnexpectedEof,
    UnterminatedList,

    Io(std::io::Error),
    Readline(ReadlineError),
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use ErrorKind::*;
        match self {
            Arity { expected, found } => write!(
                f,
                "Arity Error: expected {} argument(s) but got {}",
                expected, found
            ),
            DivisionByZero => write!(f, "Division by zero"),
            IntegerOverflow(what) => write!(f, "Integer overflow: {}", what),
            NotCallable(repr) => write!(f, "Not callable: {}", repr),
            Syntax(msg) => write!(f, "Syntax Error: {}", msg),
            TypeError(msg) => write!(f, "Type Error: {}", msg),
            UnboundSymbol(symbol) => write!(f, "Unbound symbol: {}", symbol),
            UnexpectedChar(ch) => write!(f, "Unexpected character '{}'", ch),
            UnexpectedEof => write!(f, "Unexpected end of input"),
            UnterminatedList => write!(f, "Unterminated list: missing ')'"),
            Io(e) => write!(f, "IO Error: {}", e),
            Readline(e) => write!(f, "Readline Error: {}", e),
        }
    }
}

// the context trail is stored innermost first
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    context: Vec<String>,
}

impl Error {
    pub fn new(kind: ErrorKind) -> Self {
        Error {
            kind,
            context: vec![],
        }
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn context(&self) -> &[String] {
        &self.context
    }

    pub fn with_context(mut self, repr: impl Into<String>) -> Self {
        self.context.push(repr.into());
        self
    }

    /// True for the errors a reader reports when the input simply stopped
    /// too early, i.e. more input could still complete the form.
    pub fn is_incomplete_input(&self) -> bool {
        match self.kind {
            ErrorKind::UnterminatedList | ErrorKind::UnexpectedEof => true,
            _ => false,
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        if !self.context.is_empty() {
            writeln!(f, "Context:")?;
        }
        for x in self.context.iter().rev() {
            if x.chars().count() > 75 {
                let short: String = x.chars().take(70).collect();
                writeln!(f, "    {} ...", short)?;
            } else {
                writeln!(f, "    {}", x)?;
            }
        }
        write!(f, "{}", self.kind)
    }
}

impl std::error::Error for Error {}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error::new(kind)
    }
}

impl From<std::io::Error> for Error {
    fn from(ioe: std::io::Error) -> Self {
        Error::new(ErrorKind::Io(ioe))
    }
}

impl From<ReadlineError> for Error {
    fn from(rle: ReadlineError) -> Self {
        Error::new(ErrorKind::Readline(rle))
    }
}
