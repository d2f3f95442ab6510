use minilisp::environment::EnvWeak;
use minilisp::syntax::{Operators, KEYWORDS};
use rustyline::{
    self, completion::Completer, highlight::Highlighter, hint::Hinter, validate::Validator,
    Context, Helper,
};

/// Tab completion over keywords, operators and everything bound in the
/// session's environment.
pub struct EnvHelper {
    env: EnvWeak,
    operators: Vec<String>,
}

impl EnvHelper {
    pub fn new(env: EnvWeak, operators: &Operators) -> Self {
        EnvHelper {
            env,
            operators: operators.symbols().map(str::to_string).collect(),
        }
    }

    fn candidates(&self, prefix: &str) -> Vec<String> {
        let mut names: Vec<String> = KEYWORDS
            .iter()
            .map(|k| k.to_string())
            .chain(self.operators.iter().cloned())
            .collect();

        if let Some(env) = self.env.upgrade() {
            names.extend(env.borrow().all_keys().map(|key| key.name().to_string()));
        }

        names.retain(|name| name.starts_with(prefix));
        names.sort();
        names.dedup();
        names
    }
}

impl Helper for EnvHelper {}

impl Hinter for EnvHelper {
    fn hint(&self, _line: &str, _pos: usize, _ctx: &Context) -> Option<String> {
        None
    }
}

impl Highlighter for EnvHelper {}

impl Validator for EnvHelper {}

impl Completer for EnvHelper {
    type Candidate = String;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context,
    ) -> rustyline::Result<(usize, Vec<Self::Candidate>)> {
        let start = symbol_start(line, pos);
        Ok((start, self.candidates(&line[start..pos])))
    }
}

/// Byte offset where the symbol under the cursor begins.
fn symbol_start(line: &str, pos: usize) -> usize {
    line[..pos]
        .rfind(|ch: char| ch.is_whitespace() || "(){};'".contains(ch))
        .map_or(0, |idx| idx + 1)
}
