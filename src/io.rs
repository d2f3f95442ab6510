use crate::completer::EnvHelper;
use minilisp::errors::Result;
use rustyline::Editor;

pub trait LineReader {
    fn read_line(&mut self, prompt: &str) -> Result<String>;
}

pub struct ReplInput {
    rl: Editor<EnvHelper>,
}

impl ReplInput {
    pub fn new(helper: EnvHelper) -> Self {
        let mut rl = Editor::new();
        rl.set_helper(Some(helper));
        ReplInput { rl }
    }

    pub fn set_helper(&mut self, helper: EnvHelper) {
        self.rl.set_helper(Some(helper));
    }
}

impl LineReader for ReplInput {
    fn read_line(&mut self, prompt: &str) -> Result<String> {
        let line = self.rl.readline(prompt)?;
        self.rl.add_history_entry(line.as_str());
        Ok(line + "\n")
    }
}
