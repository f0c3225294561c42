/// A line typed by the user while the tracker runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Check,
    Task(String),
    NewSubmission,
    Help,
    Quit,
    Unknown(String),
}

/// Returns `None` for blank lines.
pub fn parse(line: &str) -> Option<Command> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };
    let command = match word.to_ascii_lowercase().as_str() {
        "" => return None,
        "c" | "check" => Command::Check,
        "t" | "task" => Command::Task(rest.to_string()),
        "n" | "new" | "reset" => Command::NewSubmission,
        "h" | "help" | "?" => Command::Help,
        "q" | "quit" | "exit" => Command::Quit,
        _ => Command::Unknown(word.to_string()),
    };
    Some(command)
}

pub const HELP: &str = "\
Commands:
  c, check        check the current task again now
  t, task <id>    start tracking another task
  n, new          forget the current task (new submission)
  q, quit         exit";
