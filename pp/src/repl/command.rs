//! Slash command parsing

/// A parsed line of REPL input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    /// Analyze a goal description; bare text is treated the same way
    Analyze(String),
    /// Set preferences, from a file or interactively
    Prefs(Option<String>),
    Goals,
    /// Schedule a goal; `None` picks the most recently analyzed one
    Schedule { goal: Option<String>, days: Option<u32> },
    Show,
    Status,
    Help,
    Quit,
    Unknown(String),
}

impl ReplCommand {
    /// Parse one trimmed, non-empty input line
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        if !input.starts_with('/') {
            return Self::Analyze(input.to_string());
        }

        let (cmd, rest) = match input.split_once(char::is_whitespace) {
            Some((cmd, rest)) => (cmd, rest.trim()),
            None => (input, ""),
        };

        match cmd {
            "/analyze" | "/a" => Self::Analyze(rest.to_string()),
            "/prefs" | "/p" => Self::Prefs((!rest.is_empty()).then(|| rest.to_string())),
            "/goals" | "/g" => Self::Goals,
            "/schedule" | "/s" => parse_schedule(rest),
            "/show" => Self::Show,
            "/status" => Self::Status,
            "/help" | "/h" => Self::Help,
            "/quit" | "/q" | "/exit" => Self::Quit,
            _ => Self::Unknown(cmd.to_string()),
        }
    }
}

// Goal names may contain spaces, so only a trailing integer is read as days.
fn parse_schedule(rest: &str) -> ReplCommand {
    let mut goal = rest;
    let mut days = None;

    if let Some((head, last)) = rest.rsplit_once(char::is_whitespace) {
        if let Ok(n) = last.parse::<u32>() {
            goal = head.trim();
            days = Some(n);
        }
    } else if let Ok(n) = rest.parse::<u32>() {
        goal = "";
        days = Some(n);
    }

    ReplCommand::Schedule {
        goal: (!goal.is_empty()).then(|| goal.to_string()),
        days,
    }
}
