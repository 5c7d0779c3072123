// ---------------------------------------------------------------------------
// Command
// ---------------------------------------------------------------------------

use micrographia_core::GramFilter;

/// A parsed, validated `:` command ready to be executed by the app shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Quit,
    // Toggle the help popup
    Help,
    // Run a name search with the current filter
    Search(String),
    // Set the Gram filter used by the next search
    Filter(GramFilter),
    // Open the detail panel for a taxonomy identifier
    Detail(String),
    Compare,
    // Empty the comparison selection
    Clear,
    Theme(String),
}

impl Command {
    /// Parse a raw command string (the text after the `:` prefix).
    ///
    /// Returns `Ok(cmd)` on success, `Err(message)` on failure. An empty
    /// string returns `Err("")` as a sentinel meaning "close without acting".
    pub fn parse(input: &str) -> Result<Command, String> {
        let input = input.trim();
        if input.is_empty() {
            return Err(String::new());
        }

        let (word, rest) = input
            .split_once(char::is_whitespace)
            .map(|(w, r)| (w, r.trim()))
            .unwrap_or((input, ""));

        match word {
            "q" | "quit" => Ok(Command::Quit),
            "help" => Ok(Command::Help),
            "compare" => Ok(Command::Compare),
            "clear" => Ok(Command::Clear),
            "search" | "s" => {
                if rest.is_empty() {
                    Err("usage: search <name>".to_string())
                } else {
                    Ok(Command::Search(rest.to_string()))
                }
            }
            "filter" => rest
                .parse::<GramFilter>()
                .map(Command::Filter)
                .map_err(|_| "usage: filter <any|positive|negative>".to_string()),
            "detail" | "d" => {
                if rest.is_empty() || rest.contains(char::is_whitespace) {
                    Err("usage: detail <tax_id>".to_string())
                } else {
                    Ok(Command::Detail(rest.to_string()))
                }
            }
            "theme" => {
                if rest.is_empty() {
                    Err("usage: theme <default|gruvbox>".to_string())
                } else {
                    Ok(Command::Theme(rest.to_string()))
                }
            }
            other => Err(format!("unknown command: {other}")),
        }
    }
}
