#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    SetUrl(String),
    Calculate,
    /// Bare URL: set it and calculate in one step.
    Submit(String),
    Reset,
    Export,
    Show,
    Help,
    Quit,
    Empty,
}

pub const HELP: &str = "\
commands:
  <url>            set the URL and calculate
  url <value>      set the URL without calculating
  calc             calculate the current URL
  show             print the current state
  export           save the current report as PDF
  reset            clear URL, score and logo
  quit             leave";

pub fn parse_command(line: &str) -> ConsoleCommand {
    let line = line.trim();
    let (head, rest) = match line.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (line, ""),
    };

    match (head.to_ascii_lowercase().as_str(), rest) {
        ("", _) => ConsoleCommand::Empty,
        ("url", value) => ConsoleCommand::SetUrl(value.to_string()),
        ("calc" | "calculate", "") => ConsoleCommand::Calculate,
        ("reset", "") => ConsoleCommand::Reset,
        ("export", "") => ConsoleCommand::Export,
        ("show", "") => ConsoleCommand::Show,
        ("help" | "?", "") => ConsoleCommand::Help,
        ("quit" | "exit", "") => ConsoleCommand::Quit,
        _ => ConsoleCommand::Submit(line.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("", ConsoleCommand::Empty)]
    #[case("   ", ConsoleCommand::Empty)]
    #[case("calc", ConsoleCommand::Calculate)]
    #[case("Calculate", ConsoleCommand::Calculate)]
    #[case("reset", ConsoleCommand::Reset)]
    #[case("export", ConsoleCommand::Export)]
    #[case("show", ConsoleCommand::Show)]
    #[case("?", ConsoleCommand::Help)]
    #[case("exit", ConsoleCommand::Quit)]
    #[case("url https://example.com", ConsoleCommand::SetUrl("https://example.com".into()))]
    #[case("url", ConsoleCommand::SetUrl(String::new()))]
    #[case("https://example.com", ConsoleCommand::Submit("https://example.com".into()))]
    #[case("  https://example.com  ", ConsoleCommand::Submit("https://example.com".into()))]
    #[case("reset now", ConsoleCommand::Submit("reset now".into()))]
    fn parses(#[case] line: &str, #[case] expected: ConsoleCommand) {
        assert_eq!(parse_command(line), expected);
    }
}
