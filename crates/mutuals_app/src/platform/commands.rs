use mutuals_core::ActionKind;

pub const HELP: &[&str] = &[
    "Commands:",
    "  check [user]      compare followers and following (defaults to the last user)",
    "  follow <login>    follow back someone who follows you",
    "  unfollow <login>  stop following someone who doesn't follow you back",
    "  list              show the current lists and action status",
    "  help              show this help",
    "  quit              exit",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserCommand {
    Check(Option<String>),
    Act { login: String, kind: ActionKind },
    List,
    Help,
    Quit,
}

/// Parses one input line. Blank lines yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<UserCommand>, String> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(None);
    };
    let argument = words.next().map(ToOwned::to_owned);
    if words.next().is_some() {
        return Err(format!("too many arguments for `{verb}`"));
    }

    let command = match (verb.to_ascii_lowercase().as_str(), argument) {
        ("check", user) => UserCommand::Check(user),
        ("follow", Some(login)) => UserCommand::Act {
            login,
            kind: ActionKind::Follow,
        },
        ("unfollow", Some(login)) => UserCommand::Act {
            login,
            kind: ActionKind::Unfollow,
        },
        ("follow" | "unfollow", None) => return Err(format!("usage: {verb} <login>")),
        ("list" | "ls", None) => UserCommand::List,
        ("help" | "?", None) => UserCommand::Help,
        ("quit" | "exit" | "q", None) => UserCommand::Quit,
        _ => return Err(format!("unknown command `{}`; type `help`", line.trim())),
    };
    Ok(Some(command))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_actions_keeping_login_case() {
        assert_eq!(
            parse_command("  Follow OctoCat "),
            Ok(Some(UserCommand::Act {
                login: "OctoCat".to_string(),
                kind: ActionKind::Follow,
            }))
        );
        assert_eq!(
            parse_command("unfollow c"),
            Ok(Some(UserCommand::Act {
                login: "c".to_string(),
                kind: ActionKind::Unfollow,
            }))
        );
    }

    #[test]
    fn check_takes_an_optional_user() {
        assert_eq!(parse_command("check"), Ok(Some(UserCommand::Check(None))));
        assert_eq!(
            parse_command("check me"),
            Ok(Some(UserCommand::Check(Some("me".to_string()))))
        );
    }

    #[test]
    fn blank_and_invalid_lines() {
        assert_eq!(parse_command("   "), Ok(None));
        assert!(parse_command("follow").is_err());
        assert!(parse_command("list everything").is_err());
        assert!(parse_command("follow a b").is_err());
        assert!(parse_command("dance").is_err());
        assert_eq!(parse_command("q"), Ok(Some(UserCommand::Quit)));
    }
}
