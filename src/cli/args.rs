//! Command-line argument parsing for the spherag CLI.
//!
//! The grammar is small enough that it is parsed by hand: one subcommand,
//! its positional argument, then flags.

use thiserror::Error;

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    /// Authenticate and store the token
    Login {
        username: String,
        password: Option<String>,
    },
    /// Forget the stored token
    Logout,
    /// List farms
    Farms { search: Option<String>, all: bool },
    /// List the devices of one farm
    Devices {
        system_id: i64,
        search: Option<String>,
        all: bool,
    },
    /// Show one device
    Device { imei: String },
    /// Run the TUI application (default)
    Tui,
    Version,
    Help,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ArgsError {
    #[error("unknown command '{0}'")]
    UnknownCommand(String),

    #[error("'{command}' needs a {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },

    #[error("'{0}' needs a value")]
    MissingValue(String),

    #[error("unexpected argument '{0}'")]
    UnexpectedArgument(String),

    #[error("'{0}' is not a farm id")]
    InvalidSystemId(String),
}

pub const USAGE: &str = "\
Usage: spherag [COMMAND]

Commands:
  login <username> [--password <pw>]      Sign in (prompts for the password)
  logout                                  Forget the stored token
  farms [--search <q>] [--all]            List farms
  devices <farm-id> [--search <q>] [--all]  List the devices of a farm
  device <imei>                           Show one device
  tui                                     Interactive terminal UI (default)

Options:
  -V, --version    Print version
  -h, --help       Print this help

Environment:
  SPHERAG_PASSWORD, SPHERAG_API_URL, SPHERAG_AUTH_URL,
  SPHERAG_TIMEOUT_SECS, SPHERAG_LOG";

/// Flags understood by some command: long name, short name, takes a value.
const FLAGS: &[(&str, &str, bool)] = &[
    ("--password", "-p", true),
    ("--search", "-s", true),
    ("--all", "-a", false),
];

/// Subcommands: name, required positional argument, accepted flags.
const COMMANDS: &[(&str, Option<&str>, &[&str])] = &[
    ("tui", None, &[]),
    ("logout", None, &[]),
    ("login", Some("username"), &["--password"]),
    ("farms", None, &["--search", "--all"]),
    ("devices", Some("farm id"), &["--search", "--all"]),
    ("device", Some("IMEI"), &[]),
];

#[derive(Debug, Default)]
struct Collected {
    positional: Vec<String>,
    password: Option<String>,
    search: Option<String>,
    all: bool,
}

/// Parse command-line arguments, program name included.
///
/// ```
/// use spherag::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["spherag".to_string(), "device".to_string(), "8600".to_string()];
/// assert_eq!(
///     parse_args(args.into_iter()),
///     Ok(CliCommand::Device { imei: "8600".to_string() })
/// );
/// ```
pub fn parse_args<I>(args: I) -> Result<CliCommand, ArgsError>
where
    I: Iterator<Item = String>,
{
    let mut args = args.skip(1);
    let Some(command) = args.next() else {
        return Ok(CliCommand::Tui);
    };
    match command.as_str() {
        "--version" | "-V" => return no_more(args, CliCommand::Version),
        "--help" | "-h" | "help" => return no_more(args, CliCommand::Help),
        _ => {}
    }

    let &(name, argument, allowed) = COMMANDS
        .iter()
        .find(|(name, _, _)| *name == command)
        .ok_or_else(|| ArgsError::UnknownCommand(command.clone()))?;
    let mut collected = collect(args, allowed)?;
    let mut positional = std::mem::take(&mut collected.positional).into_iter();
    let target = match argument {
        Some(argument) => Some(positional.next().ok_or(ArgsError::MissingArgument {
            command: name,
            argument,
        })?),
        None => None,
    };
    if let Some(extra) = positional.next() {
        return Err(ArgsError::UnexpectedArgument(extra));
    }
    let target = target.unwrap_or_default();

    Ok(match name {
        "logout" => CliCommand::Logout,
        "login" => CliCommand::Login {
            username: target,
            password: collected.password,
        },
        "farms" => CliCommand::Farms {
            search: collected.search,
            all: collected.all,
        },
        "devices" => CliCommand::Devices {
            system_id: target
                .parse()
                .map_err(|_| ArgsError::InvalidSystemId(target.clone()))?,
            search: collected.search,
            all: collected.all,
        },
        "device" => CliCommand::Device { imei: target },
        _ => CliCommand::Tui,
    })
}

fn no_more<I>(mut args: I, command: CliCommand) -> Result<CliCommand, ArgsError>
where
    I: Iterator<Item = String>,
{
    match args.next() {
        Some(extra) => Err(ArgsError::UnexpectedArgument(extra)),
        None => Ok(command),
    }
}

/// Split the rest of the line into positionals and the flags in `allowed`.
fn collect<I>(mut args: I, allowed: &[&str]) -> Result<Collected, ArgsError>
where
    I: Iterator<Item = String>,
{
    let mut collected = Collected::default();
    while let Some(arg) = args.next() {
        let flag = FLAGS
            .iter()
            .find(|(long, short, _)| arg == *long || arg == *short);
        let Some(&(long, _, takes_value)) = flag else {
            if arg.starts_with('-') {
                return Err(ArgsError::UnexpectedArgument(arg));
            }
            collected.positional.push(arg);
            continue;
        };
        if !allowed.contains(&long) {
            return Err(ArgsError::UnexpectedArgument(arg));
        }
        let value = if takes_value {
            Some(args.next().ok_or_else(|| ArgsError::MissingValue(arg.clone()))?)
        } else {
            None
        };
        match long {
            "--password" => collected.password = value,
            "--search" => collected.search = value,
            _ => collected.all = true,
        }
    }
    Ok(collected)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<CliCommand, ArgsError> {
        let mut full = vec!["spherag".to_string()];
        full.extend(args.iter().map(|a| a.to_string()));
        parse_args(full.into_iter())
    }

    #[test]
    fn test_parse_no_args_runs_tui() {
        assert_eq!(parse(&[]), Ok(CliCommand::Tui));
        assert_eq!(parse(&["tui"]), Ok(CliCommand::Tui));
    }

    #[test]
    fn test_parse_version_and_help() {
        assert_eq!(parse(&["--version"]), Ok(CliCommand::Version));
        assert_eq!(parse(&["-V"]), Ok(CliCommand::Version));
        assert_eq!(parse(&["-h"]), Ok(CliCommand::Help));
    }

    #[test]
    fn test_parse_login() {
        assert_eq!(
            parse(&["login", "ana"]),
            Ok(CliCommand::Login {
                username: "ana".to_string(),
                password: None
            })
        );
        assert_eq!(
            parse(&["login", "ana", "--password", "s3cret"]),
            Ok(CliCommand::Login {
                username: "ana".to_string(),
                password: Some("s3cret".to_string())
            })
        );
        assert_eq!(
            parse(&["login"]),
            Err(ArgsError::MissingArgument {
                command: "login",
                argument: "username"
            })
        );
        assert_eq!(
            parse(&["login", "ana", "--password"]),
            Err(ArgsError::MissingValue("--password".to_string()))
        );
    }

    #[test]
    fn test_parse_farms_flags() {
        assert_eq!(
            parse(&["farms"]),
            Ok(CliCommand::Farms {
                search: None,
                all: false
            })
        );
        assert_eq!(
            parse(&["farms", "--all", "--search", "Finca"]),
            Ok(CliCommand::Farms {
                search: Some("Finca".to_string()),
                all: true
            })
        );
    }

    #[test]
    fn test_parse_flags_before_positional() {
        assert_eq!(
            parse(&["devices", "--all", "7"]),
            Ok(CliCommand::Devices {
                system_id: 7,
                search: None,
                all: true
            })
        );
    }

    #[test]
    fn test_parse_devices() {
        assert_eq!(
            parse(&["devices", "42", "-s", "Pozo"]),
            Ok(CliCommand::Devices {
                system_id: 42,
                search: Some("Pozo".to_string()),
                all: false
            })
        );
        assert_eq!(
            parse(&["devices", "forty-two"]),
            Err(ArgsError::InvalidSystemId("forty-two".to_string()))
        );
    }

    #[test]
    fn test_parse_rejects_unknown_and_extra() {
        assert_eq!(
            parse(&["sync"]),
            Err(ArgsError::UnknownCommand("sync".to_string()))
        );
        assert_eq!(
            parse(&["logout", "now"]),
            Err(ArgsError::UnexpectedArgument("now".to_string()))
        );
        assert_eq!(
            parse(&["farms", "--bogus"]),
            Err(ArgsError::UnexpectedArgument("--bogus".to_string()))
        );
        assert_eq!(
            parse(&["device", "8600", "--all"]),
            Err(ArgsError::UnexpectedArgument("--all".to_string()))
        );
    }
}
