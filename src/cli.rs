//! Command line parsing
//!
//! Arguments are scanned once, left to right. Help and logo listing end the
//! scan immediately, so anything after them is ignored.

use crate::error::ArgError;
use crate::logo::Logo;

/// Longest color code accepted by `--color`
pub const MAX_COLOR_LEN: usize = 7;

pub const GENERAL_HELP: &str = "\
usage: fastfetch <options>

   -h,           --help:              shows this message and exits
   -h <command>, --help <command>:    shows help for a specific command and exits
   -l <name>,    --logo <name>:       sets the shown logo. Also changes the main color accordingly
   -c <color>,   --color <color>:     sets the color of the keys. Must be a linux console color code
   -s <width>,   --seperator <width>: sets the distance between logo and text
                 --show-errors:       if an error occurs, show it instead of discarding the category
                 --list-logos:        lists the names of available logos and exits
                 --print-logos:       prints available logos and exits

Defaults can be set in $XDG_CONFIG_HOME/fastfetch/config.toml.
";

pub const COLOR_HELP: &str = "\
usage: fastfetch --color <color>

<color> must be a color encoding for linux terminals. It is inserted between \"ESC[\" and \"m\".
Infos about them can be found here: https://en.wikipedia.org/wiki/ANSI_escape_code#Colors.
Examples:
   \"--color 35\":    sets the color to pink
   \"--color 4;92\":  sets the color to bright Green with underline
   \"--color 5;104\": blinking text on a blue background
If no color is set, the main color of the logo will be used.
";

/// Settings taken from the command line. `None` means "not given".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    pub logo: Option<String>,
    /// Complete escape sequence, e.g. `\x1b[35m`
    pub color: Option<String>,
    pub separator: Option<i16>,
    pub show_errors: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HelpTopic {
    General,
    Command(String),
}

impl HelpTopic {
    pub fn text(&self) -> String {
        match self {
            HelpTopic::General => GENERAL_HELP.to_string(),
            HelpTopic::Command(command) => match command.as_str() {
                "c" | "-c" | "color" | "--color" => COLOR_HELP.to_string(),
                _ => format!("No specific help for command {} provided\n", command),
            },
        }
    }
}

/// What the process should do after parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Run(Options),
    Help(HelpTopic),
    ListLogos,
    PrintLogos,
}

/// Parse arguments, excluding the program name
pub fn parse_args<I, S>(args: I) -> Result<Action, ArgError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let args: Vec<String> = args.into_iter().map(Into::into).collect();
    let mut options = Options::default();
    let mut i = 0;

    while i < args.len() {
        let flag = args[i].as_str();
        let value = args.get(i + 1);

        match flag {
            "--help" | "-h" => {
                let topic = match value {
                    Some(command) => HelpTopic::Command(command.clone()),
                    None => HelpTopic::General,
                };
                return Ok(Action::Help(topic));
            }
            "--list-logos" => return Ok(Action::ListLogos),
            "--print-logos" => return Ok(Action::PrintLogos),
            "--show-errors" => options.show_errors = true,
            "--logo" | "-l" => {
                let name = value.ok_or_else(|| ArgError::MissingLogo {
                    flag: flag.to_string(),
                })?;
                if Logo::find(name).is_none() {
                    return Err(ArgError::UnknownLogo(name.clone()));
                }
                options.logo = Some(name.clone());
                // a logo brings its own color
                options.color = None;
                i += 1;
            }
            "--color" | "-c" => {
                let code = value.ok_or_else(|| ArgError::MissingColor {
                    flag: flag.to_string(),
                })?;
                options.color = Some(color_escape(code)?);
                i += 1;
            }
            "--seperator" | "-s" => {
                let width = value.ok_or_else(|| ArgError::MissingSeparator {
                    flag: flag.to_string(),
                })?;
                let parsed = width
                    .trim()
                    .parse::<i16>()
                    .map_err(|_| ArgError::InvalidSeparator {
                        value: width.clone(),
                    })?;
                options.separator = Some(parsed);
                i += 1;
            }
            other => return Err(ArgError::UnknownOption(other.to_string())),
        }

        i += 1;
    }

    Ok(Action::Run(options))
}

/// Turn a console color code into its escape sequence, rejecting long codes
pub fn color_escape(code: &str) -> Result<String, ArgError> {
    if code.len() > MAX_COLOR_LEN {
        return Err(ArgError::ColorTooLong { len: code.len() });
    }
    Ok(format!("\x1b[{}m", code))
}
