use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "rill")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Interpreter for the rill expression language", long_about = None)]
pub struct Args {
    /// Script to run. Starts an interactive prompt when omitted.
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Name used in diagnostics instead of the file name.
    #[arg(long = "name", value_name = "NAME")]
    pub name: Option<String>,

    /// Print the syntax tree of each input before evaluating it.
    #[arg(long = "dump-ast")]
    pub dump_ast: bool,

    #[arg(long = "color", value_name = "WHEN", default_value = "auto")]
    pub color: ColorChoice,

    /// Increase logging verbosity (-v, -vv, -vvv).
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColorChoice {
    Auto,
    Always,
    Never,
}

impl std::str::FromStr for ColorChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(ColorChoice::Auto),
            "always" => Ok(ColorChoice::Always),
            "never" => Ok(ColorChoice::Never),
            _ => Err(format!(
                "invalid color choice: {}. Must be 'auto', 'always', or 'never'",
                s
            )),
        }
    }
}

pub struct Config {
    pub file: Option<PathBuf>,
    pub name: String,
    pub dump_ast: bool,
    pub color_enabled: bool,
    pub log_level: log::LevelFilter,
}

impl Config {
    pub fn from_args(args: Args) -> Self {
        let color_enabled = match args.color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => console::Term::stderr().features().colors_supported(),
        };

        let name = match (&args.name, &args.file) {
            (Some(name), _) => name.clone(),
            (None, Some(file)) => file.display().to_string(),
            (None, None) => "<stdin>".to_string(),
        };

        let log_level = match args.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        };

        Config {
            file: args.file,
            name,
            dump_ast: args.dump_ast,
            color_enabled,
            log_level,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(args: &[&str]) -> Config {
        let args = Args::try_parse_from(std::iter::once("rill").chain(args.iter().copied()))
            .unwrap();
        Config::from_args(args)
    }

    #[test]
    fn test_defaults() {
        let defaults = config(&["--color", "never"]);
        assert_eq!(defaults.file, None);
        assert_eq!(defaults.name, "<stdin>");
        assert!(!defaults.dump_ast);
        assert!(!defaults.color_enabled);
        assert_eq!(defaults.log_level, log::LevelFilter::Warn);
    }

    #[test]
    fn test_file_and_name() {
        assert_eq!(config(&["main.rl"]).name, "main.rl");

        let named = config(&["--name", "script", "main.rl"]);
        assert_eq!(named.name, "script");
        assert_eq!(named.file, Some(PathBuf::from("main.rl")));
    }

    #[test]
    fn test_verbosity() {
        assert_eq!(config(&["-v"]).log_level, log::LevelFilter::Info);
        assert_eq!(config(&["-vv"]).log_level, log::LevelFilter::Debug);
        assert_eq!(config(&["-vvvv"]).log_level, log::LevelFilter::Trace);
    }

    #[test]
    fn test_color_choice() {
        assert!(config(&["--color", "always"]).color_enabled);
        assert!(Args::try_parse_from(&["rill", "--color", "sometimes"]).is_err());
        assert!(config(&["--dump-ast", "--color=ALWAYS"]).dump_ast);
    }
}
