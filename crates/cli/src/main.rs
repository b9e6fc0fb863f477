mod commands;

use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use mta_rust_pep723_core::{
    Console, ConsoleConfig, DiagnosticSink, OutputFormat, Pep723Config, DEFAULT_PYTHON_VERSION,
};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "autopep723")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Run Python scripts with their third-party dependencies auto-detected")]
#[command(long_about = "Scans a Python script for imports, drops standard library and local \
    modules, maps the rest to PyPI package names and runs the script with `uv run --with ...`.\n\n\
    `check` prints the PEP 723 metadata block that would be written; `add` (or `upgrade`) \
    writes it into the script, replacing any existing block and keeping the shebang line.")]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Script path or URL to run, then the arguments passed to it. Every
    /// word after the script belongs to the script, flags included.
    #[arg(
        value_name = "SCRIPT [ARGS]",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub script: Vec<String>,

    /// Show verbose output, including the uv command line
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Interpreter queried for its builtin and stdlib module names
    #[arg(long, global = true)]
    pub python: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the PEP 723 metadata block for a script without modifying it
    Check {
        /// Script path or URL
        script: String,

        /// Python version requirement
        #[arg(long, default_value = DEFAULT_PYTHON_VERSION)]
        python_version: String,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormatArg::Text)]
        format: OutputFormatArg,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Write or replace the PEP 723 metadata block in a script
    #[command(visible_alias = "upgrade")]
    Add {
        /// Script path or URL
        script: String,

        /// Python version requirement
        #[arg(long, default_value = DEFAULT_PYTHON_VERSION)]
        python_version: String,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormatArg {
    Text,
    Json,
    Yaml,
    Summary,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Text => OutputFormat::Text,
            OutputFormatArg::Json => OutputFormat::Json,
            OutputFormatArg::Yaml => OutputFormat::Yaml,
            OutputFormatArg::Summary => OutputFormat::Summary,
        }
    }
}

fn config_for(python: Option<PathBuf>, python_version: Option<String>) -> Pep723Config {
    let mut config = Pep723Config::new();
    if let Some(version) = python_version {
        config = config.with_python_version(version);
    }
    if let Some(interpreter) = python {
        config = config.with_interpreter(interpreter);
    }
    config
}

fn dispatch(args: Args, console: &Console) -> anyhow::Result<i32> {
    match args.command {
        Some(Commands::Check {
            script,
            python_version,
            format,
            output,
        }) => {
            let config = config_for(args.python, Some(python_version));
            let rendered = commands::check_command(&script, format.into(), &config, console)?;

            if let Some(path) = output {
                fs::write(&path, format!("{}\n", rendered))?;
                console.verbose(&format!("Output written to: {}", path.display()));
            } else {
                println!("{}", rendered);
            }
            Ok(0)
        }
        Some(Commands::Add {
            script,
            python_version,
        }) => {
            let config = config_for(args.python, Some(python_version));
            commands::add_command(&script, &config, console)?;
            Ok(0)
        }
        None => match args.script.split_first() {
            Some((script, script_args)) => {
                let config = config_for(args.python, None);
                commands::run_script_command(script, script_args, &config, console)
            }
            None => {
                Args::command().print_help()?;
                Ok(1)
            }
        },
    }
}

/// Codes outside 0..=255 collapse to 1
fn exit_status(code: i32) -> u8 {
    u8::try_from(code).unwrap_or(1)
}

fn main() -> ExitCode {
    let args = Args::parse();
    let console = Console::new(ConsoleConfig::detect(args.verbose));

    match dispatch(args, &console) {
        Ok(code) => ExitCode::from(exit_status(code)),
        Err(err) => {
            console.error(&format!("Error: {:#}", err));
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_mode_collects_script_args() {
        let args = Args::try_parse_from(["autopep723", "tool.py", "--count", "3", "-x"]).unwrap();

        assert!(args.command.is_none());
        assert_eq!(args.script, vec!["tool.py", "--count", "3", "-x"]);
        assert!(!args.verbose);
    }

    #[test]
    fn test_verbose_before_script() {
        let args = Args::try_parse_from(["autopep723", "-v", "tool.py", "arg"]).unwrap();

        assert!(args.verbose);
        assert_eq!(args.script, vec!["tool.py", "arg"]);
    }

    #[test]
    fn test_own_flags_after_script_go_to_the_script() {
        let args = Args::try_parse_from(["autopep723", "tool.py", "-v", "x"]).unwrap();
        assert!(!args.verbose);
        assert_eq!(args.script, vec!["tool.py", "-v", "x"]);

        let args = Args::try_parse_from(["autopep723", "tool.py", "--python", "p"]).unwrap();
        assert!(args.python.is_none());
        assert_eq!(args.script, vec!["tool.py", "--python", "p"]);

        let args = Args::try_parse_from(["autopep723", "-v", "tool.py", "-v"]).unwrap();
        assert!(args.verbose);
        assert_eq!(args.script, vec!["tool.py", "-v"]);
    }

    #[test]
    fn test_subcommand_name_after_script_is_an_argument() {
        let args = Args::try_parse_from(["autopep723", "tool.py", "check"]).unwrap();
        assert!(args.command.is_none());
        assert_eq!(args.script, vec!["tool.py", "check"]);
    }

    #[test]
    fn test_check_subcommand() {
        let args = Args::try_parse_from([
            "autopep723",
            "check",
            "tool.py",
            "--python-version",
            ">=3.11",
            "--format",
            "json",
        ])
        .unwrap();

        match args.command {
            Some(Commands::Check {
                script,
                python_version,
                format,
                output,
            }) => {
                assert_eq!(script, "tool.py");
                assert_eq!(python_version, ">=3.11");
                assert_eq!(format, OutputFormatArg::Json);
                assert!(output.is_none());
            }
            other => panic!("expected check, got {:?}", other),
        }
    }

    #[test]
    fn test_check_defaults() {
        let args = Args::try_parse_from(["autopep723", "check", "tool.py"]).unwrap();

        match args.command {
            Some(Commands::Check {
                python_version,
                format,
                ..
            }) => {
                assert_eq!(python_version, DEFAULT_PYTHON_VERSION);
                assert_eq!(format, OutputFormatArg::Text);
            }
            other => panic!("expected check, got {:?}", other),
        }
    }

    #[test]
    fn test_upgrade_is_add() {
        let args = Args::try_parse_from(["autopep723", "upgrade", "tool.py"]).unwrap();
        assert!(matches!(args.command, Some(Commands::Add { .. })));

        let args = Args::try_parse_from(["autopep723", "add", "-v", "tool.py"]).unwrap();
        assert!(matches!(args.command, Some(Commands::Add { .. })));
        assert!(args.verbose);
    }

    #[test]
    fn test_python_interpreter_flag() {
        let args =
            Args::try_parse_from(["autopep723", "--python", "/usr/bin/python3", "check", "a.py"])
                .unwrap();
        assert_eq!(args.python, Some(PathBuf::from("/usr/bin/python3")));

        let config = config_for(args.python, Some(">=3.12".to_string()));
        assert_eq!(config.python_version, ">=3.12");
        assert_eq!(config.interpreter, Some(PathBuf::from("/usr/bin/python3")));
    }

    #[test]
    fn test_exit_code_mapping() {
        assert_eq!(exit_status(0), 0);
        assert_eq!(exit_status(3), 3);
        assert_eq!(exit_status(-1), 1);
        assert_eq!(exit_status(300), 1);
    }
}
