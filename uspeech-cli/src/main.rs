//! UniversalSpeech CLI
//!
//! Command-line interface for speech and braille output through the
//! UniversalSpeech library

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;
use uspeech::{Arch, Capability, Error, Loader, LoaderConfig, ParameterId, UniversalSpeech};

#[derive(Parser)]
#[command(name = "uspeech")]
#[command(about = "Speech and braille output through UniversalSpeech")]
#[command(version)]
struct Cli {
    /// Folder containing lib/ and lib64/ (defaults to the executable's folder)
    #[arg(long, global = true)]
    install_dir: Option<PathBuf>,

    /// Binary set to load (defaults to the process architecture)
    #[arg(long, global = true, value_enum)]
    arch: Option<ArchArg>,

    /// Fall back to native engines such as SAPI when no screen reader runs
    #[arg(long, global = true)]
    native_speech: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that the required library files are installed
    Check,

    /// Speak text
    Say {
        text: String,

        /// Queue after current speech instead of interrupting it
        #[arg(long)]
        no_interrupt: bool,

        /// Speak only the first letter
        #[arg(long)]
        first_letter: bool,

        /// Also show the text on the braille display
        #[arg(long)]
        braille: bool,
    },

    /// Show text on the braille display
    Braille { text: String },

    /// Stop speaking
    Stop,

    /// Show the engine in use
    Engine,

    /// List speech engines
    Engines {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Read an integer parameter (e.g. rate, engine, engine_available:2, 0xFFFF)
    Get { param: ParameterId },

    /// Read a string parameter (e.g. engine:0, voice:1)
    GetString { param: ParameterId },

    /// Write an integer parameter
    Set {
        param: ParameterId,
        #[arg(allow_hyphen_values = true)]
        value: i32,
    },

    /// Adjust volume, rate, pitch or inflexion if the engine supports it
    Adjust {
        #[arg(value_enum)]
        capability: CapabilityArg,
        #[arg(allow_hyphen_values = true)]
        value: i32,
        #[arg(long, allow_hyphen_values = true)]
        min: Option<i32>,
        #[arg(long, allow_hyphen_values = true)]
        max: Option<i32>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ArchArg {
    X86,
    X64,
}

impl From<ArchArg> for Arch {
    fn from(arg: ArchArg) -> Self {
        match arg {
            ArchArg::X86 => Arch::X86,
            ArchArg::X64 => Arch::X64,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum CapabilityArg {
    Volume,
    Rate,
    Pitch,
    Inflexion,
}

impl From<CapabilityArg> for Capability {
    fn from(arg: CapabilityArg) -> Self {
        match arg {
            CapabilityArg::Volume => Capability::Volume,
            CapabilityArg::Rate => Capability::Rate,
            CapabilityArg::Pitch => Capability::Pitch,
            CapabilityArg::Inflexion => Capability::Inflexion,
        }
    }
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn resolve_config(cli: &Cli) -> Result<LoaderConfig, Error> {
    let config = match cli.install_dir {
        Some(ref dir) => LoaderConfig::new(dir),
        None => LoaderConfig::for_current_exe()?,
    };
    Ok(match cli.arch {
        Some(arch) => config.with_arch(arch.into()),
        None => config,
    })
}

fn run(cli: Cli) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let config = resolve_config(&cli)?;
    let native_speech = cli.native_speech;
    let open = || -> Result<UniversalSpeech, Error> {
        let speech = UniversalSpeech::with_config(config.clone())?;
        if native_speech {
            speech.enable_native_speech(true);
        }
        Ok(speech)
    };

    match cli.command {
        Commands::Check => {
            let dir = Loader::new(config.clone()).check_files()?;
            println!("All UniversalSpeech files present in {}", dir.display());
        }

        Commands::Say {
            text,
            no_interrupt,
            first_letter,
            braille,
        } => {
            let speech = open()?;
            let interrupt = !no_interrupt;
            let status = if first_letter {
                speech.say_first_letter(&text, interrupt)?
            } else {
                speech.say(&text, interrupt)?
            };
            tracing::debug!(status, "say returned");
            if braille {
                speech.braille(&text)?;
            }
        }

        Commands::Braille { text } => {
            let status = open()?.braille(&text)?;
            tracing::debug!(status, "braille returned");
        }

        Commands::Stop => {
            open()?.stop();
        }

        Commands::Engine => match open()?.engine_used() {
            Some(name) => println!("You are using {}.", name),
            None => println!("No speech engine in use."),
        },

        Commands::Engines { json } => {
            let engines = open()?.get_engines();
            if json {
                println!("{}", serde_json::to_string_pretty(&engines)?);
            } else if engines.is_empty() {
                println!("No speech engines reported by UniversalSpeech.");
            } else {
                println!("{:<4} {:<40} {}", "Id", "Name", "Available");
                println!("{:-<56}", "");
                for engine in engines {
                    let available = if engine.available { "yes" } else { "no" };
                    println!("{:<4} {:<40} {}", engine.id, engine.name, available);
                }
            }
        }

        Commands::Get { param } => {
            println!("{} = {}", param, open()?.get_value(param));
        }

        Commands::GetString { param } => match open()?.get_string(param) {
            Some(value) => println!("{} = \"{}\"", param, value),
            None => println!("{} is not set", param),
        },

        Commands::Set { param, value } => {
            let status = open()?.set_value(param, value);
            println!("{} <- {} (status {})", param, value, status);
        }

        Commands::Adjust {
            capability,
            value,
            min,
            max,
        } => match open()?.set_capability(capability.into(), value, min, max) {
            Ok(()) => println!("{} set to {}", Capability::from(capability), value),
            Err(e @ Error::UnsupportedCapability(_)) => {
                eprintln!("{}", e);
                return Ok(ExitCode::from(2));
            }
            Err(e) => return Err(e.into()),
        },
    }

    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use uspeech::REQUIRED_FILES;

    use super::*;

    fn cli(install_dir: &Path, command: &str) -> Cli {
        Cli::try_parse_from([
            "uspeech",
            "--install-dir",
            install_dir.to_str().expect("utf-8 temp path"),
            "--arch",
            "x64",
            command,
        ])
        .expect("valid arguments")
    }

    #[test]
    fn check_does_not_open_the_library() {
        let root = tempfile::tempdir().expect("tempdir");
        let dir = root.path().join("lib64");
        fs::create_dir_all(&dir).expect("create lib64");
        for file in REQUIRED_FILES {
            fs::write(dir.join(file), b"MZ").expect("write library file");
        }

        let code = run(cli(root.path(), "check")).expect("check succeeds");
        assert_eq!(code, ExitCode::SUCCESS);
    }

    #[test]
    fn errors_use_the_display_message() {
        let root = tempfile::tempdir().expect("tempdir");

        let err = run(cli(root.path(), "check")).unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("missing library files in"), "{}", message);
        assert!(!message.contains("MissingDependency"), "{}", message);
    }

    #[test]
    fn commands_that_speak_need_the_library_files() {
        let root = tempfile::tempdir().expect("tempdir");

        let err = run(cli(root.path(), "stop")).unwrap_err();
        assert!(err.to_string().contains("UniversalSpeech.dll"), "{}", err);
    }
}
