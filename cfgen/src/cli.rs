//! Command line interface of the `cfgen` binary.

use anyhow::Context;
use cfgen_codegen::GeneratorOptions;
use clap::Parser;
use std::path::PathBuf;

/// generate an immutable option-pattern configuration from a Go struct
#[derive(Parser, Debug, Clone)]
#[command(name = "cfgen", version)]
pub struct CommandLineInterface {
    /// Go source file containing the struct
    #[arg(short, long)]
    pub file: PathBuf,

    /// name of the struct to generate from
    #[arg(short = 's', long = "struct")]
    pub struct_name: String,

    /// package clause of the output (the source package if omitted)
    #[arg(short, long)]
    pub package: Option<String>,

    /// constructor function name
    #[arg(long, default_value = "New")]
    pub constructor: String,

    /// fail on field types that cannot be spelled instead of emitting `nil`
    #[arg(long)]
    pub strict: bool,

    /// skip formatting of the output
    #[arg(long)]
    pub raw: bool,

    /// output .go file (stdout if omitted)
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// more logging on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl CommandLineInterface {
    /// Default log directive for the requested verbosity.
    #[must_use]
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }

    /// Builds generator options from the flags.
    #[must_use]
    pub fn options(&self) -> GeneratorOptions {
        let mut options = GeneratorOptions::new()
            .constructor(self.constructor.clone())
            .strict(self.strict)
            .format(!self.raw);
        if let Some(package) = &self.package {
            options = options.package(package.clone());
        }
        options
    }

    /// Generates the code and writes it to the output file or stdout.
    ///
    /// # Errors
    /// Returns an error if generation fails or the output cannot be written.
    pub fn run(&self) -> anyhow::Result<()> {
        let code = cfgen_codegen::generate_from_file(&self.file, &self.struct_name, &self.options())
            .with_context(|| {
                format!(
                    "failed to generate '{}' from {}",
                    self.struct_name,
                    self.file.display()
                )
            })?;

        match &self.out {
            Some(path) => {
                std::fs::write(path, &code)
                    .with_context(|| format!("failed to write {}", path.display()))?;
                tracing::info!("wrote {} bytes to {}", code.len(), path.display());
            }
            None => print!("{code}"),
        }
        Ok(())
    }
}
