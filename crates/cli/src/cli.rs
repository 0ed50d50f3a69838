//! CLI definitions and command dispatch.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand, builder::NonEmptyStringValueParser};
use fontnemo_core::{
    FamilyEdit, OutputMode, config::DEFAULT_FAMILY_TIMESTAMP_SEPARATOR, edit_family, view_family,
};

#[derive(Parser)]
#[command(name = "fontnemo", version)]
#[command(about = "Modify font family names in OpenType/TrueType fonts")]
#[command(after_help = "Examples:\n  \
    fontnemo view font.ttf\n  \
    fontnemo new font.ttf --new-family 'My New Font' -o output.ttf\n  \
    fontnemo replace font.ttf --find Test --replace Production -o 1\n  \
    fontnemo timestamp font.ttf -o 2")]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, clap::Args)]
pub struct OutputArgs {
    /// 0: replace input, 1: back up input then replace, 2: timestamped copy, or a file path
    #[arg(short, long, default_value = "0", value_name = "MODE")]
    pub output_path: OutputMode,
    /// Prefix output with the resulting file path
    #[arg(short, long)]
    pub long: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Display the current family name
    #[command(visible_alias = "v")]
    View {
        /// Input font file (.ttf, .otf)
        input: PathBuf,
        /// Prefix output with the file path
        #[arg(short, long)]
        long: bool,
    },
    /// Set a new family name
    #[command(visible_alias = "n")]
    New {
        input: PathBuf,
        /// New family name
        #[arg(long, allow_hyphen_values = true)]
        new_family: String,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Find and replace in the family name
    #[command(visible_alias = "r")]
    Replace {
        input: PathBuf,
        /// Text to find
        #[arg(long, allow_hyphen_values = true, value_parser = NonEmptyStringValueParser::new())]
        find: String,
        /// Replacement text
        #[arg(long, allow_hyphen_values = true)]
        replace: String,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Append a suffix to the family name
    #[command(visible_alias = "s")]
    Suffix {
        input: PathBuf,
        /// Suffix to append
        #[arg(long, allow_hyphen_values = true)]
        suffix: String,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Prepend a prefix to the family name
    #[command(visible_alias = "p")]
    Prefix {
        input: PathBuf,
        /// Prefix to prepend
        #[arg(long, allow_hyphen_values = true)]
        prefix: String,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Append a timestamp suffix to the family name
    #[command(visible_alias = "t")]
    Timestamp {
        input: PathBuf,
        /// Separator placed before the timestamp
        #[arg(long, default_value = DEFAULT_FAMILY_TIMESTAMP_SEPARATOR, allow_hyphen_values = true)]
        separator: String,
        /// Keep an existing timestamp instead of replacing it
        #[arg(long = "no-replace-timestamp", action = ArgAction::SetFalse)]
        replace_timestamp: bool,
        #[command(flatten)]
        output: OutputArgs,
    },
}

impl Commands {
    pub fn run(self) -> Result<()> {
        println!("{}", self.execute()?);
        Ok(())
    }

    /// Run the command and return the line to print.
    pub fn execute(self) -> Result<String> {
        let (input, edit, output) = match self {
            Commands::View { input, long } => {
                let family = view_family(&input)
                    .with_context(|| format!("Failed to read {}", input.display()))?;
                return Ok(format_result(&input, &family, long));
            }
            Commands::New { input, new_family, output } => {
                (input, FamilyEdit::New(new_family), output)
            }
            Commands::Replace { input, find, replace, output } => {
                (input, FamilyEdit::Replace { find, replace }, output)
            }
            Commands::Suffix { input, suffix, output } => {
                (input, FamilyEdit::Suffix(suffix), output)
            }
            Commands::Prefix { input, prefix, output } => {
                (input, FamilyEdit::Prefix(prefix), output)
            }
            Commands::Timestamp { input, separator, replace_timestamp, output } => (
                input,
                FamilyEdit::Timestamp { separator, replace_existing: replace_timestamp },
                output,
            ),
        };

        let outcome = edit_family(&input, &edit, &output.output_path)
            .with_context(|| format!("Failed to edit {}", input.display()))?;
        Ok(format_result(&outcome.path, &outcome.family_name, output.long))
    }
}

/// `family`, or `path:family` in long form.
pub fn format_result(path: &Path, family: &str, long: bool) -> String {
    if long { format!("{}:{family}", path.display()) } else { family.to_string() }
}
