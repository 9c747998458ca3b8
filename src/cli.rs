use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// dcmview - inspect, preview and anonymize folders of medical image files
#[derive(Parser, Debug, Clone)]
#[command(name = "dcmview")]
#[command(version)]
#[command(about = "Inspect, preview and anonymize folders of medical image files", long_about = None)]
pub struct Args {
    /// Configuration file (defaults to the platform config directory)
    #[arg(long = "config", value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    /// File extension to pick up when scanning (repeatable, overrides config)
    #[arg(long = "ext", value_name = "EXT", global = true)]
    pub extensions: Vec<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Show display mode, record count, frame count and the main elements
    Info {
        /// Folder to load
        folder: PathBuf,
    },

    /// List metadata fields of one record
    Tags {
        /// Folder to load
        folder: PathBuf,

        /// Record to inspect (0-based)
        #[arg(long = "record", default_value = "0")]
        record: usize,

        /// Only show fields whose name contains this text (case-insensitive)
        #[arg(long = "filter", default_value = "")]
        filter: String,
    },

    /// Show the main elements of the first record
    Summary {
        /// Folder to load
        folder: PathBuf,
    },

    /// Replace identity fields and write anonymized copies
    Anonymize {
        /// Folder to load
        folder: PathBuf,

        /// Text placed before the random digits
        #[arg(long = "prefix")]
        prefix: String,

        /// Output directory, created if missing
        #[arg(short = 'o', long = "output")]
        output: PathBuf,

        /// Output format id (json, dicom); defaults to the source format
        #[arg(long = "format")]
        format: Option<String>,
    },

    /// Export a preview: PNG tile sheet, or animated GIF for volumes
    Render {
        /// Folder to load
        folder: PathBuf,

        /// Output image file
        #[arg(short = 'o', long = "output")]
        output: PathBuf,
    },

    /// Print the effective configuration as JSON
    Config {
        /// Also write it to the --config file, or the default config path
        #[arg(long = "save")]
        save: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tags() {
        let args = Args::parse_from(["dcmview", "tags", "scans", "--record", "2", "--filter", "patient"]);
        match args.command {
            Command::Tags { folder, record, filter } => {
                assert_eq!(folder, PathBuf::from("scans"));
                assert_eq!(record, 2);
                assert_eq!(filter, "patient");
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_globals_after_subcommand() {
        let args = Args::parse_from([
            "dcmview", "anonymize", "scans", "--prefix", "ANON", "-o", "out", "--ext", "json", "-v",
        ]);
        assert!(args.verbose);
        assert_eq!(args.extensions, vec!["json"]);
        assert!(matches!(args.command, Command::Anonymize { folder, .. } if folder == PathBuf::from("scans")));
    }

    #[test]
    fn test_config_takes_no_folder() {
        let args = Args::parse_from(["dcmview", "config", "--save", "--config", "custom.json"]);
        assert!(matches!(args.command, Command::Config { save: true }));
        assert_eq!(args.config, Some(PathBuf::from("custom.json")));
        assert!(Args::try_parse_from(["dcmview", "config", "scans"]).is_err());
    }

    #[test]
    fn test_anonymize_requires_prefix() {
        assert!(Args::try_parse_from(["dcmview", "anonymize", "scans", "-o", "out"]).is_err());
    }
}
