//! Command-line configuration

use clap::Parser;
use log::LevelFilter;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "solar-proposal", version, about = "Generate solar installation proposals as DOCX")]
pub struct Args {
    /// Address to listen on.
    #[arg(long, default_value = "0.0.0.0:10000")]
    pub bind: String,

    /// Pricing workbook with "Hybrid" and "OnGrid" sheets.
    #[arg(long, default_value = "PRICELIST.xlsx")]
    pub pricelist: PathBuf,

    /// Template used for hybrid proposals.
    #[arg(long, default_value = "HYBRID-20250521-TEMPLATE.docx")]
    pub hybrid_template: PathBuf,

    /// Template used for every other proposal type.
    #[arg(long, default_value = "ONGRID-20250521.docx")]
    pub ongrid_template: PathBuf,

    /// Working directory for generated files, created at startup.
    #[arg(long, default_value = "generated_files")]
    pub output_dir: PathBuf,

    /// Log level (off, error, warn, info, debug, trace).
    #[arg(long, default_value = "info")]
    pub log_level: LevelFilter,

    /// Also append logs to this file.
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["solar-proposal"]);
        assert_eq!(args.bind, "0.0.0.0:10000");
        assert_eq!(args.pricelist, PathBuf::from("PRICELIST.xlsx"));
        assert_eq!(args.output_dir, PathBuf::from("generated_files"));
        assert_eq!(args.log_level, LevelFilter::Info);
        assert!(args.log_file.is_none());
    }

    #[test]
    fn test_overrides() {
        let args = Args::parse_from([
            "solar-proposal",
            "--bind",
            "127.0.0.1:8080",
            "--log-level",
            "debug",
            "--log-file",
            "server.log",
        ]);
        assert_eq!(args.bind, "127.0.0.1:8080");
        assert_eq!(args.log_level, LevelFilter::Debug);
        assert_eq!(args.log_file, Some(PathBuf::from("server.log")));
    }
}
