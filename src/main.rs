//! ptexpand CLI - expands production-type patterns in a simulation
//! parameter file and writes the result to stdout or a file.

use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use ptexpand::{expand_document, ProductionTypes};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

/// Expand production-type search patterns in a parameter file
#[derive(Parser)]
#[command(name = "ptexpand")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Herd file supplying the known production types
    #[arg(short = 'f', long = "herd-file", value_name = "FILE")]
    herd_file: PathBuf,

    /// Parameter file to expand
    #[arg(value_name = "PARAMS")]
    param_file: PathBuf,

    /// Output file path (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let herd_xml = fs::read_to_string(&cli.herd_file)
        .with_context(|| format!("cannot read herd file {}", cli.herd_file.display()))?;
    let types = ProductionTypes::from_xml(&herd_xml)
        .with_context(|| format!("cannot parse herd file {}", cli.herd_file.display()))?;
    log::info!("herd file lists {} production types", types.len());

    let params = fs::read_to_string(&cli.param_file)
        .with_context(|| format!("cannot read parameter file {}", cli.param_file.display()))?;

    match &cli.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("cannot create output file {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            expand_document(&params, &types, &mut writer)?;
            writer.flush()?;
        }
        None => {
            let stdout = io::stdout();
            let mut writer = BufWriter::new(stdout.lock());
            expand_document(&params, &types, &mut writer)?;
            writer.flush()?;
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}: {e:#}", "error".red());
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_herd_file_and_positional() {
        let cli =
            Cli::try_parse_from(["ptexpand", "--herd-file", "herds.xml", "params.xml"]).unwrap();
        assert_eq!(cli.herd_file, PathBuf::from("herds.xml"));
        assert_eq!(cli.param_file, PathBuf::from("params.xml"));
        assert!(cli.output.is_none());
    }

    #[test]
    fn test_cli_parses_short_flags() {
        let cli =
            Cli::try_parse_from(["ptexpand", "-f", "herds.xml", "-o", "out.xml", "params.xml"])
                .unwrap();
        assert_eq!(cli.herd_file, PathBuf::from("herds.xml"));
        assert_eq!(cli.output.as_deref(), Some(std::path::Path::new("out.xml")));
    }

    #[test]
    fn test_cli_requires_herd_file() {
        let err = Cli::try_parse_from(["ptexpand", "params.xml"]).err().unwrap();
        assert!(err.to_string().contains("--herd-file"));
    }

    #[test]
    fn test_cli_requires_param_file() {
        let err = Cli::try_parse_from(["ptexpand", "--herd-file", "herds.xml"])
            .err()
            .unwrap();
        assert!(err.to_string().contains("PARAMS"));
    }

    #[test]
    fn test_cli_rejects_unknown_option() {
        let err = Cli::try_parse_from(["ptexpand", "--herd-file", "h.xml", "--bogus", "p.xml"])
            .err()
            .unwrap();
        assert!(err.to_string().contains("--bogus"));
    }

    #[test]
    fn test_run_expands_to_output_file() {
        let dir = tempfile::tempdir().unwrap();
        let herd_path = dir.path().join("herds.xml");
        let param_path = dir.path().join("params.xml");
        let out_path = dir.path().join("out.xml");

        let mut herd = File::create(&herd_path).unwrap();
        write!(
            herd,
            "<herds><herd><production-type>Beef cattle</production-type></herd>\
             <herd><production-type>Dairy cattle</production-type></herd></herds>"
        )
        .unwrap();
        let mut params = File::create(&param_path).unwrap();
        write!(
            params,
            "<parameters><disease-model production-type=\"$dairy\"><p>1</p></disease-model></parameters>"
        )
        .unwrap();

        let cli = Cli {
            herd_file: herd_path,
            param_file: param_path,
            output: Some(out_path.clone()),
        };
        run(&cli).unwrap();

        let output = fs::read_to_string(&out_path).unwrap();
        assert!(output.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n"));
        assert!(output
            .contains("<disease-model production-type=\"Dairy cattle\"><p>1</p></disease-model>"));
    }

    #[test]
    fn test_run_fails_on_missing_herd_file() {
        let dir = tempfile::tempdir().unwrap();
        let param_path = dir.path().join("params.xml");
        File::create(&param_path)
            .unwrap()
            .write_all(b"<parameters></parameters>")
            .unwrap();

        let cli = Cli {
            herd_file: dir.path().join("missing.xml"),
            param_file: param_path,
            output: None,
        };
        let err = run(&cli).unwrap_err();
        assert!(err.to_string().contains("cannot read herd file"));
    }
}
