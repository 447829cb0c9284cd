//! Command-line interface for the mapper.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use console::style;

use crate::config::{validate_tag_name, DEFAULT_CONTAINER_TAG};
use crate::discovery::discover_segments;
use crate::error::{MapperError, Result};
use crate::mapper::{map_file, preview_file};
use crate::mapping::MappingFile;
use crate::xml::read_xml;

/// IDoc Mapper - Transform IDoc XML documents with a declarative field mapping.
#[derive(Parser)]
#[command(name = "idoc-mapper")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the segments of an input document with their candidate fields.
    Discover {
        /// Input IDoc XML file
        input: PathBuf,

        /// Print a mapping file skeleton instead of a listing (segments and
        /// fields with names outside ASCII XML names are skipped)
        #[arg(long)]
        skeleton: bool,

        /// Container tag to leave out of the skeleton
        #[arg(short, long, default_value = DEFAULT_CONTAINER_TAG)]
        container: String,
    },

    /// Transform an input document and save the result.
    Transform {
        /// Input IDoc XML file
        input: PathBuf,

        /// Mapping file (YAML)
        #[arg(short, long)]
        mapping: PathBuf,

        /// Output XML file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Print the transformed document without saving it.
    Preview {
        /// Input IDoc XML file
        input: PathBuf,

        /// Mapping file (YAML)
        #[arg(short, long)]
        mapping: PathBuf,
    },
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Discover {
            input,
            skeleton,
            container,
        } => discover_command(&input, skeleton, &container),
        Commands::Transform {
            input,
            mapping,
            output,
        } => transform_command(&input, &mapping, &output),
        Commands::Preview { input, mapping } => preview_command(&input, &mapping),
    }
}

/// Execute the discover command.
fn discover_command(input: &Path, skeleton: bool, container: &str) -> Result<()> {
    validate_tag_name("container", container)?;

    let root = read_xml(input)?;
    let catalog = discover_segments(&root);

    if skeleton {
        let yaml = MappingFile::skeleton(&catalog, container).to_yaml()?;
        print!("{yaml}");
        return Ok(());
    }

    println!(
        "{} {} ({} tags)",
        style("Segments in").bold(),
        style(input.display()).cyan(),
        catalog.len()
    );
    for (segment, fields) in &catalog {
        if fields.is_empty() {
            println!("  {}", style(segment).green());
        } else {
            let fields: Vec<&str> = fields.iter().map(String::as_str).collect();
            println!("  {}: {}", style(segment).green(), fields.join(", "));
        }
    }

    Ok(())
}

/// Execute the transform command.
fn transform_command(input: &Path, mapping_path: &Path, output: &Path) -> Result<()> {
    // Validate output directory before doing any work
    let output_dir = output
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    if !output_dir.is_dir() {
        return Err(MapperError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("Output directory does not exist: {}", output_dir.display()),
        )));
    }

    let mapping = MappingFile::load(mapping_path)?;
    let document = map_file(input, &mapping, output)?;

    let segments = document
        .children()
        .first()
        .map_or(0, |container| container.children().len());
    println!(
        "{} {} ({} segments)",
        style("Saved to:").green().bold(),
        output.display(),
        segments
    );

    Ok(())
}

/// Execute the preview command.
fn preview_command(input: &Path, mapping_path: &Path) -> Result<()> {
    let mapping = MappingFile::load(mapping_path)?;
    print!("{}", preview_file(input, &mapping)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_discover() {
        let cli = Cli::parse_from(["idoc-mapper", "discover", "orders.xml"]);

        let Commands::Discover {
            input,
            skeleton,
            container,
        } = cli.command
        else {
            panic!("expected discover command");
        };
        assert_eq!(input, PathBuf::from("orders.xml"));
        assert!(!skeleton);
        assert_eq!(container, "IDOC");
    }

    #[test]
    fn test_cli_parse_discover_skeleton() {
        let cli = Cli::parse_from([
            "idoc-mapper",
            "discover",
            "orders.xml",
            "--skeleton",
            "--container",
            "ORDERS05",
        ]);

        let Commands::Discover {
            skeleton,
            container,
            ..
        } = cli.command
        else {
            panic!("expected discover command");
        };
        assert!(skeleton);
        assert_eq!(container, "ORDERS05");
    }

    #[test]
    fn test_cli_parse_transform() {
        let cli = Cli::parse_from([
            "idoc-mapper",
            "transform",
            "in.xml",
            "--mapping",
            "map.yaml",
            "-o",
            "out.xml",
        ]);

        let Commands::Transform {
            input,
            mapping,
            output,
        } = cli.command
        else {
            panic!("expected transform command");
        };
        assert_eq!(input, PathBuf::from("in.xml"));
        assert_eq!(mapping, PathBuf::from("map.yaml"));
        assert_eq!(output, PathBuf::from("out.xml"));
    }

    #[test]
    fn test_cli_transform_requires_output() {
        let result =
            Cli::try_parse_from(["idoc-mapper", "transform", "in.xml", "--mapping", "m.yaml"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_parse_preview() {
        let cli = Cli::parse_from(["idoc-mapper", "preview", "in.xml", "-m", "map.yaml"]);
        assert!(matches!(cli.command, Commands::Preview { .. }));
    }
}
