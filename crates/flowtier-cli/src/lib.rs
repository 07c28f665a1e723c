//! CLI logic for the Flowtier flow diagram tool.
//!
//! Reads a flow file, lays it out and writes the result as SVG or JSON.
//! Warnings from the layout are reported through the logger as miette
//! reports and never fail the run.

pub mod error_adapter;

mod args;
mod config;

pub use args::{Args, OutputFormat};

use std::fs;

use log::{info, warn};

use flowtier::{DiagramBuilder, FlowtierError, diagram::Diagram};

use error_adapter::{diagnostics_to_reportables, render_report};

/// Run the Flowtier CLI application
///
/// # Errors
///
/// Returns `FlowtierError` for:
/// - File I/O errors
/// - Configuration loading or validation errors
/// - A flow without any node
/// - Rendering errors
pub fn run(args: &Args) -> Result<(), FlowtierError> {
    let output_path = args.output_path();
    info!(
        input_path = args.input,
        output_path = output_path,
        format:? = args.format;
        "Processing flow"
    );

    let app_config = config::load_config(args.config.as_ref())?;
    let source = fs::read_to_string(&args.input)?;

    let builder = DiagramBuilder::new(app_config);
    let (diagram, warnings) = builder.layout(&source).into_result(&source)?;

    for reportable in diagnostics_to_reportables(&warnings, &source) {
        warn!("{}", render_report(&reportable));
    }

    let output = match args.format {
        OutputFormat::Svg => builder.render_svg(&diagram)?,
        OutputFormat::Json => to_json(&diagram)?,
    };
    fs::write(&output_path, output)?;

    info!(output_file = output_path, warnings = warnings.len(); "Diagram exported successfully");

    Ok(())
}

fn to_json(diagram: &Diagram) -> Result<String, FlowtierError> {
    serde_json::to_string_pretty(diagram).map_err(|err| FlowtierError::Export(Box::new(err)))
}
