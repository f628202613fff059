use clap::{Parser, Subcommand};
use lf_api::{
    ApiError, CompareInputsDoc, SidePayload, TransportError, build_compare_request,
    map_compare_error,
};
use lf_settings::{
    FieldErrors, UnitSystem, setting_fields, validate_compare_inputs,
};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "lf-cli")]
#[command(about = "LinerFlow CLI - milking liner setting comparison tool", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the setting field catalog
    Fields {
        /// Show imperial (inHg) units for the vacuum fields
        #[arg(long)]
        imperial: bool,
    },
    /// Validate a two-side raw inputs file
    Validate {
        /// Path to the inputs JSON file ({ "left": {...}, "right": {...} })
        inputs_path: PathBuf,
    },
    /// Validate inputs and emit the comparison request body
    Payload {
        /// Path to the inputs JSON file
        inputs_path: PathBuf,
        /// Product application ID for the left side
        #[arg(long)]
        left_product: i64,
        /// Product application ID for the right side
        #[arg(long)]
        right_product: i64,
        /// Send imperial (inHg) pressure fields
        #[arg(long)]
        imperial: bool,
        /// Output file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Map a saved backend error body to per-field errors
    MapError {
        /// Path to the error body (JSON or plain text)
        body_path: PathBuf,
        /// HTTP status the response carried
        #[arg(long)]
        status: Option<u16>,
    },
}

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error("inputs failed validation")]
    InvalidInputs,

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

type CliResult<T> = Result<T, CliError>;

fn main() -> CliResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Fields { imperial } => cmd_fields(unit_system(imperial)),
        Commands::Validate { inputs_path } => cmd_validate(&inputs_path),
        Commands::Payload {
            inputs_path,
            left_product,
            right_product,
            imperial,
            output,
        } => cmd_payload(
            &inputs_path,
            left_product,
            right_product,
            unit_system(imperial),
            output.as_deref(),
        ),
        Commands::MapError { body_path, status } => cmd_map_error(&body_path, status),
    }
}

fn unit_system(imperial: bool) -> UnitSystem {
    if imperial {
        UnitSystem::Imperial
    } else {
        UnitSystem::Metric
    }
}

fn cmd_fields(system: UnitSystem) -> CliResult<()> {
    println!("Setting fields:");
    for field in setting_fields(system) {
        let bounds = match (field.min, field.max) {
            (Some(min), Some(max)) => format!(", range {min}-{max}"),
            (Some(min), None) => format!(", min {min}"),
            _ => String::new(),
        };
        println!(
            "  {} - {} [{}] (step {}{})",
            field.key, field.label, field.unit, field.step, bounds
        );
    }
    Ok(())
}

fn load_inputs(inputs_path: &Path) -> CliResult<CompareInputsDoc> {
    let content = fs::read_to_string(inputs_path)?;
    Ok(serde_json::from_str(&content)?)
}

fn print_side_errors(side: &str, errors: &FieldErrors) {
    if errors.is_empty() {
        return;
    }
    println!("  {side}:");
    for (key, reason) in errors {
        println!("    {key}: {reason}");
    }
}

fn cmd_validate(inputs_path: &Path) -> CliResult<()> {
    println!("Validating inputs: {}", inputs_path.display());
    let sides = load_inputs(inputs_path)?.side_inputs();
    let report = validate_compare_inputs(&sides.left, &sides.right);

    if report.has_errors {
        println!("Validation errors:");
        print_side_errors("left", &report.errors.left);
        print_side_errors("right", &report.errors.right);
        return Err(CliError::InvalidInputs);
    }

    println!("✓ Inputs are valid");
    Ok(())
}

fn cmd_payload(
    inputs_path: &Path,
    left_product: i64,
    right_product: i64,
    system: UnitSystem,
    output: Option<&Path>,
) -> CliResult<()> {
    let sides = load_inputs(inputs_path)?.side_inputs();
    let report = validate_compare_inputs(&sides.left, &sides.right);

    if report.has_errors {
        println!("Validation errors:");
        print_side_errors("left", &report.errors.left);
        print_side_errors("right", &report.errors.right);
        return Err(CliError::InvalidInputs);
    }

    let request = build_compare_request(
        system,
        &SidePayload {
            product_application_id: left_product,
            values: report.normalized.left,
        },
        &SidePayload {
            product_application_id: right_product,
            values: report.normalized.right,
        },
    )?;

    let json = serde_json::to_string_pretty(&request)?;
    if let Some(path) = output {
        fs::write(path, json)?;
        println!("✓ Wrote request {} to {}", request.request_id, path.display());
    } else {
        println!("{json}");
    }
    Ok(())
}

fn cmd_map_error(body_path: &Path, status: Option<u16>) -> CliResult<()> {
    let content = fs::read_to_string(body_path)?;
    let err = match serde_json::from_str::<Value>(&content) {
        Ok(payload) => TransportError {
            status,
            message: String::new(),
            payload: Some(payload),
        },
        Err(_) => TransportError {
            status,
            message: content.trim().to_string(),
            payload: None,
        },
    };

    let mapped = map_compare_error(&err);
    println!("Message: {}", mapped.message);
    println!("Validation error: {}", mapped.is_validation);
    if mapped.field_errors.left.is_empty() && mapped.field_errors.right.is_empty() {
        println!("No field errors");
    } else {
        println!("Field errors:");
        print_side_errors("left", &mapped.field_errors.left);
        print_side_errors("right", &mapped.field_errors.right);
    }
    Ok(())
}
