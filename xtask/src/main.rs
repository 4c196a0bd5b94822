//! Developer tasks (schema generation, mode inspection).
//!
//! Keeping this separate keeps the engine crates free of any IO.

use anyhow::{Context, bail};
use pkgid_types::{PackageIdMode, Reference};
use schemars::schema_for;
use std::fs;
use std::path::PathBuf;

/// Get the project root (parent of xtask directory).
fn project_root() -> anyhow::Result<PathBuf> {
    let manifest_dir = match std::env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => std::env::current_dir().context("Cannot determine current directory")?,
    };

    // If we're in the xtask directory, go up one level
    if manifest_dir.ends_with("xtask")
        && let Some(parent) = manifest_dir.parent()
    {
        return Ok(parent.to_path_buf());
    }
    Ok(manifest_dir)
}

/// Get the schemas directory path.
fn schemas_dir() -> anyhow::Result<PathBuf> {
    Ok(project_root()?.join("schemas"))
}

/// Schema definition with its target filename.
struct SchemaSpec {
    filename: &'static str,
    generate: fn() -> schemars::Schema,
}

/// Generate the PkgIdConfigV1 schema.
fn generate_config_schema() -> schemars::Schema {
    schema_for!(pkgid_settings::PkgIdConfigV1)
}

/// Generate the minimized info (remote metadata) schema.
fn generate_min_info_schema() -> schemars::Schema {
    schema_for!(pkgid_domain::MinInfo)
}

/// List of schemas to generate.
fn schema_specs() -> Vec<SchemaSpec> {
    vec![
        SchemaSpec {
            filename: "pkgid.config.v1.json",
            generate: generate_config_schema,
        },
        SchemaSpec {
            filename: "pkgid.info-min.v1.json",
            generate: generate_min_info_schema,
        },
    ]
}

/// Serialize a schema to pretty-printed JSON with trailing newline.
fn serialize_schema(schema: &schemars::Schema) -> anyhow::Result<String> {
    let mut json = serde_json::to_string_pretty(schema).context("Failed to serialize schema")?;
    json.push('\n');
    Ok(json)
}

/// Emit schemas to the schemas/ directory.
fn emit_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir()?;

    if !dir.exists() {
        fs::create_dir_all(&dir).context("Failed to create schemas directory")?;
    }

    for spec in schema_specs() {
        let schema = (spec.generate)();
        let json = serialize_schema(&schema)?;
        let path = dir.join(spec.filename);

        fs::write(&path, &json)
            .with_context(|| format!("Failed to write schema to {}", path.display()))?;

        println!("Wrote {}", path.display());
    }

    println!("\nSchemas emitted successfully.");
    Ok(())
}

/// Validate that schemas in the repo match what would be generated.
fn validate_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir()?;
    let mut missing = Vec::new();
    let mut mismatched = Vec::new();

    for spec in schema_specs() {
        let path = dir.join(spec.filename);

        if !path.exists() {
            missing.push(spec.filename);
            continue;
        }

        let expected = serialize_schema(&(spec.generate)())?;
        let actual = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        if expected != actual {
            mismatched.push(spec.filename);
        }
    }

    if missing.is_empty() && mismatched.is_empty() {
        println!("All schemas are up to date.");
        return Ok(());
    }
    if !missing.is_empty() {
        eprintln!("Missing schemas:");
        for name in &missing {
            eprintln!("  - {}", name);
        }
    }
    if !mismatched.is_empty() {
        eprintln!("Schemas out of date:");
        for name in &mismatched {
            eprintln!("  - {}", name);
        }
    }
    eprintln!("\nRun `cargo xtask emit-schemas` to regenerate.");
    bail!("Schema validation failed")
}

/// Print how a reference renders under every mode.
fn render_modes(reference: Option<&str>) -> anyhow::Result<()> {
    let Some(text) = reference else {
        bail!("render-modes needs a reference, e.g. zlib/1.2.11@user/channel#rrev:id#prev");
    };
    let reference = Reference::parse(text)?;
    for mode in PackageIdMode::ALL {
        let rendered = pkgid_domain::render(&reference, mode).unwrap_or_else(|| "-".to_string());
        println!("{:<24}{}", mode.as_str(), rendered);
    }
    Ok(())
}

fn print_help() {
    eprintln!("xtask commands:");
    eprintln!("  help                 Show this message");
    eprintln!("  emit-schemas         Generate JSON schemas from Rust types to schemas/");
    eprintln!("  validate-schemas     Check if schemas/ matches generated output (for CI)");
    eprintln!("  print-schema-ids     Print known schema IDs");
    eprintln!("  render-modes <ref>   Show a reference under every package id mode");
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let cmd = args.get(1).map(|s| s.as_str()).unwrap_or("help");

    match cmd {
        "help" | "--help" | "-h" => {
            print_help();
            Ok(())
        }
        "emit-schemas" => emit_schemas(),
        "validate-schemas" => validate_schemas(),
        "render-modes" => render_modes(args.get(2).map(String::as_str)),
        "print-schema-ids" => {
            for spec in schema_specs() {
                let name = spec.filename.trim_end_matches(".json");
                println!("{}", name);
            }
            Ok(())
        }
        other => bail!("unknown xtask command: {other}\n\nRun `cargo xtask help` for usage."),
    }
    .context("xtask failed")
}
