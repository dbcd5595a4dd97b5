//! # Function Catalogue Validator
//!
//! Command-line utility that checks function catalogue files for structural
//! problems before they are shipped with an algorithm application.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --bin catalog-validator schema.json
//! cargo run --bin catalog-validator ./catalogues/
//! ```
//!
//! With a directory, every `.json` and `.js` file in it is validated.
//!
//! ## Output Examples
//!
//! ```text
//! Validating catalogue file: schema.json
//! ✓ Catalogue is valid!
//!
//! Catalogue Summary:
//!   Version: 3q2+7w8AAAA=
//!   Functions: 4
//!   Parameter types:
//!     - array: 2
//!     - number: 3
//!   Functions:
//!     - add (函数1-加法): 2 parameter(s), 2 required, 1 result field(s)
//! ```
//!
//! ```text
//! Validating catalogue file: broken.json
//! ❌ Catalogue validation failed:
//!   [0].input.properties.num1.type: Property 'num1' is missing a type
//! ```
//!
//! ## Exit Codes
//!
//! - `0`: All catalogues are valid
//! - `1`: One or more catalogues are invalid or could not be read

use function_catalog::{CatalogError, FunctionCatalog};
use std::env;
use std::fs;
use std::path::Path;
use std::process;

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <catalogue-file-or-directory>", args[0]);
        eprintln!();
        eprintln!("Examples:");
        eprintln!("  {} schema.json", args[0]);
        eprintln!("  {} ./catalogues/", args[0]);
        process::exit(1);
    }

    let path = Path::new(&args[1]);

    let ok = if path.is_file() {
        validate_single_file(path)
    } else if path.is_dir() {
        validate_directory(path)
    } else {
        eprintln!(
            "Error: '{}' is not a valid file or directory",
            path.display()
        );
        false
    };

    if !ok {
        process::exit(1);
    }
}

fn validate_single_file(file_path: &Path) -> bool {
    println!("Validating catalogue file: {}", file_path.display());

    match FunctionCatalog::from_file(file_path) {
        Ok(catalog) => {
            println!("✓ Catalogue is valid!");
            print_catalog_summary(&catalog);
            true
        }
        Err(e) => {
            report_error(&e, "");
            false
        }
    }
}

fn validate_directory(dir_path: &Path) -> bool {
    println!("Validating catalogues in directory: {}", dir_path.display());

    let entries = match fs::read_dir(dir_path) {
        Ok(entries) => entries,
        Err(e) => {
            eprintln!("Error reading directory: {}", e);
            return false;
        }
    };

    let mut files: Vec<_> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| {
            matches!(
                path.extension().and_then(|s| s.to_str()),
                Some("json") | Some("js")
            )
        })
        .collect();
    files.sort();

    let mut valid_count = 0;
    let mut error_count = 0;

    for path in &files {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        println!("\nValidating: {}", file_name);

        match FunctionCatalog::from_file(path) {
            Ok(catalog) => {
                println!(
                    "  ✓ Valid - {} function(s): {}",
                    catalog.len(),
                    catalog.function_names().join(", ")
                );
                valid_count += 1;
            }
            Err(e) => {
                report_error(&e, "  ");
                error_count += 1;
            }
        }
    }

    println!("\nValidation Summary:");
    println!("  Valid catalogues: {}", valid_count);
    println!("  Invalid catalogues: {}", error_count);

    error_count == 0
}

fn report_error(error: &CatalogError, indent: &str) {
    match error {
        CatalogError::InvalidCatalog { issues } => {
            eprintln!("{}❌ Catalogue validation failed:", indent);
            for issue in issues {
                eprintln!("{}  {}", indent, issue);
            }
        }
        other => eprintln!("{}❌ Catalogue validation failed: {}", indent, other),
    }
}

fn print_catalog_summary(catalog: &FunctionCatalog) {
    println!();
    println!("Catalogue Summary:");
    match catalog.version() {
        Ok(version) => println!("  Version: {}", version),
        Err(e) => println!("  Version: unavailable ({})", e),
    }
    println!("  Functions: {}", catalog.len());

    let mut type_counts: Vec<_> = catalog.parameter_type_counts().into_iter().collect();
    type_counts.sort();
    if !type_counts.is_empty() {
        println!("  Parameter types:");
        for (schema_type, count) in type_counts {
            println!("    - {}: {}", schema_type, count);
        }
    }

    println!("  Functions:");
    for descriptor in catalog {
        println!(
            "    - {} ({}): {} parameter(s), {} required, {} result field(s)",
            descriptor.function,
            descriptor.title,
            descriptor.input.properties.len(),
            descriptor.input.required.len(),
            descriptor.output.properties.len()
        );
    }
}
