//! lookbook – command-line lookbook → preview PDF exporter.
//!
//! Usage:
//!   lookbook <lookbook.json> [output.pdf] [--catalog products.json] [--landscape] [--font regular.ttf]
//!
//! If `output.pdf` is omitted the PDF is written next to the input file with
//! the same stem (e.g. `spring.json` → `spring.pdf`).

use std::{
    env, fs,
    path::{Path, PathBuf},
    process,
};

use lookbook_forge::fonts::FontManager;
use lookbook_forge::pipeline::{generate_preview_pdf_with_fonts, PageOrientation, PreviewConfig};
use lookbook_forge::products::{demo_catalog, load_catalog_json};
use lookbook_forge::snapshot::LookbookSnapshot;
use lookbook_forge::style::FontFamily;
use lookbook_forge::LookbookDocument;

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    let mut input_path: Option<PathBuf> = None;
    let mut output_path: Option<PathBuf> = None;
    let mut catalog_path: Option<PathBuf> = None;
    let mut font_path: Option<PathBuf> = None;
    let mut landscape = false;
    let mut positional = 0usize;

    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--landscape" | "-l" => landscape = true,
            "--catalog" | "-c" => catalog_path = Some(flag_value(&mut iter, arg, &args[0])),
            "--font" | "-f" => font_path = Some(flag_value(&mut iter, arg, &args[0])),
            "--help" | "-h" => {
                print_usage(&args[0]);
                process::exit(0);
            }
            other if other.starts_with('-') => {
                eprintln!("Unknown flag: {other}");
                print_usage(&args[0]);
                process::exit(1);
            }
            path => {
                if positional == 0 {
                    input_path = Some(PathBuf::from(path));
                } else if positional == 1 {
                    output_path = Some(PathBuf::from(path));
                } else {
                    eprintln!("Unexpected argument: {path}");
                    print_usage(&args[0]);
                    process::exit(1);
                }
                positional += 1;
            }
        }
    }

    let input = match input_path {
        Some(p) => p,
        None => {
            eprintln!("Error: no lookbook file specified.");
            print_usage(&args[0]);
            process::exit(1);
        }
    };

    // Default output: same directory + same stem as input, but with .pdf
    let output = output_path.unwrap_or_else(|| {
        let mut o = input.clone();
        o.set_extension("pdf");
        o
    });

    let json = read_or_exit(&input);
    let snapshot = match LookbookSnapshot::from_json(&json) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error parsing '{}': {e}", input.display());
            process::exit(1);
        }
    };
    let document = match LookbookDocument::from_snapshot(snapshot) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Invalid lookbook '{}': {e}", input.display());
            process::exit(1);
        }
    };

    let catalog = match catalog_path {
        Some(path) => match load_catalog_json(&read_or_exit(&path)) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error parsing catalog '{}': {e}", path.display());
                process::exit(1);
            }
        },
        None => demo_catalog(),
    };

    let mut fonts = FontManager::default();
    if let Some(path) = font_path {
        let bytes = match fs::read(&path) {
            Ok(b) => b,
            Err(e) => {
                eprintln!("Error reading '{}': {e}", path.display());
                process::exit(1);
            }
        };
        if let Err(e) = fonts.load_font(FontFamily::SansSerif, false, bytes) {
            eprintln!("Error loading font '{}': {e}", path.display());
            process::exit(1);
        }
    }

    let config = PreviewConfig {
        orientation: if landscape {
            PageOrientation::Landscape
        } else {
            PageOrientation::Portrait
        },
        ..PreviewConfig::default()
    };

    match generate_preview_pdf_with_fonts(&document, &catalog, &config, &fonts) {
        Ok((bytes, layout)) => {
            // Create output directory if necessary.
            if let Some(parent) = output.parent() {
                if !parent.as_os_str().is_empty() {
                    if let Err(e) = fs::create_dir_all(parent) {
                        eprintln!("Error creating output directory: {e}");
                        process::exit(1);
                    }
                }
            }
            if let Err(e) = fs::write(&output, &bytes) {
                eprintln!("Error writing '{}': {e}", output.display());
                process::exit(1);
            }
            let pages = layout.pages.len();
            eprintln!(
                "Wrote '{}' ({} bytes, {} page{})",
                output.display(),
                bytes.len(),
                pages,
                if pages == 1 { "" } else { "s" }
            );
        }
        Err(e) => {
            eprintln!("Error generating PDF: {e}");
            process::exit(1);
        }
    }
}

fn flag_value<'a>(iter: &mut impl Iterator<Item = &'a String>, flag: &str, prog: &str) -> PathBuf {
    match iter.next() {
        Some(v) => PathBuf::from(v),
        None => {
            eprintln!("Missing value for {flag}");
            print_usage(prog);
            process::exit(1);
        }
    }
}

fn read_or_exit(path: &Path) -> String {
    match fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error reading '{}': {e}", path.display());
            process::exit(1);
        }
    }
}

fn print_usage(prog: &str) {
    eprintln!("lookbook – lookbook preview exporter (lookbook-forge)");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  {prog} <lookbook.json> [output.pdf] [--catalog products.json] [--landscape] [--font regular.ttf]");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  <lookbook.json>  Saved lookbook snapshot");
    eprintln!("  [output.pdf]     Output path  (default: same stem as input with .pdf)");
    eprintln!();
    eprintln!("Flags:");
    eprintln!("  --catalog, -c    Product catalog JSON array (default: built-in demo catalog)");
    eprintln!("  --font, -f       TTF used to measure sans-serif text when wrapping");
    eprintln!("  --landscape      Use landscape page orientation (A4 841×595 pt)");
    eprintln!("  --help           Print this message");
}
