//! Convert a plain-text file to a paginated PDF.
//!
//! Usage:
//!   text_to_pdf notes.txt --output notes.pdf
//!   text_to_pdf notes.txt --summary

use clap::Parser;
use pdf_press::api::{Pdf, PDF_MIME_TYPE};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "text_to_pdf", about = "Convert UTF-8 text to a paginated PDF")]
struct Opts {
    /// Output PDF path
    #[arg(short, long, default_value = "document.pdf")]
    output: PathBuf,

    /// Print a JSON summary of the written document
    #[arg(short, long)]
    summary: bool,

    /// Input text file
    input: PathBuf,
}

fn run(opts: &Opts) -> pdf_press::Result<()> {
    let pdf = Pdf::from_text_file(&opts.input)?;

    pdf.save(&opts.output)?;
    log::info!(
        "Wrote {} ({}, {} pages, {} bytes)",
        opts.output.display(),
        PDF_MIME_TYPE,
        pdf.page_count(),
        pdf.len()
    );

    if opts.summary {
        println!("{}", pdf.summary()?.to_json()?);
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let opts = Opts::parse();

    match run(&opts) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        },
    }
}
