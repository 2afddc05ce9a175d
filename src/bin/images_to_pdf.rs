//! Convert images to a PDF, one image per US Letter page.
//!
//! Usage:
//!   images_to_pdf photo1.jpg photo2.jpg --output album.pdf
//!   images_to_pdf scan.png --transcode --output scan.pdf --summary
//!
//! JPEG inputs are embedded unchanged. With `--transcode`, inputs in any
//! supported format are decoded, flattened onto white and re-encoded as
//! JPEG first.

use clap::Parser;
use pdf_press::api::{Pdf, PDF_MIME_TYPE};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "images_to_pdf", about = "Convert images to a one-page-per-image PDF")]
struct Opts {
    /// Output PDF path
    #[arg(short, long, default_value = "images.pdf")]
    output: PathBuf,

    /// Re-encode every input as JPEG (needed for PNG/TIFF inputs)
    #[arg(short, long)]
    transcode: bool,

    /// Print a JSON summary of the written document
    #[arg(short, long)]
    summary: bool,

    /// Input images, in page order
    #[arg(required = true)]
    inputs: Vec<PathBuf>,
}

fn run(opts: &Opts) -> pdf_press::Result<()> {
    let pdf = if opts.transcode {
        Pdf::from_image_files(&opts.inputs)?
    } else {
        Pdf::from_jpeg_files(&opts.inputs)?
    };

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
