use std::fs;
use std::path::PathBuf;

use crate::error::Result;
use crate::pptx;

/// Extract slide text from a presentation into a text file
pub fn run(file: PathBuf, output: Option<PathBuf>, dry_run: bool) -> Result<()> {
    pptx::validate(&file)?;

    let text = pptx::extract_text(&file)?;

    if dry_run {
        println!("{}", text);
        return Ok(());
    }

    let output_path = output.unwrap_or_else(|| pptx::output_path(&file));
    fs::write(&output_path, text)?;

    println!("Extracted text saved: {}", output_path.display());
    Ok(())
}
