//! mdmerge CLI - append markdown files to a Word document

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::json;

use mdmerge::{
    to_json, DocumentSink, DocxStyle, FileReport, JsonFormat, MarkdownParser, MergeOptions,
    MergeReport, Merger, ParseOptions,
};

#[derive(Parser)]
#[command(name = "mdmerge")]
#[command(version)]
#[command(about = "Append markdown files to a Word document", long_about = None)]
struct Cli {
    /// Markdown files, merged in the given order
    #[arg(value_name = "INPUT", required = true)]
    inputs: Vec<PathBuf>,

    /// Output .docx file
    #[arg(short, long, value_name = "DOCX", required_unless_present = "dump")]
    output: Option<PathBuf>,

    /// Existing .docx to append to (a new document is used if it cannot be loaded)
    #[arg(short, long, value_name = "DOCX")]
    base: Option<PathBuf>,

    /// Do not start the appended content on a new page
    #[arg(long)]
    no_leading_break: bool,

    /// Do not add a blank paragraph after tables
    #[arg(long)]
    no_table_spacer: bool,

    /// Warn about unterminated * markers
    #[arg(long)]
    warn_emphasis: bool,

    /// Fail on the first missing file, unloadable base or ragged table row
    #[arg(long)]
    strict: bool,

    /// Font for appended text
    #[arg(long, env = "MDMERGE_FONT", value_name = "NAME")]
    font: Option<String>,

    /// Body text size in points
    #[arg(long, value_name = "PT")]
    body_size: Option<f32>,

    /// Print the operations of each input as JSON instead of writing a document
    #[arg(long)]
    dump: bool,

    /// Output compact JSON
    #[arg(long)]
    compact: bool,

    /// Write the merge report as JSON
    #[arg(long, value_name = "FILE")]
    report: Option<PathBuf>,
}

impl Cli {
    fn json_format(&self) -> JsonFormat {
        if self.compact {
            JsonFormat::Compact
        } else {
            JsonFormat::Pretty
        }
    }

    fn parse_options(&self) -> ParseOptions {
        ParseOptions::new()
            .with_table_spacer(!self.no_table_spacer)
            .with_emphasis_warnings(self.warn_emphasis)
    }

    fn merge_options(&self) -> MergeOptions {
        let mut style = DocxStyle::default();
        if let Some(ref font) = self.font {
            style = style.with_font(font.clone());
        }
        if let Some(size) = self.body_size {
            style = style.with_body_size(size);
        }

        let options = MergeOptions::new()
            .with_parse_options(self.parse_options())
            .with_style(style)
            .with_leading_page_break(!self.no_leading_break);

        if self.strict {
            options.strict()
        } else {
            options
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = if cli.dump {
        cmd_dump(&cli)
    } else {
        cmd_merge(&cli)
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_merge(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let output = cli.output.as_deref().ok_or("--output is required")?;
    if let Some(size) = cli.body_size {
        if !size.is_finite() || size <= 0.0 {
            return Err(format!("Invalid body size: {}", size).into());
        }
    }

    let merger = Merger::with_options(cli.merge_options());

    let pb = ProgressBar::new(cli.inputs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    pb.set_message("Loading base document...");
    let (mut doc, fallback) = merger.load_base(cli.base.as_deref())?;
    if let Some(ref reason) = fallback {
        pb.suspend(|| eprintln!("{}: {}", "Warning".yellow().bold(), reason));
    }

    let mut report = merger.merge_into_with(&mut doc, &cli.inputs, |file| {
        pb.set_message(file_name(&file.path));
        if let Some(ref reason) = file.skip_reason {
            pb.suspend(|| eprintln!("{}: {}", "Skipped".yellow().bold(), reason));
        }
        pb.inc(1);
    })?;

    pb.set_message("Saving...");
    doc.save(output)?;
    pb.finish_with_message("Done!");

    report.base_document = cli.base.clone();
    report.base_fallback = fallback;
    report.output = Some(output.to_path_buf());

    print_summary(&report);

    if let Some(ref path) = cli.report {
        fs::write(path, to_json(&report, cli.json_format())?)?;
        println!("{} {}", "Report saved to".green(), path.display());
    }

    Ok(())
}

fn cmd_dump(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let parser = MarkdownParser::with_options(cli.parse_options());
    let mut entries = Vec::with_capacity(cli.inputs.len());

    for path in &cli.inputs {
        let text = match mdmerge::merge::read_input(path) {
            Ok(text) => text,
            Err(e) if e.is_recoverable() && !cli.strict => {
                eprintln!("{}: {}", "Skipped".yellow().bold(), e);
                continue;
            }
            Err(e) => return Err(e.into()),
        };
        let parsed = parser.parse(&text);
        entries.push(json!({
            "path": path,
            "operations": parsed.operations,
            "warnings": parsed.warnings,
        }));
    }

    println!("{}", to_json(&entries, cli.json_format())?);
    Ok(())
}

fn print_summary(report: &MergeReport) {
    println!("\n{}", "Merged files:".green().bold());
    let last = report.files.len().saturating_sub(1);
    for (i, file) in report.files.iter().enumerate() {
        let branch = if i == last { "└─" } else { "├─" };
        println!("  {} {}", branch.dimmed(), describe(file));
    }

    let stats = &report.stats;
    println!();
    println!("{}: {}", "Headings".bold(), stats.heading_count);
    println!("{}: {}", "Paragraphs".bold(), stats.paragraph_count);
    println!("{}: {}", "Tables".bold(), stats.table_count);
    println!("{}: {}", "Page breaks".bold(), stats.page_break_count);

    if report.has_warnings() {
        println!(
            "\n{} {} warning(s), run with RUST_LOG=warn for details",
            "Note:".yellow().bold(),
            report.warning_count()
        );
    }
    if let Some(ref output) = report.output {
        println!("\n{} {}", "Saved to".green(), output.display());
    }
}

fn describe(file: &FileReport) -> String {
    let name = file_name(&file.path);
    if file.is_merged() {
        let mut line = format!("{} ({} operations)", name, file.stats.operation_count());
        if !file.warnings.is_empty() {
            line.push_str(&format!(", {} warning(s)", file.warnings.len()));
        }
        line
    } else {
        format!("{} {}", name, "skipped".yellow())
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_required_without_dump() {
        assert!(Cli::try_parse_from(["mdmerge", "a.md"]).is_err());
        assert!(Cli::try_parse_from(["mdmerge", "--dump", "a.md"]).is_ok());
    }

    #[test]
    fn test_flags_to_options() {
        let cli = Cli::try_parse_from([
            "mdmerge",
            "-o",
            "out.docx",
            "--no-leading-break",
            "--no-table-spacer",
            "--warn-emphasis",
            "--font",
            "Arial",
            "--body-size",
            "11",
            "a.md",
            "b.md",
        ])
        .unwrap();

        let options = cli.merge_options();
        assert!(!options.leading_page_break);
        assert!(!options.parse.table_spacer);
        assert!(options.parse.emphasis_warnings);
        assert_eq!(options.style.font_name, "Arial");
        assert_eq!(options.style.body_size, 11.0);
        assert_eq!(cli.inputs.len(), 2);
    }

    #[test]
    fn test_file_name() {
        assert_eq!(file_name(Path::new("/tmp/ch5.md")), "ch5.md");
    }
}
