use console::style;
use markercheck_core::{AnalysedFile, ScanSummary};
use std::io::{self, Write};

pub fn print_file_report(file: &AnalysedFile) -> io::Result<()> {
    write_file_report(&mut io::stdout().lock(), file)
}

pub fn print_summary(summary: &ScanSummary) -> io::Result<()> {
    write_summary(&mut io::stdout().lock(), summary)
}

pub fn write_file_report<W: Write>(out: &mut W, file: &AnalysedFile) -> io::Result<()> {
    writeln!(out, "{}:", style(file.path.display()).bold())?;
    match &file.outcome {
        Ok(report) => {
            for (line, violations) in report.iter() {
                writeln!(out, "    * line {}", style(line).cyan())?;
                for violation in violations {
                    writeln!(out, "        - {}", style(violation).red())?;
                }
            }
        }
        Err(err_msg) => {
            writeln!(out, "    {} {}", style("⚠️").yellow(), style(err_msg).red())?;
        }
    }
    writeln!(out)
}

pub fn write_summary<W: Write>(out: &mut W, summary: &ScanSummary) -> io::Result<()> {
    writeln!(
        out,
        "Number of files analysed: {}",
        style(summary.files_analysed).green()
    )?;
    writeln!(
        out,
        "Files with errors: {} ({} {})",
        style(summary.files_with_violations).red(),
        summary.violations,
        if summary.violations == 1 {
            "violation"
        } else {
            "violations"
        }
    )?;
    if summary.files_unreadable > 0 {
        writeln!(
            out,
            "Files that could not be read: {}",
            style(summary.files_unreadable).red()
        )?;
    }
    Ok(())
}
