use clap::Parser;
use mtmerge::file::OutputFile;
use mtmerge::{merge_files, Fasta, MergeError, MergeReport};
use std::io::{self, Write};

const INFO: &str = "\
mtmerge: merge genotyping mtDNA SNPs into a FASTA sequence

Coding region SNPs (positions 575-16000) from the 'MT' rows of a
tab-delimited genotype export (rsid, chromosome, position, genotype) are
converted to Cambridge numbering and written over the FASTA sequence.
The merged FASTA is printed to standard out.

The FASTA is not compared against the Cambridge reference, so any
insertions or deletions must be removed from it beforehand.
";

#[derive(Parser, Debug)]
#[clap(name = "mtmerge")]
#[clap(about = INFO)]
struct Cli {
    /// Print a merge summary to standard error (repeat for every substitution)
    #[arg(short, long, action = clap::ArgAction::Count)]
    debug: u8,

    /// the output file path (if not set, uses standard out)
    #[arg(short, long)]
    output: Option<String>,

    /// write a TSV of every applied substitution to this path
    #[arg(short, long)]
    report: Option<String>,

    /// a FASTA dump of the full mtDNA sequence
    #[arg(required = true)]
    fasta: String,

    /// a genotype export with 'MT' chromosome SNPs
    #[arg(required = true)]
    genotypes: String,
}

fn log_report(fasta: &Fasta, report: &MergeReport, debug: u8) {
    if debug == 0 {
        return;
    }
    eprintln!(
        "merged {} calls ({} changed bases), {} outside the coding region, {} unmapped",
        report.substitutions.len(),
        report.changed(),
        report.outside_window,
        report.unmapped
    );
    if debug < 2 {
        return;
    }
    for sub in &report.substitutions {
        let context = fasta
            .sequence
            .window(sub.index.saturating_sub(1), sub.index + 2);
        eprintln!(
            "{}\t{}\t{} => {}\t{}",
            sub.source_position, sub.index, sub.previous, sub.called, context
        );
    }
}

fn run(cli: &Cli) -> Result<(), MergeError> {
    let (fasta, report) = merge_files(&cli.fasta, &cli.genotypes)?;
    log_report(&fasta, &report, cli.debug);

    // open writer, possibly to stdout, before anything is written
    let mut writer: Box<dyn Write> = match &cli.output {
        Some(path) => OutputFile::new(path).writer()?,
        None => Box::new(io::BufWriter::new(io::stdout().lock())),
    };
    fasta.write(&mut writer)?;
    writer.flush()?;
    drop(writer);

    if let Some(path) = &cli.report {
        report.write_tsv(path)?;
    }
    Ok(())
}

fn main() {
    match run(&Cli::parse()) {
        Ok(_) => {}
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_positional_arguments() {
        let cli = Cli::try_parse_from(["mtmerge", "a.fasta", "genome.txt"]).unwrap();
        assert_eq!(cli.fasta, "a.fasta");
        assert_eq!(cli.genotypes, "genome.txt");
        assert_eq!(cli.debug, 0);
        assert!(cli.output.is_none());
        assert!(cli.report.is_none());
    }

    #[test]
    fn test_requires_both_inputs() {
        assert!(Cli::try_parse_from(["mtmerge", "a.fasta"]).is_err());
        assert!(Cli::try_parse_from(["mtmerge"]).is_err());
    }

    #[test]
    fn test_flags() {
        let cli = Cli::try_parse_from([
            "mtmerge", "-dd", "-o", "out.fa.gz", "--report", "subs.tsv", "a.fa", "g.txt",
        ])
        .unwrap();
        assert_eq!(cli.debug, 2);
        assert_eq!(cli.output.as_deref(), Some("out.fa.gz"));
        assert_eq!(cli.report.as_deref(), Some("subs.tsv"));
    }

    #[test]
    fn test_output_and_report_written() {
        let dir = tempdir().unwrap();
        let path = |name: &str| dir.path().join(name).to_str().unwrap().to_string();
        fs::write(path("f.fa"), format!(">s\n{}\n", "A".repeat(800))).unwrap();
        fs::write(path("g.txt"), "rs1\tMT\t700\tG\n").unwrap();

        let cli = Cli::try_parse_from([
            "mtmerge".to_string(),
            "-o".to_string(),
            path("out.fa"),
            "-r".to_string(),
            path("rep.tsv"),
            path("f.fa"),
            path("g.txt"),
        ])
        .unwrap();
        run(&cli).unwrap();

        let out = fs::read_to_string(path("out.fa")).unwrap();
        assert!(out.starts_with(">s\n"));
        assert_eq!(out.matches('G').count(), 1);
        let rep = fs::read_to_string(path("rep.tsv")).unwrap();
        assert!(rep.ends_with("700\t697\tA\tG\n"));
    }

    #[test]
    fn test_bad_output_path_writes_nothing() {
        let dir = tempdir().unwrap();
        let path = |name: &str| dir.path().join(name).to_str().unwrap().to_string();
        fs::write(path("f.fa"), format!(">s\n{}\n", "A".repeat(800))).unwrap();
        fs::write(path("g.txt"), "rs1\tMT\t700\tG\n").unwrap();
        let output = path("missing/x.fa");

        let cli = Cli::try_parse_from([
            "mtmerge".to_string(),
            "-r".to_string(),
            path("rep.tsv"),
            "-o".to_string(),
            output.clone(),
            path("f.fa"),
            path("g.txt"),
        ])
        .unwrap();
        let message = run(&cli).unwrap_err().to_string();
        assert!(message.contains(&output), "{}", message);
        assert!(!dir.path().join("rep.tsv").exists());
    }
}
