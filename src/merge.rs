use serde::Serialize;
use std::io;
use std::ops::RangeInclusive;
use thiserror::Error;

use crate::file::{FileError, OutputFile};
use crate::genotype::GenotypeTable;
use crate::remap::{remap_position, Position, CODING_REGION};
use crate::sequence::{Base, Fasta, Sequence};

#[derive(Error, Debug)]
pub enum MergeError {
    #[error("IO error: {0}")]
    IOError(#[from] io::Error),
    #[error("{0}")]
    FileError(#[from] FileError),
    #[error("error reading '{0}': {1}")]
    ReadError(String, io::Error),
    #[error("Report writing error: {0}")]
    ReportError(#[from] csv::Error),
    #[error("line {line}: expected 4 tab-separated fields, found {found}")]
    MissingField { line: u64, found: usize },
    #[error("line {line}: failed to parse position from string: {value}")]
    ParseError { line: u64, value: String },
    #[error(
        "position {position} remaps to index {index}, past the end of the {len} base sequence"
    )]
    RemapOutOfBounds {
        position: Position,
        index: usize,
        len: usize,
    },
    #[error("{0}: {1}")]
    InFile(String, Box<MergeError>),
}

impl MergeError {
    /// Attach the path of the file being read to an error.
    pub fn in_file(self, filepath: &str) -> MergeError {
        match self {
            MergeError::IOError(e) => MergeError::ReadError(filepath.to_string(), e),
            MergeError::FileError(e) => MergeError::FileError(e),
            other => MergeError::InFile(filepath.to_string(), Box::new(other)),
        }
    }
}

/// One genotype call written into the sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Substitution {
    /// The call's position in vendor coordinates.
    pub source_position: Position,
    /// The 0-based sequence index overwritten.
    pub index: usize,
    pub previous: Base,
    pub called: Base,
}

impl Substitution {
    /// Whether the call disagreed with the base already in the sequence.
    pub fn is_change(&self) -> bool {
        self.previous != self.called
    }
}

/// What a merge did with each genotype call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeReport {
    /// Calls written into the sequence, in ascending source position.
    pub substitutions: Vec<Substitution>,
    /// Calls ignored for lying outside the merge window.
    pub outside_window: usize,
    /// Calls in the window with no Cambridge counterpart.
    pub unmapped: usize,
}

impl MergeReport {
    /// The number of calls that changed a base.
    pub fn changed(&self) -> usize {
        self.substitutions.iter().filter(|s| s.is_change()).count()
    }

    /// Write the applied substitutions to a tab-delimited file with a header.
    ///
    /// # Arguments
    ///  * `filepath`: The filepath to write to. If the filepath has an `.gz`
    ///    extension, the output will be gzip compressed.
    pub fn write_tsv(&self, filepath: &str) -> Result<(), MergeError> {
        let writer = OutputFile::new(filepath).writer()?;
        let mut wtr = csv::WriterBuilder::new()
            .delimiter(b'\t')
            .from_writer(writer);
        for substitution in &self.substitutions {
            wtr.serialize(substitution)?;
        }
        wtr.flush()?;
        Ok(())
    }
}

/// Merge the coding-region calls of `calls` into `sequence`.
///
/// This is [`merge_calls_in_window`] over [`CODING_REGION`].
pub fn merge_calls(
    sequence: &mut Sequence,
    calls: &GenotypeTable,
) -> Result<MergeReport, MergeError> {
    merge_calls_in_window(sequence, calls, CODING_REGION)
}

/// Overwrite `sequence` with every call whose vendor position lies in
/// `window`, in ascending position order.
///
/// Calls whose position has no Cambridge counterpart are skipped. A call
/// remapping past the end of the sequence is an error; the calls before it
/// have already been written, so `sequence` is left partially merged.
pub fn merge_calls_in_window(
    sequence: &mut Sequence,
    calls: &GenotypeTable,
    window: RangeInclusive<Position>,
) -> Result<MergeReport, MergeError> {
    let mut report = MergeReport::default();
    let mut selected = 0;

    for call in calls.range(window) {
        selected += 1;
        let index = match remap_position(call.position) {
            Some(index) => index,
            None => {
                report.unmapped += 1;
                continue;
            }
        };
        let previous = sequence
            .set(index, call.base)
            .ok_or(MergeError::RemapOutOfBounds {
                position: call.position,
                index,
                len: sequence.len(),
            })?;
        report.substitutions.push(Substitution {
            source_position: call.position,
            index,
            previous,
            called: call.base,
        });
    }

    report.outside_window = calls.len() - selected;
    Ok(report)
}

/// Read a FASTA dump and a genotype export, and merge the export's
/// coding-region mtDNA calls into the FASTA sequence.
pub fn merge_files(
    fasta_path: &str,
    genotype_path: &str,
) -> Result<(Fasta, MergeReport), MergeError> {
    let mut fasta = Fasta::from_path(fasta_path)?;
    let calls = GenotypeTable::from_path(genotype_path)?;
    let report = merge_calls(&mut fasta.sequence, &calls)?;
    Ok((fasta, report))
}
