//! Reading mitochondrial SNP calls from a consumer genotyping export.
//!
//! The export is tab-delimited with `#` comment lines:
//!
//! ```text
//! # rsid        chromosome      position        genotype
//! i3001755      MT      146     C
//! i4000757      MT      150     --
//! rs2853508     MT      709     G
//! ```
//!
//! Only rows on the [`MT_CHROMOSOME`] whose genotype is a single `A`, `C`,
//! `G` or `T` are kept. No-calls (`--`), indel codes (`D`, `I`) and
//! heterozygous calls (`AC`) are dropped.

use std::collections::BTreeMap;
use std::io::BufRead;
use std::ops::RangeBounds;

use crate::file::InputFile;
use crate::merge::MergeError;
use crate::remap::Position;
use crate::sequence::Base;

/// The chromosome label for mtDNA in the export.
pub const MT_CHROMOSOME: &str = "MT";

/// One retained SNP call in vendor coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenotypeCall {
    pub position: Position,
    pub base: Base,
}

/// Parse a genotype field, accepting only a single `A`, `C`, `G` or `T`.
fn called_base(genotype: &str) -> Option<Base> {
    match genotype.as_bytes() {
        [byte] => Base::from_byte(*byte).filter(|&base| base != Base::N),
        _ => None,
    }
}

/// Parse a position field.
///
/// Surrounding whitespace and a leading sign are accepted. Negative values
/// and values too large for [`Position`] lie outside any merge window, so
/// they give `Ok(None)` rather than an error.
fn parse_position(field: &str, line: u64) -> Result<Option<Position>, MergeError> {
    let value = field.trim();
    let (negative, digits) = match value.as_bytes().first() {
        Some(b'-') => (true, &value[1..]),
        Some(b'+') => (false, &value[1..]),
        _ => (false, value),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(MergeError::ParseError {
            line,
            value: field.to_string(),
        });
    }
    if negative {
        return Ok(None);
    }
    Ok(digits.parse().ok())
}

/// Build a call from one export row, or `None` if the row is filtered out.
///
/// The position is only parsed after the chromosome and genotype filters
/// pass, so irrelevant rows never fail on their position field.
fn genotype_call(fields: &[&str], line: u64) -> Result<Option<GenotypeCall>, MergeError> {
    let (chrom, position, genotype) = match fields {
        [_, chrom, position, genotype, ..] => (*chrom, *position, *genotype),
        _ => {
            return Err(MergeError::MissingField {
                line,
                found: fields.len(),
            })
        }
    };

    if chrom != MT_CHROMOSOME {
        return Ok(None);
    }
    let base = match called_base(genotype) {
        Some(base) => base,
        None => return Ok(None),
    };
    let call = parse_position(position, line)?.map(|position| GenotypeCall { position, base });
    Ok(call)
}

/// Mitochondrial calls keyed by vendor position, iterated in ascending order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenotypeTable {
    calls: BTreeMap<Position, Base>,
}

impl GenotypeTable {
    pub fn new() -> Self {
        Self {
            calls: BTreeMap::new(),
        }
    }

    /// Read the mtDNA calls from a (possibly gzip-compressed) genotype export.
    pub fn from_path(filepath: &str) -> Result<GenotypeTable, MergeError> {
        let reader = InputFile::new(filepath).reader()?;
        GenotypeTable::from_reader(reader).map_err(|e| e.in_file(filepath))
    }

    /// Read the mtDNA calls from any reader over a genotype export.
    ///
    /// Comment lines and blank lines are skipped. If a position appears more
    /// than once, the later row wins.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<GenotypeTable, MergeError> {
        let mut table = GenotypeTable::new();
        for (index, result) in reader.lines().enumerate() {
            let line = result?;
            let line = line.trim_end_matches('\r');
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let fields: Vec<&str> = line.split('\t').collect();
            if let Some(call) = genotype_call(&fields, index as u64 + 1)? {
                table.insert(call);
            }
        }
        Ok(table)
    }

    /// Insert a call, replacing and returning any earlier call at its position.
    pub fn insert(&mut self, call: GenotypeCall) -> Option<Base> {
        self.calls.insert(call.position, call.base)
    }

    pub fn get(&self, position: Position) -> Option<Base> {
        self.calls.get(&position).copied()
    }

    /// Return the number of positions with a call.
    pub fn len(&self) -> usize {
        self.calls.len()
    }

    /// Return if no calls were retained.
    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    /// Iterate over all calls in ascending position order.
    pub fn iter(&self) -> impl Iterator<Item = GenotypeCall> + '_ {
        Self::to_calls(self.calls.iter())
    }

    /// Iterate over the calls within `range`, in ascending position order.
    pub fn range<B: RangeBounds<Position>>(
        &self,
        range: B,
    ) -> impl Iterator<Item = GenotypeCall> + '_ {
        Self::to_calls(self.calls.range(range))
    }

    fn to_calls<'a>(
        iter: impl Iterator<Item = (&'a Position, &'a Base)> + 'a,
    ) -> impl Iterator<Item = GenotypeCall> + 'a {
        iter.map(|(&position, &base)| GenotypeCall { position, base })
    }
}

impl FromIterator<GenotypeCall> for GenotypeTable {
    fn from_iter<I: IntoIterator<Item = GenotypeCall>>(iter: I) -> Self {
        let mut table = GenotypeTable::new();
        for call in iter {
            table.insert(call);
        }
        table
    }
}
