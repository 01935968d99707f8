//! Nucleotide sequences and FASTA dumps.
//!
//! A [`Fasta`] is a single header line and one flat [`Sequence`] of bases.
//! Reading is deliberately forgiving: any character outside the base
//! alphabet is dropped, as is every line starting with `<`. Writing wraps
//! the sequence at [`FASTA_LINE_WIDTH`] bases per line.

use serde::Serialize;
use std::fmt;
use std::io::{self, BufRead, Write};

use crate::file::InputFile;
use crate::merge::MergeError;

/// Number of bases per output line.
pub const FASTA_LINE_WIDTH: usize = 80;

/// A single nucleotide, `N` being an unknown base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Base {
    A,
    C,
    G,
    N,
    T,
}

impl Base {
    /// Parse one byte. Only uppercase `ACGNT` are bases.
    pub fn from_byte(byte: u8) -> Option<Base> {
        match byte {
            b'A' => Some(Base::A),
            b'C' => Some(Base::C),
            b'G' => Some(Base::G),
            b'N' => Some(Base::N),
            b'T' => Some(Base::T),
            _ => None,
        }
    }

    pub fn as_byte(self) -> u8 {
        match self {
            Base::A => b'A',
            Base::C => b'C',
            Base::G => b'G',
            Base::N => b'N',
            Base::T => b'T',
        }
    }

    pub fn as_char(self) -> char {
        self.as_byte() as char
    }
}

impl fmt::Display for Base {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// An ordered run of bases, indexed from zero.
///
/// The length is fixed once read; merging only overwrites bases in place.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Sequence {
    bases: Vec<Base>,
}

impl Sequence {
    pub fn new(bases: Vec<Base>) -> Self {
        Self { bases }
    }

    /// Return the number of bases.
    pub fn len(&self) -> usize {
        self.bases.len()
    }

    /// Return if the sequence has no bases.
    pub fn is_empty(&self) -> bool {
        self.bases.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Base> {
        self.bases.get(index).copied()
    }

    /// Overwrite the base at `index`, returning the previous base, or `None`
    /// if `index` is past the end (in which case nothing changes).
    pub fn set(&mut self, index: usize, base: Base) -> Option<Base> {
        let slot = self.bases.get_mut(index)?;
        Some(std::mem::replace(slot, base))
    }

    pub fn iter(&self) -> impl Iterator<Item = Base> + '_ {
        self.bases.iter().copied()
    }

    /// The bases in `[start, end)`, clamped to the sequence bounds.
    pub fn window(&self, start: usize, end: usize) -> String {
        let end = end.min(self.len());
        let start = start.min(end);
        self.bases[start..end].iter().map(|b| b.as_char()).collect()
    }

    /// Iterate over consecutive lines of at most `width` bases.
    pub fn lines(&self, width: usize) -> impl Iterator<Item = &[Base]> {
        self.bases.chunks(width.max(1))
    }
}

impl FromIterator<Base> for Sequence {
    fn from_iter<I: IntoIterator<Item = Base>>(iter: I) -> Self {
        Sequence::new(iter.into_iter().collect())
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for base in &self.bases {
            write!(f, "{}", base)?;
        }
        Ok(())
    }
}

/// The bases contributed by one data line of a FASTA dump.
fn sequence_line(line: &[u8]) -> impl Iterator<Item = Base> + '_ {
    let skip = line.first() == Some(&b'<');
    line.iter()
        .filter(move |_| !skip)
        .filter_map(|&byte| Base::from_byte(byte))
}

/// A FASTA dump: its header line and flattened sequence.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Fasta {
    /// The first line of the file, without its line terminator.
    pub header: String,
    pub sequence: Sequence,
}

impl Fasta {
    /// Read a FASTA dump from a (possibly gzip-compressed) file.
    pub fn from_path(filepath: &str) -> Result<Fasta, MergeError> {
        let reader = InputFile::new(filepath).reader()?;
        Fasta::from_reader(reader).map_err(|e| MergeError::ReadError(filepath.to_string(), e))
    }

    /// Read a FASTA dump from any buffered reader.
    ///
    /// The first line is the header and is kept verbatim apart from its line
    /// terminator. An input with no data lines gives an empty sequence.
    pub fn from_reader<R: BufRead>(mut reader: R) -> io::Result<Fasta> {
        let mut header = String::new();
        reader.read_line(&mut header)?;
        let header = header.trim_end_matches(&['\r', '\n'][..]).to_string();

        let mut bases = Vec::new();
        for line in reader.split(b'\n') {
            bases.extend(sequence_line(&line?));
        }

        Ok(Fasta {
            header,
            sequence: Sequence::new(bases),
        })
    }

    /// Write the header then the sequence wrapped at [`FASTA_LINE_WIDTH`].
    pub fn write<W: Write + ?Sized>(&self, writer: &mut W) -> io::Result<()> {
        writeln!(writer, "{}", self.header)?;
        for line in self.sequence.lines(FASTA_LINE_WIDTH) {
            let bytes: Vec<u8> = line.iter().map(|b| b.as_byte()).collect();
            writer.write_all(&bytes)?;
            writer.write_all(b"\n")?;
        }
        Ok(())
    }
}
