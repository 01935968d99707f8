//! Encapsulates plaintext and gzip-compressed file input and output.
//!
//! The [`InputFile`] and [`OutputFile`] abstractions let FASTA dumps and
//! genotype exports be read whether or not they were compressed.
//!
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::File;
use std::io::Write;
use std::io::{self, BufWriter};
use std::io::{BufReader, Read};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FileError {
    #[error("cannot open '{0}': {1}")]
    NotFound(String, io::Error),
    #[error("cannot create '{0}': {1}")]
    NotCreated(String, io::Error),
}

/// Check if a file is gzipped by looking for the magic numbers.
///
/// Files shorter than the two magic bytes are never gzipped.
fn is_gzipped_file(file_path: &str) -> io::Result<bool> {
    let file = File::open(file_path)?;
    let mut buffer = Vec::with_capacity(2);
    file.take(2).read_to_end(&mut buffer)?;

    Ok(buffer == [0x1f, 0x8b])
}

/// Represents an input file.
///
/// Plaintext and gzip-compressed input are read through a common interface.
pub struct InputFile {
    pub filepath: String,
}

impl InputFile {
    /// Constructs a new `InputFile`.
    ///
    /// # Arguments
    ///
    /// * `filepath` - A string slice that holds the path to the file. Compression
    ///   is detected from the file contents, not the extension.
    pub fn new(filepath: &str) -> Self {
        Self {
            filepath: filepath.to_string(),
        }
    }

    /// Opens the file and returns a buffered reader.
    ///
    /// A missing or unreadable path is reported as [`FileError::NotFound`] so
    /// callers can name the offending file.
    pub fn reader(&self) -> Result<BufReader<Box<dyn Read>>, FileError> {
        let file = File::open(&self.filepath)
            .map_err(|e| FileError::NotFound(self.filepath.clone(), e))?;
        let is_gzipped = is_gzipped_file(&self.filepath)
            .map_err(|e| FileError::NotFound(self.filepath.clone(), e))?;
        let reader: Box<dyn Read> = if is_gzipped {
            Box::new(GzDecoder::new(file))
        } else {
            Box::new(file)
        };
        Ok(BufReader::new(reader))
    }
}

/// Represents an output file.
///
/// Writes plaintext, or gzip-compressed output when the path ends in `.gz`.
pub struct OutputFile {
    pub filepath: String,
}

impl OutputFile {
    pub fn new(filepath: &str) -> Self {
        Self {
            filepath: filepath.to_string(),
        }
    }

    /// Creates the file and returns a buffered writer.
    ///
    /// A path that cannot be created is reported as [`FileError::NotCreated`].
    pub fn writer(&self) -> Result<Box<dyn Write>, FileError> {
        let outfile = &self.filepath;
        let file =
            File::create(outfile).map_err(|e| FileError::NotCreated(outfile.clone(), e))?;
        let writer: Box<dyn Write> = if outfile.ends_with(".gz") {
            Box::new(BufWriter::new(GzEncoder::new(file, Compression::default())))
        } else {
            Box::new(BufWriter::new(file))
        };
        Ok(writer)
    }
}
