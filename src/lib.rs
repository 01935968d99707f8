//! Merge mitochondrial SNP calls from a consumer genotyping export into a
//! full-sequence mtDNA FASTA dump.
//!
//! A FASTA dump of an mtDNA sequence (in Cambridge reference numbering) is
//! read into a [`Fasta`]; the `MT` rows of a tab-delimited genotype export
//! are read into a [`GenotypeTable`]. Calls in the coding region
//! (vendor positions 575–16000) are remapped to Cambridge numbering and
//! written over the FASTA sequence, which is then re-emitted wrapped at 80
//! bases per line.
//!
//! ```no_run
//! use mtmerge::prelude::*;
//! let mut fasta = Fasta::from_path("123456-FASTA.fasta")
//!                   .expect("could not read FASTA");
//! let calls = GenotypeTable::from_path("genome_Someone.txt")
//!                   .expect("could not read genotype export");
//!
//! let report = merge_calls(&mut fasta.sequence, &calls)
//!                   .expect("merge failed");
//! eprintln!("{} bases changed", report.changed());
//! fasta.write(&mut std::io::stdout()).expect("write failed");
//! ```
//!
//! Both inputs may be gzip-compressed.

pub mod file;
pub mod genotype;
pub mod merge;
pub mod remap;
pub mod sequence;

pub use genotype::{GenotypeCall, GenotypeTable};
pub use merge::{merge_calls, merge_files, MergeError, MergeReport};
pub use remap::{remap_position, Position};
pub use sequence::{Base, Fasta, Sequence};

pub mod prelude {
    pub use crate::genotype::{GenotypeCall, GenotypeTable};
    pub use crate::merge::{merge_calls, merge_files, MergeError, MergeReport};
    pub use crate::remap::{remap_position, Position, CODING_REGION};
    pub use crate::sequence::{Base, Fasta, Sequence};
}
