//! Conversion of vendor (Yoruba-based) mtDNA coordinates to Cambridge
//! reference sequence indices.
//!
//! The genotyping vendor numbers the mitochondrial genome against a
//! different reference than the rCRS used by FASTA dumps. The two numbering
//! conventions differ by a small constant within each of three disjoint
//! regions; positions in the gaps between regions have no counterpart.
//! See <http://www.snpedia.com/index.php/MtDNA_Position_Conversions>.

use std::ops::RangeInclusive;

/// The integer type for genomic positions.
pub type Position = u64;

/// The coding region, in vendor coordinates, whose calls are merged.
///
/// Calls in the hypervariable regions outside this window are never taken
/// from the genotype export.
pub const CODING_REGION: RangeInclusive<Position> = 575..=16000;

/// One numbering region and the amount subtracted from positions inside it.
struct OffsetRegion {
    start: Position,
    end: Position,
    offset: Position,
}

impl OffsetRegion {
    const fn new(start: Position, end: Position, offset: Position) -> Self {
        Self { start, end, offset }
    }

    fn contains(&self, position: Position) -> bool {
        self.start <= position && position <= self.end
    }
}

// Evaluated in order, first match wins. Each offset is the vendor→rCRS shift
// plus one for the 1-based→0-based step.
const REGIONS: [OffsetRegion; 4] = [
    OffsetRegion::new(1, 309, 1),
    OffsetRegion::new(3109, 16183, 2),
    OffsetRegion::new(312, 3108, 3),
    OffsetRegion::new(16185, 16571, 3),
];

/// Remap a vendor position to a 0-based index into a Cambridge-numbered
/// sequence.
///
/// Returns `None` for positions with no defined mapping (0, 310–311, 16184
/// and anything past 16571).
pub fn remap_position(position: Position) -> Option<usize> {
    REGIONS
        .iter()
        .find(|region| region.contains(position))
        .map(|region| (position - region.offset) as usize)
}
