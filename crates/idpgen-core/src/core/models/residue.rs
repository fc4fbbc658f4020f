use phf::{Map, phf_map};

/// One-letter to three-letter residue-name map for the 20 standard amino
/// acids, used when emitting structure records.
static THREE_LETTER_NAMES: Map<char, &'static str> = phf_map! {
    'A' => "ALA", 'C' => "CYS", 'D' => "ASP", 'E' => "GLU", 'F' => "PHE",
    'G' => "GLY", 'H' => "HIS", 'I' => "ILE", 'K' => "LYS", 'L' => "LEU",
    'M' => "MET", 'N' => "ASN", 'P' => "PRO", 'Q' => "GLN", 'R' => "ARG",
    'S' => "SER", 'T' => "THR", 'V' => "VAL", 'W' => "TRP", 'Y' => "TYR",
};

/// Returns the three-letter residue name for a one-letter code, if standard.
pub fn three_letter_name(code: char) -> Option<&'static str> {
    THREE_LETTER_NAMES.get(&code).copied()
}

/// Whether `code` is one of the 20 standard one-letter residue codes.
pub fn is_standard_residue(code: char) -> bool {
    THREE_LETTER_NAMES.contains_key(&code)
}
