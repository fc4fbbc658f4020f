use crate::core::models::chain::BackboneChain;
use crate::core::models::residue::three_letter_name;
use std::io::{self, Write};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PdbWriteError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("unknown residue code '{0}' in sequence")]
    UnknownResidue(char),
    #[error("chain references residue {index} but the sequence has only {len} residues")]
    SequenceTooShort { index: usize, len: usize },
}

/// Formats an atom name into the 4-character PDB name field.
///
/// Names of C/N/O/S atoms shorter than four characters are indented by one
/// column; anything else fills the field from the left.
fn format_atom_name(name: &str, element: &str) -> String {
    if matches!(element, "C" | "N" | "O" | "S") && name.len() < 4 {
        format!(" {:<3}", name)
    } else {
        format!("{:<4}", name)
    }
}

/// Writes one fixed-column ATOM record per atom of `chain`, followed by an
/// END record.
///
/// `sequence` supplies the one-letter residue codes the chain was built for;
/// residue names, 1-based serial and residue numbers, chain id 'A', zeroed
/// occupancy and temperature factors, and element symbols follow the
/// conventional PDB ATOM column layout exactly, so existing structure-file
/// consumers can read the output unchanged.
pub fn write_pdb<W: Write>(
    writer: &mut W,
    chain: &BackboneChain,
    sequence: &str,
) -> Result<(), PdbWriteError> {
    let residues: Vec<char> = sequence.chars().collect();

    for (i, ((coord, label), residue_index)) in chain
        .coords()
        .iter()
        .zip(chain.labels())
        .zip(chain.residue_indices())
        .enumerate()
    {
        let code = *residues
            .get(*residue_index)
            .ok_or(PdbWriteError::SequenceTooShort {
                index: *residue_index,
                len: residues.len(),
            })?;
        let residue_name = three_letter_name(code).ok_or(PdbWriteError::UnknownResidue(code))?;

        writeln!(
            writer,
            "{:<6}{:>5} {}{:1}{:<3} {:1}{:>4}{:1}   {:8.3}{:8.3}{:8.3}{:6.2}{:6.2}      {:<4}{:>2}{:2}",
            "ATOM",
            i + 1,
            format_atom_name(label.name(), label.element()),
            "",
            residue_name,
            "A",
            residue_index + 1,
            "",
            coord.x,
            coord.y,
            coord.z,
            0.0,
            0.0,
            "",
            label.element(),
            "",
        )?;
    }

    writeln!(writer, "END")?;
    Ok(())
}
