//! Certificate (solution) file I/O (spec §6 "Certificate format").

use std::fmt;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use crate::error::{Result, SetCoverError};
use crate::instance::Instance;
use crate::solution::Solution;
use crate::types::SetId;

/// Certificate encodings named by spec §6.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CertificateFormat {
    /// First line `K`; one 0-based set ID per line, whitespace-separated.
    Gecco2020,
    /// First line `K`; one 1-based set ID per line.
    Pace2025,
}

impl FromStr for CertificateFormat {
    type Err = SetCoverError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "" | "gecco2020" | "gecco" => Ok(Self::Gecco2020),
            "pace2025" => Ok(Self::Pace2025),
            other => Err(SetCoverError::UnknownFormat(other.to_string())),
        }
    }
}

impl fmt::Display for CertificateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Gecco2020 => "gecco2020",
            Self::Pace2025 => "pace2025",
        };
        f.write_str(s)
    }
}

/// Write `solution`'s certificate in `format` to `writer`.
pub fn write_certificate_to<W: Write>(solution: &Solution, format: CertificateFormat, writer: &mut W) -> Result<()> {
    writeln!(writer, "{}", solution.number_of_sets())?;
    match format {
        CertificateFormat::Gecco2020 => {
            let ids: Vec<String> = solution.sets().iter().map(|&s| s.to_string()).collect();
            writeln!(writer, "{}", ids.join(" "))?;
        }
        CertificateFormat::Pace2025 => {
            for &set_id in solution.sets() {
                writeln!(writer, "{}", set_id + 1)?;
            }
        }
    }
    Ok(())
}

/// Write `solution`'s certificate in `format` to `path`.
pub fn write_certificate(solution: &Solution, path: &Path, format: CertificateFormat) -> Result<()> {
    let mut file = std::fs::File::create(path)?;
    write_certificate_to(solution, format, &mut file)
}

/// Parse a certificate from `content` into a [`Solution`] over `instance`.
///
/// `format` only affects how set IDs are encoded (0-based
/// whitespace-separated vs. 1-based one-per-line); both accept any
/// whitespace layout since the count on the first line is authoritative.
pub fn parse_certificate(content: &str, instance: Arc<Instance>, format: CertificateFormat) -> Result<Solution> {
    let mut tokens = content.split_whitespace();
    let count: usize = tokens
        .next()
        .ok_or_else(|| SetCoverError::InvalidCertificate("empty certificate file".to_string()))?
        .parse()
        .map_err(|_| SetCoverError::InvalidCertificate("first line must be the number of sets".to_string()))?;

    let mut solution = Solution::new(Arc::clone(&instance));
    for _ in 0..count {
        let tok = tokens
            .next()
            .ok_or_else(|| SetCoverError::InvalidCertificate("fewer set IDs than declared".to_string()))?;
        let raw: usize = tok
            .parse()
            .map_err(|_| SetCoverError::InvalidCertificate(format!("\"{tok}\" is not a valid set ID")))?;
        let set_id: SetId = match format {
            CertificateFormat::Gecco2020 => raw,
            CertificateFormat::Pace2025 => {
                if raw == 0 {
                    return Err(SetCoverError::InvalidCertificate(
                        "1-based set ID must be at least 1".to_string(),
                    ));
                }
                raw - 1
            }
        };
        if set_id >= instance.number_of_sets() {
            return Err(SetCoverError::InvalidCertificate(format!(
                "set ID {set_id} is out of range for an instance with {} sets",
                instance.number_of_sets()
            )));
        }
        if solution.contains(set_id) {
            return Err(SetCoverError::InvalidCertificate(format!(
                "set {set_id} is listed more than once"
            )));
        }
        solution.add(set_id);
    }
    Ok(solution)
}

/// Read and parse a certificate from `path`.
pub fn read_certificate(path: &Path, instance: Arc<Instance>, format: CertificateFormat) -> Result<Solution> {
    let content = std::fs::read_to_string(path)?;
    parse_certificate(&content, instance, format)
}

#[cfg(test)]
#[path = "../tests_unit/io/certificate.rs"]
mod tests;
