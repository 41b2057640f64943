//! Instance file parsing across the academic formats of spec §6.
//!
//! Every format is whitespace-delimited regardless of line breaks (the
//! original solver reads them with repeated `stream >> value`), so
//! [`Tokenizer`] flattens the file into a token stream while still
//! tracking which line each token came from, for error messages.

use std::fmt;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;

use crate::error::{Result, SetCoverError};
use crate::instance::{Instance, InstanceBuilder};
use crate::types::{Cost, ElementId, SetId};

/// One of the instance file formats spec §6 names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InstanceFormat {
    /// Header `M N`; N lines each `e k s_1 … s_k`, 0-based IDs. Unicost.
    Gecco2020,
    /// Header `N M`; M lines each three 1-based set IDs.
    Fulkerson1974,
    /// Header `M N`; N costs; M element lines `k s_1 … s_k` (1-based).
    Balas1980,
    /// Header `N M`; N costs; N set lines `m e_1 … e_m` (1-based).
    Balas1996,
    /// Header `M N`; N lines `cost m e_1 … e_m` (1-based element IDs).
    Faster1994,
    /// DIMACS-like hypergraph header `p hs N M`; M hyperedge lines,
    /// each a whitespace-separated list of 1-based "vertex" (set) IDs.
    /// `N` is the vertex (set) count, `M` the hyperedge (element) count —
    /// the Hitting Set framing PACE 2025 uses, which is set cover's dual
    /// with sets and elements swapped relative to the other formats here.
    Pace2025,
}

impl FromStr for InstanceFormat {
    type Err = SetCoverError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "gecco2020" | "gecco" => Ok(Self::Gecco2020),
            "fulkerson1974" | "sts" => Ok(Self::Fulkerson1974),
            "balas1980" | "orlibrary" => Ok(Self::Balas1980),
            "balas1996" => Ok(Self::Balas1996),
            "faster1994" | "faster" | "wedelin1995" | "wedelin" => Ok(Self::Faster1994),
            "pace2025" | "pace2025_ds" => Ok(Self::Pace2025),
            other => Err(SetCoverError::UnknownFormat(other.to_string())),
        }
    }
}

impl fmt::Display for InstanceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Gecco2020 => "gecco2020",
            Self::Fulkerson1974 => "fulkerson1974",
            Self::Balas1980 => "balas1980",
            Self::Balas1996 => "balas1996",
            Self::Faster1994 => "faster1994",
            Self::Pace2025 => "pace2025",
        };
        f.write_str(s)
    }
}

/// A whitespace-delimited token stream over a whole file, tracking the
/// 1-based line each token came from for error messages.
struct Tokenizer<'a> {
    tokens: Vec<(usize, &'a str)>,
    cursor: usize,
    format: InstanceFormat,
}

impl<'a> Tokenizer<'a> {
    fn new(content: &'a str, format: InstanceFormat) -> Self {
        let mut tokens = Vec::new();
        for (line_index, line) in content.lines().enumerate() {
            for tok in line.split_whitespace() {
                tokens.push((line_index + 1, tok));
            }
        }
        Self {
            tokens,
            cursor: 0,
            format,
        }
    }

    fn error(&self, message: impl Into<String>) -> SetCoverError {
        let line = self
            .tokens
            .get(self.cursor)
            .or_else(|| self.tokens.last())
            .map(|(l, _)| *l)
            .unwrap_or(0);
        SetCoverError::MalformedInstance {
            format: self.format.to_string(),
            line,
            message: message.into(),
        }
    }

    fn next_token(&mut self, what: &str) -> Result<&'a str> {
        match self.tokens.get(self.cursor) {
            Some((_, tok)) => {
                self.cursor += 1;
                Ok(tok)
            }
            None => Err(self.error(format!("unexpected end of file while reading {what}"))),
        }
    }

    fn next_usize(&mut self, what: &str) -> Result<usize> {
        let tok = self.next_token(what)?;
        tok.parse::<usize>()
            .map_err(|_| self.error(format!("expected a non-negative integer for {what}, got \"{tok}\"")))
    }

    fn next_cost(&mut self, what: &str) -> Result<Cost> {
        let tok = self.next_token(what)?;
        tok.parse::<Cost>()
            .map_err(|_| self.error(format!("expected an integer cost for {what}, got \"{tok}\"")))
    }
}

/// Parse `content` as an instance in `format`.
///
/// `unicost`, when set, forces every set's cost to `1` regardless of what
/// the file encodes (spec §6, CLI's `--unicost`/`-u`).
pub fn parse_instance(content: &str, format: InstanceFormat, unicost: bool) -> Result<Instance> {
    let instance = match format {
        InstanceFormat::Gecco2020 => parse_gecco2020(content, format),
        InstanceFormat::Fulkerson1974 => parse_fulkerson1974(content, format),
        InstanceFormat::Balas1980 => parse_balas1980(content, format),
        InstanceFormat::Balas1996 => parse_balas1996(content, format),
        InstanceFormat::Faster1994 => parse_faster1994(content, format),
        InstanceFormat::Pace2025 => parse_pace2025(content, format),
    }?;
    if unicost {
        return make_unicost(instance);
    }
    Ok(instance)
}

/// Read and parse an instance from `path`.
pub fn read_instance(path: &Path, format: InstanceFormat, unicost: bool) -> Result<Instance> {
    let content = std::fs::read_to_string(path)?;
    parse_instance(&content, format, unicost)
}

fn make_unicost(instance: Instance) -> Result<Instance> {
    let mut builder = InstanceBuilder::new();
    builder.add_elements(instance.number_of_elements());
    builder.add_sets(instance.number_of_sets());
    for (set_id, set) in instance.sets().iter().enumerate() {
        builder.set_cost(set_id, 1);
        for &element_id in &set.elements {
            builder.add_arc(set_id, element_id);
        }
    }
    builder.build()
}

fn parse_gecco2020(content: &str, format: InstanceFormat) -> Result<Instance> {
    let mut t = Tokenizer::new(content, format);
    let number_of_elements = t.next_usize("number of elements")?;
    let number_of_sets = t.next_usize("number of sets")?;

    let mut builder = InstanceBuilder::new();
    builder.add_elements(number_of_elements);
    builder.add_sets(number_of_sets);
    for set_id in 0..number_of_sets {
        builder.set_cost(set_id, 1);
    }

    for element_id in 0..number_of_elements {
        let _element_id_tmp = t.next_usize("element ID")?;
        let k = t.next_usize("element's number of covering sets")?;
        for _ in 0..k {
            let set_id: SetId = t.next_usize("set ID")?;
            builder.add_arc(set_id, element_id);
        }
    }
    builder.build()
}

fn parse_fulkerson1974(content: &str, format: InstanceFormat) -> Result<Instance> {
    let mut t = Tokenizer::new(content, format);
    let number_of_sets = t.next_usize("number of sets")?;
    let number_of_elements = t.next_usize("number of elements")?;

    let mut builder = InstanceBuilder::new();
    builder.add_elements(number_of_elements);
    builder.add_sets(number_of_sets);
    for set_id in 0..number_of_sets {
        builder.set_cost(set_id, 1);
    }

    for element_id in 0..number_of_elements {
        for _ in 0..3 {
            let set_id = t.next_usize("set ID")?;
            if set_id == 0 {
                return Err(t.error("1-based set ID must be at least 1"));
            }
            builder.add_arc(set_id - 1, element_id);
        }
    }
    builder.build()
}

fn parse_balas1980(content: &str, format: InstanceFormat) -> Result<Instance> {
    let mut t = Tokenizer::new(content, format);
    let number_of_elements = t.next_usize("number of elements")?;
    let number_of_sets = t.next_usize("number of sets")?;

    let mut builder = InstanceBuilder::new();
    builder.add_elements(number_of_elements);
    builder.add_sets(number_of_sets);
    for set_id in 0..number_of_sets {
        let cost = t.next_cost("set cost")?;
        builder.set_cost(set_id, cost);
    }

    for element_id in 0..number_of_elements {
        let k = t.next_usize("element's number of covering sets")?;
        for _ in 0..k {
            let set_id = t.next_usize("set ID")?;
            if set_id == 0 {
                return Err(t.error("1-based set ID must be at least 1"));
            }
            builder.add_arc(set_id - 1, element_id);
        }
    }
    builder.build()
}

fn parse_balas1996(content: &str, format: InstanceFormat) -> Result<Instance> {
    let mut t = Tokenizer::new(content, format);
    let number_of_sets = t.next_usize("number of sets")?;
    let number_of_elements = t.next_usize("number of elements")?;

    let mut builder = InstanceBuilder::new();
    builder.add_elements(number_of_elements);
    builder.add_sets(number_of_sets);
    for set_id in 0..number_of_sets {
        let cost = t.next_cost("set cost")?;
        builder.set_cost(set_id, cost);
    }

    for set_id in 0..number_of_sets {
        let m = t.next_usize("set's number of covered elements")?;
        for _ in 0..m {
            let element_id: ElementId = t.next_usize("element ID")?;
            if element_id == 0 {
                return Err(t.error("1-based element ID must be at least 1"));
            }
            builder.add_arc(set_id, element_id - 1);
        }
    }
    builder.build()
}

fn parse_faster1994(content: &str, format: InstanceFormat) -> Result<Instance> {
    let mut t = Tokenizer::new(content, format);
    let number_of_elements = t.next_usize("number of elements")?;
    let number_of_sets = t.next_usize("number of sets")?;

    let mut builder = InstanceBuilder::new();
    builder.add_elements(number_of_elements);
    builder.add_sets(number_of_sets);

    for set_id in 0..number_of_sets {
        let cost = t.next_cost("set cost")?;
        builder.set_cost(set_id, cost);
        let m = t.next_usize("set's number of covered elements")?;
        for _ in 0..m {
            let element_id = t.next_usize("element ID")?;
            if element_id == 0 {
                return Err(t.error("1-based element ID must be at least 1"));
            }
            builder.add_arc(set_id, element_id - 1);
        }
    }
    builder.build()
}

fn parse_pace2025(content: &str, format: InstanceFormat) -> Result<Instance> {
    let mut lines = content.lines();
    let header = loop {
        match lines.next() {
            Some(line) if line.trim().is_empty() || line.starts_with('c') => continue,
            Some(line) => break line,
            None => {
                return Err(SetCoverError::MalformedInstance {
                    format: format.to_string(),
                    line: 0,
                    message: "missing \"p hs N M\" header".to_string(),
                })
            }
        }
    };
    let mut header_tokens = header.split_whitespace();
    let err = |message: &str| SetCoverError::MalformedInstance {
        format: format.to_string(),
        line: 1,
        message: message.to_string(),
    };
    if header_tokens.next() != Some("p") || header_tokens.next() != Some("hs") {
        return Err(err("expected a \"p hs N M\" header"));
    }
    let number_of_sets: usize = header_tokens
        .next()
        .ok_or_else(|| err("missing vertex count in header"))?
        .parse()
        .map_err(|_| err("vertex count is not an integer"))?;
    let number_of_elements: usize = header_tokens
        .next()
        .ok_or_else(|| err("missing hyperedge count in header"))?
        .parse()
        .map_err(|_| err("hyperedge count is not an integer"))?;

    let mut builder = InstanceBuilder::new();
    builder.add_elements(number_of_elements);
    builder.add_sets(number_of_sets);
    for set_id in 0..number_of_sets {
        builder.set_cost(set_id, 1);
    }

    let mut element_id = 0usize;
    for (line_index, line) in lines.enumerate() {
        if line.trim().is_empty() || line.starts_with('c') {
            continue;
        }
        if element_id >= number_of_elements {
            break;
        }
        for tok in line.split_whitespace() {
            let set_id: usize = tok.parse().map_err(|_| SetCoverError::MalformedInstance {
                format: format.to_string(),
                line: line_index + 2,
                message: format!("expected a 1-based vertex ID, got \"{tok}\""),
            })?;
            if set_id == 0 {
                return Err(SetCoverError::MalformedInstance {
                    format: format.to_string(),
                    line: line_index + 2,
                    message: "1-based vertex ID must be at least 1".to_string(),
                });
            }
            builder.add_arc(set_id - 1, element_id);
        }
        element_id += 1;
    }
    builder.build()
}

/// Write `instance` in `format` to `writer`. Only the formats spec §6
/// names under "Instance output" (`balas1980`, `pace2025`) are supported.
pub fn write_instance_to<W: Write>(instance: &Instance, format: InstanceFormat, writer: &mut W) -> Result<()> {
    match format {
        InstanceFormat::Balas1980 => write_balas1980(instance, writer),
        InstanceFormat::Pace2025 => write_pace2025(instance, writer),
        other => Err(SetCoverError::UnsupportedOperation(format!(
            "writing instances in format \"{other}\" is not supported"
        ))),
    }
}

/// Write `instance` in `format` to `path`.
pub fn write_instance(instance: &Instance, path: &Path, format: InstanceFormat) -> Result<()> {
    let mut file = std::fs::File::create(path)?;
    write_instance_to(instance, format, &mut file)
}

fn write_balas1980<W: Write>(instance: &Instance, writer: &mut W) -> Result<()> {
    writeln!(writer, "{} {}", instance.number_of_elements(), instance.number_of_sets())?;
    let costs: Vec<String> = instance.sets().iter().map(|s| s.cost.to_string()).collect();
    writeln!(writer, " {}", costs.join(" "))?;
    for element in instance.elements() {
        let ids: Vec<String> = element.sets.iter().map(|&s| (s + 1).to_string()).collect();
        writeln!(writer, "{} {}", element.sets.len(), ids.join(" "))?;
    }
    Ok(())
}

fn write_pace2025<W: Write>(instance: &Instance, writer: &mut W) -> Result<()> {
    writeln!(writer, "p hs {} {}", instance.number_of_sets(), instance.number_of_elements())?;
    for element in instance.elements() {
        let ids: Vec<String> = element.sets.iter().map(|&s| (s + 1).to_string()).collect();
        writeln!(writer, "{}", ids.join(" "))?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../tests_unit/io/format.rs"]
mod tests;
