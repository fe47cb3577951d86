//! Workload files and a runner that drives any [`HashTable`] with them.
//!
//! A workload is UTF-8 text with one command per line:
//!
//! ```text
//! # comment
//! put alice 555-0100
//! get alice
//! remove alice
//! ```
//!
//! Keys are single tokens; a `put` value is the rest of the line, trimmed.
//! Blank lines and lines starting with `#` are skipped.

use crate::chained::ChainedTable;
use crate::deletion::{DeletionMode, DeletionPolicy, HardDeletion, SoftDeletion};
use crate::error::TableError;
use crate::linear::LinearProbe;
use crate::open_addressing::{OpenAddressingTable, ProbeStrategy};
use crate::ordered_linear::OrderedLinearProbe;
use crate::primes::PrimeSource;
use crate::quadratic::QuadraticProbe;
use crate::table::HashTable;
use core::fmt;
use log::info;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WorkloadError {
    #[error("reading workload: {0}")]
    Io(#[from] std::io::Error),
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },
    #[error("line {line}: {source}")]
    Table {
        line: usize,
        #[source]
        source: TableError,
    },
}

impl WorkloadError {
    fn table(line: usize) -> impl FnOnce(TableError) -> Self {
        move |source| WorkloadError::Table { line, source }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Put { key: String, value: String },
    Get { key: String },
    Remove { key: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Workload {
    /// Commands with their 1-based line numbers.
    commands: Vec<(usize, Command)>,
}

impl Workload {
    pub fn parse(text: &str) -> Result<Self, WorkloadError> {
        let mut commands = Vec::new();
        for (i, raw) in text.lines().enumerate() {
            let line = i + 1;
            let trimmed = raw.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            commands.push((line, parse_command(trimmed, line)?));
        }
        Ok(Self { commands })
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, WorkloadError> {
        Self::parse(&std::fs::read_to_string(path)?)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn commands(&self) -> impl Iterator<Item = &Command> + '_ {
        self.commands.iter().map(|(_, c)| c)
    }

    /// Run every command against `table`, stopping at the first rejected
    /// `put`.
    pub fn run(&self, table: &mut dyn HashTable) -> Result<Report, WorkloadError> {
        let mut report = Report::default();
        for (line, command) in &self.commands {
            let (stats, probes) = match command {
                Command::Put { key, value } => {
                    let probes = table.put(key, value).map_err(WorkloadError::table(*line))?;
                    (&mut report.put, probes)
                }
                Command::Get { key } => (&mut report.get, table.get(key)),
                Command::Remove { key } => (&mut report.remove, table.remove(key)),
            };
            stats.record(probes.probes, probes.is_found());
        }
        report.len = table.len();
        report.capacity = table.capacity();
        Ok(report)
    }
}

fn parse_command(line_text: &str, line: usize) -> Result<Command, WorkloadError> {
    let err = |message: String| WorkloadError::Parse { line, message };
    let (op, rest) = match line_text.split_once(char::is_whitespace) {
        Some((op, rest)) => (op, rest.trim()),
        None => (line_text, ""),
    };
    let (key, tail) = match rest.split_once(char::is_whitespace) {
        Some((key, tail)) => (key, tail.trim()),
        None => (rest, ""),
    };
    if key.is_empty() {
        return Err(err(format!("`{op}` needs a key")));
    }
    let key = key.to_owned();
    match op {
        "put" if tail.is_empty() => Err(err("`put` needs a value".to_owned())),
        "put" => Ok(Command::Put {
            key,
            value: tail.to_owned(),
        }),
        "get" | "remove" if !tail.is_empty() => {
            Err(err(format!("unexpected text after key: {tail:?}")))
        }
        "get" => Ok(Command::Get { key }),
        "remove" => Ok(Command::Remove { key }),
        other => Err(err(format!("unknown command {other:?}"))),
    }
}

/// Totals for one kind of operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OpStats {
    pub count: usize,
    pub probes: usize,
    /// Operations that produced a value.
    pub hits: usize,
}

impl OpStats {
    fn record(&mut self, probes: usize, hit: bool) {
        self.count += 1;
        self.probes += probes;
        self.hits += usize::from(hit);
    }

    pub fn mean_probes(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.probes as f64 / self.count as f64
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Report {
    pub put: OpStats,
    pub get: OpStats,
    pub remove: OpStats,
    /// Live entries when the workload finished.
    pub len: usize,
    pub capacity: usize,
}

impl Report {
    pub fn total_probes(&self) -> usize {
        self.put.probes + self.get.probes + self.remove.probes
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, s) in [("put", self.put), ("get", self.get), ("remove", self.remove)] {
            writeln!(
                f,
                "  {name:<7}{:>8} ops {:>10} probes {:>8.2} avg {:>8} hits",
                s.count,
                s.probes,
                s.mean_probes(),
                s.hits
            )?;
        }
        write!(
            f,
            "  final: {} entries, capacity {}, {} probes total",
            self.len,
            self.capacity,
            self.total_probes()
        )
    }
}

/// The four collision-resolution strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    Chained,
    Linear,
    OrderedLinear,
    Quadratic,
}

impl Strategy {
    pub const ALL: [Strategy; 4] = [
        Strategy::Chained,
        Strategy::Linear,
        Strategy::OrderedLinear,
        Strategy::Quadratic,
    ];

    /// Fresh table for this strategy. Chaining has no deletion modes and
    /// ignores `deletion`.
    pub fn table(self, deletion: DeletionMode, primes: PrimeSource) -> Box<dyn HashTable> {
        let slots = primes.current();
        info!("building {self} table ({deletion} deletion, {slots} slots)");
        match self {
            Strategy::Chained => Box::new(ChainedTable::with_primes(primes)),
            Strategy::Linear => open_addressing::<LinearProbe>(deletion, primes),
            Strategy::OrderedLinear => open_addressing::<OrderedLinearProbe>(deletion, primes),
            Strategy::Quadratic => open_addressing::<QuadraticProbe>(deletion, primes),
        }
    }
}

fn open_addressing<P: ProbeStrategy>(
    deletion: DeletionMode,
    primes: PrimeSource,
) -> Box<dyn HashTable> {
    match deletion {
        DeletionMode::Soft => boxed::<P, SoftDeletion>(primes),
        DeletionMode::Hard => boxed::<P, HardDeletion>(primes),
    }
}

fn boxed<P: ProbeStrategy, D: DeletionPolicy>(primes: PrimeSource) -> Box<dyn HashTable> {
    Box::new(OpenAddressingTable::<P, D>::with_primes(primes))
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Strategy::Chained => "chained",
            Strategy::Linear => "linear",
            Strategy::OrderedLinear => "ordered-linear",
            Strategy::Quadratic => "quadratic",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(count: usize, probes: usize, hits: usize) -> OpStats {
        OpStats {
            count,
            probes,
            hits,
        }
    }

    #[test]
    fn parses_commands_and_skips_comments() {
        let text = "# phone book\nput alice 555 0100\n\n  get alice\nremove bob\n";
        let w = Workload::parse(text).unwrap();
        let cmds: Vec<&Command> = w.commands().collect();
        assert_eq!(
            cmds,
            [
                &Command::Put {
                    key: "alice".into(),
                    value: "555 0100".into()
                },
                &Command::Get {
                    key: "alice".into()
                },
                &Command::Remove { key: "bob".into() },
            ]
        );
    }

    #[test]
    fn parse_errors_name_the_line() {
        let cases = [
            ("get a\nput b\n", 2, "`put` needs a value"),
            ("fetch a\n", 1, "unknown command \"fetch\""),
            ("\n\nremove\n", 3, "`remove` needs a key"),
            ("get a b\n", 1, "unexpected text after key: \"b\""),
        ];
        for (text, want_line, want_msg) in cases {
            match Workload::parse(text) {
                Err(WorkloadError::Parse { line, message }) => {
                    assert_eq!(line, want_line, "{text:?}");
                    assert_eq!(message, want_msg, "{text:?}");
                }
                other => panic!("unexpected result for {text:?}: {other:?}"),
            }
        }
    }

    #[test]
    fn run_tallies_probes_per_operation() {
        let text = "put alice 1\nput erin 2\nget erin\nget heidi\nremove alice\n";
        let w = Workload::parse(text).unwrap();
        let mut table = Strategy::Linear.table(DeletionMode::Hard, PrimeSource::new());
        let report = w.run(table.as_mut()).unwrap();
        assert_eq!(report.put, stats(2, 3, 2));
        // erin: 2 probes; heidi walks 6, 0 and stops at empty 1.
        assert_eq!(report.get, stats(2, 5, 1));
        assert_eq!(report.remove, stats(1, 4, 1));
        assert_eq!(report.len, 1);
        assert_eq!(report.capacity, 7);
        assert_eq!(report.total_probes(), 12);
    }

    #[test]
    fn every_strategy_runs_the_same_workload() {
        let text = "put a 1\nput h 2\nput o 3\nput v 4\nget v\nremove h\nget o\n";
        let w = Workload::parse(text).unwrap();
        for strategy in Strategy::ALL {
            for deletion in [DeletionMode::Soft, DeletionMode::Hard] {
                let mut table = strategy.table(deletion, PrimeSource::new());
                let report = w.run(table.as_mut()).unwrap();
                assert_eq!(report.get.hits, 2, "{strategy} {deletion}");
                assert_eq!(report.len, 3, "{strategy} {deletion}");
            }
        }
    }
}
