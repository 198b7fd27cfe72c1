//! Comparative benchmark harness
//!
//! Runs each mapping strategy over the same record set for a fixed number of
//! passes, measures wall time per strategy, and renders a textual report.
//! The harness is glue around the engine, not part of it: it owns no caches
//! and adds no semantics. Failures surface; there is no retry loop.

use crate::engine::Specializer;
use crate::error::Result;
use crate::mapper::ReflectiveMapper;
use crate::record::Record;
use crate::samples::{generate_programmer_records, static_programmer_mapper, Programmer};
use std::fmt;
use std::hint::black_box;
use std::time::{Duration, Instant};

/// Harness parameters
#[derive(Debug, Clone, Copy)]
pub struct HarnessConfig {
    /// How many times each strategy walks the full record set
    pub passes: usize,
    /// How many records to generate when no record set is supplied
    pub records: usize,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            passes: 1000,
            records: 1000,
        }
    }
}

/// Wall time for one strategy over all passes
#[derive(Debug, Clone)]
pub struct StrategyTiming {
    /// Strategy name as printed in the report
    pub strategy: &'static str,
    /// Total elapsed wall time
    pub total: Duration,
}

/// The comparative result of one harness run
#[derive(Debug, Clone)]
pub struct Report {
    /// Passes per strategy
    pub passes: usize,
    /// Records per pass
    pub records: usize,
    /// One timing per strategy, in execution order
    pub timings: Vec<StrategyTiming>,
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "mapped {} records x {} passes per strategy",
            self.records, self.passes
        )?;
        for timing in &self.timings {
            writeln!(
                f,
                "{:<12} {:>10.3} ms",
                timing.strategy,
                timing.total.as_secs_f64() * 1000.0
            )?;
        }
        Ok(())
    }
}

/// Run all three strategies over a generated record set
pub fn run(engine: &Specializer, config: HarnessConfig) -> Result<Report> {
    let records = generate_programmer_records(config.records);
    run_over(engine, config.passes, &records)
}

/// Run all three strategies over a caller-supplied record set
pub fn run_over(engine: &Specializer, passes: usize, records: &[Record]) -> Result<Report> {
    let mut timings = Vec::with_capacity(3);

    tracing::info!(passes, records = records.len(), "starting harness run");

    // Static: the hand-written reference, no descriptor, no compilation.
    let start = Instant::now();
    for _ in 0..passes {
        for record in records {
            black_box(static_programmer_mapper(record)?);
        }
    }
    timings.push(StrategyTiming {
        strategy: "static",
        total: start.elapsed(),
    });

    // Reflective: accessor resolution by name on every call.
    let reflective = ReflectiveMapper::<Programmer>::new()?;
    let start = Instant::now();
    for _ in 0..passes {
        for record in records {
            black_box(reflective.invoke(record)?);
        }
    }
    timings.push(StrategyTiming {
        strategy: "reflective",
        total: start.elapsed(),
    });

    // Compiled: one cached artifact per type, direct assignments per call.
    let compiled = engine.mapper_for::<Programmer>()?;
    let start = Instant::now();
    for _ in 0..passes {
        for record in records {
            black_box(compiled.invoke(record)?);
        }
    }
    timings.push(StrategyTiming {
        strategy: "compiled",
        total: start.elapsed(),
    });

    Ok(Report {
        passes,
        records: records.len(),
        timings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_harness_times_all_three_strategies() {
        let engine = Specializer::new();
        let report = run(
            &engine,
            HarnessConfig {
                passes: 2,
                records: 10,
            },
        )
        .unwrap();

        let strategies: Vec<&str> = report.timings.iter().map(|t| t.strategy).collect();
        assert_eq!(strategies, vec!["static", "reflective", "compiled"]);
        assert_eq!(report.records, 10);
        assert_eq!(report.passes, 2);
    }

    #[test]
    fn test_report_renders_every_strategy() {
        let engine = Specializer::new();
        let report = run(
            &engine,
            HarnessConfig {
                passes: 1,
                records: 2,
            },
        )
        .unwrap();
        let rendered = report.to_string();
        assert!(rendered.contains("static"));
        assert!(rendered.contains("reflective"));
        assert!(rendered.contains("compiled"));
    }
}
