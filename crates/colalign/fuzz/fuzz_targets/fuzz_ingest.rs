//! Fuzz target for parsing and ingestion.
//!
//! Arbitrary bytes must either load into a rectangular typed table or fail
//! with an error, and a table that loads must build a bounded matrix against
//! itself.

#![no_main]

use colalign::{IngestConfig, KindPolicy, MatrixBuilder, NoProgress, Parser, ingest};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 50_000 || data.is_empty() {
        return;
    }

    let delimiter = match data[0] % 3 {
        0 => b',',
        1 => b'\t',
        _ => b';',
    };
    let parser = Parser::new();
    let Ok(raw) = parser.parse_bytes("fuzz", &data[1..], delimiter) else {
        return;
    };

    for policy in [KindPolicy::Majority, KindPolicy::Strict] {
        let Ok(table) = ingest(&raw, &IngestConfig::default().with_policy(policy)) else {
            continue;
        };
        assert!(table.columns().iter().all(|c| c.len() == table.row_count()));

        if let Some(matrix) = MatrixBuilder::default().build(&table, &table, &NoProgress) {
            assert!(matrix.values().iter().all(|v| (0.0..=1.0).contains(v)));
        }
    }
});
