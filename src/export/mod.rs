//! Result output.
//!
//! Serializes check results into the line-oriented format downstream
//! consumers ingest.

mod jsonl;

pub use jsonl::{open_output, write_results_jsonl, IgnoreBrokenPipe};
