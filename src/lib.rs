//! Splits FASTA/FASTQ-like files into short and long records.

pub mod cli;
pub mod reader;
pub mod split;

pub use reader::{Record, RecordReader};
pub use split::{split_by_length, split_records, output_paths, SplitCounts, SplitSummary, BucketStats};
