use std::{ffi::OsString, path::PathBuf};
use clap::{Parser, error::ErrorKind};

/// Split records of a FASTA/FASTQ-like file (plain or gzip) into short and long records.
#[derive(Parser, Debug)]
#[command(version, about, allow_negative_numbers = true)]
pub struct Args {
    /// Input file. Each record starts with a header line, its first character marks the next record.
    pub source: PathBuf,
    /// Records with total body length at most this value go to the short file, all others to the long file.
    pub threshold: i64,
    /// Extra arguments are ignored.
    #[arg(hide = true)]
    pub rest: Vec<OsString>,
}

#[derive(Debug)]
pub enum Invocation {
    /// Not enough arguments: print this usage line and stop.
    Usage(String),
    Split(Args),
}

/// Parses command line arguments (program name first).
/// Missing arguments are not an error, they produce [Invocation::Usage].
pub fn parse_args<I, T>(argv: I) -> Result<Invocation, clap::Error>
where I: IntoIterator<Item = T>,
      T: Into<OsString>,
{
    let argv: Vec<OsString> = argv.into_iter().map(Into::into).collect();
    match Args::try_parse_from(&argv) {
        Ok(args) => Ok(Invocation::Split(args)),
        Err(e) if e.kind() == ErrorKind::MissingRequiredArgument => {
            let program = argv.first()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_owned());
            Ok(Invocation::Usage(format!("Usage: {} <source> <threshold>", program)))
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split_args(argv: &[&str]) -> Args {
        match parse_args(argv.iter().copied()).unwrap() {
            Invocation::Split(args) => args,
            other => panic!("Expected split arguments, got {:?}", other),
        }
    }

    fn usage(argv: &[&str]) -> String {
        match parse_args(argv.iter().copied()).unwrap() {
            Invocation::Usage(line) => line,
            other => panic!("Expected usage, got {:?}", other),
        }
    }

    #[test]
    fn source_and_threshold() {
        let args = split_args(&["split-fa-len", "seq.fa", "6"]);
        assert_eq!(args.source, PathBuf::from("seq.fa"));
        assert_eq!(args.threshold, 6);
        assert!(args.rest.is_empty());
    }

    #[test]
    fn missing_arguments_print_usage() {
        assert_eq!(usage(&["bin/split-fa-len"]), "Usage: bin/split-fa-len <source> <threshold>");
        assert_eq!(usage(&["split-fa-len", "seq.fa"]), "Usage: split-fa-len <source> <threshold>");
    }

    #[test]
    fn non_integer_threshold() {
        let err = parse_args(["split-fa-len", "seq.fa", "abc"]).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::ValueValidation | ErrorKind::InvalidValue));
        assert!(parse_args(["split-fa-len", "seq.fa", "2.5"]).is_err());
    }

    #[test]
    fn negative_threshold() {
        assert_eq!(split_args(&["split-fa-len", "seq.fa", "-5"]).threshold, -5);
    }

    #[test]
    fn extra_arguments_ignored() {
        let args = split_args(&["split-fa-len", "seq.fa", "5", "extra", "more"]);
        assert_eq!(args.threshold, 5);
        assert_eq!(args.rest, vec![OsString::from("extra"), OsString::from("more")]);
    }
}
