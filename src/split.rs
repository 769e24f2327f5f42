use std::{
    io::{self, Write, BufWriter, BufRead, BufReader},
    ffi::OsString,
    fs::File,
    path::{Path, PathBuf},
};
use anyhow::Context;
use flate2::{
    bufread::MultiGzDecoder,
    write::GzEncoder,
    Compression,
};
use crate::reader::RecordReader;

/// Number of records and bytes written to one output.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BucketStats {
    pub records: u64,
    pub bytes: u64,
}

impl BucketStats {
    fn add(&mut self, bytes: usize) {
        self.records += 1;
        self.bytes += bytes as u64;
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SplitCounts {
    pub short: BucketStats,
    pub long: BucketStats,
}

impl SplitCounts {
    pub fn total_records(&self) -> u64 {
        self.short.records + self.long.records
    }
}

/// Result of [split_by_length]: where the records went and how many.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitSummary {
    pub counts: SplitCounts,
    pub short_path: PathBuf,
    pub long_path: PathBuf,
}

/// Progress is reported after every `PROGRESS_INTERVAL` records.
const PROGRESS_INTERVAL: u64 = 1_000_000;

/// Records with length at most `threshold` are short. A negative threshold makes every record long.
#[inline]
pub fn is_short(length: u64, threshold: i64) -> bool {
    i64::try_from(length).map_or(false, |length| length <= threshold)
}

/// Reads all records from `f_in` and writes each of them, unchanged, either to `f_short` or `f_long`.
pub fn split_records(
    f_in: impl BufRead,
    threshold: i64,
    mut f_short: impl Write,
    mut f_long: impl Write,
) -> io::Result<SplitCounts> {
    let mut reader = RecordReader::new(f_in);
    let mut counts = SplitCounts::default();
    while let Some(record) = reader.read_next()? {
        if is_short(record.length, threshold) {
            f_short.write_all(&record.content)?;
            counts.short.add(record.content.len());
        } else {
            f_long.write_all(&record.content)?;
            counts.long.add(record.content.len());
        }
        let count = counts.total_records();
        if count % PROGRESS_INTERVAL == 0 {
            log::info!("    {} records processed ({})", count, String::from_utf8_lossy(record.header()));
        }
    }
    Ok(counts)
}

pub fn is_gzip(path: &Path) -> bool {
    path.extension().map_or(false, |ext| ext == "gz")
}

/// Returns paths `<stem>_short_<threshold><ext>` and `<stem>_long_<threshold><ext>` next to the input.
/// For gzip inputs, the `.gz` suffix is kept after the inner extension: `a.fq.gz -> a_short_10.fq.gz`.
pub fn output_paths(input: &Path, threshold: i64) -> (PathBuf, PathBuf) {
    let gzip = is_gzip(input);
    let base = if gzip { input.with_extension("") } else { input.to_path_buf() };
    let stem = base.file_stem().unwrap_or_default();

    let mut suffix = OsString::new();
    if let Some(ext) = base.extension() {
        suffix.push(".");
        suffix.push(ext);
    }
    if gzip {
        suffix.push(".gz");
    }

    let make_path = |kind: &str| {
        let mut filename = stem.to_os_string();
        filename.push(format!("_{}_{}", kind, threshold));
        filename.push(&suffix);
        base.with_file_name(filename)
    };
    (make_path("short"), make_path("long"))
}

/// Plain or gzip-compressed output file.
enum Output {
    Plain(BufWriter<File>),
    Gzip(BufWriter<GzEncoder<File>>),
}

impl Output {
    fn create(path: &Path, gzip: bool) -> anyhow::Result<Self> {
        let f = File::create(path).with_context(|| format!("Cannot create {}", path.display()))?;
        Ok(if gzip {
            Output::Gzip(BufWriter::with_capacity(131_072, GzEncoder::new(f, Compression::default())))
        } else {
            Output::Plain(BufWriter::with_capacity(131_072, f))
        })
    }

    /// Flushes all buffers and, for gzip, writes the stream trailer.
    fn finish(self) -> io::Result<()> {
        match self {
            Output::Plain(mut w) => w.flush(),
            Output::Gzip(w) => w.into_inner().map_err(io::IntoInnerError::into_error)?.finish().map(|_| ()),
        }
    }
}

impl Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Output::Plain(w) => w.write(buf),
            Output::Gzip(w) => w.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Output::Plain(w) => w.flush(),
            Output::Gzip(w) => w.flush(),
        }
    }
}

/// Splits `input` into short and long records, writes them next to the input file (see [output_paths]).
/// Existing output files are overwritten.
pub fn split_by_length(input: &Path, threshold: i64) -> anyhow::Result<SplitSummary> {
    let gzip = is_gzip(input);
    let f_in = BufReader::new(File::open(input).with_context(|| format!("Cannot open {}", input.display()))?);
    let f_in: Box<dyn BufRead> = if gzip {
        Box::new(BufReader::new(MultiGzDecoder::new(f_in)))
    } else {
        Box::new(f_in)
    };

    let (short_filename, long_filename) = output_paths(input, threshold);
    log::info!("Splitting {} by length (threshold {})", input.display(), threshold);
    log::info!("    short records -> {}", short_filename.display());
    log::info!("    long records  -> {}", long_filename.display());
    let mut f_short = Output::create(&short_filename, gzip)?;
    let mut f_long = Output::create(&long_filename, gzip)?;

    let counts = split_records(f_in, threshold, &mut f_short, &mut f_long)
        .with_context(|| format!("Failed to split {}", input.display()))?;
    f_short.finish().with_context(|| format!("Cannot write {}", short_filename.display()))?;
    f_long.finish().with_context(|| format!("Cannot write {}", long_filename.display()))?;
    Ok(SplitSummary {
        counts,
        short_path: short_filename,
        long_path: long_filename,
    })
}
