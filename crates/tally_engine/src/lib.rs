//! Tally engine: file ingestion, counts files, reports and digests around the core counter.
mod counts_file;
mod digest;
mod ingest;
mod persist;
mod report;

pub use counts_file::{load_counts, parse_counts, CountsFileError};
pub use digest::{digest_bytes, file_digest, same_contents};
pub use ingest::{read_labels, read_labels_from_path, IngestError};
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use report::{render_report, write_report, ReportEntry, ReportFormat};
