//! Spreadsheet rendering for attendance snapshots.
//!
//! Turns an [`ExportSnapshot`](rollcall_core::export::ExportSnapshot) into a
//! [`Sheet`] (header block + attendance table) and serializes it as CSV or
//! XLSX. Also builds the request body for the remote-sheet export endpoint.
//! [`FileSink`] writes local files and implements
//! [`ExportSink`](rollcall_core::export::ExportSink).

mod csv;
pub mod error;
mod file;
mod remote;
mod table;
mod xlsx;

pub use csv::{parse_record, to_csv};
pub use error::{Error, Result};
pub use file::FileSink;
pub use remote::SheetsRequest;
pub use table::{COLUMNS, Sheet, file_name, format_date, format_time, format_time_in};
pub use xlsx::to_xlsx;
