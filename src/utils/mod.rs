pub mod file_size;
pub mod filename;

pub use file_size::format_size;
pub use filename::report_filename;
