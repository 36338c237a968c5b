pub mod csv;
#[cfg(feature = "pdf")]
pub mod pdf;
pub mod text;

pub use csv::CsvLoader;
#[cfg(feature = "pdf")]
pub use pdf::PdfLoader;
pub use text::TextLoader;
