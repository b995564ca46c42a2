//! Output feeds for scraped products.
//!
//! Records are pushed into a [`ProductSink`] in emission order. The file
//! feeds write one record per row or line:
//!
//! ```text
//! format = "csv"        name,price        <- header unless appending
//!                       Widget,$10
//! format = "jsonlines"  {"name":"Widget","price":"$10"}
//! ```

pub mod csv;
pub mod jsonl;

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::Path;

use crate::error::Result;
use crate::models::{OutputConfig, OutputFormat, ProductRecord};

// Re-export for convenience
pub use self::csv::CsvFeed;
pub use self::jsonl::JsonLinesFeed;

/// UTF-8 byte order mark.
pub const BOM: &[u8] = b"\xEF\xBB\xBF";

/// Destination for emitted product records.
pub trait ProductSink: Send {
    /// Write one record.
    fn write(&mut self, record: &ProductRecord) -> Result<()>;

    /// Push buffered records to the underlying destination.
    fn flush(&mut self) -> Result<()>;
}

impl ProductSink for Vec<ProductRecord> {
    fn write(&mut self, record: &ProductRecord) -> Result<()> {
        self.push(record.clone());
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Open the configured feed file.
pub fn open_feed(config: &OutputConfig) -> Result<Box<dyn ProductSink>> {
    let (file, fresh) = open_output(&config.path, config.overwrite)?;
    let sink: Box<dyn ProductSink> = match config.format {
        OutputFormat::Csv => Box::new(CsvFeed::new(
            file,
            config.fields.clone(),
            fresh,
            fresh && config.bom,
        )?),
        OutputFormat::JsonLines => Box::new(JsonLinesFeed::new(
            file,
            config.fields.clone(),
            fresh && config.bom,
        )?),
    };
    Ok(sink)
}

/// Open the output file, creating parent directories as needed.
///
/// Returns the file and whether it starts empty (so a header belongs on top).
fn open_output(path: &Path, overwrite: bool) -> Result<(File, bool)> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    if overwrite {
        return Ok((File::create(path)?, true));
    }

    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let fresh = file.metadata()?.len() == 0;
    Ok((file, fresh))
}

/// Write the byte order mark when requested.
fn write_bom<W: Write>(inner: &mut W, bom: bool) -> Result<()> {
    if bom {
        inner.write_all(BOM)?;
    }
    Ok(())
}
