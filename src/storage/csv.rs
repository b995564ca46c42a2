// src/storage/csv.rs

//! CSV feed writer.

use std::io::Write;

use ::csv::{Writer, WriterBuilder};

use crate::error::{AppError, Result};
use crate::models::{Field, ProductRecord};
use crate::storage::{ProductSink, write_bom};

/// Writes records as comma-separated rows with standard quoting.
pub struct CsvFeed<W: Write> {
    writer: Writer<W>,
    fields: Vec<Field>,
}

impl<W: Write> CsvFeed<W> {
    /// Wrap a writer, optionally starting with the BOM and a header row.
    pub fn new(mut inner: W, fields: Vec<Field>, write_header: bool, bom: bool) -> Result<Self> {
        write_bom(&mut inner, bom)?;

        let mut writer = WriterBuilder::new().has_headers(false).from_writer(inner);
        if write_header {
            writer.write_record(fields.iter().map(Field::as_str))?;
        }

        Ok(Self { writer, fields })
    }

    /// Flush and return the underlying writer.
    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| AppError::Io(e.into_error()))
    }
}

impl<W: Write + Send> ProductSink for CsvFeed<W> {
    fn write(&mut self, record: &ProductRecord) -> Result<()> {
        self.writer
            .write_record(self.fields.iter().map(|f| record.field(*f)))?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
