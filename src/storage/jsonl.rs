// src/storage/jsonl.rs

//! JSON Lines feed writer.

use std::io::{BufWriter, Write};

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::Result;
use crate::models::{Field, ProductRecord};
use crate::storage::{ProductSink, write_bom};

/// Writes one JSON object per line, keys in configured field order.
pub struct JsonLinesFeed<W: Write> {
    writer: BufWriter<W>,
    fields: Vec<Field>,
}

impl<W: Write> JsonLinesFeed<W> {
    pub fn new(mut inner: W, fields: Vec<Field>, bom: bool) -> Result<Self> {
        write_bom(&mut inner, bom)?;
        Ok(Self {
            writer: BufWriter::new(inner),
            fields,
        })
    }
}

/// A record projected onto the selected fields.
struct Row<'a> {
    record: &'a ProductRecord,
    fields: &'a [Field],
}

impl Serialize for Row<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for field in self.fields {
            map.serialize_entry(field.as_str(), self.record.field(*field))?;
        }
        map.end()
    }
}

impl<W: Write + Send> ProductSink for JsonLinesFeed<W> {
    fn write(&mut self, record: &ProductRecord) -> Result<()> {
        let row = Row {
            record,
            fields: &self.fields,
        };
        serde_json::to_writer(&mut self.writer, &row)?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
