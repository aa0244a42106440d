use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use log::debug;

use super::error::{PersistenceError, Result};
use super::row::{Row, Value};
use super::schema::{Domain, Schema};

const EXT: &str = "dat";

/// An append-only list of rows kept in a file of fixed-size records.
///
/// Every field takes [`Domain::width`] bytes, big endian; string fields add
/// `string_width` bytes of zero-padded UTF-8 after their two-byte length.
/// Record `i` therefore starts at `i * record_size`, and reading it back is a
/// single seek.
#[derive(Debug)]
pub struct FileList {
    file: File,
    path: PathBuf,
    schema: Schema,
    string_width: u16,
    record_size: usize,
    n_records: usize,
}

impl FileList {
    pub fn create(dir: &Path, table_name: &str, schema: &Schema, string_width: u16) -> Result<FileList> {
        //! Create `<dir>/<table_name>.dat`, truncating any previous content.

        let path = dir.join(format!("{}.{}", table_name, EXT));
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(&path)?;

        Ok(FileList {
            file,
            record_size: record_size(schema, string_width),
            path,
            schema: schema.clone(),
            string_width,
            n_records: 0,
        })
    }

    pub fn open(dir: &Path, table_name: &str, schema: &Schema, string_width: u16) -> Result<FileList> {
        //! Reopen an existing store. The schema and string width must be the
        //! ones it was created with.

        let path = dir.join(format!("{}.{}", table_name, EXT));
        if !path.is_file() {
            return Err(PersistenceError::NotFound {
                name: table_name.to_string(),
                path,
            }
            .into());
        }

        let file = OpenOptions::new().read(true).write(true).open(&path)?;
        let record_size = record_size(schema, string_width);
        let file_len = file.metadata()?.len() as usize;
        if record_size == 0 || file_len % record_size != 0 {
            return Err(PersistenceError::Corrupted(format!(
                "{} holds {} bytes, not a multiple of the record size {}",
                path.display(),
                file_len,
                record_size
            ))
            .into());
        }

        Ok(FileList {
            file,
            path,
            schema: schema.clone(),
            string_width,
            record_size,
            n_records: file_len / record_size,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn record_size(&self) -> usize {
        self.record_size
    }

    pub fn len(&self) -> usize {
        self.n_records
    }

    pub fn is_empty(&self) -> bool {
        self.n_records == 0
    }

    pub fn append(&mut self, row: &Row) -> Result<()> {
        //! Type check and encode `row`, then write it as the next record.

        self.schema.type_check(row)?;
        let record = self.pack(row)?;

        let offset = (self.n_records * self.record_size) as u64;
        self.file.seek(SeekFrom::Start(offset))?;
        self.file.write_all(&record)?;

        debug!("{}: record {} at byte {}", self.path.display(), self.n_records, offset);
        self.n_records += 1;
        Ok(())
    }

    pub fn get(&self, index: usize) -> Result<Row> {
        //! Read record `index` back.

        if index >= self.n_records {
            return Err(PersistenceError::RecordOutOfBounds {
                index,
                len: self.n_records,
            }
            .into());
        }

        let mut record = vec![0u8; self.record_size];
        let mut file = &self.file;
        file.seek(SeekFrom::Start((index * self.record_size) as u64))?;
        file.read_exact(&mut record)?;

        self.unpack(&record)
    }

    pub fn rows(&self) -> Result<Vec<Row>> {
        (0..self.n_records).map(|index| self.get(index)).collect()
    }

    pub fn close(self) -> Result<()> {
        //! Flush the file to disk and release it.

        self.file.sync_all()?;
        Ok(())
    }

    fn pack(&self, row: &Row) -> Result<Vec<u8>> {
        let mut record = Vec::with_capacity(self.record_size);

        for (attr, value) in self.schema.attributes().iter().zip(row.values()) {
            match value {
                Value::Byte(v) => record.extend_from_slice(&v.to_be_bytes()),
                Value::Short(v) => record.extend_from_slice(&v.to_be_bytes()),
                Value::Integer(v) => record.extend_from_slice(&v.to_be_bytes()),
                Value::Long(v) => record.extend_from_slice(&v.to_be_bytes()),
                Value::Float(v) => record.extend_from_slice(&v.to_be_bytes()),
                Value::Double(v) => record.extend_from_slice(&v.to_be_bytes()),
                Value::Character(c) => record.extend_from_slice(&(*c as u32).to_be_bytes()),
                Value::String(s) => {
                    let bytes = s.as_bytes();
                    let width = self.string_width as usize;
                    if bytes.len() > width {
                        return Err(PersistenceError::FieldTooWide {
                            column: attr.name.clone(),
                            width,
                            actual: bytes.len(),
                        }
                        .into());
                    }
                    // fits in u16 since width does
                    record.extend_from_slice(&(bytes.len() as u16).to_be_bytes());
                    record.extend_from_slice(bytes);
                    record.resize(record.len() + width - bytes.len(), 0);
                }
                Value::Null => {
                    return Err(PersistenceError::Corrupted(format!(
                        "null in column '{}'",
                        attr.name
                    ))
                    .into());
                }
            }
        }

        Ok(record)
    }

    fn unpack(&self, record: &[u8]) -> Result<Row> {
        let mut values = Vec::with_capacity(self.schema.len());
        let mut offset = 0;

        for attr in self.schema.attributes() {
            let width = field_width(attr.domain, self.string_width);
            let field = &record[offset..offset + width];
            offset += width;

            let value = match attr.domain {
                Domain::Byte => Value::Byte(i8::from_be_bytes(fixed(field))),
                Domain::Short => Value::Short(i16::from_be_bytes(fixed(field))),
                Domain::Integer => Value::Integer(i32::from_be_bytes(fixed(field))),
                Domain::Long => Value::Long(i64::from_be_bytes(fixed(field))),
                Domain::Float => Value::Float(f32::from_be_bytes(fixed(field))),
                Domain::Double => Value::Double(f64::from_be_bytes(fixed(field))),
                Domain::Character => {
                    let code = u32::from_be_bytes(fixed(field));
                    let c = char::from_u32(code).ok_or_else(|| {
                        PersistenceError::Corrupted(format!(
                            "{:#x} in column '{}' is not a character",
                            code, attr.name
                        ))
                    })?;
                    Value::Character(c)
                }
                Domain::String => {
                    let len = u16::from_be_bytes(fixed(&field[..2])) as usize;
                    if len > self.string_width as usize {
                        return Err(PersistenceError::Corrupted(format!(
                            "string length {} in column '{}' exceeds the field width",
                            len, attr.name
                        ))
                        .into());
                    }
                    let text = std::str::from_utf8(&field[2..2 + len]).map_err(|e| {
                        PersistenceError::Corrupted(format!("column '{}': {}", attr.name, e))
                    })?;
                    Value::String(text.to_string())
                }
            };
            values.push(value);
        }

        Ok(Row::new(values))
    }
}

fn field_width(domain: Domain, string_width: u16) -> usize {
    match domain {
        Domain::String => domain.width() + string_width as usize,
        _ => domain.width(),
    }
}

fn record_size(schema: &Schema, string_width: u16) -> usize {
    schema
        .attributes()
        .iter()
        .map(|attr| field_width(attr.domain, string_width))
        .sum()
}

fn fixed<const N: usize>(field: &[u8]) -> [u8; N] {
    let mut bytes = [0u8; N];
    bytes.copy_from_slice(&field[..N]);
    bytes
}
