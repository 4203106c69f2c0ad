//! CSV encoding of the catalog.
//!
//! The header always matches the table columns in declaration order, even
//! when there are no rows to write.

use std::io;

use crate::{documentary::Documentary, Error, Result};

/// Column names, in export order.
pub const HEADER: [&str; 6] = ["id", "title", "director", "year", "category", "rating"];

/// Write `records` as CSV to `writer`. Returns the number of data rows.
pub fn write_csv<'a, W, I>(records: I, writer: W) -> Result<usize>
where
  W: io::Write,
  I: IntoIterator<Item = &'a Documentary>,
{
  let mut wtr = csv::WriterBuilder::new()
    .has_headers(false)
    .from_writer(writer);
  wtr.write_record(HEADER)?;

  let mut rows = 0;
  for record in records {
    wtr.serialize(record)?;
    rows += 1;
  }
  wtr.flush()?;
  Ok(rows)
}

/// Read records back from CSV produced by [`write_csv`].
pub fn read_csv<R: io::Read>(reader: R) -> Result<Vec<Documentary>> {
  let mut rdr = csv::Reader::from_reader(reader);
  let headers = rdr.headers()?.clone();
  if headers.iter().ne(HEADER.iter().copied()) {
    return Err(Error::CsvHeader(headers.iter().map(str::to_owned).collect()));
  }

  let records = rdr
    .deserialize()
    .collect::<std::result::Result<Vec<Documentary>, _>>()?;
  Ok(records)
}
