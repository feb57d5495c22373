use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Defines the interface for reading and writing the text formats vinabox handles.
///
/// Implementors parse a whole document from a buffered reader and serialize it back to a
/// writer. The path-based helpers are provided on top of those two operations.
pub trait TextFile {
    /// The in-memory representation of one file.
    type Document;

    /// The error type for I/O and parse failures.
    type Error: Error + From<io::Error>;

    /// Reads a document from a buffered reader.
    ///
    /// # Arguments
    ///
    /// * `reader` - The buffered reader to read from.
    ///
    /// # Errors
    ///
    /// Returns an error if reading fails or the content cannot be parsed.
    fn read_from(reader: &mut impl BufRead) -> Result<Self::Document, Self::Error>;

    /// Writes a document to a writer.
    ///
    /// # Arguments
    ///
    /// * `document` - The document to serialize.
    /// * `writer` - The writer to output to.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_to(document: &Self::Document, writer: &mut impl Write) -> Result<(), Self::Error>;

    /// Reads a document from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or parsing fails.
    fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Self::Document, Self::Error> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader)
    }

    /// Writes a document to a file path, creating or truncating the file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or writing fails.
    fn write_to_path<P: AsRef<Path>>(
        document: &Self::Document,
        path: P,
    ) -> Result<(), Self::Error> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        Self::write_to(document, &mut writer)?;
        writer.flush()?;
        Ok(())
    }
}
