//! Sheet backends for the book collection
//!
//! The collection is persisted as one table with a header row equal to
//! [`COLUMNS`]. [`CsvSheet`] stores it as a comma-separated file next to
//! the user's other documents. Every write replaces the whole file
//! (temp file + rename), so readers only ever see a complete snapshot.

use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use fs2::FileExt;

use super::error::{LibraryError, LibraryResult};
use crate::domain::{Book, Collection, COLUMNS};

/// Where a collection is read from and written to
pub trait SheetBackend {
    /// Reads the whole collection, or `None` if nothing has been persisted yet
    fn read(&self) -> LibraryResult<Option<Collection>>;

    /// Replaces the persisted collection with `books`
    fn write(&self, books: &Collection) -> LibraryResult<()>;

    /// Human-readable location, for messages
    fn location(&self) -> String;
}

/// Collection stored as a CSV file
#[derive(Debug, Clone)]
pub struct CsvSheet {
    path: PathBuf,
}

impl CsvSheet {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path to the sheet file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(OsString::from)
            .unwrap_or_else(|| OsString::from("library"));
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn read_error(&self, context: &str, err: csv::Error) -> LibraryError {
        let message = format!("{}: {}", context, err);
        match err.into_kind() {
            csv::ErrorKind::Io(source) => LibraryError::io("read", &self.path, source),
            _ => LibraryError::format(&self.path, message),
        }
    }

    fn write_temp(&self, temp_path: &Path, books: &Collection) -> LibraryResult<()> {
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(temp_path)
            .map_err(|e| LibraryError::io("create", temp_path, e))?;

        file.lock_exclusive()
            .map_err(|e| LibraryError::io("lock", temp_path, e))?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(&file);

        let to_io = |e: csv::Error| LibraryError::io("write", temp_path, io::Error::other(e));

        writer.write_record(COLUMNS).map_err(to_io)?;
        for book in books {
            writer.serialize(book).map_err(to_io)?;
        }

        writer
            .flush()
            .map_err(|e| LibraryError::io("flush", temp_path, e))?;

        // Lock is released when file is dropped
        Ok(())
    }
}

impl SheetBackend for CsvSheet {
    fn read(&self) -> LibraryResult<Option<Collection>> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(LibraryError::io("open", &self.path, e)),
        };

        file.lock_shared()
            .map_err(|e| LibraryError::io("lock", &self.path, e))?;

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(BufReader::new(&file));

        let headers = reader
            .headers()
            .map_err(|e| self.read_error("header row", e))?
            .clone();

        if headers.is_empty() {
            return Err(LibraryError::format(
                &self.path,
                format!("file is empty, expected columns {:?}", COLUMNS),
            ));
        }

        if headers.iter().ne(COLUMNS) {
            return Err(LibraryError::format(
                &self.path,
                format!(
                    "expected columns {:?}, found {:?}",
                    COLUMNS,
                    headers.iter().collect::<Vec<_>>()
                ),
            ));
        }

        let mut books = Collection::new();
        for (idx, record) in reader.deserialize::<Book>().enumerate() {
            let book = record.map_err(|e| self.read_error(&format!("row {}", idx + 1), e))?;
            books.push(book);
        }

        Ok(Some(books))
    }

    fn write(&self, books: &Collection) -> LibraryResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| LibraryError::io("create directory", parent, e))?;
        }

        let temp_path = self.temp_path();
        if let Err(e) = self.write_temp(&temp_path, books) {
            let _ = fs::remove_file(&temp_path);
            return Err(e);
        }

        fs::rename(&temp_path, &self.path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            LibraryError::io("replace", &self.path, e)
        })
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}
