//! Loading streams from strings, readers and files

use super::char_stream::Stream;
use super::error::{StreamError, StreamResult};
use crate::config::compile_time::stream::MAX_SOURCE_SIZE;
use crate::config::runtime::StreamPreferences;
use crate::logging::codes;
use crate::{log_debug, log_error, log_success};
use std::fs;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

impl FromStr for Stream {
    type Err = StreamError;

    /// Build a stream from text, enforcing the compile-time size limit
    fn from_str(text: &str) -> StreamResult<Self> {
        check_size(text.len() as u64, "string")?;
        Ok(Stream::new(text))
    }
}

impl Stream {
    /// Maximum number of source bytes a stream will buffer
    pub fn max_source_size() -> u64 {
        MAX_SOURCE_SIZE
    }

    /// Read an entire source into a stream
    pub fn from_reader<R: Read>(reader: R) -> StreamResult<Self> {
        Self::from_reader_with_preferences(reader, "reader", &StreamPreferences::default())
    }

    /// Read a file into a stream
    pub fn from_path<P: AsRef<Path>>(path: P) -> StreamResult<Self> {
        Self::from_path_with_preferences(path, &StreamPreferences::default())
    }

    pub fn from_path_with_preferences<P: AsRef<Path>>(
        path: P,
        preferences: &StreamPreferences,
    ) -> StreamResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        log_debug!("Loading source file", "file" => path_str);

        let metadata = fs::metadata(path).map_err(|e| {
            let error = if e.kind() == std::io::ErrorKind::NotFound {
                StreamError::NotFound {
                    path: path_str.clone(),
                }
            } else {
                StreamError::Io {
                    origin: path_str.clone(),
                    message: e.to_string(),
                }
            };
            log_error!(error.error_code(), "Cannot stat source file",
                "file" => path_str,
                "cause" => e
            );
            error
        })?;

        if !metadata.is_file() {
            let error = StreamError::Io {
                origin: path_str.clone(),
                message: "not a regular file".to_string(),
            };
            log_error!(error.error_code(), "Source path is not a file", "file" => path_str);
            return Err(error);
        }

        check_size(metadata.len(), &path_str)?;

        let file = fs::File::open(path).map_err(|e| {
            let error = StreamError::Io {
                origin: path_str.clone(),
                message: e.to_string(),
            };
            log_error!(error.error_code(), "Cannot open source file", "file" => path_str);
            error
        })?;

        Self::from_reader_with_preferences(file, &path_str, preferences)
    }

    /// Read from `reader`, naming it `origin` in errors and log events
    pub fn from_reader_with_preferences<R: Read>(
        reader: R,
        origin: &str,
        preferences: &StreamPreferences,
    ) -> StreamResult<Self> {
        let mut bytes = Vec::new();
        reader
            .take(MAX_SOURCE_SIZE + 1)
            .read_to_end(&mut bytes)
            .map_err(|e| {
                let error = StreamError::Io {
                    origin: origin.to_string(),
                    message: e.to_string(),
                };
                log_error!(error.error_code(), "Failed to read source", "origin" => origin);
                error
            })?;

        check_size(bytes.len() as u64, origin)?;

        let text = String::from_utf8(bytes).map_err(|e| {
            let error = StreamError::InvalidEncoding {
                origin: origin.to_string(),
                message: e.to_string(),
            };
            log_error!(error.error_code(), "Source is not valid UTF-8",
                "origin" => origin,
                "valid_up_to" => e.utf8_error().valid_up_to()
            );
            error
        })?;

        let stream = Stream::with_preferences(&text, preferences);

        if preferences.log_source_loading {
            log_success!(codes::success::SOURCE_LOADED, "Source loaded",
                "origin" => origin,
                "chars" => stream.len(),
                "lines" => stream.line_count()
            );
        }

        Ok(stream)
    }
}

fn check_size(size: u64, origin: &str) -> StreamResult<()> {
    if size > MAX_SOURCE_SIZE {
        let error = StreamError::TooLarge {
            size,
            max_size: MAX_SOURCE_SIZE,
        };
        log_error!(error.error_code(), "Source exceeds maximum size",
            "origin" => origin,
            "size" => size,
            "max_size" => MAX_SOURCE_SIZE
        );
        return Err(error);
    }
    Ok(())
}
