//! FileSystem trait for abstracting file I/O.
//!
//! Stores in helpline-infra write through this trait, so tests can swap the
//! real filesystem for an in-memory one.

use std::path::Path;

pub trait FileSystem: Send + Sync {
    /// Write string content to a file, creating parent directories as needed.
    fn write_file(
        &self,
        path: &Path,
        content: &str,
    ) -> impl std::future::Future<Output = Result<(), std::io::Error>> + Send;

    /// Append string content to a file, creating it and its parents if needed.
    fn append_file(
        &self,
        path: &Path,
        content: &str,
    ) -> impl std::future::Future<Output = Result<(), std::io::Error>> + Send;

    /// Read a file's content as a string.
    fn read_file(
        &self,
        path: &Path,
    ) -> impl std::future::Future<Output = Result<String, std::io::Error>> + Send;

    fn exists(&self, path: &Path) -> impl std::future::Future<Output = bool> + Send;
}
