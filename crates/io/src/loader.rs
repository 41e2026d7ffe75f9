use std::time::Duration;

use reqwest::blocking::Client;
use satcat_engine::RawRow;
use satcat_recon::DatasetLoader;

use crate::catalog::catalog_lines;
use crate::error::IoError;
use crate::registry::parse_registry;
use crate::source::{decode_text, fetch, http_client, read_path, Source, DEFAULT_TIMEOUT};

/// Loads both datasets from local files or URLs.
///
/// The HTTP client is only built once a URL source is read.
#[derive(Debug)]
pub struct FileLoader {
    registry: Source,
    catalog: Source,
    catalog_header_lines: usize,
    timeout: Duration,
    http: Option<Client>,
}

impl FileLoader {
    pub fn new(registry: Source, catalog: Source) -> Self {
        Self {
            registry,
            catalog,
            catalog_header_lines: 0,
            timeout: DEFAULT_TIMEOUT,
            http: None,
        }
    }

    pub fn with_catalog_header_lines(mut self, lines: usize) -> Self {
        self.catalog_header_lines = lines;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn client(&mut self) -> Result<&Client, IoError> {
        let client = match self.http.take() {
            Some(client) => client,
            None => http_client(self.timeout)?,
        };
        Ok(self.http.insert(client))
    }

    fn read_text(&mut self, source: &Source) -> Result<String, IoError> {
        let bytes = match source {
            Source::Path(path) => {
                log::info!("reading {}", path.display());
                read_path(path)?
            }
            Source::Url(url) => fetch(self.client()?, url)?,
        };
        Ok(decode_text(bytes))
    }
}

impl DatasetLoader for FileLoader {
    type Error = IoError;

    fn load_registry(&mut self) -> Result<Vec<RawRow>, IoError> {
        let source = self.registry.clone();
        let text = self.read_text(&source)?;
        parse_registry(&text)
    }

    fn load_catalog_lines(&mut self) -> Result<Vec<String>, IoError> {
        let source = self.catalog.clone();
        let text = self.read_text(&source)?;
        Ok(catalog_lines(&text, self.catalog_header_lines))
    }
}
