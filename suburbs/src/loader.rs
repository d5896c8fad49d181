//! Dataset loaders.

use std::fmt::{Display, Formatter};
use std::path::PathBuf;

use serde::Deserialize;
use tokio::sync::oneshot::{self, error::TryRecvError};

use crate::dataset::Dataset;
use crate::error::LoadError;

/// Loads the suburb dataset in one attempt.
#[async_trait::async_trait]
pub trait DatasetLoader: Send + Sync {
    /// Load and parse the dataset.
    async fn load(&self) -> Result<Dataset, LoadError>;
}

/// Reads the dataset from a local file.
pub struct FileLoader {
    path: PathBuf,
}

impl FileLoader {
    /// Create a new instance.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait::async_trait]
impl DatasetLoader for FileLoader {
    async fn load(&self) -> Result<Dataset, LoadError> {
        log::info!("Reading suburbs from {}", self.path.display());
        let bytes = tokio::fs::read(&self.path).await?;
        log::info!("Read {} from {}", ByteLen(bytes.len()), self.path.display());

        Dataset::from_geojson_slice(&bytes)
    }
}

/// Fetches the dataset over HTTP.
pub struct HttpLoader {
    client: reqwest::Client,
    url: String,
}

impl HttpLoader {
    /// Create a new instance.
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), url)
    }

    /// Create a new instance sharing the given client.
    pub fn with_client(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait::async_trait]
impl DatasetLoader for HttpLoader {
    async fn load(&self) -> Result<Dataset, LoadError> {
        let url = &self.url;
        log::info!("Downloading suburbs from {url}");
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            log::warn!("Suburbs request to {url} returned {status}");
            return Err(LoadError::Status(status.as_u16()));
        }

        let bytes = response.bytes().await?;
        log::info!("Downloaded {} from {url}", ByteLen(bytes.len()));

        Dataset::from_geojson_slice(&bytes)
    }
}

/// Where the dataset comes from.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum DatasetSource {
    /// Local file path.
    File(PathBuf),
    /// HTTP(S) URL.
    Url(String),
}

impl DatasetSource {
    /// Classifies the string: `http://` and `https://` prefixes are URLs, anything else is a path.
    pub fn parse(s: &str) -> Self {
        let lower = s.trim_start().to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Self::Url(s.trim().to_string())
        } else {
            Self::File(PathBuf::from(s))
        }
    }

    /// Loader for this source.
    pub fn loader(&self) -> Box<dyn DatasetLoader> {
        match self {
            Self::File(path) => Box::new(FileLoader::new(path.clone())),
            Self::Url(url) => Box::new(HttpLoader::new(url.clone())),
        }
    }
}

impl From<String> for DatasetSource {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl Display for DatasetSource {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Url(url) => f.write_str(url),
        }
    }
}

/// Load running on a background thread.
///
/// The UI thread polls it once per frame and never blocks. Dropping it abandons the load: the
/// result is discarded when it arrives.
pub struct PendingLoad {
    receiver: oneshot::Receiver<Result<Dataset, LoadError>>,
}

impl PendingLoad {
    /// Starts the load on a new thread with its own single-threaded runtime. `on_finish` is
    /// called after the result is available, e.g. to wake up the UI.
    pub fn spawn(
        loader: Box<dyn DatasetLoader>,
        on_finish: impl FnOnce() + Send + 'static,
    ) -> Self {
        let (sender, receiver) = oneshot::channel();

        std::thread::spawn(move || {
            let result = match tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
            {
                Ok(runtime) => runtime.block_on(loader.load()),
                Err(err) => Err(LoadError::Io(err)),
            };

            if sender.send(result).is_err() {
                log::debug!("Suburbs view was closed before the load finished");
            }
            on_finish();
        });

        Self { receiver }
    }

    /// Returns the result once it is available. After a result has been returned the load is
    /// finished and should be dropped.
    pub fn poll(&mut self) -> Option<Result<Dataset, LoadError>> {
        match self.receiver.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Closed) => Some(Err(LoadError::Interrupted)),
        }
    }
}

/// Human readable byte count for log messages.
struct ByteLen(usize);

impl Display for ByteLen {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        const KIB: usize = 1024;
        const MIB: usize = 1024 * KIB;
        match self.0 {
            n if n >= MIB => write!(f, "{:.1} MiB", n as f64 / MIB as f64),
            n if n >= KIB => write!(f, "{:.1} KiB", n as f64 / KIB as f64),
            n => write!(f, "{n} bytes"),
        }
    }
}
