//! Shared fixtures for integration tests
//!
//! `MemorySource` serves canned listing pages and file bodies keyed by URL
//! and counts every request, so tests can assert that nothing was fetched.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use futures::stream;
use url::Url;

use ncep_fetcher::app::{ByteStream, ContentSource};
use ncep_fetcher::errors::{FetchResult, TransportError};

pub const ARCHIVE: &str = "http://archive.test/data/nccf/com/";

/// In-memory archive
#[derive(Debug, Default)]
pub struct MemorySource {
    pages: HashMap<String, String>,
    files: HashMap<String, (u16, Vec<u8>)>,
    fetches: AtomicUsize,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: impl Into<String>, html: impl Into<String>) -> Self {
        self.pages.insert(url.into(), html.into());
        self
    }

    pub fn with_file(mut self, url: impl Into<String>, status: u16, body: &[u8]) -> Self {
        self.files.insert(url.into(), (status, body.to_vec()));
        self
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

impl ContentSource for MemorySource {
    async fn fetch_text(&self, url: &Url) -> FetchResult<String> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.pages
            .get(url.as_str())
            .cloned()
            .ok_or_else(|| TransportError::Status {
                url: url.to_string(),
                status: 404,
            })
    }

    async fn fetch_stream(&self, url: &Url) -> FetchResult<ByteStream> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        match self.files.get(url.as_str()) {
            Some((200, body)) => {
                // Split the body so writes span several chunks
                let chunks: Vec<FetchResult<Vec<u8>>> =
                    body.chunks(7).map(|c| Ok(c.to_vec())).collect();
                Ok(Box::pin(stream::iter(chunks)))
            }
            Some((status, _)) => Err(TransportError::Status {
                url: url.to_string(),
                status: *status,
            }),
            None => Err(TransportError::Status {
                url: url.to_string(),
                status: 404,
            }),
        }
    }
}

/// Apache-style directory listing linking to `entries`, with icon rows
pub fn listing(title: &str, entries: &[&str]) -> String {
    let mut html = format!(
        "<html><head><title>Index of {title}</title></head>\n<body><h1>Index of {title}</h1>\n<pre>"
    );
    html.push_str("<img src=\"/icons/blank.gif\" alt=\"Icon \"> <a href=\"?C=N;O=D\">Name</a>\n");
    html.push_str(
        "<img src=\"/icons/back.gif\" alt=\"[PARENTDIR]\"> <a href=\"../\">Parent Directory</a>\n",
    );
    for entry in entries {
        let icon = if entry.ends_with('/') { "folder" } else { "unknown" };
        html.push_str(&format!(
            "<img src=\"/icons/{icon}.gif\" alt=\"[   ]\"> <a href=\"{entry}\">{entry}</a>  22-Mar-2018 18:00  1.2M\n"
        ));
    }
    html.push_str("</pre></body></html>");
    html
}

/// GFS archive with cycle-qualified GFS directories and a plain GDAS one
pub fn gfs_archive() -> MemorySource {
    MemorySource::new()
        .with_page(
            format!("{ARCHIVE}gfs/prod/"),
            listing(
                "/data/nccf/com/gfs/prod",
                &["gdas.20180322/", "gfs.2018032200/", "gfs.2018032218/"],
            ),
        )
        .with_page(
            format!("{ARCHIVE}gfs/prod/gfs.2018032218"),
            listing(
                "/data/nccf/com/gfs/prod/gfs.2018032218",
                &[
                    "gfs.t18z.pgrb2.1p00.f003",
                    "gfs.t18z.pgrb2.1p00.f003.idx",
                    "gfs.t18z.pgrb2.1p00.f004",
                    "gfs.t18z.pgrb2.0p25.f003",
                    "gfs.t18z.pgrb2.0p25.f006",
                ],
            ),
        )
        .with_page(
            format!("{ARCHIVE}gfs/prod/gdas.20180322"),
            listing(
                "/data/nccf/com/gfs/prod/gdas.20180322",
                &[
                    "gdas.t18z.pgrb2.1p00.f003",
                    "gdas.t18z.pgrb2.1p00.f003.idx",
                    "gdas.t18z.sfluxgrbf03.grib2",
                    "gdas.t00z.pgrb2.1p00.f003",
                ],
            ),
        )
}

/// NAM archive without cycle-qualified directories
pub fn nam_archive() -> MemorySource {
    MemorySource::new()
        .with_page(
            format!("{ARCHIVE}nam/prod/"),
            listing(
                "/data/nccf/com/nam/prod",
                &["hiresw.20180322/", "nam.20180321/", "nam.20180322/"],
            ),
        )
        .with_page(
            format!("{ARCHIVE}nam/prod/nam.20180322"),
            listing(
                "/data/nccf/com/nam/prod/nam.20180322",
                &[
                    "nam.t00z.awphys00.tm00.grib2",
                    "nam.t00z.awphys00.tm00.grib2.idx",
                    "nam.t06z.awphys00.tm00.grib2",
                    "nam.t00z.awip1200.tm00.grib2",
                ],
            ),
        )
}
