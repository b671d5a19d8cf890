//! Reading text from `http://` and `https://` locations.
//!
//! A remote resource is first downloaded into a temporary `.tmp` file by
//! [`fetch`]; the resulting [`Download`] is then opened by an ordinary
//! [`TextFile`]. [`WebTextFile`] ties the two together and removes the
//! temporary file when the handle closes.
//!
//! No HTTP client ships with this crate. Callers plug one in through
//! [`Transport`].

use std::{
    io::{self, ErrorKind, Read, Write},
    ops::{Deref, DerefMut},
    path::Path,
};

use tempfile::TempPath;

use crate::{
    TextFile,
    error::{Error, Result},
    options::FetchOptions,
};

/// Opens connections to remote resources.
pub trait Transport {
    /// Body of one request.
    type Response: Response;

    /// Connects to `url`, following redirects.
    ///
    /// # Errors
    ///
    /// Implementations report connection failures, typically as
    /// [`Error::Fetch`].
    fn connect(&mut self, url: &str) -> Result<Self::Response>;
}

/// Body of a connected request. Reading yields the body as sent, which for a
/// compressed response is the compressed form.
pub trait Response: Read {
    /// Returns `true` when the body is sent with a content encoding.
    fn is_compressed(&self) -> bool;

    /// Length the server reported for the body as sent, if any.
    fn content_length(&self) -> Option<u64>;

    /// Reads and decodes the whole compressed body.
    ///
    /// # Errors
    ///
    /// Read or decompression failures.
    fn read_uncompressed(&mut self) -> io::Result<Vec<u8>>;

    /// Final URL after redirects, when it differs from the requested one.
    fn redirect_url(&self) -> Option<&str>;
}

/// A remote resource saved to a temporary file. The file is deleted when the
/// value is dropped.
#[derive(Debug)]
pub struct Download {
    path: TempPath,
    redirect_url: Option<String>,
    size: u64,
}

impl Download {
    /// Location of the temporary file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Final URL after redirects, if the transport reported one.
    #[must_use]
    pub fn redirect_url(&self) -> Option<&str> {
        self.redirect_url.as_deref()
    }

    /// Number of bytes written to the temporary file.
    #[must_use]
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Deletes the temporary file now.
    ///
    /// # Errors
    ///
    /// The removal failure; the file may then outlive the value.
    pub fn close(self) -> io::Result<()> {
        self.path.close()
    }
}

/// Returns `true` for locations that must be downloaded before reading.
#[must_use]
pub fn is_remote(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

/// Downloads `url` into a fresh temporary file.
///
/// Compressed bodies are decoded in one piece, and only when the reported
/// length is within [`FetchOptions::max_compressed_size`]. Other bodies are
/// copied [`FetchOptions::chunk_size`] bytes at a time until they end or
/// [`FetchOptions::max_size`] bytes have been copied. A read failure ends the
/// copy and keeps what arrived before it.
///
/// # Errors
///
/// Whatever [`Transport::connect`] reports, [`Error::Fetch`] for a compressed
/// body above the limit, [`Error::EmptyDownload`] when nothing was written,
/// and [`Error::Io`] for the temporary file.
pub fn fetch<T: Transport + ?Sized>(
    transport: &mut T,
    url: &str,
    options: &FetchOptions,
) -> Result<Download> {
    let mut response = transport.connect(url)?;
    let mut temp = tempfile::Builder::new()
        .prefix("textfile-")
        .suffix(".tmp")
        .tempfile()?;

    let size = if response.is_compressed() {
        let reported = response.content_length().unwrap_or(0);
        if reported > options.max_compressed_size {
            return Err(Error::Fetch(format!(
                "compressed body of {reported} bytes exceeds {} bytes",
                options.max_compressed_size
            )));
        }
        let body = response.read_uncompressed()?;
        temp.write_all(&body)?;
        body.len() as u64
    } else {
        copy_capped(&mut response, temp.as_file_mut(), options)?
    };
    temp.flush()?;

    if size == 0 {
        return Err(Error::EmptyDownload);
    }

    let redirect_url = response.redirect_url().map(str::to_owned);
    tracing::debug!(
        url,
        size,
        compressed = response.is_compressed(),
        redirect = redirect_url.as_deref(),
        "fetched"
    );
    Ok(Download {
        path: temp.into_temp_path(),
        redirect_url,
        size,
    })
}

fn copy_capped<R, W>(from: &mut R, to: &mut W, options: &FetchOptions) -> io::Result<u64>
where
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    let mut chunk = vec![0; options.chunk_size.max(1)];
    let mut total = 0;
    while total < options.max_size {
        let n = match from.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(error) => {
                tracing::warn!(%error, copied = total, "body read failed, keeping partial body");
                break;
            }
        };
        to.write_all(&chunk[..n])?;
        total += n as u64;
    }
    Ok(total)
}

/// A [`TextFile`] that also opens `http://` and `https://` locations.
///
/// Remote locations are downloaded with [`fetch`] and the temporary copy is
/// opened; it is deleted again by [`WebTextFile::close`], by the next open,
/// or on drop. All reading, seeking and writing goes through the wrapped
/// [`TextFile`], reachable by deref.
///
/// # Examples
///
/// ```rust
/// use std::io::{self, Cursor, Read};
///
/// use textfile::{
///     FetchOptions, TextFile,
///     web::{Response, Transport, WebTextFile},
/// };
///
/// struct Canned(Cursor<Vec<u8>>);
///
/// impl Read for Canned {
///     fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
///         self.0.read(buf)
///     }
/// }
///
/// impl Response for Canned {
///     fn is_compressed(&self) -> bool { false }
///     fn content_length(&self) -> Option<u64> { None }
///     fn read_uncompressed(&mut self) -> io::Result<Vec<u8>> { unreachable!() }
///     fn redirect_url(&self) -> Option<&str> { None }
/// }
///
/// struct Static;
///
/// impl Transport for Static {
///     type Response = Canned;
///     fn connect(&mut self, _url: &str) -> textfile::Result<Canned> {
///         Ok(Canned(Cursor::new(b"\xEF\xBB\xBFremote\n".to_vec())))
///     }
/// }
///
/// # fn main() -> textfile::Result<()> {
/// let mut file = WebTextFile::new(TextFile::default(), Static, FetchOptions::default());
/// file.open("https://example.invalid/a.srt")?;
/// assert_eq!(file.read_line()?.unwrap(), "remote");
/// # Ok(())
/// # }
/// ```
pub struct WebTextFile<T> {
    file: TextFile,
    transport: T,
    options: FetchOptions,
    download: Option<Download>,
    redirect_url: Option<String>,
}

impl<T: Transport> WebTextFile<T> {
    /// Wraps `file`; remote locations are fetched through `transport`.
    pub fn new(file: TextFile, transport: T, options: FetchOptions) -> Self {
        Self {
            file,
            transport,
            options,
            download: None,
            redirect_url: None,
        }
    }

    /// Opens a local path or downloads and opens a remote location.
    ///
    /// # Errors
    ///
    /// Fetch failures (see [`fetch`]) and everything [`TextFile::open`]
    /// reports.
    pub fn open(&mut self, location: &str) -> Result<()> {
        self.close();
        self.redirect_url = None;
        if !is_remote(location) {
            return self.file.open(location);
        }

        let download = fetch(&mut self.transport, location, &self.options)?;
        self.redirect_url = download.redirect_url().map(str::to_owned);
        self.file.open(download.path())?;
        self.download = Some(download);
        Ok(())
    }

    /// Closes the file and deletes the temporary download, if any.
    pub fn close(&mut self) {
        self.file.close();
        if let Some(download) = self.download.take() {
            let path = download.path().to_path_buf();
            if let Err(error) = download.close() {
                tracing::warn!(path = %path.display(), %error, "could not delete download");
            }
        }
    }

    /// Final URL of the last remote open, if the transport reported a
    /// redirect.
    #[must_use]
    pub fn redirect_url(&self) -> Option<&str> {
        self.redirect_url.as_deref()
    }

    /// The temporary copy backing the current remote open.
    #[must_use]
    pub fn download(&self) -> Option<&Download> {
        self.download.as_ref()
    }
}

impl<T> Deref for WebTextFile<T> {
    type Target = TextFile;

    fn deref(&self) -> &TextFile {
        &self.file
    }
}

impl<T> DerefMut for WebTextFile<T> {
    fn deref_mut(&mut self) -> &mut TextFile {
        &mut self.file
    }
}

impl<T> Drop for WebTextFile<T> {
    fn drop(&mut self) {
        self.file.close();
    }
}

impl<T> core::fmt::Debug for WebTextFile<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("WebTextFile")
            .field("file", &self.file)
            .field("download", &self.download)
            .field("redirect_url", &self.redirect_url)
            .finish_non_exhaustive()
    }
}
