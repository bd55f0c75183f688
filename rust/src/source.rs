use crate::error::{Result, TagsError};
use std::fs;
use std::path::PathBuf;
use tracing::info;

/// Where the function summary comes from. Parsing does not care.
pub trait SummarySource {
    fn describe(&self) -> String;
    fn read(&self) -> Result<Vec<u8>>;
}

#[derive(Clone, Debug)]
pub struct FileSource {
    pub path: PathBuf,
}

impl SummarySource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn read(&self) -> Result<Vec<u8>> {
        let bytes = fs::read(&self.path).map_err(|e| TagsError::input(self.describe(), e))?;
        info!(path = %self.path.display(), bytes = bytes.len(), "read function summary");
        Ok(bytes)
    }
}

#[derive(Clone, Debug)]
pub struct UrlSource {
    pub url: String,
}

impl SummarySource for UrlSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    fn read(&self) -> Result<Vec<u8>> {
        let response = reqwest::blocking::get(&self.url)
            .and_then(|r| r.error_for_status())
            .map_err(|e| TagsError::input(self.describe(), e))?;
        let bytes = response
            .bytes()
            .map_err(|e| TagsError::input(self.describe(), e))?;
        info!(url = %self.url, bytes = bytes.len(), "fetched function summary");
        Ok(bytes.to_vec())
    }
}

pub fn is_url(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

pub fn open_source(location: &str) -> Box<dyn SummarySource> {
    if is_url(location) {
        Box::new(UrlSource {
            url: location.to_string(),
        })
    } else {
        Box::new(FileSource {
            path: PathBuf::from(location),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;

    /// Serves a single HTTP response on a local port and returns its URL.
    fn serve_once(response: &'static str) -> (String, thread::JoinHandle<()>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/funcsummary.txt", listener.local_addr().unwrap());
        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request: Vec<u8> = Vec::new();
            let mut buf = [0u8; 512];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut buf).unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            stream.write_all(response.as_bytes()).unwrap();
        });
        (url, handle)
    }

    #[test]
    fn http_error_status_is_input_unavailable() {
        let (url, server) = serve_once(
            "HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
        );
        let err = UrlSource { url: url.clone() }.read().unwrap_err();
        server.join().unwrap();
        match &err {
            TagsError::InputUnavailable { source_desc, reason } => {
                assert_eq!(source_desc, &url);
                assert!(reason.contains("404"), "unexpected reason: {reason}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn fetches_body_on_success() {
        let (url, server) = serve_once(
            "HTTP/1.1 200 OK\r\nContent-Length: 23\r\nConnection: close\r\n\r\nint strlen(string $str)",
        );
        let body = open_source(&url).read().unwrap();
        server.join().unwrap();
        assert_eq!(body, b"int strlen(string $str)");
    }

    #[test]
    fn picks_source_by_scheme() {
        assert_eq!(
            open_source("https://doc.php.net/funcsummary.txt").describe(),
            "https://doc.php.net/funcsummary.txt"
        );
        assert!(is_url("http://cvs.php.net/funcsummary.txt"));
        assert!(!is_url("/tmp/funcsummary.txt"));
        assert!(!is_url("httpdocs/funcsummary.txt"));
    }

    #[test]
    fn missing_file_is_input_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileSource {
            path: dir.path().join("nope.txt"),
        };
        let err = source.read().unwrap_err();
        assert!(matches!(err, TagsError::InputUnavailable { .. }));
        assert_eq!(err.exit_code(), 2);
    }
}
