use eyre::Result;
use imgfetch_lib::fetch::{FetchOptions, Fetcher};
use imgfetch_lib::storage::Storage;
use std::path::Path;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PNG_SIGNATURE: &[u8] = &[0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];

pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter("imgfetch_lib=debug,imgfetch_e2e_tests=debug")
        .with_test_writer()
        .try_init()
        .ok();
}

pub fn test_options() -> FetchOptions {
    FetchOptions {
        timeout: Duration::from_secs(2),
        ..FetchOptions::default()
    }
}

pub fn create_fetcher(output_dir: &Path, options: FetchOptions) -> Result<Fetcher> {
    let storage = Storage::open(output_dir)?;
    Ok(Fetcher::new(storage, options)?)
}

/// A PNG-looking payload whose content differs per `seed`.
pub fn fake_png(seed: u8, len: usize) -> Vec<u8> {
    let mut body = PNG_SIGNATURE.to_vec();
    body.extend((0..len).map(|i| seed.wrapping_add((i % 251) as u8)));
    body
}

pub async fn mount_body(server: &MockServer, url_path: &str, content_type: &str, body: Vec<u8>) {
    Mock::given(method("GET"))
        .and(path(url_path))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, content_type))
        .mount(server)
        .await;
}

/// A URL on a local port nothing is listening on.
pub fn unreachable_url() -> Result<String> {
    let listener = std::net::TcpListener::bind("127.0.0.1:0")?;
    let port = listener.local_addr()?.port();
    drop(listener);
    Ok(format!("http://127.0.0.1:{port}/gone.png"))
}

/// Serves one request with a chunked body and no `Content-Length`, which a
/// mock server cannot produce. Returns the URL to request.
pub async fn serve_chunked_once(content_type: &str, chunks: Vec<Vec<u8>>) -> Result<String> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let port = listener.local_addr()?.port();
    let head = format!(
        "HTTP/1.1 200 OK\r\nContent-Type: {content_type}\r\nTransfer-Encoding: chunked\r\nConnection: close\r\n\r\n"
    );

    tokio::spawn(async move {
        let Ok((mut stream, _)) = listener.accept().await else {
            return;
        };

        let mut request = Vec::new();
        let mut buffer = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            match stream.read(&mut buffer).await {
                Ok(0) | Err(_) => return,
                Ok(n) => request.extend_from_slice(&buffer[..n]),
            }
        }

        let mut response = head.into_bytes();
        for chunk in chunks {
            response.extend_from_slice(format!("{:x}\r\n", chunk.len()).as_bytes());
            response.extend_from_slice(&chunk);
            response.extend_from_slice(b"\r\n");
        }
        response.extend_from_slice(b"0\r\n\r\n");

        // The client may hang up early once it has seen enough.
        let _ = stream.write_all(&response).await;
        let _ = stream.shutdown().await;
    });

    Ok(format!("http://127.0.0.1:{port}/stream.png"))
}

pub fn stored_file_count(output_dir: &Path) -> Result<usize> {
    let mut count = 0;
    for entry in std::fs::read_dir(output_dir)? {
        if entry?.file_type()?.is_file() {
            count += 1;
        }
    }
    Ok(count)
}
