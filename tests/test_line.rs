use std::time::Duration;

use tokio::io::AsyncWriteExt;
use vhttpd::http::line::{LineError, LineReader};

#[tokio::test]
async fn test_reads_crlf_lines_without_terminator() {
    let input: &[u8] = b"GET / HTTP/1.1\r\nHost: a.com\r\n\r\n";
    let mut reader = LineReader::new(input);

    assert_eq!(reader.read_line().await.unwrap().as_deref(), Some("GET / HTTP/1.1"));
    assert_eq!(reader.read_line().await.unwrap().as_deref(), Some("Host: a.com"));
    assert_eq!(reader.read_line().await.unwrap().as_deref(), Some(""));
    assert_eq!(reader.read_line().await.unwrap(), None);
}

#[tokio::test]
async fn test_clean_eof_with_nothing_received() {
    let input: &[u8] = b"";
    let mut reader = LineReader::new(input);

    assert!(reader.read_line().await.unwrap().is_none());
    assert!(!reader.received());
}

#[tokio::test]
async fn test_eof_mid_line_is_truncated() {
    let input: &[u8] = b"GET / HT";
    let mut reader = LineReader::new(input);

    let result = reader.read_line().await;
    assert!(matches!(result, Err(LineError::Truncated)));
    assert!(reader.received());
}

#[tokio::test]
async fn test_bare_lf_is_line_content() {
    let input: &[u8] = b"a\nb\r\n";
    let mut reader = LineReader::new(input);

    assert_eq!(reader.read_line().await.unwrap().as_deref(), Some("a\nb"));
}

#[tokio::test]
async fn test_invalid_utf8() {
    let input: &[u8] = b"\xff\xfe\r\n";
    let mut reader = LineReader::new(input);

    assert!(matches!(reader.read_line().await, Err(LineError::InvalidUtf8)));
}

#[tokio::test]
async fn test_idle_timeout_has_nothing_received() {
    let (_client, server) = tokio::io::duplex(64);
    let mut reader = LineReader::new(server);
    reader.arm(Duration::from_millis(50));

    assert!(matches!(reader.read_line().await, Err(LineError::TimedOut)));
    assert!(!reader.received());
}

#[tokio::test]
async fn test_timeout_after_partial_line_counts_as_received() {
    let (mut client, server) = tokio::io::duplex(64);
    let mut reader = LineReader::new(server);
    client.write_all(b"GET /slow").await.unwrap();
    reader.arm(Duration::from_millis(50));

    assert!(matches!(reader.read_line().await, Err(LineError::TimedOut)));
    assert!(reader.received());
}

#[tokio::test]
async fn test_arm_resets_received_flag() {
    let (mut client, server) = tokio::io::duplex(64);
    let mut reader = LineReader::new(server);
    client.write_all(b"first\r\n").await.unwrap();

    reader.arm(Duration::from_secs(1));
    assert_eq!(reader.read_line().await.unwrap().as_deref(), Some("first"));
    assert!(reader.received());

    reader.arm(Duration::from_millis(20));
    assert!(!reader.received());
}
