//! Transcript records and the bounded tail reader.
//!
//! The transcript is an externally owned JSONL log: one JSON record per
//! line, discriminated by the `"type"` field. The gate only ever reads a
//! trailing window of it and must tolerate records it does not recognize.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

// ─── Record types ─────────────────────────────────────────────────────────

/// A single transcript record. Only assistant records matter to the gate;
/// every other record type (user, system, future additions) parses to
/// [`TranscriptRecord::Other`] and is skipped.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TranscriptRecord {
    Assistant(AssistantRecord),
    #[serde(other)]
    Other,
}

/// `type = "assistant"` — a recorded model response.
#[derive(Debug, Clone, Deserialize)]
pub struct AssistantRecord {
    pub message: AssistantPayload,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AssistantPayload {
    #[serde(default)]
    pub content: Vec<ContentBlock>,
}

/// Content blocks within an assistant record. Tool-use, thinking, and any
/// future block types carry no text the gate cares about.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Text {
        text: String,
    },
    #[serde(other)]
    Other,
}

/// Parse a window of raw JSONL lines into records, skipping blank lines and
/// lines that do not parse. A partial first line (from the tail reader's
/// chunk boundary) fails to parse and drops out here.
pub fn parse_window(lines: &[String]) -> Vec<TranscriptRecord> {
    lines
        .iter()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .filter_map(|l| serde_json::from_str(l).ok())
        .collect()
}

/// The most recent assistant text in a window: the last `text` block across
/// all assistant records, in file order.
pub fn last_assistant_text(records: &[TranscriptRecord]) -> Option<&str> {
    records
        .iter()
        .filter_map(|r| match r {
            TranscriptRecord::Assistant(a) => Some(a),
            TranscriptRecord::Other => None,
        })
        .flat_map(|a| a.message.content.iter())
        .filter_map(|b| match b {
            ContentBlock::Text { text } => Some(text.as_str()),
            ContentBlock::Other => None,
        })
        .next_back()
}

// ─── TranscriptSource ─────────────────────────────────────────────────────

/// A read-only view of the trailing window of a transcript.
///
/// The gate depends on this trait rather than a file path so tests can
/// substitute an in-memory fake.
pub trait TranscriptSource {
    /// The last `n` lines of the transcript, oldest first, or `None` when
    /// the transcript is missing, unreadable, or times out.
    fn tail_lines(&self, n: usize) -> Option<Vec<String>>;
}

/// File-backed transcript source with a read timeout.
///
/// The read runs on a waiter thread and is abandoned after `io_timeout`;
/// a timeout is indistinguishable from an unreadable file, which is the
/// fail-safe direction (no marker found → block).
pub struct FileTranscript {
    path: PathBuf,
    io_timeout: Duration,
}

impl FileTranscript {
    pub fn new(path: impl Into<PathBuf>, io_timeout: Duration) -> Self {
        FileTranscript {
            path: path.into(),
            io_timeout,
        }
    }
}

impl TranscriptSource for FileTranscript {
    fn tail_lines(&self, n: usize) -> Option<Vec<String>> {
        let path = self.path.clone();
        let (tx, rx) = std::sync::mpsc::channel();
        std::thread::spawn(move || {
            let _ = tx.send(read_tail(&path, n));
        });
        match rx.recv_timeout(self.io_timeout) {
            Ok(Ok(lines)) => Some(lines),
            Ok(Err(e)) => {
                tracing::debug!("transcript unreadable: {e}");
                None
            }
            Err(_) => {
                tracing::warn!("transcript read timed out after {:?}", self.io_timeout);
                None
            }
        }
    }
}

// ─── Tail reader ──────────────────────────────────────────────────────────

const TAIL_CHUNK: u64 = 8192;

/// Read the last `n` lines of `path` without scanning the whole file:
/// fixed-size chunks are read backwards from the end until more than `n`
/// newlines have been seen (or the file start is reached).
fn read_tail(path: &Path, n: usize) -> std::io::Result<Vec<String>> {
    use std::io::{Read, Seek, SeekFrom};

    let mut file = std::fs::File::open(path)?;
    let len = file.metadata()?.len();
    let mut buf: Vec<u8> = Vec::new();
    let mut pos = len;

    while pos > 0 {
        let chunk = TAIL_CHUNK.min(pos);
        pos -= chunk;
        let mut head = vec![0u8; chunk as usize];
        file.seek(SeekFrom::Start(pos))?;
        file.read_exact(&mut head)?;
        head.extend_from_slice(&buf);
        buf = head;
        // > n rather than >= n: the extra newline guarantees the first kept
        // line is complete.
        if buf.iter().filter(|&&b| b == b'\n').count() > n {
            break;
        }
    }

    let text = String::from_utf8_lossy(&buf);
    let mut lines: Vec<String> = text.lines().map(str::to_owned).collect();
    if lines.len() > n {
        lines.drain(..lines.len() - n);
    }
    Ok(lines)
}

// ─── Tests ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn assistant_line(text: &str) -> String {
        format!(
            r#"{{"type":"assistant","message":{{"role":"assistant","content":[{{"type":"text","text":"{text}"}}]}}}}"#
        )
    }

    #[test]
    fn parses_assistant_text_block() {
        let lines = vec![assistant_line("hello")];
        let records = parse_window(&lines);
        assert_eq!(records.len(), 1);
        assert_eq!(last_assistant_text(&records), Some("hello"));
    }

    #[test]
    fn skips_unknown_record_types() {
        let lines = vec![
            r#"{"type":"user","message":{"content":"hi"}}"#.to_string(),
            r#"{"type":"summary","summary":"earlier context"}"#.to_string(),
            assistant_line("reply"),
        ];
        let records = parse_window(&lines);
        assert_eq!(records.len(), 3);
        assert_eq!(last_assistant_text(&records), Some("reply"));
    }

    #[test]
    fn skips_malformed_lines() {
        let lines = vec![
            "not json at all".to_string(),
            "{\"type\":".to_string(),
            assistant_line("ok"),
            String::new(),
        ];
        let records = parse_window(&lines);
        assert_eq!(records.len(), 1);
        assert_eq!(last_assistant_text(&records), Some("ok"));
    }

    #[test]
    fn last_text_wins_across_records_and_blocks() {
        let multi = r#"{"type":"assistant","message":{"content":[
            {"type":"text","text":"first"},
            {"type":"tool_use","id":"tu_1","name":"Bash","input":{}},
            {"type":"text","text":"second"}
        ]}}"#
            .replace('\n', " ");
        let lines = vec![assistant_line("older"), multi];
        let records = parse_window(&lines);
        assert_eq!(last_assistant_text(&records), Some("second"));
    }

    #[test]
    fn assistant_without_text_blocks_yields_none() {
        let lines =
            vec![r#"{"type":"assistant","message":{"content":[{"type":"thinking","thinking":"hmm"}]}}"#
                .to_string()];
        let records = parse_window(&lines);
        assert_eq!(last_assistant_text(&records), None);
    }

    #[test]
    fn empty_window_yields_none() {
        assert_eq!(last_assistant_text(&[]), None);
    }

    #[test]
    fn read_tail_returns_whole_short_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("log.jsonl");
        std::fs::write(&path, "a\nb\nc\n").unwrap();
        let lines = read_tail(&path, 100).unwrap();
        assert_eq!(lines, vec!["a", "b", "c"]);
    }

    #[test]
    fn read_tail_bounds_long_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("log.jsonl");
        let content: String = (0..500).map(|i| format!("line-{i}\n")).collect();
        std::fs::write(&path, content).unwrap();
        let lines = read_tail(&path, 3).unwrap();
        assert_eq!(lines, vec!["line-497", "line-498", "line-499"]);
    }

    #[test]
    fn read_tail_spans_chunk_boundary() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("log.jsonl");
        // Each line ~1KB so the last 10 lines straddle the 8KB chunk size.
        let long = "x".repeat(1000);
        let content: String = (0..40).map(|i| format!("{i}-{long}\n")).collect();
        std::fs::write(&path, content).unwrap();
        let lines = read_tail(&path, 10).unwrap();
        assert_eq!(lines.len(), 10);
        assert!(lines[0].starts_with("30-"));
        assert!(lines[9].starts_with("39-"));
    }

    #[test]
    fn read_tail_of_empty_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("log.jsonl");
        std::fs::write(&path, "").unwrap();
        assert!(read_tail(&path, 10).unwrap().is_empty());
    }

    #[test]
    fn file_transcript_missing_file_is_none() {
        let source = FileTranscript::new("/no/such/path.jsonl", Duration::from_secs(1));
        assert!(source.tail_lines(10).is_none());
    }

    #[test]
    fn file_transcript_reads_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("log.jsonl");
        std::fs::write(&path, format!("{}\n", assistant_line("done"))).unwrap();
        let source = FileTranscript::new(&path, Duration::from_secs(1));
        let lines = source.tail_lines(10).unwrap();
        assert_eq!(lines.len(), 1);
    }
}
