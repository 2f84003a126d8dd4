//! Shared SSE (Server-Sent Events) stream adapter.
//!
//! One parser handles the transport concerns every provider shares — byte
//! buffering, line splitting, `data:` extraction, the `[DONE]` marker —
//! while a per-provider [`FragmentParser`] turns each data payload into that
//! provider's fragment type.

use std::collections::VecDeque;
use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::Bytes;
use futures::Stream;

use crate::error::{ChainError, Result};

/// Provider-specific transformation of one SSE data payload.
pub(crate) trait FragmentParser: Send {
    type Fragment: Send;

    /// Provider tag for error reporting.
    fn provider(&self) -> &'static str;

    /// Parse one `data:` payload. `Ok(None)` means the payload carries
    /// nothing for this provider (keep-alives, bookkeeping events).
    fn parse_data(&self, data: &str) -> Result<Option<Self::Fragment>>;
}

/// Adapts a raw HTTP byte stream into a stream of parsed fragments.
///
/// Owns the response body, so dropping the stream — normally or mid-flight —
/// closes the underlying connection.
pub(crate) struct SseStream<P: FragmentParser> {
    inner: Pin<Box<dyn Stream<Item = reqwest::Result<Bytes>> + Send>>,
    parser: P,
    buffer: String,
    pending: VecDeque<P::Fragment>,
    done: bool,
}

impl<P: FragmentParser> SseStream<P> {
    pub fn new(
        stream: impl Stream<Item = reqwest::Result<Bytes>> + Send + 'static,
        parser: P,
    ) -> Self {
        Self {
            inner: Box::pin(stream),
            parser,
            buffer: String::new(),
            pending: VecDeque::new(),
            done: false,
        }
    }

    /// Consume a chunk of bytes, queueing every complete fragment it yields.
    fn feed(&mut self, bytes: &[u8]) -> Result<()> {
        self.buffer.push_str(&String::from_utf8_lossy(bytes));

        while let Some(newline_pos) = self.buffer.find('\n') {
            let line = self.buffer[..newline_pos].trim().to_string();
            self.buffer.drain(..=newline_pos);

            let Some(data) = line.strip_prefix("data:") else {
                // Blank separators, `event:` names, and comments carry no
                // payload of their own.
                continue;
            };
            let data = data.trim_start();

            if data == "[DONE]" {
                self.done = true;
                break;
            }

            if let Some(fragment) = self.parser.parse_data(data)? {
                self.pending.push_back(fragment);
            }
        }

        Ok(())
    }
}

impl<P> Stream for SseStream<P>
where
    P: FragmentParser + Unpin,
    P::Fragment: Unpin,
{
    type Item = Result<P::Fragment>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();

        loop {
            if let Some(fragment) = this.pending.pop_front() {
                return Poll::Ready(Some(Ok(fragment)));
            }
            if this.done {
                return Poll::Ready(None);
            }

            match this.inner.as_mut().poll_next(cx) {
                Poll::Ready(Some(Ok(bytes))) => {
                    if let Err(err) = this.feed(&bytes) {
                        return Poll::Ready(Some(Err(err)));
                    }
                }
                Poll::Ready(Some(Err(err))) => {
                    return Poll::Ready(Some(Err(ChainError::network(
                        this.parser.provider(),
                        err.to_string(),
                    ))));
                }
                Poll::Ready(None) => {
                    // A partial line without a trailing newline is not a
                    // complete SSE event; drop it with the connection.
                    this.done = true;
                }
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::{StreamExt, stream};

    struct EchoParser;

    impl FragmentParser for EchoParser {
        type Fragment = String;

        fn provider(&self) -> &'static str {
            "echo"
        }

        fn parse_data(&self, data: &str) -> Result<Option<String>> {
            if data == "skip" {
                return Ok(None);
            }
            Ok(Some(data.to_string()))
        }
    }

    fn byte_stream(
        chunks: Vec<&'static str>,
    ) -> impl Stream<Item = reqwest::Result<Bytes>> + Send + 'static {
        stream::iter(chunks.into_iter().map(|c| Ok(Bytes::from(c))))
    }

    #[tokio::test]
    async fn test_splits_data_lines() {
        let stream = SseStream::new(byte_stream(vec!["data: a\n\ndata: b\n\n"]), EchoParser);
        let collected: Vec<_> = stream.map(|r| r.unwrap()).collect().await;
        assert_eq!(collected, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_reassembles_split_chunks() {
        let stream = SseStream::new(byte_stream(vec!["data: hel", "lo\n\n"]), EchoParser);
        let collected: Vec<_> = stream.map(|r| r.unwrap()).collect().await;
        assert_eq!(collected, vec!["hello"]);
    }

    #[tokio::test]
    async fn test_done_marker_ends_stream() {
        let stream = SseStream::new(
            byte_stream(vec!["data: a\n\ndata: [DONE]\n\ndata: after\n\n"]),
            EchoParser,
        );
        let collected: Vec<_> = stream.map(|r| r.unwrap()).collect().await;
        assert_eq!(collected, vec!["a"]);
    }

    #[tokio::test]
    async fn test_skips_event_names_and_keepalives() {
        let stream = SseStream::new(
            byte_stream(vec!["event: ping\n\n: comment\n\ndata: skip\n\ndata: x\n\n"]),
            EchoParser,
        );
        let collected: Vec<_> = stream.map(|r| r.unwrap()).collect().await;
        assert_eq!(collected, vec!["x"]);
    }

    #[tokio::test]
    async fn test_stream_ends_with_body() {
        // No [DONE] marker: the stream ends when the body does, and a
        // trailing partial line is not a complete event.
        let stream = SseStream::new(byte_stream(vec!["data: a\n\ndata: partial"]), EchoParser);
        let collected: Vec<_> = stream.map(|r| r.unwrap()).collect().await;
        assert_eq!(collected, vec!["a"]);
    }

    struct FailingParser;

    impl FragmentParser for FailingParser {
        type Fragment = String;

        fn provider(&self) -> &'static str {
            "failing"
        }

        fn parse_data(&self, _data: &str) -> Result<Option<String>> {
            Err(ChainError::parse("failing", "bad payload"))
        }
    }

    #[tokio::test]
    async fn test_parser_error_surfaces() {
        let mut stream = SseStream::new(byte_stream(vec!["data: x\n\n"]), FailingParser);
        let first = stream.next().await.unwrap();
        assert!(matches!(first, Err(ChainError::Parse { .. })));
    }
}
