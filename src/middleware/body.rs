//! Response Body Capture
//!
//! Reads a downstream response body frame by frame, stopping as soon as it
//! grows past the cacheable limit. An oversized body is handed back intact,
//! with the already-read prefix replayed before the unread remainder.

use std::future::poll_fn;
use std::pin::Pin;
use std::task::{Context, Poll};

use axum::body::Body;
use bytes::{Bytes, BytesMut};
use http_body::{Body as HttpBody, Frame, SizeHint};

use crate::error::{CacheError, Result};

/// Outcome of [`capture_body`].
pub(crate) enum CapturedBody {
    /// The whole body, within the limit
    Complete(Bytes),
    /// A body over the limit, still streamable from its first byte
    Oversized(Body),
}

/// Buffers `body` if it fits in `limit` bytes.
///
/// Bodies whose size hint already exceeds the limit are returned untouched.
/// Trailers are not kept.
pub(crate) async fn capture_body(mut body: Body, limit: usize) -> Result<CapturedBody> {
    if body.size_hint().lower() > limit as u64 {
        return Ok(CapturedBody::Oversized(body));
    }

    let mut buffered = BytesMut::new();
    while let Some(frame) = poll_fn(|cx| Pin::new(&mut body).poll_frame(cx)).await {
        let frame = frame
            .map_err(|e| CacheError::Internal(format!("Failed to read response body: {}", e)))?;
        let Ok(data) = frame.into_data() else {
            continue;
        };
        buffered.extend_from_slice(&data);

        if buffered.len() > limit {
            let replay = PrefixedBody {
                prefix: Some(buffered.freeze()),
                rest: body,
            };
            return Ok(CapturedBody::Oversized(Body::new(replay)));
        }
    }

    Ok(CapturedBody::Complete(buffered.freeze()))
}

// == Prefixed Body ==
/// Yields `prefix` as one data frame, then every frame of `rest`.
struct PrefixedBody {
    prefix: Option<Bytes>,
    rest: Body,
}

impl HttpBody for PrefixedBody {
    type Data = Bytes;
    type Error = axum::Error;

    fn poll_frame(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
    ) -> Poll<Option<std::result::Result<Frame<Bytes>, Self::Error>>> {
        if let Some(prefix) = self.prefix.take() {
            return Poll::Ready(Some(Ok(Frame::data(prefix))));
        }
        Pin::new(&mut self.rest).poll_frame(cx)
    }

    fn is_end_stream(&self) -> bool {
        self.prefix.is_none() && self.rest.is_end_stream()
    }

    fn size_hint(&self) -> SizeHint {
        let prefix = self.prefix.as_ref().map_or(0, |p| p.len() as u64);
        let rest = self.rest.size_hint();

        let mut hint = SizeHint::new();
        hint.set_lower(rest.lower().saturating_add(prefix));
        if let Some(upper) = rest.upper() {
            hint.set_upper(upper.saturating_add(prefix));
        }
        hint
    }
}
