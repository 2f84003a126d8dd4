//! Stream accumulation.

use futures::StreamExt;

use crate::error::Result;
use crate::providers::FragmentStream;

/// Concatenate the selected field of every fragment, in delivery order.
///
/// `select` names which field of the fragment to read — the only thing that
/// differs between the reasoning stage (thought field) and the response
/// backends (content/text field). Fragments where the field is absent
/// contribute nothing. The result is deterministic for a fixed fragment
/// sequence; no transformation is applied beyond concatenation. Stream
/// errors propagate to the caller.
pub async fn accumulate<T, F>(mut fragments: FragmentStream<T>, select: F) -> Result<String>
where
    F: Fn(&T) -> Option<&str>,
{
    let mut text = String::new();
    while let Some(fragment) = fragments.next().await {
        let fragment = fragment?;
        if let Some(piece) = select(&fragment) {
            text.push_str(piece);
        }
    }
    Ok(text)
}
