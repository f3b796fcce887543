//! Request payloads for [`invoke`](crate::PaxfulApi::invoke).

use tokio::io::{AsyncRead, AsyncReadExt};

use crate::Result;

/// Payload of an API operation, resolved into a concrete body at the
/// facade boundary before the request reaches the dispatcher.
///
/// Key/value mappings are form-urlencoded; raw bytes and streams are sent
/// opaquely as `multipart/form-data`. Streams are buffered up front so the
/// dispatcher can replay the body when it retries after a token refresh.
pub enum Payload {
    /// Key/value mapping, encoded as `application/x-www-form-urlencoded`.
    Form(Vec<(String, String)>),
    /// Raw bytes, sent as `multipart/form-data`.
    Bytes(Vec<u8>),
    /// A byte stream, buffered and sent as `multipart/form-data`.
    Stream(Box<dyn AsyncRead + Send + Unpin>),
    /// No payload.
    Empty,
}

/// A payload encoded into a body and its content type.
pub(crate) struct EncodedBody {
    pub(crate) content_type: &'static str,
    pub(crate) body: Vec<u8>,
}

impl Payload {
    /// Create a form payload from key/value pairs.
    pub fn form<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self::Form(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Create an empty payload.
    pub fn empty() -> Self {
        Self::Empty
    }

    /// Wrap a byte stream.
    pub fn stream(reader: impl AsyncRead + Send + Unpin + 'static) -> Self {
        Self::Stream(Box::new(reader))
    }

    pub(crate) async fn encode(self) -> Result<EncodedBody> {
        match self {
            Payload::Form(pairs) => {
                let mut serializer = url::form_urlencoded::Serializer::new(String::new());
                for (key, value) in &pairs {
                    serializer.append_pair(key, value);
                }
                Ok(EncodedBody {
                    content_type: "application/x-www-form-urlencoded",
                    body: serializer.finish().into_bytes(),
                })
            }
            Payload::Bytes(bytes) => Ok(EncodedBody {
                content_type: "multipart/form-data",
                body: bytes,
            }),
            Payload::Stream(mut reader) => {
                let mut body = Vec::new();
                reader.read_to_end(&mut body).await?;
                Ok(EncodedBody {
                    content_type: "multipart/form-data",
                    body,
                })
            }
            Payload::Empty => Ok(EncodedBody {
                content_type: "application/x-www-form-urlencoded",
                body: Vec::new(),
            }),
        }
    }
}

impl Default for Payload {
    fn default() -> Self {
        Self::Empty
    }
}

impl std::fmt::Debug for Payload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Payload::Form(pairs) => f.debug_tuple("Form").field(pairs).finish(),
            Payload::Bytes(bytes) => f.debug_tuple("Bytes").field(&bytes.len()).finish(),
            Payload::Stream(_) => f.write_str("Stream(..)"),
            Payload::Empty => f.write_str("Empty"),
        }
    }
}

impl From<Vec<(String, String)>> for Payload {
    fn from(pairs: Vec<(String, String)>) -> Self {
        Self::Form(pairs)
    }
}

impl From<Vec<u8>> for Payload {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Bytes(bytes)
    }
}
