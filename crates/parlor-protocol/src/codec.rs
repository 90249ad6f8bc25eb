//! Byte-level encoding behind the [`Codec`] trait.
//!
//! The connection handler is generic over the codec, so the wire format can
//! change (e.g. to a binary encoding) without touching dispatch logic.

use serde::{Serialize, de::DeserializeOwned};

use crate::ProtocolError;

/// Converts between protocol types and message-frame bytes.
pub trait Codec: Send + Sync + 'static {
    /// Serializes a value into one frame.
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError>;

    /// Deserializes one frame back into a value.
    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError>;
}

/// JSON codec via `serde_json`. Human-readable, easy to eyeball in logs.
#[cfg(feature = "json")]
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

#[cfg(feature = "json")]
impl Codec for JsonCodec {
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError> {
        serde_json::to_vec(value).map_err(ProtocolError::Encode)
    }

    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError> {
        serde_json::from_slice(data).map_err(ProtocolError::Decode)
    }
}

#[cfg(all(test, feature = "json"))]
mod tests {
    use super::*;
    use crate::{Request, Response};

    #[test]
    fn test_json_codec_round_trips_requests() {
        let codec = JsonCodec;
        let req = Request::PlayerHeartbeat { name: "alice".into() };
        let bytes = codec.encode(&req).unwrap();
        let decoded: Request = codec.decode(&bytes).unwrap();
        assert_eq!(req, decoded);
    }

    #[test]
    fn test_json_codec_round_trips_responses() {
        let codec = JsonCodec;
        let resp = Response::message("ok then");
        let bytes = codec.encode(&resp).unwrap();
        let decoded: Response = codec.decode(&bytes).unwrap();
        assert_eq!(resp, decoded);
    }

    #[test]
    fn test_decode_garbage_is_an_error() {
        let codec = JsonCodec;
        let result: Result<Request, _> = codec.decode(b"not json at all");
        assert!(result.is_err());
    }
}
