//! JSON encoding of request bodies and decoding of response bodies.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::RequesterError;
use crate::http::HttpResponse;

/// Serialize `value` to its JSON bytes.
pub(crate) fn encode<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, RequesterError> {
    serde_json::to_vec(value).map_err(RequesterError::EncodeBody)
}

/// Decode `body` into `destination`. An empty body leaves it untouched.
///
/// `destination` is only written once the whole body has decoded, so a
/// failure leaves it as it was. The returned error owns the response and the
/// body so the caller can still inspect the payload.
pub(crate) fn decode_into<T: DeserializeOwned>(
    destination: &mut T,
    response: &HttpResponse,
    body: &[u8],
) -> Result<(), RequesterError> {
    if body.is_empty() {
        return Ok(());
    }
    match serde_json::from_slice(body) {
        Ok(value) => {
            *destination = value;
            Ok(())
        }
        Err(source) => Err(RequesterError::Decode {
            response: Box::new(response.clone()),
            body: body.to_vec(),
            source,
        }),
    }
}
