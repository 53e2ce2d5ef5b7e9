//! Transport layer: request signing and wire-format details (serialization/deserialization).

mod signature;
mod template_sms;

pub use signature::{CompactTimestamp, SignedCredential, sign};
pub use template_sms::{decode_template_sms_json_response, encode_template_sms_json};
