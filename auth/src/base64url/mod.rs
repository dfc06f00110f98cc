pub mod codec;
pub mod errors;

pub use codec::decode;
pub use codec::decode_into;
pub use codec::decoded_length;
pub use codec::encode;
pub use codec::encode_into;
pub use codec::encoded_length;
pub use errors::Base64UrlError;
