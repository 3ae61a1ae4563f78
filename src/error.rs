//! Error types for the rotation engine.

use thiserror::Error;

/// All possible errors raised by `rot500k` operations.
///
/// Verified decoders (KT/KP/KV) do not use this type: per spec §3/§7 they
/// collapse every verification failure into `VerifiedResult { ok: false, .. }`
/// rather than surfacing a cause. This enum only covers the one fatal
/// condition that is not a verification failure: a structural mismatch
/// discovered while *encoding* a KT-tagged token stream.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RotError {
	/// The ciphertext produced by the family transform tokenized into a
	/// different number of tokens than the plaintext, so per-token checks
	/// cannot be attached 1:1.
	#[error("token/check count mismatch: {plain_tokens} plaintext tokens vs {cipher_tokens} cipher tokens")]
	TokenCountMismatch {
		plain_tokens: usize,
		cipher_tokens: usize,
	},
}

/// Result type alias for `rot500k` operations.
pub type Result<T> = std::result::Result<T, RotError>;
