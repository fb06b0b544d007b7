use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

pub const DEFAULT_REDIRECT: &str = "/app/new-report";

/// Carries the post-login redirect path through the provider round trip.
/// The payload is HMAC-signed so a forged state is rejected on callback.
pub struct OAuthStateSigner {
    secret: Vec<u8>,
}

impl OAuthStateSigner {
    pub fn new(secret: &str) -> Self {
        Self { secret: secret.as_bytes().to_vec() }
    }

    pub fn encode(&self, redirect: &str) -> String {
        let payload = format!("redirect={}", redirect);
        let signature = self.sign(payload.as_bytes());
        format!("{}.{}", URL_SAFE_NO_PAD.encode(payload), URL_SAFE_NO_PAD.encode(signature))
    }

    /// Returns the redirect path, or `None` when the state is malformed or forged.
    pub fn decode(&self, state: &str) -> Option<String> {
        let (payload_b64, signature_b64) = state.split_once('.')?;
        let payload = URL_SAFE_NO_PAD.decode(payload_b64).ok()?;
        let signature = URL_SAFE_NO_PAD.decode(signature_b64).ok()?;

        let mut mac = HmacSha256::new_from_slice(&self.secret).ok()?;
        mac.update(&payload);
        mac.verify_slice(&signature).ok()?;

        let payload = String::from_utf8(payload).ok()?;
        let redirect = payload.strip_prefix("redirect=")?;
        Some(sanitize_redirect(Some(redirect)))
    }

    fn sign(&self, payload: &[u8]) -> Vec<u8> {
        let mut mac = HmacSha256::new_from_slice(&self.secret).expect("HMAC accepts any key length");
        mac.update(payload);
        mac.finalize().into_bytes().to_vec()
    }
}

/// Only same-site absolute paths are accepted as redirect targets.
pub fn sanitize_redirect(redirect: Option<&str>) -> String {
    match redirect {
        Some(path) if path.starts_with('/') && !path.starts_with("//") && !path.contains('\\') => path.to_string(),
        _ => DEFAULT_REDIRECT.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_round_trip() {
        let signer = OAuthStateSigner::new("secret");
        let state = signer.encode("/app/history");
        assert_eq!(signer.decode(&state).as_deref(), Some("/app/history"));
    }

    #[test]
    fn test_tampered_state_is_rejected() {
        let signer = OAuthStateSigner::new("secret");
        let state = signer.encode("/app/history");
        let (_, sig) = state.split_once('.').unwrap();
        let forged = format!("{}.{}", URL_SAFE_NO_PAD.encode("redirect=/evil"), sig);

        assert!(signer.decode(&forged).is_none());
        assert!(OAuthStateSigner::new("other").decode(&state).is_none());
        assert!(signer.decode("garbage").is_none());
    }

    #[test]
    fn test_redirect_sanitizing() {
        assert_eq!(sanitize_redirect(Some("/app/settings")), "/app/settings");
        assert_eq!(sanitize_redirect(Some("//evil.example")), DEFAULT_REDIRECT);
        assert_eq!(sanitize_redirect(Some("https://evil.example")), DEFAULT_REDIRECT);
        assert_eq!(sanitize_redirect(None), DEFAULT_REDIRECT);
    }
}
