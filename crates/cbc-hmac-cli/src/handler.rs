//! Request handling: read one JSON request, run it, write one JSON response.

use std::io::{Read, Write};

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use cbc_hmac::Algorithm;
use common::protocol::{
    AlgorithmInfo, AlgorithmsResponse, DecryptRequest, DecryptResponse, EncryptRequest,
    EncryptResponse, ErrorResponse, OpenRequest, OpenResponse, Request, Response,
};
use common::ServiceError;
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::Config;

/// Process a single request from `input` and write the outcome to `output`.
///
/// On failure an [`ErrorResponse`] is written instead of a [`Response`].
/// Returns the process exit code: `0` on success, otherwise
/// [`ServiceError::exit_code`].
pub fn run<R: Read, W: Write>(cfg: &Config, input: R, mut output: W) -> i32 {
    let outcome = read_request(input, cfg.max_input_bytes).and_then(|req| handle(cfg, req));

    let (written, code) = match outcome {
        Ok(response) => (write_json(&mut output, &response), 0),
        Err(err) => {
            warn!(code = err.code(), error = %err, "request failed");
            let body = ErrorResponse::new(err.code(), err.to_string());
            (write_json(&mut output, &body), err.exit_code())
        }
    };

    match written {
        Ok(()) => code,
        Err(err) => {
            warn!(error = %err, "failed to write response");
            err.exit_code()
        }
    }
}

/// Read and parse a request, refusing inputs larger than `limit` bytes.
pub fn read_request<R: Read>(input: R, limit: u64) -> Result<Request, ServiceError> {
    let mut buf = Vec::new();
    input
        .take(limit.saturating_add(1))
        .read_to_end(&mut buf)
        .map_err(|e| ServiceError::Internal(format!("failed to read request: {e}")))?;

    if buf.len() as u64 > limit {
        return Err(ServiceError::BadRequest(format!(
            "request exceeds {limit} bytes"
        )));
    }

    serde_json::from_slice(&buf)
        .map_err(|e| ServiceError::BadRequest(format!("invalid request: {e}")))
}

/// Execute one request.
pub fn handle(cfg: &Config, request: Request) -> Result<Response, ServiceError> {
    match request {
        Request::Encrypt(req) => encrypt(cfg, req).map(Response::Encrypt),
        Request::Decrypt(req) => decrypt(cfg, req).map(Response::Decrypt),
        Request::Open(req) => open(cfg, req).map(Response::Open),
        Request::Algorithms => Ok(Response::Algorithms(algorithms())),
    }
}

fn encrypt(cfg: &Config, req: EncryptRequest) -> Result<EncryptResponse, ServiceError> {
    let alg = resolve(cfg, req.alg.as_deref())?;
    let key = decode("key", &req.key)?;
    let iv = decode("iv", &req.iv)?;
    let aad = decode("aad", &req.aad)?;
    let plaintext = decode("plaintext", &req.plaintext)?;

    let sealed = cbc_hmac::encrypt(&key, &iv, &aad, &plaintext, alg.name())?;
    debug!(op = "encrypt", alg = %alg, "request complete");

    Ok(EncryptResponse {
        alg: alg.name().into(),
        ciphertext: URL_SAFE_NO_PAD.encode(&sealed.ciphertext),
        tag: URL_SAFE_NO_PAD.encode(&sealed.tag),
    })
}

fn decrypt(cfg: &Config, req: DecryptRequest) -> Result<DecryptResponse, ServiceError> {
    let alg = resolve(cfg, req.alg.as_deref())?;
    let key = decode("key", &req.key)?;
    let iv = decode("iv", &req.iv)?;
    let aad = decode("aad", &req.aad)?;
    let ciphertext = decode("ciphertext", &req.ciphertext)?;

    let out = cbc_hmac::decrypt(&key, &iv, &aad, &ciphertext, alg.name())?;
    debug!(op = "decrypt", alg = %alg, "request complete");

    Ok(DecryptResponse {
        alg: alg.name().into(),
        plaintext: URL_SAFE_NO_PAD.encode(&out.plaintext),
        tag: URL_SAFE_NO_PAD.encode(&out.tag),
    })
}

fn open(cfg: &Config, req: OpenRequest) -> Result<OpenResponse, ServiceError> {
    let alg = resolve(cfg, req.alg.as_deref())?;
    let key = decode("key", &req.key)?;
    let iv = decode("iv", &req.iv)?;
    let aad = decode("aad", &req.aad)?;
    let ciphertext = decode("ciphertext", &req.ciphertext)?;
    let tag = decode("tag", &req.tag)?;

    let plaintext = cbc_hmac::open(&key, &iv, &aad, &ciphertext, &tag, alg.name())?;
    debug!(op = "open", alg = %alg, "request complete");

    Ok(OpenResponse {
        alg: alg.name().into(),
        plaintext: URL_SAFE_NO_PAD.encode(&plaintext),
    })
}

fn algorithms() -> AlgorithmsResponse {
    AlgorithmsResponse {
        algorithms: Algorithm::ALL
            .into_iter()
            .map(|alg| {
                let p = alg.parameters();
                AlgorithmInfo {
                    name: alg.name().into(),
                    key_bits: p.total_key_bits,
                    tag_bytes: p.tag_len,
                }
            })
            .collect(),
    }
}

fn resolve(cfg: &Config, alg: Option<&str>) -> Result<Algorithm, ServiceError> {
    let name = alg.unwrap_or(&cfg.default_algorithm);
    Ok(Algorithm::resolve(name)?)
}

fn decode(field: &str, value: &str) -> Result<Vec<u8>, ServiceError> {
    URL_SAFE_NO_PAD
        .decode(value)
        .map_err(|_| ServiceError::BadRequest(format!("{field} is not valid base64url")))
}

fn write_json<W: Write, T: Serialize>(output: &mut W, value: &T) -> Result<(), ServiceError> {
    serde_json::to_writer(&mut *output, value)
        .map_err(|e| ServiceError::Internal(format!("failed to encode response: {e}")))?;
    output
        .write_all(b"\n")
        .and_then(|()| output.flush())
        .map_err(|e| ServiceError::Internal(format!("failed to write response: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn b64(bytes: &[u8]) -> String {
        URL_SAFE_NO_PAD.encode(bytes)
    }

    fn run_json(cfg: &Config, request: Value) -> (i32, Value) {
        let input = serde_json::to_vec(&request).unwrap();
        let mut output = Vec::new();
        let code = run(cfg, input.as_slice(), &mut output);
        (code, serde_json::from_slice(&output).unwrap())
    }

    const KEY: [u8; 32] = [0x42; 32];
    const IV: [u8; 16] = [0x07; 16];

    #[test]
    fn encrypt_matches_library_output() {
        let cfg = Config::default();
        let (code, resp) = run_json(
            &cfg,
            json!({
                "op": "encrypt",
                "alg": "a128cbc-hs256",
                "key": b64(&KEY),
                "iv": b64(&IV),
                "aad": b64(b"header"),
                "plaintext": b64(b"hello"),
            }),
        );
        assert_eq!(code, 0);

        let sealed = cbc_hmac::encrypt(&KEY, &IV, b"header", b"hello", "A128CBC-HS256").unwrap();
        assert_eq!(resp["alg"], "A128CBC-HS256");
        assert_eq!(resp["ciphertext"], b64(&sealed.ciphertext));
        assert_eq!(resp["tag"], b64(&sealed.tag));
    }

    #[test]
    fn encrypt_then_open_round_trip() {
        let cfg = Config::default();
        let key = [0x11u8; 64];
        let (_, sealed) = run_json(
            &cfg,
            json!({"op": "encrypt", "key": b64(&key), "iv": b64(&IV), "plaintext": b64(b"data")}),
        );
        assert_eq!(sealed["alg"], "A256CBC-HS512");

        let (code, opened) = run_json(
            &cfg,
            json!({
                "op": "open",
                "key": b64(&key),
                "iv": b64(&IV),
                "ciphertext": sealed["ciphertext"],
                "tag": sealed["tag"],
            }),
        );
        assert_eq!(code, 0);
        assert_eq!(opened["plaintext"], b64(b"data"));
    }

    #[test]
    fn decrypt_returns_recomputed_tag() {
        let cfg = Config::default();
        let sealed = cbc_hmac::encrypt(&KEY, &IV, b"", b"hello", "A128CBC-HS256").unwrap();
        let (code, resp) = run_json(
            &cfg,
            json!({
                "op": "decrypt",
                "alg": "A128CBC-HS256",
                "key": b64(&KEY),
                "iv": b64(&IV),
                "ciphertext": b64(&sealed.ciphertext),
            }),
        );
        assert_eq!(code, 0);
        assert_eq!(resp["plaintext"], b64(b"hello"));
        assert_eq!(resp["tag"], b64(&sealed.tag));
    }

    #[test]
    fn open_with_bad_tag_fails() {
        let cfg = Config::default();
        let sealed = cbc_hmac::encrypt(&KEY, &IV, b"", b"hello", "A128CBC-HS256").unwrap();
        let (code, resp) = run_json(
            &cfg,
            json!({
                "op": "open",
                "alg": "A128CBC-HS256",
                "key": b64(&KEY),
                "iv": b64(&IV),
                "ciphertext": b64(&sealed.ciphertext),
                "tag": b64(&[0u8; 16]),
            }),
        );
        assert_eq!(code, 3);
        assert_eq!(resp["code"], "decryption_failed");
        assert_eq!(resp["message"], "decryption failed");
    }

    #[test]
    fn short_key_reports_bit_lengths() {
        let cfg = Config::default();
        let (code, resp) = run_json(
            &cfg,
            json!({
                "op": "encrypt",
                "alg": "A128CBC-HS256",
                "key": b64(&KEY[..31]),
                "iv": b64(&IV),
                "plaintext": "",
            }),
        );
        assert_eq!(code, 3);
        assert_eq!(resp["code"], "invalid_key_material");
        let message = resp["message"].as_str().unwrap();
        assert!(message.contains("256") && message.contains("248"));
    }

    #[test]
    fn bad_base64_is_bad_request() {
        let cfg = Config::default();
        let (code, resp) = run_json(
            &cfg,
            json!({"op": "encrypt", "key": "!!!", "iv": b64(&IV), "plaintext": ""}),
        );
        assert_eq!(code, 2);
        assert_eq!(resp["code"], "bad_request");
        assert!(resp["message"].as_str().unwrap().contains("key"));
    }

    #[test]
    fn unknown_algorithm_reported() {
        let cfg = Config::default();
        let (code, resp) = run_json(
            &cfg,
            json!({"op": "encrypt", "alg": "A256GCM", "key": "", "iv": "", "plaintext": ""}),
        );
        assert_eq!(code, 3);
        assert_eq!(resp["code"], "unsupported_algorithm");
    }

    #[test]
    fn malformed_json_is_bad_request() {
        let cfg = Config::default();
        let mut output = Vec::new();
        let code = run(&cfg, &b"{not json"[..], &mut output);
        assert_eq!(code, 2);
        let resp: Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(resp["code"], "bad_request");
    }

    #[test]
    fn oversized_request_rejected() {
        let cfg = Config {
            max_input_bytes: 8,
            ..Config::default()
        };
        let err = read_request(&br#"{"op":"algorithms"}"#[..], cfg.max_input_bytes).unwrap_err();
        assert!(matches!(err, ServiceError::BadRequest(_)));
    }

    #[test]
    fn algorithms_lists_every_suite() {
        let cfg = Config::default();
        let (code, resp) = run_json(&cfg, json!({"op": "algorithms"}));
        assert_eq!(code, 0);
        assert_eq!(
            resp["algorithms"],
            json!([
                {"name": "A128CBC-HS256", "key_bits": 256, "tag_bytes": 16},
                {"name": "A192CBC-HS384", "key_bits": 384, "tag_bytes": 24},
                {"name": "A256CBC-HS512", "key_bits": 512, "tag_bytes": 32},
            ])
        );
    }
}
