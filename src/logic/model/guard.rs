//! Model Guard - integrity check before a model artifact is loaded
//!
//! Expected digest comes from config, or from a `<model>.sha256` file
//! in `sha256sum` format (`<hex>  <filename>`).

use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

use super::inference::InferenceError;

/// SHA-256 of a file, lowercase hex
pub fn sha256_file(path: &Path) -> Result<String, InferenceError> {
    let bytes = std::fs::read(path)
        .map_err(|e| InferenceError::Load(format!("Failed to read {}: {}", path.display(), e)))?;
    Ok(sha256_hex(&bytes))
}

pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// Checksum file next to the model (`model.onnx` → `model.onnx.sha256`)
pub fn checksum_path(model_path: &Path) -> PathBuf {
    let mut name = model_path.as_os_str().to_os_string();
    name.push(".sha256");
    PathBuf::from(name)
}

/// Expected digest: explicit value first, then the checksum file
pub fn expected_checksum(model_path: &Path, explicit: Option<&str>) -> Option<String> {
    if let Some(expected) = explicit {
        return Some(expected.trim().to_lowercase());
    }

    let path = checksum_path(model_path);
    let content = std::fs::read_to_string(&path).ok()?;
    content.split_whitespace().next().map(str::to_lowercase)
}

/// Verify the model file against the expected digest
pub fn verify_checksum(model_path: &Path, expected: &str) -> Result<(), InferenceError> {
    let actual = sha256_file(model_path)?;
    let expected = expected.trim().to_lowercase();

    if actual != expected {
        log::error!("Model checksum mismatch for {}", model_path.display());
        return Err(InferenceError::Checksum { expected, actual });
    }

    log::info!("Model checksum verified: {}", &actual[..12]);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const ABC_SHA256: &str = "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad";

    #[test]
    fn test_sha256_hex() {
        assert_eq!(sha256_hex(b"abc"), ABC_SHA256);
    }

    #[test]
    fn test_verify_checksum() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"abc").unwrap();

        assert!(verify_checksum(file.path(), ABC_SHA256).is_ok());
        assert!(verify_checksum(file.path(), &ABC_SHA256.to_uppercase()).is_ok());

        let err = verify_checksum(file.path(), "00").unwrap_err();
        assert!(matches!(err, InferenceError::Checksum { .. }));
    }

    #[test]
    fn test_expected_checksum_sources() {
        let dir = tempfile::tempdir().unwrap();
        let model = dir.path().join("model.onnx");

        assert_eq!(expected_checksum(&model, None), None);
        assert_eq!(expected_checksum(&model, Some(" ABC ")), Some("abc".to_string()));

        std::fs::write(checksum_path(&model), format!("{}  model.onnx\n", ABC_SHA256)).unwrap();
        assert_eq!(expected_checksum(&model, None), Some(ABC_SHA256.to_string()));
    }

    #[test]
    fn test_checksum_path() {
        let path = checksum_path(Path::new("/models/fraud.onnx"));
        assert_eq!(path, PathBuf::from("/models/fraud.onnx.sha256"));
    }
}
