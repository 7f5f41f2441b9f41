use serde::Serialize;
use std::hash::Hasher;
use std::io;
use twox_hash::XxHash64;

/// Seed of every stored fingerprint. Changing it changes every fingerprint.
pub const FINGERPRINT_SEED: u64 = 0;

/// `io::Write` sink that feeds bytes straight into an XxHash64 state.
struct HashingWriter(XxHash64);

impl io::Write for HashingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.write(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Fingerprint of a serializable value as an `i64`.
///
/// The value is CBOR-encoded directly into an XxHash64 state seeded with
/// [`FINGERPRINT_SEED`], so a view is never buffered whole just to be hashed.
/// Identical views fingerprint identically across runs and hosts.
pub fn hash_as_i64<T: Serialize>(data: &T) -> Result<i64, String> {
    let mut sink = HashingWriter(XxHash64::with_seed(FINGERPRINT_SEED));
    ciborium::ser::into_writer(data, &mut sink)
        .map_err(|e| format!("Failed to encode value for fingerprinting: {e}"))?;
    Ok(sink.0.finish() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_hash_is_stable_and_content_sensitive() {
        let mut a = BTreeMap::new();
        a.insert("ICU", 3);
        a.insert("ER", 5);
        let mut b = BTreeMap::new();
        b.insert("ER", 5);
        b.insert("ICU", 3);

        assert_eq!(hash_as_i64(&a).unwrap(), hash_as_i64(&b).unwrap());

        b.insert("OR", 1);
        assert_ne!(hash_as_i64(&a).unwrap(), hash_as_i64(&b).unwrap());
    }

    #[test]
    fn test_streamed_hash_matches_hash_of_encoded_bytes() {
        let value = vec![("REC-20260130-101500", 82.5), ("REC-20260130-111500", 91.0)];

        let mut encoded = Vec::new();
        ciborium::ser::into_writer(&value, &mut encoded).unwrap();

        assert_eq!(
            hash_as_i64(&value).unwrap(),
            XxHash64::oneshot(FINGERPRINT_SEED, &encoded) as i64
        );
    }
}
