//! HMAC (RFC 2104) over any [`Digest`].

use crate::engine::{Digest, StreamState};
use crate::error::{HashError, Result};
use rand::rngs::OsRng;
use rand::RngCore;

const INNER_PAD: u8 = 0x36;
const OUTER_PAD: u8 = 0x5C;
const FALLBACK_PAD_LEN: usize = 64;

/// Keyed message authentication code built from an inner digest.
///
/// The key and the primitive can be replaced until the first update; after
/// that they stay fixed until the computation is finalized or reset.
#[derive(Debug, Clone)]
pub struct Hmac {
    primitive: Box<dyn Digest>,
    key: Vec<u8>,
    inner: Box<dyn Digest>,
    state: StreamState,
}

impl Hmac {
    /// HMAC over `primitive`. Without a key, a random key of the primitive's
    /// output size is generated.
    pub fn new(primitive: Box<dyn Digest>, key: Option<&[u8]>) -> Self {
        let primitive = primitive.fresh();
        let key = match key {
            Some(key) => key.to_vec(),
            None => random_key(primitive.output_size()),
        };
        Self {
            inner: primitive.fresh(),
            primitive,
            key,
            state: StreamState::Ready,
        }
    }

    /// The key as supplied (before any hashing or padding)
    pub fn key(&self) -> &[u8] {
        &self.key
    }

    /// Replace the key
    pub fn set_key(&mut self, key: &[u8]) -> Result<()> {
        self.ensure_idle("key")?;
        self.key = key.to_vec();
        Ok(())
    }

    /// The inner digest algorithm
    pub fn primitive(&self) -> &dyn Digest {
        self.primitive.as_ref()
    }

    /// Replace the inner digest algorithm
    pub fn set_primitive(&mut self, primitive: Box<dyn Digest>) -> Result<()> {
        self.ensure_idle("primitive")?;
        self.primitive = primitive.fresh();
        self.inner = self.primitive.fresh();
        Ok(())
    }

    fn ensure_idle(&self, what: &str) -> Result<()> {
        if self.state.is_streaming() {
            tracing::warn!(algorithm = %self.name(), what, "HMAC change rejected while hashing");
            return Err(HashError::state_violation(format!(
                "{}: cannot change the {what} after hashing has started",
                self.name()
            )));
        }
        Ok(())
    }

    fn pad_len(&self) -> usize {
        match self.primitive.block_size() {
            n if n > 1 => n,
            _ => FALLBACK_PAD_LEN,
        }
    }

    /// Key hashed if longer than the pad, then zero-filled to the pad length
    fn padded_key(&self) -> Result<Vec<u8>> {
        let len = self.pad_len();
        let mut key = if self.key.len() > len {
            self.primitive.fresh().compute(&self.key)?
        } else {
            self.key.clone()
        };
        key.resize(len.max(key.len()), 0);
        Ok(key)
    }

    fn start_inner(&mut self) -> Result<()> {
        let pad: Vec<u8> = self.padded_key()?.iter().map(|b| b ^ INNER_PAD).collect();
        self.inner.reset();
        self.inner.update(&pad)
    }
}

impl Digest for Hmac {
    fn name(&self) -> String {
        format!("HMAC-{}", self.primitive.name())
    }

    fn block_size(&self) -> usize {
        self.pad_len()
    }

    fn output_size(&self) -> usize {
        self.primitive.output_size()
    }

    fn update(&mut self, data: &[u8]) -> Result<()> {
        if !self.state.is_streaming() {
            self.state.begin(|| format!("HMAC-{}", self.primitive.name()))?;
            self.start_inner()?;
        }
        self.inner.update(data)
    }

    fn finalize(&mut self) -> Result<Vec<u8>> {
        if !self.state.is_streaming() {
            self.state.begin(|| format!("HMAC-{}", self.primitive.name()))?;
            self.start_inner()?;
        }
        self.state.finish(|| format!("HMAC-{}", self.primitive.name()))?;
        let inner = self.inner.finalize()?;

        let pad: Vec<u8> = self.padded_key()?.iter().map(|b| b ^ OUTER_PAD).collect();
        let mut outer = self.primitive.fresh();
        outer.update(&pad)?;
        outer.update(&inner)?;
        outer.finalize()
    }

    fn reset(&mut self) {
        self.inner.reset();
        self.state = StreamState::Ready;
    }

    fn box_clone(&self) -> Box<dyn Digest> {
        Box::new(self.clone())
    }
}

/// `len` bytes from the operating system's CSPRNG
pub fn random_key(len: usize) -> Vec<u8> {
    let mut key = vec![0u8; len];
    OsRng.fill_bytes(&mut key);
    key
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checksum::{crc, ClassicKind, classic};
    use crate::params::{CrcStandard, Standard};
    use crate::primitives::{sha224, sha384, Md5, Sha1, Sha256, Sha512};

    const LARGE_KEY_MESSAGE: &[u8] = b"Test Using Larger Than Block-Size Key - Hash Key First";

    fn mac(primitive: Box<dyn Digest>, key: &[u8], message: &[u8]) -> String {
        let mut hmac = Hmac::new(primitive, Some(key));
        hex::encode_upper(hmac.compute(message).unwrap())
    }

    #[test]
    fn test_rfc2104_md5() {
        let md5 = || Box::new(Md5::default()) as Box<dyn Digest>;
        assert_eq!(mac(md5(), &[0x0B; 16], b"Hi There"), "9294727A3638BB1C13F48EF8158BFC9D");
        assert_eq!(
            mac(md5(), b"Jefe", b"what do ya want for nothing?"),
            "750C783E6AB0B503EAA86E310A5DB738"
        );
        assert_eq!(mac(md5(), &[0xAA; 16], &[0xDD; 50]), "56BE34521D144C88DBB8C733F0E8B3F6");
    }

    #[test]
    fn test_fips198_sha1() {
        let key: Vec<u8> = (0x30..=0x43).collect();
        assert_eq!(
            mac(Box::new(Sha1::default()), &key, b"Sample #2"),
            "0922D3405FAA3D194F82A45830737D5CC6C75D24"
        );
        assert_eq!(
            mac(Box::new(Sha1::default()), &[0xAA; 80], LARGE_KEY_MESSAGE),
            "AA4AE5E15272D00E95705637CE8A3B55ED402112"
        );
    }

    #[test]
    fn test_rfc4231() {
        let key = [0x0B; 20];
        assert_eq!(
            mac(Box::new(sha224()), &key, b"Hi There"),
            "896FB1128ABBDF196832107CD49DF33F47B4B1169912BA4F53684B22"
        );
        assert_eq!(
            mac(Box::new(Sha256::default()), &key, b"Hi There"),
            "B0344C61D8DB38535CA8AFCEAF0BF12B881DC200C9833DA726E9376C2E32CFF7"
        );
        assert_eq!(
            mac(Box::new(sha384()), &key, b"Hi There"),
            "AFD03944D84895626B0825F4AB46907F15F9DADBE4101EC682AA034C7CEBC59CFAEA9EA9076EDE7F4AF152E8B2FA9CB6"
        );
        assert_eq!(
            mac(Box::new(Sha512::default()), &key, b"Hi There"),
            "87AA7CDEA5EF619D4FF0B4241A1D6CB02379F4E2CE4EC2787AD0B30545E17CDEDAA833B7D6B8A702038B274EAEA3F4E4BE9D914EEB61F1702E696C203A126854"
        );
        assert_eq!(
            mac(Box::new(Sha256::default()), b"Jefe", b"what do ya want for nothing?"),
            "5BDCC146BF60754E6A042426089575C75A003F089D2739839DEC58B964EC3843"
        );
    }

    #[test]
    fn test_rfc4231_large_key() {
        let key = [0xAA; 131];
        assert_eq!(
            mac(Box::new(Sha256::default()), &key, LARGE_KEY_MESSAGE),
            "60E431591EE0B67F0D8A26AACBF5B77F8E0BC6213728C5140546040F0EE37F54"
        );
        assert_eq!(
            mac(Box::new(Sha512::default()), &key, LARGE_KEY_MESSAGE),
            "80B24263C7C1A3EBB71493C1DD7BE8B49B46D1F41B4AEEC1121B013783F8F3526B56D037E05F2598BD0FD2215D6A1E5295E64F73F63F0AEC8B915A985D786598"
        );
    }

    #[test]
    fn test_random_key_length() {
        let hmac = Hmac::new(Box::new(Sha1::default()), None);
        assert_eq!(hmac.key().len(), 20);
        let hmac = Hmac::new(Box::new(Md5::default()), None);
        assert_eq!(hmac.key().len(), 16);
        assert_ne!(random_key(32), random_key(32));
    }

    #[test]
    fn test_change_key_before_update() {
        let mut hmac = Hmac::new(Box::new(Md5::default()), Some(&b"old key"[..]));
        hmac.set_key(b"Jefe").unwrap();
        let out = hmac.compute(b"what do ya want for nothing?").unwrap();
        assert_eq!(hex::encode_upper(out), "750C783E6AB0B503EAA86E310A5DB738");
    }

    #[test]
    fn test_change_after_update_rejected() {
        let mut hmac = Hmac::new(Box::new(Md5::default()), Some(&b"key"[..]));
        hmac.update(b"data").unwrap();
        assert!(matches!(hmac.set_key(b"new key!"), Err(HashError::StateViolation(_))));
        assert!(matches!(
            hmac.set_primitive(Box::new(Sha1::default())),
            Err(HashError::StateViolation(_))
        ));
        hmac.finalize().unwrap();
        hmac.set_key(b"new key!").unwrap();
        hmac.set_primitive(Box::new(Sha1::default())).unwrap();
        assert_eq!(hmac.name(), "HMAC-SHA-1");
    }

    #[test]
    fn test_chunked_matches_one_shot() {
        let mut hmac = Hmac::new(Box::new(Sha256::default()), Some(&b"Jefe"[..]));
        for chunk in b"what do ya want for nothing?".chunks(5) {
            hmac.update(chunk).unwrap();
        }
        assert_eq!(
            hex::encode_upper(hmac.finalize().unwrap()),
            "5BDCC146BF60754E6A042426089575C75A003F089D2739839DEC58B964EC3843"
        );
    }

    #[test]
    fn test_byte_oriented_primitive_uses_fallback_pad() {
        let hmac = Hmac::new(Box::new(crc(CrcStandard::Crc32.parameters())), Some(&b"k"[..]));
        assert_eq!(hmac.block_size(), 64);
        let mut hmac = Hmac::new(Box::new(classic(ClassicKind::Adler32)), Some(&b"k"[..]));
        assert_eq!(hmac.compute(b"abc").unwrap().len(), 4);
    }
}
