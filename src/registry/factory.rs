use super::names::{lookup, Algorithm, AnyStandard};
use crate::checksum::{classic, crc, fletcher, fnv, ghash, sum, SumBsd, SumSysV};
use crate::config::{CompositeSettings, Settings};
use crate::engine::Digest;
use crate::mac::Hmac;
use crate::methods::{HashList, HashTree};
use crate::params::Standard;
use crate::primitives::{
    ripemd128, ripemd160, ripemd256, ripemd320, sha0, sha224, sha384, tiger, whirlpool, Md4, Md5,
    Sha1, Sha256, Sha512,
};
use std::fmt;
use std::sync::Arc;

/// Host-supplied constructor consulted for names the registry cannot build
pub type Fallback = Arc<dyn Fn(&str) -> Option<Box<dyn Digest>> + Send + Sync>;

/// Builds digests by name.
///
/// Names resolve through the registry table first. Names it does not know,
/// and known algorithms without a built-in implementation (HAVAL, Snefru),
/// go to the fallback when one is installed.
#[derive(Clone, Default)]
pub struct Factory {
    settings: Settings,
    fallback: Option<Fallback>,
}

impl Factory {
    /// Factory using `settings` for composite defaults
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            fallback: None,
        }
    }

    /// Install a fallback constructor
    pub fn with_fallback<F>(mut self, fallback: F) -> Self
    where
        F: Fn(&str) -> Option<Box<dyn Digest>> + Send + Sync + 'static,
    {
        self.fallback = Some(Arc::new(fallback));
        self
    }

    /// Settings in effect
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// A fresh digest for `name`, or `None` if nothing can build it
    pub fn create(&self, name: &str) -> Option<Box<dyn Digest>> {
        if let Some(algorithm) = lookup(name) {
            if let Some(digest) = self.build(algorithm) {
                return Some(digest);
            }
        }

        let fallback = self.fallback.as_ref()?;
        let digest = fallback(name);
        tracing::debug!(name, found = digest.is_some(), "fallback constructor consulted");
        digest
    }

    /// A fresh digest of the configured default algorithm
    pub fn create_default(&self) -> Option<Box<dyn Digest>> {
        self.create(&self.settings.default_algorithm)
    }

    /// HMAC over the configured algorithm. Without a key a random one is used.
    pub fn hmac(&self, key: Option<&[u8]>) -> Option<Hmac> {
        let primitive = self.create(&self.settings.hmac_algorithm)?;
        Some(Hmac::new(primitive, key))
    }

    fn build(&self, algorithm: Algorithm) -> Option<Box<dyn Digest>> {
        let digest: Box<dyn Digest> = match algorithm {
            Algorithm::Md4 => Box::new(Md4::default()),
            Algorithm::Md5 => Box::new(Md5::default()),
            Algorithm::Sha0 => Box::new(sha0()),
            Algorithm::Sha1 => Box::new(Sha1::default()),
            Algorithm::Sha224 => Box::new(sha224()),
            Algorithm::Sha256 => Box::new(Sha256::default()),
            Algorithm::Sha384 => Box::new(sha384()),
            Algorithm::Sha512 => Box::new(Sha512::default()),
            Algorithm::Ripemd128 => Box::new(ripemd128()),
            Algorithm::Ripemd160 => Box::new(ripemd160()),
            Algorithm::Ripemd256 => Box::new(ripemd256()),
            Algorithm::Ripemd320 => Box::new(ripemd320()),
            Algorithm::Whirlpool => Box::new(whirlpool()),
            Algorithm::SumBsd => Box::new(SumBsd::default()),
            Algorithm::SumSysV => Box::new(SumSysV::default()),
            Algorithm::Classic(kind) => Box::new(classic(kind)),
            Algorithm::Standard(standard) => return build_standard(standard),
            Algorithm::HashList => return self.composite(algorithm, &self.settings.hash_list),
            Algorithm::HashTree => return self.composite(algorithm, &self.settings.hash_tree),
        };
        Some(digest)
    }

    fn composite(&self, algorithm: Algorithm, config: &CompositeSettings) -> Option<Box<dyn Digest>> {
        if lookup(&config.algorithm).is_some_and(Algorithm::is_composite) {
            tracing::warn!(%algorithm, inner = %config.algorithm, "composite cannot nest another composite");
            return None;
        }
        let primitive = self.create(&config.algorithm)?;

        let built = match algorithm {
            Algorithm::HashList => HashList::new(primitive, config.block_size).map(|list| {
                Box::new(list.with_parallel_threshold(self.settings.parallel_threshold))
                    as Box<dyn Digest>
            }),
            _ => HashTree::new(primitive, config.block_size)
                .map(|tree| Box::new(tree) as Box<dyn Digest>),
        };
        match built {
            Ok(digest) => Some(digest),
            Err(e) => {
                tracing::warn!(%algorithm, error = %e, "composite construction failed");
                None
            }
        }
    }
}

fn build_standard(standard: AnyStandard) -> Option<Box<dyn Digest>> {
    let digest: Box<dyn Digest> = match standard {
        AnyStandard::Crc(s) => Box::new(crc(s.parameters())),
        AnyStandard::Fletcher(s) => Box::new(fletcher(s.parameters())),
        AnyStandard::Fnv(s) => Box::new(fnv(s.parameters())),
        AnyStandard::GHash(s) => Box::new(ghash(s.parameters())),
        AnyStandard::Sum(s) => Box::new(sum(s.parameters())),
        AnyStandard::Tiger(s) => tiger(s.parameters()),
        AnyStandard::Haval(_) | AnyStandard::Snefru(_) => return None,
    };
    Some(digest)
}

impl fmt::Debug for Factory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Factory")
            .field("settings", &self.settings)
            .field("fallback", &self.fallback.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hex_of(factory: &Factory, name: &str, input: &[u8]) -> String {
        let mut digest = factory.create(name).unwrap();
        hex::encode_upper(digest.compute(input).unwrap())
    }

    #[test]
    fn test_every_canonical_name_builds_or_needs_fallback() {
        let factory = Factory::default();
        for algorithm in Algorithm::all() {
            let built = factory.create(&algorithm.name());
            let external = matches!(
                algorithm,
                Algorithm::Standard(AnyStandard::Haval(_) | AnyStandard::Snefru(_))
            );
            assert_eq!(built.is_some(), !external, "{algorithm}");
        }
    }

    #[test]
    fn test_names_round_trip() {
        let factory = Factory::default();
        for algorithm in Algorithm::all() {
            if algorithm.is_composite() {
                continue;
            }
            if let Some(digest) = factory.create(&algorithm.name()) {
                let again = factory.create(&digest.name()).unwrap();
                assert_eq!(again.name(), digest.name());
            }
        }
    }

    #[test]
    fn test_spellings_agree() {
        let factory = Factory::default();
        for name in ["Crc32", "Crc-32", "CRC-32", "crc_32", "Crc", "CRC-32-PKZIP"] {
            assert_eq!(hex_of(&factory, name, b"123456789"), "CBF43926", "{name}");
        }
        assert_eq!(hex_of(&factory, "Crc16-Arc", b"123456789"), "BB3D");
        assert_eq!(hex_of(&factory, "Crc-16-Arc", b"123456789"), "BB3D");
        assert_eq!(hex_of(&factory, "cksum", b"123456789"), "765E7680");
        assert_eq!(hex_of(&factory, "fnv", b"a"), "E40C292C");
        assert_eq!(hex_of(&factory, "Adler-32", b"Wikipedia"), "11E60398");
    }

    #[test]
    fn test_unknown_name() {
        let factory = Factory::default();
        assert!(factory.create("NoSuchHash").is_none());
        assert!(factory.create("").is_none());
        assert!(factory.create("MultiHash").is_none());
    }

    #[test]
    fn test_fallback_for_external_algorithms() {
        let factory = Factory::default().with_fallback(|name| {
            name.to_ascii_lowercase()
                .starts_with("haval")
                .then(|| Box::new(Md5::default()) as Box<dyn Digest>)
        });
        assert!(factory.create("Haval-5-256").is_some());
        assert!(factory.create("Snefru2-8-256").is_none());
        assert!(factory.create("NoSuchHash").is_none());
        assert_eq!(factory.create("MD5").unwrap().name(), "MD5");
    }

    #[test]
    fn test_default_hash_tree() {
        let factory = Factory::default();
        let mut tree = factory.create("HashTree").unwrap();
        assert_eq!(tree.block_size(), 1024);
        assert_eq!(
            hex::encode_upper(tree.compute(b"").unwrap()),
            "5D9ED00A030E638BDB753A6A24FB900E5A63B8E73E6C25B6"
        );
    }

    #[test]
    fn test_default_hash_list() {
        let factory = Factory::default();
        let list = factory.create("HashList").unwrap();
        assert_eq!(list.name(), "HashList<SHA-1>");
        assert_eq!(list.block_size(), 1024);
    }

    #[test]
    fn test_composites_follow_settings() {
        let mut settings = Settings::default();
        settings.hash_list.algorithm = "CRC-32".into();
        settings.hash_list.block_size = 10;
        let factory = Factory::new(settings);
        let mut list = factory.create("HashList").unwrap();
        assert_eq!(list.name(), "HashList<CRC-32>");
        assert_eq!(list.block_size(), 10);
        assert_eq!(list.compute(b"0123456789").unwrap().len(), 4);
    }

    #[test]
    fn test_nested_composite_rejected() {
        let mut settings = Settings::default();
        settings.hash_tree.algorithm = "HashList".into();
        assert!(Factory::new(settings).create("HashTree").is_none());
    }

    #[test]
    fn test_hmac_uses_configured_algorithm() {
        let factory = Factory::default();
        let mut hmac = factory.hmac(Some(&b"Jefe"[..])).unwrap();
        assert_eq!(
            hex::encode_upper(hmac.compute(b"what do ya want for nothing?").unwrap()),
            "5BDCC146BF60754E6A042426089575C75A003F089D2739839DEC58B964EC3843"
        );
    }
}
