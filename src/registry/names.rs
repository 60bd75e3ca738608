//! The process-wide algorithm name table.

use crate::checksum::ClassicKind;
use crate::params::{
    CrcParameters, CrcStandard, FletcherParameters, FletcherStandard, FnvParameters, FnvStandard,
    GHashParameters, GHashStandard, HavalParameters, HavalStandard, SnefruParameters,
    SnefruStandard, Standard, SumParameters, SumStandard, TigerParameters, TigerStandard,
};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

/// A published standard of any parameterized family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnyStandard {
    /// Cyclic redundancy check
    Crc(CrcStandard),
    /// Fletcher checksum
    Fletcher(FletcherStandard),
    /// Fowler-Noll-Vo hash
    Fnv(FnvStandard),
    /// Shift-and-add string hash
    GHash(GHashStandard),
    /// HAVAL
    Haval(HavalStandard),
    /// Snefru
    Snefru(SnefruStandard),
    /// Modular byte sum
    Sum(SumStandard),
    /// Tiger and Tiger2
    Tiger(TigerStandard),
}

/// The parameter set of any parameterized family
///
/// Two standards compare equal here when they describe the same
/// algorithm, so an alias equals its canonical standard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AnyParameters {
    /// Cyclic redundancy check
    Crc(CrcParameters),
    /// Fletcher checksum
    Fletcher(FletcherParameters),
    /// Fowler-Noll-Vo hash
    Fnv(FnvParameters),
    /// Shift-and-add string hash
    GHash(GHashParameters),
    /// HAVAL
    Haval(HavalParameters),
    /// Snefru
    Snefru(SnefruParameters),
    /// Modular byte sum
    Sum(SumParameters),
    /// Tiger and Tiger2
    Tiger(TigerParameters),
}

// `$wrap` re-wraps the body in the same-named variant of another family enum
macro_rules! for_each_family {
    ($value:expr, $s:ident => $body:expr) => {
        match $value {
            AnyStandard::Crc($s) => $body,
            AnyStandard::Fletcher($s) => $body,
            AnyStandard::Fnv($s) => $body,
            AnyStandard::GHash($s) => $body,
            AnyStandard::Haval($s) => $body,
            AnyStandard::Snefru($s) => $body,
            AnyStandard::Sum($s) => $body,
            AnyStandard::Tiger($s) => $body,
        }
    };
    ($value:expr, $wrap:ident, $s:ident => $body:expr) => {
        match $value {
            AnyStandard::Crc($s) => $wrap::Crc($body),
            AnyStandard::Fletcher($s) => $wrap::Fletcher($body),
            AnyStandard::Fnv($s) => $wrap::Fnv($body),
            AnyStandard::GHash($s) => $wrap::GHash($body),
            AnyStandard::Haval($s) => $wrap::Haval($body),
            AnyStandard::Snefru($s) => $wrap::Snefru($body),
            AnyStandard::Sum($s) => $wrap::Sum($body),
            AnyStandard::Tiger($s) => $wrap::Tiger($body),
        }
    };
}

impl AnyStandard {
    /// Display name, e.g. `"CRC-16-ARC"`
    pub fn name(self) -> &'static str {
        for_each_family!(self, s => s.name())
    }

    /// True when this standard is another name for a canonical one
    pub fn is_alias(self) -> bool {
        for_each_family!(self, s => s.is_alias())
    }

    /// The standard this one is an alias of, or itself
    pub fn canonical(self) -> Self {
        for_each_family!(self, AnyStandard, s => s.canonical())
    }

    /// The parameter set this standard names
    pub fn parameters(self) -> AnyParameters {
        for_each_family!(self, AnyParameters, s => s.parameters())
    }

    fn all() -> impl Iterator<Item = AnyStandard> {
        let crc = CrcStandard::ALL.iter().map(|&s| AnyStandard::Crc(s));
        let fletcher = FletcherStandard::ALL.iter().map(|&s| AnyStandard::Fletcher(s));
        let fnv = FnvStandard::ALL.iter().map(|&s| AnyStandard::Fnv(s));
        let ghash = GHashStandard::ALL.iter().map(|&s| AnyStandard::GHash(s));
        let haval = HavalStandard::ALL.iter().map(|&s| AnyStandard::Haval(s));
        let snefru = SnefruStandard::ALL.iter().map(|&s| AnyStandard::Snefru(s));
        let sum = SumStandard::ALL.iter().map(|&s| AnyStandard::Sum(s));
        let tiger = TigerStandard::ALL.iter().map(|&s| AnyStandard::Tiger(s));
        crc.chain(fletcher)
            .chain(fnv)
            .chain(ghash)
            .chain(haval)
            .chain(snefru)
            .chain(sum)
            .chain(tiger)
    }
}

impl fmt::Display for AnyStandard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Everything the factory knows how to build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// MD4 (RFC 1320)
    Md4,
    /// MD5 (RFC 1321)
    Md5,
    /// SHA-0
    Sha0,
    /// SHA-1
    Sha1,
    /// SHA-224
    Sha224,
    /// SHA-256
    Sha256,
    /// SHA-384
    Sha384,
    /// SHA-512
    Sha512,
    /// RIPEMD-128
    Ripemd128,
    /// RIPEMD-160
    Ripemd160,
    /// RIPEMD-256
    Ripemd256,
    /// RIPEMD-320
    Ripemd320,
    /// Whirlpool
    Whirlpool,
    /// BSD `sum`
    SumBsd,
    /// System V `sum`
    SumSysV,
    /// A classic string hash
    Classic(ClassicKind),
    /// A parameterized family at one of its standards
    Standard(AnyStandard),
    /// Hash list over the configured primitive
    HashList,
    /// Hash tree over the configured primitive
    HashTree,
}

const PRIMITIVES: &[Algorithm] = &[
    Algorithm::Md4,
    Algorithm::Md5,
    Algorithm::Sha0,
    Algorithm::Sha1,
    Algorithm::Sha224,
    Algorithm::Sha256,
    Algorithm::Sha384,
    Algorithm::Sha512,
    Algorithm::Ripemd128,
    Algorithm::Ripemd160,
    Algorithm::Ripemd256,
    Algorithm::Ripemd320,
    Algorithm::Whirlpool,
    Algorithm::SumBsd,
    Algorithm::SumSysV,
];

// Class names and historical spellings accepted besides canonical names
const ALTERNATE_NAMES: &[(&str, Algorithm)] = &[
    ("HashAlgorithm", Algorithm::Sha1),
    ("Sha", Algorithm::Sha1),
    ("RipeMD", Algorithm::Ripemd160),
    ("Cksum", Algorithm::Standard(AnyStandard::Crc(CrcStandard::Crc32Cksum))),
    ("APHash", Algorithm::Classic(ClassicKind::Ap)),
    ("BkdrHash", Algorithm::Classic(ClassicKind::Bkdr)),
    ("DjbHash", Algorithm::Classic(ClassicKind::Djb)),
    ("ElfHash", Algorithm::Classic(ClassicKind::Elf)),
    ("JenkinsHash", Algorithm::Classic(ClassicKind::Jenkins)),
    ("JHash", Algorithm::Classic(ClassicKind::Jenkins)),
    ("OneAtATime", Algorithm::Classic(ClassicKind::Jenkins)),
    ("JSHash", Algorithm::Classic(ClassicKind::Js)),
    ("RSHash", Algorithm::Classic(ClassicKind::Rs)),
    ("SdbmHash", Algorithm::Classic(ClassicKind::Sdbm)),
    ("Pjw", Algorithm::Classic(ClassicKind::Pjw32)),
    ("Crc", Algorithm::Standard(AnyStandard::Crc(CrcStandard::Crc32))),
    ("Fletcher", Algorithm::Standard(AnyStandard::Fletcher(FletcherStandard::Fletcher32))),
    ("Fletcher8Bit", Algorithm::Standard(AnyStandard::Fletcher(FletcherStandard::Fletcher8))),
    ("Fletcher16Bit", Algorithm::Standard(AnyStandard::Fletcher(FletcherStandard::Fletcher16))),
    ("Fletcher32Bit", Algorithm::Standard(AnyStandard::Fletcher(FletcherStandard::Fletcher32))),
    ("Fnv", Algorithm::Standard(AnyStandard::Fnv(FnvStandard::Fnv32Type1a))),
    ("Fnv32", Algorithm::Standard(AnyStandard::Fnv(FnvStandard::Fnv32Type1a))),
    ("Fnv64", Algorithm::Standard(AnyStandard::Fnv(FnvStandard::Fnv64Type1a))),
    ("GHash", Algorithm::Standard(AnyStandard::GHash(GHashStandard::GHash5))),
    ("Haval", Algorithm::Standard(AnyStandard::Haval(HavalStandard::Haval256Pass5))),
    ("Haval-128", Algorithm::Standard(AnyStandard::Haval(HavalStandard::Haval128Pass5))),
    ("Haval-160", Algorithm::Standard(AnyStandard::Haval(HavalStandard::Haval160Pass5))),
    ("Haval-192", Algorithm::Standard(AnyStandard::Haval(HavalStandard::Haval192Pass5))),
    ("Haval-224", Algorithm::Standard(AnyStandard::Haval(HavalStandard::Haval224Pass5))),
    ("Haval-256", Algorithm::Standard(AnyStandard::Haval(HavalStandard::Haval256Pass5))),
    ("Snefru", Algorithm::Standard(AnyStandard::Snefru(SnefruStandard::Snefru256Pass8))),
    ("Snefru2", Algorithm::Standard(AnyStandard::Snefru(SnefruStandard::Snefru256Pass8))),
    ("Snefru2-128", Algorithm::Standard(AnyStandard::Snefru(SnefruStandard::Snefru128Pass8))),
    ("Snefru2-256", Algorithm::Standard(AnyStandard::Snefru(SnefruStandard::Snefru256Pass8))),
    ("Sum", Algorithm::Standard(AnyStandard::Sum(SumStandard::Sum32))),
    ("Tiger", Algorithm::Standard(AnyStandard::Tiger(TigerStandard::Tiger192))),
    ("Tiger2", Algorithm::Standard(AnyStandard::Tiger(TigerStandard::Tiger2_192))),
];

impl Algorithm {
    /// Canonical display name
    pub fn name(self) -> String {
        let name = match self {
            Algorithm::Md4 => "MD4",
            Algorithm::Md5 => "MD5",
            Algorithm::Sha0 => "SHA-0",
            Algorithm::Sha1 => "SHA-1",
            Algorithm::Sha224 => "SHA-224",
            Algorithm::Sha256 => "SHA-256",
            Algorithm::Sha384 => "SHA-384",
            Algorithm::Sha512 => "SHA-512",
            Algorithm::Ripemd128 => "RIPEMD-128",
            Algorithm::Ripemd160 => "RIPEMD-160",
            Algorithm::Ripemd256 => "RIPEMD-256",
            Algorithm::Ripemd320 => "RIPEMD-320",
            Algorithm::Whirlpool => "Whirlpool",
            Algorithm::SumBsd => "Sum-BSD",
            Algorithm::SumSysV => "Sum-SysV",
            Algorithm::Classic(kind) => kind.name(),
            Algorithm::Standard(standard) => standard.name(),
            Algorithm::HashList => "HashList",
            Algorithm::HashTree => "HashTree",
        };
        name.to_string()
    }

    /// True for the list and tree constructions
    pub fn is_composite(self) -> bool {
        matches!(self, Algorithm::HashList | Algorithm::HashTree)
    }

    /// Every canonical algorithm, aliases excluded
    pub fn all() -> Vec<Algorithm> {
        let mut all = PRIMITIVES.to_vec();
        all.extend(ClassicKind::ALL.iter().map(|&k| Algorithm::Classic(k)));
        all.extend(
            AnyStandard::all()
                .filter(|s| !s.is_alias())
                .map(Algorithm::Standard),
        );
        all.push(Algorithm::HashList);
        all.push(Algorithm::HashTree);
        all
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

/// Lookup key: case and separators (`-`, `_`, `/`, space) are ignored
pub(crate) fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, '-' | '_' | '/' | ' '))
        .flat_map(char::to_lowercase)
        .collect()
}

fn table() -> &'static HashMap<String, Algorithm> {
    static TABLE: OnceLock<HashMap<String, Algorithm>> = OnceLock::new();
    TABLE.get_or_init(|| {
        let mut table = HashMap::new();
        for algorithm in Algorithm::all() {
            table.insert(normalize(&algorithm.name()), algorithm);
        }
        for standard in AnyStandard::all().filter(|s| s.is_alias()) {
            table.insert(normalize(standard.name()), Algorithm::Standard(standard));
        }
        for &(name, algorithm) in ALTERNATE_NAMES {
            table.entry(normalize(name)).or_insert(algorithm);
        }
        tracing::debug!(entries = table.len(), "algorithm name table built");
        table
    })
}

/// Resolve a canonical, alternate or standard name
pub fn lookup(name: &str) -> Option<Algorithm> {
    table().get(&normalize(name)).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("CRC-16/ARC"), "crc16arc");
        assert_eq!(normalize("Crc16-Arc"), "crc16arc");
        assert_eq!(normalize("sha_256"), "sha256");
    }

    #[test]
    fn test_canonical_names_unique() {
        let all = Algorithm::all();
        let keys: std::collections::HashSet<String> =
            all.iter().map(|a| normalize(&a.name())).collect();
        assert_eq!(keys.len(), all.len());
    }

    #[test]
    fn test_canonical_names_resolve_to_themselves() {
        for algorithm in Algorithm::all() {
            assert_eq!(lookup(&algorithm.name()), Some(algorithm), "{algorithm}");
        }
    }

    #[test]
    fn test_alternate_names_do_not_shadow_canonical() {
        for &(name, _) in ALTERNATE_NAMES {
            let canonical = Algorithm::all()
                .into_iter()
                .find(|a| normalize(&a.name()) == normalize(name));
            if let Some(canonical) = canonical {
                assert_eq!(lookup(name), Some(canonical));
            }
        }
    }

    #[test]
    fn test_family_defaults() {
        let crc32 = Algorithm::Standard(AnyStandard::Crc(CrcStandard::Crc32));
        assert_eq!(lookup("Crc"), Some(crc32));
        assert_eq!(lookup("crc32"), Some(crc32));
        assert_eq!(lookup("Crc-32"), Some(crc32));
        assert_eq!(
            lookup("Haval-128"),
            Some(Algorithm::Standard(AnyStandard::Haval(HavalStandard::Haval128Pass5)))
        );
        assert_eq!(lookup("HashAlgorithm"), Some(Algorithm::Sha1));
        assert_eq!(lookup("MultiHash"), None);
    }

    #[test]
    fn test_alias_canonical() {
        let arc = AnyStandard::Crc(CrcStandard::Crc16Arc);
        assert!(arc.is_alias());
        assert_eq!(arc.canonical(), AnyStandard::Crc(CrcStandard::Crc16));
        let tiger = AnyStandard::Tiger(TigerStandard::Tiger128);
        assert_eq!(tiger.canonical(), tiger);
    }

    #[test]
    fn test_alias_parameters_equal_canonical() {
        for standard in AnyStandard::all() {
            assert_eq!(standard.parameters(), standard.canonical().parameters(), "{standard}");
            assert!(!standard.canonical().is_alias(), "{standard}");
        }
        assert_ne!(
            AnyStandard::Crc(CrcStandard::Crc16).parameters(),
            AnyStandard::Crc(CrcStandard::Crc16Kermit).parameters()
        );
    }
}
