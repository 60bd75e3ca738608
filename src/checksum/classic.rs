//! Classic non-cryptographic string hashes and small checksums.
//!
//! These are the table-free hashes that circulate in hash-table and
//! symbol-table code. Each keeps a 32-bit accumulator (XOR-8 keeps one
//! byte) and serializes it big-endian.

use super::{ChecksumEngine, ChecksumFunction};
use serde::{Deserialize, Serialize};

const ADLER_MOD: u32 = 65521;

/// Which classic hash a [`ClassicCore`] computes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClassicKind {
    /// Adler-32 (RFC 1950)
    Adler32,
    /// Arash Partow's alternating hash
    Ap,
    /// Kernighan and Ritchie multiplier-131 hash
    Bkdr,
    /// Bernstein's times-33 hash
    Djb,
    /// Unix ELF symbol hash
    Elf,
    /// Bob Jenkins' one-at-a-time hash
    Jenkins,
    /// Justin Sobel's bitwise hash
    Js,
    /// P. J. Weinberger's hash
    Pjw32,
    /// Robert Sedgewick's hash
    Rs,
    /// The sdbm database hash
    Sdbm,
    /// XOR of all bytes
    Xor8,
}

impl ClassicKind {
    /// Every classic hash
    pub const ALL: &'static [ClassicKind] = &[
        ClassicKind::Adler32,
        ClassicKind::Ap,
        ClassicKind::Bkdr,
        ClassicKind::Djb,
        ClassicKind::Elf,
        ClassicKind::Jenkins,
        ClassicKind::Js,
        ClassicKind::Pjw32,
        ClassicKind::Rs,
        ClassicKind::Sdbm,
        ClassicKind::Xor8,
    ];

    /// Display name
    pub fn name(self) -> &'static str {
        match self {
            ClassicKind::Adler32 => "Adler-32",
            ClassicKind::Ap => "AP",
            ClassicKind::Bkdr => "BKDR",
            ClassicKind::Djb => "DJB",
            ClassicKind::Elf => "ELF",
            ClassicKind::Jenkins => "Jenkins",
            ClassicKind::Js => "JS",
            ClassicKind::Pjw32 => "PJW-32",
            ClassicKind::Rs => "RS",
            ClassicKind::Sdbm => "SDBM",
            ClassicKind::Xor8 => "XOR-8",
        }
    }

    fn seed(self) -> u32 {
        match self {
            ClassicKind::Adler32 => 1,
            ClassicKind::Ap => 0xAAAA_AAAA,
            ClassicKind::Djb => 5381,
            ClassicKind::Js => 1_315_423_911,
            _ => 0,
        }
    }
}

/// Accumulator for a [`ClassicKind`]
#[derive(Debug, Clone)]
pub struct ClassicCore {
    kind: ClassicKind,
    hash: u32,
    // Adler's second sum, or the RS running multiplier
    aux: u32,
    position: u64,
}

impl ClassicCore {
    /// Start the hash `kind`
    pub fn new(kind: ClassicKind) -> Self {
        let mut core = Self {
            kind,
            hash: 0,
            aux: 0,
            position: 0,
        };
        core.reset();
        core
    }

    /// Which hash this is
    pub fn kind(&self) -> ClassicKind {
        self.kind
    }

    fn step(&mut self, byte: u8) {
        let c = u32::from(byte);
        let h = self.hash;
        self.hash = match self.kind {
            ClassicKind::Adler32 => {
                let a = (h + c) % ADLER_MOD;
                self.aux = (self.aux + a) % ADLER_MOD;
                a
            }
            ClassicKind::Ap if self.position & 1 == 0 => {
                h ^ ((h << 7) ^ c.wrapping_mul(h >> 3))
            }
            ClassicKind::Ap => h ^ !((h << 11).wrapping_add(c ^ (h >> 5))),
            ClassicKind::Bkdr => h.wrapping_mul(131).wrapping_add(c),
            ClassicKind::Djb => (h << 5).wrapping_add(h).wrapping_add(c),
            ClassicKind::Elf => {
                let h = (h << 4).wrapping_add(c);
                let high = h & 0xF000_0000;
                if high != 0 {
                    (h ^ (high >> 24)) & !high
                } else {
                    h
                }
            }
            ClassicKind::Jenkins => {
                let h = h.wrapping_add(c);
                let h = h.wrapping_add(h << 10);
                h ^ (h >> 6)
            }
            ClassicKind::Js => h ^ (h << 5).wrapping_add(c).wrapping_add(h >> 2),
            ClassicKind::Pjw32 => {
                let h = (h << 4).wrapping_add(c);
                let high = h & 0xF000_0000;
                if high != 0 {
                    (h ^ (high >> 28)) & 0x0FFF_FFFF
                } else {
                    h
                }
            }
            ClassicKind::Rs => {
                let next = h.wrapping_mul(self.aux).wrapping_add(c);
                self.aux = self.aux.wrapping_mul(0x0005_C6B7);
                next
            }
            ClassicKind::Sdbm => c
                .wrapping_add(h << 6)
                .wrapping_add(h << 16)
                .wrapping_sub(h),
            ClassicKind::Xor8 => h ^ c,
        };
        self.position += 1;
    }
}

impl ChecksumFunction for ClassicCore {
    fn name(&self) -> String {
        self.kind.name().to_string()
    }

    fn output_size(&self) -> usize {
        match self.kind {
            ClassicKind::Xor8 => 1,
            _ => 4,
        }
    }

    fn reset(&mut self) {
        self.hash = self.kind.seed();
        self.aux = match self.kind {
            ClassicKind::Rs => 0x0000_F8C9,
            _ => 0,
        };
        self.position = 0;
    }

    fn update(&mut self, data: &[u8]) {
        for &byte in data {
            self.step(byte);
        }
    }

    fn value(&self) -> Vec<u8> {
        let value = match self.kind {
            ClassicKind::Adler32 => (self.aux << 16) | self.hash,
            ClassicKind::Jenkins => {
                let h = self.hash.wrapping_add(self.hash << 3);
                let h = h ^ (h >> 11);
                h.wrapping_add(h << 15)
            }
            ClassicKind::Xor8 => return vec![self.hash as u8],
            _ => self.hash,
        };
        value.to_be_bytes().to_vec()
    }
}

/// Streaming classic hash
pub type Classic = ChecksumEngine<ClassicCore>;

/// A streaming instance of `kind`
pub fn classic(kind: ClassicKind) -> Classic {
    ChecksumEngine::new(ClassicCore::new(kind))
}
