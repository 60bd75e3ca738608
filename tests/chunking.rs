//! Chunking invariance across the public API

use hashkit::mac::Hmac;
use hashkit::methods::{HashList, HashTree, MultiHash, ParallelHash};
use hashkit::{create, Digest};
use proptest::prelude::*;

const ALGORITHMS: &[&str] = &[
    "MD4", "MD5", "SHA-0", "SHA-1", "SHA-224", "SHA-256", "SHA-384", "SHA-512", "RIPEMD-160",
    "Tiger-192", "Tiger2-128", "Whirlpool", "CRC-32", "CRC-16-CCITT", "CRC-24", "CRC-64-ISO",
    "FNV-1-64", "Fletcher-16", "Fletcher-32", "Adler-32", "Sum-24", "Sum-BSD", "Sum-SysV",
    "GHash-3", "ELF", "Jenkins", "XOR-8",
];

fn split_update(digest: &mut dyn Digest, data: &[u8], cuts: &[usize]) -> Vec<u8> {
    let mut cuts: Vec<usize> = cuts.iter().map(|c| c % (data.len() + 1)).collect();
    cuts.sort_unstable();
    digest.reset();
    let mut start = 0;
    for cut in cuts {
        digest.update(&data[start..cut]).unwrap();
        start = cut;
    }
    digest.update(&data[start..]).unwrap();
    digest.finalize().unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn every_algorithm_is_chunking_invariant(
        data in proptest::collection::vec(any::<u8>(), 0..600),
        cuts in proptest::collection::vec(any::<usize>(), 0..8),
    ) {
        for &name in ALGORITHMS {
            let mut digest = create(name).unwrap();
            let whole = digest.compute(&data).unwrap();
            prop_assert_eq!(split_update(digest.as_mut(), &data, &cuts), whole, "{}", name);
        }
    }

    #[test]
    fn composites_are_chunking_invariant(
        data in proptest::collection::vec(any::<u8>(), 0..300),
        cuts in proptest::collection::vec(any::<usize>(), 0..8),
        block_size in 1usize..40,
    ) {
        let mut list = HashList::new(create("MD5").unwrap(), block_size).unwrap();
        let whole = list.compute(&data).unwrap();
        prop_assert_eq!(split_update(&mut list, &data, &cuts), whole);

        let mut tree = HashTree::new(create("Tiger").unwrap(), block_size).unwrap();
        let whole = tree.compute(&data).unwrap();
        prop_assert_eq!(split_update(&mut tree, &data, &cuts), whole);

        let mut hmac = Hmac::new(create("SHA-1").unwrap(), Some(&b"key"[..]));
        let whole = hmac.compute(&data).unwrap();
        prop_assert_eq!(split_update(&mut hmac, &data, &cuts), whole);
    }

    #[test]
    fn fan_outs_match_their_members(
        data in proptest::collection::vec(any::<u8>(), 0..300),
        cuts in proptest::collection::vec(any::<usize>(), 0..8),
    ) {
        let names = ["CRC-32", "MD5", "SHA-1"];
        let members = || names.iter().map(|n| create(n).unwrap()).collect::<Vec<_>>();
        let outputs: Vec<Vec<u8>> = members()
            .into_iter()
            .map(|mut d| d.compute(&data).unwrap())
            .collect();

        let mut multi = MultiHash::new(members()).unwrap();
        prop_assert_eq!(split_update(&mut multi, &data, &cuts), outputs.concat());

        let mut xor = vec![0u8; 20];
        for out in &outputs {
            for (acc, byte) in xor.iter_mut().zip(out) {
                *acc ^= byte;
            }
        }
        let mut parallel = ParallelHash::new(members()).unwrap();
        prop_assert_eq!(split_update(&mut parallel, &data, &cuts), xor);
    }
}

#[test]
fn million_a_md5_regardless_of_chunking() {
    let data = vec![b'a'; 1_000_000];
    let mut md5 = create("MD5").unwrap();
    let cut_sets: [&[usize]; 3] = [&[], &[1, 55, 56, 63, 64, 65, 999_999], &[119, 120, 121]];
    for cuts in cut_sets {
        assert_eq!(
            hex::encode_upper(split_update(md5.as_mut(), &data, cuts)),
            "7707D6AE4E027C70EEA2A935C2296F21"
        );
    }
}

#[test]
fn padding_boundary_lengths() {
    let mut sha1 = create("SHA-1").unwrap();
    let mut sha256 = create("SHA-256").unwrap();
    for len in 50..=70 {
        let data = vec![0x5Au8; len];
        let one_byte_cuts: Vec<usize> = (1..len).collect();
        assert_eq!(
            split_update(sha1.as_mut(), &data, &one_byte_cuts),
            sha1.compute(&data).unwrap()
        );
        assert_eq!(
            split_update(sha256.as_mut(), &data, &one_byte_cuts),
            sha256.compute(&data).unwrap()
        );
    }
}
