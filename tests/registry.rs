//! Name-based construction end to end

use hashkit::error::HashError;
use hashkit::methods::{HashList, MultiHash, ParallelHash};
use hashkit::params::{CrcParameters, CrcStandard, HavalParameters, Standard, TigerParameters};
use hashkit::registry::{self, AnyStandard, Factory};
use hashkit::{Digest, Settings};
use std::io::Write;
use tempfile::TempDir;

const CHECK: &[u8] = b"123456789";

fn check_value(name: &str) -> String {
    let mut digest = registry::create(name).unwrap_or_else(|| panic!("{name} not found"));
    hex::encode_upper(digest.compute(CHECK).unwrap())
}

#[test]
fn crc_check_values_by_name() {
    for (name, expected) in [
        ("CRC-8", "F4"),
        ("CRC-16", "BB3D"),
        ("CRC-16-ARC", "BB3D"),
        ("CRC-16-CCITT-FALSE", "29B1"),
        ("Crc16-Kermit", "2189"),
        ("CRC-16-ZMODEM", "31C3"),
        ("CRC-24-OPENPGP", "21CF02"),
        ("CRC-32", "CBF43926"),
        ("CRC-32-BZIP2", "FC891918"),
        ("crc32iscsi", "E3069283"),
        ("CRC-64-WE", "62EC59E3F1A4F00A"),
    ] {
        assert_eq!(check_value(name), expected, "{name}");
    }
}

#[test]
fn primitive_vectors_by_name() {
    assert_eq!(check_value("MD4"), "2AE523785D0CAF4D2FB557C12016185C");
    assert_eq!(check_value("Sha"), "F7C3BC1D808E04732ADF679965CCC34CA7AE3441");
    assert_eq!(check_value("SHA-256"), "15E2B0D3C33891EBB0F1EF609EC419420C20E320CE94C65FBC8C3312448EB225");
    assert_eq!(check_value("Adler32"), "091E01DE");
    assert_eq!(check_value("Sum-BSD"), "D16F");
}

#[test]
fn aliases_equal_their_canonical_parameters() {
    assert_eq!(registry::parameters("Crc16Arc"), registry::parameters("Crc16"));
    assert_eq!(registry::parameters("CRC-32-PKZIP"), registry::parameters("CRC-32"));
    assert!(registry::parameters("Crc16Arc").is_some());
    let arc = registry::standard("Crc-16-Arc").unwrap();
    let crc16 = registry::standard("CRC-16").unwrap();
    assert_eq!(arc.canonical(), crc16);
    assert_eq!(CrcStandard::Crc16Arc.parameters(), CrcStandard::Crc16.parameters());
    assert_eq!(registry::resolve_alias("CRC-32-PKZIP"), Some("CRC-32"));
}

#[test]
fn invalid_parameters_rejected() {
    for order in [0, 65] {
        assert!(matches!(
            CrcParameters::new(order, 0x07, 0, false, false, 0),
            Err(HashError::Validation(_))
        ));
    }
    assert!(matches!(HavalParameters::new(6, 256), Err(HashError::Validation(_))));
    assert!(matches!(TigerParameters::new(100, 1), Err(HashError::Validation(_))));
}

#[test]
fn family_defaults() {
    assert_eq!(
        registry::standard("Tiger"),
        registry::standard("Tiger-192")
    );
    assert_eq!(check_value("Crc"), check_value("CRC-32"));
    assert_eq!(registry::create("Fletcher").unwrap().name(), "Fletcher-32");
    assert!(matches!(registry::standard("Haval"), Some(AnyStandard::Haval(_))));
}

#[test]
fn unknown_names_yield_none() {
    assert!(registry::create("GOST").is_none());
    assert!(registry::create("Haval-5-256").is_none());
    assert!(registry::create("ParallelHash").is_none());
}

#[test]
fn host_fallback_supplies_missing_algorithms() {
    let factory = Factory::default().with_fallback(|name| {
        (name == "Snefru2-8-256").then(|| registry::create("SHA-256").unwrap())
    });
    assert!(factory.create("Snefru2-8-256").is_some());
    assert!(factory.create("GOST").is_none());
}

#[test]
fn hash_list_through_settings() {
    let mut settings = Settings::default();
    settings.hash_list.algorithm = "MD5".into();
    settings.hash_list.block_size = 10;
    let factory = Factory::new(settings);

    let data = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
    let mut by_name = factory.create("HashList").unwrap();
    let mut direct = HashList::new(registry::create("MD5").unwrap(), 10).unwrap();
    let top = direct.compute(data).unwrap();
    assert_eq!(by_name.compute(data).unwrap(), top);
    assert_eq!(direct.len(), 7);
    assert!(matches!(direct.get(7), Err(HashError::Bounds { index: 7, len: 7 })));

    let leaves: Vec<u8> = direct.iter().flat_map(|n| n.digest().to_vec()).collect();
    assert_eq!(registry::create("MD5").unwrap().compute(&leaves).unwrap(), top);
}

#[test]
fn tiger_tree_by_name() {
    let mut tree = registry::create("HashTree").unwrap();
    for (input, expected) in [
        (vec![], "5D9ED00A030E638BDB753A6A24FB900E5A63B8E73E6C25B6"),
        (vec![0u8], "AABBCCA084ACECD0511D1F6232A17BFAEFA441B2982E5548"),
        (vec![b'A'; 1024], "5FBD0E62AD016D596B77D1D28883B94FED78ECBAF4640914"),
        (vec![b'A'; 1025], "7E591C1CD8F2E6121FDBCD8071BA279626B771642D10A3DB"),
    ] {
        assert_eq!(hex::encode_upper(tree.compute(&input).unwrap()), expected);
    }
}

#[test]
fn fan_out_lock_by_name() {
    let members = vec![registry::create("MD5").unwrap(), registry::create("SHA-1").unwrap()];
    let mut multi = MultiHash::new(members.clone()).unwrap();
    multi.update(b"abc").unwrap();
    assert!(matches!(multi.reverse(), Err(HashError::StateViolation(_))));
    assert!(matches!(
        multi.add(registry::create("CRC-32").unwrap()),
        Err(HashError::StateViolation(_))
    ));
    assert_eq!(multi.finalize().unwrap().len(), 36);
    multi.reverse().unwrap();

    let mut parallel = ParallelHash::new(members).unwrap();
    parallel.update(b"").unwrap();
    assert!(matches!(parallel.swap(0, 1), Err(HashError::StateViolation(_))));
    assert!(matches!(MultiHash::new(Vec::new()), Err(HashError::Validation(_))));
}

#[test]
fn settings_file_drives_factory() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("hashkit.json");
    let mut file = std::fs::File::create(&path).unwrap();
    write!(file, r#"{{"default_algorithm": "crc-32", "hmac_algorithm": "md5"}}"#).unwrap();

    let factory = Factory::new(Settings::load(&path).unwrap());
    let mut digest = factory.create_default().unwrap();
    assert_eq!(hex::encode_upper(digest.compute(CHECK).unwrap()), "CBF43926");

    let mut hmac = factory.hmac(Some(&b"Jefe"[..])).unwrap();
    assert_eq!(
        hex::encode_upper(hmac.compute(b"what do ya want for nothing?").unwrap()),
        "750C783E6AB0B503EAA86E310A5DB738"
    );
}
