mod common;

use cascinstall::{CatalogIndex, Error, InstallManifestParser, ParserConfig, TagType, parse};
use common::ManifestBuilder;
use pretty_assertions::assert_eq;

#[test]
fn decodes_known_values() {
    let data = ManifestBuilder::new(4)
        .tag("Windows", 1, &[0, 2])
        .tag("enUS", 3, &[1, 2])
        .file("Wow.exe", &[0xDE, 0xAD, 0xBE, 0xEF], 4096)
        .file("Data/data.000", &[0x00, 0x01, 0x02, 0x03], 7)
        .file("Launcher.exe", &[0xFF, 0xEE, 0xDD, 0xCC], 0)
        .build();

    let catalog = parse(&data).unwrap();

    let header = catalog.header();
    assert_eq!(header.version, 1);
    assert_eq!(header.hash_size, 4);
    assert_eq!(header.tag_count, 2);
    assert_eq!(header.file_count, 3);
    assert_eq!(header.mask_size(), 1);

    let tags: Vec<(&str, TagType)> = catalog
        .tags()
        .iter()
        .map(|t| (t.name.as_str(), t.tag_type))
        .collect();
    assert_eq!(tags, vec![("Windows", TagType::Platform), ("enUS", TagType::Locale)]);

    let files: Vec<(&str, &str, u32, Vec<String>)> = catalog
        .files()
        .iter()
        .map(|f| (f.name.as_str(), f.content_hash.as_str(), f.size, f.tags.clone()))
        .collect();
    assert_eq!(
        files,
        vec![
            ("Wow.exe", "deadbeef", 4096, vec!["Windows".to_string()]),
            ("Data/data.000", "00010203", 7, vec!["enUS".to_string()]),
            (
                "Launcher.exe",
                "ffeeddcc",
                0,
                vec!["Windows".to_string(), "enUS".to_string()]
            ),
        ]
    );
    assert_eq!(catalog.total_size(), 4103);
}

#[test]
fn mask_selects_exact_files() {
    let data = ManifestBuilder::new(2)
        .tag("Alternate", 0x4000, &[0, 7, 8, 15])
        .numbered_files(16)
        .build();

    let catalog = parse(&data).unwrap();
    assert_eq!(catalog.header().mask_size(), 2);

    let tagged: Vec<usize> = catalog
        .files()
        .iter()
        .enumerate()
        .filter(|(_, f)| !f.tags.is_empty())
        .map(|(i, _)| i)
        .collect();
    assert_eq!(tagged, vec![0, 7, 8, 15]);
    assert!(catalog
        .files_with_tag("Alternate")
        .all(|f| f.tags == vec!["Alternate".to_string()]));

    // Raw mask is MSB-first within each byte
    assert_eq!(catalog.tags()[0].mask, vec![0b1000_0001, 0b1000_0001]);
}

#[test]
fn padding_bits_past_file_count_are_ignored() {
    let mut data = ManifestBuilder::new(1)
        .tag("Region", 4, &[0])
        .numbered_files(3)
        .build();
    // Tag mask is the single byte right after "Region\0" and the type
    let mask_offset = 10 + "Region".len() + 1 + 2;
    data[mask_offset] = 0xFF;

    let catalog = parse(&data).unwrap();
    assert_eq!(catalog.files_with_tag("Region").count(), 3);
    let index = CatalogIndex::build(&catalog);
    assert_eq!(index.files_for_tag("Region"), &[0, 1, 2]);
}

#[test]
fn signature_must_be_in() {
    let mut data = ManifestBuilder::new(16).numbered_files(1).build();
    assert_eq!(&data[..2], &[0x49, 0x4E]);
    assert!(parse(&data).is_ok());

    for bad in [[0x4E, 0x49], [0x00, 0x00], [0x49, 0x4F], [0xFF, 0x4E]] {
        data[0] = bad[0];
        data[1] = bad[1];
        let err = parse(&data).unwrap_err();
        assert!(matches!(err, Error::InvalidSignature { .. }), "{:?}", bad);
        assert!(err.is_format_error());
    }
}

#[test]
fn truncation_anywhere_is_reported() {
    let data = ManifestBuilder::new(16)
        .tag("Windows", 1, &[0, 1])
        .tag("OSX", 1, &[2])
        .numbered_files(3)
        .build();
    assert!(parse(&data).is_ok());

    // Every proper prefix past the signature must fail as a truncation
    for len in 2..data.len() {
        match parse(&data[..len]) {
            Err(Error::Truncated { .. }) => {}
            other => panic!("prefix of {} bytes gave {:?}", len, other),
        }
    }
}

#[test]
fn declared_counts_beyond_buffer_fail() {
    let mut data = ManifestBuilder::new(16).numbered_files(2).build();
    // Claim 3 files while only 2 are encoded
    data[9] = 3;
    let err = parse(&data).unwrap_err();
    assert!(matches!(err, Error::Truncated { available: 0, .. }), "{:?}", err);
}

#[test]
fn strict_mode_rejects_trailing_bytes() {
    let mut data = ManifestBuilder::new(16).numbered_files(2).build();
    data.extend_from_slice(&[0, 0, 0]);

    assert_eq!(parse(&data).unwrap().files().len(), 2);

    let strict = InstallManifestParser::with_config(ParserConfig::new().require_fully_consumed(true));
    assert!(matches!(
        strict.parse(&data),
        Err(Error::TrailingData { remaining: 3, .. })
    ));
}

#[test]
fn index_finds_records_by_path_and_hash() {
    let data = ManifestBuilder::new(2)
        .tag("Windows", 1, &[0, 1])
        .file("Interface/Icons/a.blp", &[0xAB, 0xCD], 1)
        .file("interface\\icons\\A.BLP", &[0x12, 0x34], 2)
        .file("Sound/b.ogg", &[0xAB, 0xCD], 3)
        .build();
    let catalog = parse(&data).unwrap();
    let index = CatalogIndex::build(&catalog);

    assert_eq!(index.lookup_path("INTERFACE/ICONS/A.BLP"), &[0, 1]);
    assert_eq!(index.lookup_content_hash("abcd"), &[0, 2]);
    let sizes: Vec<u32> = index
        .records(&catalog, index.lookup_content_hash("abcd"))
        .iter()
        .map(|f| f.size)
        .collect();
    assert_eq!(sizes, vec![1, 3]);
}

#[test]
fn non_utf8_names_are_replaced() {
    let mut raw = ManifestBuilder::new(1).file("caf\u{e9}", &[1], 1).build();
    // Replace the two-byte UTF-8 "é" with a lone Latin-1 byte
    let name_start = 10;
    raw.splice(name_start + 3..name_start + 5, [0xE9]);
    let catalog = parse(&raw).unwrap();
    assert_eq!(catalog.files()[0].name, "caf\u{fffd}");
    assert_eq!(catalog.files()[0].content_hash, "01");
}
