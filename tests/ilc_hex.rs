use std::io::Write;
use std::path::PathBuf;

use ilchex::diff::{DiffEntry, diff};
use ilchex::error::LoadError;
use ilchex::fmt::SegmentList;
use ilchex::ivt::VECTOR_COUNT;
use ilchex::{AddressSpace, IlcVerifier, MemoryLayout, RangeError};

fn fixture(name: &str) -> AddressSpace {
    let path: PathBuf = [env!("CARGO_MANIFEST_DIR"), "tests", "data", name]
        .iter()
        .collect();
    AddressSpace::from_path(path).unwrap()
}

#[test]
fn test_loading() {
    let ilchex = fixture("ilc.hex");
    assert_eq!(ilchex.read_word16(0x1600), 0x1BE6);
    assert!(!ilchex.has_range(0x2BFF, 1));
    assert!(ilchex.has_range(0x2C00, 1));
    assert_eq!(
        SegmentList(ilchex.segments()).to_string(),
        "0000 - 0008, 2c00 - 2ff0"
    );
}

#[test]
fn test_verify_without_statistics_record() {
    let ilchex = fixture("ilc.hex");
    let err = IlcVerifier::new(&ilchex).verify().unwrap_err();
    assert_eq!(err.context, Some(RangeError::STATISTICS));
    assert_eq!(
        err.to_string(),
        "Cannot retrieve application statistics record: address range 22464 - 22480 \
         (0x0057c0 - 0x0057d0) is outside loaded range."
    );
}

#[test]
fn test_ivt_of_fixture() {
    let ilchex = fixture("ilc.hex");
    let entries: Vec<_> = IlcVerifier::new(&ilchex)
        .ivt(MemoryLayout::IVT_BASE)
        .collect();
    assert_eq!(entries.len(), VECTOR_COUNT);
    assert!(entries.iter().all(|e| e.warning().is_none()));
    assert_eq!(entries[0].to_string(), "       Reserved Trap 0: 0000 1be6");
    assert_eq!(entries[125].name, "Interrupt 117");
}

#[test]
fn test_ivt_outside_loaded_data() {
    let ilchex = fixture("ilc.hex");
    let warnings = IlcVerifier::new(&ilchex)
        .ivt(0x4000)
        .filter(|e| e.warning().is_some())
        .count();
    assert_eq!(warnings, VECTOR_COUNT);
}

#[test]
fn test_verify_full_dump() {
    let dump = fixture("ilc_dump.hex");
    let report = IlcVerifier::new(&dump).verify().unwrap();
    assert!(report.passed());

    let lines: Vec<String> = report.to_string().lines().map(String::from).collect();
    assert_eq!(
        lines,
        [
            "Reset command address 1234",
            "Application start address 3000",
            "Application length 64",
            "Application end 3040",
            "Stat CRC 7fe2",
            "Calculated Stat CRC 7fe2",
            "Application CRC 6e6e",
            "Calculated Application CRC 6e6e",
        ]
    );
}

#[test]
fn test_diff_firmware_against_dump() {
    let dump = fixture("ilc_dump.hex");
    let firmware = fixture("ilc_app.hex");

    let lines: Vec<String> = diff(&firmware, &dump).map(|e| e.to_string()).collect();
    assert_eq!(
        lines,
        [
            "Diff: 003005 00 26",
            "Diff: range not fully loaded: 0x004000 - 0x004004",
            "Diff: 004000 01 ff",
            "Diff: 004001 02 ff",
            "Diff: 004002 03 ff",
            "Diff: 004003 04 ff",
        ]
    );
}

#[test]
fn test_diff_dump_against_itself() {
    let dump = fixture("ilc_dump.hex");
    assert_eq!(diff(&dump, &dump).count(), 0);
}

#[test]
fn test_diff_visits_reference_segments_only() {
    let dump = fixture("ilc_dump.hex");
    let firmware = fixture("ilc_app.hex");
    let not_loaded: Vec<_> = diff(&dump, &firmware)
        .filter(|e| matches!(e, DiffEntry::RangeNotLoaded { .. }))
        .collect();
    assert_eq!(
        not_loaded,
        [
            DiffEntry::RangeNotLoaded { start: 0x1E00, end: 0x1E20 },
            DiffEntry::RangeNotLoaded { start: 0x57C0, end: 0x57D0 },
            DiffEntry::RangeNotLoaded { start: 0xAF80, end: 0xAF90 },
        ]
    );
}

#[test]
fn test_load_from_temp_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, ":0400100001020304E2").unwrap();
    writeln!(file, ":00000001FF").unwrap();

    let space = AddressSpace::from_path(file.path()).unwrap();
    assert_eq!(space.read_word16(0x08), 0x0201);
    assert_eq!(space.crc16_modbus(0x10, 4), Ok(0x2BA1));
}

#[test]
fn test_load_missing_file() {
    let err = AddressSpace::from_path("/nonexistent/ilc.hex").unwrap_err();
    assert!(matches!(err, LoadError::Io(_)));
}
