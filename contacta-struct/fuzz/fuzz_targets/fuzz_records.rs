#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    let records = contacta_struct::StructureRecords::from_pdb_str(data);
    let (parsed, _) = contacta_struct::secondary::parse_segment_records(&records.secondary);
    for record in &parsed {
        let _ = record.label();
    }
});
