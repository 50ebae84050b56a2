use kira_timeline::io::table::parse_table;
use kira_timeline::prepare::clinical::{
    ClinicalLayout, UNPARSABLE_SURVIVAL, survival_days, vital_status,
};
use kira_timeline::prepare::mutations::MutationIndex;
use kira_timeline::prepare::normalize_genes;
use kira_timeline::prepare::pfs::{PfsTable, ProgressionFree, pfs_value};
use kira_timeline::timeline::VitalStatus;

fn headers(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

#[test]
fn survival_prefers_death_days() {
    assert_eq!(survival_days("300", "250"), 300);
    assert_eq!(survival_days("", "250"), 250);
    assert_eq!(survival_days("NaN", "250.0"), 250);
    assert_eq!(survival_days("[Not Applicable]", "410"), 410);
}

#[test]
fn survival_zero_and_unparsable() {
    assert_eq!(survival_days("0", "10"), 1);
    assert_eq!(survival_days("", "0"), 1);
    assert_eq!(survival_days("", "[Not Available]"), UNPARSABLE_SURVIVAL);
    assert_eq!(survival_days("soon", "10"), UNPARSABLE_SURVIVAL);
}

#[test]
fn vital_status_from_dead_marker() {
    assert_eq!(vital_status("Dead"), VitalStatus::Deceased);
    assert_eq!(vital_status(" dead "), VitalStatus::Deceased);
    assert_eq!(vital_status("Alive"), VitalStatus::Alive);
    assert_eq!(vital_status(""), VitalStatus::Alive);
}

#[test]
fn clinical_layout_renames_and_skips_generated() {
    let h = headers(&[
        "bcr_patient_barcode",
        "gender",
        "vital_status",
        "death_days_to",
        "last_contact_days_to",
        "race",
        "status",
        "gene_TP53",
    ]);
    let genes = vec!["TP53".to_string()];
    let layout = ClinicalLayout::discover(&h, &genes).unwrap();
    assert_eq!(layout.barcode, 0);
    assert_eq!(layout.passthrough_names(), vec!["sex", "race"]);
    assert_eq!(layout.passthrough[0].index, 1);
}

#[test]
fn clinical_layout_requires_vital_status() {
    let h = headers(&["bcr_patient_barcode", "death_days_to", "last_contact_days_to"]);
    let err = ClinicalLayout::discover(&h, &[]).unwrap_err();
    assert!(err.to_string().contains("vital_status"));
}

#[test]
fn mutations_match_by_barcode_prefix() {
    let mut index = MutationIndex::default();
    index.insert("TCGA-AA-0001-01A-11D", "TP53");
    index.insert("TCGA-AA-0001-06A-11D", "NOTCH1");
    index.insert("TCGA-AA-0002-01A", "PIK3CA");
    index.insert("TCGA-AA-000", "KRAS");

    let genes = vec!["TP53".to_string(), "NOTCH1".to_string(), "PIK3CA".to_string()];
    assert_eq!(index.flags("TCGA-AA-0001", &genes), vec![true, true, false]);
    assert_eq!(index.flags("TCGA-AA-0002", &genes), vec![false, false, true]);
    assert_eq!(index.flags("TCGA-AA-0003", &genes), vec![false, false, false]);
    assert!(!index.symbols_for("TCGA-AA-0001").contains("KRAS"));
}

#[test]
fn mutation_table_needs_both_columns() {
    let table = parse_table(
        "Hugo_Symbol,Sample\nTP53,TCGA-AA-0001\n".as_bytes(),
        b',',
        "mutations",
    )
    .unwrap();
    assert!(MutationIndex::from_table(&table).is_err());
}

#[test]
fn pfs_values_and_duplicates() {
    assert_eq!(pfs_value("#N/A"), None);
    assert_eq!(pfs_value(" 120 "), Some("120".to_string()));

    let table = parse_table(
        "bcr_patient_barcode,PFI.1,PFI.time.1\nP1,1,200\nP2,#N/A,#N/A\nP2,0,999\n".as_bytes(),
        b',',
        "pfs",
    )
    .unwrap();
    let pfs = PfsTable::from_table(&table).unwrap();
    assert_eq!(pfs.len(), 2);
    assert_eq!(pfs.duplicates, 1);
    assert_eq!(
        pfs.get("P1"),
        Some(&ProgressionFree {
            time: Some("200".to_string()),
            status: Some("1".to_string()),
        })
    );
    assert_eq!(pfs.get("P2"), Some(&ProgressionFree::default()));
}

#[test]
fn gene_list_is_normalized() {
    assert_eq!(
        normalize_genes([" TP53", "", "NOTCH1", "TP53"]),
        vec!["TP53".to_string(), "NOTCH1".to_string()]
    );
}
