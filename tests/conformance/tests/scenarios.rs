//! End-to-end scenarios exercising the full public API surface across
//! `faultmesh-core`, `faultmesh-plan`, and `faultmesh-shard`.

use faultmesh_core::endpoint::Endpoint;
use faultmesh_core::lattice::Lattice;
use faultmesh_plan::{vulcanize, AnswerSet, RecordTarget};
use faultmesh_shard::{FragmentLedger, InMemoryFragmentLedger, ShardError, StatefulSearchingSharder};

fn single_cell_lattice(values: &[&str], health_checks: &[&str]) -> Lattice {
    let mut l = Lattice::new(vec!["cell".to_string()]).unwrap();
    let endpoints = values
        .iter()
        .zip(health_checks.iter())
        .map(|(v, h)| Endpoint::new(v.as_bytes().to_vec(), vec![(*h).to_string()]))
        .collect::<Vec<_>>();
    l.add_endpoints_for_sector(vec!["only".to_string()], endpoints)
        .unwrap();
    l
}

#[test]
fn s1_small_flat_tree() {
    let values = ["A", "B", "C", "D", "E", "F", "G", "H"];
    let health_checks = ["hc0", "hc1", "hc2", "hc3", "hc4", "hc5", "hc6", "hc7"];
    let l = single_cell_lattice(&values, &health_checks);
    let records = vulcanize(&l, "Z1", "www.example.com", "A", 60, 8).unwrap();
    assert_eq!(records.len(), 64);
}

#[test]
fn s2_big_flat_tree() {
    let letters: Vec<String> = ('A'..='T').map(|c| c.to_string()).collect();
    let values: Vec<&str> = letters.iter().map(String::as_str).collect();
    let health_checks: Vec<String> = (0..20).map(|i| format!("hc{i}")).collect();
    let hcs: Vec<&str> = health_checks.iter().map(String::as_str).collect();
    let l = single_cell_lattice(&values, &hcs);
    let records = vulcanize(&l, "Z1", "www.example.com", "A", 60, 8).unwrap();
    assert_eq!(records.len(), 160);
}

#[test]
fn s3_two_dimensional_tree() {
    let mut l = Lattice::new(vec!["az".to_string(), "version".to_string()]).unwrap();
    let mut counter = 0u32;
    for az in ["us-east-1a", "us-west-2a"] {
        for version in ["1", "2"] {
            let endpoints: Vec<Endpoint> = (0..5)
                .map(|_| {
                    let v = format!("10.0.0.{counter}");
                    let hc = format!("hc{counter}");
                    counter += 1;
                    Endpoint::new(v.into_bytes(), vec![hc])
                })
                .collect();
            l.add_endpoints_for_sector(vec![az.to_string(), version.to_string()], endpoints)
                .unwrap();
        }
    }
    let records = vulcanize(&l, "Z1", "www.example.com", "A", 60, 8).unwrap();
    assert_eq!(records.len(), 485);
}

#[test]
fn s4_answer_set_alias_chain() {
    let set = AnswerSet::from_endpoints(vec![
        Endpoint::new(b"1.1.1.1".to_vec(), vec!["hcid3".to_string()]),
        Endpoint::new(b"2.2.2.2".to_vec(), vec!["hcid2".to_string()]),
        Endpoint::new(b"3.3.3.3".to_vec(), vec!["hcid1".to_string()]),
    ]);
    let records = set
        .to_records("Z123", "www.example.com", "A", 60)
        .unwrap();

    assert_eq!(records.len(), 3);
    assert_eq!(records[0].set_identifier, "leafnode");
    match &records[0].target {
        RecordTarget::Values { values, .. } => {
            assert_eq!(
                values,
                &vec![
                    "1.1.1.1".to_string(),
                    "2.2.2.2".to_string(),
                    "3.3.3.3".to_string()
                ]
            );
        }
        RecordTarget::Alias(_) => panic!("leaf must carry values"),
    }
    assert_eq!(records[2].name, "www.example.com");
    assert!(matches!(records[1].target, RecordTarget::Alias(_)));
    if let RecordTarget::Alias(target) = &records[2].target {
        assert_eq!(target.dns_name, records[1].name);
    }
}

#[test]
fn s5_lattice_failure_restriction() {
    let mut l = Lattice::new(vec!["az".to_string(), "version".to_string()]).unwrap();
    let mut counter = 0u32;
    for az in ["us-east-1a", "us-west-2a"] {
        for version in ["1", "2"] {
            let endpoints: Vec<Endpoint> = (0..5)
                .map(|_| {
                    let v = format!("10.0.0.{counter}");
                    counter += 1;
                    Endpoint::new(v.into_bytes(), vec![])
                })
                .collect();
            l.add_endpoints_for_sector(vec![az.to_string(), version.to_string()], endpoints)
                .unwrap();
        }
    }

    assert_eq!(l.endpoint_count(), 20);

    let after_az_failure = l.simulate_failure("az", "us-east-1a").unwrap();
    assert_eq!(after_az_failure.endpoint_count(), 10);

    let after_version_failure = after_az_failure.simulate_failure("version", "1").unwrap();
    assert_eq!(after_version_failure.endpoint_count(), 5);
}

#[test]
fn s6_searching_sharder_exhaustion() {
    let mut l = Lattice::new(vec!["cell".to_string()]).unwrap();
    let endpoints: Vec<Endpoint> = (0..5)
        .map(|i| Endpoint::new(format!("10.0.0.{i}").into_bytes(), vec![]))
        .collect();
    l.add_endpoints_for_sector(vec!["only".to_string()], endpoints)
        .unwrap();

    let mut sharder = StatefulSearchingSharder::new(4, 2, InMemoryFragmentLedger::new());
    sharder.shuffle_shard(&l).expect("first call should succeed");
    let second = sharder.shuffle_shard(&l);
    assert_eq!(second.unwrap_err(), ShardError::NoShardsAvailable);
    assert!(!sharder.ledger().is_empty());
}
