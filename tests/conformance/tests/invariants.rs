//! Quantified invariants from the testable-properties section, run
//! against the public API.

use faultmesh_core::endpoint::Endpoint;
use faultmesh_core::lattice::Lattice;
use faultmesh_core::sublist::sublists;
use faultmesh_plan::AnswerSet;

fn binomial(m: u64, k: u64) -> u64 {
    if k > m {
        return 0;
    }
    let k = k.min(m - k);
    let mut result = 1u64;
    for i in 0..k {
        result = result * (m - i) / (i + 1);
    }
    result
}

#[test]
fn invariant_1_lattice_failure_restriction() {
    let mut l = Lattice::new(vec!["az".to_string(), "version".to_string()]).unwrap();
    let mut counter = 0u32;
    let mut per_coord_sizes = std::collections::HashMap::new();
    for az in ["us-east-1a", "us-west-2a", "eu-west-1a"] {
        for version in ["1", "2"] {
            let n = 3;
            let endpoints: Vec<Endpoint> = (0..n)
                .map(|_| {
                    let v = format!("10.0.0.{counter}");
                    counter += 1;
                    Endpoint::new(v.into_bytes(), vec![])
                })
                .collect();
            per_coord_sizes.insert((az, version), n);
            l.add_endpoints_for_sector(vec![az.to_string(), version.to_string()], endpoints)
                .unwrap();
        }
    }

    let total = l.endpoint_count();

    for (dim, value) in [("az", "us-east-1a"), ("version", "1")] {
        let restricted = l.simulate_failure(dim, value).unwrap();
        let removed: usize = per_coord_sizes
            .iter()
            .filter(|((az, version), _)| (dim == "az" && *az == value) || (dim == "version" && *version == value))
            .map(|(_, n)| n)
            .sum();
        assert_eq!(restricted.endpoint_count(), total - removed);

        let dim_index = if dim == "az" { 0 } else { 1 };
        for coord in restricted.get_all_coordinates() {
            assert_ne!(coord[dim_index], value);
        }
    }
}

#[test]
fn invariant_2_enumerator_count_and_order() {
    for m in 0..7u64 {
        let items: Vec<u64> = (0..m).collect();
        for k in 0..=m {
            let results: Vec<Vec<&u64>> = sublists(&items, k as usize).unwrap().collect();
            assert_eq!(results.len() as u64, binomial(m, k));
            for s in &results {
                assert_eq!(s.len() as u64, k);
            }
            // Strict lex-by-index order: recover index tuples and check monotonicity.
            let mut last_indices: Option<Vec<usize>> = None;
            for s in &results {
                let indices: Vec<usize> = s
                    .iter()
                    .map(|&&v| items.iter().position(|x| *x == v).unwrap())
                    .collect();
                if let Some(prev) = &last_indices {
                    assert!(prev < &indices, "sublists must be strictly increasing by index tuple");
                }
                last_indices = Some(indices);
            }
        }
    }
}

#[test]
fn invariant_3_answer_set_uniqueness_and_sorted_leaf_values() {
    let mut set = AnswerSet::new();
    assert!(set.insert(Endpoint::new(b"3.3.3.3".to_vec(), vec![])));
    assert!(set.insert(Endpoint::new(b"1.1.1.1".to_vec(), vec![])));
    assert!(!set.insert(Endpoint::new(b"1.1.1.1".to_vec(), vec!["ignored-hc".to_string()])));
    assert_eq!(set.len(), 2);

    let records = set.to_records("Z1", "n.example.com", "A", 30).unwrap();
    match &records[0].target {
        faultmesh_plan::RecordTarget::Values { values, .. } => {
            let mut sorted = values.clone();
            sorted.sort();
            assert_eq!(values, &sorted, "leaf record-values must be ascending");
        }
        faultmesh_plan::RecordTarget::Alias(_) => panic!("expected values payload"),
    }
}

#[test]
fn invariant_4_chain_length_is_max_one_h() {
    for h in 0..5usize {
        let mut endpoints = vec![Endpoint::new(b"0.0.0.0".to_vec(), vec![])];
        for i in 0..h {
            endpoints.push(Endpoint::new(
                format!("1.0.0.{i}").into_bytes(),
                vec![format!("hc{i}")],
            ));
        }
        let set = AnswerSet::from_endpoints(endpoints);
        let records = set.to_records("Z1", "n.example.com", "A", 30).unwrap();
        assert_eq!(records.len(), h.max(1));
        assert_eq!(records.last().unwrap().name, "n.example.com");
    }
}
