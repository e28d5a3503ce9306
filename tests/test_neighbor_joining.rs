use approx::assert_abs_diff_eq;
use njtree::error::NjError;
use njtree::joining::{NeighborJoining, NeighborJoiningBuilder, Symmetry};
use njtree::matrix::{DistanceMatrix, q_matrix};
use njtree::model::NodeKind;
use njtree::neighbor_join;
use std::collections::HashMap;

fn labels(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("{}", (b'A' + i as u8) as char)).collect()
}

/// Five taxa A-E with the textbook neighbor-joining distances.
fn wiki_matrix() -> DistanceMatrix {
    DistanceMatrix::new(
        labels(5),
        vec![
            vec![0.0, 5.0, 9.0, 9.0, 8.0],
            vec![5.0, 0.0, 10.0, 10.0, 9.0],
            vec![9.0, 10.0, 0.0, 8.0, 7.0],
            vec![9.0, 10.0, 8.0, 0.0, 3.0],
            vec![8.0, 9.0, 7.0, 3.0, 0.0],
        ],
    )
    .unwrap()
}

/// Symmetric matrix without many ties.
fn symmetric_matrix(n: usize) -> DistanceMatrix {
    DistanceMatrix::from_fn(labels(n), |i, j| ((i * j) % 7 + 2 * (i + j)) as f64 + 1.0).unwrap()
}

// ============= End-to-end =============

#[test]
fn test_wiki_example() {
    let outcome = NeighborJoining::new().run(wiki_matrix()).unwrap();
    let tree = &outcome.tree;

    assert_eq!(outcome.steps.len(), 3);

    let root = tree.root();
    assert_eq!(root.label(), "root");
    assert_eq!(root.children().len(), 2);
    for &child in root.children() {
        assert_eq!(tree[child].kind(), NodeKind::Internal);
    }

    let mut leaves = tree.leaf_labels();
    leaves.sort();
    assert_eq!(leaves, vec!["A", "B", "C", "D", "E"]);
}

#[test]
fn test_wiki_example_merge_order() {
    let outcome = NeighborJoining::new().run(wiki_matrix()).unwrap();
    let merged: Vec<_> = outcome.steps.iter().map(|s| s.merged_label.as_str()).collect();
    assert_eq!(merged, vec!["A_B", "C_A_B", "D_E"]);

    let first = &outcome.steps[0];
    assert_eq!(first.indices, (0, 1));
    assert_eq!(first.labels, ("A".to_string(), "B".to_string()));
    assert_eq!(first.size_before, 5);
    assert_abs_diff_eq!(first.q_score, -50.0, epsilon = 1e-9);
    assert_abs_diff_eq!(first.pair_distance, 5.0, epsilon = 1e-9);
}

#[test]
fn test_wiki_example_traversal() {
    let tree = neighbor_join(wiki_matrix()).unwrap();
    let order: Vec<_> = tree.traverse().map(|(n, d)| (n.label(), d)).collect();
    assert_eq!(
        order,
        vec![
            ("root", 0),
            ("C_A_B", 1),
            ("C", 2),
            ("A_B", 2),
            ("A", 3),
            ("B", 3),
            ("D_E", 1),
            ("D", 2),
            ("E", 2),
        ]
    );
    assert_eq!(tree.depth(), 3);
}

#[test]
fn test_wiki_example_render() {
    let tree = neighbor_join(wiki_matrix()).unwrap();
    let expected = "root\n___C_A_B\n______C\n______A_B\n_________A\n_________B\n___D_E\n______D\n______E\n";
    assert_eq!(tree.render(), expected);
}

// ============= Invariants =============

#[test]
fn test_index_alignment_after_every_step() {
    let mut reduction = NeighborJoining::new().reduction(symmetric_matrix(8)).unwrap();

    loop {
        let matrix = reduction.matrix();
        let live = reduction.live_nodes();
        assert_eq!(matrix.size(), live.len());
        for (i, &node) in live.iter().enumerate() {
            assert_eq!(matrix.label(i), reduction.tree()[node].label());
            assert!(!reduction.tree()[node].has_parent());
        }

        if reduction.step().unwrap().is_none() {
            break;
        }
    }
    assert_eq!(reduction.matrix().size(), 2);
}

#[test]
fn test_node_conservation() {
    for n in 2..=9 {
        let tree = neighbor_join(symmetric_matrix(n)).unwrap();
        assert_eq!(tree.num_nodes(), 2 * n - 1, "n = {n}");
        assert_eq!(tree.num_leaves(), n);
        assert_eq!(tree.num_internal(), n - 2);
        assert!(tree.detached().is_empty());
        assert_eq!(tree.traverse().count(), 2 * n - 1);
        assert!(tree.is_valid());
    }
}

#[test]
fn test_termination_step_count() {
    for n in 1..=10 {
        let outcome = NeighborJoining::new().run(symmetric_matrix(n)).unwrap();
        assert_eq!(outcome.steps.len(), n.saturating_sub(2), "n = {n}");
        for (i, step) in outcome.steps.iter().enumerate() {
            assert_eq!(step.step, i + 1);
            assert_eq!(step.size_before, n - i);
        }
    }
}

#[test]
fn test_q_matrix_symmetric_for_symmetric_input() {
    let matrix = symmetric_matrix(7);
    let q = q_matrix(&matrix);
    for i in 0..7 {
        for j in 0..7 {
            if i != j {
                assert_abs_diff_eq!(q.get(i, j), q.get(j, i), epsilon = 1e-9);
            }
        }
    }
}

#[test]
fn test_reduced_distances() {
    let mut reduction = NeighborJoining::new().reduction(symmetric_matrix(7)).unwrap();

    loop {
        let before = reduction.matrix().clone();
        let index_of: HashMap<String, usize> = before
            .labels()
            .enumerate()
            .map(|(i, l)| (l.to_string(), i))
            .collect();

        let Some(step) = reduction.step().unwrap() else {
            break;
        };
        let (a, b) = step.indices;
        let after = reduction.matrix();
        let merged = after.size() - 1;
        assert_eq!(after.label(merged), step.merged_label);
        assert_eq!(after.get(merged, merged), 0.0);

        for k in 0..merged {
            let old_k = index_of[after.label(k)];
            assert_ne!(old_k, a);
            assert_ne!(old_k, b);
            let expected = (before.get(a, old_k) + before.get(b, old_k) - before.get(a, b)) / 2.0;
            assert_abs_diff_eq!(after.get(merged, k), expected, epsilon = 1e-9);
            assert_abs_diff_eq!(after.get(k, merged), expected, epsilon = 1e-9);
        }
    }
}

#[test]
fn test_surviving_distances_unchanged() {
    let mut reduction = NeighborJoining::new().reduction(wiki_matrix()).unwrap();
    reduction.step().unwrap();
    let matrix = reduction.matrix();
    assert_eq!(matrix.labels().collect::<Vec<_>>(), vec!["C", "D", "E", "A_B"]);
    assert_eq!(matrix.get(0, 1), 8.0);
    assert_eq!(matrix.get(1, 2), 3.0);
    assert_eq!(matrix.get(3, 0), 7.0);
    assert_eq!(matrix.get(3, 2), 6.0);
}

#[test]
fn test_determinism() {
    let first = NeighborJoining::new().run(symmetric_matrix(9)).unwrap();
    let second = NeighborJoining::new().run(symmetric_matrix(9)).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.tree.render(), second.tree.render());
}

#[test]
fn test_traversal_is_restartable() {
    let tree = neighbor_join(symmetric_matrix(6)).unwrap();
    let once: Vec<_> = tree.traverse().map(|(n, d)| (n.index(), d)).collect();
    let twice: Vec<_> = tree.traverse().map(|(n, d)| (n.index(), d)).collect();
    assert_eq!(once, twice);
}

#[test]
fn test_overflowing_scores_abort_reduction() {
    // Finite cells whose row sums overflow; C-D is the true closest pair
    let matrix = DistanceMatrix::from_fn(labels(5), |i, j| {
        if (i, j) == (2, 3) || (i, j) == (3, 2) { 1.0 } else { 1.5e308 }
    })
    .unwrap();

    let mut reduction = NeighborJoining::new().reduction(matrix.clone()).unwrap();
    assert!(matches!(
        reduction.step(),
        Err(NjError::NonFiniteDistance { step: 1, .. })
    ));
    assert_eq!(reduction.steps_taken(), 0);
    assert_eq!(reduction.matrix(), &matrix);
    assert_eq!(reduction.tree().num_internal(), 0);

    assert!(matches!(
        neighbor_join(matrix),
        Err(NjError::NonFiniteDistance { .. })
    ));
}

#[test]
fn test_first_non_finite_skips_diagonal() {
    let mut matrix = symmetric_matrix(3);
    assert_eq!(matrix.first_non_finite(), None);
    matrix.set(1, 1, f64::NAN);
    assert_eq!(matrix.first_non_finite(), None);
    matrix.set(2, 0, f64::INFINITY);
    assert_eq!(matrix.first_non_finite(), Some((2, 0)));
}

// ============= Small inputs =============

#[test]
fn test_two_entries_no_merge() {
    let matrix = DistanceMatrix::new(labels(2), vec![vec![0.0, 4.0], vec![4.0, 0.0]]).unwrap();
    let outcome = NeighborJoining::new().run(matrix).unwrap();

    assert!(outcome.steps.is_empty());
    let tree = &outcome.tree;
    let children: Vec<_> = tree.root().children().iter().map(|&c| &tree[c]).collect();
    assert_eq!(children.len(), 2);
    assert!(children.iter().all(|c| c.is_leaf()));
    assert_eq!(children[0].label(), "A");
    assert_eq!(children[1].label(), "B");
}

#[test]
fn test_single_entry_attached_to_root() {
    let matrix = DistanceMatrix::new(labels(1), vec![vec![0.0]]).unwrap();
    let tree = neighbor_join(matrix).unwrap();
    assert_eq!(tree.num_nodes(), 2);
    assert_eq!(tree.leaf_labels(), vec!["A"]);
    assert!(tree.is_valid());
}

#[test]
fn test_emptied_matrix_rejected() {
    let mut matrix = DistanceMatrix::new(labels(1), vec![vec![0.0]]).unwrap();
    matrix.remove_entry(0).unwrap();
    assert_eq!(NeighborJoining::new().run(matrix), Err(NjError::EmptyMatrix));
}

// ============= Configuration =============

#[test]
fn test_custom_root_and_separator() {
    let outcome = NeighborJoiningBuilder::new()
        .with_root_label("all")
        .with_label_separator("+")
        .build()
        .run(wiki_matrix())
        .unwrap();
    assert_eq!(outcome.tree.root().label(), "all");
    assert_eq!(outcome.steps[0].merged_label, "A+B");
}

#[test]
fn test_max_entries_cap() {
    let nj = NeighborJoining::builder().with_max_entries(4).build();
    assert_eq!(
        nj.run(wiki_matrix()),
        Err(NjError::TooManyEntries { size: 5, max: 4 })
    );
    assert!(nj.run(symmetric_matrix(4)).is_ok());
}

#[test]
fn test_symmetry_handling() {
    let mut matrix = wiki_matrix();
    matrix.set(3, 1, 11.0);

    let enforce = NeighborJoining::builder().with_symmetry(Symmetry::Enforce).build();
    assert_eq!(
        enforce.run(matrix.clone()),
        Err(NjError::Asymmetric {
            row: 1,
            col: 3,
            forward: 10.0,
            backward: 11.0
        })
    );

    let warn = NeighborJoining::builder().with_symmetry(Symmetry::Warn).build();
    assert!(warn.run(matrix.clone()).is_ok());
    assert!(NeighborJoining::new().run(matrix).is_ok());
}
