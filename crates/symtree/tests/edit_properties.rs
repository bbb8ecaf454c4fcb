mod common;

use common::{path, rule, sym};
use proptest::prelude::*;
use symtree::{delete_at, insert_at, insert_at_all};
use symtree_expr::Expr;
use symtree_position::{get, Step};
use symtree_random::{RandomExpr, RandomExprOptions, RootNode};

fn int_list(n: usize) -> Expr {
    Expr::list((0..n as i64).map(Expr::int).collect())
}

/// Value that can be inserted into `target`.
fn probe_for(target: &Expr) -> Expr {
    if target.is_association() {
        rule("__probe", Expr::int(0))
    } else {
        sym("probe")
    }
}

/// 1-based root argument a path passes through.
fn first_arg(tree: &Expr, steps: &[Step]) -> Option<usize> {
    match steps.first()? {
        Step::Index(i) => usize::try_from(*i).ok(),
        Step::Key(key) => tree.rule_position(key),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn single_insertion_places_value((n, k) in (0usize..8).prop_flat_map(|n| (Just(n), 1..=n + 1))) {
        let tree = int_list(n);
        let out = insert_at(&tree, &sym("v"), &path(&[k as i64])).unwrap();
        prop_assert_eq!(out.len(), n + 1);
        prop_assert_eq!(out.arg(k), Some(&sym("v")));
        let rest: Vec<Expr> = out
            .args()
            .iter()
            .enumerate()
            .filter(|(i, _)| *i + 1 != k)
            .map(|(_, e)| e.clone())
            .collect();
        prop_assert_eq!(rest.as_slice(), tree.args());
    }

    #[test]
    fn negative_index_matches_positive((n, k) in (1usize..8).prop_flat_map(|n| (Just(n), 1..=n))) {
        let tree = int_list(n);
        let negative = insert_at(&tree, &sym("v"), &path(&[-(k as i64)])).unwrap();
        let positive = insert_at(&tree, &sym("v"), &path(&[(n - k + 2) as i64])).unwrap();
        prop_assert_eq!(negative, positive);
    }

    #[test]
    fn repeated_position_inserts_consecutively((n, k) in (0usize..6).prop_flat_map(|n| (Just(n), 1..=n + 1))) {
        let tree = int_list(n);
        let at = vec![Step::Index(k as i64)];
        let out = insert_at_all(&tree, &sym("v"), &[at.clone(), at]).unwrap();
        prop_assert_eq!(out.arg(k), Some(&sym("v")));
        prop_assert_eq!(out.arg(k + 1), Some(&sym("v")));
        prop_assert_eq!(out.len(), n + 2);
    }

    #[test]
    fn delete_undoes_insert_on_random_trees(seed in any::<u64>(), root in 0u8..3) {
        let root = match root {
            0 => RootNode::List,
            1 => RootNode::Composite,
            _ => RootNode::Association,
        };
        let (tree, positions) = RandomExpr::generate_with_positions(RandomExprOptions {
            root,
            node_count: 20,
            seed: Some(seed),
            ..Default::default()
        });
        for container in positions {
            let target = get(&tree, &container).unwrap();
            let mut at = container.clone();
            at.push(Step::Index(1));

            let inserted = insert_at(&tree, &probe_for(target), &at).unwrap();
            prop_assert_eq!(get(&inserted, &container).unwrap().len(), target.len() + 1);
            let restored = delete_at(&inserted, &at).unwrap();
            prop_assert_eq!(&restored, &tree);

            let touched = first_arg(&tree, &container);
            for (i, child) in tree.args().iter().enumerate() {
                if touched != Some(i + 1) {
                    prop_assert!(Expr::ptr_eq(restored.arg(i + 1).unwrap(), child));
                }
            }
        }
    }
}
