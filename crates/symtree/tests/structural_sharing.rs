mod common;

use std::thread;

use common::{assert_shared, path, paths, rule, sym, symbols};
use symtree::{delete_at_all, insert_at, insert_at_all, EditOptions, Editor};
use symtree_expr::Expr;
use symtree_position::Step;

fn sample() -> (Expr, Expr, Expr) {
    let left = Expr::list(vec![symbols(&["a", "b"]), symbols(&["c"])]);
    let right = Expr::composite("f", vec![symbols(&["d"]), Expr::int(1)]);
    let tree = Expr::list(vec![left.clone(), right.clone()]);
    (tree, left, right)
}

#[test]
fn untouched_branches_keep_identity() {
    let (tree, left, right) = sample();
    let out = insert_at(&tree, &sym("v"), &path(&[1, 1, 1])).unwrap();
    assert_eq!(out.to_string(), "{{{v, a, b}, {c}}, f[{d}, 1]}");
    assert_shared(out.arg(2).unwrap(), &right);
    assert_shared(
        out.arg(1).unwrap().arg(2).unwrap(),
        left.arg(2).unwrap(),
    );
    assert!(!Expr::ptr_eq(out.arg(1).unwrap(), &left));
}

#[test]
fn inserted_value_is_shared_not_copied() {
    let (tree, _, _) = sample();
    let value = symbols(&["big", "value"]);
    let options = EditOptions {
        splice_lists: false,
        ..Default::default()
    };
    let mut editor = Editor::insert(&tree, &value).with_options(options);
    editor.apply(&path(&[2])).unwrap();
    editor.apply(&path(&[2, 1])).unwrap();
    let out = editor.finish();
    assert_shared(out.arg(2).unwrap(), &value);
    assert_shared(out.arg(3).unwrap().arg(1).unwrap(), &value);
}

#[test]
fn aliased_subtree_is_drafted_per_site() {
    let shared = symbols(&["x"]);
    let tree = Expr::list(vec![shared.clone(), shared.clone()]);
    let v = sym("v");
    let mut editor = Editor::insert(&tree, &v);
    editor.apply(&path(&[1, 1])).unwrap();
    let out = editor.finish();
    assert_eq!(out.to_string(), "{{v, x}, {x}}");
    assert_shared(out.arg(2).unwrap(), &shared);
}

#[test]
fn batch_touches_each_node_once() {
    let (tree, _, right) = sample();
    let mut editor = Editor::delete(&tree);
    let positions: [&[i64]; 3] = [&[1, 1, 1], &[1, 1, 2], &[1, 2, 1]];
    for p in positions {
        editor.apply(&path(p)).unwrap();
    }
    // Root, left and its two children.
    assert_eq!(editor.draft_count(), 4);
    let out = editor.finish();
    assert_eq!(out.to_string(), "{{{}, {}}, f[{d}, 1]}");
    assert_shared(out.arg(2).unwrap(), &right);
}

#[test]
fn association_rules_off_the_path_are_shared() {
    let deep = symbols(&["q"]);
    let tree = Expr::association(vec![
        rule("a", symbols(&["p"])),
        rule("b", deep.clone()),
    ])
    .unwrap();
    let out = insert_at(&tree, &sym("v"), &[Step::key("a"), Step::Index(1)]).unwrap();
    assert_shared(out.arg(2).unwrap(), tree.arg(2).unwrap());
    assert_shared(out.value_at(2).unwrap(), &deep);
}

#[test]
fn concurrent_edits_over_one_tree() {
    let (tree, _, right) = sample();
    thread::scope(|scope| {
        let handles: Vec<_> = (1..=3)
            .map(|k| {
                let tree = &tree;
                scope.spawn(move || insert_at_all(tree, &Expr::int(k), &paths(&[&[1, k], &[1, k]])))
            })
            .collect();
        for handle in handles {
            let out = handle.join().unwrap().unwrap();
            assert_eq!(out.arg(1).unwrap().len(), 4);
            assert_shared(out.arg(2).unwrap(), &right);
        }
    });
    let cleared = delete_at_all(&tree, &paths(&[&[1], &[2]])).unwrap();
    assert_eq!(cleared.to_string(), "{}");
    assert_eq!(tree.to_string(), "{{{a, b}, {c}}, f[{d}, 1]}");
}
