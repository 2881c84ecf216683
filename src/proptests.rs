use super::*;

use proptest::prelude::*;
use proptest_derive::Arbitrary;
use std::collections::BTreeMap;

/// Independent recursive check of ordering, stored heights and balance.
fn validate_tree(t: &AvlTree) {
    let issues = t.verify_integrity();
    assert!(issues.is_empty(), "invariant violations: {issues:?}");
    let stats = t.stats();
    assert_eq!(stats.count, t.len(), "traversal count must match len()");
    assert_eq!(stats.balance_quality, 100.0);

    // Height of an AVL tree with n nodes is below 1.45 * log2(n + 2).
    let bound = 1.45 * ((t.len() + 2) as f64).log2();
    assert!(
        f64::from(t.height()) < bound,
        "height {} too large for {} nodes",
        t.height(),
        t.len()
    );
}

fn record(id: ItemId, quantity: i64) -> Record {
    Record::new(id, format!("item-{id}"), "cat", 1.5, quantity)
}

// Small key space so inserts, updates and removes keep colliding.
fn key_strategy() -> impl Strategy<Value = ItemId> {
    -64i64..64
}

#[derive(Clone, Debug, Arbitrary)]
enum Op {
    #[proptest(weight = 5)]
    Insert(
        #[proptest(strategy = "key_strategy()")] ItemId,
        #[proptest(strategy = "0i64..100")] i64,
    ),
    #[proptest(weight = 3)]
    Remove(#[proptest(strategy = "key_strategy()")] ItemId),
    #[proptest(weight = 1)]
    Update(
        #[proptest(strategy = "key_strategy()")] ItemId,
        #[proptest(strategy = "0i64..100")] i64,
    ),
    #[proptest(weight = 1)]
    Get(#[proptest(strategy = "key_strategy()")] ItemId),
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        max_shrink_iters: 50_000,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_equivalence(ops in prop::collection::vec(any::<Op>(), 0..=1000)) {
        let mut t = AvlTree::new();
        let mut m: BTreeMap<ItemId, Record> = BTreeMap::new();

        for op in ops {
            match op {
                Op::Insert(id, qty) => {
                    let r = record(id, qty);
                    prop_assert_eq!(t.insert(r.clone()), m.insert(id, r));
                }
                Op::Remove(id) => {
                    let height = t.height();
                    let removed = t.remove(id);
                    prop_assert_eq!(&removed, &m.remove(&id));
                    prop_assert!(t.height() <= height);
                    if removed.is_some() {
                        prop_assert!(t.get(id).is_none());
                    }
                }
                Op::Update(id, qty) => {
                    let r = record(id, qty);
                    let existed = match m.get_mut(&id) {
                        Some(slot) => {
                            *slot = r.clone();
                            true
                        }
                        None => false,
                    };
                    prop_assert_eq!(t.update(r), existed);
                }
                Op::Get(id) => {
                    prop_assert_eq!(t.get(id), m.get(&id));
                }
            }

            prop_assert_eq!(t.len(), m.len());
        }

        validate_tree(&t);
        let got: Vec<&Record> = t.iter().collect();
        let expected: Vec<&Record> = m.values().collect();
        prop_assert_eq!(got, expected);
    }

    #[test]
    fn prop_range_matches_btreemap(
        ids in prop::collection::btree_set(-500i64..500, 0..200),
        lo in -550i64..550,
        len in 0i64..300,
    ) {
        let t: AvlTree = ids.iter().map(|&id| record(id, 1)).collect();
        let m: BTreeMap<ItemId, ()> = ids.iter().map(|&id| (id, ())).collect();
        let hi = lo + len;

        let got: Vec<ItemId> = t.range(lo..hi).map(|r| r.id).collect();
        let expected: Vec<ItemId> = m.range(lo..hi).map(|(k, _)| *k).collect();
        prop_assert_eq!(got, expected);

        let got: Vec<ItemId> = t.range(lo..=hi).map(|r| r.id).collect();
        let expected: Vec<ItemId> = m.range(lo..=hi).map(|(k, _)| *k).collect();
        prop_assert_eq!(got, expected);
    }

    #[test]
    fn prop_filters_match_linear_scan(
        rows in prop::collection::vec((0i64..1000, 0i64..20, 0usize..3), 0..300),
        threshold in 0i64..20,
    ) {
        const CATEGORIES: [&str; 3] = ["food", "tools", "toys"];
        let mut t = AvlTree::new();
        let mut m: BTreeMap<ItemId, Record> = BTreeMap::new();
        for (id, qty, cat) in rows {
            let r = Record::new(id, format!("name{}", id % 7), CATEGORIES[cat], 0.5, qty);
            t.insert(r.clone());
            m.insert(id, r);
        }

        let low: Vec<ItemId> = t.low_stock(threshold).map(|r| r.id).collect();
        let expected: Vec<ItemId> = m.values().filter(|r| r.quantity <= threshold).map(|r| r.id).collect();
        prop_assert_eq!(low, expected);

        let tools: Vec<ItemId> = t.search_by_category("tools").map(|r| r.id).collect();
        let expected: Vec<ItemId> = m.values().filter(|r| r.category == "tools").map(|r| r.id).collect();
        prop_assert_eq!(tools, expected);

        let named: Vec<ItemId> = t.search_by_name("name3").map(|r| r.id).collect();
        let expected: Vec<ItemId> = m.values().filter(|r| r.name.contains("name3")).map(|r| r.id).collect();
        prop_assert_eq!(named, expected);

        let total: f64 = m.values().map(|r| r.price * r.quantity as f64).sum();
        prop_assert!((t.total_value() - total).abs() < 1e-6);
    }
}

/// Calls `f` once per ordering of `keys` (Heap's algorithm, iterative).
fn for_each_permutation(keys: &[ItemId], mut f: impl FnMut(&[ItemId])) {
    let mut perm = keys.to_vec();
    let mut swaps = vec![0usize; perm.len()];
    f(&perm);

    let mut i = 1;
    while i < perm.len() {
        if swaps[i] < i {
            let j = if i % 2 == 0 { 0 } else { swaps[i] };
            perm.swap(j, i);
            f(&perm);
            swaps[i] += 1;
            i = 1;
        } else {
            swaps[i] = 0;
            i += 1;
        }
    }
}

#[test]
fn permutations_are_distinct_and_complete() {
    let mut seen = std::collections::BTreeSet::new();
    for_each_permutation(&[1, 2, 3, 4, 5], |perm| {
        let mut sorted = perm.to_vec();
        sorted.sort_unstable();
        assert_eq!(sorted, [1, 2, 3, 4, 5]);
        assert!(seen.insert(perm.to_vec()), "duplicate ordering {perm:?}");
    });
    assert_eq!(seen.len(), 120);

    let mut calls = 0;
    for_each_permutation(&[], |perm| {
        assert!(perm.is_empty());
        calls += 1;
    });
    assert_eq!(calls, 1);
}

#[test]
fn exhaustive_insert_order_small_set() {
    let keys: Vec<ItemId> = vec![1, 2, 3, 4, 5, 6, 7];

    for_each_permutation(&keys, |perm| {
        let mut t = AvlTree::new();
        for &k in perm {
            assert_eq!(t.insert(record(k, 0)), None);
            validate_tree(&t);
        }
        let got: Vec<ItemId> = t.iter().map(|r| r.id).collect();
        assert_eq!(got, keys);
        assert!(t.height() <= 4);
    });
}

#[test]
fn exhaustive_remove_order_small_set() {
    let keys: Vec<ItemId> = vec![10, 20, 30, 40, 50, 60, 70];

    // Insert in a fixed order, then remove in all permutations.
    let base: AvlTree = keys.iter().map(|&k| record(k, 0)).collect();

    for_each_permutation(&keys, |perm| {
        let mut t = base.clone();
        let mut remaining = keys.clone();

        for &k in perm {
            assert_eq!(t.remove(k).map(|r| r.id), Some(k));
            remaining.retain(|&x| x != k);
            validate_tree(&t);
            let got: Vec<ItemId> = t.iter().map(|r| r.id).collect();
            assert_eq!(got, remaining);
        }
        assert!(t.is_empty());
        assert!(t.root().is_none());
    });
}
