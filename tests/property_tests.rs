use hn_search_tui::config::AppConfig;
use hn_search_tui::internal::models::Hit;
use hn_search_tui::internal::results::ResultsCache;
use hn_search_tui::internal::sort::{SortKey, TableSort, sorted_hits};
use proptest::prelude::*;

fn arb_hit() -> impl Strategy<Value = Hit> {
    (
        "[a-z0-9]{1,8}",
        "[a-zA-Z0-9 ]{0,30}",
        "[a-z]{1,12}",
        0u32..10_000,
        0u32..10_000,
    )
        .prop_map(|(id, title, author, num_comments, points)| Hit {
            id,
            title,
            author,
            num_comments,
            points,
            ..Hit::default()
        })
}

fn arb_sort_key() -> impl Strategy<Value = SortKey> {
    prop_oneof![
        Just(SortKey::None),
        Just(SortKey::Title),
        Just(SortKey::Author),
        Just(SortKey::Comments),
        Just(SortKey::Points),
    ]
}

proptest! {
    #[test]
    fn test_sort_preserves_input_and_length(
        hits in prop::collection::vec(arb_hit(), 0..50),
        key in arb_sort_key(),
    ) {
        let before = hits.clone();
        let sorted = sorted_hits(key, &hits);

        // Purity: the input list still reflects pre-sort order.
        prop_assert_eq!(&hits, &before);
        prop_assert_eq!(sorted.len(), hits.len());

        // Same multiset of ids, nothing lost or invented.
        let mut original_ids: Vec<&str> = hits.iter().map(|h| h.id.as_str()).collect();
        let mut sorted_ids: Vec<&str> = sorted.iter().map(|h| h.id.as_str()).collect();
        original_ids.sort_unstable();
        sorted_ids.sort_unstable();
        prop_assert_eq!(original_ids, sorted_ids);
    }

    #[test]
    fn test_double_select_is_reverse_of_single(
        hits in prop::collection::vec(arb_hit(), 0..50),
        key in arb_sort_key(),
    ) {
        let mut once = TableSort::default();
        once.select(key);
        let single = once.apply(&hits);

        let mut twice = TableSort::default();
        twice.select(key);
        twice.select(key);
        let double = twice.apply(&hits);

        let mut expected = single;
        expected.reverse();
        prop_assert_eq!(double, expected);
    }

    #[test]
    fn test_merge_then_dismiss_keeps_remaining_order(
        first in prop::collection::vec(arb_hit(), 1..20),
        second in prop::collection::vec(arb_hit(), 0..20),
        pick in 0usize..20,
    ) {
        let mut cache = ResultsCache::new();
        cache.merge_page("q", first.clone(), 0);
        cache.merge_page("q", second.clone(), 1);

        let combined: Vec<Hit> = first.iter().chain(second.iter()).cloned().collect();
        prop_assert_eq!(&cache.get("q").unwrap().hits, &combined);

        let index = pick % combined.len();
        let victim = combined[index].id.clone();
        cache.dismiss("q", &victim);

        let remaining = &cache.get("q").unwrap().hits;
        prop_assert_eq!(remaining.len(), combined.len() - 1);

        // Removing the first occurrence keeps everything else in order.
        let mut expected = combined.clone();
        let pos = expected.iter().position(|h| h.id == victim).unwrap();
        expected.remove(pos);
        prop_assert_eq!(remaining, &expected);
    }

    #[test]
    fn test_config_parsing_resilience(s in "\\PC*") {
        // Fuzz the config loader with random strings; it may error but must
        // not panic.
        let _ = ron::from_str::<AppConfig>(&s);
    }
}
