use envstack::domain::models::{Layer, RawMapping};
use envstack::services::merge;
use proptest::prelude::*;

fn mapping() -> impl Strategy<Value = RawMapping> {
    prop::collection::btree_map("[A-E]", "[a-z0-9]{0,4}", 0..5)
}

proptest! {
    /// Property: the highest layer that defines a key supplies its value
    #[test]
    fn prop_highest_layer_wins(
        default in mapping(),
        primary in mapping(),
        local in mapping(),
        environment in mapping(),
    ) {
        let merged = merge(&default, &primary, &local, &environment);

        for (key, value, layer) in merged.iter() {
            let expected = [
                (Layer::Environment, &environment),
                (Layer::Local, &local),
                (Layer::Primary, &primary),
                (Layer::Default, &default),
            ]
            .into_iter()
            .find_map(|(layer, source)| source.get(key).map(|v| (layer, v.as_str())));

            prop_assert_eq!(Some((layer, value)), expected);
        }
    }

    /// Property: the merged keys are exactly the union of the file keys
    #[test]
    fn prop_keys_are_file_union(
        default in mapping(),
        primary in mapping(),
        local in mapping(),
        environment in mapping(),
    ) {
        let merged = merge(&default, &primary, &local, &environment);

        let mut expected: Vec<&str> = default
            .keys()
            .chain(primary.keys())
            .chain(local.keys())
            .map(String::as_str)
            .collect();
        expected.sort_unstable();
        expected.dedup();

        prop_assert_eq!(merged.keys().collect::<Vec<_>>(), expected);
    }

    /// Property: merging is deterministic
    #[test]
    fn prop_merge_is_deterministic(
        default in mapping(),
        primary in mapping(),
        environment in mapping(),
    ) {
        let local = RawMapping::new();
        prop_assert_eq!(
            merge(&default, &primary, &local, &environment),
            merge(&default, &primary, &local, &environment)
        );
    }
}
