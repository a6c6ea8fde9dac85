//! Property-based tests for literal parsing and fallback resolution.

use proptest::prelude::*;
use keyskin::color::try_parse_color_str;
use keyskin::fallback::resolve;
use keyskin::{parse_color, Argb, ColorScheme, ConfigValue, FallbackChain};

// ============================================================================
// Strategies
// ============================================================================

fn hex_literal() -> impl Strategy<Value = String> {
    (prop_oneof![Just("#"), Just("0x"), Just("0X")], "[0-9a-fA-F]{1,9}")
        .prop_map(|(prefix, digits)| format!("{}{}", prefix, digits))
}

fn chain_strategy() -> impl Strategy<Value = Vec<(u8, u8)>> {
    prop::collection::vec((0u8..12, 0u8..12), 0..24)
}

fn key(n: u8) -> String {
    format!("k{}", n)
}

// ============================================================================
// Property tests
// ============================================================================

proptest! {
    /// Any string either parses or is rejected, without panicking.
    #[test]
    fn parser_is_total(literal in ".{0,16}") {
        let _ = try_parse_color_str(&literal);
    }

    /// Hex literals of every length are handled.
    #[test]
    fn hex_literals_never_panic(literal in hex_literal()) {
        let _ = try_parse_color_str(&literal);
    }

    /// Six hex digits are always an opaque color.
    #[test]
    fn six_digits_are_opaque(rgb in 0u32..0x0100_0000) {
        let color = try_parse_color_str(&format!("#{:06x}", rgb)).unwrap();
        prop_assert_eq!(color, Argb::from_u32(0xFF00_0000 | rgb));
    }

    /// Eight hex digits carry their own alpha.
    #[test]
    fn eight_digits_round_trip(argb in any::<u32>()) {
        let color = try_parse_color_str(&format!("#{:08X}", argb)).unwrap();
        prop_assert_eq!(color.to_u32(), argb);
    }

    /// Integer literals keep their low 32 bits.
    #[test]
    fn integers_truncate(value in any::<i64>()) {
        prop_assert_eq!(parse_color(&ConfigValue::Integer(value)), Some(Argb(value as i32)));
    }

    /// Anything with a dot is never a color.
    #[test]
    fn dotted_strings_are_not_colors(stem in "[a-z0-9]{0,8}", ext in "[a-z]{0,4}") {
        let literal = format!("{}.{}", stem, ext);
        prop_assert!(try_parse_color_str(&literal).is_err());
    }

    /// Resolution terminates on any link graph, cyclic or not.
    #[test]
    fn fallback_terminates(
        links in chain_strategy(),
        present in prop::collection::vec(0u8..12, 0..4),
        start in 0u8..12,
    ) {
        let chain: FallbackChain = links.iter().map(|(from, to)| (key(*from), key(*to))).collect();
        let scheme: ColorScheme = present
            .iter()
            .map(|n| (key(*n), ConfigValue::from("red")))
            .collect();

        let _ = resolve(&scheme, &chain, &key(start));
    }

    /// A key reachable without a cycle resolves to the first present key.
    #[test]
    fn fallback_follows_acyclic_chain(len in 1u8..10) {
        let chain: FallbackChain = (0..len).map(|i| (key(i), key(i + 1))).collect();
        let scheme: ColorScheme = std::iter::once((key(len), ConfigValue::from("blue"))).collect();

        prop_assert_eq!(resolve(&scheme, &chain, &key(0)), Some(&ConfigValue::from("blue")));
    }
}
