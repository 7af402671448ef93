//! Property-based tests for filter rule precedence
//!
//! Validates ordering invariants:
//! - A blacklisted code is never admitted
//! - Strict whitelist mode admits nothing outside the whitelist
//! - Permissive whitelist hits bypass every category check
//! - Empty slots and non-block items are never admitted

use proptest::prelude::*;
use texbuild_core::{
    evaluate, is_allowed, AllowReason, DenyReason, FilterSettings, ItemDescriptor, MaterialClass,
};

fn material() -> impl Strategy<Value = MaterialClass> {
    prop_oneof![
        Just(MaterialClass::None),
        Just(MaterialClass::Plant),
        Just(MaterialClass::Liquid),
        Just(MaterialClass::Other),
    ]
}

fn item() -> impl Strategy<Value = ItemDescriptor> {
    (
        "[a-z]{1,8}",
        "[a-z\\-]{0,16}",
        any::<bool>(),
        any::<bool>(),
        material(),
        prop::option::of("[A-Za-z]{1,12}"),
    )
        .prop_map(|(namespace, path, has_nutrition, is_meal, material, entity_class)| {
            ItemDescriptor {
                code: format!("{namespace}:{path}").into(),
                is_block: true,
                has_nutrition,
                is_meal,
                material,
                entity_class,
            }
        })
}

fn settings() -> impl Strategy<Value = FilterSettings> {
    prop::array::uniform6(any::<bool>()).prop_map(|flags| FilterSettings {
        allow_food: flags[0],
        allow_plants: flags[1],
        allow_block_entities: flags[2],
        allow_liquids: flags[3],
        allow_clay: flags[4],
        whitelist_only: flags[5],
        ..FilterSettings::default()
    })
}

proptest! {
    /// Property: An exact blacklist entry always wins
    #[test]
    fn blacklisted_code_is_never_allowed(item in item(), mut settings in settings()) {
        let code = item.code.to_string();
        settings.set_blacklist(&code);
        settings.set_whitelist(&format!("{code}, *"));

        prop_assert_eq!(
            evaluate(Some(&item), &settings),
            texbuild_core::Verdict::Deny(DenyReason::Blacklisted)
        );
    }

    /// Property: Strict mode only admits whitelisted codes
    #[test]
    fn strict_whitelist_is_sole_criterion(
        item in item(),
        mut settings in settings(),
        listed in "[a-z]{1,8}:[a-z\\-]{0,16}",
    ) {
        settings.whitelist_only = true;
        settings.set_whitelist(&listed);

        let allowed = is_allowed(Some(&item), &settings);
        prop_assert_eq!(allowed, item.code.to_string() == listed);
    }

    /// Property: Permissive whitelist hits skip every category check
    #[test]
    fn permissive_whitelist_bypasses_categories(item in item(), mut settings in settings()) {
        settings.whitelist_only = false;
        settings.set_whitelist(&item.code.to_string());

        prop_assert_eq!(
            evaluate(Some(&item), &settings),
            texbuild_core::Verdict::Allow(AllowReason::WhitelistPermissive)
        );
    }

    /// Property: Non-block items are rejected whatever the settings
    #[test]
    fn non_blocks_are_never_allowed(mut item in item(), mut settings in settings()) {
        item.is_block = false;
        settings.set_whitelist("*");

        prop_assert!(!is_allowed(Some(&item), &settings));
        prop_assert!(!is_allowed(None, &settings));
    }

    /// Property: Turning every category on admits any block not blacklisted
    #[test]
    fn fully_permissive_settings_admit_all_blocks(item in item()) {
        let settings = FilterSettings {
            allow_food: true,
            allow_plants: true,
            allow_block_entities: true,
            allow_liquids: true,
            allow_clay: true,
            ..FilterSettings::default()
        };

        prop_assert!(is_allowed(Some(&item), &settings));
    }
}
