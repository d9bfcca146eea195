//! Property-based tests for scoring and ranking invariants

use proptest::prelude::*;
use purchase_intent_engine::prelude::*;
use purchase_intent_engine::scoring::normalize;

fn build_intent(category: Category, band: BudgetBand, usages: Vec<UsageTag>) -> Intent {
    let mut capture = IntentCapture::new()
        .select_category(category.as_str())
        .unwrap()
        .select_budget(band.id())
        .unwrap();
    for usage in usages {
        capture = capture.toggle_usage(usage.as_str()).unwrap();
    }
    capture
        .confirm_usages()
        .unwrap()
        .complete()
        .unwrap()
        .intent()
        .cloned()
        .unwrap()
}

fn intent_strategy() -> impl Strategy<Value = Intent> {
    (
        prop::sample::select(Category::ALL.to_vec()),
        prop::sample::select(BudgetBand::ALL.to_vec()),
        prop::sample::subsequence(UsageTag::ALL.to_vec(), 1..=5),
    )
        .prop_map(|(category, band, usages)| build_intent(category, band, usages))
}

fn tier_strategy() -> impl Strategy<Value = GpuTier> {
    prop_oneof![
        Just(GpuTier::Entry),
        Just(GpuTier::Mainstream),
        Just(GpuTier::Performance),
        Just(GpuTier::Enthusiast),
    ]
}

fn gpu_strategy() -> impl Strategy<Value = GpuSpec> {
    prop_oneof![
        Just(GpuSpec::integrated()),
        (tier_strategy(), 0u32..24).prop_map(|(tier, vram)| GpuSpec::dedicated(tier, vram)),
    ]
}

fn hardware_strategy() -> impl Strategy<Value = HardwareProfile> {
    (
        prop::option::of(prop_oneof![
            Just(CpuTier::Entry),
            Just(CpuTier::Mainstream),
            Just(CpuTier::Performance),
            Just(CpuTier::Enthusiast),
        ]),
        prop::option::of(gpu_strategy()),
        prop::option::of(0u32..128),
        prop::option::of((
            prop_oneof![
                Just(StorageKind::Hdd),
                Just(StorageKind::Hybrid),
                Just(StorageKind::Ssd),
                Just(StorageKind::Nvme),
            ],
            64u32..4096,
        )),
        prop::option::of((11.0f32..18.0, 30u32..360)),
        prop::option::of(0.0f32..20.0),
    )
        .prop_map(|(cpu_tier, gpu, ram_gb, storage, screen, battery_hours)| HardwareProfile {
            cpu_tier,
            gpu,
            ram_gb,
            storage: storage.map(|(kind, capacity_gb)| StorageSpec { kind, capacity_gb }),
            screen: screen.map(|(size_inches, refresh_hz)| ScreenSpec {
                size_inches,
                refresh_hz,
            }),
            battery_hours,
        })
}

fn catalog_strategy() -> impl Strategy<Value = Vec<ProductSpec>> {
    prop::collection::vec(
        (
            hardware_strategy(),
            0.0f64..12_000.0,
            prop::option::of(prop::sample::select(Category::ALL.to_vec())),
        ),
        1..30,
    )
    .prop_map(|entries| {
        entries
            .into_iter()
            .enumerate()
            .map(|(i, (hardware, price, category))| {
                let mut product =
                    ProductSpec::new(format!("p{}", i), "Product", price).with_attributes(hardware);
                product.category = category;
                product
            })
            .collect()
    })
}

fn gaming_heavy_score(hardware: &HardwareProfile) -> u8 {
    let product = ProductSpec::new("gpu", "GPU ladder", 1000.0)
        .with_category(Category::Desktop)
        .with_attributes(hardware.clone());
    ScoringEngine::default()
        .usage_scores(&normalize(&product))
        .get(UsageTag::GamingHeavy)
}

proptest! {
    #[test]
    fn ranked_products_are_within_budget(
        intent in intent_strategy(),
        catalog in catalog_strategy(),
        sort_index in 0usize..3,
    ) {
        let sort_key = [SortKey::Aggregate, SortKey::Price, SortKey::BestUsageMatch][sort_index];
        let results = rank(&intent, &catalog, sort_key);

        for item in &results.items {
            prop_assert!(intent.budget_range().contains(item.price()));
        }
        prop_assert_eq!(
            results.len() + results.excluded_by_budget + results.excluded_by_category,
            catalog.len()
        );
    }

    #[test]
    fn scoring_ignores_price(
        intent in intent_strategy(),
        hardware in hardware_strategy(),
        first in 0.0f64..20_000.0,
        second in 0.0f64..20_000.0,
    ) {
        let a = ProductSpec::new("x", "Same hardware", first).with_attributes(hardware.clone());
        let b = ProductSpec::new("x", "Same hardware", second).with_attributes(hardware);

        let scored_a = score(&intent, &a);
        let scored_b = score(&intent, &b);
        prop_assert_eq!(scored_a.aggregate_score, scored_b.aggregate_score);
        prop_assert_eq!(scored_a.compatibility, scored_b.compatibility);
        prop_assert_eq!(scored_a.strengths, scored_b.strengths);
    }

    #[test]
    fn scoring_is_idempotent(intent in intent_strategy(), hardware in hardware_strategy()) {
        let product = ProductSpec::new("x", "Product", 2000.0).with_attributes(hardware);
        prop_assert_eq!(score(&intent, &product), score(&intent, &product));
    }

    #[test]
    fn toggling_twice_restores_selection(
        initial in prop::sample::subsequence(UsageTag::ALL.to_vec(), 0..=5),
        tag in prop::sample::select(UsageTag::ALL.to_vec()),
    ) {
        let mut capture = IntentCapture::new()
            .select_category("notebook")
            .unwrap()
            .select_budget("1500-3000")
            .unwrap();
        for usage in &initial {
            capture = capture.toggle_usage(usage.as_str()).unwrap();
        }
        let before = capture.answers().usages.clone();

        let after = capture
            .toggle_usage(tag.as_str())
            .unwrap()
            .toggle_usage(tag.as_str())
            .unwrap();
        prop_assert_eq!(&after.answers().usages, &before);
    }

    #[test]
    fn better_gpu_never_lowers_heavy_gaming(
        hardware in hardware_strategy(),
        vram in prop::option::of(0u32..24),
    ) {
        let ladder = [
            None,
            Some(GpuSpec { kind: GpuKind::Integrated, tier: None, vram_gb: vram }),
            Some(GpuSpec { kind: GpuKind::Dedicated, tier: Some(GpuTier::Entry), vram_gb: vram }),
            Some(GpuSpec { kind: GpuKind::Dedicated, tier: Some(GpuTier::Mainstream), vram_gb: vram }),
            Some(GpuSpec { kind: GpuKind::Dedicated, tier: Some(GpuTier::Performance), vram_gb: vram }),
            Some(GpuSpec { kind: GpuKind::Dedicated, tier: Some(GpuTier::Enthusiast), vram_gb: vram }),
        ];

        let scores: Vec<u8> = ladder
            .into_iter()
            .map(|gpu| gaming_heavy_score(&HardwareProfile { gpu, ..hardware.clone() }))
            .collect();
        for pair in scores.windows(2) {
            prop_assert!(pair[0] <= pair[1], "scores along the GPU ladder: {:?}", scores);
        }
    }

    #[test]
    fn equal_products_keep_catalog_order(
        intent in intent_strategy(),
        hardware in hardware_strategy(),
        count in 2usize..12,
        sort_index in 0usize..3,
    ) {
        let sort_key = [SortKey::Aggregate, SortKey::Price, SortKey::BestUsageMatch][sort_index];
        let price = intent.budget_range().lower();
        let catalog: Vec<ProductSpec> = (0..count)
            .map(|i| {
                ProductSpec::new(format!("twin-{}", i), "Twin", price)
                    .with_attributes(hardware.clone())
            })
            .collect();

        let results = rank(&intent, &catalog, sort_key);
        let expected: Vec<String> = (0..count).map(|i| format!("twin-{}", i)).collect();
        let actual: Vec<String> = results.ids().into_iter().map(String::from).collect();
        prop_assert_eq!(actual, expected);
    }
}
