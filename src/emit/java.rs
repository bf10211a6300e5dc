//! IR → layout tree for the Fabric loot-table API (Yarn names, 1.21).
//!
//! One function per IR category; each returns the builder expression for a node, with that
//! node's own conditions and functions already chained on.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::EmitOptions;
use crate::ident::Identifier;
use crate::ir::{
    BonusFormula, Condition, Custom, Entry, EntryKind, Function, FunctionKind, IntRange, LevelBased,
    Literal, Num, NumberProvider, Pool, ScoreTarget,
};

use super::expr::{Expr, string_literal};

// Vanilla ids that have a static field in `Items` / `Enchantments`.
static CONSTANT_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-z0-9_]+$").unwrap());

pub struct Lowering<'o> {
    options: &'o EmitOptions,
}

impl<'o> Lowering<'o> {
    pub fn new(options: &'o EmitOptions) -> Self {
        Self { options }
    }

    // ————————————————————————————————————————————————————————————————————————
    // POOLS
    // ————————————————————————————————————————————————————————————————————————

    pub fn pool(&self, pool: &Pool) -> Expr {
        let mut chain = Expr::call("LootPool.builder", vec![])
            .link("rolls", vec![self.number_provider(&pool.rolls)]);
        if !pool.bonus_rolls.is_zero() {
            chain = chain.link("bonusRolls", vec![self.number_provider(&pool.bonus_rolls)]);
        }
        for entry in &pool.entries {
            chain = chain.link("with", vec![self.entry(entry)]);
        }
        self.conditioned(chain, &pool.conditions, &pool.functions)
    }

    fn conditioned(&self, mut chain: Expr, conditions: &[Condition], functions: &[Function]) -> Expr {
        for condition in conditions {
            chain = chain.link("conditionally", vec![self.condition(condition)]);
        }
        for function in functions {
            chain = chain.link("apply", vec![self.function(function)]);
        }
        chain
    }

    // ————————————————————————————————————————————————————————————————————————
    // ENTRIES
    // ————————————————————————————————————————————————————————————————————————

    pub fn entry(&self, entry: &Entry) -> Expr {
        let children = |xs: &[Entry]| xs.iter().map(|e| self.entry(e)).collect::<Vec<_>>();
        let mut expr = match &entry.kind {
            EntryKind::Empty => Expr::call("EmptyEntry.builder", vec![]),
            EntryKind::Item { name } => Expr::call("ItemEntry.builder", vec![item(name)]),
            EntryKind::Tag { name, expand } => {
                let factory = if *expand { "TagEntry.expandBuilder" } else { "TagEntry.builder" };
                let tag = Expr::call(
                    "TagKey.of",
                    vec![Expr::atom("RegistryKeys.ITEM"), identifier(name)],
                );
                Expr::call(factory, vec![tag])
            }
            EntryKind::LootTable { value } => Expr::call(
                "LootTableEntry.builder",
                vec![registry_key("RegistryKeys.LOOT_TABLE", value)],
            ),
            EntryKind::Dynamic { name } => Expr::call("DynamicEntry.builder", vec![identifier(name)]),
            EntryKind::Alternatives { children: xs } => {
                Expr::call("AlternativeEntry.builder", children(xs))
            }
            EntryKind::Group { children: xs } => Expr::call("GroupEntry.create", children(xs)),
            EntryKind::Sequence { children: xs } => Expr::call("SequenceEntry.create", children(xs)),
            EntryKind::Custom(custom) => self.custom(custom),
        };
        if entry.weight != crate::ir::DEFAULT_WEIGHT {
            expr = expr.link("weight", vec![Expr::atom(entry.weight.to_string())]);
        }
        if entry.quality != crate::ir::DEFAULT_QUALITY {
            expr = expr.link("quality", vec![Expr::atom(entry.quality.to_string())]);
        }
        self.conditioned(expr, &entry.conditions, &entry.functions)
    }

    // ————————————————————————————————————————————————————————————————————————
    // CONDITIONS
    // ————————————————————————————————————————————————————————————————————————

    pub fn condition(&self, condition: &Condition) -> Expr {
        let terms = |xs: &[Condition]| xs.iter().map(|c| self.condition(c)).collect::<Vec<_>>();
        match condition {
            Condition::RandomChance { chance } => {
                Expr::call("RandomChanceLootCondition.builder", vec![float(Num::Float(*chance))])
            }
            Condition::Inverted { term } => {
                Expr::call("InvertedLootCondition.builder", vec![self.condition(term)])
            }
            Condition::AnyOf { terms: xs } => Expr::call("AnyOfLootCondition.builder", terms(xs)),
            Condition::AllOf { terms: xs } => Expr::call("AllOfLootCondition.builder", terms(xs)),
            Condition::SurvivesExplosion => Expr::call("SurvivesExplosionLootCondition.builder", vec![]),
            Condition::KilledByPlayer => Expr::call("KilledByPlayerLootCondition.builder", vec![]),
            Condition::TableBonus { enchantment, chances } => {
                let mut args = vec![self.enchantment(enchantment)];
                args.extend(chances.iter().map(|c| float(Num::Float(*c))));
                Expr::call("TableBonusLootCondition.builder", args)
            }
            Condition::WeatherCheck { raining, thundering } => {
                let mut expr = Expr::call("WeatherCheckLootCondition.create", vec![]);
                if let Some(raining) = raining {
                    expr = expr.link("raining", vec![Expr::atom(raining.to_string())]);
                }
                if let Some(thundering) = thundering {
                    expr = expr.link("thundering", vec![Expr::atom(thundering.to_string())]);
                }
                expr
            }
            Condition::Reference { name } => Expr::call(
                "ReferenceLootCondition.builder",
                vec![registry_key("RegistryKeys.PREDICATE", name)],
            ),
            Condition::ValueCheck { value, range } => Expr::call(
                "ValueCheckLootCondition.builder",
                vec![self.number_provider(value), int_range(*range)],
            ),
            Condition::TimeCheck { value, period } => {
                let expr = Expr::call("TimeCheckLootCondition.create", vec![int_range(*value)]);
                match period {
                    Some(period) => expr.link("period", vec![Expr::atom(format!("{period}L"))]),
                    None => expr,
                }
            }
            Condition::EnchantmentActiveCheck { active: true } => {
                Expr::call("EnchantmentActiveCheckLootCondition.requireActive", vec![])
            }
            Condition::EnchantmentActiveCheck { active: false } => {
                Expr::call("EnchantmentActiveCheckLootCondition.requireInactive", vec![])
            }
            Condition::Custom(custom) => self.custom(custom),
        }
    }

    // ————————————————————————————————————————————————————————————————————————
    // FUNCTIONS
    // ————————————————————————————————————————————————————————————————————————

    pub fn function(&self, function: &Function) -> Expr {
        let with_add = |np: &NumberProvider, add: bool| {
            let mut args = vec![self.number_provider(np)];
            if add {
                args.push(Expr::atom("true"));
            }
            args
        };
        let expr = match &function.kind {
            FunctionKind::SetCount { count, add } => {
                Expr::call("SetCountLootFunction.builder", with_add(count, *add))
            }
            FunctionKind::SetDamage { damage, add } => {
                Expr::call("SetDamageLootFunction.builder", with_add(damage, *add))
            }
            FunctionKind::LimitCount { limit } => {
                Expr::call("LimitCountLootFunction.builder", vec![int_range(*limit)])
            }
            FunctionKind::ExplosionDecay => Expr::call("ExplosionDecayLootFunction.builder", vec![]),
            FunctionKind::FurnaceSmelt => Expr::call("FurnaceSmeltLootFunction.builder", vec![]),
            FunctionKind::ApplyBonus { enchantment, formula } => {
                let enchantment = self.enchantment(enchantment);
                match formula {
                    BonusFormula::OreDrops => {
                        Expr::call("ApplyBonusLootFunction.oreDrops", vec![enchantment])
                    }
                    BonusFormula::UniformBonusCount { bonus_multiplier } => Expr::call(
                        "ApplyBonusLootFunction.uniformBonusCount",
                        vec![enchantment, Expr::atom(bonus_multiplier.to_string())],
                    ),
                    BonusFormula::BinomialWithBonusCount { extra, probability } => Expr::call(
                        "ApplyBonusLootFunction.binomialWithBonusCount",
                        vec![
                            enchantment,
                            float(Num::Float(*probability)),
                            Expr::atom(extra.to_string()),
                        ],
                    ),
                }
            }
            FunctionKind::Custom(custom) => self.custom(custom),
        };
        self.conditioned(expr, &function.conditions, &[])
    }

    // ————————————————————————————————————————————————————————————————————————
    // NUMBER PROVIDERS
    // ————————————————————————————————————————————————————————————————————————

    pub fn number_provider(&self, np: &NumberProvider) -> Expr {
        match np {
            NumberProvider::Constant { value } => {
                Expr::call("ConstantLootNumberProvider.create", vec![float(*value)])
            }
            NumberProvider::Uniform { min, max } => Expr::call(
                "new UniformLootNumberProvider",
                vec![self.number_provider(min), self.number_provider(max)],
            ),
            NumberProvider::Binomial { n, p } => Expr::call(
                "new BinomialLootNumberProvider",
                vec![self.number_provider(n), self.number_provider(p)],
            ),
            NumberProvider::ClampedNormal { mean, deviation, min, max } => Expr::call(
                "new ClampedNormalLootNumberProvider",
                vec![float(*mean), float(*deviation), float(*min), float(*max)],
            ),
            NumberProvider::Score { target: ScoreTarget::Context { target }, score, scale } => {
                let mut args = vec![
                    Expr::atom(format!("LootContext.EntityTarget.{}", target.to_uppercase())),
                    Expr::atom(string_literal(score)),
                ];
                if let Some(scale) = scale {
                    args.push(float(*scale));
                }
                Expr::call("ScoreLootNumberProvider.create", args)
            }
            NumberProvider::Score { target: ScoreTarget::Fixed { name }, score, scale } => Expr::call(
                "new ScoreLootNumberProvider",
                vec![
                    Expr::call("FixedLootScoreProvider.create", vec![Expr::atom(string_literal(name))]),
                    Expr::atom(string_literal(score)),
                    float(scale.unwrap_or(Num::Int(1))),
                ],
            ),
            NumberProvider::EnchantmentLevel { amount } => {
                Expr::call("new EnchantmentLevelLootNumberProvider", vec![level_based(amount)])
            }
            NumberProvider::Custom(custom) => self.custom(custom),
        }
    }

    // -------- shared --------

    fn enchantment(&self, id: &Identifier) -> Expr {
        let key = if id.is_vanilla() && CONSTANT_NAME.is_match(id.path()) {
            Expr::atom(format!("Enchantments.{}", id.path().to_uppercase()))
        } else {
            registry_key("RegistryKeys.ENCHANTMENT", id)
        };
        // kept on one line; it reads as a single lookup
        Expr::call(
            format!(
                "{}.getWrapperOrThrow(RegistryKeys.ENCHANTMENT).getOrThrow",
                self.options.registries_var
            ),
            vec![key],
        )
    }

    fn custom(&self, custom: &Custom) -> Expr {
        let args = custom
            .args
            .iter()
            .map(|arg| match arg {
                Literal::Bool(b) => Expr::atom(b.to_string()),
                Literal::Num(n) => Expr::atom(number_literal(*n)),
                Literal::Str(s) => Expr::atom(string_literal(s)),
            })
            .collect();
        Expr::call(custom.factory.clone(), args)
    }
}

fn level_based(value: &LevelBased) -> Expr {
    match value {
        LevelBased::Constant { value } => {
            Expr::call("new EnchantmentLevelBasedValue.Constant", vec![float(*value)])
        }
        LevelBased::Linear { base, per_level_above_first } => Expr::call(
            "new EnchantmentLevelBasedValue.Linear",
            vec![float(*base), float(*per_level_above_first)],
        ),
        LevelBased::LevelsSquared { added } => {
            Expr::call("new EnchantmentLevelBasedValue.LevelsSquared", vec![float(*added)])
        }
        LevelBased::Clamped { value, min, max } => Expr::call(
            "new EnchantmentLevelBasedValue.Clamped",
            vec![level_based(value), float(*min), float(*max)],
        ),
        LevelBased::Fraction { numerator, denominator } => Expr::call(
            "new EnchantmentLevelBasedValue.Fraction",
            vec![level_based(numerator), level_based(denominator)],
        ),
        LevelBased::Lookup { values, fallback } => Expr::call(
            "new EnchantmentLevelBasedValue.Lookup",
            vec![
                Expr::call("List.of", values.iter().map(|v| float(*v)).collect()),
                level_based(fallback),
            ],
        ),
    }
}

/// Float parameter; keeps the source spelling (`1F` vs `1.0F`).
pub fn float(n: Num) -> Expr {
    match n {
        Num::Int(i) => Expr::atom(format!("{i}F")),
        Num::Float(f) => Expr::atom(format!("{:?}F", f.0)),
    }
}

fn number_literal(n: Num) -> String {
    match n {
        Num::Int(i) => i.to_string(),
        Num::Float(f) => format!("{:?}", f.0),
    }
}

pub fn identifier(id: &Identifier) -> Expr {
    Expr::call("Identifier.of", vec![Expr::atom(string_literal(&id.to_string()))])
}

pub fn registry_key(registry: &str, id: &Identifier) -> Expr {
    Expr::call("RegistryKey.of", vec![Expr::atom(registry), identifier(id)])
}

fn item(id: &Identifier) -> Expr {
    if id.is_vanilla() && CONSTANT_NAME.is_match(id.path()) {
        Expr::atom(format!("Items.{}", id.path().to_uppercase()))
    } else {
        Expr::call("Registries.ITEM.get", vec![identifier(id)])
    }
}

fn int_range(range: IntRange) -> Expr {
    let int = |n: i32| Expr::atom(n.to_string());
    match (range.min, range.max) {
        (Some(min), Some(max)) if min == max => Expr::call("BoundedIntUnaryOperator.create", vec![int(min)]),
        (Some(min), Some(max)) => Expr::call("BoundedIntUnaryOperator.create", vec![int(min), int(max)]),
        (Some(min), None) => Expr::call("BoundedIntUnaryOperator.createMin", vec![int(min)]),
        (None, Some(max)) => Expr::call("BoundedIntUnaryOperator.createMax", vec![int(max)]),
        (None, None) => Expr::call(
            "BoundedIntUnaryOperator.create",
            vec![Expr::atom("Integer.MIN_VALUE"), Expr::atom("Integer.MAX_VALUE")],
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Registry;
    use crate::translate::Translator;
    use crate::value::Node;
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};

    fn render(expr: Expr) -> String {
        expr.render("    ", 0)
    }

    fn lower_entry(v: Value) -> String {
        let registry = Registry::vanilla().unwrap();
        let entry = Translator::new(&registry).entry(&Node::root(&v)).unwrap();
        render(Lowering::new(&EmitOptions::default()).entry(&entry))
    }

    fn lower_condition(v: Value) -> String {
        let registry = Registry::vanilla().unwrap();
        let condition = Translator::new(&registry).condition(&Node::root(&v)).unwrap();
        render(Lowering::new(&EmitOptions::default()).condition(&condition))
    }

    fn lower_function(v: Value) -> String {
        let registry = Registry::vanilla().unwrap();
        let function = Translator::new(&registry).function(&Node::root(&v)).unwrap();
        render(Lowering::new(&EmitOptions::default()).function(&function))
    }

    fn lower_provider(v: Value) -> String {
        let registry = Registry::vanilla().unwrap();
        let np = Translator::new(&registry).number_provider(&Node::root(&v)).unwrap();
        render(Lowering::new(&EmitOptions::default()).number_provider(&np))
    }

    #[test]
    fn floats_keep_their_source_form() {
        assert_eq!(lower_provider(json!(1)), "ConstantLootNumberProvider.create(1F)");
        assert_eq!(lower_provider(json!(1.0)), "ConstantLootNumberProvider.create(1.0F)");
        assert_eq!(lower_provider(json!(0.5)), "ConstantLootNumberProvider.create(0.5F)");
    }

    #[test]
    fn items_and_tags() {
        assert_eq!(
            lower_entry(json!({"type": "item", "name": "minecraft:golden_apple"})),
            "ItemEntry.builder(Items.GOLDEN_APPLE)"
        );
        assert_eq!(
            lower_entry(json!({"type": "item", "name": "mymod:ruby"})),
            r#"ItemEntry.builder(Registries.ITEM.get(Identifier.of("mymod:ruby")))"#
        );
        assert_eq!(
            lower_entry(json!({"type": "tag", "name": "minecraft:logs", "expand": false})),
            r#"TagEntry.builder(TagKey.of(RegistryKeys.ITEM, Identifier.of("minecraft:logs")))"#
        );
    }

    #[test]
    fn entry_chain_order() {
        let text = lower_entry(json!({
            "type": "item",
            "name": "minecraft:diamond",
            "functions": [{"function": "set_count", "count": {"type": "uniform", "min": 1, "max": 2}}],
            "conditions": [{"condition": "killed_by_player"}],
            "quality": 2,
            "weight": 5
        }));
        let expected = "\
ItemEntry.builder(Items.DIAMOND)
    .weight(5)
    .quality(2)
    .conditionally(KilledByPlayerLootCondition.builder())
    .apply(SetCountLootFunction.builder(new UniformLootNumberProvider(ConstantLootNumberProvider.create(1F), ConstantLootNumberProvider.create(2F))))";
        assert_eq!(text, expected);
    }

    #[test]
    fn enchantment_based_constructs() {
        let registry = Registry::vanilla().unwrap();
        let v = json!({
            "function": "apply_bonus",
            "enchantment": "minecraft:fortune",
            "formula": "minecraft:ore_drops",
            "conditions": [{"condition": "survives_explosion"}]
        });
        let function = Translator::new(&registry).function(&Node::root(&v)).unwrap();
        let text = render(Lowering::new(&EmitOptions::default()).function(&function));
        let expected = "\
ApplyBonusLootFunction.oreDrops(registries.getWrapperOrThrow(RegistryKeys.ENCHANTMENT).getOrThrow(Enchantments.FORTUNE))
    .conditionally(SurvivesExplosionLootCondition.builder())";
        assert_eq!(text, expected);
    }

    #[test]
    fn score_and_level_based_providers() {
        assert_eq!(
            lower_provider(json!({"type": "score", "target": "this", "score": "kills", "scale": 0.5})),
            r#"ScoreLootNumberProvider.create(LootContext.EntityTarget.THIS, "kills", 0.5F)"#
        );
        assert_eq!(
            lower_provider(json!({"type": "score", "target": {"type": "fixed", "name": "@g"}, "score": "s"})),
            r#"new ScoreLootNumberProvider(FixedLootScoreProvider.create("@g"), "s", 1F)"#
        );
        assert_eq!(
            lower_provider(json!({"type": "enchantment_level", "amount": {"type": "lookup", "values": [1, 2.5], "fallback": 0}})),
            "new EnchantmentLevelLootNumberProvider(new EnchantmentLevelBasedValue.Lookup(List.of(1F, 2.5F), new EnchantmentLevelBasedValue.Constant(0F)))"
        );
    }

    #[test]
    fn ranges() {
        assert_eq!(render(int_range(IntRange { min: Some(2), max: Some(2) })), "BoundedIntUnaryOperator.create(2)");
        assert_eq!(render(int_range(IntRange { min: Some(1), max: Some(3) })), "BoundedIntUnaryOperator.create(1, 3)");
        assert_eq!(render(int_range(IntRange { min: None, max: Some(3) })), "BoundedIntUnaryOperator.createMax(3)");
    }

    #[test]
    fn reference_and_composite_entries() {
        assert_eq!(
            lower_entry(json!({"type": "tag", "name": "minecraft:arrows", "expand": true})),
            r#"TagEntry.expandBuilder(TagKey.of(RegistryKeys.ITEM, Identifier.of("minecraft:arrows")))"#
        );
        assert_eq!(
            lower_entry(json!({"type": "loot_table", "value": "minecraft:chests/simple_dungeon", "weight": 2})),
            "LootTableEntry.builder(RegistryKey.of(RegistryKeys.LOOT_TABLE, Identifier.of(\"minecraft:chests/simple_dungeon\")))\n    .weight(2)"
        );
        assert_eq!(
            lower_entry(json!({"type": "dynamic", "name": "minecraft:contents"})),
            r#"DynamicEntry.builder(Identifier.of("minecraft:contents"))"#
        );
        assert_eq!(
            lower_entry(json!({"type": "group", "children": [
                {"type": "item", "name": "minecraft:a"},
                {"type": "empty"}
            ]})),
            "GroupEntry.create(ItemEntry.builder(Items.A), EmptyEntry.builder())"
        );
        assert_eq!(
            lower_entry(json!({
                "type": "sequence",
                "conditions": [{"condition": "survives_explosion"}],
                "children": [{"type": "item", "name": "minecraft:b"}]
            })),
            "SequenceEntry.create(ItemEntry.builder(Items.B))\n    .conditionally(SurvivesExplosionLootCondition.builder())"
        );
    }

    #[test]
    fn predicate_and_range_conditions() {
        assert_eq!(
            lower_condition(json!({"condition": "reference", "name": "mymod:is_night"})),
            r#"ReferenceLootCondition.builder(RegistryKey.of(RegistryKeys.PREDICATE, Identifier.of("mymod:is_night")))"#
        );
        assert_eq!(
            lower_condition(json!({
                "condition": "value_check",
                "value": {"type": "uniform", "min": 0, "max": 10},
                "range": {"min": 3}
            })),
            "ValueCheckLootCondition.builder(new UniformLootNumberProvider(ConstantLootNumberProvider.create(0F), ConstantLootNumberProvider.create(10F)), BoundedIntUnaryOperator.createMin(3))"
        );
        assert_eq!(
            lower_condition(json!({"condition": "time_check", "value": {"min": 0, "max": 12000}, "period": 24000})),
            "TimeCheckLootCondition.create(BoundedIntUnaryOperator.create(0, 12000))\n    .period(24000L)"
        );
        assert_eq!(
            lower_condition(json!({"condition": "time_check", "value": 6000})),
            "TimeCheckLootCondition.create(BoundedIntUnaryOperator.create(6000))"
        );
        assert_eq!(
            lower_condition(json!({"condition": "enchantment_active_check", "active": true})),
            "EnchantmentActiveCheckLootCondition.requireActive()"
        );
        assert_eq!(
            lower_condition(json!({"condition": "enchantment_active_check", "active": false})),
            "EnchantmentActiveCheckLootCondition.requireInactive()"
        );
    }

    #[test]
    fn composite_conditions() {
        assert_eq!(
            lower_condition(json!({"condition": "any_of", "terms": [
                {"condition": "killed_by_player"},
                {"condition": "inverted", "term": {"condition": "survives_explosion"}}
            ]})),
            "AnyOfLootCondition.builder(KilledByPlayerLootCondition.builder(), InvertedLootCondition.builder(SurvivesExplosionLootCondition.builder()))"
        );
        let expected = "\
AllOfLootCondition.builder(
    RandomChanceLootCondition.builder(0.1F),
    WeatherCheckLootCondition.create()
        .raining(true))";
        assert_eq!(
            lower_condition(json!({"condition": "all_of", "terms": [
                {"condition": "random_chance", "chance": 0.1},
                {"condition": "weather_check", "raining": true}
            ]})),
            expected
        );
    }

    #[test]
    fn item_functions() {
        assert_eq!(
            lower_function(json!({"function": "set_damage", "damage": 0.5, "add": true})),
            "SetDamageLootFunction.builder(ConstantLootNumberProvider.create(0.5F), true)"
        );
        assert_eq!(
            lower_function(json!({"function": "limit_count", "limit": {"min": 1, "max": 64}})),
            "LimitCountLootFunction.builder(BoundedIntUnaryOperator.create(1, 64))"
        );
        assert_eq!(
            lower_function(json!({"function": "furnace_smelt", "conditions": [{"condition": "killed_by_player"}]})),
            "FurnaceSmeltLootFunction.builder()\n    .conditionally(KilledByPlayerLootCondition.builder())"
        );
    }

    #[test]
    fn bonus_formulas_and_modded_enchantments() {
        let fortune = "registries.getWrapperOrThrow(RegistryKeys.ENCHANTMENT).getOrThrow(Enchantments.FORTUNE)";
        assert_eq!(
            lower_function(json!({
                "function": "apply_bonus",
                "enchantment": "minecraft:fortune",
                "formula": "uniform_bonus_count",
                "parameters": {"bonusMultiplier": 2}
            })),
            format!("ApplyBonusLootFunction.uniformBonusCount({fortune}, 2)")
        );
        assert_eq!(
            lower_function(json!({
                "function": "apply_bonus",
                "enchantment": "minecraft:fortune",
                "formula": "minecraft:binomial_with_bonus_count",
                "parameters": {"extra": 3, "probability": 0.5714286}
            })),
            format!("ApplyBonusLootFunction.binomialWithBonusCount({fortune}, 0.5714286F, 3)")
        );
        assert_eq!(
            lower_function(json!({"function": "apply_bonus", "enchantment": "mymod:greed", "formula": "ore_drops"})),
            r#"ApplyBonusLootFunction.oreDrops(registries.getWrapperOrThrow(RegistryKeys.ENCHANTMENT).getOrThrow(RegistryKey.of(RegistryKeys.ENCHANTMENT, Identifier.of("mymod:greed"))))"#
        );
    }

    #[test]
    fn distribution_providers() {
        assert_eq!(
            lower_provider(json!({"type": "binomial", "n": 10, "p": 0.25})),
            "new BinomialLootNumberProvider(ConstantLootNumberProvider.create(10F), ConstantLootNumberProvider.create(0.25F))"
        );
        assert_eq!(
            lower_provider(json!({"type": "clamped_normal", "mean": 2, "deviation": 1.5, "min": 0, "max": 5})),
            "new ClampedNormalLootNumberProvider(2F, 1.5F, 0F, 5F)"
        );
    }

    #[test]
    fn nested_level_based_values() {
        let v = json!({"type": "enchantment_level", "amount": {
            "type": "clamped",
            "value": {"type": "fraction", "numerator": {"type": "levels_squared", "added": 1}, "denominator": 4},
            "min": 0,
            "max": 2.5
        }});
        assert_eq!(
            lower_provider(v),
            "new EnchantmentLevelLootNumberProvider(new EnchantmentLevelBasedValue.Clamped(new EnchantmentLevelBasedValue.Fraction(new EnchantmentLevelBasedValue.LevelsSquared(1F), new EnchantmentLevelBasedValue.Constant(4F)), 0F, 2.5F))"
        );
    }
}
