// Strongly-typed loot-table IR. No serde_json::Value here.

use ordered_float::OrderedFloat;
use serde::Serialize;

use crate::ident::Identifier;

// ————————————————————————————————————————————————————————————————————————————
// LITERALS
// ————————————————————————————————————————————————————————————————————————————

/// A number as the source spelled it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum Num {
    Int(i64),
    Float(OrderedFloat<f64>),
}

impl Num {
    pub fn float(value: f64) -> Self {
        Num::Float(OrderedFloat(value))
    }

    pub fn as_f64(self) -> f64 {
        match self {
            Num::Int(i) => i as f64,
            Num::Float(f) => f.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Literal {
    Bool(bool),
    Num(Num),
    Str(String),
}

/// Output of a converter registered outside this crate: a host factory call with literal
/// arguments, e.g. `MyModLootFunctions.glow(3)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Custom {
    pub kind: Identifier,
    pub factory: String,
    pub args: Vec<Literal>,
}

// ————————————————————————————————————————————————————————————————————————————
// TABLE / POOL / ENTRY
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LootTable {
    pub key: Identifier,
    /// The table's `type` (loot context), e.g. `minecraft:chest`.
    pub context: Option<Identifier>,
    pub random_sequence: Option<Identifier>,
    pub pools: Vec<Pool>,
    pub functions: Vec<Function>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pool {
    pub rolls: NumberProvider,
    pub bonus_rolls: NumberProvider,
    pub entries: Vec<Entry>,      // never empty
    pub conditions: Vec<Condition>,
    pub functions: Vec<Function>,
}

pub const DEFAULT_WEIGHT: i32 = 1;
pub const DEFAULT_QUALITY: i32 = 0;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    pub kind: EntryKind,
    pub weight: i32,
    pub quality: i32,
    pub conditions: Vec<Condition>,
    pub functions: Vec<Function>,
}

impl Entry {
    /// Nested entries of group-like kinds, in source order.
    pub fn children(&self) -> &[Entry] {
        match &self.kind {
            EntryKind::Alternatives { children }
            | EntryKind::Group { children }
            | EntryKind::Sequence { children } => children,
            _ => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EntryKind {
    Empty,
    Item { name: Identifier },
    Tag { name: Identifier, expand: bool },
    LootTable { value: Identifier },
    Dynamic { name: Identifier },
    Alternatives { children: Vec<Entry> },
    Group { children: Vec<Entry> },
    Sequence { children: Vec<Entry> },
    Custom(Custom),
}

// ————————————————————————————————————————————————————————————————————————————
// CONDITIONS / FUNCTIONS
// ————————————————————————————————————————————————————————————————————————————

/// Integer bounds; at least one side is present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IntRange {
    pub min: Option<i32>,
    pub max: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Condition {
    RandomChance { chance: OrderedFloat<f64> },
    Inverted { term: Box<Condition> },
    AnyOf { terms: Vec<Condition> },
    AllOf { terms: Vec<Condition> },
    SurvivesExplosion,
    KilledByPlayer,
    TableBonus { enchantment: Identifier, chances: Vec<OrderedFloat<f64>> },
    WeatherCheck { raining: Option<bool>, thundering: Option<bool> },
    Reference { name: Identifier },
    ValueCheck { value: NumberProvider, range: IntRange },
    TimeCheck { value: IntRange, period: Option<i64> },
    EnchantmentActiveCheck { active: bool },
    Custom(Custom),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Function {
    pub kind: FunctionKind,
    pub conditions: Vec<Condition>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "formula", rename_all = "snake_case")]
pub enum BonusFormula {
    OreDrops,
    UniformBonusCount { bonus_multiplier: i32 },
    BinomialWithBonusCount { extra: i32, probability: OrderedFloat<f64> },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FunctionKind {
    SetCount { count: NumberProvider, add: bool },
    SetDamage { damage: NumberProvider, add: bool },
    LimitCount { limit: IntRange },
    ExplosionDecay,
    FurnaceSmelt,
    ApplyBonus { enchantment: Identifier, formula: BonusFormula },
    Custom(Custom),
}

// ————————————————————————————————————————————————————————————————————————————
// NUMBER PROVIDERS
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NumberProvider {
    Constant { value: Num },
    Uniform { min: Box<NumberProvider>, max: Box<NumberProvider> },
    Binomial { n: Box<NumberProvider>, p: Box<NumberProvider> },
    ClampedNormal { mean: Num, deviation: Num, min: Num, max: Num },
    Score { target: ScoreTarget, score: String, scale: Option<Num> },
    EnchantmentLevel { amount: LevelBased },
    Custom(Custom),
}

impl NumberProvider {
    pub fn constant(value: Num) -> Self {
        NumberProvider::Constant { value }
    }

    /// `bonus_rolls` default.
    pub fn zero() -> Self {
        NumberProvider::constant(Num::Int(0))
    }

    pub fn is_zero(&self) -> bool {
        matches!(self, NumberProvider::Constant { value } if value.as_f64() == 0.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScoreTarget {
    /// `this`, `attacker`, `direct_attacker`, `attacking_player`, ...
    Context { target: String },
    Fixed { name: String },
}

/// Enchantment-level based value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LevelBased {
    Constant { value: Num },
    Linear { base: Num, per_level_above_first: Num },
    LevelsSquared { added: Num },
    Clamped { value: Box<LevelBased>, min: Num, max: Num },
    Fraction { numerator: Box<LevelBased>, denominator: Box<LevelBased> },
    Lookup { values: Vec<Num>, fallback: Box<LevelBased> },
}
