// Function kinds (`function` field). A function's own `conditions` are read by the translator.

use ordered_float::OrderedFloat;

use crate::error::{RegistrationError, SchemaError, SchemaErrorKind};
use crate::ir::{BonusFormula, FunctionKind};
use crate::registry::Registry;
use crate::translate::Translator;
use crate::value::Node;

use super::int_range;

pub fn register(registry: &mut Registry) -> Result<(), RegistrationError> {
    registry
        .register_function("minecraft:set_count", set_count)?
        .register_function("minecraft:set_damage", set_damage)?
        .register_function("minecraft:limit_count", limit_count)?
        .register_function("minecraft:explosion_decay", explosion_decay)?
        .register_function("minecraft:furnace_smelt", furnace_smelt)?
        .register_function("minecraft:apply_bonus", apply_bonus)?;
    Ok(())
}

fn set_count(tr: &Translator<'_>, node: &Node<'_>) -> Result<FunctionKind, SchemaError> {
    Ok(FunctionKind::SetCount {
        count: tr.required_number_provider(node, "count")?,
        add: node.opt_bool("add")?.unwrap_or(false),
    })
}

fn set_damage(tr: &Translator<'_>, node: &Node<'_>) -> Result<FunctionKind, SchemaError> {
    Ok(FunctionKind::SetDamage {
        damage: tr.required_number_provider(node, "damage")?,
        add: node.opt_bool("add")?.unwrap_or(false),
    })
}

fn limit_count(_: &Translator<'_>, node: &Node<'_>) -> Result<FunctionKind, SchemaError> {
    Ok(FunctionKind::LimitCount { limit: int_range(&node.required("limit")?)? })
}

fn explosion_decay(_: &Translator<'_>, _: &Node<'_>) -> Result<FunctionKind, SchemaError> {
    Ok(FunctionKind::ExplosionDecay)
}

fn furnace_smelt(_: &Translator<'_>, _: &Node<'_>) -> Result<FunctionKind, SchemaError> {
    Ok(FunctionKind::FurnaceSmelt)
}

fn apply_bonus(_: &Translator<'_>, node: &Node<'_>) -> Result<FunctionKind, SchemaError> {
    let enchantment = node.ident_field("enchantment")?;
    let formula_node = node.required("formula")?;
    let formula = formula_node.as_ident()?;
    let formula = match (formula.is_vanilla(), formula.path()) {
        (true, "ore_drops") => BonusFormula::OreDrops,
        (true, "uniform_bonus_count") => {
            let parameters = node.required("parameters")?;
            BonusFormula::UniformBonusCount {
                bonus_multiplier: parameters.i32_field("bonusMultiplier")?,
            }
        }
        (true, "binomial_with_bonus_count") => {
            let parameters = node.required("parameters")?;
            BonusFormula::BinomialWithBonusCount {
                extra: parameters.i32_field("extra")?,
                probability: OrderedFloat(parameters.f64_field("probability")?),
            }
        }
        _ => {
            return Err(formula_node.error(SchemaErrorKind::InvalidValue(format!(
                "unknown bonus formula `{formula}`"
            ))));
        }
    };
    Ok(FunctionKind::ApplyBonus { enchantment, formula })
}
