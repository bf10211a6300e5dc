// Condition kinds (`condition` field). Composites recurse through the translator.

use ordered_float::OrderedFloat;

use crate::error::{RegistrationError, SchemaError};
use crate::ir::Condition;
use crate::registry::Registry;
use crate::translate::Translator;
use crate::value::Node;

use super::int_range;

pub fn register(registry: &mut Registry) -> Result<(), RegistrationError> {
    registry
        .register_condition("minecraft:random_chance", random_chance)?
        .register_condition("minecraft:inverted", inverted)?
        .register_condition("minecraft:any_of", any_of)?
        .register_condition("minecraft:all_of", all_of)?
        // pre-1.20 name of any_of
        .register_condition("minecraft:alternative", any_of)?
        .register_condition("minecraft:survives_explosion", survives_explosion)?
        .register_condition("minecraft:killed_by_player", killed_by_player)?
        .register_condition("minecraft:table_bonus", table_bonus)?
        .register_condition("minecraft:weather_check", weather_check)?
        .register_condition("minecraft:reference", reference)?
        .register_condition("minecraft:value_check", value_check)?
        .register_condition("minecraft:time_check", time_check)?
        .register_condition("minecraft:enchantment_active_check", enchantment_active_check)?;
    Ok(())
}

fn random_chance(_: &Translator<'_>, node: &Node<'_>) -> Result<Condition, SchemaError> {
    Ok(Condition::RandomChance { chance: OrderedFloat(node.f64_field("chance")?) })
}

fn inverted(tr: &Translator<'_>, node: &Node<'_>) -> Result<Condition, SchemaError> {
    let term = tr.condition(&node.required("term")?)?;
    Ok(Condition::Inverted { term: Box::new(term) })
}

fn terms(tr: &Translator<'_>, node: &Node<'_>) -> Result<Vec<Condition>, SchemaError> {
    node.non_empty_list("terms")?.iter().map(|term| tr.condition(term)).collect()
}

fn any_of(tr: &Translator<'_>, node: &Node<'_>) -> Result<Condition, SchemaError> {
    Ok(Condition::AnyOf { terms: terms(tr, node)? })
}

fn all_of(tr: &Translator<'_>, node: &Node<'_>) -> Result<Condition, SchemaError> {
    Ok(Condition::AllOf { terms: terms(tr, node)? })
}

fn survives_explosion(_: &Translator<'_>, _: &Node<'_>) -> Result<Condition, SchemaError> {
    Ok(Condition::SurvivesExplosion)
}

fn killed_by_player(_: &Translator<'_>, _: &Node<'_>) -> Result<Condition, SchemaError> {
    Ok(Condition::KilledByPlayer)
}

fn table_bonus(_: &Translator<'_>, node: &Node<'_>) -> Result<Condition, SchemaError> {
    let chances = node
        .non_empty_list("chances")?
        .iter()
        .map(|chance| chance.as_f64().map(OrderedFloat))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Condition::TableBonus { enchantment: node.ident_field("enchantment")?, chances })
}

fn weather_check(_: &Translator<'_>, node: &Node<'_>) -> Result<Condition, SchemaError> {
    Ok(Condition::WeatherCheck {
        raining: node.opt_bool("raining")?,
        thundering: node.opt_bool("thundering")?,
    })
}

fn reference(_: &Translator<'_>, node: &Node<'_>) -> Result<Condition, SchemaError> {
    Ok(Condition::Reference { name: node.ident_field("name")? })
}

fn value_check(tr: &Translator<'_>, node: &Node<'_>) -> Result<Condition, SchemaError> {
    Ok(Condition::ValueCheck {
        value: tr.required_number_provider(node, "value")?,
        range: int_range(&node.required("range")?)?,
    })
}

fn time_check(_: &Translator<'_>, node: &Node<'_>) -> Result<Condition, SchemaError> {
    Ok(Condition::TimeCheck {
        value: int_range(&node.required("value")?)?,
        period: node.opt_i64("period")?,
    })
}

fn enchantment_active_check(_: &Translator<'_>, node: &Node<'_>) -> Result<Condition, SchemaError> {
    Ok(Condition::EnchantmentActiveCheck { active: node.bool_field("active")? })
}
