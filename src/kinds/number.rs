// Number-provider kinds (`type` field). Bare numbers never reach here; the translator turns
// them into constants before dispatch.

use crate::error::{RegistrationError, SchemaError, SchemaErrorKind};
use crate::ir::{LevelBased, NumberProvider, ScoreTarget};
use crate::registry::Registry;
use crate::translate::Translator;
use crate::value::Node;

/// Entities a `context` score target may name.
pub const ENTITY_TARGETS: [&str; 4] = ["this", "attacker", "direct_attacker", "attacking_player"];

pub fn register(registry: &mut Registry) -> Result<(), RegistrationError> {
    registry
        .register_number_provider("minecraft:constant", constant)?
        .register_number_provider("minecraft:uniform", uniform)?
        .register_number_provider("minecraft:binomial", binomial)?
        .register_number_provider("minecraft:clamped_normal", clamped_normal)?
        .register_number_provider("minecraft:score", score)?
        .register_number_provider("minecraft:enchantment_level", enchantment_level)?;
    Ok(())
}

fn constant(_: &Translator<'_>, node: &Node<'_>) -> Result<NumberProvider, SchemaError> {
    Ok(NumberProvider::constant(node.required("value")?.as_num()?))
}

fn uniform(tr: &Translator<'_>, node: &Node<'_>) -> Result<NumberProvider, SchemaError> {
    Ok(NumberProvider::Uniform {
        min: Box::new(tr.required_number_provider(node, "min")?),
        max: Box::new(tr.required_number_provider(node, "max")?),
    })
}

fn binomial(tr: &Translator<'_>, node: &Node<'_>) -> Result<NumberProvider, SchemaError> {
    Ok(NumberProvider::Binomial {
        n: Box::new(tr.required_number_provider(node, "n")?),
        p: Box::new(tr.required_number_provider(node, "p")?),
    })
}

fn clamped_normal(_: &Translator<'_>, node: &Node<'_>) -> Result<NumberProvider, SchemaError> {
    Ok(NumberProvider::ClampedNormal {
        mean: node.required("mean")?.as_num()?,
        deviation: node.required("deviation")?.as_num()?,
        min: node.required("min")?.as_num()?,
        max: node.required("max")?.as_num()?,
    })
}

fn score(_: &Translator<'_>, node: &Node<'_>) -> Result<NumberProvider, SchemaError> {
    Ok(NumberProvider::Score {
        target: score_target(&node.required("target")?)?,
        score: node.str_field("score")?.to_string(),
        scale: node.field("scale")?.map(|n| n.as_num()).transpose()?,
    })
}

/// `"this"` is shorthand for `{ "type": "minecraft:context", "target": "this" }`.
fn score_target(node: &Node<'_>) -> Result<ScoreTarget, SchemaError> {
    if node.value().is_string() {
        return context_target(node);
    }
    let kind_node = node.required("type")?;
    let kind = kind_node.as_ident()?;
    match (kind.is_vanilla(), kind.path()) {
        (true, "context") => context_target(&node.required("target")?),
        (true, "fixed") => Ok(ScoreTarget::Fixed { name: node.str_field("name")?.to_string() }),
        _ => Err(kind_node.error(SchemaErrorKind::InvalidValue(format!(
            "unknown score target `{kind}`"
        )))),
    }
}

fn context_target(node: &Node<'_>) -> Result<ScoreTarget, SchemaError> {
    let target = node.as_str()?;
    if !ENTITY_TARGETS.contains(&target) {
        return Err(node.error(SchemaErrorKind::InvalidValue(format!(
            "unknown entity target `{target}`, expected one of {}",
            ENTITY_TARGETS.join(", ")
        ))));
    }
    Ok(ScoreTarget::Context { target: target.to_string() })
}

fn enchantment_level(_: &Translator<'_>, node: &Node<'_>) -> Result<NumberProvider, SchemaError> {
    Ok(NumberProvider::EnchantmentLevel { amount: level_based(&node.required("amount")?)? })
}

/// Level-based value; a bare number is a constant.
fn level_based(node: &Node<'_>) -> Result<LevelBased, SchemaError> {
    if node.value().is_number() {
        return Ok(LevelBased::Constant { value: node.as_num()? });
    }
    let kind_node = node.required("type")?;
    let kind = kind_node.as_ident()?;
    let num = |field: &str| node.required(field)?.as_num();
    let nested = |field: &str| level_based(&node.required(field)?).map(Box::new);
    Ok(match (kind.is_vanilla(), kind.path()) {
        (true, "constant") => LevelBased::Constant { value: num("value")? },
        (true, "linear") => LevelBased::Linear {
            base: num("base")?,
            per_level_above_first: num("per_level_above_first")?,
        },
        (true, "levels_squared") => LevelBased::LevelsSquared { added: num("added")? },
        (true, "clamped") => LevelBased::Clamped {
            value: nested("value")?,
            min: num("min")?,
            max: num("max")?,
        },
        (true, "fraction") => LevelBased::Fraction {
            numerator: nested("numerator")?,
            denominator: nested("denominator")?,
        },
        (true, "lookup") => LevelBased::Lookup {
            values: node
                .non_empty_list("values")?
                .iter()
                .map(|v| v.as_num())
                .collect::<Result<Vec<_>, _>>()?,
            fallback: nested("fallback")?,
        },
        _ => {
            return Err(kind_node.error(SchemaErrorKind::InvalidValue(format!(
                "unknown level-based value `{kind}`"
            ))));
        }
    })
}
