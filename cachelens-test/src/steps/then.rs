use anyhow::{Error, anyhow};
use cachelens_core::{Severity, Summary};
use cucumber::then;
use jaq_core::{
    Ctx, RcIter,
    load::{Arena, File, Loader},
};
use jaq_json::Val;
use serde_json::Value;

use crate::world::ExplainWorld;

#[then(expr = "summary is {string}")]
fn summary_is(world: &mut ExplainWorld, expected: String) -> Result<(), Error> {
    let expected =
        Summary::from_label(&expected).ok_or_else(|| anyhow!("unknown summary '{}'", expected))?;
    let actual = world.explained()?.summary();
    if actual == expected {
        Ok(())
    } else {
        Err(anyhow!(
            "Summary '{}' does not match expected '{}'",
            actual,
            expected
        ))
    }
}

#[then(expr = "type is {string}")]
fn type_is(world: &mut ExplainWorld, expected: String) -> Result<(), Error> {
    let expected = match expected.as_str() {
        "warning" => Severity::Warning,
        "suggestion" => Severity::Suggestion,
        other => return Err(anyhow!("unknown type '{}'", other)),
    };
    match world.explained()?.kind() {
        Some(actual) if actual == expected => Ok(()),
        actual => Err(anyhow!(
            "Type {:?} does not match expected {}",
            actual.map(|kind| kind.as_str()),
            expected
        )),
    }
}

#[then(expr = "type is absent")]
fn type_is_absent(world: &mut ExplainWorld) -> Result<(), Error> {
    match world.explained()?.kind() {
        None => Ok(()),
        Some(kind) => Err(anyhow!("Expected no type, got {}", kind)),
    }
}

#[then(expr = "rule is {string}")]
fn rule_is(world: &mut ExplainWorld, expected: String) -> Result<(), Error> {
    let rule = world.verdict()?.rule;
    if rule.name() == expected {
        Ok(())
    } else {
        Err(anyhow!("Rule {} does not match expected {}", rule, expected))
    }
}

#[then(expr = "explanation contains {string}")]
fn explanation_contains(world: &mut ExplainWorld, needle: String) -> Result<(), Error> {
    let explanation = world.explained()?.explanation();
    if explanation.contains(&needle) {
        Ok(())
    } else {
        Err(anyhow!(
            "Explanation does not contain '{}':\n{}",
            needle,
            explanation
        ))
    }
}

#[then(expr = "explanation does not contain {string}")]
fn explanation_does_not_contain(world: &mut ExplainWorld, needle: String) -> Result<(), Error> {
    let explanation = world.explained()?.explanation();
    if explanation.contains(&needle) {
        Err(anyhow!(
            "Explanation unexpectedly contains '{}':\n{}",
            needle,
            explanation
        ))
    } else {
        Ok(())
    }
}

#[then(expr = "result is identical to the previous one")]
fn result_is_identical(world: &mut ExplainWorld) -> Result<(), Error> {
    let previous = world
        .state
        .previous
        .as_ref()
        .ok_or_else(|| anyhow!("exchange was explained only once"))?;
    let current = world.explained()?;

    let previous = serde_json::to_string(previous)?;
    let current = serde_json::to_string(current)?;
    if previous == current {
        Ok(())
    } else {
        Err(anyhow!(
            "Results differ:\n{}\n{}",
            previous,
            current
        ))
    }
}

#[then(expr = "span {string} field {string} is {string}")]
fn span_field_is(
    world: &mut ExplainWorld,
    span: String,
    field: String,
    expected: String,
) -> Result<(), Error> {
    let spans = world.spans()?;
    match spans.get_field(&span, &field) {
        Some(value) if value == expected => Ok(()),
        value => Err(anyhow!(
            "Span '{}' field '{}' is {:?}, expected '{}'. Captured spans: {:?}",
            span,
            field,
            value,
            expected,
            spans.span_names()
        )),
    }
}

#[then(expr = "result jq {string}")]
fn result_jq(world: &mut ExplainWorld, jq_expression: String) -> Result<(), Error> {
    let json_value = serde_json::to_value(world.explained()?)?;

    let result = apply_jq_expression(&jq_expression, json_value)?;

    let is_truthy = match result {
        Some(Value::Bool(b)) => b,
        _ => false,
    };

    if !is_truthy {
        return Err(anyhow!(
            "JQ expression '{}' evaluated to false",
            jq_expression
        ));
    }

    Ok(())
}

fn apply_jq_expression(expression: &str, input: Value) -> Result<Option<Value>, Error> {
    let program = File {
        code: expression,
        path: (),
    };
    let loader = Loader::new(jaq_std::defs().chain(jaq_json::defs()));
    let arena = Arena::default();
    let modules = loader
        .load(&arena, program)
        .map_err(|e| anyhow!("Failed to load JQ program: {:?}", e))?;
    let filter = jaq_core::Compiler::default()
        .with_funs(jaq_std::funs().chain(jaq_json::funs()))
        .compile(modules)
        .map_err(|e| anyhow!("Failed to compile JQ program: {:?}", e))?;
    let inputs = RcIter::new(core::iter::empty());
    let out = filter.run((Ctx::new([], &inputs), Val::from(input)));
    let results: Result<Vec<_>, _> = out.collect();

    match results {
        Ok(values) => {
            let mut values: Vec<Value> = values.into_iter().map(|v| v.into()).collect();
            match values.len() {
                0 => Ok(None),
                1 => Ok(values.pop()),
                _ => Ok(Some(Value::Array(values))),
            }
        }
        Err(e) => Err(anyhow!("JQ execution error: {:?}", e)),
    }
}
