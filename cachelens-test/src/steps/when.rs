use anyhow::Error;
use cucumber::when;

use crate::world::ExplainWorld;

#[when(expr = "the exchange is explained")]
fn explain(world: &mut ExplainWorld) -> Result<(), Error> {
    world.explain()
}

#[when(expr = "the exchange is explained again")]
fn explain_again(world: &mut ExplainWorld) -> Result<(), Error> {
    world.explain()
}
