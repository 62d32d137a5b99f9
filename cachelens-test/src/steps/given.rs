use anyhow::{Error, anyhow};
use cachelens_configuration::ExchangeConfig;
use cachelens_http::ExplainConfig;
use cucumber::gherkin::Step;
use cucumber::given;

use crate::world::{ExplainWorld, StepExt};

#[given(expr = "exchange")]
fn exchange(world: &mut ExplainWorld, step: &Step) -> Result<(), Error> {
    let yaml = step
        .docstring_content()
        .ok_or_else(|| anyhow!("exchange not provided"))?;
    world.exchange = ExchangeConfig::from_yaml(&yaml)?;
    Ok(())
}

#[given(expr = "explainer configured with")]
fn explainer_config(world: &mut ExplainWorld, step: &Step) -> Result<(), Error> {
    let yaml = step
        .docstring_content()
        .ok_or_else(|| anyhow!("configuration not provided"))?;
    world.config = serde_saphyr::from_str::<ExplainConfig>(&yaml)?;
    Ok(())
}

#[given(expr = "request method {word}")]
fn request_method(world: &mut ExplainWorld, method: String) {
    world.exchange.method = method;
}

#[given(expr = "response status {int}")]
fn response_status(world: &mut ExplainWorld, status: u16) {
    world.exchange.status = status;
}
