use anyhow::{Error, anyhow};
use cachelens_configuration::ExchangeConfig;
use cachelens_core::Explained;
use cachelens_http::{ExplainConfig, Explainer, Verdict};
use cucumber::World;
use cucumber::gherkin::Step;

use crate::tracing::{SpanCollector, with_span_capture};

#[derive(Debug, Default)]
pub struct State {
    pub verdict: Option<Verdict>,
    pub previous: Option<Explained>,
    pub spans: Option<SpanCollector>,
}

#[derive(Debug, Default, World)]
pub struct ExplainWorld {
    pub exchange: ExchangeConfig,
    pub config: ExplainConfig,
    pub state: State,
}

impl ExplainWorld {
    /// Builds the configured exchange and explains it, keeping the spans
    /// emitted along the way.
    pub fn explain(&mut self) -> Result<(), Error> {
        let exchange = self.exchange.clone().into_exchange()?;
        let explainer = Explainer::new(self.config.clone());

        let (verdict, spans) = with_span_capture(|| explainer.verdict(&exchange));

        self.state.previous = self.state.verdict.take().map(|verdict| verdict.explained);
        self.state.verdict = Some(verdict);
        self.state.spans = Some(spans);
        Ok(())
    }

    pub fn verdict(&self) -> Result<&Verdict, Error> {
        self.state
            .verdict
            .as_ref()
            .ok_or_else(|| anyhow!("exchange was not explained"))
    }

    pub fn explained(&self) -> Result<&Explained, Error> {
        self.verdict().map(|verdict| &verdict.explained)
    }

    pub fn spans(&self) -> Result<&SpanCollector, Error> {
        self.state
            .spans
            .as_ref()
            .ok_or_else(|| anyhow!("no spans captured"))
    }
}

pub trait StepExt {
    fn docstring_content(&self) -> Option<String>;
}

impl StepExt for Step {
    fn docstring_content(&self) -> Option<String> {
        self.docstring()
            .map(|docstring| docstring.lines().skip(1).collect::<Vec<_>>().join("\n"))
    }
}
