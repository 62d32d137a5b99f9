use cachelens_core::{Explained, Explanation};
use tracing::{debug, debug_span, field};

use crate::headers::ExchangeFacts;
use crate::rules::{Rule, advisory, decision};
use crate::{Exchange, ExplainConfig};

/// Explains an exchange with the default [`ExplainConfig`].
pub fn explain(exchange: &Exchange) -> Explained {
    Explainer::default().explain(exchange)
}

/// The result of an explanation together with the rule that decided it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub rule: Rule,
    pub explained: Explained,
}

/// Runs the rule tables over exchanges.
///
/// An `Explainer` holds no per-exchange state and can be shared freely
/// between threads.
#[derive(Debug, Clone, Default)]
pub struct Explainer {
    config: ExplainConfig,
}

impl Explainer {
    pub fn new(config: ExplainConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExplainConfig {
        &self.config
    }

    pub fn explain(&self, exchange: &Exchange) -> Explained {
        self.verdict(exchange).explained
    }

    pub fn verdict(&self, exchange: &Exchange) -> Verdict {
        let span = debug_span!(
            "cachelens.explain",
            method = %exchange.method(),
            status = exchange.status().as_u16(),
            rule = field::Empty,
            summary = field::Empty,
        );
        let _enter = span.enter();

        let facts = ExchangeFacts::interpret(exchange);
        let rule = decision::classify(exchange, &facts);
        span.record("rule", rule.name());

        let mut explanation = Explanation::new(rule.summary(), decision::primary(rule, exchange, &facts));
        explanation.extend(advisory::advise(rule, &facts, &self.config));

        let explained = explanation.compose();
        span.record("summary", explained.summary().as_str());
        debug!(kind = ?explained.kind(), "exchange explained");

        Verdict { rule, explained }
    }
}
