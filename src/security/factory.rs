/// Factory: build the request filter chain from application `Config`.
use std::sync::Arc;

use crate::config::Config;
use crate::security::chain::FilterChain;
use crate::security::error::ChainError;
use crate::security::gateway::GatewayAssertionFilter;
use crate::security::resource_access::ResourceAccessFilter;

// Login is served by the identity service; no primary authentication stage is mounted here.
pub fn build_filter_chain(config: &Config) -> Result<Arc<FilterChain>, ChainError> {
    let mut builder = FilterChain::builder();

    if let Some(gateway) = &config.gateway {
        builder = builder.stage(GatewayAssertionFilter::new(Arc::new(gateway.clone())));
    }

    let chain = builder
        .stage(ResourceAccessFilter::new(Arc::new(config.access.clone())))
        .build()?;

    tracing::info!(stages = ?chain.kinds(), "security filter chain assembled");
    Ok(Arc::new(chain))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::security::chain::StageKind;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> Config {
        let env: HashMap<&str, &str> = pairs.iter().copied().collect();
        Config::from_lookup(|key| env.get(key).map(|v| v.to_string())).expect("config")
    }

    #[test]
    fn resource_access_only_without_gateway_secret() {
        let chain = build_filter_chain(&config(&[("ACCESS_SECRET", "s")])).expect("chain");
        assert_eq!(chain.kinds(), vec![StageKind::ResourceAccess]);
    }

    #[test]
    fn gateway_runs_before_resource_access() {
        let chain = build_filter_chain(&config(&[
            ("ACCESS_SECRET", "s"),
            ("GATEWAY_SECRET", "g"),
        ]))
        .expect("chain");
        assert_eq!(
            chain.kinds(),
            vec![StageKind::GatewayAssertion, StageKind::ResourceAccess]
        );
    }
}
