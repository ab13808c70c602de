/*
 * Responsibility
 * - Shared, read-only context bound to the Router (AppState)
 *   - chain: security filter chain, policy: route access rules
 * - Cheap to clone (Arc inside)
 */
use std::sync::Arc;

use crate::security::{AccessPolicy, FilterChain};

#[derive(Clone, Debug)]
pub struct AppState {
    pub chain: Arc<FilterChain>,
    pub policy: Arc<AccessPolicy>,
}

impl AppState {
    pub fn new(chain: Arc<FilterChain>, policy: Arc<AccessPolicy>) -> Self {
        Self { chain, policy }
    }
}
