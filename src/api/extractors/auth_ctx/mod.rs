/*!
 * Authentication context extractor
 *
 * Responsibility:
 * - hand the authenticated principal installed by the filter chain to handlers
 * - the context type itself lives in `security::context`
 */

mod core;

pub use self::core::AuthCtx;
