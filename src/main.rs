/*
 * Responsibility
 * - tokio runtime startup
 * - app::run() (no logic here)
 */
use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    resource_access::app::run().await
}
