//! Serve command handler

use crate::config::{Environment, Settings};
use crate::server::Server;

pub struct ServeCommandHandler {
    config: Settings,
    environment: Environment,
}

impl ServeCommandHandler {
    pub fn new(config: Settings, environment: Environment) -> Self {
        Self {
            config,
            environment,
        }
    }

    /// Runs the server, or with `dry_run` only validates and reports what
    /// would be served.
    pub async fn execute(self, dry_run: bool) -> anyhow::Result<()> {
        self.config.validate()?;

        if dry_run {
            self.report();
            return Ok(());
        }

        Server::new(self.config, self.environment).run().await
    }

    fn report(&self) {
        println!("✓ Configuration is valid ({})", self.environment);
        println!("✓ Server would bind to: {}", self.config.server.address());
        println!("✓ Member API v2 mounted at /api/v2/members");
        if self.config.api.enable_legacy_v1 {
            println!("✓ Legacy member API mounted at /api/v1/members");
        }
        if self.config.api.enable_swagger {
            println!("✓ Swagger UI at /swagger-ui");
        }
        println!("Dry run completed successfully - configuration is ready for deployment");
    }

    pub fn config(&self) -> &Settings {
        &self.config
    }
}
