//! World state for the step sentence scenarios.

use std::sync::{Arc, OnceLock};

use cucumber::World;
use webapi_application::{ApiContext, StepArgument, StepTable};
use webapi_infrastructure::{ClientConfig, ReqwestHttpClient};

static SUITE: OnceLock<Suite> = OnceLock::new();

/// Objects shared by every scenario of the run.
#[derive(Debug)]
pub struct Suite {
    client: Arc<ReqwestHttpClient>,
    table: Arc<StepTable>,
}

impl Suite {
    /// Builds the shared client and step table once.
    ///
    /// # Panics
    /// Panics if the client or the step patterns cannot be built.
    pub fn install(config: &ClientConfig) {
        let client = ReqwestHttpClient::new(config).expect("client configuration should be valid");
        let table = StepTable::new().expect("step patterns should compile");
        let _ = SUITE.set(Self {
            client: Arc::new(client),
            table: Arc::new(table),
        });
    }
}

/// One scenario: a fresh API context sharing the suite's client.
#[derive(Debug, World)]
#[world(init = Self::new)]
pub struct ApiWorld {
    context: ApiContext<ReqwestHttpClient>,
    table: Arc<StepTable>,
}

impl ApiWorld {
    fn new() -> Self {
        let suite = SUITE.get().expect("Suite::install runs before the scenarios");
        Self {
            context: ApiContext::with_client(Arc::clone(&suite.client)),
            table: Arc::clone(&suite.table),
        }
    }

    /// Runs one sentence, panicking with the step error on failure.
    pub async fn execute(&mut self, text: &str, argument: Option<StepArgument>) {
        if let Err(e) = self
            .context
            .execute(&self.table, text, argument.as_ref())
            .await
        {
            panic!("{e}");
        }
    }
}
