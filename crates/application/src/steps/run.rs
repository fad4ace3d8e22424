//! Step execution

use tracing::debug;

use super::{Step, StepArgument, StepTable};
use crate::context::ApiContext;
use crate::error::StepResult;
use crate::ports::HttpClient;

impl<C: HttpClient> ApiContext<C> {
    /// Runs one parsed step against this context.
    ///
    /// # Errors
    ///
    /// Returns whatever the underlying operation returns.
    pub async fn run(&mut self, step: Step) -> StepResult {
        debug!(kind = ?step.kind(), "running step");
        match step {
            Step::AuthenticateAs { username, password } => {
                self.authenticate_as(&username, &password);
                Ok(())
            }
            Step::SetHeader { name, value } => {
                self.set_header(&name, &value);
                Ok(())
            }
            Step::SetPlaceholder { token, value } => {
                self.set_placeholder(&token, &value);
                Ok(())
            }
            Step::Send { method, url } => self.send_request(method, &url).await,
            Step::SendWithValues {
                method,
                url,
                fields,
            } => self.send_request_with_values(method, &url, &fields).await,
            Step::SendWithBody { method, url, body } => {
                self.send_request_with_body(method, &url, &body).await
            }
            Step::SendWithFormData { method, url, body } => {
                self.send_request_with_form_data(method, &url, &body).await
            }
            Step::ResponseCode(code) => self.assert_status(code),
            Step::ResponseContains(text) => self.assert_body_contains(&text),
            Step::ResponseNotContains(text) => self.assert_body_not_contains(&text),
            Step::ResponseContainsJson(etalon) => self.assert_body_contains_json(&etalon),
            Step::ResponseHeader { name, value } => self.assert_header(&name, &value),
            Step::PrintResponse => self.print_response(),
        }
    }

    /// Parses a sentence with `table` and runs it.
    ///
    /// # Errors
    ///
    /// Returns parse errors from the table, then errors from the step.
    pub async fn execute(
        &mut self,
        table: &StepTable,
        text: &str,
        argument: Option<&StepArgument>,
    ) -> StepResult {
        let step = table.parse(text, argument)?;
        self.run(step).await
    }
}
