//! Sentence pattern table

use regex::{Captures, Regex};
use webapi_domain::HttpMethod;

use super::{Step, StepArgument, StepKind};
use crate::error::{StepError, StepResult};

const SEND: &str = r#"(?:I )?send a ([A-Z]+) request to "([^"]+)""#;

/// Ordered list of sentence patterns, one per step kind.
#[derive(Debug, Clone)]
pub struct StepTable {
    entries: Vec<(StepKind, Regex)>,
}

impl StepTable {
    /// Compiles the step patterns.
    ///
    /// # Errors
    ///
    /// Returns `StepError::Pattern` if a pattern fails to compile.
    pub fn new() -> StepResult<Self> {
        let patterns = [
            (
                StepKind::AuthenticateAs,
                r#"I am authenticating as "([^"]*)" with "([^"]*)" password"#.to_string(),
            ),
            (
                StepKind::SetHeader,
                r#"I set header "([^"]*)" with value "([^"]*)""#.to_string(),
            ),
            (
                StepKind::SetPlaceholder,
                r#"I set placeholder "([^"]*)" with value "([^"]*)""#.to_string(),
            ),
            (StepKind::Send, SEND.to_string()),
            (StepKind::SendWithValues, format!("{SEND} with values:")),
            (StepKind::SendWithBody, format!("{SEND} with body:")),
            (StepKind::SendWithFormData, format!("{SEND} with form data:")),
            (
                StepKind::ResponseCode,
                r"(?:the )?response code should be (\d+)".to_string(),
            ),
            (
                StepKind::ResponseContains,
                r#"(?:the )?response should contain "([^"]*)""#.to_string(),
            ),
            (
                StepKind::ResponseNotContains,
                r#"(?:the )?response should not contain "([^"]*)""#.to_string(),
            ),
            (
                StepKind::ResponseContainsJson,
                r"(?:the )?response should contain json:".to_string(),
            ),
            (
                StepKind::ResponseHeader,
                r#"the response "([^"]*)" header should be "([^"]*)""#.to_string(),
            ),
            (StepKind::PrintResponse, "print response".to_string()),
        ];

        let entries = patterns
            .into_iter()
            .map(|(kind, pattern)| Regex::new(&format!("^{pattern}$")).map(|regex| (kind, regex)))
            .collect::<Result<Vec<_>, regex::Error>>()?;

        Ok(Self { entries })
    }

    /// Resolves a sentence and its argument into a step.
    ///
    /// Arguments on sentences that take none are ignored.
    ///
    /// # Errors
    ///
    /// - `UndefinedStep` if no pattern matches.
    /// - `MissingArgument` if the sentence needs a doc string or table that
    ///   is absent or of the other kind.
    /// - `InvalidArgument` for a table row that is not two cells, or a status
    ///   code out of range.
    /// - `Domain` for an unsupported method.
    pub fn parse(&self, text: &str, argument: Option<&StepArgument>) -> StepResult<Step> {
        let text = text.trim();
        let (kind, captures) = self
            .entries
            .iter()
            .find_map(|(kind, regex)| regex.captures(text).map(|c| (*kind, c)))
            .ok_or_else(|| StepError::UndefinedStep(text.to_string()))?;

        let cap = |index: usize| group(&captures, index);

        let step = match kind {
            StepKind::AuthenticateAs => Step::AuthenticateAs {
                username: cap(1),
                password: cap(2),
            },
            StepKind::SetHeader => Step::SetHeader {
                name: cap(1),
                value: cap(2),
            },
            StepKind::SetPlaceholder => Step::SetPlaceholder {
                token: cap(1),
                value: cap(2),
            },
            StepKind::Send => Step::Send {
                method: cap(1).parse::<HttpMethod>()?,
                url: cap(2),
            },
            StepKind::SendWithValues => Step::SendWithValues {
                method: cap(1).parse::<HttpMethod>()?,
                url: cap(2),
                fields: table_pairs(text, require_table(text, kind, argument)?)?,
            },
            StepKind::SendWithBody => Step::SendWithBody {
                method: cap(1).parse::<HttpMethod>()?,
                url: cap(2),
                body: require_doc_string(text, kind, argument)?,
            },
            StepKind::SendWithFormData => Step::SendWithFormData {
                method: cap(1).parse::<HttpMethod>()?,
                url: cap(2),
                body: require_doc_string(text, kind, argument)?,
            },
            StepKind::ResponseCode => Step::ResponseCode(status_code(text, &cap(1))?),
            StepKind::ResponseContains => Step::ResponseContains(cap(1)),
            StepKind::ResponseNotContains => Step::ResponseNotContains(cap(1)),
            StepKind::ResponseContainsJson => {
                Step::ResponseContainsJson(require_doc_string(text, kind, argument)?)
            }
            StepKind::ResponseHeader => Step::ResponseHeader {
                name: cap(1),
                value: cap(2),
            },
            StepKind::PrintResponse => Step::PrintResponse,
        };

        Ok(step)
    }
}

fn group(captures: &Captures<'_>, index: usize) -> String {
    captures
        .get(index)
        .map_or_else(String::new, |m| m.as_str().to_string())
}

fn missing(text: &str, kind: StepKind) -> StepError {
    StepError::MissingArgument {
        step: text.to_string(),
        expected: kind.expected_argument().unwrap_or("an argument"),
    }
}

fn require_doc_string(
    text: &str,
    kind: StepKind,
    argument: Option<&StepArgument>,
) -> StepResult<String> {
    match argument {
        Some(StepArgument::DocString(content)) => Ok(content.clone()),
        _ => Err(missing(text, kind)),
    }
}

fn require_table<'a>(
    text: &str,
    kind: StepKind,
    argument: Option<&'a StepArgument>,
) -> StepResult<&'a [Vec<String>]> {
    match argument {
        Some(StepArgument::Table(rows)) => Ok(rows),
        _ => Err(missing(text, kind)),
    }
}

fn table_pairs(text: &str, rows: &[Vec<String>]) -> StepResult<Vec<(String, String)>> {
    rows.iter()
        .enumerate()
        .map(|(index, row)| match row.as_slice() {
            [key, value] => Ok((key.clone(), value.clone())),
            cells => Err(StepError::InvalidArgument {
                step: text.to_string(),
                message: format!(
                    "table row {} has {} cells, expected 2",
                    index + 1,
                    cells.len()
                ),
            }),
        })
        .collect()
}

// Leading zeros are dropped before parsing so "0200" reads as 200.
fn status_code(text: &str, digits: &str) -> StepResult<u16> {
    let significant = digits.trim_start_matches('0');
    let significant = if significant.is_empty() { "0" } else { significant };
    significant
        .parse::<u16>()
        .map_err(|e| StepError::InvalidArgument {
            step: text.to_string(),
            message: format!("status code {digits}: {e}"),
        })
}
