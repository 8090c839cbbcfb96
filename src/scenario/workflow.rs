use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{debug, warn};

use crate::args::{DEFAULT_ITEM, DEFAULT_PASSWORD, DEFAULT_TRANSFER_RECIPIENT};

use super::checks::CheckRecorder;
use super::client::{ApiRequest, ApiResponse, ScenarioClient};
use super::identity::VirtualUser;
use super::steps::Step;

const REGISTER_PATH: &str = "/register";
const AUTH_PATH: &str = "/auth";
const INFO_PATH: &str = "/info";
const SEND_COIN_PATH: &str = "/sendCoin";
const BUY_PATH: &str = "/buy";

/// Request parameters of the workflow that do not depend on the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioSettings {
    pub password: String,
    pub transfer_to: String,
    pub transfer_amount: u64,
    pub item: String,
    pub purchase_amount: u64,
}

impl Default for ScenarioSettings {
    fn default() -> Self {
        Self {
            password: DEFAULT_PASSWORD.to_owned(),
            transfer_to: DEFAULT_TRANSFER_RECIPIENT.to_owned(),
            transfer_amount: 1,
            item: DEFAULT_ITEM.to_owned(),
            purchase_amount: 1,
        }
    }
}

/// Why an iteration ended before the purchase step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// Authentication answered with a non-200 status, or not at all.
    AuthenticationFailed { status: Option<u16> },
    /// Authentication answered 200 without a usable `token`.
    MissingToken,
}

/// How far one iteration got.
///
/// `steps_completed` lists every step whose request was sent and whose check
/// was recorded, pass or fail; `failed_steps` is the failing subset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IterationResult {
    pub registered: bool,
    pub authenticated: bool,
    pub steps_completed: Vec<Step>,
    pub failed_steps: Vec<Step>,
    pub coins: Option<i64>,
    pub stop: Option<StopReason>,
}

impl IterationResult {
    #[must_use]
    pub const fn short_circuited(&self) -> bool {
        self.stop.is_some()
    }

    /// All five steps ran, whatever their checks said.
    #[must_use]
    pub fn completed(&self) -> bool {
        self.stop.is_none() && self.steps_completed.len() == Step::ALL.len()
    }

    #[must_use]
    pub fn all_checks_passed(&self) -> bool {
        self.failed_steps.is_empty()
    }
}

#[derive(Debug, Deserialize)]
struct AuthResponse {
    token: String,
}

#[derive(Debug)]
struct StepOutcome {
    status: Option<u16>,
    passed: bool,
    response: Option<ApiResponse>,
}

/// The coin-service workflow, shared by every virtual user.
#[derive(Debug, Clone, Default)]
pub struct Scenario {
    settings: ScenarioSettings,
}

impl Scenario {
    #[must_use]
    pub const fn new(settings: ScenarioSettings) -> Self {
        Self { settings }
    }

    #[must_use]
    pub const fn settings(&self) -> &ScenarioSettings {
        &self.settings
    }

    /// Runs one iteration for `user`.
    ///
    /// Never fails: unexpected statuses and transport errors become failed
    /// checks. A failed authentication ends the iteration after two checks.
    pub async fn run_iteration<C, R>(
        &self,
        user: VirtualUser,
        client: &C,
        recorder: &R,
    ) -> IterationResult
    where
        C: ScenarioClient + ?Sized,
        R: CheckRecorder + ?Sized,
    {
        let username = user.username();
        let mut run = IterationRun {
            username: &username,
            client,
            recorder,
            result: IterationResult::default(),
        };
        let credentials = json!({
            "username": username,
            "password": self.settings.password,
        });

        let register = run
            .execute(
                Step::Register,
                ApiRequest::post_json(REGISTER_PATH, credentials.clone()),
            )
            .await;
        run.result.registered = register.passed;
        if register.status == Some(500) {
            debug!("{} already registered (status 500).", username);
        }

        let auth = run
            .execute(
                Step::Authenticate,
                ApiRequest::post_json(AUTH_PATH, credentials),
            )
            .await;
        run.result.authenticated = auth.passed;
        if !auth.passed {
            debug!(
                "{} not authenticated (status {:?}); skipping remaining steps.",
                username, auth.status
            );
            run.result.stop = Some(StopReason::AuthenticationFailed {
                status: auth.status,
            });
            return run.result;
        }

        let Some(token) = auth.response.as_ref().and_then(read_token) else {
            warn!(
                "{} authenticated but the response carried no token; skipping remaining steps.",
                username
            );
            run.result.stop = Some(StopReason::MissingToken);
            return run.result;
        };

        let info = run
            .execute(
                Step::FetchProfile,
                ApiRequest::get(INFO_PATH).with_bearer(&token),
            )
            .await;
        run.result.coins = info.response.as_ref().and_then(read_balance);

        let transfer = run
            .execute(
                Step::Transfer,
                ApiRequest::post_json(
                    SEND_COIN_PATH,
                    json!({
                        "toUser": self.settings.transfer_to,
                        "amount": self.settings.transfer_amount,
                    }),
                )
                .with_bearer(&token),
            )
            .await;
        debug!(
            "{} sent {} coin(s) to {}: status {:?}, last seen balance {:?}.",
            username,
            self.settings.transfer_amount,
            self.settings.transfer_to,
            transfer.status,
            run.result.coins
        );

        run.execute(
            Step::Purchase,
            ApiRequest::post_json(
                format!("{}/{}", BUY_PATH, self.settings.item),
                json!({ "amount": self.settings.purchase_amount }),
            )
            .with_bearer(&token),
        )
        .await;

        run.result
    }
}

struct IterationRun<'run, C: ?Sized, R: ?Sized> {
    username: &'run str,
    client: &'run C,
    recorder: &'run R,
    result: IterationResult,
}

impl<C, R> IterationRun<'_, C, R>
where
    C: ScenarioClient + ?Sized,
    R: CheckRecorder + ?Sized,
{
    async fn execute(&mut self, step: Step, request: ApiRequest) -> StepOutcome {
        let outcome = match self.client.send(request).await {
            Ok(response) => {
                let passed = step.accepts(response.status);
                if !passed {
                    warn!(
                        "Check '{}' failed for {}: status {}.",
                        step.check_name(),
                        self.username,
                        response.status
                    );
                }
                StepOutcome {
                    status: Some(response.status),
                    passed,
                    response: Some(response),
                }
            }
            Err(err) => {
                warn!(
                    "Check '{}' failed for {}: {}",
                    step.check_name(),
                    self.username,
                    err
                );
                StepOutcome {
                    status: None,
                    passed: false,
                    response: None,
                }
            }
        };

        self.recorder.record(step, outcome.passed);
        self.result.steps_completed.push(step);
        if !outcome.passed {
            self.result.failed_steps.push(step);
        }
        outcome
    }
}

fn read_token(response: &ApiResponse) -> Option<String> {
    response
        .json::<AuthResponse>()
        .ok()
        .map(|auth| auth.token)
        .filter(|token| !token.is_empty())
}

/// Reads `schema.coins`, falling back to a top-level `coins`.
fn read_balance(response: &ApiResponse) -> Option<i64> {
    let value: Value = response.json().ok()?;
    value
        .pointer("/schema/coins")
        .or_else(|| value.get("coins"))
        .and_then(Value::as_i64)
}
