use log::{debug, warn};

use super::classify::classify;
use super::events::{NullObserver, RunEvent, RunObserver};
use super::state::{ScenarioResult, ScenarioState, Status};
use crate::driver::traits::{DriverResult, PageDriver};
use crate::parser::types::ScenarioSpec;
use crate::utils::config::RunConfig;

/// Runs login scenarios one at a time against a single page driver
pub struct ScenarioRunner<'a, D: PageDriver + ?Sized> {
    driver: &'a D,
    config: &'a RunConfig,
}

impl<'a, D: PageDriver + ?Sized> ScenarioRunner<'a, D> {
    pub fn new(driver: &'a D, config: &'a RunConfig) -> Self {
        Self { driver, config }
    }

    /// Execute every scenario in order and return one result each
    pub async fn run_all(&self, specs: &[ScenarioSpec]) -> Vec<ScenarioResult> {
        self.run_all_observed(specs, &mut NullObserver).await
    }

    pub async fn run_all_observed(
        &self,
        specs: &[ScenarioSpec],
        observer: &mut dyn RunObserver,
    ) -> Vec<ScenarioResult> {
        observer.on_event(&RunEvent::RunStarted {
            scenario_count: specs.len(),
            target_url: self.config.target_url.clone(),
        });

        let mut results = Vec::with_capacity(specs.len());
        for (index, spec) in specs.iter().enumerate() {
            observer.on_event(&RunEvent::ScenarioStarted {
                index,
                name: spec.name.clone(),
            });

            let result = self.run_scenario(spec).await;

            observer.on_event(&RunEvent::ScenarioFinished {
                index,
                result: result.clone(),
            });
            results.push(result);
        }

        let passed = results.iter().filter(|r| r.status == Status::Pass).count();
        observer.on_event(&RunEvent::RunFinished {
            passed,
            total: results.len(),
        });

        results
    }

    /// Execute one scenario. Driver faults are folded into an `ERROR` result.
    pub async fn run_scenario(&self, spec: &ScenarioSpec) -> ScenarioResult {
        let mut state = ScenarioState::new(spec);

        if let Err(e) = self.drive(spec, &mut state).await {
            warn!("scenario '{}' errored in phase {}: {}", spec.name, state.phase().name(), e);
            state.fail(e.to_string());
        }

        state.record()
    }

    async fn drive(&self, spec: &ScenarioSpec, state: &mut ScenarioState<'_>) -> DriverResult<()> {
        let form = &self.config.form;

        self.driver.navigate(&self.config.target_url).await?;

        for selector in [&form.username, &form.password, &form.submit] {
            self.driver.locate(selector).await?;
        }

        self.driver.clear(&form.username).await?;
        self.driver.clear(&form.password).await?;
        self.driver.type_text(&form.username, &spec.username).await?;
        self.driver.type_text(&form.password, &spec.password).await?;

        self.driver.click(&form.submit).await?;
        state.submit();

        tokio::time::sleep(self.config.settle_delay).await;

        let url = self.driver.current_url().await?;
        let content = self.driver.page_content().await?;
        let actual = classify(&url, &content);
        debug!("scenario '{}' classified as {} at {}", spec.name, actual, url);
        state.classify(actual, url);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::traits::Selector;
    use crate::parser::types::Outcome;
    use crate::parser::yaml::default_scenarios;
    use crate::runner::events::RecordingObserver;
    use crate::runner::fake_driver::FakeDriver;
    use crate::runner::state::ActualOutcome;

    #[tokio::test]
    async fn test_default_scenarios_against_fake_site() {
        let driver = FakeDriver::new();
        let config = FakeDriver::config();
        let runner = ScenarioRunner::new(&driver, &config);

        let specs = default_scenarios();
        let results = runner.run_all(&specs).await;

        assert_eq!(results.len(), specs.len());
        for (spec, result) in specs.iter().zip(&results) {
            assert_eq!(spec.name, result.name);
            assert_eq!(result.status, Status::Pass, "{}", result.name);
        }
        assert_eq!(results[0].actual, ActualOutcome::Success);
        assert_eq!(results[0].url.as_deref(), Some(FakeDriver::SECURE_URL));
        assert_eq!(results[5].password, "empty");
    }

    #[tokio::test]
    async fn test_empty_inputs_are_typed_literally() {
        let driver = FakeDriver::new();
        let config = FakeDriver::config();
        let runner = ScenarioRunner::new(&driver, &config);

        let spec = ScenarioSpec::new("Both Empty", "", "", Outcome::Failure);
        runner.run_scenario(&spec).await;

        let calls = driver.calls();
        assert!(calls.contains(&"type id=username ''".to_string()));
        assert!(calls.contains(&"type id=password ''".to_string()));
        // Clear happens before typing
        let clear = calls.iter().position(|c| c == "clear id=username").unwrap();
        let typed = calls.iter().position(|c| c.starts_with("type id=username")).unwrap();
        assert!(clear < typed);
    }

    #[tokio::test]
    async fn test_missing_element_errors_and_run_continues() {
        let driver = FakeDriver::new().without(Selector::css("button[type='submit']"));
        let config = FakeDriver::config();
        let runner = ScenarioRunner::new(&driver, &config);

        let specs = default_scenarios();
        let results = runner.run_all(&specs[..3]).await;

        assert_eq!(results.len(), 3);
        for result in &results {
            assert_eq!(result.status, Status::Error);
            assert_eq!(result.actual, ActualOutcome::Unknown);
            assert!(result.url.is_none());
            assert_eq!(
                result.error.as_deref(),
                Some("Element not found: css=button[type='submit']")
            );
        }
        // Each scenario re-navigates to the login page
        let navigations = driver.calls().iter().filter(|c| c.starts_with("navigate")).count();
        assert_eq!(navigations, 3);
        // Nothing was typed before lookup failed
        assert!(!driver.calls().iter().any(|c| c.starts_with("type")));
    }

    #[tokio::test]
    async fn test_unexpected_outcome_is_fail() {
        let driver = FakeDriver::new();
        let config = FakeDriver::config();
        let runner = ScenarioRunner::new(&driver, &config);

        let spec = ScenarioSpec::new("Expect success", "wronguser", "wrongpass", Outcome::Success);
        let result = runner.run_scenario(&spec).await;
        assert_eq!(result.status, Status::Fail);
        assert_eq!(result.actual, ActualOutcome::Failure);
        assert_eq!(result.url.as_deref(), Some(FakeDriver::LOGIN_URL));
    }

    #[tokio::test]
    async fn test_page_state_fault_after_submit() {
        let driver = FakeDriver::new().failing_page_state();
        let config = FakeDriver::config();
        let runner = ScenarioRunner::new(&driver, &config);

        let spec = ScenarioSpec::new("Valid", "tomsmith", "SuperSecretPassword!", Outcome::Success);
        let result = runner.run_scenario(&spec).await;
        assert_eq!(result.status, Status::Error);
        assert!(result.error.unwrap().contains("Could not read page state"));
    }

    #[tokio::test]
    async fn test_observer_sees_events_in_order() {
        let driver = FakeDriver::new();
        let config = FakeDriver::config();
        let runner = ScenarioRunner::new(&driver, &config);
        let mut observer = RecordingObserver::default();

        let specs = default_scenarios();
        runner.run_all_observed(&specs[..2], &mut observer).await;

        assert_eq!(observer.events.len(), 6);
        assert!(matches!(
            observer.events[0],
            RunEvent::RunStarted { scenario_count: 2, .. }
        ));
        assert!(matches!(observer.events[1], RunEvent::ScenarioStarted { index: 0, .. }));
        assert!(matches!(observer.events[4], RunEvent::ScenarioFinished { index: 1, .. }));
        assert_eq!(
            observer.events[5],
            RunEvent::RunFinished { passed: 2, total: 2 }
        );
    }

    #[tokio::test]
    async fn test_empty_spec_list() {
        let driver = FakeDriver::new();
        let config = FakeDriver::config();
        let runner = ScenarioRunner::new(&driver, &config);
        assert!(runner.run_all(&[]).await.is_empty());
        assert!(driver.calls().is_empty());
    }
}
