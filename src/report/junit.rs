use super::types::RunReport;
use crate::runner::state::{ScenarioResult, Status};
use anyhow::Result;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::Cursor;
use std::path::Path;

/// Generate JUnit XML from a run report
pub fn generate_junit_xml(report: &RunReport) -> Result<String> {
    let mut writer = Writer::new(Cursor::new(Vec::new()));

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let summary = &report.summary;
    let tests = summary.total_tests.to_string();
    let failures = summary.failed.to_string();
    let errors = summary.errors.to_string();
    let run_id = uuid::Uuid::new_v4().to_string();
    let timestamp = chrono::Local::now().format("%Y-%m-%dT%H:%M:%S").to_string();

    let mut suites_start = BytesStart::new("testsuites");
    suites_start.push_attribute(("name", "lumi-scenarios-run"));
    suites_start.push_attribute(("tests", tests.as_str()));
    suites_start.push_attribute(("failures", failures.as_str()));
    suites_start.push_attribute(("errors", errors.as_str()));
    writer.write_event(Event::Start(suites_start))?;

    let mut suite_start = BytesStart::new("testsuite");
    suite_start.push_attribute(("name", report.test_environment.website.as_str()));
    suite_start.push_attribute(("tests", tests.as_str()));
    suite_start.push_attribute(("failures", failures.as_str()));
    suite_start.push_attribute(("errors", errors.as_str()));
    suite_start.push_attribute(("id", run_id.as_str()));
    suite_start.push_attribute(("timestamp", timestamp.as_str()));
    suite_start.push_attribute(("hostname", report.test_environment.driver.as_str()));
    writer.write_event(Event::Start(suite_start))?;

    for result in &report.detailed_results {
        write_test_case(&mut writer, result)?;
    }

    writer.write_event(Event::End(BytesEnd::new("testsuite")))?;
    writer.write_event(Event::End(BytesEnd::new("testsuites")))?;

    let xml = String::from_utf8(writer.into_inner().into_inner())?;
    Ok(xml)
}

fn write_test_case<W: std::io::Write>(writer: &mut Writer<W>, result: &ScenarioResult) -> Result<()> {
    let mut case_start = BytesStart::new("testcase");
    case_start.push_attribute(("name", result.name.as_str()));
    case_start.push_attribute(("classname", "login"));

    if result.status == Status::Pass {
        writer.write_event(Event::Empty(case_start))?;
        return Ok(());
    }
    writer.write_event(Event::Start(case_start))?;

    let (tag, message, kind) = match result.status {
        Status::Fail => (
            "failure",
            format!("Expected {}, got {}", result.expected, result.actual),
            "OutcomeMismatch",
        ),
        _ => (
            "error",
            result.error.clone().unwrap_or_else(|| "Unknown error".to_string()),
            "ScenarioFault",
        ),
    };

    let mut start = BytesStart::new(tag);
    start.push_attribute(("message", message.as_str()));
    start.push_attribute(("type", kind));
    writer.write_event(Event::Start(start))?;
    if let Some(url) = &result.url {
        writer.write_event(Event::Text(BytesText::new(&format!("Final URL: {}", url))))?;
    }
    writer.write_event(Event::End(BytesEnd::new(tag)))?;

    writer.write_event(Event::End(BytesEnd::new("testcase")))?;
    Ok(())
}

/// Write JUnit XML to a file
pub fn write(report: &RunReport, path: &Path) -> Result<()> {
    let xml = generate_junit_xml(report)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, xml)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::types::Outcome;
    use crate::report::build_report;
    use crate::report::types::TestEnvironment;
    use crate::runner::state::ActualOutcome;

    fn result(name: &str, status: Status, actual: ActualOutcome, error: Option<&str>) -> ScenarioResult {
        ScenarioResult {
            name: name.to_string(),
            username: "tomsmith".to_string(),
            password: "***".to_string(),
            expected: Outcome::Failure,
            actual,
            status,
            url: error.is_none().then(|| "https://x/login".to_string()),
            error: error.map(str::to_string),
        }
    }

    #[test]
    fn test_generate_junit_xml() {
        let report = build_report(
            vec![
                result("Invalid Password", Status::Pass, ActualOutcome::Failure, None),
                result("Both Empty", Status::Fail, ActualOutcome::Unknown, None),
                result(
                    "Space in Username",
                    Status::Error,
                    ActualOutcome::Unknown,
                    Some("Element not found: id=username"),
                ),
            ],
            TestEnvironment {
                website: "https://x/login".to_string(),
                driver: "fake".to_string(),
            },
        );

        let xml = generate_junit_xml(&report).expect("Failed to generate XML");

        assert!(xml.contains(r#"<testsuites name="lumi-scenarios-run""#));
        assert!(xml.contains(r#"tests="3""#));
        assert!(xml.contains(r#"failures="1""#));
        assert!(xml.contains(r#"errors="1""#));
        assert!(xml.contains(r#"<testcase name="Invalid Password" classname="login"/>"#));
        assert!(xml.contains(r#"message="Expected failure, got unknown""#));
        assert!(xml.contains(r#"message="Element not found: id=username""#));
    }
}
