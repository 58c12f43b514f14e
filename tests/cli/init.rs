use anyhow::{Context, Result};
use insta_cmd::assert_cmd_snapshot;
use serde_json::Value;

use crate::{CATALOG, CliTest, stderr};

/// Validates config file structure and default values.
fn assert_config_content(content: &str) -> Result<()> {
    let parsed: Value = serde_json::from_str(content).context("Config should be valid JSON")?;

    assert_eq!(parsed["mode"], "inline");
    assert_eq!(parsed["referenceLanguage"], "en");
    assert_eq!(parsed["extensions"], serde_json::json!(["js"]));
    assert!(
        parsed["languages"].as_array().is_some_and(|l| !l.is_empty()),
        "Config should list the known languages"
    );
    assert!(
        content.contains("  "),
        "Config should use 2-space indentation"
    );

    Ok(())
}

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().arg("init").output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(test.root().join(".transjectrc.json").exists());

    let content = test.read_file(".transjectrc.json")?;
    assert_config_content(&content)?;

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".transjectrc.json", "{}")?;

    assert_cmd_snapshot!(test.command().arg("init"), @r"
    success: false
    exit_code: 3
    ----- stdout -----

    ----- stderr -----
    error: .transjectrc.json already exists
    ");

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::new()?;
    test.command().arg("init").output()?;

    test.write_file("catalog.tsv", CATALOG)?;
    test.write_file("app.js", "show(translations.simple.en)\n")?;

    // A missing formatter is only reported with --verbose.
    let output = test.command().args(["inject", "--catalog", "catalog.tsv"]).output()?;
    assert!(
        output.status.success(),
        "Inject should work with initialized config. stderr: {}",
        stderr(&output)
    );
    assert!(test.read_file("app.js")?.contains("const translations = "));

    Ok(())
}
