use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;

use crate::{CliTest, stderr, stdout};

#[test]
fn test_inline_injection() -> Result<()> {
    let test = CliTest::with_file("app.js", "show(translations.simple.sv)\n")?;

    let output = test.inject_command().output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "\u{2713} Checked 1 source file, updated 1 file\n"
    );

    let expected = [
        "show(translations.simple.sv)",
        "",
        "const translations = Object.freeze({",
        "  simple: {",
        "    ar: Object.freeze({ text: `بسيط`, rtl: true, languageId: `ar` }),",
        "    en: Object.freeze({ text: `Simple`, rtl: false, languageId: `en` }),",
        "    sv: Object.freeze({ text: `Enkelt`, rtl: false, languageId: `sv` }),",
        "  },",
        "})",
        "",
    ]
    .join("\n");
    assert_eq!(test.read_file("app.js")?, expected);

    Ok(())
}

#[test]
fn test_second_run_is_a_no_op() -> Result<()> {
    let test = CliTest::with_file("app.js", "show(translations.animal.en.duck)\n")?;

    test.inject_command().output()?;
    let first = test.read_file("app.js")?;

    let output = test.inject_command().output()?;
    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "\u{2713} Checked 1 source file - everything up to date\n"
    );
    assert_eq!(test.read_file("app.js")?, first);

    Ok(())
}

#[test]
fn test_sibling_mode() -> Result<()> {
    let test = CliTest::with_file("app.js", "show(translations.onlyEn.sv)\n")?;

    let output = test.inject_command().args(["--mode", "sibling"]).output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    assert_eq!(
        test.read_file("app.js")?,
        "import translations from \"./app.translations.js\"\nshow(translations.onlyEn.sv)\n"
    );
    let module = test.read_file("app.translations.js")?;
    assert!(module.starts_with("export default translations = Object.freeze({\n"));
    assert!(module.contains(
        "    sv: Object.freeze({ text: `This is English`, rtl: false, languageId: `en` }),"
    ));

    Ok(())
}

#[test]
fn test_sibling_inside_same_named_directory() -> Result<()> {
    let test = CliTest::with_file("src/page.js", "show(translations.simple.en)\n")?;
    test.write_file("src/page/part.js", "const x = 1\n")?;

    let output = test.inject_command().args(["--mode", "sibling"]).output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    assert!(
        test.read_file("src/page.js")?
            .starts_with("import translations from \"./page/translations.js\"\n")
    );
    assert!(test.root().join("src/page/translations.js").exists());
    assert_eq!(test.read_file("src/page/part.js")?, "const x = 1\n");

    Ok(())
}

#[test]
fn test_removing_last_usage_tears_down_block() -> Result<()> {
    let test = CliTest::with_file("app.js", "show(translations.simple.en)\n")?;
    test.inject_command().output()?;

    let edited = test
        .read_file("app.js")?
        .replace("show(translations.simple.en)", "show('plain')");
    test.write_file("app.js", &edited)?;

    let output = test.inject_command().output()?;
    assert!(output.status.success());
    assert_eq!(test.read_file("app.js")?, "show('plain')\n");

    Ok(())
}

#[test]
fn test_warnings_are_reported_with_location() -> Result<()> {
    let test = CliTest::with_file(
        "app.js",
        "const a = 1\nshow(translations.lacking.en)\nshow(translations.nope.en)\n",
    )?;

    assert_cmd_snapshot!(test.inject_command(), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Checked 1 source file, updated 1 file

    ----- stderr -----
    warning: Missing translation: lacking.en  missing-translation
      --> ./app.js:2:6
      |
    2 | show(translations.lacking.en)
      |      ^

    warning: The key 'nope' was requested, but there is no such row in the document  unknown-key
      --> ./app.js:3:6
      |
    3 | show(translations.nope.en)
      |      ^
      = hint: add a row with this id to the catalog, or fix the key name

    ✘ 2 problems (0 errors, 2 warnings)
    ");

    let written = test.read_file("app.js")?;
    assert!(written.contains("en: Object.freeze({ text: `[nope]`, rtl: false, languageId: `en` }),"));

    Ok(())
}

#[test]
fn test_dry_run_writes_nothing() -> Result<()> {
    let test = CliTest::with_file("app.js", "show(translations.simple.en)\n")?;

    assert_cmd_snapshot!(test.inject_command().arg("--dry-run"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Would update ./app.js
    ✓ Checked 1 source file, 1 would change (dry run)

    ----- stderr -----
    ");
    assert_eq!(test.read_file("app.js")?, "show(translations.simple.en)\n");

    Ok(())
}

#[test]
fn test_single_file_argument() -> Result<()> {
    let test = CliTest::with_file("a.js", "show(translations.simple.en)\n")?;
    test.write_file("b.js", "show(translations.simple.en)\n")?;

    let output = test.inject_command().arg("a.js").output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    assert!(test.read_file("a.js")?.contains("const translations = "));
    assert_eq!(test.read_file("b.js")?, "show(translations.simple.en)\n");

    Ok(())
}

#[test]
fn test_node_modules_are_ignored() -> Result<()> {
    let test = CliTest::with_file("node_modules/lib/index.js", "translations.simple.en\n")?;

    let output = test.inject_command().output()?;
    assert!(output.status.success());
    assert_eq!(
        test.read_file("node_modules/lib/index.js")?,
        "translations.simple.en\n"
    );

    Ok(())
}

#[test]
fn test_config_file() -> Result<()> {
    let test = CliTest::with_file("src/app.js", "show(translations.simple.en)\n")?;
    test.write_file(
        ".transjectrc.json",
        r#"{
  "catalogFile": "catalog.tsv",
  "sourceRoot": "./src",
  "mode": "sibling",
  "formatter": null
}"#,
    )?;

    let output = test.command().arg("inject").output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(test.root().join("src/app.translations.js").exists());

    Ok(())
}

#[test]
fn test_missing_catalog_source() -> Result<()> {
    let test = CliTest::with_file("app.js", "show(translations.simple.en)\n")?;

    let output = test.command().args(["inject", "--no-format"]).output()?;
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("No catalog source"));
    assert_eq!(test.read_file("app.js")?, "show(translations.simple.en)\n");

    Ok(())
}

#[test]
fn test_translations_url_from_environment() -> Result<()> {
    let test = CliTest::with_file("app.js", "show(translations.simple.en)\n")?;

    let output = test
        .command()
        .args(["inject", "--no-format"])
        .env("TRANSLATIONS_URL", "not a url")
        .output()?;
    assert_eq!(output.status.code(), Some(3));
    assert!(stderr(&output).contains("Invalid catalog URL: \"not a url\""));

    Ok(())
}

#[test]
fn test_unreadable_path() -> Result<()> {
    let test = CliTest::with_file("app.js", "")?;

    let output = test.inject_command().arg("missing").output()?;
    assert_eq!(output.status.code(), Some(3));
    assert!(stderr(&output).contains("Cannot read path"));

    Ok(())
}

#[test]
fn test_invalid_catalog_aborts_before_writing() -> Result<()> {
    let test = CliTest::with_file("app.js", "show(translations.simple.en)\n")?;
    test.write_file(
        "catalog.tsv",
        "id\ten\nsimple\tSimple\ncar[tesla,expensive]\tX\ncar[x]\tY\n",
    )?;

    let output = test.inject_command().output()?;
    assert_eq!(output.status.code(), Some(3));
    assert!(stderr(&output).contains(
        "The key 'car' was used with arrays of length 2 as well as 1. Failed on looking at 'car[x]'"
    ));
    assert_eq!(test.read_file("app.js")?, "show(translations.simple.en)\n");

    Ok(())
}

#[test]
fn test_bad_argument() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().args(["inject", "--mode", "both"]).output()?;
    assert_eq!(output.status.code(), Some(2));

    Ok(())
}

#[test]
fn test_no_command_prints_help() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().output()?;
    assert!(output.status.success());
    assert!(stdout(&output).contains("Usage:"));

    Ok(())
}
