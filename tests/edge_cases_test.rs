use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use tempfile::TempDir;
use webrefresh::config::{Config, GeneratedCss};
use webrefresh::session::FileStatus;
use webrefresh::{Category, FileType, Modernizer, ModernizationSession, SessionOptions};

fn modernizer() -> Modernizer {
    Modernizer::with_config(Config::default())
}

#[test]
fn test_empty_files() {
    let modernizer = modernizer();

    let html = modernizer.transform("", Path::new("empty.html")).unwrap();
    assert_eq!(html.content, "");
    assert!(html.changes.is_empty());

    let js = modernizer.transform("", Path::new("empty.js")).unwrap();
    assert_eq!(js.content, "");

    // An empty stylesheet still gets the scaffold
    let css = modernizer.transform("", Path::new("empty.css")).unwrap();
    assert_eq!(css.changes.len(), 1);
}

#[test]
fn test_unsupported_extension() {
    assert!(modernizer().transform("var x = 1;", Path::new("app.ts")).is_none());
}

#[test]
fn test_unicode_content_survives() {
    let content = "<head></head><p>日本語 🎉</p><img src=\"café-au_lait.png\">";
    let result = modernizer().transform(content, Path::new("unicode.html")).unwrap();

    assert!(result.content.contains("<p>日本語 🎉</p>"));
    assert!(result.content.contains(r#"alt="Café Au Lait""#));
}

#[test]
fn test_uppercase_img_tag() {
    let result = modernizer()
        .transform(r#"<IMG SRC="Photo.PNG">"#, Path::new("a.html"))
        .unwrap();

    assert_eq!(result.content, r#"<IMG alt="Photo" SRC="Photo.PNG">"#);
}

#[test]
fn test_deprecated_tags_logged_per_pair() {
    let content = "<b>one</b><b>two</b><i>three</i>";
    let result = modernizer().transform(content, Path::new("a.html")).unwrap();

    assert_eq!(result.content, "<strong>one</strong><strong>two</strong><em>three</em>");
    let deprecated: Vec<_> = result
        .changes
        .iter()
        .filter(|c| c.category() == Category::DeprecatedTags)
        .collect();
    assert_eq!(deprecated.len(), 4);
}

#[test]
fn test_invalid_utf8_is_processed_lossily() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let page = temp_dir.path().join("latin1.html");
    fs::write(&page, b"<p>r\xe9sum\xe9</p><b>x</b>")?;

    let options = SessionOptions::new(temp_dir.path()).backup(false);
    let summary = ModernizationSession::new(options, Config::default()).run()?;

    assert_eq!(summary.files[0].status, FileStatus::Modified);
    let written = fs::read_to_string(&page)?;
    assert_eq!(written, "<p>r\u{FFFD}sum\u{FFFD}</p><strong>x</strong>");

    Ok(())
}

#[test]
fn test_node_modules_untouched() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    fs::create_dir_all(temp_dir.path().join("node_modules/jquery"))?;
    let vendored = temp_dir.path().join("node_modules/jquery/jquery.js");
    fs::write(&vendored, "var jQuery = 1;")?;
    fs::write(temp_dir.path().join("main.js"), "var main = 1;")?;

    let options = SessionOptions::new(temp_dir.path()).backup(false);
    let summary = ModernizationSession::new(options, Config::default()).run()?;

    assert_eq!(summary.files.len(), 1);
    assert_eq!(fs::read_to_string(&vendored)?, "var jQuery = 1;");

    Ok(())
}

#[test]
fn test_config_file_disables_rules_and_inlines_css() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    fs::write(
        temp_dir.path().join("webrefresh.toml"),
        "[rules]\nviewport = false\ndeprecated_tags = false\n\n[html]\ngenerated_css = \"style-block\"\n",
    )?;
    let page = temp_dir.path().join("index.html");
    fs::write(&page, "<head></head><b style=\"color: red\">x</b>")?;

    let modernizer = Modernizer::new(temp_dir.path())?;
    assert_eq!(modernizer.config().data.html.generated_css, GeneratedCss::StyleBlock);

    let summary = modernizer
        .session(SessionOptions::new(temp_dir.path()).backup(false))
        .run()?;

    let content = fs::read_to_string(&page)?;
    assert_eq!(
        content,
        "<head><style>\n.inline-style-1 { color: red }\n</style>\n</head><b class=\"inline-style-1\">x</b>"
    );
    assert_eq!(summary.total_changes, 1);
    assert_eq!(summary.category_count(Category::InlineStyles), 1);

    Ok(())
}

#[test]
fn test_single_file_root() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let script = temp_dir.path().join("legacy.js");
    fs::write(&script, "var a = 1;\nvar b = 2;\nb = 3;\n")?;
    fs::write(temp_dir.path().join("other.js"), "var untouched = 1;")?;

    let options = SessionOptions::new(&script).backup(false);
    let summary = ModernizationSession::new(options, Config::default()).run()?;

    assert_eq!(summary.files.len(), 1);
    assert_eq!(summary.files[0].file_type, FileType::Js);
    assert_eq!(fs::read_to_string(&script)?, "const a = 1;\nlet b = 2;\nb = 3;\n");
    assert_eq!(fs::read_to_string(temp_dir.path().join("other.js"))?, "var untouched = 1;");

    Ok(())
}

#[test]
fn test_backup_failure_is_fatal() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let missing = temp_dir.path().join("does-not-exist");

    let options = SessionOptions::new(&missing);
    let result = ModernizationSession::new(options, Config::default()).run();

    assert!(matches!(result, Err(webrefresh::RefreshError::Backup(_))));

    Ok(())
}

#[cfg(unix)]
#[test]
fn test_unreadable_file_is_skipped_not_fatal() -> anyhow::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let temp_dir = TempDir::new()?;
    let locked = temp_dir.path().join("a.css");
    fs::write(&locked, "p {}")?;
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000))?;
    fs::write(temp_dir.path().join("b.js"), "var b = 1;")?;

    // Root can read anything, nothing to assert in that case
    if fs::read(&locked).is_ok() {
        return Ok(());
    }

    let options = SessionOptions::new(temp_dir.path()).backup(false);
    let summary = ModernizationSession::new(options, Config::default()).run()?;

    let skipped: Vec<_> = summary.skipped_files().map(|(p, _)| p.to_path_buf()).collect();
    assert_eq!(skipped, vec![locked.clone()]);
    assert_eq!(summary.files[1].status, FileStatus::Modified);

    fs::set_permissions(&locked, fs::Permissions::from_mode(0o644))?;
    Ok(())
}

#[cfg(unix)]
#[test]
fn test_unwritable_file_is_skipped_and_session_continues() -> anyhow::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let temp_dir = TempDir::new()?;
    let locked_dir = temp_dir.path().join("locked");
    let open_dir = temp_dir.path().join("open");
    fs::create_dir_all(&locked_dir)?;
    fs::create_dir_all(&open_dir)?;

    let locked = locked_dir.join("a.js");
    let open = open_dir.join("b.js");
    fs::write(&locked, "var a = 1;")?;
    fs::write(&open, "var b = 1;")?;
    fs::set_permissions(&locked_dir, fs::Permissions::from_mode(0o555))?;

    // Root ignores directory permissions, nothing to assert in that case
    let write_check = locked_dir.join(".write-check");
    if fs::write(&write_check, "").is_ok() {
        fs::remove_file(&write_check)?;
        fs::set_permissions(&locked_dir, fs::Permissions::from_mode(0o755))?;
        return Ok(());
    }

    let options = SessionOptions::new(temp_dir.path()).backup(false);
    let result = ModernizationSession::new(options, Config::default()).run();
    fs::set_permissions(&locked_dir, fs::Permissions::from_mode(0o755))?;
    let summary = result?;

    assert_eq!(summary.files.len(), 2);
    match &summary.files[0].status {
        FileStatus::Skipped { reason } => assert!(reason.starts_with("write failed"), "{}", reason),
        other => panic!("expected a skipped file, got {:?}", other),
    }
    assert_eq!(summary.files[0].changes, 0);
    assert_eq!(fs::read_to_string(&locked)?, "var a = 1;");
    assert!(summary.changes.iter().all(|c| c.file() != locked.as_path()));

    assert_eq!(summary.files[1].status, FileStatus::Modified);
    assert_eq!(fs::read_to_string(&open)?, "const b = 1;");
    assert_eq!(summary.total_changes, 1);

    Ok(())
}
