use std::path::Path;

use tempfile::TempDir;

use crate::payload::{PayloadSource, RESTORED_CHECKOUT};
use crate::runner::{Options, PatchStatus, Runner, RunnerError};

fn write_doc(dir: &TempDir, name: &str, contents: &str) -> String {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).unwrap();
    path.to_string_lossy().to_string()
}

fn read_doc(path: &str) -> String {
    std::fs::read_to_string(Path::new(path)).unwrap()
}

fn inline(target: &str, payload: &str) -> Options {
    Options {
        target: target.to_string(),
        payload: PayloadSource::Inline(payload.to_string()),
        ..Options::default()
    }
}

#[test]
fn patches_single_script_in_place() {
    let dir = TempDir::new().unwrap();
    let path = write_doc(&dir, "index.html", "<html><script>a();</script></html>");

    let outcome = Runner::new(inline(&path, "X")).unwrap().run().unwrap();

    assert_eq!(outcome.status, PatchStatus::Patched);
    assert_eq!(outcome.marker_index, Some(18));
    assert_eq!(read_doc(&path), "<html><script>a();X</script></html>");
}

#[test]
fn only_the_last_script_is_patched() {
    let dir = TempDir::new().unwrap();
    let path = write_doc(
        &dir,
        "index.html",
        "<script>one()</script>\n<body></body>\n<script>two()</script>\n",
    );

    Runner::new(inline(&path, "X")).unwrap().run().unwrap();

    assert_eq!(
        read_doc(&path),
        "<script>one()</script>\n<body></body>\n<script>two()X</script>\n"
    );
}

#[test]
fn missing_marker_leaves_file_untouched() {
    let dir = TempDir::new().unwrap();
    let original = "<html><body>no scripts here</body></html>";
    let path = write_doc(&dir, "index.html", original);

    let err = Runner::new(inline(&path, "X")).unwrap().run().unwrap_err();

    assert!(err.is_marker_not_found());
    assert!(err.to_string().starts_with("</script> not found in "));
    assert_eq!(read_doc(&path), original);
}

#[test]
fn rerunning_inserts_payload_again() {
    let dir = TempDir::new().unwrap();
    let path = write_doc(&dir, "index.html", "<script>a();</script>");
    let runner = Runner::new(inline(&path, "X")).unwrap();

    runner.run().unwrap();
    runner.run().unwrap();

    assert_eq!(read_doc(&path), "<script>a();XX</script>");
}

#[test]
fn skip_if_present_guards_reapplication() {
    let dir = TempDir::new().unwrap();
    let path = write_doc(&dir, "index.html", "<script>a();</script>");
    let runner = Runner::new(Options {
        skip_if_present: true,
        ..inline(&path, "X")
    })
    .unwrap();

    assert_eq!(runner.run().unwrap().status, PatchStatus::Patched);
    let second = runner.run().unwrap();

    assert_eq!(second.status, PatchStatus::AlreadyPresent);
    assert_eq!(second.marker_index, None);
    assert_eq!(read_doc(&path), "<script>a();X</script>");
}

#[test]
fn dry_run_does_not_write() {
    let dir = TempDir::new().unwrap();
    let original = "<script>a();</script>";
    let path = write_doc(&dir, "index.html", original);

    let outcome = Runner::new(Options {
        dry_run: true,
        ..inline(&path, "X")
    })
    .unwrap()
    .run()
    .unwrap();

    assert_eq!(outcome.status, PatchStatus::DryRun);
    assert_eq!(outcome.document, "<script>a();X</script>");
    assert_eq!(read_doc(&path), original);
}

#[test]
fn embedded_payload_restores_checkout_functions() {
    let dir = TempDir::new().unwrap();
    let page = "<html><body><script>\n  const stripe = null;\n</script></body></html>";
    let path = write_doc(&dir, "index.html", page);

    let outcome = Runner::new(Options {
        target: path.clone(),
        ..Options::default()
    })
    .unwrap()
    .run()
    .unwrap();

    let patched = read_doc(&path);
    let index = page.rfind("</script>").unwrap();
    let expected = format!("{}{}{}", &page[..index], RESTORED_CHECKOUT, &page[index..]);
    assert_eq!(patched, expected);
    assert_eq!(outcome.payload_bytes, RESTORED_CHECKOUT.len());
    assert_eq!(outcome.bytes_after, page.len() + RESTORED_CHECKOUT.len());
}

#[test]
fn payload_can_come_from_file() {
    let dir = TempDir::new().unwrap();
    let path = write_doc(&dir, "index.html", "<script></script>");
    let payload = write_doc(&dir, "restored.js", "init();");

    Runner::new(Options {
        target: path.clone(),
        payload: PayloadSource::FilePath(payload),
        ..Options::default()
    })
    .unwrap()
    .run()
    .unwrap();

    assert_eq!(read_doc(&path), "<script>init();</script>");
}

#[test]
fn custom_marker_is_honored() {
    let dir = TempDir::new().unwrap();
    let path = write_doc(&dir, "index.html", "<head></head><body></body>");

    Runner::new(Options {
        marker: "</body>".to_string(),
        ..inline(&path, "<p>hi</p>")
    })
    .unwrap()
    .run()
    .unwrap();

    assert_eq!(read_doc(&path), "<head></head><body><p>hi</p></body>");
}

#[test]
fn missing_target_is_a_read_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.html").to_string_lossy().to_string();

    let err = Runner::new(inline(&path, "X")).unwrap().run().unwrap_err();

    assert!(matches!(err, RunnerError::FileRead { kind: "target", .. }));
    assert!(!Path::new(&path).exists());
}

#[test]
fn non_utf8_target_is_a_read_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("latin1.html");
    std::fs::write(&path, b"<script>\xe9</script>").unwrap();

    let err = Runner::new(inline(&path.to_string_lossy(), "X"))
        .unwrap()
        .run()
        .unwrap_err();

    assert!(matches!(err, RunnerError::FileRead { .. }));
    assert_eq!(std::fs::read(&path).unwrap(), b"<script>\xe9</script>");
}

#[test]
fn empty_payload_file_is_rejected() {
    let dir = TempDir::new().unwrap();
    let original = "<script></script>";
    let path = write_doc(&dir, "index.html", original);
    let payload = write_doc(&dir, "empty.js", "");

    let err = Runner::new(Options {
        target: path.clone(),
        payload: PayloadSource::FilePath(payload),
        ..Options::default()
    })
    .unwrap()
    .run()
    .unwrap_err();

    assert!(matches!(err, RunnerError::EmptyPayload));
    assert_eq!(read_doc(&path), original);
}

#[test]
fn runner_validates_options() {
    assert!(matches!(
        Runner::new(Options::default()),
        Err(RunnerError::NoTarget)
    ));
    assert!(matches!(
        Runner::new(Options {
            target: "index.html".to_string(),
            marker: String::new(),
            ..Options::default()
        }),
        Err(RunnerError::EmptyMarker)
    ));
    assert!(matches!(
        Runner::new(inline("index.html", "")),
        Err(RunnerError::EmptyPayload)
    ));
}
