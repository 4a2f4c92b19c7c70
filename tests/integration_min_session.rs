// Runs the real metric-trainer binary under a pseudo terminal for a one
// question drill: distance only, fixed seed, logs kept in a temp dir.
// Needs a Unix PTY, so it is ignored by default:
//   cargo test --test integration_min_session -- --ignored

#![cfg(unix)]

use std::time::Duration;

use expectrl::{spawn, Eof};

#[test]
#[ignore]
fn minimal_session_completes_and_exits() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let bin = assert_cmd::cargo::cargo_bin("metric-trainer");
    let cmd = format!(
        "{} -c a -n 1 --seed 1 --log-file {}",
        bin.display(),
        dir.path().join("trainer.log").display()
    );

    let mut p = spawn(cmd)?;

    // wait for the alternate screen
    std::thread::sleep(Duration::from_millis(200));

    // Skip the only question, then continue past the feedback screen
    p.send("skip\r")?;
    std::thread::sleep(Duration::from_millis(100));
    p.send("\r")?;
    std::thread::sleep(Duration::from_millis(100));

    // Leave from the summary screen
    p.send("q")?;

    p.expect(Eof)?;
    Ok(())
}
